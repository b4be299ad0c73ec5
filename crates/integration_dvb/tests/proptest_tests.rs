//! Property-based tests for query parameter encoding
//!
//! These tests use proptest to verify the encoding rules across many random
//! parameter combinations.

use std::collections::BTreeSet;

use integration_dvb::{MonitorStopParams, PointParams, RequestDescriptor, RouteParams};
use proptest::prelude::*;

/// Encode pairs into a URL and parse them back
fn round_trip(path: &str, pairs: &[(String, String)]) -> BTreeSet<(String, String)> {
    let url = RequestDescriptor::get(path)
        .with_query(pairs.to_vec())
        .url("https://webapi.vvo-online.de")
        .unwrap();
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn keys(pairs: &[(String, String)]) -> BTreeSet<&str> {
    pairs.iter().map(|(k, _)| k.as_str()).collect()
}

fn value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

fn monitor_params() -> impl Strategy<Value = MonitorStopParams> {
    (
        "[a-zA-Z0-9 &=+/äöüß]{1,20}",
        proptest::option::of("[a-z&= ]{0,8}"),
        proptest::option::of("[0-9:T-]{0,20}"),
        proptest::option::of(any::<bool>()),
        proptest::option::of(0u32..500),
        proptest::option::of(any::<bool>()),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(
            |(stop_id, format, time, is_arrival, limit, short_term_changes, mentz_only)| {
                MonitorStopParams {
                    stop_id,
                    format,
                    time,
                    is_arrival,
                    limit,
                    short_term_changes,
                    mentz_only,
                }
            },
        )
}

// ============================================================================
// Stop monitor
// ============================================================================

mod monitor_tests {
    use super::*;

    proptest! {
        #[test]
        fn query_round_trips(params in monitor_params()) {
            let pairs = params.to_query().unwrap();
            let expected: BTreeSet<_> = pairs.iter().cloned().collect();
            prop_assert_eq!(round_trip("/dm", &pairs), expected);
        }

        #[test]
        fn absent_options_are_omitted(params in monitor_params()) {
            let pairs = params.to_query().unwrap();
            let keys = keys(&pairs);

            prop_assert!(keys.contains("stopid"));
            prop_assert_eq!(keys.contains("isarrival"), params.is_arrival.is_some());
            prop_assert_eq!(keys.contains("shorttermchanges"), params.short_term_changes.is_some());
            prop_assert_eq!(keys.contains("mentzonly"), params.mentz_only.is_some());
            prop_assert_eq!(keys.contains("limit"), params.limit.is_some_and(|l| l > 0));
            prop_assert_eq!(
                keys.contains("format"),
                params.format.as_deref().is_some_and(|f| !f.is_empty())
            );
        }

        #[test]
        fn booleans_are_sent_verbatim(flag in any::<bool>()) {
            let pairs = MonitorStopParams::new("33000028")
                .with_arrival(flag)
                .to_query()
                .unwrap();
            let expected = if flag { "true" } else { "false" };
            prop_assert_eq!(value(&pairs, "isarrival"), Some(expected));
        }

        #[test]
        fn positive_limits_are_decimal(limit in 1u32..100_000) {
            let pairs = MonitorStopParams::new("33000028")
                .with_limit(limit)
                .to_query()
                .unwrap();
            let expected = limit.to_string();
            prop_assert_eq!(value(&pairs, "limit"), Some(expected.as_str()));
        }
    }
}

// ============================================================================
// Trip planner and point finder
// ============================================================================

mod other_endpoint_tests {
    use super::*;

    proptest! {
        #[test]
        fn route_query_round_trips(
            origin in "[a-zA-Z0-9 ]{1,15}",
            destination in "[a-zA-Z0-9 ]{1,15}",
            via in proptest::option::of("[a-zA-Z ]{0,10}"),
            is_arrival_time in proptest::option::of(any::<bool>())
        ) {
            let params = RouteParams {
                via,
                is_arrival_time,
                ..RouteParams::new(origin, destination)
            };
            let pairs = params.to_query().unwrap();
            let expected: BTreeSet<_> = pairs.iter().cloned().collect();
            prop_assert_eq!(round_trip("/tr/trips", &pairs), expected);
        }

        #[test]
        fn point_query_round_trips(
            query in "[a-zA-Z0-9 &?#=]{1,20}",
            stops_only in proptest::option::of(any::<bool>()),
            limit in proptest::option::of(0u32..50)
        ) {
            let params = PointParams {
                stops_only,
                limit,
                ..PointParams::new(query)
            };
            let pairs = params.to_query().unwrap();
            let expected: BTreeSet<_> = pairs.iter().cloned().collect();
            prop_assert_eq!(round_trip("/tr/pointfinder", &pairs), expected);
        }

        #[test]
        fn empty_required_field_always_fails(destination in "[a-z]{0,5}") {
            let result = RouteParams::new("", destination).to_query();
            prop_assert!(result.is_err());
            prop_assert_eq!(result.unwrap_err().field, "origin");
        }
    }
}
