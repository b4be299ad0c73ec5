//! Query string building shared by the endpoint parameter structs
//!
//! Optional values follow the upstream API conventions: strings are sent only
//! when non-empty, integers only when positive, and booleans whenever they
//! are set (so an explicit `false` is sent as `false`).

use crate::error::ValidationError;

/// Ordered list of query parameters
pub type QueryPairs = Vec<(String, String)>;

/// Collects query parameters for one request
#[derive(Debug, Default)]
pub struct QueryBuilder {
    pairs: QueryPairs,
}

impl QueryBuilder {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required string parameter
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming `key` if `value` is empty.
    pub fn required(mut self, key: &str, value: &str) -> Result<Self, ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::empty(key));
        }
        self.pairs.push((key.to_string(), value.to_string()));
        Ok(self)
    }

    /// Add a string parameter if it is set and non-empty
    #[must_use]
    pub fn optional_str(mut self, key: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Add a boolean parameter if it is set, including `false`
    #[must_use]
    pub fn optional_bool(mut self, key: &str, value: Option<bool>) -> Self {
        if let Some(value) = value {
            self.pairs.push((key.to_string(), bool_str(value).to_string()));
        }
        self
    }

    /// Add an integer parameter if it is set and strictly positive
    #[must_use]
    pub fn optional_positive(mut self, key: &str, value: Option<u32>) -> Self {
        if let Some(value) = value.filter(|v| *v > 0) {
            self.pairs.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Finish and return the collected pairs
    #[must_use]
    pub fn build(self) -> QueryPairs {
        self.pairs
    }
}

/// Convert bool to "true"/"false" str for query params
const fn bool_str(val: bool) -> &'static str {
    if val { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn test_bool_str() {
        assert_eq!(bool_str(true), "true");
        assert_eq!(bool_str(false), "false");
    }

    #[test]
    fn test_required_present() {
        let pairs = QueryBuilder::new()
            .required("stopid", "33000028")
            .unwrap()
            .build();
        assert_eq!(pairs, vec![pair("stopid", "33000028")]);
    }

    #[test]
    fn test_required_empty_fails() {
        let err = QueryBuilder::new().required("origin", "").unwrap_err();
        assert_eq!(err.field, "origin");
        assert_eq!(err.message, "origin can not be empty");
    }

    #[test]
    fn test_optional_str() {
        let pairs = QueryBuilder::new()
            .optional_str("format", None)
            .optional_str("time", Some(""))
            .optional_str("via", Some("Postplatz"))
            .build();
        assert_eq!(pairs, vec![pair("via", "Postplatz")]);
    }

    #[test]
    fn test_optional_bool_keeps_false() {
        let pairs = QueryBuilder::new()
            .optional_bool("isarrival", None)
            .optional_bool("mentzonly", Some(false))
            .optional_bool("shorttermchanges", Some(true))
            .build();
        assert_eq!(
            pairs,
            vec![pair("mentzonly", "false"), pair("shorttermchanges", "true")]
        );
    }

    #[test]
    fn test_optional_positive() {
        let pairs = QueryBuilder::new()
            .optional_positive("limit", None)
            .optional_positive("limit", Some(0))
            .optional_positive("limit", Some(15))
            .build();
        assert_eq!(pairs, vec![pair("limit", "15")]);
    }
}
