// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Loosely-typed argument bag accompanying each call.
//
// Every read is total: a missing key, an explicit null, or a value of the
// wrong type all read as `None`.  Unrecognised keys are ignored.  Required
// arguments are enforced by the dispatcher, not here.

use serde_json::{Map, Value};

/// The key-value payload of one call request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentBag(Map<String, Value>);

impl ArgumentBag {
    /// Wrap an incoming argument value.  Anything that is not a JSON object
    /// (including null — calls without arguments) becomes an empty bag.
    pub fn new(arguments: Value) -> Self {
        match arguments {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrowed string argument.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Owned string argument.
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_str(key).map(str::to_string)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }

    /// Numeric argument.  Integers widen to f64.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(Value::as_f64)
    }

    /// Nested map argument, wrapped as a bag of its own.
    pub fn get_bag(&self, key: &str) -> Option<ArgumentBag> {
        self.get_map(key).map(ArgumentBag)
    }

    /// Nested map argument as a raw JSON object (for payloads the bridge
    /// forwards opaquely, such as signup's extra data).
    pub fn get_map(&self, key: &str) -> Option<Map<String, Value>> {
        match self.0.get(key) {
            Some(Value::Object(map)) => Some(map.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_arguments_become_empty_bag() {
        assert!(ArgumentBag::new(Value::Null).is_empty());
        assert!(ArgumentBag::new(json!("just a string")).is_empty());
        assert!(ArgumentBag::new(json!([1, 2, 3])).is_empty());
    }

    #[test]
    fn missing_key_reads_as_none() {
        let bag = ArgumentBag::new(json!({ "token": "abc" }));
        assert_eq!(bag.get_str("token"), Some("abc"));
        assert_eq!(bag.get_str("secretKey"), None);
        assert_eq!(bag.get_bool("debug"), None);
    }

    #[test]
    fn wrong_type_reads_as_none() {
        let bag = ArgumentBag::new(json!({
            "token": 42,
            "debug": "yes",
            "amount": "99.5",
            "userData": "not a map",
        }));
        assert_eq!(bag.get_str("token"), None);
        assert_eq!(bag.get_bool("debug"), None);
        assert_eq!(bag.get_f64("amount"), None);
        assert!(bag.get_bag("userData").is_none());
    }

    #[test]
    fn explicit_null_reads_as_none() {
        let bag = ArgumentBag::new(json!({ "eventId": null }));
        assert_eq!(bag.get_str("eventId"), None);
    }

    #[test]
    fn integers_widen_to_f64() {
        let bag = ArgumentBag::new(json!({ "amount": 250 }));
        assert_eq!(bag.get_f64("amount"), Some(250.0));
    }

    #[test]
    fn nested_map_round_trips() {
        let bag = ArgumentBag::new(json!({
            "userData": { "id": "u-1", "name": "Ada" },
        }));
        let nested = bag.get_bag("userData").expect("nested bag");
        assert_eq!(nested.get_str("id"), Some("u-1"));
        assert_eq!(nested.get_str("name"), Some("Ada"));
    }
}
