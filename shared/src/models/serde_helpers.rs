//! Common serde helpers for lenient wire decoding
//!
//! The store serializes record ids as integers; other deployments
//! front it with services that stringify them. Both forms decode to
//! the same opaque `String`.

use serde::Deserializer;

/// Deserialize an id that may arrive as a string or an integer
pub fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Record {
        #[serde(deserialize_with = "lenient_id")]
        id: String,
    }

    #[test]
    fn accepts_both_id_forms() {
        let from_int: Record = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(from_int.id, "42");

        let from_str: Record = serde_json::from_str(r#"{"id": "42"}"#).unwrap();
        assert_eq!(from_str.id, "42");
    }

    #[test]
    fn rejects_other_forms() {
        assert!(serde_json::from_str::<Record>(r#"{"id": true}"#).is_err());
        assert!(serde_json::from_str::<Record>(r#"{"id": null}"#).is_err());
    }
}
