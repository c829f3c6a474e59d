//! Declarative configuration document
//!
//! Already-parsed key/value data handed over by whatever front end read the
//! user's configuration. Tables keep their entries in document order.

use alloc::string::String;
use alloc::vec::Vec;

use crate::error::ConfigError;

/// A node of the configuration document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Table(Vec<(String, ConfigValue)>),
}

impl ConfigValue {
    /// Look up `key` in a table; `None` for missing keys and non-tables
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        match self {
            ConfigValue::Table(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Human-readable name of the value kind
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::List(_) => "list",
            ConfigValue::Table(_) => "table",
        }
    }

    pub(crate) fn expect_integer(&self, field: &'static str) -> Result<i64, ConfigError> {
        match self {
            ConfigValue::Integer(v) => Ok(*v),
            _ => Err(ConfigError::InvalidType {
                field,
                expected: "an integer",
            }),
        }
    }

    pub(crate) fn expect_bool(&self, field: &'static str) -> Result<bool, ConfigError> {
        match self {
            ConfigValue::Bool(v) => Ok(*v),
            _ => Err(ConfigError::InvalidType {
                field,
                expected: "a boolean",
            }),
        }
    }

    pub(crate) fn expect_str(&self, field: &'static str) -> Result<&str, ConfigError> {
        match self {
            ConfigValue::String(v) => Ok(v),
            _ => Err(ConfigError::InvalidType {
                field,
                expected: "a string",
            }),
        }
    }

    pub(crate) fn expect_table(
        &self,
        field: &'static str,
    ) -> Result<&[(String, ConfigValue)], ConfigError> {
        match self {
            ConfigValue::Table(entries) => Ok(entries),
            _ => Err(ConfigError::InvalidType {
                field,
                expected: "a table",
            }),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(v: bool) -> Self {
        ConfigValue::Bool(v)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        ConfigValue::Integer(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::String(v.into())
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(v: Vec<ConfigValue>) -> Self {
        ConfigValue::List(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_get() {
        let doc = ConfigValue::Table(vec![
            ("model".into(), "custom".into()),
            ("rotation".into(), 90i64.into()),
        ]);
        assert_eq!(doc.get("rotation"), Some(&ConfigValue::Integer(90)));
        assert_eq!(doc.get("missing"), None);
        assert_eq!(ConfigValue::Integer(1).get("model"), None);
    }

    #[cfg(feature = "defmt")]
    #[test]
    fn test_document_is_loggable() {
        fn assert_format<T: defmt::Format>(_: &T) {}
        let doc = ConfigValue::Table(vec![(
            "init_sequence".into(),
            ConfigValue::List(vec![ConfigValue::Float(1.5)]),
        )]);
        assert_format(&doc);
    }

    #[test]
    fn test_expect_helpers() {
        assert_eq!(ConfigValue::Integer(3).expect_integer("hbp"), Ok(3));
        assert_eq!(
            ConfigValue::Bool(true).expect_integer("hbp"),
            Err(ConfigError::InvalidType {
                field: "hbp",
                expected: "an integer"
            })
        );
        assert_eq!(ConfigValue::from("rgb").expect_str("color_order"), Ok("rgb"));
        assert!(ConfigValue::from(1i64).expect_bool("invert_colors").is_err());
        assert_eq!(ConfigValue::Float(1.0).kind(), "float");
    }
}
