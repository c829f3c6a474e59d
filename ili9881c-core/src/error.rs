//! Error taxonomy
//!
//! Configuration and sequence errors are raised before any hardware access
//! and reject the configuration as a whole. Transport errors happen at run
//! time and move the panel state machine to `Error`.

use core::fmt;

use heapless::String;

use crate::traits::TransportError;

/// Maximum length kept for an unknown field name in diagnostics
pub const MAX_FIELD_NAME_LEN: usize = 32;

/// Configuration was rejected before the device was constructed
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Numeric field outside its inclusive range
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    /// Field present with the wrong value type
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
    /// Field value is not one of the accepted choices
    InvalidChoice { field: &'static str },
    /// Model name not found in the preset table
    UnknownModel,
    /// Key not part of the configuration schema (name truncated)
    UnknownField(String<MAX_FIELD_NAME_LEN>),
    /// Two mutually exclusive fields were both set
    Conflicting {
        first: &'static str,
        second: &'static str,
    },
    /// Required field missing
    MissingField(&'static str),
    /// Delay literal could not be parsed
    InvalidDuration,
}

impl ConfigError {
    /// Build an `UnknownField` error, truncating long names
    pub fn unknown_field(name: &str) -> Self {
        let mut truncated = String::new();
        for ch in name.chars() {
            if truncated.push(ch).is_err() {
                break;
            }
        }
        ConfigError::UnknownField(truncated)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} = {value} is out of range (valid {min}..={max})"),
            ConfigError::InvalidType { field, expected } => {
                write!(f, "{field} must be {expected}")
            }
            ConfigError::InvalidChoice { field } => write!(f, "{field} has an unsupported value"),
            ConfigError::UnknownModel => f.write_str("unknown panel model"),
            ConfigError::UnknownField(name) => write!(f, "unknown field '{}'", name.as_str()),
            ConfigError::Conflicting { first, second } => {
                write!(f, "{first} and {second} cannot both be set")
            }
            ConfigError::MissingField(field) => write!(f, "{field} is required"),
            ConfigError::InvalidDuration => f.write_str("invalid delay literal"),
        }
    }
}

/// Malformed init-sequence item, with its position in the input list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SequenceError {
    /// The sequence itself is not a list
    NotAList,
    /// Byte list with no opcode
    EmptyCommand { index: usize },
    /// Structured item without the delay key
    UnknownFormat { index: usize },
    /// Item is neither a byte list nor a structured item
    InvalidItem { index: usize },
    /// Command element that is not a byte
    ByteOutOfRange { index: usize, value: i64 },
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::NotAList => f.write_str("init_sequence must be a list"),
            SequenceError::EmptyCommand { index } => {
                write!(f, "item {index}: command must have at least one byte")
            }
            SequenceError::UnknownFormat { index } => {
                write!(f, "item {index}: unknown command format")
            }
            SequenceError::InvalidItem { index } => {
                write!(f, "item {index}: invalid init-sequence item")
            }
            SequenceError::ByteOutOfRange { index, value } => {
                write!(f, "item {index}: {value} is not a byte")
            }
        }
    }
}

/// Umbrella error for panel operations
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// Configuration rejected
    Config(ConfigError),
    /// Init sequence rejected
    Sequence(SequenceError),
    /// Transport failure outside replay
    Transport(TransportError),
    /// Transport failure while replaying instruction `index`
    Replay { index: usize, error: TransportError },
    /// Operation requires the panel to be `Ready`
    NotReady,
}

impl From<ConfigError> for PanelError {
    fn from(e: ConfigError) -> Self {
        PanelError::Config(e)
    }
}

impl From<SequenceError> for PanelError {
    fn from(e: SequenceError) -> Self {
        PanelError::Sequence(e)
    }
}

impl From<TransportError> for PanelError {
    fn from(e: TransportError) -> Self {
        PanelError::Transport(e)
    }
}

impl fmt::Display for PanelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelError::Config(e) => write!(f, "configuration error: {e}"),
            PanelError::Sequence(e) => write!(f, "invalid init sequence: {e}"),
            PanelError::Transport(e) => write!(f, "transport error: {e}"),
            PanelError::Replay { index, error } => {
                write!(f, "replay failed at instruction {index}: {error}")
            }
            PanelError::NotReady => f.write_str("panel is not ready"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_out_of_range_names_field_and_range() {
        let e = ConfigError::OutOfRange {
            field: "data_lanes",
            value: 5,
            min: 1,
            max: 4,
        };
        assert_eq!(
            e.to_string(),
            "data_lanes = 5 is out of range (valid 1..=4)"
        );
    }

    #[test]
    fn test_unknown_field_truncates() {
        let long = "a_really_long_field_name_that_keeps_going_on";
        match ConfigError::unknown_field(long) {
            ConfigError::UnknownField(name) => {
                assert_eq!(name.len(), MAX_FIELD_NAME_LEN);
                assert!(long.starts_with(name.as_str()));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_conversions() {
        let e: PanelError = SequenceError::EmptyCommand { index: 2 }.into();
        assert_eq!(e, PanelError::Sequence(SequenceError::EmptyCommand { index: 2 }));

        let e: PanelError = TransportError::Bus.into();
        assert_eq!(e, PanelError::Transport(TransportError::Bus));
    }
}
