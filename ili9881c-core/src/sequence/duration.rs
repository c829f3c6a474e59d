//! Delay literal parsing
//!
//! Accepted forms, all yielding whole milliseconds:
//!
//! - `120` (integer value or numeric string): milliseconds
//! - `"120ms"`: integer milliseconds
//! - `"1.5s"`, `"2s"`, `".25s"`: decimal seconds, rounded half-up to the
//!   nearest millisecond
//!
//! Surrounding whitespace is ignored. Signs, exponents and anything that
//! does not fit in a `u32` are rejected.

use crate::config::ConfigValue;
use crate::error::ConfigError;

/// Parse a textual delay literal into milliseconds
pub fn parse_duration(literal: &str) -> Result<u32, ConfigError> {
    let text = literal.trim();

    if let Some(ms) = text.strip_suffix("ms") {
        parse_digits(ms)
    } else if let Some(secs) = text.strip_suffix('s') {
        parse_seconds(secs)
    } else {
        parse_digits(text)
    }
}

/// Convert a document value into milliseconds
pub fn duration_from_value(value: &ConfigValue) -> Result<u32, ConfigError> {
    match value {
        ConfigValue::Integer(ms) => u32::try_from(*ms).map_err(|_| ConfigError::InvalidDuration),
        // Whole-number floats come out of some front ends for plain integers
        ConfigValue::Float(ms) => {
            if *ms >= 0.0 && *ms <= u32::MAX as f64 && (*ms as u32) as f64 == *ms {
                Ok(*ms as u32)
            } else {
                Err(ConfigError::InvalidDuration)
            }
        }
        ConfigValue::String(text) => parse_duration(text),
        _ => Err(ConfigError::InvalidDuration),
    }
}

fn parse_digits(text: &str) -> Result<u32, ConfigError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidDuration);
    }
    text.parse::<u32>().map_err(|_| ConfigError::InvalidDuration)
}

fn parse_seconds(text: &str) -> Result<u32, ConfigError> {
    let (whole, frac) = match text.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (text, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(ConfigError::InvalidDuration);
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(ConfigError::InvalidDuration);
    }

    let whole_ms = if whole.is_empty() {
        0
    } else {
        parse_digits(whole)?
            .checked_mul(1000)
            .ok_or(ConfigError::InvalidDuration)?
    };

    // First three fractional digits are milliseconds, the fourth rounds
    let mut frac_ms: u32 = 0;
    let mut digits = frac.bytes();
    for _ in 0..3 {
        let d = digits.next().map_or(0, |b| (b - b'0') as u32);
        frac_ms = frac_ms * 10 + d;
    }
    if digits.next().is_some_and(|b| b >= b'5') {
        frac_ms += 1;
    }

    whole_ms
        .checked_add(frac_ms)
        .ok_or(ConfigError::InvalidDuration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_bare_milliseconds() {
        assert_eq!(parse_duration("50"), Ok(50));
        assert_eq!(parse_duration(" 0 "), Ok(0));
        assert_eq!(duration_from_value(&ConfigValue::Integer(50)), Ok(50));
    }

    #[test]
    fn test_ms_suffix() {
        assert_eq!(parse_duration("120ms"), Ok(120));
        assert_eq!(parse_duration("0ms"), Ok(0));
        assert_eq!(parse_duration("1.5ms"), Err(ConfigError::InvalidDuration));
        assert_eq!(parse_duration("ms"), Err(ConfigError::InvalidDuration));
    }

    #[test]
    fn test_seconds_suffix() {
        assert_eq!(parse_duration("1.5s"), Ok(1500));
        assert_eq!(parse_duration("2s"), Ok(2000));
        assert_eq!(parse_duration(".25s"), Ok(250));
        assert_eq!(parse_duration("1.s"), Ok(1000));
        assert_eq!(parse_duration("0.0004s"), Ok(0));
        assert_eq!(parse_duration("0.0005s"), Ok(1));
        assert_eq!(parse_duration("1.2345s"), Ok(1235));
        assert_eq!(parse_duration(".s"), Err(ConfigError::InvalidDuration));
        assert_eq!(parse_duration("s"), Err(ConfigError::InvalidDuration));
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["", "abc", "-5", "-5ms", "+5", "1e3", "1.2.3s", "12 ms", "5m", "1,5s"] {
            assert_eq!(parse_duration(bad), Err(ConfigError::InvalidDuration), "{bad}");
        }
    }

    #[test]
    fn test_rejects_overflow() {
        assert_eq!(parse_duration("4294967295"), Ok(u32::MAX));
        assert_eq!(parse_duration("4294967296"), Err(ConfigError::InvalidDuration));
        assert_eq!(parse_duration("4294968s"), Err(ConfigError::InvalidDuration));
    }

    #[test]
    fn test_value_forms() {
        assert_eq!(
            duration_from_value(&ConfigValue::String("1.5s".to_string())),
            Ok(1500)
        );
        assert_eq!(duration_from_value(&ConfigValue::Float(20.0)), Ok(20));
        assert_eq!(
            duration_from_value(&ConfigValue::Float(20.5)),
            Err(ConfigError::InvalidDuration)
        );
        assert_eq!(
            duration_from_value(&ConfigValue::Integer(-1)),
            Err(ConfigError::InvalidDuration)
        );
        assert_eq!(
            duration_from_value(&ConfigValue::Bool(true)),
            Err(ConfigError::InvalidDuration)
        );
    }
}
