//! Init-sequence compiler
//!
//! Turns the declarative `init_sequence` list into an [`InitSequence`].
//! Each item is either a byte list `[opcode, payload...]` or a table with a
//! single `delay` key. Everything is validated here, before any hardware is
//! touched.

use alloc::vec::Vec;

use super::duration::duration_from_value;
use super::{InitInstruction, InitSequence};
use crate::config::ConfigValue;
use crate::error::{PanelError, SequenceError};

/// Key marking a delay item
pub const DELAY_KEY: &str = "delay";

/// Compile a document value that must be a list of items
pub fn compile(value: &ConfigValue) -> Result<InitSequence, PanelError> {
    match value {
        ConfigValue::List(items) => compile_items(items),
        _ => Err(SequenceError::NotAList.into()),
    }
}

/// Compile a list of items, preserving order
pub fn compile_items(items: &[ConfigValue]) -> Result<InitSequence, PanelError> {
    let mut seq = InitSequence::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        seq.push(compile_item(index, item)?);
    }
    Ok(seq)
}

fn compile_item(index: usize, item: &ConfigValue) -> Result<InitInstruction, PanelError> {
    match item {
        ConfigValue::List(elements) => {
            let (first, rest) = elements
                .split_first()
                .ok_or(SequenceError::EmptyCommand { index })?;
            let opcode = to_byte(index, first)?;
            let payload = rest
                .iter()
                .map(|e| to_byte(index, e))
                .collect::<Result<Vec<u8>, SequenceError>>()?;
            Ok(InitInstruction::Command { opcode, payload })
        }
        ConfigValue::Table(entries) => match entries.as_slice() {
            [(key, value)] if key == DELAY_KEY => Ok(InitInstruction::Delay {
                duration_ms: duration_from_value(value)?,
            }),
            _ => Err(SequenceError::UnknownFormat { index }.into()),
        },
        _ => Err(SequenceError::InvalidItem { index }.into()),
    }
}

/// Coerce one element of a byte list
fn to_byte(index: usize, element: &ConfigValue) -> Result<u8, SequenceError> {
    let value = match element {
        ConfigValue::Integer(v) => *v,
        ConfigValue::String(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| SequenceError::InvalidItem { index })?,
        _ => return Err(SequenceError::InvalidItem { index }),
    };
    u8::try_from(value).map_err(|_| SequenceError::ByteOutOfRange { index, value })
}
