//! Normalized init instructions

use alloc::vec::Vec;
use core::slice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One step of a panel bring-up sequence
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InitInstruction {
    /// Write `opcode` followed by `payload` (which may be empty)
    Command { opcode: u8, payload: Vec<u8> },
    /// Pause replay
    Delay { duration_ms: u32 },
}

impl InitInstruction {
    pub fn command(opcode: u8, payload: &[u8]) -> Self {
        InitInstruction::Command {
            opcode,
            payload: payload.to_vec(),
        }
    }

    pub fn delay(duration_ms: u32) -> Self {
        InitInstruction::Delay { duration_ms }
    }

    /// Opcode followed by payload, as authored; `None` for delays
    pub fn flatten(&self) -> Option<Vec<u8>> {
        match self {
            InitInstruction::Command { opcode, payload } => {
                let mut bytes = Vec::with_capacity(payload.len() + 1);
                bytes.push(*opcode);
                bytes.extend_from_slice(payload);
                Some(bytes)
            }
            InitInstruction::Delay { .. } => None,
        }
    }
}

/// Ordered bring-up sequence
///
/// Insertion order is replay order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InitSequence {
    instructions: Vec<InitInstruction>,
}

impl InitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instructions: Vec::with_capacity(capacity),
        }
    }

    /// Append an instruction at the end
    pub fn push(&mut self, instruction: InitInstruction) {
        self.instructions.push(instruction);
    }

    pub fn clear(&mut self) {
        self.instructions.clear();
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&InitInstruction> {
        self.instructions.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, InitInstruction> {
        self.instructions.iter()
    }

    pub fn as_slice(&self) -> &[InitInstruction] {
        &self.instructions
    }

    /// Total time spent in delays, in milliseconds
    pub fn total_delay_ms(&self) -> u64 {
        self.instructions
            .iter()
            .map(|i| match i {
                InitInstruction::Delay { duration_ms } => *duration_ms as u64,
                InitInstruction::Command { .. } => 0,
            })
            .sum()
    }

    /// Number of command instructions
    pub fn command_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| matches!(i, InitInstruction::Command { .. }))
            .count()
    }
}

impl From<Vec<InitInstruction>> for InitSequence {
    fn from(instructions: Vec<InitInstruction>) -> Self {
        Self { instructions }
    }
}

impl FromIterator<InitInstruction> for InitSequence {
    fn from_iter<I: IntoIterator<Item = InitInstruction>>(iter: I) -> Self {
        Self {
            instructions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a InitSequence {
    type Item = &'a InitInstruction;
    type IntoIter = slice::Iter<'a, InitInstruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_flatten_command() {
        let i = InitInstruction::command(0x29, &[0x00]);
        assert_eq!(i.flatten(), Some(vec![0x29, 0x00]));
        assert_eq!(InitInstruction::command(0x11, &[]).flatten(), Some(vec![0x11]));
        assert_eq!(InitInstruction::delay(10).flatten(), None);
    }

    #[test]
    fn test_sequence_keeps_order() {
        let mut seq = InitSequence::new();
        seq.push(InitInstruction::command(0x11, &[]));
        seq.push(InitInstruction::delay(120));
        seq.push(InitInstruction::command(0x29, &[]));

        assert_eq!(seq.len(), 3);
        assert_eq!(seq.get(1), Some(&InitInstruction::delay(120)));
        assert_eq!(seq.command_count(), 2);
        assert_eq!(seq.total_delay_ms(), 120);

        seq.clear();
        assert!(seq.is_empty());
    }
}
