//! Init-sequence model, compiler and vendor defaults

pub mod compiler;
pub mod defaults;
pub mod duration;
pub mod instruction;

pub use compiler::{compile, compile_items, DELAY_KEY};
pub use defaults::vendor_sequence;
pub use duration::{duration_from_value, parse_duration};
pub use instruction::{InitInstruction, InitSequence};
