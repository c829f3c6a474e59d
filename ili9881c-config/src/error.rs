//! Load and persistence errors

use core::fmt;

use ili9881c_core::PanelError;

/// Errors from reading TOML or snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// TOML syntax error, with the byte offset where known
    Syntax { offset: Option<usize> },
    /// TOML datetime values have no meaning for a panel
    UnsupportedDatetime,
    /// Document parsed but failed validation
    Panel(PanelError),
    /// Snapshot does not start with the expected magic number
    BadMagic,
    /// Snapshot was written by an incompatible version
    VersionMismatch { found: u16 },
    /// Snapshot body does not match its checksum
    CrcMismatch,
    /// Snapshot shorter than its header
    Truncated,
    /// Serialization failed (buffer too small)
    Serialize,
    /// Deserialization failed
    Deserialize,
}

impl From<PanelError> for LoadError {
    fn from(e: PanelError) -> Self {
        LoadError::Panel(e)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Syntax { offset: Some(at) } => write!(f, "TOML syntax error at byte {at}"),
            LoadError::Syntax { offset: None } => f.write_str("TOML syntax error"),
            LoadError::UnsupportedDatetime => f.write_str("datetime values are not supported"),
            LoadError::Panel(e) => write!(f, "{e}"),
            LoadError::BadMagic => f.write_str("not a panel configuration snapshot"),
            LoadError::VersionMismatch { found } => {
                write!(f, "snapshot version {found} is not supported")
            }
            LoadError::CrcMismatch => f.write_str("snapshot checksum mismatch"),
            LoadError::Truncated => f.write_str("snapshot truncated"),
            LoadError::Serialize => f.write_str("snapshot does not fit the buffer"),
            LoadError::Deserialize => f.write_str("snapshot body is malformed"),
        }
    }
}
