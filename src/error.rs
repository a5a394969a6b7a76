use thiserror::Error;

/// Why a trace could not be decoded any further.
///
/// A short read and a corrupt length prefix mean the same thing to a
/// consumer: the rest of the file is unusable. Everything decoded before
/// the error remains valid.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error("not an alTrace log file (magic {0:#010x})")]
    BadMagic(u32),

    #[error("unsupported trace format version {0}")]
    UnsupportedVersion(u32),

    #[error("unknown event tag {tag} at offset {offset:#x}")]
    UnknownTag { tag: u16, offset: u64 },

    #[error("trace truncated at offset {at:#x} (wanted {wanted} more bytes)")]
    Truncated { at: u64, wanted: usize },

    #[error("error reading trace file: {0}")]
    Io(String),
}

impl From<std::io::Error> for DecodeError {
    fn from(err: std::io::Error) -> Self {
        DecodeError::Io(err.to_string())
    }
}
