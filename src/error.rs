use thiserror::Error;

/// User-facing failures. The `Display` text is exactly what the footer shows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankerError {
    #[error("You must have at least one bank to analyze.")]
    LastRow,

    #[error("Bank #{0} does not exist.")]
    UnknownRow(usize),

    #[error("Please enter data for at least one bank.")]
    NoValidBanks,

    /// Non-2xx reply from the scorer, carrying its `error` message.
    #[error("Error: {0}")]
    Remote(String),

    /// Network failure or a body that could not be decoded.
    #[error("Error: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, RankerError>;
