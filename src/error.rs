use thiserror::Error;


/// error regarding blocking line reads
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// the pending line does not fit the caller's destination, nothing was consumed
    #[error("destination cannot hold a complete line")]
    BufferTooSmall,
}

/// error regarding unit configuration and transmission
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitError<E> {
    /// settings invalid or refused by the port hardware
    #[error("invalid or rejected serial configuration")]
    Config,
    /// requested option exists on other ports but not on this one
    #[error("option is not implemented")]
    NotImplemented,
    /// the bus reported a transmission failure, the underlying status is embedded
    #[error("transmission failed on the bus")]
    Bus(E),
}
