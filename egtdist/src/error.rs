use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The fixed-width backend cannot hold `n!` for this `n`.
    #[error("{n}! exceeds the fixed-precision limit of {limit}!")]
    OverflowGuard { n: u64, limit: u64 },
}

impl DistributionError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DistributionError::InvalidArgument(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DistributionError>;
