/// Caller-side mistakes the engine refuses to turn into an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Precondition {
    #[error("max ({max}) is below min ({min})")]
    InvertedRange { min: i64, max: i64 },
    #[error("options have a total weight of zero")]
    ZeroTotalWeight,
    #[error("total option weight overflows u64")]
    WeightOverflow,
}

#[derive(Debug, thiserror::Error)]
pub enum FairError {
    /// The OS random source could not be read while generating a seed.
    #[error("secure random source unavailable: {0}")]
    ResourceUnavailable(#[from] rand::Error),
    #[error("precondition violated: {0}")]
    PreconditionViolation(#[from] Precondition),
}

pub type FairResult<T> = Result<T, FairError>;

impl FairError {
    pub fn precondition(&self) -> Option<Precondition> {
        match self {
            FairError::PreconditionViolation(p) => Some(*p),
            FairError::ResourceUnavailable(_) => None,
        }
    }
}
