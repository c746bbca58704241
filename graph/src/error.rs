use thiserror::Error;

pub type Result<T> = std::result::Result<T, LayoutError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The caller handed over input the layout cannot work with
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Folding could not bring a row back within the lane budget
    #[error("lane invariant broken at row {row}: {lanes} lanes left after folding, budget is {max_lanes}")]
    InvariantBroken {
        row: usize,
        lanes: usize,
        max_lanes: usize,
    },
}

impl LayoutError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_invariant_broken(&self) -> bool {
        matches!(self, Self::InvariantBroken { .. })
    }
}
