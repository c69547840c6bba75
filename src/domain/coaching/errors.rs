//! Coaching-specific error types.

use thiserror::Error;

use crate::domain::foundation::ProfileId;
use crate::ports::AIError;

/// Failures surfaced to the user by coaching actions.
///
/// Model format problems never appear here; they are absorbed into fallback
/// records.
#[derive(Debug, Error)]
pub enum CoachingError {
    /// The language model could not be reached or rejected the request.
    #[error("{0}")]
    Provider(#[from] AIError),

    #[error("profile not found: {0}")]
    ProfileNotFound(ProfileId),

    #[error("no practice profile selected")]
    NoProfileSelected,

    #[error("message cannot be empty")]
    EmptyMessage,
}

impl CoachingError {
    /// Whether the failure came from the external model call.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, CoachingError::Provider(_))
    }
}
