use crate::ports::playlist_provider::ProviderError;
use crate::services::playlist_algebra::set_ops::SetOperation;

const BAD_GATEWAY: u16 = 502;
const UNPROCESSABLE_ENTITY: u16 = 422;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetAlgebraError {
    /// A provider call answered with a non-success status.
    #[error("{message}")]
    Provider { status: u16, message: String },
    /// The set operation produced no tracks.
    #[error("{}", empty_result_message(.operation))]
    EmptyResult { operation: SetOperation },
    #[error("Failed to talk to provider: {0}")]
    Transport(String),
    /// A track reached the materializer without a playable uri.
    #[error("Track {track_id} has no playable uri")]
    MissingTrackUri { track_id: String },
}

fn empty_result_message(operation: &SetOperation) -> &'static str {
    match operation {
        SetOperation::Intersection => "Playlists don't have anything in common",
        SetOperation::Union => "Both playlists are empty",
        SetOperation::Complement => "Second playlist has nothing that the first one doesn't",
    }
}

impl SetAlgebraError {
    /// HTTP status the error should be reported with.
    pub fn status(&self) -> u16 {
        match self {
            SetAlgebraError::Provider { status, .. } if (400..=599).contains(status) => *status,
            SetAlgebraError::Provider { .. } => BAD_GATEWAY,
            SetAlgebraError::EmptyResult { .. } => UNPROCESSABLE_ENTITY,
            SetAlgebraError::Transport(_) => BAD_GATEWAY,
            SetAlgebraError::MissingTrackUri { .. } => BAD_GATEWAY,
        }
    }
}

impl From<ProviderError> for SetAlgebraError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::Status { status, message } => {
                SetAlgebraError::Provider { status, message }
            }
            ProviderError::Transport(reason) => SetAlgebraError::Transport(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_status_is_kept() {
        let error = SetAlgebraError::from(ProviderError::Status {
            status: 404,
            message: "Invalid playlist Id".to_string(),
        });

        assert_eq!(error.status(), 404);
        assert_eq!(error.to_string(), "Invalid playlist Id");
    }

    #[test]
    fn test_non_error_provider_status_becomes_bad_gateway() {
        let error = SetAlgebraError::Provider {
            status: 302,
            message: "Found".to_string(),
        };

        assert_eq!(error.status(), 502);
    }

    #[test]
    fn test_empty_result_is_not_a_provider_failure() {
        let error = SetAlgebraError::EmptyResult {
            operation: SetOperation::Intersection,
        };

        assert_eq!(error.status(), 422);
        assert_eq!(error.to_string(), "Playlists don't have anything in common");
    }

    #[test]
    fn test_transport_is_bad_gateway() {
        let error = SetAlgebraError::from(ProviderError::Transport("connection reset".into()));

        assert_eq!(error.status(), 502);
        assert!(error.to_string().contains("connection reset"));
    }
}
