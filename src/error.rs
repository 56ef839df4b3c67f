use thiserror::Error;

use crate::events::Notice;

/// Failures the session protocol surfaces to the user as notices.
///
/// Storage and file errors stay `anyhow::Error` until they cross into the
/// protocol, where they become [`HandwashError::RemoteFailure`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HandwashError {
    #[error("authentication required")]
    AuthRequired,

    #[error("{0}")]
    RemoteFailure(String),

    #[error("a handwash session is already active")]
    SessionActive,
}

impl HandwashError {
    pub fn remote(err: &anyhow::Error) -> Self {
        HandwashError::RemoteFailure(format!("{err:#}"))
    }

    /// The notice shown when this error ends a session.
    pub fn notice(&self) -> Notice {
        match self {
            HandwashError::AuthRequired => Notice::destructive(
                "Authentication Required",
                "Please sign in to save your session",
            ),
            HandwashError::RemoteFailure(message) => {
                Notice::destructive("Error saving session", message.clone())
            }
            HandwashError::SessionActive => Notice::destructive(
                "Session in progress",
                "Finish or leave the current session first",
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_failure_keeps_context_chain() {
        let err = anyhow::anyhow!("disk full").context("failed to insert handwash session");
        let mapped = HandwashError::remote(&err);
        assert_eq!(
            mapped.to_string(),
            "failed to insert handwash session: disk full"
        );
        assert_eq!(mapped.notice().title, "Error saving session");
        assert_eq!(
            mapped.notice().description,
            "failed to insert handwash session: disk full"
        );
    }

    #[test]
    fn missing_user_asks_for_sign_in() {
        let notice = HandwashError::AuthRequired.notice();
        assert_eq!(notice.title, "Authentication Required");
        assert_eq!(notice.description, "Please sign in to save your session");
        assert_eq!(notice.variant, crate::events::NoticeVariant::Destructive);
    }
}
