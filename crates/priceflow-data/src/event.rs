//! Events the pipeline raises for the presentation shell.

use priceflow_commerce::navigation::LOGIN_PATH;
use serde::Serialize;

/// Something the shell has to react to outside the call that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum SessionEvent {
    /// The backend rejected the credential; it has been cleared.
    #[serde(rename_all = "camelCase")]
    LoginRequired { redirect_to: &'static str },
}

impl SessionEvent {
    pub fn login_required() -> Self {
        SessionEvent::LoginRequired {
            redirect_to: LOGIN_PATH,
        }
    }

    /// Path the shell should navigate to.
    pub fn redirect_to(&self) -> &'static str {
        match self {
            SessionEvent::LoginRequired { redirect_to } => *redirect_to,
        }
    }
}
