//! The session probe and the explicit session context.
//!
//! Authentication state lives in one context object handed to whatever
//! needs auth-aware rendering, with explicit construction and teardown,
//! not in ad hoc globals. The probe itself is best-effort: any failure maps
//! to the anonymous session so the header can always render.

use crate::{ApiClient, ApiResult};
use eolmadak_types::SessionInfo;

const AUTH_ME_PATH: &str = "api/auth/me";

/// The signed-in user, as far as the header cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: Option<String>,
}

/// Explicit session context for auth-aware rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    user: Option<UserProfile>,
}

impl Session {
    /// The signed-out session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Build a session from the backend's payload.
    ///
    /// A session only counts as signed-in when the backend says so *and*
    /// provides a display name, mirroring the header's original check.
    pub fn from_info(info: SessionInfo) -> Self {
        match (info.authenticated, info.name) {
            (true, Some(name)) => Self {
                user: Some(UserProfile {
                    name,
                    email: info.email,
                }),
            },
            _ => Self::anonymous(),
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Teardown: drop the signed-in user.
    pub fn clear(&mut self) {
        self.user = None;
    }
}

impl ApiClient {
    /// Probe `GET /api/auth/me` (cookies included).
    ///
    /// Never fails: a transport error or non-2xx answer is logged and
    /// rendered as the anonymous session.
    pub async fn fetch_session(&self) -> Session {
        match self.try_fetch_session().await {
            Ok(info) => Session::from_info(info),
            Err(error) => {
                tracing::warn!(%error, "session probe failed; rendering anonymous");
                Session::anonymous()
            }
        }
    }

    async fn try_fetch_session(&self) -> ApiResult<SessionInfo> {
        self.get_json(AUTH_ME_PATH, &[]).await
    }
}
