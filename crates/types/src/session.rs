//! Session payload returned by `GET /api/auth/me`.

/// Authentication state for the current browser-style session.
///
/// `name` and `email` are only meaningful when `authenticated` is true; the
/// backend may omit either even then.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub authenticated: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
