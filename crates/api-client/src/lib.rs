//! # API Client
//!
//! HTTP access to the 얼마닥 backend.
//!
//! Contains:
//! - [`ApiClient`], a reqwest-based client with a cookie store for
//!   session-credentialled calls
//! - Suggestion queries for the autocomplete fields (`home` module), behind
//!   the [`SuggestionSource`] seam so front-ends can be tested with stubs
//! - Price report fetches (`report` module)
//! - The session probe and explicit session context (`session` module)
//!
//! Response-shape adapters live next to their endpoint functions; the rest
//! of the workspace only ever sees the plain types from `eolmadak-types`.
//!
//! **No UI concerns**: how failures are surfaced (silently for suggestions,
//! blocking with retry for reports) is the front-end's business; everything
//! here just returns `ApiResult`.

pub mod client;
pub mod error;
pub mod home;
pub mod report;
pub mod session;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use home::SuggestionSource;
pub use session::{Session, UserProfile};
