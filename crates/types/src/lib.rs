//! # Eolmadak Types
//!
//! Shared data model for the 얼마닥 price-comparison client.
//!
//! This crate defines the wire types exchanged with the backend (suggestion
//! candidates, report requests and responses, session payloads) plus the
//! validated text newtype used for search terms. It contains no I/O and no
//! workflow logic: the search workflow lives in `eolmadak-core`, HTTP access
//! in `api-client`.
//!
//! Wire field names follow the backend's camelCase contract via serde
//! renames. Note the backend's spelling drift for the district code: it is
//! `sgguCode` on the suggestion wire and `sigguCode` on the report wire.

pub mod candidate;
pub mod query;
pub mod report;
pub mod session;
pub mod term;

pub use candidate::{LocationCandidate, Suggestion, TreatmentCandidate};
pub use query::{ReportRequest, SearchQuery};
pub use report::{format_won, PriceReport, ReportSnapshot, ResultItem};
pub use session::SessionInfo;
pub use term::{SearchTerm, TermError};
