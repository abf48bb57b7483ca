//! # Eolmadak Core
//!
//! The guided-search workflow for the 얼마닥 price-comparison client.
//!
//! This crate contains pure, deterministic logic only:
//! - Debounce bookkeeping for autocomplete input ([`debounce`])
//! - The autocomplete field state machine ([`field`])
//! - The three-field guided search form with validation ([`form`])
//! - Client-side sorting and pagination of price reports ([`results`])
//!
//! **No I/O concerns**: timers, HTTP fetches and rendering belong to the
//! driving front-end (`eolmadak-tui`, `eolmadak-cli`). The state machines
//! here hand out [`field::FieldCommand`] values telling the front-end what
//! to schedule, and accept the outcomes back through event methods. That
//! keeps every transition unit-testable without a runtime.

pub mod config;
pub mod debounce;
pub mod error;
pub mod field;
pub mod form;
pub mod results;

pub use config::{FlowConfig, RequiredFields};
pub use error::{FlowError, FlowResult};
pub use field::{AutocompleteField, FieldCommand, FieldPhase};
pub use form::{DisplayValues, FieldId, GuidedSearchForm, SelectedValues};
pub use results::{page_window, process, PageEntry, Paginator, ResultPage, SortKey};
