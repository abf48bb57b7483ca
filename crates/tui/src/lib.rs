//! # Eolmadak TUI
//!
//! Terminal front-end for the 얼마닥 price-comparison client.
//!
//! Two screens: the home screen hosts the guided search form with its three
//! autocomplete inputs, the results screen renders the fetched price report
//! with sorting and pagination. All workflow state lives in
//! `eolmadak-core`; this crate owns rendering, key handling and the async
//! plumbing (timers for debounce/blur grace, suggestion and report
//! fetches), routed through one event channel into the main loop.

pub mod app;
pub mod home;
pub mod input;
pub mod results;
pub mod theme;

pub use app::{init_terminal, restore_terminal, App};
