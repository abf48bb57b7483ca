//! Workflow configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into the form and results components. The intent
//! is to avoid reading process-wide environment variables inside the
//! workflow, which can lead to inconsistent behaviour across event handlers
//! and test harnesses.

use crate::{FlowError, FlowResult};
use std::time::Duration;

/// Which form fields must carry a canonical selection before submission.
///
/// Two policies exist in the wild; treatment-only is the canonical one and
/// the default. The stricter variant additionally requires a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequiredFields {
    #[default]
    TreatmentOnly,
    TreatmentAndRegion,
}

/// Workflow configuration resolved at startup.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    debounce_quiet: Duration,
    blur_grace: Duration,
    page_size: usize,
    required_fields: RequiredFields,
}

impl FlowConfig {
    /// Quiet period an input must hold before a suggestion fetch commits.
    pub const DEFAULT_DEBOUNCE_QUIET: Duration = Duration::from_millis(1000);
    /// Grace delay between a field blur and its dropdown closing, so a
    /// click on a suggestion still lands.
    pub const DEFAULT_BLUR_GRACE: Duration = Duration::from_millis(200);
    /// Result items shown per page.
    pub const DEFAULT_PAGE_SIZE: usize = 10;

    /// Create a new `FlowConfig`.
    pub fn new(
        debounce_quiet: Duration,
        blur_grace: Duration,
        page_size: usize,
        required_fields: RequiredFields,
    ) -> FlowResult<Self> {
        if page_size == 0 {
            return Err(FlowError::InvalidConfig(
                "page_size must be at least 1".into(),
            ));
        }

        Ok(Self {
            debounce_quiet,
            blur_grace,
            page_size,
            required_fields,
        })
    }

    pub fn debounce_quiet(&self) -> Duration {
        self.debounce_quiet
    }

    pub fn blur_grace(&self) -> Duration {
        self.blur_grace
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn required_fields(&self) -> RequiredFields {
        self.required_fields
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            debounce_quiet: Self::DEFAULT_DEBOUNCE_QUIET,
            blur_grace: Self::DEFAULT_BLUR_GRACE,
            page_size: Self::DEFAULT_PAGE_SIZE,
            required_fields: RequiredFields::default(),
        }
    }
}
