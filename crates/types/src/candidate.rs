//! Autocomplete suggestion candidates returned by the `/home` endpoints.

/// A selectable suggestion with a human-readable label.
///
/// The label is what an autocomplete input shows once the candidate is
/// picked; the canonical codes (where a candidate carries any) travel
/// separately in the final query.
pub trait Suggestion {
    /// Display text for this candidate.
    fn label(&self) -> &str;
}

/// A treatment ("진료명") suggestion.
///
/// `clinic_code` is the canonical identifier sent to the report query;
/// `clinic_name` is only ever shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentCandidate {
    pub clinic_name: String,
    pub clinic_code: String,
}

impl Suggestion for TreatmentCandidate {
    fn label(&self) -> &str {
        &self.clinic_name
    }
}

/// A region ("시군구") suggestion.
///
/// Carries a province code (`sido_code`) and optionally a district code
/// (`sggu_code`). The district code takes precedence wherever a single
/// scope code is needed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationCandidate {
    pub location_name: String,
    pub sido_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sggu_code: Option<String>,
}

impl LocationCandidate {
    /// The single code used to scope a hospital search: district code when
    /// present, province code otherwise.
    pub fn scope_code(&self) -> &str {
        self.sggu_code.as_deref().unwrap_or(&self.sido_code)
    }
}

impl Suggestion for LocationCandidate {
    fn label(&self) -> &str {
        &self.location_name
    }
}

// Hospital suggestions are plain display names with no canonical code; the
// backend receives whatever string the user selected.
impl Suggestion for String {
    fn label(&self) -> &str {
        self
    }
}
