//! The search handoff payload and the report request derived from it.

use crate::{LocationCandidate, TreatmentCandidate};

/// Search criteria handed from the search form to the results view.
///
/// Built from the form's selected values at submit time. `clinic_code` is
/// mandatory; everything else is optional. Display names ride along so the
/// results view can render the criteria without another lookup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub clinic_code: String,
    pub clinic_name: String,
    pub hospital_name: Option<String>,
    pub sido_code: Option<String>,
    // Backend spelling drift: suggestions arrive as sgguCode, the report
    // request leaves as sigguCode.
    pub siggu_code: Option<String>,
    pub location_name: Option<String>,
}

impl SearchQuery {
    /// Assemble a query from the form's selections.
    pub fn from_selection(
        treatment: &TreatmentCandidate,
        location: Option<&LocationCandidate>,
        hospital_name: Option<&str>,
    ) -> Self {
        Self {
            clinic_code: treatment.clinic_code.clone(),
            clinic_name: treatment.clinic_name.clone(),
            hospital_name: hospital_name.map(str::to_owned),
            sido_code: location.map(|l| l.sido_code.clone()),
            siggu_code: location.and_then(|l| l.sggu_code.clone()),
            location_name: location.map(|l| l.location_name.clone()),
        }
    }

    /// The report request body for this query (codes only, no display names).
    pub fn report_request(&self) -> ReportRequest {
        ReportRequest {
            clinic_code: self.clinic_code.clone(),
            hospital_name: self.hospital_name.clone(),
            sido_code: self.sido_code.clone(),
            siggu_code: self.siggu_code.clone(),
        }
    }
}

/// Body of `POST /result/reports`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub clinic_code: String,
    pub hospital_name: Option<String>,
    pub sido_code: Option<String>,
    pub siggu_code: Option<String>,
}
