//! Suggestion (autocomplete) queries against the `/home` endpoints.
//!
//! The backend wraps each suggestion list in a small envelope object; the
//! adapter DTOs here decode that envelope and hand the plain lists onward,
//! so nothing outside this module depends on the wire shape. An absent list
//! field decodes as empty.

use crate::{ApiClient, ApiResult};
use async_trait::async_trait;
use eolmadak_types::{LocationCandidate, SearchTerm, TreatmentCandidate};

const CLINICS_PATH: &str = "home/clinics";
const HOSPITALS_PATH: &str = "home/hospitals";
const LOCATIONS_PATH: &str = "home/locations";

#[derive(Debug, serde::Deserialize)]
struct ClinicSearchRes {
    #[serde(rename = "clinicResponseDTOList", default)]
    clinic_response_dto_list: Vec<TreatmentCandidate>,
}

#[derive(Debug, serde::Deserialize)]
struct HospitalSearchRes {
    #[serde(rename = "nameList", default)]
    name_list: Vec<String>,
}

#[derive(Debug, serde::Deserialize)]
struct LocationSearchRes {
    #[serde(default)]
    locations: Vec<LocationCandidate>,
}

/// The suggestion-fetching seam.
///
/// Front-ends depend on this trait rather than on [`ApiClient`] directly,
/// which is what allows the autocomplete workflow to be exercised against
/// stub sources in tests.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Treatment ("진료명") suggestions for a term.
    async fn treatments(&self, term: &SearchTerm) -> ApiResult<Vec<TreatmentCandidate>>;

    /// Region ("시군구") suggestions for a term.
    async fn locations(&self, term: &SearchTerm) -> ApiResult<Vec<LocationCandidate>>;

    /// Hospital-name suggestions for a term, optionally scoped to a region
    /// code. No scope means an unscoped search.
    async fn hospitals(&self, term: &SearchTerm, scope: Option<&str>) -> ApiResult<Vec<String>>;
}

#[async_trait]
impl SuggestionSource for ApiClient {
    async fn treatments(&self, term: &SearchTerm) -> ApiResult<Vec<TreatmentCandidate>> {
        let res: ClinicSearchRes = self
            .get_json(CLINICS_PATH, &[("name", term.as_str())])
            .await?;
        Ok(res.clinic_response_dto_list)
    }

    async fn locations(&self, term: &SearchTerm) -> ApiResult<Vec<LocationCandidate>> {
        let res: LocationSearchRes = self
            .get_json(LOCATIONS_PATH, &[("name", term.as_str())])
            .await?;
        Ok(res.locations)
    }

    async fn hospitals(&self, term: &SearchTerm, scope: Option<&str>) -> ApiResult<Vec<String>> {
        let mut query = vec![("name", term.as_str())];
        if let Some(code) = scope {
            query.push(("location", code));
        }
        let res: HospitalSearchRes = self.get_json(HOSPITALS_PATH, &query).await?;
        Ok(res.name_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clinic_envelope_decodes() {
        let json = r#"{"clinicResponseDTOList":[{"clinicName":"도수치료","clinicCode":"CZ100A"}]}"#;
        let res: ClinicSearchRes = serde_json::from_str(json).unwrap();
        assert_eq!(res.clinic_response_dto_list.len(), 1);
        assert_eq!(res.clinic_response_dto_list[0].clinic_code, "CZ100A");
    }

    #[test]
    fn test_absent_list_decodes_empty() {
        // Mirrors the `|| []` fallback of the original frontend.
        let res: ClinicSearchRes = serde_json::from_str("{}").unwrap();
        assert!(res.clinic_response_dto_list.is_empty());

        let res: HospitalSearchRes = serde_json::from_str("{}").unwrap();
        assert!(res.name_list.is_empty());

        let res: LocationSearchRes = serde_json::from_str("{}").unwrap();
        assert!(res.locations.is_empty());
    }

    #[test]
    fn test_location_envelope_decodes() {
        let json = r#"{"locations":[{"locationName":"서울특별시 강남구","sidoCode":"11","sgguCode":"11230"}]}"#;
        let res: LocationSearchRes = serde_json::from_str(json).unwrap();
        assert_eq!(res.locations[0].scope_code(), "11230");
    }
}
