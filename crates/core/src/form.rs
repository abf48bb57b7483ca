//! The guided search form: three autocomplete fields with cross-field
//! dependencies and submission validation.
//!
//! The form owns the authoritative selection state (canonical candidates)
//! and its display projection (the text shown in each input). A selection
//! event updates both; a plain text edit updates the display only and
//! invalidates that field's canonical value until the user reselects. The
//! hospital field is disabled until a region has been chosen, and hospital
//! suggestion fetches are scoped by the selected region's code (district
//! preferred over province), recomputed on every fetch.

use crate::config::{FlowConfig, RequiredFields};
use crate::field::{AutocompleteField, FieldCommand};
use crate::{FlowError, FlowResult};
use eolmadak_types::{LocationCandidate, SearchQuery, TreatmentCandidate};

/// Identifies one of the form's three inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Treatment,
    Location,
    Hospital,
}

/// The authoritative selection state: full canonical candidates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectedValues {
    pub treatment: Option<TreatmentCandidate>,
    pub location: Option<LocationCandidate>,
    pub hospital_name: Option<String>,
}

/// The human-readable projection shown in the inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayValues {
    pub treatment: String,
    pub location: String,
    pub hospital: String,
}

/// State for the whole search form.
#[derive(Debug, Clone)]
pub struct GuidedSearchForm {
    treatment: AutocompleteField<TreatmentCandidate>,
    location: AutocompleteField<LocationCandidate>,
    hospital: AutocompleteField<String>,
    required_fields: RequiredFields,
}

impl GuidedSearchForm {
    pub fn new(config: &FlowConfig) -> Self {
        let quiet = config.debounce_quiet();
        let grace = config.blur_grace();
        let mut hospital = AutocompleteField::new(quiet, grace);
        // No region selected yet, so hospital search has nothing to scope by.
        hospital.set_disabled(true);

        Self {
            treatment: AutocompleteField::new(quiet, grace),
            location: AutocompleteField::new(quiet, grace),
            hospital,
            required_fields: config.required_fields(),
        }
    }

    pub fn treatment_field(&self) -> &AutocompleteField<TreatmentCandidate> {
        &self.treatment
    }

    pub fn location_field(&self) -> &AutocompleteField<LocationCandidate> {
        &self.location
    }

    pub fn hospital_field(&self) -> &AutocompleteField<String> {
        &self.hospital
    }

    /// Scope code for hospital suggestion fetches, from the selected region.
    pub fn hospital_scope(&self) -> Option<&str> {
        self.location.selected().map(LocationCandidate::scope_code)
    }

    pub fn selected_values(&self) -> SelectedValues {
        SelectedValues {
            treatment: self.treatment.selected().cloned(),
            location: self.location.selected().cloned(),
            hospital_name: self.hospital.selected().cloned(),
        }
    }

    pub fn display_values(&self) -> DisplayValues {
        DisplayValues {
            treatment: self.treatment.text().to_owned(),
            location: self.location.text().to_owned(),
            hospital: self.hospital.text().to_owned(),
        }
    }

    /// Route a text edit to a field.
    pub fn input(&mut self, field: FieldId, text: &str) -> Option<FieldCommand> {
        let command = match field {
            FieldId::Treatment => self.treatment.input(text),
            FieldId::Location => self.location.input(text),
            FieldId::Hospital => self.hospital.input(text),
        };
        self.sync_hospital_dependency();
        command
    }

    /// Route a debounce commit to a field.
    pub fn debounce_elapsed(&mut self, field: FieldId, generation: u64) -> Option<FieldCommand> {
        match field {
            FieldId::Treatment => self.treatment.debounce_elapsed(generation),
            FieldId::Location => self.location.debounce_elapsed(generation),
            FieldId::Hospital => self.hospital.debounce_elapsed(generation),
        }
    }

    pub fn focus(&mut self, field: FieldId) {
        match field {
            FieldId::Treatment => self.treatment.focus(),
            FieldId::Location => self.location.focus(),
            FieldId::Hospital => self.hospital.focus(),
        }
    }

    pub fn blur(&mut self, field: FieldId) -> Option<FieldCommand> {
        match field {
            FieldId::Treatment => self.treatment.blur(),
            FieldId::Location => self.location.blur(),
            FieldId::Hospital => self.hospital.blur(),
        }
    }

    pub fn close_elapsed(&mut self, field: FieldId, generation: u64) {
        match field {
            FieldId::Treatment => self.treatment.close_elapsed(generation),
            FieldId::Location => self.location.close_elapsed(generation),
            FieldId::Hospital => self.hospital.close_elapsed(generation),
        }
    }

    pub fn treatment_suggestions(&mut self, seq: u64, suggestions: Vec<TreatmentCandidate>) {
        self.treatment.suggestions_arrived(seq, suggestions);
    }

    pub fn location_suggestions(&mut self, seq: u64, suggestions: Vec<LocationCandidate>) {
        self.location.suggestions_arrived(seq, suggestions);
    }

    pub fn hospital_suggestions(&mut self, seq: u64, suggestions: Vec<String>) {
        self.hospital.suggestions_arrived(seq, suggestions);
    }

    /// Pick the highlighted suggestion of a field. Returns whether a
    /// selection happened.
    pub fn select_highlighted(&mut self, field: FieldId) -> bool {
        let selected = match field {
            FieldId::Treatment => self.treatment.select_highlighted().is_some(),
            FieldId::Location => self.location.select_highlighted().is_some(),
            FieldId::Hospital => self.hospital.select_highlighted().is_some(),
        };
        self.sync_hospital_dependency();
        selected
    }

    pub fn highlight_next(&mut self, field: FieldId) {
        match field {
            FieldId::Treatment => self.treatment.highlight_next(),
            FieldId::Location => self.location.highlight_next(),
            FieldId::Hospital => self.hospital.highlight_next(),
        }
    }

    pub fn highlight_prev(&mut self, field: FieldId) {
        match field {
            FieldId::Treatment => self.treatment.highlight_prev(),
            FieldId::Location => self.location.highlight_prev(),
            FieldId::Hospital => self.hospital.highlight_prev(),
        }
    }

    pub fn is_open(&self, field: FieldId) -> bool {
        match field {
            FieldId::Treatment => self.treatment.is_open(),
            FieldId::Location => self.location.is_open(),
            FieldId::Hospital => self.hospital.is_open(),
        }
    }

    /// Validate the selections and build the handoff query.
    ///
    /// The treatment selection is always mandatory; the region additionally
    /// under [`RequiredFields::TreatmentAndRegion`]. On failure no query is
    /// produced and the caller must not issue any network call.
    pub fn validate(&self) -> FlowResult<SearchQuery> {
        let treatment = self
            .treatment
            .selected()
            .ok_or(FlowError::TreatmentRequired)?;

        let location = self.location.selected();
        if self.required_fields == RequiredFields::TreatmentAndRegion && location.is_none() {
            return Err(FlowError::RegionRequired);
        }

        Ok(SearchQuery::from_selection(
            treatment,
            location,
            self.hospital.selected().map(String::as_str),
        ))
    }

    /// Hospital search only makes sense once a region is selected.
    fn sync_hospital_dependency(&mut self) {
        self.hospital.set_disabled(self.location.selected().is_none());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldCommand;
    use std::time::Duration;

    fn form() -> GuidedSearchForm {
        GuidedSearchForm::new(&FlowConfig::default())
    }

    fn strict_form() -> GuidedSearchForm {
        let config = FlowConfig::new(
            Duration::from_millis(1000),
            Duration::from_millis(200),
            10,
            RequiredFields::TreatmentAndRegion,
        )
        .unwrap();
        GuidedSearchForm::new(&config)
    }

    fn drive_fetch(form: &mut GuidedSearchForm, field: FieldId, text: &str) -> u64 {
        let generation = match form.input(field, text) {
            Some(FieldCommand::ArmDebounce { generation, .. }) => generation,
            other => panic!("expected ArmDebounce, got {:?}", other),
        };
        match form.debounce_elapsed(field, generation) {
            Some(FieldCommand::Fetch { seq, .. }) => seq,
            other => panic!("expected Fetch, got {:?}", other),
        }
    }

    fn select_treatment(form: &mut GuidedSearchForm) {
        let seq = drive_fetch(form, FieldId::Treatment, "도수");
        form.treatment_suggestions(
            seq,
            vec![TreatmentCandidate {
                clinic_name: "도수치료".into(),
                clinic_code: "CZ100A".into(),
            }],
        );
        assert!(form.select_highlighted(FieldId::Treatment));
    }

    fn select_gangnam(form: &mut GuidedSearchForm) {
        let seq = drive_fetch(form, FieldId::Location, "강남");
        form.location_suggestions(
            seq,
            vec![LocationCandidate {
                location_name: "서울특별시 강남구".into(),
                sido_code: "11".into(),
                sggu_code: Some("11230".into()),
            }],
        );
        assert!(form.select_highlighted(FieldId::Location));
    }

    #[test]
    fn test_selection_updates_both_value_sets() {
        let mut f = form();
        select_treatment(&mut f);

        let selected = f.selected_values();
        assert_eq!(selected.treatment.unwrap().clinic_code, "CZ100A");
        assert_eq!(f.display_values().treatment, "도수치료");
    }

    #[test]
    fn test_submit_without_treatment_is_rejected() {
        let f = form();
        assert_eq!(f.validate(), Err(FlowError::TreatmentRequired));
    }

    #[test]
    fn test_submit_with_treatment_only() {
        let mut f = form();
        select_treatment(&mut f);

        let query = f.validate().unwrap();
        assert_eq!(query.clinic_code, "CZ100A");
        assert_eq!(query.sido_code, None);
        assert_eq!(query.hospital_name, None);
    }

    #[test]
    fn test_strict_policy_requires_region() {
        let mut f = strict_form();
        select_treatment(&mut f);
        assert_eq!(f.validate(), Err(FlowError::RegionRequired));

        select_gangnam(&mut f);
        let query = f.validate().unwrap();
        assert_eq!(query.siggu_code.as_deref(), Some("11230"));
    }

    #[test]
    fn test_hospital_disabled_until_region_selected() {
        let mut f = form();
        assert!(f.hospital_field().is_disabled());
        assert_eq!(f.input(FieldId::Hospital, "강남병원"), None);

        select_gangnam(&mut f);
        assert!(!f.hospital_field().is_disabled());
        assert!(f.input(FieldId::Hospital, "강남병원").is_some());
    }

    #[test]
    fn test_hospital_scope_prefers_district_code() {
        let mut f = form();
        select_gangnam(&mut f);
        assert_eq!(f.hospital_scope(), Some("11230"));
    }

    #[test]
    fn test_hospital_scope_falls_back_to_province() {
        let mut f = form();
        let seq = drive_fetch(&mut f, FieldId::Location, "서울");
        f.location_suggestions(
            seq,
            vec![LocationCandidate {
                location_name: "서울특별시".into(),
                sido_code: "11".into(),
                sggu_code: None,
            }],
        );
        assert!(f.select_highlighted(FieldId::Location));
        assert_eq!(f.hospital_scope(), Some("11"));
    }

    #[test]
    fn test_editing_region_revokes_hospital_search() {
        let mut f = form();
        select_gangnam(&mut f);
        assert!(!f.hospital_field().is_disabled());

        // Editing the region text invalidates the selection, which takes
        // the hospital scope away again.
        let _ = f.input(FieldId::Location, "강남구청");
        assert_eq!(f.hospital_scope(), None);
        assert!(f.hospital_field().is_disabled());
    }

    #[test]
    fn test_editing_treatment_after_selection_blocks_submission() {
        let mut f = form();
        select_treatment(&mut f);
        assert!(f.validate().is_ok());

        let _ = f.input(FieldId::Treatment, "도수치료 패키지");
        assert_eq!(f.validate(), Err(FlowError::TreatmentRequired));
    }

    #[test]
    fn test_full_selection_builds_complete_query() {
        let mut f = form();
        select_treatment(&mut f);
        select_gangnam(&mut f);

        let seq = drive_fetch(&mut f, FieldId::Hospital, "강남");
        f.hospital_suggestions(seq, vec!["강남베드로병원".into()]);
        assert!(f.select_highlighted(FieldId::Hospital));

        let query = f.validate().unwrap();
        assert_eq!(query.clinic_name, "도수치료");
        assert_eq!(query.hospital_name.as_deref(), Some("강남베드로병원"));
        assert_eq!(query.sido_code.as_deref(), Some("11"));
        assert_eq!(query.siggu_code.as_deref(), Some("11230"));
        assert_eq!(query.location_name.as_deref(), Some("서울특별시 강남구"));
    }
}
