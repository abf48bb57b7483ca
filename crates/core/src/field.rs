//! Autocomplete field state machine.
//!
//! One field tracks raw input text, the canonical selected candidate, the
//! cached suggestion list and a phase:
//!
//! ```text
//! Idle → Typing → Loading → Open → Selected → Idle …
//! ```
//!
//! The field is driven entirely by events. Transitions that need the
//! outside world (a timer, an HTTP fetch) return a [`FieldCommand`] that
//! the front-end schedules; the outcome comes back through
//! [`AutocompleteField::debounce_elapsed`],
//! [`AutocompleteField::suggestions_arrived`] or
//! [`AutocompleteField::close_elapsed`]. Superseded timers and stale
//! fetches are recognised by generation/sequence numbers and ignored, so
//! an in-flight fetch from an old keystroke can never overwrite newer
//! suggestions.

use crate::debounce::Debouncer;
use eolmadak_types::{SearchTerm, Suggestion};
use std::time::Duration;

/// Where a field currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPhase {
    /// Empty or resting input, dropdown closed.
    Idle,
    /// Input changed, debounce timer pending.
    Typing,
    /// Suggestion fetch in flight.
    Loading,
    /// Suggestions rendered, dropdown visible.
    Open,
    /// A candidate was picked; dropdown closed, text shows its label.
    Selected,
}

/// Work the driving front-end must schedule on behalf of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCommand {
    /// Sleep for `quiet`, then call `debounce_elapsed(generation)`.
    ArmDebounce { generation: u64, quiet: Duration },
    /// Fetch suggestions for `term`, then call `suggestions_arrived(seq, …)`.
    Fetch { seq: u64, term: SearchTerm },
    /// Sleep for `grace`, then call `close_elapsed(generation)`.
    ScheduleClose { generation: u64, grace: Duration },
}

/// State for a single autocomplete input.
#[derive(Debug, Clone)]
pub struct AutocompleteField<C> {
    text: String,
    selected: Option<C>,
    suggestions: Vec<C>,
    phase: FieldPhase,
    debounce: Debouncer,
    blur_grace: Duration,
    fetch_seq: u64,
    live_fetch: Option<u64>,
    close_generation: u64,
    highlight: usize,
    disabled: bool,
}

impl<C: Suggestion + Clone> AutocompleteField<C> {
    pub fn new(debounce_quiet: Duration, blur_grace: Duration) -> Self {
        Self {
            text: String::new(),
            selected: None,
            suggestions: Vec::new(),
            phase: FieldPhase::Idle,
            debounce: Debouncer::new(debounce_quiet),
            blur_grace,
            fetch_seq: 0,
            live_fetch: None,
            close_generation: 0,
            highlight: 0,
            disabled: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selected(&self) -> Option<&C> {
        self.selected.as_ref()
    }

    pub fn suggestions(&self) -> &[C] {
        &self.suggestions
    }

    pub fn phase(&self) -> FieldPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase == FieldPhase::Open && !self.suggestions.is_empty()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FieldPhase::Loading
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Index of the highlighted suggestion (dropdown navigation).
    pub fn highlight(&self) -> usize {
        self.highlight
    }

    /// Enable or disable the field.
    ///
    /// A disabled field ignores input and never fetches; used by the
    /// hospital field until a region has been chosen. Text and any prior
    /// selection are kept.
    pub fn set_disabled(&mut self, disabled: bool) {
        if disabled == self.disabled {
            return;
        }
        self.disabled = disabled;
        if disabled {
            self.debounce.cancel();
            self.live_fetch = None;
            self.suggestions.clear();
            self.phase = FieldPhase::Idle;
        }
    }

    /// The user edited the input text.
    ///
    /// Editing invalidates any prior canonical selection: only a fresh pick
    /// from the dropdown restores one. Non-empty text re-arms the debounce;
    /// empty or whitespace-only text cancels everything and closes the
    /// dropdown without fetching.
    pub fn input(&mut self, text: impl Into<String>) -> Option<FieldCommand> {
        if self.disabled {
            return None;
        }
        self.text = text.into();
        self.selected = None;

        match SearchTerm::new(&self.text) {
            Ok(_) => {
                self.phase = FieldPhase::Typing;
                Some(FieldCommand::ArmDebounce {
                    generation: self.debounce.arm(),
                    quiet: self.debounce.quiet(),
                })
            }
            Err(_) => {
                self.debounce.cancel();
                self.live_fetch = None;
                self.suggestions.clear();
                self.phase = FieldPhase::Idle;
                None
            }
        }
    }

    /// A debounce timer elapsed. Superseded generations are no-ops.
    pub fn debounce_elapsed(&mut self, generation: u64) -> Option<FieldCommand> {
        if self.disabled || !self.debounce.is_current(generation) {
            return None;
        }
        self.debounce.cancel();

        let term = SearchTerm::new(&self.text).ok()?;
        self.fetch_seq += 1;
        self.live_fetch = Some(self.fetch_seq);
        self.phase = FieldPhase::Loading;
        Some(FieldCommand::Fetch {
            seq: self.fetch_seq,
            term,
        })
    }

    /// A suggestion fetch completed.
    ///
    /// Only the latest issued fetch is accepted; anything else is stale and
    /// discarded. Fetch failures are mapped to an empty list by the caller
    /// (and logged there); for the field, zero results and failure are the
    /// same thing: dropdown closed, back to Idle.
    pub fn suggestions_arrived(&mut self, seq: u64, suggestions: Vec<C>) {
        if self.live_fetch != Some(seq) {
            tracing::debug!(seq, "discarding stale suggestion response");
            return;
        }
        self.live_fetch = None;

        if suggestions.is_empty() {
            self.suggestions.clear();
            self.phase = FieldPhase::Idle;
        } else {
            self.suggestions = suggestions;
            self.highlight = 0;
            self.phase = FieldPhase::Open;
        }
    }

    /// The field regained focus: reopen cached suggestions, no refetch.
    pub fn focus(&mut self) {
        // Cancels a pending grace close from an earlier blur.
        self.close_generation += 1;
        if !self.disabled && !self.suggestions.is_empty() && !self.text.trim().is_empty() {
            self.phase = FieldPhase::Open;
        }
    }

    /// The field lost focus: close the dropdown after a grace delay so a
    /// concurrent suggestion click can still register.
    pub fn blur(&mut self) -> Option<FieldCommand> {
        if !self.is_open() {
            return None;
        }
        self.close_generation += 1;
        Some(FieldCommand::ScheduleClose {
            generation: self.close_generation,
            grace: self.blur_grace,
        })
    }

    /// A blur grace timer elapsed.
    pub fn close_elapsed(&mut self, generation: u64) {
        if generation != self.close_generation {
            return;
        }
        if self.phase == FieldPhase::Open {
            self.phase = FieldPhase::Idle;
        }
    }

    /// The user picked the suggestion at `index`.
    ///
    /// Records the full candidate, projects its label into the input text,
    /// clears the suggestion cache and closes the dropdown. Any in-flight
    /// fetch is dropped so it cannot reopen the list afterwards.
    pub fn select(&mut self, index: usize) -> Option<C> {
        let candidate = self.suggestions.get(index)?.clone();
        self.text = candidate.label().to_owned();
        self.selected = Some(candidate.clone());
        self.suggestions.clear();
        self.highlight = 0;
        self.live_fetch = None;
        self.debounce.cancel();
        self.phase = FieldPhase::Selected;
        Some(candidate)
    }

    /// Pick the currently highlighted suggestion.
    pub fn select_highlighted(&mut self) -> Option<C> {
        self.select(self.highlight)
    }

    pub fn highlight_next(&mut self) {
        if !self.suggestions.is_empty() {
            self.highlight = (self.highlight + 1) % self.suggestions.len();
        }
    }

    pub fn highlight_prev(&mut self) {
        if !self.suggestions.is_empty() {
            self.highlight = self
                .highlight
                .checked_sub(1)
                .unwrap_or(self.suggestions.len() - 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eolmadak_types::TreatmentCandidate;

    fn field() -> AutocompleteField<TreatmentCandidate> {
        AutocompleteField::new(Duration::from_millis(1000), Duration::from_millis(200))
    }

    fn candidate(name: &str, code: &str) -> TreatmentCandidate {
        TreatmentCandidate {
            clinic_name: name.into(),
            clinic_code: code.into(),
        }
    }

    fn arm(command: Option<FieldCommand>) -> u64 {
        match command {
            Some(FieldCommand::ArmDebounce { generation, .. }) => generation,
            other => panic!("expected ArmDebounce, got {:?}", other),
        }
    }

    fn fetch(command: Option<FieldCommand>) -> (u64, SearchTerm) {
        match command {
            Some(FieldCommand::Fetch { seq, term }) => (seq, term),
            other => panic!("expected Fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_rapid_typing_commits_only_last_string() {
        let mut f = field();
        let _ = f.input("도");
        let _ = f.input("도수");
        let generation = arm(f.input("도수치료"));

        let (_, term) = fetch(f.debounce_elapsed(generation));
        assert_eq!(term.as_str(), "도수치료");
        // Earlier generations were superseded and must not fetch.
        assert_eq!(f.debounce_elapsed(generation - 1), None);
        assert_eq!(f.debounce_elapsed(generation - 2), None);
    }

    #[test]
    fn test_empty_input_never_fetches() {
        let mut f = field();
        assert_eq!(f.input(""), None);
        assert_eq!(f.input("   "), None);
        assert_eq!(f.phase(), FieldPhase::Idle);
        assert!(f.suggestions().is_empty());
    }

    #[test]
    fn test_emptying_input_cancels_pending_commit() {
        let mut f = field();
        let generation = arm(f.input("MRI"));
        assert_eq!(f.input(""), None);
        assert_eq!(f.debounce_elapsed(generation), None);
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut f = field();
        let g1 = arm(f.input("도수"));
        let (old_seq, _) = fetch(f.debounce_elapsed(g1));

        // A later keystroke issues a newer fetch before the old one lands.
        let g2 = arm(f.input("도수치료"));
        let (new_seq, _) = fetch(f.debounce_elapsed(g2));
        assert!(new_seq > old_seq);

        f.suggestions_arrived(new_seq, vec![candidate("도수치료", "CZ100A")]);
        assert_eq!(f.phase(), FieldPhase::Open);

        // The superseded response arrives late and must not overwrite.
        f.suggestions_arrived(old_seq, vec![candidate("도수", "CZ100B")]);
        assert_eq!(f.suggestions().len(), 1);
        assert_eq!(f.suggestions()[0].clinic_code, "CZ100A");
    }

    #[test]
    fn test_zero_results_closes_dropdown() {
        let mut f = field();
        let generation = arm(f.input("xyzzy"));
        let (seq, _) = fetch(f.debounce_elapsed(generation));
        f.suggestions_arrived(seq, vec![]);
        assert_eq!(f.phase(), FieldPhase::Idle);
        assert!(!f.is_open());
    }

    #[test]
    fn test_selection_projects_label_and_clears_cache() {
        let mut f = field();
        let generation = arm(f.input("도수"));
        let (seq, _) = fetch(f.debounce_elapsed(generation));
        f.suggestions_arrived(
            seq,
            vec![candidate("도수치료", "CZ100A"), candidate("도수재활", "CZ200B")],
        );

        let picked = f.select(0).unwrap();
        assert_eq!(picked.clinic_code, "CZ100A");
        assert_eq!(f.text(), "도수치료");
        assert_eq!(f.selected().unwrap().clinic_code, "CZ100A");
        assert!(f.suggestions().is_empty());
        assert_eq!(f.phase(), FieldPhase::Selected);
    }

    #[test]
    fn test_editing_after_selection_invalidates_it() {
        let mut f = field();
        let generation = arm(f.input("도수"));
        let (seq, _) = fetch(f.debounce_elapsed(generation));
        f.suggestions_arrived(seq, vec![candidate("도수치료", "CZ100A")]);
        f.select(0);
        assert!(f.selected().is_some());

        let _ = f.input("도수치료 2회");
        assert!(f.selected().is_none());
    }

    #[test]
    fn test_in_flight_fetch_cannot_reopen_after_selection() {
        let mut f = field();
        let g1 = arm(f.input("도수"));
        let (seq1, _) = fetch(f.debounce_elapsed(g1));
        f.suggestions_arrived(seq1, vec![candidate("도수치료", "CZ100A")]);

        // Second fetch goes out, user selects before it lands.
        let g2 = arm(f.input("도수치"));
        let (seq2, _) = fetch(f.debounce_elapsed(g2));
        f.suggestions_arrived(seq2, vec![candidate("도수치료", "CZ100A")]);
        f.select(0);

        f.suggestions_arrived(seq2, vec![candidate("도수치료법", "CZ300C")]);
        assert!(f.suggestions().is_empty());
        assert_eq!(f.phase(), FieldPhase::Selected);
    }

    #[test]
    fn test_focus_reopens_cached_suggestions_without_refetch() {
        let mut f = field();
        let generation = arm(f.input("도수"));
        let (seq, _) = fetch(f.debounce_elapsed(generation));
        f.suggestions_arrived(seq, vec![candidate("도수치료", "CZ100A")]);

        let close = f.blur();
        let grace_generation = match close {
            Some(FieldCommand::ScheduleClose { generation, .. }) => generation,
            other => panic!("expected ScheduleClose, got {:?}", other),
        };
        f.close_elapsed(grace_generation);
        assert!(!f.is_open());

        f.focus();
        assert!(f.is_open());
        assert_eq!(f.suggestions().len(), 1);
    }

    #[test]
    fn test_refocus_cancels_pending_grace_close() {
        let mut f = field();
        let generation = arm(f.input("도수"));
        let (seq, _) = fetch(f.debounce_elapsed(generation));
        f.suggestions_arrived(seq, vec![candidate("도수치료", "CZ100A")]);

        let grace_generation = match f.blur() {
            Some(FieldCommand::ScheduleClose { generation, .. }) => generation,
            other => panic!("expected ScheduleClose, got {:?}", other),
        };
        f.focus();
        f.close_elapsed(grace_generation);
        assert!(f.is_open());
    }

    #[test]
    fn test_click_during_grace_still_registers() {
        let mut f = field();
        let generation = arm(f.input("도수"));
        let (seq, _) = fetch(f.debounce_elapsed(generation));
        f.suggestions_arrived(seq, vec![candidate("도수치료", "CZ100A")]);

        let grace_generation = match f.blur() {
            Some(FieldCommand::ScheduleClose { generation, .. }) => generation,
            other => panic!("expected ScheduleClose, got {:?}", other),
        };
        // Selection lands before the grace timer.
        assert!(f.select(0).is_some());
        f.close_elapsed(grace_generation);
        assert_eq!(f.phase(), FieldPhase::Selected);
        assert_eq!(f.selected().unwrap().clinic_code, "CZ100A");
    }

    #[test]
    fn test_disabled_field_ignores_input() {
        let mut f = field();
        f.set_disabled(true);
        assert_eq!(f.input("강남"), None);
        assert_eq!(f.text(), "");
        assert_eq!(f.phase(), FieldPhase::Idle);
    }

    #[test]
    fn test_disabling_cancels_pending_work() {
        let mut f = field();
        let generation = arm(f.input("강남"));
        f.set_disabled(true);
        assert_eq!(f.debounce_elapsed(generation), None);
    }

    #[test]
    fn test_highlight_wraps_around() {
        let mut f = field();
        let generation = arm(f.input("도수"));
        let (seq, _) = fetch(f.debounce_elapsed(generation));
        f.suggestions_arrived(
            seq,
            vec![candidate("a", "1"), candidate("b", "2"), candidate("c", "3")],
        );

        assert_eq!(f.highlight(), 0);
        f.highlight_prev();
        assert_eq!(f.highlight(), 2);
        f.highlight_next();
        assert_eq!(f.highlight(), 0);
    }
}
