//! Home screen: the guided search form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use eolmadak_core::{FieldCommand, FieldId, FlowConfig, GuidedSearchForm};
use eolmadak_types::{SearchQuery, Suggestion};
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::input::LineEdit;
use crate::theme;

const FIELD_ORDER: [FieldId; 3] = [FieldId::Treatment, FieldId::Location, FieldId::Hospital];
const DROPDOWN_MAX_ROWS: usize = 6;

/// What a key press on the home screen asks the app to do.
#[derive(Debug)]
pub enum HomeAction {
    None,
    /// Schedule work for a field (debounce timer, fetch, grace close).
    Command(FieldId, FieldCommand),
    /// Validated submission: hand the query to the results screen.
    Submit(SearchQuery),
    Quit,
}

pub struct HomeScreen {
    form: GuidedSearchForm,
    treatment_edit: LineEdit,
    location_edit: LineEdit,
    hospital_edit: LineEdit,
    focused: FieldId,
    error: Option<String>,
}

impl HomeScreen {
    pub fn new(config: &FlowConfig) -> Self {
        Self {
            form: GuidedSearchForm::new(config),
            treatment_edit: LineEdit::default(),
            location_edit: LineEdit::default(),
            hospital_edit: LineEdit::default(),
            focused: FieldId::Treatment,
            error: None,
        }
    }

    pub fn form(&self) -> &GuidedSearchForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut GuidedSearchForm {
        &mut self.form
    }

    pub fn focused(&self) -> FieldId {
        self.focused
    }

    fn edit_mut(&mut self, field: FieldId) -> &mut LineEdit {
        match field {
            FieldId::Treatment => &mut self.treatment_edit,
            FieldId::Location => &mut self.location_edit,
            FieldId::Hospital => &mut self.hospital_edit,
        }
    }

    fn edit(&self, field: FieldId) -> &LineEdit {
        match field {
            FieldId::Treatment => &self.treatment_edit,
            FieldId::Location => &self.location_edit,
            FieldId::Hospital => &self.hospital_edit,
        }
    }

    /// Mirror the form's display values back into the line editors after a
    /// selection rewrote a field's text.
    fn sync_edits(&mut self) {
        let display = self.form.display_values();
        if self.treatment_edit.as_str() != display.treatment {
            self.treatment_edit.set(display.treatment);
        }
        if self.location_edit.as_str() != display.location {
            self.location_edit.set(display.location);
        }
        if self.hospital_edit.as_str() != display.hospital {
            self.hospital_edit.set(display.hospital);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) -> HomeAction {
        match key.code {
            KeyCode::Esc => return HomeAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return HomeAction::Quit;
            }
            KeyCode::Tab => return self.cycle_focus(1),
            KeyCode::BackTab => return self.cycle_focus(-1),
            KeyCode::Down if self.form.is_open(self.focused) => {
                self.form.highlight_next(self.focused);
            }
            KeyCode::Up if self.form.is_open(self.focused) => {
                self.form.highlight_prev(self.focused);
            }
            KeyCode::Enter => {
                if self.form.is_open(self.focused) {
                    if self.form.select_highlighted(self.focused) {
                        self.sync_edits();
                    }
                } else {
                    return self.submit();
                }
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                return self.edit_field(|edit| edit.insert_char(c));
            }
            KeyCode::Backspace => return self.edit_field(LineEdit::backspace),
            KeyCode::Delete => return self.edit_field(LineEdit::delete),
            KeyCode::Left => self.edit_mut(self.focused).move_left(),
            KeyCode::Right => self.edit_mut(self.focused).move_right(),
            KeyCode::Home => self.edit_mut(self.focused).move_home(),
            KeyCode::End => self.edit_mut(self.focused).move_end(),
            _ => {}
        }
        HomeAction::None
    }

    fn edit_field(&mut self, apply: impl FnOnce(&mut LineEdit)) -> HomeAction {
        let field = self.focused;
        let disabled = match field {
            FieldId::Treatment => self.form.treatment_field().is_disabled(),
            FieldId::Location => self.form.location_field().is_disabled(),
            FieldId::Hospital => self.form.hospital_field().is_disabled(),
        };
        if disabled {
            return HomeAction::None;
        }

        apply(self.edit_mut(field));
        let text = self.edit(field).as_str().to_owned();
        match self.form.input(field, &text) {
            Some(command) => HomeAction::Command(field, command),
            None => HomeAction::None,
        }
    }

    fn cycle_focus(&mut self, step: isize) -> HomeAction {
        let index = FIELD_ORDER
            .iter()
            .position(|f| *f == self.focused)
            .unwrap_or(0) as isize;
        let next = (index + step).rem_euclid(FIELD_ORDER.len() as isize) as usize;

        let previous = self.focused;
        self.focused = FIELD_ORDER[next];
        let blur_command = self.form.blur(previous);
        self.form.focus(self.focused);

        match blur_command {
            Some(command) => HomeAction::Command(previous, command),
            None => HomeAction::None,
        }
    }

    fn submit(&mut self) -> HomeAction {
        match self.form.validate() {
            Ok(query) => {
                self.error = None;
                HomeAction::Submit(query)
            }
            Err(error) => {
                self.error = Some(error.to_string());
                HomeAction::None
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [title_area, hint_area, treatment_area, location_area, hospital_area, error_area, footer_area] =
            Layout::vertical([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(area);

        let title = Paragraph::new(vec![
            Line::styled("비급여 진료, 투명하게 비교하세요", theme::title()),
            Line::styled(
                "병원별 비급여 진료 가격을 한눈에 비교하고 AI 분석 코멘트를 받아보세요",
                theme::muted(),
            ),
        ]);
        frame.render_widget(title, title_area);

        frame.render_widget(
            Paragraph::new(Line::styled(
                "정확한 진료명을 입력하시면 더 나은 결과를 제공합니다",
                theme::muted(),
            )),
            hint_area,
        );

        self.render_field(
            frame,
            treatment_area,
            FieldId::Treatment,
            "진료명 *",
            "진료, 질환명을 입력하세요 (예: MRI, CT, 도수치료)",
        );
        self.render_field(
            frame,
            location_area,
            FieldId::Location,
            "지역 (시군구)",
            "지역 선택 (선택사항)",
        );
        let hospital_placeholder = if self.form.hospital_field().is_disabled() {
            "지역을 먼저 선택하세요"
        } else {
            "병원 이름 (선택사항)"
        };
        self.render_field(
            frame,
            hospital_area,
            FieldId::Hospital,
            "병원명",
            hospital_placeholder,
        );

        if let Some(message) = &self.error {
            frame.render_widget(
                Paragraph::new(Line::styled(message.clone(), theme::error())),
                error_area,
            );
        }

        frame.render_widget(
            Paragraph::new(Line::styled(
                "Tab 다음 입력 · ↑↓ 추천 이동 · Enter 선택/검색 · Esc 종료",
                theme::muted(),
            )),
            footer_area,
        );

        // The dropdown paints last so it overlays whatever sits below the
        // focused input.
        let focused_area = match self.focused {
            FieldId::Treatment => treatment_area,
            FieldId::Location => location_area,
            FieldId::Hospital => hospital_area,
        };
        self.render_dropdown(frame, focused_area, area);
        self.place_cursor(frame, focused_area);
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: FieldId,
        label: &str,
        placeholder: &str,
    ) {
        let focused = self.focused == field;
        let loading = match field {
            FieldId::Treatment => self.form.treatment_field().is_loading(),
            FieldId::Location => self.form.location_field().is_loading(),
            FieldId::Hospital => self.form.hospital_field().is_loading(),
        };

        let mut block_title = label.to_owned();
        if loading {
            block_title.push_str(" — 검색 중...");
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .title(block_title)
            .border_style(if focused {
                theme::focused_border()
            } else {
                theme::blurred_border()
            });

        let text = self.edit(field).as_str();
        let content = if text.is_empty() {
            Line::styled(placeholder.to_owned(), theme::muted())
        } else {
            Line::from(text.to_owned())
        };
        frame.render_widget(Paragraph::new(content).block(block), area);
    }

    fn render_dropdown(&self, frame: &mut Frame, input_area: Rect, bounds: Rect) {
        if !self.form.is_open(self.focused) {
            return;
        }

        let (labels, highlight): (Vec<String>, usize) = match self.focused {
            FieldId::Treatment => {
                let field = self.form.treatment_field();
                (
                    field.suggestions().iter().map(|s| s.label().to_owned()).collect(),
                    field.highlight(),
                )
            }
            FieldId::Location => {
                let field = self.form.location_field();
                (
                    field.suggestions().iter().map(|s| s.label().to_owned()).collect(),
                    field.highlight(),
                )
            }
            FieldId::Hospital => {
                let field = self.form.hospital_field();
                (field.suggestions().to_vec(), field.highlight())
            }
        };

        let rows = labels.len().min(DROPDOWN_MAX_ROWS) as u16;
        let y = input_area.y + input_area.height;
        if y + rows + 2 > bounds.y + bounds.height {
            return; // no room below; skip rather than clip the border
        }
        let dropdown = Rect::new(input_area.x, y, input_area.width, rows + 2);

        let lines: Vec<Line> = labels
            .iter()
            .take(DROPDOWN_MAX_ROWS)
            .enumerate()
            .map(|(i, label)| {
                if i == highlight {
                    Line::styled(format!("▸ {label}"), theme::highlight())
                } else {
                    Line::from(format!("  {label}"))
                }
            })
            .collect();

        frame.render_widget(Clear, dropdown);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme::focused_border()),
            ),
            dropdown,
        );
    }

    fn place_cursor(&self, frame: &mut Frame, input_area: Rect) {
        let col = input_area.x + 1 + self.edit(self.focused).display_cursor_col();
        frame.set_cursor_position(Position::new(
            col.min(input_area.x + input_area.width.saturating_sub(2)),
            input_area.y + 1,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;
    use eolmadak_core::FieldPhase;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typed(screen: &mut HomeScreen, text: &str) -> Vec<HomeAction> {
        text.chars()
            .map(|c| screen.on_key(key(KeyCode::Char(c))))
            .collect()
    }

    #[test]
    fn test_typing_arms_debounce_per_keystroke() {
        let mut screen = HomeScreen::new(&FlowConfig::default());
        let actions = typed(&mut screen, "도수");
        assert_eq!(actions.len(), 2);
        assert!(actions
            .iter()
            .all(|a| matches!(a, HomeAction::Command(FieldId::Treatment, FieldCommand::ArmDebounce { .. }))));
        assert_eq!(screen.form().treatment_field().phase(), FieldPhase::Typing);
    }

    #[test]
    fn test_submit_without_treatment_shows_validation_error() {
        let mut screen = HomeScreen::new(&FlowConfig::default());
        let action = screen.on_key(key(KeyCode::Enter));
        assert!(matches!(action, HomeAction::None));
        assert_eq!(screen.error.as_deref(), Some("진료명을 선택해주세요."));
    }

    #[test]
    fn test_typing_into_disabled_hospital_is_ignored() {
        let mut screen = HomeScreen::new(&FlowConfig::default());
        screen.on_key(key(KeyCode::Tab)); // location
        screen.on_key(key(KeyCode::Tab)); // hospital (disabled)
        assert_eq!(screen.focused(), FieldId::Hospital);

        let actions = typed(&mut screen, "강남");
        assert!(actions.iter().all(|a| matches!(a, HomeAction::None)));
        assert_eq!(screen.edit(FieldId::Hospital).as_str(), "");
    }

    #[test]
    fn test_focus_cycles_through_fields() {
        let mut screen = HomeScreen::new(&FlowConfig::default());
        assert_eq!(screen.focused(), FieldId::Treatment);
        screen.on_key(key(KeyCode::Tab));
        assert_eq!(screen.focused(), FieldId::Location);
        screen.on_key(key(KeyCode::BackTab));
        assert_eq!(screen.focused(), FieldId::Treatment);
        screen.on_key(key(KeyCode::BackTab));
        assert_eq!(screen.focused(), FieldId::Hospital);
    }

    #[test]
    fn test_selection_syncs_line_edit_and_enables_submit() {
        let mut screen = HomeScreen::new(&FlowConfig::default());
        let generation = match typed(&mut screen, "도수").pop().unwrap() {
            HomeAction::Command(_, FieldCommand::ArmDebounce { generation, .. }) => generation,
            other => panic!("expected ArmDebounce, got {other:?}"),
        };
        let seq = match screen
            .form_mut()
            .debounce_elapsed(FieldId::Treatment, generation)
        {
            Some(FieldCommand::Fetch { seq, .. }) => seq,
            other => panic!("expected Fetch, got {other:?}"),
        };
        screen.form_mut().treatment_suggestions(
            seq,
            vec![eolmadak_types::TreatmentCandidate {
                clinic_name: "도수치료".into(),
                clinic_code: "CZ100A".into(),
            }],
        );

        // Enter selects the highlighted suggestion…
        screen.on_key(key(KeyCode::Enter));
        assert_eq!(screen.edit(FieldId::Treatment).as_str(), "도수치료");

        // …and a second Enter submits the validated query.
        match screen.on_key(key(KeyCode::Enter)) {
            HomeAction::Submit(query) => assert_eq!(query.clinic_code, "CZ100A"),
            other => panic!("expected Submit, got {other:?}"),
        }
    }
}
