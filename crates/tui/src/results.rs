//! Results screen: the fetched price report with sorting and pagination.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use eolmadak_core::{page_window, PageEntry, Paginator, SortKey};
use eolmadak_types::{ReportRequest, ReportSnapshot, SearchQuery};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::theme;

/// What a key press on the results screen asks the app to do.
#[derive(Debug)]
pub enum ResultsAction {
    None,
    /// Issue (or re-issue) the report fetch.
    Fetch {
        attempt: u64,
        request: ReportRequest,
    },
    BackHome,
    Quit,
}

/// Lifecycle of the report fetch.
#[derive(Debug)]
pub enum ReportState {
    Loading,
    /// Terminal until the user retries.
    Failed(String),
    Loaded {
        snapshot: ReportSnapshot,
        paginator: Paginator,
    },
}

pub struct ResultsScreen {
    query: SearchQuery,
    state: ReportState,
    attempt: u64,
    page_size: usize,
}

impl ResultsScreen {
    /// Guard the screen entry: a query without a clinic code redirects back
    /// to the search entry point, and no fetch may be attempted for it.
    pub fn try_new(query: SearchQuery, page_size: usize) -> Option<Self> {
        if query.clinic_code.trim().is_empty() {
            tracing::warn!("results entry without clinic code; redirecting home");
            return None;
        }
        Some(Self {
            query,
            state: ReportState::Loading,
            attempt: 0,
            page_size,
        })
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    /// Enter the loading state and describe the fetch to run.
    ///
    /// Used for the initial fetch and for every manual retry; each call
    /// supersedes earlier attempts, so a late response from a superseded
    /// attempt is discarded on arrival.
    pub fn start_fetch(&mut self) -> ResultsAction {
        self.attempt += 1;
        self.state = ReportState::Loading;
        ResultsAction::Fetch {
            attempt: self.attempt,
            request: self.query.report_request(),
        }
    }

    /// A report fetch finished. Stale attempts are ignored.
    pub fn report_arrived(&mut self, attempt: u64, outcome: Result<ReportSnapshot, String>) {
        if attempt != self.attempt {
            tracing::debug!(attempt, "discarding stale report response");
            return;
        }
        self.state = match outcome {
            Ok(snapshot) => {
                let paginator = Paginator::new(snapshot.report.list.clone(), self.page_size);
                ReportState::Loaded {
                    snapshot,
                    paginator,
                }
            }
            Err(message) => ReportState::Failed(message),
        };
    }

    pub fn on_key(&mut self, key: KeyEvent) -> ResultsAction {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => return ResultsAction::BackHome,
            KeyCode::Char('q') => return ResultsAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return ResultsAction::Quit;
            }
            // Manual retry, only meaningful from the failed state.
            KeyCode::Char('r') => {
                if matches!(self.state, ReportState::Failed(_)) {
                    return self.start_fetch();
                }
            }
            KeyCode::Char('s') => {
                if let ReportState::Loaded { paginator, .. } = &mut self.state {
                    let flipped = match paginator.sort_key() {
                        SortKey::PriceAsc => SortKey::PriceDesc,
                        SortKey::PriceDesc => SortKey::PriceAsc,
                    };
                    paginator.set_sort_key(flipped);
                }
            }
            KeyCode::Left => {
                if let ReportState::Loaded { paginator, .. } = &mut self.state {
                    paginator.prev_page();
                }
            }
            KeyCode::Right => {
                if let ReportState::Loaded { paginator, .. } = &mut self.state {
                    paginator.next_page();
                }
            }
            _ => {}
        }
        ResultsAction::None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [criteria_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_criteria(frame, criteria_area);

        match &self.state {
            ReportState::Loading => {
                frame.render_widget(
                    Paragraph::new(Line::styled("결과를 불러오는 중...", theme::muted())),
                    body_area,
                );
            }
            ReportState::Failed(message) => {
                let lines = vec![
                    Line::styled("검색 결과를 불러오는데 실패했습니다.", theme::error()),
                    Line::from(message.clone()),
                    Line::styled("r 키를 눌러 다시 시도하세요", theme::muted()),
                ];
                frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), body_area);
            }
            ReportState::Loaded { paginator, .. } if paginator.is_empty() => {
                let lines = vec![
                    Line::from("검색 결과가 없습니다."),
                    Line::styled("다른 검색 조건으로 시도해보세요.", theme::muted()),
                ];
                frame.render_widget(Paragraph::new(lines), body_area);
            }
            ReportState::Loaded {
                snapshot,
                paginator,
            } => self.render_report(frame, body_area, snapshot, paginator),
        }

        frame.render_widget(
            Paragraph::new(Line::styled(
                "←→ 페이지 · s 정렬 전환 · Esc 새 검색 · q 종료",
                theme::muted(),
            )),
            footer_area,
        );
    }

    fn render_criteria(&self, frame: &mut Frame, area: Rect) {
        let mut chips: Vec<Span> = vec![Span::styled(
            format!("[{}]", self.query.clinic_name),
            theme::title(),
        )];
        if let Some(location) = &self.query.location_name {
            chips.push(Span::raw("  "));
            chips.push(Span::styled(format!("[{location}]"), theme::focused_border()));
        }
        if let Some(hospital) = &self.query.hospital_name {
            chips.push(Span::raw("  "));
            chips.push(Span::styled(format!("[{hospital}]"), theme::focused_border()));
        }
        frame.render_widget(
            Paragraph::new(vec![Line::from("검색 조건"), Line::from(chips)]),
            area,
        );
    }

    fn render_report(
        &self,
        frame: &mut Frame,
        area: Rect,
        snapshot: &ReportSnapshot,
        paginator: &Paginator,
    ) {
        let comment_height = if snapshot.report.ai_comment.is_empty() { 0 } else { 4 };
        let [summary_area, comment_area, list_area, pages_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(comment_height),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let sort_label = match paginator.sort_key() {
            SortKey::PriceAsc => "가격 낮은순",
            SortKey::PriceDesc => "가격 높은순",
        };
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(format!("검색 결과 {}건", snapshot.report.result_count)),
                Span::styled(format!("  ·  {sort_label}"), theme::muted()),
            ])),
            summary_area,
        );

        if comment_height > 0 {
            frame.render_widget(
                Paragraph::new(snapshot.report.ai_comment.clone())
                    .wrap(Wrap { trim: true })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title("AI 분석")
                            .border_style(theme::blurred_border()),
                    ),
                comment_area,
            );
        }

        let page = paginator.page();
        let mut lines: Vec<Line> = Vec::new();
        for item in &page.page_items {
            lines.push(Line::from(vec![
                Span::styled(item.hospital_name.clone(), theme::title()),
                Span::raw("  "),
                Span::styled(item.price_label(), theme::price()),
            ]));
            lines.push(Line::styled(
                format!("  {} · {}", item.location, item.treatment_name),
                theme::muted(),
            ));
            lines.push(Line::from(""));
        }
        frame.render_widget(Paragraph::new(lines), list_area);

        self.render_pagination(frame, pages_area, paginator);
    }

    fn render_pagination(&self, frame: &mut Frame, area: Rect, paginator: &Paginator) {
        let total = paginator.total_pages();
        if total <= 1 {
            return;
        }

        let mut spans: Vec<Span> = Vec::new();
        for entry in page_window(paginator.current_page(), total) {
            match entry {
                PageEntry::Page(n) if n == paginator.current_page() => {
                    spans.push(Span::styled(format!(" {n} "), theme::highlight()));
                }
                PageEntry::Page(n) => spans.push(Span::raw(format!(" {n} "))),
                PageEntry::Ellipsis => spans.push(Span::styled(" … ", theme::muted())),
            }
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use eolmadak_types::{PriceReport, ResultItem};

    fn query() -> SearchQuery {
        SearchQuery {
            clinic_code: "CZ100A".into(),
            clinic_name: "도수치료".into(),
            hospital_name: None,
            sido_code: Some("11".into()),
            siggu_code: Some("11230".into()),
            location_name: Some("서울특별시 강남구".into()),
        }
    }

    fn snapshot(n: usize) -> ReportSnapshot {
        let list: Vec<ResultItem> = (0..n)
            .map(|i| ResultItem {
                id: i as i64,
                hospital_name: format!("병원 {i}"),
                location: "서울특별시 강남구".into(),
                treatment_name: "도수치료".into(),
                min_price: 100_000 + i as u64 * 1_000,
                max_price: None,
            })
            .collect();
        ReportSnapshot {
            report: PriceReport {
                result_count: n as u32,
                ai_comment: "코멘트".into(),
                list,
            },
            fetched_at: Utc::now(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_entry_without_clinic_code_is_refused() {
        let mut bad = query();
        bad.clinic_code = "  ".into();
        assert!(ResultsScreen::try_new(bad, 10).is_none());
    }

    #[test]
    fn test_fetch_failure_then_single_retry() {
        let mut screen = ResultsScreen::try_new(query(), 10).unwrap();
        let first = screen.start_fetch();
        let attempt = match first {
            ResultsAction::Fetch { attempt, .. } => attempt,
            other => panic!("expected Fetch, got {other:?}"),
        };

        screen.report_arrived(attempt, Err("connection refused".into()));
        assert!(matches!(screen.state(), ReportState::Failed(_)));

        // Retry issues exactly one new fetch with a fresh attempt id.
        match screen.on_key(key(KeyCode::Char('r'))) {
            ResultsAction::Fetch { attempt: next, .. } => assert_eq!(next, attempt + 1),
            other => panic!("expected Fetch, got {other:?}"),
        }
        assert!(matches!(screen.state(), ReportState::Loading));

        // Retry is a no-op while loading or loaded.
        assert!(matches!(
            screen.on_key(key(KeyCode::Char('r'))),
            ResultsAction::None
        ));
    }

    #[test]
    fn test_stale_attempt_is_discarded() {
        let mut screen = ResultsScreen::try_new(query(), 10).unwrap();
        let ResultsAction::Fetch { attempt: first, .. } = screen.start_fetch() else {
            panic!("expected Fetch");
        };
        screen.report_arrived(first, Err("timeout".into()));
        let ResultsAction::Fetch { attempt: second, .. } = screen.on_key(key(KeyCode::Char('r')))
        else {
            panic!("expected Fetch");
        };

        // The superseded attempt answers late; the screen must stay loading.
        screen.report_arrived(first, Ok(snapshot(3)));
        assert!(matches!(screen.state(), ReportState::Loading));

        screen.report_arrived(second, Ok(snapshot(3)));
        assert!(matches!(screen.state(), ReportState::Loaded { .. }));
    }

    #[test]
    fn test_request_carries_report_wire_fields() {
        let mut screen = ResultsScreen::try_new(query(), 10).unwrap();
        let ResultsAction::Fetch { request, .. } = screen.start_fetch() else {
            panic!("expected Fetch");
        };
        assert_eq!(request.clinic_code, "CZ100A");
        assert_eq!(request.siggu_code.as_deref(), Some("11230"));
    }

    #[test]
    fn test_sort_toggle_resets_page() {
        let mut screen = ResultsScreen::try_new(query(), 10).unwrap();
        let ResultsAction::Fetch { attempt, .. } = screen.start_fetch() else {
            panic!("expected Fetch");
        };
        screen.report_arrived(attempt, Ok(snapshot(25)));

        screen.on_key(key(KeyCode::Right));
        screen.on_key(key(KeyCode::Right));
        if let ReportState::Loaded { paginator, .. } = screen.state() {
            assert_eq!(paginator.current_page(), 3);
        } else {
            panic!("expected Loaded");
        }

        screen.on_key(key(KeyCode::Char('s')));
        if let ReportState::Loaded { paginator, .. } = screen.state() {
            assert_eq!(paginator.sort_key(), SortKey::PriceDesc);
            assert_eq!(paginator.current_page(), 1);
        } else {
            panic!("expected Loaded");
        }
    }

    #[test]
    fn test_empty_report_is_not_an_error() {
        let mut screen = ResultsScreen::try_new(query(), 10).unwrap();
        let ResultsAction::Fetch { attempt, .. } = screen.start_fetch() else {
            panic!("expected Fetch");
        };
        screen.report_arrived(attempt, Ok(snapshot(0)));
        match screen.state() {
            ReportState::Loaded { paginator, .. } => assert!(paginator.is_empty()),
            other => panic!("expected Loaded, got {other:?}"),
        }
    }
}
