// src/tui/app.rs

//! Interactive form application state.
//!
//! Owns the [`ProfileForm`], one [`Selector`] per dropdown field, and the
//! focus/editing state. Network work runs on spawned tasks that post
//! [`AppEvent`]s back to the event loop, so the form stays interactive while
//! a request is in flight.

use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::Value;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::form::{DisplayMode, ProfileForm, Selector};
use crate::models::wire::RecommendResponse;
use crate::models::{
    budget_preferences, career_goals, continents, degree_levels, language_preferences,
    start_years, study_modes, OptionTransform, ProfileField,
};
use crate::services::{RecommendApi, COUNTRIES_PATH, FIELDS_PATH};

/// Completion messages from background network tasks.
#[derive(Debug)]
pub enum AppEvent {
    /// A selector fetch finished; `Err` carries the display message.
    OptionsFetched {
        slot: usize,
        result: Result<Value, String>,
    },
    /// The recommendation request finished.
    SubmitFinished(Result<RecommendResponse, String>),
}

/// One focusable row of the form.
#[derive(Debug, Clone, Copy)]
pub enum Row {
    /// CV/resume path input. The file is held locally, never uploaded.
    CvPath,
    /// Free-text input bound to a profile field.
    Text(ProfileField),
    /// Dropdown bound to a profile field, backed by `selectors[slot]`.
    Dropdown { field: ProfileField, slot: usize },
    /// The submit control.
    Submit,
}

pub struct App {
    pub form: ProfileForm,
    pub selectors: Vec<Selector>,
    pub rows: Vec<Row>,
    pub focus: usize,
    pub popup_highlight: usize,
    pub cv_input: String,
    pub notice: Option<String>,
    pub result_cursor: usize,
    pub should_quit: bool,

    api: Arc<dyn RecommendApi>,
    tx: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(api: Arc<dyn RecommendApi>) -> (Self, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = unbounded_channel();

        let selectors = vec![
            Selector::with_static("Intended Degree Level", degree_levels())
                .placeholder("Select degree level"),
            Selector::with_endpoint("Field of Interest", FIELDS_PATH, OptionTransform::Fields)
                .placeholder("Select field of study"),
            Selector::with_static("Preferred Continent", continents())
                .placeholder("Select continent"),
            Selector::with_endpoint(
                "Preferred Country",
                COUNTRIES_PATH,
                OptionTransform::Countries,
            )
            .placeholder("Select country"),
            Selector::with_static("Budget or Scholarship Preference", budget_preferences())
                .placeholder("Select funding preference"),
            Selector::with_static("Language Preference", language_preferences())
                .placeholder("Select language preference"),
            Selector::with_static("Target Start Year", start_years())
                .placeholder("Select start year"),
            Selector::with_static("Mode of Study", study_modes()).placeholder("Select study mode"),
            Selector::with_static("Career Goal", career_goals()).placeholder("Select career goal"),
        ];

        let rows = vec![
            Row::CvPath,
            Row::Dropdown {
                field: ProfileField::DegreeLevel,
                slot: 0,
            },
            Row::Dropdown {
                field: ProfileField::FieldOfInterest,
                slot: 1,
            },
            Row::Text(ProfileField::Gpa),
            Row::Text(ProfileField::TestScores),
            Row::Dropdown {
                field: ProfileField::PreferredContinent,
                slot: 2,
            },
            Row::Dropdown {
                field: ProfileField::PreferredCountry,
                slot: 3,
            },
            Row::Dropdown {
                field: ProfileField::BudgetPreference,
                slot: 4,
            },
            Row::Dropdown {
                field: ProfileField::LanguagePreference,
                slot: 5,
            },
            Row::Dropdown {
                field: ProfileField::TargetStartYear,
                slot: 6,
            },
            Row::Dropdown {
                field: ProfileField::StudyMode,
                slot: 7,
            },
            Row::Dropdown {
                field: ProfileField::CareerGoal,
                slot: 8,
            },
            Row::Text(ProfileField::ResearchInterests),
            Row::Submit,
        ];

        let app = Self {
            form: ProfileForm::new(),
            selectors,
            rows,
            focus: 0,
            popup_highlight: 0,
            cv_input: String::new(),
            notice: None,
            result_cursor: 0,
            should_quit: false,
            api,
            tx,
        };
        (app, rx)
    }

    /// Start the one-per-mount fetch for every remote selector.
    pub fn start_option_fetches(&mut self) {
        for slot in 0..self.selectors.len() {
            if let Some(path) = self.selectors[slot].begin_fetch() {
                self.spawn_option_fetch(slot, path);
            }
        }
    }

    fn spawn_option_fetch(&self, slot: usize, path: String) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api
                .options(&path)
                .await
                .map_err(|e| format!("Failed to fetch options: {e}"));
            let _ = tx.send(AppEvent::OptionsFetched { slot, result });
        });
    }

    fn spawn_submit(&mut self) {
        if !self.form.begin_submit() {
            return;
        }
        let request = self.form.request();
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api
                .recommend(&request)
                .await
                .map_err(|e| e.to_string());
            let _ = tx.send(AppEvent::SubmitFinished(result));
        });
    }

    /// Apply a completion message from a background task.
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::OptionsFetched { slot, result } => match result {
                Ok(payload) => self.selectors[slot].apply_payload(&payload),
                Err(message) => {
                    log::warn!(
                        "Option fetch for {} failed: {message}",
                        self.selectors[slot].label()
                    );
                    self.selectors[slot].apply_fetch_error(message);
                }
            },
            AppEvent::SubmitFinished(result) => match result {
                Ok(response) => {
                    self.form.apply_response(response);
                    self.result_cursor = 0;
                }
                Err(message) => {
                    log::error!("Recommendation request failed: {message}");
                    self.form.apply_failure();
                    self.notice = self.form.take_notice();
                }
            },
        }
    }

    /// The selector behind the currently open popup, if any.
    pub fn open_popup(&self) -> Option<usize> {
        self.rows.iter().find_map(|row| match row {
            Row::Dropdown { slot, .. } if self.selectors[*slot].is_open() => Some(*slot),
            _ => None,
        })
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // A blocking notice swallows the next key.
        if self.notice.is_some() {
            self.notice = None;
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.form.mode() {
            DisplayMode::Results => self.handle_results_key(key),
            DisplayMode::Input => self.handle_input_key(key),
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('n') => {
                self.form.reset();
                self.cv_input.clear();
                self.focus = 0;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = self.form.results().len().saturating_sub(1);
                self.result_cursor = (self.result_cursor + 1).min(last);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.result_cursor = self.result_cursor.saturating_sub(1);
            }
            _ => {}
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        if let Some(slot) = self.open_popup() {
            self.handle_popup_key(slot, key);
            return;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            KeyCode::Enter => self.activate_focused(),
            KeyCode::Backspace => self.edit_focused(None),
            KeyCode::Char(c) => self.edit_focused(Some(c)),
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, slot: usize, key: KeyEvent) {
        let selector = &mut self.selectors[slot];
        match key.code {
            // Any interaction outside the option list closes the popup.
            KeyCode::Esc | KeyCode::Tab => selector.close(),
            KeyCode::Down | KeyCode::Char('j') => {
                let last = selector.options().len().saturating_sub(1);
                self.popup_highlight = (self.popup_highlight + 1).min(last);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.popup_highlight = self.popup_highlight.saturating_sub(1);
            }
            KeyCode::Char('r') => {
                if selector.error().is_some() {
                    if let Some(path) = selector.begin_fetch() {
                        self.spawn_option_fetch(slot, path);
                    }
                }
            }
            KeyCode::Enter => {
                let value = selector
                    .options()
                    .get(self.popup_highlight)
                    .map(|option| option.value.clone());
                if let Some(value) = value {
                    let chosen = selector.choose(&value);
                    if let Some(Row::Dropdown { field, .. }) = self.rows.get(self.focus).copied() {
                        self.form.set_field(field, chosen);
                    }
                } else {
                    selector.close();
                }
            }
            _ => {}
        }
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.rows.len();
    }

    fn focus_previous(&mut self) {
        self.focus = self.focus.checked_sub(1).unwrap_or(self.rows.len() - 1);
    }

    fn activate_focused(&mut self) {
        match self.rows[self.focus] {
            Row::Dropdown { field, slot } => {
                let current = self.form.field(field).to_string();
                let selector = &mut self.selectors[slot];
                selector.toggle_open();
                if selector.is_open() {
                    self.popup_highlight = selector
                        .options()
                        .iter()
                        .position(|option| option.value == current)
                        .unwrap_or(0);
                }
            }
            Row::Submit => {
                if !self.form.is_loading() {
                    self.spawn_submit();
                }
            }
            Row::CvPath | Row::Text(_) => self.focus_next(),
        }
    }

    fn edit_focused(&mut self, input: Option<char>) {
        match self.rows[self.focus] {
            Row::Text(field) => {
                let mut value = self.form.field(field).to_string();
                match input {
                    Some(c) => value.push(c),
                    None => {
                        value.pop();
                    }
                }
                self.form.set_field(field, value);
            }
            Row::CvPath => {
                match input {
                    Some(c) => self.cv_input.push(c),
                    None => {
                        self.cv_input.pop();
                    }
                }
                let path = (!self.cv_input.trim().is_empty())
                    .then(|| PathBuf::from(self.cv_input.trim()));
                self.form.attach_cv(path);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::{AppError, Result};
    use crate::models::wire::{HealthStatus, RecommendRequest};
    use crate::models::SelectOption;

    struct NullApi;

    #[async_trait]
    impl RecommendApi for NullApi {
        async fn recommend(&self, _request: &RecommendRequest) -> Result<RecommendResponse> {
            Err(AppError::api("/recommend", "offline"))
        }
        async fn options(&self, path: &str) -> Result<Value> {
            Err(AppError::api(path, "offline"))
        }
        async fn health(&self) -> Result<HealthStatus> {
            Err(AppError::api("/health", "offline"))
        }
    }

    fn new_app() -> App {
        App::new(Arc::new(NullApi)).0
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_typing_edits_only_the_focused_field() {
        let mut app = new_app();
        // Focus the GPA row.
        app.focus = 3;
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('.'));
        press(&mut app, KeyCode::Char('8'));
        assert_eq!(app.form.field(ProfileField::Gpa), "3.8");
        assert!(app.form.field(ProfileField::TestScores).is_empty());

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.form.field(ProfileField::Gpa), "3.");
    }

    #[test]
    fn test_dropdown_choice_lands_in_the_form() {
        let mut app = new_app();
        // Focus the degree-level dropdown and open it.
        app.focus = 1;
        press(&mut app, KeyCode::Enter);
        assert!(app.open_popup().is_some());

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.field(ProfileField::DegreeLevel), "masters");
        assert!(app.open_popup().is_none());
    }

    #[test]
    fn test_popup_reopens_on_current_value() {
        let mut app = new_app();
        app.form.set_field(ProfileField::DegreeLevel, "phd");
        app.focus = 1;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.popup_highlight, 2);
    }

    #[test]
    fn test_escape_closes_popup_without_clearing_options() {
        let mut app = new_app();
        app.focus = 1;
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Esc);
        assert!(app.open_popup().is_none());
        assert!(!app.selectors[0].options().is_empty());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_failed_submit_raises_notice_and_notice_swallows_key() {
        let mut app = new_app();
        app.handle_event(AppEvent::SubmitFinished(Err("boom".into())));
        assert!(app.notice.is_some());
        assert_eq!(app.form.mode(), DisplayMode::Input);

        // The next key only dismisses the notice.
        press(&mut app, KeyCode::Char('x'));
        assert!(app.notice.is_none());
        assert!(app.form.field(ProfileField::Gpa).is_empty());
    }

    #[test]
    fn test_options_event_installs_options() {
        let mut app = new_app();
        app.handle_event(AppEvent::OptionsFetched {
            slot: 1,
            result: Ok(serde_json::json!({"fields": ["CS"]})),
        });
        assert_eq!(
            app.selectors[1].options(),
            &[SelectOption::identity("CS")]
        );
    }

    #[test]
    fn test_new_search_resets_everything() {
        let mut app = new_app();
        app.handle_event(AppEvent::SubmitFinished(Ok(serde_json::from_str(
            r#"{"universities": [{"id": 1, "name": "ETH Zurich"}]}"#,
        )
        .unwrap())));
        assert_eq!(app.form.mode(), DisplayMode::Results);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.form.mode(), DisplayMode::Input);
        assert!(app.form.results().is_empty());
    }
}
