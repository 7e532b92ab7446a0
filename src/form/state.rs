// src/form/state.rs

//! Profile form state machine.
//!
//! Owns the live [`StudentProfile`], the Input/Results display-mode toggle,
//! and the submission flow. Network completion is applied as plain data
//! (`apply_response` / `apply_failure`), so every transition is testable
//! without a server; [`ProfileForm::submit`] is the async driver that ties
//! the two together over a [`RecommendApi`].

use std::path::PathBuf;

use crate::models::wire::{RecommendRequest, RecommendResponse};
use crate::models::{ProfileField, StudentProfile, UniversityMatch};
use crate::services::RecommendApi;

/// Summary text when the backend response carries none.
pub const FALLBACK_SUMMARY: &str = "No analysis available";

/// Summary text after a failed submission.
pub const FAILURE_SUMMARY: &str =
    "Unable to generate recommendations. Please check your internet connection and try again.";

/// Blocking notice shown to the user after a failed submission.
pub const FAILURE_NOTICE: &str =
    "Unable to connect to recommendation service. Please check your connection and try again.";

/// The form's two display modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Collecting input.
    #[default]
    Input,
    /// Presenting returned matches.
    Results,
}

/// The profile form: input state, submission flow, results presentation.
#[derive(Debug, Default)]
pub struct ProfileForm {
    profile: StudentProfile,
    mode: DisplayMode,
    loading: bool,
    results: Vec<UniversityMatch>,
    summary: String,
    processing_time: f64,
    notice: Option<String>,
}

impl ProfileForm {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Input operations ---

    /// Set exactly one profile field; unrelated fields are untouched.
    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        self.profile.set(field, value);
    }

    /// Read one profile field.
    pub fn field(&self, field: ProfileField) -> &str {
        self.profile.get(field)
    }

    /// Replace the CV attachment.
    pub fn attach_cv(&mut self, path: Option<PathBuf>) {
        self.profile.attach_cv(path);
    }

    pub fn profile(&self) -> &StudentProfile {
        &self.profile
    }

    /// Replace the whole profile, for the non-interactive submission path.
    pub fn set_profile(&mut self, profile: StudentProfile) {
        self.profile = profile;
    }

    // --- Submission state machine ---

    /// Build the wire payload from the current profile. The CV stays local.
    pub fn request(&self) -> RecommendRequest {
        RecommendRequest::from(&self.profile)
    }

    /// Start a submission. Returns `false` (and does nothing) while another
    /// submission is in flight, which is what disables the submit control.
    pub fn begin_submit(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        true
    }

    /// Apply a successful response: map records in order, fall back for a
    /// missing summary, and switch to the results view.
    pub fn apply_response(&mut self, response: RecommendResponse) {
        self.results = response
            .universities
            .into_iter()
            .map(UniversityMatch::from)
            .collect();
        self.summary = response
            .ai_summary
            .unwrap_or_else(|| FALLBACK_SUMMARY.to_string());
        self.processing_time = response.processing_time;
        if response.processing_time > 0.0 {
            log::debug!("Backend generated matches in {:.2}s", response.processing_time);
        }
        self.loading = false;
        self.notice = None;
        self.mode = DisplayMode::Results;
    }

    /// Apply a failed submission: clear prior results, set the fixed error
    /// summary and a blocking notice, and stay on the input view.
    pub fn apply_failure(&mut self) {
        self.results.clear();
        self.summary = FAILURE_SUMMARY.to_string();
        self.processing_time = 0.0;
        self.loading = false;
        self.notice = Some(FAILURE_NOTICE.to_string());
        self.mode = DisplayMode::Input;
    }

    /// Submit the current profile. No-op while a submission is in flight;
    /// failures are absorbed here and never propagate past the form.
    pub async fn submit(&mut self, api: &dyn RecommendApi) {
        if !self.begin_submit() {
            return;
        }
        let request = self.request();
        match api.recommend(&request).await {
            Ok(response) => self.apply_response(response),
            Err(error) => {
                log::error!("Recommendation request failed: {error}");
                self.apply_failure();
            }
        }
    }

    /// Restore the empty default profile and return to the input view.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // --- Accessors ---

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn results(&self) -> &[UniversityMatch] {
        &self.results
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Backend-reported generation time of the current results, in seconds.
    pub fn processing_time(&self) -> f64 {
        self.processing_time
    }

    /// Take the pending blocking notice, if any, for display.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::{AppError, Result};
    use crate::models::wire::HealthStatus;
    use crate::models::NO_PREFERENCE;
    use crate::services::RECOMMEND_PATH;

    /// Scripted backend: a fixed JSON body, or `None` for a failure.
    struct ScriptedApi {
        body: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl ScriptedApi {
        fn ok(body: &'static str) -> Self {
            Self {
                body: Some(body),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                body: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl RecommendApi for ScriptedApi {
        async fn recommend(&self, _request: &RecommendRequest) -> Result<RecommendResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.body {
                Some(body) => Ok(serde_json::from_str(body)?),
                None => Err(AppError::api(RECOMMEND_PATH, "connection refused")),
            }
        }

        async fn options(&self, path: &str) -> Result<serde_json::Value> {
            Err(AppError::api(path, "not scripted"))
        }

        async fn health(&self) -> Result<HealthStatus> {
            Err(AppError::api("/health", "not scripted"))
        }
    }

    const TWO_MATCHES: &str = r#"{
        "universities": [
            {"id": 1, "name": "ETH Zurich", "match_score": 92.5},
            {"id": 2, "name": "TU Delft", "match_score": 88.0}
        ],
        "ai_summary": "Strong fit for systems research.",
        "processing_time": 1.25
    }"#;

    #[tokio::test]
    async fn test_submit_success_switches_to_results_in_order() {
        let mut form = ProfileForm::new();
        form.set_field(ProfileField::DegreeLevel, "masters");

        form.submit(&ScriptedApi::ok(TWO_MATCHES)).await;

        assert_eq!(form.mode(), DisplayMode::Results);
        assert!(!form.is_loading());
        let names: Vec<&str> = form.results().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["ETH Zurich", "TU Delft"]);
        assert_eq!(form.summary(), "Strong fit for systems research.");
        assert_eq!(form.processing_time(), 1.25);
        assert!(form.take_notice().is_none());
    }

    #[tokio::test]
    async fn test_submit_empty_and_missing_list_is_not_an_error() {
        let mut form = ProfileForm::new();
        form.submit(&ScriptedApi::ok(r#"{"ai_summary": "nothing matched"}"#))
            .await;

        assert_eq!(form.mode(), DisplayMode::Results);
        assert!(form.results().is_empty());
        assert_eq!(form.summary(), "nothing matched");
    }

    #[tokio::test]
    async fn test_missing_summary_uses_literal_fallback() {
        let mut form = ProfileForm::new();
        form.submit(&ScriptedApi::ok(r#"{"universities": []}"#)).await;
        assert_eq!(form.summary(), FALLBACK_SUMMARY);
    }

    #[tokio::test]
    async fn test_submit_failure_stays_on_input() {
        let mut form = ProfileForm::new();
        form.submit(&ScriptedApi::ok(TWO_MATCHES)).await;
        form.reset();

        form.submit(&ScriptedApi::failing()).await;

        assert_eq!(form.mode(), DisplayMode::Input);
        assert!(form.results().is_empty());
        assert_eq!(form.summary(), FAILURE_SUMMARY);
        assert_eq!(form.take_notice().as_deref(), Some(FAILURE_NOTICE));
        // The notice is consumed once.
        assert!(form.take_notice().is_none());
    }

    #[tokio::test]
    async fn test_one_submission_in_flight() {
        let mut form = ProfileForm::new();
        assert!(form.begin_submit());
        assert!(!form.begin_submit());

        // While loading, the driver refuses to start another request.
        let api = ScriptedApi::ok(TWO_MATCHES);
        form.submit(&api).await;
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reset_restores_the_empty_default() {
        let mut form = ProfileForm::new();
        form.set_field(ProfileField::Gpa, "3.78/4.00");
        form.set_field(ProfileField::PreferredCountry, "CH");
        form.attach_cv(Some("cv.pdf".into()));

        form.reset();

        assert_eq!(*form.profile(), StudentProfile::default());
        assert_eq!(form.field(ProfileField::PreferredCountry), NO_PREFERENCE);
        assert_eq!(form.mode(), DisplayMode::Input);
        assert!(form.results().is_empty());
        assert!(form.summary().is_empty());
    }

    #[test]
    fn test_request_carries_current_values() {
        let mut form = ProfileForm::new();
        form.set_field(ProfileField::FieldOfInterest, "Computer Science");
        let request = form.request();
        assert_eq!(request.field_of_interest, "Computer Science");
        assert_eq!(request.preferred_country, NO_PREFERENCE);
    }
}
