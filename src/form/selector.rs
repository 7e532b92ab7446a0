// src/form/selector.rs

//! Dynamic single-choice selector.
//!
//! Options come from a static list fixed at construction or from a lookup
//! endpoint fetched once per activation. A fetch failure is local and
//! recoverable: the error renders inline with a retry action, the previous
//! options stay, and sibling selectors are unaffected.

use serde_json::Value;

use crate::models::{OptionTransform, SelectOption};
use crate::services::RecommendApi;

/// Label of the empty-popup affordance.
pub const NO_OPTIONS_LABEL: &str = "No options available";

/// Default placeholder when none is configured.
pub const DEFAULT_PLACEHOLDER: &str = "Select an option";

/// Where a selector's options come from.
#[derive(Debug, Clone)]
pub enum OptionSource {
    /// Fixed list supplied at construction.
    Static(Vec<SelectOption>),
    /// Lookup endpoint plus the transform for its payload.
    Remote {
        path: String,
        transform: OptionTransform,
    },
}

/// One configured occurrence of the selector, bound to a single form field.
#[derive(Debug)]
pub struct Selector {
    label: String,
    source: OptionSource,
    placeholder: String,
    required: bool,

    options: Vec<SelectOption>,
    loading: bool,
    error: Option<String>,
    open: bool,
    fetched: bool,
}

impl Selector {
    /// Selector over a fixed option list. Never fetches.
    pub fn with_static(label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        Self {
            label: label.into(),
            options: options.clone(),
            source: OptionSource::Static(options),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            required: false,
            loading: false,
            error: None,
            open: false,
            fetched: false,
        }
    }

    /// Selector populated from a lookup endpoint at activation.
    pub fn with_endpoint(
        label: impl Into<String>,
        path: impl Into<String>,
        transform: OptionTransform,
    ) -> Self {
        Self {
            label: label.into(),
            source: OptionSource::Remote {
                path: path.into(),
                transform,
            },
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            required: false,
            options: Vec::new(),
            loading: false,
            error: None,
            open: false,
            fetched: false,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    // --- Fetch state machine ---

    /// Start a fetch: clear any prior error, flip loading, and hand back the
    /// endpoint path. `None` for static sources, which never fetch.
    pub fn begin_fetch(&mut self) -> Option<String> {
        match &self.source {
            OptionSource::Static(_) => None,
            OptionSource::Remote { path, .. } => {
                self.error = None;
                self.loading = true;
                self.fetched = true;
                Some(path.clone())
            }
        }
    }

    /// Install a fetched payload through the configured transform.
    pub fn apply_payload(&mut self, payload: &Value) {
        if let OptionSource::Remote { transform, .. } = &self.source {
            self.options = transform.apply(payload);
        }
        self.loading = false;
    }

    /// Record a fetch failure. The previous options stay authoritative.
    pub fn apply_fetch_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
        self.loading = false;
    }

    /// Fetch and install options once per activation. No-op for static
    /// sources and for selectors that already fetched.
    pub async fn ensure_options(&mut self, api: &dyn RecommendApi) {
        if self.fetched {
            return;
        }
        self.fetch(api).await;
    }

    /// Re-issue the fetch after a failure. No-op unless an error is present.
    pub async fn retry(&mut self, api: &dyn RecommendApi) {
        if self.error.is_none() {
            return;
        }
        self.fetch(api).await;
    }

    async fn fetch(&mut self, api: &dyn RecommendApi) {
        let Some(path) = self.begin_fetch() else {
            return;
        };
        match api.options(&path).await {
            Ok(payload) => self.apply_payload(&payload),
            Err(error) => {
                log::warn!("Option fetch for {} failed: {error}", self.label);
                self.apply_fetch_error(format!("Failed to fetch options: {error}"));
            }
        }
    }

    // --- Selection and popup ---

    /// Hand the chosen value back to the owning form and close the popup.
    /// The option list and the parent-owned selection are not touched here.
    pub fn choose(&mut self, value: &str) -> String {
        self.open = false;
        value.to_string()
    }

    /// Label of the option matching the parent-owned value, if any.
    pub fn selected_label<'a>(&'a self, value: &str) -> Option<&'a str> {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }

    /// Open or close the popup. Purely presentational.
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    /// Close the popup (outside interaction). Options and error state stay.
    pub fn close(&mut self) {
        self.open = false;
    }

    // --- Accessors ---

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Trigger text: the selected label, or the loading/placeholder hint.
    pub fn display_text(&self, value: &str) -> String {
        if self.loading {
            return "Loading...".to_string();
        }
        self.selected_label(value)
            .unwrap_or(&self.placeholder)
            .to_string()
    }

    /// Whether the popup should show the explicit no-options affordance.
    pub fn is_empty_state(&self) -> bool {
        self.options.is_empty() && self.error.is_none() && !self.loading
    }
}
