//! Form core: profile state machine and the dynamic option selector.

mod selector;
mod state;

pub use selector::{OptionSource, Selector, DEFAULT_PLACEHOLDER, NO_OPTIONS_LABEL};
pub use state::{
    DisplayMode, ProfileForm, FAILURE_NOTICE, FAILURE_SUMMARY, FALLBACK_SUMMARY,
};
