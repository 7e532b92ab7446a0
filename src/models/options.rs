//! Selector option data structures and payload transforms.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::profile::NO_PREFERENCE;

/// A single selectable choice: canonical machine value plus display label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }

    /// Identity option where the value doubles as the label.
    pub fn identity(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

/// How a raw endpoint payload becomes an option list.
///
/// Transforms are enumerated per endpoint rather than left as open callbacks,
/// so each wire shape is declared and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionTransform {
    /// Heuristic fallback for unconfigured endpoints.
    #[default]
    Auto,
    /// `{"fields": ["...", ...]}` → identity value/label pairs.
    Fields,
    /// `{"countries": [{"code", "name"}, ...]}` with a synthetic
    /// no-preference entry prepended.
    Countries,
}

impl OptionTransform {
    /// Apply the transform to a raw JSON payload.
    pub fn apply(&self, payload: &Value) -> Vec<SelectOption> {
        match self {
            Self::Auto => auto_transform(payload),
            Self::Fields => payload
                .get("fields")
                .and_then(Value::as_array)
                .map(|fields| {
                    fields
                        .iter()
                        .filter_map(Value::as_str)
                        .map(SelectOption::identity)
                        .collect()
                })
                .unwrap_or_default(),
            Self::Countries => {
                let mut options = vec![SelectOption::new(NO_PREFERENCE, "No preference")];
                if let Some(countries) = payload.get("countries").and_then(Value::as_array) {
                    options.extend(countries.iter().filter_map(|country| {
                        let code = country.get("code")?.as_str()?;
                        let name = country.get("name")?.as_str()?;
                        Some(SelectOption::new(code, name))
                    }));
                }
                options
            }
        }
    }
}

/// Default transformation: array of strings becomes identity pairs, array of
/// objects extracts `value`/`code`/`id` and `label`/`name`/`title`, anything
/// else yields an empty list.
fn auto_transform(payload: &Value) -> Vec<SelectOption> {
    let Some(items) = payload.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(SelectOption::identity(s.clone())),
            Value::Object(_) => {
                let value = pick_str(item, &["value", "code", "id"])?;
                let label = pick_str(item, &["label", "name", "title"])?;
                Some(SelectOption::new(value, label))
            }
            _ => None,
        })
        .collect()
}

fn pick_str<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| item.get(key)?.as_str())
}

// --- Static choice lists ---

/// Degree level choices.
pub fn degree_levels() -> Vec<SelectOption> {
    vec![
        SelectOption::new("bachelors", "Bachelor's"),
        SelectOption::new("masters", "Master's"),
        SelectOption::new("phd", "PhD"),
    ]
}

/// Continent choices.
pub fn continents() -> Vec<SelectOption> {
    vec![
        SelectOption::new("north-america", "North America"),
        SelectOption::new("europe", "Europe"),
        SelectOption::new("asia", "Asia"),
        SelectOption::new("australia", "Australia"),
        SelectOption::new("south-america", "South America"),
        SelectOption::new("africa", "Africa"),
        SelectOption::new(NO_PREFERENCE, "No preference"),
    ]
}

/// Funding preference choices.
pub fn budget_preferences() -> Vec<SelectOption> {
    vec![
        SelectOption::new("full-funding", "Need full funding"),
        SelectOption::new("partial-funding", "Partial funding acceptable"),
        SelectOption::new("self-funded", "Self-funded"),
    ]
}

/// Language preference choices.
pub fn language_preferences() -> Vec<SelectOption> {
    vec![
        SelectOption::new("english-only", "English only"),
        SelectOption::new("multilingual", "Multilingual programs OK"),
    ]
}

/// Study mode choices.
pub fn study_modes() -> Vec<SelectOption> {
    vec![
        SelectOption::new("on-campus", "On-campus"),
        SelectOption::new("online", "Online"),
        SelectOption::new("hybrid", "Hybrid"),
        SelectOption::new(NO_PREFERENCE, "No preference"),
    ]
}

/// Career goal choices.
pub fn career_goals() -> Vec<SelectOption> {
    vec![
        SelectOption::new("industry", "Industry"),
        SelectOption::new("academia", "Academia"),
        SelectOption::new("research-labs", "Research labs"),
        SelectOption::new("entrepreneurship", "Entrepreneurship"),
        SelectOption::new("not-sure", "Not sure yet"),
    ]
}

/// Target start years: the current year and the following ten.
pub fn start_years() -> Vec<SelectOption> {
    let current = chrono::Local::now().year();
    (0..11)
        .map(|offset| SelectOption::identity((current + offset).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_transform() {
        let payload = json!({"fields": ["CS", "Physics"]});
        let options = OptionTransform::Fields.apply(&payload);
        assert_eq!(
            options,
            vec![
                SelectOption::identity("CS"),
                SelectOption::identity("Physics"),
            ]
        );
    }

    #[test]
    fn test_fields_transform_missing_key_is_empty() {
        let options = OptionTransform::Fields.apply(&json!({"unexpected": true}));
        assert!(options.is_empty());
    }

    #[test]
    fn test_countries_transform_prepends_sentinel() {
        let payload = json!({"countries": [{"code": "US", "name": "United States"}]});
        let options = OptionTransform::Countries.apply(&payload);
        assert_eq!(
            options,
            vec![
                SelectOption::new(NO_PREFERENCE, "No preference"),
                SelectOption::new("US", "United States"),
            ]
        );
    }

    #[test]
    fn test_countries_transform_sentinel_survives_missing_list() {
        let options = OptionTransform::Countries.apply(&json!({}));
        assert_eq!(options, vec![SelectOption::new(NO_PREFERENCE, "No preference")]);
    }

    #[test]
    fn test_auto_transform_string_array() {
        let options = OptionTransform::Auto.apply(&json!(["a", "b"]));
        assert_eq!(
            options,
            vec![SelectOption::identity("a"), SelectOption::identity("b")]
        );
    }

    #[test]
    fn test_auto_transform_object_array() {
        let payload = json!([
            {"code": "kr", "name": "Korea"},
            {"value": "jp", "label": "Japan"},
        ]);
        let options = OptionTransform::Auto.apply(&payload);
        assert_eq!(
            options,
            vec![
                SelectOption::new("kr", "Korea"),
                SelectOption::new("jp", "Japan"),
            ]
        );
    }

    #[test]
    fn test_auto_transform_non_array_is_empty() {
        assert!(OptionTransform::Auto.apply(&json!({"nested": []})).is_empty());
        assert!(OptionTransform::Auto.apply(&json!(42)).is_empty());
    }

    #[test]
    fn test_start_years_span_eleven_years() {
        let years = start_years();
        assert_eq!(years.len(), 11);
        let first: i32 = years[0].value.parse().unwrap();
        let last: i32 = years[10].value.parse().unwrap();
        assert_eq!(last - first, 10);
    }
}
