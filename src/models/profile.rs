//! Student profile data structure.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Sentinel value meaning "no preferred country".
pub const NO_PREFERENCE: &str = "no-preference";

/// A student's academic profile, collected by the form.
///
/// All fields are free strings; empty or partial values are permitted and
/// passed through to the backend as-is. Exactly one profile is live per
/// session and it is replaced wholesale on reset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentProfile {
    /// Path to the attached CV/resume, if any. Held locally; the recommend
    /// payload does not include it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv: Option<PathBuf>,

    /// Intended degree level
    #[serde(default)]
    pub degree_level: String,

    /// Field of study
    #[serde(default)]
    pub field_of_interest: String,

    /// Grade point average, e.g. "3.78/4.00"
    #[serde(default)]
    pub gpa: String,

    /// Standardized test scores, e.g. "TOEFL 105, GRE 320"
    #[serde(default)]
    pub test_scores: String,

    /// Preferred continent
    #[serde(default)]
    pub preferred_continent: String,

    /// Preferred country code, defaults to the no-preference sentinel
    #[serde(default = "default_country")]
    pub preferred_country: String,

    /// Budget or scholarship preference
    #[serde(default)]
    pub budget_preference: String,

    /// Free-text research interests
    #[serde(default)]
    pub research_interests: String,

    /// Language preference
    #[serde(default)]
    pub language_preference: String,

    /// Target start year
    #[serde(default)]
    pub target_start_year: String,

    /// Mode of study
    #[serde(default)]
    pub study_mode: String,

    /// Career goal
    #[serde(default)]
    pub career_goal: String,
}

fn default_country() -> String {
    NO_PREFERENCE.to_string()
}

impl Default for StudentProfile {
    fn default() -> Self {
        Self {
            cv: None,
            degree_level: String::new(),
            field_of_interest: String::new(),
            gpa: String::new(),
            test_scores: String::new(),
            preferred_continent: String::new(),
            preferred_country: default_country(),
            budget_preference: String::new(),
            research_interests: String::new(),
            language_preference: String::new(),
            target_start_year: String::new(),
            study_mode: String::new(),
            career_goal: String::new(),
        }
    }
}

/// The settable text fields of a [`StudentProfile`].
///
/// Frontends mutate exactly one field per input event through
/// [`StudentProfile::set`]; the CV attachment has its own operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    DegreeLevel,
    FieldOfInterest,
    Gpa,
    TestScores,
    PreferredContinent,
    PreferredCountry,
    BudgetPreference,
    ResearchInterests,
    LanguagePreference,
    TargetStartYear,
    StudyMode,
    CareerGoal,
}

impl ProfileField {
    /// Human-readable label, as shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DegreeLevel => "Intended Degree Level",
            Self::FieldOfInterest => "Field of Interest",
            Self::Gpa => "GPA",
            Self::TestScores => "Test Scores (Optional)",
            Self::PreferredContinent => "Preferred Continent",
            Self::PreferredCountry => "Preferred Country",
            Self::BudgetPreference => "Budget or Scholarship Preference",
            Self::ResearchInterests => "Research Interests",
            Self::LanguagePreference => "Language Preference",
            Self::TargetStartYear => "Target Start Year",
            Self::StudyMode => "Mode of Study",
            Self::CareerGoal => "Career Goal",
        }
    }
}

impl StudentProfile {
    /// Set exactly one field. No validation is performed at this layer.
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProfileField::DegreeLevel => self.degree_level = value,
            ProfileField::FieldOfInterest => self.field_of_interest = value,
            ProfileField::Gpa => self.gpa = value,
            ProfileField::TestScores => self.test_scores = value,
            ProfileField::PreferredContinent => self.preferred_continent = value,
            ProfileField::PreferredCountry => self.preferred_country = value,
            ProfileField::BudgetPreference => self.budget_preference = value,
            ProfileField::ResearchInterests => self.research_interests = value,
            ProfileField::LanguagePreference => self.language_preference = value,
            ProfileField::TargetStartYear => self.target_start_year = value,
            ProfileField::StudyMode => self.study_mode = value,
            ProfileField::CareerGoal => self.career_goal = value,
        }
    }

    /// Read a field's current value.
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::DegreeLevel => &self.degree_level,
            ProfileField::FieldOfInterest => &self.field_of_interest,
            ProfileField::Gpa => &self.gpa,
            ProfileField::TestScores => &self.test_scores,
            ProfileField::PreferredContinent => &self.preferred_continent,
            ProfileField::PreferredCountry => &self.preferred_country,
            ProfileField::BudgetPreference => &self.budget_preference,
            ProfileField::ResearchInterests => &self.research_interests,
            ProfileField::LanguagePreference => &self.language_preference,
            ProfileField::TargetStartYear => &self.target_start_year,
            ProfileField::StudyMode => &self.study_mode,
            ProfileField::CareerGoal => &self.career_goal,
        }
    }

    /// Replace the CV attachment. At most one file is held at a time.
    pub fn attach_cv(&mut self, path: Option<PathBuf>) {
        self.cv = path;
    }

    /// Load a profile from a TOML file (non-interactive submission path).
    pub fn load(path: impl AsRef<std::path::Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_country_sentinel() {
        let profile = StudentProfile::default();
        assert_eq!(profile.preferred_country, NO_PREFERENCE);
        assert!(profile.cv.is_none());
        assert!(profile.degree_level.is_empty());
    }

    #[test]
    fn test_set_is_last_write_wins() {
        let mut profile = StudentProfile::default();
        profile.set(ProfileField::Gpa, "3.2/4.0");
        profile.set(ProfileField::Gpa, "3.78/4.00");
        assert_eq!(profile.gpa, "3.78/4.00");
    }

    #[test]
    fn test_set_leaves_unrelated_fields_alone() {
        let mut profile = StudentProfile::default();
        profile.set(ProfileField::DegreeLevel, "masters");
        profile.set(ProfileField::StudyMode, "online");
        assert_eq!(profile.degree_level, "masters");
        assert_eq!(profile.study_mode, "online");
        assert_eq!(profile.preferred_country, NO_PREFERENCE);
        assert!(profile.gpa.is_empty());
    }

    #[test]
    fn test_attach_cv_replaces_previous() {
        let mut profile = StudentProfile::default();
        profile.attach_cv(Some(PathBuf::from("cv.pdf")));
        profile.attach_cv(Some(PathBuf::from("resume.docx")));
        assert_eq!(profile.cv, Some(PathBuf::from("resume.docx")));
        profile.attach_cv(None);
        assert!(profile.cv.is_none());
    }

    #[test]
    fn test_get_mirrors_set() {
        let mut profile = StudentProfile::default();
        profile.set(ProfileField::CareerGoal, "academia");
        assert_eq!(profile.get(ProfileField::CareerGoal), "academia");
    }

    #[test]
    fn test_load_from_partial_toml() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "degree_level = \"phd\"\ngpa = \"3.9/4.0\"").unwrap();
        let profile = StudentProfile::load(file.path()).unwrap();
        assert_eq!(profile.degree_level, "phd");
        assert_eq!(profile.gpa, "3.9/4.0");
        // Unlisted fields take their defaults, sentinel included.
        assert_eq!(profile.preferred_country, NO_PREFERENCE);
    }
}
