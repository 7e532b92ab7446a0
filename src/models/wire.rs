//! Wire-format payloads for the recommendation service.
//!
//! These types mirror the backend JSON exactly and stop at this module:
//! responses are mapped into the internal [`UniversityMatch`] shape before
//! anything else sees them, and requests are built here from the profile.

use serde::{Deserialize, Serialize};

use crate::models::profile::StudentProfile;
use crate::models::university::UniversityMatch;

/// Request body for `POST /recommend`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendRequest {
    pub degree_level: String,
    pub field_of_interest: String,
    pub gpa: String,
    pub test_scores: String,
    pub preferred_continent: String,
    pub preferred_country: String,
    pub budget_preference: String,
    pub research_interests: String,
    /// Not collected by the form; the backend expects the key regardless.
    pub work_experience: String,
    pub language_preference: String,
    pub target_start_year: String,
    pub study_mode: String,
    pub career_goal: String,
}

impl From<&StudentProfile> for RecommendRequest {
    fn from(profile: &StudentProfile) -> Self {
        Self {
            degree_level: profile.degree_level.clone(),
            field_of_interest: profile.field_of_interest.clone(),
            gpa: profile.gpa.clone(),
            test_scores: profile.test_scores.clone(),
            preferred_continent: profile.preferred_continent.clone(),
            preferred_country: profile.preferred_country.clone(),
            budget_preference: profile.budget_preference.clone(),
            research_interests: profile.research_interests.clone(),
            work_experience: String::new(),
            language_preference: profile.language_preference.clone(),
            target_start_year: profile.target_start_year.clone(),
            study_mode: profile.study_mode.clone(),
            career_goal: profile.career_goal.clone(),
        }
    }
}

/// Response body for `POST /recommend`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RecommendResponse {
    /// Ranked university records; absent means no matches.
    #[serde(default)]
    pub universities: Vec<UniversityRecord>,

    /// Free-text analysis; absent triggers the literal fallback downstream.
    #[serde(default)]
    pub ai_summary: Option<String>,

    /// Backend-side generation time in seconds.
    #[serde(default)]
    pub processing_time: f64,
}

/// One university record as the backend serializes it.
///
/// List and text fields default when absent so a sparse record degrades
/// instead of failing the whole response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UniversityRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub ranking: i64,
    #[serde(default)]
    pub match_score: f64,
    #[serde(default)]
    pub tuition_fee: String,
    #[serde(default)]
    pub scholarship_available: bool,
    #[serde(default)]
    pub program_name: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub research_areas: Vec<String>,
    #[serde(default)]
    pub faculty_highlights: Vec<String>,
    #[serde(default)]
    pub campus_life: String,
    #[serde(default)]
    pub application_deadline: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub admission_rate: String,
}

/// The wire → internal boundary mapping: total, field-for-field, no derived
/// values and no loss.
impl From<UniversityRecord> for UniversityMatch {
    fn from(record: UniversityRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            country: record.country,
            ranking: record.ranking,
            match_score: record.match_score,
            tuition_fee: record.tuition_fee,
            scholarship_available: record.scholarship_available,
            program_name: record.program_name,
            duration: record.duration,
            requirements: record.requirements,
            research_areas: record.research_areas,
            faculty_highlights: record.faculty_highlights,
            campus_life: record.campus_life,
            application_deadline: record.application_deadline,
            website: record.website,
            description: record.description,
            strengths: record.strengths,
            admission_rate: record.admission_rate,
        }
    }
}

/// Response body for `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::profile::NO_PREFERENCE;

    #[test]
    fn test_request_from_default_profile() {
        let profile = StudentProfile::default();
        let request = RecommendRequest::from(&profile);
        assert_eq!(request.preferred_country, NO_PREFERENCE);
        assert!(request.degree_level.is_empty());
        assert!(request.work_experience.is_empty());
    }

    #[test]
    fn test_request_excludes_cv() {
        let mut profile = StudentProfile::default();
        profile.attach_cv(Some("cv.pdf".into()));
        profile.set(crate::models::profile::ProfileField::Gpa, "3.78/4.00");

        let request = RecommendRequest::from(&profile);
        let body = serde_json::to_value(&request).unwrap();
        let keys: Vec<&str> = body.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert!(!keys.contains(&"cv"));
        assert_eq!(body["gpa"], "3.78/4.00");
        // work_experience is always present and always empty.
        assert_eq!(body["work_experience"], "");
    }

    #[test]
    fn test_response_missing_universities_defaults_empty() {
        let response: RecommendResponse =
            serde_json::from_str(r#"{"ai_summary": "ok"}"#).unwrap();
        assert!(response.universities.is_empty());
        assert_eq!(response.ai_summary.as_deref(), Some("ok"));
    }

    #[test]
    fn test_response_missing_summary_is_none() {
        let response: RecommendResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(response.ai_summary.is_none());
        assert_eq!(response.processing_time, 0.0);
    }

    #[test]
    fn test_record_maps_field_for_field() {
        let json = r#"{
            "id": 3,
            "name": "TU Delft",
            "country": "Netherlands",
            "ranking": 47,
            "match_score": 88.0,
            "tuition_fee": "EUR 18,750/year",
            "scholarship_available": false,
            "program_name": "MSc Embedded Systems",
            "duration": "2 years",
            "requirements": ["BSc EE or CS"],
            "research_areas": ["Real-time systems"],
            "faculty_highlights": ["Prof. K. Goossens"],
            "campus_life": "Bike-friendly campus",
            "application_deadline": "April 1",
            "website": "https://tudelft.nl",
            "description": "Engineering-focused program",
            "strengths": ["Industry ties"],
            "admission_rate": "35%"
        }"#;
        let record: UniversityRecord = serde_json::from_str(json).unwrap();
        let mapped = UniversityMatch::from(record.clone());

        assert_eq!(mapped.id, record.id);
        assert_eq!(mapped.name, record.name);
        assert_eq!(mapped.match_score, record.match_score);
        assert_eq!(mapped.tuition_fee, record.tuition_fee);
        assert_eq!(mapped.admission_rate, record.admission_rate);
        assert_eq!(mapped.program_name, record.program_name);
        assert_eq!(mapped.scholarship_available, record.scholarship_available);
        assert_eq!(mapped.research_areas, record.research_areas);
        assert_eq!(mapped.faculty_highlights, record.faculty_highlights);
        assert_eq!(mapped.campus_life, record.campus_life);
        assert_eq!(mapped.application_deadline, record.application_deadline);
    }

    #[test]
    fn test_sparse_record_degrades_instead_of_failing() {
        let record: UniversityRecord =
            serde_json::from_str(r#"{"id": 9, "name": "Somewhere"}"#).unwrap();
        assert!(record.requirements.is_empty());
        assert_eq!(record.match_score, 0.0);
        assert!(!record.scholarship_available);
    }
}
