//! University match data structure.

use serde::{Deserialize, Serialize};

/// One recommended university, in the client's internal shape.
///
/// The backend returns matches already ranked; the client never re-sorts
/// and derives presentation tier purely from sequence position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UniversityMatch {
    /// Backend identifier
    pub id: i64,

    /// University name
    pub name: String,

    /// Country name
    pub country: String,

    /// Global ranking position
    pub ranking: i64,

    /// Match score as a percentage
    pub match_score: f64,

    /// Tuition fee display string
    pub tuition_fee: String,

    /// Whether scholarships are available
    pub scholarship_available: bool,

    /// Program name
    pub program_name: String,

    /// Program duration display string
    pub duration: String,

    /// Admission requirements
    pub requirements: Vec<String>,

    /// Research areas
    pub research_areas: Vec<String>,

    /// Notable faculty
    pub faculty_highlights: Vec<String>,

    /// Campus and location summary
    pub campus_life: String,

    /// Application deadline display string
    pub application_deadline: String,

    /// University website URL
    pub website: String,

    /// Program description
    pub description: String,

    /// Program strengths
    pub strengths: Vec<String>,

    /// Admission rate display string
    pub admission_rate: String,
}

/// Presentation tier for the top three positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Gold,
    Silver,
    Bronze,
    Unranked,
}

impl MatchTier {
    /// Tier for a zero-based position in the result sequence.
    pub fn for_position(index: usize) -> Self {
        match index {
            0 => Self::Gold,
            1 => Self::Silver,
            2 => Self::Bronze,
            _ => Self::Unranked,
        }
    }
}

impl UniversityMatch {
    /// Short one-line summary used by console output.
    pub fn headline(&self) -> String {
        format!(
            "{} · {} ({:.1}% match)",
            self.name, self.program_name, self.match_score
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match() -> UniversityMatch {
        UniversityMatch {
            id: 1,
            name: "ETH Zurich".to_string(),
            country: "Switzerland".to_string(),
            ranking: 7,
            match_score: 92.5,
            tuition_fee: "CHF 1,460/year".to_string(),
            scholarship_available: true,
            program_name: "MSc Computer Science".to_string(),
            duration: "2 years".to_string(),
            requirements: vec!["BSc in CS".to_string()],
            research_areas: vec!["Machine Learning".to_string()],
            faculty_highlights: vec![],
            campus_life: "Central campus in Zurich".to_string(),
            application_deadline: "December 15".to_string(),
            website: "https://ethz.ch".to_string(),
            description: "Leading technical university".to_string(),
            strengths: vec!["Research output".to_string()],
            admission_rate: "27%".to_string(),
        }
    }

    #[test]
    fn test_headline() {
        assert_eq!(
            sample_match().headline(),
            "ETH Zurich · MSc Computer Science (92.5% match)"
        );
    }

    #[test]
    fn test_tier_follows_sequence_position() {
        assert_eq!(MatchTier::for_position(0), MatchTier::Gold);
        assert_eq!(MatchTier::for_position(1), MatchTier::Silver);
        assert_eq!(MatchTier::for_position(2), MatchTier::Bronze);
        assert_eq!(MatchTier::for_position(3), MatchTier::Unranked);
    }
}
