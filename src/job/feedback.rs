//! Structured model outputs written back to job documents.
//!
//! These are the JSON shapes the prompts instruct the model to produce.
//! Parsing happens through [`coerce_json`](crate::gemini::coerce_json),
//! so any shape drift in the model output surfaces as an invalid-response
//! failure instead of a half-filled document.

use serde::{Deserialize, Serialize};

/// Resume analysis produced by the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFeedback {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub total_score: u32,
    #[serde(default)]
    pub scores: ScoreBreakdown,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub resources: Vec<ResourceLink>,
    /// Only produced by the adequation analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adequation_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_radar: Option<Vec<SkillRadarItem>>,
}

/// Per-dimension scores (0-100). `impact` comes from the general
/// analysis, `fit` from the adequation analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    #[serde(default)]
    pub structure: u32,
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub skills: u32,
    #[serde(default)]
    pub format: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLink {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillRadarItem {
    #[serde(default)]
    pub skill: String,
    #[serde(default)]
    pub required_score: u32,
    #[serde(default)]
    pub resume_score: u32,
}

/// LinkedIn profile analysis produced by the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInFeedback {
    #[serde(default)]
    pub overall_score: u32,
    #[serde(default)]
    pub items: Vec<LinkedInFeedbackItem>,
    #[serde(default)]
    pub missing_sections: Vec<String>,
    #[serde(default)]
    pub general_recommendations: Vec<String>,
    #[serde(default)]
    pub quick_wins: Vec<String>,
    #[serde(default)]
    pub strategic_changes: Vec<String>,
}

/// Analysis of one profile section (headline, about, experience...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedInFeedbackItem {
    #[serde(default)]
    pub item: String,
    /// Score 0-100 for this section.
    #[serde(default)]
    pub score: u32,
    /// Weight 0.0-1.0 of this section in the overall score.
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub weighted_score: f64,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
    #[serde(default)]
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub impact: Priority,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// A generated CV, either from scratch or rewritten for a job posting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCv {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub professional_summary: String,
    #[serde(default)]
    pub experience: Vec<CvExperience>,
    #[serde(default)]
    pub education: Vec<CvEducation>,
    #[serde(default)]
    pub skills: SkillSet,
    #[serde(default)]
    pub languages: Vec<LanguageSkill>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub portfolio: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvExperience {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvEducation {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSet {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSkill {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub issuer: String,
    #[serde(default)]
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_feedback_parses_model_output() {
        let json = r#"{
            "summary": "Bom currículo, faltam métricas.",
            "totalScore": 72,
            "scores": {"structure": 80, "experience": 70, "skills": 75, "format": 68, "impact": 60},
            "strengths": ["Experiência sólida"],
            "improvements": ["Adicionar resultados quantificáveis"],
            "resources": [{"title": "Guia", "url": "https://example.com"}]
        }"#;
        let fb: ResumeFeedback = serde_json::from_str(json).unwrap();
        assert_eq!(fb.total_score, 72);
        assert_eq!(fb.scores.impact, Some(60));
        assert!(fb.scores.fit.is_none());
        assert_eq!(fb.resources[0].title, "Guia");
    }

    #[test]
    fn resume_feedback_tolerates_missing_fields() {
        let fb: ResumeFeedback = serde_json::from_str(r#"{"totalScore": 50}"#).unwrap();
        assert_eq!(fb.total_score, 50);
        assert!(fb.strengths.is_empty());
    }

    #[test]
    fn linkedin_feedback_parses_items() {
        let json = r#"{
            "overallScore": 64,
            "items": [{
                "item": "Headline",
                "score": 40,
                "weight": 0.2,
                "weightedScore": 8.0,
                "feedback": "Headline genérica",
                "suggestions": [{"text": "Inclua sua especialidade", "impact": "high"}],
                "priority": "high"
            }],
            "missingSections": ["about"],
            "generalRecommendations": [],
            "quickWins": ["Atualizar foto"],
            "strategicChanges": []
        }"#;
        let fb: LinkedInFeedback = serde_json::from_str(json).unwrap();
        assert_eq!(fb.overall_score, 64);
        assert_eq!(fb.items[0].priority, Priority::High);
        assert_eq!(fb.items[0].suggestions[0].impact, Priority::High);
        assert_eq!(fb.missing_sections, vec!["about"]);
    }

    #[test]
    fn generated_cv_roundtrip() {
        let cv = GeneratedCv {
            professional_summary: "Engenheira de dados".into(),
            skills: SkillSet {
                technical: vec!["Rust".into()],
                soft: vec!["Comunicação".into()],
            },
            ..Default::default()
        };
        let json = serde_json::to_string(&cv).unwrap();
        assert!(json.contains(r#""professionalSummary""#));
        let parsed: GeneratedCv = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.skills.technical, vec!["Rust"]);
    }
}
