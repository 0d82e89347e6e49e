use serde::Serialize;

use crate::extraction::skills::{SkillsDb, DEFAULT_TOP_N};
use crate::extraction::tfidf::cosine_similarity;

const SIMILARITY_WEIGHT: f64 = 0.6;
const OVERLAP_WEIGHT: f64 = 0.4;
// Keeps the overlap ratio finite when the job text names no skills.
const EPSILON: f64 = 1e-6;

/// How well a resume matches one job description.
#[derive(Debug, Clone, Serialize)]
pub struct JobScore {
    pub cosine_similarity: f64,
    pub skill_overlap_count: usize,
    pub job_skills_count: usize,
    /// Job skills also found in the resume, in skills-list order.
    pub skill_overlap: Vec<String>,
    /// `100 * (0.6 * similarity + 0.4 * overlap ratio)`, two decimals.
    pub final_score_percent: f64,
}

pub fn score_against_job(resume_text: &str, job_text: &str, skills: &SkillsDb) -> JobScore {
    let similarity = cosine_similarity(resume_text, job_text);

    let resume_skills = skills.extract(resume_text, DEFAULT_TOP_N);
    let job_skills = skills.extract(job_text, DEFAULT_TOP_N);
    let skill_overlap: Vec<String> = job_skills
        .iter()
        .filter(|s| resume_skills.contains(s))
        .cloned()
        .collect();

    let ratio = skill_overlap.len() as f64 / (job_skills.len() as f64 + EPSILON);
    let raw = 100.0 * (SIMILARITY_WEIGHT * similarity + OVERLAP_WEIGHT * ratio);
    let final_score_percent = ((raw * 100.0).round() / 100.0).clamp(0.0, 100.0);

    JobScore {
        cosine_similarity: similarity,
        skill_overlap_count: skill_overlap.len(),
        job_skills_count: job_skills.len(),
        skill_overlap,
        final_score_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills() -> SkillsDb {
        SkillsDb::from_entries(["python", "sql", "docker", "rust"])
    }

    #[test]
    fn test_overlap_counts_job_skills_found_in_resume() {
        let score = score_against_job(
            "Python developer with SQL experience",
            "Looking for Python and Docker skills",
            &skills(),
        );
        assert_eq!(score.job_skills_count, 2);
        assert_eq!(score.skill_overlap_count, 1);
        assert_eq!(score.skill_overlap, vec!["python"]);
        assert!(score.final_score_percent > 0.0 && score.final_score_percent <= 100.0);
    }

    #[test]
    fn test_identical_texts_near_full_score() {
        let text = "Rust and Docker platform engineer";
        let score = score_against_job(text, text, &skills());
        assert!((score.cosine_similarity - 1.0).abs() < 1e-9);
        assert_eq!(score.skill_overlap_count, 2);
        assert!(score.final_score_percent > 99.9);
        assert!(score.final_score_percent <= 100.0);
    }

    #[test]
    fn test_no_job_skills_scores_on_similarity_only() {
        let score = score_against_job("gardening enthusiast", "accounting clerk", &skills());
        assert_eq!(score.job_skills_count, 0);
        assert_eq!(score.skill_overlap_count, 0);
        assert_eq!(score.final_score_percent, 0.0);
    }

    #[test]
    fn test_score_has_two_decimals() {
        let score = score_against_job(
            "Python SQL analyst building dashboards",
            "Data analyst with Python, SQL and Docker",
            &skills(),
        );
        let scaled = score.final_score_percent * 100.0;
        assert!((scaled - scaled.round()).abs() < 1e-6);
    }
}
