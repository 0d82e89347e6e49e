use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

/// Cap on skills reported per document.
pub const DEFAULT_TOP_N: usize = 30;

/// The configured skills list, lowercased. Read-only after startup.
#[derive(Debug, Clone, Default)]
pub struct SkillsDb {
    skills: Vec<String>,
}

impl SkillsDb {
    /// Loads a JSON array of strings. A missing or malformed file is fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).with_context(|| {
            format!(
                "{} not found. Please add your skills file.",
                path.display()
            )
        })?;
        let entries: Vec<String> = serde_json::from_str(&raw)
            .with_context(|| format!("{} must be a JSON array of strings", path.display()))?;

        let db = Self::from_entries(entries);
        info!("Loaded {} skills from {}", db.len(), path.display());
        Ok(db)
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skills = Vec::new();
        for entry in entries {
            let skill = entry.as_ref().trim().to_lowercase();
            if skill.is_empty() {
                // A blank skill would match every document.
                warn!("Skipping blank entry in skills list");
                continue;
            }
            skills.push(skill);
        }
        Self { skills }
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Skills occurring (as substrings) in the lowercased text, in skills-list
    /// order, at most `top_n` of them.
    pub fn extract(&self, text: &str, top_n: usize) -> Vec<String> {
        let text_low = text.to_lowercase();
        self.skills
            .iter()
            .filter(|skill| text_low.contains(skill.as_str()))
            .take(top_n)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn db() -> SkillsDb {
        SkillsDb::from_entries(["Rust", "python", "SQL", "docker", "go"])
    }

    #[test]
    fn test_entries_lowercased_and_blank_skipped() {
        let db = SkillsDb::from_entries(["Rust", "  ", "Kubernetes "]);
        assert_eq!(db.skills(), &["rust".to_string(), "kubernetes".to_string()]);
    }

    #[test]
    fn test_extract_follows_list_order_not_document_order() {
        let found = db().extract("Docker, SQL and RUST daily", DEFAULT_TOP_N);
        assert_eq!(found, vec!["rust", "sql", "docker"]);
    }

    #[test]
    fn test_extract_is_a_capped_subsequence() {
        let many: Vec<String> = (0..50).map(|i| format!("skill{i:02}")).collect();
        let db = SkillsDb::from_entries(&many);
        let text = many.join(" ");
        let found = db.extract(&text, DEFAULT_TOP_N);
        assert_eq!(found.len(), DEFAULT_TOP_N);

        let mut cursor = db.skills().iter();
        for skill in &found {
            assert!(cursor.any(|s| s == skill), "{skill} out of list order");
        }
    }

    #[test]
    fn test_substring_semantics() {
        // "go" matches inside "google"; substring membership, not word match.
        let found = db().extract("Worked at Google", DEFAULT_TOP_N);
        assert_eq!(found, vec!["go"]);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["Python", "Machine Learning"]"#).unwrap();
        let db = SkillsDb::load(file.path()).unwrap();
        assert_eq!(db.len(), 2);
        assert_eq!(db.skills()[1], "machine learning");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = SkillsDb::load("/nonexistent/skills.json").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_rejects_non_array() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"skills": ["rust"]}}"#).unwrap();
        assert!(SkillsDb::load(file.path()).is_err());
    }
}
