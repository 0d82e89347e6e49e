//! Name extraction: the first PERSON entity in the resume header.
//!
//! The recognizer sits behind the `EntityRecognizer` trait so a model-backed
//! implementation can replace the built-in heuristic without touching the
//! pipeline. `AppState` carries it as `Arc<dyn EntityRecognizer>`.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::extraction::split_lines;

/// How many non-blank lines from the top of the document are searched.
pub const HEADER_LINES: usize = 30;
const MAX_NAME_CHARS: usize = 100;
const MAX_FALLBACK_WORDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Organization,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Labels spans of text. Entities are returned in document order.
pub trait EntityRecognizer: Send + Sync {
    fn entities(&self, text: &str) -> Vec<Entity>;
}

// ────────────────────────────────────────────────────────────────────────────
// HeuristicRecognizer
// ────────────────────────────────────────────────────────────────────────────

/// Words that mark a capitalised run as an organisation rather than a person.
const ORG_MARKERS: &[&str] = &[
    "university", "college", "institute", "school", "academy", "inc", "inc.", "ltd", "ltd.",
    "llc", "corp", "corp.", "corporation", "company", "co.", "technologies", "solutions",
    "systems", "labs", "group", "bank", "foundation", "services", "consulting",
];

/// Resume vocabulary that looks like a name when title-cased.
static NON_NAME_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // section headings
        "resume", "curriculum", "vitae", "cv", "profile", "summary", "objective", "contact",
        "education", "experience", "work", "employment", "history", "skills", "technical",
        "projects", "project", "certifications", "certification", "achievements", "awards",
        "languages", "interests", "hobbies", "references", "personal", "details",
        "professional", "career", "qualifications", "publications", "activities",
        // roles and degrees
        "software", "senior", "junior", "lead", "principal", "staff", "engineer", "engineering",
        "developer", "development", "manager", "management", "intern", "internship", "analyst",
        "consultant", "architect", "designer", "scientist", "director", "head", "officer",
        "associate", "assistant", "specialist", "administrator", "full", "stack", "frontend",
        "backend", "data", "machine", "learning", "bachelor", "master", "science", "arts",
        "technology", "computer", "degree", "diploma", "phd", "mba",
        // places and calendar
        "street", "road", "avenue", "city", "state", "india", "usa", "remote", "present",
        "january", "february", "march", "april", "may", "june", "july", "august", "september",
        "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
        "sep", "sept", "oct", "nov", "dec",
        // contact labels
        "email", "phone", "mobile", "address", "linkedin", "github", "website", "portfolio",
    ]
    .into_iter()
    .collect()
});

/// Dictionary-free recognizer for resume headers.
///
/// Within each line, maximal runs of `min_tokens..=max_tokens` capitalised
/// words become entities. A run containing an organisation marker is labelled
/// `Organization`; a run containing resume vocabulary is dropped.
#[derive(Debug, Clone)]
pub struct HeuristicRecognizer {
    pub min_tokens: usize,
    pub max_tokens: usize,
}

impl Default for HeuristicRecognizer {
    fn default() -> Self {
        Self {
            min_tokens: 2,
            max_tokens: 4,
        }
    }
}

impl EntityRecognizer for HeuristicRecognizer {
    fn entities(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();
        for line in text.lines() {
            let mut run: Vec<&str> = Vec::new();
            for token in line.split_whitespace() {
                let word = token.trim_end_matches([',', ';', ':', '|']);
                let breaks_run = word.len() != token.len();
                if is_capitalised(word) {
                    run.push(word);
                    if breaks_run {
                        self.flush(&mut run, &mut entities);
                    }
                } else {
                    self.flush(&mut run, &mut entities);
                }
            }
            self.flush(&mut run, &mut entities);
        }
        entities
    }
}

impl HeuristicRecognizer {
    fn flush(&self, run: &mut Vec<&str>, out: &mut Vec<Entity>) {
        if run.len() >= self.min_tokens && run.len() <= self.max_tokens {
            let lowered: Vec<String> = run.iter().map(|w| w.to_lowercase()).collect();
            if lowered.iter().any(|w| ORG_MARKERS.contains(&w.as_str())) {
                out.push(Entity {
                    text: run.join(" "),
                    label: EntityLabel::Organization,
                });
            } else if !lowered
                .iter()
                .any(|w| NON_NAME_WORDS.contains(w.trim_end_matches('.')))
            {
                out.push(Entity {
                    text: run.join(" "),
                    label: EntityLabel::Person,
                });
            }
        }
        run.clear();
    }
}

/// Title-case (`Jane`, `O'Neil`, `Smith-Jones`), all-caps (`DOE`) or an
/// initial (`J.`).
fn is_capitalised(word: &str) -> bool {
    let core = word.strip_suffix('.').unwrap_or(word);
    let mut chars = core.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !first.is_uppercase() {
        return false;
    }
    if core.chars().count() == 1 {
        return word.ends_with('.');
    }
    core.chars().all(|c| c.is_alphabetic() || c == '\'' || c == '-')
        && chars.any(|c| c.is_alphabetic())
}

// ────────────────────────────────────────────────────────────────────────────
// Name extraction
// ────────────────────────────────────────────────────────────────────────────

/// Returns the first PERSON entity in the header that passes the sanity
/// filters, else the first line when it is short enough to be a name.
pub fn extract_name(text: &str, recognizer: &dyn EntityRecognizer) -> Option<String> {
    let lines: Vec<&str> = split_lines(text)
        .into_iter()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let head = lines
        .iter()
        .take(HEADER_LINES)
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    let person = recognizer
        .entities(&head)
        .into_iter()
        .filter(|e| e.label == EntityLabel::Person)
        .map(|e| e.text.trim().to_string())
        .find(|name| is_plausible_name(name));
    if person.is_some() {
        return person;
    }

    lines
        .first()
        .filter(|first| first.split_whitespace().count() <= MAX_FALLBACK_WORDS)
        .map(|first| first.to_string())
}

fn is_plausible_name(name: &str) -> bool {
    name.chars().count() < MAX_NAME_CHARS
        && !name.contains('@')
        && name.chars().any(char::is_alphabetic)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRecognizer(Vec<Entity>);

    impl EntityRecognizer for FixedRecognizer {
        fn entities(&self, _text: &str) -> Vec<Entity> {
            self.0.clone()
        }
    }

    fn person(text: &str) -> Entity {
        Entity {
            text: text.to_string(),
            label: EntityLabel::Person,
        }
    }

    #[test]
    fn test_heuristic_finds_name_on_first_line() {
        let text = "Jane Doe\nSoftware Engineer\njane@example.com";
        assert_eq!(
            extract_name(text, &HeuristicRecognizer::default()),
            Some("Jane Doe".to_string())
        );
    }

    #[test]
    fn test_heuristic_skips_headings_and_titles() {
        let text = "CURRICULUM VITAE\nSenior Software Engineer\nName: Rahul K. Sharma\n";
        assert_eq!(
            extract_name(text, &HeuristicRecognizer::default()),
            Some("Rahul K. Sharma".to_string())
        );
    }

    #[test]
    fn test_heuristic_labels_organisations() {
        let entities = HeuristicRecognizer::default().entities("Stanford University alumni");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].label, EntityLabel::Organization);
    }

    #[test]
    fn test_heuristic_breaks_runs_at_commas() {
        let entities = HeuristicRecognizer::default().entities("Jane Doe, Acme Widgets");
        let names: Vec<_> = entities.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(names, vec!["Jane Doe", "Acme Widgets"]);
    }

    #[test]
    fn test_entity_with_at_sign_is_rejected() {
        let recognizer = FixedRecognizer(vec![person("jane@example.com"), person("Jane Doe")]);
        assert_eq!(
            extract_name("whatever", &recognizer),
            Some("Jane Doe".to_string())
        );
    }

    #[test]
    fn test_entity_without_letters_is_rejected() {
        let recognizer = FixedRecognizer(vec![person("12345")]);
        assert_eq!(
            extract_name("a b c d e f\nmore", &recognizer),
            None,
            "first line has six words so there is no fallback"
        );
    }

    #[test]
    fn test_overlong_entity_is_rejected() {
        let recognizer = FixedRecognizer(vec![person(&"A".repeat(120))]);
        assert_eq!(
            extract_name("\n\n  Short Header  \nbody", &recognizer),
            Some("Short Header".to_string())
        );
    }

    #[test]
    fn test_fallback_requires_short_first_line() {
        let recognizer = FixedRecognizer(vec![]);
        assert_eq!(extract_name("one two three four five", &recognizer).as_deref(), Some("one two three four five"));
        assert_eq!(extract_name("one two three four five six", &recognizer), None);
        assert_eq!(extract_name("   \n\n", &recognizer), None);
    }

    #[test]
    fn test_organisation_entities_are_ignored() {
        let recognizer = FixedRecognizer(vec![Entity {
            text: "Acme Inc".to_string(),
            label: EntityLabel::Organization,
        }]);
        assert_eq!(
            extract_name("lowercase header line with many words here", &recognizer),
            None
        );
    }

    #[test]
    fn test_only_header_lines_are_scanned() {
        let mut text = String::new();
        for i in 0..HEADER_LINES {
            text.push_str(&format!("line number {i} of the resume body\n"));
        }
        text.push_str("Jane Doe\n");
        assert_eq!(extract_name(&text, &HeuristicRecognizer::default()), None);
    }
}
