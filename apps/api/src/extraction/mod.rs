//! Resume extraction pipeline.
//!
//! Every stage is a pure function of the document text plus read-only shared
//! data (`SkillsDb`, the entity recognizer), so `analyze` is safe to call
//! from many request threads at once.

pub mod contact;
pub mod loader;
pub mod matcher;
pub mod name;
pub mod sections;
pub mod skills;
pub mod tfidf;

use serde::Serialize;

use self::contact::extract_contact_info;
use self::matcher::{score_against_job, JobScore};
use self::name::{extract_name, EntityRecognizer};
use self::sections::{extract_education, extract_experience};
use self::skills::{SkillsDb, DEFAULT_TOP_N};

/// Lines of raw text echoed back on the result page.
pub const SNIPPET_LINES: usize = 50;

#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    pub name: Option<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    pub skills: Vec<String>,
    pub job_score: Option<JobScore>,
    pub raw_text_snippet: String,
}

pub fn analyze(
    text: &str,
    job_desc: &str,
    skills: &SkillsDb,
    recognizer: &dyn EntityRecognizer,
) -> ExtractionResult {
    let contact = extract_contact_info(text);
    let job_score = if job_desc.trim().is_empty() {
        None
    } else {
        Some(score_against_job(text, job_desc, skills))
    };

    ExtractionResult {
        name: extract_name(text, recognizer),
        emails: contact.emails,
        phones: contact.phones,
        education: extract_education(text),
        experience: extract_experience(text),
        skills: skills.extract(text, DEFAULT_TOP_N),
        job_score,
        raw_text_snippet: snippet(text),
    }
}

fn snippet(text: &str) -> String {
    split_lines(text)
        .into_iter()
        .take(SNIPPET_LINES)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Splits on every line boundary a text file may use: `\n`, `\r\n`, a lone
/// `\r`, vertical tab, form feed, the ASCII record separators, NEL and the
/// Unicode line and paragraph separators. No trailing empty line.
pub(crate) fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let is_break = matches!(
            c,
            '\n' | '\r' | '\u{b}' | '\u{c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}'
                | '\u{2028}' | '\u{2029}'
        );
        if !is_break {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' {
            if let Some(&(j, '\n')) = chars.peek() {
                chars.next();
                start = j + 1;
            }
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
