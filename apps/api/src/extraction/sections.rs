use unicode_segmentation::UnicodeSegmentation;

use crate::extraction::contact::dedup_in_order;

pub const EDUCATION_KEYWORDS: &[&str] = &[
    "bachelor",
    "master",
    "b.sc",
    "b.tech",
    "m.tech",
    "m.sc",
    "phd",
    "diploma",
    "high school",
    "sslc",
    "hsc",
    "ug",
    "pg",
    "mba",
];

pub const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experience",
    "worked",
    "intern",
    "project",
    "responsible",
    "achieved",
    "developed",
    "years",
];

pub const MAX_EXPERIENCE_SENTENCES: usize = 20;

/// Split text into trimmed, non-empty sentences (UAX #29 boundaries).
///
/// Line breaks do not end a sentence: boundaries are found on a copy with
/// ASCII line separators turned into spaces, so a heading followed by
/// unpunctuated lines stays one block. Slices come from the original text.
pub fn split_sentences(text: &str) -> Vec<String> {
    // Same byte length as `text`, so boundary offsets carry over.
    let flattened: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{b}' | '\u{c}' => ' ',
            c => c,
        })
        .collect();

    let mut bounds: Vec<usize> = flattened
        .split_sentence_bound_indices()
        .map(|(start, _)| start)
        .collect();
    bounds.push(text.len());

    bounds
        .windows(2)
        .map(|w| text[w[0]..w[1]].trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Sentences mentioning any keyword (case-insensitive substring match),
/// de-duplicated in document order.
fn sentences_with_keywords(text: &str, keywords: &[&str]) -> Vec<String> {
    dedup_in_order(split_sentences(text).into_iter().filter(|sentence| {
        let lower = sentence.to_lowercase();
        keywords.iter().any(|k| lower.contains(k))
    }))
}

pub fn extract_education(text: &str) -> Vec<String> {
    sentences_with_keywords(text, EDUCATION_KEYWORDS)
}

pub fn extract_experience(text: &str) -> Vec<String> {
    let mut sentences = sentences_with_keywords(text, EXPERIENCE_KEYWORDS);
    sentences.truncate(MAX_EXPERIENCE_SENTENCES);
    sentences
}
