//! TF-IDF vectors and cosine similarity over a two-document corpus.
//!
//! Tokens are lowercased runs of two or more word characters with English
//! stop words removed. The vocabulary keeps the `max_features` most frequent
//! terms across the corpus, ties broken alphabetically. Weights use smoothed
//! idf, `ln((1 + n) / (1 + df)) + 1`, and every row is L2-normalised.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

pub const MAX_FEATURES: usize = 2000;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "across", "after", "afterwards", "again", "against", "all",
        "almost", "alone", "along", "already", "also", "although", "always", "am", "among",
        "amongst", "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone",
        "anything", "anyway", "anywhere", "are", "around", "as", "at", "back", "be", "became",
        "because", "become", "becomes", "becoming", "been", "before", "beforehand", "behind",
        "being", "below", "beside", "besides", "between", "beyond", "bill", "both", "bottom",
        "but", "by", "call", "can", "cannot", "cant", "co", "con", "could", "couldnt", "cry",
        "de", "describe", "detail", "do", "done", "down", "due", "during", "each", "eg",
        "eight", "either", "eleven", "else", "elsewhere", "empty", "enough", "etc", "even",
        "ever", "every", "everyone", "everything", "everywhere", "except", "few", "fifteen",
        "fifty", "fill", "find", "fire", "first", "five", "for", "former", "formerly", "forty",
        "found", "four", "from", "front", "full", "further", "get", "give", "go", "had", "has",
        "hasnt", "have", "he", "hence", "her", "here", "hereafter", "hereby", "herein",
        "hereupon", "hers", "herself", "him", "himself", "his", "how", "however", "hundred",
        "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its", "itself",
        "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
        "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly",
        "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
        "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
        "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto",
        "or", "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own",
        "part", "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem",
        "seemed", "seeming", "seems", "serious", "several", "she", "should", "show", "side",
        "since", "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something",
        "sometime", "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than",
        "that", "the", "their", "them", "themselves", "then", "thence", "there", "thereafter",
        "thereby", "therefore", "therein", "thereupon", "these", "they", "thick", "thin",
        "third", "this", "those", "though", "three", "through", "throughout", "thru", "thus",
        "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
        "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were",
        "what", "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas",
        "whereby", "wherein", "whereupon", "wherever", "whether", "which", "while", "whither",
        "who", "whoever", "whole", "whom", "whose", "why", "will", "with", "within", "without",
        "would", "yet", "you", "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Lowercased tokens of `text`, stop words removed, in document order.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOKEN_RE
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|t| !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    pub max_features: usize,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self {
            max_features: MAX_FEATURES,
        }
    }
}

impl TfidfVectorizer {
    /// Fits a vocabulary on `docs` and returns one L2-normalised row per
    /// document. Rows are empty when no document yields a token.
    pub fn fit_transform(&self, docs: &[&str]) -> Vec<Vec<f64>> {
        let counts: Vec<HashMap<String, usize>> = docs
            .iter()
            .map(|doc| {
                let mut tf = HashMap::new();
                for token in tokenize(doc) {
                    *tf.entry(token).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        let vocabulary = self.vocabulary(&counts);
        let n = docs.len() as f64;
        let idf: Vec<f64> = vocabulary
            .iter()
            .map(|term| {
                let df = counts.iter().filter(|tf| tf.contains_key(term)).count() as f64;
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        counts
            .iter()
            .map(|tf| {
                let mut row: Vec<f64> = vocabulary
                    .iter()
                    .zip(&idf)
                    .map(|(term, w)| tf.get(term).copied().unwrap_or(0) as f64 * w)
                    .collect();
                let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|v| *v /= norm);
                }
                row
            })
            .collect()
    }

    /// Top `max_features` terms by corpus frequency, returned in alphabetical
    /// order.
    fn vocabulary(&self, counts: &[HashMap<String, usize>]) -> Vec<String> {
        let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
        for tf in counts {
            for (term, c) in tf {
                *totals.entry(term.as_str()).or_insert(0) += c;
            }
        }

        let mut ranked: Vec<(&str, usize)> = totals.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        terms.sort();
        terms
    }
}

/// Cosine similarity of the TF-IDF vectors of `a` and `b`, fitted on the
/// pair. Always in `[0, 1]`; zero when either text has no usable tokens.
pub fn cosine_similarity(a: &str, b: &str) -> f64 {
    let rows = TfidfVectorizer::default().fit_transform(&[a, b]);
    let (left, right) = (&rows[0], &rows[1]);
    if left.is_empty() {
        return 0.0;
    }
    let dot: f64 = left.iter().zip(right).map(|(x, y)| x * y).sum();
    dot.clamp(0.0, 1.0)
}
