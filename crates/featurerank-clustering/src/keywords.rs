//! TF-IDF keyword extraction: term frequency inside one cluster, inverse
//! document frequency over every feedback text of the run.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Document frequencies over a corpus of feedback texts.
#[derive(Debug, Clone, Default)]
pub struct KeywordIndex {
    df: HashMap<String, usize>,
    documents: usize,
}

impl KeywordIndex {
    pub fn new<S: AsRef<str>>(corpus: &[S]) -> Self {
        let mut df: HashMap<String, usize> = HashMap::new();
        for doc in corpus {
            let unique: HashSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *df.entry(term).or_insert(0) += 1;
            }
        }
        Self {
            df,
            documents: corpus.len(),
        }
    }

    /// Up to `limit` terms of `cluster`, highest score first. Equal scores
    /// are ordered alphabetically.
    pub fn top_terms(&self, cluster: &[&str], limit: usize) -> Vec<(String, f64)> {
        if limit == 0 {
            return Vec::new();
        }
        let mut tf: BTreeMap<String, usize> = BTreeMap::new();
        let mut total = 0usize;
        for text in cluster {
            for token in tokenize(text) {
                *tf.entry(token).or_insert(0) += 1;
                total += 1;
            }
        }
        if total == 0 {
            return Vec::new();
        }

        let n_docs = self.documents.max(1) as f64;
        let mut scores: Vec<(String, f64)> = tf
            .into_iter()
            .map(|(term, count)| {
                let doc_freq = self.df.get(&term).copied().unwrap_or(1).max(1) as f64;
                let idf = (n_docs / doc_freq).ln() + 1.0;
                let score = count as f64 / total as f64 * idf;
                (term, score)
            })
            .collect();

        scores.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        scores.truncate(limit);
        scores
    }

    /// [`top_terms`](Self::top_terms) without the scores.
    pub fn keywords(&self, cluster: &[&str], limit: usize) -> Vec<String> {
        self.top_terms(cluster, limit)
            .into_iter()
            .map(|(term, _)| term)
            .collect()
    }
}

/// Lowercase alphanumeric tokens longer than two characters, stop words
/// removed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| w.chars().count() > 2 && !is_stop_word(w))
        .collect()
}

fn is_stop_word(word: &str) -> bool {
    matches!(
        word,
        "the"
            | "and"
            | "for"
            | "are"
            | "but"
            | "not"
            | "you"
            | "all"
            | "can"
            | "had"
            | "was"
            | "one"
            | "our"
            | "out"
            | "has"
            | "have"
            | "been"
            | "from"
            | "this"
            | "that"
            | "with"
            | "they"
            | "will"
            | "would"
            | "could"
            | "should"
            | "please"
            | "really"
            | "very"
            | "when"
            | "there"
            | "which"
            | "their"
            | "what"
            | "its"
            | "into"
            | "more"
            | "other"
            | "just"
            | "like"
            | "want"
            | "need"
    )
}
