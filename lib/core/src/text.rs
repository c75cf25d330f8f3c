//! TF-IDF text similarity over accessory names and descriptions.
//!
//! The vocabulary is bounded (`max_features` most frequent terms across the
//! catalog), built from unigrams and bigrams after English stop-word removal.
//! Rows are L2-normalized so cosine similarity reduces to a dot product.

use crate::vector::SparseVector;
use crate::{Error, Result};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// English stop words removed before n-grams are formed
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here", "hereafter",
    "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his", "how", "however",
    "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is", "it", "its",
    "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd", "made", "many", "may",
    "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most", "mostly", "move",
    "much", "must", "my", "myself", "name", "namely", "neither", "never", "nevertheless", "next",
    "nine", "no", "nobody", "none", "noone", "nor", "not", "nothing", "now", "nowhere", "of",
    "off", "often", "on", "once", "one", "only", "onto", "or", "other", "others", "otherwise",
    "our", "ours", "ourselves", "out", "over", "own", "part", "per", "perhaps", "please", "put",
    "rather", "re", "same", "see", "seem", "seemed", "seeming", "seems", "serious", "several",
    "she", "should", "show", "side", "since", "sincere", "six", "sixty", "so", "some", "somehow",
    "someone", "something", "sometime", "sometimes", "somewhere", "still", "such", "system",
    "take", "ten", "than", "that", "the", "their", "them", "themselves", "then", "thence",
    "there", "thereafter", "thereby", "therefore", "therein", "thereupon", "these", "they",
    "thick", "thin", "third", "this", "those", "though", "three", "through", "throughout", "thru",
    "thus", "to", "together", "too", "top", "toward", "towards", "twelve", "twenty", "two", "un",
    "under", "until", "up", "upon", "us", "very", "via", "was", "we", "well", "were", "what",
    "whatever", "when", "whence", "whenever", "where", "whereafter", "whereas", "whereby",
    "wherein", "whereupon", "wherever", "whether", "which", "while", "whither", "who", "whoever",
    "whole", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];

/// Vectorizer settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorizerConfig {
    pub max_features: usize,
    /// Inclusive (min, max) n-gram lengths
    pub ngram_range: (usize, usize),
    pub remove_stop_words: bool,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: 100,
            ngram_range: (1, 2),
            remove_stop_words: true,
        }
    }
}

/// Split text into lower-case word tokens of at least two characters
#[inline]
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|s| s.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// Tokens plus n-grams, stop words removed before the n-grams are joined
pub fn analyze(text: &str, config: &VectorizerConfig) -> Vec<String> {
    let stop: AHashSet<&str> = if config.remove_stop_words {
        STOP_WORDS.iter().copied().collect()
    } else {
        AHashSet::new()
    };
    let tokens: Vec<String> = tokenize(text)
        .into_iter()
        .filter(|t| !stop.contains(t.as_str()))
        .collect();

    let (min_n, max_n) = config.ngram_range;
    let mut terms = Vec::new();
    for n in min_n.max(1)..=max_n {
        if n > tokens.len() {
            break;
        }
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}

/// Fixed term -> column mapping with per-column inverse document frequency
#[derive(Debug, Clone)]
pub struct Vocabulary {
    columns: AHashMap<String, u32>,
    idf: Vec<f32>,
    config: VectorizerConfig,
}

impl Vocabulary {
    /// Rebuild a vocabulary from a stored term map and idf table
    pub fn from_parts(
        terms: BTreeMap<String, u32>,
        idf: Vec<f32>,
        config: VectorizerConfig,
    ) -> Result<Self> {
        if terms.len() != idf.len() {
            return Err(Error::Vocabulary(format!(
                "{} terms but {} idf weights",
                terms.len(),
                idf.len()
            )));
        }
        let mut seen = vec![false; idf.len()];
        for (term, &column) in &terms {
            match seen.get_mut(column as usize) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(Error::Vocabulary(format!("column {} assigned twice", column)));
                }
                None => {
                    return Err(Error::Vocabulary(format!(
                        "term '{}' has out of range column {}",
                        term, column
                    )));
                }
            }
        }
        if idf.iter().any(|w| !w.is_finite()) {
            return Err(Error::Vocabulary("non-finite idf weight".to_string()));
        }

        Ok(Self {
            columns: terms.into_iter().collect(),
            idf,
            config,
        })
    }

    /// Fit on a document collection.
    ///
    /// Keeps the `max_features` terms with the highest total count (ties by
    /// term), assigns columns alphabetically and uses smoothed idf
    /// `ln((1 + n) / (1 + df)) + 1`.
    pub fn fit<S: AsRef<str>>(documents: &[S], config: VectorizerConfig) -> Self {
        let mut total_counts: AHashMap<String, u64> = AHashMap::new();
        let mut doc_freqs: AHashMap<String, u32> = AHashMap::new();

        for doc in documents {
            let terms = analyze(doc.as_ref(), &config);
            let mut seen: AHashSet<&str> = AHashSet::new();
            for term in &terms {
                *total_counts.entry(term.clone()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freqs.entry(term.clone()).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(String, u64)> = total_counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(config.max_features);

        let mut kept: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort();

        let n_docs = documents.len() as f32;
        let mut columns = AHashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (column, term) in kept.into_iter().enumerate() {
            let df = doc_freqs.get(&term).copied().unwrap_or(0) as f32;
            idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            columns.insert(term, column as u32);
        }

        Self { columns, idf, config }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.idf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    #[inline]
    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    #[inline]
    pub fn column(&self, term: &str) -> Option<u32> {
        self.columns.get(term).copied()
    }

    /// Term map in a stable order, for persisting
    pub fn terms(&self) -> BTreeMap<String, u32> {
        self.columns.iter().map(|(t, &c)| (t.clone(), c)).collect()
    }

    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    /// L2-normalized TF-IDF vector; out-of-vocabulary terms are ignored
    pub fn transform(&self, text: &str) -> SparseVector {
        let pairs: Vec<(u32, f32)> = analyze(text, &self.config)
            .iter()
            .filter_map(|term| self.column(term))
            .map(|column| (column, self.idf[column as usize]))
            .collect();
        SparseVector::from_pairs(pairs).normalized()
    }
}

/// Immutable per-accessory TF-IDF vectors, indexed by catalog position
#[derive(Debug, Clone)]
pub struct TextIndex {
    vocabulary: Vocabulary,
    vectors: Vec<SparseVector>,
}

impl TextIndex {
    /// Vectorize every document with a fixed vocabulary
    pub fn build<S: AsRef<str>>(vocabulary: Vocabulary, documents: &[S]) -> Self {
        let vectors = documents
            .iter()
            .map(|doc| vocabulary.transform(doc.as_ref()))
            .collect();
        Self { vocabulary, vectors }
    }

    /// Fit the vocabulary on the documents, then vectorize them
    pub fn fit<S: AsRef<str>>(documents: &[S], config: VectorizerConfig) -> Self {
        let vocabulary = Vocabulary::fit(documents, config);
        Self::build(vocabulary, documents)
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vectorize(&self, query: &str) -> SparseVector {
        self.vocabulary.transform(query)
    }

    /// Cosine similarity between the query vector and each listed position.
    /// Positions outside the index score 0.
    pub fn similarity(&self, query: &SparseVector, positions: &[usize]) -> Vec<f32> {
        positions
            .iter()
            .map(|&pos| {
                self.vectors
                    .get(pos)
                    .map(|v| query.cosine_similarity(v).max(0.0))
                    .unwrap_or(0.0)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<&'static str> {
        vec![
            "Premium leather seat cover for comfort",
            "Waterproof car body cover for outdoor parking",
            "LED headlight bulb with bright white light",
            "Leather steering wheel cover",
        ]
    }

    #[test]
    fn test_tokenize_drops_single_chars_and_punctuation() {
        let tokens = tokenize("A 4-in-1 LED, super-bright!");
        assert_eq!(tokens, vec!["in", "led", "super", "bright"]);
    }

    #[test]
    fn test_analyze_removes_stop_words_before_bigrams() {
        let config = VectorizerConfig::default();
        let terms = analyze("cover for the seat", &config);
        assert_eq!(terms, vec!["cover", "seat", "cover seat"]);
    }

    #[test]
    fn test_vocabulary_is_bounded_and_deterministic() {
        let config = VectorizerConfig {
            max_features: 5,
            ..VectorizerConfig::default()
        };
        let a = Vocabulary::fit(&docs(), config.clone());
        let b = Vocabulary::fit(&docs(), config);

        assert_eq!(a.len(), 5);
        assert_eq!(a.terms(), b.terms());
        assert_eq!(a.idf(), b.idf());
        // "cover" appears in three documents, the most frequent term
        assert!(a.column("cover").is_some());
    }

    #[test]
    fn test_idf_smoothing() {
        let vocab = Vocabulary::fit(&docs(), VectorizerConfig::default());
        let cover = vocab.column("cover").unwrap() as usize;
        let expected = ((1.0f32 + 4.0) / (1.0 + 3.0)).ln() + 1.0;
        assert!((vocab.idf()[cover] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_similarity_ranks_matching_document_first() {
        let index = TextIndex::fit(&docs(), VectorizerConfig::default());
        let query = index.vectorize("leather seat");
        let scores = index.similarity(&query, &[0, 1, 2, 3]);

        assert_eq!(scores.len(), 4);
        assert!(scores[0] > scores[3]);
        assert!(scores[3] > scores[1]);
        assert_eq!(scores[2], 0.0);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn test_unknown_query_scores_zero() {
        let index = TextIndex::fit(&docs(), VectorizerConfig::default());
        let query = index.vectorize("spoiler");
        assert!(query.is_empty());
        assert!(index.similarity(&query, &[0, 1]).iter().all(|s| *s == 0.0));
    }

    #[test]
    fn test_from_parts_rejects_mismatched_tables() {
        let mut terms = BTreeMap::new();
        terms.insert("cover".to_string(), 0);
        terms.insert("seat".to_string(), 0);
        let err = Vocabulary::from_parts(terms, vec![1.0, 1.0], VectorizerConfig::default());
        assert!(err.is_err());

        let mut terms = BTreeMap::new();
        terms.insert("cover".to_string(), 0);
        let err = Vocabulary::from_parts(terms, vec![1.0, 2.0], VectorizerConfig::default());
        assert!(err.is_err());
    }
}
