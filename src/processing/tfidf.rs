//! TF-IDF vector space over a small in-memory corpus

use std::collections::{BTreeMap, HashMap, HashSet};

/// Sparse term-weight vector, entries sorted by term index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_weights(weights: BTreeMap<usize, f64>) -> Self {
        Self {
            entries: weights.into_iter().filter(|(_, w)| *w != 0.0).collect(),
        }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;

        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_w) = self.entries[i];
            let (b_idx, b_w) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_w * b_w;
                    i += 1;
                    j += 1;
                }
            }
        }

        sum
    }

    fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
        self
    }
}

/// Cosine similarity clamped to [0, 1]; zero vectors score 0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (a.dot(b) / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Term index and smoothed inverse document frequencies learned from a corpus.
#[derive(Debug, Clone, Default)]
pub struct TfidfModel {
    term_index: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfModel {
    /// Learn terms and `idf = ln((1 + n) / (1 + df)) + 1` from tokenized documents.
    pub fn fit(documents: &[Vec<String>]) -> Self {
        let mut term_index: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for document in documents {
            let unique: HashSet<&String> = document.iter().collect();
            for term in unique {
                let next = term_index.len();
                let index = *term_index.entry(term.clone()).or_insert(next);
                if index == document_frequency.len() {
                    document_frequency.push(0);
                }
                document_frequency[index] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf = document_frequency
            .into_iter()
            .map(|df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Self { term_index, idf }
    }

    pub fn term_count(&self) -> usize {
        self.idf.len()
    }

    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_index.get(term).map(|&i| self.idf[i])
    }

    /// Raw term counts weighted by idf, L2 normalized. Unknown terms are ignored.
    pub fn transform(&self, tokens: &[String]) -> SparseVector {
        let mut weights: BTreeMap<usize, f64> = BTreeMap::new();

        for token in tokens {
            if let Some(&index) = self.term_index.get(token) {
                *weights.entry(index).or_insert(0.0) += 1.0;
            }
        }

        for (index, weight) in weights.iter_mut() {
            *weight *= self.idf[*index];
        }

        SparseVector::from_weights(weights).normalized()
    }

    pub fn fit_transform(documents: &[Vec<String>]) -> (Self, Vec<SparseVector>) {
        let model = Self::fit(documents);
        let vectors = documents.iter().map(|doc| model.transform(doc)).collect();
        (model, vectors)
    }
}
