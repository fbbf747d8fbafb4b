//! TF-IDF / cosine-similarity relevance ranking of candidates

use crate::catalog::candidate::Candidate;
use crate::processing::skill_set::SkillSet;
use crate::processing::tfidf::{cosine_similarity, SparseVector, TfidfModel};
use crate::processing::tokenizer::Tokenizer;
use log::debug;
use serde::Serialize;
use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A candidate with its similarity to the query and its 1-based position.
///
/// Scores are only comparable within the list that produced them.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult<'a, C> {
    pub rank: usize,
    pub score: f64,
    pub candidate: &'a C,
}

#[derive(Debug, Clone, Default)]
pub struct RelevanceRanker {
    tokenizer: Tokenizer,
}

impl RelevanceRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Order `candidates` by descending similarity to `query`.
    ///
    /// Returns every candidate exactly once. Equal scores keep catalog order.
    /// An empty query leaves the catalog order untouched with all scores 0.
    pub fn rank<'a, C: Candidate>(
        &self,
        query: &SkillSet,
        candidates: &'a [C],
    ) -> Vec<RankedResult<'a, C>> {
        if candidates.is_empty() {
            return Vec::new();
        }

        if query.is_empty() {
            debug!("Empty query; returning {} candidates in catalog order", candidates.len());
            return candidates
                .iter()
                .enumerate()
                .map(|(i, candidate)| RankedResult {
                    rank: i + 1,
                    score: 0.0,
                    candidate,
                })
                .collect();
        }

        let scores = self.score(query, candidates);

        let mut order: Vec<usize> = (0..candidates.len()).collect();
        order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

        order
            .into_iter()
            .enumerate()
            .map(|(position, index)| RankedResult {
                rank: position + 1,
                score: scores[index],
                candidate: &candidates[index],
            })
            .collect()
    }

    /// Cosine similarity of each candidate against the query, in catalog order.
    pub fn score<C: Candidate>(&self, query: &SkillSet, candidates: &[C]) -> Vec<f64> {
        let mut corpus = Vec::with_capacity(candidates.len() + 1);
        corpus.push(self.tokenizer.terms(&query.to_query()));
        corpus.extend(
            candidates
                .iter()
                .map(|c| self.tokenizer.terms(&c.ranking_text())),
        );

        let model = TfidfModel::fit(&corpus);
        debug!(
            "Vectorized {} candidates over {} terms",
            candidates.len(),
            model.term_count()
        );

        let query_vector = model.transform(&corpus[0]);
        score_documents(&model, &query_vector, &corpus[1..])
    }
}

#[cfg(not(feature = "parallel"))]
fn score_documents(model: &TfidfModel, query: &SparseVector, documents: &[Vec<String>]) -> Vec<f64> {
    documents
        .iter()
        .map(|doc| cosine_similarity(query, &model.transform(doc)))
        .collect()
}

#[cfg(feature = "parallel")]
fn score_documents(model: &TfidfModel, query: &SparseVector, documents: &[Vec<String>]) -> Vec<f64> {
    documents
        .par_iter()
        .map(|doc| cosine_similarity(query, &model.transform(doc)))
        .collect()
}

/// Rank with a default ranker.
pub fn rank<'a, C: Candidate>(query: &SkillSet, candidates: &'a [C]) -> Vec<RankedResult<'a, C>> {
    RelevanceRanker::new().rank(query, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::candidate::Course;

    fn course(id: &str, title: &str, description: &str) -> Course {
        Course::new(id, title, description, "Staff", format!("https://courses.example/{}", id))
            .unwrap()
    }

    fn ids<C: Candidate>(results: &[RankedResult<'_, C>]) -> Vec<String> {
        results.iter().map(|r| r.candidate.id().to_string()).collect()
    }

    #[test]
    fn test_python_course_ranks_above_pottery() {
        let courses = vec![
            course("pottery", "Intro to Pottery", "A first course"),
            course("python", "Intro to Python", "A first course"),
        ];
        let query = SkillSet::parse_stored("python, sql");

        let results = rank(&query, &courses);

        assert_eq!(ids(&results), vec!["python", "pottery"]);
        assert!(results[0].score > results[1].score);
        assert_eq!(results[0].rank, 1);
        assert_eq!(results[1].rank, 2);
    }

    #[test]
    fn test_result_is_permutation_with_bounded_scores() {
        let courses = vec![
            course("a", "Docker in depth", "containers with docker and kubernetes"),
            course("b", "Cooking", "pasta and bread"),
            course("c", "SQL basics", "queries with sql"),
            course("d", "Docker in depth", "containers with docker and kubernetes"),
        ];
        let query = SkillSet::parse_stored("docker, sql");

        let results = rank(&query, &courses);

        let mut got = ids(&results);
        got.sort();
        assert_eq!(got, vec!["a", "b", "c", "d"]);
        assert!(results.iter().all(|r| (0.0..=1.0).contains(&r.score)));
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let courses = vec![
            course("first", "Cooking", "bread"),
            course("dup-1", "Docker course", "docker"),
            course("second", "Gardening", "soil"),
            course("dup-2", "Docker course", "docker"),
        ];
        let query = SkillSet::parse_stored("docker");

        let results = rank(&query, &courses);

        assert_eq!(ids(&results), vec!["dup-1", "dup-2", "first", "second"]);
        assert_eq!(results[0].score, results[1].score);
        assert_eq!(results[2].score, 0.0);
    }

    #[test]
    fn test_empty_query_keeps_order_with_zero_scores() {
        let courses = vec![
            course("b", "Python", "Scripting"),
            course("a", "SQL", "Queries"),
        ];

        let results = rank(&SkillSet::new(), &courses);

        assert_eq!(ids(&results), vec!["b", "a"]);
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_empty_pool() {
        let courses: Vec<Course> = Vec::new();
        assert!(rank(&SkillSet::parse_stored("python"), &courses).is_empty());
    }

    #[test]
    fn test_scores_match_catalog_order() {
        let courses = vec![
            course("x", "Pottery", "Clay"),
            course("y", "Python", "Scripting"),
        ];
        let scores = RelevanceRanker::new().score(&SkillSet::parse_stored("python"), &courses);

        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0], 0.0);
        assert!(scores[1] > 0.0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_scores_equal_sequential() {
        let courses: Vec<Course> = (0..64)
            .map(|i| {
                let topic = ["python", "docker", "sql", "pottery"][i % 4];
                course(&i.to_string(), &format!("{} track {}", topic, i), "hands-on lessons")
            })
            .collect();
        let query = SkillSet::parse_stored("python, sql");
        let ranker = RelevanceRanker::new();

        let tokenizer = Tokenizer::new();
        let mut corpus = vec![tokenizer.terms(&query.to_query())];
        corpus.extend(courses.iter().map(|c| tokenizer.terms(&c.ranking_text())));
        let model = TfidfModel::fit(&corpus);
        let query_vector = model.transform(&corpus[0]);
        let sequential: Vec<f64> = corpus[1..]
            .iter()
            .map(|doc| cosine_similarity(&query_vector, &model.transform(doc)))
            .collect();

        assert_eq!(ranker.score(&query, &courses), sequential);

        let ranked = ids(&ranker.rank(&query, &courses));
        let mut expected: Vec<usize> = (0..courses.len()).collect();
        expected.sort_by(|&a, &b| sequential[b].partial_cmp(&sequential[a]).unwrap());
        let expected: Vec<String> = expected.iter().map(|i| i.to_string()).collect();
        assert_eq!(ranked, expected);
    }
}
