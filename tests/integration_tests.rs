//! Integration tests for the skill matcher

use skill_matcher::catalog::candidate::{Candidate, Course, Project};
use skill_matcher::catalog::loader::load_from_path;
use skill_matcher::catalog::store::CatalogStore;
use skill_matcher::input::text_extractor::extract_text_from_path;
use skill_matcher::processing::profile::{build_profile_skills, ProfileSkillsRequest};
use skill_matcher::{extract_skills, extract_text, merge, rank, Document, MatchMode, SkillMatchError, SkillSet, Vocabulary};
use std::path::Path;

const RESUME_SKILLS: &str = "python, django, postgresql, docker, kubernetes, aws, \
machine learning, scikit-learn, pandas, rest api, linux, bash";

#[test]
fn test_text_extraction_from_txt() {
    let text = extract_text_from_path(Path::new("tests/fixtures/sample_resume.txt")).unwrap();

    assert!(text.contains("Jane Roe"));
    assert!(text.contains("Backend Software Engineer"));
    assert!(text.contains("PostgreSQL"));
}

#[test]
fn test_text_extraction_from_markdown() {
    let text = extract_text_from_path(Path::new("tests/fixtures/sample_resume.md")).unwrap();

    assert!(text.contains("Jane Roe"));
    assert!(text.contains("REST API"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
    assert!(!text.contains("https://acme.example/api"));
}

#[test]
fn test_text_extraction_from_pdf() {
    let vocab = Vocabulary::default();
    let bytes = std::fs::read("tests/fixtures/sample_resume.pdf").unwrap();

    for document in [
        Document::from_path("tests/fixtures/sample_resume.pdf"),
        Document::from_bytes(bytes),
    ] {
        let text = extract_text(&document).unwrap();
        assert!(text.contains("Python and Docker"), "got {:?}", text);
        assert!(text.contains("deployed on AWS"), "got {:?}", text);
        assert_eq!(extract_skills(&vocab, Some(&text)).to_stored(), "python, docker, aws");
    }
}

#[test]
fn test_pdf_without_extension_is_detected_by_content() {
    let text = extract_text_from_path(Path::new("tests/fixtures/sample_resume_noext")).unwrap();
    assert!(text.contains("Python and Docker"));
}

#[test]
fn test_unsupported_and_missing_files_yield_none() {
    assert!(extract_text_from_path(Path::new("tests/fixtures/unsupported.xyz")).is_none());
    assert!(extract_text_from_path(Path::new("tests/fixtures/nonexistent.txt")).is_none());
}

#[test]
fn test_empty_document_then_empty_skills() {
    let vocab = Vocabulary::default();
    let text = extract_text(&Document::from_bytes(Vec::new()));

    assert!(text.is_none());
    assert!(extract_skills(&vocab, text.as_deref()).is_empty());
}

#[test]
fn test_resume_skills_in_first_occurrence_order() {
    let vocab = Vocabulary::default();

    for fixture in ["tests/fixtures/sample_resume.txt", "tests/fixtures/sample_resume.md"] {
        let text = extract_text_from_path(Path::new(fixture));
        let skills = extract_skills(&vocab, text.as_deref());
        assert_eq!(skills.to_stored(), RESUME_SKILLS, "fixture {}", fixture);
    }
}

#[test]
fn test_single_token_mode_on_resume() {
    let vocab = Vocabulary::default().with_match_mode(MatchMode::SingleTokens);
    let text = extract_text_from_path(Path::new("tests/fixtures/sample_resume.txt"));
    let skills = extract_skills(&vocab, text.as_deref());

    assert!(skills.contains("python"));
    assert!(!skills.contains("machine learning"));
    assert!(!skills.contains("rest api"));
    assert!(!skills.contains("scikit-learn"));
}

#[test]
fn test_profile_flow_with_resume_file() {
    let vocab = Vocabulary::default();
    let request = ProfileSkillsRequest {
        existing: Some("sql, python".to_string()),
        resume: Some(Document::from_path("tests/fixtures/sample_resume.txt")),
        form_text: Some("Also some GraphQL".to_string()),
    };

    let skills = build_profile_skills(&vocab, &request).unwrap();

    assert_eq!(
        skills.stored(),
        "aws, bash, django, docker, graphql, kubernetes, linux, machine learning, \
pandas, postgresql, python, rest api, scikit-learn, sql"
    );
}

#[test]
fn test_rank_course_catalog() {
    let catalog = load_from_path::<Course>(Path::new("tests/fixtures/courses.csv")).unwrap();
    let query = SkillSet::parse_stored("python, sql");

    let results = rank(&query, catalog.items());
    let ids: Vec<&str> = results.iter().map(|r| r.candidate.id()).collect();

    let mut top: Vec<&str> = ids[..2].to_vec();
    top.sort();
    assert_eq!(top, vec!["py-101", "sql-201"]);
    assert_eq!(&ids[2..], &["pottery-101", "k8s-301", "bake-101"]);
    assert!(results[1].score > 0.0);
    assert!(results[2..].iter().all(|r| r.score == 0.0));
}

#[test]
fn test_rank_projects_from_resume_skills() {
    let vocab = Vocabulary::default();
    let text = extract_text_from_path(Path::new("tests/fixtures/sample_resume.txt"));
    let resume_skills = extract_skills(&vocab, text.as_deref());
    let query = merge(&resume_skills, &SkillSet::new(), &SkillSet::new());

    let store = CatalogStore::<Project>::open(Path::new("tests/fixtures/projects.csv")).unwrap();
    let snapshot = store.snapshot();
    let results = rank(&query, snapshot.items());

    let titles: Vec<&str> = results.iter().map(|r| r.candidate.display_name()).collect();
    assert_eq!(titles, vec!["Churn model", "Recipe API", "Weather dashboard"]);
    assert!(results[0].score > results[1].score);
    assert!(results[1].score > results[2].score);
    assert_eq!(results[1].candidate.url(), None);
}

#[test]
fn test_empty_query_preserves_catalog_order() {
    let catalog = load_from_path::<Course>(Path::new("tests/fixtures/courses.csv")).unwrap();
    let results = rank(&SkillSet::new(), catalog.items());

    let ids: Vec<&str> = results.iter().map(|r| r.candidate.id()).collect();
    assert_eq!(ids, vec!["pottery-101", "py-101", "sql-201", "k8s-301", "bake-101"]);
    assert!(results.iter().all(|r| r.score == 0.0));
}

#[test]
fn test_malformed_catalog_fails_at_load() {
    let err = load_from_path::<Course>(Path::new("tests/fixtures/malformed_courses.csv")).unwrap_err();

    match err {
        SkillMatchError::CatalogSchema { record, reason, .. } => {
            assert_eq!(record, 2);
            assert!(reason.contains("description"));
        }
        other => panic!("unexpected error: {}", other),
    }
}
