//! Profile skill flow: resume + form entry + stored skills

use crate::error::{Result, SkillMatchError};
use crate::input::text_extractor::{extract_text, Document};
use crate::processing::skill_extractor::SkillExtractor;
use crate::processing::skill_set::{merge, SkillSet};
use crate::processing::vocabulary::Vocabulary;
use log::{info, warn};

/// Raw inputs submitted when a profile is created or updated.
#[derive(Debug, Clone, Default)]
pub struct ProfileSkillsRequest {
    /// Previously stored skill string, e.g. `"docker, python"`.
    pub existing: Option<String>,
    pub resume: Option<Document>,
    /// Free-form skills typed into the profile form.
    pub form_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSkills {
    pub existing: SkillSet,
    pub from_resume: SkillSet,
    pub from_form: SkillSet,
    pub merged: SkillSet,
}

impl ProfileSkills {
    /// The string the profile store persists.
    pub fn stored(&self) -> String {
        self.merged.to_stored()
    }
}

/// Extract skills from the resume and the form, then merge with what is stored.
///
/// Either a resume or form text must be supplied. A resume that yields no
/// text contributes nothing rather than failing the request.
pub fn build_profile_skills(vocabulary: &Vocabulary, request: &ProfileSkillsRequest) -> Result<ProfileSkills> {
    let has_form_text = request
        .form_text
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty());

    if request.resume.is_none() && !has_form_text {
        return Err(SkillMatchError::InvalidInput(
            "Please provide skills or upload a resume.".to_string(),
        ));
    }

    let extractor = SkillExtractor::new(vocabulary);

    let existing = request
        .existing
        .as_deref()
        .map(SkillSet::parse_stored)
        .unwrap_or_default();

    let from_resume = match &request.resume {
        Some(document) => match extract_text(document) {
            Some(text) => extractor.extract(&text),
            None => {
                warn!("Resume produced no text; continuing with other skill sources");
                SkillSet::new()
            }
        },
        None => SkillSet::new(),
    };

    let from_form = request
        .form_text
        .as_deref()
        .map(|text| extractor.extract(text))
        .unwrap_or_default();

    let merged = merge(&existing, &from_resume, &from_form);
    info!(
        "Profile skills: {} existing, {} from resume, {} from form, {} merged",
        existing.len(),
        from_resume.len(),
        from_form.len(),
        merged.len()
    );

    Ok(ProfileSkills {
        existing,
        from_resume,
        from_form,
        merged,
    })
}
