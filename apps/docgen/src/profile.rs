//! Profile formatter — one CV document per profile id.
//!
//! Layout:
//! - title: `CV pour: <jobtitle>`
//! - `Experiences:` — one bullet per experience title, followed by a justified
//!   paragraph when the experience has a description
//! - `Competences:` — one bullet per skill

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::docx::{save_document, DocumentWriter, DocxWriter};
use crate::document::{GeneratedDocument, Paragraph};
use crate::errors::DocgenError;
use crate::models::{ExperienceRow, ProfileRow, SkillRow};
use crate::table::Table;

pub const DEFAULT_PROFILE_FILE: &str = "profile.docx";

pub const EXPERIENCES_HEADING: &str = "Experiences:";
pub const SKILLS_HEADING: &str = "Competences:";

/// The three tables a profile is assembled from.
#[derive(Debug, Clone, Copy)]
pub struct ProfileTables<'a> {
    pub profiles: &'a Table<ProfileRow>,
    pub skills: &'a Table<SkillRow>,
    pub experiences: &'a Table<ExperienceRow>,
}

/// Looks up the job title of `profile_id`. Exactly one profile row must match.
pub fn lookup_job_title(
    profile_id: i64,
    profiles: &Table<ProfileRow>,
) -> Result<&str, DocgenError> {
    let titles = profiles.project(|p| p.id_profile == profile_id, |p| p.jobtitle.as_str());
    match titles.as_slice() {
        [title] => Ok(*title),
        [] => Err(DocgenError::ProfileNotFound(profile_id)),
        many => Err(DocgenError::AmbiguousProfile {
            id: profile_id,
            count: many.len(),
        }),
    }
}

/// Builds the CV document for `profile_id` without touching the filesystem.
pub fn build_profile_document(
    profile_id: i64,
    tables: ProfileTables<'_>,
) -> Result<GeneratedDocument, DocgenError> {
    let job_title = lookup_job_title(profile_id, tables.profiles)?;
    let skills = tables
        .skills
        .project(|s| s.id_profile == profile_id, |s| s.skill.as_str());
    let experiences = tables.experiences.select(|e| e.id_profile == profile_id);
    debug!(
        "Profile {profile_id}: {} experiences, {} skills",
        experiences.len(),
        skills.len()
    );

    let mut document = GeneratedDocument::new();
    document.add_heading(format!("CV pour: {job_title}"), 0);

    document.add_heading(EXPERIENCES_HEADING, 1);
    for experience in experiences {
        document.add_paragraph(Paragraph::new(experience.title.as_str()).bullet());
        if let Some(description) = experience.description_text() {
            document.add_paragraph(Paragraph::new(description).justified());
        }
    }

    document.add_heading(SKILLS_HEADING, 1);
    for skill in skills {
        document.add_paragraph(Paragraph::new(skill).bullet());
    }

    Ok(document)
}

/// Renders the CV for `profile_id` to `out` (default `profile.docx`) as a `.docx` file.
pub fn render_profile(
    profile_id: i64,
    tables: ProfileTables<'_>,
    out: Option<&Path>,
) -> Result<PathBuf, DocgenError> {
    render_profile_with(&DocxWriter, profile_id, tables, out)
}

/// Same as [`render_profile`], writing through `writer`.
/// The lookup runs first, so an unknown id never creates a file.
pub fn render_profile_with(
    writer: &dyn DocumentWriter,
    profile_id: i64,
    tables: ProfileTables<'_>,
    out: Option<&Path>,
) -> Result<PathBuf, DocgenError> {
    let document = build_profile_document(profile_id, tables)?;
    let out = out.unwrap_or_else(|| Path::new(DEFAULT_PROFILE_FILE));
    let path = save_document(writer, &document, out)?;
    info!("Rendered profile {profile_id} to {}", path.display());
    Ok(path)
}
