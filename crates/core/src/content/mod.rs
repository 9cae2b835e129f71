pub mod builtin;

use std::collections::HashSet;

use folio_protocol::{ItemId, SharedStr};
use thiserror::Error;

use crate::model::{SectionSpec, Site};

pub use builtin::builtin_site;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid content JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("site has no sections")]
    NoSections,
    #[error("section id must not be empty")]
    EmptySectionId,
    #[error("duplicate section id `{0}`")]
    DuplicateSection(SharedStr),
    #[error("section `{section}`: duplicate item id {id}")]
    DuplicateItem { section: SharedStr, id: ItemId },
    #[error("section `{section}`: item {id} has level {level}, expected 0-100")]
    LevelOutOfRange {
        section: SharedStr,
        id: ItemId,
        level: u8,
    },
}

/// Parse and validate site content from JSON.
///
/// Thresholds outside `(0, 1]` are rejected while parsing; the remaining
/// checks run on the parsed site (see [`validate`]).
pub fn parse_site(data: &[u8]) -> Result<Site, ContentError> {
    let site: Site = serde_json::from_slice(data)?;
    validate(&site).inspect_err(|e| tracing::warn!(error = %e, "rejected site content"))?;
    Ok(site)
}

/// Structural checks: at least one section, unique non-empty section ids,
/// unique item ids within a section, skill levels in range.
pub fn validate(site: &Site) -> Result<(), ContentError> {
    if site.sections.is_empty() {
        return Err(ContentError::NoSections);
    }
    let mut ids: HashSet<&str> = HashSet::new();
    for section in &site.sections {
        if section.id.is_empty() {
            return Err(ContentError::EmptySectionId);
        }
        if !ids.insert(section.id.as_str()) {
            return Err(ContentError::DuplicateSection(section.id.clone()));
        }
        validate_section(section)?;
    }
    Ok(())
}

fn validate_section(section: &SectionSpec) -> Result<(), ContentError> {
    let mut seen: HashSet<ItemId> = HashSet::new();
    for item in section.items.items() {
        if !seen.insert(item.id) {
            return Err(ContentError::DuplicateItem {
                section: section.id.clone(),
                id: item.id,
            });
        }
        if let Some(level) = item.display.level
            && level > 100
        {
            return Err(ContentError::LevelOutOfRange {
                section: section.id.clone(),
                id: item.id,
                level,
            });
        }
    }
    Ok(())
}
