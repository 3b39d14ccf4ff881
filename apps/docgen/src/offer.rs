//! Offer formatter — one document per job offer.
//!
//! Company, contract and location each get their own section only when set.
//! The description is split on newlines; every non-empty line becomes a
//! justified paragraph.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::docx::{save_document, DocumentWriter, DocxWriter};
use crate::document::{GeneratedDocument, Paragraph};
use crate::errors::DocgenError;
use crate::models::{Offer, OfferRecord};
use crate::table::Table;

pub const DEFAULT_OFFER_FILE: &str = "offre.docx";

pub const COMPANY_HEADING: &str = "Entreprise:";
pub const CONTRACT_HEADING: &str = "Type de contrat:";
pub const LOCATION_HEADING: &str = "Lieu de travail:";
pub const DESCRIPTION_HEADING: &str = "Description de l'offre:";

/// Builds the offer document without touching the filesystem.
pub fn build_offer_document(offer: &Offer) -> GeneratedDocument {
    let mut document = GeneratedDocument::new();
    document.add_heading(format!("Offre pour: {}", offer.job_title), 0);

    let optional_sections = [
        (COMPANY_HEADING, &offer.company),
        (CONTRACT_HEADING, &offer.contract),
        (LOCATION_HEADING, &offer.location),
    ];
    for (heading, value) in optional_sections {
        if let Some(value) = value {
            document
                .add_heading(heading, 1)
                .add_paragraph(Paragraph::new(value.as_str()));
        }
    }

    document.add_heading(DESCRIPTION_HEADING, 1);
    let mut lines = 0;
    for part in offer.description.split('\n').filter(|p| !p.is_empty()) {
        document.add_paragraph(Paragraph::new(part).justified());
        lines += 1;
    }
    debug!("Offer '{}': {lines} description paragraphs", offer.job_title);

    document
}

/// Renders `offer` to `out` (default `offre.docx`) as a `.docx` file.
pub fn render_offer(offer: &Offer, out: Option<&Path>) -> Result<PathBuf, DocgenError> {
    render_offer_with(&DocxWriter, offer, out)
}

/// Same as [`render_offer`], writing through `writer`.
pub fn render_offer_with(
    writer: &dyn DocumentWriter,
    offer: &Offer,
    out: Option<&Path>,
) -> Result<PathBuf, DocgenError> {
    let document = build_offer_document(offer);
    let out = out.unwrap_or_else(|| Path::new(DEFAULT_OFFER_FILE));
    let path = save_document(writer, &document, out)?;
    info!("Rendered offer '{}' to {}", offer.job_title, path.display());
    Ok(path)
}

/// Picks row `index` of an offers table and checks its required fields.
pub fn offer_from_table(offers: &Table<OfferRecord>, index: usize) -> Result<Offer, DocgenError> {
    let record = offers.get(index).ok_or(DocgenError::RowOutOfRange {
        index,
        len: offers.len(),
    })?;
    Offer::try_from(record.clone())
}
