//! Turns profile and job-offer records into Word documents.
//!
//! Two stateless entry points: [`profile::render_profile`] and
//! [`offer::render_offer`]. Each builds a [`document::GeneratedDocument`]
//! and hands it to a [`docx::DocumentWriter`].

pub mod config;
pub mod document;
pub mod docx;
pub mod errors;
pub mod models;
pub mod offer;
pub mod profile;
pub mod table;

pub use errors::DocgenError;
pub use models::Offer;
pub use offer::render_offer;
pub use profile::{render_profile, ProfileTables};
