use serde::{Deserialize, Serialize};

use crate::errors::DocgenError;

/// One row of `employee_profiles.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id_profile: i64,
    pub jobtitle: String,
}

/// One row of `employee_skills.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRow {
    pub id_profile: i64,
    pub skill: String,
}

/// One row of `employee_experiences.csv`. The description is frequently blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRow {
    pub id_profile: i64,
    pub title: String,
    pub description: Option<String>,
}

impl ExperienceRow {
    /// Description text, only when present and non-empty.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// Raw row of `offers.csv`, before required fields are checked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfferRecord {
    pub jobtitle: Option<String>,
    pub description: Option<String>,
    pub contract: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

/// A job offer ready to be rendered. Not backed by any table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub job_title: String,
    /// Newline-delimited; each non-empty line becomes one paragraph.
    pub description: String,
    pub contract: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
}

impl Offer {
    pub fn new(job_title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            job_title: job_title.into(),
            description: description.into(),
            contract: None,
            company: None,
            location: None,
        }
    }

    pub fn with_contract(mut self, contract: impl Into<String>) -> Self {
        self.contract = Some(contract.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl TryFrom<OfferRecord> for Offer {
    type Error = DocgenError;

    fn try_from(record: OfferRecord) -> Result<Self, Self::Error> {
        let job_title = record
            .jobtitle
            .ok_or_else(|| DocgenError::Validation("offer job title is missing".to_string()))?;
        let description = record
            .description
            .ok_or_else(|| DocgenError::Validation("offer description is missing".to_string()))?;

        Ok(Offer {
            job_title,
            description,
            contract: record.contract,
            company: record.company,
            location: record.location,
        })
    }
}
