use serde::{Deserialize, Serialize};

use super::search_result::{SearchResult, MISSING_SITE_NAME};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobKey {
    pub role: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobEntry {
    pub company: String,
    pub role: String,
    pub location: String,
    pub source: String,
    pub url: String,
}

/// An entry as read back from a previous run's file, before key checks.
#[derive(Debug, Default, Deserialize)]
pub struct RawJobEntry {
    pub company: Option<String>,
    pub role: Option<String>,
    pub location: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
}

/// How an entry made it into the collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Provenance {
    Indexed,
    VerifiedOpen,
}

impl Provenance {
    pub fn label(&self) -> &'static str {
        match self {
            Provenance::Indexed => "Brave Search (indexed)",
            Provenance::VerifiedOpen => "Brave Search (verified open)",
        }
    }
}

impl JobEntry {
    pub fn from_search_result(
        result: SearchResult,
        location: &str,
        provenance: Provenance,
    ) -> Self {
        JobEntry {
            company: result.site_name,
            role: result.title,
            location: location.to_string(),
            source: provenance.label().to_string(),
            url: result.url,
        }
    }

    /// Returns `None` when role or url is missing or empty.
    pub fn from_raw(raw: RawJobEntry) -> Option<Self> {
        let role = raw.role.filter(|r| !r.is_empty())?;
        let url = raw.url.filter(|u| !u.is_empty())?;

        Some(JobEntry {
            company: raw
                .company
                .unwrap_or_else(|| MISSING_SITE_NAME.to_string()),
            role,
            location: raw.location.unwrap_or_default(),
            source: raw.source.unwrap_or_default(),
            url,
        })
    }

    pub fn key(&self) -> JobKey {
        JobKey {
            role: self.role.clone(),
            url: self.url.clone(),
        }
    }
}
