//! JSON badge profiles (`badge_data.json`).
//!
//! ```json
//! {
//!   "name": "Ada Lovelace",
//!   "company": [{ "text": "Analytical Engines", "size": 0.6 }],
//!   "detail1": [{ "title": "Role", "text": "Programmer" }],
//!   "detail2": [{ "title": "Web", "text": "example.org" }],
//!   "image_path": "/badges/badge.jpg"
//! }
//! ```
//!
//! Decoding only checks shape; every rule about what makes a usable profile
//! lives in [`BadgeProfile::try_from`].

extern crate std;

use std::{fmt, fs, path::Path, string::String, vec::Vec};

use serde::Deserialize;
use ui::{
    profile::{CompanyRecord, DetailRecord, DEFAULT_COMPANY_SCALE},
    BadgeProfile, ConfigError, ProfileRecord,
};

/// Why a profile file could not be turned into a [`BadgeProfile`].
#[derive(Debug)]
pub enum ProfileLoadError {
    /// Reading the file failed
    Io(std::io::Error),
    /// The file is not a profile-shaped JSON document
    Parse(serde_json::Error),
    /// The profile decoded but is not usable
    Invalid(ConfigError),
}

impl fmt::Display for ProfileLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "cannot read profile: {e}"),
            Self::Parse(e) => write!(f, "malformed profile: {e}"),
            Self::Invalid(e) => write!(f, "invalid profile: {e}"),
        }
    }
}

impl std::error::Error for ProfileLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompanyEntry {
    text: String,
    #[serde(default = "default_company_scale")]
    size: f32,
}

fn default_company_scale() -> f32 {
    DEFAULT_COMPANY_SCALE
}

#[derive(Debug, Deserialize)]
struct DetailEntry {
    title: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct ProfileFile {
    name: String,
    #[serde(default)]
    company: Vec<CompanyEntry>,
    #[serde(default)]
    detail1: Vec<DetailEntry>,
    #[serde(default)]
    detail2: Vec<DetailEntry>,
    #[serde(default)]
    image_path: Option<String>,
}

impl ProfileFile {
    fn validate(&self) -> Result<BadgeProfile, ConfigError> {
        let company: Vec<CompanyRecord<'_>> = self
            .company
            .iter()
            .map(|c| CompanyRecord {
                text: &c.text,
                size: c.size,
            })
            .collect();
        let detail1 = detail_records(&self.detail1);
        let detail2 = detail_records(&self.detail2);

        BadgeProfile::try_from(ProfileRecord {
            name: &self.name,
            company: &company,
            detail1: &detail1,
            detail2: &detail2,
            image_path: self.image_path.as_deref(),
        })
    }
}

fn detail_records(entries: &[DetailEntry]) -> Vec<DetailRecord<'_>> {
    entries
        .iter()
        .map(|d| DetailRecord {
            title: &d.title,
            text: &d.text,
        })
        .collect()
}

/// Decode and validate a profile from JSON text
pub fn parse_profile(json: &str) -> Result<BadgeProfile, ProfileLoadError> {
    let file: ProfileFile = serde_json::from_str(json).map_err(ProfileLoadError::Parse)?;
    file.validate().map_err(ProfileLoadError::Invalid)
}

/// Read, decode and validate the profile at `path`
pub fn load_profile(path: &Path) -> Result<BadgeProfile, ProfileLoadError> {
    let json = fs::read_to_string(path).map_err(ProfileLoadError::Io)?;
    let profile = parse_profile(&json)?;
    tracing::info!(
        path = %path.display(),
        name = profile.name(),
        companies = profile.company_options().len(),
        "profile loaded"
    );
    Ok(profile)
}
