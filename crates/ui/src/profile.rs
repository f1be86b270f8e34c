//! Badge profile: the per-session configuration the badge cycles through.
//!
//! A profile is built once at startup, either from a decoded
//! [`ProfileRecord`] or with [`BadgeProfile::builder`], and is read-only
//! afterwards. Construction is where every configuration problem surfaces:
//! once a [`BadgeProfile`] exists, every cyclable field has at least one
//! option and every string fits its fixed-capacity slot.

use core::num::NonZeroUsize;

use heapless::{String, Vec};

use crate::selection::Field;

/// Most options a cyclable field may hold
pub const MAX_OPTIONS: usize = 8;
/// Capacity of the name, in bytes
pub const NAME_CAPACITY: usize = 64;
/// Capacity of company text and detail values, in bytes
pub const TEXT_CAPACITY: usize = 64;
/// Capacity of detail titles, in bytes
pub const TITLE_CAPACITY: usize = 32;
/// Capacity of the image path, in bytes
pub const PATH_CAPACITY: usize = 64;

/// Company scale used when a record does not give one
pub const DEFAULT_COMPANY_SCALE: f32 = 0.6;

/// One affiliation option.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyOption {
    /// Text shown in the company band
    pub text: String<TEXT_CAPACITY>,
    /// Render scale for this option
    pub size: f32,
}

/// One detail option: a title and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailOption {
    /// Left-hand label
    pub title: String<TITLE_CAPACITY>,
    /// Value drawn after the label
    pub text: String<TEXT_CAPACITY>,
}

/// Raw company entry as decoded from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompanyRecord<'a> {
    /// Company text
    pub text: &'a str,
    /// Render scale
    pub size: f32,
}

/// Raw detail entry as decoded from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailRecord<'a> {
    /// Title
    pub title: &'a str,
    /// Value
    pub text: &'a str,
}

/// Unvalidated profile as it comes out of a decoder. Convert with
/// [`BadgeProfile::try_from`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileRecord<'a> {
    /// Holder's name
    pub name: &'a str,
    /// Affiliation options
    pub company: &'a [CompanyRecord<'a>],
    /// Upper detail options
    pub detail1: &'a [DetailRecord<'a>],
    /// Lower detail options
    pub detail2: &'a [DetailRecord<'a>],
    /// Portrait image, if configured
    pub image_path: Option<&'a str>,
}

/// Reasons a profile is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A cyclable field has no options
    EmptyOptions(Field),
    /// A cyclable field has more than [`MAX_OPTIONS`] options
    TooManyOptions(Field),
    /// A string does not fit its slot; names the offending key
    TextTooLong(&'static str),
    /// A company scale is zero, negative, or not finite
    InvalidScale,
    /// No image path was given
    MissingImagePath,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyOptions(field) => write!(f, "`{field}` needs at least one option"),
            Self::TooManyOptions(field) => {
                write!(f, "`{field}` has more than {MAX_OPTIONS} options")
            }
            Self::TextTooLong(key) => write!(f, "`{key}` is too long"),
            Self::InvalidScale => write!(f, "company size must be a positive number"),
            Self::MissingImagePath => write!(f, "`image_path` is missing or empty"),
        }
    }
}

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validated, read-only badge configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeProfile {
    name: String<NAME_CAPACITY>,
    company: Vec<CompanyOption, MAX_OPTIONS>,
    detail1: Vec<DetailOption, MAX_OPTIONS>,
    detail2: Vec<DetailOption, MAX_OPTIONS>,
    image_path: String<PATH_CAPACITY>,
}

impl BadgeProfile {
    /// Programmatic construction
    pub fn builder<'a>() -> ProfileBuilder<'a> {
        ProfileBuilder::default()
    }

    /// Holder's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All company options
    pub fn company_options(&self) -> &[CompanyOption] {
        &self.company
    }

    /// Company option `index`
    pub fn company(&self, index: usize) -> Option<&CompanyOption> {
        self.company.get(index)
    }

    /// Detail option `index` of `field` (`None` for [`Field::Company`])
    pub fn detail(&self, field: Field, index: usize) -> Option<&DetailOption> {
        match field {
            Field::Company => None,
            Field::Detail1 => self.detail1.get(index),
            Field::Detail2 => self.detail2.get(index),
        }
    }

    /// Portrait image path
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    /// Number of options `field` cycles through
    pub fn option_count(&self, field: Field) -> NonZeroUsize {
        let len = match field {
            Field::Company => self.company.len(),
            Field::Detail1 => self.detail1.len(),
            Field::Detail2 => self.detail2.len(),
        };
        // Non-empty by construction.
        NonZeroUsize::new(len).unwrap_or(NonZeroUsize::MIN)
    }
}

impl TryFrom<ProfileRecord<'_>> for BadgeProfile {
    type Error = ConfigError;

    fn try_from(record: ProfileRecord<'_>) -> Result<Self, Self::Error> {
        let mut company = Vec::new();
        check_count(Field::Company, record.company.len())?;
        for entry in record.company {
            if !(entry.size.is_finite() && entry.size > 0.0) {
                return Err(ConfigError::InvalidScale);
            }
            company
                .push(CompanyOption {
                    text: bounded(entry.text, "company.text")?,
                    size: entry.size,
                })
                .map_err(|_| ConfigError::TooManyOptions(Field::Company))?;
        }

        let image_path = match record.image_path {
            Some(path) if !path.trim().is_empty() => bounded(path.trim(), "image_path")?,
            _ => return Err(ConfigError::MissingImagePath),
        };

        Ok(Self {
            name: bounded(record.name, "name")?,
            company,
            detail1: details(Field::Detail1, record.detail1)?,
            detail2: details(Field::Detail2, record.detail2)?,
            image_path,
        })
    }
}

fn check_count(field: Field, len: usize) -> Result<(), ConfigError> {
    match len {
        0 => Err(ConfigError::EmptyOptions(field)),
        n if n > MAX_OPTIONS => Err(ConfigError::TooManyOptions(field)),
        _ => Ok(()),
    }
}

fn details(
    field: Field,
    records: &[DetailRecord<'_>],
) -> Result<Vec<DetailOption, MAX_OPTIONS>, ConfigError> {
    check_count(field, records.len())?;
    let mut out = Vec::new();
    for entry in records {
        out.push(DetailOption {
            title: bounded(entry.title, "detail.title")?,
            text: bounded(entry.text, "detail.text")?,
        })
        .map_err(|_| ConfigError::TooManyOptions(field))?;
    }
    Ok(out)
}

fn bounded<const N: usize>(s: &str, key: &'static str) -> Result<String<N>, ConfigError> {
    let mut out = String::new();
    out.push_str(s).map_err(|_| ConfigError::TextTooLong(key))?;
    Ok(out)
}

/// Collects options, then validates them all at once in
/// [`build`](ProfileBuilder::build).
#[derive(Debug, Default)]
pub struct ProfileBuilder<'a> {
    name: &'a str,
    company: Vec<CompanyRecord<'a>, MAX_OPTIONS>,
    detail1: Vec<DetailRecord<'a>, MAX_OPTIONS>,
    detail2: Vec<DetailRecord<'a>, MAX_OPTIONS>,
    image_path: Option<&'a str>,
    overflow: Option<Field>,
}

impl<'a> ProfileBuilder<'a> {
    /// Set the holder's name
    #[must_use]
    pub fn name(mut self, name: &'a str) -> Self {
        self.name = name;
        self
    }

    /// Append a company option
    #[must_use]
    pub fn company(mut self, text: &'a str, size: f32) -> Self {
        if self.company.push(CompanyRecord { text, size }).is_err() {
            self.overflow.get_or_insert(Field::Company);
        }
        self
    }

    /// Append an upper detail option
    #[must_use]
    pub fn detail1(mut self, title: &'a str, text: &'a str) -> Self {
        if self.detail1.push(DetailRecord { title, text }).is_err() {
            self.overflow.get_or_insert(Field::Detail1);
        }
        self
    }

    /// Append a lower detail option
    #[must_use]
    pub fn detail2(mut self, title: &'a str, text: &'a str) -> Self {
        if self.detail2.push(DetailRecord { title, text }).is_err() {
            self.overflow.get_or_insert(Field::Detail2);
        }
        self
    }

    /// Set the portrait image path
    #[must_use]
    pub fn image_path(mut self, path: &'a str) -> Self {
        self.image_path = Some(path);
        self
    }

    /// Validate and produce the profile
    pub fn build(self) -> Result<BadgeProfile, ConfigError> {
        if let Some(field) = self.overflow {
            return Err(ConfigError::TooManyOptions(field));
        }
        BadgeProfile::try_from(ProfileRecord {
            name: self.name,
            company: &self.company,
            detail1: &self.detail1,
            detail2: &self.detail2,
            image_path: self.image_path,
        })
    }
}
