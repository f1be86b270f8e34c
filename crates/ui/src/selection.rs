//! Badge state machine: which option of each cyclable field is showing.
//!
//! The whole state is three indices. Each face button advances one of them,
//! wrapping at the end of its option list. Nothing else changes them.

use core::num::NonZeroUsize;

use platform::Button;

use crate::profile::BadgeProfile;

/// A cyclable badge field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Affiliation band
    Company,
    /// Upper detail band
    Detail1,
    /// Lower detail band
    Detail2,
}

impl Field {
    /// Name used in error messages and logs
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Company => "company",
            Self::Detail1 => "detail1",
            Self::Detail2 => "detail2",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state change. Declaration order is priority order: when several buttons
/// are down in the same tick only the first one listed here is acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Transition {
    /// Next company option
    AdvanceCompany,
    /// Next upper detail
    AdvanceDetail1,
    /// Next lower detail
    AdvanceDetail2,
}

impl Transition {
    /// Field this transition advances
    pub const fn field(self) -> Field {
        match self {
            Self::AdvanceCompany => Field::Company,
            Self::AdvanceDetail1 => Field::Detail1,
            Self::AdvanceDetail2 => Field::Detail2,
        }
    }

    /// Transition bound to `button`, if any. A, B, C drive the three fields;
    /// the rocker and user buttons do nothing on the badge.
    pub const fn for_button(button: Button) -> Option<Self> {
        match button {
            Button::A => Some(Self::AdvanceCompany),
            Button::B => Some(Self::AdvanceDetail1),
            Button::C => Some(Self::AdvanceDetail2),
            Button::Up | Button::Down | Button::User => None,
        }
    }

    /// The one transition to act on out of everything reported this tick
    pub fn highest_priority<I>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        candidates.into_iter().min()
    }
}

/// Active option index for each field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BadgeSelection {
    company: usize,
    detail1: usize,
    detail2: usize,
}

impl BadgeSelection {
    /// Everything on its first option
    pub const fn new() -> Self {
        Self {
            company: 0,
            detail1: 0,
            detail2: 0,
        }
    }

    /// Index of the active option for `field`
    pub const fn index(&self, field: Field) -> usize {
        match field {
            Field::Company => self.company,
            Field::Detail1 => self.detail1,
            Field::Detail2 => self.detail2,
        }
    }

    /// Active company option
    pub const fn company(&self) -> usize {
        self.company
    }

    /// Active upper detail
    pub const fn detail1(&self) -> usize {
        self.detail1
    }

    /// Active lower detail
    pub const fn detail2(&self) -> usize {
        self.detail2
    }

    fn slot(&mut self, field: Field) -> &mut usize {
        match field {
            Field::Company => &mut self.company,
            Field::Detail1 => &mut self.detail1,
            Field::Detail2 => &mut self.detail2,
        }
    }
}

/// Owns the selection and the option counts it cycles through.
#[derive(Debug, Clone)]
pub struct BadgeMachine {
    selection: BadgeSelection,
    company: NonZeroUsize,
    detail1: NonZeroUsize,
    detail2: NonZeroUsize,
}

impl BadgeMachine {
    /// Start on the first option of every field
    pub fn new(profile: &BadgeProfile) -> Self {
        Self {
            selection: BadgeSelection::new(),
            company: profile.option_count(Field::Company),
            detail1: profile.option_count(Field::Detail1),
            detail2: profile.option_count(Field::Detail2),
        }
    }

    /// Current selection
    pub const fn selection(&self) -> BadgeSelection {
        self.selection
    }

    /// Advance one field, wrapping to 0 past its last option, and return the
    /// new selection
    pub fn apply(&mut self, transition: Transition) -> BadgeSelection {
        let field = transition.field();
        let count = self.count(field).get();
        let slot = self.selection.slot(field);
        *slot = (*slot + 1) % count;
        self.selection
    }

    fn count(&self, field: Field) -> NonZeroUsize {
        match field {
            Field::Company => self.company,
            Field::Detail1 => self.detail1,
            Field::Detail2 => self.detail2,
        }
    }
}
