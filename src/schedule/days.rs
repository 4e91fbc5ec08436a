use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Weekday tag a course can meet on. Weekends never meet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayTag {
    M,
    Tu,
    W,
    Th,
    F,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid day: {0}. Valid days are: M, Tu, W, Th, F")]
pub struct UnknownDayTag(pub String);

impl DayTag {
    pub const ALL: [DayTag; 5] = [DayTag::M, DayTag::Tu, DayTag::W, DayTag::Th, DayTag::F];

    pub fn as_str(self) -> &'static str {
        match self {
            DayTag::M => "M",
            DayTag::Tu => "Tu",
            DayTag::W => "W",
            DayTag::Th => "Th",
            DayTag::F => "F",
        }
    }

    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(DayTag::M),
            Weekday::Tue => Some(DayTag::Tu),
            Weekday::Wed => Some(DayTag::W),
            Weekday::Thu => Some(DayTag::Th),
            Weekday::Fri => Some(DayTag::F),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl FromStr for DayTag {
    type Err = UnknownDayTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DayTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownDayTag(s.to_string()))
    }
}

impl fmt::Display for DayTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of meeting days, stored as a bitmask over [`DayTag`].
///
/// On the wire and in the database it is a comma separated list such as
/// `"M,W,F"`. Order and duplicates carry no meaning, and the canonical
/// rendering is always Monday first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct DaySet(u8);

impl DaySet {
    pub const EMPTY: DaySet = DaySet(0);

    pub fn insert(&mut self, tag: DayTag) {
        self.0 |= tag.bit();
    }

    pub fn contains(&self, tag: DayTag) -> bool {
        self.0 & tag.bit() != 0
    }

    /// Saturday and Sunday are never members.
    pub fn contains_weekday(&self, weekday: Weekday) -> bool {
        DayTag::from_weekday(weekday).is_some_and(|tag| self.contains(tag))
    }

    pub fn intersects(&self, other: &DaySet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = DayTag> + '_ {
        DayTag::ALL.into_iter().filter(|tag| self.contains(*tag))
    }

    /// Parses a comma separated tag list, rejecting anything outside the
    /// `M, Tu, W, Th, F` vocabulary.
    pub fn parse_strict(s: &str) -> Result<Self, UnknownDayTag> {
        s.split(',').map(|part| part.trim().parse::<DayTag>()).collect()
    }

    /// Parses a comma separated tag list, dropping unknown tags.
    pub fn parse_lossy(s: &str) -> Self {
        s.split(',')
            .filter_map(|part| part.trim().parse::<DayTag>().ok())
            .collect()
    }
}

impl FromIterator<DayTag> for DaySet {
    fn from_iter<I: IntoIterator<Item = DayTag>>(iter: I) -> Self {
        let mut set = DaySet::EMPTY;
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(tag.as_str())?;
        }
        Ok(())
    }
}

// Rows coming back from the store were validated on the way in, so any stray
// tag is simply inert.
impl From<String> for DaySet {
    fn from(value: String) -> Self {
        DaySet::parse_lossy(&value)
    }
}

impl From<DaySet> for String {
    fn from(value: DaySet) -> Self {
        value.to_string()
    }
}
