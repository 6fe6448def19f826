//! Parser options
//!
//! Options deserialize from partial JSON objects: every missing key takes its
//! default, so `{"mode": "strict", "word": "da"}` is a complete configuration.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// How closely lemmas must match the searched word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchingMode {
    /// Keep every lemma the page lists
    #[default]
    Lax,
    /// Keep only lemmas identical to the target word
    Strict,
}

/// What to do when an entry's markup breaks a structural assumption
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Fail the whole parse on the first malformed entry
    #[default]
    Abort,
    /// Log and drop the malformed entry, keep the rest
    Skip,
}

/// Bit flags sent to dexonline with every lookup.
///
/// The parser never interprets them; they only change what the site returns.
/// Bit 64 ("always show advanced search") only affects the site's UI, and bits
/// 16, 32 and 128 are no longer used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DictionaryFlags(u8);

impl DictionaryFlags {
    pub const NONE: Self = Self(0);
    /// Spell 'ș' and 'ț' with cedillas ('ş', 'ţ')
    pub const USE_CEDILLAS: Self = Self(1);
    /// Don't return words that differ only by diacritics ('ca' without 'că')
    pub const MATCH_DIACRITICS: Self = Self(2);
    /// Orthography from before the 1993 reform (sînt, cînd, rîu)
    pub const USE_PRE_REFORM_ORTHOGRAPHY: Self = Self(4);
    /// Only the latest normative DEX and DOOM editions
    pub const SEARCH_ONLY_NORMATIVE_DICTIONARIES: Self = Self(8);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for DictionaryFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for DictionaryFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for DictionaryFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Options for parsing a definition page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserOptions {
    pub mode: MatchingMode,
    /// Word that lemmas are compared against in strict mode
    pub word: String,
    /// Drop rows whose sources are all copyrighted dictionaries
    pub exclude_copyrighted: bool,
    pub flags: DictionaryFlags,
    pub on_malformed: MalformedPolicy,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            mode: MatchingMode::Lax,
            word: String::new(),
            exclude_copyrighted: true,
            flags: DictionaryFlags::NONE,
            on_malformed: MalformedPolicy::Abort,
        }
    }
}

impl ParserOptions {
    /// Strict matching against `word`
    pub fn strict(word: impl Into<String>) -> Self {
        Self {
            mode: MatchingMode::Strict,
            word: word.into(),
            ..Self::default()
        }
    }

    /// Whether a lemma passes the matching mode
    pub fn accepts(&self, lemma: &str) -> bool {
        match self.mode {
            MatchingMode::Lax => true,
            MatchingMode::Strict => lemma == self.word,
        }
    }
}
