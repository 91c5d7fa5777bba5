//! Card art preference policy.
//!
//! A policy is two orthogonal choices: which end of the edition timeline
//! wins (`ArtDirection`) and which editions are eligible at all
//! (`EditionScope`). The four classic named policies are constants.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::editions::Edition;
use crate::error::CardDbError;

/// Which end of the timeline a search prefers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtDirection {
    /// Most recently released edition first.
    LatestFirst,
    /// Earliest released edition first.
    OriginalFirst,
}

impl ArtDirection {
    #[must_use]
    pub const fn from_latest(latest_first: bool) -> Self {
        if latest_first {
            ArtDirection::LatestFirst
        } else {
            ArtDirection::OriginalFirst
        }
    }

    #[must_use]
    pub const fn is_latest(self) -> bool {
        matches!(self, ArtDirection::LatestFirst)
    }

    /// The other direction.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            ArtDirection::LatestFirst => ArtDirection::OriginalFirst,
            ArtDirection::OriginalFirst => ArtDirection::LatestFirst,
        }
    }
}

/// Which editions a search may pick from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditionScope {
    AllEditions,
    /// Core, expansion and reprint sets only.
    CoreExpansionReprint,
}

impl EditionScope {
    #[must_use]
    pub const fn from_filter(filter_sets: bool) -> Self {
        if filter_sets {
            EditionScope::CoreExpansionReprint
        } else {
            EditionScope::AllEditions
        }
    }

    #[must_use]
    pub const fn is_filtered(self) -> bool {
        matches!(self, EditionScope::CoreExpansionReprint)
    }
}

/// Art preference policy: direction x scope.
///
/// ## Example
///
/// ```
/// use ccg_card_db::cards::{ArtDirection, CardArtPreference};
///
/// let pref: CardArtPreference = "Original Art Core Expansions Reprint Only".parse().unwrap();
/// assert_eq!(pref, CardArtPreference::ORIGINAL_ART_CORE_EXPANSIONS_REPRINT_ONLY);
/// assert_eq!(pref.opposite().direction, ArtDirection::LatestFirst);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardArtPreference {
    pub direction: ArtDirection,
    pub scope: EditionScope,
}

impl CardArtPreference {
    pub const LATEST_ART_ALL_EDITIONS: Self =
        Self::new(ArtDirection::LatestFirst, EditionScope::AllEditions);
    pub const LATEST_ART_CORE_EXPANSIONS_REPRINT_ONLY: Self =
        Self::new(ArtDirection::LatestFirst, EditionScope::CoreExpansionReprint);
    pub const ORIGINAL_ART_ALL_EDITIONS: Self =
        Self::new(ArtDirection::OriginalFirst, EditionScope::AllEditions);
    pub const ORIGINAL_ART_CORE_EXPANSIONS_REPRINT_ONLY: Self =
        Self::new(ArtDirection::OriginalFirst, EditionScope::CoreExpansionReprint);

    /// Every named policy.
    pub const ALL: [Self; 4] = [
        Self::LATEST_ART_ALL_EDITIONS,
        Self::LATEST_ART_CORE_EXPANSIONS_REPRINT_ONLY,
        Self::ORIGINAL_ART_ALL_EDITIONS,
        Self::ORIGINAL_ART_CORE_EXPANSIONS_REPRINT_ONLY,
    ];

    #[must_use]
    pub const fn new(direction: ArtDirection, scope: EditionScope) -> Self {
        Self { direction, scope }
    }

    /// Build from the two legacy flags: latest-first and core/expansion/reprint only.
    #[must_use]
    pub const fn from_flags(latest_first: bool, filter_sets: bool) -> Self {
        Self::new(
            ArtDirection::from_latest(latest_first),
            EditionScope::from_filter(filter_sets),
        )
    }

    /// Whether newer editions rank first.
    #[must_use]
    pub const fn latest_first(self) -> bool {
        self.direction.is_latest()
    }

    /// Whether the scope is limited to core, expansion and reprint sets.
    #[must_use]
    pub const fn filter_sets(self) -> bool {
        self.scope.is_filtered()
    }

    /// Same scope, other end of the timeline.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::new(self.direction.reversed(), self.scope)
    }

    /// Same direction, different scope.
    #[must_use]
    pub const fn with_scope(self, scope: EditionScope) -> Self {
        Self::new(self.direction, scope)
    }

    /// Whether an edition is eligible under this policy's scope.
    #[must_use]
    pub fn accepts(self, edition: &Edition) -> bool {
        !self.filter_sets() || edition.set_type.is_core_expansion_or_reprint()
    }

    /// Order two editions so the preferred one sorts first.
    #[must_use]
    pub fn rank(self, a: &Edition, b: &Edition) -> Ordering {
        match self.direction {
            ArtDirection::LatestFirst => b.cmp(a),
            ArtDirection::OriginalFirst => a.cmp(b),
        }
    }

    /// Constant-style name, e.g. `LATEST_ART_ALL_EDITIONS`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match (self.direction, self.scope) {
            (ArtDirection::LatestFirst, EditionScope::AllEditions) => "LATEST_ART_ALL_EDITIONS",
            (ArtDirection::LatestFirst, EditionScope::CoreExpansionReprint) => {
                "LATEST_ART_CORE_EXPANSIONS_REPRINT_ONLY"
            }
            (ArtDirection::OriginalFirst, EditionScope::AllEditions) => {
                "ORIGINAL_ART_ALL_EDITIONS"
            }
            (ArtDirection::OriginalFirst, EditionScope::CoreExpansionReprint) => {
                "ORIGINAL_ART_CORE_EXPANSIONS_REPRINT_ONLY"
            }
        }
    }

    /// Human-readable label, e.g. `Latest Art All Editions`.
    #[must_use]
    pub fn label(self) -> String {
        self.name()
            .split('_')
            .map(|word| {
                let lower = word.to_ascii_lowercase();
                let mut chars = lower.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for CardArtPreference {
    fn default() -> Self {
        Self::LATEST_ART_ALL_EDITIONS
    }
}

impl fmt::Display for CardArtPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CardArtPreference {
    type Err = CardDbError;

    /// Accepts either the constant-style name or the label, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(' ', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| CardDbError::UnknownArtPreference(s.to_string()))
    }
}

impl TryFrom<String> for CardArtPreference {
    type Error = CardDbError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CardArtPreference> for String {
    fn from(value: CardArtPreference) -> Self {
        value.name().to_string()
    }
}
