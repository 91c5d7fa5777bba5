//! Paper cards - concrete printings.
//!
//! A `PaperCard` is one (name, edition, art variant, foil) printing. Foil
//! and non-foil printings are the same stored entry; `foiled()` and
//! `unfoiled()` map between them.
//!
//! `CardRequest` is the textual form used by deck files and card pools:
//! `Name|SET|art`, with a trailing `+` on the name for foil.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::rules::card_key;
use crate::editions::Rarity;

/// Art indices start here for every (name, edition) pair.
pub const ART_INDEX_BASE: u32 = 1;

/// Marks a foil printing in request strings.
pub const FOIL_SUFFIX: char = '+';

/// Separator between request fields.
pub const REQUEST_SEPARATOR: char = '|';

/// One concrete printing of a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaperCard {
    pub name: String,

    /// Edition code.
    pub edition: String,

    /// 1-based art variant within the edition.
    pub art_index: u32,

    pub rarity: Rarity,

    #[serde(default)]
    pub foil: bool,
}

impl PaperCard {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        edition: impl Into<String>,
        art_index: u32,
        rarity: Rarity,
    ) -> Self {
        Self {
            name: name.into(),
            edition: edition.into(),
            art_index,
            rarity,
            foil: false,
        }
    }

    /// Whether this is the foil version.
    #[must_use]
    pub fn is_foil(&self) -> bool {
        self.foil
    }

    /// The foil version of this printing.
    #[must_use]
    pub fn foiled(&self) -> Self {
        self.with_foil(true)
    }

    /// The non-foil version of this printing.
    #[must_use]
    pub fn unfoiled(&self) -> Self {
        self.with_foil(false)
    }

    /// This printing with the foil flag set to `foil`.
    #[must_use]
    pub fn with_foil(&self, foil: bool) -> Self {
        Self {
            foil,
            ..self.clone()
        }
    }

    /// Whether this printing is (name, edition, art) regardless of foil.
    #[must_use]
    pub fn is_printing(&self, name: &str, edition: &str, art_index: u32) -> bool {
        self.art_index == art_index
            && card_key(&self.name) == card_key(name)
            && self.edition.eq_ignore_ascii_case(edition)
    }
}

impl fmt::Display for PaperCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.foil {
            write!(f, "{FOIL_SUFFIX}")?;
        }
        write!(
            f,
            "{REQUEST_SEPARATOR}{}{REQUEST_SEPARATOR}{}",
            self.edition, self.art_index
        )
    }
}

/// A parsed card request string.
///
/// ## Example
///
/// ```
/// use ccg_card_db::cards::CardRequest;
///
/// let req = CardRequest::parse("Lightning Bolt+|M10|2");
/// assert_eq!(req.name, "Lightning Bolt");
/// assert_eq!(req.edition.as_deref(), Some("M10"));
/// assert_eq!(req.art_index, Some(2));
/// assert!(req.foil);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardRequest {
    pub name: String,
    pub edition: Option<String>,
    pub art_index: Option<u32>,
    pub foil: bool,
}

impl CardRequest {
    /// Parse `Name[+][|SET[|art]]`. Unparseable art indices are ignored.
    #[must_use]
    pub fn parse(request: &str) -> Self {
        let mut parts = request.split(REQUEST_SEPARATOR).map(str::trim);

        let raw_name = parts.next().unwrap_or_default();
        let (name, foil) = match raw_name.strip_suffix(FOIL_SUFFIX) {
            Some(stripped) => (stripped.trim_end(), true),
            None => (raw_name, false),
        };

        let edition = parts
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let art_index = parts.next().and_then(|s| s.parse().ok());

        Self {
            name: name.to_string(),
            edition,
            art_index,
            foil,
        }
    }
}

impl From<&PaperCard> for CardRequest {
    fn from(card: &PaperCard) -> Self {
        Self {
            name: card.name.clone(),
            edition: Some(card.edition.clone()),
            art_index: Some(card.art_index),
            foil: card.foil,
        }
    }
}
