//! Edition records - one released set of cards.
//!
//! An `Edition` is immutable once built. Editions order by release date,
//! ties broken by code, which gives the registry its canonical timeline.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::card_key;
use crate::catalogs::BoosterSlot;
use crate::error::{CardDbError, Result};

/// Editions released on or after this date use the modern card frame
/// unless they say otherwise.
#[must_use]
pub fn modern_frame_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2003, 7, 28).unwrap_or(NaiveDate::MIN)
}

/// Set-type classification of an edition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EditionType {
    Unknown,
    Core,
    Expansion,
    Reprint,
    Starter,
    Boxed,
    Collector,
    Draft,
    Commander,
    Multiplayer,
    Funny,
    Promo,
    Online,
    Other,
}

impl EditionType {
    /// Every type, in declaration order.
    pub const ALL: [EditionType; 14] = [
        EditionType::Unknown,
        EditionType::Core,
        EditionType::Expansion,
        EditionType::Reprint,
        EditionType::Starter,
        EditionType::Boxed,
        EditionType::Collector,
        EditionType::Draft,
        EditionType::Commander,
        EditionType::Multiplayer,
        EditionType::Funny,
        EditionType::Promo,
        EditionType::Online,
        EditionType::Other,
    ];

    /// Core, expansion and reprint sets: the editions a filtered art
    /// preference keeps.
    #[must_use]
    pub const fn is_core_expansion_or_reprint(self) -> bool {
        matches!(
            self,
            EditionType::Core | EditionType::Expansion | EditionType::Reprint
        )
    }
}

/// Border color printed on an edition's cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BorderColor {
    #[default]
    Black,
    White,
    Silver,
    Gold,
}

/// Card rarity within an edition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    BasicLand,
    Common,
    Uncommon,
    Rare,
    MythicRare,
    Special,
    Token,
    Unknown,
}

impl Rarity {
    /// Name used in print sheet and booster slot names.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rarity::BasicLand => "BasicLand",
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::MythicRare => "Mythic",
            Rarity::Special => "Special",
            Rarity::Token => "Token",
            Rarity::Unknown => "Unknown",
        }
    }
}

/// One entry in an edition's card list.
///
/// A card with several art variants appears once per variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInSet {
    pub name: String,
    pub rarity: Rarity,
    #[serde(default)]
    pub collector_number: Option<String>,
}

impl CardInSet {
    pub fn new(name: impl Into<String>, rarity: Rarity) -> Self {
        Self {
            name: name.into(),
            rarity,
            collector_number: None,
        }
    }
}

/// A released set of cards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edition {
    /// Unique set code, e.g. `"M10"`.
    pub code: String,

    /// Display name.
    pub name: String,

    /// Alternative code some card sources use for this set.
    #[serde(default)]
    pub alias: Option<String>,

    pub date: NaiveDate,

    pub set_type: EditionType,

    #[serde(default)]
    pub border: BorderColor,

    /// Modern (true) or old (false) card frame.
    pub modern_frame: bool,

    #[serde(default)]
    pub cards: Vec<CardInSet>,

    /// Booster layout. Empty when the edition has no boosters.
    #[serde(default)]
    pub booster: SmallVec<[BoosterSlot; 4]>,
}

impl Edition {
    /// Code of the placeholder edition for cards with no known printing.
    pub const UNKNOWN_CODE: &'static str = "???";

    /// Create an edition. The frame style defaults from the release date.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        date: NaiveDate,
        set_type: EditionType,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            alias: None,
            date,
            set_type,
            border: BorderColor::Black,
            modern_frame: date >= modern_frame_date(),
            cards: Vec::new(),
            booster: SmallVec::new(),
        }
    }

    /// The placeholder edition, released 1990-01-01.
    #[must_use]
    pub fn unknown() -> Self {
        let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or_default();
        Self::new(Self::UNKNOWN_CODE, "Unknown Edition", date, EditionType::Unknown)
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn with_border(mut self, border: BorderColor) -> Self {
        self.border = border;
        self
    }

    #[must_use]
    pub fn with_modern_frame(mut self, modern: bool) -> Self {
        self.modern_frame = modern;
        self
    }

    /// Add one card entry (one art variant).
    #[must_use]
    pub fn with_card(mut self, name: impl Into<String>, rarity: Rarity) -> Self {
        self.cards.push(CardInSet::new(name, rarity));
        self
    }

    /// Add a booster slot.
    #[must_use]
    pub fn with_booster_slot(mut self, slot: impl Into<String>, count: u32) -> Self {
        self.booster.push(BoosterSlot::new(slot, count));
        self
    }

    /// Whether cards in this edition use the modern frame.
    #[must_use]
    pub fn is_modern(&self) -> bool {
        self.modern_frame
    }

    /// Funny or silver-bordered: cards outside normal tournament legality.
    #[must_use]
    pub fn is_funny(&self) -> bool {
        self.set_type == EditionType::Funny || self.border == BorderColor::Silver
    }

    /// Entries for `name`, in art-variant order.
    pub fn cards_named(&self, name: &str) -> impl Iterator<Item = &CardInSet> + '_ {
        let wanted = card_key(name);
        self.cards.iter().filter(move |c| card_key(&c.name) == wanted)
    }

    /// Number of art variants of `name` in this edition.
    #[must_use]
    pub fn art_count(&self, name: &str) -> usize {
        self.cards_named(name).count()
    }

    /// Position on the timeline.
    #[must_use]
    pub fn timeline_key(&self) -> (NaiveDate, &str) {
        (self.date, self.code.as_str())
    }
}

impl PartialEq for Edition {
    fn eq(&self, other: &Self) -> bool {
        self.timeline_key() == other.timeline_key()
    }
}

impl Eq for Edition {}

impl PartialOrd for Edition {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edition {
    fn cmp(&self, other: &Self) -> Ordering {
        self.timeline_key().cmp(&other.timeline_key())
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| CardDbError::InvalidDate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_frame_defaults_from_date() {
        let old = Edition::new("LEA", "Alpha", date(1993, 8, 5), EditionType::Core);
        let new = Edition::new("M10", "Magic 2010", date(2009, 7, 17), EditionType::Core);
        assert!(!old.is_modern());
        assert!(new.is_modern());

        let forced = Edition::new("TSB", "Timeshifted", date(2006, 10, 6), EditionType::Other)
            .with_modern_frame(false);
        assert!(!forced.is_modern());
    }

    #[test]
    fn test_timeline_order_breaks_ties_by_code() {
        let a = Edition::new("BBB", "B", date(2000, 1, 1), EditionType::Core);
        let b = Edition::new("AAA", "A", date(2000, 1, 1), EditionType::Core);
        let c = Edition::new("CCC", "C", date(1999, 1, 1), EditionType::Core);

        let mut all = vec![a, b, c];
        all.sort();
        let codes: Vec<_> = all.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["CCC", "AAA", "BBB"]);
    }

    #[test]
    fn test_art_count() {
        let ed = Edition::new("TST", "Test", date(2010, 1, 1), EditionType::Expansion)
            .with_card("Forest", Rarity::BasicLand)
            .with_card("Forest", Rarity::BasicLand)
            .with_card("Bolt", Rarity::Common);

        assert_eq!(ed.art_count("forest"), 2);
        assert_eq!(ed.art_count("Bolt"), 1);
        assert_eq!(ed.art_count("Missing"), 0);
    }

    #[test]
    fn test_funny_detection() {
        let unglued = Edition::new("UGL", "Unglued", date(1998, 8, 11), EditionType::Funny);
        let silver = Edition::new("PSB", "Promo", date(2001, 1, 1), EditionType::Promo)
            .with_border(BorderColor::Silver);
        let normal = Edition::new("ICE", "Ice Age", date(1995, 6, 3), EditionType::Expansion);

        assert!(unglued.is_funny());
        assert!(silver.is_funny());
        assert!(!normal.is_funny());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2020-01-01").unwrap(), date(2020, 1, 1));
        assert!(matches!(parse_date("01/01/2020"), Err(CardDbError::InvalidDate(_))));
    }

    #[test]
    fn test_edition_serialization() {
        let ed = Edition::new("NEW", "New", date(2020, 1, 1), EditionType::Expansion)
            .with_card("X", Rarity::Rare)
            .with_booster_slot("Rare", 1);

        let json = serde_json::to_string(&ed).unwrap();
        let back: Edition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ed);
        assert_eq!(back.cards.len(), 1);
        assert_eq!(back.booster.len(), 1);
    }
}
