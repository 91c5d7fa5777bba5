//! Format legality predicates.
//!
//! The database does not decide legality. Hosts install one predicate per
//! format and consumers read them back.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::PaperCard;

/// Shared card predicate.
pub type CardPredicate = Arc<dyn Fn(&PaperCard) -> bool + Send + Sync>;

/// Formats with an installable legality predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameFormat {
    Standard,
    Pioneer,
    Modern,
    Commander,
    Oathbreaker,
    Brawl,
}

impl GameFormat {
    pub const ALL: [GameFormat; 6] = [
        GameFormat::Standard,
        GameFormat::Pioneer,
        GameFormat::Modern,
        GameFormat::Commander,
        GameFormat::Oathbreaker,
        GameFormat::Brawl,
    ];
}

/// Installed predicates, at most one per format.
#[derive(Clone, Default)]
pub struct FormatPredicates {
    predicates: FxHashMap<GameFormat, CardPredicate>,
}

impl FormatPredicates {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install or replace a format's predicate.
    pub fn set(&mut self, format: GameFormat, predicate: CardPredicate) {
        self.predicates.insert(format, predicate);
    }

    /// Remove the predicate for `format`.
    pub fn clear(&mut self, format: GameFormat) {
        self.predicates.remove(&format);
    }

    /// Predicate installed for `format`, if any.
    #[must_use]
    pub fn get(&self, format: GameFormat) -> Option<CardPredicate> {
        self.predicates.get(&format).cloned()
    }

    /// `None` when no predicate is installed for the format.
    #[must_use]
    pub fn is_legal(&self, format: GameFormat, card: &PaperCard) -> Option<bool> {
        self.predicates.get(&format).map(|p| p(card))
    }
}

impl fmt::Debug for FormatPredicates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut installed: Vec<_> = self.predicates.keys().copied().collect();
        installed.sort();
        f.debug_struct("FormatPredicates")
            .field("installed", &installed)
            .finish()
    }
}
