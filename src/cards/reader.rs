//! Card storage readers.
//!
//! The database never reads card files itself. A `CardStorageReader` hands
//! over parsed `CardRules`, in bulk at construction and one at a time for
//! on-demand loads.

use rustc_hash::FxHashMap;

use super::rules::{card_key, CardRules};
use crate::error::Result;

/// Source of card rules.
pub trait CardStorageReader: Send + Sync {
    /// Load every card. `None` entries mark records the reader could not
    /// parse; they are skipped.
    fn load_cards(&self) -> Result<Vec<Option<CardRules>>>;

    /// Load a single card by name, if the reader can supply it.
    fn attempt_to_load_card(&self, name: &str) -> Option<CardRules>;
}

/// Reader backed by rules already in memory.
///
/// Cards added with `with_on_demand` are not returned by `load_cards`, only
/// by `attempt_to_load_card`, which models a card file that appears after
/// startup.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCardReader {
    bulk: Vec<Option<CardRules>>,
    on_demand: FxHashMap<String, CardRules>,
}

impl InMemoryCardReader {
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = CardRules>) -> Self {
        Self {
            bulk: cards.into_iter().map(Some).collect(),
            on_demand: FxHashMap::default(),
        }
    }

    /// Add a card to the bulk load.
    #[must_use]
    pub fn with_card(mut self, rules: CardRules) -> Self {
        self.bulk.push(Some(rules));
        self
    }

    /// Add an unparseable record to the bulk load.
    #[must_use]
    pub fn with_broken_record(mut self) -> Self {
        self.bulk.push(None);
        self
    }

    /// Add a card only reachable through `attempt_to_load_card`.
    #[must_use]
    pub fn with_on_demand(mut self, rules: CardRules) -> Self {
        self.on_demand.insert(card_key(&rules.name), rules);
        self
    }
}

impl CardStorageReader for InMemoryCardReader {
    fn load_cards(&self) -> Result<Vec<Option<CardRules>>> {
        Ok(self.bulk.clone())
    }

    fn attempt_to_load_card(&self, name: &str) -> Option<CardRules> {
        let key = card_key(name);
        self.bulk
            .iter()
            .flatten()
            .find(|r| card_key(&r.name) == key)
            .or_else(|| self.on_demand.get(&key))
            .cloned()
    }
}
