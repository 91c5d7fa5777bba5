//! Card index - every printing of every card, keyed by name.
//!
//! `CardDb` is built once from a set of `CardRules` and an edition
//! registry: each edition's card list yields one `PaperCard` per art
//! variant of each card the index has rules for. After construction the
//! index is read-mostly; `load_card` is the only write path.
//!
//! ## Concurrency
//!
//! The printings live behind a single `RwLock`. Lookups take the read lock
//! briefly; `load_card` takes the write lock for the whole check-and-insert
//! so concurrent loads never duplicate a printing. The maps are `im`
//! persistent maps, so `snapshot()` hands out an O(1) copy that can be
//! iterated without holding the lock.
//!
//! ## Filtered names
//!
//! Names in the filtered set keep their printings in storage but are
//! invisible to every lookup.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, warn};

use super::paper::{CardRequest, PaperCard, ART_INDEX_BASE};
use super::preference::{CardArtPreference, EditionScope};
use super::rules::{card_key as key, CardRules};
use crate::editions::{Edition, EditionRegistry, Rarity};

/// Release-date restriction applied before ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DateBound {
    Any,
    /// Strictly after the date.
    After(NaiveDate),
    /// Strictly before the date.
    Before(NaiveDate),
}

impl DateBound {
    fn admits(self, date: NaiveDate) -> bool {
        match self {
            DateBound::Any => true,
            DateBound::After(pivot) => date > pivot,
            DateBound::Before(pivot) => date < pivot,
        }
    }
}

#[derive(Clone, Debug, Default)]
struct CardIndex {
    printings: im::HashMap<String, im::Vector<PaperCard>>,
    rules: im::HashMap<String, Arc<CardRules>>,
}

impl CardIndex {
    /// Insert a printing unless the same (name, edition, art) is present.
    fn insert(&mut self, card: PaperCard) -> bool {
        let entry = self.printings.entry(key(&card.name)).or_insert_with(im::Vector::new);
        if entry
            .iter()
            .any(|c| c.is_printing(&card.name, &card.edition, card.art_index))
        {
            return false;
        }
        entry.push_back(card);
        true
    }
}

/// A point-in-time copy of a `CardDb`'s contents.
#[derive(Clone, Debug)]
pub struct CardDbSnapshot {
    index: CardIndex,
    filtered: Arc<FxHashSet<String>>,
}

impl CardDbSnapshot {
    /// Every visible printing.
    pub fn iter(&self) -> impl Iterator<Item = &PaperCard> {
        self.index
            .printings
            .iter()
            .filter(|(name, _)| !self.filtered.contains(*name))
            .flat_map(|(_, cards)| cards.iter())
    }

    /// Visible printings of one card.
    #[must_use]
    pub fn cards_named(&self, name: &str) -> Vec<PaperCard> {
        let name = key(name);
        if self.filtered.contains(&name) {
            return Vec::new();
        }
        self.index
            .printings
            .get(&name)
            .map(|cards| cards.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of visible printings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Index of paper cards by name.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use ccg_card_db::cards::{CardArtPreference, CardDb, CardRules};
/// use ccg_card_db::editions::{Edition, EditionRegistry, EditionType, Rarity};
/// use chrono::NaiveDate;
///
/// let editions = Arc::new(EditionRegistry::new(vec![
///     Edition::new("OLD", "Old", NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), EditionType::Core)
///         .with_card("X", Rarity::Common),
///     Edition::new("NEW", "New", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), EditionType::Expansion)
///         .with_card("X", Rarity::Rare),
/// ]));
///
/// let db = CardDb::new(editions, CardArtPreference::LATEST_ART_ALL_EDITIONS);
/// db.initialize([CardRules::new("X")]);
///
/// assert_eq!(db.get_card("x").unwrap().edition, "NEW");
/// assert_eq!(db.get_card_from_edition("X", "OLD").unwrap().art_index, 1);
/// ```
#[derive(Debug)]
pub struct CardDb {
    editions: Arc<EditionRegistry>,
    index: RwLock<CardIndex>,
    filtered: Arc<FxHashSet<String>>,
    preference: RwLock<CardArtPreference>,
    enable_unknown_cards: bool,
}

impl CardDb {
    /// Create an empty index over an edition registry.
    #[must_use]
    pub fn new(editions: Arc<EditionRegistry>, preference: CardArtPreference) -> Self {
        Self {
            editions,
            index: RwLock::new(CardIndex::default()),
            filtered: Arc::new(FxHashSet::default()),
            preference: RwLock::new(preference),
            enable_unknown_cards: false,
        }
    }

    /// Hide these names from lookups (builder pattern).
    #[must_use]
    pub fn with_filtered<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filtered = Arc::new(names.into_iter().map(|n| key(n.as_ref())).collect());
        self
    }

    /// Give cards without any printing a placeholder printing in the
    /// unknown edition (builder pattern).
    #[must_use]
    pub fn with_unknown_cards(mut self, enabled: bool) -> Self {
        self.enable_unknown_cards = enabled;
        self
    }

    /// Bulk-load rules and build their printings.
    ///
    /// Rules whose name is already present are replaced; existing
    /// printings are kept. Returns the number of printings added.
    pub fn initialize(&self, rules: impl IntoIterator<Item = CardRules>) -> usize {
        let mut index = self.index.write();

        let mut pending: FxHashMap<String, Arc<CardRules>> = FxHashMap::default();
        for rule in rules {
            let rule = Arc::new(rule);
            let name = key(&rule.name);
            index.rules.insert(name.clone(), Arc::clone(&rule));
            pending.insert(name, rule);
        }

        let mut added = 0;
        for edition in self.editions.iter() {
            let mut next_art: FxHashMap<&str, u32> = FxHashMap::default();
            for entry in &edition.cards {
                let Some(rule) = pending.get(&key(&entry.name)) else {
                    continue;
                };
                let art = next_art.entry(rule.name.as_str()).or_insert(ART_INDEX_BASE);
                let card = PaperCard::new(rule.name.clone(), edition.code.clone(), *art, entry.rarity);
                *art += 1;
                if index.insert(card) {
                    added += 1;
                }
            }
        }

        for (name, rule) in &pending {
            if index.printings.get(name).map_or(false, |c| !c.is_empty()) {
                continue;
            }
            if self.enable_unknown_cards {
                index.insert(self.unknown_printing(rule));
                added += 1;
            } else {
                warn!(card = %rule.name, "card has no printing in any edition, skipping");
            }
        }

        added
    }

    fn unknown_printing(&self, rule: &CardRules) -> PaperCard {
        PaperCard::new(
            rule.name.clone(),
            self.editions.unknown().code.clone(),
            ART_INDEX_BASE,
            Rarity::Unknown,
        )
    }

    /// Insert a newly resolved card and all of its printings.
    ///
    /// `edition` names the printing the caller is after; it only matters
    /// when the registry lists no printing at all, in which case a
    /// placeholder is added if unknown cards are enabled. Printings already
    /// present are left alone. Returns the number of printings added.
    pub fn load_card(&self, name: &str, edition: Option<&str>, rules: CardRules) -> usize {
        let mut index = self.index.write();
        let rule = Arc::new(rules);
        if key(name) != key(&rule.name) {
            debug!(requested = %name, card = %rule.name, "loading card under its rules name");
        }
        index.rules.insert(key(&rule.name), Arc::clone(&rule));

        let mut added = 0;
        for ed in self.editions.iter() {
            for (offset, entry) in ed.cards_named(&rule.name).enumerate() {
                let art = ART_INDEX_BASE + offset as u32;
                let card = PaperCard::new(rule.name.clone(), ed.code.clone(), art, entry.rarity);
                if index.insert(card) {
                    added += 1;
                }
            }
        }

        let has_printings = index
            .printings
            .get(&key(&rule.name))
            .map_or(false, |c| !c.is_empty());
        if !has_printings && self.enable_unknown_cards {
            if index.insert(self.unknown_printing(&rule)) {
                added += 1;
            }
        }

        debug!(card = %rule.name, edition = ?edition, added, "loaded card on demand");
        added
    }

    /// The edition registry this index was built from.
    #[must_use]
    pub fn editions(&self) -> &Arc<EditionRegistry> {
        &self.editions
    }

    /// Preference used by `get_card`.
    #[must_use]
    pub fn art_preference(&self) -> CardArtPreference {
        *self.preference.read()
    }

    /// Replace the preference used by `get_card`.
    pub fn set_art_preference(&self, preference: CardArtPreference) {
        *self.preference.write() = preference;
    }

    /// Whether `name` is hidden from lookups.
    #[must_use]
    pub fn is_filtered(&self, name: &str) -> bool {
        self.filtered.contains(&key(name))
    }

    /// Names hidden from lookups, sorted.
    #[must_use]
    pub fn filtered_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.filtered.iter().cloned().collect();
        names.sort();
        names
    }

    /// Whether a visible card with this name has at least one printing.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        !self.visible_printings(name).is_empty()
    }

    /// Rules record for a card name, visible or not.
    #[must_use]
    pub fn rules(&self, name: &str) -> Option<Arc<CardRules>> {
        self.index.read().rules.get(&key(name)).cloned()
    }

    /// Rules record behind a printing.
    #[must_use]
    pub fn matching_rules(&self, card: &PaperCard) -> Option<Arc<CardRules>> {
        self.rules(&card.name)
    }

    fn visible_printings(&self, name: &str) -> Vec<PaperCard> {
        let name = key(name);
        if self.filtered.contains(&name) {
            return Vec::new();
        }
        self.index
            .read()
            .printings
            .get(&name)
            .map(|cards| cards.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn edition_of(&self, card: &PaperCard) -> Option<&Edition> {
        self.editions.get(&card.edition)
    }

    fn same_edition(&self, card: &PaperCard, code: &str) -> bool {
        if card.edition.eq_ignore_ascii_case(code) {
            return true;
        }
        // Resolve aliases through the registry.
        match (self.editions.get(code), self.edition_of(card)) {
            (Some(wanted), Some(actual)) => wanted.code == actual.code,
            _ => false,
        }
    }

    /// Pick the best printing among `candidates` under `preference`.
    ///
    /// Ranked by edition timeline in the preference's direction (release
    /// date, then code), then lowest art index.
    fn best_of(
        &self,
        candidates: impl IntoIterator<Item = PaperCard>,
        preference: CardArtPreference,
        bound: DateBound,
    ) -> Option<PaperCard> {
        candidates
            .into_iter()
            .filter_map(|card| {
                let edition = self.edition_of(&card)?;
                (bound.admits(edition.date) && preference.accepts(edition)).then_some((card, edition))
            })
            .min_by(|(a, ea), (b, eb)| {
                preference
                    .rank(ea, eb)
                    .then_with(|| a.art_index.cmp(&b.art_index))
            })
            .map(|(card, _)| card)
    }

    /// Any printing of `name`, chosen by the current art preference.
    ///
    /// Falls back to ignoring the preference's edition scope when no
    /// printing passes it.
    #[must_use]
    pub fn get_card(&self, name: &str) -> Option<PaperCard> {
        self.get_card_with_preference(name, self.art_preference())
    }

    /// Any printing of `name`, chosen by `preference`.
    #[must_use]
    pub fn get_card_with_preference(
        &self,
        name: &str,
        preference: CardArtPreference,
    ) -> Option<PaperCard> {
        let printings = self.visible_printings(name);
        self.best_of(printings.iter().cloned(), preference, DateBound::Any)
            .or_else(|| {
                let unscoped = preference.with_scope(EditionScope::AllEditions);
                self.best_of(printings, unscoped, DateBound::Any)
            })
    }

    /// The lowest art index printing of `name` in `edition`.
    #[must_use]
    pub fn get_card_from_edition(&self, name: &str, edition: &str) -> Option<PaperCard> {
        self.visible_printings(name)
            .into_iter()
            .filter(|c| self.same_edition(c, edition))
            .min_by_key(|c| c.art_index)
    }

    /// The exact printing (name, edition, art index).
    #[must_use]
    pub fn get_card_with_art(&self, name: &str, edition: &str, art_index: u32) -> Option<PaperCard> {
        self.visible_printings(name)
            .into_iter()
            .find(|c| c.art_index == art_index && self.same_edition(c, edition))
    }

    /// Resolve a request string's fields. Foil is applied to the result.
    #[must_use]
    pub fn get_card_from_request(&self, request: &CardRequest) -> Option<PaperCard> {
        let card = match (&request.edition, request.art_index) {
            (Some(edition), Some(art)) => self
                .get_card_with_art(&request.name, edition, art)
                .or_else(|| self.get_card_from_edition(&request.name, edition)),
            (Some(edition), None) => self.get_card_from_edition(&request.name, edition),
            (None, _) => self.get_card(&request.name),
        }?;
        Some(card.with_foil(request.foil))
    }

    fn dated_candidates(&self, name: &str, art_index: Option<u32>) -> Vec<PaperCard> {
        let mut printings = self.visible_printings(name);
        if let Some(art) = art_index {
            printings.retain(|c| c.art_index == art);
        }
        printings
    }

    /// Best printing from an edition released strictly after `date`.
    ///
    /// With `art_index`, only that art variant is considered; callers that
    /// want a fallback retry with `None`.
    #[must_use]
    pub fn get_card_from_editions_released_after(
        &self,
        name: &str,
        preference: CardArtPreference,
        art_index: Option<u32>,
        date: NaiveDate,
    ) -> Option<PaperCard> {
        let candidates = self.dated_candidates(name, art_index);
        self.best_of(candidates, preference, DateBound::After(date))
    }

    /// Best printing from an edition released strictly before `date`.
    #[must_use]
    pub fn get_card_from_editions_released_before(
        &self,
        name: &str,
        preference: CardArtPreference,
        art_index: Option<u32>,
        date: NaiveDate,
    ) -> Option<PaperCard> {
        let candidates = self.dated_candidates(name, art_index);
        self.best_of(candidates, preference, DateBound::Before(date))
    }

    /// Number of art variants of `name` in `edition`; 0 if absent.
    #[must_use]
    pub fn get_art_count(&self, name: &str, edition: &str) -> usize {
        let index = self.index.read();
        let Some(cards) = index.printings.get(&key(name)) else {
            return 0;
        };
        let arts: FxHashSet<u32> = cards
            .iter()
            .filter(|c| self.same_edition(c, edition))
            .map(|c| c.art_index)
            .collect();
        arts.len()
    }

    /// Every visible printing of `name`, oldest edition first.
    #[must_use]
    pub fn all_cards_named(&self, name: &str) -> Vec<PaperCard> {
        let mut cards = self.visible_printings(name);
        cards.sort_by(|a, b| self.timeline_cmp(a, b));
        cards
    }

    fn timeline_cmp(&self, a: &PaperCard, b: &PaperCard) -> Ordering {
        match (self.edition_of(a), self.edition_of(b)) {
            (Some(ea), Some(eb)) => ea.cmp(eb),
            _ => a.edition.cmp(&b.edition),
        }
        .then_with(|| a.art_index.cmp(&b.art_index))
    }

    /// Every visible printing.
    #[must_use]
    pub fn all_cards(&self) -> Vec<PaperCard> {
        self.snapshot().iter().cloned().collect()
    }

    /// Visible card names, sorted case-insensitively.
    #[must_use]
    pub fn unique_card_names(&self) -> Vec<String> {
        let index = self.index.read();
        let mut names: Vec<String> = index
            .printings
            .iter()
            .filter(|(k, cards)| !self.filtered.contains(*k) && !cards.is_empty())
            .filter_map(|(_, cards)| cards.front().map(|c| c.name.clone()))
            .collect();
        names.sort_by_key(|n| n.to_lowercase());
        names
    }

    /// O(1) copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> CardDbSnapshot {
        CardDbSnapshot {
            index: self.index.read().clone(),
            filtered: Arc::clone(&self.filtered),
        }
    }

    /// Number of stored printings, filtered names included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.read().printings.values().map(|c| c.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editions::EditionType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn registry() -> Arc<EditionRegistry> {
        Arc::new(EditionRegistry::new(vec![
            Edition::new("OLD", "Old", date(2000, 1, 1), EditionType::Core)
                .with_card("X", Rarity::Common)
                .with_card("Forest", Rarity::BasicLand)
                .with_card("Forest", Rarity::BasicLand),
            Edition::new("PRM", "Promo", date(2005, 1, 1), EditionType::Promo)
                .with_card("X", Rarity::Special),
            Edition::new("NEW", "New", date(2020, 1, 1), EditionType::Expansion)
                .with_alias("NW")
                .with_card("X", Rarity::Rare)
                .with_card("Forest", Rarity::BasicLand),
        ]))
    }

    fn db() -> CardDb {
        let db = CardDb::new(registry(), CardArtPreference::LATEST_ART_ALL_EDITIONS);
        db.initialize([CardRules::new("X"), CardRules::new("Forest").basic_land()]);
        db
    }

    #[test]
    fn test_initialize_builds_dense_art_indices() {
        let db = db();
        assert_eq!(db.get_art_count("Forest", "OLD"), 2);
        assert_eq!(db.get_art_count("Forest", "NEW"), 1);
        assert_eq!(db.get_art_count("Forest", "PRM"), 0);
        assert!(db.get_card_with_art("Forest", "OLD", 1).is_some());
        assert!(db.get_card_with_art("Forest", "OLD", 2).is_some());
        assert!(db.get_card_with_art("Forest", "OLD", 3).is_none());
        assert_eq!(db.len(), 6);
    }

    #[test]
    fn test_get_card_follows_preference() {
        let db = db();
        assert_eq!(db.get_card("X").unwrap().edition, "NEW");

        db.set_art_preference(CardArtPreference::ORIGINAL_ART_ALL_EDITIONS);
        assert_eq!(db.get_card("X").unwrap().edition, "OLD");
    }

    #[test]
    fn test_get_card_scope_falls_back_when_everything_filtered() {
        let editions = Arc::new(EditionRegistry::new(vec![Edition::new(
            "PRM",
            "Promo",
            date(2005, 1, 1),
            EditionType::Promo,
        )
        .with_card("P", Rarity::Special)]));
        let db = CardDb::new(editions, CardArtPreference::LATEST_ART_CORE_EXPANSIONS_REPRINT_ONLY);
        db.initialize([CardRules::new("P")]);

        assert_eq!(db.get_card("P").unwrap().edition, "PRM");
    }

    #[test]
    fn test_exact_lookups() {
        let db = db();
        let card = db.get_card_with_art("x", "new", 1).unwrap();
        assert_eq!(card.name, "X");
        assert_eq!(card.edition, "NEW");
        assert_eq!(card.rarity, Rarity::Rare);

        assert!(db.get_card_from_edition("X", "NW").is_some());
        assert!(db.get_card_from_edition("X", "ZZZ").is_none());
        assert!(db.get_card("Unknown").is_none());
    }

    #[test]
    fn test_edition_lookup_without_art_prefers_lowest_art() {
        let db = db();
        assert_eq!(db.get_card_from_edition("Forest", "OLD").unwrap().art_index, 1);
    }

    #[test]
    fn test_released_after_and_before() {
        let db = db();
        let pivot = date(2003, 1, 1);

        let after = db
            .get_card_from_editions_released_after("X", CardArtPreference::ORIGINAL_ART_ALL_EDITIONS, None, pivot)
            .unwrap();
        assert_eq!(after.edition, "PRM");

        let after_filtered = db
            .get_card_from_editions_released_after(
                "X",
                CardArtPreference::ORIGINAL_ART_CORE_EXPANSIONS_REPRINT_ONLY,
                None,
                pivot,
            )
            .unwrap();
        assert_eq!(after_filtered.edition, "NEW");

        let before = db
            .get_card_from_editions_released_before("X", CardArtPreference::LATEST_ART_ALL_EDITIONS, None, pivot)
            .unwrap();
        assert_eq!(before.edition, "OLD");

        assert!(db
            .get_card_from_editions_released_before("X", CardArtPreference::LATEST_ART_ALL_EDITIONS, None, date(2000, 1, 1))
            .is_none());
    }

    #[test]
    fn test_date_bound_with_art_index() {
        let db = db();
        let pivot = date(1999, 1, 1);
        let pref = CardArtPreference::ORIGINAL_ART_ALL_EDITIONS;

        let second = db
            .get_card_from_editions_released_after("Forest", pref, Some(2), pivot)
            .unwrap();
        assert_eq!((second.edition.as_str(), second.art_index), ("OLD", 2));

        assert!(db
            .get_card_from_editions_released_after("Forest", pref, Some(2), date(2001, 1, 1))
            .is_none());
    }

    #[test]
    fn test_same_date_ties_break_on_code() {
        let editions = Arc::new(EditionRegistry::new(vec![
            Edition::new("BBB", "B", date(2010, 1, 1), EditionType::Core).with_card("T", Rarity::Common),
            Edition::new("AAA", "A", date(2010, 1, 1), EditionType::Core).with_card("T", Rarity::Common),
        ]));
        let db = CardDb::new(editions, CardArtPreference::ORIGINAL_ART_ALL_EDITIONS);
        db.initialize([CardRules::new("T")]);

        assert_eq!(db.get_card("T").unwrap().edition, "AAA");
        db.set_art_preference(CardArtPreference::LATEST_ART_ALL_EDITIONS);
        assert_eq!(db.get_card("T").unwrap().edition, "BBB");
    }

    #[test]
    fn test_filtered_names_are_hidden_but_stored() {
        let db = CardDb::new(registry(), CardArtPreference::default()).with_filtered(["x"]);
        db.initialize([CardRules::new("X"), CardRules::new("Forest")]);

        assert!(db.is_filtered("X"));
        assert!(db.get_card("X").is_none());
        assert!(db.get_card_with_art("X", "OLD", 1).is_none());
        assert!(!db.unique_card_names().contains(&"X".to_string()));
        assert_eq!(db.get_art_count("X", "OLD"), 1);
        assert!(db.rules("X").is_some());
        assert_eq!(db.filtered_names(), vec!["x".to_string()]);
    }

    #[test]
    fn test_cards_without_printings() {
        let plain = CardDb::new(registry(), CardArtPreference::default());
        plain.initialize([CardRules::new("Orphan")]);
        assert!(plain.get_card("Orphan").is_none());

        let with_unknown = CardDb::new(registry(), CardArtPreference::default()).with_unknown_cards(true);
        with_unknown.initialize([CardRules::new("Orphan")]);
        let card = with_unknown.get_card("Orphan").unwrap();
        assert_eq!(card.edition, Edition::UNKNOWN_CODE);
        assert_eq!(card.rarity, Rarity::Unknown);
    }

    #[test]
    fn test_load_card_is_idempotent() {
        let db = CardDb::new(registry(), CardArtPreference::default());
        assert!(db.get_card("X").is_none());

        assert_eq!(db.load_card("X", Some("OLD"), CardRules::new("X")), 3);
        assert_eq!(db.load_card("X", None, CardRules::new("X")), 0);
        assert_eq!(db.all_cards_named("X").len(), 3);
        assert!(db.get_card_with_art("X", "OLD", 1).is_some());
    }

    #[test]
    fn test_load_card_keys_rules_by_card_name() {
        let db = CardDb::new(registry(), CardArtPreference::default());
        assert_eq!(db.load_card("  x ", None, CardRules::new("X")), 3);

        assert!(db.rules("X").is_some());
        assert_eq!(db.get_card("X").unwrap().name, "X");
    }

    #[test]
    fn test_unicode_names_fold_the_same_way_everywhere() {
        let editions = Arc::new(EditionRegistry::new(vec![Edition::new(
            "DST",
            "Darksteel",
            date(2004, 2, 6),
            EditionType::Expansion,
        )
        .with_card("Æther Vial", Rarity::Uncommon)]));

        let bulk = CardDb::new(Arc::clone(&editions), CardArtPreference::default());
        bulk.initialize([CardRules::new("ÆTHER VIAL")]);

        let on_demand = CardDb::new(editions, CardArtPreference::default());
        assert_eq!(on_demand.load_card("æther vial", None, CardRules::new("ÆTHER VIAL")), 1);

        for db in [&bulk, &on_demand] {
            assert_eq!(db.get_art_count("æther vial", "DST"), 1);
            assert!(db.get_card_with_art("Æther Vial", "DST", 1).is_some());
            assert!(db.rules("Æther Vial").is_some());
        }
    }

    #[test]
    fn test_concurrent_load_card_adds_each_printing_once() {
        let db = Arc::new(CardDb::new(registry(), CardArtPreference::default()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let db = Arc::clone(&db);
                std::thread::spawn(move || db.load_card("Forest", None, CardRules::new("Forest")))
            })
            .collect();
        let added: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(added, 3);
        let printings: Vec<_> = db
            .all_cards_named("Forest")
            .into_iter()
            .map(|c| (c.edition, c.art_index))
            .collect();
        assert_eq!(
            printings,
            vec![("OLD".to_string(), 1), ("OLD".to_string(), 2), ("NEW".to_string(), 1)]
        );
    }

    #[test]
    fn test_matching_rules_follows_printing_name() {
        let db = db();
        let card = db.get_card_from_edition("forest", "NEW").unwrap();
        let rules = db.matching_rules(&card).unwrap();
        assert_eq!(rules.name, "Forest");
        assert!(rules.is_basic_land());

        let stray = PaperCard::new("Nope", "NEW", 1, Rarity::Common);
        assert!(db.matching_rules(&stray).is_none());
    }

    #[test]
    fn test_all_cards_lists_visible_printings() {
        let db = CardDb::new(registry(), CardArtPreference::default()).with_filtered(["Forest"]);
        db.initialize([CardRules::new("X"), CardRules::new("Forest")]);

        let mut all: Vec<_> = db.all_cards().into_iter().map(|c| c.edition).collect();
        all.sort();
        assert_eq!(all, vec!["NEW", "OLD", "PRM"]);
        assert_eq!(db.len(), 6);
    }

    #[test]
    fn test_request_lookup() {
        let db = db();
        let foil = db.get_card_from_request(&CardRequest::parse("Forest+|OLD|2")).unwrap();
        assert!(foil.is_foil());
        assert_eq!(foil.art_index, 2);

        let fallback = db.get_card_from_request(&CardRequest::parse("Forest|NEW|5")).unwrap();
        assert_eq!(fallback.art_index, 1);
    }

    #[test]
    fn test_snapshot_is_detached_from_later_loads() {
        let db = CardDb::new(registry(), CardArtPreference::default());
        db.initialize([CardRules::new("X")]);
        let before = db.snapshot();

        db.load_card("Forest", None, CardRules::new("Forest"));
        assert_eq!(before.len(), 3);
        assert_eq!(db.snapshot().len(), 6);
        assert!(before.cards_named("Forest").is_empty());
    }

    #[test]
    fn test_all_cards_named_in_timeline_order() {
        let db = db();
        let editions: Vec<_> = db.all_cards_named("X").into_iter().map(|c| c.edition).collect();
        assert_eq!(editions, vec!["OLD", "PRM", "NEW"]);
    }
}
