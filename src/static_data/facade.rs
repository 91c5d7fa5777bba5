//! The static data facade.
//!
//! `StaticData` owns everything a running application treats as fixed:
//! the edition registries, the three card indexes (common, variant,
//! custom), the optional token index, and the supplementary catalogs,
//! which are built lazily on first access.
//!
//! Construct one instance at the application boundary and pass it (or an
//! `Arc` of it) to whatever needs it. `install` / `instance` provide a
//! single process-wide handle for hosts that cannot thread it through.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use super::config::StaticDataConfig;
use super::formats::{CardPredicate, FormatPredicates, GameFormat};
use crate::cards::{
    card_key, CardArtPreference, CardDb, CardRules, CardStorageReader, PaperCard, TokenDb,
};
use crate::catalogs::{
    load_print_sheets, read_templates, BoosterGenerator, BoosterRng, LazyCatalog, PrintSheet,
    SealedTemplate, Storage,
};
use crate::editions::{Edition, EditionReader, EditionRegistry, EditionType};
use crate::error::Result;
use crate::resolver::{AlternativePrintResolver, RefinementOptions};

static LAST_INSTANCE: RwLock<Option<Arc<StaticData>>> = parking_lot::const_rwlock(None);

/// External readers the facade is built from.
pub struct StaticDataSources {
    card_reader: Arc<dyn CardStorageReader>,
    editions: Box<dyn EditionReader>,
    token_reader: Option<Box<dyn CardStorageReader>>,
    custom_card_reader: Option<Arc<dyn CardStorageReader>>,
    custom_editions: Option<Box<dyn EditionReader>>,
}

impl StaticDataSources {
    pub fn new(
        card_reader: impl CardStorageReader + 'static,
        editions: impl EditionReader + 'static,
    ) -> Self {
        Self {
            card_reader: Arc::new(card_reader),
            editions: Box::new(editions),
            token_reader: None,
            custom_card_reader: None,
            custom_editions: None,
        }
    }

    #[must_use]
    pub fn with_tokens(mut self, reader: impl CardStorageReader + 'static) -> Self {
        self.token_reader = Some(Box::new(reader));
        self
    }

    /// User-authored cards, printed in the custom editions.
    #[must_use]
    pub fn with_custom_cards(
        mut self,
        reader: impl CardStorageReader + 'static,
        editions: impl EditionReader + 'static,
    ) -> Self {
        self.custom_card_reader = Some(Arc::new(reader));
        self.custom_editions = Some(Box::new(editions));
        self
    }
}

/// Rules from one bulk load, split by destination index.
#[derive(Default)]
struct SortedRules {
    regular: FxHashMap<String, CardRules>,
    variant: FxHashMap<String, CardRules>,
    filtered: Vec<String>,
    skipped: usize,
}

/// Process-lifetime card database.
pub struct StaticData {
    config: StaticDataConfig,
    card_reader: Arc<dyn CardStorageReader>,
    custom_card_reader: Option<Arc<dyn CardStorageReader>>,

    editions: Arc<EditionRegistry>,
    custom_editions: Arc<EditionRegistry>,

    common_cards: CardDb,
    variant_cards: CardDb,
    custom_cards: CardDb,
    tokens: Option<TokenDb>,

    boosters: LazyCatalog<Storage<SealedTemplate>>,
    special_boosters: LazyCatalog<Storage<SealedTemplate>>,
    tournament_packs: LazyCatalog<Storage<SealedTemplate>>,
    print_sheets: LazyCatalog<Storage<PrintSheet>>,
    sorted_editions: LazyCatalog<Vec<Edition>>,
    editions_by_type: LazyCatalog<BTreeMap<EditionType, Vec<Edition>>>,

    formats: RwLock<FormatPredicates>,
    filtered_hands_enabled: AtomicBool,
    smart_card_art_selection: AtomicBool,
}

impl StaticData {
    /// Read every source and build the card indexes.
    ///
    /// Reader failures propagate unchanged. Unparseable card records are
    /// skipped.
    pub fn new(config: StaticDataConfig, sources: StaticDataSources) -> Result<Self> {
        let editions = Arc::new(EditionRegistry::from_reader(sources.editions.as_ref())?);
        let custom_editions = Arc::new(match &sources.custom_editions {
            Some(reader) => EditionRegistry::from_reader(reader.as_ref())?,
            None => EditionRegistry::default(),
        });

        let funny_cards: rustc_hash::FxHashSet<String> = editions
            .iter()
            .filter(|e| e.is_funny())
            .flat_map(|e| e.cards.iter().map(|c| card_key(&c.name)))
            .collect();

        let mut sorted = SortedRules::default();
        for record in sources.card_reader.load_cards()? {
            let Some(rules) = record else {
                sorted.skipped += 1;
                continue;
            };
            let key = card_key(&rules.name);
            if !config.load_non_legal_cards && !rules.is_basic_land() && funny_cards.contains(&key) {
                sorted.filtered.push(rules.name.clone());
            }
            if rules.is_variant() {
                sorted.variant.insert(key, rules);
            } else {
                sorted.regular.insert(key, rules);
            }
        }
        if sorted.skipped > 0 {
            warn!(skipped = sorted.skipped, "skipped unreadable card records");
        }

        let mut custom_rules: FxHashMap<String, CardRules> = FxHashMap::default();
        if let Some(reader) = &sources.custom_card_reader {
            for rules in reader.load_cards()?.into_iter().flatten() {
                custom_rules.insert(card_key(&rules.name), rules);
            }
        }

        sorted.filtered.sort();
        sorted.filtered.dedup();

        let build = |registry: &Arc<EditionRegistry>, rules: FxHashMap<String, CardRules>| {
            let db = CardDb::new(Arc::clone(registry), config.card_art_preference)
                .with_filtered(&sorted.filtered)
                .with_unknown_cards(config.enable_unknown_cards);
            db.initialize(rules.into_values());
            db
        };
        let common_cards = build(&editions, std::mem::take(&mut sorted.regular));
        let variant_cards = build(&editions, std::mem::take(&mut sorted.variant));
        let custom_cards = build(&custom_editions, custom_rules);

        let tokens = match &sources.token_reader {
            Some(reader) => {
                let mut by_name: FxHashMap<String, CardRules> = FxHashMap::default();
                for rules in reader.load_cards()?.into_iter().flatten() {
                    by_name.insert(rules.normalized_name(), rules);
                }
                Some(TokenDb::new(by_name.into_values(), Arc::clone(&editions)))
            }
            None => None,
        };

        info!(
            editions = editions.len(),
            custom_editions = custom_editions.len(),
            common = common_cards.len(),
            variant = variant_cards.len(),
            custom = custom_cards.len(),
            filtered = sorted.filtered.len(),
            "static data loaded"
        );

        Ok(Self {
            smart_card_art_selection: AtomicBool::new(config.enable_smart_card_art_selection),
            config,
            card_reader: sources.card_reader,
            custom_card_reader: sources.custom_card_reader,
            editions,
            custom_editions,
            common_cards,
            variant_cards,
            custom_cards,
            tokens,
            boosters: LazyCatalog::new(),
            special_boosters: LazyCatalog::new(),
            tournament_packs: LazyCatalog::new(),
            print_sheets: LazyCatalog::new(),
            sorted_editions: LazyCatalog::new(),
            editions_by_type: LazyCatalog::new(),
            formats: RwLock::new(FormatPredicates::new()),
            filtered_hands_enabled: AtomicBool::new(false),
        })
    }

    /// Make this the process-wide instance and return a shared handle.
    pub fn install(self) -> Arc<Self> {
        let shared = Arc::new(self);
        *LAST_INSTANCE.write() = Some(Arc::clone(&shared));
        shared
    }

    /// The most recently installed instance.
    #[must_use]
    pub fn instance() -> Option<Arc<Self>> {
        LAST_INSTANCE.read().clone()
    }

    #[must_use]
    pub fn config(&self) -> &StaticDataConfig {
        &self.config
    }

    // === Editions ===

    #[must_use]
    pub fn editions(&self) -> &EditionRegistry {
        &self.editions
    }

    #[must_use]
    pub fn custom_editions(&self) -> &EditionRegistry {
        &self.custom_editions
    }

    /// Regular and custom editions, newest first.
    pub fn sorted_editions(&self) -> &[Edition] {
        self.sorted_editions.get_or_build(|| {
            let mut all: Vec<Edition> = self
                .editions
                .iter()
                .chain(self.custom_editions.iter())
                .cloned()
                .collect();
            all.sort();
            all.reverse();
            all
        })
    }

    /// Regular and custom editions grouped by set type, newest first.
    /// Every type has an entry.
    pub fn editions_by_type(&self) -> &BTreeMap<EditionType, Vec<Edition>> {
        self.editions_by_type.get_or_build(|| {
            EditionType::ALL
                .into_iter()
                .map(|set_type| {
                    let mut editions: Vec<Edition> = self
                        .editions
                        .of_type(set_type)
                        .chain(self.custom_editions.of_type(set_type))
                        .cloned()
                        .collect();
                    editions.sort_by(|a, b| b.cmp(a));
                    (set_type, editions)
                })
                .collect()
        })
    }

    /// Look up an edition, falling back to the custom editions.
    #[must_use]
    pub fn card_edition(&self, code: &str) -> Option<&Edition> {
        self.editions
            .get(code)
            .or_else(|| self.custom_editions.get(code))
    }

    // === Card indexes ===

    /// Regular cards.
    #[must_use]
    pub fn common_cards(&self) -> &CardDb {
        &self.common_cards
    }

    /// Variant cards, kept apart from regular cards.
    #[must_use]
    pub fn variant_cards(&self) -> &CardDb {
        &self.variant_cards
    }

    /// Cards from the custom card reader, printed in custom editions.
    #[must_use]
    pub fn custom_cards(&self) -> &CardDb {
        &self.custom_cards
    }

    /// Token index, when a token reader was supplied.
    #[must_use]
    pub fn tokens(&self) -> Option<&TokenDb> {
        self.tokens.as_ref()
    }

    /// The three card indexes by display name.
    #[must_use]
    pub fn available_databases(&self) -> BTreeMap<&'static str, &CardDb> {
        BTreeMap::from([
            ("Common", &self.common_cards),
            ("Custom", &self.custom_cards),
            ("Variant", &self.variant_cards),
        ])
    }

    /// Art variants of the card's (name, edition) in the first index that
    /// has any; 0 if none does.
    #[must_use]
    pub fn card_art_count(&self, card: &PaperCard) -> usize {
        [&self.common_cards, &self.variant_cards, &self.custom_cards]
            .into_iter()
            .map(|db| db.get_art_count(&card.name, &card.edition))
            .find(|&count| count > 0)
            .unwrap_or(0)
    }

    /// Exact common lookup, loading the card on demand if it is missing,
    /// then any art in the edition, then the same in the custom index.
    #[must_use]
    pub fn get_or_load_common_card(
        &self,
        name: &str,
        edition: &str,
        art_index: u32,
        foil: bool,
    ) -> Option<PaperCard> {
        let card = self
            .common_cards
            .get_card_with_art(name, edition, art_index)
            .or_else(|| {
                self.attempt_to_load_card(name, Some(edition));
                self.common_cards.get_card_with_art(name, edition, art_index)
            })
            .or_else(|| self.common_cards.get_card_from_edition(name, edition))
            .or_else(|| self.custom_cards.get_card_with_art(name, edition, art_index))
            .or_else(|| self.custom_cards.get_card_from_edition(name, edition))?;
        Some(card.with_foil(foil))
    }

    /// Ask the readers for a card and insert whatever they return.
    ///
    /// Variant rules go to the variant index, others to the common index;
    /// the custom reader's answer goes to the custom index. A card no
    /// reader knows is not an error.
    pub fn attempt_to_load_card(&self, name: &str, edition: Option<&str>) {
        if let Some(rules) = self.card_reader.attempt_to_load_card(name) {
            let target = if rules.is_variant() {
                &self.variant_cards
            } else {
                &self.common_cards
            };
            target.load_card(name, edition, rules);
        }

        if let Some(rules) = self
            .custom_card_reader
            .as_ref()
            .and_then(|reader| reader.attempt_to_load_card(name))
        {
            self.custom_cards.load_card(name, edition, rules);
        }
    }

    // === Lazy catalogs ===

    /// Booster templates of every edition that has boosters.
    pub fn boosters(&self) -> &Storage<SealedTemplate> {
        self.boosters.get_or_build(|| {
            let storage = Storage::from_items("Boosters", self.editions.booster_templates());
            debug!(count = storage.len(), "built booster catalog");
            storage
        })
    }

    pub fn special_boosters(&self) -> Result<&Storage<SealedTemplate>> {
        self.special_boosters.get_or_try_build(|| {
            read_templates("Special boosters", &self.config.special_boosters_path())
        })
    }

    pub fn tournament_packs(&self) -> Result<&Storage<SealedTemplate>> {
        self.tournament_packs
            .get_or_try_build(|| read_templates("Starter sets", &self.config.starters_path()))
    }

    pub fn print_sheets(&self) -> Result<&Storage<PrintSheet>> {
        self.print_sheets.get_or_try_build(|| {
            load_print_sheets(&self.config.print_sheets_path(), &self.common_cards, &self.editions)
        })
    }

    /// Open one product from `template`, drawing from the print sheets.
    pub fn generate_booster(
        &self,
        template: &SealedTemplate,
        rng: &mut BoosterRng,
    ) -> Result<Vec<PaperCard>> {
        Ok(BoosterGenerator::new(self.print_sheets()?).generate(template, rng))
    }

    // === Alternative prints ===

    /// Resolver over the common index.
    #[must_use]
    pub fn resolver(&self) -> AlternativePrintResolver<'_> {
        AlternativePrintResolver::new(&self.common_cards, &self.editions)
    }

    /// Alternative print under the current art preference.
    #[must_use]
    pub fn alternative_card_print(&self, card: &PaperCard, release_date: NaiveDate) -> Option<PaperCard> {
        self.resolver()
            .alternative_print(card, release_date, self.card_art_preference())
    }

    /// Alternative print under an explicit art preference.
    #[must_use]
    pub fn alternative_card_print_with(
        &self,
        card: &PaperCard,
        release_date: NaiveDate,
        preference: CardArtPreference,
    ) -> Option<PaperCard> {
        self.resolver().alternative_print(card, release_date, preference)
    }

    /// Alternative print with frame and expansion-set refinement.
    #[must_use]
    pub fn refined_alternative_card_print(
        &self,
        card: &PaperCard,
        release_date: NaiveDate,
        preference: CardArtPreference,
        options: RefinementOptions,
    ) -> Option<PaperCard> {
        self.resolver()
            .refined_alternative_print(card, release_date, preference, options)
    }

    // === Runtime settings ===

    /// Apply an art preference to all three card indexes.
    pub fn set_card_art_preference(&self, preference: CardArtPreference) {
        for db in [&self.common_cards, &self.variant_cards, &self.custom_cards] {
            db.set_art_preference(preference);
        }
    }

    /// Apply an art preference given by name or label.
    pub fn set_card_art_preference_label(&self, label: &str) -> Result<()> {
        self.set_card_art_preference(label.parse()?);
        Ok(())
    }

    /// Preference shared by all card indexes.
    #[must_use]
    pub fn card_art_preference(&self) -> CardArtPreference {
        self.common_cards.art_preference()
    }

    #[must_use]
    pub fn card_art_preference_name(&self) -> &'static str {
        self.card_art_preference().name()
    }

    #[must_use]
    pub fn card_art_preference_is_latest(&self) -> bool {
        self.card_art_preference().latest_first()
    }

    #[must_use]
    pub fn is_core_expansion_only_filter_set(&self) -> bool {
        self.card_art_preference().filter_sets()
    }

    /// Labels of every art preference, e.g. `Latest Art All Editions`.
    #[must_use]
    pub fn card_art_preference_labels() -> Vec<String> {
        CardArtPreference::ALL.iter().map(|p| p.label()).collect()
    }

    #[must_use]
    pub fn is_smart_card_art_selection_enabled(&self) -> bool {
        self.smart_card_art_selection.load(Ordering::Relaxed)
    }

    pub fn set_smart_card_art_selection(&self, enabled: bool) {
        self.smart_card_art_selection.store(enabled, Ordering::Relaxed);
    }

    #[must_use]
    pub fn filtered_hands_enabled(&self) -> bool {
        self.filtered_hands_enabled.load(Ordering::Relaxed)
    }

    pub fn set_filtered_hands_enabled(&self, enabled: bool) {
        self.filtered_hands_enabled.store(enabled, Ordering::Relaxed);
    }

    #[must_use]
    pub fn allow_custom_cards_in_decks_conformance(&self) -> bool {
        self.config.allow_custom_cards_in_decks_conformance
    }

    /// Install the legality predicate for `format`.
    pub fn set_format_predicate(&self, format: GameFormat, predicate: CardPredicate) {
        self.formats.write().set(format, predicate);
    }

    #[must_use]
    pub fn format_predicate(&self, format: GameFormat) -> Option<CardPredicate> {
        self.formats.read().get(format)
    }

    /// `None` when no predicate is installed for the format.
    #[must_use]
    pub fn is_legal_in(&self, format: GameFormat, card: &PaperCard) -> Option<bool> {
        self.formats.read().is_legal(format, card)
    }
}

impl std::fmt::Debug for StaticData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticData")
            .field("config", &self.config)
            .field("editions", &self.editions.len())
            .field("custom_editions", &self.custom_editions.len())
            .field("common_cards", &self.common_cards.len())
            .field("variant_cards", &self.variant_cards.len())
            .field("custom_cards", &self.custom_cards.len())
            .finish_non_exhaustive()
    }
}
