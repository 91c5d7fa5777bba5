//! Facade configuration.
//!
//! Hosts build a `StaticDataConfig` once at startup, either with the
//! builder methods or by deserializing it, and hand it to `StaticData::new`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cards::CardArtPreference;

/// Tournament pack templates, inside the block data folder.
pub const STARTERS_FILE: &str = "starters.txt";
/// Special booster templates, inside the block data folder.
pub const SPECIAL_BOOSTERS_FILE: &str = "boosters-special.txt";
/// Print sheet definitions, inside the block data folder.
pub const PRINT_SHEETS_FILE: &str = "printsheets.txt";

/// Construction-time settings for `StaticData`.
///
/// ## Example
///
/// ```
/// use ccg_card_db::cards::CardArtPreference;
/// use ccg_card_db::static_data::StaticDataConfig;
///
/// let config = StaticDataConfig::new("res/blockdata")
///     .with_card_art_preference(CardArtPreference::ORIGINAL_ART_ALL_EDITIONS)
///     .load_non_legal_cards(true);
///
/// assert!(config.load_non_legal_cards);
/// assert!(config.print_sheets_path().ends_with("printsheets.txt"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticDataConfig {
    /// Folder holding starters, special boosters and print sheets.
    pub block_data_folder: PathBuf,

    /// Art preference every card index starts with.
    pub card_art_preference: CardArtPreference,

    /// Give cards with no known printing a placeholder printing.
    pub enable_unknown_cards: bool,

    /// Keep funny and silver-bordered cards visible in the common index.
    pub load_non_legal_cards: bool,

    pub allow_custom_cards_in_decks_conformance: bool,

    pub enable_smart_card_art_selection: bool,
}

impl Default for StaticDataConfig {
    fn default() -> Self {
        Self {
            block_data_folder: PathBuf::from("res/blockdata"),
            card_art_preference: CardArtPreference::default(),
            enable_unknown_cards: false,
            load_non_legal_cards: false,
            allow_custom_cards_in_decks_conformance: false,
            enable_smart_card_art_selection: false,
        }
    }
}

impl StaticDataConfig {
    /// Defaults with the given block data folder.
    pub fn new(block_data_folder: impl Into<PathBuf>) -> Self {
        Self {
            block_data_folder: block_data_folder.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_card_art_preference(mut self, preference: CardArtPreference) -> Self {
        self.card_art_preference = preference;
        self
    }

    #[must_use]
    pub fn enable_unknown_cards(mut self, enabled: bool) -> Self {
        self.enable_unknown_cards = enabled;
        self
    }

    #[must_use]
    pub fn load_non_legal_cards(mut self, enabled: bool) -> Self {
        self.load_non_legal_cards = enabled;
        self
    }

    #[must_use]
    pub fn allow_custom_cards_in_decks_conformance(mut self, allowed: bool) -> Self {
        self.allow_custom_cards_in_decks_conformance = allowed;
        self
    }

    #[must_use]
    pub fn enable_smart_card_art_selection(mut self, enabled: bool) -> Self {
        self.enable_smart_card_art_selection = enabled;
        self
    }

    #[must_use]
    pub fn block_data_folder(&self) -> &Path {
        &self.block_data_folder
    }

    #[must_use]
    pub fn starters_path(&self) -> PathBuf {
        self.block_data_folder.join(STARTERS_FILE)
    }

    #[must_use]
    pub fn special_boosters_path(&self) -> PathBuf {
        self.block_data_folder.join(SPECIAL_BOOSTERS_FILE)
    }

    /// Path of the print sheet file in the block data folder.
    #[must_use]
    pub fn print_sheets_path(&self) -> PathBuf {
        self.block_data_folder.join(PRINT_SHEETS_FILE)
    }
}
