//! Card system: rules, printings, art preference, and the card index.
//!
//! ## Key Types
//!
//! - `CardRules`: printing-independent card record
//! - `PaperCard`: one concrete printing (name, edition, art, foil)
//! - `CardArtPreference`: direction x scope policy for picking printings
//! - `CardDb`: name -> printings index with dated lookups
//! - `TokenDb`: token printings by normalized name
//! - `CardStorageReader`: where card rules come from

pub mod db;
pub mod paper;
pub mod preference;
pub mod reader;
pub mod rules;
pub mod tokens;

pub use db::{CardDb, CardDbSnapshot};
pub use paper::{CardRequest, PaperCard, ART_INDEX_BASE};
pub use preference::{ArtDirection, CardArtPreference, EditionScope};
pub use reader::{CardStorageReader, InMemoryCardReader};
pub use rules::{card_key, normalize_name, CardRules};
pub use tokens::TokenDb;
