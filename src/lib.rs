//! # ccg-card-db
//!
//! In-memory database of printed cards for a collectible card game.
//!
//! ## Design Principles
//!
//! 1. **Timeline First**: Every printing belongs to an edition with a release
//!    date. Lookups rank printings along that timeline.
//!
//! 2. **Art Preference as Policy**: Which printing a lookup returns is
//!    decided by a `CardArtPreference` (latest or original art, all editions
//!    or core/expansion/reprint only), never hardcoded.
//!
//! 3. **Readers at the Edges**: Card and edition files are parsed elsewhere.
//!    The database consumes `CardStorageReader` and `EditionReader`.
//!
//! ## Architecture
//!
//! - **Persistent Indexes**: Card indexes are `im-rs` maps behind a lock, so
//!   readers can take O(1) snapshots while on-demand loads write.
//!
//! - **Lazy Catalogs**: Boosters, tournament packs and print sheets are
//!   built on first access, at most once.
//!
//! ## Modules
//!
//! - `editions`: Editions, set types, and the timeline registry
//! - `cards`: Card rules, printings, art preference, card and token indexes
//! - `resolver`: Alternative print search with frame/expansion refinement
//! - `catalogs`: Templates, print sheets, booster generation
//! - `static_data`: The facade that ties it all together
//! - `error`: Crate error type

pub mod cards;
pub mod catalogs;
pub mod editions;
pub mod error;
pub mod resolver;
pub mod static_data;

// Re-export commonly used types
pub use crate::error::{CardDbError, Result};

pub use crate::editions::{
    BorderColor, CardInSet, Edition, EditionReader, EditionRegistry, EditionType, Rarity,
};

pub use crate::cards::{
    ArtDirection, CardArtPreference, CardDb, CardDbSnapshot, CardRequest, CardRules,
    CardStorageReader, EditionScope, InMemoryCardReader, PaperCard, TokenDb,
};

pub use crate::resolver::{AlternativePrintResolver, RefinementOptions};

pub use crate::catalogs::{
    BoosterGenerator, BoosterRng, LazyCatalog, PrintSheet, SealedTemplate, Storage,
};

pub use crate::static_data::{
    GameFormat, StaticData, StaticDataConfig, StaticDataSources,
};
