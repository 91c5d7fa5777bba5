//! The static data facade and its configuration.
//!
//! ## Key Types
//!
//! - `StaticData`: owns editions, card indexes, tokens and catalogs
//! - `StaticDataSources`: the readers a facade is built from
//! - `StaticDataConfig`: construction-time settings
//! - `FormatPredicates`: host-installed format legality checks

pub mod config;
pub mod facade;
pub mod formats;

pub use config::{StaticDataConfig, PRINT_SHEETS_FILE, SPECIAL_BOOSTERS_FILE, STARTERS_FILE};
pub use facade::{StaticData, StaticDataSources};
pub use formats::{CardPredicate, FormatPredicates, GameFormat};
