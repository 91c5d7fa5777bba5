//! Supplementary catalogs: boosters, tournament packs, print sheets.
//!
//! None of these are needed to answer card lookups, so the facade builds
//! each one lazily on first access and keeps it for the process lifetime.
//!
//! ## Key Types
//!
//! - `LazyCatalog`: build-once cell, safe under concurrent first access
//! - `Storage`: named read-only collection
//! - `SealedTemplate`: booster/starter slot layout
//! - `PrintSheet`: weighted card pool
//! - `BoosterGenerator`: opens a template against the print sheets

pub mod booster;
pub mod lazy;
pub mod print_sheet;
pub mod rng;
pub mod storage;
pub mod template;

pub use booster::BoosterGenerator;
pub use lazy::LazyCatalog;
pub use print_sheet::{load_print_sheets, PrintSheet};
pub use rng::BoosterRng;
pub use storage::{Named, Storage};
pub use template::{read_templates, BoosterSlot, SealedTemplate};
