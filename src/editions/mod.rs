//! Editions: released sets and the registry that orders them in time.
//!
//! ## Key Types
//!
//! - `Edition`: one released set (code, date, set type, frame, card list)
//! - `EditionRegistry`: editions in timeline order with code lookup
//! - `EditionReader`: where edition records come from

pub mod edition;
pub mod registry;

pub use edition::{
    modern_frame_date, parse_date, BorderColor, CardInSet, Edition, EditionType, Rarity,
};
pub use registry::{EditionReader, EditionRegistry};
