//! Alternative print resolution over the edition timeline.
//!
//! ## Key Types
//!
//! - `AlternativePrintResolver`: bounded, direction-aware print search
//! - `RefinementOptions`: frame and expansion-set preferences

pub mod alternative;

pub use alternative::{
    reference_date, search_strategy, AlternativePrintResolver, RefinementOptions,
    REFERENCE_DATE_TOLERANCE_DAYS,
};
