//! Alternative print resolution.
//!
//! Given a printing and a reference release date, find a different printing
//! of the same card from the other side of that date:
//!
//! - Latest art preferred: the earliest edition released *after* the date.
//! - Original art preferred: the latest edition released *before* the date.
//!
//! So the search ranks candidates with the *opposite* direction to the
//! caller's preference: it wants the edition nearest the reference date,
//! not the one at the far end of the timeline.
//!
//! The reference date is widened by two days towards the search side so
//! an edition released on the reference date itself is still a candidate.
//!
//! Two optional refinements then walk further along the timeline, one
//! edition at a time, until the candidate's frame style matches the caller's
//! preference, or until the candidate comes from an expansion set. Each step
//! uses the current candidate's own release date as the new bound, so the
//! walk is monotonic and terminates. If a walk runs out of editions, the
//! candidate from before the walk is kept.

use chrono::{Duration, NaiveDate};
use tracing::trace;

use crate::cards::{ArtDirection, CardArtPreference, CardDb, EditionScope, PaperCard};
use crate::editions::{Edition, EditionRegistry, EditionType};

/// Days the reference date is widened by before searching.
pub const REFERENCE_DATE_TOLERANCE_DAYS: i64 = 2;

/// Extra preferences for `refined_alternative_print`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RefinementOptions {
    /// With a filtered scope, prefer expansion sets over core and reprint
    /// sets when the timeline allows it.
    pub prefer_expansion_sets: bool,
    /// Prefer modern card frames over old ones.
    pub prefer_modern_frame: bool,
}

impl RefinementOptions {
    #[must_use]
    pub fn new(prefer_expansion_sets: bool, prefer_modern_frame: bool) -> Self {
        Self {
            prefer_expansion_sets,
            prefer_modern_frame,
        }
    }
}

/// Shift the reference date so editions released on it stay in range.
///
/// Searching after the date moves it back; searching before moves it ahead.
#[must_use]
pub fn reference_date(release_date: NaiveDate, direction: ArtDirection) -> NaiveDate {
    let tolerance = Duration::days(REFERENCE_DATE_TOLERANCE_DAYS);
    match direction {
        ArtDirection::LatestFirst => release_date - tolerance,
        ArtDirection::OriginalFirst => release_date + tolerance,
    }
}

/// The ranking policy for a search in `direction`.
///
/// Searching after the date (latest art) ranks original-first to get the
/// nearest later edition, and vice versa. The scope is kept.
#[must_use]
pub fn search_strategy(direction: ArtDirection, scope: EditionScope) -> CardArtPreference {
    CardArtPreference::new(direction.reversed(), scope)
}

/// Alternative print search over one card index.
#[derive(Clone, Copy, Debug)]
pub struct AlternativePrintResolver<'a> {
    cards: &'a CardDb,
    editions: &'a EditionRegistry,
}

impl<'a> AlternativePrintResolver<'a> {
    #[must_use]
    pub fn new(cards: &'a CardDb, editions: &'a EditionRegistry) -> Self {
        Self { cards, editions }
    }

    fn edition_of(&self, card: &PaperCard) -> Option<&'a Edition> {
        self.editions.get(&card.edition)
    }

    /// One bounded search: exact art index first, then any art index.
    ///
    /// The result carries the input card's foil flag.
    fn search_candidate(
        &self,
        card: &PaperCard,
        direction: ArtDirection,
        reference_date: NaiveDate,
        strategy: CardArtPreference,
    ) -> Option<PaperCard> {
        let search = |art_index: Option<u32>| match direction {
            ArtDirection::LatestFirst => self.cards.get_card_from_editions_released_after(
                &card.name,
                strategy,
                art_index,
                reference_date,
            ),
            ArtDirection::OriginalFirst => self.cards.get_card_from_editions_released_before(
                &card.name,
                strategy,
                art_index,
                reference_date,
            ),
        };

        let found = search(Some(card.art_index)).or_else(|| search(None))?;
        Some(found.with_foil(card.is_foil()))
    }

    /// Find an alternative print of `card` relative to `release_date`.
    ///
    /// `preference` is the caller's art preference: its direction picks the
    /// side of the date to search, its scope which editions may be used.
    #[must_use]
    pub fn alternative_print(
        &self,
        card: &PaperCard,
        release_date: NaiveDate,
        preference: CardArtPreference,
    ) -> Option<PaperCard> {
        let reference = reference_date(release_date, preference.direction);
        let strategy = search_strategy(preference.direction, preference.scope);
        let found = self.search_candidate(card, preference.direction, reference, strategy);
        trace!(
            card = %card,
            %reference,
            strategy = %strategy,
            found = ?found.as_ref().map(|c| c.edition.as_str()),
            "alternative print search"
        );
        found
    }

    /// `alternative_print` followed by the frame and expansion refinements.
    ///
    /// Frame matching runs first. Expansion preference only applies with a
    /// filtered scope and does not re-check the frame.
    #[must_use]
    pub fn refined_alternative_print(
        &self,
        card: &PaperCard,
        release_date: NaiveDate,
        preference: CardArtPreference,
        options: RefinementOptions,
    ) -> Option<PaperCard> {
        let mut alternative = self.alternative_print(card, release_date, preference)?;

        if let Some(refined) =
            self.print_with_matching_frame(&alternative, preference.scope, options.prefer_modern_frame)
        {
            alternative = refined;
        }

        if preference.filter_sets() && options.prefer_expansion_sets {
            if let Some(refined) =
                self.print_from_expansion_set(&alternative, options.prefer_modern_frame)
            {
                alternative = refined;
            }
        }

        Some(alternative)
    }

    /// Walk from `card` until a printing's frame matches `prefer_modern`.
    ///
    /// Returns `None` when the frame already matches, or when the timeline
    /// runs out first.
    #[must_use]
    pub fn print_with_matching_frame(
        &self,
        card: &PaperCard,
        scope: EditionScope,
        prefer_modern: bool,
    ) -> Option<PaperCard> {
        let edition = self.edition_of(card)?;
        if edition.is_modern() == prefer_modern {
            return None;
        }
        self.walk_until(card, prefer_modern, scope, |e| e.is_modern() == prefer_modern)
    }

    /// Walk from `card` until a printing comes from an expansion set.
    ///
    /// The scope is forced to core/expansion/reprint editions. Returns
    /// `None` when `card` is already from an expansion, or when no later
    /// step reaches one.
    #[must_use]
    pub fn print_from_expansion_set(&self, card: &PaperCard, prefer_modern: bool) -> Option<PaperCard> {
        let edition = self.edition_of(card)?;
        if edition.set_type == EditionType::Expansion {
            return None;
        }
        self.walk_until(card, prefer_modern, EditionScope::CoreExpansionReprint, |e| {
            e.set_type == EditionType::Expansion
        })
    }

    /// Step along the timeline from `start` until `accept` holds.
    ///
    /// Modern frames lie later on the timeline, so a modern preference walks
    /// forward and an old-frame preference walks backward. Each step is
    /// bounded strictly by the current candidate's release date.
    fn walk_until(
        &self,
        start: &PaperCard,
        prefer_modern: bool,
        scope: EditionScope,
        accept: impl Fn(&Edition) -> bool,
    ) -> Option<PaperCard> {
        let direction = ArtDirection::from_latest(prefer_modern);
        let strategy = search_strategy(direction, scope);

        let mut candidate = start.clone();
        loop {
            let date = self.edition_of(&candidate)?.date;
            candidate = self.search_candidate(&candidate, direction, date, strategy)?;
            let edition = self.edition_of(&candidate)?;
            trace!(card = %candidate, edition = %edition.code, "refinement step");
            if accept(edition) {
                return Some(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardRules;
    use crate::editions::Rarity;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn two_editions() -> CardDb {
        let editions = Arc::new(EditionRegistry::new(vec![
            Edition::new("OLD", "Old", date(2000, 1, 1), EditionType::Core)
                .with_modern_frame(false)
                .with_card("X", Rarity::Common),
            Edition::new("NEW", "New", date(2020, 1, 1), EditionType::Expansion)
                .with_modern_frame(true)
                .with_card("X", Rarity::Common),
        ]));
        let db = CardDb::new(editions, CardArtPreference::default());
        db.initialize([CardRules::new("X")]);
        db
    }

    #[test]
    fn test_reference_date_tolerance() {
        let pivot = date(2010, 1, 1);
        assert_eq!(reference_date(pivot, ArtDirection::LatestFirst), date(2009, 12, 30));
        assert_eq!(reference_date(pivot, ArtDirection::OriginalFirst), date(2010, 1, 3));
    }

    #[test]
    fn test_search_strategy_is_opposite_direction() {
        assert_eq!(
            search_strategy(ArtDirection::LatestFirst, EditionScope::AllEditions),
            CardArtPreference::ORIGINAL_ART_ALL_EDITIONS
        );
        assert_eq!(
            search_strategy(ArtDirection::OriginalFirst, EditionScope::CoreExpansionReprint),
            CardArtPreference::LATEST_ART_CORE_EXPANSIONS_REPRINT_ONLY
        );
    }

    #[test]
    fn test_alternative_in_both_directions() {
        let db = two_editions();
        let resolver = AlternativePrintResolver::new(&db, db.editions());
        let pivot = date(2010, 1, 1);

        let new = db.get_card_from_edition("X", "NEW").unwrap();
        let alt = resolver
            .alternative_print(&new, pivot, CardArtPreference::ORIGINAL_ART_ALL_EDITIONS)
            .unwrap();
        assert_eq!(alt.edition, "OLD");

        let old = db.get_card_from_edition("X", "OLD").unwrap();
        let alt = resolver
            .alternative_print(&old, pivot, CardArtPreference::LATEST_ART_ALL_EDITIONS)
            .unwrap();
        assert_eq!(alt.edition, "NEW");
    }

    #[test]
    fn test_foil_is_propagated() {
        let db = two_editions();
        let resolver = AlternativePrintResolver::new(&db, db.editions());
        let old = db.get_card_from_edition("X", "OLD").unwrap().foiled();

        let alt = resolver
            .alternative_print(&old, date(2010, 1, 1), CardArtPreference::LATEST_ART_ALL_EDITIONS)
            .unwrap();
        assert!(alt.is_foil());
    }

    #[test]
    fn test_no_alternative_is_none() {
        let db = two_editions();
        let resolver = AlternativePrintResolver::new(&db, db.editions());
        let new = db.get_card_from_edition("X", "NEW").unwrap();

        assert!(resolver
            .alternative_print(&new, date(2021, 1, 1), CardArtPreference::LATEST_ART_ALL_EDITIONS)
            .is_none());
    }

    #[test]
    fn test_frame_match_is_none_when_already_matching() {
        let db = two_editions();
        let resolver = AlternativePrintResolver::new(&db, db.editions());
        let new = db.get_card_from_edition("X", "NEW").unwrap();

        assert!(resolver
            .print_with_matching_frame(&new, EditionScope::AllEditions, true)
            .is_none());

        let old = db.get_card_from_edition("X", "OLD").unwrap();
        let modern = resolver
            .print_with_matching_frame(&old, EditionScope::AllEditions, true)
            .unwrap();
        assert_eq!(modern.edition, "NEW");
        assert!(resolver
            .print_with_matching_frame(&modern, EditionScope::AllEditions, true)
            .is_none());
    }
}
