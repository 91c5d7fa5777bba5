//! Opening sealed products.
//!
//! Each template slot names a print sheet. For a template tied to an
//! edition, `"<CODE> <slot>"` is tried before the bare slot name, so
//! `NEW: 1 Rare` draws from the `NEW Rare` sheet.

use tracing::warn;

use super::print_sheet::PrintSheet;
use super::rng::BoosterRng;
use super::storage::Storage;
use super::template::SealedTemplate;
use crate::cards::PaperCard;

/// Draws booster contents from a print sheet catalog.
#[derive(Clone, Copy, Debug)]
pub struct BoosterGenerator<'a> {
    sheets: &'a Storage<PrintSheet>,
}

impl<'a> BoosterGenerator<'a> {
    #[must_use]
    pub fn new(sheets: &'a Storage<PrintSheet>) -> Self {
        Self { sheets }
    }

    /// The sheet a slot draws from.
    #[must_use]
    pub fn sheet_for(&self, template: &SealedTemplate, slot: &str) -> Option<&'a PrintSheet> {
        template
            .edition
            .as_deref()
            .and_then(|code| self.sheets.get(&format!("{code} {slot}")))
            .or_else(|| self.sheets.get(slot))
    }

    /// Open one product. Slots whose sheet is missing contribute nothing.
    pub fn generate(&self, template: &SealedTemplate, rng: &mut BoosterRng) -> Vec<PaperCard> {
        let mut cards = Vec::new();
        for slot in &template.slots {
            match self.sheet_for(template, &slot.slot) {
                Some(sheet) => cards.extend(sheet.random(slot.count as usize, rng)),
                None => warn!(template = %template.name, slot = %slot.slot, "no print sheet for slot"),
            }
        }
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::storage::Named;
    use crate::editions::Rarity;

    fn sheets() -> Storage<PrintSheet> {
        let mut rare = PrintSheet::new("NEW Rare");
        let mut common = PrintSheet::new("Common");
        for i in 0..4 {
            rare.add(PaperCard::new(format!("R{i}"), "NEW", 1, Rarity::Rare), 1);
        }
        for i in 0..20 {
            common.add(PaperCard::new(format!("C{i}"), "NEW", 1, Rarity::Common), 1);
        }
        Storage::from_items("Print sheets", [rare, common])
    }

    #[test]
    fn test_edition_sheet_preferred_over_bare_slot() {
        let sheets = sheets();
        let generator = BoosterGenerator::new(&sheets);
        let template = SealedTemplate::for_edition("NEW", []).with_slot("Rare", 1);

        assert_eq!(generator.sheet_for(&template, "Rare").unwrap().name(), "NEW Rare");
        assert_eq!(generator.sheet_for(&template, "Common").unwrap().name(), "Common");
        assert!(generator.sheet_for(&template, "Mythic").is_none());
    }

    #[test]
    fn test_generate_is_deterministic() {
        let sheets = sheets();
        let generator = BoosterGenerator::new(&sheets);
        let template = SealedTemplate::for_edition("NEW", [])
            .with_slot("Rare", 1)
            .with_slot("Common", 10)
            .with_slot("Mythic", 1);

        let a = generator.generate(&template, &mut BoosterRng::new(5));
        let b = generator.generate(&template, &mut BoosterRng::new(5));
        assert_eq!(a.len(), 11);
        assert_eq!(a, b);
        assert_eq!(a[0].rarity, Rarity::Rare);
    }

    #[test]
    fn test_oversized_slot_is_capped_by_sheet() {
        let sheets = sheets();
        let generator = BoosterGenerator::new(&sheets);
        let template = SealedTemplate::new("Huge").with_slot("Common", u32::MAX);

        let cards = generator.generate(&template, &mut BoosterRng::new(9));
        assert_eq!(cards.len(), 20);
    }
}
