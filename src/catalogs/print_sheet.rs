//! Print sheets - weighted card pools booster slots draw from.
//!
//! Sheets come from two places: the `printsheets.txt` block file, and one
//! automatic sheet per edition and rarity (`"M10 Rare"`). The file format:
//!
//! ```text
//! [NEW Special]
//! 3 Lightning Bolt|NEW
//! Forest|OLD|2
//! ```
//!
//! A leading number is the entry's weight (default 1). When the rest of the
//! line names no known card, the whole line is tried as a card name with
//! weight 1, so `1996 World Champion|PCEL` still resolves.

use std::path::Path;

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::rng::BoosterRng;
use super::storage::{Named, Storage};
use crate::cards::{card_key, CardDb, CardRequest, PaperCard, ART_INDEX_BASE};
use crate::editions::{EditionRegistry, Rarity};
use crate::error::{CardDbError, Result};

/// A named, weighted pool of printings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrintSheet {
    pub name: String,
    entries: Vec<(PaperCard, u32)>,
}

impl PrintSheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Add a card; repeated adds of the same printing accumulate weight,
    /// saturating at `u32::MAX`.
    pub fn add(&mut self, card: PaperCard, weight: u32) {
        if let Some((_, w)) = self.entries.iter_mut().find(|(c, _)| *c == card) {
            *w = w.saturating_add(weight);
        } else {
            self.entries.push((card, weight));
        }
    }

    /// Cards with their weights, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&PaperCard, u32)> {
        self.entries.iter().map(|(c, w)| (c, *w))
    }

    /// Whether the sheet holds this exact printing, foil included.
    #[must_use]
    pub fn contains(&self, card: &PaperCard) -> bool {
        self.entries.iter().any(|(c, _)| c == card)
    }

    /// Sum of all entry weights.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|(_, w)| u64::from(*w)).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Draw up to `count` distinct cards, weighted.
    pub fn random(&self, count: usize, rng: &mut BoosterRng) -> Vec<PaperCard> {
        let mut weights: Vec<u32> = self.entries.iter().map(|(_, w)| *w).collect();
        let mut drawn = Vec::with_capacity(count.min(self.entries.len()));

        while drawn.len() < count {
            let Some(idx) = rng.choose_weighted(&weights) else {
                break;
            };
            weights[idx] = 0;
            drawn.push(self.entries[idx].0.clone());
        }
        drawn
    }
}

impl Named for PrintSheet {
    fn name(&self) -> &str {
        &self.name
    }
}

/// One card line of a sheet, before resolution.
///
/// A leading number is read as a weight, but card names may start with
/// digits too (`1996 World Champion`), so the whole line is kept as an
/// alternative request.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SheetLine {
    weight: u32,
    request: CardRequest,
    unweighted: Option<CardRequest>,
}

impl SheetLine {
    fn parse(line: &str) -> std::result::Result<Self, &'static str> {
        match line.split_once(' ') {
            Some((count, rest)) if !count.is_empty() && count.chars().all(|c| c.is_ascii_digit()) => {
                let weight = count.parse().map_err(|_| "weight out of range")?;
                Ok(Self {
                    weight,
                    request: CardRequest::parse(rest.trim()),
                    unweighted: Some(CardRequest::parse(line)),
                })
            }
            _ => Ok(Self {
                weight: 1,
                request: CardRequest::parse(line),
                unweighted: None,
            }),
        }
    }

    /// Resolve the weighted reading first, then the whole line with weight 1.
    fn resolve(&self, cards: &CardDb) -> Option<(PaperCard, u32)> {
        cards
            .get_card_from_request(&self.request)
            .map(|card| (card, self.weight))
            .or_else(|| {
                let whole = self.unweighted.as_ref()?;
                cards.get_card_from_request(whole).map(|card| (card, 1))
            })
    }
}

/// Parse a print sheet file body. Card lines are returned unresolved.
fn parse_sheets(path: &Path, text: &str) -> Result<Vec<(String, Vec<SheetLine>)>> {
    let mut sheets: Vec<(String, Vec<SheetLine>)> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| CardDbError::parse(path, idx + 1, "malformed sheet header"))?;
            sheets.push((name.to_string(), Vec::new()));
            continue;
        }

        let Some((_, entries)) = sheets.last_mut() else {
            return Err(CardDbError::parse(path, idx + 1, "card entry before any [sheet] header"));
        };
        entries.push(SheetLine::parse(line).map_err(|msg| CardDbError::parse(path, idx + 1, msg))?);
    }

    Ok(sheets)
}

/// Build the print sheet catalog from the block file and the editions.
///
/// Entries that do not resolve against `cards` are logged and skipped. A
/// missing file contributes no sheets; edition sheets are still built.
pub fn load_print_sheets(
    path: &Path,
    cards: &CardDb,
    editions: &EditionRegistry,
) -> Result<Storage<PrintSheet>> {
    let mut storage = Storage::from_items("Print sheets", edition_sheets(cards, editions));

    if !path.exists() {
        warn!(path = %path.display(), "print sheet file not found");
        return Ok(storage);
    }

    let text = std::fs::read_to_string(path).map_err(|source| CardDbError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    for (name, entries) in parse_sheets(path, &text)? {
        let mut sheet = PrintSheet::new(name);
        for line in entries {
            match line.resolve(cards) {
                Some((card, weight)) => sheet.add(card, weight),
                None => warn!(
                    sheet = %sheet.name,
                    card = %line.request.name,
                    edition = ?line.request.edition,
                    "print sheet entry does not resolve, skipping"
                ),
            }
        }
        storage.insert(sheet);
    }

    debug!(sheets = storage.len(), "built print sheets");
    Ok(storage)
}

/// One sheet per (edition, rarity) with every visible printing, weight 1.
fn edition_sheets(cards: &CardDb, editions: &EditionRegistry) -> Vec<PrintSheet> {
    let mut sheets = Vec::new();
    for edition in editions.iter() {
        let mut by_rarity: FxHashMap<Rarity, PrintSheet> = FxHashMap::default();
        let mut next_art: FxHashMap<String, u32> = FxHashMap::default();

        for entry in &edition.cards {
            let art = next_art
                .entry(card_key(&entry.name))
                .or_insert(ART_INDEX_BASE);
            let art_index = *art;
            *art += 1;

            let Some(card) = cards.get_card_with_art(&entry.name, &edition.code, art_index) else {
                continue;
            };
            by_rarity
                .entry(entry.rarity)
                .or_insert_with(|| {
                    PrintSheet::new(format!("{} {}", edition.code, entry.rarity.label()))
                })
                .add(card, 1);
        }

        let mut ordered: Vec<_> = by_rarity.into_iter().collect();
        ordered.sort_by_key(|(rarity, _)| *rarity);
        sheets.extend(ordered.into_iter().map(|(_, sheet)| sheet));
    }
    sheets
}
