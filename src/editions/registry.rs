//! Edition registry - the ordered timeline of editions.
//!
//! The registry is read-only once built. Parsing edition definitions is the
//! reader's business; the registry only orders and indexes what it is given.

use chrono::NaiveDate;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

use super::edition::{Edition, EditionType};
use crate::catalogs::SealedTemplate;
use crate::error::Result;

/// Source of edition records.
pub trait EditionReader {
    /// Read every edition. Order does not matter.
    fn read_editions(&self) -> Result<Vec<Edition>>;
}

impl EditionReader for Vec<Edition> {
    fn read_editions(&self) -> Result<Vec<Edition>> {
        Ok(self.clone())
    }
}

impl EditionReader for [Edition] {
    fn read_editions(&self) -> Result<Vec<Edition>> {
        Ok(self.to_vec())
    }
}

/// Registry of editions in timeline order.
///
/// ## Example
///
/// ```
/// use ccg_card_db::editions::{Edition, EditionRegistry, EditionType};
/// use chrono::NaiveDate;
///
/// let registry = EditionRegistry::new(vec![
///     Edition::new("NEW", "New", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), EditionType::Expansion),
///     Edition::new("OLD", "Old", NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), EditionType::Core),
/// ]);
///
/// let codes: Vec<_> = registry.iter().map(|e| e.code.as_str()).collect();
/// assert_eq!(codes, vec!["OLD", "NEW"]);
/// assert!(registry.get("new").is_some());
/// ```
#[derive(Clone, Debug)]
pub struct EditionRegistry {
    editions: Vec<Edition>,
    by_code: FxHashMap<String, usize>,
    by_alias: FxHashMap<String, usize>,
    unknown: Edition,
}

impl Default for EditionRegistry {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

fn key(code: &str) -> String {
    code.to_ascii_uppercase()
}

impl EditionRegistry {
    /// Build a registry. Duplicate codes keep the first record supplied,
    /// whatever its release date.
    #[must_use]
    pub fn new(editions: Vec<Edition>) -> Self {
        let mut seen = FxHashSet::default();
        let mut kept: Vec<Edition> = editions
            .into_iter()
            .filter(|edition| {
                let code = key(&edition.code);
                if code == Edition::UNKNOWN_CODE || !seen.insert(code) {
                    warn!(code = %edition.code, "skipping duplicate edition code");
                    return false;
                }
                true
            })
            .collect();
        kept.sort();

        let mut by_code = FxHashMap::default();
        let mut by_alias = FxHashMap::default();
        for (idx, edition) in kept.iter().enumerate() {
            by_code.insert(key(&edition.code), idx);
            if let Some(alias) = &edition.alias {
                by_alias.insert(key(alias), idx);
            }
        }

        Self {
            editions: kept,
            by_code,
            by_alias,
            unknown: Edition::unknown(),
        }
    }

    /// Build a registry from a reader. Reader failures propagate unchanged.
    pub fn from_reader<R: EditionReader + ?Sized>(reader: &R) -> Result<Self> {
        Ok(Self::new(reader.read_editions()?))
    }

    /// Look up an edition by code (case-insensitive), then by alias.
    ///
    /// The placeholder `"???"` edition always resolves.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Edition> {
        let code = key(code);
        if code == Edition::UNKNOWN_CODE {
            return Some(&self.unknown);
        }
        self.by_code
            .get(&code)
            .or_else(|| self.by_alias.get(&code))
            .map(|&idx| &self.editions[idx])
    }

    /// Look up an edition by alias only.
    #[must_use]
    pub fn get_by_alias(&self, alias: &str) -> Option<&Edition> {
        self.by_alias.get(&key(alias)).map(|&idx| &self.editions[idx])
    }

    /// Release date of an edition, if known.
    #[must_use]
    pub fn release_date(&self, code: &str) -> Option<NaiveDate> {
        self.get(code).map(|e| e.date)
    }

    /// Whether `code` is a registered edition code. Aliases do not count.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(&key(code))
    }

    /// The placeholder edition for cards with no known printing.
    #[must_use]
    pub fn unknown(&self) -> &Edition {
        &self.unknown
    }

    /// Editions oldest first. The placeholder edition is not included.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Edition> {
        self.editions.iter()
    }

    /// Editions of one set type, oldest first.
    pub fn of_type(&self, set_type: EditionType) -> impl Iterator<Item = &Edition> {
        self.editions.iter().filter(move |e| e.set_type == set_type)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.editions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.editions.is_empty()
    }

    /// Booster templates for every edition that defines a booster layout.
    ///
    /// Each template is named after its edition code.
    pub fn booster_templates(&self) -> impl Iterator<Item = SealedTemplate> + '_ {
        self.editions
            .iter()
            .filter(|e| !e.booster.is_empty())
            .map(|e| SealedTemplate::for_edition(&e.code, e.booster.iter().cloned()))
    }
}

impl<'a> IntoIterator for &'a EditionRegistry {
    type Item = &'a Edition;
    type IntoIter = std::slice::Iter<'a, Edition>;

    fn into_iter(self) -> Self::IntoIter {
        self.editions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> EditionRegistry {
        EditionRegistry::new(vec![
            Edition::new("NEW", "New", date(2020, 1, 1), EditionType::Expansion)
                .with_booster_slot("Common", 10),
            Edition::new("OLD", "Old", date(2000, 1, 1), EditionType::Core).with_alias("OL"),
            Edition::new("MID", "Mid", date(2010, 1, 1), EditionType::Reprint),
        ])
    }

    #[test]
    fn test_timeline_order() {
        let registry = sample();
        let codes: Vec<_> = registry.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["OLD", "MID", "NEW"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_lookup_by_code_and_alias() {
        let registry = sample();
        assert_eq!(registry.get("mid").unwrap().code, "MID");
        assert_eq!(registry.get("OL").unwrap().code, "OLD");
        assert!(registry.get("XYZ").is_none());
        assert!(!registry.contains("OL"));
        assert_eq!(registry.get_by_alias("ol").unwrap().code, "OLD");
        assert!(registry.get_by_alias("OLD").is_none());
    }

    #[test]
    fn test_unknown_edition_resolves_but_is_not_listed() {
        let registry = sample();
        let unknown = registry.get(Edition::UNKNOWN_CODE).unwrap();
        assert_eq!(unknown.set_type, EditionType::Unknown);
        assert!(registry.iter().all(|e| e.code != Edition::UNKNOWN_CODE));
    }

    #[test]
    fn test_duplicate_codes_keep_first() {
        let registry = EditionRegistry::new(vec![
            Edition::new("DUP", "First", date(2000, 1, 1), EditionType::Core),
            Edition::new("DUP", "Second", date(2001, 1, 1), EditionType::Core),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("DUP").unwrap().name, "First");
    }

    #[test]
    fn test_duplicate_codes_keep_first_supplied_not_earliest() {
        let registry = EditionRegistry::new(vec![
            Edition::new("LAT", "Later", date(2015, 1, 1), EditionType::Core),
            Edition::new("DUP", "First", date(2010, 1, 1), EditionType::Core).with_alias("D1"),
            Edition::new("dup", "Second", date(1999, 1, 1), EditionType::Core).with_alias("D2"),
        ]);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("DUP").unwrap().name, "First");
        assert_eq!(registry.get("D1").unwrap().name, "First");
        assert!(registry.get("D2").is_none());
        let codes: Vec<_> = registry.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["DUP", "LAT"]);
    }

    #[test]
    fn test_booster_templates() {
        let registry = sample();
        let templates: Vec<_> = registry.booster_templates().collect();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].name, "NEW");
        assert_eq!(templates[0].card_count(), 10);
    }

    #[test]
    fn test_from_reader() {
        let editions = vec![Edition::new("A", "A", date(2000, 1, 1), EditionType::Core)];
        let registry = EditionRegistry::from_reader(&editions).unwrap();
        assert_eq!(registry.len(), 1);
    }
}
