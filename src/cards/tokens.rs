//! Token index.
//!
//! Tokens are keyed by normalized name (`goblin_r_1_1`) rather than display
//! name. The index is built once and never written afterwards.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::info;

use super::paper::{PaperCard, ART_INDEX_BASE};
use super::rules::{normalize_name, CardRules};
use crate::editions::{EditionRegistry, Rarity};

/// Index of token printings by normalized name.
#[derive(Debug)]
pub struct TokenDb {
    editions: Arc<EditionRegistry>,
    rules: FxHashMap<String, Arc<CardRules>>,
    printings: FxHashMap<String, Vec<PaperCard>>,
}

impl TokenDb {
    /// Build the index. Tokens no edition lists get one printing in the
    /// unknown edition.
    #[must_use]
    pub fn new(tokens: impl IntoIterator<Item = CardRules>, editions: Arc<EditionRegistry>) -> Self {
        let rules: FxHashMap<String, Arc<CardRules>> = tokens
            .into_iter()
            .map(|t| (t.normalized_name(), Arc::new(t)))
            .collect();

        let mut printings: FxHashMap<String, Vec<PaperCard>> = FxHashMap::default();
        for edition in editions.iter() {
            let mut next_art: FxHashMap<String, u32> = FxHashMap::default();
            for entry in &edition.cards {
                let token_key = normalize_name(&entry.name);
                let Some(rule) = rules.get(&token_key) else {
                    continue;
                };
                let art = next_art.entry(token_key.clone()).or_insert(ART_INDEX_BASE);
                printings.entry(token_key).or_default().push(PaperCard::new(
                    rule.name.clone(),
                    edition.code.clone(),
                    *art,
                    Rarity::Token,
                ));
                *art += 1;
            }
        }

        for (token_key, rule) in &rules {
            printings.entry(token_key.clone()).or_insert_with(|| {
                vec![PaperCard::new(
                    rule.name.clone(),
                    editions.unknown().code.clone(),
                    ART_INDEX_BASE,
                    Rarity::Token,
                )]
            });
        }

        info!(tokens = rules.len(), "built token index");
        Self {
            editions,
            rules,
            printings,
        }
    }

    /// Most recent printing of a token.
    #[must_use]
    pub fn get_token(&self, name: &str) -> Option<PaperCard> {
        self.printings
            .get(&normalize_name(name))?
            .iter()
            .max_by_key(|c| {
                let date = self.editions.release_date(&c.edition);
                (date, std::cmp::Reverse(c.art_index))
            })
            .cloned()
    }

    /// First printing of a token in one edition.
    #[must_use]
    pub fn get_token_from_edition(&self, name: &str, edition: &str) -> Option<PaperCard> {
        self.printings
            .get(&normalize_name(name))?
            .iter()
            .filter(|c| c.edition.eq_ignore_ascii_case(edition))
            .min_by_key(|c| c.art_index)
            .cloned()
    }

    /// Rules record for a token name.
    #[must_use]
    pub fn rules(&self, name: &str) -> Option<&CardRules> {
        self.rules.get(&normalize_name(name)).map(Arc::as_ref)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(&normalize_name(name))
    }

    /// Number of distinct tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editions::{Edition, EditionType};
    use chrono::NaiveDate;

    fn tokens() -> TokenDb {
        let editions = Arc::new(EditionRegistry::new(vec![
            Edition::new("OLD", "Old", NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(), EditionType::Core)
                .with_card("Goblin", Rarity::Token),
            Edition::new("NEW", "New", NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), EditionType::Core)
                .with_card("Goblin", Rarity::Token)
                .with_card("Goblin", Rarity::Token),
        ]));
        TokenDb::new([CardRules::new("Goblin"), CardRules::new("Spirit Warrior")], editions)
    }

    #[test]
    fn test_token_lookup() {
        let db = tokens();
        assert_eq!(db.len(), 2);

        let latest = db.get_token("goblin").unwrap();
        assert_eq!((latest.edition.as_str(), latest.art_index), ("NEW", 1));

        let old = db.get_token_from_edition("Goblin", "OLD").unwrap();
        assert_eq!(old.rarity, Rarity::Token);
    }

    #[test]
    fn test_unlisted_token_gets_placeholder() {
        let db = tokens();
        assert!(db.contains("spirit_warrior"));
        assert_eq!(db.get_token("Spirit Warrior").unwrap().edition, "???");
        assert!(db.get_token("Dragon").is_none());
    }
}
