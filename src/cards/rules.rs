//! Card rules - the printing-independent record of a card.
//!
//! `CardRules` holds what every printing of a card shares: its name,
//! type line and rules text. Where it was printed is the edition
//! registry's business; how it was printed is `PaperCard`'s.

use serde::{Deserialize, Serialize};

/// Rules record for one named card.
///
/// ## Example
///
/// ```
/// use ccg_card_db::cards::CardRules;
///
/// let forest = CardRules::new("Forest").with_type("Basic Land - Forest").basic_land();
/// assert!(forest.is_basic_land());
/// assert!(!forest.is_variant());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRules {
    /// Card name, unique within one card index.
    pub name: String,

    #[serde(default)]
    pub type_line: String,

    #[serde(default)]
    pub oracle_text: String,

    /// Governed by an alternate rule set (planes, schemes, ...).
    #[serde(default)]
    pub variant: bool,

    #[serde(default)]
    pub basic_land: bool,
}

impl CardRules {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_line: String::new(),
            oracle_text: String::new(),
            variant: false,
            basic_land: false,
        }
    }

    #[must_use]
    pub fn with_type(mut self, type_line: impl Into<String>) -> Self {
        self.type_line = type_line.into();
        self
    }

    #[must_use]
    pub fn with_oracle(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = text.into();
        self
    }

    /// Mark as a variant-rules card.
    #[must_use]
    pub fn variant(mut self) -> Self {
        self.variant = true;
        self
    }

    /// Mark as a basic land.
    #[must_use]
    pub fn basic_land(mut self) -> Self {
        self.basic_land = true;
        self
    }

    #[must_use]
    pub fn is_variant(&self) -> bool {
        self.variant
    }

    #[must_use]
    pub fn is_basic_land(&self) -> bool {
        self.basic_land
    }

    /// Lowercase name with every non-alphanumeric character replaced by `_`.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

/// Case-folded card name used to key printings and rules.
///
/// Full Unicode lowercasing, so "ÆTHER VIAL" and "æther vial" share a key.
#[must_use]
pub fn card_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalize a card or token name for keyed lookup.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c
            } else {
                '_'
            }
        })
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_builder() {
        let rules = CardRules::new("Lightning Bolt")
            .with_type("Instant")
            .with_oracle("Lightning Bolt deals 3 damage to any target.");

        assert_eq!(rules.name, "Lightning Bolt");
        assert_eq!(rules.type_line, "Instant");
        assert!(!rules.is_variant());
        assert!(!rules.is_basic_land());
    }

    #[test]
    fn test_normalized_name() {
        let token = CardRules::new("Goblin Token (R 1/1)");
        assert_eq!(token.normalized_name(), "goblin_token__r_1_1_");
        assert_eq!(normalize_name("  Elf Warrior "), "elf_warrior");
        assert_eq!(normalize_name("Æther Sprite"), "æther_sprite");
    }

    #[test]
    fn test_card_key_folds_unicode() {
        assert_eq!(card_key(" ÆTHER VIAL "), "æther vial");
        assert_eq!(card_key("Æther Vial"), card_key("æther vial"));
    }

    #[test]
    fn test_rules_serialization_defaults() {
        let rules: CardRules = serde_json::from_str(r#"{"name":"X"}"#).unwrap();
        assert_eq!(rules, CardRules::new("X"));
    }
}
