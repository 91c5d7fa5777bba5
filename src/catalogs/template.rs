//! Sealed product templates: boosters, starters, tournament packs.
//!
//! A template is a list of slots, each drawing some number of cards from a
//! print sheet. Template files hold one template per line:
//!
//! ```text
//! # comment
//! Starter 1999: 1 Rare, 3 Uncommon, 11 Common
//! NEW Starter|NEW: 2 Rare, 8 Common
//! ```
//!
//! The optional `|CODE` after the name ties the template to an edition, so
//! its slots draw from that edition's sheets first.

use std::path::Path;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use super::storage::{Named, Storage};
use crate::error::{CardDbError, Result};

/// Largest card count a single slot may ask for.
pub const MAX_SLOT_COUNT: u32 = 1000;

/// One booster slot: `count` cards from the sheet called `slot`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoosterSlot {
    pub slot: String,
    pub count: u32,
}

impl BoosterSlot {
    pub fn new(slot: impl Into<String>, count: u32) -> Self {
        Self {
            slot: slot.into(),
            count,
        }
    }
}

/// A sealed product layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealedTemplate {
    pub name: String,
    /// Edition whose sheets the slots draw from first.
    pub edition: Option<String>,
    pub slots: SmallVec<[BoosterSlot; 4]>,
}

impl SealedTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            edition: None,
            slots: SmallVec::new(),
        }
    }

    /// The booster template of an edition, named after its code.
    pub fn for_edition(code: &str, slots: impl IntoIterator<Item = BoosterSlot>) -> Self {
        Self {
            name: code.to_string(),
            edition: Some(code.to_string()),
            slots: slots.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn with_slot(mut self, slot: impl Into<String>, count: u32) -> Self {
        self.slots.push(BoosterSlot::new(slot, count));
        self
    }

    /// Total cards across all slots.
    #[must_use]
    pub fn card_count(&self) -> u32 {
        self.slots
            .iter()
            .fold(0u32, |total, s| total.saturating_add(s.count))
    }

    /// Parse one template line. Errors are plain messages; the reader adds
    /// file and line.
    pub fn parse_line(line: &str) -> std::result::Result<Self, String> {
        let (head, body) = line
            .split_once(':')
            .ok_or_else(|| "expected 'Name: <count> <slot>, ...'".to_string())?;

        let (name, edition) = match head.split_once('|') {
            Some((name, code)) => (name.trim(), Some(code.trim().to_string())),
            None => (head.trim(), None),
        };
        if name.is_empty() {
            return Err("template name is empty".to_string());
        }

        let mut template = Self {
            name: name.to_string(),
            edition,
            slots: SmallVec::new(),
        };
        for part in body.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (count, slot) = part
                .split_once(char::is_whitespace)
                .ok_or_else(|| format!("slot {part:?} needs a count and a sheet name"))?;
            let count: u32 = count
                .parse()
                .map_err(|_| format!("slot count {count:?} is not a number"))?;
            if count > MAX_SLOT_COUNT {
                return Err(format!("slot count {count} exceeds {MAX_SLOT_COUNT}"));
            }
            template.slots.push(BoosterSlot::new(slot.trim(), count));
        }
        if template.slots.is_empty() {
            return Err(format!("template {name:?} has no slots"));
        }
        Ok(template)
    }
}

impl Named for SealedTemplate {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Read a template file into a named storage.
///
/// A missing file is an empty catalog; an unreadable file or a malformed
/// line is an error.
pub fn read_templates(storage_name: &str, path: &Path) -> Result<Storage<SealedTemplate>> {
    if !path.exists() {
        warn!(path = %path.display(), "template file not found, catalog is empty");
        return Ok(Storage::empty(storage_name));
    }

    let text = std::fs::read_to_string(path).map_err(|source| CardDbError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut templates = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let template =
            SealedTemplate::parse_line(line).map_err(|msg| CardDbError::parse(path, idx + 1, msg))?;
        templates.push(template);
    }

    debug!(catalog = storage_name, count = templates.len(), "read templates");
    Ok(Storage::from_items(storage_name, templates))
}
