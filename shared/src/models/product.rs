//! Product Model
//!
//! Catalog entities as fetched for a checkout session. Immutable once
//! fetched: an order snapshots names and prices at creation time, so
//! later catalog edits never retroactively change a placed order.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A selectable option inside a modifier group (e.g. "Extra Bacon")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Modifier {
    pub id: String,
    pub name: String,
    /// Additive price delta in currency units. Zero or positive.
    pub price_delta: Decimal,
}

/// A group of modifiers with selection cardinality bounds
/// (e.g. "Doneness": exactly one; "Extras": any number)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModifierGroup {
    pub id: String,
    pub name: String,
    pub min_selection: u32,
    /// Always >= min_selection. 1 means single-choice (replace on
    /// select), greater means independent toggles.
    pub max_selection: u32,
    pub modifiers: Vec<Modifier>,
}

impl ModifierGroup {
    /// Single-choice groups replace the prior selection instead of
    /// accumulating.
    pub fn is_single_choice(&self) -> bool {
        self.max_selection == 1
    }

    pub fn is_required(&self) -> bool {
        self.min_selection > 0
    }

    pub fn modifier(&self, modifier_id: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.id == modifier_id)
    }
}

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit price in currency units, non-negative
    pub price: Decimal,
    pub image_url: String,
    pub is_popular: bool,
    /// Category tag (plain string, catalog management is external)
    pub category: String,
    pub modifier_groups: Vec<ModifierGroup>,
}

impl Product {
    pub fn group(&self, group_id: &str) -> Option<&ModifierGroup> {
        self.modifier_groups.iter().find(|g| g.id == group_id)
    }
}
