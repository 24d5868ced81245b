//! Cart assembly
//!
//! Client-side accumulation of modifier selections per product
//! instance, cardinality validation, and the snapshot step that turns
//! cart lines into immutable order-line candidates. All cart state is
//! owned by a [`CartSession`] scoped to one checkout session — created
//! at session start, cleared at checkout completion or abandonment.
//!
//! Line totals are derived values: they are recomputed from the current
//! selections on every read and never stored where they could drift.

use rust_decimal::Decimal;
use shared::{AppError, AppResult, ModifierGroup, OrderLine, Product};

use crate::pricing::{self, Selections};

/// A not-yet-persisted candidate order line: one product instance plus
/// its modifier selections.
#[derive(Debug, Clone)]
pub struct CartLine {
    product: Product,
    quantity: i32,
    selections: Selections,
}

impl CartLine {
    /// New line for one unit of a product, nothing selected yet
    pub fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
            selections: Selections::new(),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn set_quantity(&mut self, quantity: i32) -> AppResult<()> {
        if quantity < 1 {
            return Err(AppError::validation(format!(
                "quantity must be at least 1, got {quantity}"
            )));
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Selected modifier ids for a group, in selection order
    pub fn selected(&self, group_id: &str) -> &[String] {
        self.selections
            .get(group_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Select a modifier.
    ///
    /// Single-choice groups (`max_selection == 1`) replace the prior
    /// selection — the set can never grow past one element. Multi-choice
    /// groups toggle membership idempotently: selecting an
    /// already-selected id removes it.
    pub fn select(&mut self, group_id: &str, modifier_id: &str) -> AppResult<()> {
        let group = self.product.group(group_id).ok_or_else(|| {
            AppError::validation(format!(
                "product {} has no modifier group {group_id}",
                self.product.id
            ))
        })?;
        if group.modifier(modifier_id).is_none() {
            return Err(AppError::validation(format!(
                "group {group_id} has no modifier {modifier_id}"
            )));
        }

        let selected = self.selections.entry(group_id.to_string()).or_default();
        if group.is_single_choice() {
            selected.clear();
            selected.push(modifier_id.to_string());
        } else if let Some(pos) = selected.iter().position(|id| id == modifier_id) {
            selected.remove(pos);
        } else {
            selected.push(modifier_id.to_string());
        }
        Ok(())
    }

    /// Recomputed line total: `(price + Σ selected deltas) × quantity`
    pub fn line_total(&self) -> Decimal {
        pricing::line_price(&self.product, &self.selections, self.quantity)
    }

    /// Check every modifier group of the product against its
    /// cardinality bounds. Runs locally, before any store call.
    pub fn validate(&self) -> AppResult<()> {
        for group in &self.product.modifier_groups {
            let selected = self.selected(&group.id);
            if !validate_selections(group, selected) {
                return Err(AppError::validation(format!(
                    "\"{}\" requires between {} and {} selections, got {}",
                    group.name,
                    group.min_selection,
                    group.max_selection,
                    selected.len()
                )));
            }
        }
        // Selections naming a group the product does not have are stale
        // client state and must not slip through.
        for group_id in self.selections.keys() {
            if self.product.group(group_id).is_none() {
                return Err(AppError::validation(format!(
                    "product {} has no modifier group {group_id}",
                    self.product.id
                )));
            }
        }
        Ok(())
    }

    /// Snapshot this line for persistence: names and prices are fixed
    /// here and never re-derived from the live catalog.
    pub fn to_order_line(&self) -> OrderLine {
        let mut names = Vec::new();
        for group in &self.product.modifier_groups {
            for id in self.selected(&group.id) {
                if let Some(modifier) = group.modifier(id) {
                    names.push(modifier.name.clone());
                }
            }
        }
        OrderLine {
            product_name: self.product.name.clone(),
            unit_price: self.product.price,
            quantity: self.quantity,
            options_summary: names.join(", "),
            line_total: self.line_total(),
        }
    }
}

/// Does the selected set satisfy the group's cardinality bounds?
///
/// Also rejects ids that do not belong to the group.
pub fn validate_selections(group: &ModifierGroup, selected: &[String]) -> bool {
    let count = selected.len();
    if count < group.min_selection as usize || count > group.max_selection as usize {
        return false;
    }
    selected.iter().all(|id| group.modifier(id).is_some())
}

/// Session-scoped cart state
#[derive(Debug, Default)]
pub struct CartSession {
    lines: Vec<CartLine>,
}

impl CartSession {
    /// New empty cart at session start
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_line(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line_mut(&mut self, index: usize) -> Option<&mut CartLine> {
        self.lines.get_mut(index)
    }

    pub fn remove_line(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of recomputed line totals, unrounded
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Validate every line. Checkout is rejected here, locally, before
    /// any network call.
    pub fn validate(&self) -> AppResult<()> {
        if self.lines.is_empty() {
            return Err(AppError::validation("cart is empty"));
        }
        for line in &self.lines {
            line.validate()?;
        }
        Ok(())
    }

    /// Snapshot all lines into immutable order-line candidates
    pub fn to_order_lines(&self) -> Vec<OrderLine> {
        self.lines.iter().map(CartLine::to_order_line).collect()
    }

    /// Teardown at checkout completion or abandonment
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Modifier;

    fn product() -> Product {
        Product {
            id: "p1".into(),
            name: "Classic Burger".into(),
            description: "House burger".into(),
            price: Decimal::new(1000, 2),
            image_url: String::new(),
            is_popular: false,
            category: "burgers".into(),
            modifier_groups: vec![
                ModifierGroup {
                    id: "doneness".into(),
                    name: "Doneness".into(),
                    min_selection: 1,
                    max_selection: 1,
                    modifiers: vec![
                        Modifier {
                            id: "rare".into(),
                            name: "Rare".into(),
                            price_delta: Decimal::ZERO,
                        },
                        Modifier {
                            id: "well".into(),
                            name: "Well Done".into(),
                            price_delta: Decimal::ZERO,
                        },
                    ],
                },
                ModifierGroup {
                    id: "extras".into(),
                    name: "Extras".into(),
                    min_selection: 0,
                    max_selection: 3,
                    modifiers: vec![
                        Modifier {
                            id: "bacon".into(),
                            name: "Extra Bacon".into(),
                            price_delta: Decimal::new(200, 2),
                        },
                        Modifier {
                            id: "cheese".into(),
                            name: "Extra Cheese".into(),
                            price_delta: Decimal::new(150, 2),
                        },
                    ],
                },
            ],
        }
    }

    #[test]
    fn single_choice_replaces_prior_selection() {
        let mut line = CartLine::new(product());
        line.select("doneness", "rare").unwrap();
        line.select("doneness", "well").unwrap();
        // Never a two-element set.
        assert_eq!(line.selected("doneness"), ["well".to_string()]);
    }

    #[test]
    fn multi_choice_toggles_idempotently() {
        let mut line = CartLine::new(product());
        line.select("extras", "bacon").unwrap();
        line.select("extras", "cheese").unwrap();
        assert_eq!(line.selected("extras").len(), 2);

        // Selecting an already-selected id removes it.
        line.select("extras", "bacon").unwrap();
        assert_eq!(line.selected("extras"), ["cheese".to_string()]);
    }

    #[test]
    fn select_rejects_unknown_group_and_modifier() {
        let mut line = CartLine::new(product());
        assert!(line.select("sauces", "bbq").is_err());
        assert!(line.select("extras", "bbq").is_err());
    }

    #[test]
    fn line_total_tracks_selections_and_quantity() {
        // $10.00 + $2.00 modifier, quantity 2 -> $24.00
        let mut line = CartLine::new(product());
        line.select("doneness", "rare").unwrap();
        line.select("extras", "bacon").unwrap();
        line.set_quantity(2).unwrap();
        assert_eq!(line.line_total(), Decimal::new(2400, 2));

        // Deselect the extra: the total is recomputed, never stale.
        line.select("extras", "bacon").unwrap();
        assert_eq!(line.line_total(), Decimal::new(2000, 2));
    }

    #[test]
    fn quantity_below_one_is_rejected() {
        let mut line = CartLine::new(product());
        assert!(line.set_quantity(0).is_err());
        assert!(line.set_quantity(-2).is_err());
        assert_eq!(line.quantity(), 1);
    }

    #[test]
    fn validation_enforces_group_cardinality() {
        // Required group untouched: rejected.
        let line = CartLine::new(product());
        assert!(line.validate().is_err());

        let mut line = CartLine::new(product());
        line.select("doneness", "rare").unwrap();
        assert!(line.validate().is_ok());
    }

    #[test]
    fn validate_selections_checks_bounds_and_membership() {
        let p = product();
        let extras = p.group("extras").unwrap();
        assert!(validate_selections(extras, &[]));
        assert!(validate_selections(extras, &["bacon".into()]));
        assert!(!validate_selections(extras, &["bbq".into()]));

        let doneness = p.group("doneness").unwrap();
        assert!(!validate_selections(doneness, &[]));
        assert!(!validate_selections(
            doneness,
            &["rare".into(), "well".into()]
        ));
    }

    #[test]
    fn order_line_snapshot_flattens_modifier_names() {
        let mut line = CartLine::new(product());
        line.select("doneness", "rare").unwrap();
        line.select("extras", "bacon").unwrap();
        line.select("extras", "cheese").unwrap();
        line.set_quantity(2).unwrap();

        let snapshot = line.to_order_line();
        assert_eq!(snapshot.product_name, "Classic Burger");
        assert_eq!(snapshot.unit_price, Decimal::new(1000, 2));
        assert_eq!(snapshot.quantity, 2);
        assert_eq!(snapshot.options_summary, "Rare, Extra Bacon, Extra Cheese");
        assert_eq!(snapshot.line_total, Decimal::new(2700, 2));
    }

    #[test]
    fn session_subtotal_sums_lines() {
        let mut cart = CartSession::new();

        let mut a = CartLine::new(product());
        a.select("doneness", "rare").unwrap();
        a.select("extras", "bacon").unwrap();
        a.set_quantity(2).unwrap();
        cart.add_line(a);

        let mut b = CartLine::new(product());
        b.select("doneness", "well").unwrap();
        cart.add_line(b);

        assert_eq!(cart.subtotal(), Decimal::new(3400, 2));
        assert!(cart.validate().is_ok());
    }

    #[test]
    fn empty_cart_fails_validation() {
        let cart = CartSession::new();
        assert!(cart.validate().is_err());
    }

    #[test]
    fn clear_resets_the_session() {
        let mut cart = CartSession::new();
        let mut line = CartLine::new(product());
        line.select("doneness", "rare").unwrap();
        cart.add_line(line);
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.is_empty());
    }
}
