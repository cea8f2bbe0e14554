//! Shopping cart container.
//!
//! Lines carry full product snapshots, so a cart renders and totals itself
//! without catalog lookups. After every mutation the whole line list is
//! written back through the storage port as one JSON value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStorage;
use crate::types::{LineId, Product};

/// Storage key the cart persists under.
pub const STORAGE_KEY: &str = "cart";

/// One cart line: a product variant selection with a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: LineId,
    pub product: Product,
    pub size: String,
    pub color: String,
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal, price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// A cart bound to a storage backend.
///
/// Mutations persist immediately once the cart has hydrated. Until then they
/// only touch memory: writing the initial empty state first would clobber
/// whatever the storage still holds from the visitor's last session.
#[derive(Debug)]
pub struct Cart<S> {
    storage: S,
    lines: Vec<CartLine>,
    hydrated: bool,
    open: bool,
}

impl<S: KeyValueStorage> Cart<S> {
    /// Create a cart without reading storage. Call [`Self::hydrate`] before
    /// mutating, or use [`Self::load`].
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            lines: Vec::new(),
            hydrated: false,
            open: false,
        }
    }

    /// Create and hydrate in one step.
    pub fn load(storage: S) -> Self {
        let mut cart = Self::new(storage);
        cart.hydrate();
        cart
    }

    /// Read the persisted lines into memory, replacing the current ones.
    ///
    /// An unreadable payload logs a warning and leaves the cart empty; the
    /// cart counts as hydrated either way, so later mutations persist
    /// normally and overwrite the bad payload with a good one.
    pub fn hydrate(&mut self) {
        if let Some(raw) = self.storage.get(STORAGE_KEY) {
            match serde_json::from_str(&raw) {
                Ok(lines) => self.lines = lines,
                Err(error) => {
                    tracing::warn!(%error, "discarding unreadable cart payload");
                    self.lines = Vec::new();
                }
            }
        }
        self.hydrated = true;
    }

    /// Add one unit of a product variant and open the drawer.
    ///
    /// A line with the same derived id gains quantity; a new selection
    /// appends at the end. Size and color are taken as given here; callers
    /// that care check them against the product's lists first.
    pub fn add_line(&mut self, product: &Product, size: &str, color: &str) {
        let id = LineId::for_variant(&product.id, size, color);
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == id) {
            line.quantity = line.quantity.saturating_add(1);
        } else {
            self.lines.push(CartLine {
                id,
                product: product.clone(),
                size: size.to_owned(),
                color: color.to_owned(),
                quantity: 1,
            });
        }
        self.open = true;
        self.persist();
    }

    /// Remove a line. Unknown ids are a no-op.
    pub fn remove_line(&mut self, id: &LineId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != *id);
        if self.lines.len() != before {
            self.persist();
        }
    }

    /// Set a line's quantity. Anything below one removes the line; unknown
    /// ids are a no-op.
    pub fn set_quantity(&mut self, id: &LineId, quantity: i64) {
        if quantity < 1 {
            self.remove_line(id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.id == *id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
            self.persist();
        }
    }

    /// Drop every line. Drawer state is left alone.
    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.persist();
        }
    }

    /// Sum of quantities across lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0_u32, |total, line| total.saturating_add(line.quantity))
    }

    /// Cart total in rupees, exact decimal arithmetic.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the cart drawer should be showing.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Open or close the drawer. Drawer state is view state and is never
    /// persisted.
    pub const fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    fn persist(&mut self) {
        if !self.hydrated {
            return;
        }
        match serde_json::to_string(&self.lines) {
            Ok(json) => self.storage.set(STORAGE_KEY, json),
            Err(error) => {
                tracing::warn!(%error, "cart snapshot did not serialize, keeping previous one");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::IndexedRandom;

    use super::*;
    use crate::storage::MemoryStorage;
    use crate::types::ProductId;

    fn product(id: &str, price: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            description: "A test product".to_owned(),
            price: price.parse().unwrap(),
            rating: "4".parse().unwrap(),
            category: "kurti".to_owned(),
            sizes: vec!["S".to_owned(), "M".to_owned()],
            colours: vec!["Rose".to_owned(), "Teal".to_owned()],
            images: vec![format!("https://img.example/{id}.jpg")],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn adding_appends_then_increments() {
        let mut cart = Cart::load(MemoryStorage::new());
        let anarkali = product("p1", "1499");

        cart.add_line(&anarkali, "M", "Rose");
        cart.add_line(&anarkali, "M", "Rose");
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn different_size_or_color_makes_a_new_line() {
        let mut cart = Cart::load(MemoryStorage::new());
        let anarkali = product("p1", "1499");

        cart.add_line(&anarkali, "M", "Rose");
        cart.add_line(&anarkali, "L", "Rose");
        cart.add_line(&anarkali, "M", "Teal");
        assert_eq!(cart.lines().len(), 3);
        assert_eq!(cart.count(), 3);
    }

    #[test]
    fn adding_opens_the_drawer() {
        let mut cart = Cart::load(MemoryStorage::new());
        assert!(!cart.is_open());
        cart.add_line(&product("p1", "100"), "S", "Rose");
        assert!(cart.is_open());
        cart.set_open(false);
        assert!(!cart.is_open());
    }

    #[test]
    fn set_quantity_updates_and_low_values_remove() {
        let mut cart = Cart::load(MemoryStorage::new());
        let anarkali = product("p1", "100");
        cart.add_line(&anarkali, "M", "Rose");
        let id = cart.lines()[0].id.clone();

        cart.set_quantity(&id, 5);
        assert_eq!(cart.lines()[0].quantity, 5);

        cart.set_quantity(&id, 0);
        assert!(cart.is_empty());

        cart.add_line(&anarkali, "M", "Rose");
        let id = cart.lines()[0].id.clone();
        cart.set_quantity(&id, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut cart = Cart::load(MemoryStorage::new());
        cart.add_line(&product("p1", "100"), "M", "Rose");
        let missing = LineId::new("nope-M-Rose");

        cart.remove_line(&missing);
        cart.set_quantity(&missing, 7);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn total_multiplies_exactly() {
        let mut cart = Cart::load(MemoryStorage::new());
        cart.add_line(&product("p1", "1499.50"), "M", "Rose");
        cart.add_line(&product("p2", "350.25"), "S", "Teal");
        cart.add_line(&product("p2", "350.25"), "S", "Teal");
        assert_eq!(cart.total(), "2200.00".parse().unwrap());
    }

    #[test]
    fn clear_empties_but_keeps_drawer_state() {
        let mut cart = Cart::load(MemoryStorage::new());
        cart.add_line(&product("p1", "100"), "M", "Rose");
        assert!(cart.is_open());
        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.is_open());
    }

    #[test]
    fn lines_survive_a_rebuild_in_order() {
        let mut storage = MemoryStorage::new();
        let mut cart = Cart::load(&mut storage);
        cart.add_line(&product("p2", "200"), "S", "Teal");
        cart.add_line(&product("p1", "100"), "M", "Rose");
        cart.add_line(&product("p2", "200"), "S", "Teal");
        drop(cart);

        let rebuilt = Cart::load(&mut storage);
        let ids: Vec<&str> = rebuilt.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["p2-S-Teal", "p1-M-Rose"]);
        assert_eq!(rebuilt.count(), 3);
        assert_eq!(rebuilt.total(), "500".parse().unwrap());
    }

    #[test]
    fn corrupt_payload_hydrates_empty_then_recovers() {
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, "{not json".to_owned());

        let mut cart = Cart::load(&mut storage);
        assert!(cart.is_empty());

        cart.add_line(&product("p1", "100"), "M", "Rose");
        drop(cart);

        let rebuilt = Cart::load(&mut storage);
        assert_eq!(rebuilt.count(), 1);
    }

    #[test]
    fn mutations_before_hydration_do_not_persist() {
        let mut storage = MemoryStorage::new();
        let mut seeded = Cart::load(&mut storage);
        seeded.add_line(&product("p1", "100"), "M", "Rose");
        drop(seeded);
        let saved = storage.get(STORAGE_KEY).unwrap();

        let mut cold = Cart::new(&mut storage);
        cold.add_line(&product("p2", "200"), "S", "Teal");
        drop(cold);
        assert_eq!(storage.get(STORAGE_KEY), Some(saved));

        // After hydrating, the same mutation does persist.
        let mut warm = Cart::load(&mut storage);
        warm.add_line(&product("p2", "200"), "S", "Teal");
        assert_eq!(warm.count(), 2);
    }

    #[test]
    fn random_op_sequences_match_a_plain_accumulator() {
        let catalog = [
            product("p1", "250"),
            product("p2", "750.50"),
            product("p3", "1800"),
        ];
        let sizes = ["S", "M", "L"];
        let colors = ["Rose", "Teal"];
        let mut rng = StdRng::seed_from_u64(20_240_301);

        for _ in 0..25 {
            let mut storage = MemoryStorage::new();
            let mut cart = Cart::load(&mut storage);
            let mut reference: Vec<(LineId, Decimal, u32)> = Vec::new();

            for step in 0_u32..200 {
                match step % 10 {
                    // Adds dominate, like real sessions do.
                    0..=5 => {
                        let product = catalog.choose(&mut rng).unwrap();
                        let size = sizes.choose(&mut rng).unwrap();
                        let color = colors.choose(&mut rng).unwrap();
                        cart.add_line(product, size, color);

                        let id = LineId::for_variant(&product.id, size, color);
                        if let Some(entry) =
                            reference.iter_mut().find(|(line, _, _)| *line == id)
                        {
                            entry.2 += 1;
                        } else {
                            reference.push((id, product.price, 1));
                        }
                    }
                    6 | 7 => {
                        if let Some((id, _, _)) = reference.choose(&mut rng).cloned() {
                            let quantity = i64::from(step % 7) - 2;
                            cart.set_quantity(&id, quantity);
                            if quantity < 1 {
                                reference.retain(|(line, _, _)| *line != id);
                            } else if let Some(entry) =
                                reference.iter_mut().find(|(line, _, _)| *line == id)
                            {
                                entry.2 = u32::try_from(quantity).unwrap();
                            }
                        }
                    }
                    8 => {
                        if let Some((id, _, _)) = reference.choose(&mut rng).cloned() {
                            cart.remove_line(&id);
                            reference.retain(|(line, _, _)| *line != id);
                        }
                    }
                    _ => {
                        if step % 40 == 9 {
                            cart.clear();
                            reference.clear();
                        }
                    }
                }

                let expected_count: u32 = reference.iter().map(|(_, _, qty)| qty).sum();
                let expected_total: Decimal = reference
                    .iter()
                    .map(|(_, price, qty)| price * Decimal::from(*qty))
                    .sum();
                assert_eq!(cart.count(), expected_count);
                assert_eq!(cart.total(), expected_total);
            }

            let expected: Vec<(LineId, u32)> = reference
                .iter()
                .map(|(id, _, qty)| (id.clone(), *qty))
                .collect();
            drop(cart);

            // Everything observable must survive a rebuild from storage.
            let rebuilt = Cart::load(&mut storage);
            let actual: Vec<(LineId, u32)> = rebuilt
                .lines()
                .iter()
                .map(|line| (line.id.clone(), line.quantity))
                .collect();
            assert_eq!(actual, expected);
        }
    }
}
