//! The stateful cart store.
//!
//! Owns the line items and session policy settings, recomputes derived
//! totals through the pricing policy after every mutation, writes each
//! new state through the persistence adapter, and notifies subscribers.
//! Mutations run synchronously to completion; the engine is
//! single-threaded by design.

use crate::cart::identity::fingerprint;
use crate::cart::line_item::{LineItem, MAX_QUANTITY_PER_ITEM};
use crate::cart::persist::CartStorage;
use crate::cart::pricing::{CartTotals, PolicySettings, PricingPolicy, COUPON_CODE};
use crate::error::CartError;
use crate::ids::LineId;
use crate::menu::{MenuItem, SelectedOptions};
use std::sync::Arc;

/// Handle returned by [`CartStore::subscribe`]; pass it back to
/// [`CartStore::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

/// The fully-derived, read-only view of the cart at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    /// Line items in insertion order.
    pub items: Vec<LineItem>,
    /// Derived monetary aggregates.
    pub totals: CartTotals,
}

impl CartSnapshot {
    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

type Listener = Box<dyn FnMut(&CartSnapshot)>;

/// The cart and pricing engine.
///
/// Constructed once at application start and passed by reference to
/// whatever needs it. Presentation code calls the mutation operations,
/// reads [`CartStore::snapshot`], and re-renders on notification.
///
/// # Example
///
/// ```rust,ignore
/// use spoon_commerce::prelude::*;
///
/// let mut cart = CartStore::new(
///     PricingPolicy::delivery_fee(),
///     CartStorage::open(state_dir)?,
/// );
///
/// cart.add_item(pizza.clone(), 2, None)?;
/// println!("Total: {}", cart.totals().total);
/// ```
pub struct CartStore {
    items: Vec<LineItem>,
    settings: PolicySettings,
    policy: PricingPolicy,
    storage: CartStorage,
    totals: CartTotals,
    subscribers: Vec<(SubscriberId, Listener)>,
    next_subscriber: u64,
}

impl CartStore {
    /// Build a store with the given policy, loading any persisted state.
    ///
    /// Missing or malformed persisted data resets to an empty cart with
    /// default settings; construction itself never fails.
    pub fn new(policy: PricingPolicy, storage: CartStorage) -> Self {
        let (items, settings) = storage.load();
        let totals = policy.compute(&items, &settings);
        Self {
            items,
            settings,
            policy,
            storage,
            totals,
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Build a store with ephemeral in-memory persistence.
    pub fn in_memory(policy: PricingPolicy) -> Self {
        Self::new(policy, CartStorage::in_memory())
    }

    /// Add an item to the cart, merging with an existing line when the
    /// fingerprint matches.
    ///
    /// Rejects quantities outside `[1, 99]` with no state change. A
    /// merge that would exceed 99 units is silently capped at 99.
    pub fn add_item(
        &mut self,
        menu_item: Arc<MenuItem>,
        quantity: u32,
        selected_options: Option<SelectedOptions>,
    ) -> Result<LineId, CartError> {
        if !(1..=MAX_QUANTITY_PER_ITEM).contains(&quantity) {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let id = fingerprint(&menu_item.id, selected_options.as_ref());

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == id) {
            existing.quantity = existing
                .quantity
                .saturating_add(quantity)
                .min(MAX_QUANTITY_PER_ITEM);
            existing.update_total()?;
        } else {
            let line = LineItem::new(menu_item, quantity, selected_options)?;
            self.items.push(line);
        }

        self.commit();
        Ok(id)
    }

    /// Replace the quantity on an existing line.
    ///
    /// Returns `InvalidQuantity` outside `[1, 99]`; returns `Ok(false)`
    /// for an unknown line id (benign, no state change).
    pub fn set_quantity(&mut self, line_id: &LineId, quantity: u32) -> Result<bool, CartError> {
        if !(1..=MAX_QUANTITY_PER_ITEM).contains(&quantity) {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let Some(line) = self.items.iter_mut().find(|i| &i.id == line_id) else {
            return Ok(false);
        };

        line.quantity = quantity;
        line.update_total()?;
        self.commit();
        Ok(true)
    }

    /// Remove a line from the cart. Removing an unknown id is a no-op.
    pub fn remove_item(&mut self, line_id: &LineId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_id);
        let removed = self.items.len() < len_before;
        if removed {
            self.commit();
        }
        removed
    }

    /// Empty the cart.
    ///
    /// Policy settings are session-level, not cart-content-level: an
    /// applied coupon and the delivery choice survive this.
    pub fn clear(&mut self) {
        self.items.clear();
        self.commit();
    }

    /// Turn delivery on or off for the session.
    pub fn set_delivery_enabled(&mut self, enabled: bool) {
        self.settings.delivery_enabled = enabled;
        self.commit();
    }

    /// Apply a coupon code.
    ///
    /// Returns `false` with no state change when the policy does not
    /// honor coupons, when one is already applied (same code or not),
    /// or when the code is unknown. Matching is case-insensitive; the
    /// canonical form is stored.
    pub fn apply_coupon(&mut self, code: &str) -> bool {
        if !self.policy.accepts_coupons() {
            return false;
        }
        if self.settings.applied_coupon.is_some() {
            return false;
        }
        if !code.trim().eq_ignore_ascii_case(COUPON_CODE) {
            return false;
        }

        self.settings.applied_coupon = Some(COUPON_CODE.to_string());
        self.commit();
        true
    }

    /// The current snapshot. Pure read.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            totals: self.totals.clone(),
        }
    }

    /// The current pricing breakdown.
    pub fn totals(&self) -> &CartTotals {
        &self.totals
    }

    /// The current session policy settings.
    pub fn settings(&self) -> &PolicySettings {
        &self.settings
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get a line by id.
    pub fn get_item(&self, line_id: &LineId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == line_id)
    }

    /// Register a listener invoked synchronously after every successful
    /// mutation with the new snapshot.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartSnapshot) + 'static) -> SubscriberId {
        self.next_subscriber += 1;
        let id = SubscriberId(self.next_subscriber);
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Unsubscribing twice is harmless.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.subscribers.retain(|(sid, _)| *sid != id);
    }

    /// Recompute totals, persist, and notify after a mutation.
    fn commit(&mut self) {
        self.totals = self.policy.compute(&self.items, &self.settings);
        self.storage.save(&self.items, &self.settings);
        self.notify();
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = CartSnapshot {
            items: self.items.clone(),
            totals: self.totals.clone(),
        };
        for (_, listener) in &mut self.subscribers {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::pricing::DEFAULT_DELIVERY_FEE;
    use crate::menu::{ItemOption, OptionChoice};
    use crate::money::Money;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn margherita() -> Arc<MenuItem> {
        Arc::new(MenuItem::new(
            "dish-1",
            "Margherita Pizza",
            "Pizza",
            Money::from_rupees(299),
        ))
    }

    fn paneer_tikka() -> Arc<MenuItem> {
        Arc::new(
            MenuItem::new("dish-7", "Paneer Tikka", "Starters", Money::from_rupees(229))
                .veg()
                .with_options(vec![ItemOption::new(
                    "Size",
                    vec![
                        OptionChoice::new("Regular", Money::zero()),
                        OptionChoice::new("Large", Money::from_rupees(50)),
                    ],
                )]),
        )
    }

    fn large_size() -> SelectedOptions {
        let mut options = SelectedOptions::new();
        options.insert(
            "Size".to_string(),
            OptionChoice::new("Large", Money::from_rupees(50)),
        );
        options
    }

    fn pickup_cart(policy: PricingPolicy) -> CartStore {
        let mut cart = CartStore::in_memory(policy);
        cart.set_delivery_enabled(false);
        cart
    }

    #[test]
    fn test_add_plain_item() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        cart.add_item(margherita(), 2, None).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 2);
        let line = cart.snapshot().items[0].clone();
        assert_eq!(line.line_total, Money::from_rupees(598));
    }

    #[test]
    fn test_same_item_same_options_merges() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        cart.add_item(paneer_tikka(), 1, Some(large_size())).unwrap();
        cart.add_item(paneer_tikka(), 1, Some(large_size())).unwrap();

        assert_eq!(cart.unique_item_count(), 1);
        let line = cart.snapshot().items[0].clone();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.line_total, Money::from_rupees(558));
    }

    #[test]
    fn test_different_options_stay_separate_lines() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        cart.add_item(paneer_tikka(), 1, Some(large_size())).unwrap();
        cart.add_item(paneer_tikka(), 1, None).unwrap();

        assert_eq!(cart.unique_item_count(), 2);
    }

    #[test]
    fn test_merge_clamps_at_max() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        cart.add_item(margherita(), 60, None).unwrap();
        cart.add_item(margherita(), 60, None).unwrap();

        let line = cart.snapshot().items[0].clone();
        assert_eq!(line.quantity, MAX_QUANTITY_PER_ITEM);
        assert_eq!(line.line_total, Money::from_rupees(299 * 99));
    }

    #[test]
    fn test_invalid_quantity_is_rejected_without_change() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        assert_eq!(
            cart.add_item(margherita(), 0, None),
            Err(CartError::InvalidQuantity(0))
        );
        assert_eq!(
            cart.add_item(margherita(), 100, None),
            Err(CartError::InvalidQuantity(100))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        let id = cart.add_item(margherita(), 1, None).unwrap();

        assert_eq!(cart.set_quantity(&id, 5), Ok(true));
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_set_quantity_out_of_range_keeps_prior_value() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        let id = cart.add_item(margherita(), 2, None).unwrap();

        assert_eq!(
            cart.set_quantity(&id, 150),
            Err(CartError::InvalidQuantity(150))
        );
        assert_eq!(cart.get_item(&id).unwrap().quantity, 2);
    }

    #[test]
    fn test_set_quantity_unknown_line_is_noop() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        assert_eq!(cart.set_quantity(&LineId::new("ghost"), 3), Ok(false));
    }

    #[test]
    fn test_remove_item() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        let id = cart.add_item(margherita(), 1, None).unwrap();

        assert!(cart.remove_item(&id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_line_leaves_snapshot_unchanged() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        cart.add_item(margherita(), 1, None).unwrap();
        let before = cart.snapshot();

        assert!(!cart.remove_item(&LineId::new("nonexistent")));
        assert_eq!(cart.snapshot(), before);
    }

    #[test]
    fn test_totals_with_delivery_fee() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        cart.add_item(
            Arc::new(MenuItem::new("t", "Thali", "Mains", Money::from_rupees(1000))),
            1,
            None,
        )
        .unwrap();

        // Delivery on by default
        assert_eq!(cart.totals().tax, Money::from_rupees(80));
        assert_eq!(cart.totals().total, Money::from_rupees(1120));

        cart.set_delivery_enabled(false);
        assert_eq!(cart.totals().total, Money::from_rupees(1080));
    }

    #[test]
    fn test_coupon_single_use() {
        let mut cart = pickup_cart(PricingPolicy::discount_and_coupon(0.0));
        cart.add_item(
            Arc::new(MenuItem::new("t", "Thali", "Mains", Money::from_rupees(1000))),
            1,
            None,
        )
        .unwrap();

        assert!(cart.apply_coupon("silver10"));
        assert_eq!(cart.totals().savings(), Money::from_rupees(100));
        assert_eq!(cart.totals().total, Money::from_rupees(980));
        assert_eq!(cart.settings().applied_coupon.as_deref(), Some("SILVER10"));

        // Second application fails, same code or not, and changes nothing
        let before = cart.snapshot();
        assert!(!cart.apply_coupon("SILVER10"));
        assert!(!cart.apply_coupon("OTHER20"));
        assert_eq!(cart.snapshot(), before);
    }

    #[test]
    fn test_unknown_coupon_rejected() {
        let mut cart = CartStore::in_memory(PricingPolicy::discount_and_coupon(0.05));
        assert!(!cart.apply_coupon("GOLD20"));
        assert!(cart.settings().applied_coupon.is_none());
    }

    #[test]
    fn test_coupon_rejected_under_delivery_policy() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        assert!(!cart.apply_coupon("SILVER10"));
        assert!(cart.settings().applied_coupon.is_none());
    }

    #[test]
    fn test_clear_keeps_policy_settings() {
        let mut cart = pickup_cart(PricingPolicy::discount_and_coupon(0.05));
        cart.add_item(margherita(), 2, None).unwrap();
        assert!(cart.apply_coupon("SILVER10"));

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.settings().applied_coupon.as_deref(), Some("SILVER10"));
        assert!(!cart.settings().delivery_enabled);
    }

    #[test]
    fn test_subtotal_matches_line_totals() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        cart.add_item(margherita(), 3, None).unwrap();
        cart.add_item(paneer_tikka(), 2, Some(large_size())).unwrap();

        let snapshot = cart.snapshot();
        let expected = Money::sum(snapshot.items.iter().map(|i| &i.line_total));
        assert_eq!(snapshot.totals.subtotal, expected);
    }

    #[test]
    fn test_subscribers_see_every_mutation() {
        let seen: Rc<RefCell<Vec<u32>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        let sub = cart.subscribe(move |snapshot| {
            sink.borrow_mut().push(snapshot.item_count());
        });

        cart.add_item(margherita(), 2, None).unwrap();
        cart.add_item(margherita(), 1, None).unwrap();
        cart.clear();
        assert_eq!(*seen.borrow(), vec![2, 3, 0]);

        // Rejected mutations do not notify
        let _ = cart.add_item(margherita(), 0, None);
        assert_eq!(seen.borrow().len(), 3);

        cart.unsubscribe(sub);
        cart.add_item(margherita(), 1, None).unwrap();
        assert_eq!(seen.borrow().len(), 3);

        // Unsubscribing again is harmless
        cart.unsubscribe(sub);
    }

    #[test]
    fn test_state_survives_reconstruction() {
        let dir = tempfile::tempdir().unwrap();

        {
            let storage = CartStorage::open(dir.path()).unwrap();
            let mut cart = CartStore::new(PricingPolicy::discount_and_coupon(0.05), storage);
            cart.add_item(paneer_tikka(), 2, Some(large_size())).unwrap();
            assert!(cart.apply_coupon("SILVER10"));
        }

        let storage = CartStorage::open(dir.path()).unwrap();
        let cart = CartStore::new(PricingPolicy::discount_and_coupon(0.05), storage);

        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.settings().applied_coupon.as_deref(), Some("SILVER10"));
        assert_eq!(
            cart.snapshot().items[0].line_total,
            Money::from_rupees((229 + 50) * 2)
        );
    }

    #[test]
    fn test_unavailable_persistence_keeps_cart_usable() {
        // Point the file store at a path that cannot be written
        let dir = tempfile::tempdir().unwrap();
        let storage = CartStorage::open(dir.path()).unwrap();
        drop(std::fs::remove_dir_all(dir.path()));

        let mut cart = CartStore::new(PricingPolicy::delivery_fee(), storage);
        cart.add_item(margherita(), 2, None).unwrap();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.totals().subtotal, Money::from_rupees(598));
    }

    #[test]
    fn test_delivery_fee_reflected_in_snapshot_adjustments() {
        let mut cart = CartStore::in_memory(PricingPolicy::delivery_fee());
        cart.add_item(margherita(), 1, None).unwrap();

        let snapshot = cart.snapshot();
        assert_eq!(snapshot.totals.adjustments.len(), 1);
        assert_eq!(snapshot.totals.adjustments[0].amount, DEFAULT_DELIVERY_FEE);
    }
}
