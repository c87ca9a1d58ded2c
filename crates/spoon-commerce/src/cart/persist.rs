//! Cart persistence adapter.
//!
//! Two flat, versionless records under stable keys: the line-item array
//! and the policy settings. Load falls back to defaults on missing or
//! malformed data; save is best-effort. Storage failures never cross
//! this boundary, and the in-memory cart stays authoritative for the
//! session.

use crate::cart::line_item::{LineItem, MAX_QUANTITY_PER_ITEM};
use crate::cart::pricing::PolicySettings;
use crate::menu::{MenuItem, SelectedOptions};
use serde::{Deserialize, Serialize};
use spoon_store::{Store, StoreError};
use std::path::PathBuf;
use std::sync::Arc;

/// Storage key for the line-item array.
pub const CART_KEY: &str = "silver-spoon-cart";

/// Storage key for the policy settings record.
pub const POLICY_KEY: &str = "silver-spoon-policy";

/// Persisted shape of one cart row.
///
/// The menu item is embedded whole, as the storefront always persisted
/// it; everything derived (fingerprint, unit price, line total) is
/// recomputed on load rather than trusted from disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredLineItem {
    item: MenuItem,
    quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected_options: Option<SelectedOptions>,
}

/// Loads and saves cart state through a key-value store.
#[derive(Debug)]
pub struct CartStorage {
    store: Store,
}

impl CartStorage {
    /// Wrap an already-opened store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Open file-backed storage rooted at the given directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self::new(Store::open(root)?))
    }

    /// In-memory storage; nothing survives the process.
    pub fn in_memory() -> Self {
        Self::new(Store::in_memory())
    }

    /// Load the persisted cart, or defaults if nothing usable is stored.
    ///
    /// Malformed payloads are discarded with a warning; individual rows
    /// with out-of-range quantities are skipped. Never fails.
    pub fn load(&self) -> (Vec<LineItem>, PolicySettings) {
        let items = match self.store.get::<Vec<StoredLineItem>>(CART_KEY) {
            Ok(Some(records)) => restore_items(records),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, key = CART_KEY, "discarding unreadable cart data");
                Vec::new()
            }
        };

        let settings = match self.store.get::<PolicySettings>(POLICY_KEY) {
            Ok(Some(settings)) => settings,
            Ok(None) => PolicySettings::default(),
            Err(e) => {
                tracing::warn!(error = %e, key = POLICY_KEY, "discarding unreadable policy settings");
                PolicySettings::default()
            }
        };

        (items, settings)
    }

    /// Persist the current cart state. Best-effort: failures are logged
    /// and swallowed.
    pub fn save(&self, items: &[LineItem], settings: &PolicySettings) {
        let records: Vec<StoredLineItem> = items
            .iter()
            .map(|line| StoredLineItem {
                item: (*line.menu_item).clone(),
                quantity: line.quantity,
                selected_options: line.selected_options.clone(),
            })
            .collect();

        if let Err(e) = self.store.set(CART_KEY, &records) {
            tracing::warn!(error = %e, key = CART_KEY, "failed to persist cart items");
        }
        if let Err(e) = self.store.set(POLICY_KEY, settings) {
            tracing::warn!(error = %e, key = POLICY_KEY, "failed to persist policy settings");
        }
    }
}

/// Rebuild line items from stored records, re-deriving fingerprints and
/// prices and merging any rows that share a fingerprint.
fn restore_items(records: Vec<StoredLineItem>) -> Vec<LineItem> {
    let mut items: Vec<LineItem> = Vec::with_capacity(records.len());

    for record in records {
        let restored = LineItem::new(
            Arc::new(record.item),
            record.quantity,
            record.selected_options,
        );
        let line = match restored {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!(error = %e, "skipping stored cart row");
                continue;
            }
        };

        if let Some(existing) = items.iter_mut().find(|i| i.id == line.id) {
            existing.quantity = existing
                .quantity
                .saturating_add(line.quantity)
                .min(MAX_QUANTITY_PER_ITEM);
            if existing.update_total().is_err() {
                tracing::debug!(id = %existing.id, "skipping unrepresentable merged row");
            }
        } else {
            items.push(line);
        }
    }

    items
}
