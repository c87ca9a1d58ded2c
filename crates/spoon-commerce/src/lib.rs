//! Cart and pricing engine for the Silver Spoon storefront.
//!
//! This crate provides the one stateful subsystem of the storefront:
//!
//! - **Menu**: read-only catalog types and typed listing filters
//! - **Cart**: line items with option-aware merging, a pluggable pricing
//!   policy, and session persistence
//! - **Money**: paise-based integer rupee amounts
//!
//! # Example
//!
//! ```rust,ignore
//! use spoon_commerce::prelude::*;
//! use std::sync::Arc;
//!
//! let pizza = Arc::new(
//!     MenuItem::new("dish-1", "Margherita Pizza", "Pizza", Money::from_rupees(299)).veg(),
//! );
//!
//! // Create the store once at application start
//! let mut cart = CartStore::new(
//!     PricingPolicy::delivery_fee(),
//!     CartStorage::open("~/.silver-spoon")?,
//! );
//!
//! // Add items and read the derived totals
//! cart.add_item(pizza.clone(), 2, None)?;
//! let snapshot = cart.snapshot();
//! println!("Total: {}", snapshot.totals.total);
//! ```

pub mod cart;
pub mod error;
pub mod ids;
pub mod menu;
pub mod money;

pub use error::CartError;
pub use ids::{LineId, MenuItemId};
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CartError;
    pub use crate::ids::{LineId, MenuItemId};
    pub use crate::money::Money;

    // Menu
    pub use crate::menu::{
        filter_menu, Dietary, ItemOption, MenuFilter, MenuItem, OptionChoice, SelectedOptions,
        SortBy,
    };

    // Cart
    pub use crate::cart::{
        fingerprint, Adjustment, AdjustmentKind, CartSnapshot, CartStorage, CartStore, CartTotals,
        LineItem, PolicySettings, PricingPolicy, SubscriberId,
    };
}
