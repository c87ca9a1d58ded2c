//! Menu item and customization option types.

use crate::ids::MenuItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Chosen customization per option group, keyed by group name.
///
/// A `BTreeMap` keeps the selection canonical: at most one choice per
/// group, iteration in lexicographic group order regardless of how the
/// caller assembled it.
pub type SelectedOptions = BTreeMap<String, OptionChoice>;

/// One selectable choice within an option group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionChoice {
    /// Display label (e.g., "Large").
    pub label: String,
    /// Price delta added to the item's base price. Non-negative.
    pub price: Money,
}

impl OptionChoice {
    pub fn new(label: impl Into<String>, price: Money) -> Self {
        Self {
            label: label.into(),
            price,
        }
    }
}

/// An option group on a menu item (e.g., Size, Spice Level).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemOption {
    /// Group name.
    pub name: String,
    /// Ordered choices.
    pub choices: Vec<OptionChoice>,
}

impl ItemOption {
    pub fn new(name: impl Into<String>, choices: Vec<OptionChoice>) -> Self {
        Self {
            name: name.into(),
            choices,
        }
    }
}

/// A dish in the menu catalog.
///
/// Catalog data is an external, pre-loaded collaborator; the cart holds
/// shared references and never writes through them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MenuItem {
    /// Unique item identifier.
    pub id: MenuItemId,
    /// Display name.
    pub name: String,
    /// Menu category (e.g., "Pizza", "Starters").
    pub category: String,
    /// Base unit price before options.
    pub price: Money,
    /// Vegetarian flag.
    pub veg: bool,
    /// Average customer rating.
    #[serde(default)]
    pub rating: f64,
    /// Featured on the popular shelf.
    #[serde(default)]
    pub popular: bool,
    /// Short blurb shown on cards; searched alongside the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short: Option<String>,
    /// Customization option groups, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ItemOption>,
}

impl MenuItem {
    /// Create a new menu item with no options.
    pub fn new(
        id: impl Into<MenuItemId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            veg: false,
            rating: 0.0,
            popular: false,
            short: None,
            options: Vec::new(),
        }
    }

    /// Attach option groups.
    pub fn with_options(mut self, options: Vec<ItemOption>) -> Self {
        self.options = options;
        self
    }

    /// Mark as vegetarian.
    pub fn veg(mut self) -> Self {
        self.veg = true;
        self
    }

    /// Look up an option group by name.
    pub fn option_group(&self, name: &str) -> Option<&ItemOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Check whether the item offers any customization.
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }
}
