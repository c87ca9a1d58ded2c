//! Menu catalog module.
//!
//! Read-only catalog types consumed by the cart, plus typed filters for
//! the menu listing. The cart never mutates the catalog.

mod filter;
mod item;

pub use filter::{filter_menu, Dietary, MenuFilter, SortBy};
pub use item::{ItemOption, MenuItem, OptionChoice, SelectedOptions};
