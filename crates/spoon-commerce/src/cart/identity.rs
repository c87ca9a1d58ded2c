//! Line-item fingerprints.

use crate::ids::{LineId, MenuItemId};
use crate::menu::SelectedOptions;

/// Derive the merge key for a menu item plus its chosen options.
///
/// Options are canonicalized by group name: `SelectedOptions` iterates in
/// lexicographic key order, so two semantically equal selections produce
/// the same fingerprint no matter how they were assembled. With no
/// options (or an empty selection) the fingerprint is the item id
/// verbatim, so a plain dish occupies the same line across sessions.
///
/// # Example
///
/// ```
/// use spoon_commerce::cart::fingerprint;
/// use spoon_commerce::ids::MenuItemId;
///
/// let id = MenuItemId::new("dish-7");
/// assert_eq!(fingerprint(&id, None).as_str(), "dish-7");
/// ```
pub fn fingerprint(item_id: &MenuItemId, options: Option<&SelectedOptions>) -> LineId {
    let mut key = item_id.as_str().to_string();

    if let Some(options) = options.filter(|o| !o.is_empty()) {
        key.push('-');
        let joined = options
            .iter()
            .map(|(group, choice)| format!("{}:{}", group, choice.label))
            .collect::<Vec<_>>()
            .join("|");
        key.push_str(&joined);
    }

    LineId::new(key)
}
