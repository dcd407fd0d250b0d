//! In-memory shopping list.

use serde::{Deserialize, Serialize};

use crate::error::{ToolError, ToolResult};
use crate::ids::ItemId;

/// An item to put on the list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    /// Item name.
    pub item: String,
    /// Amount, never negative.
    pub quantity: f64,
    /// Free-text unit.
    pub unit: String,
}

impl NewItem {
    /// Build a new item.
    pub fn new(item: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// A stored shopping-list entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    /// Item name.
    pub item: String,
    /// Amount.
    pub quantity: f64,
    /// Free-text unit.
    pub unit: String,
    /// Unique entry identifier.
    pub id: ItemId,
}

/// How `remove` matches item names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Entry name contains the given name, ignoring case.
    ///
    /// A short name such as "milk" removes every entry mentioning milk.
    #[default]
    Substring,
    /// Entry name equals the given name, ignoring case.
    Exact,
}

impl MatchMode {
    fn matches(self, entry: &str, name: &str) -> bool {
        let entry = entry.to_lowercase();
        let name = name.to_lowercase();
        match self {
            Self::Substring => entry.contains(&name),
            Self::Exact => entry == name,
        }
    }
}

/// Ordered shopping list. Entries with the same name are never merged.
#[derive(Clone, Debug, Default)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Current entries in insertion order.
    #[must_use]
    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append items, each under a fresh id.
    ///
    /// # Errors
    /// Returns a validation error if `items` is empty or any quantity is negative
    /// or not finite. Nothing is added in that case.
    pub fn add(&mut self, items: Vec<NewItem>) -> ToolResult<&[ShoppingItem]> {
        if items.is_empty() {
            return Err(ToolError::validation("No items provided to add"));
        }

        if let Some(bad) = items
            .iter()
            .find(|i| !i.quantity.is_finite() || i.quantity < 0.0)
        {
            return Err(ToolError::validation(format!(
                "Quantity for \"{}\" must be a non-negative number",
                bad.item
            )));
        }

        self.items.extend(items.into_iter().map(|i| ShoppingItem {
            item: i.item,
            quantity: i.quantity,
            unit: i.unit,
            id: ItemId::new(),
        }));

        Ok(&self.items)
    }

    /// Remove every entry matching any of `names`, returning how many went.
    ///
    /// # Errors
    /// Returns a validation error if `names` is empty.
    pub fn remove(&mut self, names: &[String], mode: MatchMode) -> ToolResult<usize> {
        if names.is_empty() {
            return Err(ToolError::validation("No item names provided to remove"));
        }

        let before = self.items.len();
        self.items
            .retain(|entry| !names.iter().any(|name| mode.matches(&entry.item, name)));

        Ok(before - self.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &ShoppingList) -> Vec<&str> {
        list.items().iter().map(|i| i.item.as_str()).collect()
    }

    #[test]
    fn test_add_keeps_duplicates_with_distinct_ids() {
        let mut list = ShoppingList::new();
        list.add(vec![NewItem::new("Eggs", 6.0, "pieces")]).expect("add");
        list.add(vec![NewItem::new("Eggs", 2.0, "pieces")]).expect("add");

        assert_eq!(list.len(), 2);
        assert_ne!(list.items()[0].id, list.items()[1].id);
    }

    #[test]
    fn test_add_rejects_empty_and_negative() {
        let mut list = ShoppingList::new();
        assert!(list.add(Vec::new()).is_err_and(|e| e.is_validation()));
        assert!(
            list.add(vec![NewItem::new("Flour", 1.0, "kg"), NewItem::new("Sugar", -1.0, "kg")])
                .is_err_and(|e| e.is_validation())
        );
        assert!(list.is_empty());
    }

    #[test]
    fn test_remove_matches_substrings_case_insensitively() {
        let mut list = ShoppingList::new();
        list.add(vec![
            NewItem::new("Whole Milk", 1.0, "gallon"),
            NewItem::new("milk chocolate", 2.0, "bars"),
            NewItem::new("Bread", 1.0, "loaf"),
        ])
        .expect("add");

        let removed = list.remove(&["milk".to_string()], MatchMode::Substring).expect("remove");
        assert_eq!(removed, 2);
        assert_eq!(names(&list), vec!["Bread"]);
    }

    #[test]
    fn test_exact_mode_only_removes_equal_names() {
        let mut list = ShoppingList::new();
        list.add(vec![
            NewItem::new("Milk", 1.0, "gallon"),
            NewItem::new("milk chocolate", 2.0, "bars"),
        ])
        .expect("add");

        let removed = list.remove(&["MILK".to_string()], MatchMode::Exact).expect("remove");
        assert_eq!(removed, 1);
        assert_eq!(names(&list), vec!["milk chocolate"]);
    }

    #[test]
    fn test_remove_requires_names() {
        let mut list = ShoppingList::new();
        assert!(list.remove(&[], MatchMode::Substring).is_err_and(|e| e.is_validation()));
    }
}
