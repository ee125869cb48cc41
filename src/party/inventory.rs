//! The shared item bag: id to quantity, with zero-quantity entries removed
//! so listings never show empty rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Item/gear quantities. Backed by a `BTreeMap` so menu listings iterate
/// in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bag {
    entries: BTreeMap<String, u32>,
}

impl Bag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: &str, qty: u32) {
        if qty == 0 {
            return;
        }
        *self.entries.entry(id.to_string()).or_insert(0) += qty;
    }

    /// Spends one unit. Returns false (no change) when the id is absent.
    pub fn consume(&mut self, id: &str) -> bool {
        match self.entries.get_mut(id) {
            Some(qty) if *qty > 0 => {
                *qty -= 1;
                if *qty == 0 {
                    self.entries.remove(id);
                }
                true
            }
            _ => false,
        }
    }

    pub fn quantity(&self, id: &str) -> u32 {
        self.entries.get(id).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stable-order view of the contents.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(id, &qty)| (id.as_str(), qty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_consume() {
        let mut bag = Bag::new();
        bag.add("potion", 2);
        assert_eq!(bag.quantity("potion"), 2);
        assert!(bag.consume("potion"));
        assert!(bag.consume("potion"));
        // Drained entries disappear entirely.
        assert_eq!(bag.quantity("potion"), 0);
        assert!(bag.is_empty());
        assert!(!bag.consume("potion"));
    }

    #[test]
    fn test_zero_add_is_a_no_op() {
        let mut bag = Bag::new();
        bag.add("potion", 0);
        assert!(bag.is_empty());
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut bag = Bag::new();
        bag.add("mist-bomb", 1);
        bag.add("ember-draught", 3);
        bag.add("potion", 2);
        let ids: Vec<&str> = bag.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["ember-draught", "mist-bomb", "potion"]);
    }
}
