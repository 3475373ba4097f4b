use std::sync::{Mutex, MutexGuard};

use crate::{CoreError, Item, ItemId, ItemRepository};

/// In-memory store over an ordered list of items. The internal mutex only
/// exists so the store can be shared; calls are not expected to race.
pub struct InMemoryItemRepo {
    inner: Mutex<Vec<Item>>,
}

impl InMemoryItemRepo {
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            inner: Mutex::new(items),
        }
    }

    /// Store seeded with the sample primary data set (ids 1 and 2).
    pub fn primary() -> Self {
        Self::with_items(vec![Item::new(1, "Item 1"), Item::new(2, "Item 2")])
    }

    /// Store seeded with the sample secondary data set (ids 3 and 4).
    pub fn secondary() -> Self {
        Self::with_items(vec![Item::new(3, "Item 3"), Item::new(4, "Item 4")])
    }

    /// Snapshot of the current collection, in order.
    pub fn items(&self) -> Result<Vec<Item>, CoreError> {
        Ok(self.lock()?.clone())
    }

    pub fn len(&self) -> Result<usize, CoreError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Item>>, CoreError> {
        self.inner
            .lock()
            .map_err(|_| CoreError::Repository("mutex poisoned".into()))
    }
}

impl Default for InMemoryItemRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRepository for InMemoryItemRepo {
    fn get_item_by_id(&self, id: ItemId) -> Result<Option<Item>, CoreError> {
        let items = self.lock()?;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    fn delete_item(&self, id: ItemId) -> Result<Option<Item>, CoreError> {
        let mut items = self.lock()?;
        Ok(items
            .iter()
            .position(|item| item.id == id)
            .map(|index| items.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_finds_seeded_item() {
        let repo = InMemoryItemRepo::primary();
        let got = repo.get_item_by_id(2).unwrap();
        assert_eq!(got, Some(Item::new(2, "Item 2")));
    }

    #[test]
    fn get_miss_is_absent_not_error() {
        let repo = InMemoryItemRepo::secondary();
        assert_eq!(repo.get_item_by_id(1).unwrap(), None);
        assert_eq!(repo.len().unwrap(), 2);
    }

    #[test]
    fn get_returns_first_match_under_duplicate_ids() {
        let repo = InMemoryItemRepo::with_items(vec![
            Item::new(7, "first"),
            Item::new(7, "second"),
        ]);
        assert_eq!(repo.get_item_by_id(7).unwrap().unwrap().name, "first");
    }

    #[test]
    fn delete_removes_and_returns_item() {
        let repo = InMemoryItemRepo::primary();
        let deleted = repo.delete_item(1).unwrap();
        assert_eq!(deleted, Some(Item::new(1, "Item 1")));
        assert_eq!(repo.get_item_by_id(1).unwrap(), None);
        assert_eq!(repo.items().unwrap(), vec![Item::new(2, "Item 2")]);
    }

    #[test]
    fn delete_twice_second_call_is_absent() {
        let repo = InMemoryItemRepo::secondary();
        assert!(repo.delete_item(3).unwrap().is_some());
        assert_eq!(repo.delete_item(3).unwrap(), None);
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[test]
    fn delete_miss_leaves_collection_untouched() {
        let repo = InMemoryItemRepo::secondary();
        assert_eq!(repo.delete_item(9).unwrap(), None);
        assert_eq!(
            repo.items().unwrap(),
            vec![Item::new(3, "Item 3"), Item::new(4, "Item 4")]
        );
    }

    #[test]
    fn delete_takes_first_of_duplicates_only() {
        let repo = InMemoryItemRepo::with_items(vec![
            Item::new(7, "first"),
            Item::new(8, "other"),
            Item::new(7, "second"),
        ]);
        assert_eq!(repo.delete_item(7).unwrap().unwrap().name, "first");
        assert_eq!(repo.get_item_by_id(7).unwrap().unwrap().name, "second");
    }

    #[test]
    fn new_store_is_empty() {
        let repo = InMemoryItemRepo::default();
        assert!(repo.is_empty().unwrap());
        assert_eq!(repo.get_item_by_id(1).unwrap(), None);
    }
}
