use std::mem;

use tracing::debug;

use crate::{CoreError, Item, ItemId, ItemRepository, Tier};

/// Application service that answers from the primary store and falls back to
/// the secondary store on a miss.
///
/// The secondary store is only consulted when the primary reports the id as
/// absent, so an id present in both always resolves to the primary's record.
/// Store errors are propagated as-is and never trigger the fallback.
pub struct LookupService<P: ItemRepository, S: ItemRepository> {
    primary: P,
    secondary: S,
}

impl<P: ItemRepository, S: ItemRepository> LookupService<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }

    /// Swap in another primary store, returning the previous one.
    pub fn replace_primary(&mut self, primary: P) -> P {
        mem::replace(&mut self.primary, primary)
    }

    /// Swap in another secondary store, returning the previous one.
    pub fn replace_secondary(&mut self, secondary: S) -> S {
        mem::replace(&mut self.secondary, secondary)
    }

    /// Look up an item, primary first.
    pub fn get_item_by_id(&self, id: ItemId) -> Result<Item, CoreError> {
        self.locate(id).map(|(_, item)| item)
    }

    /// Delete an item from the first tier that holds it.
    pub fn delete_item(&self, id: ItemId) -> Result<Item, CoreError> {
        self.remove(id).map(|(_, item)| item)
    }

    /// Like [`Self::get_item_by_id`], also reporting which tier answered.
    pub fn locate(&self, id: ItemId) -> Result<(Tier, Item), CoreError> {
        self.fall_back(
            "get",
            id,
            |repo, id| repo.get_item_by_id(id),
            |repo, id| repo.get_item_by_id(id),
        )
    }

    /// Like [`Self::delete_item`], also reporting which tier the item was removed from.
    pub fn remove(&self, id: ItemId) -> Result<(Tier, Item), CoreError> {
        self.fall_back(
            "delete",
            id,
            |repo, id| repo.delete_item(id),
            |repo, id| repo.delete_item(id),
        )
    }

    fn fall_back<FP, FS>(
        &self,
        op: &'static str,
        id: ItemId,
        on_primary: FP,
        on_secondary: FS,
    ) -> Result<(Tier, Item), CoreError>
    where
        FP: FnOnce(&P, ItemId) -> Result<Option<Item>, CoreError>,
        FS: FnOnce(&S, ItemId) -> Result<Option<Item>, CoreError>,
    {
        if let Some(item) = on_primary(&self.primary, id)? {
            debug!(op, id, tier = %Tier::Primary, "hit");
            return Ok((Tier::Primary, item));
        }
        debug!(op, id, tier = %Tier::Primary, "miss, falling back");

        match on_secondary(&self.secondary, id)? {
            Some(item) => {
                debug!(op, id, tier = %Tier::Secondary, "hit");
                Ok((Tier::Secondary, item))
            }
            None => Err(CoreError::NotFound),
        }
    }
}
