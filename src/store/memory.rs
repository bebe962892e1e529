//! The shared in-memory store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::store::error::StoreError;
use crate::store::model::{Card, Identifier, List};
use crate::store::validation::{check_card_references, ValidCard, ValidList};

#[derive(Debug, Default)]
struct Collections {
    cards: Vec<Card>,
    lists: Vec<List>,
}

impl Collections {
    fn has_card(&self, id: &Identifier) -> bool {
        self.cards.iter().any(|c| &c.id == id)
    }

    fn has_list(&self, id: &Identifier) -> bool {
        self.lists.iter().any(|l| &l.id == id)
    }
}

/// Owner of the card and list collections.
///
/// Reads share the lock; every insert and delete takes it exclusively,
/// which keeps list references consistent with the card collection even on
/// a multi-threaded runtime.
#[derive(Debug, Default)]
pub struct Store {
    inner: RwLock<Collections>,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the example card and list served at startup.
    pub fn seeded() -> Self {
        let card = Card {
            id: Identifier::from("1"),
            title: "Task One".to_string(),
            content: "This is card one".to_string(),
        };
        let list = List {
            id: Identifier::from("1"),
            header: "List One".to_string(),
            card_ids: vec![card.id.clone()],
        };

        Self {
            inner: RwLock::new(Collections {
                cards: vec![card],
                lists: vec![list],
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, StoreError> {
        self.inner.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, StoreError> {
        self.inner.write().map_err(|_| StoreError::Poisoned)
    }

    pub fn list_cards(&self) -> Result<Vec<Card>, StoreError> {
        Ok(self.read()?.cards.clone())
    }

    pub fn get_card(&self, id: &str) -> Result<Card, StoreError> {
        self.read()?
            .cards
            .iter()
            .find(|c| c.id == *id)
            .cloned()
            .ok_or_else(|| StoreError::CardNotFound(id.to_string()))
    }

    /// Append a new card under a freshly generated identifier.
    pub fn insert_card(&self, card: ValidCard) -> Result<Card, StoreError> {
        let mut collections = self.write()?;
        let id = fresh_id(|id| collections.has_card(id));
        let card = Card {
            id,
            title: card.title,
            content: card.content,
        };
        collections.cards.push(card.clone());
        Ok(card)
    }

    /// Remove a card and strip its id from every list.
    ///
    /// Returns the number of lists that referenced the card.
    pub fn delete_card(&self, id: &str) -> Result<usize, StoreError> {
        let mut collections = self.write()?;
        let position = collections
            .cards
            .iter()
            .position(|c| c.id == *id)
            .ok_or_else(|| StoreError::CardNotFound(id.to_string()))?;
        collections.cards.remove(position);

        let mut touched = 0;
        for list in collections.lists.iter_mut() {
            let before = list.card_ids.len();
            list.card_ids.retain(|card_id| *card_id != *id);
            if list.card_ids.len() != before {
                touched += 1;
            }
        }
        Ok(touched)
    }

    pub fn list_lists(&self) -> Result<Vec<List>, StoreError> {
        Ok(self.read()?.lists.clone())
    }

    pub fn get_list(&self, id: &str) -> Result<List, StoreError> {
        self.read()?
            .lists
            .iter()
            .find(|l| l.id == *id)
            .cloned()
            .ok_or_else(|| StoreError::ListNotFound(id.to_string()))
    }

    /// Check every card reference and append the list.
    ///
    /// The check and the insert happen under the same write guard, so a
    /// concurrent card deletion cannot slip a dangling reference in.
    pub fn insert_list(&self, list: ValidList) -> Result<List, StoreError> {
        let mut collections = self.write()?;
        check_card_references(&list.card_ids, |id| collections.has_card(id))?;

        let id = fresh_id(|id| collections.has_list(id));
        let list = List {
            id,
            header: list.header,
            card_ids: list.card_ids,
        };
        collections.lists.push(list.clone());
        Ok(list)
    }

    pub fn delete_list(&self, id: &str) -> Result<(), StoreError> {
        let mut collections = self.write()?;
        let position = collections
            .lists
            .iter()
            .position(|l| l.id == *id)
            .ok_or_else(|| StoreError::ListNotFound(id.to_string()))?;
        collections.lists.remove(position);
        Ok(())
    }

    pub fn card_count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.cards.len())
    }

    pub fn list_count(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.lists.len())
    }
}

fn fresh_id<F>(taken: F) -> Identifier
where
    F: Fn(&Identifier) -> bool,
{
    loop {
        let id = Identifier::generate();
        if !taken(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::validation::ValidationError;

    fn valid_card(title: &str) -> ValidCard {
        ValidCard {
            title: title.to_string(),
            content: format!("{} body", title),
        }
    }

    fn valid_list(header: &str, card_ids: &[&Identifier]) -> ValidList {
        ValidList {
            header: header.to_string(),
            card_ids: card_ids.iter().map(|id| (*id).clone()).collect(),
        }
    }

    #[test]
    fn test_seeded_store() {
        let store = Store::seeded();
        let card = store.get_card("1").unwrap();
        assert_eq!(card.title, "Task One");

        let lists = store.list_lists().unwrap();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].card_ids, vec![Identifier::from("1")]);
    }

    #[test]
    fn test_insert_and_get_card() {
        let store = Store::new();
        let card = store.insert_card(valid_card("alpha")).unwrap();

        assert_eq!(store.get_card(card.id.as_str()).unwrap(), card);
        assert_eq!(store.card_count().unwrap(), 1);
        assert!(matches!(
            store.get_card("missing"),
            Err(StoreError::CardNotFound(id)) if id == "missing"
        ));
    }

    #[test]
    fn test_delete_card_cascades_preserving_order() {
        let store = Store::new();
        let one = store.insert_card(valid_card("one")).unwrap();
        let two = store.insert_card(valid_card("two")).unwrap();
        let three = store.insert_card(valid_card("three")).unwrap();

        let a = store
            .insert_list(valid_list("A", &[&one.id, &two.id, &three.id]))
            .unwrap();
        let b = store.insert_list(valid_list("B", &[&three.id])).unwrap();

        let touched = store.delete_card(one.id.as_str()).unwrap();
        assert_eq!(touched, 1);

        let a = store.get_list(a.id.as_str()).unwrap();
        assert_eq!(a.card_ids, vec![two.id.clone(), three.id.clone()]);
        let b = store.get_list(b.id.as_str()).unwrap();
        assert_eq!(b.card_ids, vec![three.id.clone()]);
        assert_eq!(store.card_count().unwrap(), 2);
    }

    #[test]
    fn test_delete_missing_card_leaves_store_unchanged() {
        let store = Store::seeded();
        assert!(matches!(
            store.delete_card("nope"),
            Err(StoreError::CardNotFound(_))
        ));
        assert_eq!(store.card_count().unwrap(), 1);
        assert_eq!(store.list_lists().unwrap()[0].card_ids.len(), 1);
    }

    #[test]
    fn test_delete_card_twice() {
        let store = Store::seeded();
        assert!(store.delete_card("1").is_ok());
        assert!(matches!(
            store.delete_card("1"),
            Err(StoreError::CardNotFound(_))
        ));
        assert!(store.list_lists().unwrap()[0].card_ids.is_empty());
    }

    #[test]
    fn test_insert_list_rejects_unknown_reference() {
        let store = Store::seeded();
        let seed = Identifier::from("1");
        let unknown = Identifier::from("42");

        let err = store
            .insert_list(valid_list("X", &[&seed, &unknown]))
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::InvalidReference(ref id)) if *id == unknown
        ));
        assert_eq!(store.list_count().unwrap(), 1);
    }

    #[test]
    fn test_insert_list_with_no_cards() {
        let store = Store::new();
        let list = store.insert_list(valid_list("Empty", &[])).unwrap();
        assert!(list.card_ids.is_empty());
        assert_eq!(store.get_list(list.id.as_str()).unwrap(), list);
    }

    #[test]
    fn test_delete_list() {
        let store = Store::seeded();
        store.delete_list("1").unwrap();
        assert_eq!(store.list_count().unwrap(), 0);
        assert!(matches!(
            store.delete_list("1"),
            Err(StoreError::ListNotFound(_))
        ));
        // cards are untouched
        assert_eq!(store.card_count().unwrap(), 1);
    }

    fn dangling_references(store: &Store) -> usize {
        let collections = store.inner.read().unwrap();
        collections
            .lists
            .iter()
            .flat_map(|l| l.card_ids.iter())
            .filter(|id| !collections.has_card(id))
            .count()
    }

    #[test]
    fn test_concurrent_list_inserts_and_card_deletes_never_dangle() {
        let store = std::sync::Arc::new(Store::new());
        let ids: Vec<Identifier> = (0..300)
            .map(|i| store.insert_card(valid_card(&format!("c{i}"))).unwrap().id)
            .collect();

        let deleter = {
            let store = store.clone();
            let ids = ids.clone();
            std::thread::spawn(move || {
                for id in ids {
                    store.delete_card(id.as_str()).unwrap();
                }
            })
        };
        let inserter = {
            let store = store.clone();
            let ids = ids.clone();
            std::thread::spawn(move || {
                for pair in ids.windows(2) {
                    match store.insert_list(valid_list("L", &[&pair[0], &pair[1]])) {
                        Ok(_) => {}
                        Err(StoreError::Validation(ValidationError::InvalidReference(_))) => {}
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
            })
        };

        while !(deleter.is_finished() && inserter.is_finished()) {
            assert_eq!(dangling_references(&store), 0);
        }
        deleter.join().unwrap();
        inserter.join().unwrap();

        assert_eq!(dangling_references(&store), 0);
        assert_eq!(store.card_count().unwrap(), 0);
        for list in store.list_lists().unwrap() {
            assert!(list.card_ids.is_empty());
        }
    }

    #[test]
    fn test_poisoned_lock_reports_error() {
        let store = std::sync::Arc::new(Store::seeded());
        let writer = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = writer.inner.write().unwrap();
            panic!("writer failed");
        })
        .join();

        assert!(matches!(store.list_cards(), Err(StoreError::Poisoned)));
    }
}
