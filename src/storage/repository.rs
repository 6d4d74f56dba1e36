//! Generic in-memory repository
//!
//! Entities are stored by their [`Identifiable::id`]. Saving an entity whose
//! ID is already present replaces the previous value.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::Identifiable;

/// Keyed storage for identifiable entities
///
/// Lookups return clones, so callers never hold a borrow into the store.
pub trait Repository<T>
where
    T: Identifiable + Clone,
{
    /// Inserts or replaces the entity with the same ID, returning what was stored
    fn save(&self, entity: T) -> T;

    fn find_by_id(&self, id: T::Id) -> Option<T>;

    /// Returns a snapshot of every stored entity
    fn find_all(&self) -> Vec<T>;

    /// Removes the entity with this ID; does nothing if there is none
    fn delete(&self, id: T::Id);

    fn len(&self) -> usize {
        self.find_all().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns every entity ordered by `compare`
    fn find_all_sorted<F>(&self, compare: F) -> Vec<T>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let mut all = self.find_all();
        all.sort_by(compare);
        all
    }
}

/// Repository backed by an ordered map behind a reader/writer lock
///
/// Iteration order is ascending by ID. The lock makes it safe to share one
/// repository between threads; each call sees a consistent snapshot.
pub struct InMemoryRepository<T: Identifiable> {
    entries: RwLock<BTreeMap<T::Id, T>>,
}

impl<T: Identifiable> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    // Every write is a single map operation, so a poisoned lock still holds a
    // consistent map.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<T::Id, T>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<T::Id, T>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Identifiable> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Identifiable + Clone,
{
    fn save(&self, entity: T) -> T {
        self.write().insert(entity.id(), entity.clone());
        entity
    }

    fn find_by_id(&self, id: T::Id) -> Option<T> {
        self.read().get(&id).cloned()
    }

    fn find_all(&self) -> Vec<T> {
        self.read().values().cloned().collect()
    }

    fn delete(&self, id: T::Id) {
        self.write().remove(&id);
    }

    fn len(&self) -> usize {
        self.read().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{compare_by_name, Employee, EmployeeId, Person, Task, TaskId};
    use proptest::prelude::*;

    fn employee(id: u64, name: &str) -> Employee {
        Employee::new(EmployeeId::new(id), name, 1)
    }

    #[test]
    fn empty_repository() {
        let repo: InMemoryRepository<Employee> = InMemoryRepository::new();
        assert!(repo.is_empty());
        assert!(repo.find_all().is_empty());
        assert!(repo.find_by_id(EmployeeId::new(1)).is_none());
    }

    #[test]
    fn save_then_find() {
        let repo = InMemoryRepository::<Employee>::new();
        let saved = repo.save(employee(1, "Ana"));

        let found = repo.find_by_id(EmployeeId::new(1)).unwrap();
        assert_eq!(found, saved);
        assert_eq!(found.name(), "Ana");
    }

    #[test]
    fn save_same_id_replaces() {
        let repo = InMemoryRepository::<Employee>::new();
        repo.save(employee(1, "Ana"));
        repo.save(employee(2, "Ben"));
        repo.save(employee(1, "Anabel"));

        assert_eq!(repo.len(), 2);
        assert_eq!(repo.find_by_id(EmployeeId::new(1)).unwrap().name(), "Anabel");
    }

    #[test]
    fn delete_removes_entry() {
        let repo = InMemoryRepository::<Employee>::new();
        repo.save(employee(1, "Ana"));
        repo.delete(EmployeeId::new(1));

        assert!(repo.find_by_id(EmployeeId::new(1)).is_none());
        assert!(repo.is_empty());
    }

    #[test]
    fn delete_unknown_is_noop() {
        let repo = InMemoryRepository::<Employee>::new();
        repo.save(employee(1, "Ana"));
        repo.delete(EmployeeId::new(99));

        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn find_all_sorted_by_name() {
        let repo = InMemoryRepository::<Employee>::new();
        repo.save(employee(1, "suraj"));
        repo.save(employee(2, "Ana"));
        repo.save(employee(3, "Mia"));

        let names: Vec<_> = repo
            .find_all_sorted(compare_by_name)
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["Ana", "Mia", "suraj"]);
    }

    #[test]
    fn find_all_iterates_by_id() {
        let repo = InMemoryRepository::<Task>::new();
        for id in [3, 1, 2] {
            repo.save(
                Task::builder(TaskId::new(id))
                    .title(format!("Task {}", id))
                    .build()
                    .unwrap(),
            );
        }

        let ids: Vec<_> = repo.find_all().iter().map(|t| t.id().value()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn shared_between_threads() {
        let repo = std::sync::Arc::new(InMemoryRepository::<Employee>::new());
        let writers: Vec<_> = (0..4u64)
            .map(|n| {
                let repo = std::sync::Arc::clone(&repo);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        repo.save(employee(n * 100 + i, "Worker"));
                    }
                })
            })
            .collect();

        for w in writers {
            w.join().unwrap();
        }
        assert_eq!(repo.len(), 200);
    }

    proptest! {
        #[test]
        fn len_counts_distinct_ids(ids in proptest::collection::vec(1u64..50, 0..100)) {
            let repo = InMemoryRepository::<Employee>::new();
            for id in &ids {
                repo.save(employee(*id, "Someone"));
            }

            let distinct: std::collections::BTreeSet<_> = ids.iter().collect();
            prop_assert_eq!(repo.len(), distinct.len());
            for id in distinct {
                prop_assert!(repo.find_by_id(EmployeeId::new(*id)).is_some());
            }
        }
    }
}
