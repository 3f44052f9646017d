//! One shared instance per type.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::Lazy;

static GLOBAL: Lazy<Singletons> = Lazy::new(Singletons::new);

type Slot = Arc<dyn Any + Send + Sync>;

/// Type-keyed store of lazily created shared instances.
///
/// The first caller for a type creates it with `T::default()`; every later
/// caller receives the same `Arc`. Callers racing on the first request may
/// each build a value, but only the one stored first is ever handed out.
#[derive(Default)]
pub struct Singletons {
    slots: Mutex<HashMap<TypeId, Slot>>,
}

impl Singletons {
    pub fn new() -> Self { Self::default() }

    pub fn global() -> &'static Singletons { &GLOBAL }

    pub fn get_or_init<T>(&self) -> Arc<T>
    where
        T: Default + Send + Sync + 'static,
    {
        let id = TypeId::of::<T>();
        if let Some(slot) = self.slot(id) {
            return downcast(slot);
        }

        // Built outside the lock so a constructor may itself ask for singletons.
        let fresh: Slot = Arc::new(T::default());
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = match slots.entry(id) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => {
                tracing::trace!(type_name = std::any::type_name::<T>(), "singleton created");
                entry.insert(fresh).clone()
            },
        };
        drop(slots);
        downcast(slot)
    }

    pub fn contains<T: 'static>(&self) -> bool { self.slot(TypeId::of::<T>()).is_some() }

    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    fn slot(&self, id: TypeId) -> Option<Slot> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }
}

fn downcast<T: Send + Sync + 'static>(slot: Slot) -> Arc<T> {
    slot.downcast::<T>()
        .unwrap_or_else(|_| unreachable!("singleton slot keyed by TypeId holds another type"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Config {
        debug: bool,
    }

    static BUILT: AtomicUsize = AtomicUsize::new(0);

    struct Counted;

    impl Default for Counted {
        fn default() -> Self {
            BUILT.fetch_add(1, Ordering::SeqCst);
            Counted
        }
    }

    #[test]
    fn test_same_instance_per_type() {
        let singletons = Singletons::new();

        let first = singletons.get_or_init::<Config>();
        let second = singletons.get_or_init::<Config>();

        assert!(Arc::ptr_eq(&first, &second));
        assert!(!first.debug);
        assert_eq!(singletons.len(), 1);
    }

    #[test]
    fn test_distinct_types_distinct_slots() {
        let singletons = Singletons::new();

        singletons.get_or_init::<Config>();
        assert!(!singletons.contains::<Vec<u8>>());
        singletons.get_or_init::<Vec<u8>>();

        assert!(singletons.contains::<Config>());
        assert!(singletons.contains::<Vec<u8>>());
        assert_eq!(singletons.len(), 2);
    }

    #[test]
    fn test_constructed_once() {
        let singletons = Singletons::new();

        for _ in 0..5 {
            singletons.get_or_init::<Counted>();
        }

        assert_eq!(BUILT.load(Ordering::SeqCst), 1);
    }

    static RACED: Lazy<Singletons> = Lazy::new(Singletons::new);

    /// Stores a competing instance while its own constructor runs.
    struct Raced {
        winner: bool,
    }

    impl Default for Raced {
        fn default() -> Self {
            RACED
                .slots
                .lock()
                .unwrap()
                .insert(TypeId::of::<Raced>(), Arc::new(Raced { winner: true }));
            Raced { winner: false }
        }
    }

    #[test]
    fn test_first_stored_instance_wins() {
        let raced = RACED.get_or_init::<Raced>();

        assert!(raced.winner);
        assert!(Arc::ptr_eq(&raced, &RACED.get_or_init::<Raced>()));
        assert_eq!(RACED.len(), 1);
    }

    #[test]
    fn test_concurrent_callers_share_instance() {
        let singletons = Arc::new(Singletons::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let singletons = Arc::clone(&singletons);
                std::thread::spawn(move || singletons.get_or_init::<Config>())
            })
            .collect();
        let instances: Vec<Arc<Config>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(instances.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
