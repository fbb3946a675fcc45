//! Keyed registry of singleton store instances.
//!
//! The registry exists for one reason: letting stores reference each other
//! without construction-time cycles. The auth store resets the user,
//! projects, and tasks stores on logout by looking them up here at action
//! time instead of holding them from birth. Registration happens once at
//! bootstrap; there is no unregister.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::RegistryError;

type AnyStore = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
pub struct StoreRegistry {
    stores: Mutex<HashMap<String, AnyStore>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a store under its identifier. Registering the same id twice
    /// is an error; stores are created exactly once at bootstrap.
    pub fn register<S: Send + Sync + 'static>(
        &self,
        id: &str,
        instance: Arc<S>,
    ) -> Result<(), RegistryError> {
        let mut stores = self.stores.lock().expect("registry lock poisoned");
        if stores.contains_key(id) {
            return Err(RegistryError::DuplicateStore(id.to_string()));
        }
        stores.insert(id.to_string(), instance);
        Ok(())
    }

    /// Look up a store by identifier, downcast to its concrete type.
    pub fn lookup<S: Send + Sync + 'static>(&self, id: &str) -> Result<Arc<S>, RegistryError> {
        let stores = self.stores.lock().expect("registry lock poisoned");
        let instance = stores
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownStore(id.to_string()))?;
        instance
            .downcast::<S>()
            .map_err(|_| RegistryError::TypeMismatch(id.to_string()))
    }

    /// Identifiers of everything registered, for diagnostics.
    pub fn registered_ids(&self) -> Vec<String> {
        let stores = self.stores.lock().expect("registry lock poisoned");
        let mut ids: Vec<String> = stores.keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FakeStore {
        name: &'static str,
    }

    #[derive(Debug)]
    struct OtherStore;

    #[test]
    fn register_then_lookup_returns_the_same_instance() {
        let registry = StoreRegistry::new();
        let store = Arc::new(FakeStore { name: "fake" });
        registry.register("fakeStore", Arc::clone(&store)).unwrap();

        let found = registry.lookup::<FakeStore>("fakeStore").unwrap();
        assert_eq!(found.name, "fake");
        assert!(Arc::ptr_eq(&store, &found));
    }

    #[test]
    fn duplicate_registration_fails() {
        let registry = StoreRegistry::new();
        registry
            .register("fakeStore", Arc::new(FakeStore { name: "first" }))
            .unwrap();

        let err = registry
            .register("fakeStore", Arc::new(FakeStore { name: "second" }))
            .unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateStore(id) if id == "fakeStore"));
    }

    #[test]
    fn lookup_before_registration_fails() {
        let registry = StoreRegistry::new();
        let err = registry.lookup::<FakeStore>("missingStore").unwrap_err();
        assert!(matches!(err, RegistryError::UnknownStore(id) if id == "missingStore"));
    }

    #[test]
    fn lookup_with_wrong_type_fails() {
        let registry = StoreRegistry::new();
        registry
            .register("fakeStore", Arc::new(FakeStore { name: "fake" }))
            .unwrap();

        let err = registry.lookup::<OtherStore>("fakeStore").unwrap_err();
        assert!(matches!(err, RegistryError::TypeMismatch(_)));
    }

    #[test]
    fn registered_ids_are_sorted() {
        let registry = StoreRegistry::new();
        registry.register("b", Arc::new(OtherStore)).unwrap();
        registry.register("a", Arc::new(OtherStore)).unwrap();
        assert_eq!(registry.registered_ids(), vec!["a", "b"]);
    }
}
