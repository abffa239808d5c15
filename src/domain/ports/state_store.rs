//! Session-scoped key/value store port.
//!
//! Stands in for the browser tab's session storage: values are opaque
//! strings (the session writes JSON), and each store instance belongs to a
//! single session owner.

use crate::domain::errors::DomainResult;

/// Key/value storage for session state.
pub trait StateStore: Send {
    /// Returns the stored value, or `None` if the key was never set or was removed.
    fn get(&self, key: &str) -> DomainResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> DomainResult<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> DomainResult<()>;
}

impl<T: StateStore + ?Sized> StateStore for Box<T> {
    fn get(&self, key: &str) -> DomainResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> DomainResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> DomainResult<()> {
        (**self).remove(key)
    }
}
