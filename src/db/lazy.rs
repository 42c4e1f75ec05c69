//! Deferred-computation wrapper for host tables that are produced on first access.

use std::collections::HashSet;
use std::fmt;

type Loader<T> = Box<dyn FnOnce() -> T + Send>;
type Transformer<T> = Box<dyn FnMut(&mut T) + Send>;

/// Outcome of [`LazyLoad::add_transformer_once`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The value existed; the transformer ran and reported this many changes.
    Applied(usize),
    /// The value is not produced yet; the transformer waits for the loader.
    Queued,
    /// A transformer with the same key was registered earlier.
    AlreadyRegistered,
}

impl Registration {
    /// Changes made now, counting a queued transformer as one.
    pub fn count(self) -> usize {
        match self {
            Registration::Applied(changes) => changes,
            Registration::Queued => 1,
            Registration::AlreadyRegistered => 0,
        }
    }
}

/// A value produced by a loader on first access, followed by an ordered
/// pipeline of transformers.
///
/// Transformers registered before the value exists are queued and run, in
/// registration order, right after the loader. Transformers registered after
/// the value exists run immediately.
pub struct LazyLoad<T> {
    loader: Option<Loader<T>>,
    value: Option<T>,
    transformers: Vec<Transformer<T>>,
    keys: HashSet<String>,
}

impl<T> LazyLoad<T> {
    /// Wrap a loader that will run on first access.
    pub fn new<F>(loader: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self {
            loader: Some(Box::new(loader)),
            value: None,
            transformers: Vec::new(),
            keys: HashSet::new(),
        }
    }

    /// Wrap an already materialized value.
    pub fn loaded(value: T) -> Self {
        Self {
            loader: None,
            value: Some(value),
            transformers: Vec::new(),
            keys: HashSet::new(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.value.is_some()
    }

    /// Number of transformers waiting for the loader to run.
    pub fn pending_transformers(&self) -> usize {
        self.transformers.len()
    }

    /// Register a transformer.
    pub fn add_transformer<F>(&mut self, mut transform: F)
    where
        F: FnMut(&mut T) + Send + 'static,
    {
        match self.value.as_mut() {
            Some(value) => transform(value),
            None => self.transformers.push(Box::new(transform)),
        }
    }

    /// Register a transformer unless one with the same `key` already was.
    ///
    /// The transformer returns how many changes it made.
    pub fn add_transformer_once<F>(&mut self, key: impl Into<String>, mut transform: F) -> Registration
    where
        F: FnMut(&mut T) -> usize + Send + 'static,
    {
        if !self.keys.insert(key.into()) {
            return Registration::AlreadyRegistered;
        }
        match self.value.as_mut() {
            Some(value) => Registration::Applied(transform(value)),
            None => {
                self.transformers.push(Box::new(move |value: &mut T| {
                    transform(value);
                }));
                Registration::Queued
            }
        }
    }
}

impl<T: Default> LazyLoad<T> {
    /// Force the value, running the loader and queued transformers if needed.
    pub fn value_mut(&mut self) -> &mut T {
        if self.value.is_none() {
            let mut value = self.loader.take().map(|load| load()).unwrap_or_default();
            for mut transform in self.transformers.drain(..) {
                transform(&mut value);
            }
            self.value = Some(value);
        }

        self.value.get_or_insert_with(T::default)
    }

    /// Force the value and borrow it immutably.
    pub fn value(&mut self) -> &T {
        self.value_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for LazyLoad<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyLoad")
            .field("value", &self.value)
            .field("pending_transformers", &self.transformers.len())
            .field("keys", &self.keys.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_loader_runs_once_on_first_access() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let mut lazy = LazyLoad::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            vec![1, 2]
        });

        assert!(!lazy.is_loaded());
        assert_eq!(lazy.value(), &vec![1, 2]);
        assert_eq!(lazy.value(), &vec![1, 2]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_transformers_queue_until_loaded() {
        let mut lazy = LazyLoad::new(|| vec![1]);
        lazy.add_transformer(|v: &mut Vec<i32>| v.push(2));
        lazy.add_transformer(|v: &mut Vec<i32>| v.push(3));

        assert_eq!(lazy.pending_transformers(), 2);
        assert_eq!(lazy.value(), &vec![1, 2, 3]);
        assert_eq!(lazy.pending_transformers(), 0);
    }

    #[test]
    fn test_transformer_on_loaded_value_runs_immediately() {
        let mut lazy = LazyLoad::loaded(vec![1]);
        lazy.add_transformer(|v: &mut Vec<i32>| v.push(9));

        assert_eq!(lazy.pending_transformers(), 0);
        assert_eq!(lazy.value(), &vec![1, 9]);
    }

    #[test]
    fn test_keyed_transformer_registers_once() {
        let mut lazy = LazyLoad::new(|| vec![1]);

        let push = |v: &mut Vec<i32>| -> usize {
            v.push(2);
            1
        };
        assert_eq!(lazy.add_transformer_once("two", push), Registration::Queued);
        assert_eq!(lazy.add_transformer_once("two", push), Registration::AlreadyRegistered);
        assert_eq!(lazy.pending_transformers(), 1);
        assert_eq!(lazy.value(), &vec![1, 2]);

        // same key after loading stays a no-op
        assert_eq!(lazy.add_transformer_once("two", push), Registration::AlreadyRegistered);
        let push_three = |v: &mut Vec<i32>| -> usize {
            v.push(3);
            1
        };
        assert_eq!(lazy.add_transformer_once("three", push_three), Registration::Applied(1));
        assert_eq!(lazy.value(), &vec![1, 2, 3]);
    }
}
