//! Shared, single-threaded interior mutability.
//!
//! Modal orchestration happens entirely on the UI thread, so shared state is
//! reference counted rather than locked.

use std::{
    cell::{Ref, RefCell, RefMut},
    rc::{Rc, Weak},
};

/// A "shared" value.
///
/// Equivalent to `Rc<RefCell<T>>`.
#[derive(Default)]
pub struct Shared<T> {
    inner: Rc<RefCell<T>>,
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: 'static> From<T> for Shared<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: PartialEq> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner) || *self.get() == *other.get()
    }
}

impl<T> Shared<T> {
    /// Create a new shared `T`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(value)),
        }
    }

    /// Get a reference to the inner `T`.
    ///
    /// ## Panics
    /// Panics if the value is currently borrowed mutably.
    pub fn get(&self) -> Ref<'_, T> {
        self.inner.borrow()
    }

    /// Get a mutable reference to the inner `T`.
    ///
    /// ## Panics
    /// Panics if the value is currently borrowed.
    pub fn get_mut(&self) -> RefMut<'_, T> {
        self.inner.borrow_mut()
    }

    /// Set the inner `T`.
    ///
    /// Returns the previous value.
    pub fn set(&self, value: T) -> T {
        self.inner.replace(value)
    }

    /// Whether both handles point at the same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Create a non-owning handle to the value.
    pub fn downgrade(&self) -> WeakShared<T> {
        WeakShared {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

/// A non-owning handle to a [`Shared`] value.
pub struct WeakShared<T> {
    inner: Weak<RefCell<T>>,
}

impl<T> Clone for WeakShared<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> WeakShared<T> {
    /// Returns the shared value, if it is still alive.
    pub fn upgrade(&self) -> Option<Shared<T>> {
        self.inner.upgrade().map(|inner| Shared { inner })
    }
}
