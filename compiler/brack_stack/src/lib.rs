//! Fixed-capacity LIFO stack.
//!
//! The parser tracks open ancestors on a [`BoundedStack`], and the tree
//! walker uses one to render and release trees without native recursion.
//! The capacity is chosen at construction and never changes: pushing onto
//! a full stack is rejected and the value is handed back to the caller
//! instead of reallocating.
//!
//! # Configuration
//!
//! - **Capacity**: must be non-zero. Storage for every slot is reserved up
//!   front, so a successful [`BoundedStack::new`] never allocates again.

use std::fmt;

/// Failure conditions reported by [`BoundedStack`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    /// Construction was requested with a capacity of zero.
    #[error("stack capacity must be non-zero")]
    ZeroCapacity,
    /// Reserving storage for the requested capacity failed.
    #[error("failed to reserve storage for {capacity} stack slots")]
    Memory { capacity: usize },
    /// The stack already holds `capacity` values.
    #[error("stack overflow: capacity of {capacity} reached")]
    Overflow { capacity: usize },
    /// `pop` or `peek` on an empty stack.
    #[error("stack underflow")]
    Underflow,
}

/// A value rejected by [`BoundedStack::push`] because the stack was full.
///
/// Ownership of the value returns to the caller through
/// [`into_inner`](Self::into_inner).
pub struct Overflow<T> {
    value: T,
    capacity: usize,
}

impl<T> Overflow<T> {
    /// Recover the rejected value.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Capacity of the stack that rejected the value.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The equivalent [`StackError`], discarding the value.
    pub fn error(&self) -> StackError {
        StackError::Overflow {
            capacity: self.capacity,
        }
    }
}

impl<T> fmt::Debug for Overflow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overflow")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for Overflow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error(), f)
    }
}

impl<T> std::error::Error for Overflow<T> {}

/// Last-in-first-out container with a fixed capacity.
///
/// # Invariant
///
/// `items.len() <= capacity` and `items.capacity() >= capacity`, so
/// `push` never reallocates.
pub struct BoundedStack<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    /// Create an empty stack able to hold `capacity` values.
    pub fn new(capacity: usize) -> Result<Self, StackError> {
        if capacity == 0 {
            return Err(StackError::ZeroCapacity);
        }
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| StackError::Memory { capacity })?;
        Ok(Self { items, capacity })
    }

    /// Push `value` on top of the stack.
    ///
    /// Fails once the stack holds `capacity` values, returning `value`
    /// inside the [`Overflow`].
    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), Overflow<T>> {
        if self.items.len() >= self.capacity {
            return Err(Overflow {
                value,
                capacity: self.capacity,
            });
        }
        self.items.push(value);
        Ok(())
    }

    /// Remove and return the top value.
    #[inline]
    pub fn pop(&mut self) -> Result<T, StackError> {
        self.items.pop().ok_or(StackError::Underflow)
    }

    /// Borrow the top value without removing it.
    #[inline]
    pub fn peek(&self) -> Result<&T, StackError> {
        self.items.last().ok_or(StackError::Underflow)
    }

    /// Number of values currently on the stack.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Maximum number of values the stack can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> fmt::Debug for BoundedStack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedStack")
            .field("len", &self.items.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
