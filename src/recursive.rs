//! Heap indirection for alternatives that contain their own variant.
//!
//! A variant's storage is as large as its largest alternative, so an
//! alternative that (transitively) holds the variant itself would need
//! infinite storage. [`Recursive<T>`] keeps the `T` behind one heap
//! allocation that it owns exclusively.
//!
//! Typed access looks through the wrapper: for a variant over
//! `(i64, Recursive<Pair>)`, `Variant::new(pair)` boxes the value and
//! `get::<Pair, _>()` returns `&Pair`.

use alloc::boxed::Box;
use core::borrow::{Borrow, BorrowMut};
use core::fmt;
use core::ops::{Deref, DerefMut};

/// Exclusive owner of one heap-allocated `T`.
///
/// Cloning deep-copies the pointee into a fresh allocation. Comparison,
/// hashing and formatting forward to the pointee.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Recursive<T> {
    boxed: Box<T>,
}

impl<T> Recursive<T> {
    /// Moves `value` to the heap.
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            boxed: Box::new(value),
        }
    }

    /// Moves the value back out of its allocation.
    #[inline]
    pub fn into_inner(self) -> T {
        *self.boxed
    }

    /// Replaces the pointee, reusing the existing allocation.
    #[inline]
    pub fn assign(&mut self, value: T) {
        *self.boxed = value;
    }
}

impl<T> From<T> for Recursive<T> {
    #[inline]
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> Deref for Recursive<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &T {
        &self.boxed
    }
}

impl<T> DerefMut for Recursive<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        &mut self.boxed
    }
}

impl<T> AsRef<T> for Recursive<T> {
    #[inline]
    fn as_ref(&self) -> &T {
        &self.boxed
    }
}

impl<T> AsMut<T> for Recursive<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut T {
        &mut self.boxed
    }
}

impl<T> Borrow<T> for Recursive<T> {
    #[inline]
    fn borrow(&self) -> &T {
        &self.boxed
    }
}

impl<T> BorrowMut<T> for Recursive<T> {
    #[inline]
    fn borrow_mut(&mut self) -> &mut T {
        &mut self.boxed
    }
}

impl<T: fmt::Debug> fmt::Debug for Recursive<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.boxed.fmt(f)
    }
}

impl<T: fmt::Display> fmt::Display for Recursive<T> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.boxed.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::rc::Rc;
    use alloc::string::String;

    use super::*;

    #[test]
    fn test_clone_is_deep() {
        let original = Recursive::new(String::from("left"));
        let mut copy = original.clone();
        copy.push_str("-changed");

        assert_eq!(*original, "left");
        assert_eq!(*copy, "left-changed");
        assert!(!core::ptr::eq(&*original, &*copy));
    }

    #[test]
    fn test_move_keeps_the_allocation() {
        let wrapped = Recursive::new(5u64);
        let address = &*wrapped as *const u64;

        let moved = wrapped;
        assert_eq!(&*moved as *const u64, address);
    }

    #[test]
    fn test_drop_releases_pointee_once() {
        let shared = Rc::new(());
        let wrapped = Recursive::new(Rc::clone(&shared));
        let copy = wrapped.clone();
        assert_eq!(Rc::strong_count(&shared), 3);

        drop(wrapped);
        assert_eq!(Rc::strong_count(&shared), 2);
        drop(copy);
        assert_eq!(Rc::strong_count(&shared), 1);
    }

    #[test]
    fn test_assign_reuses_allocation() {
        let mut wrapped = Recursive::new(1u32);
        let address = &*wrapped as *const u32;

        wrapped.assign(2);
        assert_eq!(*wrapped, 2);
        assert_eq!(&*wrapped as *const u32, address);
    }

    #[test]
    fn test_forwarding() {
        let a = Recursive::new(3);
        let b = Recursive::from(4);

        assert!(a < b);
        assert_ne!(a, b);
        assert_eq!(a, Recursive::new(3));
        assert_eq!(format!("{a:?} {b}"), "3 4");
        assert_eq!(b.into_inner(), 4);
    }
}
