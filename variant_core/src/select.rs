use core::mem::{self, MaybeUninit};
use core::ptr;

use crate::dispatch::{Destroy, Dispatch};

/// Helper trait to index into a tuple of Generics.
///
/// # Safety
///
/// `INDEX` is trusted by positional access: it must be the position that
/// every [`Select`] impl keyed on this selector selects from.
///
/// ```compile_fail
/// use variant_core::select::Selector;
///
/// struct Anywhere;
///
/// impl Selector for Anywhere {
///     const INDEX: usize = 0;
/// }
/// ```
pub unsafe trait Selector {
    /// The zero-based position this selector names.
    const INDEX: usize;
}

/// Helper trait to 'select' a generic type out of a tuple of Generics.
///
/// # Safety
///
/// `Output` must be the alternative at position `S::INDEX` of `Self`;
/// storage is read and written as `Output` at that position.
pub unsafe trait Select<S: Selector>: TypeUnion {
    /// The selected generic.
    type Output;
}

/// A closed, ordered set of alternative types, written as a tuple.
///
/// # Safety
///
/// `Union` must be a `#[repr(C)]` union holding every alternative of the
/// tuple at offset zero, `LEN` must be the number of alternatives, and the
/// [`Destroy`] table must list the alternatives in declaration order.
/// Implementations are generated for tuples of one up to ten types.
pub unsafe trait TypeUnion: Sized + Dispatch<Destroy> {
    /// Storage wide and aligned enough for every alternative.
    type Union;

    /// Number of alternatives.
    const LEN: usize;

    /// The largest `size_of` across the alternatives.
    const SIZE: usize;

    /// The largest `align_of` across the alternatives.
    const ALIGN: usize;
}

/// Uninitialized storage for one alternative of `U`.
///
/// The storage itself does not know which alternative it holds; the owner
/// tracks that with a tag and hands the right type to every method.
pub struct RawStorage<U: TypeUnion> {
    data: MaybeUninit<U::Union>,
}

impl<U: TypeUnion> RawStorage<U> {
    /// Creates storage that holds nothing yet.
    #[inline]
    pub const fn uninit() -> Self {
        Self {
            data: MaybeUninit::uninit(),
        }
    }

    /// Creates storage and writes `value` into it.
    ///
    /// # Safety
    ///
    /// `T` must be one of the alternatives of `U`.
    #[inline]
    pub unsafe fn from_value<T>(value: T) -> Self {
        let mut storage = Self::uninit();
        // SAFETY: Guaranteed by the caller.
        unsafe { storage.write(value) };
        storage
    }

    /// Erased pointer to the start of the buffer.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr().cast()
    }

    /// Erased mutable pointer to the start of the buffer.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.data.as_mut_ptr().cast()
    }

    /// Writes `value` using `ptr::write`, without dropping what was there.
    ///
    /// # Safety
    ///
    /// `T` must be one of the alternatives of `U`. Any value previously held
    /// is leaked.
    #[inline]
    pub unsafe fn write<T>(&mut self, value: T) {
        debug_assert!(mem::size_of::<T>() <= mem::size_of::<U::Union>());
        debug_assert!(mem::align_of::<T>() <= mem::align_of::<U::Union>());
        // SAFETY: Every field of the union starts at offset zero and the union
        // is aligned for all of them, so the cast pointer is valid for `T`.
        unsafe { ptr::write(self.as_mut_ptr().cast::<T>(), value) }
    }

    /// Moves the held `T` out, leaving the buffer logically uninitialized.
    ///
    /// # Safety
    ///
    /// The buffer must currently hold a `T`, and the caller must not use or
    /// drop it as a `T` afterwards.
    #[inline]
    pub unsafe fn read<T>(&self) -> T {
        // SAFETY: Guaranteed by the caller.
        unsafe { ptr::read(self.as_ptr().cast::<T>()) }
    }

    /// Borrows the held `T`.
    ///
    /// # Safety
    ///
    /// The buffer must currently hold a `T`.
    #[inline]
    pub unsafe fn assume_ref<T>(&self) -> &T {
        // SAFETY: Guaranteed by the caller.
        unsafe { &*self.as_ptr().cast::<T>() }
    }

    /// Mutably borrows the held `T`.
    ///
    /// # Safety
    ///
    /// The buffer must currently hold a `T`.
    #[inline]
    pub unsafe fn assume_mut<T>(&mut self) -> &mut T {
        // SAFETY: Guaranteed by the caller.
        unsafe { &mut *self.as_mut_ptr().cast::<T>() }
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::string::String;

    use super::*;
    use crate::index::*;

    #[test]
    fn test_write_then_read() {
        let mut storage = RawStorage::<(u8, String)>::uninit();

        unsafe {
            storage.write(String::from("hi"));
            assert_eq!(storage.assume_ref::<String>(), "hi");

            storage.assume_mut::<String>().push('!');
            let s: String = storage.read();
            assert_eq!(s, "hi!");
        }
    }

    #[test]
    fn test_from_value_small_alternative() {
        let storage = unsafe { RawStorage::<(u64, u8)>::from_value(7u8) };
        assert_eq!(unsafe { *storage.assume_ref::<u8>() }, 7);
    }

    #[test]
    fn test_selector_positions() {
        assert_eq!(I0::INDEX, 0);
        assert_eq!(I4::INDEX, 4);
        assert_eq!(I9::INDEX, 9);
    }
}
