//! Type-addressed lookup of an alternative.
//!
//! `U: Locate<T, I>` holds when `T` is an alternative of `U` at the position
//! named by `I`, or when `U` stores a [`Recursive<T>`] at the position named
//! by the inner index of `Boxed<I>`. The index parameter is always left to
//! inference (`get::<T, _>()`): the impls are keyed on the alternative type
//! itself, so inference succeeds exactly when `T` occurs once. A type that
//! is absent, or present more than once, is rejected at compile time.
//!
//! ```compile_fail
//! use unionvariant::Variant;
//!
//! // `u32` occurs twice, so the target alternative is ambiguous.
//! let v = Variant::<(u32, u32)>::new(5u32);
//! ```
//!
//! ```compile_fail
//! use unionvariant::Variant;
//!
//! // `&str` is not one of the alternatives.
//! let v = Variant::<(u32, String)>::new("hello");
//! ```

use core::marker::PhantomData;

use variant_core::index::*;
use variant_core::select::TypeUnion;

use crate::recursive::Recursive;

/// Index marker for an alternative reached through [`Recursive`].
pub struct Boxed<I>(PhantomData<I>);

/// Locates `T` among the alternatives of `Self`.
///
/// # Safety
///
/// `Stored` must be the alternative at position `INDEX` of `Self`, and
/// `project`/`project_mut` must read their pointer as a `Stored`.
pub unsafe trait Locate<T, I>: TypeUnion {
    /// Position of the alternative holding `T`.
    const INDEX: usize;

    /// The alternative as stored: `T` itself or `Recursive<T>`.
    type Stored;

    /// Turns a `T` into the stored alternative.
    fn wrap(value: T) -> Self::Stored;

    /// Turns the stored alternative back into a `T`.
    fn unwrap(stored: Self::Stored) -> T;

    /// Borrows the `T` inside the stored alternative.
    ///
    /// # Safety
    ///
    /// `storage` must point to a live `Stored` that outlives `'a` and is not
    /// mutated during `'a`.
    unsafe fn project<'a>(storage: *const u8) -> &'a T;

    /// Mutably borrows the `T` inside the stored alternative.
    ///
    /// # Safety
    ///
    /// `storage` must point to a live `Stored` that outlives `'a` and is not
    /// otherwise accessed during `'a`.
    unsafe fn project_mut<'a>(storage: *mut u8) -> &'a mut T;
}

macro_rules! locate {
    (
        BEFORE = [$($before:ident),*],
        REST = [$current:ident $(,$after:ident)*],
        INDICES = [$index:ident $(,$indices:ident)*]
    ) => (
        unsafe impl<$($before,)* $current $(,$after)*> Locate<$current, $index>
            for ($($before,)* $current, $($after,)*)
        {
            const INDEX: usize = <$index as variant_core::select::Selector>::INDEX;

            type Stored = $current;

            #[inline]
            fn wrap(value: $current) -> $current {
                value
            }

            #[inline]
            fn unwrap(stored: $current) -> $current {
                stored
            }

            #[inline]
            unsafe fn project<'a>(storage: *const u8) -> &'a $current {
                // SAFETY: Guaranteed by the caller.
                unsafe { &*storage.cast::<$current>() }
            }

            #[inline]
            unsafe fn project_mut<'a>(storage: *mut u8) -> &'a mut $current {
                // SAFETY: Guaranteed by the caller.
                unsafe { &mut *storage.cast::<$current>() }
            }
        }

        unsafe impl<$($before,)* $current $(,$after)*> Locate<$current, Boxed<$index>>
            for ($($before,)* Recursive<$current>, $($after,)*)
        {
            const INDEX: usize = <$index as variant_core::select::Selector>::INDEX;

            type Stored = Recursive<$current>;

            #[inline]
            fn wrap(value: $current) -> Recursive<$current> {
                Recursive::new(value)
            }

            #[inline]
            fn unwrap(stored: Recursive<$current>) -> $current {
                stored.into_inner()
            }

            #[inline]
            unsafe fn project<'a>(storage: *const u8) -> &'a $current {
                // SAFETY: Guaranteed by the caller.
                unsafe { &**storage.cast::<Recursive<$current>>() }
            }

            #[inline]
            unsafe fn project_mut<'a>(storage: *mut u8) -> &'a mut $current {
                // SAFETY: Guaranteed by the caller.
                unsafe { &mut **storage.cast::<Recursive<$current>>() }
            }
        }

        locate!(
            BEFORE = [$($before,)* $current],
            REST = [$($after),*],
            INDICES = [$($indices),*]
        );
    );

    (
        BEFORE = [$($before:ident),*],
        REST = [],
        INDICES = [$($indices:ident),*]
    ) => ();

    (GENERICS = [$($generics:ident),*]) => (
        locate!(
            BEFORE = [],
            REST = [$($generics),*],
            INDICES = [I0, I1, I2, I3, I4, I5, I6, I7, I8, I9]
        );
    );
}

locate!(GENERICS = [A]);
locate!(GENERICS = [A, B]);
locate!(GENERICS = [A, B, C]);
locate!(GENERICS = [A, B, C, D]);
locate!(GENERICS = [A, B, C, D, E]);
locate!(GENERICS = [A, B, C, D, E, F]);
locate!(GENERICS = [A, B, C, D, E, F, G]);
locate!(GENERICS = [A, B, C, D, E, F, G, H]);
locate!(GENERICS = [A, B, C, D, E, F, G, H, I]);
locate!(GENERICS = [A, B, C, D, E, F, G, H, I, J]);
