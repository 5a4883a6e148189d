//! Operations dispatched by the trait impls of [`Variant`](crate::Variant).
//!
//! Each type here is an [`Operation`]: it names a capability (cloning,
//! comparing, hashing, ...) and provides, for every alternative type that has
//! the capability, a handler working on erased pointers. A variant gains the
//! matching trait only when every alternative does, because the handler
//! table is built through a `Handles<A>` bound per alternative.
//!
//! These types appear in the `where` clauses of generic code over variants,
//! e.g. `U: Dispatch<Equal>` for "every alternative is `PartialEq`".
//!
//! A handler is trusted to match its alternative, so borrowing another
//! type's handler needs an `unsafe impl`:
//!
//! ```compile_fail
//! use unionvariant::ops::Displaying;
//! use unionvariant::{Handles, Operation};
//!
//! struct Fake(u64, u64);
//!
//! impl Handles<Fake> for Displaying {
//!     const HANDLER: <Displaying as Operation>::Handler =
//!         <Displaying as Handles<&'static str>>::HANDLER;
//! }
//! ```

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ptr;

use variant_core::dispatch::{Handles, Operation};

/// Handlers for cloning an alternative.
#[derive(Clone, Copy)]
pub struct CloneVtable {
    /// Writes a clone of the value at the first pointer to the second.
    clone_into: unsafe fn(*const u8, *mut u8),
    /// Clones the value at the second pointer into the live value at the
    /// first, via `Clone::clone_from`.
    clone_from: unsafe fn(*mut u8, *const u8),
}

impl CloneVtable {
    /// # Safety
    ///
    /// `source` must point to the alternative this vtable was built for and
    /// `target` must be valid for writes of it.
    #[inline]
    pub(crate) unsafe fn clone_into(&self, source: *const u8, target: *mut u8) {
        // SAFETY: Guaranteed by the caller.
        unsafe { (self.clone_into)(source, target) }
    }

    /// # Safety
    ///
    /// Both pointers must point to live values of the alternative this
    /// vtable was built for.
    #[inline]
    pub(crate) unsafe fn clone_from(&self, target: *mut u8, source: *const u8) {
        // SAFETY: Guaranteed by the caller.
        unsafe { (self.clone_from)(target, source) }
    }
}

/// Clones an alternative, either into fresh storage or over a live value of
/// the same type.
#[derive(Debug, Clone, Copy)]
pub struct Cloning;

impl Operation for Cloning {
    type Handler = CloneVtable;
}

// SAFETY: The handler treats its value pointers as `A` only.
unsafe impl<A: Clone> Handles<A> for Cloning {
    const HANDLER: CloneVtable = CloneVtable {
        clone_into: clone_into::<A>,
        clone_from: clone_from::<A>,
    };
}

unsafe fn clone_into<A: Clone>(source: *const u8, target: *mut u8) {
    // SAFETY: The vtable contract guarantees both pointers refer to `A`.
    unsafe { ptr::write(target.cast::<A>(), (*source.cast::<A>()).clone()) }
}

unsafe fn clone_from<A: Clone>(target: *mut u8, source: *const u8) {
    // SAFETY: The vtable contract guarantees both pointers refer to live `A`s.
    unsafe { (*target.cast::<A>()).clone_from(&*source.cast::<A>()) }
}

/// Moves a value over a live value of the same alternative.
///
/// The source is read out, so the caller must not drop it afterwards.
#[derive(Debug, Clone, Copy)]
pub struct MoveAssign;

impl Operation for MoveAssign {
    type Handler = unsafe fn(*mut u8, *const u8);
}

// SAFETY: The handler treats its value pointers as `A` only.
unsafe impl<A> Handles<A> for MoveAssign {
    const HANDLER: unsafe fn(*mut u8, *const u8) = move_assign::<A>;
}

unsafe fn move_assign<A>(target: *mut u8, source: *const u8) {
    // SAFETY: Both pointers refer to live `A`s and the caller gives up the
    // source.
    unsafe { *target.cast::<A>() = ptr::read(source.cast::<A>()) }
}

/// Compares two values of the same alternative with `PartialEq`.
#[derive(Debug, Clone, Copy)]
pub struct Equal;

impl Operation for Equal {
    type Handler = unsafe fn(*const u8, *const u8) -> bool;
}

// SAFETY: The handler treats its value pointers as `A` only.
unsafe impl<A: PartialEq> Handles<A> for Equal {
    const HANDLER: unsafe fn(*const u8, *const u8) -> bool = eq::<A>;
}

/// Like [`Equal`], but only available when the alternative is `Eq`.
#[derive(Debug, Clone, Copy)]
pub struct Equivalence;

impl Operation for Equivalence {
    type Handler = unsafe fn(*const u8, *const u8) -> bool;
}

// SAFETY: The handler treats its value pointers as `A` only.
unsafe impl<A: Eq> Handles<A> for Equivalence {
    const HANDLER: unsafe fn(*const u8, *const u8) -> bool = eq::<A>;
}

unsafe fn eq<A: PartialEq>(lhs: *const u8, rhs: *const u8) -> bool {
    // SAFETY: Both pointers refer to live `A`s.
    unsafe { *lhs.cast::<A>() == *rhs.cast::<A>() }
}

/// Orders two values of the same alternative with `PartialOrd`.
#[derive(Debug, Clone, Copy)]
pub struct PartialCompare;

impl Operation for PartialCompare {
    type Handler = unsafe fn(*const u8, *const u8) -> Option<Ordering>;
}

// SAFETY: The handler treats its value pointers as `A` only.
unsafe impl<A: PartialOrd> Handles<A> for PartialCompare {
    const HANDLER: unsafe fn(*const u8, *const u8) -> Option<Ordering> = partial_cmp::<A>;
}

unsafe fn partial_cmp<A: PartialOrd>(lhs: *const u8, rhs: *const u8) -> Option<Ordering> {
    // SAFETY: Both pointers refer to live `A`s.
    unsafe { (*lhs.cast::<A>()).partial_cmp(&*rhs.cast::<A>()) }
}

/// Orders two values of the same alternative with `Ord`.
#[derive(Debug, Clone, Copy)]
pub struct TotalCompare;

impl Operation for TotalCompare {
    type Handler = unsafe fn(*const u8, *const u8) -> Ordering;
}

// SAFETY: The handler treats its value pointers as `A` only.
unsafe impl<A: Ord> Handles<A> for TotalCompare {
    const HANDLER: unsafe fn(*const u8, *const u8) -> Ordering = cmp::<A>;
}

unsafe fn cmp<A: Ord>(lhs: *const u8, rhs: *const u8) -> Ordering {
    // SAFETY: Both pointers refer to live `A`s.
    unsafe { (*lhs.cast::<A>()).cmp(&*rhs.cast::<A>()) }
}

/// Feeds the live alternative to a hasher.
#[derive(Debug, Clone, Copy)]
pub struct Hashing;

impl Operation for Hashing {
    type Handler = unsafe fn(*const u8, &mut dyn Hasher);
}

// SAFETY: The handler treats its value pointers as `A` only.
unsafe impl<A: Hash> Handles<A> for Hashing {
    const HANDLER: unsafe fn(*const u8, &mut dyn Hasher) = hash::<A>;
}

unsafe fn hash<A: Hash>(value: *const u8, mut state: &mut dyn Hasher) {
    // SAFETY: The pointer refers to a live `A`.
    unsafe { (*value.cast::<A>()).hash(&mut state) }
}

/// Formats the live alternative with `Debug`.
#[derive(Debug, Clone, Copy)]
pub struct Debugging;

impl Operation for Debugging {
    type Handler = unsafe fn(*const u8, &mut fmt::Formatter<'_>) -> fmt::Result;
}

// SAFETY: The handler treats its value pointers as `A` only.
unsafe impl<A: fmt::Debug> Handles<A> for Debugging {
    const HANDLER: unsafe fn(*const u8, &mut fmt::Formatter<'_>) -> fmt::Result = debug::<A>;
}

unsafe fn debug<A: fmt::Debug>(value: *const u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // SAFETY: The pointer refers to a live `A`.
    unsafe { fmt::Debug::fmt(&*value.cast::<A>(), f) }
}

/// Formats the live alternative with `Display`.
#[derive(Debug, Clone, Copy)]
pub struct Displaying;

impl Operation for Displaying {
    type Handler = unsafe fn(*const u8, &mut fmt::Formatter<'_>) -> fmt::Result;
}

// SAFETY: The handler treats its value pointers as `A` only.
unsafe impl<A: fmt::Display> Handles<A> for Displaying {
    const HANDLER: unsafe fn(*const u8, &mut fmt::Formatter<'_>) -> fmt::Result = display::<A>;
}

unsafe fn display<A: fmt::Display>(value: *const u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // SAFETY: The pointer refers to a live `A`.
    unsafe { fmt::Display::fmt(&*value.cast::<A>(), f) }
}
