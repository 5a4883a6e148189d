//! Per-alternative handler tables.
//!
//! An [`Operation`] names something that can be done to a value without
//! knowing its type, such as dropping it. [`Handles<A>`] provides the
//! function that performs the operation on an `A`. For a set of alternatives
//! `(A, B, C)`, [`Dispatch`] looks those functions up in declaration order,
//! so a tag picks the typed handler by indexing.
//!
//! Handlers take erased pointers. Each slot pairs a handler with the type
//! its function was instantiated with, so a pointer to the storage of the
//! alternative at position `n` may be passed to the handler at `n` and
//! nowhere else.
//!
//! Both traits are `unsafe`: a safe impl could hand out a handler built for
//! another type.
//!
//! ```compile_fail
//! use variant_core::dispatch::{Destroy, Handles};
//!
//! struct Fake;
//!
//! impl Handles<Fake> for Destroy {
//!     const HANDLER: unsafe fn(*mut u8) = <Destroy as Handles<u8>>::HANDLER;
//! }
//! ```

use core::ptr;

/// An operation that can be dispatched over the alternatives of a union.
pub trait Operation {
    /// The function pointer (or table of function pointers) stored for
    /// each alternative. Handlers are type-erased, which keeps this `'static`
    /// even when the alternatives borrow.
    type Handler: Copy + 'static;
}

/// Provides the handler performing `Self` on an `A`.
///
/// # Safety
///
/// `HANDLER` must only ever treat the erased value pointers it receives as
/// pointing to an `A`.
pub unsafe trait Handles<A>: Operation {
    /// The handler, instantiated for `A`.
    const HANDLER: Self::Handler;
}

/// One handler per alternative, in declaration order.
///
/// Implemented for every tuple of one up to ten types whose alternatives are
/// all handled by `Op`. A missing capability therefore shows up as an unmet
/// trait bound at compile time.
///
/// # Safety
///
/// `lookup(n)` must return the handler built for the alternative at
/// position `n`, and `None` exactly when `n >= HANDLERS`.
pub unsafe trait Dispatch<Op: Operation> {
    /// Number of handlers, one per alternative.
    const HANDLERS: usize;

    /// The handler for the alternative at `tag`, if there is one.
    fn lookup(tag: usize) -> Option<Op::Handler>;
}

/// Looks up the handler for the alternative at `tag`.
///
/// # Panics
///
/// Panics if `tag` is not smaller than the number of alternatives. A tag
/// outside that range can only come from a bug or memory corruption, never
/// from caller input.
#[inline]
#[track_caller]
pub fn handler<U, Op>(tag: usize) -> Op::Handler
where
    U: Dispatch<Op> + ?Sized,
    Op: Operation,
{
    match U::lookup(tag) {
        Some(handler) => handler,
        None => invalid_tag(tag, U::HANDLERS),
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn invalid_tag(tag: usize, len: usize) -> ! {
    panic!("variant tag {tag} out of range for {len} alternatives")
}

/// Drops the live alternative in place.
#[derive(Debug, Clone, Copy)]
pub struct Destroy;

impl Operation for Destroy {
    type Handler = unsafe fn(*mut u8);
}

// SAFETY: `destroy::<A>` drops its argument as an `A`.
unsafe impl<A> Handles<A> for Destroy {
    const HANDLER: unsafe fn(*mut u8) = destroy::<A>;
}

/// # Safety
///
/// `value` must point to a live `A` that is not used again.
unsafe fn destroy<A>(value: *mut u8) {
    // SAFETY: Guaranteed by the caller.
    unsafe { ptr::drop_in_place(value.cast::<A>()) }
}
