//! A tagged union over a closed, ordered set of types.
//!
//! [`Variant<(A, B, ..)>`](Variant) holds exactly one value of one of its
//! alternatives and remembers which one. The set is written as a tuple of one
//! up to ten types. Every operation that needs the concrete type (dropping,
//! cloning, comparing, hashing, formatting, visiting) looks up a typed
//! handler in a per-operation table, indexed by the tag.
//!
//! ```
//! use unionvariant::{Variant, Visit, Visitor};
//!
//! let mut v = Variant::<(i32, String)>::new(5i32);
//! assert_eq!(v.get::<i32, _>(), Ok(&5));
//!
//! v.set(String::from("hello"));
//! assert_eq!(v.index(), 1);
//! assert_eq!(format!("{v:?}"), "Variant(1, \"hello\")");
//!
//! struct Len;
//!
//! impl Visitor for Len {
//!     type Output = usize;
//! }
//!
//! impl Visit<i32> for Len {
//!     fn visit(&mut self, _: &i32) -> usize {
//!         4
//!     }
//! }
//!
//! impl Visit<String> for Len {
//!     fn visit(&mut self, s: &String) -> usize {
//!         s.len()
//!     }
//! }
//!
//! assert_eq!(v.visit(&mut Len), 5);
//! ```
//!
//! # Features
//!
//! - `std` (default): implements `std::error::Error` for [`BadAccess`] through
//!   `thiserror`. Without it the crate is `no_std` and needs only `alloc`.
//! - `tracing`: emits `trace!` events when a variant switches alternatives
//!   and on failed typed access.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod error;
pub mod locate;
mod macros;
pub mod ops;
pub mod recursive;
pub mod variant;
pub mod visit;

pub use error::BadAccess;
pub use recursive::Recursive;
pub use variant::Variant;
pub use visit::{
    UnwrapRecursive, Visit, VisitMut, VisitOwned, VisitPair, VisitTriple, Visitor, visit2, visit3,
};

pub use variant_core::dispatch::{Dispatch, Handles, Operation};
pub use variant_core::index::{I0, I1, I2, I3, I4, I5, I6, I7, I8, I9};
pub use variant_core::select::{Select, Selector, TypeUnion};

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use alloc::string::String;
    use core::cell::Cell;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(Variant<(u8, String)>: Send, Sync, Clone, Ord, core::hash::Hash, core::fmt::Debug);
    assert_not_impl_any!(Variant<(u8, Rc<u8>)>: Send, Sync);
    assert_not_impl_any!(Variant<(u8, Cell<u8>)>: Sync);
    assert_not_impl_any!(Variant<(f64, u8)>: Eq, Ord, core::hash::Hash);
    assert_not_impl_any!(Variant<(u8, core::cell::RefCell<u8>)>: core::fmt::Display);
    assert_not_impl_any!(Variant<(u8, String)>: Copy);
}
