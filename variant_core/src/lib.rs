//! Type-level machinery behind `unionvariant`.
//!
//! A tuple of types such as `(u32, String)` describes a closed set of
//! alternatives. This crate sizes a buffer able to hold any of them
//! ([`union`]), names each position with a zero-sized marker ([`index`]),
//! and builds one table of type-erased function pointers per operation, so a
//! runtime tag selects the right typed handler in O(1) ([`dispatch`]).

#![no_std]
#![warn(missing_docs)]

pub mod dispatch;
pub mod index;
pub mod select;
pub mod union;
