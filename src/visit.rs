//! Visitation: calling a per-alternative handler with the live value.
//!
//! A visitor is a type implementing [`Visit<T>`] (or [`VisitMut<T>`],
//! [`VisitOwned<T>`]) for every alternative `T`. All of those impls share a
//! single [`Visitor::Output`], so every branch yields the same result type.
//! A visitor missing one alternative, or branches disagreeing on the result
//! type, fail to compile.
//!
//! ```
//! use unionvariant::{Variant, Visit, Visitor};
//!
//! struct Describe;
//!
//! impl Visitor for Describe {
//!     type Output = &'static str;
//! }
//!
//! impl Visit<i32> for Describe {
//!     fn visit(&mut self, _: &i32) -> &'static str {
//!         "number"
//!     }
//! }
//!
//! impl Visit<String> for Describe {
//!     fn visit(&mut self, _: &String) -> &'static str {
//!         "text"
//!     }
//! }
//!
//! let v = Variant::<(i32, String)>::new(String::from("hi"));
//! assert_eq!(v.visit(&mut Describe), "text");
//! ```
//!
//! [`visit2`] and [`visit3`] dispatch jointly on several variants: the
//! visitor implements [`VisitPair<A, B>`] for every combination of
//! alternatives, and runs the handler matching the pair of live ones.
//!
//! A visitor that implements [`UnwrapRecursive`] is written against the
//! wrapped type: an alternative declared as [`Recursive<T>`] reaches its
//! `Visit<T>` (`VisitMut<T>`, `VisitOwned<T>`) impl. Other visitors, and
//! joint visitors, see the alternative as stored, where `&Recursive<T>`
//! dereferences to `&T`.
//!
//! Dispatch is one table lookup per variant. The handler for the outer
//! variant resolves its own alternative and then looks up the next variant's
//! handler, so a joint visit over `n` variants does `n` lookups instead of
//! building a table with one entry per combination.

use core::marker::PhantomData;
use core::mem::{ManuallyDrop, MaybeUninit};

use variant_core::dispatch::{Dispatch, Handles, Operation, handler};
use variant_core::select::TypeUnion;

use crate::recursive::Recursive;
use crate::variant::Variant;

/// Fixes the result type shared by all branches of a visitor.
pub trait Visitor {
    /// What every branch returns.
    type Output;
}

/// Visits a shared reference to an alternative.
pub trait Visit<T>: Visitor {
    /// Handles a live `T`.
    fn visit(&mut self, value: &T) -> Self::Output;
}

/// Visits a mutable reference to an alternative.
pub trait VisitMut<T>: Visitor {
    /// Handles a live `T`, possibly changing it.
    fn visit_mut(&mut self, value: &mut T) -> Self::Output;
}

/// Visits an alternative by value.
pub trait VisitOwned<T>: Visitor {
    /// Takes ownership of the live `T`.
    fn visit_owned(&mut self, value: T) -> Self::Output;
}

/// Visits the live alternatives of two variants at once.
pub trait VisitPair<A, B>: Visitor {
    /// Handles a live `A` in the first variant and a live `B` in the second.
    fn visit_pair(&mut self, first: &A, second: &B) -> Self::Output;
}

/// Visits the live alternatives of three variants at once.
pub trait VisitTriple<A, B, C>: Visitor {
    /// Handles live `A`, `B` and `C` in the first, second and third variant.
    fn visit_triple(&mut self, first: &A, second: &B, third: &C) -> Self::Output;
}

/// Opts a visitor into looking through [`Recursive`].
///
/// ```
/// use unionvariant::{Recursive, UnwrapRecursive, Variant, Visit, Visitor};
///
/// struct Length;
///
/// impl Visitor for Length {
///     type Output = usize;
/// }
///
/// impl UnwrapRecursive for Length {}
///
/// impl Visit<u8> for Length {
///     fn visit(&mut self, _: &u8) -> usize {
///         1
///     }
/// }
///
/// impl Visit<String> for Length {
///     fn visit(&mut self, s: &String) -> usize {
///         s.len()
///     }
/// }
///
/// let v = Variant::<(u8, Recursive<String>)>::new(String::from("boxed"));
/// assert_eq!(v.visit(&mut Length), 5);
/// ```
pub trait UnwrapRecursive: Visitor {}

impl<V, T> Visit<Recursive<T>> for V
where
    V: UnwrapRecursive + Visit<T>,
{
    #[inline]
    fn visit(&mut self, value: &Recursive<T>) -> Self::Output {
        <V as Visit<T>>::visit(self, value)
    }
}

impl<V, T> VisitMut<Recursive<T>> for V
where
    V: UnwrapRecursive + VisitMut<T>,
{
    #[inline]
    fn visit_mut(&mut self, value: &mut Recursive<T>) -> Self::Output {
        <V as VisitMut<T>>::visit_mut(self, value)
    }
}

impl<V, T> VisitOwned<Recursive<T>> for V
where
    V: UnwrapRecursive + VisitOwned<T>,
{
    #[inline]
    fn visit_owned(&mut self, value: Recursive<T>) -> Self::Output {
        <V as VisitOwned<T>>::visit_owned(self, value.into_inner())
    }
}

/// Handler shape for every visit operation: the value, a context pointer and
/// the slot the result is written to.
pub type VisitHandler = unsafe fn(*const u8, *mut (), *mut ());

/// Like [`VisitHandler`], for handlers that mutate the value.
pub type VisitMutHandler = unsafe fn(*mut u8, *mut (), *mut ());

/// Dispatches [`Visit`] for the visitor `V`.
pub struct ByRef<V>(PhantomData<fn(V)>);

/// Dispatches [`VisitMut`] for the visitor `V`.
pub struct ByMut<V>(PhantomData<fn(V)>);

/// Dispatches [`VisitOwned`] for the visitor `V`.
pub struct ByValue<V>(PhantomData<fn(V)>);

/// Resolves the first alternative of a [`visit2`], then dispatches on `U2`.
pub struct PairOuter<V, U2>(PhantomData<fn(V, U2)>);

/// Resolves the second alternative of a [`visit2`] with `A` already known.
pub struct PairInner<A, V>(PhantomData<fn(A, V)>);

/// Resolves the first alternative of a [`visit3`], then dispatches on `U2`.
pub struct TripleOuter<V, U2, U3>(PhantomData<fn(V, U2, U3)>);

/// Resolves the second alternative of a [`visit3`], then dispatches on `U3`.
pub struct TripleMiddle<A, V, U3>(PhantomData<fn(A, V, U3)>);

/// Resolves the third alternative of a [`visit3`] with `A` and `B` known.
pub struct TripleInner<A, B, V>(PhantomData<fn(A, B, V)>);

impl<V> Operation for ByRef<V> {
    type Handler = VisitHandler;
}

impl<V> Operation for ByMut<V> {
    type Handler = VisitMutHandler;
}

impl<V> Operation for ByValue<V> {
    type Handler = VisitHandler;
}

impl<V, U2> Operation for PairOuter<V, U2> {
    type Handler = VisitHandler;
}

impl<A, V> Operation for PairInner<A, V> {
    type Handler = VisitHandler;
}

impl<V, U2, U3> Operation for TripleOuter<V, U2, U3> {
    type Handler = VisitHandler;
}

impl<A, V, U3> Operation for TripleMiddle<A, V, U3> {
    type Handler = VisitHandler;
}

impl<A, B, V> Operation for TripleInner<A, B, V> {
    type Handler = VisitHandler;
}

// SAFETY (all impls below): each handler treats its value pointer as the
// alternative it is keyed on, and nothing else.

unsafe impl<A, V: Visit<A>> Handles<A> for ByRef<V> {
    const HANDLER: VisitHandler = by_ref::<A, V>;
}

unsafe impl<A, V: VisitMut<A>> Handles<A> for ByMut<V> {
    const HANDLER: VisitMutHandler = by_mut::<A, V>;
}

unsafe impl<A, V: VisitOwned<A>> Handles<A> for ByValue<V> {
    const HANDLER: VisitHandler = by_value::<A, V>;
}

unsafe impl<A, V, U2> Handles<A> for PairOuter<V, U2>
where
    V: Visitor,
    U2: TypeUnion + Dispatch<PairInner<A, V>>,
{
    const HANDLER: VisitHandler = pair_outer::<A, V, U2>;
}

unsafe impl<A, B, V> Handles<B> for PairInner<A, V>
where
    V: VisitPair<A, B>,
{
    const HANDLER: VisitHandler = pair_inner::<A, B, V>;
}

unsafe impl<A, V, U2, U3> Handles<A> for TripleOuter<V, U2, U3>
where
    V: Visitor,
    U2: TypeUnion + Dispatch<TripleMiddle<A, V, U3>>,
    U3: TypeUnion,
{
    const HANDLER: VisitHandler = triple_outer::<A, V, U2, U3>;
}

unsafe impl<A, B, V, U3> Handles<B> for TripleMiddle<A, V, U3>
where
    V: Visitor,
    U3: TypeUnion + Dispatch<TripleInner<A, B, V>>,
{
    const HANDLER: VisitHandler = triple_middle::<A, B, V, U3>;
}

unsafe impl<A, B, C, V> Handles<C> for TripleInner<A, B, V>
where
    V: VisitTriple<A, B, C>,
{
    const HANDLER: VisitHandler = triple_inner::<A, B, C, V>;
}

// Every handler below writes exactly one `V::Output` to `out`. Callers pass
// a pointer to an uninitialized slot of that type and read it afterwards.

unsafe fn by_ref<A, V: Visit<A>>(value: *const u8, visitor: *mut (), out: *mut ()) {
    // SAFETY: `visit` passes the live `A` and a `&mut V`.
    unsafe {
        let output = (*visitor.cast::<V>()).visit(&*value.cast::<A>());
        out.cast::<V::Output>().write(output);
    }
}

unsafe fn by_mut<A, V: VisitMut<A>>(value: *mut u8, visitor: *mut (), out: *mut ()) {
    // SAFETY: `visit_mut` passes the live `A` and a `&mut V`.
    unsafe {
        let output = (*visitor.cast::<V>()).visit_mut(&mut *value.cast::<A>());
        out.cast::<V::Output>().write(output);
    }
}

unsafe fn by_value<A, V: VisitOwned<A>>(value: *const u8, visitor: *mut (), out: *mut ()) {
    // SAFETY: `into_visit` passes the live `A` of a variant it will not drop.
    unsafe {
        let value = value.cast::<A>().read();
        let output = (*visitor.cast::<V>()).visit_owned(value);
        out.cast::<V::Output>().write(output);
    }
}

struct PairContext<'a, V, U2: TypeUnion> {
    visitor: &'a mut V,
    second: &'a Variant<U2>,
}

struct PairResolved<'a, A, V> {
    visitor: &'a mut V,
    first: &'a A,
}

unsafe fn pair_outer<A, V, U2>(first: *const u8, context: *mut (), out: *mut ())
where
    V: Visitor,
    U2: TypeUnion + Dispatch<PairInner<A, V>>,
{
    // SAFETY: `visit2` passes the live `A` and a `PairContext<V, U2>`.
    unsafe {
        let context = &mut *context.cast::<PairContext<'_, V, U2>>();
        let second = context.second;
        let mut resolved = PairResolved {
            visitor: &mut *context.visitor,
            first: &*first.cast::<A>(),
        };
        let inner = handler::<U2, PairInner<A, V>>(second.index());
        inner(second.storage_ptr(), erase(&mut resolved), out);
    }
}

unsafe fn pair_inner<A, B, V>(second: *const u8, resolved: *mut (), out: *mut ())
where
    V: VisitPair<A, B>,
{
    // SAFETY: `pair_outer` passes the live `B` and a `PairResolved<A, V>`.
    unsafe {
        let resolved = &mut *resolved.cast::<PairResolved<'_, A, V>>();
        let output = resolved.visitor.visit_pair(resolved.first, &*second.cast::<B>());
        out.cast::<V::Output>().write(output);
    }
}

struct TripleContext<'a, V, U2: TypeUnion, U3: TypeUnion> {
    visitor: &'a mut V,
    second: &'a Variant<U2>,
    third: &'a Variant<U3>,
}

struct TripleHalfResolved<'a, A, V, U3: TypeUnion> {
    visitor: &'a mut V,
    first: &'a A,
    third: &'a Variant<U3>,
}

struct TripleResolved<'a, A, B, V> {
    visitor: &'a mut V,
    first: &'a A,
    second: &'a B,
}

unsafe fn triple_outer<A, V, U2, U3>(first: *const u8, context: *mut (), out: *mut ())
where
    V: Visitor,
    U2: TypeUnion + Dispatch<TripleMiddle<A, V, U3>>,
    U3: TypeUnion,
{
    // SAFETY: `visit3` passes the live `A` and a `TripleContext<V, U2, U3>`.
    unsafe {
        let context = &mut *context.cast::<TripleContext<'_, V, U2, U3>>();
        let second = context.second;
        let mut half = TripleHalfResolved {
            visitor: &mut *context.visitor,
            first: &*first.cast::<A>(),
            third: context.third,
        };
        let middle = handler::<U2, TripleMiddle<A, V, U3>>(second.index());
        middle(second.storage_ptr(), erase(&mut half), out);
    }
}

unsafe fn triple_middle<A, B, V, U3>(second: *const u8, half: *mut (), out: *mut ())
where
    V: Visitor,
    U3: TypeUnion + Dispatch<TripleInner<A, B, V>>,
{
    // SAFETY: `triple_outer` passes the live `B` and a
    // `TripleHalfResolved<A, V, U3>`.
    unsafe {
        let half = &mut *half.cast::<TripleHalfResolved<'_, A, V, U3>>();
        let third = half.third;
        let mut resolved = TripleResolved {
            visitor: &mut *half.visitor,
            first: half.first,
            second: &*second.cast::<B>(),
        };
        let inner = handler::<U3, TripleInner<A, B, V>>(third.index());
        inner(third.storage_ptr(), erase(&mut resolved), out);
    }
}

unsafe fn triple_inner<A, B, C, V>(third: *const u8, resolved: *mut (), out: *mut ())
where
    V: VisitTriple<A, B, C>,
{
    // SAFETY: `triple_middle` passes the live `C` and a
    // `TripleResolved<A, B, V>`.
    unsafe {
        let resolved = &mut *resolved.cast::<TripleResolved<'_, A, B, V>>();
        let output =
            resolved
                .visitor
                .visit_triple(resolved.first, resolved.second, &*third.cast::<C>());
        out.cast::<V::Output>().write(output);
    }
}

#[inline]
fn erase<T>(context: &mut T) -> *mut () {
    (context as *mut T).cast()
}

/// Runs the handler of `Op` for the alternative at `tag` and returns what it
/// wrote.
///
/// # Safety
///
/// `value` must point to the live alternative at `tag`, and `context` must be
/// what the handlers of `Op` expect.
#[inline]
unsafe fn run<U, Op, R>(tag: usize, value: *const u8, context: *mut ()) -> R
where
    U: Dispatch<Op>,
    Op: Operation<Handler = VisitHandler>,
{
    let mut output = MaybeUninit::<R>::uninit();
    let visit = handler::<U, Op>(tag);
    // SAFETY: Guaranteed by the caller; every handler initializes `output`.
    unsafe {
        visit(value, context, output.as_mut_ptr().cast());
        output.assume_init()
    }
}

impl<U: TypeUnion> Variant<U> {
    /// Calls the visitor's handler for the live alternative.
    #[inline]
    pub fn visit<V>(&self, visitor: &mut V) -> V::Output
    where
        V: Visitor,
        U: Dispatch<ByRef<V>>,
    {
        // SAFETY: The handlers of `ByRef<V>` take a `&mut V` as context.
        unsafe { run::<U, ByRef<V>, V::Output>(self.index(), self.storage_ptr(), erase(visitor)) }
    }

    /// Calls the visitor's handler with a mutable reference to the live
    /// alternative.
    #[inline]
    pub fn visit_mut<V>(&mut self, visitor: &mut V) -> V::Output
    where
        V: Visitor,
        U: Dispatch<ByMut<V>>,
    {
        let mut output = MaybeUninit::<V::Output>::uninit();
        let visit = handler::<U, ByMut<V>>(self.index());
        // SAFETY: The handler belongs to the live alternative and takes a
        // `&mut V` as context. It initializes `output`.
        unsafe {
            visit(self.storage_mut_ptr(), erase(visitor), output.as_mut_ptr().cast());
            output.assume_init()
        }
    }

    /// Consumes the variant and hands the live alternative to the visitor by
    /// value.
    ///
    /// ```
    /// use unionvariant::{Variant, VisitOwned, Visitor};
    ///
    /// struct Collect(Vec<String>);
    ///
    /// impl Visitor for Collect {
    ///     type Output = ();
    /// }
    ///
    /// impl VisitOwned<String> for Collect {
    ///     fn visit_owned(&mut self, value: String) {
    ///         self.0.push(value);
    ///     }
    /// }
    ///
    /// impl VisitOwned<u8> for Collect {
    ///     fn visit_owned(&mut self, value: u8) {
    ///         self.0.push(value.to_string());
    ///     }
    /// }
    ///
    /// let mut collect = Collect(Vec::new());
    /// Variant::<(u8, String)>::new(String::from("a")).into_visit(&mut collect);
    /// Variant::<(u8, String)>::new(2u8).into_visit(&mut collect);
    /// assert_eq!(collect.0, ["a", "2"]);
    /// ```
    pub fn into_visit<V>(self, visitor: &mut V) -> V::Output
    where
        V: Visitor,
        U: Dispatch<ByValue<V>>,
    {
        let this = ManuallyDrop::new(self);
        // SAFETY: The handler moves the live alternative out; `this` is
        // never dropped, so the value is released exactly once.
        unsafe { run::<U, ByValue<V>, V::Output>(this.index(), this.storage_ptr(), erase(visitor)) }
    }
}

/// Calls the visitor's handler for the pair of live alternatives of `first`
/// and `second`.
///
/// ```
/// use unionvariant::{Variant, VisitPair, Visitor, visit2};
///
/// struct SameKind;
///
/// impl Visitor for SameKind {
///     type Output = bool;
/// }
///
/// impl<A, B> VisitPair<A, B> for SameKind {
///     fn visit_pair(&mut self, _: &A, _: &B) -> bool {
///         core::any::type_name::<A>() == core::any::type_name::<B>()
///     }
/// }
///
/// let a = Variant::<(i32, char)>::new('x');
/// let b = Variant::<(char, bool)>::new('y');
/// assert!(visit2(&a, &b, &mut SameKind));
/// ```
pub fn visit2<U1, U2, V>(first: &Variant<U1>, second: &Variant<U2>, visitor: &mut V) -> V::Output
where
    V: Visitor,
    U1: TypeUnion + Dispatch<PairOuter<V, U2>>,
    U2: TypeUnion,
{
    let mut context = PairContext { visitor, second };
    // SAFETY: The handlers of `PairOuter<V, U2>` take a `PairContext<V, U2>`.
    unsafe {
        run::<U1, PairOuter<V, U2>, V::Output>(
            first.index(),
            first.storage_ptr(),
            erase(&mut context),
        )
    }
}

/// Calls the visitor's handler for the triple of live alternatives of
/// `first`, `second` and `third`.
pub fn visit3<U1, U2, U3, V>(
    first: &Variant<U1>,
    second: &Variant<U2>,
    third: &Variant<U3>,
    visitor: &mut V,
) -> V::Output
where
    V: Visitor,
    U1: TypeUnion + Dispatch<TripleOuter<V, U2, U3>>,
    U2: TypeUnion,
    U3: TypeUnion,
{
    let mut context = TripleContext {
        visitor,
        second,
        third,
    };
    // SAFETY: The handlers of `TripleOuter<V, U2, U3>` take a
    // `TripleContext<V, U2, U3>`.
    unsafe {
        run::<U1, TripleOuter<V, U2, U3>, V::Output>(
            first.index(),
            first.storage_ptr(),
            erase(&mut context),
        )
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use super::*;

    type Value = Variant<(i32, String)>;

    struct Render;

    impl Visitor for Render {
        type Output = String;
    }

    impl Visit<i32> for Render {
        fn visit(&mut self, value: &i32) -> String {
            format!("int {value}")
        }
    }

    impl Visit<String> for Render {
        fn visit(&mut self, value: &String) -> String {
            format!("text {value}")
        }
    }

    #[test]
    fn test_visit_runs_live_branch() {
        assert_eq!(Value::new(3i32).visit(&mut Render), "int 3");
        assert_eq!(Value::new(String::from("x")).visit(&mut Render), "text x");
    }

    /// Records what it saw, to check the visitor itself is borrowed mutably.
    struct Count<'a> {
        seen: &'a mut Vec<usize>,
    }

    impl Visitor for Count<'_> {
        type Output = ();
    }

    impl Visit<i32> for Count<'_> {
        fn visit(&mut self, value: &i32) {
            self.seen.push(*value as usize);
        }
    }

    impl Visit<String> for Count<'_> {
        fn visit(&mut self, value: &String) {
            self.seen.push(value.len());
        }
    }

    #[test]
    fn test_visitor_state_persists() {
        let mut seen = Vec::new();
        let mut count = Count { seen: &mut seen };
        Value::new(4i32).visit(&mut count);
        Value::new(String::from("abc")).visit(&mut count);
        assert_eq!(seen, [4, 3]);
    }

    struct Bump;

    impl Visitor for Bump {
        type Output = usize;
    }

    impl VisitMut<i32> for Bump {
        fn visit_mut(&mut self, value: &mut i32) -> usize {
            *value += 1;
            0
        }
    }

    impl VisitMut<String> for Bump {
        fn visit_mut(&mut self, value: &mut String) -> usize {
            value.push('!');
            1
        }
    }

    #[test]
    fn test_visit_mut_changes_live_value() {
        let mut v = Value::new(String::from("hey"));
        assert_eq!(v.visit_mut(&mut Bump), 1);
        assert_eq!(v.get::<String, _>().map(String::as_str), Ok("hey!"));

        let mut v = Value::new(1i32);
        assert_eq!(v.visit_mut(&mut Bump), 0);
        assert_eq!(v.get::<i32, _>(), Ok(&2));
    }

    struct Take;

    impl Visitor for Take {
        type Output = String;
    }

    impl VisitOwned<i32> for Take {
        fn visit_owned(&mut self, value: i32) -> String {
            value.to_string()
        }
    }

    impl VisitOwned<String> for Take {
        fn visit_owned(&mut self, value: String) -> String {
            value
        }
    }

    /// Written against `String`, also used for a boxed `String`.
    struct Shout;

    impl Visitor for Shout {
        type Output = String;
    }

    impl UnwrapRecursive for Shout {}

    impl Visit<u8> for Shout {
        fn visit(&mut self, value: &u8) -> String {
            value.to_string()
        }
    }

    impl Visit<String> for Shout {
        fn visit(&mut self, value: &String) -> String {
            value.to_uppercase()
        }
    }

    impl VisitMut<u8> for Shout {
        fn visit_mut(&mut self, value: &mut u8) -> String {
            *value += 1;
            value.to_string()
        }
    }

    impl VisitMut<String> for Shout {
        fn visit_mut(&mut self, value: &mut String) -> String {
            value.make_ascii_uppercase();
            value.clone()
        }
    }

    impl VisitOwned<u8> for Shout {
        fn visit_owned(&mut self, value: u8) -> String {
            value.to_string()
        }
    }

    impl VisitOwned<String> for Shout {
        fn visit_owned(&mut self, value: String) -> String {
            value
        }
    }

    type Boxed = Variant<(u8, Recursive<String>)>;

    #[test]
    fn test_unwrapping_visitor_sees_wrapped_type() {
        let mut v = Boxed::new(String::from("quiet"));
        assert_eq!(v.visit(&mut Shout), "QUIET");

        assert_eq!(v.visit_mut(&mut Shout), "QUIET");
        assert_eq!(v.get::<String, _>().map(String::as_str), Ok("QUIET"));

        assert_eq!(v.into_visit(&mut Shout), "QUIET");
        assert_eq!(Boxed::new(4u8).visit(&mut Shout), "4");
    }

    #[test]
    fn test_into_visit_moves_value() {
        assert_eq!(Value::new(String::from("moved")).into_visit(&mut Take), "moved");
        assert_eq!(Value::new(8i32).into_visit(&mut Take), "8");
    }

    struct Describe;

    impl Visitor for Describe {
        type Output = String;
    }

    impl<A: core::fmt::Debug, B: core::fmt::Debug> VisitPair<A, B> for Describe {
        fn visit_pair(&mut self, first: &A, second: &B) -> String {
            format!("{first:?}/{second:?}")
        }
    }

    impl<A, B, C> VisitTriple<A, B, C> for Describe
    where
        A: core::fmt::Debug,
        B: core::fmt::Debug,
        C: core::fmt::Debug,
    {
        fn visit_triple(&mut self, first: &A, second: &B, third: &C) -> String {
            format!("{first:?}/{second:?}/{third:?}")
        }
    }

    #[test]
    fn test_visit2_every_combination() {
        let ints = Value::new(1i32);
        let text = Value::new(String::from("s"));
        let other = Variant::<(bool, char)>::new('c');

        assert_eq!(visit2(&ints, &other, &mut Describe), "1/'c'");
        assert_eq!(visit2(&text, &other, &mut Describe), "\"s\"/'c'");
        assert_eq!(visit2(&other, &ints, &mut Describe), "'c'/1");
        assert_eq!(visit2(&text, &text, &mut Describe), "\"s\"/\"s\"");
    }

    #[test]
    fn test_visit3() {
        let a = Value::new(1i32);
        let b = Variant::<(bool, char)>::new(true);
        let c = Variant::<(u8,)>::new(9u8);
        assert_eq!(visit3(&a, &b, &c, &mut Describe), "1/true/9");
    }

    /// Result type depends on the visited pair only through the visitor.
    struct Add;

    impl Visitor for Add {
        type Output = i64;
    }

    impl VisitPair<i32, i32> for Add {
        fn visit_pair(&mut self, a: &i32, b: &i32) -> i64 {
            i64::from(*a) + i64::from(*b)
        }
    }

    impl VisitPair<i32, String> for Add {
        fn visit_pair(&mut self, a: &i32, b: &String) -> i64 {
            i64::from(*a) + b.len() as i64
        }
    }

    impl VisitPair<String, i32> for Add {
        fn visit_pair(&mut self, a: &String, b: &i32) -> i64 {
            a.len() as i64 + i64::from(*b)
        }
    }

    impl VisitPair<String, String> for Add {
        fn visit_pair(&mut self, a: &String, b: &String) -> i64 {
            (a.len() + b.len()) as i64
        }
    }

    #[test]
    fn test_visit2_with_concrete_impls() {
        let x = Value::new(5i32);
        let y = Value::new(String::from("four"));
        assert_eq!(visit2(&x, &y, &mut Add), 9);
        assert_eq!(visit2(&y, &y, &mut Add), 8);
        assert_eq!(visit2(&x, &x, &mut Add), 10);
    }
}
