use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::{self, ManuallyDrop};

use variant_core::dispatch::{Destroy, Dispatch, handler};
use variant_core::index::I0;
use variant_core::select::{RawStorage, Select, Selector, TypeUnion};

use crate::error::BadAccess;
use crate::locate::Locate;
use crate::macros::trace;
use crate::ops::{
    Cloning, Debugging, Displaying, Equal, Equivalence, Hashing, MoveAssign, PartialCompare,
    TotalCompare,
};

/// A tagged union over the alternatives of `U`.
///
/// `U` is a tuple of one up to ten types, for example `Variant<(i32, String)>`.
/// Exactly one alternative is live at any time; [`index`](Variant::index)
/// reports which one. The storage is sized and aligned for the largest
/// alternative, and every operation that needs the concrete type goes
/// through a per-alternative handler table indexed by the tag.
///
/// Alternatives can be addressed by type (`get::<String, _>()`, which only
/// compiles when `String` occurs exactly once) or by position
/// (`get_at::<I1>()`, which also works with duplicated types).
///
/// ```
/// use unionvariant::{I1, Variant};
///
/// let mut v = Variant::<(i32, String)>::new(5i32);
/// assert_eq!(v.index(), 0);
/// assert_eq!(v.get::<i32, _>(), Ok(&5));
///
/// v.set(String::from("hello"));
/// assert_eq!(v.index(), 1);
/// assert_eq!(v.get_at::<I1>().map(String::as_str), Ok("hello"));
/// assert!(v.get::<i32, _>().is_err());
/// ```
///
/// Capabilities follow the alternatives: a variant is `Clone`, `PartialEq`,
/// `Ord`, `Hash`, `Debug`, ... exactly when all of its alternatives are.
pub struct Variant<U: TypeUnion> {
    tag: usize,
    storage: RawStorage<U>,
}

impl<U: TypeUnion> Variant<U> {
    /// # Safety
    ///
    /// `S` must be the alternative of `U` at position `tag`.
    #[inline]
    unsafe fn from_parts<S>(tag: usize, value: S) -> Self {
        debug_assert!(tag < U::LEN);
        Self {
            tag,
            // SAFETY: Guaranteed by the caller.
            storage: unsafe { RawStorage::from_value(value) },
        }
    }

    /// Creates a variant holding `value`, picking the alternative by type.
    ///
    /// `T` must occur exactly once among the alternatives, either directly
    /// or wrapped in [`Recursive`](crate::Recursive), in which case `value`
    /// is boxed.
    #[inline]
    pub fn new<T, I>(value: T) -> Self
    where
        U: Locate<T, I>,
    {
        let index = <U as Locate<T, I>>::INDEX;
        // SAFETY: `Stored` is the alternative at `INDEX`.
        unsafe { Self::from_parts(index, <U as Locate<T, I>>::wrap(value)) }
    }

    /// Creates a variant holding `value` as the alternative at position `I`.
    ///
    /// ```
    /// use unionvariant::{I1, Variant};
    ///
    /// let v = Variant::<(u8, u8)>::new_at::<I1>(3);
    /// assert_eq!(v.index(), 1);
    /// ```
    #[inline]
    pub fn new_at<I>(value: <U as Select<I>>::Output) -> Self
    where
        I: Selector,
        U: Select<I>,
    {
        // SAFETY: `Select<I>::Output` is the alternative at `I::INDEX`.
        unsafe { Self::from_parts(I::INDEX, value) }
    }

    /// Position of the live alternative, in `0..U::LEN`.
    #[inline]
    pub const fn index(&self) -> usize {
        self.tag
    }

    /// Number of alternatives a variant of this type chooses from.
    #[inline]
    pub const fn alternatives() -> usize {
        U::LEN
    }

    #[inline]
    pub(crate) fn storage_ptr(&self) -> *const u8 {
        self.storage.as_ptr()
    }

    #[inline]
    pub(crate) fn storage_mut_ptr(&mut self) -> *mut u8 {
        self.storage.as_mut_ptr()
    }

    #[cold]
    fn bad_access(&self, requested: usize) -> BadAccess {
        trace!(requested, active = self.tag, "bad variant access");
        BadAccess::new(requested, self.tag)
    }

    /// Returns `true` if the live alternative is the one holding `T`.
    #[inline]
    pub fn is<T, I>(&self) -> bool
    where
        U: Locate<T, I>,
    {
        self.tag == <U as Locate<T, I>>::INDEX
    }

    /// Returns `true` if the live alternative is the one at position `I`.
    #[inline]
    pub fn is_at<I>(&self) -> bool
    where
        I: Selector,
        U: Select<I>,
    {
        self.tag == I::INDEX
    }

    /// Borrows the `T` if it is live, `None` otherwise.
    #[inline]
    pub fn get_if<T, I>(&self) -> Option<&T>
    where
        U: Locate<T, I>,
    {
        if !self.is::<T, I>() {
            return None;
        }
        // SAFETY: The tag says `Stored` is live.
        Some(unsafe { <U as Locate<T, I>>::project(self.storage.as_ptr()) })
    }

    /// Mutably borrows the `T` if it is live, `None` otherwise.
    #[inline]
    pub fn get_if_mut<T, I>(&mut self) -> Option<&mut T>
    where
        U: Locate<T, I>,
    {
        if !self.is::<T, I>() {
            return None;
        }
        // SAFETY: The tag says `Stored` is live.
        Some(unsafe { <U as Locate<T, I>>::project_mut(self.storage.as_mut_ptr()) })
    }

    /// Borrows the `T`, or fails with [`BadAccess`] if another alternative
    /// is live.
    #[inline]
    pub fn get<T, I>(&self) -> Result<&T, BadAccess>
    where
        U: Locate<T, I>,
    {
        match self.get_if::<T, I>() {
            Some(value) => Ok(value),
            None => Err(self.bad_access(<U as Locate<T, I>>::INDEX)),
        }
    }

    /// Mutably borrows the `T`, or fails with [`BadAccess`] if another
    /// alternative is live.
    #[inline]
    pub fn get_mut<T, I>(&mut self) -> Result<&mut T, BadAccess>
    where
        U: Locate<T, I>,
    {
        if !self.is::<T, I>() {
            return Err(self.bad_access(<U as Locate<T, I>>::INDEX));
        }
        // SAFETY: The tag says `Stored` is live.
        Ok(unsafe { <U as Locate<T, I>>::project_mut(self.storage.as_mut_ptr()) })
    }

    /// Borrows the alternative at position `I` if it is live.
    #[inline]
    pub fn get_if_at<I>(&self) -> Option<&<U as Select<I>>::Output>
    where
        I: Selector,
        U: Select<I>,
    {
        if !self.is_at::<I>() {
            return None;
        }
        // SAFETY: The tag says the alternative at `I` is live.
        Some(unsafe { self.storage.assume_ref() })
    }

    /// Mutably borrows the alternative at position `I` if it is live.
    #[inline]
    pub fn get_if_at_mut<I>(&mut self) -> Option<&mut <U as Select<I>>::Output>
    where
        I: Selector,
        U: Select<I>,
    {
        if !self.is_at::<I>() {
            return None;
        }
        // SAFETY: The tag says the alternative at `I` is live.
        Some(unsafe { self.storage.assume_mut() })
    }

    /// Borrows the alternative at position `I`, or fails with [`BadAccess`].
    #[inline]
    pub fn get_at<I>(&self) -> Result<&<U as Select<I>>::Output, BadAccess>
    where
        I: Selector,
        U: Select<I>,
    {
        self.get_if_at::<I>().ok_or_else(|| self.bad_access(I::INDEX))
    }

    /// Mutably borrows the alternative at position `I`, or fails with
    /// [`BadAccess`].
    #[inline]
    pub fn get_at_mut<I>(&mut self) -> Result<&mut <U as Select<I>>::Output, BadAccess>
    where
        I: Selector,
        U: Select<I>,
    {
        if !self.is_at::<I>() {
            return Err(self.bad_access(I::INDEX));
        }
        // SAFETY: The tag says the alternative at `I` is live.
        Ok(unsafe { self.storage.assume_mut() })
    }

    /// Moves the `T` out, or hands the variant back if another alternative
    /// is live.
    pub fn into_inner<T, I>(self) -> Result<T, Self>
    where
        U: Locate<T, I>,
    {
        if !self.is::<T, I>() {
            return Err(self);
        }
        let this = ManuallyDrop::new(self);
        // SAFETY: The tag says `Stored` is live, and `this` is never dropped,
        // so the value is moved out exactly once.
        let stored = unsafe { this.storage.read::<<U as Locate<T, I>>::Stored>() };
        Ok(<U as Locate<T, I>>::unwrap(stored))
    }

    /// Moves the alternative at position `I` out, or hands the variant back.
    pub fn into_inner_at<I>(self) -> Result<<U as Select<I>>::Output, Self>
    where
        I: Selector,
        U: Select<I>,
    {
        if !self.is_at::<I>() {
            return Err(self);
        }
        let this = ManuallyDrop::new(self);
        // SAFETY: As in `into_inner`.
        Ok(unsafe { this.storage.read() })
    }

    /// Replaces the whole value, releasing the old one only after `next` is
    /// in place.
    #[inline]
    fn replace_with(&mut self, next: Self) {
        trace!(from = self.tag, to = next.tag, "replacing variant alternative");
        let staged = mem::replace(self, next);
        drop(staged);
    }

    /// Puts `source` in place of `self` and returns the previous value.
    #[inline]
    pub fn replace(&mut self, source: Self) -> Self {
        trace!(from = self.tag, to = source.tag, "replacing variant");
        mem::replace(self, source)
    }

    /// Assigns `value`, picking the alternative by type.
    ///
    /// If that alternative is already live, the value is assigned in place
    /// (into the existing allocation for a [`Recursive`](crate::Recursive)
    /// alternative). Otherwise the variant switches alternatives and the old
    /// value is dropped.
    pub fn set<T, I>(&mut self, value: T)
    where
        U: Locate<T, I>,
    {
        match self.get_if_mut::<T, I>() {
            Some(live) => *live = value,
            None => self.replace_with(Self::new(value)),
        }
    }

    /// Move-assigns `source` into `self`.
    ///
    /// When both hold the same alternative, the alternative is move-assigned
    /// in place. Otherwise the current value is staged out before `source`
    /// moves in, and dropped afterwards.
    pub fn assign(&mut self, source: Self)
    where
        U: Dispatch<MoveAssign>,
    {
        if self.tag == source.tag {
            let source = ManuallyDrop::new(source);
            let move_assign = handler::<U, MoveAssign>(self.tag);
            // SAFETY: Both hold the alternative at `tag`; `source` is never
            // dropped, so its value is moved exactly once.
            unsafe { move_assign(self.storage.as_mut_ptr(), source.storage.as_ptr()) }
        } else {
            self.replace_with(source);
        }
    }

    /// Drops the live alternative and constructs the one holding `T`.
    ///
    /// Returns a reference to the new value.
    pub fn emplace<T, I>(&mut self, value: T) -> &mut T
    where
        U: Locate<T, I>,
    {
        self.replace_with(Self::new(value));
        // SAFETY: `Stored` was just constructed.
        unsafe { <U as Locate<T, I>>::project_mut(self.storage.as_mut_ptr()) }
    }

    /// Drops the live alternative and constructs the one at position `I`.
    ///
    /// ```
    /// use unionvariant::{I0, I1, Variant};
    ///
    /// let mut v = Variant::<(u8, u8)>::default();
    /// v.emplace_at::<I1>(7);
    /// assert_eq!(v.index(), 1);
    /// v.emplace_at::<I0>(9);
    /// assert_eq!(v.index(), 0);
    /// ```
    pub fn emplace_at<I>(&mut self, value: <U as Select<I>>::Output) -> &mut <U as Select<I>>::Output
    where
        I: Selector,
        U: Select<I>,
    {
        self.replace_with(Self::new_at::<I>(value));
        // SAFETY: The alternative at `I` was just constructed.
        unsafe { self.storage.assume_mut() }
    }
}

impl<U: TypeUnion> Drop for Variant<U> {
    fn drop(&mut self) {
        let destroy = handler::<U, Destroy>(self.tag);
        // SAFETY: The tag names the live alternative, which is dropped once.
        unsafe { destroy(self.storage.as_mut_ptr()) }
    }
}

impl<U> Default for Variant<U>
where
    U: Select<I0>,
    <U as Select<I0>>::Output: Default,
{
    #[inline]
    fn default() -> Self {
        Self::new_at::<I0>(Default::default())
    }
}

impl<U> Clone for Variant<U>
where
    U: TypeUnion + Dispatch<Cloning>,
{
    fn clone(&self) -> Self {
        let mut storage = RawStorage::uninit();
        let vtable = handler::<U, Cloning>(self.tag);
        // SAFETY: The vtable belongs to the live alternative and `storage`
        // has room for it. If the clone panics, nothing was written.
        unsafe { vtable.clone_into(self.storage.as_ptr(), storage.as_mut_ptr()) };
        Self {
            tag: self.tag,
            storage,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if self.tag == source.tag {
            let vtable = handler::<U, Cloning>(self.tag);
            // SAFETY: Both hold the alternative the vtable belongs to.
            unsafe { vtable.clone_from(self.storage.as_mut_ptr(), source.storage.as_ptr()) }
        } else {
            // A panicking clone leaves `self` untouched.
            let temporary = source.clone();
            self.replace_with(temporary);
        }
    }
}

impl<U> PartialEq for Variant<U>
where
    U: TypeUnion + Dispatch<Equal>,
{
    fn eq(&self, other: &Self) -> bool {
        if self.tag != other.tag {
            return false;
        }
        let eq = handler::<U, Equal>(self.tag);
        // SAFETY: Both hold the alternative at `tag`.
        unsafe { eq(self.storage.as_ptr(), other.storage.as_ptr()) }
    }
}

impl<U> Eq for Variant<U> where U: TypeUnion + Dispatch<Equal> + Dispatch<Equivalence> {}

impl<U> PartialOrd for Variant<U>
where
    U: TypeUnion + Dispatch<Equal> + Dispatch<PartialCompare>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.tag.cmp(&other.tag) {
            Ordering::Equal => {
                let partial_cmp = handler::<U, PartialCompare>(self.tag);
                // SAFETY: Both hold the alternative at `tag`.
                unsafe { partial_cmp(self.storage.as_ptr(), other.storage.as_ptr()) }
            }
            by_tag => Some(by_tag),
        }
    }
}

impl<U> Ord for Variant<U>
where
    U: TypeUnion
        + Dispatch<Equal>
        + Dispatch<Equivalence>
        + Dispatch<PartialCompare>
        + Dispatch<TotalCompare>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        match self.tag.cmp(&other.tag) {
            Ordering::Equal => {
                let cmp = handler::<U, TotalCompare>(self.tag);
                // SAFETY: Both hold the alternative at `tag`.
                unsafe { cmp(self.storage.as_ptr(), other.storage.as_ptr()) }
            }
            by_tag => by_tag,
        }
    }
}

impl<U> Hash for Variant<U>
where
    U: TypeUnion + Dispatch<Hashing>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
        let hash = handler::<U, Hashing>(self.tag);
        // SAFETY: The handler belongs to the live alternative.
        unsafe { hash(self.storage.as_ptr(), state) }
    }
}

impl<U> fmt::Debug for Variant<U>
where
    U: TypeUnion + Dispatch<Debugging>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Live<'a, U: TypeUnion>(&'a Variant<U>);

        impl<U: TypeUnion + Dispatch<Debugging>> fmt::Debug for Live<'_, U> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let debug = handler::<U, Debugging>(self.0.tag);
                // SAFETY: The handler belongs to the live alternative.
                unsafe { debug(self.0.storage.as_ptr(), f) }
            }
        }

        f.debug_tuple("Variant")
            .field(&self.tag)
            .field(&Live(self))
            .finish()
    }
}

impl<U> fmt::Display for Variant<U>
where
    U: TypeUnion + Dispatch<Displaying>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let display = handler::<U, Displaying>(self.tag);
        // SAFETY: The handler belongs to the live alternative.
        unsafe { display(self.storage.as_ptr(), f) }
    }
}
