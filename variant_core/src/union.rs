use core::mem::{ManuallyDrop, align_of, size_of};

use crate::dispatch::{Dispatch, Handles, Operation};
use crate::select::TypeUnion;

macro_rules! doc_comment {
    ($x:expr, $($tt:tt)*) => {
        #[doc = $x]
        $($tt)*
    };
}

/// The largest value in `values`, or `0` when it is empty.
pub const fn max_of(values: &[usize]) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < values.len() {
        if values[i] > max {
            max = values[i];
        }
        i += 1;
    }
    max
}

macro_rules! count {
    () => (0usize);
    ($head:tt $($tail:tt)*) => (1usize + count!($($tail)*));
}

macro_rules! Union {
    (
        pub union $name:ident {
        $($fieldnames:ident: $generics:tt),*
    }) => (
        doc_comment!(
            concat!("This union can hold the following Generics: ", stringify!($($generics),*)),
            #[repr(C)]
            pub union $name<$($generics),*> {
                $($fieldnames: ManuallyDrop<$generics>,)*
            }
        );

        unsafe impl<$($generics),*> TypeUnion for ($($generics,)*) {
            type Union = $name<$($generics),*>;

            const LEN: usize = count!($($generics)*);
            const SIZE: usize = max_of(&[$(size_of::<$generics>()),*]);
            const ALIGN: usize = max_of(&[$(align_of::<$generics>()),*]);
        }

        // SAFETY: The handlers are listed in declaration order.
        unsafe impl<Op, $($generics),*> Dispatch<Op> for ($($generics,)*)
        where
            Op: Operation $(+ Handles<$generics>)*,
        {
            const HANDLERS: usize = count!($($generics)*);

            #[inline]
            fn lookup(tag: usize) -> Option<<Op as Operation>::Handler> {
                let handlers = [$(<Op as Handles<$generics>>::HANDLER),*];
                handlers.get(tag).copied()
            }
        }
    )
}

macro_rules! GenUnion {
    (
        NAMES = [],
        FIELDS = []
    ) => ();

    (
        NAMES = [$name:ident $(,$names:ident)*],
        FIELDS = [$fieldname:ident: $generic:ident $(,$fieldnames:ident: $generics:ident)*]
    ) => {
        Union!(
            pub union $name {
            $fieldname: $generic
            $(, $fieldnames: $generics)*
        });

        GenUnion!(
            NAMES = [$($names),*],
            FIELDS = [$($fieldnames: $generics),*]
        );
    };
}

GenUnion!(
    NAMES = [Union10, Union9, Union8, Union7, Union6, Union5, Union4, Union3, Union2, Union1],
    FIELDS = [a: A, b: B, c: C, d: D, e: E, f: F, g: G, h: H, i: I, j: J]
);

#[cfg(test)]
mod tests {
    extern crate alloc;

    use alloc::string::String;
    use alloc::vec::Vec;

    use static_assertions::{assert_eq_align, assert_eq_size, const_assert_eq};

    use super::*;

    assert_eq_size!(Union2<u8, u64>, u64);
    assert_eq_align!(Union2<u8, u64>, u64);
    assert_eq_size!(Union3<u8, [u8; 12], u32>, [u32; 3]);
    assert_eq_size!(Union1<String>, String);

    const_assert_eq!(<(u8, [u8; 12], u32) as TypeUnion>::SIZE, 12);
    const_assert_eq!(<(u8, [u8; 12], u32) as TypeUnion>::ALIGN, 4);
    const_assert_eq!(<(u8,) as TypeUnion>::LEN, 1);
    const_assert_eq!(<(u8, u16, u32, u64, i8, i16, i32, i64, u128, ()) as TypeUnion>::LEN, 10);

    #[test]
    fn test_max_of() {
        assert_eq!(max_of(&[]), 0);
        assert_eq!(max_of(&[3, 9, 1]), 9);
    }

    #[test]
    fn test_union_fits_every_alternative() {
        type Set = (u8, String, Vec<u64>, [u16; 5]);

        assert!(size_of::<<Set as TypeUnion>::Union>() >= <Set as TypeUnion>::SIZE);
        assert_eq!(align_of::<<Set as TypeUnion>::Union>(), <Set as TypeUnion>::ALIGN);
        assert_eq!(<Set as TypeUnion>::SIZE, size_of::<String>().max(size_of::<Vec<u64>>()));
    }
}
