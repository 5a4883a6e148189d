//! Position markers and positional lookup.
//!
//! `I0 … I9` are zero-sized types naming the positions of a tuple of
//! alternatives. `<(A, B, C) as Select<I1>>::Output` is `B`, whatever the
//! other alternatives are, so positional access works even when a type
//! occurs more than once.

use crate::select::{Select, Selector};

macro_rules! markers {
    ($($name:ident = $index:literal),* $(,)?) => {$(
        #[doc = concat!("Names the alternative at position ", stringify!($index), ".")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name;

        // SAFETY: Every `Select<$name>` impl below selects position `$index`.
        unsafe impl Selector for $name {
            const INDEX: usize = $index;
        }
    )*};
}

markers!(I0 = 0, I1 = 1, I2 = 2, I3 = 3, I4 = 4, I5 = 5, I6 = 6, I7 = 7, I8 = 8, I9 = 9);

macro_rules! positions {
    (@one [$($generic:ident),+] $index:ident => $output:ident) => {
        // SAFETY: `$output` sits at the position `$index` names.
        unsafe impl<$($generic),+> Select<$index> for ($($generic,)+) {
            type Output = $output;
        }
    };

    ($generics:tt: $($index:ident => $output:ident),+) => {
        $(positions!(@one $generics $index => $output);)+
    };
}

positions!([A]: I0 => A);
positions!([A, B]: I0 => A, I1 => B);
positions!([A, B, C]: I0 => A, I1 => B, I2 => C);
positions!([A, B, C, D]: I0 => A, I1 => B, I2 => C, I3 => D);
positions!([A, B, C, D, E]: I0 => A, I1 => B, I2 => C, I3 => D, I4 => E);
positions!([A, B, C, D, E, F]: I0 => A, I1 => B, I2 => C, I3 => D, I4 => E, I5 => F);
positions!(
    [A, B, C, D, E, F, G]:
    I0 => A, I1 => B, I2 => C, I3 => D, I4 => E, I5 => F, I6 => G
);
positions!(
    [A, B, C, D, E, F, G, H]:
    I0 => A, I1 => B, I2 => C, I3 => D, I4 => E, I5 => F, I6 => G, I7 => H
);
positions!(
    [A, B, C, D, E, F, G, H, I]:
    I0 => A, I1 => B, I2 => C, I3 => D, I4 => E, I5 => F, I6 => G, I7 => H, I8 => I
);
positions!(
    [A, B, C, D, E, F, G, H, I, J]:
    I0 => A, I1 => B, I2 => C, I3 => D, I4 => E, I5 => F, I6 => G, I7 => H, I8 => I, I9 => J
);
