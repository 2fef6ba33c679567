//! Closed sum types over convertible alternatives.
//!
//! `VariantN<A, B, ..>` holds at most one alternative. Reading resolves the
//! alternatives **last to first**: the last-declared alternative whose checker
//! accepts the value wins. With `Variant2<i64, String>` an integer on the
//! stack therefore reads as `B("42")`, since strings accept numbers.
//!
//! Nil reads as `Empty` and `Empty` pushes nil.
//!
//! The probe helpers are public so `#[derive(Variant)]` can expand to them.

use alloc::format;

use tether_values::{Stack, Type};

use crate::marshal::reject;
use crate::{Handler, Marshal, Mismatch, NoPanic, Push, Tracking};

/// Silent check of one alternative.
pub type Probe<S> = fn(&S, i32) -> bool;

/// Run `T`'s checker without reporting and without touching the caller's
/// tracking.
#[doc(hidden)]
pub fn probe<S: Stack, T: Marshal<S>>(stack: &S, index: i32) -> bool {
    T::check(stack, index, &mut NoPanic, &mut Tracking::new())
}

/// Index of the last alternative in `probes` that accepts the value at
/// `index`, or `None` for nil and for a value nothing accepts.
#[doc(hidden)]
pub fn select_alternative<S: Stack>(stack: &S, index: i32, probes: &[Probe<S>]) -> Option<usize> {
    if stack.is_none_or_nil(index) {
        return None;
    }
    probes.iter().enumerate().rev().find_map(|(alternative, probe)| {
        let hit = probe(stack, index);
        tracing::trace!(alternative, hit, "probed sum type alternative");
        hit.then_some(alternative)
    })
}

/// Checker shared by every sum type: consumes one slot, accepts nil, and
/// reports a single mismatch when no alternative fits.
#[doc(hidden)]
pub fn check_alternatives<S: Stack, H: Handler + ?Sized>(
    stack: &S,
    index: i32,
    handler: &mut H,
    tracking: &mut Tracking,
    probes: &[Probe<S>],
    name: &'static str,
) -> bool {
    tracking.use_slots(1);
    let index = stack.abs_index(index);
    if stack.is_none_or_nil(index) || select_alternative(stack, index, probes).is_some() {
        return true;
    }
    reject(
        handler,
        Mismatch::new(
            index,
            Type::Poly,
            stack.type_of(index),
            format!("value does not fit any alternative of {name}"),
        ),
    )
}

macro_rules! decl_variant {
    ($(#[$meta:meta])* $name:ident { $($ty:ident => $alt:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name<$($ty),+> {
            /// No alternative is active.
            Empty,
            $($alt($ty),)+
        }

        impl<$($ty),+> Default for $name<$($ty),+> {
            fn default() -> Self {
                Self::Empty
            }
        }

        impl<$($ty),+> $name<$($ty),+> {
            pub fn is_empty(&self) -> bool {
                matches!(self, Self::Empty)
            }

            /// Zero-based position of the active alternative.
            pub fn active(&self) -> Option<usize> {
                let mut position = 0;
                $(
                    if let Self::$alt(_) = self {
                        return Some(position);
                    }
                    position += 1;
                )+
                let _ = position;
                None
            }
        }

        impl<S: Stack, $($ty: Push<S>),+> Push<S> for $name<$($ty),+> {
            const TYPE: Type = Type::Poly;

            fn push(self, stack: &mut S) -> usize {
                match self {
                    Self::Empty => {
                        stack.push_nil();
                        1
                    }
                    $(Self::$alt(value) => value.push(stack),)+
                }
            }
        }

        impl<S: Stack, $($ty: Marshal<S>),+> Marshal<S> for $name<$($ty),+> {
            // `H` already names an alternative of `Variant8`.
            fn check<__H: Handler + ?Sized>(
                stack: &S,
                index: i32,
                handler: &mut __H,
                tracking: &mut Tracking,
            ) -> bool {
                let probes: &[Probe<S>] = &[$(probe::<S, $ty>),+];
                check_alternatives(stack, index, handler, tracking, probes, stringify!($name))
            }

            fn get(stack: &mut S, index: i32, tracking: &mut Tracking) -> Self {
                let index = stack.abs_index(index);
                let probes: &[Probe<S>] = &[$(probe::<S, $ty>),+];
                let getters: &[fn(&mut S, i32, &mut Tracking) -> Self] = &[$(
                    |stack: &mut S, index: i32, tracking: &mut Tracking| {
                        Self::$alt(<$ty as Marshal<S>>::get(stack, index, tracking))
                    }
                ),+];
                match select_alternative(stack, index, probes) {
                    Some(alternative) => getters[alternative](stack, index, tracking),
                    None => {
                        tracking.use_slots(1);
                        Self::Empty
                    }
                }
            }
        }
    };
}

decl_variant!(Variant1 { A => A });
decl_variant!(Variant2 { A => A, B => B });
decl_variant!(Variant3 { A => A, B => B, C => C });
decl_variant!(Variant4 { A => A, B => B, C => C, D => D });
decl_variant!(Variant5 { A => A, B => B, C => C, D => D, E => E });
decl_variant!(Variant6 { A => A, B => B, C => C, D => D, E => E, F => F });
decl_variant!(Variant7 { A => A, B => B, C => C, D => D, E => E, F => F, G => G });
decl_variant!(
    /// Largest generated sum type. Nest sum types, or derive one, for more.
    Variant8 { A => A, B => B, C => C, D => D, E => E, F => F, G => G, H => H }
);

/// Names a `VariantN` by its alternatives: `variant![i64, String]` is
/// `Variant2<i64, String>`.
#[macro_export]
macro_rules! variant {
    ($a:ty $(,)?) => { $crate::Variant1<$a> };
    ($a:ty, $b:ty $(,)?) => { $crate::Variant2<$a, $b> };
    ($a:ty, $b:ty, $c:ty $(,)?) => { $crate::Variant3<$a, $b, $c> };
    ($a:ty, $b:ty, $c:ty, $d:ty $(,)?) => { $crate::Variant4<$a, $b, $c, $d> };
    ($a:ty, $b:ty, $c:ty, $d:ty, $e:ty $(,)?) => { $crate::Variant5<$a, $b, $c, $d, $e> };
    ($a:ty, $b:ty, $c:ty, $d:ty, $e:ty, $f:ty $(,)?) => {
        $crate::Variant6<$a, $b, $c, $d, $e, $f>
    };
    ($a:ty, $b:ty, $c:ty, $d:ty, $e:ty, $f:ty, $g:ty $(,)?) => {
        $crate::Variant7<$a, $b, $c, $d, $e, $f, $g>
    };
    ($a:ty, $b:ty, $c:ty, $d:ty, $e:ty, $f:ty, $g:ty, $h:ty $(,)?) => {
        $crate::Variant8<$a, $b, $c, $d, $e, $f, $g, $h>
    };
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use pretty_assertions::assert_eq;
    use tether_values::State;

    use super::*;
    use crate::test_utils::init_test_logging;
    use crate::{Collect, check, get, push};

    #[test]
    fn test_integer_prefers_later_string() {
        init_test_logging();
        let mut state = State::new();
        push(&mut state, 42i64);
        let value = get::<Variant2<i64, String>, _>(&mut state, -1);
        assert_eq!(value, Variant2::B("42".to_string()));
        assert_eq!(value.active(), Some(1));
    }

    #[test]
    fn test_falls_back_to_earlier_alternative() {
        let mut state = State::new();
        push(&mut state, true);
        let value = get::<Variant3<bool, i64, String>, _>(&mut state, -1);
        assert_eq!(value, Variant3::A(true));
    }

    #[test]
    fn test_empty_round_trip() {
        let mut state = State::new();
        assert_eq!(push(&mut state, Variant2::<i64, bool>::Empty), 1);
        assert_eq!(state.type_of(-1), Type::Nil);
        assert!(check::<Variant2<i64, bool>, _>(&state, -1, &mut NoPanic));
        assert!(get::<Variant2<i64, bool>, _>(&mut state, -1).is_empty());
    }

    #[test]
    fn test_no_match_reports_once() {
        let mut state = State::new();
        state.push_bytes(b"text");
        let mut handler = Collect::new();
        let mut tracking = Tracking::new();
        assert!(!<Variant2<i64, bool>>::check(&state, -1, &mut handler, &mut tracking));
        assert_eq!(handler.len(), 1);
        assert_eq!(tracking.used(), 1);

        let mismatch = handler.into_first().expect("mismatch");
        assert_eq!(mismatch.expected, Type::Poly);
        assert_eq!(mismatch.actual, Type::String);
        assert_eq!(mismatch.message, "value does not fit any alternative of Variant2");
    }

    #[test]
    fn test_unmatched_get_is_empty() {
        let mut state = State::new();
        state.push_bytes(b"text");
        let mut tracking = Tracking::new();
        let value = <Variant2<i64, bool>>::get(&mut state, -1, &mut tracking);
        assert_eq!(value, Variant2::Empty);
        assert_eq!(tracking.used(), 1);
    }

    #[test]
    fn test_push_active_alternative() {
        let mut state = State::new();
        let value: variant![i64, String] = Variant2::A(9);
        push(&mut state, value);
        assert_eq!(state.type_of(-1), Type::Number);
        assert_eq!(state.to_integer(-1), Some(9));
    }

    #[test]
    fn test_widest_sum_type() {
        type Wide = Variant8<bool, bool, bool, bool, bool, bool, bool, i64>;
        let mut state = State::new();
        push(&mut state, Wide::H(8));
        let mut handler = Collect::new();
        assert!(check::<Wide, _>(&state, -1, &mut handler));
        assert!(handler.is_empty());
        assert_eq!(get::<Wide, _>(&mut state, -1), Variant8::H(8));

        push(&mut state, true);
        assert_eq!(get::<Wide, _>(&mut state, -1).active(), Some(6));
    }

    #[test]
    fn test_active_positions() {
        let value: Variant3<u8, u8, u8> = Variant3::C(0);
        assert_eq!(value.active(), Some(2));
        assert_eq!(Variant3::<u8, u8, u8>::default().active(), None);
    }
}
