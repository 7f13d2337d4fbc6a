// ============================================================================
// observable-map - Equality and Truthiness
// Decides whether a write to an existing key is a no-op
// ============================================================================

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

use crate::core::types::EqualsFn;

// =============================================================================
// TRUTHINESS
// =============================================================================

/// Whether a stored value counts as "present" for change detection.
///
/// Falsy values are zero numbers, NaN, `false`, empty strings, `()` and
/// `None`. Collections are truthy even when empty. Types without a zero
/// state can opt in with an empty impl, which makes them always truthy:
///
/// ```
/// use observable_map::Truthy;
///
/// #[derive(PartialEq)]
/// struct Point { x: i32, y: i32 }
///
/// impl Truthy for Point {}
///
/// assert!(Point { x: 0, y: 0 }.is_truthy());
/// assert!(!0u8.is_truthy());
/// assert!(!String::new().is_truthy());
/// assert!(!None::<i32>.is_truthy());
/// ```
pub trait Truthy {
    fn is_truthy(&self) -> bool {
        true
    }
}

macro_rules! truthy_int {
    ($($t:ty),*) => {
        $(
            impl Truthy for $t {
                fn is_truthy(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

truthy_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for char {}

impl Truthy for () {
    fn is_truthy(&self) -> bool {
        false
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for Cow<'_, str> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Box<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Rc<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Arc<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

// Collections behave like object references: present means truthy.
impl<T> Truthy for [T] {}
impl<T, const N: usize> Truthy for [T; N] {}
impl<T> Truthy for Vec<T> {}
impl<T> Truthy for VecDeque<T> {}
impl<K, V, S> Truthy for HashMap<K, V, S> {}
impl<K, V> Truthy for BTreeMap<K, V> {}
impl<T, S> Truthy for HashSet<T, S> {}
impl<T> Truthy for BTreeSet<T> {}

// =============================================================================
// EQUALITY FUNCTIONS
// =============================================================================

/// Never equal: every `set` on an existing key is written and reported.
pub fn never_equals<T>(_a: &T, _b: &T) -> bool {
    false
}

/// Always equal: a truthy stored value is never replaced by `set`.
pub fn always_equals<T>(_a: &T, _b: &T) -> bool {
    true
}

// =============================================================================
// NO-OP DETECTION
// =============================================================================

/// Returns true when writing `incoming` over `existing` must be skipped.
///
/// The structural comparison only runs when the stored value is truthy, so a
/// falsy stored value is always overwritten, even by an identical value.
///
/// # Example
/// ```
/// use observable_map::default_equals;
/// use observable_map::reactivity::equality::is_noop_write;
///
/// assert!(is_noop_write(&5, &5, default_equals));
/// assert!(!is_noop_write(&5, &6, default_equals));
/// // Zero is falsy: the write proceeds.
/// assert!(!is_noop_write(&0, &0, default_equals));
/// ```
pub fn is_noop_write<V: Truthy>(existing: &V, incoming: &V, equals: EqualsFn<V>) -> bool {
    existing.is_truthy() && equals(existing, incoming)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::default_equals;

    #[test]
    fn integers_are_falsy_at_zero() {
        assert!(!0i32.is_truthy());
        assert!(!0u64.is_truthy());
        assert!(1i32.is_truthy());
        assert!((-1i64).is_truthy());
    }

    #[test]
    fn floats_are_falsy_at_zero_and_nan() {
        assert!(!0.0f64.is_truthy());
        assert!(!(-0.0f64).is_truthy());
        assert!(!f64::NAN.is_truthy());
        assert!(!f32::NAN.is_truthy());
        assert!(f64::INFINITY.is_truthy());
        assert!(0.5f32.is_truthy());
    }

    #[test]
    fn strings_are_falsy_when_empty() {
        assert!(!"".is_truthy());
        assert!("x".is_truthy());
        assert!(!String::new().is_truthy());
        assert!(!Cow::Borrowed("").is_truthy());
        assert!(Cow::<str>::Owned("owned".into()).is_truthy());
    }

    #[test]
    fn option_delegates_to_inner_value() {
        assert!(!None::<String>.is_truthy());
        assert!(!Some(0).is_truthy());
        assert!(Some(3).is_truthy());
        assert!(!Some(None::<i32>).is_truthy());
    }

    #[test]
    fn unit_and_false_are_falsy() {
        assert!(!().is_truthy());
        assert!(!false.is_truthy());
        assert!(true.is_truthy());
        assert!('\0'.is_truthy());
    }

    #[test]
    fn smart_pointers_delegate() {
        assert!(!Box::new(0).is_truthy());
        assert!(Rc::new(7).is_truthy());
        assert!(!Arc::new(String::new()).is_truthy());
        let boxed: Box<str> = "".into();
        assert!(!boxed.is_truthy());
    }

    #[test]
    fn collections_are_always_truthy() {
        assert!(Vec::<i32>::new().is_truthy());
        assert!(HashMap::<i32, i32>::new().is_truthy());
        assert!(BTreeSet::<i32>::new().is_truthy());
        assert!([0u8; 0].is_truthy());
    }

    #[test]
    fn noop_requires_truthy_existing_value() {
        assert!(is_noop_write(&"a".to_string(), &"a".to_string(), default_equals));
        assert!(!is_noop_write(&String::new(), &String::new(), default_equals));
        assert!(!is_noop_write(&None::<i32>, &None, default_equals));
        assert!(is_noop_write(&Some(1), &Some(1), default_equals));
    }

    #[test]
    fn noop_uses_supplied_equality() {
        assert!(!is_noop_write(&1, &1, never_equals));
        assert!(is_noop_write(&1, &2, always_equals));
        // The truthiness guard still applies to custom equality.
        assert!(!is_noop_write(&0, &2, always_equals));
    }

    #[test]
    fn default_equality_compares_nested_structure() {
        #[derive(PartialEq, Debug)]
        struct Haro {
            haro: i32,
            tags: Vec<String>,
        }

        let a = Haro { haro: 123, tags: vec!["x".into()] };
        let b = Haro { haro: 123, tags: vec!["x".into()] };
        let c = Haro { haro: 12, tags: vec!["x".into()] };

        assert!(default_equals(&a, &b));
        assert!(!default_equals(&a, &c));
        assert!(!is_noop_write(&vec![a], &vec![c], default_equals));
    }
}
