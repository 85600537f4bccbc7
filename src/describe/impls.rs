//! `Describe` implementations for std and chrono types

use super::{Describe, TypeDescriptor};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::rc::Rc;
use std::sync::Arc;

macro_rules! describe_int {
    ($($ty:ty => $signed:expr),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::Int {
                        signed: $signed,
                        bits: <$ty>::BITS,
                    }
                }
            }
        )*
    };
}

describe_int! {
    i8 => true, i16 => true, i32 => true, i64 => true, i128 => true, isize => true,
    u8 => false, u16 => false, u32 => false, u64 => false, u128 => false, usize => false,
}

impl Describe for f32 {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Float { bits: 32 }
    }
}

impl Describe for f64 {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Float { bits: 64 }
    }
}

impl Describe for bool {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Bool
    }
}

impl Describe for str {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Text
    }
}

impl Describe for String {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Text
    }
}

impl Describe for char {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Text
    }
}

impl Describe for std::borrow::Cow<'_, str> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Text
    }
}

// ============================================================================
// Instants
// ============================================================================

impl<Tz: chrono::TimeZone> Describe for chrono::DateTime<Tz> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Instant
    }
}

impl Describe for chrono::NaiveDateTime {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Instant
    }
}

impl Describe for chrono::NaiveDate {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Instant
    }
}

impl Describe for std::time::SystemTime {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Instant
    }
}

// ============================================================================
// Containers
// ============================================================================

impl<T: Describe> Describe for [T] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::sequence(T::describe())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::array(T::describe(), N)
    }
}

macro_rules! describe_sequence {
    ($($container:ident),*) => {
        $(
            impl<T: Describe> Describe for $container<T> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::sequence(T::describe())
                }
            }
        )*
    };
}

describe_sequence!(Vec, VecDeque, LinkedList, BTreeSet);

impl<T: Describe, S> Describe for HashSet<T, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::sequence(T::describe())
    }
}

impl<K: Describe, V: Describe, S> Describe for HashMap<K, V, S> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(K::describe(), V::describe())
    }
}

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::map(K::describe(), V::describe())
    }
}

// ============================================================================
// Indirection
// ============================================================================

macro_rules! describe_transparent {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Describe + ?Sized> Describe for $wrapper<T> {
                fn describe() -> TypeDescriptor {
                    T::describe()
                }
            }
        )*
    };
}

describe_transparent!(Box, Rc, Arc);

impl<T: Describe + ?Sized> Describe for &T {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: Describe + ?Sized> Describe for &mut T {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }
}

// ============================================================================
// Unindexable kinds
// ============================================================================

impl<T: ?Sized> Describe for *const T {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Opaque("*const")
    }
}

impl<T: ?Sized> Describe for *mut T {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Opaque("*mut")
    }
}

impl<T> Describe for std::sync::mpsc::Sender<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Opaque("Sender")
    }
}

impl<T> Describe for std::sync::mpsc::Receiver<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Opaque("Receiver")
    }
}

impl Describe for () {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Opaque("()")
    }
}
