//! Stable ordering of mapping keys.
//!
//! Keys are sorted only when every key belongs to one comparable family.
//! Each family gets a single total comparator, so the sort never sees an
//! inconsistent ordering.  Anything else keeps insertion order.

use std::cmp::Ordering;
use std::rc::Rc;

use num_bigint::BigInt;
use num_traits::FromPrimitive;

use crate::value::Value;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Family {
    Int,
    Float,
    Str,
    Bytes,
}

enum SortKey {
    Int(BigInt),
    Float(f64),
    Str(Rc<str>),
    Bytes(Rc<[u8]>),
}

fn family_of(key: &Value) -> Option<Family> {
    match key {
        Value::Bool(_) | Value::Int(_) | Value::BigInt(_) => Some(Family::Int),
        Value::Float(f) if !f.is_nan() => Some(Family::Float),
        Value::Str(_) => Some(Family::Str),
        Value::Bytes(_) => Some(Family::Bytes),
        _ => None,
    }
}

fn as_big_int(key: &Value) -> Option<BigInt> {
    match key {
        Value::Bool(b) => Some(BigInt::from(u8::from(*b))),
        Value::Int(i) => Some(BigInt::from(*i)),
        Value::BigInt(n) => Some(n.as_ref().clone()),
        _ => None,
    }
}

fn sort_key(key: &Value, family: Family) -> Option<SortKey> {
    match family {
        Family::Int => as_big_int(key).map(SortKey::Int),
        // Integers stay exact; `compare` orders them against floats.
        Family::Float => match key {
            Value::Float(f) => Some(SortKey::Float(*f)),
            other => as_big_int(other).map(SortKey::Int),
        },
        Family::Str => match key {
            Value::Str(s) => Some(SortKey::Str(Rc::clone(s))),
            _ => None,
        },
        Family::Bytes => match key {
            Value::Bytes(b) => Some(SortKey::Bytes(Rc::clone(b))),
            _ => None,
        },
    }
}

fn compare(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
        // NaN never reaches here, so `partial_cmp` is total.
        (SortKey::Float(a), SortKey::Float(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
        (SortKey::Int(a), SortKey::Float(b)) => int_cmp_float(a, *b),
        (SortKey::Float(a), SortKey::Int(b)) => int_cmp_float(b, *a).reverse(),
        (SortKey::Str(a), SortKey::Str(b)) => a.cmp(b),
        (SortKey::Bytes(a), SortKey::Bytes(b)) => a.cmp(b),
        // All keys share one family by construction.
        _ => Ordering::Equal,
    }
}

/// Exact comparison of an integer with a non-NaN float.
fn int_cmp_float(i: &BigInt, f: f64) -> Ordering {
    if f.is_infinite() {
        return if f > 0.0 { Ordering::Less } else { Ordering::Greater };
    }
    let floor = f.floor();
    let Some(whole) = BigInt::from_f64(floor) else {
        return Ordering::Equal;
    };
    match i.cmp(&whole) {
        Ordering::Equal if f > floor => Ordering::Less,
        ord => ord,
    }
}

/// Indices of `keys` in sorted order, or `None` when the keys are not
/// mutually comparable.
pub(crate) fn sorted_order(keys: &[Value]) -> Option<Vec<usize>> {
    let mut family: Option<Family> = None;
    for key in keys {
        let this = family_of(key)?;
        family = match (family, this) {
            (None, f) => Some(f),
            (Some(a), b) if a == b => Some(a),
            // Integers and floats share one numeric order.
            (Some(Family::Int), Family::Float) | (Some(Family::Float), Family::Int) => {
                Some(Family::Float)
            }
            _ => return None,
        };
    }
    let family = family?;

    let sort_keys: Vec<SortKey> = keys
        .iter()
        .map(|k| sort_key(k, family))
        .collect::<Option<_>>()?;

    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| compare(&sort_keys[a], &sort_keys[b]));
    Some(order)
}

/// Sorted order when possible, insertion order otherwise.
pub(crate) fn stable_order(keys: &[Value]) -> Vec<usize> {
    sorted_order(keys).unwrap_or_else(|| (0..keys.len()).collect())
}
