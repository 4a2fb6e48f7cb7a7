//! The value model the renderer inspects.
//!
//! `Value` is a cheap, clonable handle.  Scalars are stored inline; text and
//! immutable containers sit behind `Rc`; mutable containers sit behind
//! `Rc<RefCell<..>>` so that a container can hold itself and so that identity
//! (`Value::is_same`) is meaningful.
//!
//! User-defined types enter through [`HostObject`].  Every hook on that trait
//! may fail, and the renderer treats each one as untrusted.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt;

use crate::errors::HookError;

/// Shared storage of a mutable sequence (list, set, deque).
pub type SeqCell = Rc<RefCell<Vec<Value>>>;

/// Shared storage of a mapping.  Entries keep insertion order.
pub type DictCell = Rc<RefCell<Vec<(Value, Value)>>>;

/// Iterator handed out by [`HostObject::iter`].
pub type ValueIter<'a> = Box<dyn Iterator<Item = Result<Value, HookError>> + 'a>;

/// Hooks of a user-defined type.
///
/// Only `type_name` and `repr` are required.  The defaults describe a plain,
/// non-iterable object that customizes its own repr.
pub trait HostObject {
    /// Name of the object's type, e.g. `"Point"`.
    fn type_name(&self) -> Result<String, HookError>;

    /// The object's own textual form.
    fn repr(&self) -> Result<String, HookError>;

    /// Module that declares the type; dotted, e.g. `"numpy.ma"`.
    fn module(&self) -> Result<String, HookError> {
        Ok("__main__".to_owned())
    }

    /// Whether the type replaces the repr of the built-in it extends.
    ///
    /// Only objects that return `false` here *and* expose a `base_value` are
    /// rendered structurally as that built-in.
    fn overrides_repr(&self) -> bool {
        true
    }

    /// Built-in value this object extends (a list subclass exposes its list).
    fn base_value(&self) -> Option<Value> {
        None
    }

    /// Integer value for int-like types, used by hex mode.
    fn int_value(&self) -> Option<BigInt> {
        None
    }

    /// `None` when the type has no length at all.
    fn len(&self) -> Option<Result<usize, HookError>> {
        None
    }

    fn is_iterable(&self) -> bool {
        false
    }

    /// One-shot iterators (generators, streams) are their own iterator and
    /// must not be enumerated by the renderer.
    fn is_own_iterator(&self) -> bool {
        false
    }

    fn iter(&self) -> Result<ValueIter<'_>, HookError> {
        Err(HookError::type_error("object is not iterable"))
    }
}

/// `range(start, stop, step)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeValue {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl RangeValue {
    pub fn len(&self) -> usize {
        let (lo, hi, step) = if self.step > 0 {
            (self.start as i128, self.stop as i128, self.step as i128)
        } else if self.step < 0 {
            (self.stop as i128, self.start as i128, -(self.step as i128))
        } else {
            return 0;
        };
        if hi <= lo {
            return 0;
        }
        usize::try_from((hi - lo + step - 1) / step).unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A runtime value under inspection.
#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    BigInt(Rc<BigInt>),
    Float(f64),
    Str(Rc<str>),
    Bytes(Rc<[u8]>),
    Range(RangeValue),
    List(SeqCell),
    Tuple(Rc<[Value]>),
    Set(SeqCell),
    FrozenSet(Rc<[Value]>),
    Deque(SeqCell),
    Dict(DictCell),
    OrderedDict(DictCell),
    Object(Rc<dyn HostObject>),
}

fn seq_cell(items: Vec<Value>) -> SeqCell {
    Rc::new(RefCell::new(items))
}

fn dict_cell(entries: Vec<(Value, Value)>) -> DictCell {
    Rc::new(RefCell::new(entries))
}

fn busy(what: &str) -> HookError {
    HookError::runtime(format!("{what} is being mutated"))
}

impl Value {
    // ── Constructors ─────────────────────────────────────────

    pub fn str(text: impl AsRef<str>) -> Self {
        Value::Str(Rc::from(text.as_ref()))
    }

    pub fn bytes(data: impl AsRef<[u8]>) -> Self {
        Value::Bytes(Rc::from(data.as_ref()))
    }

    pub fn big_int(n: BigInt) -> Self {
        Value::BigInt(Rc::new(n))
    }

    pub fn range(start: i64, stop: i64, step: i64) -> Self {
        Value::Range(RangeValue { start, stop, step })
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(seq_cell(items))
    }

    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Rc::from(items))
    }

    pub fn set(items: Vec<Value>) -> Self {
        Value::Set(seq_cell(items))
    }

    pub fn frozenset(items: Vec<Value>) -> Self {
        Value::FrozenSet(Rc::from(items))
    }

    pub fn deque(items: Vec<Value>) -> Self {
        Value::Deque(seq_cell(items))
    }

    pub fn dict(entries: Vec<(Value, Value)>) -> Self {
        Value::Dict(dict_cell(entries))
    }

    pub fn ordered_dict(entries: Vec<(Value, Value)>) -> Self {
        Value::OrderedDict(dict_cell(entries))
    }

    pub fn object(obj: impl HostObject + 'static) -> Self {
        Value::Object(Rc::new(obj))
    }

    // ── Mutation ─────────────────────────────────────────────

    /// Append to a list, set, or deque.  Returns `false` for any other value
    /// or when the container is currently borrowed.
    pub fn append(&self, item: Value) -> bool {
        match self {
            Value::List(cell) | Value::Set(cell) | Value::Deque(cell) => {
                match cell.try_borrow_mut() {
                    Ok(mut items) => {
                        items.push(item);
                        true
                    }
                    Err(_) => false,
                }
            }
            _ => false,
        }
    }

    /// Insert into a dict, replacing the value of an existing identical key.
    /// Returns `false` for any other value or when the dict is borrowed.
    pub fn insert(&self, key: Value, value: Value) -> bool {
        let cell = match self {
            Value::Dict(cell) | Value::OrderedDict(cell) => cell,
            _ => return false,
        };
        let Ok(mut entries) = cell.try_borrow_mut() else {
            return false;
        };
        match entries.iter_mut().find(|(k, _)| k.key_eq(&key)) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
        true
    }

    // ── Introspection ────────────────────────────────────────

    /// Identity comparison.  Scalars never share identity.
    pub fn is_same(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b))
            | (Value::Set(a), Value::Set(b))
            | (Value::Deque(a), Value::Deque(b)) => Rc::ptr_eq(a, b),
            (Value::Tuple(a), Value::Tuple(b)) | (Value::FrozenSet(a), Value::FrozenSet(b)) => {
                Rc::ptr_eq(a, b)
            }
            (Value::Dict(a), Value::Dict(b)) | (Value::OrderedDict(a), Value::OrderedDict(b)) => {
                Rc::ptr_eq(a, b)
            }
            (Value::Object(a), Value::Object(b)) => {
                std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
            }
            _ => false,
        }
    }

    /// Key equality used by dict lookup: identity for containers and objects,
    /// value equality for scalars and text.
    pub(crate) fn key_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::Range(a), Value::Range(b)) => a == b,
            _ => self.is_same(other),
        }
    }

    /// Name of the value's type.  Only host objects can fail here.
    pub fn type_name(&self) -> Result<String, HookError> {
        let name = match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::BigInt(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::Range(_) => "range",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::FrozenSet(_) => "frozenset",
            Value::Deque(_) => "deque",
            Value::Dict(_) => "dict",
            Value::OrderedDict(_) => "OrderedDict",
            Value::Object(obj) => return obj.type_name(),
        };
        Ok(name.to_owned())
    }

    /// Length as the host would report it, or `None` for unsized values.
    pub fn length(&self) -> Result<Option<usize>, HookError> {
        let len = match self {
            Value::None | Value::Bool(_) | Value::Int(_) | Value::BigInt(_) | Value::Float(_) => {
                return Ok(None)
            }
            Value::Str(s) => s.chars().count(),
            Value::Bytes(b) => b.len(),
            Value::Range(r) => r.len(),
            Value::List(cell) | Value::Set(cell) | Value::Deque(cell) => {
                cell.try_borrow().map_err(|_| busy("sequence"))?.len()
            }
            Value::Tuple(items) | Value::FrozenSet(items) => items.len(),
            Value::Dict(cell) | Value::OrderedDict(cell) => {
                cell.try_borrow().map_err(|_| busy("mapping"))?.len()
            }
            Value::Object(obj) => return obj.len().transpose(),
        };
        Ok(Some(len))
    }

    /// Element at `index` of a built-in container, cloned out so no borrow
    /// outlives the call.  Iterating a mapping yields its keys.
    pub(crate) fn item_at(&self, index: usize) -> Result<Option<Value>, HookError> {
        match self {
            Value::List(cell) | Value::Set(cell) | Value::Deque(cell) => {
                let items = cell.try_borrow().map_err(|_| busy("sequence"))?;
                Ok(items.get(index).cloned())
            }
            Value::Tuple(items) | Value::FrozenSet(items) => Ok(items.get(index).cloned()),
            Value::Dict(cell) | Value::OrderedDict(cell) => {
                let entries = cell.try_borrow().map_err(|_| busy("mapping"))?;
                Ok(entries.get(index).map(|(k, _)| k.clone()))
            }
            _ => Err(HookError::type_error("value is not a built-in container")),
        }
    }

    /// Whether a mapping is known to be empty.  A mapping that is borrowed
    /// mutably elsewhere counts as non-empty.
    pub(crate) fn map_is_empty(&self) -> bool {
        match self {
            Value::Dict(cell) | Value::OrderedDict(cell) => {
                cell.try_borrow().map_or(false, |entries| entries.is_empty())
            }
            _ => false,
        }
    }

    /// Snapshot of a mapping's keys in insertion order.
    pub(crate) fn map_keys(&self) -> Result<Vec<Value>, HookError> {
        match self {
            Value::Dict(cell) | Value::OrderedDict(cell) => {
                let entries = cell.try_borrow().map_err(|_| busy("mapping"))?;
                Ok(entries.iter().map(|(k, _)| k.clone()).collect())
            }
            _ => Err(HookError::type_error("value is not a mapping")),
        }
    }

    /// Look up `key`, trying the slot it was snapshotted from first.
    ///
    /// Fails with a `KeyError` when the entry has gone away since the keys
    /// were snapshotted.
    pub(crate) fn map_lookup(&self, key: &Value, hint: usize) -> Result<Value, HookError> {
        let cell = match self {
            Value::Dict(cell) | Value::OrderedDict(cell) => cell,
            _ => return Err(HookError::type_error("value is not a mapping")),
        };
        let entries = cell.try_borrow().map_err(|_| busy("mapping"))?;
        if let Some((k, v)) = entries.get(hint) {
            if k.key_eq(key) {
                return Ok(v.clone());
            }
        }
        entries
            .iter()
            .find(|(k, _)| k.key_eq(key))
            .map(|(_, v)| v.clone())
            .ok_or_else(|| HookError::key_error("key no longer present"))
    }
}

// ── Conversions ──────────────────────────────────────────────

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Rc::from(s))
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::big_int(n)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::safe_repr(self, false))
    }
}
