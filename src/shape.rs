//! Shape descriptors and the classifier that picks a rendering path.
//!
//! Only built-in containers get structured rendering.  A host object is
//! rendered as the built-in it extends only when it keeps that built-in's
//! repr; an object with its own repr is always opaque, so its custom text
//! is honoured rather than second-guessed.

use crate::config::RenderLimits;
use crate::probe::is_long_iter;
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    Tuple,
    List,
    FrozenSet,
    Set,
    Deque,
}

impl SequenceKind {
    fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (SequenceKind::Tuple, Value::Tuple(_))
                | (SequenceKind::List, Value::List(_))
                | (SequenceKind::FrozenSet, Value::FrozenSet(_))
                | (SequenceKind::Set, Value::Set(_))
                | (SequenceKind::Deque, Value::Deque(_))
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    Dict,
    OrderedDict,
}

impl MappingKind {
    fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (MappingKind::Dict, Value::Dict(_)) | (MappingKind::OrderedDict, Value::OrderedDict(_))
        )
    }
}

/// Delimiters of a sequence-like container.
#[derive(Debug)]
pub struct SequenceShape {
    pub kind: SequenceKind,
    pub prefix: &'static str,
    pub suffix: &'static str,
    /// One-element tuples need a trailing comma: `(1,)`.
    pub comma_after_single: bool,
}

/// Delimiters of a mapping-like container and of each of its entries.
#[derive(Debug)]
pub struct MappingShape {
    pub kind: MappingKind,
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub item_prefix: &'static str,
    pub item_separator: &'static str,
    pub item_suffix: &'static str,
}

pub static SEQUENCE_SHAPES: [SequenceShape; 5] = [
    SequenceShape { kind: SequenceKind::Tuple, prefix: "(", suffix: ")", comma_after_single: true },
    SequenceShape { kind: SequenceKind::List, prefix: "[", suffix: "]", comma_after_single: false },
    SequenceShape {
        kind: SequenceKind::FrozenSet,
        prefix: "frozenset({",
        suffix: "})",
        comma_after_single: false,
    },
    SequenceShape { kind: SequenceKind::Set, prefix: "{", suffix: "}", comma_after_single: false },
    SequenceShape {
        kind: SequenceKind::Deque,
        prefix: "deque([",
        suffix: "])",
        comma_after_single: false,
    },
];

pub static MAPPING_SHAPES: [MappingShape; 2] = [
    MappingShape {
        kind: MappingKind::Dict,
        prefix: "{",
        suffix: "}",
        item_prefix: "",
        item_separator: ": ",
        item_suffix: "",
    },
    MappingShape {
        kind: MappingKind::OrderedDict,
        prefix: "OrderedDict([",
        suffix: "])",
        item_prefix: "(",
        item_separator: ", ",
        item_suffix: ")",
    },
];

/// The rendering path chosen for a value.
///
/// Structured shapes carry the built-in value to walk, which differs from the
/// classified value when a host object was resolved to its base.
pub enum Shape {
    Sequence(&'static SequenceShape, Value),
    Mapping(&'static MappingShape, Value),
    Text(Value),
    LongIterable,
    Opaque,
}

fn structural(value: &Value) -> Option<Shape> {
    if let Some(shape) = SEQUENCE_SHAPES.iter().find(|s| s.kind.matches(value)) {
        return Some(Shape::Sequence(shape, value.clone()));
    }
    if let Some(shape) = MAPPING_SHAPES.iter().find(|s| s.kind.matches(value)) {
        return Some(Shape::Mapping(shape, value.clone()));
    }
    if matches!(value, Value::Str(_) | Value::Bytes(_)) {
        return Some(Shape::Text(value.clone()));
    }
    None
}

/// Pick exactly one rendering path for `value`.
///
/// Built-in sequences, mappings, and text come first.  Everything else is
/// probed for unsafe size before falling back to opaque rendering.
pub fn classify(value: &Value, limits: &RenderLimits) -> Shape {
    if let Some(shape) = structural(value) {
        return shape;
    }
    if let Value::Object(obj) = value {
        if !obj.overrides_repr() {
            // Only a built-in base counts; objects wrapping objects stay opaque.
            if let Some(shape) = obj.base_value().as_ref().and_then(structural) {
                return shape;
            }
        }
    }
    if is_long_iter(value, 0, limits) {
        return Shape::LongIterable;
    }
    Shape::Opaque
}
