//! Default render limits and the fixed marker strings the renderer emits.
//!
//! The limits here are the defaults behind `RenderLimits::default()`.  They
//! bound every render: text is cut to a head/tail splice, and containers are
//! expanded only to `DEFAULT_MAX_COLLECTION_SIZE_PER_DEPTH.len()` levels.

// ── Default limits ───────────────────────────────────────────

/// Text values are cut to this many characters at the outermost level.
pub const DEFAULT_MAX_STRING_OUTER: usize = 1 << 16;

/// Text values nested inside a container are cut to this many characters.
pub const DEFAULT_MAX_STRING_INNER: usize = 30;

/// Same as the string limits, for values that are neither text nor containers.
pub const DEFAULT_MAX_OTHER_OUTER: usize = 1 << 16;
pub const DEFAULT_MAX_OTHER_INNER: usize = 30;

/// Items rendered per container, indexed by nesting depth.  The length of
/// this table is the depth at which containers collapse to `...`.
pub const DEFAULT_MAX_COLLECTION_SIZE_PER_DEPTH: &[usize] = &[15, 10];

/// Depth used for an element that is its own container.  Anything at this
/// depth hits the depth ceiling, so the element can never recurse.
/// A size table must stay shorter than this.
pub const SELF_CONTAINMENT_DEPTH: usize = 100;

// ── Markers ──────────────────────────────────────────────────

/// Stands in for elided text, elided container items, and collapsed levels.
pub const ELLIPSIS: &str = "...";

/// Separator between rendered container items.
pub const ITEM_SEPARATOR: &str = ", ";

/// Emitted in place of a mapping value whose lookup failed.
pub const UNKNOWN_VALUE: &str = "<?>";

/// Last-resort text when neither a repr nor a type name can be produced.
pub const NO_REPR_AVAILABLE: &str = "<no repr available for object>";

/// Prefix of the diagnostic returned when rendering itself failed.
pub const EXCEPTION_RAISED: &str = "An exception was raised";

// ── Probe exemptions ─────────────────────────────────────────

/// Top-level modules whose container types bound their own repr output.
/// Values from these modules are never summarized by the long-iterable probe.
pub const SELF_TRUNCATING_MODULES: &[&str] = &["numpy", "scipy"];
