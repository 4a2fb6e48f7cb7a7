//! # saferepr — bounded, total rendering of untrusted values
//!
//! Produce a short, human-readable representation of any runtime value for a
//! debugger's variable view.  Rendering never fails, never loops, and never
//! emits unbounded output, whatever the value: self-referential containers,
//! huge collections, huge strings, and host objects whose repr, length, or
//! iteration hooks fail or lie.
//!
//! ```
//! use saferepr::{safe_repr, Value};
//!
//! let v = Value::list(vec![Value::from(1), Value::from("two"), Value::None]);
//! assert_eq!(safe_repr(&v, false), "[1, 'two', None]");
//! assert_eq!(safe_repr(&Value::from(42), true), "0x2a");
//! ```
//!
//! Limits are fixed per renderer.  [`safe_repr`] uses the defaults: text cut
//! to 65536 characters at the top level and 30 when nested, containers
//! expanded to 15 items at depth 0 and 10 at depth 1, and `...` beyond.

pub mod config;
pub mod constants;
pub mod errors;
pub mod json_adapter;
pub mod literal;
mod order;
pub mod probe;
pub mod render;
pub mod shape;
pub mod value;

pub use config::RenderLimits;
pub use errors::{Error, HookError};
pub use json_adapter::value_from_json;
pub use render::SafeRepr;
pub use value::{HostObject, RangeValue, Value, ValueIter};

/// Render `value` with the default limits.
///
/// With `hex` set, integers render as `0x2a`.  Always returns a string.
pub fn safe_repr(value: &Value, hex: bool) -> String {
    SafeRepr::default().render(value, hex)
}
