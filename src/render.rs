//! The bounded-safe renderer.
//!
//! One recursive routine walks the value, appending fragments to a single
//! buffer.  Depth is tracked per call in a [`RenderContext`]; there is no
//! identity table.  Direct self-containment is cut off by rendering the
//! element at [`SELF_CONTAINMENT_DEPTH`], which is past the depth ceiling.
//! Indirect cycles (A holds B holds A) are bounded only by the ceiling.
//!
//! Failures inside the walk travel up as `HookError` and panics raised by
//! host hooks are caught at the entry point; either way the caller gets a
//! diagnostic string, never an error.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::config::RenderLimits;
use crate::constants::*;
use crate::errors::HookError;
use crate::literal;
use crate::order::stable_order;
use crate::shape::{classify, MappingShape, SequenceShape, Shape};
use crate::value::Value;

/// Per-call state.  Copied into each recursive call, never shared.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub depth: usize,
    pub hex: bool,
}

impl RenderContext {
    fn root(hex: bool) -> Self {
        Self { depth: 0, hex }
    }

    /// Context for an element of the container being rendered.
    fn child(self, element: &Value, container: &Value, owner: &Value) -> Self {
        let depth = if element.is_same(container) || element.is_same(owner) {
            SELF_CONTAINMENT_DEPTH
        } else {
            self.depth + 1
        };
        Self { depth, ..self }
    }
}

/// Renders values under fixed [`RenderLimits`].
///
/// Holds no state besides its limits, so one instance can serve any number
/// of renders, from any thread.
#[derive(Debug, Clone, Default)]
pub struct SafeRepr {
    limits: RenderLimits,
}

impl SafeRepr {
    pub fn new(limits: RenderLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &RenderLimits {
        &self.limits
    }

    /// Render `value`, with integers in hex when `hex` is set.
    ///
    /// Always returns.  If rendering fails the result is
    /// `"An exception was raised: <error>"`.
    ///
    /// Panics raised by host hooks are caught here, but the process-wide
    /// panic hook still runs first and by default prints each one to stderr.
    /// Embedders that render untrusted objects often should install a quiet
    /// hook with [`std::panic::set_hook`].
    pub fn render(&self, value: &Value, hex: bool) -> String {
        let attempt = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut out = String::new();
            self.repr(value, RenderContext::root(hex), &mut out).map(|()| out)
        }));

        match attempt {
            Ok(Ok(out)) => out,
            Ok(Err(err)) => {
                warn!(%err, "render failed");
                format!("{EXCEPTION_RAISED}: {err}")
            }
            Err(payload) => match panic_message(&*payload) {
                Some(message) => {
                    warn!(%message, "host hook panicked during render");
                    format!("{EXCEPTION_RAISED}: {message}")
                }
                None => {
                    warn!("host hook panicked during render");
                    EXCEPTION_RAISED.to_owned()
                }
            },
        }
    }

    fn repr(&self, value: &Value, ctx: RenderContext, out: &mut String) -> Result<(), HookError> {
        match classify(value, &self.limits) {
            Shape::Sequence(shape, container) => {
                self.repr_sequence(value, &container, shape, ctx, out)
            }
            Shape::Mapping(shape, container) => {
                self.repr_mapping(value, &container, shape, ctx, out)
            }
            Shape::Text(text) => {
                self.repr_text(&text, ctx, out);
                Ok(())
            }
            Shape::LongIterable => {
                out.push_str(&long_iter_summary(value, ctx.hex));
                Ok(())
            }
            Shape::Opaque => {
                self.repr_other(value, ctx, out);
                Ok(())
            }
        }
    }

    // ── Containers ───────────────────────────────────────────

    fn repr_sequence(
        &self,
        owner: &Value,
        container: &Value,
        shape: &SequenceShape,
        ctx: RenderContext,
        out: &mut String,
    ) -> Result<(), HookError> {
        out.push_str(shape.prefix);

        let Some(limit) = self.limits.collection_limit(ctx.depth) else {
            out.push_str(ELLIPSIS);
            out.push_str(shape.suffix);
            return Ok(());
        };

        let mut emitted = 0;
        let mut truncated = false;
        // Items are fetched one at a time so a hook that mutates the
        // container mid-render never meets an outstanding borrow.
        while let Some(item) = container.item_at(emitted)? {
            if emitted > 0 {
                out.push_str(ITEM_SEPARATOR);
            }
            if emitted == limit {
                out.push_str(ELLIPSIS);
                truncated = true;
                break;
            }
            self.repr(&item, ctx.child(&item, container, owner), out)?;
            emitted += 1;
        }

        if shape.comma_after_single && emitted == 1 && !truncated {
            out.push(',');
        }
        out.push_str(shape.suffix);
        Ok(())
    }

    fn repr_mapping(
        &self,
        owner: &Value,
        container: &Value,
        shape: &MappingShape,
        ctx: RenderContext,
        out: &mut String,
    ) -> Result<(), HookError> {
        // Past the ceiling only emptiness is checked; no key is copied.
        let Some(limit) = self.limits.collection_limit(ctx.depth) else {
            out.push_str(shape.prefix);
            if !container.map_is_empty() {
                out.push_str(ELLIPSIS);
            }
            out.push_str(shape.suffix);
            return Ok(());
        };

        let keys = container.map_keys()?;
        out.push_str(shape.prefix);
        for (emitted, index) in stable_order(&keys).into_iter().enumerate() {
            if emitted > 0 {
                out.push_str(ITEM_SEPARATOR);
            }
            if emitted == limit {
                out.push_str(ELLIPSIS);
                break;
            }

            let key = &keys[index];
            out.push_str(shape.item_prefix);
            self.repr(key, ctx.child(key, container, owner), out)?;
            out.push_str(shape.item_separator);

            // Rendering the key ran host hooks, which may have changed the
            // mapping; look the value up afresh.
            match container.map_lookup(key, index) {
                Ok(item) => self.repr(&item, ctx.child(&item, container, owner), out)?,
                Err(err) => {
                    debug!(%err, "mapping value lookup failed");
                    out.push_str(UNKNOWN_VALUE);
                }
            }
            out.push_str(shape.item_suffix);
        }
        out.push_str(shape.suffix);
        Ok(())
    }

    // ── Literals ─────────────────────────────────────────────

    fn repr_text(&self, text: &Value, ctx: RenderContext, out: &mut String) {
        let natural = match text {
            Value::Str(s) => literal::str_repr(s),
            Value::Bytes(b) => literal::bytes_repr(b),
            other => fallback_form(other),
        };
        literal::push_truncated(out, &natural, self.limits.string_limit(ctx.depth));
    }

    fn repr_other(&self, value: &Value, ctx: RenderContext, out: &mut String) {
        let natural = natural_form(value, ctx.hex).unwrap_or_else(|err| {
            debug!(%err, "repr hook failed, using fallback form");
            fallback_form(value)
        });
        literal::push_truncated(out, &natural, self.limits.other_limit(ctx.depth));
    }
}

// ── Natural forms and fallbacks ──────────────────────────────

/// The value's own textual form.  Only host hooks can fail.
fn natural_form(value: &Value, hex: bool) -> Result<String, HookError> {
    if hex {
        if let Some(text) = hex_form(value) {
            return Ok(text);
        }
    }
    let text = match value {
        Value::None => "None".to_owned(),
        Value::Bool(b) => literal::bool_repr(*b).to_owned(),
        Value::Int(i) => i.to_string(),
        Value::BigInt(n) => n.to_string(),
        Value::Float(f) => literal::float_repr(*f),
        Value::Str(s) => literal::str_repr(s),
        Value::Bytes(b) => literal::bytes_repr(b),
        Value::Range(r) => literal::range_repr(r),
        Value::Object(obj) => obj.repr()?,
        // Built-in containers are always classified structurally.
        _ => default_form(value)?,
    };
    Ok(text)
}

fn hex_form(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(literal::int_hex(i64::from(*b))),
        Value::Int(i) => Some(literal::int_hex(*i)),
        Value::BigInt(n) => Some(literal::big_int_hex(n)),
        Value::Object(obj) => obj.int_value().map(|n| literal::big_int_hex(&n)),
        _ => None,
    }
}

/// `<module.TypeName object at 0x..>`, the form every object has before a
/// type customizes it.
fn default_form(value: &Value) -> Result<String, HookError> {
    match value {
        Value::Object(obj) => {
            let module = obj.module()?;
            let name = obj.type_name()?;
            let addr = std::rc::Rc::as_ptr(obj) as *const () as usize;
            Ok(format!("<{module}.{name} object at {addr:#x}>"))
        }
        _ => {
            let name = value.type_name()?;
            Ok(format!("<{name} object>"))
        }
    }
}

/// Used when the natural form failed.  Cannot fail itself.
fn fallback_form(value: &Value) -> String {
    default_form(value)
        .or_else(|_| value.type_name().map(|name| format!("<no repr available for {name}>")))
        .unwrap_or_else(|_| NO_REPR_AVAILABLE.to_owned())
}

/// `<TypeName, length = N>`, falling back to `<TypeName>`.
fn long_iter_summary(value: &Value, hex: bool) -> String {
    let summary = value.type_name().and_then(|name| {
        let len = value
            .length()?
            .ok_or_else(|| HookError::type_error(format!("object of type '{name}' has no len()")))?;
        let len = if hex { literal::usize_hex(len) } else { len.to_string() };
        Ok(format!("<{name}, length = {len}>"))
    });
    summary
        .or_else(|err| {
            debug!(%err, "length unavailable for summary");
            value.type_name().map(|name| format!("<{name}>"))
        })
        .unwrap_or_else(|_| NO_REPR_AVAILABLE.to_owned())
}

fn panic_message(payload: &(dyn Any + Send)) -> Option<String> {
    if let Some(s) = payload.downcast_ref::<&str>() {
        Some((*s).to_owned())
    } else {
        payload.downcast_ref::<String>().cloned()
    }
}
