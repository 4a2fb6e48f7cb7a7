//! Long-iterable safety probe.
//!
//! Decides, without fully enumerating, whether a value that is not a
//! built-in container could make the renderer do unbounded work.  Every
//! enumeration here stops after `limit + 1` items, and any hook failure
//! counts as unsafe.

use tracing::debug;

use crate::config::RenderLimits;
use crate::constants::SELF_TRUNCATING_MODULES;
use crate::errors::HookError;
use crate::value::{HostObject, Value};

/// `true` when `value` must be summarized instead of rendered.
pub fn is_long_iter(value: &Value, level: usize, limits: &RenderLimits) -> bool {
    match probe(value, level, limits) {
        Ok(long) => long,
        Err(err) => {
            debug!(%err, "size probe failed, summarizing value");
            true
        }
    }
}

fn probe(value: &Value, level: usize, limits: &RenderLimits) -> Result<bool, HookError> {
    match value {
        // Text never nests, so only its size matters.
        Value::Str(_) | Value::Bytes(_) => {
            let len = value.length()?.unwrap_or(0);
            Ok(len > limits.max_string_inner())
        }

        Value::None | Value::Bool(_) | Value::Int(_) | Value::BigInt(_) | Value::Float(_) => {
            Ok(false)
        }

        // A range's repr never lists its elements.
        Value::Range(_) => Ok(false),

        Value::Object(obj) => probe_object(obj.as_ref(), level, limits),

        Value::List(_)
        | Value::Tuple(_)
        | Value::Set(_)
        | Value::FrozenSet(_)
        | Value::Deque(_)
        | Value::Dict(_)
        | Value::OrderedDict(_) => {
            let Some(limit) = limits.collection_limit(level) else {
                return Ok(true);
            };
            let len = value.length()?.unwrap_or(0);
            if len > limit {
                return Ok(true);
            }
            for index in 0..len {
                let Some(item) = value.item_at(index)? else {
                    break;
                };
                if probe(&item, level + 1, limits)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
    }
}

fn probe_object(
    obj: &dyn HostObject,
    level: usize,
    limits: &RenderLimits,
) -> Result<bool, HookError> {
    // Text subclasses are measured like text.
    if let Some(base @ (Value::Str(_) | Value::Bytes(_))) = obj.base_value() {
        return probe(&base, level, limits);
    }

    if !obj.is_iterable() {
        return Ok(false);
    }

    // Counting a one-shot iterator would consume it, and its repr does not
    // list elements anyway.
    if obj.is_own_iterator() {
        return Ok(false);
    }

    if let Ok(module) = obj.module() {
        let top = module.split('.').next().unwrap_or_default();
        if SELF_TRUNCATING_MODULES.contains(&top) {
            return Ok(false);
        }
    }

    let Some(limit) = limits.collection_limit(level) else {
        return Ok(true);
    };

    // A failing length hook is the same as having none.
    if let Some(Ok(len)) = obj.len() {
        if len > limit {
            return Ok(true);
        }
    }

    // The reported length is not trusted: more than `limit` items is long
    // whatever the hook said.
    for (index, item) in obj.iter()?.enumerate() {
        if index >= limit {
            return Ok(true);
        }
        if probe(&item?, level + 1, limits)? {
            return Ok(true);
        }
    }
    Ok(false)
}
