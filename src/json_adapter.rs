//! JSON input: turns a captured JSON payload into a [`Value`] so it renders
//! under the same bounds as a live value.
//!
//! Objects become dicts in document order, keeping the first of any
//! duplicate keys.  Arrays become lists.  Integers that overflow `i64` become
//! big ints; every other number is a float.
//!
//! serde_json's `arbitrary_precision` feature hands numbers to the visitor as
//! a one-entry map holding the raw token, so no digits are lost in transit.

use std::collections::HashSet;
use std::fmt;

use num_bigint::BigInt;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::errors::Error;
use crate::value::Value;

const NUMBER_TOKEN_KEY: &str = "$serde_json::private::Number";

/// Deserialization target; builds the value model directly.
struct Json(Value);

impl<'de> Deserialize<'de> for Json {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(JsonVisitor).map(Json)
    }
}

struct JsonVisitor;

impl<'de> Visitor<'de> for JsonVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON document")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::None)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(i64::try_from(v).map_or_else(|_| Value::big_int(BigInt::from(v)), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(Json(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::list(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        while let Some(key) = map.next_key::<String>()? {
            if seen.is_empty() && key == NUMBER_TOKEN_KEY {
                let token: String = map.next_value()?;
                return Ok(number_value(&token));
            }
            let Json(value) = map.next_value()?;
            if seen.insert(key.clone()) {
                entries.push((Value::from(key), value));
            }
        }
        Ok(Value::dict(entries))
    }
}

fn number_value(token: &str) -> Value {
    let integral = !token.contains(['.', 'e', 'E']);
    if integral {
        if let Ok(i) = token.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(n) = token.parse::<BigInt>() {
            return Value::big_int(n);
        }
    }
    // Tokens serde accepted always parse; overflow gives infinity.
    Value::Float(token.parse::<f64>().unwrap_or(f64::NAN))
}

/// Parse raw UTF-8 JSON bytes into a [`Value`].
///
/// Nesting depth is bounded by serde_json's recursion limit.
pub fn value_from_json(raw: &[u8]) -> Result<Value, Error> {
    let text = std::str::from_utf8(raw).map_err(|_| Error::Utf8)?;
    let Json(value) = serde_json::from_str(text)?;
    Ok(value)
}
