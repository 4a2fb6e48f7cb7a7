//! Natural textual forms of scalar and text values, plus the head/tail
//! truncation every literal passes through.
//!
//! Text forms follow the usual quoting conventions of a debugger's
//! variable view: `'abc'`, `"it's"`, `b'\x00'`.  Floats use the shortest
//! round-trip digits and switch to exponent form outside `1e-4..1e16`.

use std::fmt::Write;

use num_bigint::{BigInt, Sign};

use crate::constants::ELLIPSIS;
use crate::value::RangeValue;

/// Append `text` to `out`, cut to roughly `limit` characters.
///
/// Text within the limit is copied verbatim.  Longer text keeps its first
/// `max(1, 2*limit/3)` and last `max(1, limit/3)` characters around an
/// ellipsis, so the result may exceed `limit` by up to three characters.
/// Splits on character boundaries.
pub fn push_truncated(out: &mut String, text: &str, limit: usize) {
    let total = text.chars().count();
    if total <= limit {
        out.push_str(text);
        return;
    }

    let head = (2 * limit / 3).max(1);
    let tail = (limit / 3).max(1);

    let head_end = text.char_indices().nth(head).map_or(text.len(), |(i, _)| i);
    let tail_start = text
        .char_indices()
        .rev()
        .nth(tail - 1)
        .map_or(0, |(i, _)| i);

    out.push_str(&text[..head_end]);
    out.push_str(ELLIPSIS);
    out.push_str(&text[tail_start..]);
}

/// Quoted, escaped form of a string.
///
/// Single quotes unless the text contains `'` and no `"`.
pub fn str_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let cp = c as u32;
                // Writing to a String cannot fail.
                let _ = if cp <= 0xff {
                    write!(out, "\\x{cp:02x}")
                } else if cp <= 0xffff {
                    write!(out, "\\u{cp:04x}")
                } else {
                    write!(out, "\\U{cp:08x}")
                };
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// `b'...'` form of a byte string; non-printable bytes become `\xNN`.
pub fn bytes_repr(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') { b'"' } else { b'\'' };
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote as char);
    for &byte in bytes {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b if b == quote => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(byte as char),
            _ => {
                let _ = write!(out, "\\x{byte:02x}");
            }
        }
    }
    out.push(quote as char);
    out
}

pub fn bool_repr(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

pub fn float_repr(f: f64) -> String {
    if f.is_nan() {
        return "nan".to_owned();
    }
    if f.is_infinite() {
        let text = if f > 0.0 { "inf" } else { "-inf" };
        return text.to_owned();
    }

    let sci = format!("{f:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..16).contains(&exp) {
        let plain = f.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{plain}.0")
        }
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
    }
}

pub fn range_repr(r: &RangeValue) -> String {
    if r.step == 1 {
        format!("range({}, {})", r.start, r.stop)
    } else {
        format!("range({}, {}, {})", r.start, r.stop, r.step)
    }
}

pub fn int_hex(i: i64) -> String {
    if i < 0 {
        format!("-{:#x}", i.unsigned_abs())
    } else {
        format!("{i:#x}")
    }
}

pub fn big_int_hex(n: &BigInt) -> String {
    match n.sign() {
        Sign::Minus => format!("-0x{:x}", n.magnitude()),
        _ => format!("0x{:x}", n.magnitude()),
    }
}

pub fn usize_hex(n: usize) -> String {
    format!("{n:#x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn truncated(text: &str, limit: usize) -> String {
        let mut out = String::new();
        push_truncated(&mut out, text, limit);
        out
    }

    #[test]
    fn short_text_is_verbatim() {
        assert_eq!(truncated("hello", 30), "hello");
        assert_eq!(truncated(&"x".repeat(30), 30), "x".repeat(30));
    }

    #[test]
    fn long_text_keeps_head_and_tail() {
        let text: String = ('a'..='z').cycle().take(100).collect();
        let out = truncated(&text, 30);
        assert_eq!(out.len(), 20 + 3 + 10);
        assert!(out.starts_with(&text[..20]));
        assert!(out.ends_with(&text[90..]));
        assert_eq!(&out[20..23], "...");
    }

    #[test]
    fn tiny_limit_keeps_one_char_each_side() {
        assert_eq!(truncated("abcdef", 1), "a...f");
        assert_eq!(truncated("abcdef", 0), "a...f");
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let text = "€".repeat(100);
        let out = truncated(&text, 30);
        assert_eq!(out.chars().count(), 33);
        assert!(out.contains("€...€"));
    }

    #[test]
    fn str_repr_picks_quotes_and_escapes() {
        assert_eq!(str_repr("abc"), "'abc'");
        assert_eq!(str_repr("it's"), "\"it's\"");
        assert_eq!(str_repr("both ' and \""), "'both \\' and \"'");
        assert_eq!(str_repr("a\nb\\"), "'a\\nb\\\\'");
        assert_eq!(str_repr("\u{1}"), "'\\x01'");
    }

    #[test]
    fn bytes_repr_escapes_non_printable() {
        assert_eq!(bytes_repr(b"abc"), "b'abc'");
        assert_eq!(bytes_repr(&[0, 255]), "b'\\x00\\xff'");
        assert_eq!(bytes_repr(b"'"), "b\"'\"");
    }

    #[test]
    fn float_repr_matches_debugger_conventions() {
        assert_eq!(float_repr(1.0), "1.0");
        assert_eq!(float_repr(0.1), "0.1");
        assert_eq!(float_repr(-0.0), "-0.0");
        assert_eq!(float_repr(1e16), "1e+16");
        assert_eq!(float_repr(1.5e-7), "1.5e-07");
        assert_eq!(float_repr(0.0001), "0.0001");
        assert_eq!(float_repr(f64::NAN), "nan");
        assert_eq!(float_repr(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn hex_forms_carry_sign_outside_prefix() {
        assert_eq!(int_hex(42), "0x2a");
        assert_eq!(int_hex(-42), "-0x2a");
        assert_eq!(int_hex(i64::MIN), "-0x8000000000000000");
        assert_eq!(big_int_hex(&BigInt::from(-255)), "-0xff");
        assert_eq!(usize_hex(0), "0x0");
    }

    #[test]
    fn range_repr_omits_unit_step() {
        assert_eq!(range_repr(&RangeValue { start: 0, stop: 10, step: 1 }), "range(0, 10)");
        assert_eq!(range_repr(&RangeValue { start: 0, stop: 10, step: 2 }), "range(0, 10, 2)");
    }
}
