//! Rendering of built-in values through the public API.
//!
//! Covers the basic forms, container truncation, the depth ceiling,
//! self-containment, and stable mapping order.

use saferepr::*;

fn ints(range: std::ops::Range<i64>) -> Vec<Value> {
    range.map(Value::from).collect()
}

fn joined(range: std::ops::Range<i64>) -> String {
    range.map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

// ── Scalars ─────────────────────────────────────────────────

#[test]
fn int_plain_and_hex() {
    assert_eq!(safe_repr(&Value::from(42), false), "42");
    assert_eq!(safe_repr(&Value::from(42), true), "0x2a");
    assert_eq!(safe_repr(&Value::from(-42), true), "-0x2a");
}

#[test]
fn scalar_forms() {
    assert_eq!(safe_repr(&Value::None, false), "None");
    assert_eq!(safe_repr(&Value::from(true), false), "True");
    assert_eq!(safe_repr(&Value::from(2.5), false), "2.5");
    assert_eq!(safe_repr(&Value::from(3.0), false), "3.0");
    assert_eq!(safe_repr(&Value::range(0, 10, 1), false), "range(0, 10)");
    assert_eq!(safe_repr(&Value::from("hi"), false), "'hi'");
    assert_eq!(safe_repr(&Value::bytes(b"hi"), false), "b'hi'");
}

#[test]
fn hex_mode_leaves_text_and_floats_alone() {
    let v = Value::list(vec![
        Value::from(255),
        Value::from("ff"),
        Value::from(1.5),
        Value::from(true),
    ]);
    assert_eq!(safe_repr(&v, true), "[0xff, 'ff', 1.5, 0x1]");
}

// ── Sequences ───────────────────────────────────────────────

#[test]
fn list_of_three() {
    let v = Value::list(ints(1..4));
    assert_eq!(safe_repr(&v, false), "[1, 2, 3]");
}

#[test]
fn sequence_delimiters() {
    assert_eq!(safe_repr(&Value::tuple(ints(1..3)), false), "(1, 2)");
    assert_eq!(safe_repr(&Value::set(ints(1..3)), false), "{1, 2}");
    assert_eq!(safe_repr(&Value::frozenset(ints(1..2)), false), "frozenset({1})");
    assert_eq!(safe_repr(&Value::deque(ints(1..3)), false), "deque([1, 2])");
}

#[test]
fn single_element_tuple_gets_trailing_comma() {
    assert_eq!(safe_repr(&Value::tuple(ints(1..2)), false), "(1,)");
    assert_eq!(safe_repr(&Value::tuple(vec![]), false), "()");
    assert_eq!(safe_repr(&Value::list(ints(1..2)), false), "[1]");
}

#[test]
fn long_list_stops_after_fifteen_items() {
    let v = Value::list(ints(0..100));
    assert_eq!(safe_repr(&v, false), format!("[{}, ...]", joined(0..15)));
}

#[test]
fn list_at_exact_limit_is_not_truncated() {
    let v = Value::list(ints(0..15));
    assert_eq!(safe_repr(&v, false), format!("[{}]", joined(0..15)));
}

#[test]
fn nested_list_uses_depth_one_limit() {
    let v = Value::list(vec![Value::list(ints(0..20))]);
    assert_eq!(safe_repr(&v, false), format!("[[{}, ...]]", joined(0..10)));
}

#[test]
fn truncated_tuple_has_no_trailing_comma() {
    let limits = RenderLimits::new(100, 30, 100, 30, vec![1]).unwrap();
    let v = Value::tuple(ints(0..2));
    assert_eq!(SafeRepr::new(limits).render(&v, false), "(0, ...)");
}

#[test]
fn output_does_not_grow_with_input_size() {
    let small = safe_repr(&Value::list(ints(0..20)), false);
    let huge = safe_repr(&Value::list(ints(0..1_000_000)), false);
    assert_eq!(small, huge);
}

// ── Depth ceiling ───────────────────────────────────────────

#[test]
fn containers_past_the_ceiling_collapse() {
    let v = Value::list(vec![Value::list(vec![Value::list(ints(1..2))])]);
    assert_eq!(safe_repr(&v, false), "[[[...]]]");

    let d = Value::dict(vec![(
        "k".into(),
        Value::dict(vec![("x".into(), Value::dict(vec![("y".into(), 1.into())]))]),
    )]);
    assert_eq!(safe_repr(&d, false), "{'k': {'x': {...}}}");
}

#[test]
fn empty_mapping_past_the_ceiling_is_still_empty() {
    let d = Value::list(vec![Value::list(vec![Value::dict(vec![])])]);
    assert_eq!(safe_repr(&d, false), "[[{}]]");
}

#[test]
fn mapping_past_the_ceiling_is_not_read() {
    let entries = (0..100_000).map(|i| (Value::from(i), Value::None)).collect();
    let big = Value::list(vec![Value::list(vec![Value::dict(entries)])]);
    assert_eq!(safe_repr(&big, false), "[[{...}]]");

    let d = Value::dict(vec![(1.into(), 2.into())]);
    let v = Value::list(vec![Value::list(vec![d.clone()])]);
    if let Value::Dict(cell) = &d {
        let _guard = cell.borrow_mut();
        assert_eq!(safe_repr(&v, false), "[[{...}]]");
    }
}

// ── Self-containment and cycles ─────────────────────────────

#[test]
fn list_containing_itself() {
    let c = Value::list(vec![Value::from(1)]);
    assert!(c.append(c.clone()));
    assert_eq!(safe_repr(&c, false), "[1, [...]]");
}

#[test]
fn dict_containing_itself() {
    let d = Value::dict(vec![]);
    assert!(d.insert("self".into(), d.clone()));
    assert_eq!(safe_repr(&d, false), "{'self': {...}}");
}

#[test]
fn dict_keyed_by_itself() {
    let d = Value::dict(vec![]);
    assert!(d.insert(d.clone(), 1.into()));
    assert_eq!(safe_repr(&d, false), "{{...}: 1}");
}

#[test]
fn indirect_cycle_is_cut_by_depth() {
    let a = Value::list(vec![]);
    let b = Value::list(vec![a.clone()]);
    assert!(a.append(b));
    assert_eq!(safe_repr(&a, false), "[[[...]]]");
}

// ── Mappings ────────────────────────────────────────────────

#[test]
fn string_keys_render_sorted() {
    let d = Value::dict(vec![("b".into(), 1.into()), ("a".into(), 2.into())]);
    assert_eq!(safe_repr(&d, false), "{'a': 2, 'b': 1}");
    assert_eq!(safe_repr(&d, false), safe_repr(&d, false));
}

#[test]
fn numeric_keys_render_sorted() {
    let d = Value::dict(vec![
        (3.into(), "c".into()),
        (2.5.into(), "b".into()),
        (1.into(), "a".into()),
    ]);
    assert_eq!(safe_repr(&d, false), "{1: 'a', 2.5: 'b', 3: 'c'}");
}

#[test]
fn large_int_keys_order_exactly_against_floats() {
    let d = Value::dict(vec![
        (9_007_199_254_740_993_i64.into(), "above".into()),
        (9_007_199_254_740_992.0.into(), "float".into()),
        (9_007_199_254_740_991_i64.into(), "below".into()),
    ]);
    assert_eq!(
        safe_repr(&d, false),
        "{9007199254740991: 'below', 9007199254740992.0: 'float', 9007199254740993: 'above'}"
    );
}

#[test]
fn mixed_keys_keep_insertion_order() {
    let d = Value::dict(vec![
        ("b".into(), 1.into()),
        (2.into(), "x".into()),
        ("a".into(), 3.into()),
    ]);
    assert_eq!(safe_repr(&d, false), "{'b': 1, 2: 'x', 'a': 3}");
}

#[test]
fn ordered_dict_form() {
    let d = Value::ordered_dict(vec![("b".into(), 2.into()), ("a".into(), 1.into())]);
    assert_eq!(safe_repr(&d, false), "OrderedDict([('a', 1), ('b', 2)])");
    assert_eq!(safe_repr(&Value::ordered_dict(vec![]), false), "OrderedDict([])");
}

#[test]
fn long_mapping_is_truncated() {
    let entries = (0..20).map(|i| (Value::from(i), Value::None)).collect();
    let d = Value::dict(entries);
    let expected: Vec<String> = (0..15).map(|i| format!("{i}: None")).collect();
    assert_eq!(safe_repr(&d, false), format!("{{{}, ...}}", expected.join(", ")));
}

// ── Text and other literals ─────────────────────────────────

#[test]
fn long_text_at_top_level_is_kept() {
    let text = "a".repeat(100);
    assert_eq!(safe_repr(&Value::from(text.as_str()), false), format!("'{text}'"));
}

#[test]
fn long_text_nested_is_spliced() {
    let v = Value::list(vec![Value::from("a".repeat(100))]);
    let out = safe_repr(&v, false);
    let inner = &out[1..out.len() - 1];
    assert_eq!(inner, format!("'{}...{}'", "a".repeat(19), "a".repeat(9)));
    assert!(inner.len() <= 33);
}

#[test]
fn huge_text_at_top_level_is_bounded() {
    let v = Value::from("x".repeat(200_000));
    let out = safe_repr(&v, false);
    assert_eq!(out.chars().count(), 43_690 + 3 + 21_845);
    assert!(out.starts_with("'xxx"));
    assert!(out.ends_with("xxx'"));
}

#[test]
fn nested_big_int_is_spliced() {
    let n: num_bigint::BigInt = "1234567890".repeat(4).parse().unwrap();
    let v = Value::list(vec![Value::big_int(n)]);
    assert_eq!(safe_repr(&v, false), "[12345678901234567890...1234567890]");
}

#[test]
fn custom_limits_apply() {
    let limits = RenderLimits::new(100, 5, 100, 5, vec![2]).unwrap();
    let r = SafeRepr::new(limits);
    assert_eq!(r.render(&Value::list(ints(0..5)), false), "[0, 1, ...]");
    assert_eq!(r.render(&Value::list(vec![Value::list(vec![])]), false), "[[...]]");
    assert_eq!(r.render(&Value::list(vec![Value::from("abcdefgh")]), false), "['ab...']");
}

#[test]
fn empty_size_table_collapses_top_level() {
    let limits = RenderLimits::new(100, 30, 100, 30, vec![]).unwrap();
    let r = SafeRepr::new(limits);
    assert_eq!(r.render(&Value::list(ints(0..3)), false), "[...]");
    assert_eq!(r.render(&Value::dict(vec![(1.into(), 2.into())]), false), "{...}");
}

#[test]
fn debug_uses_safe_rendering() {
    let c = Value::list(vec![]);
    c.append(c.clone());
    assert_eq!(format!("{c:?}"), "[[...]]");
}

#[test]
fn renderer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SafeRepr>();
    assert_send_sync::<RenderLimits>();
}
