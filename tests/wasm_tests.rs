//! Browser-side tests of the exported bindings.
//!
//! Run with: wasm-pack test --headless --firefox
#![cfg(target_arch = "wasm32")]
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp
)]

use recon_grid::{compare_amounts, format_amount, row_class, version, ReconGrid};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn options(polarity: &str) -> JsValue {
    js_sys::JSON::parse(&format!(r#"{{"lockPolarity":"{polarity}"}}"#)).unwrap()
}

fn inputs(data: &str, lock: &str) -> JsValue {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"inputData".into(), &data.into()).unwrap();
    js_sys::Reflect::set(&obj, &"gridLock".into(), &lock.into()).unwrap();
    obj.into()
}

#[wasm_bindgen_test]
fn test_format_amount_binding() {
    assert_eq!(format_amount(JsValue::from_f64(-150.0)), "(150)");
    assert_eq!(format_amount(JsValue::from_str("1234.5")), "1,234.5");
    assert_eq!(format_amount(JsValue::NULL), "");
}

#[wasm_bindgen_test]
fn test_compare_amounts_binding() {
    assert_eq!(compare_amounts(JsValue::from_str("(50)"), JsValue::from_f64(-50.0)), 0);
    assert_eq!(compare_amounts(JsValue::from_str(""), JsValue::from_f64(-5.0)), -1);
    assert_eq!(compare_amounts(JsValue::from_f64(10.0), JsValue::from_str("(5)")), 1);
}

#[wasm_bindgen_test]
fn test_row_class_binding() {
    assert_eq!(row_class("New-1-A").as_deref(), Some("row-new"));
    assert_eq!(row_class("A"), None);
}

#[wasm_bindgen_test]
fn test_version() {
    assert!(!version().is_empty());
}

#[wasm_bindgen_test]
fn test_options_without_polarity_rejected() {
    assert!(ReconGrid::new(js_sys::Object::new().into()).is_err());
}

#[wasm_bindgen_test]
fn test_widget_split_before_grid_ready() {
    let mut widget = ReconGrid::new(options("editableWhenFalse")).unwrap();
    let data = r#"[{"FactRecID":"A","Amount":"100"},{"FactRecID":"B","Amount":"-40"}]"#;
    assert!(widget.update_inputs(inputs(data, "false")).unwrap());
    assert!(!widget.is_locked());

    assert!(widget.split_amount(Some("A".into()), Some(30.0)).unwrap());
    assert_eq!(
        widget.record_edited("B".into(), js_sys::Object::new().into()).unwrap(),
        "Updated-2-B"
    );
}

fn call(options: &JsValue, path: &[&str], args: &[JsValue]) -> JsValue {
    let mut target = options.clone();
    for key in path {
        target = js_sys::Reflect::get(&target, &(*key).into()).unwrap();
    }
    assert!(target.is_function(), "{path:?} should be a function");
    let f: js_sys::Function = target.into();
    let args: js_sys::Array = args.iter().collect();
    f.apply(&JsValue::NULL, &args).unwrap()
}

fn params(key: &str, value: &str) -> JsValue {
    js_sys::JSON::parse(&format!(r#"{{"{key}":{value}}}"#)).unwrap()
}

#[wasm_bindgen_test]
fn test_grid_options_carry_live_callbacks() {
    let mut widget = ReconGrid::new(options("editableWhenFalse")).unwrap();
    let data = r#"[{"FactRecID":"A","Amount":"100"},{"FactRecID":42,"Amount":"-40"}]"#;
    widget.update_inputs(inputs(data, "false")).unwrap();
    let grid_options = widget.grid_options().unwrap();

    let row_id = call(&grid_options, &["getRowId"], &[params("data", r#"{"FactRecID":"A"}"#)]);
    assert_eq!(row_id.as_string().as_deref(), Some("A"));
    let numeric = call(&grid_options, &["getRowId"], &[params("data", r#"{"FactRecID":42}"#)]);
    assert_eq!(numeric.as_string().as_deref(), Some("42"));

    let currency = ["columnTypes", "currencyColumn"];
    let formatted = call(
        &grid_options,
        &[currency[0], currency[1], "valueFormatter"],
        &[params("value", "-150")],
    );
    assert_eq!(formatted.as_string().as_deref(), Some("(150)"));

    let order = call(
        &grid_options,
        &[currency[0], currency[1], "comparator"],
        &[JsValue::from_str("(50)"), JsValue::from_f64(-50.0)],
    );
    assert_eq!(order.as_f64(), Some(0.0));
}
