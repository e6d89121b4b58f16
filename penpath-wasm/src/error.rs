use crate::interop::{new_obj, set_kv};
use penpath::{EditError, OutlineError};
use wasm_bindgen::JsValue;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let message = message.into();
    web_sys::console::debug_2(&JsValue::from_str(code), &JsValue::from_str(&message));
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, index: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "index", &JsValue::from_f64(index as f64));
    err("invalid_id", format!("invalid {} index", kind), Some(d.into()))
}

#[inline]
pub fn invalid_mode(got: u8) -> JsValue {
    let d = new_obj(); set_kv(&d, "got", &JsValue::from_f64(got as f64));
    err("invalid_mode", "node type must be 0:Corner, 1:Smooth, 2:Symmetric", Some(d.into()))
}

#[inline]
pub fn invalid_side(got: u8) -> JsValue {
    let d = new_obj(); set_kv(&d, "got", &JsValue::from_f64(got as f64));
    err("invalid_side", "side must be 0:Prev or 1:Next", Some(d.into()))
}

pub fn from_edit(e: &EditError) -> JsValue {
    let d = new_obj();
    match e {
        EditError::IndexOutOfRange { kind, index, len } => {
            set_kv(&d, "kind", &JsValue::from_str(kind));
            set_kv(&d, "index", &JsValue::from_f64(*index as f64));
            set_kv(&d, "len", &JsValue::from_f64(*len as f64));
        }
        EditError::InvalidParameter { param, got } => {
            set_kv(&d, "param", &JsValue::from_str(param));
            set_kv(&d, "got", &JsValue::from_f64(*got));
        }
        EditError::InvalidTopology(_) => {}
    }
    err(e.code(), e.to_string(), Some(d.into()))
}

pub fn from_outline(e: &OutlineError) -> JsValue {
    err(e.code(), e.to_string(), None)
}
