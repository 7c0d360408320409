//! [`GridAdapter`] over the JavaScript grid API object.
//!
//! The API object only exists once the grid reports ready, so the adapter
//! starts detached. Until then transactions are dropped (the rows are
//! pushed in full on attach) and reads fail.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use super::grid::GridAdapter;
use super::lock::EditMode;
use crate::error::{ReconGridError, Result};
use crate::types::{Record, RowTransaction};

/// Handle to the grid library's API object.
#[derive(Default)]
pub struct JsGridApi {
    api: Option<JsValue>,
}

fn js_err(e: &JsValue) -> ReconGridError {
    ReconGridError::Grid(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

/// Serialize with plain objects instead of JS `Map`s.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| ReconGridError::Grid(e.to_string()))
}

impl JsGridApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, api: JsValue) {
        self.api = Some(api);
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.api.is_some()
    }

    fn method(&self, name: &str) -> Result<Option<(&JsValue, Function)>> {
        let Some(api) = self.api.as_ref() else {
            return Ok(None);
        };
        let f = Reflect::get(api, &JsValue::from_str(name)).map_err(|e| js_err(&e))?;
        let f = f
            .dyn_into::<Function>()
            .map_err(|_| ReconGridError::Grid(format!("grid api has no {name}()")))?;
        Ok(Some((api, f)))
    }
}

impl GridAdapter for JsGridApi {
    fn set_rows(&mut self, rows: &[Record]) -> Result<()> {
        let Some((api, f)) = self.method("setGridOption")? else {
            return Ok(());
        };
        f.call2(api, &JsValue::from_str("rowData"), &to_js(rows)?)
            .map_err(|e| js_err(&e))?;
        Ok(())
    }

    fn apply_transaction(&mut self, transaction: &RowTransaction) -> Result<()> {
        let Some((api, f)) = self.method("applyTransaction")? else {
            return Ok(());
        };
        f.call1(api, &to_js(transaction)?).map_err(|e| js_err(&e))?;
        Ok(())
    }

    fn rows(&self) -> Result<Vec<Record>> {
        let Some((api, f)) = self.method("forEachNode")? else {
            return Err(ReconGridError::Grid("grid not ready".into()));
        };

        let collected: Rc<RefCell<Vec<JsValue>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&collected);
        let visit = Closure::<dyn FnMut(JsValue)>::new(move |node: JsValue| {
            // Group nodes carry no data
            if let Ok(data) = Reflect::get(&node, &JsValue::from_str("data")) {
                if data.is_object() {
                    sink.borrow_mut().push(data);
                }
            }
        });
        f.call1(api, visit.as_ref().unchecked_ref())
            .map_err(|e| js_err(&e))?;
        drop(visit);

        let values = collected.take();
        values
            .into_iter()
            .map(|v| {
                serde_wasm_bindgen::from_value::<Record>(v)
                    .map_err(|e| ReconGridError::Grid(e.to_string()))
            })
            .collect()
    }

    fn export_spreadsheet(&mut self, file_name: &str) -> Result<()> {
        let Some((api, f)) = self.method("exportDataAsExcel")? else {
            return Err(ReconGridError::Grid("grid not ready".into()));
        };
        let params = Object::new();
        Reflect::set(
            &params,
            &JsValue::from_str("fileName"),
            &JsValue::from_str(file_name),
        )
        .map_err(|e| js_err(&e))?;
        f.call1(api, &params).map_err(|e| js_err(&e))?;
        Ok(())
    }

    fn set_edit_mode(&mut self, mode: EditMode) -> Result<()> {
        let Some((api, get)) = self.method("getGridOption")? else {
            return Ok(());
        };
        let key = JsValue::from_str("defaultColDef");
        let current = get.call1(api, &key).map_err(|e| js_err(&e))?;

        // Copy so the grid sees a new object and re-reads the column defaults
        let col_def = if current.is_object() {
            Object::assign(&Object::new(), current.unchecked_ref())
        } else {
            Object::new()
        };
        Reflect::set(
            &col_def,
            &JsValue::from_str("editable"),
            &JsValue::from_bool(mode.cells_editable),
        )
        .map_err(|e| js_err(&e))?;

        let Some((api, set)) = self.method("setGridOption")? else {
            return Ok(());
        };
        set.call2(api, &key, &col_def).map_err(|e| js_err(&e))?;
        Ok(())
    }
}
