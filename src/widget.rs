//! The WASM-exported widget.
//!
//! `ReconGrid` owns one [`GridSession`] over the JavaScript grid API and is
//! driven by the control's event handlers:
//! - `updateInputs` whenever the host's bound properties change
//! - `attachGrid` from the grid's ready event
//! - `recordEdited` / `splitAmount` from cell-edit and button callbacks
//! - `save` / `exportExcel` from the toolbar

use js_sys::{Function, Number, Reflect};
use serde_json::{Map, Value};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use crate::config::{HostInputs, WidgetOptions};
use crate::error::ReconGridError;
use crate::present::js::to_js;
use crate::present::JsGridApi;
use crate::reconcile::EditOutcome;
use crate::session::GridSession;

/// The main widget struct exported to JavaScript.
#[wasm_bindgen]
pub struct ReconGrid {
    session: GridSession<JsGridApi>,
    on_data_change: Option<Function>,
    callbacks: GridCallbacks,
}

/// Callbacks installed into the grid options; kept alive for the widget's
/// lifetime because the grid calls them long after `gridOptions` returns.
struct GridCallbacks {
    get_row_id: Closure<dyn Fn(JsValue) -> JsValue>,
    format_amount: Closure<dyn Fn(JsValue) -> JsValue>,
    compare_amounts: Closure<dyn Fn(JsValue, JsValue) -> i32>,
}

impl GridCallbacks {
    fn new(identity_field: String) -> Self {
        let field = JsValue::from_str(&identity_field);
        let get_row_id = Closure::<dyn Fn(JsValue) -> JsValue>::new(move |params: JsValue| {
            let id = Reflect::get(&params, &JsValue::from_str("data"))
                .and_then(|data| Reflect::get(&data, &field))
                .unwrap_or(JsValue::UNDEFINED);
            // Same text as String(id) on the JS side: 42, not 42.0
            if id.as_f64().is_some() {
                return id
                    .unchecked_into::<Number>()
                    .to_string(10)
                    .map_or(JsValue::UNDEFINED, JsValue::from);
            }
            JsValue::from_str(&id.as_string().unwrap_or_default())
        });

        let format_amount = Closure::<dyn Fn(JsValue) -> JsValue>::new(|params: JsValue| {
            let value = Reflect::get(&params, &JsValue::from_str("value")).unwrap_or(JsValue::NULL);
            JsValue::from_str(&crate::format_amount(value))
        });

        let compare_amounts =
            Closure::<dyn Fn(JsValue, JsValue) -> i32>::new(|a: JsValue, b: JsValue| {
                crate::compare_amounts(a, b)
            });

        Self {
            get_row_id,
            format_amount,
            compare_amounts,
        }
    }

    /// Replace the named hooks in a serialized options object with functions.
    fn install(&self, options: &JsValue) -> Result<(), JsValue> {
        Reflect::set(options, &"getRowId".into(), self.get_row_id.as_ref())?;

        let currency = Reflect::get(options, &"columnTypes".into())
            .and_then(|types| Reflect::get(&types, &"currencyColumn".into()))?;
        if currency.is_object() {
            Reflect::set(&currency, &"valueFormatter".into(), self.format_amount.as_ref())?;
            Reflect::set(&currency, &"comparator".into(), self.compare_amounts.as_ref())?;
        }
        Ok(())
    }
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

#[wasm_bindgen]
impl ReconGrid {
    /// Create a widget from integrator options (`{ lockPolarity, ... }`).
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<ReconGrid, JsValue> {
        console_error_panic_hook::set_once();
        crate::logging::init(log::LevelFilter::Info);

        let options: WidgetOptions = serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("invalid widget options: {e}")))?;
        let callbacks = GridCallbacks::new(options.reconcile.identity_field.clone());
        Ok(ReconGrid {
            session: GridSession::new(options, JsGridApi::new()),
            on_data_change: None,
            callbacks,
        })
    }

    /// Apply the host's bound properties. Returns true when rows reloaded.
    #[wasm_bindgen(js_name = "updateInputs")]
    pub fn update_inputs(&mut self, inputs: JsValue) -> Result<bool, JsValue> {
        let inputs: HostInputs = serde_wasm_bindgen::from_value(inputs)
            .map_err(|e| JsValue::from_str(&format!("invalid host inputs: {e}")))?;
        Ok(self.session.update_inputs(inputs)?)
    }

    /// Hand over the grid API once the grid is ready.
    #[wasm_bindgen(js_name = "attachGrid")]
    pub fn attach_grid(&mut self, api: JsValue) -> Result<(), JsValue> {
        self.session.grid_mut().attach(api);
        Ok(self.session.sync_grid()?)
    }

    /// Register the host's `onDataChange` callback.
    #[wasm_bindgen(js_name = "setOnDataChange")]
    pub fn set_on_data_change(&mut self, callback: Option<Function>) {
        self.on_data_change = callback;
    }

    /// Grid options object for the current dataset and lock state, with
    /// `getRowId` and the currency formatter and comparator installed.
    #[wasm_bindgen(js_name = "gridOptions")]
    pub fn grid_options(&self) -> Result<JsValue, JsValue> {
        let options = to_js(&self.session.grid_options())?;
        self.callbacks.install(&options)?;
        Ok(options)
    }

    /// Current rows as the reconciler holds them.
    #[wasm_bindgen(js_name = "rowData")]
    pub fn row_data(&self) -> Result<JsValue, JsValue> {
        Ok(to_js(self.session.records())?)
    }

    #[wasm_bindgen(js_name = "isLocked")]
    pub fn is_locked(&self) -> bool {
        self.session.edit_mode().is_locked()
    }

    /// Cell-edit callback. Returns the row's identifier after the edit.
    #[wasm_bindgen(js_name = "recordEdited")]
    pub fn record_edited(&mut self, id: String, values: JsValue) -> Result<String, JsValue> {
        let values: Map<String, Value> = serde_wasm_bindgen::from_value(values)
            .map_err(|e| JsValue::from_str(&format!("invalid row data: {e}")))?;
        let outcome = self.session.record_edited(&id, &values)?;
        Ok(match outcome {
            EditOutcome::Converted { to, .. } => to,
            EditOutcome::Applied { id } | EditOutcome::Ignored { id } => id,
        })
    }

    /// Transfer-button callback.
    ///
    /// Validation problems are shown to the user and reported as `false`.
    #[wasm_bindgen(js_name = "splitAmount")]
    pub fn split_amount(
        &mut self,
        source_id: Option<String>,
        transfer: Option<f64>,
    ) -> Result<bool, JsValue> {
        match self.session.split_amount(source_id.as_deref(), transfer) {
            Ok(_) => Ok(true),
            Err(ReconGridError::Validation(e)) => {
                alert(&e.to_string());
                Ok(false)
            }
            Err(ReconGridError::UnknownRecord(id)) => {
                log::warn!("split for unknown row {id}; ignoring");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Save button: extract rows and hand them to `onDataChange`.
    #[wasm_bindgen]
    pub fn save(&self) -> Result<(), JsValue> {
        let payload = to_js(&self.session.save()?)?;
        if let Some(callback) = &self.on_data_change {
            callback.call1(&JsValue::NULL, &payload)?;
        }
        Ok(())
    }

    /// Save payload as a JSON string.
    #[wasm_bindgen(js_name = "saveJson")]
    pub fn save_json(&self) -> Result<String, JsValue> {
        Ok(self.session.save_json()?)
    }

    /// Export button.
    #[wasm_bindgen(js_name = "exportExcel")]
    pub fn export_excel(&mut self) -> Result<(), JsValue> {
        Ok(self.session.export()?)
    }
}
