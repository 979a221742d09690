//! WASM-facing entry points for the shape configurator.
//!
//! This crate is compiled to a `cdylib` and consumed from JavaScript via
//! `wasm-bindgen`. Native tests interact with the `*_internal` helpers,
//! which return Rust errors and never touch a JS host.
//!
//! ```
//! let names = configurator_wasm::shape_options_internal().unwrap();
//! assert!(names.contains("capped cylinder"));
//! ```

use config::constants::DEFAULT_MESH_SCALE;
use configurator_mesh::catalog::{default_values, schema, ShapeKind};
use configurator_mesh::{build_named, BuildOptions, MeshError, ParameterValues, TextureCache};
use thiserror::Error;
use wasm_bindgen::prelude::*;

mod mesh_handle;

pub use mesh_handle::MeshHandle;

/// Errors surfaced by the host-side helpers.
#[derive(Debug, Error)]
pub enum BindingError {
    #[error(transparent)]
    Mesh(#[from] MeshError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn to_js(err: BindingError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Installs a panic hook that forwards Rust panics to the browser console.
///
/// # Examples
/// ```no_run
/// // In JavaScript: import and call once at startup.
/// // import { init_panic_hook } from "configurator-wasm";
/// // init_panic_hook();
/// ```
#[wasm_bindgen]
pub fn init_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Returns the scale a freshly loaded viewer starts with.
///
/// # Examples
/// ```
/// assert_eq!(configurator_wasm::default_mesh_scale(), 1.0);
/// ```
#[wasm_bindgen]
pub fn default_mesh_scale() -> f64 {
    DEFAULT_MESH_SCALE
}

/// Returns the shape names as a JSON array, in menu order.
#[wasm_bindgen]
pub fn shape_options() -> Result<String, JsValue> {
    shape_options_internal().map_err(to_js)
}

/// Host-only helper behind [`shape_options`].
pub fn shape_options_internal() -> Result<String, BindingError> {
    let names: Vec<&str> = ShapeKind::ALL.iter().map(|kind| kind.name()).collect();
    Ok(serde_json::to_string(&names)?)
}

/// Returns the parameter schema of a shape as a JSON array of
/// `{name, min, max, step, default}` objects.
///
/// # Errors
/// Returns a JavaScript error for an unknown shape name.
#[wasm_bindgen]
pub fn shape_schema(shape_type: &str) -> Result<String, JsValue> {
    shape_schema_internal(shape_type).map_err(to_js)
}

/// Host-only helper behind [`shape_schema`].
///
/// # Examples
/// ```
/// let json = configurator_wasm::shape_schema_internal("capped square").unwrap();
/// assert!(json.contains("\"width\""));
/// ```
pub fn shape_schema_internal(shape_type: &str) -> Result<String, BindingError> {
    let kind: ShapeKind = shape_type.parse()?;
    Ok(serde_json::to_string(schema(kind))?)
}

/// Returns the default parameters of a shape as a JSON object.
#[wasm_bindgen]
pub fn default_params(shape_type: &str) -> Result<String, JsValue> {
    default_params_internal(shape_type).map_err(to_js)
}

/// Host-only helper behind [`default_params`].
pub fn default_params_internal(shape_type: &str) -> Result<String, BindingError> {
    let kind: ShapeKind = shape_type.parse()?;
    Ok(serde_json::to_string(&default_values(kind))?)
}

/// Builds a shape and returns its buffers, or `undefined` for an unknown
/// shape name.
///
/// `params_json` is an object of parameter values; keys it omits take the
/// shape's defaults. `options_json` holds `meshScale` and `useUVTest` and
/// may be empty.
///
/// # Errors
/// Returns a JavaScript error for malformed JSON or invalid values.
///
/// # Examples
/// ```no_run
/// // In JavaScript:
/// // const mesh = build_shape("capped octagon", '{"radius": 3}', '{"meshScale": 2}');
/// // if (mesh) console.log(mesh.triangle_count);
/// ```
#[wasm_bindgen]
pub fn build_shape(
    shape_type: &str,
    params_json: &str,
    options_json: &str,
) -> Result<Option<MeshHandle>, JsValue> {
    build_shape_internal(shape_type, params_json, options_json).map_err(to_js)
}

/// Host-only helper behind [`build_shape`].
pub fn build_shape_internal(
    shape_type: &str,
    params_json: &str,
    options_json: &str,
) -> Result<Option<MeshHandle>, BindingError> {
    let provided: ParameterValues = parse_or_default(params_json)?;
    let options: BuildOptions = parse_or_default(options_json)?;

    let values = match shape_type.parse::<ShapeKind>() {
        Ok(kind) => {
            let mut values = default_values(kind);
            for (name, value) in provided.iter() {
                values.set(name, value);
            }
            values
        }
        Err(_) => provided,
    };

    let built = build_named(shape_type, &values, &options, &TextureCache::new())?;
    Ok(built.as_ref().map(MeshHandle::from_renderable))
}

fn parse_or_default<T>(json: &str) -> Result<T, BindingError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if json.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(serde_json::from_str(json)?)
}
