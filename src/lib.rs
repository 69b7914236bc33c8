pub mod column;
pub mod config;
pub mod dmmf;
pub mod enums;
pub mod error;
pub mod generator;
pub mod index;
pub mod logging;
pub mod options;
pub mod relationship;
pub mod rpc;
pub mod schema;
pub mod table;
pub mod text;

use wasm_bindgen::prelude::*;

pub use error::{Error, ErrorKind, Result};
pub use options::RenderOptions;
pub use schema::Schema;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Render a DMMF JSON document as DBML.
pub fn generate(dmmf: &str, opts: &RenderOptions) -> Result<String> {
    let document = dmmf::parse_document(dmmf)?;
    Schema::from_datamodel(&document.datamodel)?.print(opts)
}

/// Render a DMMF JSON document as DBML.
///
/// Many-to-many expansion defaults to on, as in the generator config.
#[wasm_bindgen(js_name = "dmmfToDbml")]
pub fn render_dbml(
    dmmf: &str,
    use_alias: Option<bool>,
    use_native_type: Option<bool>,
    expand_implicit_many_to_many: Option<bool>,
) -> Result<String, String> {
    let opts = RenderOptions::new()
        .use_alias(use_alias.unwrap_or(false))
        .use_native_type(use_native_type.unwrap_or(false))
        .expand_implicit_many_to_many(expand_implicit_many_to_many.unwrap_or(true));

    generate(dmmf, &opts).map_err(|e| e.to_string())
}
