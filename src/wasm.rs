use wasm_bindgen::prelude::*;

use crate::{Offsets, rewrite};

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Rewrite every CropBox with offsets given as "left,bottom,right,top"
#[wasm_bindgen]
pub fn crop_pdf(data: &[u8], offsets: &str) -> Result<Vec<u8>, JsValue> {
    let offsets: Offsets = offsets
        .parse()
        .map_err(|e| JsValue::from_str(&format!("Offsets error: {}", e)))?;

    rewrite(data, &offsets).map_err(|e| JsValue::from_str(&format!("Rewrite error: {}", e)))
}

/// Rewrite every CropBox with the default offsets
#[wasm_bindgen]
pub fn crop_pdf_default(data: &[u8]) -> Result<Vec<u8>, JsValue> {
    rewrite(data, &Offsets::default())
        .map_err(|e| JsValue::from_str(&format!("Rewrite error: {}", e)))
}
