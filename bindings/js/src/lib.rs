use json2sql::{Compiler, Options};
use wasm_bindgen::prelude::*;

fn compiler(with_union: bool, sanitize: bool) -> Compiler {
    Compiler::new(Options {
        with_union,
        with_sanitized_injection: sanitize,
        ..Options::default()
    })
}

#[wasm_bindgen]
pub fn build(input: &str, with_union: bool, sanitize: bool) -> Result<String, String> {
    compiler(with_union, sanitize)
        .build_json(input)
        .map_err(|e| e.to_string())
}

/// Returns `{"sql": "...", "params": [...]}` as a JSON string.
#[wasm_bindgen]
pub fn generate(input: &str, with_union: bool, sanitize: bool) -> Result<String, String> {
    let statement = compiler(with_union, sanitize)
        .generate_json(input)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&statement).map_err(|e| e.to_string())
}
