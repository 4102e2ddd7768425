use pattern_gen::color::parse_hex_list;
use pattern_gen::compositor;
use pattern_gen::export::{encode_png, DEFAULT_EXPORT_NAME};
use pattern_gen::{PatternKind, Raster, RenderParameters};
use wasm_bindgen::prelude::*;

fn to_js(e: pattern_gen::PatternError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Build render parameters from the page controls.
///
/// `params` is `[intensity, randomness, distortion, seed]`; missing entries
/// take their defaults and a missing seed is drawn from `Math.random()`.
fn build_params(
    name: &str,
    colors: &js_sys::Array,
    params: &[f64],
) -> Result<(RenderParameters, u64), JsValue> {
    let pattern: PatternKind = name.parse().map_err(to_js)?;
    let hexes: Vec<String> = colors.iter().filter_map(|v| v.as_string()).collect();
    if hexes.len() != colors.length() as usize {
        return Err(JsValue::from_str("color stops must be strings"));
    }

    let mut p = RenderParameters::new(pattern, parse_hex_list(&hexes).map_err(to_js)?);
    if let Some(&v) = params.first() {
        p.intensity = v;
    }
    if let Some(&v) = params.get(1) {
        p.randomness = v;
    }
    if let Some(&v) = params.get(2) {
        p.distortion = v;
    }
    let seed = match params.get(3) {
        Some(&s) if s.is_finite() && s >= 0.0 => s as u64,
        _ => (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64,
    };
    Ok((p.clamped(), seed))
}

fn render_raster(
    name: &str,
    width: u32,
    height: u32,
    colors: &js_sys::Array,
    params: &[f64],
) -> Result<Raster, JsValue> {
    let (p, seed) = build_params(name, colors, params)?;
    let mut raster = Raster::new(width, height);
    compositor::render_seeded(&mut raster, &p, seed).map_err(to_js)?;
    Ok(raster)
}

/// Render a pattern into an RGBA pixel buffer.
///
/// Returns `width * height * 4` bytes. The TypeScript frontend copies this
/// into an ImageData for canvas display.
#[wasm_bindgen]
pub fn render_pattern(
    name: &str,
    width: u32,
    height: u32,
    colors: js_sys::Array,
    params: &[f64],
) -> Result<Vec<u8>, JsValue> {
    Ok(render_raster(name, width, height, &colors, params)?.into_bytes())
}

/// Render a pattern and encode it as PNG for download.
#[wasm_bindgen]
pub fn render_pattern_png(
    name: &str,
    width: u32,
    height: u32,
    colors: js_sys::Array,
    params: &[f64],
) -> Result<Vec<u8>, JsValue> {
    let raster = render_raster(name, width, height, &colors, params)?;
    encode_png(&raster).map_err(to_js)
}

/// Suggested file name for downloads.
#[wasm_bindgen]
pub fn export_name() -> String {
    DEFAULT_EXPORT_NAME.to_string()
}

/// Get the library version string.
#[wasm_bindgen]
pub fn version() -> String {
    format!("pattern-gen {}", env!("CARGO_PKG_VERSION"))
}

/// Get list of available pattern ids.
#[wasm_bindgen]
pub fn pattern_names() -> String {
    PatternKind::ALL
        .iter()
        .map(|k| k.id())
        .collect::<Vec<_>>()
        .join(",")
}

/// Get the display label for a pattern id.
#[wasm_bindgen]
pub fn pattern_label(name: &str) -> Result<String, JsValue> {
    let kind: PatternKind = name.parse().map_err(to_js)?;
    Ok(kind.label().to_string())
}
