//! SVG scene → PNG bytes.
//!
//! On the web the scene is decoded through a Blob-backed image and drawn to
//! an offscreen canvas; on desktop it is rendered directly with resvg. Both
//! paths honour the same scale policy: exports are captured at up to 3×, but
//! never letting either pixel dimension exceed the raster bound.

use super::scene::Scene;

/// Neither output dimension may exceed this many pixels.
pub const MAX_RASTER_SIDE: f64 = 6000.0;
/// Upper bound on the capture scale factor.
pub const MAX_RASTER_SCALE: f64 = 3.0;
/// Fixed scale for the charts capture.
pub const CHARTS_RASTER_SCALE: f64 = 2.0;

/// Largest scale that keeps `width × height` within the raster bound,
/// capped at [`MAX_RASTER_SCALE`].
pub fn capped_scale(width: f64, height: f64) -> f64 {
    let longest = width.max(height).max(1.0);
    MAX_RASTER_SCALE.min(MAX_RASTER_SIDE / longest)
}

/// Rasterizes a scene at the given scale.
pub async fn scene_to_png(scene: &Scene, scale: f64) -> Result<Vec<u8>, String> {
    #[cfg(target_arch = "wasm32")]
    {
        scene_to_png_web(scene, scale).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        scene_to_png_desktop(scene, scale)
    }
}

#[cfg(target_arch = "wasm32")]
async fn scene_to_png_web(scene: &Scene, scale: f64) -> Result<Vec<u8>, String> {
    use base64::Engine;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url};

    let mut opts = BlobPropertyBag::new();
    opts.type_("image/svg+xml");
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&scene.svg));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| "Unable to build SVG blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Unable to create SVG URL".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")?;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| "Unable to create canvas")?
        .dyn_into()
        .map_err(|_| "Canvas cast failed")?;
    let out_w = (scene.width * scale).ceil() as u32;
    let out_h = (scene.height * scale).ceil() as u32;
    canvas.set_width(out_w);
    canvas.set_height(out_h);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| "Canvas context unavailable")?
        .ok_or("Canvas context missing")?
        .dyn_into()
        .map_err(|_| "Context cast failed")?;

    let image = HtmlImageElement::new().map_err(|_| "Unable to create image")?;
    let decode = image.decode();
    image.set_src(&url);
    JsFuture::from(decode)
        .await
        .map_err(|_| "Image decode failed")?;

    context
        .draw_image_with_html_image_element_and_dw_and_dh(
            &image,
            0.0,
            0.0,
            out_w as f64,
            out_h as f64,
        )
        .map_err(|_| "Unable to draw image")?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| "Unable to serialise canvas")?;
    Url::revoke_object_url(&url).ok();

    let payload = data_url.split(',').nth(1).ok_or("Malformed data URL")?;
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| "PNG decode failed".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn scene_to_png_desktop(scene: &Scene, scale: f64) -> Result<Vec<u8>, String> {
    use std::sync::Arc;

    let mut fonts = fontdb::Database::new();
    fonts.load_system_fonts();

    let mut options = usvg::Options::default();
    options.fontdb = Arc::new(fonts);

    let tree = usvg::Tree::from_str(&scene.svg, &options)
        .map_err(|err| format!("SVG parse failed: {err}"))?;

    let out_w = (scene.width * scale).ceil() as u32;
    let out_h = (scene.height * scale).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(out_w.max(1), out_h.max(1))
        .ok_or("Unable to allocate pixmap")?;
    pixmap.fill(tiny_skia::Color::WHITE);

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale as f32, scale as f32),
        &mut pixmap.as_mut(),
    );

    pixmap
        .encode_png()
        .map_err(|err| format!("PNG encode failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_scenes_capture_at_full_cap() {
        assert_eq!(capped_scale(1200.0, 720.0), 3.0);
    }

    #[test]
    fn oversized_scenes_scale_down_to_the_bound() {
        let scale = capped_scale(4000.0, 900.0);
        assert!(scale < 3.0);
        assert!((4000.0 * scale - MAX_RASTER_SIDE).abs() < 1e-6);
    }

    #[test]
    fn scale_never_exceeds_the_cap_even_for_tiny_scenes() {
        assert_eq!(capped_scale(10.0, 10.0), MAX_RASTER_SCALE);
    }
}
