//! PNG export: the scene goes out as SVG, is decoded by the browser as an
//! image, drawn onto an offscreen canvas of the scene's size and downloaded.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::browser;
use super::scene::Scene;
use super::svg;
use crate::error::{DiagramError, Result};

/// Download name for exported images.
pub const IMAGE_FILE_NAME: &str = "network-diagram.png";

fn encode_png(image: &HtmlImageElement, width: u32, height: u32) -> Result<String> {
	let canvas: HtmlCanvasElement = browser::document()?
		.create_element("canvas")?
		.dyn_into()
		.map_err(|_| DiagramError::Export("could not create canvas".into()))?;
	canvas.set_width(width);
	canvas.set_height(height);
	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or_else(|| DiagramError::Export("2d context unavailable".into()))?
		.dyn_into()
		.map_err(|_| DiagramError::Export("2d context unavailable".into()))?;
	ctx.draw_image_with_html_image_element(image, 0.0, 0.0)?;
	canvas
		.to_data_url_with_type("image/png")
		.map_err(|err| DiagramError::Export(format!("{:?}", err)))
}

/// Starts rasterizing `scene`; `on_done` runs once the download was offered
/// or the export failed. Nothing is downloaded on failure.
pub fn export_png(scene: &Scene, on_done: impl FnOnce(Result<()>) + 'static) -> Result<()> {
	let (width, height) = (scene.width.round() as u32, scene.height.round() as u32);
	let source = format!(
		"data:image/svg+xml;charset=utf-8,{}",
		String::from(js_sys::encode_uri_component(&svg::to_svg(scene)))
	);

	let image = HtmlImageElement::new()?;
	let settled = Rc::new(RefCell::new(Some(on_done)));

	let (image_load, settled_load) = (image.clone(), settled.clone());
	let onload = Closure::once_into_js(move || {
		let outcome = encode_png(&image_load, width, height)
			.and_then(|png| browser::download(&png, IMAGE_FILE_NAME));
		if let Some(done) = settled_load.borrow_mut().take() {
			done(outcome);
		}
	});
	let onerror = Closure::once_into_js(move || {
		if let Some(done) = settled.borrow_mut().take() {
			done(Err(DiagramError::Export("could not decode diagram image".into())));
		}
	});

	image.set_onload(Some(onload.unchecked_ref()));
	image.set_onerror(Some(onerror.unchecked_ref()));
	image.set_src(&source);
	Ok(())
}
