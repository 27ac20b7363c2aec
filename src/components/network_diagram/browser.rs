//! Thin wrappers over the DOM APIs the diagram needs: notices, downloads and
//! reading a picked file.

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, File, FileReader, HtmlAnchorElement, Window};

use crate::error::{DiagramError, Result};

/// The global window.
pub fn window() -> Result<Window> {
	web_sys::window().ok_or_else(|| DiagramError::Browser("no window".into()))
}

/// The window's document.
pub fn document() -> Result<Document> {
	window()?
		.document()
		.ok_or_else(|| DiagramError::Browser("no document".into()))
}

/// Reports an error to the user with a blocking notice.
pub fn notify(err: &DiagramError) {
	warn!("{}", err);
	if let Ok(window) = window() {
		let _ = window.alert_with_message(&err.to_string());
	}
}

/// `data:` URI carrying JSON text.
pub fn json_data_uri(text: &str) -> String {
	format!(
		"data:application/json;charset=utf-8,{}",
		String::from(js_sys::encode_uri_component(text))
	)
}

/// Offers `href` as a download named `file_name`.
pub fn download(href: &str, file_name: &str) -> Result<()> {
	let anchor: HtmlAnchorElement = document()?
		.create_element("a")?
		.dyn_into()
		.map_err(|_| DiagramError::Browser("could not create link".into()))?;
	anchor.set_href(href);
	anchor.set_download(file_name);
	anchor.click();
	Ok(())
}

/// Reads `file` as text and hands the outcome to `on_done` once the read settles.
pub fn read_text_file(file: &File, on_done: impl FnOnce(Result<String>) + 'static) -> Result<()> {
	let reader = FileReader::new()?;
	let settled = std::rc::Rc::new(std::cell::RefCell::new(Some(on_done)));

	let (reader_load, settled_load) = (reader.clone(), settled.clone());
	let onload = Closure::once_into_js(move || {
		let text = reader_load
			.result()
			.map_err(DiagramError::from)
			.and_then(|value| {
				value
					.as_string()
					.ok_or_else(|| DiagramError::Browser("file is not text".into()))
			});
		if let Some(done) = settled_load.borrow_mut().take() {
			done(text);
		}
	});
	let onerror = Closure::once_into_js(move || {
		if let Some(done) = settled.borrow_mut().take() {
			done(Err(DiagramError::Browser("could not read file".into())));
		}
	});

	reader.set_onload(Some(onload.unchecked_ref()));
	reader.set_onerror(Some(onerror.unchecked_ref()));
	reader.read_as_text(file)?;
	Ok(())
}
