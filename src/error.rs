//! Error taxonomy shared by the diagram core and its browser glue.

use std::fmt;

/// An asynchronous operation that allows only one request in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
	/// Reading a layout file.
	LoadLayout,
	/// Rasterizing the diagram to PNG.
	Export,
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Operation::LoadLayout => f.write_str("layout load"),
			Operation::Export => f.write_str("PNG export"),
		}
	}
}

/// Errors surfaced to the user as a blocking notice.
#[derive(Debug, thiserror::Error)]
pub enum DiagramError {
	/// The layout file is not a JSON array of `{id, x, y}` entries.
	#[error("Invalid layout file: {0}")]
	MalformedLayout(#[source] serde_json::Error),

	/// The configuration text is not an object with `nodes` and `links` arrays.
	#[error("Invalid JSON configuration: {0}")]
	MalformedConfig(#[source] serde_json::Error),

	/// Two nodes in one configuration share an id.
	#[error("Invalid JSON configuration: duplicate node id '{0}'")]
	DuplicateNodeId(String),

	/// Serializing a document failed.
	#[error("Could not encode {what}: {source}")]
	Encode {
		/// Which document was being written.
		what: &'static str,
		/// Underlying serializer error.
		#[source]
		source: serde_json::Error,
	},

	/// A second request arrived while one was still pending.
	#[error("A {0} is already in progress")]
	Busy(Operation),

	/// Rasterizing or encoding the image failed.
	#[error("Export failed: {0}")]
	Export(String),

	/// A DOM or browser API call failed.
	#[error("Browser error: {0}")]
	Browser(String),
}

impl From<wasm_bindgen::JsValue> for DiagramError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		DiagramError::Browser(
			value
				.as_string()
				.unwrap_or_else(|| format!("{:?}", value)),
		)
	}
}

/// Result alias for diagram operations.
pub type Result<T, E = DiagramError> = std::result::Result<T, E>;
