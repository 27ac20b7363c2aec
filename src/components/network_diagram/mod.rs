//! Interactive network topology diagram: graph model, drag layout, layout
//! files, JSON configuration editing and PNG export.

mod browser;
mod component;
mod export;
pub mod layout;
pub mod model;
pub mod persistence;
mod render;
pub mod scene;
pub mod settings;
pub mod state;
pub mod svg;
mod types;

pub use component::NetworkDiagram;
pub use export::IMAGE_FILE_NAME;
pub use model::{GraphModel, NodePatch};
pub use settings::{DiagramSettings, Margins};
pub use state::{DiagramState, DragTarget, EditMode};
pub use types::{
	ConfigDocument, LabelField, LayoutEntry, LayoutSnapshot, Link, LinkKind, Node, NodeKind,
};
