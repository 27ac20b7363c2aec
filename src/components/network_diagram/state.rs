//! Interaction controller: edit mode, pointer gestures, the label prompt,
//! the configuration editor and pending file operations.

use log::{info, warn};

use super::layout::{self, label_anchor};
use super::model::{GraphModel, NodePatch};
use super::persistence;
use super::scene::{self, Scene};
use super::settings::DiagramSettings;
use super::types::{ConfigDocument, LabelField, Node};
use crate::error::{DiagramError, Operation, Result};

/// Whether labels can be dragged and edited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
	/// Labels follow their node; double-clicks are ignored.
	#[default]
	Viewing,
	/// Labels can be dragged and their text edited.
	Editing,
}

/// What an active pointer gesture is moving.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragTarget {
	/// The node with this id.
	Node(String),
	/// One label line of the node with this id.
	Label(String, LabelField),
}

/// An active gesture. `grab` is the pointer's distance from the dragged
/// element's anchor when the gesture started.
#[derive(Clone, Debug, PartialEq)]
pub struct DragState {
	/// Element being moved.
	pub target: DragTarget,
	/// Horizontal pointer distance from the anchor.
	pub grab_x: f64,
	/// Vertical pointer distance from the anchor.
	pub grab_y: f64,
}

/// The modal text prompt for one label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelPrompt {
	/// Node whose label is edited.
	pub node_id: String,
	/// Which label line.
	pub field: LabelField,
	/// Current input text, seeded with the label.
	pub text: String,
}

/// The open configuration editor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigEditor {
	/// Document text being edited.
	pub text: String,
	/// Message of the last rejected apply.
	pub error: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct InFlight {
	load: bool,
	export: bool,
}

/// All interactive state of one diagram. Every gesture and command is a
/// synchronous method; methods returning `bool` report whether anything
/// observable changed.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagramState {
	model: GraphModel,
	settings: DiagramSettings,
	mode: EditMode,
	drag: Option<DragState>,
	prompt: Option<LabelPrompt>,
	editor: Option<ConfigEditor>,
	in_flight: InFlight,
}

impl DiagramState {
	/// Builds the state for a configuration, in viewing mode.
	pub fn new(document: ConfigDocument, settings: DiagramSettings) -> Result<Self> {
		Ok(Self::with_model(GraphModel::new(document)?, settings))
	}

	/// Wraps an already validated model.
	pub fn with_model(model: GraphModel, settings: DiagramSettings) -> Self {
		Self {
			model,
			settings,
			mode: EditMode::default(),
			drag: None,
			prompt: None,
			editor: None,
			in_flight: InFlight::default(),
		}
	}

	/// Current nodes and links.
	pub fn model(&self) -> &GraphModel {
		&self.model
	}

	/// Canvas size and drag margins.
	pub fn settings(&self) -> &DiagramSettings {
		&self.settings
	}

	/// Current label edit mode.
	pub fn mode(&self) -> EditMode {
		self.mode
	}

	/// The active gesture, if any.
	pub fn drag(&self) -> Option<&DragState> {
		self.drag.as_ref()
	}

	/// The open label prompt, if any.
	pub fn prompt(&self) -> Option<&LabelPrompt> {
		self.prompt.as_ref()
	}

	/// The open configuration editor, if any.
	pub fn editor(&self) -> Option<&ConfigEditor> {
		self.editor.as_ref()
	}

	fn modal_open(&self) -> bool {
		self.prompt.is_some() || self.editor.is_some()
	}

	/// Scene for the on-screen canvas, including the drag highlight.
	pub fn scene(&self) -> Scene {
		scene::build(
			&self.model,
			&self.settings,
			self.drag.as_ref().map(|d| &d.target),
		)
	}

	/// Scene for export: what is on screen, without transient highlight.
	pub fn export_scene(&self) -> Scene {
		scene::build(&self.model, &self.settings, None)
	}

	// Label edit mode

	/// Switches between viewing and editing. Leaving edit mode drops an open
	/// prompt and any label drag.
	pub fn toggle_edit_mode(&mut self) {
		self.mode = match self.mode {
			EditMode::Viewing => EditMode::Editing,
			EditMode::Editing => {
				self.prompt = None;
				if matches!(self.drag, Some(DragState { target: DragTarget::Label(..), .. })) {
					self.drag = None;
				}
				EditMode::Viewing
			}
		};
	}

	// Pointer gestures

	/// Starts a gesture on whatever is under `pointer`. Highlights only.
	///
	/// While viewing, a press on a glyph or on either label line drags the
	/// node. While editing, labels are dragged on their own.
	pub fn pointer_down(&mut self, pointer: (f64, f64)) -> bool {
		if self.modal_open() || self.drag.is_some() {
			return false;
		}
		let (px, py) = pointer;
		let drag_node = |node: &Node| (DragTarget::Node(node.id.clone()), node.position());
		let hit = match self.mode {
			// Labels belong to their node's group while viewing.
			EditMode::Viewing => layout::node_group_at(&self.model, pointer).map(drag_node),
			// Both label lines drag the shared anchor, which sits on the name line.
			EditMode::Editing => match layout::label_at(&self.model, pointer) {
				Some((node, field)) => Some((
					DragTarget::Label(node.id.clone(), field),
					label_anchor(node, LabelField::Name),
				)),
				None => layout::node_at(&self.model, pointer).map(drag_node),
			},
		};

		let Some((target, (ax, ay))) = hit else {
			return false;
		};
		self.drag = Some(DragState {
			target,
			grab_x: px - ax,
			grab_y: py - ay,
		});
		true
	}

	/// Moves the dragged element so its grab point follows `pointer`.
	pub fn pointer_move(&mut self, (px, py): (f64, f64)) -> bool {
		let Some(drag) = &self.drag else {
			return false;
		};
		let proposed = (px - drag.grab_x, py - drag.grab_y);
		match &drag.target {
			DragTarget::Node(id) => {
				layout::move_node(&mut self.model, &self.settings, id, proposed).is_some()
			}
			DragTarget::Label(id, _) if self.mode == EditMode::Editing => {
				layout::move_label(&mut self.model, id, proposed).is_some()
			}
			DragTarget::Label(..) => false,
		}
	}

	/// Ends the gesture and clears its highlight.
	pub fn pointer_up(&mut self) -> bool {
		self.drag.take().is_some()
	}

	/// Opens the text prompt for the label under `pointer`, in edit mode only.
	pub fn double_click(&mut self, pointer: (f64, f64)) -> bool {
		if self.mode != EditMode::Editing || self.modal_open() {
			return false;
		}
		let Some((node, field)) = layout::label_at(&self.model, pointer) else {
			return false;
		};
		self.prompt = Some(LabelPrompt {
			node_id: node.id.clone(),
			field,
			text: node.label_text(field).to_owned(),
		});
		self.drag = None;
		true
	}

	// Label text prompt

	/// Replaces the prompt's input text.
	pub fn set_prompt_text(&mut self, text: String) {
		if let Some(prompt) = &mut self.prompt {
			prompt.text = text;
		}
	}

	/// Writes the prompt text into its node and closes the prompt.
	pub fn confirm_prompt(&mut self) -> bool {
		let Some(prompt) = self.prompt.take() else {
			return false;
		};
		self.model.update_node(
			&prompt.node_id,
			NodePatch::label_text(prompt.field, prompt.text),
		)
	}

	/// Closes the prompt without writing.
	pub fn cancel_prompt(&mut self) {
		self.prompt = None;
	}

	// Configuration editor

	/// Opens the editor on the current configuration, or closes it.
	pub fn toggle_editor(&mut self) -> Result<()> {
		if self.editor.take().is_none() {
			let text = persistence::encode_config(&self.model.to_document())?;
			self.editor = Some(ConfigEditor { text, error: None });
		}
		Ok(())
	}

	/// Replaces the editor's document text.
	pub fn set_editor_text(&mut self, text: String) {
		if let Some(editor) = &mut self.editor {
			editor.text = text;
		}
	}

	/// Replaces the whole model with the editor's document. On failure the
	/// editor stays open with the error and the model is unchanged.
	pub fn apply_editor(&mut self) -> Result<()> {
		let Some(editor) = &mut self.editor else {
			return Ok(());
		};
		match persistence::apply_config(&mut self.model, &self.settings, &editor.text) {
			Ok(()) => {
				self.editor = None;
				self.drag = None;
				Ok(())
			}
			Err(err) => {
				warn!("Configuration rejected: {}", err);
				editor.error = Some(err.to_string());
				Err(err)
			}
		}
	}

	/// Closes the editor without applying.
	pub fn cancel_editor(&mut self) {
		self.editor = None;
	}

	// Layout files

	/// JSON text of the current layout.
	pub fn save_layout(&self) -> Result<String> {
		let text = persistence::encode_layout(&persistence::snapshot(&self.model))?;
		info!("Saved layout of {} nodes", self.model.nodes().len());
		Ok(text)
	}

	/// Marks a layout load as pending; fails if one already is.
	pub fn begin_load(&mut self) -> Result<()> {
		if self.in_flight.load {
			return Err(DiagramError::Busy(Operation::LoadLayout));
		}
		self.in_flight.load = true;
		Ok(())
	}

	/// Completes a pending load with the file text (or the read error).
	pub fn finish_load(&mut self, read: Result<String>) -> Result<usize> {
		self.in_flight.load = false;
		persistence::load_layout(&mut self.model, &self.settings, &read?)
	}

	// Export

	/// Marks an export as pending and returns the scene to rasterize.
	pub fn begin_export(&mut self) -> Result<Scene> {
		if self.in_flight.export {
			return Err(DiagramError::Busy(Operation::Export));
		}
		self.in_flight.export = true;
		Ok(self.export_scene())
	}

	/// Clears the pending export and passes its outcome through.
	pub fn finish_export(&mut self, outcome: Result<()>) -> Result<()> {
		self.in_flight.export = false;
		outcome?;
		info!("Exported diagram image");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::topology::default_topology;

	fn state() -> DiagramState {
		DiagramState::new(default_topology(), DiagramSettings::default()).unwrap()
	}

	fn name_anchor(state: &DiagramState, id: &str) -> (f64, f64) {
		label_anchor(state.model().node(id).unwrap(), LabelField::Name)
	}

	#[test]
	fn gesture_start_only_highlights() {
		let mut state = state();
		let before = state.model().clone();

		assert!(state.pointer_down((100.0, 200.0)));
		assert_eq!(
			state.drag().map(|d| &d.target),
			Some(&DragTarget::Node("admin".into()))
		);
		assert_eq!(state.model(), &before);

		assert!(state.pointer_up());
		assert!(state.drag().is_none());
		assert_eq!(state.model(), &before);
	}

	#[test]
	fn every_move_is_clamped() {
		let mut state = state();
		state.pointer_down((100.0, 200.0));
		for pointer in [(5000.0, 5000.0), (-80.0, 9.0), (450.0, f64::NAN), (300.0, 300.0)] {
			assert!(state.pointer_move(pointer));
			let (x, y) = state.model().node("admin").unwrap().position();
			assert!((60.0..=840.0).contains(&x), "{x}");
			assert!((120.0..=550.0).contains(&y), "{y}");
		}
		state.pointer_up();
		assert_eq!(state.model().node("admin").unwrap().position(), (300.0, 300.0));
	}

	#[test]
	fn grab_point_is_kept_during_node_drag() {
		let mut state = state();
		state.pointer_down((110.0, 195.0));
		state.pointer_move((310.0, 395.0));
		assert_eq!(state.model().node("admin").unwrap().position(), (300.0, 400.0));
	}

	#[test]
	fn label_press_drags_node_while_viewing() {
		let mut state = state();
		let anchor = name_anchor(&state, "masa01");

		assert!(state.pointer_down(anchor));
		assert_eq!(
			state.drag().map(|d| &d.target),
			Some(&DragTarget::Node("masa01".into()))
		);
		assert!(state.pointer_move((500.0, 500.0)));
		state.pointer_up();

		let masa01 = state.model().node("masa01").unwrap();
		assert_eq!(masa01.position(), (500.0, 460.0));
		assert_eq!(masa01.label_offset(), (0.0, 40.0));
	}

	#[test]
	fn labels_drag_on_their_own_in_edit_mode() {
		let mut state = state();
		let anchor = name_anchor(&state, "masa01");

		state.toggle_edit_mode();
		assert_eq!(state.mode(), EditMode::Editing);
		assert!(state.pointer_down(anchor));
		assert!(state.pointer_move((500.0, 500.0)));
		state.pointer_up();

		let masa01 = state.model().node("masa01").unwrap();
		assert_eq!(masa01.position(), (170.0, 200.0));
		assert_eq!(masa01.label_offset(), (330.0, 300.0));
	}

	#[test]
	fn label_over_its_glyph_does_not_block_node_drag() {
		let mut state = state();
		state.toggle_edit_mode();
		assert!(state.pointer_down(name_anchor(&state, "admin")));
		assert!(state.pointer_move((100.0, 205.0)));
		state.pointer_up();
		state.toggle_edit_mode();

		assert!(state.pointer_down((100.0, 200.0)));
		assert_eq!(
			state.drag().map(|d| &d.target),
			Some(&DragTarget::Node("admin".into()))
		);
		assert!(state.pointer_move((300.0, 300.0)));
		state.pointer_up();
		assert_eq!(state.model().node("admin").unwrap().position(), (300.0, 300.0));
	}

	#[test]
	fn indicator_dot_starts_a_node_drag() {
		let mut state = state();
		assert!(state.pointer_down((130.0, 200.0)));
		assert_eq!(
			state.drag().map(|d| &d.target),
			Some(&DragTarget::Node("admin".into()))
		);
	}

	#[test]
	fn leaving_edit_mode_discards_prompt() {
		let mut state = state();
		state.toggle_edit_mode();
		assert!(state.double_click(name_anchor(&state, "admin")));
		assert!(state.prompt().is_some());
		state.toggle_edit_mode();
		assert_eq!(state.mode(), EditMode::Viewing);
		assert!(state.prompt().is_none());
	}

	#[test]
	fn double_click_is_ignored_while_viewing() {
		let mut state = state();
		assert!(!state.double_click(name_anchor(&state, "admin")));
		assert!(state.prompt().is_none());
	}

	#[test]
	fn cancelled_prompt_changes_nothing() {
		let mut state = state();
		let before = state.model().clone();
		state.toggle_edit_mode();
		state.double_click(name_anchor(&state, "admin"));
		state.set_prompt_text("renamed".into());
		state.cancel_prompt();
		assert_eq!(state.model(), &before);
	}

	#[test]
	fn canvas_is_inert_while_a_modal_is_open() {
		let mut state = state();
		state.toggle_editor().unwrap();
		assert!(!state.pointer_down((100.0, 200.0)));
		state.cancel_editor();
		assert!(state.pointer_down((100.0, 200.0)));
	}

	#[test]
	fn editor_opens_on_current_model() {
		let mut state = state();
		state.pointer_down((100.0, 200.0));
		state.pointer_move((400.0, 400.0));
		state.pointer_up();

		state.toggle_editor().unwrap();
		let text = &state.editor().unwrap().text;
		let document = persistence::parse_config(text).unwrap();
		assert_eq!(document, state.model().to_document());

		state.toggle_editor().unwrap();
		assert!(state.editor().is_none());
	}

	#[test]
	fn rejected_config_keeps_editor_open() {
		let mut state = state();
		let before = state.model().clone();
		state.toggle_editor().unwrap();
		state.set_editor_text("{\"nodes\": [".into());

		assert!(state.apply_editor().is_err());

		let editor = state.editor().unwrap();
		assert!(editor.error.as_deref().unwrap().starts_with("Invalid JSON configuration"));
		assert_eq!(state.model(), &before);
	}

	#[test]
	fn accepted_config_closes_editor() {
		let mut state = state();
		state.toggle_editor().unwrap();
		state.set_editor_text(r#"{"nodes": [], "links": []}"#.into());
		state.apply_editor().unwrap();
		assert!(state.editor().is_none());
		assert!(state.model().nodes().is_empty());
	}

	#[test]
	fn one_load_in_flight_at_a_time() {
		let mut state = state();
		state.begin_load().unwrap();
		assert!(matches!(
			state.begin_load(),
			Err(DiagramError::Busy(Operation::LoadLayout))
		));
		let moved = state
			.finish_load(Ok(r#"[{"id":"kali-vm","x":500,"y":500}]"#.into()))
			.unwrap();
		assert_eq!(moved, 1);
		state.begin_load().unwrap();
	}

	#[test]
	fn failed_read_clears_in_flight_load() {
		let mut state = state();
		let before = state.model().clone();
		state.begin_load().unwrap();
		let err = state.finish_load(Err(DiagramError::Browser("read failed".into())));
		assert!(err.is_err());
		assert_eq!(state.model(), &before);
		state.begin_load().unwrap();
	}

	#[test]
	fn export_is_read_only_and_exclusive() {
		let mut state = state();
		state.pointer_down((100.0, 200.0));
		let before = state.clone();

		let scene = state.begin_export().unwrap();
		assert_eq!(scene, before.export_scene());
		assert!(matches!(state.begin_export(), Err(DiagramError::Busy(Operation::Export))));
		assert!(state.finish_export(Err(DiagramError::Export("encode".into()))).is_err());
		assert_eq!(state, before);
	}
}
