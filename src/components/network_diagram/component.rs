use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlInputElement, MouseEvent};

use super::browser;
use super::export;
use super::persistence::LAYOUT_FILE_NAME;
use super::render;
use super::settings::DiagramSettings;
use super::state::{DiagramState, EditMode};
use super::types::ConfigDocument;
use crate::error::Result;

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Toolbar, canvas and dialogs for one interactive diagram of `document`.
#[component]
pub fn NetworkDiagram(
	document: ConfigDocument,
	#[prop(default = DiagramSettings::default())] settings: DiagramSettings,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let initial = DiagramState::new(document, settings).unwrap_or_else(|err| {
		error!("Initial configuration rejected: {}", err);
		DiagramState::with_model(Default::default(), settings)
	});
	let state = RwSignal::new(initial);

	// Redraw on every observable change; drawing never writes back.
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Ok(Some(ctx)) = canvas.get_context("2d") else {
			return;
		};
		let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
			return;
		};
		let scene = state.with(|s| s.scene());
		render::render(&scene, &ctx);
	});

	let on_mousedown = move |ev: MouseEvent| {
		if let Some(p) = pointer(canvas_ref, &ev) {
			state.maybe_update(|s| s.pointer_down(p));
		}
	};
	let on_mousemove = move |ev: MouseEvent| {
		if state.with_untracked(|s| s.drag().is_none()) {
			return;
		}
		if let Some(p) = pointer(canvas_ref, &ev) {
			state.maybe_update(|s| s.pointer_move(p));
		}
	};
	let on_mouseup = move |_: MouseEvent| state.maybe_update(|s| s.pointer_up());
	let on_mouseleave = move |_: MouseEvent| state.maybe_update(|s| s.pointer_up());
	let on_dblclick = move |ev: MouseEvent| {
		if let Some(p) = pointer(canvas_ref, &ev) {
			state.maybe_update(|s| s.double_click(p));
		}
	};

	let save_layout = move |_: MouseEvent| {
		let outcome = state
			.with_untracked(|s| s.save_layout())
			.and_then(|text| browser::download(&browser::json_data_uri(&text), LAYOUT_FILE_NAME));
		if let Err(err) = outcome {
			browser::notify(&err);
		}
	};

	let load_layout = move |ev: web_sys::Event| {
		let input: HtmlInputElement = event_target(&ev);
		let Some(file) = input.files().and_then(|files| files.get(0)) else {
			return;
		};
		input.set_value("");
		if let Some(Err(err)) = state.try_update(|s| s.begin_load()) {
			browser::notify(&err);
			return;
		}
		let started = browser::read_text_file(&file, move |read| {
			match state.try_update(|s| s.finish_load(read)) {
				Some(Ok(moved)) => info!("Loaded layout, {} nodes moved", moved),
				Some(Err(err)) => browser::notify(&err),
				None => {}
			}
		});
		if let Err(err) = started {
			if let Some(Err(err)) = state.try_update(|s| s.finish_load(Err(err))) {
				browser::notify(&err);
			}
		}
	};

	let export_png = move |_: MouseEvent| {
		let finish = move |outcome: Result<()>| {
			if let Some(Err(err)) = state.try_update(|s| s.finish_export(outcome)) {
				browser::notify(&err);
			}
		};
		match state.try_update(|s| s.begin_export()) {
			Some(Ok(scene)) => {
				if let Err(err) = export::export_png(&scene, finish) {
					finish(Err(err));
				}
			}
			Some(Err(err)) => browser::notify(&err),
			None => {}
		}
	};

	let toggle_editor = move |_: MouseEvent| {
		if let Some(Err(err)) = state.try_update(|s| s.toggle_editor()) {
			browser::notify(&err);
		}
	};
	let apply_editor = move |_: MouseEvent| {
		if let Some(Err(err)) = state.try_update(|s| s.apply_editor()) {
			browser::notify(&err);
		}
	};

	let (canvas_width, canvas_height) = (
		(settings.width as u32).to_string(),
		(settings.height as u32).to_string(),
	);
	let editing = move || state.with(|s| s.mode() == EditMode::Editing);
	let editor_open = move || state.with(|s| s.editor().is_some());

	view! {
		<div class="network-diagram-container">
			<div class="diagram-toolbar">
				<button class="btn btn-save" on:click=save_layout>
					"Save Layout"
				</button>
				<button class="btn btn-config" on:click=toggle_editor>
					{move || if editor_open() { "Close Editor" } else { "Edit Configuration" }}
				</button>
				<button
					class=move || if editing() { "btn btn-edit active" } else { "btn btn-edit" }
					on:click=move |_| state.update(|s| s.toggle_edit_mode())
				>
					{move || if editing() { "Exit Label Edit Mode" } else { "Edit Labels" }}
				</button>
				<label class="btn btn-load">
					"Load Layout"
					<input type="file" accept=".json" style="display: none;" on:change=load_layout />
				</label>
				<button class="btn btn-export" on:click=export_png>
					"Export as PNG"
				</button>
			</div>

			<canvas
				node_ref=canvas_ref
				class="network-diagram-canvas"
				width=canvas_width
				height=canvas_height
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:dblclick=on_dblclick
				style="display: block; cursor: grab;"
			/>

			<Show when=move || state.with(|s| s.prompt().is_some())>
				<div class="modal-backdrop">
					<div class="modal">
						<h2>"Edit Label"</h2>
						<input
							type="text"
							prop:value=move || {
								state.with(|s| s.prompt().map(|p| p.text.clone()).unwrap_or_default())
							}
							on:input=move |ev| state.update(|s| s.set_prompt_text(event_target_value(&ev)))
						/>
						<div class="modal-actions">
							<button on:click=move |_| state.update(|s| s.cancel_prompt())>"Cancel"</button>
							<button on:click=move |_| {
								state.update(|s| {
									s.confirm_prompt();
								})
							}>"Save"</button>
						</div>
					</div>
				</div>
			</Show>

			<Show when=editing>
				<div class="edit-mode-notice">
					<p>
						<strong>"Edit Mode Active:"</strong>
						" Double-click on a label to edit text. Drag labels to reposition."
					</p>
				</div>
			</Show>

			<Show when=editor_open>
				<div class="modal-backdrop">
					<div class="modal modal-wide">
						<h2>"Edit Network Configuration"</h2>
						<textarea
							class="config-editor"
							prop:value=move || {
								state.with(|s| s.editor().map(|e| e.text.clone()).unwrap_or_default())
							}
							on:input=move |ev| state.update(|s| s.set_editor_text(event_target_value(&ev)))
						></textarea>
						{move || {
							state
								.with(|s| s.editor().and_then(|e| e.error.clone()))
								.map(|message| view! { <p class="config-error">{message}</p> })
						}}
						<div class="modal-actions">
							<button on:click=move |_| state.update(|s| s.cancel_editor())>"Cancel"</button>
							<button on:click=apply_editor>"Apply Changes"</button>
						</div>
					</div>
				</div>
			</Show>

			<p class="diagram-hint">"Drag the nodes to reposition them and create the layout you prefer."</p>
		</div>
	}
}
