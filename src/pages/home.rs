use leptos::prelude::*;

use crate::components::network_diagram::NetworkDiagram;
use crate::topology::default_topology;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="container">
				<h1>"Network Diagram"</h1>
				<NetworkDiagram document=default_topology() />
			</div>
		</ErrorBoundary>
	}
}
