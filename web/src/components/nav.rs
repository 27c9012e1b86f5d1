//! Top navigation bar component.

use leptos::*;
use leptos_router::*;

/// Site-wide navigation bar.
#[component]
pub fn Nav() -> impl IntoView {
    view! {
        <nav class="nav-bar">
            <div class="nav-brand">
                <A href="/" class="nav-logo">"🌿 Fieldguide"</A>
            </div>
            <div class="nav-links">
                <A href="/" class="nav-link">"Catalog"</A>
            </div>
        </nav>
    }
}
