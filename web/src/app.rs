//! Root Leptos application component with routing.

use leptos::*;
use leptos_meta::*;
use leptos_router::*;

use crate::components::nav::Nav;
use crate::components::toast::{provide_toasts, ToastHost};
use crate::pages::catalog::CatalogPage;

/// Server-side application state, provided as Leptos context for server functions.
#[derive(Clone, Debug)]
#[cfg(feature = "ssr")]
pub struct AppState {
    pub db_path: std::path::PathBuf,
    /// Identifier of the signed-in viewer.  Advisory only: it gates the edit
    /// affordance in the UI, the store itself does not check authorship.
    pub session: String,
    pub leptos_options: leptos::LeptosOptions,
}

/// Dummy state for the client – never actually constructed on WASM, but the
/// type must exist so server functions can reference it in their signatures.
#[derive(Clone, Debug)]
#[cfg(not(feature = "ssr"))]
pub struct AppState;

/// The root `<App/>` component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_toasts();

    view! {
        <Stylesheet id="leptos" href="/pkg/fieldguide-web.css"/>
        <Title text="Fieldguide – Species Catalog"/>
        <Meta name="viewport" content="width=device-width, initial-scale=1"/>
        <Meta name="description" content="Community-contributed species records"/>

        <Router>
            <Nav/>
            <main class="main-content">
                <Routes>
                    <Route path="/" view=CatalogPage/>
                </Routes>
            </main>
            <ToastHost/>
        </Router>
    }
}
