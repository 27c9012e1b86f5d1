//! Catalog page – the species grid, plus the server functions the cards use.

use leptos::*;

use fieldguide_common::{Species, SpeciesPatch};

use crate::components::species_card::SpeciesCard;

// ─── Server functions ────────────────────────────────────────────────────────

#[server(GetCatalog, "/api")]
pub async fn get_catalog() -> Result<Vec<Species>, ServerFnError> {
    use crate::server::db;
    let state = use_context::<crate::app::AppState>()
        .ok_or_else(|| ServerFnError::new("Missing AppState"))?;
    db::list_species(&state.db_path)
        .map_err(|e| ServerFnError::new(format!("DB error: {e}")))
}

/// The current viewer's session identifier, as configured on the server.
#[server(GetSession, "/api")]
pub async fn get_session() -> Result<String, ServerFnError> {
    let state = use_context::<crate::app::AppState>()
        .ok_or_else(|| ServerFnError::new("Missing AppState"))?;
    Ok(state.session.clone())
}

/// The single remote update: rewrite all editable fields of one record.
#[server(UpdateSpecies, "/api")]
pub async fn update_species(id: i64, patch: SpeciesPatch) -> Result<(), ServerFnError> {
    use crate::server::db;
    let state = use_context::<crate::app::AppState>()
        .ok_or_else(|| ServerFnError::new("Missing AppState"))?;
    db::update_species(&state.db_path, id, &patch).map_err(|e| ServerFnError::new(e.to_string()))
}

// ─── Page component ──────────────────────────────────────────────────────────

/// The species grid.  Re-fetches after every successful card save so the
/// cards always show the canonical record.
#[component]
pub fn CatalogPage() -> impl IntoView {
    let catalog = create_resource(|| (), |_| async { get_catalog().await });
    let session = create_resource(|| (), |_| async { get_session().await });

    let on_refresh = Callback::new(move |_| catalog.refetch());

    view! {
        <div class="catalog-page">
            <h1>"Species Catalog"</h1>

            <Suspense fallback=move || view! { <p class="loading">"Loading species…"</p> }>
                {move || {
                    let viewer = session
                        .get()
                        .and_then(|res| res.ok())
                        .unwrap_or_default();
                    catalog.get().map(|res| match res {
                        Ok(list) => view! {
                            <div class="species-grid">
                                <For
                                    each=move || list.clone()
                                    // Key on (id, updated_at) so a refreshed row
                                    // re-renders with its new values.
                                    key=|s| (s.id, s.updated_at.clone())
                                    children={
                                        let viewer = viewer.clone();
                                        move |sp: Species| view! {
                                            <SpeciesCard
                                                species=sp
                                                session=viewer.clone()
                                                on_refresh=on_refresh
                                            />
                                        }
                                    }
                                />
                            </div>
                        }.into_view(),
                        Err(e) => view! {
                            <p class="error">"Error: " {e.to_string()}</p>
                        }.into_view(),
                    })
                }}
            </Suspense>
        </div>
    }
}
