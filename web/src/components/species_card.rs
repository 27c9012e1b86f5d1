//! Species card: compact summary, detail dialog, and owner-only edit form.

use leptos::*;

use fieldguide_common::form::{
    validate_image, validate_scientific_name, validate_total_population, SpeciesForm,
};
use fieldguide_common::species::truncate_description;
use fieldguide_common::{Kingdom, Species};

use crate::components::toast::use_toasts;
use crate::pages::catalog::update_species;

/// How much of the description the read-only view shows.
const DESCRIPTION_PREVIEW_CHARS: usize = 150;

/// The asset pipeline copies `public/` into the site root, so the placeholder
/// is served at `/placeholder.svg`, not under `/pkg`.
const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

fn image_or_placeholder(image: &Option<String>) -> String {
    image
        .clone()
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
}

// ─── Card state machine ──────────────────────────────────────────────────────

/// The three observable states of the card.
///
/// A single enum instead of dialog-open × is-editing booleans, so "editing
/// while closed" cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardState {
    #[default]
    Closed,
    Viewing,
    Editing,
}

impl CardState {
    /// "Learn More": always lands in the read-only view.
    pub fn open(self) -> Self {
        CardState::Viewing
    }

    /// "Edit": only reachable from the read-only view, and only for the
    /// record's author.
    pub fn edit(self, is_author: bool) -> Self {
        if is_author && self == CardState::Viewing {
            CardState::Editing
        } else {
            self
        }
    }

    /// Dialog dismissal, from any state.  In-progress edits are discarded.
    pub fn close(self) -> Self {
        CardState::Closed
    }
}

// ─── Component ───────────────────────────────────────────────────────────────

/// A species record rendered as a card, with a dialog for details and
/// (for the author) inline editing.
#[component]
pub fn SpeciesCard(
    species: Species,
    /// Identifier of the current viewer; gates the edit affordance only.
    session: String,
    /// Invoked exactly once after a successful save.
    #[prop(into)]
    on_refresh: Callback<()>,
) -> impl IntoView {
    let id = species.id;
    let is_author = session == species.author;
    let record = store_value(species.clone());

    let (state, set_state) = create_signal(CardState::Closed);
    let (saving, set_saving) = create_signal(false);

    // Working copy of the editable fields.  Rebuilt from the record snapshot
    // on every entry into edit mode, so dismissed edits never leak back in.
    let (sci, set_sci) = create_signal(String::new());
    let (common, set_common) = create_signal(String::new());
    let (kingdom, set_kingdom) = create_signal(Kingdom::default());
    let (population, set_population) = create_signal(String::new());
    let (image, set_image) = create_signal(String::new());
    let (description, set_description) = create_signal(String::new());

    // Live validation, surfaced as the user types.
    let sci_error = create_memo(move |_| validate_scientific_name(&sci.get()).err());
    let population_error =
        create_memo(move |_| validate_total_population(&population.get()).err());
    let image_error = create_memo(move |_| validate_image(&image.get()).err());
    let form_invalid = move || {
        sci_error.get().is_some()
            || population_error.get().is_some()
            || image_error.get().is_some()
    };

    let toasts = use_toasts();

    let enter_edit = move |_| {
        let form = record.with_value(SpeciesForm::from_species);
        set_sci.set(form.scientific_name);
        set_common.set(form.common_name);
        set_kingdom.set(form.kingdom);
        set_population.set(form.total_population);
        set_image.set(form.image);
        set_description.set(form.description);
        set_state.update(|s| *s = s.edit(is_author));
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = SpeciesForm {
            scientific_name: sci.get(),
            common_name: common.get(),
            kingdom: kingdom.get(),
            total_population: population.get(),
            image: image.get(),
            description: description.get(),
        };
        // The disabled button is advisory; validate() is the gate.
        let patch = match form.validate() {
            Ok(patch) => patch,
            Err(_) => return,
        };

        set_saving.set(true);
        spawn_local(async move {
            match update_species(id, patch).await {
                Ok(()) => {
                    set_state.update(|s| *s = s.close());
                    on_refresh.call(());
                    toasts.success("Species updated!", "Your changes have been saved.");
                }
                Err(e) => {
                    // Dialog stays open in edit mode; nothing typed is lost.
                    toasts.error("Update failed", &e.to_string());
                }
            }
            set_saving.set(false);
        });
    };

    // ── Read-only detail view ────────────────────────────────────────────
    let detail_view = move || {
        record.with_value(|sp| {
            let img_src = image_or_placeholder(&sp.image);
            let title = sp
                .common_name
                .clone()
                .unwrap_or_else(|| sp.scientific_name.clone());
            let preview = sp
                .description
                .as_deref()
                .map(|d| truncate_description(d, DESCRIPTION_PREVIEW_CHARS));

            view! {
                <div class="species-detail">
                    <img src={img_src} alt={title.clone()} class="species-detail-img" />
                    <h2>{title}</h2>
                    <p class="species-sci-name">{sp.scientific_name.clone()}</p>
                    <span class="kingdom-badge">{sp.kingdom.as_str()}</span>
                    <dl class="species-facts">
                        <dt>"Total population"</dt>
                        <dd>{sp.total_population.map(format_number).unwrap_or_else(|| "Unknown".into())}</dd>
                        <dt>"Recorded by"</dt>
                        <dd>{sp.author.clone()}</dd>
                    </dl>
                    {preview.map(|text| view! { <p class="species-desc">{text}</p> })}
                    {sp.updated_at.clone().map(|ts| view! {
                        <p class="species-updated">"Last updated " {ts}</p>
                    })}
                    {is_author.then(|| view! {
                        <button class="btn btn-primary" on:click=enter_edit>"Edit"</button>
                    })}
                </div>
            }
        })
    };

    // ── Edit form ────────────────────────────────────────────────────────
    let edit_view = move || {
        view! {
            <form class="species-form" on:submit=on_submit>
                <div class="form-field">
                    <label>"Scientific name"</label>
                    <input
                        type="text"
                        prop:value=move || sci.get()
                        on:input=move |ev| set_sci.set(event_target_value(&ev))
                    />
                    {move || sci_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
                </div>

                <div class="form-field">
                    <label>"Common name"</label>
                    <input
                        type="text"
                        prop:value=move || common.get()
                        on:input=move |ev| set_common.set(event_target_value(&ev))
                    />
                </div>

                <div class="form-field">
                    <label>"Kingdom"</label>
                    <select on:change=move |ev| {
                        if let Ok(k) = event_target_value(&ev).parse::<Kingdom>() {
                            set_kingdom.set(k);
                        }
                    }>
                        {Kingdom::ALL
                            .iter()
                            .map(|k| {
                                let k = *k;
                                view! {
                                    <option
                                        value=k.as_str()
                                        selected=move || kingdom.get() == k
                                    >{k.as_str()}</option>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </select>
                </div>

                <div class="form-field">
                    <label>"Total population"</label>
                    <input
                        type="text"
                        placeholder="Leave empty if unknown"
                        prop:value=move || population.get()
                        on:input=move |ev| set_population.set(event_target_value(&ev))
                    />
                    {move || population_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
                </div>

                <div class="form-field">
                    <label>"Image URL"</label>
                    <input
                        type="text"
                        placeholder="https://…"
                        prop:value=move || image.get()
                        on:input=move |ev| set_image.set(event_target_value(&ev))
                    />
                    {move || image_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
                </div>

                <div class="form-field">
                    <label>"Description"</label>
                    <textarea
                        prop:value=move || description.get()
                        on:input=move |ev| set_description.set(event_target_value(&ev))
                    >{description.get_untracked()}</textarea>
                </div>

                <div class="form-actions">
                    <button
                        type="button"
                        class="btn"
                        on:click=move |_| set_state.update(|s| *s = s.close())
                    >"Cancel"</button>
                    <button
                        type="submit"
                        class="btn btn-primary"
                        disabled=move || saving.get() || form_invalid()
                    >
                        {move || if saving.get() { "Saving…" } else { "Save changes" }}
                    </button>
                </div>
            </form>
        }
    };

    // ── Summary card + dialog ────────────────────────────────────────────
    let card_img = image_or_placeholder(&species.image);
    let card_title = species
        .common_name
        .clone()
        .unwrap_or_else(|| species.scientific_name.clone());

    view! {
        <div class="species-card">
            <div class="species-img-wrap">
                <img
                    src={card_img}
                    alt={card_title.clone()}
                    class="species-img"
                    loading="lazy"
                />
            </div>
            <div class="species-card-body">
                <h3 class="species-common">{card_title}</h3>
                <p class="species-sci">{species.scientific_name.clone()}</p>
                <span class="kingdom-badge">{species.kingdom.as_str()}</span>
                <button
                    class="btn btn-primary"
                    on:click=move |_| set_state.update(|s| *s = s.open())
                >"Learn More"</button>
            </div>
        </div>

        {move || (state.get() != CardState::Closed).then(|| view! {
            <div
                class="dialog-overlay"
                on:click=move |_| set_state.update(|s| *s = s.close())
            >
                <div class="dialog" on:click=|ev| ev.stop_propagation()>
                    <button
                        class="dialog-close"
                        on:click=move |_| set_state.update(|s| *s = s.close())
                    >"×"</button>
                    {move || if state.get() == CardState::Editing {
                        edit_view().into_view()
                    } else {
                        detail_view().into_view()
                    }}
                </div>
            </div>
        })}
    }
}

/// Format a number with thousand separators.
fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if n < 0 {
        out.push('-');
    }
    out.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_always_lands_read_only() {
        assert_eq!(CardState::Closed.open(), CardState::Viewing);
        assert_eq!(CardState::Editing.open(), CardState::Viewing);
    }

    #[test]
    fn test_edit_gated_on_authorship() {
        assert_eq!(CardState::Viewing.edit(true), CardState::Editing);
        assert_eq!(CardState::Viewing.edit(false), CardState::Viewing);
    }

    #[test]
    fn test_edit_unreachable_while_closed() {
        assert_eq!(CardState::Closed.edit(true), CardState::Closed);
    }

    #[test]
    fn test_close_from_any_state() {
        assert_eq!(CardState::Closed.close(), CardState::Closed);
        assert_eq!(CardState::Viewing.close(), CardState::Closed);
        assert_eq!(CardState::Editing.close(), CardState::Closed);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1), "1");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(162_000_000), "162,000,000");
    }

    #[test]
    fn test_format_number_keeps_sign_in_front() {
        assert_eq!(format_number(-123), "-123");
        assert_eq!(format_number(-1_000), "-1,000");
        assert_eq!(format_number(-1_234_567), "-1,234,567");
    }

    #[test]
    fn test_placeholder_served_from_site_root() {
        let fallback = image_or_placeholder(&None);
        assert_eq!(fallback, "/placeholder.svg");
        assert!(!fallback.starts_with("/pkg/"));
        assert_eq!(
            image_or_placeholder(&Some("https://example.org/oak.jpg".into())),
            "https://example.org/oak.jpg"
        );
    }
}
