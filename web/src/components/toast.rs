//! Toast notifications – fire-and-forget messages stacked in a corner.
//!
//! The [`Toasts`] handle lives in Leptos context so any component can report
//! an outcome; [`ToastHost`] (mounted once by `App`) renders the stack.

use leptos::*;

/// Visual severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Destructive,
}

/// One notification: short title, longer description, severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub level: ToastLevel,
}

/// Shared handle for pushing and dismissing toasts.
#[derive(Clone, Copy)]
pub struct Toasts {
    items: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl Toasts {
    pub fn new() -> Self {
        Toasts {
            items: create_rw_signal(Vec::new()),
            next_id: create_rw_signal(0),
        }
    }

    pub fn success(&self, title: &str, description: &str) {
        self.push(title, description, ToastLevel::Info);
    }

    pub fn error(&self, title: &str, description: &str) {
        self.push(title, description, ToastLevel::Destructive);
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|items| items.retain(|t| t.id != id));
    }

    fn push(&self, title: &str, description: &str, level: ToastLevel) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.items.update(|items| {
            items.push(Toast {
                id,
                title: title.to_string(),
                description: description.to_string(),
                level,
            })
        });

        // Auto-dismiss in the browser; on the server toasts never outlive
        // the render anyway.
        #[cfg(feature = "hydrate")]
        {
            let toasts = *self;
            set_timeout(
                move || toasts.dismiss(id),
                std::time::Duration::from_secs(6),
            );
        }
    }
}

impl Default for Toasts {
    fn default() -> Self {
        Toasts::new()
    }
}

/// Create the handle and put it into context.  Called once from `App`.
pub fn provide_toasts() -> Toasts {
    let toasts = Toasts::new();
    provide_context(toasts);
    toasts
}

/// Fetch the handle from context.  Panics if `provide_toasts` never ran.
pub fn use_toasts() -> Toasts {
    expect_context::<Toasts>()
}

/// Renders the current toast stack with manual dismiss buttons.
#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toasts();

    view! {
        <div class="toast-stack">
            <For
                each=move || toasts.items.get()
                key=|t| t.id
                children=move |toast: Toast| {
                    let class = match toast.level {
                        ToastLevel::Info => "toast",
                        ToastLevel::Destructive => "toast toast-destructive",
                    };
                    let id = toast.id;
                    view! {
                        <div class=class role="status">
                            <div class="toast-body">
                                <p class="toast-title">{toast.title}</p>
                                <p class="toast-desc">{toast.description}</p>
                            </div>
                            <button
                                class="toast-dismiss"
                                on:click=move |_| toasts.dismiss(id)
                            >"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let runtime = create_runtime();

        let toasts = Toasts::new();
        toasts.success("Species updated!", "Your changes have been saved.");
        toasts.error("Update failed", "duplicate key");

        let items = toasts.items.get_untracked();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Species updated!");
        assert_eq!(items[0].level, ToastLevel::Info);
        assert_eq!(items[1].level, ToastLevel::Destructive);
        assert!(items[1].description.contains("duplicate key"));

        toasts.dismiss(items[1].id);
        let items = toasts.items.get_untracked();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Species updated!");

        runtime.dispose();
    }

    #[test]
    fn test_ids_are_unique() {
        let runtime = create_runtime();

        let toasts = Toasts::new();
        toasts.success("a", "");
        toasts.success("b", "");
        toasts.success("c", "");
        let items = toasts.items.get_untracked();
        assert_eq!(items[0].id, 0);
        assert_eq!(items[1].id, 1);
        assert_eq!(items[2].id, 2);

        runtime.dispose();
    }
}
