/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use dioxus::logger::tracing::{info, warn};
use dioxus::prelude::*;
use missive_core::template::{decode_share_code, load_template, BUILTIN_TEMPLATES};

use crate::{NewsletterEditor, Workspace};

#[derive(Routable, Clone, PartialEq, Debug)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Shell)]
        #[route("/?:share")]
        Compose { share: String },
        #[route("/templates")]
        Templates {},
        #[route("/saved")]
        Saved {},
}

impl Route {
    pub fn editor() -> Self {
        Route::Compose { share: String::new() }
    }
}

/// Application root: provides the shared [`Workspace`] and mounts the router.
#[component]
pub fn MissiveApp() -> Element {
    use_context_provider(Workspace::new);
    rsx! {
        Router::<Route> {}
    }
}

#[component]
fn Shell() -> Element {
    rsx! {
        nav { class: "top-nav",
            Link { to: Route::editor(), "Editor" }
            Link { to: Route::Templates {}, "Templates" }
            Link { to: Route::Saved {}, "Saved" }
        }
        Outlet::<Route> {}
    }
}

/// Editor page. A non-empty `share` query parameter replaces the current
/// document once, when the page is first shown.
#[component]
fn Compose(share: String) -> Element {
    let workspace = use_context::<Workspace>();
    let mut document = workspace.document;

    use_hook(move || {
        if share.is_empty() {
            return;
        }
        match decode_share_code(&share) {
            Ok(shared) => {
                info!(elements = shared.elements.len(), "loaded shared newsletter");
                document.set(shared);
            }
            Err(err) => warn!(%err, "ignoring invalid share code"),
        }
    });

    rsx! {
        NewsletterEditor {}
    }
}

#[component]
fn Templates() -> Element {
    let workspace = use_context::<Workspace>();
    let mut document = workspace.document;
    let mut pasted = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let navigator = use_navigator();

    rsx! {
        div { class: "gallery",
            h2 { "Templates" }
            div { class: "template-grid",
                for template in BUILTIN_TEMPLATES {
                    div { key: "{template.key}", class: "template-card",
                        h3 { "{template.name}" }
                        p { "{template.description}" }
                        button {
                            class: "primary-btn",
                            onclick: move |_| {
                                document.set(template.build());
                                navigator.push(Route::editor());
                            },
                            "Use template"
                        }
                    }
                }
            }
            h3 { "Import" }
            textarea {
                class: "import-input",
                placeholder: "Paste template JSON or a share code",
                value: "{pasted}",
                oninput: move |evt| pasted.set(evt.value()),
            }
            button {
                class: "action-btn",
                onclick: move |_| {
                    let input = pasted.read().trim().to_string();
                    let loaded = if input.starts_with('{') { load_template(&input) } else { decode_share_code(&input) };
                    match loaded {
                        Ok(doc) => {
                            error.set(None);
                            document.set(doc);
                            navigator.push(Route::editor());
                        }
                        Err(err) => {
                            warn!(%err, "template import failed");
                            error.set(Some(err.to_string()));
                        }
                    }
                },
                "Import"
            }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
        }
    }
}

#[component]
fn Saved() -> Element {
    let workspace = use_context::<Workspace>();
    let mut document = workspace.document;
    let mut library = workspace.library;
    let navigator = use_navigator();
    let saved: Vec<_> = library
        .read()
        .iter()
        .map(|entry| (entry.clone(), entry.document.elements.len()))
        .collect();

    rsx! {
        div { class: "gallery",
            h2 { "Saved templates" }
            if saved.is_empty() {
                div { class: "empty-state", "Nothing saved yet. Use Save in the editor." }
            }
            div { class: "template-grid",
                for (entry, count) in saved {
                    div { key: "{entry.name}", class: "template-card",
                        h3 { "{entry.name}" }
                        p { "{count} elements" }
                        button {
                            class: "primary-btn",
                            onclick: {
                                let doc = entry.document.clone();
                                move |_| {
                                    document.set(doc.clone());
                                    navigator.push(Route::editor());
                                }
                            },
                            "Open"
                        }
                        button {
                            class: "action-btn danger",
                            onclick: {
                                let name = entry.name.clone();
                                move |_| {
                                    library.write().remove(&name);
                                }
                            },
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
