/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

#![allow(non_snake_case)]

use dioxus::logger::tracing::{debug, info, warn};
use dioxus::prelude::*;
use missive_core::html_renderer::render_to_rsx;
use missive_core::template::{encode_share_code, TemplateLibrary};
use missive_core::{export_document, CanvasMetrics, Document, EditorMode, ElementId, Interaction, Transfer};

pub mod canvas;
pub mod export_dialog;
pub mod panels;
pub mod routes;
pub mod sidebar;

use canvas::Canvas;
use export_dialog::{ExportBundle, ExportDialog};
use panels::{apply_command, apply_setting, EditCommand, PropertyPanel, Selection, SettingsPanel};
use sidebar::Sidebar;

pub use routes::{MissiveApp, Route};

const MAIN_CSS: Asset = asset!("/assets/editor.css");

/// State shared between the routed pages: the newsletter being edited and
/// the templates saved this session.
#[derive(Clone, Copy, PartialEq)]
pub struct Workspace {
    pub document: Signal<Document>,
    pub library: Signal<TemplateLibrary>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            document: Signal::new(Document::new()),
            library: Signal::new(TemplateLibrary::default()),
        }
    }
}

/// The newsletter editor. Uses the surrounding [`Workspace`] when mounted
/// under [`MissiveApp`], otherwise owns a fresh one.
#[component]
pub fn NewsletterEditor() -> Element {
    let workspace = use_hook(|| try_consume_context::<Workspace>().unwrap_or_else(Workspace::new));
    let mut document = workspace.document;
    let mut library = workspace.library;

    let mut selected = use_signal(|| None::<ElementId>);
    let mut mode = use_signal(EditorMode::default);
    let mut interaction = use_signal(Interaction::default);
    let drag_payload = use_signal(|| None::<Transfer>);
    let mut exported = use_signal(|| None::<ExportBundle>);
    let mut save_name = use_signal(String::new);
    let metrics = CanvasMetrics::default();

    let editing = mode() == EditorMode::Editor;
    let cursor_style = if interaction.read().is_idle() { "default" } else { "grabbing" };
    let selected_element = selected().and_then(|id| document.read().find(id).cloned());
    let page_background = document.read().settings.background_color.clone();

    let on_command = move |command: EditCommand| {
        let Some(id) = selected() else {
            return;
        };
        debug!(id, ?command, "applying panel command");
        match apply_command(&mut document.write(), id, command) {
            Selection::Keep => {}
            Selection::Select(next) => selected.set(Some(next)),
            Selection::Clear => selected.set(None),
        }
    };

    rsx! {
        document::Stylesheet { href: MAIN_CSS }
        div {
            class: "editor-container",
            style: "cursor: {cursor_style};",
            tabindex: "0",
            onkeydown: move |evt| {
                if !editing {
                    return;
                }
                let Some(id) = selected() else {
                    return;
                };
                let ctrl = evt.modifiers().contains(Modifiers::CONTROL) || evt.modifiers().contains(Modifiers::META);
                if evt.key() == Key::Delete {
                    if document.write().delete_element(id).is_some() {
                        selected.set(None);
                    }
                } else if ctrl && evt.key() == Key::Character("d".to_string()) {
                    evt.prevent_default();
                    if let Some(copy) = document.write().duplicate_element(id) {
                        selected.set(Some(copy));
                    }
                }
            },
            onmousemove: move |evt| {
                let p = evt.page_coordinates();
                let update = interaction.write().pointer_move(mode(), missive_core::interaction::Point::new(p.x, p.y));
                if let Some(update) = update {
                    document.write().apply_interaction(&update);
                }
            },
            onmouseup: move |_| interaction.write().pointer_up(mode()),

            div { class: "toolbar",
                h2 { "Missive" }
                div { class: "mode-toggle",
                    button {
                        class: if editing { "toggle-btn active" } else { "toggle-btn" },
                        onclick: move |_| {
                            mode.set(EditorMode::Editor);
                            interaction.write().set_mode(EditorMode::Editor);
                        },
                        "Editor"
                    }
                    button {
                        class: if editing { "toggle-btn" } else { "toggle-btn active" },
                        onclick: move |_| {
                            mode.set(EditorMode::Preview);
                            interaction.write().set_mode(EditorMode::Preview);
                            selected.set(None);
                        },
                        "Preview"
                    }
                }
                div { class: "header-actions",
                    input {
                        r#type: "text",
                        placeholder: "Template name",
                        value: "{save_name}",
                        oninput: move |evt| save_name.set(evt.value()),
                    }
                    button {
                        class: "action-btn",
                        disabled: save_name.read().trim().is_empty(),
                        onclick: move |_| {
                            let name = save_name.read().trim().to_string();
                            library.write().save(&name, &document.read());
                            save_name.set(String::new());
                        },
                        "Save"
                    }
                    button {
                        class: "primary-btn",
                        onclick: move |_| {
                            let doc = document.read();
                            let html = export_document(&doc);
                            let share_code = match encode_share_code(&doc) {
                                Ok(code) => Some(code),
                                Err(err) => {
                                    warn!(%err, "could not build share code");
                                    None
                                }
                            };
                            let json = match serde_json::to_string_pretty(&*doc) {
                                Ok(json) => Some(json),
                                Err(err) => {
                                    warn!(%err, "could not serialize template");
                                    None
                                }
                            };
                            info!(bytes = html.len(), "newsletter exported");
                            exported.set(Some(ExportBundle { html, share_code, json }));
                        },
                        "Export"
                    }
                }
            }

            div { class: "workspace",
                if editing {
                    Sidebar { drag_payload }
                }

                div { class: "center-panel",
                    if editing {
                        Canvas {
                            document,
                            selected,
                            interaction,
                            mode,
                            drag_payload,
                            metrics,
                        }
                    } else {
                        div {
                            class: "canvas-backdrop",
                            style: "background-color: {page_background};",
                            {render_to_rsx(&document.read())}
                        }
                    }
                }

                if editing {
                    div { class: "right-panel",
                        if let Some(element) = selected_element {
                            PropertyPanel { element, on_command }
                        } else {
                            SettingsPanel {
                                title: document.read().title.clone(),
                                settings: document.read().settings.clone(),
                                on_change: move |(field, value)| apply_setting(&mut document.write(), field, value),
                            }
                        }
                    }
                }
            }

            if let Some(bundle) = exported() {
                ExportDialog {
                    bundle,
                    on_close: move |_| exported.set(None),
                }
            }
        }
    }
}
