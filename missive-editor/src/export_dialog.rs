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

const COPY_TEXT: &str = r#"
    const text = await dioxus.recv();
    await navigator.clipboard.writeText(text);
    dioxus.send(true);
"#;

const COPY_LINK: &str = r#"
    const path = await dioxus.recv();
    await navigator.clipboard.writeText(window.location.origin + path);
    dioxus.send(true);
"#;

async fn run_clipboard_script(script: &str, payload: String) {
    let mut eval = document::eval(script);
    if let Err(err) = eval.send(payload) {
        warn!(?err, "clipboard copy failed");
        return;
    }
    match eval.recv::<bool>().await {
        Ok(_) => info!("copied to clipboard"),
        Err(err) => warn!(?err, "clipboard copy failed"),
    }
}

/// Copies `text` through the browser clipboard API.
pub async fn copy_to_clipboard(text: String) {
    run_clipboard_script(COPY_TEXT, text).await
}

/// Copies `path` as an absolute link on the current origin.
pub async fn copy_link(path: String) {
    run_clipboard_script(COPY_LINK, path).await
}

/// Editor path that opens a share code.
pub fn share_path(code: &str) -> String {
    format!("/?share={code}")
}

/// Everything produced by one export: the email HTML plus the two ways of
/// carrying the editable template around.
#[derive(Clone, Debug, PartialEq)]
pub struct ExportBundle {
    pub html: String,
    pub share_code: Option<String>,
    pub json: Option<String>,
}

#[component]
pub fn ExportDialog(bundle: ExportBundle, on_close: EventHandler<()>) -> Element {
    let mut copied = use_signal(|| false);
    let ExportBundle { html, share_code, json } = bundle;
    let copy_source = html.clone();

    rsx! {
        div { class: "modal-backdrop", onclick: move |_| on_close.call(()),
            div { class: "modal", onclick: move |evt| evt.stop_propagation(),
                div { class: "header-actions",
                    h2 { "Export HTML" }
                    button { class: "icon-btn", onclick: move |_| on_close.call(()), "✕" }
                }
                textarea { class: "export-output", readonly: true, value: "{html}" }
                div { class: "button-row",
                    button {
                        class: "primary-btn",
                        onclick: move |_| {
                            let text = copy_source.clone();
                            async move {
                                copy_to_clipboard(text).await;
                                copied.set(true);
                            }
                        },
                        if copied() { "Copied!" } else { "Copy HTML" }
                    }
                    if let Some(json) = json {
                        button {
                            class: "action-btn",
                            onclick: move |_| {
                                let text = json.clone();
                                async move { copy_to_clipboard(text).await }
                            },
                            "Copy JSON"
                        }
                    }
                    if let Some(code) = share_code {
                        ShareLink { code }
                    }
                }
            }
        }
    }
}

#[component]
fn ShareLink(code: String) -> Element {
    let path = share_path(&code);
    let copy_path = path.clone();

    rsx! {
        button {
            class: "action-btn",
            title: "{path}",
            onclick: move |_| {
                let path = copy_path.clone();
                async move { copy_link(path).await }
            },
            "Copy share link"
        }
    }
}
