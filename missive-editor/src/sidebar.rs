/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use dioxus::logger::tracing::debug;
use dioxus::prelude::*;
use missive_core::placement::SECTION_PRESETS;
use missive_core::{DropPayload, ElementKind, Transfer};

fn kind_icon(kind: &ElementKind) -> &'static str {
    match kind {
        ElementKind::Text => "¶",
        ElementKind::Header => "H",
        ElementKind::Image => "🖼",
        ElementKind::Button => "▭",
        ElementKind::Divider => "―",
        ElementKind::Social => "@",
        ElementKind::Shape => "◆",
        ElementKind::Section | ElementKind::Unknown(_) => "▤",
    }
}

/// Palette of draggable element types and section presets. The transfer
/// entry of the tile being dragged is parked in `drag_payload` until the
/// canvas receives the drop.
#[component]
pub fn Sidebar(drag_payload: Signal<Option<Transfer>>) -> Element {
    rsx! {
        div { class: "left-panel",
            h3 { "Elements" }
            div { class: "palette",
                for kind in ElementKind::PALETTE {
                    PaletteTile {
                        key: "{kind}",
                        icon: kind_icon(&kind),
                        label: kind.label().to_string(),
                        payload: DropPayload::Element(kind.clone()),
                        drag_payload,
                    }
                }
            }
            h3 { "Sections" }
            div { class: "palette sections",
                for preset in SECTION_PRESETS {
                    PaletteTile {
                        key: "{preset.key}",
                        icon: "▤",
                        label: preset.label.to_string(),
                        payload: DropPayload::Section(preset.key.to_string()),
                        drag_payload,
                    }
                }
            }
            h3 { "Containers" }
            div { class: "palette sections",
                for preset in SECTION_PRESETS {
                    PaletteTile {
                        key: "boxed-{preset.key}",
                        icon: "▣",
                        label: format!("{} (boxed)", preset.label),
                        payload: DropPayload::SimpleSection(preset.key.to_string()),
                        drag_payload,
                    }
                }
            }
            p { class: "hint", "Drag onto the canvas" }
        }
    }
}

#[component]
fn PaletteTile(
    icon: &'static str,
    label: String,
    payload: DropPayload,
    drag_payload: Signal<Option<Transfer>>,
) -> Element {
    let mut drag_payload = drag_payload;
    let transfer = payload.to_transfer();
    let transfer_key = transfer.key;
    let transfer_value = transfer.value.clone();

    rsx! {
        div {
            class: "palette-tile",
            draggable: true,
            "data-transfer": transfer_key,
            "data-value": transfer_value,
            ondragstart: move |_| {
                debug!(key = transfer.key, value = %transfer.value, "palette drag start");
                drag_payload.set(Some(transfer.clone()));
            },
            span { class: "tile-icon", "{icon}" }
            span { "{label}" }
        }
    }
}
