/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use std::rc::Rc;

use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;
use missive_core::html_renderer::{frame_css, render_element};
use missive_core::interaction::{Point, ResizeOrigin};
use missive_core::placement::CanvasMetrics;
use missive_core::{
    self as model, CanvasRect, Document, EditorMode, ElementId, ElementKind, GlobalSettings, Handle,
    Interaction, Transfer,
};

/// Pointer position and frame size captured when a handle is pressed. The
/// size starts from the element's styles and is corrected once measured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeStart {
    pub handle: Handle,
    pub pointer: Point,
    pub width: f64,
    pub height: f64,
}

async fn measure(mounted: Option<Rc<MountedData>>) -> Option<CanvasRect> {
    let rect = mounted?.get_client_rect().await.ok()?;
    Some(CanvasRect {
        left: rect.origin.x,
        top: rect.origin.y,
        width: rect.size.width,
        height: rect.size.height,
    })
}

/// Drop target and editing surface. Drops are placed relative to the
/// surface's bounding box, which is only known once it is mounted.
#[component]
pub fn Canvas(
    document: Signal<Document>,
    selected: Signal<Option<ElementId>>,
    interaction: Signal<Interaction>,
    mode: Signal<EditorMode>,
    drag_payload: Signal<Option<Transfer>>,
    metrics: CanvasMetrics,
) -> Element {
    let mut document = document;
    let mut selected = selected;
    let mut interaction = interaction;
    let mut drag_payload = drag_payload;
    let mut surface = use_signal(|| None::<Rc<MountedData>>);

    let doc = document.read();
    let settings = doc.settings.clone();
    let height = doc.canvas_height();
    let current = *selected.read();
    let framed: Vec<_> = doc.elements.iter().map(|element| (element.id, element.clone())).collect();
    drop(doc);

    let surface_style = format!(
        "width: {}; min-height: {}px; background-color: {}; font-family: {};",
        settings.max_width, height, settings.newsletter_color, settings.font_family
    );

    rsx! {
        div {
            class: "canvas-backdrop",
            style: "background-color: {settings.background_color};",
            div {
                class: "canvas-container",
                style: "{surface_style}",
                onmounted: move |evt| surface.set(Some(evt.data())),
                ondragover: move |evt| evt.prevent_default(),
                ondrop: move |evt| {
                    evt.prevent_default();
                    let Some(transfer) = drag_payload.take() else {
                        return;
                    };
                    let Some(payload) = transfer.payload() else {
                        warn!(key = transfer.key, "ignoring drop with unknown transfer key");
                        return;
                    };
                    let pointer = evt.client_coordinates();
                    let mounted = surface.read().clone();
                    spawn(async move {
                        let rect = measure(mounted).await;
                        let ids = document.write().drop_payload(&payload, pointer.x, pointer.y, rect, &metrics);
                        if let Some(first) = ids.first() {
                            selected.set(Some(*first));
                        }
                    });
                },
                onclick: move |_| selected.set(None),
                for (id, element) in framed {
                    ElementFrame {
                        key: "{id}",
                        is_selected: current == Some(id),
                        settings: settings.clone(),
                        on_press: move |(id, evt): (ElementId, MouseEvent)| {
                            let m = *mode.read();
                            if m != EditorMode::Editor {
                                return;
                            }
                            selected.set(Some(id));
                            let p = evt.page_coordinates();
                            interaction.write().begin_drag(m, id, Some(id), Point::new(p.x, p.y));
                        },
                        on_resize_start: move |(id, start): (ElementId, ResizeStart)| {
                            let m = *mode.read();
                            let Some(target) = document.read().find(id).cloned() else {
                                return;
                            };
                            let origin = ResizeOrigin {
                                left: target.left(),
                                top: target.top(),
                                width: start.width,
                                height: start.height,
                            };
                            interaction.write().begin_resize(
                                m,
                                id,
                                &target.kind,
                                *selected.read(),
                                start.handle,
                                start.pointer,
                                origin,
                            );
                        },
                        on_resize_measured: move |(id, width, height): (ElementId, f64, f64)| {
                            interaction.write().measured_size(id, width, height);
                        },
                        element,
                    }
                }
            }
        }
    }
}

#[component]
fn ElementFrame(
    element: model::Element,
    settings: GlobalSettings,
    is_selected: bool,
    on_press: EventHandler<(ElementId, MouseEvent)>,
    on_resize_start: EventHandler<(ElementId, ResizeStart)>,
    on_resize_measured: EventHandler<(ElementId, f64, f64)>,
) -> Element {
    let mut frame = use_signal(|| None::<Rc<MountedData>>);
    let id = element.id;
    let style = frame_css(&element.styles);
    let class = if is_selected { "element-frame selected" } else { "element-frame" };
    let fallback = (
        element.styles.number("width").unwrap_or(200.0),
        element.styles.number("height").unwrap_or(50.0),
    );
    let divider = element.kind == ElementKind::Divider;

    rsx! {
        div {
            class: "{class}",
            style: "{style}",
            onmounted: move |evt| frame.set(Some(evt.data())),
            onmousedown: move |evt| {
                evt.prevent_default();
                evt.stop_propagation();
                on_press.call((id, evt));
            },
            ondragstart: move |evt| evt.prevent_default(),
            onclick: move |evt| evt.stop_propagation(),
            {render_element(&element, &settings)}
            if is_selected {
                SelectionHandles {
                    divider,
                    on_handle: move |(handle, evt): (Handle, MouseEvent)| {
                        let p = evt.page_coordinates();
                        let pointer = Point::new(p.x, p.y);
                        let (width, height) = fallback;
                        on_resize_start.call((id, ResizeStart { handle, pointer, width, height }));

                        let mounted = frame.read().clone();
                        spawn(async move {
                            if let Some(rect) = measure(mounted).await {
                                debug!(id, handle = handle.as_str(), width = rect.width, height = rect.height, "resize measured");
                                on_resize_measured.call((id, rect.width, rect.height));
                            }
                        });
                    },
                }
            }
        }
    }
}

/// Eight grips around the selected element. Dividers only get the
/// horizontal ones since their thickness is set from the panel.
#[component]
fn SelectionHandles(divider: bool, on_handle: EventHandler<(Handle, MouseEvent)>) -> Element {
    let handles = Handle::ALL
        .into_iter()
        .filter(|handle| !divider || !matches!(handle, Handle::Top | Handle::Bottom))
        .map(|handle| (handle, handle.as_str()));

    rsx! {
        for (handle, name) in handles {
            div {
                key: "{name}",
                class: "resize-handle {name}",
                onmousedown: move |evt| {
                    evt.prevent_default();
                    evt.stop_propagation();
                    on_handle.call((handle, evt));
                },
                onclick: move |evt| evt.stop_propagation(),
            }
        }
    }
}
