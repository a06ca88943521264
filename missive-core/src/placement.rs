/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Element, ElementKind, IdAllocator};

/// Data-transfer keys carried by palette drags.
pub const TRANSFER_TYPE: &str = "type";
pub const TRANSFER_SECTION: &str = "sectionDropType";
pub const TRANSFER_SIMPLE_SECTION: &str = "simpleSection";

#[derive(Debug, Clone, PartialEq)]
pub enum DropPayload {
    Element(ElementKind),
    Section(String),
    SimpleSection(String),
}

impl DropPayload {
    pub fn from_transfer(key: &str, value: &str) -> Option<Self> {
        match key {
            TRANSFER_TYPE => Some(DropPayload::Element(ElementKind::from(value))),
            TRANSFER_SECTION => Some(DropPayload::Section(value.to_string())),
            TRANSFER_SIMPLE_SECTION => Some(DropPayload::SimpleSection(value.to_string())),
            _ => None,
        }
    }

    pub fn transfer_key(&self) -> &'static str {
        match self {
            DropPayload::Element(_) => TRANSFER_TYPE,
            DropPayload::Section(_) => TRANSFER_SECTION,
            DropPayload::SimpleSection(_) => TRANSFER_SIMPLE_SECTION,
        }
    }

    pub fn to_transfer(&self) -> Transfer {
        let value = match self {
            DropPayload::Element(kind) => kind.as_str().to_string(),
            DropPayload::Section(key) | DropPayload::SimpleSection(key) => key.clone(),
        };
        Transfer { key: self.transfer_key(), value }
    }
}

/// The data-transfer entry a palette tile sets on drag start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub key: &'static str,
    pub value: String,
}

impl Transfer {
    pub fn payload(&self) -> Option<DropPayload> {
        DropPayload::from_transfer(self.key, &self.value)
    }
}

/// Bounding box of the canvas surface in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CanvasMetrics {
    pub default_width: f64,
    pub default_height: f64,
    /// Subtracted from the canvas-local x so the element lands under the cursor.
    pub drop_offset_x: f64,
    pub section_spacing: f64,
}

impl Default for CanvasMetrics {
    fn default() -> Self {
        Self {
            default_width: 200.0,
            default_height: 50.0,
            drop_offset_x: 100.0,
            section_spacing: 100.0,
        }
    }
}

pub struct SectionPreset {
    pub key: &'static str,
    pub label: &'static str,
    pub kinds: &'static [ElementKind],
}

pub const SECTION_PRESETS: &[SectionPreset] = &[
    SectionPreset {
        key: "header-text-button",
        label: "Header, Text & Button",
        kinds: &[ElementKind::Header, ElementKind::Text, ElementKind::Button],
    },
    SectionPreset {
        key: "image-text",
        label: "Image & Text",
        kinds: &[ElementKind::Image, ElementKind::Text],
    },
    SectionPreset {
        key: "header-image-text-button",
        label: "Feature Block",
        kinds: &[ElementKind::Header, ElementKind::Image, ElementKind::Text, ElementKind::Button],
    },
    SectionPreset {
        key: "text-button",
        label: "Text & Button",
        kinds: &[ElementKind::Text, ElementKind::Button],
    },
    SectionPreset {
        key: "footer-social",
        label: "Footer",
        kinds: &[ElementKind::Divider, ElementKind::Text, ElementKind::Social],
    },
];

pub fn section_preset(key: &str) -> Option<&'static SectionPreset> {
    SECTION_PRESETS.iter().find(|preset| preset.key == key)
}

/// Canvas-local placement for a pointer at `(pointer_x, pointer_y)`,
/// clamped so a default-sized element stays on the surface.
pub fn drop_position(pointer_x: f64, pointer_y: f64, canvas: CanvasRect, metrics: &CanvasMetrics) -> (f64, f64) {
    let x = pointer_x - canvas.left - metrics.drop_offset_x;
    let y = pointer_y - canvas.top;

    let max_x = (canvas.width - metrics.default_width).max(0.0);
    let max_y = (canvas.height - metrics.default_height).max(0.0);

    (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
}

/// Builds the elements a drop produces. Nothing is produced when the
/// canvas has not been measured yet.
pub fn elements_for_drop(
    payload: &DropPayload,
    pointer_x: f64,
    pointer_y: f64,
    canvas: Option<CanvasRect>,
    metrics: &CanvasMetrics,
    ids: &mut IdAllocator,
) -> Vec<Element> {
    let Some(canvas) = canvas else {
        debug!("drop ignored: canvas not mounted");
        return Vec::new();
    };

    let (left, top) = drop_position(pointer_x, pointer_y, canvas, metrics);
    debug!(?payload, left, top, "placing drop");

    match payload {
        DropPayload::Element(kind) => {
            let mut element = Element::new(kind.clone(), ids);
            element.set_position(left, top);
            vec![element]
        }
        DropPayload::Section(key) => match section_preset(key) {
            Some(preset) => stacked(preset.kinds, left, top, metrics, ids),
            None => vec![placeholder(key, left, top, ids)],
        },
        DropPayload::SimpleSection(key) => {
            let Some(preset) = section_preset(key) else {
                return vec![placeholder(key, left, top, ids)];
            };
            let mut section = Element::new(ElementKind::Section, ids);
            section.set_position(left, top);
            section.children = stacked(preset.kinds, 0.0, 0.0, metrics, ids);
            vec![section]
        }
    }
}

fn stacked(kinds: &[ElementKind], left: f64, top: f64, metrics: &CanvasMetrics, ids: &mut IdAllocator) -> Vec<Element> {
    kinds
        .iter()
        .enumerate()
        .map(|(index, kind)| {
            let mut element = Element::new(kind.clone(), ids);
            element.set_position(left, top + index as f64 * metrics.section_spacing);
            element
        })
        .collect()
}

fn placeholder(key: &str, left: f64, top: f64, ids: &mut IdAllocator) -> Element {
    warn!(section = key, "unknown section preset, inserting placeholder text");
    let mut element = Element::new(ElementKind::Text, ids);
    element.content = format!("Unknown section: {}", key);
    element.set_position(left, top);
    element
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> CanvasRect {
        CanvasRect { left: 300.0, top: 80.0, width: 600.0, height: 800.0 }
    }

    #[test]
    fn single_drop_lands_inside_the_surface() {
        let metrics = CanvasMetrics::default();
        let mut ids = IdAllocator::default();

        for (x, y) in [(0.0, 0.0), (450.0, 300.0), (5000.0, 5000.0), (-20.0, 900.0)] {
            let placed = elements_for_drop(
                &DropPayload::Element(ElementKind::Text),
                x,
                y,
                Some(canvas()),
                &metrics,
                &mut ids,
            );
            assert_eq!(placed.len(), 1);
            let element = &placed[0];
            assert!((0.0..=400.0).contains(&element.left()), "left {}", element.left());
            assert!((0.0..=750.0).contains(&element.top()), "top {}", element.top());
        }
    }

    #[test]
    fn drop_translates_into_canvas_space() {
        let position = drop_position(500.0, 180.0, canvas(), &CanvasMetrics::default());
        assert_eq!(position, (100.0, 100.0));
    }

    #[test]
    fn header_text_button_stacks_three_elements() {
        let metrics = CanvasMetrics::default();
        let mut ids = IdAllocator::default();
        let placed = elements_for_drop(
            &DropPayload::Section("header-text-button".to_string()),
            500.0,
            180.0,
            Some(canvas()),
            &metrics,
            &mut ids,
        );

        let kinds: Vec<_> = placed.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(kinds, vec![ElementKind::Header, ElementKind::Text, ElementKind::Button]);
        for pair in placed.windows(2) {
            assert_eq!(pair[0].left(), pair[1].left());
            assert_eq!(pair[1].top() - pair[0].top(), metrics.section_spacing);
        }
    }

    #[test]
    fn unknown_section_falls_back_to_placeholder() {
        let mut ids = IdAllocator::default();
        let placed = elements_for_drop(
            &DropPayload::Section("mystery".to_string()),
            500.0,
            180.0,
            Some(canvas()),
            &CanvasMetrics::default(),
            &mut ids,
        );
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].kind, ElementKind::Text);
        assert!(placed[0].content.contains("mystery"));
    }

    #[test]
    fn unmounted_canvas_is_a_no_op() {
        let mut ids = IdAllocator::default();
        let placed = elements_for_drop(
            &DropPayload::Element(ElementKind::Image),
            10.0,
            10.0,
            None,
            &CanvasMetrics::default(),
            &mut ids,
        );
        assert!(placed.is_empty());
        assert_eq!(ids.peek(), 1);
    }

    #[test]
    fn simple_section_nests_the_preset() {
        let mut ids = IdAllocator::default();
        let placed = elements_for_drop(
            &DropPayload::SimpleSection("image-text".to_string()),
            500.0,
            180.0,
            Some(canvas()),
            &CanvasMetrics::default(),
            &mut ids,
        );
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].kind, ElementKind::Section);
        assert_eq!(placed[0].children.len(), 2);
    }

    #[test]
    fn transfer_keys_map_to_payloads() {
        assert_eq!(
            DropPayload::from_transfer("type", "button"),
            Some(DropPayload::Element(ElementKind::Button))
        );
        assert_eq!(
            DropPayload::from_transfer("sectionDropType", "image-text"),
            Some(DropPayload::Section("image-text".to_string()))
        );
        assert_eq!(DropPayload::from_transfer("files", "x"), None);

        let boxed = DropPayload::SimpleSection("footer-social".into()).to_transfer();
        assert_eq!(boxed.key, "simpleSection");
        assert_eq!(boxed.payload(), Some(DropPayload::SimpleSection("footer-social".into())));
        let header = DropPayload::Element(ElementKind::Header).to_transfer();
        assert_eq!((header.key, header.value.as_str()), ("type", "header"));
    }
}
