/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TemplateError;
use crate::interaction::InteractionUpdate;
use crate::placement::{self, CanvasMetrics, CanvasRect, DropPayload};
use crate::styles;
use crate::{px, Element, ElementId, ElementKind, GlobalSettings, IdAllocator, SocialIcon, StyleValue};

/// Offset applied to a duplicated element so it does not hide the original.
pub const DUPLICATE_OFFSET: f64 = 20.0;

pub const DEFAULT_TITLE: &str = "Newsletter";

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reorder {
    Raise,
    Lower,
}

/// The newsletter being edited: ordered top-level elements plus the
/// document-wide settings. All mutation goes through these methods.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub settings: GlobalSettings,
    #[serde(skip)]
    ids: IdAllocator,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            title: default_title(),
            elements: Vec::new(),
            settings: GlobalSettings::default(),
            ids: IdAllocator::default(),
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from loaded parts, checking id uniqueness and
    /// seeding the allocator past the largest id in use.
    pub fn from_parts(title: String, elements: Vec<Element>, settings: GlobalSettings) -> Result<Self, TemplateError> {
        let mut seen = HashSet::new();
        let mut max_id = 0;
        for element in &elements {
            for id in element.ids() {
                if !seen.insert(id) {
                    return Err(TemplateError::DuplicateId(id));
                }
                max_id = max_id.max(id);
            }
        }

        let ids = IdAllocator::starting_after(max_id).ok_or(TemplateError::IdSpaceExhausted(max_id))?;
        Ok(Self { title, elements, settings, ids })
    }

    /// Re-seeds the allocator after deserialization, rejecting duplicate ids.
    pub fn validated(self) -> Result<Self, TemplateError> {
        Self::from_parts(self.title, self.elements, self.settings)
    }

    pub fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    pub fn find(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find_map(|element| find_in(element, id))
    }

    pub fn find_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find_map(|element| find_in_mut(element, id))
    }

    pub fn add_element(&mut self, kind: ElementKind, left: f64, top: f64) -> ElementId {
        let mut element = Element::new(kind, &mut self.ids);
        element.set_position(left, top);
        let id = element.id;
        debug!(id, kind = %element.kind, "element added");
        self.elements.push(element);
        id
    }

    /// Applies a palette drop. Returns the ids of the new top-level elements.
    pub fn drop_payload(
        &mut self,
        payload: &DropPayload,
        pointer_x: f64,
        pointer_y: f64,
        canvas: Option<CanvasRect>,
        metrics: &CanvasMetrics,
    ) -> Vec<ElementId> {
        let placed = placement::elements_for_drop(payload, pointer_x, pointer_y, canvas, metrics, &mut self.ids);
        let ids = placed.iter().map(|element| element.id).collect();
        self.elements.extend(placed);
        ids
    }

    pub fn update_content(&mut self, id: ElementId, content: impl Into<String>) -> bool {
        match self.find_mut(id) {
            Some(element) => {
                element.content = content.into();
                true
            }
            None => false,
        }
    }

    pub fn update_link(&mut self, id: ElementId, link: impl Into<String>) -> bool {
        match self.find_mut(id) {
            Some(element) => {
                element.link = Some(link.into());
                true
            }
            None => false,
        }
    }

    /// Commits one style change through the shared reducer.
    pub fn update_style(&mut self, id: ElementId, key: &str, value: impl Into<StyleValue>) -> bool {
        match self.find_mut(id) {
            Some(element) => {
                element.styles = styles::merge_style(&element.styles, key, value);
                true
            }
            None => false,
        }
    }

    pub fn toggle_style(&mut self, id: ElementId, key: &str, on: &str, off: &str) -> bool {
        match self.find_mut(id) {
            Some(element) => {
                element.styles = styles::toggle_style(&element.styles, key, on, off);
                true
            }
            None => false,
        }
    }

    pub fn set_text_shadow_enabled(&mut self, id: ElementId, enabled: bool) -> bool {
        match self.find_mut(id) {
            Some(element) => {
                element.styles = styles::set_text_shadow_enabled(&element.styles, enabled);
                true
            }
            None => false,
        }
    }

    /// Stores an uploaded image (already encoded as a data URI).
    pub fn set_image(&mut self, id: ElementId, data_uri: String) -> bool {
        match self.find_mut(id) {
            Some(element) if element.kind == ElementKind::Image => {
                element.content = data_uri;
                true
            }
            _ => false,
        }
    }

    /// Removes exactly the element with `id`, wherever it lives.
    pub fn delete_element(&mut self, id: ElementId) -> Option<Element> {
        if let Some(index) = self.elements.iter().position(|element| element.id == id) {
            debug!(id, "element deleted");
            return Some(self.elements.remove(index));
        }
        self.elements.iter_mut().find_map(|element| remove_child(element, id))
    }

    /// Copies an element next to the original with fresh ids throughout.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        let index = self.elements.iter().position(|element| element.id == id);
        let source = self.find(id)?.clone();

        let mut copy = source.clone_with_new_ids(&mut self.ids);
        copy.set_position(source.left() + DUPLICATE_OFFSET, source.top() + DUPLICATE_OFFSET);
        let new_id = copy.id;

        match index {
            Some(index) => self.elements.insert(index + 1, copy),
            None => {
                let parent = self
                    .elements
                    .iter_mut()
                    .find(|element| element.children.iter().any(|child| child.id == id))?;
                let position = parent.children.iter().position(|child| child.id == id)?;
                parent.children.insert(position + 1, copy);
            }
        }
        debug!(id, new_id, "element duplicated");
        Some(new_id)
    }

    /// Moves a top-level element one step up or down the stacking order.
    pub fn reorder(&mut self, id: ElementId, direction: Reorder) -> bool {
        let Some(index) = self.elements.iter().position(|element| element.id == id) else {
            return false;
        };
        match direction {
            Reorder::Raise if index + 1 < self.elements.len() => {
                self.elements.swap(index, index + 1);
                true
            }
            Reorder::Lower if index > 0 => {
                self.elements.swap(index, index - 1);
                true
            }
            _ => false,
        }
    }

    pub fn apply_interaction(&mut self, update: &InteractionUpdate) -> bool {
        match *update {
            InteractionUpdate::Moved { id, dx, dy } => match self.find_mut(id) {
                Some(element) => {
                    let (left, top) = (element.left() + dx, element.top() + dy);
                    element.set_position(left, top);
                    true
                }
                None => false,
            },
            InteractionUpdate::Resized { id, left, top, width, height } => match self.find_mut(id) {
                Some(element) => {
                    element.set_position(left, top);
                    element.styles.insert("width", px(width));
                    if let Some(height) = height {
                        element.styles.insert("height", px(height));
                    }
                    true
                }
                None => false,
            },
        }
    }

    pub fn add_icon(&mut self, id: ElementId, platform: &str) -> Option<ElementId> {
        let icon_id = self.ids.next_id();
        let element = self.find_mut(id).filter(|element| element.kind == ElementKind::Social)?;
        element.icons.push(SocialIcon {
            id: icon_id,
            platform: platform.to_string(),
            url: "#".to_string(),
        });
        Some(icon_id)
    }

    pub fn update_icon(&mut self, id: ElementId, icon_id: ElementId, platform: Option<&str>, url: Option<&str>) -> bool {
        let Some(icon) = self
            .find_mut(id)
            .and_then(|element| element.icons.iter_mut().find(|icon| icon.id == icon_id))
        else {
            return false;
        };
        if let Some(platform) = platform {
            icon.platform = platform.to_string();
        }
        if let Some(url) = url {
            icon.url = url.to_string();
        }
        true
    }

    pub fn remove_icon(&mut self, id: ElementId, icon_id: ElementId) -> bool {
        match self.find_mut(id) {
            Some(element) => {
                let before = element.icons.len();
                element.icons.retain(|icon| icon.id != icon_id);
                element.icons.len() != before
            }
            None => false,
        }
    }

    /// Canvas height needed to show every element, never below the
    /// configured minimum.
    pub fn canvas_height(&self) -> f64 {
        let lowest = self
            .elements
            .iter()
            .map(|element| element.top() + element.styles.number("height").unwrap_or(60.0))
            .fold(0.0, f64::max);
        lowest.max(self.settings.min_height_px())
    }
}

fn find_in(element: &Element, id: ElementId) -> Option<&Element> {
    if element.id == id {
        return Some(element);
    }
    element.children.iter().find_map(|child| find_in(child, id))
}

fn find_in_mut(element: &mut Element, id: ElementId) -> Option<&mut Element> {
    if element.id == id {
        return Some(element);
    }
    element.children.iter_mut().find_map(|child| find_in_mut(child, id))
}

fn remove_child(element: &mut Element, id: ElementId) -> Option<Element> {
    if let Some(index) = element.children.iter().position(|child| child.id == id) {
        return Some(element.children.remove(index));
    }
    element.children.iter_mut().find_map(|child| remove_child(child, id))
}
