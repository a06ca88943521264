/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

pub mod document;
pub mod error;
pub mod export;
pub mod interaction;
pub mod placement;
pub mod styles;
pub mod template;
pub mod upload;

#[cfg(feature = "rsx")]
pub mod html_renderer;

pub use document::Document;
pub use error::{TemplateError, UploadError};
pub use export::{export_document, export_to_html};
pub use interaction::{EditorMode, Handle, Interaction, InteractionUpdate};
pub use placement::{CanvasMetrics, CanvasRect, DropPayload, Transfer};
pub use styles::merge_style;

pub type ElementId = u64;

/// Hands out element ids for one document. Ids are never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct IdAllocator {
    next: ElementId,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    /// `None` when `max_id` leaves no room for another id.
    pub fn starting_after(max_id: ElementId) -> Option<Self> {
        max_id.checked_add(1).map(|next| Self { next })
    }

    pub fn next_id(&mut self) -> ElementId {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }

    pub fn peek(&self) -> ElementId {
        self.next
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    Text,
    Header,
    Image,
    Button,
    Divider,
    Social,
    Shape,
    Section,
    Unknown(String),
}

impl ElementKind {
    pub const PALETTE: [ElementKind; 7] = [
        ElementKind::Text,
        ElementKind::Header,
        ElementKind::Image,
        ElementKind::Button,
        ElementKind::Divider,
        ElementKind::Social,
        ElementKind::Shape,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ElementKind::Text => "text",
            ElementKind::Header => "header",
            ElementKind::Image => "image",
            ElementKind::Button => "button",
            ElementKind::Divider => "divider",
            ElementKind::Social => "social",
            ElementKind::Shape => "shape",
            ElementKind::Section => "section",
            ElementKind::Unknown(name) => name,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ElementKind::Text => "Text",
            ElementKind::Header => "Header",
            ElementKind::Image => "Image",
            ElementKind::Button => "Button",
            ElementKind::Divider => "Divider",
            ElementKind::Social => "Social Icons",
            ElementKind::Shape => "Shape",
            ElementKind::Section => "Section",
            ElementKind::Unknown(name) => name,
        }
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, ElementKind::Text | ElementKind::Header | ElementKind::Button)
    }
}

impl From<String> for ElementKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => ElementKind::Text,
            "header" => ElementKind::Header,
            "image" => ElementKind::Image,
            "button" => ElementKind::Button,
            "divider" => ElementKind::Divider,
            "social" => ElementKind::Social,
            "shape" => ElementKind::Shape,
            "section" => ElementKind::Section,
            _ => ElementKind::Unknown(value),
        }
    }
}

impl From<&str> for ElementKind {
    fn from(value: &str) -> Self {
        ElementKind::from(value.to_string())
    }
}

impl From<ElementKind> for String {
    fn from(kind: ElementKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    Text(String),
}

impl StyleValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::Text(s) => Some(s),
            StyleValue::Number(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, StyleValue::Text(s) if s.trim().is_empty())
    }

    /// Numeric part of a value such as `"12px"`, `"1.5em"` or `12`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            StyleValue::Text(s) => {
                let trimmed = s.trim();
                let end = trimmed
                    .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
                    .unwrap_or(trimmed.len());
                trimmed[..end].parse().ok()
            }
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Number(n) => write!(f, "{}", n),
            StyleValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<f32> for StyleValue {
    fn from(value: f32) -> Self {
        StyleValue::Number(value as f64)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(value as f64)
    }
}

/// CSS-like property map keyed by camelCase property name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Styles(BTreeMap<String, StyleValue>);

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(StyleValue::as_str)
    }

    /// Rendered value of `key`, or `default` when unset or blank.
    pub fn css_or(&self, key: &str, default: &str) -> String {
        match self.0.get(key) {
            Some(value) if !value.is_blank() => value.to_string(),
            _ => default.to_string(),
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.0.get(key).and_then(StyleValue::as_number)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        self.0.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for Styles {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Styles(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialIcon {
    pub id: ElementId,
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<SocialIcon>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
    #[serde(default)]
    pub styles: Styles,
}

pub const DEFAULT_SOCIAL_PLATFORMS: [&str; 3] = ["facebook", "twitter", "instagram"];

impl Element {
    /// A freshly placed element of `kind` with its starter content and styles.
    pub fn new(kind: ElementKind, ids: &mut IdAllocator) -> Self {
        let id = ids.next_id();
        let mut element = Element {
            id,
            kind: kind.clone(),
            content: String::new(),
            link: None,
            icons: Vec::new(),
            children: Vec::new(),
            styles: Styles::new(),
        };

        match kind {
            ElementKind::Text => {
                element.content = "Add your text here".to_string();
                element.styles = Styles::new()
                    .with("width", "200px")
                    .with("fontSize", "16px")
                    .with("color", "#333333")
                    .with("lineHeight", "1.5")
                    .with("padding", "10px");
            }
            ElementKind::Header => {
                element.content = "Your Header Here".to_string();
                element.styles = Styles::new()
                    .with("width", "300px")
                    .with("fontSize", "24px")
                    .with("fontWeight", "bold")
                    .with("color", "#222222")
                    .with("padding", "10px");
            }
            ElementKind::Image => {
                element.styles = Styles::new()
                    .with("width", "200px")
                    .with("height", "150px");
            }
            ElementKind::Button => {
                element.content = "Click Me".to_string();
                element.link = Some("#".to_string());
                element.styles = Styles::new()
                    .with("width", "150px")
                    .with("backgroundColor", "#007bff")
                    .with("color", "#ffffff")
                    .with("paddingTop", "10px")
                    .with("paddingRight", "20px")
                    .with("paddingBottom", "10px")
                    .with("paddingLeft", "20px")
                    .with("padding", "10px 20px 10px 20px")
                    .with("borderRadius", "4px")
                    .with("textAlign", "center")
                    .with("textDecoration", "none");
            }
            ElementKind::Divider => {
                element.styles = Styles::new()
                    .with("width", "200px")
                    .with("height", "2px")
                    .with("backgroundColor", "#dddddd")
                    .with("borderStyle", "solid");
            }
            ElementKind::Social => {
                element.icons = DEFAULT_SOCIAL_PLATFORMS
                    .iter()
                    .map(|platform| SocialIcon {
                        id: ids.next_id(),
                        platform: platform.to_string(),
                        url: "#".to_string(),
                    })
                    .collect();
                element.styles = Styles::new()
                    .with("gap", "10px")
                    .with("iconSize", "32px")
                    .with("textAlign", "center");
            }
            ElementKind::Shape => {
                element.styles = Styles::new()
                    .with("width", "100px")
                    .with("height", "100px")
                    .with("shapeType", "rectangle")
                    .with("fillType", "solid")
                    .with("backgroundColor", "#4a90e2")
                    .with("gradientStartColor", "#4a90e2")
                    .with("gradientEndColor", "#9013fe")
                    .with("gradientDirection", "to right");
            }
            ElementKind::Section => {
                element.styles = Styles::new()
                    .with("width", "400px")
                    .with("backgroundColor", "#fafafa")
                    .with("padding", "20px");
            }
            ElementKind::Unknown(_) => {}
        }

        element
    }

    pub fn left(&self) -> f64 {
        self.styles.number("left").unwrap_or(0.0)
    }

    pub fn top(&self) -> f64 {
        self.styles.number("top").unwrap_or(0.0)
    }

    pub fn set_position(&mut self, left: f64, top: f64) {
        self.styles.insert("left", px(left));
        self.styles.insert("top", px(top));
    }

    /// This element's id followed by the ids of its icons and children.
    pub fn ids(&self) -> Vec<ElementId> {
        let mut ids = vec![self.id];
        ids.extend(self.icons.iter().map(|icon| icon.id));
        for child in &self.children {
            ids.extend(child.ids());
        }
        ids
    }

    /// Deep copy with fresh ids for the element, its icons and its children.
    pub fn clone_with_new_ids(&self, ids: &mut IdAllocator) -> Element {
        let mut copy = self.clone();
        copy.id = ids.next_id();
        for icon in &mut copy.icons {
            icon.id = ids.next_id();
        }
        copy.children = self
            .children
            .iter()
            .map(|child| child.clone_with_new_ids(ids))
            .collect();
        copy
    }
}

/// Formats a pixel quantity the way styles store it.
pub fn px(value: f64) -> String {
    format!("{}px", value.round())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    pub background_color: String,
    pub newsletter_color: String,
    pub max_width: String,
    pub min_height: String,
    pub font_family: String,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            background_color: "#f4f4f4".to_string(),
            newsletter_color: "#ffffff".to_string(),
            max_width: "600px".to_string(),
            min_height: "800px".to_string(),
            font_family: "Arial, sans-serif".to_string(),
        }
    }
}

impl GlobalSettings {
    pub fn max_width_px(&self) -> f64 {
        StyleValue::from(self.max_width.as_str()).as_number().unwrap_or(600.0)
    }

    pub fn min_height_px(&self) -> f64 {
        StyleValue::from(self.min_height.as_str()).as_number().unwrap_or(800.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_serializes_elements_with_wire_names() {
        let mut ids = IdAllocator::default();
        let mut button = Element::new(ElementKind::Button, &mut ids);
        button.set_position(40.0, 60.0);

        let json = serde_json::to_value(&button).unwrap();
        assert_eq!(json["type"], "button");
        assert_eq!(json["link"], "#");
        assert_eq!(json["styles"]["left"], "40px");
        assert!(json.get("icons").is_none());
    }

    #[test]
    fn unknown_kinds_survive_a_round_trip() {
        let json = r#"{"id": 7, "type": "carousel", "styles": {"width": 120}}"#;
        let element: Element = serde_json::from_str(json).unwrap();

        assert_eq!(element.kind, ElementKind::Unknown("carousel".to_string()));
        assert_eq!(element.styles.get("width"), Some(&StyleValue::Number(120.0)));
        assert_eq!(serde_json::to_value(&element).unwrap()["type"], "carousel");
    }

    #[test]
    fn social_elements_get_distinct_icon_ids() {
        let mut ids = IdAllocator::default();
        let social = Element::new(ElementKind::Social, &mut ids);
        let all = social.ids();

        assert_eq!(all.len(), 4);
        assert_eq!(ids.peek(), 5);
        assert_eq!(social.icons[0].platform, "facebook");
    }

    #[test]
    fn style_values_parse_their_numeric_part() {
        assert_eq!(StyleValue::from("12px").as_number(), Some(12.0));
        assert_eq!(StyleValue::from("-4.5px").as_number(), Some(-4.5));
        assert_eq!(StyleValue::from("auto").as_number(), None);
        assert_eq!(StyleValue::from(40.0).to_string(), "40");
    }

    #[test]
    fn settings_default_when_fields_are_missing() {
        let settings: GlobalSettings = serde_json::from_str(r##"{"maxWidth": "640px"}"##).unwrap();
        assert_eq!(settings.max_width_px(), 640.0);
        assert_eq!(settings.newsletter_color, "#ffffff");
    }
}
