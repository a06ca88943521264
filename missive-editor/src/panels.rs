/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Property panels. Panels only read the selected element and emit
//! [`EditCommand`]s; the editor applies them to the document.

use dioxus::logger::tracing::warn;
use dioxus::prelude::*;
use missive_core::document::Reorder;
use missive_core::styles::{spacing_sides, text_shadow_enabled};
use missive_core::upload::image_data_uri;
use missive_core::{self as model, Document, ElementId, ElementKind, GlobalSettings, StyleValue, Styles};

const FONT_FAMILIES: &[(&str, &str)] = &[
    ("Arial, sans-serif", "Arial"),
    ("Helvetica, sans-serif", "Helvetica"),
    ("Georgia, serif", "Georgia"),
    ("'Times New Roman', serif", "Times New Roman"),
    ("Verdana, sans-serif", "Verdana"),
    ("'Courier New', monospace", "Courier New"),
];

const ALIGNMENTS: &[(&str, &str)] = &[("left", "Left"), ("center", "Center"), ("right", "Right"), ("justify", "Justify")];

const BORDER_STYLES: &[(&str, &str)] = &[("solid", "Solid"), ("dashed", "Dashed"), ("dotted", "Dotted"), ("double", "Double")];

const PLATFORMS: &[(&str, &str)] = &[
    ("facebook", "Facebook"),
    ("twitter", "Twitter"),
    ("instagram", "Instagram"),
    ("linkedin", "LinkedIn"),
    ("youtube", "YouTube"),
];

const SHAPES: &[(&str, &str)] = &[("rectangle", "Rectangle"), ("circle", "Circle")];

const FILLS: &[(&str, &str)] = &[("solid", "Solid"), ("gradient", "Gradient")];

const GRADIENT_DIRECTIONS: &[(&str, &str)] = &[
    ("to right", "Left to right"),
    ("to bottom", "Top to bottom"),
    ("to bottom right", "Diagonal"),
    ("135deg", "135°"),
];

/// A change requested by a panel against the selected element.
#[derive(Clone, Debug, PartialEq)]
pub enum EditCommand {
    Style(String, StyleValue),
    Toggle {
        key: &'static str,
        on: &'static str,
        off: &'static str,
    },
    TextShadow(bool),
    Content(String),
    Link(String),
    Image(String),
    AddIcon(String),
    UpdateIcon {
        icon: ElementId,
        platform: Option<String>,
        url: Option<String>,
    },
    RemoveIcon(ElementId),
    Reorder(Reorder),
    Duplicate,
    Delete,
}

impl EditCommand {
    pub fn style(key: &str, value: impl Into<StyleValue>) -> Self {
        EditCommand::Style(key.to_string(), value.into())
    }
}

/// What the selection should become after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Keep,
    Select(ElementId),
    Clear,
}

pub fn apply_command(document: &mut Document, id: ElementId, command: EditCommand) -> Selection {
    match command {
        EditCommand::Style(key, value) => {
            document.update_style(id, &key, value);
        }
        EditCommand::Toggle { key, on, off } => {
            document.toggle_style(id, key, on, off);
        }
        EditCommand::TextShadow(enabled) => {
            document.set_text_shadow_enabled(id, enabled);
        }
        EditCommand::Content(content) => {
            document.update_content(id, content);
        }
        EditCommand::Link(link) => {
            document.update_link(id, link);
        }
        EditCommand::Image(uri) => {
            document.set_image(id, uri);
        }
        EditCommand::AddIcon(platform) => {
            document.add_icon(id, &platform);
        }
        EditCommand::UpdateIcon { icon, platform, url } => {
            document.update_icon(id, icon, platform.as_deref(), url.as_deref());
        }
        EditCommand::RemoveIcon(icon) => {
            document.remove_icon(id, icon);
        }
        EditCommand::Reorder(direction) => {
            document.reorder(id, direction);
        }
        EditCommand::Duplicate => {
            if let Some(copy) = document.duplicate_element(id) {
                return Selection::Select(copy);
            }
        }
        EditCommand::Delete => {
            if document.delete_element(id).is_some() {
                return Selection::Clear;
            }
        }
    }
    Selection::Keep
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettingsField {
    Title,
    BackgroundColor,
    NewsletterColor,
    MaxWidth,
    MinHeight,
    FontFamily,
}

pub fn apply_setting(document: &mut Document, field: SettingsField, value: String) {
    let settings = &mut document.settings;
    match field {
        SettingsField::Title => document.title = value,
        SettingsField::BackgroundColor => settings.background_color = value,
        SettingsField::NewsletterColor => settings.newsletter_color = value,
        SettingsField::MaxWidth => settings.max_width = with_px(value),
        SettingsField::MinHeight => settings.min_height = with_px(value),
        SettingsField::FontFamily => settings.font_family = value,
    }
}

fn with_px(value: String) -> String {
    if value.parse::<f64>().is_ok() {
        format!("{}px", value)
    } else {
        value
    }
}

fn number(styles: &Styles, key: &str, default: f64) -> f64 {
    styles.number(key).unwrap_or(default)
}

fn options(pairs: &[(&'static str, &'static str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(value, label)| (value.to_string(), label.to_string())).collect()
}

#[component]
fn NumberField(label: String, value: f64, onchange: EventHandler<f64>) -> Element {
    rsx! {
        div { class: "control-group",
            label { "{label}" }
            input {
                r#type: "number",
                value: "{value}",
                oninput: move |evt| {
                    if let Ok(parsed) = evt.value().parse::<f64>() {
                        onchange.call(parsed);
                    }
                }
            }
        }
    }
}

#[component]
fn ColorField(label: String, value: String, onchange: EventHandler<String>) -> Element {
    rsx! {
        div { class: "control-group",
            label { "{label}" }
            input {
                r#type: "color",
                value: "{value}",
                oninput: move |evt| onchange.call(evt.value()),
            }
        }
    }
}

#[component]
fn TextField(label: String, value: String, onchange: EventHandler<String>) -> Element {
    rsx! {
        div { class: "control-group",
            label { "{label}" }
            input {
                r#type: "text",
                value: "{value}",
                oninput: move |evt| onchange.call(evt.value()),
            }
        }
    }
}

#[component]
fn SelectField(label: String, value: String, options: Vec<(String, String)>, onchange: EventHandler<String>) -> Element {
    rsx! {
        div { class: "control-group",
            label { "{label}" }
            select {
                onchange: move |evt| onchange.call(evt.value()),
                for (option_value, option_label) in options {
                    option {
                        selected: option_value == value,
                        value: "{option_value}",
                        "{option_label}"
                    }
                }
            }
        }
    }
}

#[component]
pub fn PropertyPanel(element: model::Element, on_command: EventHandler<EditCommand>) -> Element {
    let specific = match element.kind {
        ElementKind::Text | ElementKind::Header => rsx! { TextPanel { element: element.clone(), on_command } },
        ElementKind::Image => rsx! { ImagePanel { element: element.clone(), on_command } },
        ElementKind::Button => rsx! { ButtonPanel { element: element.clone(), on_command } },
        ElementKind::Divider => rsx! { DividerPanel { element: element.clone(), on_command } },
        ElementKind::Social => rsx! { SocialPanel { element: element.clone(), on_command } },
        ElementKind::Shape => rsx! { ShapePanel { element: element.clone(), on_command } },
        ElementKind::Section => rsx! {
            ColorField {
                label: "Background",
                value: element.styles.css_or("backgroundColor", "#fafafa"),
                onchange: move |v: String| on_command.call(EditCommand::style("backgroundColor", v)),
            }
        },
        ElementKind::Unknown(ref name) => rsx! {
            div { class: "empty-state", "No editor for \"{name}\" elements" }
        },
    };
    let heading = element.kind.label().to_string();

    rsx! {
        div { class: "inspector-panel",
            h3 { "{heading}" }
            {specific}
            LayoutPanel { element: element.clone(), on_command }
        }
    }
}

#[component]
fn TextPanel(element: model::Element, on_command: EventHandler<EditCommand>) -> Element {
    let styles = &element.styles;
    let bold = styles.get_str("fontWeight") == Some("bold");
    let italic = styles.get_str("fontStyle") == Some("italic");
    let underline = styles.get_str("textDecoration") == Some("underline");
    let shadow = text_shadow_enabled(styles);

    rsx! {
        div { class: "control-group",
            label { "Content" }
            textarea {
                value: "{element.content}",
                oninput: move |evt| on_command.call(EditCommand::Content(evt.value())),
            }
        }
        NumberField {
            label: "Font size",
            value: number(styles, "fontSize", 16.0),
            onchange: move |v: f64| on_command.call(EditCommand::style("fontSize", v)),
        }
        SelectField {
            label: "Font",
            value: styles.css_or("fontFamily", "Arial, sans-serif"),
            options: options(FONT_FAMILIES),
            onchange: move |v: String| on_command.call(EditCommand::style("fontFamily", v)),
        }
        ColorField {
            label: "Color",
            value: styles.css_or("color", "#333333"),
            onchange: move |v: String| on_command.call(EditCommand::style("color", v)),
        }
        SelectField {
            label: "Align",
            value: styles.css_or("textAlign", "left"),
            options: options(ALIGNMENTS),
            onchange: move |v: String| on_command.call(EditCommand::style("textAlign", v)),
        }
        div { class: "button-row",
            button {
                class: if bold { "toggle-btn active" } else { "toggle-btn" },
                onclick: move |_| on_command.call(EditCommand::Toggle { key: "fontWeight", on: "bold", off: "normal" }),
                "B"
            }
            button {
                class: if italic { "toggle-btn active" } else { "toggle-btn" },
                onclick: move |_| on_command.call(EditCommand::Toggle { key: "fontStyle", on: "italic", off: "normal" }),
                "I"
            }
            button {
                class: if underline { "toggle-btn active" } else { "toggle-btn" },
                onclick: move |_| on_command.call(EditCommand::Toggle { key: "textDecoration", on: "underline", off: "none" }),
                "U"
            }
        }
        NumberField {
            label: "Line height",
            value: number(styles, "lineHeight", 1.5),
            onchange: move |v: f64| on_command.call(EditCommand::style("lineHeight", v)),
        }
        NumberField {
            label: "Letter spacing",
            value: number(styles, "letterSpacing", 0.0),
            onchange: move |v: f64| on_command.call(EditCommand::style("letterSpacing", v)),
        }
        ColorField {
            label: "Background",
            value: styles.css_or("backgroundColor", "#ffffff"),
            onchange: move |v: String| on_command.call(EditCommand::style("backgroundColor", v)),
        }
        div { class: "control-group inline",
            label { "Text shadow" }
            input {
                r#type: "checkbox",
                checked: shadow,
                onchange: move |evt| on_command.call(EditCommand::TextShadow(evt.checked())),
            }
        }
        if shadow {
            NumberField {
                label: "Shadow X",
                value: number(styles, "shadowOffsetX", 2.0),
                onchange: move |v: f64| on_command.call(EditCommand::style("shadowOffsetX", v)),
            }
            NumberField {
                label: "Shadow Y",
                value: number(styles, "shadowOffsetY", 2.0),
                onchange: move |v: f64| on_command.call(EditCommand::style("shadowOffsetY", v)),
            }
            NumberField {
                label: "Blur",
                value: number(styles, "shadowBlurRadius", 4.0),
                onchange: move |v: f64| on_command.call(EditCommand::style("shadowBlurRadius", v)),
            }
            ColorField {
                label: "Shadow color",
                value: styles.css_or("shadowColor", "#000000"),
                onchange: move |v: String| on_command.call(EditCommand::style("shadowColor", v)),
            }
        }
    }
}

#[component]
fn ImagePanel(element: model::Element, on_command: EventHandler<EditCommand>) -> Element {
    let styles = &element.styles;
    let external = if element.content.starts_with("data:") { String::new() } else { element.content.clone() };

    rsx! {
        div { class: "control-group",
            label { "Upload" }
            input {
                r#type: "file",
                accept: "image/*",
                onchange: move |evt| async move {
                    let Some(file) = evt.files().into_iter().next() else {
                        return;
                    };
                    match file.read_bytes().await {
                        Ok(bytes) => match image_data_uri(&bytes) {
                            Ok(uri) => on_command.call(EditCommand::Image(uri)),
                            Err(err) => warn!(%err, "image upload rejected"),
                        },
                        Err(err) => warn!(?err, "could not read uploaded file"),
                    }
                }
            }
        }
        TextField {
            label: "Image URL",
            value: external,
            onchange: move |v: String| on_command.call(EditCommand::Image(v)),
        }
        NumberField {
            label: "Corner radius",
            value: number(styles, "borderRadius", 0.0),
            onchange: move |v: f64| on_command.call(EditCommand::style("borderRadius", v)),
        }
        NumberField {
            label: "Opacity",
            value: number(styles, "opacity", 1.0),
            onchange: move |v: f64| on_command.call(EditCommand::style("opacity", v.clamp(0.0, 1.0))),
        }
    }
}

#[component]
fn ButtonPanel(element: model::Element, on_command: EventHandler<EditCommand>) -> Element {
    let styles = &element.styles;
    let link = element.link.clone().unwrap_or_default();

    rsx! {
        TextField {
            label: "Label",
            value: element.content.clone(),
            onchange: move |v: String| on_command.call(EditCommand::Content(v)),
        }
        TextField {
            label: "Link",
            value: link,
            onchange: move |v: String| on_command.call(EditCommand::Link(v)),
        }
        ColorField {
            label: "Background",
            value: styles.css_or("backgroundColor", "#007bff"),
            onchange: move |v: String| on_command.call(EditCommand::style("backgroundColor", v)),
        }
        ColorField {
            label: "Text color",
            value: styles.css_or("color", "#ffffff"),
            onchange: move |v: String| on_command.call(EditCommand::style("color", v)),
        }
        NumberField {
            label: "Font size",
            value: number(styles, "fontSize", 16.0),
            onchange: move |v: f64| on_command.call(EditCommand::style("fontSize", v)),
        }
        NumberField {
            label: "Corner radius",
            value: number(styles, "borderRadius", 4.0),
            onchange: move |v: f64| on_command.call(EditCommand::style("borderRadius", v)),
        }
        button {
            class: "toggle-btn",
            onclick: move |_| on_command.call(EditCommand::Toggle { key: "fontWeight", on: "bold", off: "normal" }),
            "Bold"
        }
    }
}

#[component]
fn DividerPanel(element: model::Element, on_command: EventHandler<EditCommand>) -> Element {
    let styles = &element.styles;
    rsx! {
        ColorField {
            label: "Color",
            value: styles.css_or("backgroundColor", "#dddddd"),
            onchange: move |v: String| on_command.call(EditCommand::style("backgroundColor", v)),
        }
        NumberField {
            label: "Thickness",
            value: number(styles, "height", 2.0),
            onchange: move |v: f64| on_command.call(EditCommand::style("height", v.max(1.0))),
        }
        SelectField {
            label: "Line style",
            value: styles.css_or("borderStyle", "solid"),
            options: options(BORDER_STYLES),
            onchange: move |v: String| on_command.call(EditCommand::style("borderStyle", v)),
        }
    }
}

#[component]
fn SocialPanel(element: model::Element, on_command: EventHandler<EditCommand>) -> Element {
    let styles = &element.styles;
    let mut new_platform = use_signal(|| "linkedin".to_string());

    rsx! {
        for icon in element.icons.clone() {
            div { key: "{icon.id}", class: "icon-row",
                SelectField {
                    label: "Platform",
                    value: icon.platform.clone(),
                    options: options(PLATFORMS),
                    onchange: move |v: String| on_command.call(EditCommand::UpdateIcon { icon: icon.id, platform: Some(v), url: None }),
                }
                TextField {
                    label: "URL",
                    value: icon.url.clone(),
                    onchange: move |v: String| on_command.call(EditCommand::UpdateIcon { icon: icon.id, platform: None, url: Some(v) }),
                }
                button {
                    class: "action-btn danger",
                    onclick: move |_| on_command.call(EditCommand::RemoveIcon(icon.id)),
                    "Remove"
                }
            }
        }
        div { class: "button-row",
            select {
                onchange: move |evt| new_platform.set(evt.value()),
                for (value, label) in PLATFORMS.iter() {
                    option { selected: *value == new_platform(), value: "{value}", "{label}" }
                }
            }
            button {
                class: "primary-btn",
                onclick: move |_| on_command.call(EditCommand::AddIcon(new_platform())),
                "Add icon"
            }
        }
        NumberField {
            label: "Icon size",
            value: number(styles, "iconSize", 32.0),
            onchange: move |v: f64| on_command.call(EditCommand::style("iconSize", v)),
        }
        NumberField {
            label: "Spacing",
            value: number(styles, "gap", 10.0),
            onchange: move |v: f64| on_command.call(EditCommand::style("gap", v)),
        }
    }
}

#[component]
fn ShapePanel(element: model::Element, on_command: EventHandler<EditCommand>) -> Element {
    let styles = &element.styles;
    let gradient = styles.get_str("fillType") == Some("gradient");

    rsx! {
        SelectField {
            label: "Shape",
            value: styles.css_or("shapeType", "rectangle"),
            options: options(SHAPES),
            onchange: move |v: String| on_command.call(EditCommand::style("shapeType", v)),
        }
        SelectField {
            label: "Fill",
            value: styles.css_or("fillType", "solid"),
            options: options(FILLS),
            onchange: move |v: String| on_command.call(EditCommand::style("fillType", v)),
        }
        if gradient {
            ColorField {
                label: "Start color",
                value: styles.css_or("gradientStartColor", "#4a90e2"),
                onchange: move |v: String| on_command.call(EditCommand::style("gradientStartColor", v)),
            }
            ColorField {
                label: "End color",
                value: styles.css_or("gradientEndColor", "#9013fe"),
                onchange: move |v: String| on_command.call(EditCommand::style("gradientEndColor", v)),
            }
            SelectField {
                label: "Direction",
                value: styles.css_or("gradientDirection", "to right"),
                options: options(GRADIENT_DIRECTIONS),
                onchange: move |v: String| on_command.call(EditCommand::style("gradientDirection", v)),
            }
        } else {
            ColorField {
                label: "Color",
                value: styles.css_or("backgroundColor", "#4a90e2"),
                onchange: move |v: String| on_command.call(EditCommand::style("backgroundColor", v)),
            }
        }
        NumberField {
            label: "Corner radius",
            value: number(styles, "borderRadius", 0.0),
            onchange: move |v: f64| on_command.call(EditCommand::style("borderRadius", v)),
        }
    }
}

/// Position, size, padding and element actions shared by every type.
#[component]
fn LayoutPanel(element: model::Element, on_command: EventHandler<EditCommand>) -> Element {
    let styles = &element.styles;
    let padding = spacing_sides(styles, "padding");
    let sides = ["Top", "Right", "Bottom", "Left"];
    let fixed_height = element.kind == ElementKind::Divider;

    rsx! {
        h4 { "Layout" }
        div { class: "control-row",
            NumberField {
                label: "X",
                value: element.left(),
                onchange: move |v: f64| on_command.call(EditCommand::style("left", v.max(0.0))),
            }
            NumberField {
                label: "Y",
                value: element.top(),
                onchange: move |v: f64| on_command.call(EditCommand::style("top", v.max(0.0))),
            }
        }
        div { class: "control-row",
            NumberField {
                label: "Width",
                value: number(styles, "width", 200.0),
                onchange: move |v: f64| on_command.call(EditCommand::style("width", v.max(missive_core::interaction::MIN_WIDTH))),
            }
            if !fixed_height {
                NumberField {
                    label: "Height",
                    value: number(styles, "height", 0.0),
                    onchange: move |v: f64| on_command.call(EditCommand::style("height", v.max(missive_core::interaction::MIN_HEIGHT))),
                }
            }
        }
        div { class: "control-row",
            for (side, value) in sides.into_iter().zip(padding) {
                NumberField {
                    key: "{side}",
                    label: "Padding {side}",
                    value,
                    onchange: move |v: f64| on_command.call(EditCommand::style(&format!("padding{side}"), v.max(0.0))),
                }
            }
        }
        div { class: "button-row",
            button {
                class: "action-btn",
                title: "Bring forward",
                onclick: move |_| on_command.call(EditCommand::Reorder(Reorder::Raise)),
                "Up"
            }
            button {
                class: "action-btn",
                title: "Send backward",
                onclick: move |_| on_command.call(EditCommand::Reorder(Reorder::Lower)),
                "Down"
            }
            button {
                class: "action-btn",
                onclick: move |_| on_command.call(EditCommand::Duplicate),
                "Duplicate"
            }
            button {
                class: "action-btn danger",
                onclick: move |_| on_command.call(EditCommand::Delete),
                "Delete"
            }
        }
    }
}

#[component]
pub fn SettingsPanel(title: String, settings: GlobalSettings, on_change: EventHandler<(SettingsField, String)>) -> Element {
    rsx! {
        div { class: "inspector-panel",
            h3 { "Newsletter" }
            TextField {
                label: "Title",
                value: title,
                onchange: move |v: String| on_change.call((SettingsField::Title, v)),
            }
            ColorField {
                label: "Page background",
                value: settings.background_color.clone(),
                onchange: move |v: String| on_change.call((SettingsField::BackgroundColor, v)),
            }
            ColorField {
                label: "Newsletter background",
                value: settings.newsletter_color.clone(),
                onchange: move |v: String| on_change.call((SettingsField::NewsletterColor, v)),
            }
            NumberField {
                label: "Max width",
                value: settings.max_width_px(),
                onchange: move |v: f64| on_change.call((SettingsField::MaxWidth, v.to_string())),
            }
            NumberField {
                label: "Min height",
                value: settings.min_height_px(),
                onchange: move |v: f64| on_change.call((SettingsField::MinHeight, v.to_string())),
            }
            SelectField {
                label: "Font",
                value: settings.font_family.clone(),
                options: options(FONT_FAMILIES),
                onchange: move |v: String| on_change.call((SettingsField::FontFamily, v)),
            }
        }
    }
}
