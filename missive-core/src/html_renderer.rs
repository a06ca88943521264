/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use crate as model;
use crate::export::{kebab_case, social_icon_url};
use crate::styles::SHADOW_KEYS;
use crate::{Document, ElementKind, GlobalSettings, Styles};

use dioxus::prelude::*;

pub type Renderer = fn(&model::Element, &GlobalSettings) -> Element;

/// Keys owned by the positioned frame around an element, or only read by
/// the editor itself.
const FRAME_KEYS: &[&str] = &[
    "left",
    "top",
    "width",
    "height",
    "position",
    "shapeType",
    "fillType",
    "gradientStartColor",
    "gradientEndColor",
    "gradientDirection",
    "iconSize",
];

/// Absolute placement of an element on the canvas.
pub fn frame_css(styles: &Styles) -> String {
    let mut css = format!(
        "position: absolute; left: {}; top: {}; width: {};",
        styles.css_or("left", "0px"),
        styles.css_or("top", "0px"),
        styles.css_or("width", "auto"),
    );
    if let Some(height) = styles.get("height").filter(|value| !value.is_blank()) {
        css.push_str(&format!(" height: {};", height));
    }
    css
}

/// Everything but the frame, as inline CSS for the element body.
pub fn content_css(styles: &Styles) -> String {
    styles
        .iter()
        .filter(|(key, value)| {
            !value.is_blank() && !FRAME_KEYS.contains(&key.as_str()) && !SHADOW_KEYS.contains(&key.as_str())
        })
        .map(|(key, value)| format!("{}: {};", kebab_case(key), value))
        .collect::<Vec<_>>()
        .join(" ")
}

fn typography(element: &model::Element, settings: &GlobalSettings) -> String {
    let font = element.styles.css_or("fontFamily", &settings.font_family);
    format!(
        "box-sizing: border-box; width: 100%; margin: 0; font-family: {}; {}",
        font,
        content_css(&element.styles)
    )
}

pub fn renderer_for(kind: &ElementKind) -> Renderer {
    match kind {
        ElementKind::Text => render_text,
        ElementKind::Header => render_header,
        ElementKind::Image => render_image,
        ElementKind::Button => render_button,
        ElementKind::Divider => render_divider,
        ElementKind::Social => render_social,
        ElementKind::Shape => render_shape,
        ElementKind::Section => render_section,
        ElementKind::Unknown(_) => render_unknown,
    }
}

/// Body of one element, sized to fill its frame.
pub fn render_element(element: &model::Element, settings: &GlobalSettings) -> Element {
    renderer_for(&element.kind)(element, settings)
}

fn render_text(element: &model::Element, settings: &GlobalSettings) -> Element {
    let style = typography(element, settings);
    rsx! {
        p { style: "{style}", "{element.content}" }
    }
}

fn render_header(element: &model::Element, settings: &GlobalSettings) -> Element {
    let style = typography(element, settings);
    rsx! {
        h2 { style: "{style}", "{element.content}" }
    }
}

fn render_image(element: &model::Element, _settings: &GlobalSettings) -> Element {
    let style = format!("display: block; width: 100%; height: 100%; object-fit: cover; {}", content_css(&element.styles));
    if element.content.is_empty() {
        return rsx! {
            div {
                class: "missive-image-placeholder",
                style: "{style}",
                "Upload an image"
            }
        };
    }
    rsx! {
        img { src: "{element.content}", alt: "", style: "{style}" }
    }
}

fn render_button(element: &model::Element, settings: &GlobalSettings) -> Element {
    let style = format!("display: inline-block; {}", typography(element, settings));
    let href = element.link.clone().unwrap_or_else(|| "#".to_string());
    rsx! {
        a { href: "{href}", style: "{style}", "{element.content}" }
    }
}

fn render_divider(element: &model::Element, _settings: &GlobalSettings) -> Element {
    let style = format!(
        "width: 100%; height: 100%; background-color: {}; border-style: {};",
        element.styles.css_or("backgroundColor", "#dddddd"),
        element.styles.css_or("borderStyle", "solid"),
    );
    rsx! {
        div { style: "{style}" }
    }
}

fn render_social(element: &model::Element, _settings: &GlobalSettings) -> Element {
    let size = element.styles.css_or("iconSize", "32px");
    let style = format!(
        "display: flex; justify-content: center; gap: {};",
        element.styles.css_or("gap", "10px")
    );
    let icons: Vec<_> = element
        .icons
        .iter()
        .map(|icon| (icon.id, social_icon_url(&icon.platform), icon.platform.clone()))
        .collect();
    rsx! {
        div { style: "{style}",
            for (id, src, platform) in icons {
                img {
                    key: "{id}",
                    src: "{src}",
                    alt: "{platform}",
                    style: "width: {size}; height: {size};",
                }
            }
        }
    }
}

fn render_shape(element: &model::Element, _settings: &GlobalSettings) -> Element {
    let styles = &element.styles;
    let fill = if styles.get_str("fillType") == Some("gradient") {
        format!(
            "background: linear-gradient({}, {}, {});",
            styles.css_or("gradientDirection", "to right"),
            styles.css_or("gradientStartColor", "#4a90e2"),
            styles.css_or("gradientEndColor", "#9013fe"),
        )
    } else {
        format!("background-color: {};", styles.css_or("backgroundColor", "#4a90e2"))
    };
    let radius = match styles.get_str("shapeType") {
        Some("circle") => "border-radius: 50%;".to_string(),
        _ => String::new(),
    };
    let style = format!("width: 100%; height: 100%; {} {} {}", content_css(styles), fill, radius);
    rsx! {
        div { style: "{style}" }
    }
}

fn render_section(element: &model::Element, settings: &GlobalSettings) -> Element {
    let style = format!(
        "position: relative; box-sizing: border-box; width: 100%; min-height: 100px; {}",
        content_css(&element.styles)
    );
    let children: Vec<_> = element
        .children
        .iter()
        .map(|child| (child.id, frame_css(&child.styles), render_element(child, settings)))
        .collect();
    rsx! {
        div { style: "{style}",
            for (id, frame, body) in children {
                div { key: "{id}", style: "{frame}", {body} }
            }
        }
    }
}

fn render_unknown(element: &model::Element, _settings: &GlobalSettings) -> Element {
    let kind = element.kind.as_str();
    rsx! {
        div { class: "missive-unknown", "Unknown element type: {kind}" }
    }
}

/// Read-only view of the whole newsletter, as shown in preview mode.
pub fn render_to_rsx(document: &Document) -> Element {
    let settings = &document.settings;
    let container_style = format!(
        "position: relative; margin: 0 auto; width: {}; min-height: {}px; background-color: {}; font-family: {}; overflow: hidden;",
        settings.max_width,
        document.canvas_height(),
        settings.newsletter_color,
        settings.font_family,
    );

    let frames: Vec<_> = document
        .elements
        .iter()
        .map(|element| (element.id, frame_css(&element.styles), render_element(element, settings)))
        .collect();

    rsx! {
        div {
            class: "missive-newsletter",
            style: "{container_style}",
            for (id, frame, body) in frames {
                div { key: "{id}", style: "{frame}", {body} }
            }
        }
    }
}

#[cfg(all(test, feature = "rsx"))]
mod tests {
    use super::*;

    #[test]
    fn frame_and_body_split_the_styles() {
        let styles = Styles::new()
            .with("left", "40px")
            .with("top", "12px")
            .with("width", "200px")
            .with("color", "#333333")
            .with("shadowColor", "#000");

        assert_eq!(frame_css(&styles), "position: absolute; left: 40px; top: 12px; width: 200px;");
        assert_eq!(content_css(&styles), "color: #333333;");
    }

    #[test]
    fn test_render_to_rsx() {
        let mut doc = Document::new();
        let header = doc.add_element(ElementKind::Header, 20.0, 20.0);
        doc.update_content(header, "Hello");
        doc.add_element(ElementKind::Social, 20.0, 120.0);
        doc.add_element(ElementKind::Unknown("carousel".into()), 20.0, 200.0);

        let _element = render_to_rsx(&doc);
    }
}
