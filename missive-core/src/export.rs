/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Static HTML-email output. Elements flow as table rows; canvas
//! coordinates are dropped. Style values are trusted and copied verbatim.

use tracing::debug;

use crate::document::{Document, DEFAULT_TITLE};
use crate::styles::SHADOW_KEYS;
use crate::{Element, ElementKind, GlobalSettings, Styles};

const EDITOR_ONLY_KEYS: &[&str] = &[
    "left",
    "top",
    "position",
    "shapeType",
    "fillType",
    "gradientStartColor",
    "gradientEndColor",
    "gradientDirection",
    "iconSize",
];

const PLACEHOLDER_ICON: &str = "https://via.placeholder.com/32";

type Emitter = fn(&Element, &GlobalSettings) -> String;

pub fn social_icon_url(platform: &str) -> &'static str {
    match platform {
        "facebook" => "https://cdn-icons-png.flaticon.com/512/733/733547.png",
        "twitter" => "https://cdn-icons-png.flaticon.com/512/733/733579.png",
        "instagram" => "https://cdn-icons-png.flaticon.com/512/2111/2111463.png",
        "linkedin" => "https://cdn-icons-png.flaticon.com/512/3536/3536505.png",
        "youtube" => "https://cdn-icons-png.flaticon.com/512/1384/1384060.png",
        _ => PLACEHOLDER_ICON,
    }
}

/// `backgroundColor` -> `background-color`.
pub fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Flattens a style map into `key: value;` declarations, skipping blank
/// values and keys that only mean something on the canvas.
pub fn inline_css(styles: &Styles) -> String {
    styles
        .iter()
        .filter(|(key, value)| {
            !value.is_blank()
                && !EDITOR_ONLY_KEYS.contains(&key.as_str())
                && !SHADOW_KEYS.contains(&key.as_str())
        })
        .map(|(key, value)| format!("{}: {};", kebab_case(key), value))
        .collect::<Vec<_>>()
        .join(" ")
}

fn attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

fn text_css(element: &Element, settings: &GlobalSettings) -> String {
    let mut css = inline_css(&element.styles);
    if !element.styles.contains("fontFamily") {
        css.push_str(&format!(" font-family: {};", settings.font_family));
    }
    css.trim_start().to_string()
}

fn emit_header(element: &Element, settings: &GlobalSettings) -> String {
    format!("<h2 style=\"margin: 0; {}\">{}</h2>", text_css(element, settings), element.content)
}

fn emit_text(element: &Element, settings: &GlobalSettings) -> String {
    format!("<p style=\"margin: 0; {}\">{}</p>", text_css(element, settings), element.content)
}

fn emit_image(element: &Element, _settings: &GlobalSettings) -> String {
    if element.content.is_empty() {
        return String::new();
    }
    format!(
        "<img src=\"{}\" alt=\"\" style=\"display: block; max-width: 100%; {}\">",
        attr(&element.content),
        inline_css(&element.styles)
    )
}

fn emit_button(element: &Element, settings: &GlobalSettings) -> String {
    let href = element.link.as_deref().unwrap_or("#");
    format!(
        "<a href=\"{}\" style=\"display: inline-block; {}\">{}</a>",
        attr(href),
        text_css(element, settings),
        element.content
    )
}

// Thickness and line style are not carried over; exported dividers are a flat 2px bar.
fn emit_divider(element: &Element, _settings: &GlobalSettings) -> String {
    format!(
        "<div style=\"width: {}; height: 2px; background-color: {}; margin: 10px 0;\"></div>",
        element.styles.css_or("width", "100%"),
        element.styles.css_or("backgroundColor", "#dddddd")
    )
}

fn emit_social(element: &Element, _settings: &GlobalSettings) -> String {
    let size = element.styles.number("iconSize").unwrap_or(32.0);
    let half_gap = element.styles.number("gap").unwrap_or(10.0) / 2.0;

    let links: String = element
        .icons
        .iter()
        .map(|icon| {
            format!(
                "<a href=\"{}\" style=\"display: inline-block; margin: 0 {}px;\"><img src=\"{}\" alt=\"{}\" width=\"{}\" height=\"{}\" style=\"display: block;\"></a>",
                attr(&icon.url),
                half_gap,
                social_icon_url(&icon.platform),
                attr(&icon.platform),
                size,
                size
            )
        })
        .collect();

    format!(
        "<div style=\"text-align: {};\">{}</div>",
        element.styles.css_or("textAlign", "center"),
        links
    )
}

fn emit_shape(element: &Element, _settings: &GlobalSettings) -> String {
    let styles = &element.styles;
    let mut css = inline_css(styles);

    if styles.get_str("fillType") == Some("gradient") {
        css.push_str(&format!(
            " background: linear-gradient({}, {}, {});",
            styles.css_or("gradientDirection", "to right"),
            styles.css_or("gradientStartColor", "#4a90e2"),
            styles.css_or("gradientEndColor", "#9013fe")
        ));
    }
    if styles.get_str("shapeType") == Some("circle") {
        css.push_str(" border-radius: 50%;");
    }

    format!("<div style=\"display: block; {}\"></div>", css.trim_start())
}

// Children stay in the editor; only the container box is emitted.
fn emit_section(element: &Element, _settings: &GlobalSettings) -> String {
    format!("<div style=\"{}\"></div>", inline_css(&element.styles))
}

fn emitter_for(kind: &ElementKind) -> Option<Emitter> {
    match kind {
        ElementKind::Header => Some(emit_header),
        ElementKind::Text => Some(emit_text),
        ElementKind::Image => Some(emit_image),
        ElementKind::Button => Some(emit_button),
        ElementKind::Divider => Some(emit_divider),
        ElementKind::Social => Some(emit_social),
        ElementKind::Shape => Some(emit_shape),
        ElementKind::Section => Some(emit_section),
        ElementKind::Unknown(_) => None,
    }
}

/// One `<tr>` for an element, or `None` when its type has no export form.
pub fn export_row(element: &Element, settings: &GlobalSettings) -> Option<String> {
    let Some(emit) = emitter_for(&element.kind) else {
        debug!(id = element.id, kind = %element.kind, "skipping element with no export form");
        return None;
    };
    Some(format!(
        "<tr><td style=\"padding: 10px 20px;\">{}</td></tr>",
        emit(element, settings)
    ))
}

pub fn export_to_html(elements: &[Element], settings: &GlobalSettings) -> String {
    render_page(DEFAULT_TITLE, elements, settings)
}

pub fn export_document(document: &Document) -> String {
    render_page(&document.title, &document.elements, &document.settings)
}

fn render_page(title: &str, elements: &[Element], settings: &GlobalSettings) -> String {
    let rows: String = elements
        .iter()
        .filter_map(|element| export_row(element, settings))
        .collect::<Vec<_>>()
        .join("\n");

    debug!(elements = elements.len(), bytes = rows.len(), "exported newsletter");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
</head>
<body style="margin: 0; padding: 0; background-color: {background}; font-family: {font};">
<table role="presentation" width="100%" cellpadding="0" cellspacing="0" border="0" style="background-color: {background};">
<tr><td align="center" style="padding: 20px 0;">
<table role="presentation" width="{width}" cellpadding="0" cellspacing="0" border="0" style="width: 100%; max-width: {max_width}; background-color: {newsletter};">
{rows}
</table>
</td></tr>
</table>
</body>
</html>
"#,
        title = title,
        background = settings.background_color,
        font = settings.font_family,
        width = settings.max_width_px(),
        max_width = settings.max_width,
        newsletter = settings.newsletter_color,
        rows = rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IdAllocator, SocialIcon, StyleValue};

    fn settings() -> GlobalSettings {
        GlobalSettings::default()
    }

    #[test]
    fn header_and_facebook_icon_export() {
        let mut ids = IdAllocator::default();
        let mut header = Element::new(ElementKind::Header, &mut ids);
        header.content = "Hi".to_string();
        let mut social = Element::new(ElementKind::Social, &mut ids);
        social.icons = vec![SocialIcon { id: 99, platform: "facebook".into(), url: "https://facebook.com/missive".into() }];

        let html = export_to_html(&[header, social], &settings());

        assert!(html.contains("<h2 "));
        assert!(html.contains(">Hi</h2>"));
        let img = "<img src=\"https://cdn-icons-png.flaticon.com/512/733/733547.png\"";
        let at = html.find(img).expect("facebook icon");
        let anchor = html[..at].rfind("<a ").expect("wrapping anchor");
        assert!(html[anchor..at].contains("href=\"https://facebook.com/missive\""));
        assert!(html[at..].contains("</a>"));
    }

    #[test]
    fn css_keys_become_kebab_case() {
        assert_eq!(kebab_case("backgroundColor"), "background-color");
        assert_eq!(kebab_case("borderTopLeftRadius"), "border-top-left-radius");
        assert_eq!(kebab_case("color"), "color");
    }

    #[test]
    fn editor_only_keys_are_not_emitted() {
        let styles = Styles::new()
            .with("left", "40px")
            .with("top", "10px")
            .with("shadowColor", "#000")
            .with("textShadow", "1px 1px 2px #000")
            .with("fontSize", "16px")
            .with("color", "")
            .with("opacity", StyleValue::Number(0.5));

        let css = inline_css(&styles);
        assert_eq!(css, "font-size: 16px; opacity: 0.5; text-shadow: 1px 1px 2px #000;");
    }

    #[test]
    fn empty_images_and_unknown_types_emit_nothing() {
        let mut ids = IdAllocator::default();
        let image = Element::new(ElementKind::Image, &mut ids);
        let unknown = Element::new(ElementKind::Unknown("carousel".into()), &mut ids);

        assert_eq!(export_row(&image, &settings()).as_deref(), Some("<tr><td style=\"padding: 10px 20px;\"></td></tr>"));
        assert!(export_row(&unknown, &settings()).is_none());
    }

    #[test]
    fn unknown_platforms_use_the_placeholder() {
        assert_eq!(social_icon_url("mastodon"), PLACEHOLDER_ICON);
        assert!(social_icon_url("youtube").contains("1384060"));
    }

    #[test]
    fn dividers_export_at_a_fixed_height() {
        let mut ids = IdAllocator::default();
        let mut divider = Element::new(ElementKind::Divider, &mut ids);
        divider.styles.insert("height", "8px");

        let row = export_row(&divider, &settings()).unwrap();
        assert!(row.contains("height: 2px;"));
        assert!(!row.contains("8px"));
    }

    #[test]
    fn section_children_are_left_out() {
        let mut ids = IdAllocator::default();
        let mut section = Element::new(ElementKind::Section, &mut ids);
        let mut child = Element::new(ElementKind::Text, &mut ids);
        child.content = "nested copy".into();
        section.children.push(child);

        let html = export_to_html(&[section], &settings());
        assert!(!html.contains("nested copy"));
    }

    #[test]
    fn page_uses_settings_and_title() {
        let mut doc = Document::new();
        doc.title = "Spring Update".into();
        doc.settings.max_width = "640px".into();

        let html = export_document(&doc);
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"en\">"));
        assert!(html.contains("<meta charset=\"UTF-8\">"));
        assert!(html.contains("<title>Spring Update</title>"));
        assert!(html.contains("max-width: 640px;"));
        assert!(html.contains("width=\"640\""));
    }

    #[test]
    fn gradient_shapes_carry_their_fill() {
        let mut ids = IdAllocator::default();
        let mut shape = Element::new(ElementKind::Shape, &mut ids);
        shape.styles.insert("fillType", "gradient");
        shape.styles.insert("shapeType", "circle");

        let row = export_row(&shape, &settings()).unwrap();
        assert!(row.contains("linear-gradient(to right, #4a90e2, #9013fe)"));
        assert!(row.contains("border-radius: 50%;"));
        assert!(!row.contains("shape-type"));
    }
}
