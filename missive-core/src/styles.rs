/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! The single style reducer every property panel goes through.
//!
//! `merge_style` never mutates its input. It normalizes unit-bearing numbers
//! and keeps the derived properties (`textShadow`, `padding`, `margin`) in
//! step with the discrete sub-fields the panels edit.

use crate::{StyleValue, Styles};

/// Keys whose bare numeric values are stored with a `px` suffix.
pub const PX_KEYS: &[&str] = &[
    "fontSize",
    "padding",
    "paddingTop",
    "paddingRight",
    "paddingBottom",
    "paddingLeft",
    "margin",
    "marginTop",
    "marginRight",
    "marginBottom",
    "marginLeft",
    "borderWidth",
    "borderRadius",
    "width",
    "height",
    "left",
    "top",
    "gap",
    "letterSpacing",
    "iconSize",
    "shadowOffsetX",
    "shadowOffsetY",
    "shadowBlurRadius",
];

pub const SHADOW_KEYS: [&str; 4] = ["shadowOffsetX", "shadowOffsetY", "shadowBlurRadius", "shadowColor"];

pub const SPACING_PROPERTIES: [&str; 2] = ["padding", "margin"];

const SIDES: [&str; 4] = ["Top", "Right", "Bottom", "Left"];

const DEFAULT_SHADOW_OFFSET: &str = "2px";
const DEFAULT_SHADOW_BLUR: &str = "4px";
const DEFAULT_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.3)";

pub fn is_px_key(key: &str) -> bool {
    PX_KEYS.contains(&key)
}

/// Appends `px` to numeric values of unit-bearing keys.
pub fn normalize(key: &str, value: StyleValue) -> StyleValue {
    match value {
        StyleValue::Number(n) if is_px_key(key) => StyleValue::Text(format!("{}px", n)),
        other => other,
    }
}

/// Returns `styles` with `key` set to `raw` and every derived property rebuilt.
pub fn merge_style(styles: &Styles, key: &str, raw: impl Into<StyleValue>) -> Styles {
    let mut next = styles.clone();
    apply(&mut next, key, raw.into());
    next
}

/// Applies several updates in order, as one reducer step.
pub fn merge_styles<'a, I>(styles: &Styles, updates: I) -> Styles
where
    I: IntoIterator<Item = (&'a str, StyleValue)>,
{
    let mut next = styles.clone();
    for (key, value) in updates {
        apply(&mut next, key, value);
    }
    next
}

fn apply(styles: &mut Styles, key: &str, value: StyleValue) {
    styles.insert(key, normalize(key, value));

    if SHADOW_KEYS.contains(&key) && !text_shadow_disabled(styles) {
        styles.insert("textShadow", compose_text_shadow(styles));
    }

    if let Some(property) = spacing_property_of(key) {
        styles.insert(property, spacing_shorthand(styles, property));
    }
}

pub fn text_shadow_disabled(styles: &Styles) -> bool {
    styles.get_str("textShadow") == Some("none")
}

/// `"{x} {y} {blur} {color}"` from the shadow sub-fields.
pub fn compose_text_shadow(styles: &Styles) -> String {
    format!(
        "{} {} {} {}",
        styles.css_or("shadowOffsetX", DEFAULT_SHADOW_OFFSET),
        styles.css_or("shadowOffsetY", DEFAULT_SHADOW_OFFSET),
        styles.css_or("shadowBlurRadius", DEFAULT_SHADOW_BLUR),
        styles.css_or("shadowColor", DEFAULT_SHADOW_COLOR),
    )
}

/// Explicit switch for the text shadow. Disabling is sticky: sub-field
/// edits leave `textShadow` at `none` until this re-enables it.
pub fn set_text_shadow_enabled(styles: &Styles, enabled: bool) -> Styles {
    let mut next = styles.clone();
    if enabled {
        next.insert("textShadow", compose_text_shadow(&next));
    } else {
        next.insert("textShadow", "none");
    }
    next
}

pub fn text_shadow_enabled(styles: &Styles) -> bool {
    matches!(styles.get("textShadow"), Some(value) if !value.is_blank() && value.as_str() != Some("none"))
}

/// Flips `key` between `on` and `off`. Unset counts as `off`.
pub fn toggle_style(styles: &Styles, key: &str, on: &str, off: &str) -> Styles {
    let current = styles.get_str(key);
    let value = if current == Some(on) { off } else { on };
    merge_style(styles, key, value)
}

fn spacing_property_of(key: &str) -> Option<&'static str> {
    SPACING_PROPERTIES.iter().copied().find(|property| {
        key.strip_prefix(property)
            .is_some_and(|side| SIDES.contains(&side))
    })
}

/// Value of one side from the existing shorthand, using the CSS rules for
/// one to four values.
fn shorthand_side(styles: &Styles, property: &str, index: usize) -> Option<String> {
    let parts: Vec<&str> = styles.get_str(property)?.split_whitespace().collect();
    let part = match parts.len() {
        1 => parts[0],
        2 => parts[index % 2],
        3 => [parts[0], parts[1], parts[2], parts[1]][index],
        4 => parts[index],
        _ => return None,
    };
    Some(part.to_string())
}

/// Shorthand for a four-sided property: one value when all sides agree,
/// otherwise `"top right bottom left"`. Sides without their own key keep
/// the value the previous shorthand gave them.
pub fn spacing_shorthand(styles: &Styles, property: &str) -> String {
    let sides: Vec<String> = SIDES
        .iter()
        .enumerate()
        .map(|(index, side)| match styles.get(&format!("{}{}", property, side)) {
            Some(value) if !value.is_blank() => value.to_string(),
            _ => shorthand_side(styles, property, index).unwrap_or_else(|| "0px".to_string()),
        })
        .collect();

    if sides.iter().all(|side| side == &sides[0]) {
        sides[0].clone()
    } else {
        sides.join(" ")
    }
}

/// Side values of `property`, falling back to the shorthand when the side
/// keys were never set.
pub fn spacing_sides(styles: &Styles, property: &str) -> [f64; 4] {
    let mut sides = [0.0; 4];
    for (index, side) in SIDES.iter().enumerate() {
        sides[index] = styles
            .number(&format!("{}{}", property, side))
            .or_else(|| shorthand_side(styles, property, index).and_then(|part| StyleValue::from(part).as_number()))
            .unwrap_or(0.0);
    }
    sides
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_unit_keys_are_stored_as_px() {
        let styles = Styles::new();
        for key in PX_KEYS {
            let merged = merge_style(&styles, key, 12);
            let stored = merged.get_str(key).expect("stored as text");
            assert!(stored.ends_with("px"), "{key} stored as {stored}");
        }
    }

    #[test]
    fn other_keys_pass_through() {
        let merged = merge_style(&Styles::new(), "opacity", 0.5);
        assert_eq!(merged.get("opacity"), Some(&StyleValue::Number(0.5)));

        let merged = merge_style(&Styles::new(), "fontSize", "large");
        assert_eq!(merged.get_str("fontSize"), Some("large"));
    }

    #[test]
    fn merge_leaves_the_input_untouched() {
        let original = Styles::new().with("color", "#000000");
        let _ = merge_style(&original, "color", "#ffffff");
        assert_eq!(original.get_str("color"), Some("#000000"));
    }

    #[test]
    fn shadow_sub_fields_rebuild_text_shadow() {
        let styles = merge_style(&Styles::new(), "shadowOffsetX", 3);
        let styles = merge_style(&styles, "shadowColor", "#ff0000");
        assert_eq!(styles.get_str("textShadow"), Some("3px 2px 4px #ff0000"));
    }

    #[test]
    fn disabled_shadow_is_sticky_until_reenabled() {
        let styles = set_text_shadow_enabled(&Styles::new(), false);
        let styles = merge_style(&styles, "shadowBlurRadius", 9);
        assert_eq!(styles.get_str("textShadow"), Some("none"));
        assert!(!text_shadow_enabled(&styles));

        let styles = set_text_shadow_enabled(&styles, true);
        assert_eq!(styles.get_str("textShadow"), Some("2px 2px 9px rgba(0, 0, 0, 0.3)"));
        assert!(text_shadow_enabled(&styles));
    }

    #[test]
    fn equal_sides_collapse_to_one_value() {
        let mut styles = Styles::new();
        for side in SIDES {
            styles = merge_style(&styles, &format!("padding{side}"), 8);
        }
        assert_eq!(styles.get_str("padding"), Some("8px"));
    }

    #[test]
    fn unequal_sides_expand_in_trbl_order() {
        let styles = merge_styles(
            &Styles::new(),
            [
                ("marginTop", StyleValue::from(1)),
                ("marginRight", StyleValue::from(2)),
                ("marginBottom", StyleValue::from(3)),
                ("marginLeft", StyleValue::from(4)),
            ],
        );
        assert_eq!(styles.get_str("margin"), Some("1px 2px 3px 4px"));
    }

    #[test]
    fn missing_sides_count_as_zero() {
        let styles = merge_style(&Styles::new(), "paddingLeft", 5);
        assert_eq!(styles.get_str("padding"), Some("0px 0px 0px 5px"));
    }

    #[test]
    fn one_side_edit_keeps_the_other_shorthand_sides() {
        let styles = Styles::new().with("padding", "10px");
        let styles = merge_style(&styles, "paddingLeft", 5);
        assert_eq!(styles.get_str("padding"), Some("10px 10px 10px 5px"));
        assert_eq!(spacing_sides(&styles, "padding"), [10.0, 10.0, 10.0, 5.0]);

        let styles = merge_style(&Styles::new().with("margin", "4px 8px"), "marginTop", 0);
        assert_eq!(styles.get_str("margin"), Some("0px 8px 4px 8px"));
    }

    #[test]
    fn toggling_bold_twice_returns_to_normal() {
        let styles = Styles::new().with("fontWeight", "normal");
        let once = toggle_style(&styles, "fontWeight", "bold", "normal");
        assert_eq!(once.get_str("fontWeight"), Some("bold"));
        let twice = toggle_style(&once, "fontWeight", "bold", "normal");
        assert_eq!(twice.get_str("fontWeight"), Some("normal"));
    }

    #[test]
    fn sides_fall_back_to_the_shorthand() {
        let styles = Styles::new().with("padding", "10px 20px");
        assert_eq!(spacing_sides(&styles, "padding"), [10.0, 20.0, 10.0, 20.0]);

        let styles = merge_style(&styles, "paddingTop", 4);
        assert_eq!(spacing_sides(&styles, "padding")[0], 4.0);
    }
}
