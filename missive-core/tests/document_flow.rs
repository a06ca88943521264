/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use missive_core::interaction::{Point, ResizeOrigin};
use missive_core::placement::SECTION_PRESETS;
use missive_core::styles::{merge_style, spacing_shorthand, spacing_sides, toggle_style, PX_KEYS};
use missive_core::template::{decode_share_code, encode_share_code};
use missive_core::{
    export_document, CanvasMetrics, CanvasRect, Document, DropPayload, EditorMode, ElementKind, Handle,
    Interaction, SocialIcon, Styles,
};

fn canvas() -> CanvasRect {
    CanvasRect { left: 250.0, top: 60.0, width: 600.0, height: 800.0 }
}

#[test]
fn unit_keys_always_end_in_px() {
    for key in PX_KEYS {
        for value in [0.0, 3.5, 120.0, -8.0] {
            let styles = merge_style(&Styles::new(), key, value);
            assert!(styles.get_str(key).is_some_and(|v| v.ends_with("px")), "{key}");
        }
    }
}

#[test]
fn spacing_shorthand_matches_side_values() {
    let cases = [([5, 5, 5, 5], "5px"), ([1, 2, 3, 4], "1px 2px 3px 4px"), ([0, 8, 0, 8], "0px 8px 0px 8px")];
    for (sides, expected) in cases {
        let mut styles = Styles::new();
        for (side, value) in ["Top", "Right", "Bottom", "Left"].iter().zip(sides) {
            styles = merge_style(&styles, &format!("padding{side}"), value);
        }
        assert_eq!(styles.get_str("padding"), Some(expected));
        assert_eq!(spacing_shorthand(&styles, "padding"), expected);
    }
}

#[test]
fn editing_one_padding_side_of_a_text_element_keeps_the_rest() {
    let mut doc = Document::new();
    let id = doc.add_element(ElementKind::Text, 0.0, 0.0);
    assert_eq!(spacing_sides(&doc.find(id).unwrap().styles, "padding"), [10.0; 4]);

    doc.update_style(id, "paddingLeft", 5.0);
    let styles = &doc.find(id).unwrap().styles;
    assert_eq!(styles.get_str("padding"), Some("10px 10px 10px 5px"));
    assert_eq!(spacing_sides(styles, "padding"), [10.0, 10.0, 10.0, 5.0]);
}

#[test]
fn palette_drops_stay_inside_the_canvas() {
    let metrics = CanvasMetrics::default();
    let mut doc = Document::new();

    for kind in ElementKind::PALETTE {
        for (x, y) in [(0.0, 0.0), (1200.0, 1200.0), (400.0, 300.0)] {
            let ids = doc.drop_payload(&DropPayload::Element(kind.clone()), x, y, Some(canvas()), &metrics);
            assert_eq!(ids.len(), 1);
            let element = doc.find(ids[0]).unwrap();
            assert!(element.left() >= 0.0 && element.left() <= 600.0 - metrics.default_width);
            assert!(element.top() >= 0.0 && element.top() <= 800.0 - metrics.default_height);
        }
    }
}

#[test]
fn header_text_button_section_stacks_in_order() {
    let metrics = CanvasMetrics::default();
    let mut doc = Document::new();
    let ids = doc.drop_payload(
        &DropPayload::Section("header-text-button".into()),
        450.0,
        160.0,
        Some(canvas()),
        &metrics,
    );

    let placed: Vec<_> = ids.iter().map(|id| doc.find(*id).unwrap()).collect();
    let kinds: Vec<_> = placed.iter().map(|e| e.kind.clone()).collect();
    assert_eq!(kinds, [ElementKind::Header, ElementKind::Text, ElementKind::Button]);
    assert_eq!(placed[1].top() - placed[0].top(), metrics.section_spacing);
    assert_eq!(placed[2].top() - placed[1].top(), metrics.section_spacing);
}

#[test]
fn every_preset_expands_to_its_kinds() {
    let mut doc = Document::new();
    for preset in SECTION_PRESETS {
        let ids = doc.drop_payload(
            &DropPayload::Section(preset.key.into()),
            400.0,
            100.0,
            Some(canvas()),
            &CanvasMetrics::default(),
        );
        assert_eq!(ids.len(), preset.kinds.len(), "{}", preset.key);
    }
}

#[test]
fn bold_toggle_round_trips() {
    let mut doc = Document::new();
    let text = doc.add_element(ElementKind::Text, 0.0, 0.0);
    doc.update_style(text, "fontWeight", "normal");

    doc.toggle_style(text, "fontWeight", "bold", "normal");
    doc.toggle_style(text, "fontWeight", "bold", "normal");
    assert_eq!(doc.find(text).unwrap().styles.get_str("fontWeight"), Some("normal"));

    let styles = toggle_style(&Styles::new(), "fontStyle", "italic", "normal");
    assert_eq!(styles.get_str("fontStyle"), Some("italic"));
}

#[test]
fn export_contains_header_and_facebook_link() {
    let mut doc = Document::new();
    let header = doc.add_element(ElementKind::Header, 0.0, 0.0);
    doc.update_content(header, "Hi");
    let social = doc.add_element(ElementKind::Social, 0.0, 100.0);
    doc.find_mut(social).unwrap().icons = vec![SocialIcon { id: 500, platform: "facebook".into(), url: "#".into() }];

    let html = export_document(&doc);
    let h2 = html.find("<h2 ").expect("header tag");
    assert!(html[h2..].contains(">Hi</h2>"));

    let icon = "<img src=\"https://cdn-icons-png.flaticon.com/512/733/733547.png\"";
    let at = html.find(icon).expect("facebook icon");
    assert!(html[..at].rfind("<a ").is_some());
    assert!(html[at..].find("</a>").is_some());
}

#[test]
fn deleting_preserves_the_order_of_the_rest() {
    let mut doc = Document::new();
    let ids: Vec<_> = (0..6)
        .map(|i| doc.add_element(ElementKind::Text, 0.0, i as f64 * 60.0))
        .collect();

    doc.delete_element(ids[2]);
    doc.delete_element(ids[5]);

    let remaining: Vec<_> = doc.elements.iter().map(|e| e.id).collect();
    assert_eq!(remaining, vec![ids[0], ids[1], ids[3], ids[4]]);
}

#[test]
fn bottom_right_resize_is_committed_to_the_document() {
    let mut doc = Document::new();
    let image = doc.add_element(ElementKind::Image, 30.0, 40.0);
    let origin = ResizeOrigin { left: 30.0, top: 40.0, width: 200.0, height: 150.0 };

    let mut interaction = Interaction::default();
    assert!(interaction.begin_resize(
        EditorMode::Editor,
        image,
        &ElementKind::Image,
        Some(image),
        Handle::BottomRight,
        Point::new(500.0, 500.0),
        origin,
    ));
    let update = interaction.pointer_move(EditorMode::Editor, Point::new(540.0, 520.0)).unwrap();
    doc.apply_interaction(&update);
    interaction.pointer_up(EditorMode::Editor);

    let styles = &doc.find(image).unwrap().styles;
    assert_eq!(styles.get_str("width"), Some("240px"));
    assert_eq!(styles.get_str("height"), Some("170px"));

    assert!(interaction.begin_resize(
        EditorMode::Editor,
        image,
        &ElementKind::Image,
        Some(image),
        Handle::BottomRight,
        Point::new(0.0, 0.0),
        ResizeOrigin { left: 30.0, top: 40.0, width: 240.0, height: 170.0 },
    ));
    let update = interaction.pointer_move(EditorMode::Editor, Point::new(-1000.0, -1000.0)).unwrap();
    doc.apply_interaction(&update);
    let styles = &doc.find(image).unwrap().styles;
    assert_eq!(styles.get_str("width"), Some("50px"));
    assert_eq!(styles.get_str("height"), Some("30px"));
}

#[test]
fn shared_documents_keep_allocating_fresh_ids() {
    let mut doc = Document::new();
    doc.add_element(ElementKind::Header, 0.0, 0.0);
    doc.add_element(ElementKind::Social, 0.0, 80.0);

    let mut restored = decode_share_code(&encode_share_code(&doc).unwrap()).unwrap();
    let existing: Vec<_> = restored.elements.iter().flat_map(|e| e.ids()).collect();
    let fresh = restored.add_element(ElementKind::Text, 0.0, 0.0);
    assert!(!existing.contains(&fresh));
}
