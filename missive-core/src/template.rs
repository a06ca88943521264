/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use std::io::{Read, Write};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use tracing::{debug, info};

use crate::document::Document;
use crate::error::TemplateError;
use crate::ElementKind;

/// Parses a `{ title?, elements, settings }` document.
pub fn load_template(json: &str) -> Result<Document, TemplateError> {
    let document: Document = serde_json::from_str(json)?;
    document.validated()
}

pub fn save_template(document: &Document) -> Result<String, TemplateError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Compact, URL-safe form of a document for links.
pub fn encode_share_code(document: &Document) -> Result<String, TemplateError> {
    let json = serde_json::to_vec(document)?;
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json)?;
    let compressed = encoder.finish()?;
    debug!(json = json.len(), compressed = compressed.len(), "encoded share code");
    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

/// Upper bound on the JSON a share code may inflate to.
pub const MAX_SHARE_JSON: u64 = 4 * 1024 * 1024;

pub fn decode_share_code(code: &str) -> Result<Document, TemplateError> {
    let compressed = URL_SAFE_NO_PAD.decode(code.trim())?;
    let mut json = String::new();
    DeflateDecoder::new(compressed.as_slice())
        .take(MAX_SHARE_JSON + 1)
        .read_to_string(&mut json)?;
    if json.len() as u64 > MAX_SHARE_JSON {
        return Err(TemplateError::TooLarge(MAX_SHARE_JSON));
    }
    load_template(&json)
}

pub struct BuiltinTemplate {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    build: fn() -> Document,
}

impl BuiltinTemplate {
    pub fn build(&self) -> Document {
        (self.build)()
    }
}

pub const BUILTIN_TEMPLATES: &[BuiltinTemplate] = &[
    BuiltinTemplate {
        key: "welcome",
        name: "Welcome",
        description: "Greeting, short intro and a call to action.",
        build: welcome,
    },
    BuiltinTemplate {
        key: "announcement",
        name: "Announcement",
        description: "Hero image with a headline and a button.",
        build: announcement,
    },
    BuiltinTemplate {
        key: "digest",
        name: "Weekly Digest",
        description: "Two stories separated by dividers, social footer.",
        build: digest,
    },
];

pub fn builtin(key: &str) -> Result<Document, TemplateError> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|template| template.key == key)
        .map(BuiltinTemplate::build)
        .ok_or_else(|| TemplateError::UnknownTemplate(key.to_string()))
}

fn welcome() -> Document {
    let mut doc = Document::new();
    doc.title = "Welcome aboard".to_string();

    let header = doc.add_element(ElementKind::Header, 150.0, 40.0);
    doc.update_content(header, "Welcome to the community!");
    doc.update_style(header, "textAlign", "center");

    let text = doc.add_element(ElementKind::Text, 100.0, 120.0);
    doc.update_content(text, "Thanks for signing up. Here is what to expect from us every month.");
    doc.update_style(text, "width", 400);

    let button = doc.add_element(ElementKind::Button, 225.0, 230.0);
    doc.update_content(button, "Get started");
    doc
}

fn announcement() -> Document {
    let mut doc = Document::new();
    doc.title = "Big news".to_string();

    let image = doc.add_element(ElementKind::Image, 50.0, 30.0);
    doc.update_style(image, "width", 500);
    doc.update_style(image, "height", 220);

    let header = doc.add_element(ElementKind::Header, 150.0, 280.0);
    doc.update_content(header, "Something new is here");

    let button = doc.add_element(ElementKind::Button, 225.0, 360.0);
    doc.update_content(button, "Read more");
    doc.update_style(button, "backgroundColor", "#e24a4a");
    doc
}

fn digest() -> Document {
    let mut doc = Document::new();
    doc.title = "Weekly Digest".to_string();

    let header = doc.add_element(ElementKind::Header, 150.0, 30.0);
    doc.update_content(header, "This week");

    let mut top = 110.0;
    for story in ["First story summary goes here.", "Second story summary goes here."] {
        let divider = doc.add_element(ElementKind::Divider, 100.0, top);
        doc.update_style(divider, "width", 400);
        let text = doc.add_element(ElementKind::Text, 100.0, top + 20.0);
        doc.update_content(text, story);
        doc.update_style(text, "width", 400);
        top += 120.0;
    }

    doc.add_element(ElementKind::Social, 220.0, top + 20.0);
    doc
}

/// A template saved during the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedTemplate {
    pub name: String,
    pub document: Document,
}

/// Session-scoped store backing the saved templates page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateLibrary {
    saved: Vec<SavedTemplate>,
}

impl TemplateLibrary {
    /// Saves under `name`, replacing an earlier save with the same name.
    pub fn save(&mut self, name: &str, document: &Document) {
        let entry = SavedTemplate {
            name: name.to_string(),
            document: document.clone(),
        };
        match self.saved.iter_mut().find(|saved| saved.name == name) {
            Some(existing) => *existing = entry,
            None => self.saved.push(entry),
        }
        info!(name, "template saved");
    }

    pub fn get(&self, name: &str) -> Option<&SavedTemplate> {
        self.saved.iter().find(|saved| saved.name == name)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.saved.len();
        self.saved.retain(|saved| saved.name != name);
        self.saved.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedTemplate> {
        self.saved.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}
