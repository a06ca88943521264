/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

use thiserror::Error;

use crate::ElementId;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("invalid template json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("share code is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
    #[error("share code compression failed: {0}")]
    Compression(#[from] std::io::Error),
    #[error("element id {0} is used more than once")]
    DuplicateId(ElementId),
    #[error("element id {0} leaves no room for new elements")]
    IdSpaceExhausted(ElementId),
    #[error("share code expands past {0} bytes")]
    TooLarge(u64),
    #[error("no built-in template named `{0}`")]
    UnknownTemplate(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("uploaded file is empty")]
    Empty,
    #[error("unsupported image format")]
    UnsupportedFormat,
}
