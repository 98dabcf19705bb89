// src/models/post.rs

//! Post preview payloads.

use serde::{Deserialize, Serialize};

/// Current post as returned by `/api/post/info` (`post` key) and
/// `/api/post/preview` (`preview` key).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PostInfo {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub text_length: usize,

    #[serde(default)]
    pub use_template: bool,

    #[serde(default)]
    pub template_name: Option<String>,
}

/// Request body for an ad-hoc preview against a chosen chat; the backend
/// substitutes template variables with these values.
#[derive(Debug, Clone, Serialize)]
pub struct PreviewRequest {
    pub chat_id: String,
    pub chat_title: String,
}
