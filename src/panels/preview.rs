// src/panels/preview.rs

//! Post preview panel: the current post as it would be published.

use async_trait::async_trait;

use crate::error::Result;
use crate::locale::{format_telegram_text, Localizer};
use crate::models::PostInfo;
use crate::panels::Panel;
use crate::services::ApiClient;

pub struct PreviewPanel;

#[async_trait]
impl Panel for PreviewPanel {
    type Data = PostInfo;
    type Snapshot = PostInfo;

    fn name(&self) -> &'static str {
        "preview"
    }

    async fn fetch(&self, api: &ApiClient) -> Result<PostInfo> {
        api.post_info().await
    }

    fn project(&self, data: &PostInfo) -> PostInfo {
        data.clone()
    }

    fn render(&self, data: &PostInfo, i18n: &Localizer) -> String {
        let mut out = format_telegram_text(&data.text);
        if let Some(image_url) = &data.image_url {
            out.push_str(&format!("\n[image: {image_url}]"));
        }
        out.push_str(&format!(
            "\n{} {} {}",
            i18n.t("preview.info"),
            data.text_length,
            i18n.t("preview.chars")
        ));
        if data.use_template {
            if let Some(name) = &data.template_name {
                out.push_str(&format!("\n{} {name}", i18n.t("preview.usingTemplate")));
            }
        }
        out
    }
}
