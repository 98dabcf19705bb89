// src/panels/templates.rs

//! Templates panel.

use async_trait::async_trait;

use crate::error::Result;
use crate::locale::Localizer;
use crate::models::Template;
use crate::panels::Panel;
use crate::services::ApiClient;

pub struct TemplatesPanel;

#[async_trait]
impl Panel for TemplatesPanel {
    type Data = Vec<Template>;
    type Snapshot = Vec<Template>;

    fn name(&self) -> &'static str {
        "templates"
    }

    async fn fetch(&self, api: &ApiClient) -> Result<Vec<Template>> {
        api.templates().await
    }

    fn project(&self, data: &Vec<Template>) -> Vec<Template> {
        data.clone()
    }

    fn render(&self, data: &Vec<Template>, i18n: &Localizer) -> String {
        if data.is_empty() {
            return i18n.t("templates.empty").to_string();
        }
        let mut lines = vec![format!(
            "{} | {} | {}",
            i18n.t("templates.table.name"),
            i18n.t("templates.table.content"),
            i18n.t("templates.table.status"),
        )];
        for template in data {
            let status = if template.is_active {
                i18n.t("templates.status.active")
            } else {
                i18n.t("templates.status.inactive")
            };
            lines.push(format!(
                "{} | {} | {status}",
                template.name,
                template.content_preview(),
            ));
        }
        lines.join("\n")
    }
}
