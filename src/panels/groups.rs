// src/panels/groups.rs

//! Groups panel: the list of chats the bot publishes to.

use async_trait::async_trait;

use crate::error::Result;
use crate::locale::Localizer;
use crate::models::Group;
use crate::panels::Panel;
use crate::services::ApiClient;

pub struct GroupsPanel;

/// Only the displayed fields take part in the change check, matching what
/// the panel actually shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupKey {
    id: String,
    title: Option<String>,
    username: Option<String>,
    last_post: Option<String>,
    is_disabled: bool,
}

#[async_trait]
impl Panel for GroupsPanel {
    type Data = Vec<Group>;
    type Snapshot = Vec<GroupKey>;

    fn name(&self) -> &'static str {
        "groups"
    }

    async fn fetch(&self, api: &ApiClient) -> Result<Vec<Group>> {
        api.groups().await
    }

    fn project(&self, data: &Vec<Group>) -> Vec<GroupKey> {
        data.iter()
            .map(|g| GroupKey {
                id: g.id_str(),
                title: g.title.clone(),
                username: g.username.clone(),
                last_post: g.last_post.clone(),
                is_disabled: g.is_disabled,
            })
            .collect()
    }

    fn render(&self, data: &Vec<Group>, i18n: &Localizer) -> String {
        if data.is_empty() {
            return format!("{}\n{}", i18n.t("groups.empty"), i18n.t("groups.emptyDesc"));
        }
        let mut lines = Vec::with_capacity(data.len());
        for group in data {
            let title = group.title.as_deref().unwrap_or(i18n.t("groups.noTitle"));
            let badge = if group.is_disabled {
                i18n.t("groups.disabled")
            } else {
                i18n.t("groups.active")
            };
            let last_post = group.last_post.as_deref().unwrap_or(i18n.t("groups.never"));
            let mut line = format!("{title} [{badge}]");
            if let Some(username) = &group.username {
                line.push_str(&format!(" @{}", username.trim_start_matches('@')));
            }
            line.push_str(&format!(
                " ({}) {} {last_post}",
                group.id_str(),
                i18n.t("groups.lastPost")
            ));
            lines.push(line);
        }
        lines.join("\n")
    }
}
