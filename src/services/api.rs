// src/services/api.rs

//! Authenticated HTTP client for the bot backend.
//!
//! Session credentials ride on a cookie store. HTTP 401 is the single
//! distinguished authentication failure: it fires the registered redirect
//! hook and surfaces as [`AppError::Unauthorized`], which callers treat as
//! already handled. Every other non-2xx response is returned normally so
//! the caller can inspect the JSON body's `error` field.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::ServerConfig;
use crate::error::{AppError, Result};
use crate::models::{
    Group, GroupsPayload, HistoryQuery, HistoryRecord, PostInfo, PreviewRequest, Schedule,
    ScheduleSpec, Statistics, DashboardStatus, Template,
};

/// Hook invoked with the login path when the session is rejected.
pub type UnauthorizedHook = Arc<dyn Fn(&str) + Send + Sync>;

/// A transport-successful backend response: status plus parsed JSON body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// HTTP-level success (2xx).
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// Body-level `success` flag; endpoints that carry it require both
    /// this and [`Self::ok`].
    pub fn success_flag(&self) -> bool {
        self.body.get("success").and_then(Value::as_bool) == Some(true)
    }

    /// Server-supplied `message` field.
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }

    /// Server-supplied `error` field.
    pub fn error(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }

    /// Logical failure carrying the server message. An empty message is
    /// replaced with a generic localized text at presentation time.
    fn logical_error(&self) -> AppError {
        AppError::api(self.error().unwrap_or_default())
    }

    /// Require HTTP success; map failure to a logical error.
    pub fn require_ok(self) -> Result<Self> {
        if self.ok() {
            Ok(self)
        } else {
            Err(self.logical_error())
        }
    }

    /// Require HTTP success and the body `success` flag.
    pub fn require_success(self) -> Result<Self> {
        if self.ok() && self.success_flag() {
            Ok(self)
        } else {
            Err(self.logical_error())
        }
    }

    /// Deserialize a field of the body.
    pub fn field<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self.body.get(name).cloned().unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }
}

/// Client for all backend endpoints.
#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    login_path: String,
    client: Client,
    on_unauthorized: UnauthorizedHook,
}

impl ApiClient {
    /// Build a client from server settings.
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .build()?;

        Ok(Self {
            base,
            login_path: config.login_path.clone(),
            client,
            on_unauthorized: Arc::new(|login| {
                log::warn!("Session expired; redirecting to {login}");
            }),
        })
    }

    /// Replace the 401 redirect hook.
    pub fn with_unauthorized_hook(mut self, hook: UnauthorizedHook) -> Self {
        self.on_unauthorized = hook;
        self
    }

    /// Issue a request and parse the JSON body.
    ///
    /// Non-2xx statuses other than 401 are returned, not raised; transport
    /// and JSON failures map to their own error variants.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let url = self.base.join(path)?;
        let mut builder = self.client.request(method, url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            (self.on_unauthorized)(&self.login_path);
            return Err(AppError::Unauthorized);
        }

        let text = response.text().await?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(ApiResponse { status, body })
    }

    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<ApiResponse> {
        self.request(Method::GET, path, query, None).await
    }

    async fn post(&self, path: &str, body: Option<&Value>) -> Result<ApiResponse> {
        self.request(Method::POST, path, &[], body).await
    }

    /// POST expecting `{message}` on success or `{error}` on failure.
    async fn post_for_message(&self, path: &str, body: Option<&Value>) -> Result<String> {
        let resp = self.post(path, body).await?.require_ok()?;
        Ok(resp.message().unwrap_or_default().to_string())
    }

    // --- Status ---

    pub async fn status(&self) -> Result<DashboardStatus> {
        let resp = self.get("/api/status", &[]).await?.require_ok()?;
        Ok(serde_json::from_value(resp.body)?)
    }

    // --- Groups ---

    pub async fn groups(&self) -> Result<Vec<Group>> {
        let resp = self.get("/api/groups", &[]).await?.require_ok()?;
        let payload: GroupsPayload = serde_json::from_value(resp.body)?;
        Ok(payload.into_groups())
    }

    pub async fn add_group(&self, group_input: &str) -> Result<String> {
        let body = serde_json::json!({ "group_input": group_input });
        self.post_for_message("/api/groups", Some(&body)).await
    }

    pub async fn remove_group(&self, chat_id: &str) -> Result<String> {
        let resp = self
            .request(Method::DELETE, &format!("/api/groups/{chat_id}"), &[], None)
            .await?
            .require_ok()?;
        Ok(resp.message().unwrap_or_default().to_string())
    }

    pub async fn toggle_group_disabled(&self, chat_id: &str, is_disabled: bool) -> Result<String> {
        let body = serde_json::json!({ "is_disabled": is_disabled });
        self.post_for_message(
            &format!("/api/groups/{chat_id}/toggle-disabled"),
            Some(&body),
        )
        .await
    }

    // --- History ---

    pub async fn history(&self, query: &HistoryQuery) -> Result<Vec<HistoryRecord>> {
        let resp = self
            .get("/api/publication_history", &query.to_params())
            .await?
            .require_success()?;
        resp.field("history")
    }

    pub async fn clear_history(&self) -> Result<String> {
        let body = serde_json::json!({});
        let resp = self
            .post("/api/publication_history/clear", Some(&body))
            .await?
            .require_success()?;
        Ok(resp.message().unwrap_or_default().to_string())
    }

    // --- Post preview ---

    pub async fn post_info(&self) -> Result<PostInfo> {
        let resp = self.get("/api/post/info", &[]).await?.require_success()?;
        resp.field("post")
    }

    pub async fn post_preview(&self, request: &PreviewRequest) -> Result<PostInfo> {
        let body = serde_json::to_value(request)?;
        let resp = self
            .post("/api/post/preview", Some(&body))
            .await?
            .require_success()?;
        resp.field("preview")
    }

    // --- Scheduler controls ---

    pub async fn set_interval(&self, interval_minutes: u32) -> Result<String> {
        let body = serde_json::json!({ "interval_minutes": interval_minutes });
        self.post_for_message("/api/set_interval", Some(&body)).await
    }

    pub async fn post_now(&self) -> Result<String> {
        self.post_for_message("/api/post_now", None).await
    }

    pub async fn start_scheduler(&self) -> Result<String> {
        self.post_for_message("/api/start_scheduler", None).await
    }

    pub async fn stop_scheduler(&self) -> Result<String> {
        self.post_for_message("/api/stop_scheduler", None).await
    }

    pub async fn reload_post(&self) -> Result<String> {
        self.post_for_message("/api/reload_post", None).await
    }

    // --- Schedules ---

    pub async fn schedules(&self) -> Result<Vec<Schedule>> {
        let resp = self.get("/api/schedules", &[]).await?.require_success()?;
        resp.field("schedules")
    }

    pub async fn create_schedule(&self, spec: &ScheduleSpec, is_active: bool) -> Result<String> {
        let body = Self::schedule_body(spec, is_active)?;
        self.post_for_message("/api/schedules", Some(&body)).await
    }

    pub async fn update_schedule(
        &self,
        id: i64,
        spec: &ScheduleSpec,
        is_active: bool,
    ) -> Result<String> {
        let body = Self::schedule_body(spec, is_active)?;
        let resp = self
            .request(Method::PUT, &format!("/api/schedules/{id}"), &[], Some(&body))
            .await?
            .require_ok()?;
        Ok(resp.message().unwrap_or_default().to_string())
    }

    pub async fn activate_schedule(&self, id: i64) -> Result<String> {
        self.post_for_message(&format!("/api/schedules/{id}/activate"), None)
            .await
    }

    pub async fn delete_schedule(&self, id: i64) -> Result<String> {
        let resp = self
            .request(Method::DELETE, &format!("/api/schedules/{id}"), &[], None)
            .await?
            .require_ok()?;
        Ok(resp.message().unwrap_or_default().to_string())
    }

    fn schedule_body(spec: &ScheduleSpec, is_active: bool) -> Result<Value> {
        let mut body = serde_json::to_value(spec)?;
        match body.as_object_mut() {
            Some(map) => {
                map.insert("is_active".to_string(), Value::Bool(is_active));
                Ok(body)
            }
            None => Err(AppError::config("schedule spec did not serialize to an object")),
        }
    }

    // --- Statistics ---

    pub async fn statistics(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Statistics> {
        let mut query = Vec::new();
        if let Some(start) = start_date {
            query.push(("start_date".to_string(), format!("{start} 00:00:00")));
        }
        if let Some(end) = end_date {
            query.push(("end_date".to_string(), format!("{end} 23:59:59")));
        }
        let resp = self
            .get("/api/publication_statistics", &query)
            .await?
            .require_success()?;
        resp.field("statistics")
    }

    // --- Templates ---

    pub async fn templates(&self) -> Result<Vec<Template>> {
        let resp = self.get("/api/templates", &[]).await?.require_success()?;
        resp.field("templates")
    }

    pub async fn create_template(&self, name: &str, content: &str) -> Result<String> {
        let body = serde_json::json!({ "name": name, "content": content });
        self.post_for_message("/api/templates", Some(&body)).await
    }

    pub async fn update_template(&self, id: i64, name: &str, content: &str) -> Result<String> {
        let body = serde_json::json!({ "name": name, "content": content });
        let resp = self
            .request(Method::PUT, &format!("/api/templates/{id}"), &[], Some(&body))
            .await?
            .require_ok()?;
        Ok(resp.message().unwrap_or_default().to_string())
    }

    pub async fn activate_template(&self, id: i64) -> Result<String> {
        self.post_for_message(&format!("/api/templates/{id}/activate"), None)
            .await
    }

    pub async fn delete_template(&self, id: i64) -> Result<String> {
        let resp = self
            .request(Method::DELETE, &format!("/api/templates/{id}"), &[], None)
            .await?
            .require_ok()?;
        Ok(resp.message().unwrap_or_default().to_string())
    }

    // --- Session ---

    /// End the session. The login redirect fires on success too: the
    /// session is gone either way.
    pub async fn logout(&self) -> Result<()> {
        let resp = self.post("/logout", None).await?.require_ok()?;
        let _ = resp;
        (self.on_unauthorized)(&self.login_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn response(status: u16, body: Value) -> ApiResponse {
        ApiResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body,
        }
    }

    #[test]
    fn test_require_ok_passes_2xx() {
        let resp = response(200, serde_json::json!({"message": "done"}));
        let resp = resp.require_ok().unwrap();
        assert_eq!(resp.message(), Some("done"));
    }

    #[test]
    fn test_require_ok_maps_error_body() {
        let resp = response(400, serde_json::json!({"error": "bad input"}));
        match resp.require_ok() {
            Err(AppError::Api { message }) => assert_eq!(message, "bad input"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_require_success_needs_flag() {
        let resp = response(200, serde_json::json!({"success": false, "error": "nope"}));
        assert!(resp.require_success().is_err());

        let resp = response(200, serde_json::json!({"success": true, "history": []}));
        let resp = resp.require_success().unwrap();
        let history: Vec<crate::models::HistoryRecord> = resp.field("history").unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_field_missing_is_null() {
        let resp = response(200, serde_json::json!({"success": true}));
        let result: Result<Vec<crate::models::Template>> = resp.field("templates");
        // Null does not deserialize into a Vec; surfaced as a parse error.
        assert!(result.is_err());
    }

    #[test]
    fn test_schedule_body_carries_tag_and_activity() {
        let spec = ScheduleSpec::Interval { minutes: 60 };
        let body = ApiClient::schedule_body(&spec, true).unwrap();
        assert_eq!(body["schedule_type"], "interval");
        assert_eq!(body["schedule_data"]["minutes"], 60);
        assert_eq!(body["is_active"], true);
    }

    #[test]
    fn test_unauthorized_hook_wiring() {
        let config = ServerConfig::default();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&calls);
        let client = ApiClient::new(&config)
            .unwrap()
            .with_unauthorized_hook(Arc::new(move |_| {
                seen.fetch_add(1, Ordering::SeqCst);
            }));
        (client.on_unauthorized)(&client.login_path);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
