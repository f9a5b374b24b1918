//! HTTP tag service client
//!
//! Talks to the remote tag/action API over JSON. Uses synchronous HTTP
//! (ureq) to be executor-agnostic; the session is assumed already
//! authenticated, so every request just carries the bearer token.

use anyhow::{Context, Result};

use super::api::{CreateTagRequest, ItemActionRequest, TagActionRequest};
use super::{TagActionOp, TagOp, TagService};
use crate::config::ServiceCredentials;
use crate::models::{Tag, TagId, TargetId};

/// HTTP client for the remote tag/action service
pub struct HttpTagService {
    endpoint: String,
    auth_token: String,
}

impl HttpTagService {
    /// Create a new client from service credentials
    pub fn new(credentials: ServiceCredentials) -> Self {
        Self {
            endpoint: credentials.endpoint.trim_end_matches('/').to_string(),
            auth_token: credentials.auth_token,
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.auth_token)
    }
}

impl TagService for HttpTagService {
    fn create_tag(&self, name: &str, color: u8) -> Result<Tag> {
        let url = format!("{}/tags", self.endpoint);

        let mut response = ureq::post(&url)
            .header("Authorization", &self.bearer())
            .send_json(&CreateTagRequest { name, color })
            .context("Failed to send create tag request")?;

        let tag: Tag = response
            .body_mut()
            .read_json()
            .context("Failed to parse create tag response")?;

        Ok(tag)
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        let url = format!("{}/tags", self.endpoint);

        let mut response = ureq::get(&url)
            .header("Authorization", &self.bearer())
            .call()
            .context("Failed to send list tags request")?;

        let tags: Vec<Tag> = response
            .body_mut()
            .read_json()
            .context("Failed to parse list tags response")?;

        Ok(tags)
    }

    fn apply_or_remove_tag(
        &self,
        ids: &[TargetId],
        op: TagOp,
        tag_name: &str,
        remove_from_list: bool,
    ) -> Result<()> {
        let url = format!("{}/items/action", self.endpoint);

        let body = ItemActionRequest {
            ids: ids.iter().map(|id| id.as_str()).collect(),
            op: op.as_str(),
            tag_name,
            remove_from_list,
        };

        ureq::post(&url)
            .header("Authorization", &self.bearer())
            .send_json(&body)
            .context("Failed to send item tag action request")?;

        Ok(())
    }

    fn tag_action(&self, id: &TagId, action: TagActionOp) -> Result<()> {
        // Tag ids are opaque and may contain characters needing escaping.
        let url = format!(
            "{}/tags/{}/action",
            self.endpoint,
            urlencoding::encode(id.as_str())
        );

        let body = match &action {
            TagActionOp::Delete => TagActionRequest {
                op: action.as_str(),
                name: None,
                color: None,
            },
            TagActionOp::Rename { name, color } => TagActionRequest {
                op: action.as_str(),
                name: Some(name.as_str()),
                color: *color,
            },
            TagActionOp::Color { color } => TagActionRequest {
                op: action.as_str(),
                name: None,
                color: Some(*color),
            },
        };

        ureq::post(&url)
            .header("Authorization", &self.bearer())
            .send_json(&body)
            .context("Failed to send tag action request")?;

        Ok(())
    }
}
