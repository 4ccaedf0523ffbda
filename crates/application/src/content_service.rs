use std::sync::Arc;

use serde_json::json;
use switchboard_core::{AppError, AppResult, NonEmptyString};
use switchboard_domain::{
    ActivityAction, AdminRole, ContentId, ModerationDecision, Permission, Principal,
};

use crate::{
    ActivityEvent, ActivityLogService, AuthorizationService, ContentItem, ContentModeration,
    ContentQuery, ContentRepository,
};

/// Maximum page size for content and report listings.
pub const CONTENT_LIST_MAX_LIMIT: usize = 100;

/// Application service for posted content.
///
/// Content inherits the scope of its author: managers only reach content
/// by end users assigned to them.
#[derive(Clone)]
pub struct ContentService {
    authorization_service: AuthorizationService,
    repository: Arc<dyn ContentRepository>,
    activity_log_service: ActivityLogService,
}

impl ContentService {
    /// Creates a new content service.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        repository: Arc<dyn ContentRepository>,
        activity_log_service: ActivityLogService,
    ) -> Self {
        Self {
            authorization_service,
            repository,
            activity_log_service,
        }
    }

    /// Lists content visible to the actor.
    pub async fn list_content(
        &self,
        actor: &Principal,
        query: ContentQuery,
    ) -> AppResult<Vec<ContentItem>> {
        self.authorization_service
            .require(actor, Permission::ContentView)?;

        let author_assigned_to = match actor.role() {
            AdminRole::Manager => Some(actor.id()),
            AdminRole::SuperAdmin | AdminRole::Admin => query.author_assigned_to,
        };

        self.repository
            .list_content(ContentQuery {
                author_assigned_to,
                limit: query.limit.clamp(1, CONTENT_LIST_MAX_LIMIT),
                ..query
            })
            .await
    }

    /// Returns one content item visible to the actor.
    pub async fn get_content(
        &self,
        actor: &Principal,
        content_id: ContentId,
    ) -> AppResult<ContentItem> {
        self.authorization_service
            .require(actor, Permission::ContentView)?;

        let content = self.require_content(content_id).await?;
        if !actor.can_access_end_user(content.author_assigned_to) {
            return Err(not_found(content_id));
        }

        Ok(content)
    }

    /// Replaces body and media of a content item.
    pub async fn update_content(
        &self,
        actor: &Principal,
        content_id: ContentId,
        body: String,
        media_url: Option<String>,
    ) -> AppResult<ContentItem> {
        self.authorization_service
            .require(actor, Permission::ContentEdit)?;
        self.require_writable(actor, content_id).await?;

        let body = NonEmptyString::new(body)?;
        let media_url = media_url
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        let content = self
            .repository
            .update_content(content_id, body.as_str(), media_url.as_deref())
            .await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::ContentUpdated,
                format!("edited content '{content_id}' by '{}'", content.author_username),
                json!({ "content_id": content_id }),
            ))
            .await;

        Ok(content)
    }

    /// Publishes, hides or removes a content item.
    pub async fn moderate_content(
        &self,
        actor: &Principal,
        content_id: ContentId,
        decision: ModerationDecision,
        notes: Option<String>,
    ) -> AppResult<ContentItem> {
        self.authorization_service
            .require(actor, Permission::ContentModerate)?;
        let before = self.require_writable(actor, content_id).await?;

        let status = decision.resulting_status();
        let content = self
            .repository
            .moderate_content(
                content_id,
                ContentModeration {
                    status,
                    notes: notes
                        .map(|value| value.trim().to_owned())
                        .filter(|value| !value.is_empty()),
                    moderated_by: actor.id(),
                },
            )
            .await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::ContentModerated,
                format!(
                    "applied '{}' to content '{content_id}' by '{}'",
                    decision.as_str(),
                    content.author_username
                ),
                json!({
                    "content_id": content_id,
                    "decision": decision.as_str(),
                    "from": before.status.as_str(),
                    "to": status.as_str(),
                }),
            ))
            .await;

        Ok(content)
    }

    /// Deletes a content item with its reports.
    pub async fn delete_content(&self, actor: &Principal, content_id: ContentId) -> AppResult<()> {
        self.authorization_service
            .require(actor, Permission::ContentDelete)?;
        let content = self.require_writable(actor, content_id).await?;

        self.repository.delete_content(content_id).await?;

        self.activity_log_service
            .record(ActivityEvent::new(
                actor.id(),
                ActivityAction::ContentDeleted,
                format!("deleted content '{content_id}' by '{}'", content.author_username),
                json!({ "content_id": content_id, "author_id": content.author_id }),
            ))
            .await;

        Ok(())
    }

    async fn require_content(&self, content_id: ContentId) -> AppResult<ContentItem> {
        self.repository
            .find_content(content_id)
            .await?
            .ok_or_else(|| not_found(content_id))
    }

    async fn require_writable(
        &self,
        actor: &Principal,
        content_id: ContentId,
    ) -> AppResult<ContentItem> {
        let content = self.require_content(content_id).await?;
        if !actor.can_access_end_user(content.author_assigned_to) {
            return Err(AppError::Forbidden(format!(
                "content '{content_id}' belongs to an end user not assigned to you"
            )));
        }

        Ok(content)
    }
}

fn not_found(content_id: ContentId) -> AppError {
    AppError::NotFound(format!("content '{content_id}' not found"))
}
