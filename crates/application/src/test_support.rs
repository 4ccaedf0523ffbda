//! In-memory fakes shared by service tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use switchboard_core::{AppError, AppResult};
use switchboard_domain::{
    AdminRole, AdminStatus, AdminUserId, ContentId, ContentStatus, EndUserId, EndUserStatus,
    Permission, PermissionSet, Principal, ReportId, ReportStatus, Task, TaskId,
};
use tokio::sync::Mutex;

use crate::{
    ActivityEvent, ActivityLogEntry, ActivityLogQuery, ActivityLogRepository, AdminAccount,
    AdminAccountQuery, AdminCredentials, AdminUserRepository, ContentItem, ContentModeration,
    ContentQuery, ContentReport, ContentRepository, EndUser, EndUserProfile, EndUserQuery,
    EndUserRepository, NewAdminAccount, NewEndUser, PasswordHasher, PermissionRepository,
    PrincipalRepository, ReportQuery, ReportRepository, TaskQuery, TaskRepository,
};

pub fn principal(role: AdminRole, permissions: &[Permission]) -> Principal {
    Principal::new(AdminUserId::new(), role, permissions.iter().copied().collect())
}

#[derive(Default)]
pub struct FakePrincipalRepository {
    principals: Mutex<HashMap<AdminUserId, Principal>>,
}

impl FakePrincipalRepository {
    pub async fn insert(&self, principal: Principal) {
        self.principals.lock().await.insert(principal.id(), principal);
    }

    pub async fn remove(&self, admin_id: AdminUserId) {
        self.principals.lock().await.remove(&admin_id);
    }
}

#[async_trait]
impl PrincipalRepository for FakePrincipalRepository {
    async fn find_principal(&self, admin_id: AdminUserId) -> AppResult<Option<Principal>> {
        Ok(self.principals.lock().await.get(&admin_id).cloned())
    }
}

#[derive(Default)]
pub struct FakeActivityLogRepository {
    pub entries: Mutex<Vec<ActivityEvent>>,
    pub last_limit: Mutex<Option<usize>>,
}

#[async_trait]
impl ActivityLogRepository for FakeActivityLogRepository {
    async fn append_entry(&self, event: ActivityEvent) -> AppResult<()> {
        self.entries.lock().await.push(event);
        Ok(())
    }

    async fn list_entries(&self, query: ActivityLogQuery) -> AppResult<Vec<ActivityLogEntry>> {
        *self.last_limit.lock().await = Some(query.limit);

        Ok(self
            .entries
            .lock()
            .await
            .iter()
            .rev()
            .enumerate()
            .map(|(index, event)| ActivityLogEntry {
                entry_id: index.to_string(),
                actor_id: event.actor_id,
                action: event.action.as_str().to_owned(),
                description: event.description.clone(),
                metadata: event.metadata.clone(),
                created_at: Utc::now(),
            })
            .skip(query.offset)
            .take(query.limit)
            .collect())
    }
}

pub struct FailingActivityLogRepository;

#[async_trait]
impl ActivityLogRepository for FailingActivityLogRepository {
    async fn append_entry(&self, _event: ActivityEvent) -> AppResult<()> {
        Err(AppError::Internal("activity store unavailable".to_owned()))
    }

    async fn list_entries(&self, _query: ActivityLogQuery) -> AppResult<Vec<ActivityLogEntry>> {
        Err(AppError::Internal("activity store unavailable".to_owned()))
    }
}

pub struct FakePasswordHasher;

impl PasswordHasher for FakePasswordHasher {
    fn hash_password(&self, password: &str) -> AppResult<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        Ok(hash == format!("hashed:{password}"))
    }
}

#[derive(Default)]
pub struct FakeAdminUserRepository {
    accounts: Mutex<Vec<AdminCredentials>>,
}

impl FakeAdminUserRepository {
    pub async fn seed(&self, role: AdminRole) -> AdminAccount {
        self.seed_with_status(role, AdminStatus::Active).await
    }

    pub async fn seed_with_status(&self, role: AdminRole, status: AdminStatus) -> AdminAccount {
        let id = AdminUserId::new();
        let account = AdminAccount {
            id,
            email: format!("{id}@example.com"),
            display_name: "Seeded".to_owned(),
            role,
            status,
            created_at: Utc::now(),
        };
        self.accounts.lock().await.push(AdminCredentials {
            account: account.clone(),
            password_hash: "hashed:seeded-password".to_owned(),
        });

        account
    }

    pub async fn stored(&self, admin_id: AdminUserId) -> Option<AdminAccount> {
        self.accounts
            .lock()
            .await
            .iter()
            .find(|credentials| credentials.account.id == admin_id)
            .map(|credentials| credentials.account.clone())
    }

    async fn modify(
        &self,
        admin_id: AdminUserId,
        change: impl FnOnce(&mut AdminAccount),
    ) -> AppResult<AdminAccount> {
        let mut accounts = self.accounts.lock().await;
        let credentials = accounts
            .iter_mut()
            .find(|credentials| credentials.account.id == admin_id)
            .ok_or_else(|| AppError::NotFound(format!("admin account '{admin_id}' not found")))?;
        change(&mut credentials.account);
        Ok(credentials.account.clone())
    }
}

#[async_trait]
impl AdminUserRepository for FakeAdminUserRepository {
    async fn find_admin(&self, admin_id: AdminUserId) -> AppResult<Option<AdminAccount>> {
        Ok(self.stored(admin_id).await)
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> AppResult<Option<AdminCredentials>> {
        Ok(self
            .accounts
            .lock()
            .await
            .iter()
            .find(|credentials| credentials.account.email == email)
            .cloned())
    }

    async fn create_admin(&self, account: NewAdminAccount) -> AppResult<AdminAccount> {
        let created = AdminAccount {
            id: AdminUserId::new(),
            email: account.email.as_str().to_owned(),
            display_name: account.display_name,
            role: account.role,
            status: account.status,
            created_at: Utc::now(),
        };
        self.accounts.lock().await.push(AdminCredentials {
            account: created.clone(),
            password_hash: account.password_hash,
        });

        Ok(created)
    }

    async fn list_admins(&self, query: AdminAccountQuery) -> AppResult<Vec<AdminAccount>> {
        Ok(self
            .accounts
            .lock()
            .await
            .iter()
            .map(|credentials| credentials.account.clone())
            .filter(|account| query.status.is_none_or(|status| account.status == status))
            .filter(|account| query.role.is_none_or(|role| account.role == role))
            .collect())
    }

    async fn update_admin(
        &self,
        admin_id: AdminUserId,
        display_name: &str,
        role: AdminRole,
    ) -> AppResult<AdminAccount> {
        self.modify(admin_id, |account| {
            account.display_name = display_name.to_owned();
            account.role = role;
        })
        .await
    }

    async fn set_admin_status(
        &self,
        admin_id: AdminUserId,
        status: AdminStatus,
    ) -> AppResult<AdminAccount> {
        self.modify(admin_id, |account| account.status = status).await
    }

    async fn delete_admin(&self, admin_id: AdminUserId) -> AppResult<()> {
        self.accounts
            .lock()
            .await
            .retain(|credentials| credentials.account.id != admin_id);
        Ok(())
    }

    async fn count_super_admins(&self) -> AppResult<u64> {
        let count = self
            .accounts
            .lock()
            .await
            .iter()
            .filter(|credentials| credentials.account.role.is_super_role())
            .count();
        Ok(count as u64)
    }
}

#[derive(Default)]
pub struct FakePermissionRepository {
    grants: Mutex<HashMap<AdminUserId, PermissionSet>>,
}

impl FakePermissionRepository {
    pub async fn stored(&self, admin_id: AdminUserId) -> PermissionSet {
        self.grants
            .lock()
            .await
            .get(&admin_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl PermissionRepository for FakePermissionRepository {
    async fn list_admin_permissions(&self, admin_id: AdminUserId) -> AppResult<PermissionSet> {
        Ok(self.stored(admin_id).await)
    }

    async fn replace_admin_permissions(
        &self,
        admin_id: AdminUserId,
        permissions: &PermissionSet,
    ) -> AppResult<()> {
        self.grants
            .lock()
            .await
            .insert(admin_id, permissions.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeEndUserRepository {
    end_users: Mutex<Vec<EndUser>>,
}

impl FakeEndUserRepository {
    async fn modify(
        &self,
        end_user_id: EndUserId,
        change: impl FnOnce(&mut EndUser),
    ) -> AppResult<EndUser> {
        let mut end_users = self.end_users.lock().await;
        let end_user = end_users
            .iter_mut()
            .find(|end_user| end_user.id == end_user_id)
            .ok_or_else(|| AppError::NotFound(format!("end user '{end_user_id}' not found")))?;
        change(end_user);
        end_user.updated_at = Utc::now();
        Ok(end_user.clone())
    }
}

#[async_trait]
impl EndUserRepository for FakeEndUserRepository {
    async fn find_end_user(&self, end_user_id: EndUserId) -> AppResult<Option<EndUser>> {
        Ok(self
            .end_users
            .lock()
            .await
            .iter()
            .find(|end_user| end_user.id == end_user_id)
            .cloned())
    }

    async fn list_end_users(&self, query: EndUserQuery) -> AppResult<Vec<EndUser>> {
        Ok(self
            .end_users
            .lock()
            .await
            .iter()
            .filter(|end_user| query.status.is_none_or(|status| end_user.status == status))
            .filter(|end_user| {
                query
                    .assigned_to
                    .is_none_or(|assignee| end_user.assigned_to == Some(assignee))
            })
            .filter(|end_user| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|search| end_user.username.contains(search))
            })
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn create_end_user(&self, end_user: NewEndUser) -> AppResult<EndUser> {
        let mut end_users = self.end_users.lock().await;
        if end_users
            .iter()
            .any(|existing| existing.username == end_user.username.as_str())
        {
            return Err(AppError::Conflict("username already taken".to_owned()));
        }

        let now = Utc::now();
        let created = EndUser {
            id: EndUserId::new(),
            username: end_user.username.into(),
            email: end_user.email.into(),
            display_name: end_user.display_name,
            bio: end_user.bio,
            status: EndUserStatus::Active,
            assigned_to: end_user.assigned_to,
            created_at: now,
            updated_at: now,
        };
        end_users.push(created.clone());

        Ok(created)
    }

    async fn update_end_user(
        &self,
        end_user_id: EndUserId,
        profile: EndUserProfile,
    ) -> AppResult<EndUser> {
        self.modify(end_user_id, |end_user| {
            end_user.email = profile.email.into();
            end_user.display_name = profile.display_name;
            end_user.bio = profile.bio;
        })
        .await
    }

    async fn set_end_user_status(
        &self,
        end_user_id: EndUserId,
        status: EndUserStatus,
    ) -> AppResult<EndUser> {
        self.modify(end_user_id, |end_user| end_user.status = status)
            .await
    }

    async fn assign_end_user(
        &self,
        end_user_id: EndUserId,
        assigned_to: Option<AdminUserId>,
    ) -> AppResult<EndUser> {
        self.modify(end_user_id, |end_user| end_user.assigned_to = assigned_to)
            .await
    }

    async fn delete_end_user(&self, end_user_id: EndUserId) -> AppResult<()> {
        self.end_users
            .lock()
            .await
            .retain(|end_user| end_user.id != end_user_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeContentRepository {
    items: Mutex<Vec<ContentItem>>,
}

impl FakeContentRepository {
    pub async fn seed(&self, author_assigned_to: Option<AdminUserId>) -> ContentItem {
        let now = Utc::now();
        let item = ContentItem {
            id: ContentId::new(),
            author_id: EndUserId::new(),
            author_username: "night_owl".to_owned(),
            author_assigned_to,
            body: "first post".to_owned(),
            media_url: None,
            status: ContentStatus::PendingReview,
            moderation_notes: None,
            moderated_by: None,
            created_at: now,
            updated_at: now,
        };
        self.items.lock().await.push(item.clone());
        item
    }

    async fn modify(
        &self,
        content_id: ContentId,
        change: impl FnOnce(&mut ContentItem),
    ) -> AppResult<ContentItem> {
        let mut items = self.items.lock().await;
        let item = items
            .iter_mut()
            .find(|item| item.id == content_id)
            .ok_or_else(|| AppError::NotFound(format!("content '{content_id}' not found")))?;
        change(item);
        item.updated_at = Utc::now();
        Ok(item.clone())
    }
}

#[async_trait]
impl ContentRepository for FakeContentRepository {
    async fn find_content(&self, content_id: ContentId) -> AppResult<Option<ContentItem>> {
        Ok(self
            .items
            .lock()
            .await
            .iter()
            .find(|item| item.id == content_id)
            .cloned())
    }

    async fn list_content(&self, query: ContentQuery) -> AppResult<Vec<ContentItem>> {
        Ok(self
            .items
            .lock()
            .await
            .iter()
            .filter(|item| query.status.is_none_or(|status| item.status == status))
            .filter(|item| query.author_id.is_none_or(|author| item.author_id == author))
            .filter(|item| {
                query
                    .author_assigned_to
                    .is_none_or(|assignee| item.author_assigned_to == Some(assignee))
            })
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn update_content(
        &self,
        content_id: ContentId,
        body: &str,
        media_url: Option<&str>,
    ) -> AppResult<ContentItem> {
        self.modify(content_id, |item| {
            item.body = body.to_owned();
            item.media_url = media_url.map(str::to_owned);
        })
        .await
    }

    async fn moderate_content(
        &self,
        content_id: ContentId,
        moderation: ContentModeration,
    ) -> AppResult<ContentItem> {
        self.modify(content_id, |item| {
            item.status = moderation.status;
            item.moderation_notes = moderation.notes;
            item.moderated_by = Some(moderation.moderated_by);
        })
        .await
    }

    async fn delete_content(&self, content_id: ContentId) -> AppResult<()> {
        self.items.lock().await.retain(|item| item.id != content_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeReportRepository {
    reports: Mutex<Vec<ContentReport>>,
}

impl FakeReportRepository {
    pub async fn seed(&self, author_assigned_to: Option<AdminUserId>) -> ContentReport {
        let report = ContentReport {
            id: ReportId::new(),
            content_id: ContentId::new(),
            reporter_id: EndUserId::new(),
            author_assigned_to,
            reason: "spam".to_owned(),
            status: ReportStatus::Open,
            resolution_notes: None,
            resolved_by: None,
            created_at: Utc::now(),
        };
        self.reports.lock().await.push(report.clone());
        report
    }
}

#[async_trait]
impl ReportRepository for FakeReportRepository {
    async fn find_report(&self, report_id: ReportId) -> AppResult<Option<ContentReport>> {
        Ok(self
            .reports
            .lock()
            .await
            .iter()
            .find(|report| report.id == report_id)
            .cloned())
    }

    async fn list_reports(&self, query: ReportQuery) -> AppResult<Vec<ContentReport>> {
        Ok(self
            .reports
            .lock()
            .await
            .iter()
            .filter(|report| query.status.is_none_or(|status| report.status == status))
            .filter(|report| query.content_id.is_none_or(|content| report.content_id == content))
            .filter(|report| {
                query
                    .author_assigned_to
                    .is_none_or(|assignee| report.author_assigned_to == Some(assignee))
            })
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn close_report(
        &self,
        report_id: ReportId,
        status: ReportStatus,
        notes: Option<&str>,
        resolved_by: AdminUserId,
    ) -> AppResult<ContentReport> {
        let mut reports = self.reports.lock().await;
        let report = reports
            .iter_mut()
            .find(|report| report.id == report_id && report.status == ReportStatus::Open)
            .ok_or_else(|| AppError::Conflict(format!("report '{report_id}' is not open")))?;
        report.status = status;
        report.resolution_notes = notes.map(str::to_owned);
        report.resolved_by = Some(resolved_by);
        Ok(report.clone())
    }
}

#[derive(Default)]
pub struct FakeTaskRepository {
    tasks: Mutex<Vec<Task>>,
    lose_next_race: Mutex<bool>,
}

impl FakeTaskRepository {
    pub async fn stored(&self, task_id: TaskId) -> Task {
        match self
            .tasks
            .lock()
            .await
            .iter()
            .find(|task| task.id() == task_id)
        {
            Some(task) => task.clone(),
            None => panic!("task '{task_id}' was never stored"),
        }
    }

    /// Makes the next save observe a version bumped by a concurrent writer.
    pub async fn lose_next_save_race(&self) {
        *self.lose_next_race.lock().await = true;
    }
}

#[async_trait]
impl TaskRepository for FakeTaskRepository {
    async fn find_task(&self, task_id: TaskId) -> AppResult<Option<Task>> {
        Ok(self
            .tasks
            .lock()
            .await
            .iter()
            .find(|task| task.id() == task_id)
            .cloned())
    }

    async fn create_task(&self, task: &Task) -> AppResult<Task> {
        self.tasks.lock().await.push(task.clone());
        Ok(task.clone())
    }

    async fn save_task(&self, task: &Task, expected_version: i64) -> AppResult<Task> {
        let mut tasks = self.tasks.lock().await;
        let stored = tasks
            .iter_mut()
            .find(|stored| stored.id() == task.id())
            .ok_or_else(|| AppError::NotFound(format!("task '{}' not found", task.id())))?;

        let mut lose_race = self.lose_next_race.lock().await;
        if *lose_race {
            *lose_race = false;
            let mut parts = stored.clone().into_parts();
            parts.version += 1;
            *stored = Task::restore(parts);
        }

        if stored.version() != expected_version {
            return Err(AppError::Conflict(format!(
                "task '{}' was modified concurrently",
                task.id()
            )));
        }

        let mut parts = task.clone().into_parts();
        parts.version = expected_version + 1;
        *stored = Task::restore(parts);
        Ok(stored.clone())
    }

    async fn list_tasks(&self, query: TaskQuery) -> AppResult<Vec<Task>> {
        Ok(self
            .tasks
            .lock()
            .await
            .iter()
            .filter(|task| {
                query.participant.is_none_or(|participant| {
                    task.assigned_to() == participant || task.assigned_by() == participant
                })
            })
            .filter(|task| query.status.is_none_or(|status| task.status() == status))
            .skip(query.offset)
            .take(query.limit)
            .cloned()
            .collect())
    }

    async fn delete_task(&self, task_id: TaskId) -> AppResult<()> {
        self.tasks.lock().await.retain(|task| task.id() != task_id);
        Ok(())
    }
}
