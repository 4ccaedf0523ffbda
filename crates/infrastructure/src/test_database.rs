//! Shared fixtures for PostgreSQL-backed tests.
//!
//! Tests are skipped when `DATABASE_URL` is unset. Every fixture inserts rows
//! with fresh identifiers so tests can share one database.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use switchboard_domain::{AdminRole, AdminStatus, AdminUserId, ContentId, EndUserId, ReportId};

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub(crate) async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for infrastructure tests: {error}");
    }

    Some(pool)
}

pub(crate) async fn insert_admin(
    pool: &PgPool,
    role: AdminRole,
    status: AdminStatus,
) -> AdminUserId {
    let admin_id = AdminUserId::new();
    let insert = sqlx::query(
        r#"
        INSERT INTO admin_users (id, email, display_name, password_hash, role, status)
        VALUES ($1, $2, $3, 'hash', $4, $5)
        "#,
    )
    .bind(admin_id.as_uuid())
    .bind(format!("{admin_id}@switchboard.test"))
    .bind(format!("Staff {admin_id}"))
    .bind(role.as_str())
    .bind(status.as_str())
    .execute(pool)
    .await;

    assert!(insert.is_ok());
    admin_id
}

pub(crate) async fn insert_end_user(pool: &PgPool, assigned_to: Option<AdminUserId>) -> EndUserId {
    let end_user_id = EndUserId::new();
    let handle = end_user_id.as_uuid().simple().to_string();
    let insert = sqlx::query(
        r#"
        INSERT INTO end_users (id, username, email, display_name, assigned_to)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(end_user_id.as_uuid())
    .bind(format!("u{}", &handle[..20]))
    .bind(format!("{handle}@members.test"))
    .bind("Member")
    .bind(assigned_to.map(|admin_id| admin_id.as_uuid()))
    .execute(pool)
    .await;

    assert!(insert.is_ok());
    end_user_id
}

pub(crate) async fn insert_content(pool: &PgPool, author_id: EndUserId) -> ContentId {
    let content_id = ContentId::new();
    let insert = sqlx::query("INSERT INTO content (id, author_id, body) VALUES ($1, $2, $3)")
        .bind(content_id.as_uuid())
        .bind(author_id.as_uuid())
        .bind("first post")
        .execute(pool)
        .await;

    assert!(insert.is_ok());
    content_id
}

pub(crate) async fn insert_report(
    pool: &PgPool,
    content_id: ContentId,
    reporter_id: EndUserId,
) -> ReportId {
    let report_id = ReportId::new();
    let insert = sqlx::query(
        r#"
        INSERT INTO content_reports (id, content_id, reporter_id, reason)
        VALUES ($1, $2, $3, 'spam')
        "#,
    )
    .bind(report_id.as_uuid())
    .bind(content_id.as_uuid())
    .bind(reporter_id.as_uuid())
    .execute(pool)
    .await;

    assert!(insert.is_ok());
    report_id
}
