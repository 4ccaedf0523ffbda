use switchboard_application::{
    ContentModeration, ContentQuery, ContentRepository, ReportQuery, ReportRepository,
};
use switchboard_core::AppError;
use switchboard_domain::{AdminRole, AdminStatus, ContentStatus, ReportStatus};

use super::PostgresContentRepository;
use crate::test_database::{insert_admin, insert_content, insert_end_user, insert_report, test_pool};

#[tokio::test]
async fn content_carries_author_assignment_for_scoping() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresContentRepository::new(pool.clone());
    let manager_id = insert_admin(&pool, AdminRole::Manager, AdminStatus::Active).await;
    let assigned_author = insert_end_user(&pool, Some(manager_id)).await;
    let other_author = insert_end_user(&pool, None).await;
    let visible = insert_content(&pool, assigned_author).await;
    let hidden = insert_content(&pool, other_author).await;

    let listed = match repository
        .list_content(ContentQuery {
            status: None,
            author_id: None,
            author_assigned_to: Some(manager_id),
            limit: 50,
            offset: 0,
        })
        .await
    {
        Ok(items) => items,
        Err(error) => panic!("content should list: {error}"),
    };

    assert!(listed.iter().any(|item| item.id == visible));
    assert!(listed.iter().all(|item| item.id != hidden));
    assert!(
        listed
            .iter()
            .all(|item| item.author_assigned_to == Some(manager_id))
    );
}

#[tokio::test]
async fn moderation_records_status_and_moderator() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresContentRepository::new(pool.clone());
    let moderator = insert_admin(&pool, AdminRole::Admin, AdminStatus::Active).await;
    let author = insert_end_user(&pool, None).await;
    let content_id = insert_content(&pool, author).await;

    let moderated = repository
        .moderate_content(
            content_id,
            ContentModeration {
                status: ContentStatus::Hidden,
                notes: Some("off topic".to_owned()),
                moderated_by: moderator,
            },
        )
        .await;

    assert!(matches!(
        moderated,
        Ok(ref item)
            if item.status == ContentStatus::Hidden
                && item.moderated_by == Some(moderator)
                && item.moderation_notes.as_deref() == Some("off topic")
    ));
}

#[tokio::test]
async fn report_closes_once() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresContentRepository::new(pool.clone());
    let moderator = insert_admin(&pool, AdminRole::Admin, AdminStatus::Active).await;
    let author = insert_end_user(&pool, None).await;
    let reporter = insert_end_user(&pool, None).await;
    let content_id = insert_content(&pool, author).await;
    let report_id = insert_report(&pool, content_id, reporter).await;

    let open = repository
        .list_reports(ReportQuery {
            status: Some(ReportStatus::Open),
            content_id: Some(content_id),
            author_assigned_to: None,
            limit: 10,
            offset: 0,
        })
        .await;
    assert!(matches!(open, Ok(ref reports) if reports.len() == 1));

    let dismissed = repository
        .close_report(report_id, ReportStatus::Dismissed, Some("duplicate"), moderator)
        .await;
    assert!(matches!(
        dismissed,
        Ok(ref report)
            if report.status == ReportStatus::Dismissed && report.resolved_by == Some(moderator)
    ));

    let second = repository
        .close_report(report_id, ReportStatus::Resolved, None, moderator)
        .await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
}
