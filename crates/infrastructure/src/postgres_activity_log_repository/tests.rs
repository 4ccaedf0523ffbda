use serde_json::json;
use switchboard_application::{ActivityEvent, ActivityLogQuery, ActivityLogRepository};
use switchboard_domain::{ActivityAction, AdminUserId};

use super::PostgresActivityLogRepository;
use crate::test_database::test_pool;

#[tokio::test]
async fn entries_filter_by_actor_and_action_newest_first() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresActivityLogRepository::new(pool);
    let actor_id = AdminUserId::new();

    for (action, description) in [
        (ActivityAction::AdminLoggedIn, "signed in"),
        (ActivityAction::UserCreated, "created member"),
        (ActivityAction::AdminLoggedIn, "signed in again"),
    ] {
        let appended = repository
            .append_entry(ActivityEvent::new(
                actor_id,
                action,
                description,
                json!({ "source": "test" }),
            ))
            .await;
        assert!(appended.is_ok());
    }

    let entries = match repository
        .list_entries(ActivityLogQuery {
            limit: 10,
            offset: 0,
            action: Some("admin.logged_in".to_owned()),
            actor_id: Some(actor_id),
        })
        .await
    {
        Ok(entries) => entries,
        Err(error) => panic!("activity entries should list: {error}"),
    };

    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.actor_id == actor_id));
    assert_eq!(entries[0].metadata, json!({ "source": "test" }));
    assert!(entries[0].created_at >= entries[1].created_at);
}

#[tokio::test]
async fn deep_offsets_are_not_capped() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let actor_id = AdminUserId::new();
    let seeded = sqlx::query(
        r#"
        INSERT INTO activity_log (actor_id, action, description, metadata)
        SELECT $1, 'user.created', 'bulk entry ' || series, '{}'::JSONB
        FROM generate_series(1, 10050) AS series
        "#,
    )
    .bind(actor_id.as_uuid())
    .execute(&pool)
    .await;
    assert!(seeded.is_ok());

    let repository = PostgresActivityLogRepository::new(pool);
    let page = |offset: usize| ActivityLogQuery {
        limit: 200,
        offset,
        action: None,
        actor_id: Some(actor_id),
    };

    let past_the_end = repository.list_entries(page(20_000)).await;
    assert!(matches!(past_the_end, Ok(ref entries) if entries.is_empty()));

    let tail = repository.list_entries(page(10_000)).await;
    assert!(matches!(tail, Ok(ref entries) if entries.len() == 50));
}
