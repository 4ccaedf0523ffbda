use std::sync::Arc;

use switchboard_core::AppError;
use switchboard_domain::{AdminRole, Permission, Principal, TaskStatus, TaskTransition};

use crate::test_support::{
    FailingActivityLogRepository, FakeActivityLogRepository, FakeAdminUserRepository,
    FakePrincipalRepository, FakeTaskRepository,
};
use crate::{ActivityLogRepository, ActivityLogService, AuthorizationService};

use super::{CreateTaskParams, TaskService};

struct Fixture {
    service: TaskService,
    tasks: Arc<FakeTaskRepository>,
    activity: Arc<FakeActivityLogRepository>,
    assigner: Principal,
    assignee: Principal,
}

async fn fixture_with(
    activity_repository: Arc<dyn ActivityLogRepository>,
) -> (TaskService, Arc<FakeTaskRepository>, Principal, Principal) {
    let authorization_service =
        AuthorizationService::new(Arc::new(FakePrincipalRepository::default()));
    let admins = Arc::new(FakeAdminUserRepository::default());
    let tasks = Arc::new(FakeTaskRepository::default());

    let assigner_account = admins.seed(AdminRole::Admin).await;
    let assignee_account = admins.seed(AdminRole::Manager).await;
    let assigner = Principal::new(
        assigner_account.id,
        AdminRole::Admin,
        [Permission::TaskCreate, Permission::TaskView]
            .into_iter()
            .collect(),
    );
    let assignee = Principal::new(
        assignee_account.id,
        AdminRole::Manager,
        [Permission::TaskView].into_iter().collect(),
    );

    let service = TaskService::new(
        authorization_service.clone(),
        tasks.clone(),
        admins,
        ActivityLogService::new(authorization_service, activity_repository),
    );

    (service, tasks, assigner, assignee)
}

async fn fixture() -> Fixture {
    let activity = Arc::new(FakeActivityLogRepository::default());
    let (service, tasks, assigner, assignee) = fixture_with(activity.clone()).await;

    Fixture {
        service,
        tasks,
        activity,
        assigner,
        assignee,
    }
}

fn params(assignee: &Principal) -> CreateTaskParams {
    CreateTaskParams {
        title: "Review overnight reports".to_owned(),
        description: None,
        assigned_to: assignee.id(),
        due_at: None,
    }
}

#[tokio::test]
async fn full_lifecycle_reaches_approved_and_logs_each_step() {
    let fixture = fixture().await;
    let created = fixture
        .service
        .create_task(&fixture.assigner, params(&fixture.assignee))
        .await;
    let task = match created {
        Ok(task) => task,
        Err(error) => panic!("create failed: {error}"),
    };
    assert_eq!(task.status(), TaskStatus::Pending);

    let steps = [
        (&fixture.assignee, TaskTransition::Start),
        (
            &fixture.assignee,
            TaskTransition::RequestCompletion {
                notes: Some("all done".to_owned()),
            },
        ),
        (
            &fixture.assigner,
            TaskTransition::Approve {
                notes: Some("looks good".to_owned()),
            },
        ),
    ];
    for (actor, transition) in steps {
        if let Err(error) = fixture
            .service
            .transition_task(actor, task.id(), transition)
            .await
        {
            panic!("transition failed: {error}");
        }
    }

    let stored = fixture.tasks.stored(task.id()).await;
    let parts = stored.parts();
    assert_eq!(parts.status, TaskStatus::Approved);
    assert_eq!(parts.approval_notes.as_deref(), Some("looks good"));
    assert_eq!(parts.approved_by, Some(fixture.assigner.id()));
    assert_eq!(parts.version, 3);

    let actions: Vec<_> = fixture
        .activity
        .entries
        .lock()
        .await
        .iter()
        .map(|event| event.action.as_str())
        .collect();
    assert_eq!(
        actions,
        vec![
            "task.created",
            "task.started",
            "task.completion_requested",
            "task.approved"
        ]
    );
}

#[tokio::test]
async fn stranger_cannot_start_and_task_stays_in_progress() {
    let fixture = fixture().await;
    let task = match fixture
        .service
        .create_task(&fixture.assigner, params(&fixture.assignee))
        .await
    {
        Ok(task) => task,
        Err(error) => panic!("create failed: {error}"),
    };

    let started = fixture
        .service
        .transition_task(&fixture.assignee, task.id(), TaskTransition::Start)
        .await;
    assert_eq!(started.map(|task| task.status()).ok(), Some(TaskStatus::InProgress));

    let stranger = Principal::new(
        switchboard_domain::AdminUserId::new(),
        AdminRole::Manager,
        [Permission::TaskView].into_iter().collect(),
    );
    let result = fixture
        .service
        .transition_task(&stranger, task.id(), TaskTransition::Start)
        .await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));
    assert_eq!(
        fixture.tasks.stored(task.id()).await.status(),
        TaskStatus::InProgress
    );
}

#[tokio::test]
async fn failing_activity_log_does_not_fail_transition() {
    let (service, tasks, assigner, assignee) =
        fixture_with(Arc::new(FailingActivityLogRepository)).await;
    let task = match service.create_task(&assigner, params(&assignee)).await {
        Ok(task) => task,
        Err(error) => panic!("create failed: {error}"),
    };

    let started = service
        .transition_task(&assignee, task.id(), TaskTransition::Start)
        .await;

    assert!(started.is_ok());
    assert_eq!(tasks.stored(task.id()).await.status(), TaskStatus::InProgress);
}

#[tokio::test]
async fn stale_version_reports_conflict_and_keeps_winner() {
    let fixture = fixture().await;
    let task = match fixture
        .service
        .create_task(&fixture.assigner, params(&fixture.assignee))
        .await
    {
        Ok(task) => task,
        Err(error) => panic!("create failed: {error}"),
    };

    fixture.tasks.lose_next_save_race().await;
    let result = fixture
        .service
        .transition_task(&fixture.assignee, task.id(), TaskTransition::Start)
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
    assert_eq!(fixture.tasks.stored(task.id()).await.status(), TaskStatus::Pending);
}

#[tokio::test]
async fn create_requires_permission_and_active_assignee() {
    let fixture = fixture().await;

    let denied = fixture
        .service
        .create_task(&fixture.assignee, params(&fixture.assigner))
        .await;
    assert!(matches!(denied, Err(AppError::PermissionDenied(_))));

    let unknown = CreateTaskParams {
        assigned_to: switchboard_domain::AdminUserId::new(),
        ..params(&fixture.assignee)
    };
    let result = fixture.service.create_task(&fixture.assigner, unknown).await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn listing_is_limited_to_participants_for_non_super_roles() {
    let fixture = fixture().await;
    if let Err(error) = fixture
        .service
        .create_task(&fixture.assigner, params(&fixture.assignee))
        .await
    {
        panic!("create failed: {error}");
    }

    let outsider = Principal::new(
        switchboard_domain::AdminUserId::new(),
        AdminRole::Admin,
        [Permission::TaskView].into_iter().collect(),
    );
    let root = Principal::new(
        switchboard_domain::AdminUserId::new(),
        AdminRole::SuperAdmin,
        Default::default(),
    );

    let visible = |tasks: Result<Vec<_>, AppError>| tasks.map(|tasks| tasks.len()).ok();
    assert_eq!(
        visible(fixture.service.list_tasks(&fixture.assignee, None, 50, 0).await),
        Some(1)
    );
    assert_eq!(
        visible(fixture.service.list_tasks(&outsider, None, 50, 0).await),
        Some(0)
    );
    assert_eq!(
        visible(fixture.service.list_tasks(&root, None, 50, 0).await),
        Some(1)
    );
}
