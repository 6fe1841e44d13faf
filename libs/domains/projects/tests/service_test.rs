//! End-to-end tests for the project use cases
//!
//! Runs `ProjectService` against the in-memory store and publisher so that
//! persistence and event publication are checked together.

use domain_projects::*;
use messaging::{EventDispatcher, FailingEventPublisher, InMemoryEventPublisher, PublisherConfig};
use std::sync::Arc;
use uuid::Uuid;

struct Fixture {
    service: ProjectService<InMemoryProjectRepository>,
    publisher: Arc<InMemoryEventPublisher>,
}

fn fixture() -> Fixture {
    let publisher = Arc::new(InMemoryEventPublisher::new());
    let events = EventDispatcher::new(
        publisher.clone(),
        PublisherConfig::default().with_topic_prefix("test."),
    );
    Fixture {
        service: ProjectService::new(InMemoryProjectRepository::new(), events),
        publisher,
    }
}

fn create(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        description: Some("integration".to_string()),
        start_date: None,
        end_date: None,
        owner: "A".to_string(),
        created_by: "u1".to_string(),
    }
}

fn change(id: Uuid, status: &str) -> ChangeProjectStatus {
    ChangeProjectStatus {
        id,
        status: status.to_string(),
        reason: None,
        changed_by: "u1".to_string(),
    }
}

#[tokio::test]
async fn test_alpha_lifecycle_publishes_in_order() {
    let fx = fixture();

    let id = fx.service.create_project(create("Alpha")).await.unwrap();
    fx.service.change_status(change(id, "IN_PROGRESS")).await.unwrap();
    fx.service.change_status(change(id, "COMPLETED")).await.unwrap();

    let err = fx
        .service
        .change_status(change(id, "IN_PROGRESS"))
        .await
        .unwrap_err();
    assert!(err.is_invalid_transition());

    let project = fx.service.get_project(id).await.unwrap();
    assert_eq!(project.status(), ProjectStatus::Completed);

    assert_eq!(
        fx.publisher.event_types().await,
        vec!["project.created", "project.started", "project.finished"]
    );

    let published = fx.publisher.published().await;
    for envelope in &published {
        assert_eq!(envelope.topic, "test.project-events");
        assert_eq!(envelope.key, format!("project-{}", id));
        assert_eq!(envelope.aggregate_id, Some(id));
    }
    assert_eq!(published[0].payload["name"], "Alpha");
}

#[tokio::test]
async fn test_duplicate_name_is_case_insensitive() {
    let fx = fixture();
    fx.service.create_project(create("Alpha")).await.unwrap();

    let err = fx.service.create_project(create("ALPHA")).await.unwrap_err();

    assert!(matches!(err, ProjectError::DuplicateName(_)));
    assert_eq!(fx.publisher.published().await.len(), 1);
}

#[tokio::test]
async fn test_update_and_cancel_with_reason() {
    let fx = fixture();
    let id = fx.service.create_project(create("Alpha")).await.unwrap();

    let updated = fx
        .service
        .update_project(UpdateProject {
            id,
            name: "Alpha Prime".to_string(),
            description: None,
            end_date: None,
            owner: "B".to_string(),
            updated_by: "u2".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(updated.name(), "Alpha Prime");
    assert_eq!(updated.audit().updated_by, "u2");

    let cancelled = fx
        .service
        .change_status(ChangeProjectStatus {
            reason: Some("budget".to_string()),
            ..change(id, "cancelado")
        })
        .await
        .unwrap();
    assert_eq!(cancelled.status(), ProjectStatus::Cancelled);

    let published = fx.publisher.published().await;
    let last = published.last().unwrap();
    assert_eq!(last.event_type, "project.cancelled");
    assert_eq!(last.payload["reason"], "budget");
    assert_eq!(last.payload["name"], "Alpha Prime");
}

#[tokio::test]
async fn test_delete_only_after_project_is_closed() {
    let fx = fixture();
    let id = fx.service.create_project(create("Alpha")).await.unwrap();

    let err = fx.service.delete_project(id, "u1").await.unwrap_err();
    assert!(err.is_invalid_transition());

    fx.service.change_status(change(id, "CANCELLED")).await.unwrap();
    fx.service.delete_project(id, "u1").await.unwrap();

    let err = fx.service.get_project(id).await.unwrap_err();
    assert!(matches!(err, ProjectError::NotFound(missing) if missing == id));
}

#[tokio::test]
async fn test_publish_failure_does_not_roll_back() {
    let repository = Arc::new(InMemoryProjectRepository::new());
    let events = EventDispatcher::new(
        Arc::new(FailingEventPublisher::new()),
        PublisherConfig::default(),
    );
    let service = ProjectService::with_shared(repository.clone(), events);

    let id = service.create_project(create("Alpha")).await.unwrap();
    service.change_status(change(id, "IN_PROGRESS")).await.unwrap();

    let stored = repository.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(stored.status(), ProjectStatus::InProgress);
}
