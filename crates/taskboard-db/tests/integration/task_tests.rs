use taskboard_core::AppError;
use taskboard_core::models::{TaskDraft, TaskFilter, UserDraft};
use taskboard_db::Database;

use crate::integration::common::{label_draft, setup_test_db, status_draft, user_draft};

struct Refs {
    draft: i64,
    published: i64,
    user: i64,
    bug: i64,
    feature: i64,
}

async fn refs(db: &Database) -> Refs {
    let statuses = db.task_status_repo();
    let labels = db.label_repo();
    Refs {
        draft: statuses
            .insert(&status_draft("Draft", "draft"))
            .await
            .unwrap()
            .id,
        published: statuses
            .insert(&status_draft("Published", "published"))
            .await
            .unwrap()
            .id,
        user: db
            .user_repo()
            .insert(&user_draft("owner@example.com"))
            .await
            .unwrap()
            .id,
        bug: labels.insert(&label_draft("bug")).await.unwrap().id,
        feature: labels.insert(&label_draft("feature")).await.unwrap().id,
    }
}

fn task(name: &str, status: i64, labels: Vec<i64>) -> TaskDraft {
    TaskDraft {
        name: name.into(),
        index: None,
        description: None,
        task_status_id: status,
        assignee_id: None,
        label_ids: labels,
    }
}

#[tokio::test]
async fn insert_returns_resolved_task() {
    let (db, _container) = setup_test_db().await;
    let r = refs(&db).await;
    let repo = db.task_repo();

    let draft = TaskDraft {
        index: Some(12),
        description: Some("body".into()),
        assignee_id: Some(r.user),
        ..task("Docs", r.draft, vec![r.feature, r.bug])
    };
    let created = repo.insert(&draft).await.unwrap();

    assert_eq!(created.name, "Docs");
    assert_eq!(created.index, Some(12));
    assert_eq!(created.status, "draft");
    assert_eq!(created.assignee_id, Some(r.user));
    assert_eq!(created.label_ids, vec![r.bug, r.feature]);
    assert_eq!(repo.get(created.id).await.unwrap(), Some(created));
}

#[tokio::test]
async fn update_replaces_labels() {
    let (db, _container) = setup_test_db().await;
    let r = refs(&db).await;
    let repo = db.task_repo();

    let created = repo
        .insert(&task("Docs", r.draft, vec![r.bug]))
        .await
        .unwrap();

    let updated = repo
        .update(created.id, &task("Docs", r.published, vec![r.feature]))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, "published");
    assert_eq!(updated.label_ids, vec![r.feature]);

    let cleared = repo
        .update(created.id, &task("Docs", r.published, vec![]))
        .await
        .unwrap()
        .unwrap();
    assert!(cleared.label_ids.is_empty());

    assert!(repo.update(9999, &task("x", r.draft, vec![])).await.unwrap().is_none());
}

#[tokio::test]
async fn filters_combine_and_keep_full_label_set() {
    let (db, _container) = setup_test_db().await;
    let r = refs(&db).await;
    let repo = db.task_repo();

    repo.insert(&task("test 1", r.draft, vec![r.bug])).await.unwrap();
    repo.insert(&task("test 2", r.draft, vec![r.feature])).await.unwrap();
    repo.insert(&TaskDraft {
        assignee_id: Some(r.user),
        ..task("test 3", r.draft, vec![r.bug, r.feature])
    })
    .await
    .unwrap();
    repo.insert(&task("task 1", r.published, vec![r.bug, r.feature]))
        .await
        .unwrap();

    assert_eq!(repo.list(&TaskFilter::default()).await.unwrap().len(), 4);

    let filtered = repo
        .list(&TaskFilter {
            title_cont: Some("test".into()),
            status: Some("draft".into()),
            label_id: Some(r.feature),
            ..Default::default()
        })
        .await
        .unwrap();
    let names: Vec<&str> = filtered.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["test 2", "test 3"]);
    assert_eq!(filtered[1].label_ids, vec![r.bug, r.feature]);

    let assigned = repo
        .list(&TaskFilter {
            assignee_id: Some(r.user),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].name, "test 3");
}

#[tokio::test]
async fn title_filter_treats_wildcards_literally() {
    let (db, _container) = setup_test_db().await;
    let r = refs(&db).await;
    let repo = db.task_repo();

    repo.insert(&task("50% done", r.draft, vec![])).await.unwrap();
    repo.insert(&task("500 done", r.draft, vec![])).await.unwrap();

    let percent = repo
        .list(&TaskFilter {
            title_cont: Some("%".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    let names: Vec<&str> = percent.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["50% done"]);

    let underscore = repo
        .list(&TaskFilter {
            title_cont: Some("_".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(underscore.is_empty());
}

#[tokio::test]
async fn long_text_values_are_stored() {
    let (db, _container) = setup_test_db().await;
    let r = refs(&db).await;

    let title = "x".repeat(256);
    let created = db
        .task_repo()
        .insert(&task(&title, r.draft, vec![]))
        .await
        .unwrap();
    assert_eq!(created.name, title);

    let status = db
        .task_status_repo()
        .insert(&status_draft(&"N".repeat(300), &"n".repeat(300)))
        .await
        .unwrap();
    assert_eq!(status.name.len(), 300);

    let user = db
        .user_repo()
        .insert(&UserDraft {
            first_name: Some("A".repeat(300)),
            ..user_draft("long@example.com")
        })
        .await
        .unwrap();
    assert_eq!(user.first_name.map(|n| n.len()), Some(300));
}

#[tokio::test]
async fn overlong_label_name_is_validation_error() {
    let (db, _container) = setup_test_db().await;
    let err = db
        .label_repo()
        .insert(&label_draft(&"l".repeat(1001)))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn referenced_rows_cannot_be_deleted() {
    let (db, _container) = setup_test_db().await;
    let r = refs(&db).await;
    let repo = db.task_repo();

    let created = repo
        .insert(&TaskDraft {
            assignee_id: Some(r.user),
            ..task("Docs", r.draft, vec![r.bug])
        })
        .await
        .unwrap();

    assert!(db.user_repo().is_referenced(r.user).await.unwrap());
    assert!(db.label_repo().is_referenced(r.bug).await.unwrap());
    assert!(db.task_status_repo().is_referenced(r.draft).await.unwrap());

    let err = db.label_repo().delete(r.bug).await.unwrap_err();
    assert!(matches!(err, AppError::InUse(_)));
    let err = db.user_repo().delete(r.user).await.unwrap_err();
    assert!(matches!(err, AppError::InUse(_)));

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!db.label_repo().is_referenced(r.bug).await.unwrap());
    assert!(db.label_repo().delete(r.bug).await.unwrap());
}

#[tokio::test]
async fn unknown_status_is_invalid_reference() {
    let (db, _container) = setup_test_db().await;
    let err = db
        .task_repo()
        .insert(&task("Docs", 9999, vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidReference(_)));
}
