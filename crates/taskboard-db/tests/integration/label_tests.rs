use taskboard_core::AppError;

use crate::integration::common::{label_draft, setup_test_db, status_draft};

#[tokio::test]
async fn label_crud() {
    let (db, _container) = setup_test_db().await;
    let repo = db.label_repo();

    let label = repo.insert(&label_draft("feature")).await.unwrap();
    assert_eq!(repo.get(label.id).await.unwrap(), Some(label.clone()));
    assert_eq!(repo.find_by_name("feature").await.unwrap(), Some(label.clone()));

    let renamed = repo
        .update(label.id, &label_draft("enhancement"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "enhancement");
    assert_eq!(renamed.created_at, label.created_at);

    assert!(repo.delete(label.id).await.unwrap());
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_label_name() {
    let (db, _container) = setup_test_db().await;
    let repo = db.label_repo();

    repo.insert(&label_draft("bug")).await.unwrap();
    let err = repo.insert(&label_draft("bug")).await.unwrap_err();
    assert!(matches!(err, AppError::AlreadyExists(_)));
}

#[tokio::test]
async fn existing_ids_returns_known_subset() {
    let (db, _container) = setup_test_db().await;
    let repo = db.label_repo();

    let bug = repo.insert(&label_draft("bug")).await.unwrap();
    let feature = repo.insert(&label_draft("feature")).await.unwrap();

    let existing = repo
        .existing_ids(&[feature.id, 9999, bug.id])
        .await
        .unwrap();
    assert_eq!(existing, vec![bug.id, feature.id]);
    assert!(repo.existing_ids(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn task_status_slug_and_name_checks() {
    let (db, _container) = setup_test_db().await;
    let repo = db.task_status_repo();

    let status = repo.insert(&status_draft("Draft", "draft")).await.unwrap();
    assert!(repo.slug_exists("draft").await.unwrap());
    assert!(repo.name_exists("Draft").await.unwrap());
    assert_eq!(repo.find_by_slug("draft").await.unwrap(), Some(status.clone()));

    let err = repo
        .insert(&status_draft("Other", "draft"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyExists(_)));

    let updated = repo
        .update(status.id, &status_draft("Draft", "rough"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.slug, "rough");
    assert!(!repo.slug_exists("draft").await.unwrap());
}
