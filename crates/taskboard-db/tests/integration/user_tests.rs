use taskboard_core::AppError;

use crate::integration::common::{setup_test_db, user_draft};

#[tokio::test]
async fn insert_and_find_user() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();

    let user = repo.insert(&user_draft("ada@example.com")).await.unwrap();
    assert!(user.id > 0);
    assert_eq!(user.first_name.as_deref(), Some("Ada"));

    let record = repo
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .expect("Should find the user");
    assert_eq!(record.user, user);
    assert_eq!(record.password_digest, "digest");

    assert!(repo.email_exists("ada@example.com").await.unwrap());
    assert!(!repo.email_exists("bob@example.com").await.unwrap());
}

#[tokio::test]
async fn duplicate_email_maps_to_already_exists() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();

    repo.insert(&user_draft("ada@example.com")).await.unwrap();
    let err = repo
        .insert(&user_draft("ada@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyExists(_)));
}

#[tokio::test]
async fn update_and_delete_user() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();
    let user = repo.insert(&user_draft("ada@example.com")).await.unwrap();

    let mut draft = user_draft("countess@example.com");
    draft.first_name = None;
    let updated = repo.update(user.id, &draft).await.unwrap().unwrap();
    assert_eq!(updated.email, "countess@example.com");
    assert_eq!(updated.first_name, None);

    assert!(repo.update(9999, &draft).await.unwrap().is_none());

    assert!(repo.delete(user.id).await.unwrap());
    assert!(!repo.delete(user.id).await.unwrap());
    assert!(repo.get(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn list_is_ordered_by_id() {
    let (db, _container) = setup_test_db().await;
    let repo = db.user_repo();

    let first = repo.insert(&user_draft("b@example.com")).await.unwrap();
    let second = repo.insert(&user_draft("a@example.com")).await.unwrap();

    let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
async fn health_check_succeeds() {
    let (db, _container) = setup_test_db().await;
    db.health_check().await.unwrap();
}
