//! Client tests against a live users router
//!
//! Each test binds the domain router (in-memory store) to an ephemeral port
//! and talks to it over HTTP, so request encoding, status handling and error
//! decoding are all exercised end to end.

use axum::Router;
use domain_users::{CreateUser, InMemoryUserRepository, UpdateUser, UserService, handlers};
use std::sync::Arc;
use users_client::{ClientError, LoadingTracker, UserForm, UserStore, UsersClient};

async fn spawn_server() -> String {
    let service = UserService::new(InMemoryUserRepository::new());
    let app = Router::new().nest("/api/users", handlers::router(service));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/api", addr)
}

fn create_input(email: &str, name: &str, age: Option<i32>) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        name: name.to_string(),
        age,
    }
}

#[tokio::test]
async fn test_crud_round_trip() {
    let client = UsersClient::new(spawn_server().await);

    let created = client
        .create_user(&create_input("Ada@Example.com ", " Ada ", Some(36)))
        .await
        .unwrap();
    assert_eq!(created.email, "ada@example.com");
    assert_eq!(created.name, "Ada");

    let fetched = client.get_user(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = client
        .update_user(
            created.id,
            &UpdateUser {
                age: Some(Some(37)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.age, Some(37));
    assert_eq!(updated.name, "Ada");

    assert_eq!(client.list_users().await.unwrap().len(), 1);

    client.delete_user(created.id).await.unwrap();
    let err = client.get_user(created.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_api_errors_carry_server_message() {
    let client = UsersClient::new(spawn_server().await);

    client
        .create_user(&create_input("dup@x.com", "Ann", None))
        .await
        .unwrap();
    let err = client
        .create_user(&create_input("dup@x.com", "Ann", None))
        .await
        .unwrap_err();

    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 409);
            assert_eq!(message, "User with this email already exists");
        }
        other => panic!("expected API error, got {other:?}"),
    }

    let err = client.delete_user(999).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("User with ID 999 not found"));
}

#[tokio::test]
async fn test_loading_tracker_settles_after_calls() {
    let loading = Arc::new(LoadingTracker::new());
    let client = UsersClient::with_loading(spawn_server().await, loading.clone());

    client.list_users().await.unwrap();
    let _ = client.get_user(1).await;

    assert!(!loading.is_loading());
    assert_eq!(loading.in_flight(), 0);
    assert_eq!(loading.message(), "");
}

#[tokio::test]
async fn test_store_tracks_server_state() {
    let mut store = UserStore::new(UsersClient::new(spawn_server().await));

    store.fetch_users().await;
    assert!(store.users().is_empty());
    assert_eq!(store.error(), None);

    let ann = store
        .create_user(&create_input("ann@x.com", "Ann", Some(25)))
        .await
        .unwrap();
    let bob = store
        .create_user(&create_input("bob@x.com", "Bob", Some(30)))
        .await
        .unwrap();
    assert_eq!(store.users().len(), 2);

    store
        .update_user(
            ann.id,
            &UpdateUser {
                name: Some("Annie".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(store.users()[0].name, "Annie");

    // Conflict leaves the cache alone and records the failure.
    let err = store
        .update_user(
            ann.id,
            &UpdateUser {
                email: Some("bob@x.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(store.error(), Some("Failed to update user"));
    assert_eq!(store.users()[0].email, "ann@x.com");

    store.delete_user(bob.id).await.unwrap();
    assert_eq!(store.error(), None);
    assert_eq!(store.users().len(), 1);

    let err = store.delete_user(bob.id).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.error(), Some("Failed to delete user"));
    assert_eq!(store.users().len(), 1);
}

#[tokio::test]
async fn test_fetch_failure_sets_error() {
    // Nothing listens on port 1.
    let mut store = UserStore::new(UsersClient::new("http://127.0.0.1:1/api"));

    store.fetch_users().await;

    assert_eq!(store.error(), Some("Failed to fetch users"));
    assert!(!store.is_fetching());
    assert!(store.users().is_empty());
}

#[tokio::test]
async fn test_form_submit_creates_then_updates() {
    let mut store = UserStore::new(UsersClient::new(spawn_server().await));

    let form = UserForm {
        email: "form@x.com".into(),
        name: "Fran".into(),
        age: None,
    };
    let created = form.submit(&mut store, None).await.unwrap();

    let mut edit = UserForm::from_user(&created);
    edit.age = Some(41);
    let updated = edit.submit(&mut store, Some(created.id)).await.unwrap();
    assert_eq!(updated.age, Some(41));
    assert_eq!(store.users(), &[updated]);

    // Invalid forms never reach the server.
    let invalid = UserForm {
        email: "nope".into(),
        name: String::new(),
        age: Some(0),
    };
    let err = invalid.submit(&mut store, None).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(store.users().len(), 1);
}
