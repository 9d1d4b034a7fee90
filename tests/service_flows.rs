//! Service-level flows against a real PostgreSQL database.
//!
//! Every test is gated on `STENCIL_TEST_DATABASE_URL`: when the variable
//! is unset the test returns immediately, so the default `cargo test` run
//! needs no database. Point the variable at a throwaway database to run
//! them; migrations are applied once per process and all test data is
//! keyed by random UUIDs, so repeated runs do not collide.

use tokio::sync::OnceCell;
use uuid::Uuid;

use stencil::api::dto::{
    CreateItemRequest, CreateUserRequest, RegisterRequest, UpdateUserRequest,
};
use stencil::config::DatabaseConfig;
use stencil::db::{establish_async_connection_pool, run_pending_migrations};
use stencil::error::AppError;
use stencil::repositories::Repositories;
use stencil::services::Services;

const DATABASE_URL_ENV: &str = "STENCIL_TEST_DATABASE_URL";

static MIGRATIONS_APPLIED: OnceCell<()> = OnceCell::const_new();

async fn test_services() -> Option<Services> {
    let url = std::env::var(DATABASE_URL_ENV).ok()?;

    MIGRATIONS_APPLIED
        .get_or_init(|| async {
            run_pending_migrations(&url)
                .await
                .expect("Failed to apply migrations to the test database");
        })
        .await;

    let config = DatabaseConfig {
        url,
        ..Default::default()
    };
    let pool = establish_async_connection_pool(&config)
        .await
        .expect("Failed to build test connection pool");

    Some(Services::new(Repositories::new(pool)))
}

fn unique_email(tag: &str) -> String {
    format!("{}-{}@example.com", tag, Uuid::new_v4())
}

fn create_request(email: &str) -> CreateUserRequest {
    CreateUserRequest {
        email: email.to_string(),
        password: "password123".to_string(),
        is_active: true,
        is_superuser: false,
        full_name: None,
    }
}

#[tokio::test]
async fn second_create_with_same_email_is_duplicate() {
    let Some(services) = test_services().await else {
        return;
    };
    let email = unique_email("dup");

    services.users.create(create_request(&email)).await.unwrap();

    let err = services
        .users
        .create(create_request(&email))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Duplicate { .. }));
}

#[tokio::test]
async fn register_forces_plain_active_account() {
    let Some(services) = test_services().await else {
        return;
    };

    let user = services
        .users
        .register(RegisterRequest {
            email: unique_email("register"),
            password: "password123".to_string(),
            full_name: Some("New User".to_string()),
        })
        .await
        .unwrap();

    assert!(user.is_active);
    assert!(!user.is_superuser);
    assert!(user.hashed_password.starts_with("$argon2"));
    assert_ne!(user.hashed_password, "password123");
}

#[tokio::test]
async fn authenticate_hides_which_credential_failed() {
    let Some(services) = test_services().await else {
        return;
    };
    let email = unique_email("auth");

    // Unknown email and wrong password must be indistinguishable.
    let unknown = services
        .users
        .authenticate(&email, "password123")
        .await
        .unwrap();
    assert!(unknown.is_none());

    let created = services.users.create(create_request(&email)).await.unwrap();

    let wrong_password = services
        .users
        .authenticate(&email, "not-the-password")
        .await
        .unwrap();
    assert!(wrong_password.is_none());

    let authenticated = services
        .users
        .authenticate(&email, "password123")
        .await
        .unwrap()
        .expect("correct credentials should authenticate");
    assert_eq!(authenticated.id, created.id);
}

#[tokio::test]
async fn partial_update_leaves_absent_fields_untouched() {
    let Some(services) = test_services().await else {
        return;
    };
    let email = unique_email("update");

    let mut request = create_request(&email);
    request.full_name = Some("Original Name".to_string());
    let created = services.users.create(request).await.unwrap();

    let updated = services
        .users
        .update(
            created.id,
            UpdateUserRequest {
                full_name: Some("Changed Name".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.full_name.as_deref(), Some("Changed Name"));
    assert_eq!(updated.email, email);
    assert!(updated.is_active);
    assert_eq!(updated.hashed_password, created.hashed_password);

    // A changeset with nothing in it returns the stored row unchanged.
    let unchanged = services
        .users
        .update(created.id, UpdateUserRequest::default())
        .await
        .unwrap();
    assert_eq!(unchanged.full_name.as_deref(), Some("Changed Name"));
}

#[tokio::test]
async fn repeated_delete_reports_not_found() {
    let Some(services) = test_services().await else {
        return;
    };

    let created = services
        .users
        .create(create_request(&unique_email("delete")))
        .await
        .unwrap();

    let snapshot = services.users.delete(created.id).await.unwrap();
    assert_eq!(snapshot.id, created.id);

    let err = services.users.delete(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let err = services.users.get(created.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn count_by_owner_scopes_to_the_owner() {
    let Some(services) = test_services().await else {
        return;
    };

    let first = services
        .users
        .create(create_request(&unique_email("owner-a")))
        .await
        .unwrap();
    let second = services
        .users
        .create(create_request(&unique_email("owner-b")))
        .await
        .unwrap();

    for title in ["first item", "second item"] {
        services
            .items
            .create(
                CreateItemRequest {
                    title: title.to_string(),
                    description: None,
                },
                first.id,
            )
            .await
            .unwrap();
    }
    services
        .items
        .create(
            CreateItemRequest {
                title: "only item".to_string(),
                description: None,
            },
            second.id,
        )
        .await
        .unwrap();

    assert_eq!(services.items.count_by_owner(first.id).await.unwrap(), 2);
    assert_eq!(services.items.count_by_owner(second.id).await.unwrap(), 1);

    let (items, total) = services
        .items
        .list_by_owner(first.id, 0, 100)
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(total, 2);
    assert!(items.iter().all(|item| item.owner_id == first.id));
}

#[tokio::test]
async fn item_creation_requires_an_existing_owner() {
    let Some(services) = test_services().await else {
        return;
    };

    let err = services
        .items
        .create(
            CreateItemRequest {
                title: "orphan".to_string(),
                description: None,
            },
            Uuid::new_v4(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}
