use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{ErrorResponse, IdPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{CreateUser, MessageResponse, UpdateUser, User, UserSummary};
use crate::repository::UserRepository;
use crate::service::UserService;

pub const USERS_TAG: &str = "users";

/// OpenAPI documentation for the Users API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_users,
        create_user,
        users_summary,
        get_user_by_email,
        get_user,
        update_user,
        delete_user,
    ),
    components(schemas(
        User,
        CreateUser,
        UpdateUser,
        UserSummary,
        MessageResponse,
        ErrorResponse
    )),
    tags(
        (name = USERS_TAG, description = "User management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the users router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: UserService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/summary", get(users_summary))
        .route("/by-email/{email}", get(get_user_by_email))
        .route(
            "/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        )
        .with_state(shared_service)
}

/// List all users
#[utoipa::path(
    get,
    path = "",
    tag = USERS_TAG,
    responses(
        (status = 200, description = "All users, oldest first", body = Vec<User>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn list_users<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<Vec<User>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Create a new user
#[utoipa::path(
    post,
    path = "",
    tag = USERS_TAG,
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created successfully", body = User),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn create_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateUser>,
) -> UserResult<impl IntoResponse> {
    let user = service.create_user(input).await?;
    tracing::info!(user_id = user.id, "User created via API");
    Ok((StatusCode::CREATED, Json(user)))
}

/// User count, average age and the full list
#[utoipa::path(
    get,
    path = "/summary",
    tag = USERS_TAG,
    responses(
        (status = 200, description = "Summary of all users", body = UserSummary),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn users_summary<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
) -> UserResult<Json<UserSummary>> {
    let summary = service.summary().await?;
    Ok(Json(summary))
}

/// Get a user by email
#[utoipa::path(
    get,
    path = "/by-email/{email}",
    tag = USERS_TAG,
    params(
        ("email" = String, Path, description = "Email address, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "No user with this email", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_user_by_email<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    Path(email): Path<String>,
) -> UserResult<Json<User>> {
    let user = service.get_user_by_email(&email).await?;
    Ok(Json(user))
}

/// Get a user by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USERS_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "ID is not an integer", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn get_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<User>> {
    let user = service.get_user(id).await?;
    Ok(Json(user))
}

/// Update the given fields of a user
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = USERS_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated successfully", body = User),
        (status = 400, description = "Invalid input or ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn update_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateUser>,
) -> UserResult<Json<User>> {
    let user = service.update_user(id, input).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USERS_TAG,
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageResponse),
        (status = 400, description = "ID is not an integer", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
async fn delete_user<R: UserRepository>(
    State(service): State<Arc<UserService<R>>>,
    IdPath(id): IdPath,
) -> UserResult<Json<MessageResponse>> {
    service.delete_user(id).await?;
    tracing::info!(user_id = id, "User deleted via API");
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
