//! User endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::{NewUser, User, UserPatch, UserRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{FilterField, Pagination, PaginationParams, ValidationError};

/// Create user request
///
/// Fields are Option so an absent key reaches the handler and maps to the
/// service's own 400 body instead of the framework's deserialization
/// rejection.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
}

impl CreateUserRequest {
    /// Presence checks only; lengths, age bounds, and email format pass
    /// through unchecked.
    pub fn validate(self) -> Result<NewUser, ValidationError> {
        let email = match self.email {
            None => return Err(ValidationError::Missing { field: "email" }),
            Some(e) if e.is_empty() => return Err(ValidationError::Empty { field: "email" }),
            Some(e) => e,
        };
        let name = match self.name {
            None => return Err(ValidationError::Missing { field: "name" }),
            Some(n) if n.is_empty() => return Err(ValidationError::Empty { field: "name" }),
            Some(n) => n,
        };
        let age = self
            .age
            .ok_or(ValidationError::Missing { field: "age" })?;

        Ok(NewUser { email, name, age })
    }
}

/// Update user request - any subset of the three non-id fields
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            email: req.email,
            name: req.name,
            age: req.age,
        }
    }
}

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub age: i32,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            name: u.name,
            age: u.age,
        }
    }
}

/// Confirmation body for mutations that return no entity
#[derive(Debug, Serialize)]
pub struct ConfirmationResponse {
    pub message: &'static str,
}

/// Total row count response
#[derive(Debug, Serialize)]
pub struct TotalResponse {
    pub total: i64,
}

/// Listing query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListUsersParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub filtro: Option<String>,
    pub busqueda: Option<String>,
}

/// GET /usuarios - paginated listing, filterable by substring
async fn list_users(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let filter = match params.filtro.as_deref() {
        Some(value) => FilterField::parse(value)?,
        None => FilterField::default(),
    };
    let search = params.busqueda.unwrap_or_default();
    let page = Pagination::from(PaginationParams {
        page: params.page,
        per_page: params.per_page,
    });

    let users = UserRepo::new(&state.pool).list(filter, &search, page).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /usuarios/{id} - fetch one user
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepo::new(&state.pool).get(id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// POST /usuarios - create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let draft = req.validate()?;
    let user = UserRepo::new(&state.pool).create(draft).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// PUT /usuarios/{id} - partial update of any subset of fields
async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ConfirmationResponse>, ApiError> {
    UserRepo::new(&state.pool).update(id, req.into()).await?;
    Ok(Json(ConfirmationResponse {
        message: "user updated",
    }))
}

/// DELETE /usuarios/{id} - remove a user permanently
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ConfirmationResponse>, ApiError> {
    UserRepo::new(&state.pool).delete(id).await?;
    Ok(Json(ConfirmationResponse {
        message: "user deleted",
    }))
}

/// GET /usuarios/total - unfiltered row count
async fn total_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TotalResponse>, ApiError> {
    let total = UserRepo::new(&state.pool).count().await?;
    Ok(Json(TotalResponse { total }))
}

/// User routes, nested under /api by the server
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/usuarios", get(list_users).post(create_user))
        .route("/usuarios/total", get(total_users))
        .route(
            "/usuarios/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
