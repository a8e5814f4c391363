//! HTTP Handlers

use axum::Json;
use axum::extract::{FromRef, Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use platform::client::{extract_client_ip, is_secure_transport};
use platform::cookie::set_cookie_header;

use crate::application::config::AuthConfig;
use crate::application::guard::{ADMINS, authorize};
use crate::application::session::SessionResolver;
use crate::application::token::TokenCodec;
use crate::application::{
    CreateUserInput, ManageUsersUseCase, SignInInput, SignInUseCase, UpdateUserInput,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    CreateUserRequest, LoginRequest, LoginResponse, MessageResponse, UpdateUserRequest, UserView,
};
use crate::presentation::extract::Authenticated;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub codec: Arc<TokenCodec>,
    pub resolver: SessionResolver,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let codec = Arc::new(TokenCodec::new(&config));
        let resolver = SessionResolver::new(codec.clone(), config.cookie_name.as_str());
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            codec,
            resolver,
        }
    }

    fn users(&self) -> ManageUsersUseCase<R> {
        ManageUsersUseCase::new(self.repo.clone(), self.config.clone())
    }
}

impl<R> FromRef<AuthAppState<R>> for SessionResolver
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    fn from_ref(state: &AuthAppState<R>) -> Self {
        state.resolver.clone()
    }
}

// ============================================================================
// Login / Logout
// ============================================================================

/// POST /api/users/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    uri: Uri,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.codec.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await
        .inspect_err(|e| {
            if matches!(e, AuthError::InvalidCredentials) {
                let client_ip = extract_client_ip(&headers, None);
                tracing::warn!(client_ip = ?client_ip, "Login rejected");
            }
        })?;

    let secure = is_secure_transport(&headers, &uri, state.config.trust_forwarded_proto);
    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&output.token, secure);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie_value(&cookie)?)],
        Json(LoginResponse {
            message: "Login successful",
            user: UserView::from(&output.user),
        }),
    )
        .into_response())
}

/// POST /api/users/logout
///
/// Always succeeds; the token itself stays valid until it expires.
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    uri: Uri,
) -> AuthResult<Response>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let secure = is_secure_transport(&headers, &uri, state.config.trust_forwarded_proto);
    let cookie = state.config.session_cookie().build_delete_cookie(secure);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie_value(&cookie)?)],
        Json(MessageResponse {
            message: "Logged out",
        }),
    )
        .into_response())
}

// ============================================================================
// Current user
// ============================================================================

/// GET /api/users/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    Authenticated(principal): Authenticated,
) -> AuthResult<Json<UserView>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = state.users().get(principal.id).await?;
    Ok(Json(UserView::from(&user)))
}

// ============================================================================
// User management
// ============================================================================

/// GET /api/users (admin)
pub async fn list_users<R>(
    State(state): State<AuthAppState<R>>,
    Authenticated(principal): Authenticated,
) -> AuthResult<Json<Vec<UserView>>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, ADMINS)?;

    let users = state.users().list().await?;
    Ok(Json(users.iter().map(UserView::from).collect()))
}

/// POST /api/users (admin)
pub async fn create_user<R>(
    State(state): State<AuthAppState<R>>,
    Authenticated(principal): Authenticated,
    Json(req): Json<CreateUserRequest>,
) -> AuthResult<(StatusCode, Json<UserView>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, ADMINS)?;

    let user = state
        .users()
        .create(CreateUserInput {
            name: req.name,
            email: req.email,
            role: req.role,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserView::from(&user))))
}

/// GET /api/users/{id}
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    Authenticated(_): Authenticated,
    Path(id): Path<String>,
) -> AuthResult<Json<UserView>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user = state.users().get(parse_id(&id)?).await?;
    Ok(Json(UserView::from(&user)))
}

/// PUT /api/users/{id} (admin)
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
    Json(req): Json<UpdateUserRequest>,
) -> AuthResult<Json<UserView>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, ADMINS)?;

    let user = state
        .users()
        .update(
            parse_id(&id)?,
            UpdateUserInput {
                name: req.name,
                email: req.email,
                role: req.role,
                password: req.password,
                img: req.img,
            },
        )
        .await?;

    Ok(Json(UserView::from(&user)))
}

/// DELETE /api/users/{id} (admin)
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    Authenticated(principal): Authenticated,
    Path(id): Path<String>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    authorize(&principal, ADMINS)?;

    state.users().delete(parse_id(&id)?).await?;

    Ok(Json(MessageResponse {
        message: "User deleted successfully",
    }))
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_id(raw: &str) -> AuthResult<i32> {
    raw.parse()
        .map_err(|_| AuthError::Validation("Invalid id".to_string()))
}

fn cookie_value(cookie: &str) -> AuthResult<HeaderValue> {
    set_cookie_header(cookie).map_err(|e| AuthError::Internal(format!("invalid Set-Cookie value: {e}")))
}
