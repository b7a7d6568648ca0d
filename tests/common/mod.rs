#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    extract::{Path, Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    routing::{delete, get},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

use campus::middleware::permission::{
    RequireCampusDelete, RequireCampusView, RequireGradebookManage, RequireGradebookView,
    enforce_permission,
};
use campus::{AppState, Permission, PermissionRegistry, Role};
use campus_auth::{Claims, create_access_token, encode_claims};
use campus_config::{AuthzConfig, JwtConfig, UnknownRolePolicy};

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn test_state(policy: UnknownRolePolicy) -> AppState {
    AppState::new(
        jwt_config(),
        AuthzConfig {
            unknown_role_policy: policy,
            table_path: None,
        },
        PermissionRegistry::builtin(),
    )
}

pub fn token_for(role: Role) -> String {
    create_access_token(
        Uuid::new_v4(),
        &format!("{}@campus.edu", role.as_str()),
        role,
        &jwt_config(),
    )
    .unwrap()
}

/// Token whose role claim is an arbitrary string.
pub fn token_with_raw_role(role: &str) -> String {
    let now = unix_now();
    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        email: "someone@campus.edu".to_string(),
        role: role.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode_claims(&claims, &jwt_config()).unwrap()
}

fn unix_now() -> usize {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

async fn list_rooms(RequireCampusView(_user): RequireCampusView) -> &'static str {
    "rooms"
}

async fn delete_room(
    RequireCampusDelete(_user): RequireCampusDelete,
    Path(_id): Path<Uuid>,
) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn gradebook(RequireGradebookView(user): RequireGradebookView) -> String {
    user.email().to_string()
}

async fn update_gradebook(RequireGradebookManage(_user): RequireGradebookManage) -> StatusCode {
    StatusCode::OK
}

async fn settings() -> &'static str {
    "settings"
}

pub fn build_app(state: AppState) -> Router {
    let settings_routes = Router::new()
        .route("/settings", get(settings))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            |state: State<AppState>, req: Request, next: Next| {
                enforce_permission(state, req, next, Permission::SettingsManage)
            },
        ));

    Router::new()
        .route("/campus/rooms", get(list_rooms))
        .route("/campus/rooms/{id}", delete(delete_room))
        .route("/gradebook", get(gradebook).post(update_gradebook))
        .merge(settings_routes)
        .with_state(state)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: String,
}

pub async fn send(app: Router, method: &str, uri: &str, token: Option<&str>) -> TestResponse {
    let mut builder = axum::http::Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    TestResponse {
        status,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}
