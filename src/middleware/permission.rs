//! Permission enforcement for Axum handlers.
//!
//! Three ways to guard a route, all routed through [`authorize`]:
//! 1. Extractors generated by [`require_permission!`](crate::require_permission)
//! 2. Layer-based middleware using [`enforce_permission`]
//! 3. Calling [`authorize`] from handler logic
//!
//! Every path fails closed. A denied request gets a generic body; the missing
//! permission only ever reaches the logs.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, error, warn};

use campus_config::UnknownRolePolicy;
use campus_core::{AppError, Permission, PermissionError};
use campus_observability::{CheckOutcome, track_permission_check};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

pub const ACCESS_DENIED: &str = "Access denied";
pub const AUTHORIZATION_FAILED: &str = "Unable to authorize request";

const UNKNOWN_ROLE_LABEL: &str = "unknown";

/// Decide whether `auth_user` may perform an operation requiring `permission`.
pub fn authorize(
    auth_user: &AuthUser,
    permission: Permission,
    state: &AppState,
) -> Result<(), AppError> {
    let role = match auth_user.role() {
        Ok(role) => role,
        Err(err) => {
            return Err(reject_unknown_role(
                auth_user,
                permission,
                &err,
                state.authz_config.unknown_role_policy,
            ));
        }
    };

    if state.registry.has_permission(role, permission) {
        debug!(
            user = %auth_user.0.sub,
            role = %role,
            permission = %permission,
            "Permission granted"
        );
        track_permission_check(role.as_str(), permission.as_str(), CheckOutcome::Granted);
        return Ok(());
    }

    warn!(
        user = %auth_user.0.sub,
        role = %role,
        permission = %permission,
        "Permission denied"
    );
    track_permission_check(role.as_str(), permission.as_str(), CheckOutcome::Denied);
    Err(AppError::forbidden(ACCESS_DENIED))
}

fn reject_unknown_role(
    auth_user: &AuthUser,
    permission: Permission,
    err: &PermissionError,
    policy: UnknownRolePolicy,
) -> AppError {
    // the raw claim is logged below, the metric label stays bounded
    track_permission_check(UNKNOWN_ROLE_LABEL, permission.as_str(), CheckOutcome::UnknownRole);

    match policy {
        UnknownRolePolicy::Fail => {
            error!(
                user = %auth_user.0.sub,
                error = %err,
                permission = %permission,
                "Token carries an unknown role"
            );
            AppError::internal_error(AUTHORIZATION_FAILED)
        }
        UnknownRolePolicy::Deny => {
            warn!(
                user = %auth_user.0.sub,
                error = %err,
                permission = %permission,
                "Token carries an unknown role, denying"
            );
            AppError::forbidden(ACCESS_DENIED)
        }
    }
}

/// Middleware function that requires `permission` before running the inner service.
///
/// # Usage with axum::middleware::from_fn_with_state
///
/// ```rust,ignore
/// use axum::{Router, extract::{Request, State}, middleware::{self, Next}};
/// use campus::middleware::permission::enforce_permission;
/// use campus_core::Permission;
///
/// let settings_routes = Router::new()
///     .route("/settings", get(settings_handler))
///     .route_layer(middleware::from_fn_with_state(
///         state.clone(),
///         |state: State<AppState>, req: Request, next: Next| {
///             enforce_permission(state, req, next, Permission::SettingsManage)
///         },
///     ));
/// ```
pub async fn enforce_permission(
    State(state): State<AppState>,
    req: Request,
    next: Next,
    permission: Permission,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let auth_user = AuthUser::from_request_parts(&mut parts, &state).await?;
    authorize(&auth_user, permission, &state)?;

    let req = Request::from_parts(parts, body);
    Ok(next.run(req).await)
}

/// Generates an extractor that authenticates the caller and requires one permission.
///
/// ```rust,ignore
/// require_permission!(RequireCampusView, campus_core::Permission::CampusView);
///
/// async fn list_rooms(RequireCampusView(auth_user): RequireCampusView) -> impl IntoResponse {
///     // only runs for roles holding campus:view
/// }
/// ```
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = $crate::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                $crate::middleware::permission::authorize(&auth_user, $permission, state)?;

                Ok($name(auth_user))
            }
        }
    };
}

// Users
require_permission!(RequireUserCreate, Permission::UserCreate);
require_permission!(RequireUserRead, Permission::UserRead);
require_permission!(RequireUserUpdate, Permission::UserUpdate);
require_permission!(RequireUserDelete, Permission::UserDelete);

// Roles and settings
require_permission!(RequireRoleRead, Permission::RoleRead);
require_permission!(RequirePermissionManage, Permission::PermissionManage);
require_permission!(RequireSettingsManage, Permission::SettingsManage);

// Campus
require_permission!(RequireCampusView, Permission::CampusView);
require_permission!(RequireCampusManage, Permission::CampusManage);
require_permission!(RequireCampusDelete, Permission::CampusDelete);

// Curriculum
require_permission!(RequireProgramView, Permission::ProgramView);
require_permission!(RequireProgramManage, Permission::ProgramManage);
require_permission!(RequireSubjectView, Permission::SubjectView);
require_permission!(RequireSubjectManage, Permission::SubjectManage);
require_permission!(RequireClassGroupView, Permission::ClassGroupView);
require_permission!(RequireClassGroupManage, Permission::ClassGroupManage);

// Gradebook
require_permission!(RequireGradebookView, Permission::GradebookView);
require_permission!(RequireGradebookOverview, Permission::GradebookOverview);
require_permission!(RequireGradebookManage, Permission::GradebookManage);
require_permission!(RequireGradeActivity, Permission::GradeActivity);
require_permission!(RequireGradeModify, Permission::GradeModify);
