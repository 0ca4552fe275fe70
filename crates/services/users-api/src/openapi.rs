//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health_handler::HealthReport;
use crate::handlers::user_handler::{CreateUserRequest, UpdateUserRequest};
use domain::User;

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
    ),
    components(
        schemas(
            User,
            CreateUserRequest,
            UpdateUserRequest,
            HealthReport,
        )
    ),
    tags(
        (name = "Health", description = "Dependency health"),
        (name = "Users", description = "User management endpoints"),
    )
)]
pub struct ApiDoc;
