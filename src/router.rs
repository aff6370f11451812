use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::role::{require_admin, require_sub_admin, require_user};
use crate::modules::auth::router::init_auth_router;
use crate::modules::{dishes, restaurants, users};
use crate::state::AppState;

pub fn init_router(state: AppState) -> Router {
    let admin = Router::new()
        .merge(users::router::admin_routes())
        .merge(restaurants::router::admin_routes())
        .merge(dishes::router::admin_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let sub_admin = Router::new()
        .merge(users::router::sub_admin_routes())
        .merge(restaurants::router::sub_admin_routes())
        .merge(dishes::router::sub_admin_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_sub_admin,
        ));

    let user = Router::new()
        .merge(restaurants::router::user_routes())
        .merge(dishes::router::user_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_user));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(
            "/v1",
            init_auth_router(state.clone())
                .nest("/admin", admin)
                .nest("/sub-admin", sub_admin)
                .nest("/user", user),
        )
        .with_state(state.clone())
        .layer(cors_layer(&state))
        .layer(middleware::from_fn(logging_middleware))
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = state
        .cors_config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
