use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use shared_database::AppState;
use shared_utils::extractor::auth_middleware;
use shared_utils::upload::UPLOAD_BODY_LIMIT;

use crate::handlers;

pub fn user_routes(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/", get(handlers::list_users))
        .route("/", post(handlers::create_user))
        .route("/", put(handlers::update_user))
        .route("/{id}", delete(handlers::delete_user))
        .route(
            "/avatar",
            post(handlers::upload_avatar).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new().merge(protected_routes).with_state(state)
}
