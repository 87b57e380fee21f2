use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let device_routes = Router::new()
        .route(
            "/devices",
            get(handlers::devices::get_devices).post(handlers::devices::create_device),
        )
        .route(
            "/devices/",
            get(handlers::devices::missing_device_id)
                .put(handlers::devices::missing_device_id)
                .delete(handlers::devices::missing_device_id),
        )
        .route(
            "/devices/:id",
            get(handlers::devices::get_device)
                .put(handlers::devices::update_device)
                .delete(handlers::devices::remove_device),
        )
        .route("/tokens/:token", get(handlers::devices::get_device_by_token));

    let notification_routes = Router::new()
        .route(
            "/notify/device/",
            post(handlers::notifications::missing_device_id),
        )
        .route(
            "/notify/device/:id",
            post(handlers::notifications::send_to_device),
        )
        .route("/notify/all", post(handlers::notifications::send_to_all));

    Router::new()
        .route("/", get(handlers::system::welcome))
        .route("/health", get(handlers::system::health_check))
        .merge(device_routes)
        .merge(notification_routes)
        .with_state(state)
}
