use axum::Router;

use travelhub_core::resources::USERS;

use crate::app::services::AppServices;

pub mod auth;
pub mod charts;
pub mod resources;
pub mod system;

/// Router for every public endpoint: resource CRUD, login and charts.
pub fn router(services: &AppServices) -> Router {
    let mut router = Router::new()
        .nest("/auth", auth::router())
        .nest("/charts", charts::router());

    for service in &services.resources {
        let path = format!("/{}", service.spec().table);
        router = router.nest(&path, resources::router(service.clone()));
    }

    router.nest(&format!("/{}", USERS.table), resources::router(services.users.clone()))
}
