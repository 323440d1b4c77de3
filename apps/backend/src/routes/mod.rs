use actix_web::web;

use crate::middleware::SessionAuth;

pub mod auth;
pub mod carousels;
pub mod health;
pub mod notices;
pub mod photos;
pub mod users;

/// Register every route. `/health` and `/login` are public; everything else
/// sits behind `SessionAuth`.
///
/// Shared by `main.rs` and the integration tests so both serve the same
/// surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_public_routes);

    cfg.service(
        web::scope("/me")
            .wrap(SessionAuth)
            .configure(auth::configure_routes),
    )
    .service(
        web::scope("/users")
            .wrap(SessionAuth)
            .configure(users::configure_routes),
    )
    .service(
        web::scope("/institutes")
            .wrap(SessionAuth)
            .configure(users::configure_institute_routes),
    )
    .service(
        web::scope("/notices")
            .wrap(SessionAuth)
            .configure(notices::configure_routes),
    )
    .service(
        web::scope("/photos")
            .wrap(SessionAuth)
            .configure(photos::configure_routes),
    )
    .service(
        web::scope("/carousels")
            .wrap(SessionAuth)
            .configure(carousels::configure_routes),
    );
}
