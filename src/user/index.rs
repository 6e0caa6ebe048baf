use super::controller::{login_form, login_user, logout_user, register_form, register_user};
use actix_web::web;

pub fn user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/register")
            .route(web::get().to(register_form))
            .route(web::post().to(register_user)),
    )
    .service(
        web::resource("/login")
            .route(web::get().to(login_form))
            .route(web::post().to(login_user)),
    )
    .service(web::resource("/logout").route(web::get().to(logout_user)));
}
