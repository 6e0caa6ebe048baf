use super::controller::{
    create_comment, delete_comment, edit_comment_form, new_comment_form, update_comment,
};
use actix_web::web;

pub fn comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/blogs/{id}/comments/new").route(web::get().to(new_comment_form)))
        .service(
            web::resource(["/blogs/{id}/comments", "/blogs/{id}/comments/"])
                .route(web::post().to(create_comment)),
        )
        .service(
            web::resource("/blogs/{id}/comments/{comment_id}")
                .route(web::put().to(update_comment))
                .route(web::delete().to(delete_comment)),
        )
        .service(
            web::resource("/blogs/{id}/comments/{comment_id}/edit")
                .route(web::get().to(edit_comment_form)),
        );
}
