use super::controller::{
    create_blog, delete_blog, edit_blog_form, list_blogs, new_blog_form, show_blog, update_blog,
};
use actix_web::web;

pub fn blog_routes(cfg: &mut web::ServiceConfig) {
    // "/blogs/new" must be registered before "/blogs/{id}".
    cfg.service(
        web::resource("/blogs")
            .route(web::get().to(list_blogs))
            .route(web::post().to(create_blog)),
    )
    .service(web::resource("/blogs/new").route(web::get().to(new_blog_form)))
    .service(
        web::resource("/blogs/{id}")
            .route(web::get().to(show_blog))
            .route(web::put().to(update_blog))
            .route(web::delete().to(delete_blog)),
    )
    .service(web::resource("/blogs/{id}/edit").route(web::get().to(edit_blog_form)));
}
