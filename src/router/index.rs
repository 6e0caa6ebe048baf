use crate::blog::controller::root;
use crate::blog::index::blog_routes;
use crate::comment::index::comment_routes;
use crate::user::index::user_routes;
use actix_web::web;

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root));
    cfg.configure(user_routes);
    cfg.configure(blog_routes);
    cfg.configure(comment_routes);
}
