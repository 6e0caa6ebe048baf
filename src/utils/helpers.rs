use actix_web::HttpResponse;
use actix_web::http::header;
use mongodb::bson::oid::ObjectId;

/// Parses a path id; anything that is not a valid object id is `None`, which
/// callers treat as "not found".
pub fn parse_id(raw: &str) -> Option<ObjectId> {
    ObjectId::parse_str(raw.trim()).ok()
}

pub fn redirect(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}
