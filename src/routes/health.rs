use crate::models::health::OkResponse;
use rocket::routes;
use rocket::serde::json::Json;

#[rocket::get("/health")]
pub async fn healthcheck() -> Json<OkResponse> {
    Json(OkResponse::ok())
}

pub fn routes() -> Vec<rocket::Route> {
    routes![healthcheck]
}
