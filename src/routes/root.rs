use crate::config::Config;
use rocket::response::Redirect;
use rocket::{State, routes};

/// The service carries no UI of its own; the root redirects to the hosted
/// admin page.
#[rocket::get("/")]
pub async fn index(config: &State<Config>) -> Redirect {
    Redirect::found(config.admin.page_url.clone())
}

pub fn routes() -> Vec<rocket::Route> {
    routes![index]
}
