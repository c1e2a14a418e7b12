//! HTTP controllers
//!
//! Page routes answer with the rendered page, `/api` routes with JSON.

use actix_web::HttpResponse;

pub mod cached_coins;
pub mod filter;
pub mod page;
pub mod refresh;
pub mod status;
pub mod version;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}
