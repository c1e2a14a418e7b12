use actix_web::{get, web, Responder};

use super::html;
use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[get("/")]
async fn index(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, Error> {
    Ok(html(state.renderer.render_html()))
}
