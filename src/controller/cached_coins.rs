use actix_web::{get, web, Responder};

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[get("/cached-coins")]
async fn index(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, Error> {
    let data = state.renderer.state().snapshot().await;

    Ok(web::Json(data))
}
