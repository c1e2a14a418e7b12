use actix_web::{post, web, Responder};

use super::html;
use crate::{
    configuration::{AppState, State},
    error::Error,
};

/// Manual refresh from the page's update button.
#[post("/refresh")]
async fn index(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, Error> {
    state.renderer.trigger_refresh(true).await;

    Ok(html(state.renderer.render_html()))
}

#[post("/refresh")]
async fn json(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, Error> {
    let outcome = state.renderer.trigger_refresh(true).await;

    Ok(web::Json(outcome))
}
