use actix_web::{get, web, Responder};
use serde::Deserialize;

use super::html;
use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[get("/filter")]
async fn index(
    state: web::Data<AppState<State>>,
    data: web::Query<Query>,
) -> Result<impl Responder, Error> {
    let symbol = data.symbol.as_deref().unwrap_or_default();
    state.renderer.filter_by_symbol(symbol).await;

    Ok(html(state.renderer.render_html()))
}

#[derive(Debug, Deserialize)]
pub struct Query {
    symbol: Option<String>,
}
