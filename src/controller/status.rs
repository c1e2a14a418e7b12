use actix_web::{get, web, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    configuration::{AppState, State},
    error::Error,
};

#[get("/status")]
async fn index(
    state: web::Data<AppState<State>>,
) -> Result<impl Responder, Error> {
    let renderer = &state.renderer;
    let records = renderer.state().len().await;
    let (loading, shown, filter) = {
        let page = renderer.page();
        (page.is_loading(), page.rows().len(), page.filter().to_owned())
    };

    Ok(web::Json(ResponseData {
        refreshing: renderer.state().is_refreshing(),
        loading,
        records,
        shown,
        filter,
        refreshed_at: renderer.refreshed_at(),
        refresh_interval: state.config.refresh_interval,
    }))
}

#[derive(Debug, Serialize)]
pub struct ResponseData {
    pub refreshing: bool,
    pub loading: bool,
    pub records: usize,
    pub shown: usize,
    pub filter: String,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub refresh_interval: u64,
}
