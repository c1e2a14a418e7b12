//! Periodic refresh task
//!
//! Fires one refresh on start-up and then one per refresh interval. Each
//! refresh runs in its own task so a slow backend never delays the timer;
//! overlapping ticks are dropped by the renderer's in-progress flag.

use std::{sync::Arc, time::Duration};

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::{
    configuration::{AppState, State},
    error::Error,
    provider::CoinSource,
    renderer::{PollingRenderer, RefreshOutcome},
};

pub async fn refresh_task(app_state: AppState<State>) -> Result<(), Error> {
    let period = Duration::from_secs(app_state.config.refresh_interval);
    info!("Starting refresh task, interval {}s", period.as_secs());

    run_schedule(Arc::clone(&app_state.renderer), period).await
}

pub async fn run_schedule<S>(
    renderer: Arc<PollingRenderer<S>>,
    period: Duration,
) -> Result<(), Error>
where
    S: CoinSource + 'static,
{
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let renderer = Arc::clone(&renderer);
        tokio::spawn(async move {
            if let RefreshOutcome::Skipped = renderer.trigger_refresh(false).await
            {
                debug!("Scheduled refresh skipped, previous one still running");
            }
        });
    }
}
