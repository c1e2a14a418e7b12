use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::{
    configuration::Config,
    error::{self, Error},
    provider::CoinSource,
    types::{CoinsResponse, UpdateResponse},
};

#[derive(Debug)]
pub struct HTTP {
    pub config: Config,
    pub http: Client,
}

impl HTTP {
    pub fn new(config: Config) -> Result<HTTP, Error> {
        let mut builder = Client::builder();

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(Duration::from_secs(timeout));
        }

        let http = match builder.build() {
            Ok(c) => c,
            Err(e) => {
                return Err(error::Error::ReqwestError(e));
            },
        };

        Ok(HTTP { config, http })
    }
}

// Error answers come back as JSON bodies with a 5xx status, so the body is
// decoded without checking the status code.
impl CoinSource for HTTP {
    async fn request_update(&self) -> Result<UpdateResponse, Error> {
        let url = self.config.get_update_url()?;
        debug!("{}", &url);
        let json = self
            .http
            .get(url)
            .send()
            .await?
            .json::<UpdateResponse>()
            .await?;
        Ok(json)
    }

    async fn fetch_coins(&self) -> Result<CoinsResponse, Error> {
        let url = self.config.get_coins_url()?;
        debug!("{}", &url);
        let json = self
            .http
            .get(url)
            .send()
            .await?
            .json::<CoinsResponse>()
            .await?;
        Ok(json)
    }
}
