use std::future::Future;

use crate::{
    error::Error,
    types::{CoinsResponse, UpdateResponse},
};

/// The two backend calls a refresh is made of.
pub trait CoinSource: Send + Sync {
    /// Asks the backend to recompute its open-interest data.
    fn request_update(
        &self,
    ) -> impl Future<Output = Result<UpdateResponse, Error>> + Send;

    /// Fetches the dataset the backend currently holds.
    fn fetch_coins(
        &self,
    ) -> impl Future<Output = Result<CoinsResponse, Error>> + Send;
}
