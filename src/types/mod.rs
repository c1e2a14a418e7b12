pub use self::{
    api_response::{ApiStatus, CoinsResponse, UpdateResponse},
    coin_record::CoinRecord,
    interval::Interval,
};

mod api_response;
mod coin_record;
mod interval;
