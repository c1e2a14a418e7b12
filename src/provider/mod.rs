pub use self::{http::HTTP, source::CoinSource};

mod http;
mod source;
