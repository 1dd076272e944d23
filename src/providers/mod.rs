pub mod ecb;

pub use ecb::{ECB_DAILY_URL, EcbFeedProvider};
