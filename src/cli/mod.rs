pub mod convert;
pub mod currencies;
pub mod metadata;
pub mod setup;
pub mod ui;
