pub mod layout;
pub mod metrics;
pub mod word;
