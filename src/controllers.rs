pub mod dataset;
pub mod health;
pub mod ping;
pub mod upload;
