pub mod dataset;
pub mod storage;
pub mod validation;
