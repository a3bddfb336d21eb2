pub mod cases;
pub mod config;
pub mod engine;
pub mod errors;
pub mod model;
pub mod payload;
pub mod providers;
pub mod report;
pub mod storage;
pub mod weights;
