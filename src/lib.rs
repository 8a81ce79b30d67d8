pub mod app;
pub mod cases;
pub mod config;
pub mod countries;
pub mod dates;
pub mod error;
pub mod extract;
pub mod income;
pub mod labs;
pub mod output;
pub mod pipeline;
pub mod reference;
pub mod sequence_counts;
pub mod store;
pub mod table;
