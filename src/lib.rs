// Sentiscope: topic sentiment analysis for short social posts
//
// This is the library root. Each module corresponds to a stage of the
// pipeline or one of the surfaces in front of it.

pub mod analysis;
pub mod batch;
pub mod catalog;
pub mod config;
pub mod output;
pub mod records;
pub mod sentiment;
pub mod store;
pub mod text;

#[cfg(feature = "web")]
pub mod web;
