//! # Data Transfer Objects
//!
//! ユースケースに渡す設定値

pub mod pipeline_config;
