//! Census API Adapter Modules
//!
//! Census API との通信

pub mod client;
