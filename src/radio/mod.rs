//! A module to encapsulate all things related to radio operation.
pub mod prelude;

mod nrf24;
pub use nrf24::{limits, Nrf24, Nrf24Error, PipeEntry, PipeTable};

mod config;
pub use config::RadioConfig;
