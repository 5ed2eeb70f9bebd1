#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`Nrf24::new()`](fn@crate::radio::Nrf24::new)
//! - [`Nrf24::init()`](radio/struct.Nrf24.html#method.init)
//! - [`Nrf24::is_connected()`](radio/struct.Nrf24.html#method.is_connected)
//! - [`Nrf24::start_listening()`](radio/struct.Nrf24.html#method.start_listening)
//! - [`Nrf24::stop_listening()`](radio/struct.Nrf24.html#method.stop_listening)
//! - [`Nrf24::open_writing_pipe()`](radio/struct.Nrf24.html#method.open_writing_pipe)
//! - [`Nrf24::open_reading_pipe()`](radio/struct.Nrf24.html#method.open_reading_pipe)
//! - [`Nrf24::close_reading_pipe()`](radio/struct.Nrf24.html#method.close_reading_pipe)
//! - [`Nrf24::close_writing_pipe()`](radio/struct.Nrf24.html#method.close_writing_pipe)
//! - [`Nrf24::available()`](radio/struct.Nrf24.html#method.available)
//! - [`Nrf24::available_pipe()`](radio/struct.Nrf24.html#method.available_pipe)
//! - [`Nrf24::read()`](radio/struct.Nrf24.html#method.read)
//! - [`Nrf24::send()`](radio/struct.Nrf24.html#method.send)
//! - [`Nrf24::set_channel()`](radio/struct.Nrf24.html#method.set_channel)
//! - [`Nrf24::get_channel()`](radio/struct.Nrf24.html#method.get_channel)
//!
//! ## Advanced API
//!
//! - [`Nrf24::write()`](radio/struct.Nrf24.html#method.write)
//! - [`Nrf24::fast_write()`](radio/struct.Nrf24.html#method.fast_write)
//! - [`Nrf24::write_ack_payload()`](radio/struct.Nrf24.html#method.write_ack_payload)
//! - [`Nrf24::get_fifo_state()`](radio/struct.Nrf24.html#method.get_fifo_state)
//! - [`Nrf24::clear_status_flags()`](radio/struct.Nrf24.html#method.clear_status_flags)
//! - [`Nrf24::update()`](radio/struct.Nrf24.html#method.update)
//! - [`Nrf24::get_status_flags()`](radio/struct.Nrf24.html#method.get_status_flags)
//! - [`Nrf24::flush_rx()`](radio/struct.Nrf24.html#method.flush_rx)
//! - [`Nrf24::flush_tx()`](radio/struct.Nrf24.html#method.flush_tx)
//! - [`Nrf24::get_dynamic_payload_length()`](radio/struct.Nrf24.html#method.get_dynamic_payload_length)
//! - [`Nrf24::mode()`](fn@crate::radio::Nrf24::mode)
//! - [`Nrf24::pipes()`](fn@crate::radio::Nrf24::pipes)
//! - [`Nrf24::tx_timeout`](value@crate::radio::Nrf24::tx_timeout)
//!
//! ## Configuration API
//!
//! - [`Nrf24::with_config()`](radio/struct.Nrf24.html#method.with_config)
//! - [`Nrf24::config()`](fn@crate::radio::Nrf24::config)
//! - [`Nrf24::set_auto_ack()`](radio/struct.Nrf24.html#method.set_auto_ack)
//! - [`Nrf24::set_retries()`](radio/struct.Nrf24.html#method.set_retries)
//! - [`Nrf24::set_dynamic_payload_length()`](radio/struct.Nrf24.html#method.set_dynamic_payload_length)
//! - [`Nrf24::set_dynamic_ack()`](radio/struct.Nrf24.html#method.set_dynamic_ack)
//! - [`Nrf24::set_ack_payload()`](radio/struct.Nrf24.html#method.set_ack_payload)
//! - [`Nrf24::set_address_width()`](radio/struct.Nrf24.html#method.set_address_width)
//! - [`Nrf24::get_address_width()`](radio/struct.Nrf24.html#method.get_address_width)
//! - [`Nrf24::set_payload_size()`](radio/struct.Nrf24.html#method.set_payload_size)
//! - [`Nrf24::get_payload_size()`](radio/struct.Nrf24.html#method.get_payload_size)
//! - [`Nrf24::set_data_rate()`](radio/struct.Nrf24.html#method.set_data_rate)
//! - [`Nrf24::get_data_rate()`](radio/struct.Nrf24.html#method.get_data_rate)
//! - [`Nrf24::set_pa_level()`](radio/struct.Nrf24.html#method.set_pa_level)
//! - [`Nrf24::get_pa_level()`](radio/struct.Nrf24.html#method.get_pa_level)
//! - [`Nrf24::set_crc_length()`](radio/struct.Nrf24.html#method.set_crc_length)
//! - [`Nrf24::get_crc_length()`](radio/struct.Nrf24.html#method.get_crc_length)
//! - [`Nrf24::is_powered()`](radio/struct.Nrf24.html#method.is_powered)
//! - [`Nrf24::power_up()`](radio/struct.Nrf24.html#method.power_up)
//! - [`Nrf24::power_down()`](radio/struct.Nrf24.html#method.power_down)
//! - [`Nrf24::tx_delay`](value@crate::radio::Nrf24::tx_delay)
//! - [`Nrf24::is_plus_variant()`](fn@crate::radio::Nrf24::is_plus_variant)
//!
#![no_std]

#[cfg(feature = "std")]
extern crate std;

mod types;
pub use types::{ChipVariant, CrcLength, DataRate, FifoState, PaLevel, RadioMode, StatusFlags};
pub mod radio;
