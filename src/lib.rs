#![doc = include_str!("../README.md")]
//!
//! ## Register API
//!
//! - [`RF24::read_register()`](fn@crate::radio::RF24::read_register)
//! - [`RF24::read_buffer()`](fn@crate::radio::RF24::read_buffer)
//! - [`RF24::write_register()`](fn@crate::radio::RF24::write_register)
//! - [`RF24::write_buffer()`](fn@crate::radio::RF24::write_buffer)
//!
//! ## Basic API
//!
//! - [`RF24::new()`](fn@crate::radio::RF24::new)
//! - [`RF24::init()`](radio/struct.RF24.html#method.init)
//! - [`RF24::open_tx_pipe()`](radio/struct.RF24.html#method.open_tx_pipe)
//! - [`RF24::open_rx_pipe()`](radio/struct.RF24.html#method.open_rx_pipe)
//! - [`RF24::close_rx_pipe()`](radio/struct.RF24.html#method.close_rx_pipe)
//! - [`RF24::start_listening()`](radio/struct.RF24.html#method.start_listening)
//! - [`RF24::stop_listening()`](radio/struct.RF24.html#method.stop_listening)
//! - [`RF24::data_available()`](radio/struct.RF24.html#method.data_available)
//! - [`RF24::receive()`](radio/struct.RF24.html#method.receive)
//! - [`RF24::send_blocking()`](radio/struct.RF24.html#method.send_blocking)
//! - [`RF24::mode()`](radio/struct.RF24.html#method.mode)
//!
//! ## Advanced API
//!
//! - [`RF24::send_start()`](radio/struct.RF24.html#method.send_start)
//! - [`RF24::send_done()`](radio/struct.RF24.html#method.send_done)
//! - [`RF24::resend()`](radio/struct.RF24.html#method.resend)
//! - [`RF24::get_fifo_state()`](radio/struct.RF24.html#method.get_fifo_state)
//! - [`RF24::clear_status_flags()`](radio/struct.RF24.html#method.clear_status_flags)
//! - [`RF24::update()`](radio/struct.RF24.html#method.update)
//! - [`RF24::get_status_flags()`](radio/struct.RF24.html#method.get_status_flags)
//! - [`RF24::flush_rx()`](radio/struct.RF24.html#method.flush_rx)
//! - [`RF24::flush_tx()`](radio/struct.RF24.html#method.flush_tx)
//! - [`RF24::rpd()`](fn@crate::radio::RF24::rpd)
//! - [`RF24::get_last_arc()`](radio/struct.RF24.html#method.get_last_arc)
//! - [`RF24::print_details()`](radio/struct.RF24.html#method.print_details)
//!
//! ## Configuration API
//!
//! - [`RF24::with_config()`](radio/struct.RF24.html#method.with_config)
//! - [`RF24::set_auto_ack()`](radio/struct.RF24.html#method.set_auto_ack)
//! - [`RF24::set_auto_retries()`](radio/struct.RF24.html#method.set_auto_retries)
//! - [`RF24::set_payload_length()`](radio/struct.RF24.html#method.set_payload_length)
//! - [`RF24::get_payload_length()`](radio/struct.RF24.html#method.get_payload_length)
//! - [`RF24::set_channel()`](radio/struct.RF24.html#method.set_channel)
//! - [`RF24::get_channel()`](radio/struct.RF24.html#method.get_channel)
//! - [`RF24::set_data_rate()`](radio/struct.RF24.html#method.set_data_rate)
//! - [`RF24::get_data_rate()`](radio/struct.RF24.html#method.get_data_rate)
//! - [`RF24::set_pa_level()`](radio/struct.RF24.html#method.set_pa_level)
//! - [`RF24::get_pa_level()`](radio/struct.RF24.html#method.get_pa_level)
//! - [`RF24::set_crc_length()`](radio/struct.RF24.html#method.set_crc_length)
//! - [`RF24::get_crc_length()`](radio/struct.RF24.html#method.get_crc_length)
//! - [`RF24::is_powered()`](radio/struct.RF24.html#method.is_powered)
//! - [`RF24::power_up()`](radio/struct.RF24.html#method.power_up)
//! - [`RF24::power_down()`](radio/struct.RF24.html#method.power_down)
//!
//! ## Station API (requires the `std` feature)
//!
//! - [`Station::new()`](fn@crate::station::Station::new)
//! - [`Station::start_receive_loop()`](fn@crate::station::Station::start_receive_loop)
//! - [`Station::subscribe()`](fn@crate::station::Station::subscribe)
//! - [`Station::send()`](fn@crate::station::Station::send)
//! - [`Station::stop()`](fn@crate::station::Station::stop)
//!
#![no_std]

#[cfg(any(feature = "std", test))]
extern crate std;

mod types;
pub use types::{CrcLength, DataRate, FifoState, Mode, PaLevel, StatusFlags, TxState};
pub mod radio;

#[cfg(feature = "std")]
pub mod station;
