//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use rf24_station::radio::prelude::*;
//! ```

use crate::types::{CrcLength, DataRate, FifoState, Mode, PaLevel, StatusFlags, TxState};

use super::RadioConfig;

/// A trait to represent manipulation of data pipes
/// for an ESB capable transceiver.
pub trait EsbPipe {
    type PipeErrorType;

    /// Open a specified `pipe` for receiving data when radio is listening.
    ///
    /// Pipes outside the range [0, 5] are rejected as an invalid pipe.
    ///
    /// ### About pipe addresses
    /// Pipes 0 and 1 will store a full 5-byte address. Pipes 2-5 will technically
    /// only store a single byte (`address[0]`), borrowing the other 4 bytes from pipe 1.
    ///
    /// Pipes 1-5 should share the same address, except the first byte.
    /// ```ignore
    /// radio.open_rx_pipe(1, b"\xd2\xf0\xf0\xf0\xf0").unwrap();
    /// radio.open_rx_pipe(2, b"\xd3\xf0\xf0\xf0\xf0").unwrap(); // only 0xD3 is written
    /// ```
    ///
    /// <div class="warning">
    ///
    /// If the pipe 0 is opened for receiving by this function, the `address`
    /// passed to this function (for pipe 0) will be restored at every call to
    /// [`EsbRadio::start_listening()`].
    /// This address restoration is implemented because [`EsbPipe::open_tx_pipe()`]
    /// overwrites pipe 0 to receive auto-ack packets.
    ///
    /// </div>
    fn open_rx_pipe(&mut self, pipe: u8, address: &[u8; 5]) -> Result<(), Self::PipeErrorType>;

    /// Set the address used when transmitting.
    ///
    /// Pipe 0 is given the same address so that auto-ack packets can be received.
    fn open_tx_pipe(&mut self, address: &[u8; 5]) -> Result<(), Self::PipeErrorType>;

    /// Close a specified pipe from receiving data when radio is listening.
    fn close_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType>;
}

/// A trait to represent manipulation of a channel (aka frequency)
/// for an ESB capable transceiver.
pub trait EsbChannel {
    type ChannelErrorType;

    /// Set the radio's currently selected channel.
    ///
    /// These channels translate to the RF frequency as an offset of MHz from 2400 MHz.
    /// Values larger than 125 are clamped.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType>;

    /// Get the radio's currently selected channel.
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType>;
}

/// A trait to represent manipulation of [`StatusFlags`]
/// for an ESB capable transceiver.
pub trait EsbStatus {
    type StatusErrorType;

    /// Get the [`StatusFlags`] state that was cached from the latest SPI transaction.
    fn get_status_flags(&self, flags: &mut StatusFlags);

    /// Clear the radio's sticky status flags.
    ///
    /// Set any member of [`StatusFlags`] to `true` to clear the corresponding
    /// event. Setting any member of [`StatusFlags`] to `false` will leave
    /// the corresponding status flag untouched.
    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Refresh the internal cache of status byte
    /// (which is also saved from every SPI transaction).
    ///
    /// Use [`EsbStatus::get_status_flags()`] to get the updated status flags.
    fn update(&mut self) -> Result<(), Self::StatusErrorType>;
}

/// A trait to represent manipulation of RX and TX FIFOs
/// for an ESB capable transceiver.
pub trait EsbFifo {
    type FifoErrorType;

    /// Flush the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Flush the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Get the state of the specified FIFO.
    ///
    /// - Pass `true` to `about_tx` parameter to get the state of the TX FIFO.
    /// - Pass `false` to `about_tx` parameter to get the state of the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;

    /// Is there a payload available in the radio's RX FIFO?
    ///
    /// This function simply returns true if there is data to [`EsbRadio::receive()`]
    /// from the RX FIFO.
    fn data_available(&mut self) -> Result<bool, Self::FifoErrorType>;
}

/// A trait to represent manipulation of the static payload length
/// for an ESB capable transceiver.
pub trait EsbPayloadLength {
    type PayloadLengthErrorType;

    /// Set the radio's static payload length (on all pipes).
    ///
    /// The value is clamped to range [1, 32].
    fn set_payload_length(&mut self, length: u8) -> Result<(), Self::PayloadLengthErrorType>;

    /// Get the currently configured static payload length.
    fn get_payload_length(&self) -> u8;
}

/// A trait to represent manipulation of the automatic acknowledgement feature
/// for an ESB capable transceiver.
pub trait EsbAutoAck {
    type AutoAckErrorType;

    /// Enable or disable the auto-ack (automatic acknowledgement) feature.
    ///
    /// The given value (in binary form) is used to control the auto-ack feature for each pipe.
    /// Bit 0 controls the feature for pipe 0. Bit 1 controls the feature for pipe 1. And so on.
    ///
    /// If this feature is disabled on a transmitting radio, then the
    /// transmitting radio will always report that the payload was received
    /// (even if it was not). Please remember that this feature's configuration
    /// needs to match for transmitting and receiving radios.
    fn set_auto_ack(&mut self, pipes: u8) -> Result<(), Self::AutoAckErrorType>;

    /// Set the number of retry attempts and delay between retry attempts when
    /// transmitting a payload.
    ///
    /// Both parameters are clamped to range [0, 15].
    /// - `delay`: How long to wait between each retry, in multiples of
    ///   250 us (microseconds). The minimum value of 0 means 250 us, and
    ///   the maximum value of 15 means 4000 us.
    ///   The default value of 6 means 1750us (`6 * 250 + 250`).
    /// - `count`: How many retries before giving up. The default is 8. Use
    ///   0 to disable the auto-retry feature.
    fn set_auto_retries(&mut self, delay: u8, count: u8) -> Result<(), Self::AutoAckErrorType>;
}

/// A trait to represent manipulation of the power amplitude level
/// for an ESB capable transceiver.
pub trait EsbPaLevel {
    type PaLevelErrorType;

    /// Get the currently configured Power Amplitude Level (PA Level)
    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType>;

    /// Set the radio's Power Amplitude Level (PA Level)
    fn set_pa_level(&mut self, pa_level: PaLevel) -> Result<(), Self::PaLevelErrorType>;
}

/// A trait to represent manipulation of the state of power
/// for an ESB capable transceiver.
pub trait EsbPower {
    type PowerErrorType;

    /// Power down the radio.
    ///
    /// <div class="warning">
    ///
    /// The nRF24L01 cannot receive nor transmit data when powered down.
    ///
    /// </div>
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Power up the radio.
    ///
    /// This wakes the radio from a sleep state, resulting in a
    /// power standby mode that allows the radio to receive or transmit data.
    ///
    /// If the `delay` parameter is given a [`Some`] value, then the this function
    /// will wait for the specified number of microseconds. If `delay` is a [`None`]
    /// value, this function will wait for 5 milliseconds.
    fn power_up(&mut self, delay: Option<u32>) -> Result<(), Self::PowerErrorType>;

    /// Get the current (cached) state of the radio's power.
    ///
    /// Returns `true` if powered up or `false` if powered down.
    fn is_powered(&self) -> bool;
}

/// A trait to represent manipulation of Cyclical Redundancy Checksums
/// for an ESB capable transceiver.
pub trait EsbCrcLength {
    type CrcLengthErrorType;

    /// Get the currently configured CRC (Cyclical Redundancy Checksum) length
    fn get_crc_length(&mut self) -> Result<CrcLength, Self::CrcLengthErrorType>;

    /// Set the radio's CRC (Cyclical Redundancy Checksum) length
    fn set_crc_length(&mut self, crc_length: CrcLength) -> Result<(), Self::CrcLengthErrorType>;
}

/// A trait to represent manipulation of the Data Rate
/// for an ESB capable transceiver.
pub trait EsbDataRate {
    type DataRateErrorType;

    /// Get the currently configured Data Rate
    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType>;

    /// Set the radio's Data Rate
    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType>;
}

/// A trait to represent debug output
/// for an ESB capable transceiver.
pub trait EsbDetails {
    type DetailsErrorType;

    /// Dump the radio's registers to the log (at `info` level).
    ///
    /// This should only be used for debugging development.
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType>;
}

pub trait EsbInit {
    type ConfigErrorType;

    /// Initialize the radio's hardware.
    ///
    /// This is similar to [`EsbInit::with_config()`], but this function first
    /// waits 5 milliseconds for radio to finish powering up.
    ///
    /// This function should only be called once after instantiating the radio object.
    fn init(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType>;

    /// Reconfigure the radio using the given `config` object.
    ///
    /// See [`RadioConfig`] for more detail.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType>;
}

/// A trait to represent manipulation of an ESB capable transceiver.
///
/// This trait describes the half-duplex behavior of a radio:
/// it is either listening or sending, never both.
pub trait EsbRadio {
    type RadioErrorType;

    /// Put the radio into active RX mode.
    ///
    /// Conventionally, this should be called after setting the RX addresses via
    /// [`EsbPipe::open_rx_pipe()`]
    fn start_listening(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Leave active RX mode.
    ///
    /// This must be called before sending a payload.
    fn stop_listening(&mut self) -> Result<(), Self::RadioErrorType>;

    /// The mode the radio was last put into.
    fn mode(&self) -> Mode;

    /// Read the payload at the top of the RX FIFO into the given `buf`.
    ///
    /// The full static payload length is always fetched from the radio;
    /// only as many bytes as `buf` can hold are copied. Returns the payload length.
    fn receive(&mut self, buf: &mut [u8]) -> Result<u8, Self::RadioErrorType>;

    /// Blocking function to transmit a given payload.
    ///
    /// Waits up to `timeout_ms` milliseconds for the radio to report
    /// that the payload was either sent or dropped after exhausting the auto-retries.
    fn send_blocking(&mut self, buf: &[u8], timeout_ms: u32) -> Result<(), Self::RadioErrorType>;

    /// Non-blocking function to start transmitting a payload.
    ///
    /// The payload is zero-padded to the static payload length.
    /// Use [`EsbRadio::send_done()`] to check on the transmission.
    fn send_start(&mut self, buf: &[u8]) -> Result<(), Self::RadioErrorType>;

    /// Check the progress of a transmission started with [`EsbRadio::send_start()`].
    ///
    /// When the transmission has concluded, the status flags are cleared and the
    /// radio is powered down.
    fn send_done(&mut self) -> Result<TxState, Self::RadioErrorType>;

    /// Retransmit the payload left in the TX FIFO after a failed transmission.
    ///
    /// This behaves like [`EsbRadio::send_blocking()`] without uploading a new payload.
    fn resend(&mut self, timeout_ms: u32) -> Result<(), Self::RadioErrorType>;

    /// Get the Auto-Retry Count (ARC) about the previous transmission.
    ///
    /// This data is reset for every payload attempted to transmit.
    /// It cannot exceed 15 per the `count` parameter in [`EsbAutoAck::set_auto_retries()`].
    fn get_last_arc(&mut self) -> Result<u8, Self::RadioErrorType>;
}
