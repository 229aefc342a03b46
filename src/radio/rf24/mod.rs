use core::fmt::{Debug, Display, Formatter};

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
mod auto_ack;
pub(crate) mod bit_fields;
mod channel;
mod init;
use bit_fields::Config;
mod constants;
mod crc_length;
mod data_rate;
mod fifo;
mod pa_level;
mod payload_length;
mod pipe;
mod power;
mod protocol;
mod radio;
pub use constants::{commands, mnemonics, registers};
pub use protocol::Command;
mod details;
mod status;
use crate::{Mode, StatusFlags};

/// An collection of error types to describe hardware malfunctions
/// and invalid arguments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<SPI, DO> {
    /// Represents a SPI transaction error.
    ///
    /// The [`SpiDevice`] has already deasserted the CSN pin when this is returned.
    Spi(SPI),
    /// Represents a DigitalOutput error.
    Gpo(DO),
    /// The given value is neither a register address nor a command opcode
    /// that fits the requested operation.
    InvalidAddress(u8),
    /// The given pipe number is not in range [0, 5].
    InvalidPipe(u8),
    /// The given buffer length is not in range [1, 32]
    /// (or exceeds the configured payload length).
    InvalidLength(usize),
    /// A register did not hold the value written to it during configuration.
    ///
    /// This usually means the radio is not wired or not powered.
    HardwareNotResponding,
    /// The radio reported that the maximum number of retransmits was reached.
    ///
    /// The payload remains in the TX FIFO.
    /// See [`EsbRadio::resend()`](fn@crate::radio::prelude::EsbRadio::resend).
    SendFailed,
    /// The radio did not conclude a transmission within the given timeout.
    ///
    /// The payload may or may not have been received.
    SendTimeout,
}

impl<SPI: Debug, DO: Debug> Display for Nrf24Error<SPI, DO> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Nrf24Error::Spi(e) => write!(f, "SPI transaction failed: {e:?}"),
            Nrf24Error::Gpo(e) => write!(f, "CE pin failed: {e:?}"),
            Nrf24Error::InvalidAddress(address) => {
                write!(f, "invalid register address {address:#04X}")
            }
            Nrf24Error::InvalidPipe(pipe) => write!(f, "invalid pipe number {pipe}"),
            Nrf24Error::InvalidLength(len) => write!(f, "invalid buffer length {len}"),
            Nrf24Error::HardwareNotResponding => write!(f, "hardware not responding"),
            Nrf24Error::SendFailed => write!(f, "send failed"),
            Nrf24Error::SendTimeout => write!(f, "send timed out"),
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl<SPI: defmt::Format, DO: defmt::Format> defmt::Format for Nrf24Error<SPI, DO> {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Nrf24Error::Spi(e) => defmt::write!(fmt, "SPI transaction failed: {}", e),
            Nrf24Error::Gpo(e) => defmt::write!(fmt, "CE pin failed: {}", e),
            Nrf24Error::InvalidAddress(address) => {
                defmt::write!(fmt, "invalid register address {=u8:#X}", address)
            }
            Nrf24Error::InvalidPipe(pipe) => defmt::write!(fmt, "invalid pipe number {}", pipe),
            Nrf24Error::InvalidLength(len) => defmt::write!(fmt, "invalid buffer length {}", len),
            Nrf24Error::HardwareNotResponding => defmt::write!(fmt, "hardware not responding"),
            Nrf24Error::SendFailed => defmt::write!(fmt, "send failed"),
            Nrf24Error::SendTimeout => defmt::write!(fmt, "send timed out"),
        }
    }
}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// Additionally, there are some functions implemented that are specific to the nRF24L01.
pub struct RF24<SPI, DO, DELAY> {
    /// The CE pin for the radio.
    ///
    /// This really only exposed for advanced manipulation of the radio's modes.
    /// It is strongly recommended to use [`RF24::start_listening()`] and
    /// [`RF24::send_blocking()`] because those methods guarantee proper radio usage.
    pub ce_pin: DO,
    _spi: SPI,
    _delay_impl: DELAY,
    _buf: [u8; 33],
    _status: StatusFlags,
    _config_reg: Config,
    _pipe0_rx_addr: Option<[u8; 5]>,
    _payload_length: u8,
    _flush_on_read: bool,
    _mode: Mode,
}

impl<SPI, DO, DELAY> RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Instantiate an [`RF24`] object for use on the specified
    /// `spi` bus with the given `ce_pin`.
    ///
    /// The radio's CSN pin (aka Chip Select pin) shall be defined
    /// when instantiating the [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)
    /// object (passed to the `spi` parameter).
    ///
    /// No SPI transactions are made here.
    /// Use [`RF24::init()`](fn@crate::radio::prelude::EsbInit::init) to configure the radio.
    pub fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY) -> RF24<SPI, DO, DELAY> {
        RF24 {
            ce_pin,
            _spi: spi,
            _delay_impl: delay_impl,
            _status: StatusFlags::from_bits(0),
            _buf: [0u8; 33],
            _pipe0_rx_addr: None,
            // 8 bit CRC, powered down as TX
            _config_reg: Config::default(),
            _payload_length: 32,
            _flush_on_read: true,
            _mode: Mode::PowerDown,
        }
    }

    fn spi_transfer(&mut self, len: usize) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._spi
            .transfer_in_place(&mut self._buf[..len])
            .map_err(Nrf24Error::Spi)?;
        self._status = StatusFlags::from_bits(self._buf[0]);
        Ok(())
    }

    /// This is also used to write SPI commands that consist of 1 byte:
    /// ```ignore
    /// self.spi_read(0, commands::NOP)?;
    /// // STATUS register is now stored in self._status
    /// ```
    fn spi_read(&mut self, len: usize, command: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command;
        self._buf[1..=len].fill(0);
        self.spi_transfer(len + 1)
    }

    fn spi_write_byte(
        &mut self,
        command: u8,
        byte: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command | commands::W_REGISTER;
        self._buf[1] = byte;
        self.spi_transfer(2)
    }

    fn spi_write_buf(
        &mut self,
        command: u8,
        buf: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command | commands::W_REGISTER;
        let buf_len = buf.len();
        self._buf[1..(buf_len + 1)].copy_from_slice(buf);
        self.spi_transfer(buf_len + 1)
    }

    /// Write the cached CONFIG register value.
    fn write_config(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_write_byte(registers::CONFIG, self._config_reg.into_bits())
    }

    /// Refresh the cached CONFIG register value.
    fn read_config(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::CONFIG)?;
        self._config_reg = Config::from_bits(self._buf[1]);
        Ok(())
    }

    /// Is the Received Power Detector asserted?
    ///
    /// This is `true` when a signal stronger than -64 dBm was present on the
    /// selected channel while listening.
    pub fn rpd(&mut self) -> Result<bool, Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(1, registers::RPD)?;
        Ok(self._buf[1] & 1 == 1)
    }
}
