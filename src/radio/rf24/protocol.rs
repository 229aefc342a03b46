//! The register-level SPI protocol.
//!
//! Every operation here is exactly one SPI transaction: CSN is asserted, the
//! command byte is sent followed by the data (or placeholder) bytes, and CSN is
//! released. The first byte clocked out of the radio is always the STATUS register,
//! which is cached for [`EsbStatus::get_status_flags()`](fn@crate::radio::prelude::EsbStatus::get_status_flags).

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, registers, Nrf24Error, RF24};
use crate::StatusFlags;

/// The largest number of data bytes that follow a command byte.
const MAX_DATA_LEN: usize = 32;

/// A command understood by the nRF24L01.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Read the register at the given address.
    ReadRegister(u8),
    /// Write the register at the given address.
    WriteRegister(u8),
    /// Pop a payload from the RX FIFO.
    ReadPayload,
    /// Push a payload into the TX FIFO.
    WritePayload,
    FlushTx,
    FlushRx,
    /// Retransmit the last payload in the TX FIFO.
    ReuseTxPayload,
    /// Does nothing, but the STATUS byte is still clocked out.
    Nop,
}

impl Command {
    /// The byte that starts a transaction for this command.
    pub const fn opcode(&self) -> u8 {
        match self {
            Command::ReadRegister(address) => commands::R_REGISTER | *address,
            Command::WriteRegister(address) => commands::W_REGISTER | *address,
            Command::ReadPayload => commands::R_RX_PAYLOAD,
            Command::WritePayload => commands::W_TX_PAYLOAD,
            Command::FlushTx => commands::FLUSH_TX,
            Command::FlushRx => commands::FLUSH_RX,
            Command::ReuseTxPayload => commands::REUSE_TX_PL,
            Command::Nop => commands::NOP,
        }
    }

    /// Does this command exchange data bytes after the opcode?
    pub const fn has_data(&self) -> bool {
        !matches!(
            self,
            Command::FlushTx | Command::FlushRx | Command::ReuseTxPayload | Command::Nop
        )
    }

    const fn without_data(address: u8) -> Option<Self> {
        match address {
            commands::FLUSH_TX => Some(Command::FlushTx),
            commands::FLUSH_RX => Some(Command::FlushRx),
            commands::REUSE_TX_PL => Some(Command::ReuseTxPayload),
            commands::NOP => Some(Command::Nop),
            _ => None,
        }
    }

    /// Decode an `address` passed to a read operation.
    ///
    /// Register addresses become [`Command::ReadRegister`].
    /// The payload opcode and the no-argument opcodes are also accepted.
    pub const fn for_read(address: u8) -> Option<Self> {
        if registers::is_register(address) {
            return Some(Command::ReadRegister(address));
        }
        if address == commands::R_RX_PAYLOAD {
            return Some(Command::ReadPayload);
        }
        Self::without_data(address)
    }

    /// Decode an `address` passed to a write operation.
    ///
    /// Register addresses become [`Command::WriteRegister`].
    /// The payload opcode and the no-argument opcodes are also accepted.
    pub const fn for_write(address: u8) -> Option<Self> {
        if registers::is_register(address) {
            return Some(Command::WriteRegister(address));
        }
        if address == commands::W_TX_PAYLOAD {
            return Some(Command::WritePayload);
        }
        Self::without_data(address)
    }
}

impl<SPI, DO, DELAY> RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Read a single byte from a register.
    ///
    /// For the no-argument commands ([`commands::NOP`], [`commands::FLUSH_TX`], ...)
    /// the opcode is sent alone and the echoed STATUS byte is returned.
    ///
    /// Reading a payload pops it from the RX FIFO, so [`commands::R_RX_PAYLOAD`]
    /// is only accepted by [`RF24::read_buffer()`].
    /// Any other `address` results in [`Nrf24Error::InvalidAddress`]
    /// without touching the SPI bus.
    pub fn read_register(&mut self, address: u8) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        let command = match Command::for_read(address) {
            Some(Command::ReadPayload) | None => return Err(Nrf24Error::InvalidAddress(address)),
            Some(command) => command,
        };
        if !command.has_data() {
            self.spi_read(0, command.opcode())?;
            return Ok(self._buf[0]);
        }
        self.spi_read(1, command.opcode())?;
        Ok(self._buf[1])
    }

    /// Read `buf.len()` bytes from a register (or from the RX FIFO) into `buf`.
    ///
    /// The length of `buf` must be in range [1, 32].
    /// Use this to read the 5-byte pipe addresses.
    /// ```ignore
    /// let mut address = [0; 5];
    /// radio.read_buffer(registers::TX_ADDR, &mut address)?;
    /// ```
    pub fn read_buffer(
        &mut self,
        address: u8,
        buf: &mut [u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = buf.len();
        if !(1..=MAX_DATA_LEN).contains(&len) {
            return Err(Nrf24Error::InvalidLength(len));
        }
        let command = Command::for_read(address).ok_or(Nrf24Error::InvalidAddress(address))?;
        if !command.has_data() {
            return Err(Nrf24Error::InvalidAddress(address));
        }
        self.spi_read(len, command.opcode())?;
        buf.copy_from_slice(&self._buf[1..=len]);
        Ok(())
    }

    /// Write a single byte to a register.
    ///
    /// For the no-argument commands ([`commands::FLUSH_TX`], [`commands::FLUSH_RX`],
    /// [`commands::REUSE_TX_PL`], and [`commands::NOP`]) the opcode is sent alone
    /// and `value` is ignored.
    ///
    /// Returns the STATUS byte that was echoed with the opcode.
    pub fn write_register(
        &mut self,
        address: u8,
        value: u8,
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error>> {
        let command = Command::for_write(address).ok_or(Nrf24Error::InvalidAddress(address))?;
        if command.has_data() {
            self.spi_write_byte(command.opcode(), value)?;
        } else {
            self.spi_read(0, command.opcode())?;
        }
        Ok(self._status)
    }

    /// Write `buf` to a register (or to the TX FIFO).
    ///
    /// The length of `buf` must be in range [1, 32].
    /// Payloads are sent as given; short payloads are not padded.
    ///
    /// Returns the STATUS byte that was echoed with the opcode.
    pub fn write_buffer(
        &mut self,
        address: u8,
        buf: &[u8],
    ) -> Result<StatusFlags, Nrf24Error<SPI::Error, DO::Error>> {
        let len = buf.len();
        if !(1..=MAX_DATA_LEN).contains(&len) {
            return Err(Nrf24Error::InvalidLength(len));
        }
        let command = Command::for_write(address).ok_or(Nrf24Error::InvalidAddress(address))?;
        if !command.has_data() {
            return Err(Nrf24Error::InvalidAddress(address));
        }
        self.spi_write_buf(command.opcode(), buf)?;
        Ok(self._status)
    }
}
