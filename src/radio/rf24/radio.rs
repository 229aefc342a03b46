use super::{commands, registers, Nrf24Error, RF24};
use crate::{
    radio::prelude::{EsbFifo, EsbPower, EsbRadio, EsbStatus},
    Mode, StatusFlags, TxState,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

/// Time for the radio to settle into active RX mode (in microseconds).
const RX_SETTLE_US: u32 = 130;
/// Time for the radio to settle into TX mode (in microseconds).
const TX_SETTLE_US: u32 = 150;
/// How long the CE pin is held high to start a transmission (minimum is 10 microseconds).
const CE_PULSE_US: u32 = 15;
/// How often the STATUS byte is polled while waiting for a transmission to conclude.
const TX_POLL_INTERVAL_US: u32 = 100;

impl<SPI, DO, DELAY> RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Power up as a primary transmitter and wait for the radio to settle.
    fn enter_tx_mode(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.read_config()?;
        self._config_reg = self._config_reg.with_power(true).as_tx();
        self.write_config()?;
        self._mode = Mode::Sending;
        self._delay_impl.delay_us(TX_SETTLE_US);
        Ok(())
    }

    /// Toggle the CE pin to transmit the payload at the top of the TX FIFO.
    fn pulse_ce(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._delay_impl.delay_us(CE_PULSE_US);
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)
    }

    /// Poll [`EsbRadio::send_done()`] until the transmission concludes or `timeout_ms` elapses.
    fn wait_for_tx(&mut self, timeout_ms: u32) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let timeout_us = timeout_ms.saturating_mul(1000);
        let mut elapsed = 0u32;
        loop {
            match self.send_done()? {
                TxState::Sent => return Ok(()),
                TxState::Failed => {
                    log::warn!("send failed: maximum number of retransmits reached");
                    return Err(Nrf24Error::SendFailed);
                }
                TxState::Pending => (),
            }
            if elapsed >= timeout_us {
                log::debug!("send timed out after {timeout_ms} ms");
                // the payload must not be sent after the caller was told it timed out
                self.flush_tx()?;
                self.power_down()?;
                return Err(Nrf24Error::SendTimeout);
            }
            self._delay_impl.delay_us(TX_POLL_INTERVAL_US);
            elapsed = elapsed.saturating_add(TX_POLL_INTERVAL_US);
        }
    }
}

impl<SPI, DO, DELAY> EsbRadio for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type RadioErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// The pipe 0 address given to
    /// [`EsbPipe::open_rx_pipe()`](fn@crate::radio::prelude::EsbPipe::open_rx_pipe)
    /// is restored here, and both FIFOs are flushed.
    fn start_listening(&mut self) -> Result<(), Self::RadioErrorType> {
        self.read_config()?;
        self._config_reg = self._config_reg.with_power(true).as_rx();
        self.write_config()?;
        self.clear_status_flags(StatusFlags::new())?;

        // Restore the pipe0 address, if exists
        if let Some(addr) = self._pipe0_rx_addr {
            self.spi_write_buf(registers::RX_ADDR_P0, &addr)?;
        }
        self.flush_rx()?;
        self.flush_tx()?;

        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)?;
        self._delay_impl.delay_us(RX_SETTLE_US);
        self._mode = Mode::Listening;
        log::debug!("radio is listening");
        Ok(())
    }

    fn stop_listening(&mut self) -> Result<(), Self::RadioErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;
        self.flush_tx()?;
        self.flush_rx()?;
        self._mode = Mode::Standby;
        log::debug!("radio stopped listening");
        Ok(())
    }

    fn mode(&self) -> Mode {
        self._mode
    }

    /// The "RX Data Ready" flag is cleared after reading the payload.
    /// If flushing after reads is enabled (see
    /// [`RadioConfig::with_flush_on_read()`](fn@crate::radio::RadioConfig::with_flush_on_read)),
    /// both FIFOs are flushed too.
    fn receive(&mut self, buf: &mut [u8]) -> Result<u8, Self::RadioErrorType> {
        let len = self._payload_length as usize;
        self.spi_read(len, commands::R_RX_PAYLOAD)?;
        let copy_len = buf.len().min(len);
        buf[..copy_len].copy_from_slice(&self._buf[1..(copy_len + 1)]);
        self.clear_status_flags(StatusFlags::default().with_rx_dr(true))?;
        if self._flush_on_read {
            self.flush_rx()?;
            self.flush_tx()?;
        }
        Ok(self._payload_length)
    }

    fn send_blocking(&mut self, buf: &[u8], timeout_ms: u32) -> Result<(), Self::RadioErrorType> {
        self.send_start(buf)?;
        self.wait_for_tx(timeout_ms)
    }

    /// Payloads longer than the static payload length are rejected.
    /// The TX FIFO is flushed before the payload is uploaded.
    fn send_start(&mut self, buf: &[u8]) -> Result<(), Self::RadioErrorType> {
        let len = self._payload_length as usize;
        let buf_len = buf.len();
        if buf_len > len {
            return Err(Nrf24Error::InvalidLength(buf_len));
        }
        self.enter_tx_mode()?;
        // a payload left over from a failed send would go out first
        self.flush_tx()?;

        // pad buf with zeros
        self._buf[0] = commands::W_TX_PAYLOAD;
        self._buf[1..(buf_len + 1)].copy_from_slice(buf);
        self._buf[(buf_len + 1)..(len + 1)].fill(0);
        self.spi_transfer(len + 1)?;

        self.pulse_ce()
    }

    fn send_done(&mut self) -> Result<TxState, Self::RadioErrorType> {
        self.spi_read(0, commands::NOP)?;
        if !self._status.tx_finished() {
            return Ok(TxState::Pending);
        }
        let sent = self._status.tx_ds();
        self.clear_status_flags(StatusFlags::new())?;
        self._config_reg = self._config_reg.with_power(false);
        self.write_config()?;
        self._mode = Mode::PowerDown;
        if sent {
            log::debug!("payload sent");
            Ok(TxState::Sent)
        } else {
            Ok(TxState::Failed)
        }
    }

    /// The radio's REUSE_TX_PL feature stays active until the TX FIFO is
    /// flushed or a new payload is written.
    fn resend(&mut self, timeout_ms: u32) -> Result<(), Self::RadioErrorType> {
        self.enter_tx_mode()?;
        self.spi_read(0, commands::REUSE_TX_PL)?;
        self.pulse_ce()?;
        self.wait_for_tx(timeout_ms)
    }

    fn get_last_arc(&mut self) -> Result<u8, Self::RadioErrorType> {
        self.spi_read(1, registers::OBSERVE_TX)?;
        Ok(self._buf[1] & 0xF)
    }
}
