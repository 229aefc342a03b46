use super::{mnemonics, registers, Nrf24Error, RF24};
use crate::{
    radio::{
        prelude::{EsbFifo, EsbInit, EsbPipe, EsbStatus},
        RadioConfig,
    },
    Mode, StatusFlags,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

impl<SPI, DO, DELAY> EsbInit for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ConfigErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Initialize the radio's hardware using the [`SpiDevice`] and [`OutputPin`] given
    /// to [`RF24::new()`].
    fn init(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType> {
        // Must allow the radio time to settle else configuration bits will not necessarily stick.
        // Technically we require 4.5ms + 14us as a worst case. We'll just call it 5ms.
        self._delay_impl.delay_ms(5);
        self.with_config(config)
    }

    /// The address length is always set to 5 bytes. Its read-back is used to verify
    /// that the radio is responding.
    ///
    /// Only the pipes opened with [`RadioConfig::with_rx_address()`] are enabled.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)?;

        self.spi_write_byte(registers::SETUP_AW, mnemonics::AW_5_BYTES)?;
        self.spi_read(1, registers::SETUP_AW)?;
        if self._buf[1] != mnemonics::AW_5_BYTES {
            log::error!(
                "SETUP_AW read back {:#04X}; is the radio wired and powered?",
                self._buf[1]
            );
            return Err(Nrf24Error::HardwareNotResponding);
        }

        // static payload lengths only
        self.spi_write_byte(registers::DYNPD, 0)?;
        self.spi_write_byte(registers::SETUP_RETR, config.auto_retries.into_bits())?;

        self.spi_read(1, registers::RF_SETUP)?;
        let rf_setup = (self._buf[1] & mnemonics::RF_SETUP_KEEP)
            | config.pa_level().into_bits()
            | config.data_rate().into_bits();
        self.spi_write_byte(registers::RF_SETUP, rf_setup)?;

        self.read_config()?;
        self._config_reg = self._config_reg.with_crc_length(config.crc_length());
        self.write_config()?;

        self.spi_write_byte(registers::EN_AA, config.auto_ack())?;
        self.clear_status_flags(StatusFlags::new())?;
        self.spi_write_byte(registers::RF_CH, config.channel())?;

        self.flush_rx()?;
        self.flush_tx()?;

        self._payload_length = config.payload_length();
        self._flush_on_read = config.flush_on_read();
        self._pipe0_rx_addr = None;

        if let Some(address) = config.tx_address() {
            self.open_tx_pipe(&address)?;
        }
        let enabled = config.rx_pipes_enabled();
        if enabled != 0 {
            self.spi_write_byte(registers::EN_RXADDR, 0)?;
            // pipes 2 - 5 borrow the MSBytes of pipe 1
            if enabled & 0x3C != 0 && enabled & 2 == 0 {
                self.spi_write_buf(registers::RX_ADDR_P1, &config.pipe1_address())?;
            }
            for pipe in 0..6 {
                if let Some(address) = config.rx_address(pipe) {
                    self.open_rx_pipe(pipe, &address)?;
                }
            }
        }

        self._mode = Mode::Standby;
        log::debug!(
            "radio configured: channel {}, {}, PA {}, CRC {}, {} byte payloads",
            config.channel(),
            config.data_rate(),
            config.pa_level(),
            config.crc_length(),
            config.payload_length()
        );
        Ok(())
    }
}
