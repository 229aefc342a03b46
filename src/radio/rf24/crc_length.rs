use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::registers;
use crate::radio::{prelude::EsbCrcLength, Nrf24Error, RF24};
use crate::CrcLength;

impl<SPI, DO, DELAY> EsbCrcLength for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type CrcLengthErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn get_crc_length(&mut self) -> Result<CrcLength, Self::CrcLengthErrorType> {
        self.read_config()?;
        Ok(self._config_reg.crc_length())
    }

    /// The CONFIG register is read first so that only the CRC bits are changed.
    fn set_crc_length(&mut self, crc_length: CrcLength) -> Result<(), Self::CrcLengthErrorType> {
        self.read_config()?;
        self._config_reg = self._config_reg.with_crc_length(crc_length);
        log::debug!("CRC length set to {crc_length}");
        self.spi_write_byte(registers::CONFIG, self._config_reg.into_bits())
    }
}
