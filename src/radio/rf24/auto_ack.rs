use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbAutoAck, Nrf24Error, RF24};

use super::{bit_fields::SetupRetry, registers};

impl<SPI, DO, DELAY> EsbAutoAck for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type AutoAckErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Only the 6 least significant bits of `pipes` are used.
    fn set_auto_ack(&mut self, pipes: u8) -> Result<(), Self::AutoAckErrorType> {
        self.spi_write_byte(registers::EN_AA, pipes & 0x3F)
    }

    fn set_auto_retries(&mut self, delay: u8, count: u8) -> Result<(), Self::AutoAckErrorType> {
        let setup_retr = SetupRetry::new()
            .with_ard(delay.min(15))
            .with_arc(count.min(15));
        self.spi_write_byte(registers::SETUP_RETR, setup_retr.into_bits())
    }
}
