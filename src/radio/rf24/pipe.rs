use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbPipe, Nrf24Error, RF24};

use super::registers;

impl<SPI, DO, DELAY> EsbPipe for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PipeErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn open_rx_pipe(&mut self, pipe: u8, address: &[u8; 5]) -> Result<(), Self::PipeErrorType> {
        if pipe > 5 {
            return Err(Nrf24Error::InvalidPipe(pipe));
        }

        if pipe < 2 {
            // If this is pipe 0, cache the address.  This is needed because
            // open_tx_pipe() will overwrite the pipe 0 address, so
            // start_listening() will have to restore it.
            if pipe == 0 {
                self._pipe0_rx_addr = Some(*address);
            }
            self.spi_write_buf(registers::RX_ADDR_P0 + pipe, address)?;
        }
        // For pipes 2-5, only write the LSB
        else {
            self.spi_write_byte(registers::RX_ADDR_P0 + pipe, address[0])?;
        }
        self.spi_write_byte(registers::RX_PW_P0 + pipe, self._payload_length)?;

        self.spi_read(1, registers::EN_RXADDR)?;
        let out = self._buf[1] | (1 << pipe);
        self.spi_write_byte(registers::EN_RXADDR, out)
    }

    fn open_tx_pipe(&mut self, address: &[u8; 5]) -> Result<(), Self::PipeErrorType> {
        self.spi_write_buf(registers::RX_ADDR_P0, address)?;
        self.spi_write_buf(registers::TX_ADDR, address)?;
        self.spi_write_byte(registers::RX_PW_P0, self._payload_length)
    }

    fn close_rx_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType> {
        if pipe > 5 {
            return Err(Nrf24Error::InvalidPipe(pipe));
        }
        self.spi_read(1, registers::EN_RXADDR)?;
        let out = self._buf[1] & !(1 << pipe);
        self.spi_write_byte(registers::EN_RXADDR, out)?;
        if pipe == 0 {
            self._pipe0_rx_addr = None;
        }
        Ok(())
    }
}
