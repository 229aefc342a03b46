use core::fmt::{Display, Formatter};

use super::{registers, Nrf24Error, RF24};
use crate::radio::prelude::{
    EsbChannel, EsbCrcLength, EsbDataRate, EsbDetails, EsbFifo, EsbPaLevel, EsbPayloadLength,
    EsbPower, EsbRadio,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

/// Prints a pipe address with the most significant byte first.
struct Address([u8; 5]);

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x")?;
        for byte in self.0.iter().rev() {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

impl<SPI, DO, DELAY> RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn read_address(&mut self, register: u8) -> Result<[u8; 5], Nrf24Error<SPI::Error, DO::Error>> {
        self.spi_read(5, register)?;
        let mut address = [0u8; 5];
        address.copy_from_slice(&self._buf[1..6]);
        Ok(address)
    }
}

impl<SPI, DO, DELAY> EsbDetails for RF24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type DetailsErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        let channel = self.get_channel()?;
        log::info!(
            "Channel___________________{channel} ~ {} MHz",
            channel as u16 + 2400u16
        );
        let data_rate = self.get_data_rate()?;
        log::info!("RF Data Rate______________{data_rate}");
        let pa_level = self.get_pa_level()?;
        log::info!("RF Power Amplifier________{pa_level}");
        let crc_length = self.get_crc_length()?;
        log::info!("CRC Length________________{crc_length}");
        log::info!(
            "Payload length____________{} bytes",
            self.get_payload_length()
        );

        self.spi_read(1, registers::SETUP_RETR)?;
        let retry_setup = self._buf[1];
        log::info!(
            "Auto retry delay__________{} microseconds",
            (retry_setup >> 4) as u16 * 250 + 250
        );
        log::info!("Auto retry attempts_______{} maximum", retry_setup & 0x0F);

        self.spi_read(1, registers::OBSERVE_TX)?;
        let observer = self._buf[1];
        log::info!("Packets lost______________{}", observer >> 4);
        log::info!("Retries for last TX_______{}", observer & 0xF);

        log::info!("{}", self._status);
        let tx_fifo = self.get_fifo_state(true)?;
        let rx_fifo = self.get_fifo_state(false)?;
        log::info!("TX FIFO___________________{tx_fifo}");
        log::info!("RX FIFO___________________{rx_fifo}");

        self.spi_read(1, registers::EN_AA)?;
        log::info!("Auto Acknowledgment_______{:#08b}", self._buf[1]);
        log::info!(
            "Primary Mode______________{}X",
            if self._config_reg.is_rx() { "R" } else { "T" }
        );
        log::info!("Powered Up________________{}", self.is_powered());
        log::info!("Driver mode_______________{}", self.mode());

        let tx_address = self.read_address(registers::TX_ADDR)?;
        log::info!("TX address________________{}", Address(tx_address));
        self.spi_read(1, registers::EN_RXADDR)?;
        let open_pipes = self._buf[1];
        let mut address = [0u8; 5];
        for pipe in 0..=5u8 {
            if pipe < 2 {
                address = self.read_address(registers::RX_ADDR_P0 + pipe)?;
            } else {
                // pipes 2 - 5 share the MSBytes of pipe 1
                self.spi_read(1, registers::RX_ADDR_P0 + pipe)?;
                address[0] = self._buf[1];
            }
            log::info!(
                "Pipe {pipe} ({}) bound to {}",
                if (open_pipes & (1u8 << pipe)) > 0 {
                    " open "
                } else {
                    "closed"
                },
                Address(address),
            );
        }
        Ok(())
    }
}
