use bitfield_struct::bitfield;

use crate::CrcLength;

use super::mnemonics;

/// An image of the CONFIG register.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    #[bits(1)]
    _padding: u8,

    /// Mask the radio's "RX Data Ready" IRQ event.
    #[bits(1, access = None)]
    pub rx_dr: bool,

    /// Mask the radio's "TX Data Sent" IRQ event.
    #[bits(1, access = None)]
    pub tx_ds: bool,

    /// Mask the radio's "Max Retransmits" IRQ event.
    #[bits(1, access = None)]
    pub max_rt: bool,

    /// EN_CRC and CRCO; defaults to an 8 bit CRC.
    #[bits(2, access = None, default = 2)]
    pub crc_length: u8,

    pub power: bool,

    pub is_rx: bool,
}

impl Config {
    pub(crate) const CRC_MASK: u8 = mnemonics::EN_CRC | mnemonics::CRCO;

    pub const fn crc_length(&self) -> CrcLength {
        CrcLength::from_bits(self.into_bits() & Self::CRC_MASK)
    }

    pub fn with_crc_length(self, length: CrcLength) -> Self {
        let new_val = self.into_bits() & !Self::CRC_MASK | length.into_bits();
        Self::from_bits(new_val)
    }

    pub fn as_rx(self) -> Self {
        Self::from_bits(self.into_bits() | mnemonics::PRIM_RX)
    }

    pub fn as_tx(self) -> Self {
        Self::from_bits(self.into_bits() & !mnemonics::PRIM_RX)
    }
}

/// An image of the SETUP_RETR register.
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// The auto-retry feature's `delay` (`250 + ard * 250` microseconds).
    #[bits(4, default = 6)]
    pub ard: u8,

    /// The auto-retry feature's `count`.
    #[bits(4, default = 8)]
    pub arc: u8,
}

/// An image of the FIFO_STATUS register.
#[bitfield(u8, order = Msb)]
pub(crate) struct FifoStatus {
    #[bits(1)]
    _padding: u8,

    pub tx_reuse: bool,

    pub tx_full: bool,

    pub tx_empty: bool,

    #[bits(2)]
    _reserved: u8,

    pub rx_full: bool,

    pub rx_empty: bool,
}

#[cfg(test)]
mod test {
    use super::{Config, FifoStatus, SetupRetry};
    use crate::CrcLength;

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert_eq!(config.into_bits(), 0x08);
        assert_eq!(config.crc_length(), CrcLength::Bit8);
        let config = config.with_power(true).as_rx();
        assert_eq!(config.into_bits(), 0x0B);
        assert_eq!(config.as_tx().into_bits(), 0x0A);
        assert_eq!(config.with_crc_length(CrcLength::Disabled).into_bits(), 0x03);
    }

    #[test]
    fn retry_defaults() {
        assert_eq!(SetupRetry::default().into_bits(), 0x68);
    }

    #[test]
    fn fifo_status() {
        let fifo = FifoStatus::from_bits(0x11);
        assert!(fifo.tx_empty());
        assert!(fifo.rx_empty());
        assert!(!fifo.rx_full());
        assert!(FifoStatus::from_bits(0x22).tx_full());
    }
}
