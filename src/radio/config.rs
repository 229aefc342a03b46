use crate::radio::rf24::bit_fields::{Config, SetupRetry};
use crate::{CrcLength, DataRate, PaLevel};

/// A struct to contain configuration about pipe addresses.
#[derive(Debug, Clone, Copy)]
struct EsbPipeConfig {
    tx_address: Option<[u8; 5]>,
    pipe0: [u8; 5],
    pipe1: [u8; 5],
    pipe2: u8,
    pipe3: u8,
    pipe4: u8,
    pipe5: u8,
    rx_pipes_enabled: u8,
}

impl Default for EsbPipeConfig {
    fn default() -> Self {
        Self {
            tx_address: None,
            pipe0: [0xE7; 5],
            pipe1: [0xC2; 5],
            pipe2: 0xC3,
            pipe3: 0xC4,
            pipe4: 0xC5,
            pipe5: 0xC6,
            rx_pipes_enabled: 0,
        }
    }
}

impl EsbPipeConfig {
    fn set_rx_address(&mut self, pipe: u8, address: &[u8; 5]) {
        match pipe {
            0 => self.pipe0 = *address,
            1 => self.pipe1 = *address,
            2 => self.pipe2 = address[0],
            3 => self.pipe3 = address[0],
            4 => self.pipe4 = address[0],
            5 => self.pipe5 = address[0],
            _ => return,
        }
        self.rx_pipes_enabled |= 1 << pipe;
    }

    fn get_rx_address(&self, pipe: u8) -> [u8; 5] {
        let lsb = match pipe {
            0 => return self.pipe0,
            1 => return self.pipe1,
            2 => self.pipe2,
            3 => self.pipe3,
            4 => self.pipe4,
            _ => self.pipe5,
        };
        let mut address = self.pipe1;
        address[0] = lsb;
        address
    }
}

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use rf24_station::radio::RadioConfig;
/// let config = RadioConfig::default().with_channel(42);
/// assert_eq!(config.channel(), 42);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    pub(crate) config_reg: Config,
    pub(crate) auto_retries: SetupRetry,
    pa_level: PaLevel,
    data_rate: DataRate,
    channel: u8,
    payload_length: u8,
    auto_ack: u8,
    flush_on_read: bool,
    pipes: EsbPipeConfig,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::channel()`] | `46` |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::Max`] |
    /// | [`RadioConfig::crc_length()`] | [`CrcLength::Bit8`] |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps1`] |
    /// | [`RadioConfig::payload_length()`] | `32` |
    /// | [`RadioConfig::auto_ack()`] | `0b11` (enabled for pipes 0 and 1) |
    /// | [`RadioConfig::auto_retry_delay()`] | `6` |
    /// | [`RadioConfig::auto_retry_count()`] | `8` |
    /// | [`RadioConfig::flush_on_read()`] | `true` |
    /// | [`RadioConfig::tx_address()`] | [`None`] |
    /// | [`RadioConfig::rx_address()`] | [`None`] for all pipes |
    ///
    /// The address length is always 5 bytes.
    fn default() -> Self {
        Self {
            // 8 bit CRC, powered down, inactive TX (StandBy-I) mode
            config_reg: Config::default(),
            // 6 * 250 + 250 = 1750 us delay between 8 attempts
            auto_retries: SetupRetry::default(),
            pa_level: PaLevel::Max,
            data_rate: DataRate::Mbps1,
            channel: 46,
            payload_length: 32,
            auto_ack: 0b11,
            flush_on_read: true,
            pipes: EsbPipeConfig::default(),
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_crc_length()`].
    pub const fn crc_length(&self) -> CrcLength {
        self.config_reg.crc_length()
    }

    /// The Cyclical Redundancy Checksum (CRC) length.
    ///
    /// See [`EsbCrcLength::set_crc_length()`](fn@crate::radio::prelude::EsbCrcLength::set_crc_length).
    pub fn with_crc_length(self, length: CrcLength) -> Self {
        let new_config = self.config_reg.with_crc_length(length);
        Self {
            config_reg: new_config,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    /// The Data Rate (over the air).
    ///
    /// See [`EsbDataRate::set_data_rate()`](fn@crate::radio::prelude::EsbDataRate::set_data_rate).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self { data_rate, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.pa_level
    }

    /// The Power Amplitude (PA) level.
    ///
    /// See [`EsbPaLevel::set_pa_level()`](fn@crate::radio::prelude::EsbPaLevel::set_pa_level).
    pub fn with_pa_level(self, pa_level: PaLevel) -> Self {
        Self { pa_level, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Set the channel (over the air frequency).
    ///
    /// This value is clamped to range [0, 125].
    /// The radio's frequency can be determined by the following equation:
    /// ```text
    /// frequency (in MHz) = channel + 2400
    /// ```
    pub fn with_channel(self, value: u8) -> Self {
        Self {
            channel: value.min(125),
            ..self
        }
    }

    /// The auto-retry feature's `delay` (set via [`RadioConfig::with_auto_retries()`])
    pub const fn auto_retry_delay(&self) -> u8 {
        self.auto_retries.ard()
    }

    /// The auto-retry feature's `count` (set via [`RadioConfig::with_auto_retries()`])
    pub const fn auto_retry_count(&self) -> u8 {
        self.auto_retries.arc()
    }

    /// Set the auto-retry feature's `delay` and `count` parameters.
    ///
    /// See [`EsbAutoAck::set_auto_retries()`](fn@crate::radio::prelude::EsbAutoAck::set_auto_retries).
    pub fn with_auto_retries(self, delay: u8, count: u8) -> Self {
        let new_config = self
            .auto_retries
            .with_ard(delay.min(15))
            .with_arc(count.min(15));
        Self {
            auto_retries: new_config,
            ..self
        }
    }

    /// Return the value set by [`RadioConfig::with_auto_ack()`].
    pub const fn auto_ack(&self) -> u8 {
        self.auto_ack
    }

    /// Enable or disable auto-ACK feature.
    ///
    /// The given value (in binary form) is used to control the auto-ack feature for each pipe.
    /// Bit 0 controls the feature for pipe 0. Bit 1 controls the feature for pipe 1. And so on.
    ///
    /// To enable the feature for pipes 0, 1 and 4:
    /// ```
    /// use rf24_station::radio::RadioConfig;
    /// let config = RadioConfig::default().with_auto_ack(0b010011);
    /// assert_eq!(config.auto_ack(), 0x13);
    /// ```
    pub fn with_auto_ack(self, enable: u8) -> Self {
        Self {
            auto_ack: enable & 0x3F,
            ..self
        }
    }

    /// Return the value set by [`RadioConfig::with_payload_length()`].
    pub const fn payload_length(&self) -> u8 {
        self.payload_length
    }

    /// The payload length for statically sized payloads.
    ///
    /// This value is clamped to range [1, 32].
    pub fn with_payload_length(self, value: u8) -> Self {
        Self {
            payload_length: value.clamp(1, 32),
            ..self
        }
    }

    /// Return the value set by [`RadioConfig::with_flush_on_read()`].
    pub const fn flush_on_read(&self) -> bool {
        self.flush_on_read
    }

    /// Flush both FIFOs after every [`EsbRadio::receive()`](fn@crate::radio::prelude::EsbRadio::receive).
    ///
    /// When enabled (the default), any other payloads queued in the RX FIFO are
    /// discarded by each read. Disable this to drain the RX FIFO one payload at a time.
    pub fn with_flush_on_read(self, enable: bool) -> Self {
        Self {
            flush_on_read: enable,
            ..self
        }
    }

    /// Close a RX pipe from receiving data.
    pub fn close_rx_pipe(self, pipe: u8) -> Self {
        let mut pipes = self.pipes;
        if pipe < 6 {
            pipes.rx_pipes_enabled &= !(1 << pipe);
        }
        Self { pipes, ..self }
    }

    /// Is a specified RX pipe open (`true`) or closed (`false`)?
    ///
    /// The value returned here is controlled by
    /// [`RadioConfig::with_rx_address()`] (to open a pipe) and [`RadioConfig::close_rx_pipe()`].
    pub fn is_rx_pipe_enabled(&self, pipe: u8) -> bool {
        pipe < 6 && self.pipes.rx_pipes_enabled & (1u8 << pipe) > 0
    }

    /// Get the full address of a `pipe` opened with [`RadioConfig::with_rx_address()`].
    ///
    /// For pipes 2 - 5, the 4 MSBytes are borrowed from the address of pipe 1.
    pub fn rx_address(&self, pipe: u8) -> Option<[u8; 5]> {
        if self.is_rx_pipe_enabled(pipe) {
            Some(self.pipes.get_rx_address(pipe))
        } else {
            None
        }
    }

    /// Set the address of a specified RX `pipe` for receiving data.
    ///
    /// This does nothing if the given `pipe` is greater than `5`.
    /// For pipes 2 - 5, only `address[0]` is used.
    ///
    /// See also [`RadioConfig::with_tx_address()`].
    pub fn with_rx_address(self, pipe: u8, address: &[u8; 5]) -> Self {
        let mut pipes = self.pipes;
        pipes.set_rx_address(pipe, address);
        Self { pipes, ..self }
    }

    /// The address of pipe 1, whose 4 MSBytes are shared with pipes 2 - 5.
    pub(crate) const fn pipe1_address(&self) -> [u8; 5] {
        self.pipes.pipe1
    }

    /// The mask of RX pipes opened with [`RadioConfig::with_rx_address()`].
    pub(crate) const fn rx_pipes_enabled(&self) -> u8 {
        self.pipes.rx_pipes_enabled
    }

    /// Get the address set by [`RadioConfig::with_tx_address()`]
    pub const fn tx_address(&self) -> Option<[u8; 5]> {
        self.pipes.tx_address
    }

    /// Set the TX address.
    ///
    /// Only pipe 0 can be used for TX operations (including auto-ACK packets during RX operations).
    pub fn with_tx_address(self, address: &[u8; 5]) -> Self {
        let mut pipes = self.pipes;
        pipes.tx_address = Some(*address);
        Self { pipes, ..self }
    }
}
