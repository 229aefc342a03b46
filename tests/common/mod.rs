//! A simulated nRF24L01 that implements the embedded-hal traits used by [`RF24`].
#![allow(dead_code)]

use std::{
    collections::VecDeque,
    convert::Infallible,
    sync::{Arc, Mutex, MutexGuard},
    vec::Vec,
};

use embedded_hal::{
    delay::DelayNs,
    digital::{self, OutputPin},
    spi::{self, ErrorKind, Operation, SpiDevice},
};
use rf24_station::radio::{commands, registers, RF24};

/// How the far end of the link responds to transmissions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Peer {
    /// Acknowledge each payload after the given number of microseconds.
    AckAfter(u64),
    /// Never respond; neither TX_DS nor MAX_RT is asserted.
    Never,
    /// Exhaust the auto-retries after the given number of microseconds.
    MaxRetries(u64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Outcome {
    Ack,
    MaxRt,
}

const FIFO_DEPTH: usize = 3;
const TX_DS: u8 = 0x20;
const MAX_RT: u8 = 0x10;
const RX_DR: u8 = 0x40;

/// The state of the simulated chip.
pub struct ChipState {
    registers: [u8; 0x1E],
    rx_addr_p0: [u8; 5],
    rx_addr_p1: [u8; 5],
    tx_addr: [u8; 5],
    flags: u8,
    rx_fifo: VecDeque<(u8, Vec<u8>)>,
    tx_fifo: VecDeque<Vec<u8>>,
    reuse_tx: bool,
    ce: bool,
    pending: Option<(u64, Outcome)>,
    now_ns: u64,
    pub peer: Peer,
    /// Payloads as they went over the air.
    pub transmitted: Vec<Vec<u8>>,
    /// Is the chip-select line currently asserted?
    pub cs_active: bool,
    pub transactions: usize,
    pub fail_next: bool,
    /// Value always read back from SETUP_AW, if set.
    pub stuck_setup_aw: Option<u8>,
}

impl Default for ChipState {
    fn default() -> Self {
        let mut regs = [0u8; 0x1E];
        regs[registers::CONFIG as usize] = 0x08;
        regs[registers::EN_AA as usize] = 0x3F;
        regs[registers::EN_RXADDR as usize] = 0x03;
        regs[registers::SETUP_AW as usize] = 0x03;
        regs[registers::SETUP_RETR as usize] = 0x03;
        regs[registers::RF_CH as usize] = 0x02;
        regs[registers::RF_SETUP as usize] = 0x0F;
        regs[registers::RX_ADDR_P2 as usize] = 0xC3;
        regs[registers::RX_ADDR_P3 as usize] = 0xC4;
        regs[registers::RX_ADDR_P4 as usize] = 0xC5;
        regs[registers::RX_ADDR_P5 as usize] = 0xC6;
        Self {
            registers: regs,
            rx_addr_p0: [0xE7; 5],
            rx_addr_p1: [0xC2; 5],
            tx_addr: [0xE7; 5],
            flags: 0,
            rx_fifo: VecDeque::new(),
            tx_fifo: VecDeque::new(),
            reuse_tx: false,
            ce: false,
            pending: None,
            now_ns: 0,
            peer: Peer::AckAfter(10_000),
            transmitted: Vec::new(),
            cs_active: false,
            transactions: 0,
            fail_next: false,
            stuck_setup_aw: None,
        }
    }
}

impl ChipState {
    fn status(&self) -> u8 {
        let rx_pipe = self.rx_fifo.front().map(|(pipe, _)| *pipe).unwrap_or(7);
        let tx_full = (self.tx_fifo.len() >= FIFO_DEPTH) as u8;
        self.flags | (rx_pipe << 1) | tx_full
    }

    fn fifo_status(&self) -> u8 {
        let mut value = 0u8;
        if self.rx_fifo.is_empty() {
            value |= 1;
        }
        if self.rx_fifo.len() >= FIFO_DEPTH {
            value |= 2;
        }
        if self.tx_fifo.is_empty() {
            value |= 0x10;
        }
        if self.tx_fifo.len() >= FIFO_DEPTH {
            value |= 0x20;
        }
        if self.reuse_tx {
            value |= 0x40;
        }
        value
    }

    pub fn config(&self) -> u8 {
        self.registers[registers::CONFIG as usize]
    }

    /// The value a register read would return (the first byte for 5-byte registers).
    pub fn register(&self, address: u8) -> u8 {
        self.read_register(address)[0]
    }

    /// The 5-byte address stored for a pipe, as the chip would use it.
    pub fn pipe_address(&self, pipe: u8) -> [u8; 5] {
        match pipe {
            0 => self.rx_addr_p0,
            1 => self.rx_addr_p1,
            _ => {
                let mut address = self.rx_addr_p1;
                address[0] = self.registers[(registers::RX_ADDR_P0 + pipe) as usize];
                address
            }
        }
    }

    pub fn tx_address(&self) -> [u8; 5] {
        self.tx_addr
    }

    pub fn ce(&self) -> bool {
        self.ce
    }

    pub fn now_us(&self) -> u64 {
        self.now_ns / 1000
    }

    fn read_register(&self, address: u8) -> [u8; 5] {
        match address {
            registers::RX_ADDR_P0 => self.rx_addr_p0,
            registers::RX_ADDR_P1 => self.rx_addr_p1,
            registers::TX_ADDR => self.tx_addr,
            _ => {
                let value = match address {
                    registers::STATUS => self.status(),
                    registers::FIFO_STATUS => self.fifo_status(),
                    registers::SETUP_AW => self
                        .stuck_setup_aw
                        .unwrap_or(self.registers[address as usize]),
                    _ => self.registers[address as usize],
                };
                [value, 0, 0, 0, 0]
            }
        }
    }

    fn write_register(&mut self, address: u8, data: &[u8]) {
        let copy_address = |dest: &mut [u8; 5]| {
            let len = data.len().min(5);
            dest[..len].copy_from_slice(&data[..len]);
        };
        match address {
            registers::RX_ADDR_P0 => copy_address(&mut self.rx_addr_p0),
            registers::RX_ADDR_P1 => copy_address(&mut self.rx_addr_p1),
            registers::TX_ADDR => copy_address(&mut self.tx_addr),
            // sticky flags are cleared by writing 1
            registers::STATUS => self.flags &= !(data[0] & 0x70),
            registers::OBSERVE_TX | registers::RPD | registers::FIFO_STATUS => (),
            _ => self.registers[address as usize] = data[0],
        }
    }

    /// Execute one SPI transaction; `buf` holds the bytes clocked out by the host.
    fn exchange(&mut self, buf: &mut [u8]) {
        let op = buf[0];
        let status = self.status();
        let data = &mut buf[1..];
        match op {
            0x00..=0x1F if registers::is_register(op) => {
                let value = self.read_register(op);
                let len = data.len().min(5);
                data[..len].copy_from_slice(&value[..len]);
            }
            0x20..=0x3F if registers::is_register(op & 0x1F) => {
                if !data.is_empty() {
                    self.write_register(op & 0x1F, data);
                }
            }
            commands::R_RX_PAYLOAD => {
                let payload = self.rx_fifo.pop_front().map(|(_, p)| p).unwrap_or_default();
                for (i, byte) in data.iter_mut().enumerate() {
                    *byte = payload.get(i).copied().unwrap_or(0);
                }
            }
            commands::W_TX_PAYLOAD => {
                if self.tx_fifo.len() < FIFO_DEPTH {
                    self.tx_fifo.push_back(data.to_vec());
                }
                self.reuse_tx = false;
            }
            commands::FLUSH_TX => {
                self.tx_fifo.clear();
                self.reuse_tx = false;
            }
            commands::FLUSH_RX => self.rx_fifo.clear(),
            commands::REUSE_TX_PL => self.reuse_tx = true,
            _ => (),
        }
        buf[0] = status;
    }

    fn set_ce(&mut self, level: bool) {
        let rising = level && !self.ce;
        self.ce = level;
        let config = self.config();
        // powered up as a primary transmitter
        if rising && config & 3 == 2 {
            self.start_tx();
        }
    }

    fn start_tx(&mut self) {
        let Some(payload) = self.tx_fifo.front().cloned() else {
            return;
        };
        self.transmitted.push(payload);
        self.pending = match self.peer {
            Peer::AckAfter(us) => Some((self.now_ns + us * 1000, Outcome::Ack)),
            Peer::MaxRetries(us) => Some((self.now_ns + us * 1000, Outcome::MaxRt)),
            Peer::Never => None,
        };
    }

    fn advance(&mut self, ns: u64) {
        self.now_ns += ns;
        if let Some((due, outcome)) = self.pending {
            if due <= self.now_ns {
                self.pending = None;
                match outcome {
                    Outcome::Ack => {
                        if !self.reuse_tx {
                            self.tx_fifo.pop_front();
                        }
                        self.flags |= TX_DS;
                    }
                    Outcome::MaxRt => self.flags |= MAX_RT,
                }
            }
        }
    }

    /// Let time pass without the radio's involvement.
    pub fn elapse_us(&mut self, us: u64) {
        self.advance(us * 1000);
    }

    /// A payload sent by the peer arrives on `pipe`.
    pub fn deliver(&mut self, pipe: u8, payload: &[u8]) {
        if self.rx_fifo.len() < FIFO_DEPTH {
            let mut padded = payload.to_vec();
            padded.resize(self.registers[(registers::RX_PW_P0 + pipe) as usize] as usize, 0);
            self.rx_fifo.push_back((pipe, padded));
            self.flags |= RX_DR;
        }
    }
}

/// A shared handle to the simulated chip.
#[derive(Clone, Default)]
pub struct SimChip(Arc<Mutex<ChipState>>);

impl SimChip {
    pub fn state(&self) -> MutexGuard<'_, ChipState> {
        self.0.lock().unwrap()
    }

    /// Build a radio wired to this chip.
    pub fn radio(&self) -> RF24<SimSpi, SimPin, SimDelay> {
        RF24::new(
            SimPin(self.clone()),
            SimSpi(self.clone()),
            SimDelay(self.clone()),
        )
    }
}

pub struct SimSpi(SimChip);

impl spi::ErrorType for SimSpi {
    type Error = ErrorKind;
}

impl SpiDevice for SimSpi {
    fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), ErrorKind> {
        let mut chip = self.0.state();
        chip.cs_active = true;
        chip.transactions += 1;
        let mut result = Ok(());
        if chip.fail_next {
            chip.fail_next = false;
            result = Err(ErrorKind::Other);
        } else {
            for operation in operations.iter_mut() {
                match operation {
                    Operation::TransferInPlace(buf) => chip.exchange(buf),
                    _ => {
                        result = Err(ErrorKind::Other);
                        break;
                    }
                }
            }
        }
        chip.cs_active = false;
        result
    }
}

pub struct SimPin(SimChip);

impl digital::ErrorType for SimPin {
    type Error = Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.state().set_ce(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.state().set_ce(true);
        Ok(())
    }
}

/// Advances the simulated clock instead of sleeping.
pub struct SimDelay(SimChip);

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.state().advance(ns as u64);
    }
}
