mod common;

use common::{Peer, SimChip, SimDelay, SimPin, SimSpi};
use rf24_station::{
    radio::{prelude::*, registers, Nrf24Error, RadioConfig, RF24},
    FifoState, Mode, TxState,
};

const ADDRESS: [u8; 5] = *b"1Node";
const PEER_ADDRESS: [u8; 5] = *b"2Node";

type SimRadio = RF24<SimSpi, SimPin, SimDelay>;

fn configured() -> (SimChip, SimRadio) {
    let chip = SimChip::default();
    let mut radio = chip.radio();
    let config = RadioConfig::default()
        .with_tx_address(&PEER_ADDRESS)
        .with_rx_address(1, &ADDRESS);
    radio.init(&config).unwrap();
    (chip, radio)
}

#[test]
fn init_defaults() {
    let (chip, radio) = configured();
    let state = chip.state();
    assert_eq!(state.register(registers::RF_CH), 46);
    assert_eq!(state.register(registers::RX_PW_P1), 32);
    assert_eq!(state.register(registers::SETUP_AW), 3);
    assert_eq!(state.register(registers::DYNPD), 0);
    assert_eq!(state.register(registers::SETUP_RETR), 0x68);
    // PA max, 1 Mbps
    assert_eq!(state.register(registers::RF_SETUP) & 0x2E, 6);
    // 8 bit CRC
    assert_eq!(state.config() & 0x0C, 0x08);
    assert_eq!(state.register(registers::EN_AA), 3);
    assert_eq!(state.register(registers::EN_RXADDR), 2);
    assert_eq!(state.tx_address(), PEER_ADDRESS);
    assert_eq!(state.pipe_address(0), PEER_ADDRESS);
    assert_eq!(state.pipe_address(1), ADDRESS);
    assert_eq!(radio.mode(), Mode::Standby);
    assert_eq!(radio.get_payload_length(), 32);
}

#[test]
fn hardware_not_responding() {
    let chip = SimChip::default();
    chip.state().stuck_setup_aw = Some(0xFF);
    let mut radio = chip.radio();
    assert_eq!(
        radio.init(&RadioConfig::default()),
        Err(Nrf24Error::HardwareNotResponding)
    );
}

#[test]
fn send_acknowledged() {
    let (chip, mut radio) = configured();
    chip.state().peer = Peer::AckAfter(10_000);
    radio.send_blocking(b"hi", 500).unwrap();
    let state = chip.state();
    // powered down after the transmission
    assert_eq!(state.config() & 2, 0);
    assert_eq!(state.register(registers::STATUS) & 0x70, 0);
    assert_eq!(radio.mode(), Mode::PowerDown);
    assert!(state.now_us() >= 10_000);
}

#[test]
fn send_times_out() {
    let (chip, mut radio) = configured();
    chip.state().peer = Peer::Never;
    assert_eq!(
        radio.send_blocking(b"hi", 500),
        Err(Nrf24Error::SendTimeout)
    );
    let state = chip.state();
    assert!(state.now_us() >= 500_000);
    // the payload is not left in the TX FIFO
    assert_eq!(state.register(registers::FIFO_STATUS) & 0x10, 0x10);
    assert_eq!(state.config() & 2, 0);
}

#[test]
fn send_fails_then_resends() {
    let (chip, mut radio) = configured();
    chip.state().peer = Peer::MaxRetries(2_000);
    assert_eq!(radio.send_blocking(b"hi", 500), Err(Nrf24Error::SendFailed));
    {
        let state = chip.state();
        // flags were cleared; the payload is still queued
        assert_eq!(state.register(registers::STATUS) & 0x70, 0);
        assert_eq!(state.register(registers::FIFO_STATUS) & 0x10, 0);
    }
    assert_eq!(radio.get_fifo_state(true), Ok(FifoState::Occupied));

    chip.state().peer = Peer::AckAfter(1_000);
    radio.resend(500).unwrap();
    let state = chip.state();
    assert_eq!(state.transmitted.len(), 2);
    assert_eq!(state.transmitted[0], state.transmitted[1]);
}

#[test]
fn send_after_failure_drops_stale_payload() {
    let (chip, mut radio) = configured();
    chip.state().peer = Peer::MaxRetries(2_000);
    assert_eq!(radio.send_blocking(b"A", 500), Err(Nrf24Error::SendFailed));

    chip.state().peer = Peer::AckAfter(1_000);
    radio.send_blocking(b"B", 500).unwrap();
    radio.send_blocking(b"C", 500).unwrap();
    let state = chip.state();
    let first_bytes: Vec<u8> = state.transmitted.iter().map(|p| p[0]).collect();
    assert_eq!(first_bytes, b"ABC".to_vec());
    // nothing is left queued
    assert_eq!(state.register(registers::FIFO_STATUS) & 0x10, 0x10);
}

#[test]
fn short_payload_is_zero_padded() {
    let (chip, mut radio) = configured();
    radio.send_blocking(b"hi", 500).unwrap();
    let state = chip.state();
    let mut expected = [0u8; 32];
    expected[..2].copy_from_slice(b"hi");
    assert_eq!(state.transmitted, vec![expected.to_vec()]);
}

#[test]
fn long_payload_is_rejected() {
    let (chip, mut radio) = configured();
    radio.set_payload_length(4).unwrap();
    assert_eq!(
        radio.send_blocking(b"hello", 500),
        Err(Nrf24Error::InvalidLength(5))
    );
    assert!(chip.state().transmitted.is_empty());
}

#[test]
fn non_blocking_send() {
    let (chip, mut radio) = configured();
    chip.state().peer = Peer::AckAfter(1_000);
    radio.send_start(b"hi").unwrap();
    assert_eq!(radio.mode(), Mode::Sending);
    assert_eq!(radio.send_done(), Ok(TxState::Pending));
    chip.state().elapse_us(2_000);
    assert_eq!(radio.send_done(), Ok(TxState::Sent));
    assert_eq!(radio.get_last_arc(), Ok(0));
    assert_eq!(radio.mode(), Mode::PowerDown);
}

#[test]
fn pipes_2_to_5_share_pipe_1() {
    let (chip, mut radio) = configured();
    for (pipe, lsb) in [(2u8, b'A'), (3, b'B'), (4, b'C'), (5, b'D')] {
        let mut address = [0xFFu8; 5];
        address[0] = lsb;
        radio.open_rx_pipe(pipe, &address).unwrap();
    }
    let state = chip.state();
    for (pipe, lsb) in [(2u8, b'A'), (3, b'B'), (4, b'C'), (5, b'D')] {
        let mut expected = ADDRESS;
        expected[0] = lsb;
        assert_eq!(state.pipe_address(pipe), expected);
    }
    assert_eq!(state.register(registers::EN_RXADDR), 0x3E);
}

#[test]
fn invalid_pipe() {
    let (_chip, mut radio) = configured();
    assert_eq!(
        radio.open_rx_pipe(6, &ADDRESS),
        Err(Nrf24Error::InvalidPipe(6))
    );
    assert_eq!(radio.close_rx_pipe(7), Err(Nrf24Error::InvalidPipe(7)));
}

#[test]
fn listen_and_receive() {
    let (chip, mut radio) = configured();
    radio.start_listening().unwrap();
    assert_eq!(radio.mode(), Mode::Listening);
    assert!(chip.state().ce());
    assert_eq!(radio.data_available(), Ok(false));

    chip.state().deliver(1, b"ping");
    assert_eq!(radio.data_available(), Ok(true));
    let mut buf = [0u8; 32];
    assert_eq!(radio.receive(&mut buf), Ok(32));
    assert_eq!(&buf[..4], b"ping");
    assert!(buf[4..].iter().all(|b| *b == 0));
    assert_eq!(radio.data_available(), Ok(false));
    assert_eq!(chip.state().register(registers::STATUS) & 0x40, 0);

    radio.stop_listening().unwrap();
    assert!(!chip.state().ce());
    assert_eq!(radio.mode(), Mode::Standby);
}

#[test]
fn receive_keeps_queue_without_flush() {
    let chip = SimChip::default();
    let mut radio = chip.radio();
    let config = RadioConfig::default()
        .with_rx_address(1, &ADDRESS)
        .with_flush_on_read(false);
    radio.init(&config).unwrap();
    radio.start_listening().unwrap();
    chip.state().deliver(1, b"one");
    chip.state().deliver(1, b"two");
    let mut buf = [0u8; 3];
    radio.receive(&mut buf).unwrap();
    assert_eq!(&buf, b"one");
    assert_eq!(radio.data_available(), Ok(true));
    radio.receive(&mut buf).unwrap();
    assert_eq!(&buf, b"two");
    assert_eq!(radio.data_available(), Ok(false));
}

#[test]
fn start_listening_restores_pipe0() {
    let chip = SimChip::default();
    let mut radio = chip.radio();
    radio.init(&RadioConfig::default()).unwrap();
    radio.open_rx_pipe(0, &ADDRESS).unwrap();
    radio.open_tx_pipe(&PEER_ADDRESS).unwrap();
    assert_eq!(chip.state().pipe_address(0), PEER_ADDRESS);
    radio.start_listening().unwrap();
    assert_eq!(chip.state().pipe_address(0), ADDRESS);
}

#[test]
fn channel_is_clamped() {
    let (chip, mut radio) = configured();
    radio.set_channel(200).unwrap();
    assert_eq!(radio.get_channel(), Ok(125));
    assert_eq!(chip.state().register(registers::RF_CH), 125);
}
