//! A coordinator that shares one radio between a background receive loop
//! and foreground transmissions.
//!
//! ```ignore
//! use rf24_station::station::Station;
//!
//! let mut station = Station::new(radio);
//! let inbox = station.subscribe()?;
//! station.send(b"hi")?;
//! for payload in inbox.try_iter() {
//!     println!("received {payload:?}");
//! }
//! ```
//!
//! The radio is guarded by a single [`Mutex`]. The receive loop only polls the
//! radio while holding it, and [`Station::send()`] holds it for the entire
//! stop-listening, send, start-listening sequence. So, the radio is never asked
//! to listen and send at the same time.

use core::fmt::{Debug, Display, Formatter};
use std::{
    sync::{
        mpsc::{self, RecvTimeoutError},
        Arc, Mutex, MutexGuard,
    },
    string::{String, ToString},
    thread::{self, JoinHandle},
    time::Duration,
    vec::Vec,
};

use crate::radio::prelude::{EsbFifo, EsbRadio};

/// The largest payload the radio can hold.
const MAX_PAYLOAD_LENGTH: usize = 32;

/// Timing used by a [`Station`].
///
/// ```
/// use rf24_station::station::StationConfig;
/// use std::time::Duration;
/// let config = StationConfig::default().with_poll_delay(Duration::from_millis(5));
/// assert_eq!(config.poll_delay(), Duration::from_millis(5));
/// assert_eq!(config.send_timeout_ms(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationConfig {
    poll_delay: Duration,
    send_timeout_ms: u32,
}

impl Default for StationConfig {
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`StationConfig::poll_delay()`] | 1 millisecond |
    /// | [`StationConfig::send_timeout_ms()`] | `500` |
    fn default() -> Self {
        Self {
            poll_delay: Duration::from_millis(1),
            send_timeout_ms: 500,
        }
    }
}

impl StationConfig {
    /// How long the receive loop waits between checks for received payloads.
    pub const fn poll_delay(&self) -> Duration {
        self.poll_delay
    }

    /// Set the delay between checks for received payloads.
    pub fn with_poll_delay(self, poll_delay: Duration) -> Self {
        Self { poll_delay, ..self }
    }

    /// The timeout passed to [`EsbRadio::send_blocking()`] by [`Station::send()`].
    pub const fn send_timeout_ms(&self) -> u32 {
        self.send_timeout_ms
    }

    /// Set the timeout (in milliseconds) used by [`Station::send()`].
    pub fn with_send_timeout_ms(self, timeout_ms: u32) -> Self {
        Self {
            send_timeout_ms: timeout_ms,
            ..self
        }
    }
}

/// Errors returned by a [`Station`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StationError<E> {
    /// An error returned by the radio.
    Radio(E),
    /// A thread panicked while holding the radio.
    Poisoned,
    /// The receive loop was already started.
    AlreadyRunning,
}

impl<E: Debug> Display for StationError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            StationError::Radio(e) => write!(f, "radio error: {e:?}"),
            StationError::Poisoned => write!(f, "radio mutex is poisoned"),
            StationError::AlreadyRunning => write!(f, "receive loop is already running"),
        }
    }
}

impl<E: Debug> std::error::Error for StationError<E> {}

/// Shares a radio between a background receive loop and callers of [`Station::send()`].
pub struct Station<R> {
    radio: Arc<Mutex<R>>,
    config: StationConfig,
    shutdown: Option<mpsc::Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl<R> Station<R> {
    /// Signal the receive loop to exit and wait for it.
    fn join_worker(&mut self) {
        // dropping the sender also interrupts the loop's wait
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("receive loop panicked");
            }
        }
    }

    /// Is the receive loop running?
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// The timing used by this station.
    pub const fn config(&self) -> &StationConfig {
        &self.config
    }
}

impl<R, E> Station<R>
where
    R: EsbRadio<RadioErrorType = E> + EsbFifo<FifoErrorType = E> + Send + 'static,
    E: Debug + 'static,
{
    /// Take ownership of a configured `radio` using [`StationConfig::default()`].
    ///
    /// The radio should already be configured with
    /// [`EsbInit::init()`](fn@crate::radio::prelude::EsbInit::init) and have its pipes opened.
    pub fn new(radio: R) -> Self {
        Self::with_config(radio, StationConfig::default())
    }

    /// Take ownership of a configured `radio` using the given `config`.
    pub fn with_config(radio: R, config: StationConfig) -> Self {
        Self {
            radio: Arc::new(Mutex::new(radio)),
            config,
            shutdown: None,
            worker: None,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, R>, StationError<E>> {
        self.radio.lock().map_err(|_| StationError::Poisoned)
    }

    /// Run `f` with exclusive access to the radio.
    ///
    /// The receive loop is paused until `f` returns.
    pub fn with_radio<T>(&self, f: impl FnOnce(&mut R) -> T) -> Result<T, StationError<E>> {
        let mut radio = self.lock()?;
        Ok(f(&mut radio))
    }

    /// Put the radio in RX mode and start polling it from a background thread.
    ///
    /// Every received payload is passed to `consumer`, which is called without
    /// holding the radio. Only one receive loop can run at a time.
    pub fn start_receive_loop<F>(&mut self, mut consumer: F) -> Result<(), StationError<E>>
    where
        F: FnMut(Vec<u8>) + Send + 'static,
    {
        if self.worker.is_some() {
            return Err(StationError::AlreadyRunning);
        }
        self.lock()?.start_listening().map_err(StationError::Radio)?;

        let (shutdown, shutdown_rx) = mpsc::channel::<()>();
        let radio = Arc::clone(&self.radio);
        let poll_delay = self.config.poll_delay;
        let worker = thread::spawn(move || {
            log::debug!("receive loop started");
            let mut faults = FaultLog::default();
            loop {
                let mut batch = Vec::new();
                let result = drain(&radio, &mut batch);
                for payload in batch {
                    consumer(payload);
                }
                match result {
                    Ok(()) => {
                        if faults.recovered() {
                            log::info!("receive loop recovered");
                        }
                    }
                    Err(StationError::Poisoned) => {
                        log::error!("receive loop stopped: radio mutex is poisoned");
                        break;
                    }
                    Err(e) => {
                        if faults.failed(&e) {
                            log::error!("receive loop: {e}");
                        }
                    }
                }
                match shutdown_rx.recv_timeout(poll_delay) {
                    Err(RecvTimeoutError::Timeout) => (),
                    _ => break,
                }
            }
            log::debug!("receive loop stopped");
        });
        self.shutdown = Some(shutdown);
        self.worker = Some(worker);
        Ok(())
    }

    /// Start the receive loop with a consumer that forwards payloads to the returned receiver.
    ///
    /// Payloads queue in host memory until they are taken from the receiver.
    pub fn subscribe(&mut self) -> Result<mpsc::Receiver<Vec<u8>>, StationError<E>> {
        let (tx, rx) = mpsc::channel();
        self.start_receive_loop(move |payload| {
            if tx.send(payload).is_err() {
                log::debug!("payload dropped: subscriber is gone");
            }
        })?;
        Ok(rx)
    }

    /// Transmit a `payload` while the receive loop is paused.
    ///
    /// The radio leaves RX mode, sends the payload with
    /// [`EsbRadio::send_blocking()`], then resumes RX mode even if the send failed.
    /// The send's error takes precedence over an error from resuming RX mode.
    pub fn send(&self, payload: &[u8]) -> Result<(), StationError<E>> {
        let mut radio = self.lock()?;
        radio.stop_listening().map_err(StationError::Radio)?;
        let sent = radio.send_blocking(payload, self.config.send_timeout_ms);
        let resumed = radio.start_listening();
        sent.map_err(StationError::Radio)?;
        resumed.map_err(StationError::Radio)
    }

    /// Stop the receive loop and wait for its thread to exit.
    ///
    /// The radio is left in RX mode. This does nothing if the loop is not running.
    pub fn stop(&mut self) {
        self.join_worker();
    }
}

/// Move every payload waiting in the RX FIFO into `batch`.
/// Remembers the last fault seen by the receive loop, so a persistent fault
/// is logged when it first appears (or changes) instead of on every poll.
#[derive(Default)]
struct FaultLog {
    last: Option<String>,
}

impl FaultLog {
    /// Returns `true` if `fault` differs from the previous one.
    fn failed(&mut self, fault: &impl Display) -> bool {
        let message = fault.to_string();
        if self.last.as_deref() == Some(message.as_str()) {
            return false;
        }
        self.last = Some(message);
        true
    }

    /// Returns `true` if a fault was pending.
    fn recovered(&mut self) -> bool {
        self.last.take().is_some()
    }
}

fn drain<R, E>(radio: &Mutex<R>, batch: &mut Vec<Vec<u8>>) -> Result<(), StationError<E>>
where
    R: EsbRadio<RadioErrorType = E> + EsbFifo<FifoErrorType = E>,
{
    let mut radio = radio.lock().map_err(|_| StationError::Poisoned)?;
    while radio.data_available().map_err(StationError::Radio)? {
        let mut buf = [0u8; MAX_PAYLOAD_LENGTH];
        let len = radio.receive(&mut buf).map_err(StationError::Radio)? as usize;
        batch.push(buf[..len.min(MAX_PAYLOAD_LENGTH)].to_vec());
    }
    Ok(())
}

impl<R> Drop for Station<R> {
    fn drop(&mut self) {
        self.join_worker();
    }
}
