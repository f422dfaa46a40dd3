//! Event sinks — where admitted gesture events go.
//!
//! Sinks are typed by the event they accept, so each mode's dispatch is a
//! total mapping: [`KeyboardSink`] takes [`NavKey`]s, [`UdpSink`] takes
//! [`SignalGesture`]s.  Delivery is best effort; the frame loop logs a failed
//! delivery and moves on.

use std::fmt;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

use enigo::{Direction as Press, Enigo, Key, Keyboard, Settings};
use gesture_core::{KeySymbol, NavKey, SignalGesture};
use thiserror::Error;
use tracing::{info, warn};

/// Where signal-mode labels are sent by default.
pub const DEFAULT_SIGNAL_TARGET: &str = "127.0.0.1:5005";

// ════════════════════════════════════════════════════════════════════════════
// SinkError / EventSink trait
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("keyboard injection failed: {0}")]
    Keyboard(String),

    #[error("datagram send failed: {0}")]
    Io(#[from] io::Error),

    #[error("event queue closed")]
    Closed,
}

/// Performs the side effect for one admitted event.
pub trait EventSink<E> {
    fn emit(&mut self, event: E) -> Result<(), SinkError>;
}

impl<E, S: EventSink<E> + ?Sized> EventSink<E> for Box<S> {
    fn emit(&mut self, event: E) -> Result<(), SinkError> {
        (**self).emit(event)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// KeyboardSink — OS key injection
// ════════════════════════════════════════════════════════════════════════════

/// Presses and immediately releases one key per event.
pub struct KeyboardSink {
    enigo: Enigo,
}

impl KeyboardSink {
    pub fn new() -> Result<Self, SinkError> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| SinkError::Keyboard(e.to_string()))?;
        Ok(KeyboardSink { enigo })
    }
}

fn enigo_key(symbol: KeySymbol) -> Key {
    match symbol {
        KeySymbol::ArrowUp    => Key::UpArrow,
        KeySymbol::ArrowDown  => Key::DownArrow,
        KeySymbol::ArrowLeft  => Key::LeftArrow,
        KeySymbol::ArrowRight => Key::RightArrow,
        KeySymbol::Char(c)    => Key::Unicode(c),
    }
}

impl EventSink<NavKey> for KeyboardSink {
    fn emit(&mut self, event: NavKey) -> Result<(), SinkError> {
        let key = enigo_key(event.symbol());
        let fail = |e: enigo::InputError| SinkError::Keyboard(e.to_string());
        self.enigo.key(key, Press::Press).map_err(fail)?;
        self.enigo.key(key, Press::Release).map_err(fail)?;
        info!(key = %event, "key pressed");
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// UdpSink — fire-and-forget labels
// ════════════════════════════════════════════════════════════════════════════

/// Sends each gesture's label as a UTF-8 datagram.  No acknowledgement, no
/// retry: a gesture that missed its moment is not worth resending.
pub struct UdpSink {
    socket: UdpSocket,
    target: SocketAddr,
}

impl UdpSink {
    pub fn new(target: SocketAddr) -> Result<Self, SinkError> {
        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local)?;
        Ok(UdpSink { socket, target })
    }
}

impl EventSink<SignalGesture> for UdpSink {
    fn emit(&mut self, event: SignalGesture) -> Result<(), SinkError> {
        self.socket.send_to(event.label().as_bytes(), self.target)?;
        info!(gesture = %event, target = %self.target, "gesture sent");
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LogSink / RecordingSink
// ════════════════════════════════════════════════════════════════════════════

/// Logs events without acting on them (`--dry-run`).
#[derive(Debug, Default)]
pub struct LogSink;

impl<E: fmt::Display> EventSink<E> for LogSink {
    fn emit(&mut self, event: E) -> Result<(), SinkError> {
        info!(event = %event, "dry run");
        Ok(())
    }
}

/// Keeps every event in memory.
#[derive(Debug)]
pub struct RecordingSink<E> {
    pub events: Vec<E>,
}

impl<E> Default for RecordingSink<E> {
    fn default() -> Self {
        RecordingSink { events: Vec::new() }
    }
}

impl<E> EventSink<E> for RecordingSink<E> {
    fn emit(&mut self, event: E) -> Result<(), SinkError> {
        self.events.push(event);
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// QueuedSink — delivery on a background thread
// ════════════════════════════════════════════════════════════════════════════

/// Hands events to a delivery thread over a channel so a slow sink never
/// stalls the frame loop.  Events are delivered in the order emitted.
///
/// The inner sink is built on the delivery thread itself, so it need not be
/// `Send`.  Dropping the queue delivers what is pending, then joins the
/// thread.
pub struct QueuedSink<E> {
    tx:     Option<Sender<E>>,
    worker: Option<JoinHandle<()>>,
}

impl<E: Send + 'static> QueuedSink<E> {
    pub fn spawn<S, F>(make: F) -> Result<Self, SinkError>
    where
        S: EventSink<E> + 'static,
        F: FnOnce() -> Result<S, SinkError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<E>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), SinkError>>();

        let worker = thread::spawn(move || {
            let mut sink = match make() {
                Ok(s) => {
                    let _ = ready_tx.send(Ok(()));
                    s
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            for event in rx {
                if let Err(e) = sink.emit(event) {
                    warn!(error = %e, "queued delivery failed");
                }
            }
        });

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(QueuedSink { tx: Some(tx), worker: Some(worker) }),
            Ok(Err(e)) => {
                let _ = worker.join();
                Err(e)
            }
            Err(_) => {
                let _ = worker.join();
                Err(SinkError::Closed)
            }
        }
    }
}

impl<E> EventSink<E> for QueuedSink<E> {
    fn emit(&mut self, event: E) -> Result<(), SinkError> {
        match &self.tx {
            Some(tx) => tx.send(event).map_err(|_| SinkError::Closed),
            None     => Err(SinkError::Closed),
        }
    }
}

impl<E> Drop for QueuedSink<E> {
    fn drop(&mut self) {
        drop(self.tx.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
