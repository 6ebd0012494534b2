use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};

/// What the host loop reacts to.
pub enum HostEvent {
    Key(KeyEvent),
    /// No key arrived within the tick interval; time to poll the secondary
    /// reveal countdown.
    RevealTick,
}

/// Key presses forwarded from a blocking reader thread, interleaved with
/// reveal ticks while the keyboard is idle.
pub struct KeyPump {
    keys: mpsc::Receiver<KeyEvent>,
    tick_interval: Duration,
}

impl KeyPump {
    pub fn spawn(tick_interval: Duration) -> Self {
        let (tx, keys) = mpsc::channel();

        thread::spawn(move || {
            loop {
                match event::read() {
                    Ok(Event::Key(key)) => {
                        if tx.send(key).is_err() {
                            return;
                        }
                    }
                    // Resizes need no handling: every loop iteration redraws.
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!(error = %err, "terminal read failed, stopping key reader");
                        return;
                    }
                }
            }
        });

        Self { keys, tick_interval }
    }

    /// Block until a key arrives or the tick interval elapses.
    pub fn next(&self) -> anyhow::Result<HostEvent> {
        match self.keys.recv_timeout(self.tick_interval) {
            Ok(key) => Ok(HostEvent::Key(key)),
            Err(RecvTimeoutError::Timeout) => Ok(HostEvent::RevealTick),
            Err(RecvTimeoutError::Disconnected) => anyhow::bail!("key reader stopped"),
        }
    }
}
