//! Day navigation and timed autoplay.

/// Outcome of advancing the cursor by one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved to the given day
    Advanced(usize),
    /// Went past the last day and restarted at day 0
    Wrapped,
    /// Already on the last day without looping; playback should stop
    Finished,
}

/// Current day, always kept within `[0, max_days - 1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayCursor {
    day: usize,
    max_days: usize,
}

impl DayCursor {
    pub fn new(max_days: usize) -> Self {
        Self { day: 0, max_days }
    }

    pub fn day(&self) -> usize {
        self.day
    }

    pub fn max_days(&self) -> usize {
        self.max_days
    }

    pub fn is_last(&self) -> bool {
        self.day + 1 >= self.max_days
    }

    /// Moves to `day` clamped into range and returns the day actually set
    pub fn set(&mut self, day: i64) -> usize {
        let last = self.max_days.saturating_sub(1) as i64;
        self.day = day.clamp(0, last) as usize;
        self.day
    }

    pub fn prev(&mut self) -> usize {
        self.set(self.day as i64 - 1)
    }

    pub fn next(&mut self) -> usize {
        self.set(self.day as i64 + 1)
    }

    /// One autoplay step
    pub fn advance(&mut self, looping: bool) -> Step {
        if !self.is_last() {
            self.day += 1;
            Step::Advanced(self.day)
        } else if looping {
            self.day = 0;
            Step::Wrapped
        } else {
            Step::Finished
        }
    }
}

/// A tick emitted by [`Autoplay`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTick {
    pub sequence: u64,
}

#[cfg(feature = "tokio-runtime")]
pub use self::autoplay::Autoplay;

#[cfg(feature = "tokio-runtime")]
mod autoplay {
    use super::*;
    use crate::{
        core::constants::DEFAULT_RUN_SPEED_MS,
        runtime::{self, AsyncHandle},
        Result, VisualizerError,
    };
    use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
    use std::time::Duration;

    /// Background ticker driving the day cursor.
    ///
    /// A tokio task sends one [`PlaybackTick`] per interval over a channel of
    /// capacity one; ticks the consumer has not picked up yet are dropped,
    /// so a slow frame never causes a burst of steps.
    pub struct Autoplay {
        interval: Duration,
        handle: Option<Box<dyn AsyncHandle>>,
        sender: Sender<PlaybackTick>,
        receiver: Receiver<PlaybackTick>,
    }

    impl Autoplay {
        pub fn new(interval: Duration) -> Self {
            let (sender, receiver) = bounded(1);
            Self {
                interval,
                handle: None,
                sender,
                receiver,
            }
        }

        pub fn interval(&self) -> Duration {
            self.interval
        }

        /// Changes the step delay, restarting the ticker if it runs
        pub fn set_interval(&mut self, interval: Duration) -> Result<()> {
            self.interval = interval;
            if self.is_running() {
                self.stop();
                self.start()?;
            }
            Ok(())
        }

        pub fn is_running(&self) -> bool {
            self.handle
                .as_ref()
                .map(|handle| !handle.is_finished())
                .unwrap_or(false)
        }

        /// Spawns the ticker; a no-op when already running
        pub fn start(&mut self) -> Result<()> {
            if self.is_running() {
                return Ok(());
            }
            if self.interval.is_zero() {
                return Err(VisualizerError::Runtime(
                    "autoplay interval must be positive".to_string(),
                ));
            }
            if !runtime::runtime().is_available() {
                return Err(VisualizerError::Runtime(
                    "autoplay requires a running tokio runtime".to_string(),
                ));
            }

            let sender = self.sender.clone();
            let interval = self.interval;
            log::debug!("Starting autoplay every {:?}", interval);

            self.handle = Some(runtime::spawn(async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                let mut sequence = 0u64;
                loop {
                    ticker.tick().await;
                    match sender.try_send(PlaybackTick { sequence }) {
                        Ok(()) => sequence += 1,
                        Err(TrySendError::Full(_)) => {}
                        Err(TrySendError::Disconnected(_)) => break,
                    }
                }
            }));
            Ok(())
        }

        /// Cancels the ticker and discards pending ticks
        pub fn stop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.cancel();
                log::debug!("Stopped autoplay");
            }
            // A task still finishing its last poll sends into the old channel.
            let (sender, receiver) = bounded(1);
            self.sender = sender;
            self.receiver = receiver;
        }

        /// Takes every pending tick, returning how many there were
        pub fn drain(&self) -> usize {
            self.receiver.try_iter().count()
        }

        /// Blocks until the next tick or `timeout`
        pub fn recv_timeout(&self, timeout: Duration) -> Option<PlaybackTick> {
            self.receiver.recv_timeout(timeout).ok()
        }
    }

    impl Default for Autoplay {
        fn default() -> Self {
            Self::new(Duration::from_millis(DEFAULT_RUN_SPEED_MS))
        }
    }

    impl Drop for Autoplay {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.cancel();
            }
        }
    }
}
