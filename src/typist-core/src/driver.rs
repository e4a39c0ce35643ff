//! Frame driver.
//!
//! Owns a [`Stepper`], ticks it on a tokio interval, and pushes the visible
//! text to a [`RenderSink`] whenever it changes.
//!
//! Each tick runs its step and its render under one gate lock with no
//! `.await` in between. [`DriverHandle::stop`] flips the gate under the same
//! lock, so once it returns nothing else reaches the sink.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use crate::clock::Clock;
use crate::stepper::Stepper;

/// Default frame rate.
pub const DEFAULT_FPS: u32 = 60;

/// Shortest tick period; `tokio::time::interval` rejects a zero period.
const MIN_FRAME_INTERVAL: Duration = Duration::from_nanos(1);

/// Consumer of rendered frames.
pub trait RenderSink: Send + 'static {
    /// Called with the full visible text after every change.
    fn render(&mut self, text: &str);
}

/// Keeps only the latest frame.
impl RenderSink for watch::Sender<String> {
    fn render(&mut self, text: &str) {
        self.send_replace(text.to_string());
    }
}

/// Queues every frame. A closed receiver is ignored.
impl RenderSink for mpsc::UnboundedSender<String> {
    fn render(&mut self, text: &str) {
        let _ = self.send(text.to_string());
    }
}

/// Schedules ticks for one stepper.
pub struct Driver<C, S> {
    stepper: Stepper,
    clock: C,
    sink: S,
    frame_interval: Duration,
}

impl<C, S> Driver<C, S>
where
    C: Clock + 'static,
    S: RenderSink,
{
    /// Creates a driver ticking at [`DEFAULT_FPS`].
    pub fn new(stepper: Stepper, clock: C, sink: S) -> Self {
        Self {
            stepper,
            clock,
            sink,
            frame_interval: frame_interval(DEFAULT_FPS),
        }
    }

    /// Sets the tick rate. Zero is treated as one frame per second; rates
    /// above one billion tick every nanosecond.
    pub fn with_frame_rate(mut self, fps: u32) -> Self {
        self.frame_interval = frame_interval(fps);
        self
    }

    /// Time between ticks.
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Spawns the tick loop on the current tokio runtime.
    ///
    /// Nothing is rendered until the first text change; the initial empty
    /// text is left to the caller.
    pub fn start(self) -> DriverHandle {
        let stopped = Arc::new(Mutex::new(false));
        let token = CancellationToken::new();

        debug!(
            interval_ns = u64::try_from(self.frame_interval().as_nanos()).unwrap_or(u64::MAX),
            messages = self.stepper.messages().len(),
            "starting typing driver"
        );

        let task = tokio::spawn(self.run(Arc::clone(&stopped), token.clone()));

        DriverHandle {
            stopped,
            token,
            task: Some(task),
        }
    }

    async fn run(mut self, stopped: Arc<Mutex<bool>>, token: CancellationToken) {
        let mut interval = tokio::time::interval(self.frame_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = interval.tick() => {}
            }

            {
                let stopped = stopped.lock();
                if *stopped {
                    break;
                }
                let event = self.stepper.step(self.clock.now());
                if event.changes_text() {
                    trace!(?event, "render");
                    self.sink.render(self.stepper.visible_text());
                }
            }
        }

        debug!("typing driver stopped");
    }
}

impl<C, S> std::fmt::Debug for Driver<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Driver")
            .field("stepper", &self.stepper)
            .field("frame_interval", &self.frame_interval)
            .finish_non_exhaustive()
    }
}

fn frame_interval(fps: u32) -> Duration {
    (Duration::from_secs(1) / fps.max(1)).max(MIN_FRAME_INTERVAL)
}

/// Handle to a running driver. Dropping it stops the driver.
#[derive(Debug)]
pub struct DriverHandle {
    stopped: Arc<Mutex<bool>>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl DriverHandle {
    /// Stops the tick loop. Safe to call any number of times.
    ///
    /// No frame is rendered after this returns.
    pub fn stop(&self) {
        {
            let mut stopped = self.stopped.lock();
            if !*stopped {
                *stopped = true;
                debug!("stop requested");
            }
        }
        self.token.cancel();
    }

    /// Returns `true` until the driver has been stopped.
    pub fn is_running(&self) -> bool {
        !*self.stopped.lock() && self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Waits for the tick loop to exit.
    ///
    /// Only returns once [`stop`](Self::stop) has been called.
    pub async fn join(mut self) {
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            warn!("typing driver task failed: {}", e);
        }
    }

    /// Stops the driver and waits for the loop to exit.
    pub async fn shutdown(self) {
        self.stop();
        self.join().await;
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
