//! The polling thread: attach, snapshot, classify, publish, repeat

use super::shutdown::{ShutdownSignal, Wake};
use super::state::PollState;
use crate::config::{Config, DisplayConfig, PollingConfig};
use crate::core::types::{RadarError, RadarResult};
use crate::game::entity::SnapshotBuilder;
use crate::game::maps;
use crate::game::offsets::OffsetTable;
use crate::game::radar::{Classifier, RadarFrame};
use crate::memory::MemoryAccessor;
use crate::process::ProcessBackend;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tokio::sync::watch;
use tracing::{debug, error, info, trace, warn};

/// Single-threaded producer of [`RadarFrame`]s.
///
/// Owns the memory accessor; nothing else attaches or detaches it.
pub struct Poller<B: ProcessBackend> {
    accessor: MemoryAccessor<B>,
    offsets: OffsetTable,
    classifier: Classifier,
    settings: PollingConfig,
    display: DisplayConfig,
    state: PollState,
    last_attempt: Option<Instant>,
    map_name: String,
    tick: u64,
}

impl<B: ProcessBackend> Poller<B> {
    pub fn new(backend: B, config: &Config) -> Self {
        Poller {
            accessor: MemoryAccessor::new(backend, config.target.clone()),
            offsets: OffsetTable::CURRENT,
            classifier: Classifier::new(config.display.size),
            settings: config.polling.clone(),
            display: config.display.clone(),
            state: PollState::Disconnected,
            last_attempt: None,
            map_name: config.display.default_map.clone(),
            tick: 0,
        }
    }

    /// Use a different offset table
    pub fn with_offsets(mut self, offsets: OffsetTable) -> Self {
        self.offsets = offsets;
        self
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn accessor(&self) -> &MemoryAccessor<B> {
        &self.accessor
    }

    pub fn map_name(&self) -> &str {
        &self.map_name
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Switch the map used for projection. Unknown names fall back to the
    /// default bounds.
    pub fn select_map(&mut self, name: &str) {
        if name == self.map_name {
            return;
        }
        if maps::is_known_map(name) {
            info!("Map set to {}", name);
        } else {
            warn!(
                "Unknown map '{}', projecting with {} bounds",
                name,
                maps::DEFAULT_MAP
            );
        }
        self.map_name = name.to_string();
    }

    fn disconnected_frame(&self) -> RadarFrame {
        RadarFrame::disconnected(self.tick, self.map_name.clone(), self.classifier.display_size())
    }

    fn disconnect(&mut self) {
        self.accessor.detach();
        self.state = PollState::Disconnected;
    }

    /// Run one tick at `now`.
    ///
    /// Losing the process is not an error: the accessor is detached and a
    /// disconnected frame is returned.
    pub fn tick(&mut self, now: Instant) -> RadarResult<Arc<RadarFrame>> {
        self.tick += 1;

        if self.state != PollState::Active && !self.try_attach(now) {
            return Ok(Arc::new(self.disconnected_frame()));
        }

        let snapshot = SnapshotBuilder::new(&self.accessor, &self.offsets).snapshot();
        match snapshot {
            Ok(snapshot) => Ok(Arc::new(self.classifier.assemble(
                &snapshot,
                &self.map_name,
                self.tick,
            ))),
            Err(e) if e.is_process_level() => {
                warn!("Lost connection to target: {}", e);
                self.disconnect();
                Ok(Arc::new(self.disconnected_frame()))
            }
            Err(e) => Err(e),
        }
    }

    fn try_attach(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_attempt {
            if now.saturating_duration_since(last) < self.settings.retry_interval() {
                trace!("Attach attempt suppressed until retry interval elapses");
                return false;
            }
        }

        self.last_attempt = Some(now);
        self.state = PollState::Connecting;
        match self.accessor.attach() {
            Ok(()) => {
                info!("Radar active");
                self.state = PollState::Active;
                true
            }
            Err(e) => {
                self.log_attach_failure(&e);
                self.disconnect();
                false
            }
        }
    }

    fn log_attach_failure(&self, err: &RadarError) {
        match err {
            RadarError::AccessDenied { .. } => {
                error!("{}; run the radar with administrator privileges", err)
            }
            RadarError::ProcessNotFound(_) | RadarError::ModuleNotFound(_) => {
                info!(
                    "Waiting for {} ({}), retrying in {:?}",
                    self.accessor.target().process_name,
                    err,
                    self.settings.retry_interval()
                )
            }
            _ => debug!("Attach failed: {}", err),
        }
    }

    /// Run one tick inside the fault boundary.
    ///
    /// Returns the frame to publish, if any, and how long to sleep before
    /// the next tick.
    pub fn step(&mut self, now: Instant) -> (Option<Arc<RadarFrame>>, Duration) {
        match panic::catch_unwind(AssertUnwindSafe(|| self.tick(now))) {
            Ok(Ok(frame)) => (Some(frame), self.settings.refresh_interval()),
            Ok(Err(e)) => {
                error!("Tick {} failed: {}", self.tick, e);
                (None, self.settings.fault_backoff())
            }
            Err(payload) => {
                error!("Tick {} panicked: {}", self.tick, panic_message(&*payload));
                if self.state != PollState::Active {
                    self.disconnect();
                }
                (None, self.settings.fault_backoff())
            }
        }
    }

    /// Poll until `shutdown` fires, then detach.
    ///
    /// Frames go out through `frames`; map changes come in through `maps`.
    pub fn run(
        &mut self,
        shutdown: &ShutdownSignal,
        frames: &watch::Sender<Arc<RadarFrame>>,
        maps: &mut watch::Receiver<String>,
    ) {
        info!(
            "Polling for {} every {:?}",
            self.accessor.target().process_name,
            self.settings.refresh_interval()
        );
        let mut last_status = Instant::now();

        while !shutdown.is_shutdown() {
            if maps.has_changed().unwrap_or(false) {
                let name = maps.borrow_and_update().clone();
                self.select_map(&name);
            }

            let now = Instant::now();
            let (frame, pause) = self.step(now);
            if let Some(frame) = frame {
                if now.saturating_duration_since(last_status) >= self.settings.status_interval() {
                    log_status(&frame);
                    last_status = now;
                }
                frames.send_replace(frame);
            }

            if shutdown.wait(pause) == Wake::Shutdown {
                break;
            }
        }

        self.disconnect();
        frames.send_replace(Arc::new(self.disconnected_frame()));
        info!("Poller stopped after {} ticks", self.tick);
    }
}

fn log_status(frame: &RadarFrame) {
    if frame.connected {
        info!(
            "Players: {} | Enemies: {} | Teammates: {}",
            frame.counts.total, frame.counts.enemies, frame.counts.teammates
        );
    } else {
        debug!("Not connected");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Render-side view of a running poller
pub struct RadarHandle {
    frames: watch::Receiver<Arc<RadarFrame>>,
    maps: watch::Sender<String>,
    display: DisplayConfig,
    shutdown: Arc<ShutdownSignal>,
    thread: Option<JoinHandle<()>>,
}

/// Start `poller` on its own thread
pub fn spawn<B>(mut poller: Poller<B>) -> RadarResult<RadarHandle>
where
    B: ProcessBackend + Send + 'static,
    B::Process: Send,
{
    let (frame_tx, frame_rx) = watch::channel(Arc::new(poller.disconnected_frame()));
    let (map_tx, mut map_rx) = watch::channel(poller.map_name().to_string());
    let shutdown = Arc::new(ShutdownSignal::new());
    let display = poller.display.clone();

    let signal = Arc::clone(&shutdown);
    let thread = thread::Builder::new()
        .name("radar-poller".to_string())
        .spawn(move || poller.run(&signal, &frame_tx, &mut map_rx))?;

    Ok(RadarHandle {
        frames: frame_rx,
        maps: map_tx,
        display,
        shutdown,
        thread: Some(thread),
    })
}

impl RadarHandle {
    /// Most recently published frame
    pub fn latest(&self) -> Arc<RadarFrame> {
        Arc::clone(&self.frames.borrow())
    }

    /// Receiver notified on every published frame
    pub fn subscribe(&self) -> watch::Receiver<Arc<RadarFrame>> {
        self.frames.clone()
    }

    /// Takes effect on the next tick, which runs without waiting out the
    /// current pause
    pub fn select_map(&self, name: &str) {
        self.maps.send_replace(name.to_string());
        self.shutdown.nudge();
    }

    /// Display toggles for the renderer
    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn shutdown_signal(&self) -> Arc<ShutdownSignal> {
        Arc::clone(&self.shutdown)
    }

    /// Stop the poller and wait for it to detach
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.shutdown.trigger();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Poller thread panicked during shutdown");
            }
        }
    }
}

impl Drop for RadarHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
