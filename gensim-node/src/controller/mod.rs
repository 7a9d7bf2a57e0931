//! Node controller
//!
//! Owns the session and drives the job loop. Commands (start, pause, resume,
//! stop, set_device) mutate session state synchronously; the loop task
//! observes pause/stop through a watch channel at its suspension points.
//!
//! Each `start` bumps a run generation. Loop tasks and timers tag their
//! writes with the generation they belong to, so anything left over from a
//! stopped run can never touch a newer session.

mod job_loop;

use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use gensim_core::catalog;
use gensim_core::domain::{
    Device, LogEntry, LogLevel, NodeEvent, NodeEventKind, NodeState, RunningJob, SessionSnapshot,
};

use crate::config::NodeConfig;
use crate::error::{NodeError, Result};
use crate::events::EventBus;
use crate::trainer::{SimulatedTrainer, Trainer};

use job_loop::JobLoop;

/// Control flag the job loop observes at every suspension point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Control {
    Run,
    Pause,
    Stop,
}

/// Mutable session state, owned by the controller behind a lock
pub(crate) struct Session {
    /// Bumped on every start; guards against stale writes from old runs
    pub generation: u64,
    pub state: NodeState,
    pub device: Device,
    pub current_job: Option<RunningJob>,
    pub cumulative_earnings: f64,
    pub log: Vec<LogEntry>,
    pub celebrating: bool,
}

impl Session {
    /// Appends a line to the session feed and mirrors it on the event bus
    pub fn push_log(&mut self, events: &EventBus, level: LogLevel, message: impl Into<String>) {
        let entry = LogEntry::new(level, message);
        self.log.push(entry.clone());
        events.emit(NodeEventKind::Log(entry));
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            device: self.device.clone(),
            current_job: self.current_job.as_ref().map(|j| j.template.name.clone()),
            cumulative_earnings: self.cumulative_earnings,
            log: self.log.clone(),
            progress_percent: self
                .current_job
                .as_ref()
                .map(RunningJob::progress_percent)
                .unwrap_or(0.0),
            celebrating: self.celebrating,
        }
    }
}

/// State shared between the controller handle and loop/timer tasks
pub(crate) struct Shared {
    pub session: Mutex<Session>,
    pub events: EventBus,
}

/// The node: command surface plus background job loop
pub struct NodeController {
    config: NodeConfig,
    shared: Arc<Shared>,
    /// Control sender for the active run, if any
    control: Mutex<Option<watch::Sender<Control>>>,
    /// The training collaborator; locked by the loop for the run's duration
    trainer: Arc<tokio::sync::Mutex<Box<dyn Trainer>>>,
}

impl NodeController {
    /// Creates a controller backed by the default simulated trainer
    pub fn new(config: NodeConfig) -> Result<Self> {
        let trainer = SimulatedTrainer::new(config.seed);
        Self::with_trainer(config, Box::new(trainer))
    }

    /// Creates a controller with a caller-supplied trainer
    pub fn with_trainer(config: NodeConfig, trainer: Box<dyn Trainer>) -> Result<Self> {
        let device = catalog::device_by_name(&config.device)
            .ok_or_else(|| NodeError::UnknownDevice(config.device.clone()))?;

        let session = Session {
            generation: 0,
            state: NodeState::Idle,
            device,
            current_job: None,
            cumulative_earnings: 0.0,
            log: Vec::new(),
            celebrating: false,
        };

        Ok(Self {
            config,
            shared: Arc::new(Shared {
                session: Mutex::new(session),
                events: EventBus::new(),
            }),
            control: Mutex::new(None),
            trainer: Arc::new(tokio::sync::Mutex::new(trainer)),
        })
    }

    /// Opens a subscription to the node's event stream
    pub fn subscribe(&self) -> broadcast::Receiver<NodeEvent> {
        self.shared.events.subscribe()
    }

    /// Point-in-time copy of the session
    pub fn snapshot(&self) -> SessionSnapshot {
        self.shared.session.lock().unwrap().snapshot()
    }

    /// Share string for the current session earnings
    pub fn share_string(&self) -> String {
        let earnings = self.shared.session.lock().unwrap().cumulative_earnings;
        format!(
            "I earned {:.2} $SY on GenSyn Playground! {}",
            earnings, self.config.share_url
        )
    }

    /// Starts a run, resetting session data from any previous run
    ///
    /// Valid from Idle or Stopped. Spawns the job loop task; must be called
    /// from within a tokio runtime.
    pub fn start(&self) -> Result<()> {
        let (generation, device) = {
            let mut session = self.shared.session.lock().unwrap();
            if !session.state.can_start() {
                return Err(NodeError::invalid_transition(session.state, "start"));
            }

            session.generation += 1;
            session.state = NodeState::Running;
            session.current_job = None;
            session.cumulative_earnings = 0.0;
            session.log.clear();
            session.celebrating = false;

            self.shared
                .events
                .emit(NodeEventKind::StateChanged(NodeState::Running));
            session.push_log(&self.shared.events, LogLevel::Info, "Starting GenSyn node...");
            let gpu_line = format!("GPU: {}", session.device.name);
            session.push_log(&self.shared.events, LogLevel::Info, gpu_line);

            (session.generation, session.device.clone())
        };

        let (tx, rx) = watch::channel(Control::Run);
        *self.control.lock().unwrap() = Some(tx);

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        info!(generation, device = %device.name, "node started");

        let job_loop = JobLoop::new(
            Arc::clone(&self.shared),
            rx,
            self.config.clone(),
            device,
            generation,
            Arc::clone(&self.trainer),
            rng,
        );
        tokio::spawn(job_loop.run());

        Ok(())
    }

    /// Suspends the job loop without discarding job progress
    ///
    /// Valid only while Running. The loop halts before its next step.
    pub fn pause(&self) -> Result<()> {
        {
            let mut session = self.shared.session.lock().unwrap();
            if session.state != NodeState::Running {
                return Err(NodeError::invalid_transition(session.state, "pause"));
            }
            session.state = NodeState::Paused;
            self.shared
                .events
                .emit(NodeEventKind::StateChanged(NodeState::Paused));
            session.push_log(&self.shared.events, LogLevel::Info, "Node paused");
        }

        self.signal(Control::Pause);
        debug!("pause requested");
        Ok(())
    }

    /// Resumes a paused loop from the last completed step
    pub fn resume(&self) -> Result<()> {
        {
            let mut session = self.shared.session.lock().unwrap();
            if session.state != NodeState::Paused {
                return Err(NodeError::invalid_transition(session.state, "resume"));
            }
            session.state = NodeState::Running;
            self.shared
                .events
                .emit(NodeEventKind::StateChanged(NodeState::Running));
            session.push_log(&self.shared.events, LogLevel::Info, "Node resumed");
        }

        self.signal(Control::Run);
        debug!("resume requested");
        Ok(())
    }

    /// Stops the run, abandoning any in-flight job without reward
    ///
    /// Earnings and log stay visible until the next start. Valid from
    /// Running or Paused.
    pub fn stop(&self) -> Result<()> {
        {
            let mut session = self.shared.session.lock().unwrap();
            if !session.state.is_active() {
                return Err(NodeError::invalid_transition(session.state, "stop"));
            }
            session.state = NodeState::Stopped;
            self.shared
                .events
                .emit(NodeEventKind::StateChanged(NodeState::Stopped));
            session.push_log(&self.shared.events, LogLevel::Info, "Node stopped");
        }

        self.signal(Control::Stop);
        info!("node stopped");
        Ok(())
    }

    /// Swaps the contributed device
    ///
    /// Only permitted while Idle or Stopped; the device is fixed for the
    /// duration of a run.
    pub fn set_device(&self, device: Device) -> Result<()> {
        let mut session = self.shared.session.lock().unwrap();
        if session.state.is_active() {
            return Err(NodeError::invalid_transition(session.state, "set device"));
        }
        debug!(device = %device.name, "device changed");
        session.device = device;
        Ok(())
    }

    fn signal(&self, control: Control) {
        if let Some(tx) = self.control.lock().unwrap().as_ref() {
            // Err means the loop already exited; nothing to observe it
            let _ = tx.send(control);
        }
    }
}
