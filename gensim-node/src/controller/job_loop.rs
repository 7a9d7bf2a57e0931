//! Job loop
//!
//! One cooperative task per run. Each iteration checks the control flag,
//! pays out a finished job, picks a new one if needed, runs exactly one
//! trainer step, and sleeps the pacing delay. Stop and pause are observed at
//! every await: the in-flight step, the pacing sleep, and the paused wait.

use std::sync::Arc;

use rand::rngs::StdRng;
use tokio::sync::watch;
use tracing::{debug, warn};

use gensim_core::domain::{Device, LogLevel, NodeEventKind, NodeState, RunningJob};
use gensim_core::{catalog, reward};

use crate::config::NodeConfig;
use crate::controller::{Control, Session, Shared};
use crate::error::{NodeError, StepError};
use crate::events::EventBus;
use crate::trainer::Trainer;

/// Outcome of racing one trainer step against the control channel
enum StepOutcome {
    Applied { complete: bool },
    Failed(StepError),
    /// Stop observed; the in-flight result, if any, was discarded
    Interrupted,
}

/// The per-run job loop task
pub(crate) struct JobLoop {
    shared: Arc<Shared>,
    control: watch::Receiver<Control>,
    config: NodeConfig,
    device: Device,
    generation: u64,
    trainer: Arc<tokio::sync::Mutex<Box<dyn Trainer>>>,
    rng: StdRng,
}

impl JobLoop {
    pub fn new(
        shared: Arc<Shared>,
        control: watch::Receiver<Control>,
        config: NodeConfig,
        device: Device,
        generation: u64,
        trainer: Arc<tokio::sync::Mutex<Box<dyn Trainer>>>,
        rng: StdRng,
    ) -> Self {
        Self {
            shared,
            control,
            config,
            device,
            generation,
            trainer,
            rng,
        }
    }

    /// Runs until stop is observed or the controller goes away
    pub async fn run(mut self) {
        debug!(generation = self.generation, "job loop started");

        // Held for the whole run; a later run waits here until this loop exits
        let trainer = Arc::clone(&self.trainer);
        let mut trainer = trainer.lock().await;

        loop {
            let control = *self.control.borrow_and_update();
            match control {
                Control::Stop => break,
                Control::Pause => {
                    // Suspend until the flag changes; no busy work
                    if self.control.changed().await.is_err() {
                        break;
                    }
                    continue;
                }
                Control::Run => {}
            }

            // A job whose last step landed just before a pause pays out here,
            // once the node is running again
            if self.current_job_complete() {
                if self.complete_job() {
                    trainer.reset();
                    continue;
                }
                // Completion raced into Paused/Stopped; wait for the flag
                if self.control.changed().await.is_err() {
                    break;
                }
                continue;
            }

            if !self.has_job() {
                self.start_job();
                continue;
            }

            match self.run_step(trainer.as_mut()).await {
                StepOutcome::Interrupted => continue,
                StepOutcome::Failed(err) => {
                    self.fail_job(err);
                    trainer.reset();
                    continue;
                }
                StepOutcome::Applied { complete } => {
                    if complete {
                        // Skip the pacing delay so payout is immediate
                        continue;
                    }
                }
            }

            self.pacing_delay().await;
        }

        // Stop tears the in-flight job down without reward
        let abandoned = self
            .with_session(|session, events| {
                if session.current_job.take().is_some() {
                    session.push_log(events, LogLevel::Info, "Job abandoned – no reward");
                    true
                } else {
                    false
                }
            })
            .unwrap_or(false);
        if abandoned {
            trainer.reset();
        }

        debug!(generation = self.generation, "job loop exited");
    }

    /// Locks the session and applies `f`, unless this loop's run is stale
    fn with_session<T>(&self, f: impl FnOnce(&mut Session, &EventBus) -> T) -> Option<T> {
        let mut session = self.shared.session.lock().unwrap();
        if session.generation != self.generation {
            return None;
        }
        Some(f(&mut session, &self.shared.events))
    }

    fn has_job(&self) -> bool {
        self.with_session(|session, _| session.current_job.is_some())
            .unwrap_or(false)
    }

    fn current_job_complete(&self) -> bool {
        self.with_session(|session, _| {
            session
                .current_job
                .as_ref()
                .map(RunningJob::is_complete)
                .unwrap_or(false)
        })
        .unwrap_or(false)
    }

    /// Selects a fresh job from the catalog
    fn start_job(&mut self) {
        let template = catalog::pick_job(&mut self.rng);
        debug!(job = %template.name, "job selected");

        let steps = self.config.steps_per_job;
        self.with_session(|session, events| {
            session.push_log(events, LogLevel::Info, format!("Found job: {}", template.name));
            session.push_log(events, LogLevel::Info, "Bidding...");
            session.push_log(events, LogLevel::Info, "Bid won!");
            events.emit(NodeEventKind::JobStarted {
                name: template.name.clone(),
            });
            events.emit(NodeEventKind::Progress { percent: 0.0 });
            session.current_job = Some(RunningJob::new(template.clone(), steps));
        });
    }

    /// Runs one trainer step, racing it against control changes
    ///
    /// A pause observed mid-step lets the in-flight step finish and apply;
    /// the next step is then gated at the top of the loop. A stop discards
    /// the in-flight result entirely.
    async fn run_step(&mut self, trainer: &mut dyn Trainer) -> StepOutcome {
        let Some(step_index) = self.with_session(|session, _| {
            session
                .current_job
                .as_ref()
                .map(|job| job.completed_steps + 1)
        })
        .flatten() else {
            return StepOutcome::Interrupted;
        };

        let mut step = trainer.step(step_index);
        let result = loop {
            tokio::select! {
                result = &mut step => break Some(result),
                changed = self.control.changed() => {
                    if changed.is_err() || *self.control.borrow() == Control::Stop {
                        break None;
                    }
                    // Paused: keep waiting for the step already in flight
                }
            }
        };

        match result {
            None => StepOutcome::Interrupted,
            Some(Err(err)) => StepOutcome::Failed(err),
            Some(Ok(metric)) => self
                .with_session(|session, events| {
                    let Some(job) = session.current_job.as_mut() else {
                        return StepOutcome::Interrupted;
                    };
                    job.completed_steps += 1;
                    let percent = job.progress_percent();
                    let line = format!(
                        "Epoch {}/{} – loss: {:.2}",
                        job.completed_steps, job.total_steps, metric
                    );
                    let complete = job.is_complete();
                    session.push_log(events, LogLevel::Info, line);
                    events.emit(NodeEventKind::Progress { percent });
                    StepOutcome::Applied { complete }
                })
                .unwrap_or(StepOutcome::Interrupted),
        }
    }

    /// Pays out the completed job if the node is still Running
    ///
    /// Returns false when the session has raced into Paused/Stopped since the
    /// control flag was read; payout then waits for the next Running pass.
    fn complete_job(&self) -> bool {
        let paid = self
            .with_session(|session, events| {
                if session.state != NodeState::Running {
                    return false;
                }
                let Some(job) = session.current_job.take() else {
                    return false;
                };

                let payout = reward::reward(&job.template, &self.device);
                session.cumulative_earnings =
                    reward::round2(session.cumulative_earnings + payout);

                session.push_log(
                    events,
                    LogLevel::Info,
                    format!("Proof verified! Earned +{payout:.2} $SY"),
                );
                events.emit(NodeEventKind::JobCompleted { reward: payout });
                events.emit(NodeEventKind::EarningsChanged {
                    total: session.cumulative_earnings,
                });

                session.celebrating = true;
                events.emit(NodeEventKind::Celebrate);

                session.push_log(events, LogLevel::Info, "Node idle – waiting for next job");
                true
            })
            .unwrap_or(false);

        if paid {
            self.spawn_celebrate_timer();
        }
        paid
    }

    /// Logs the failure and abandons the current job; the run continues
    fn fail_job(&self, err: StepError) {
        warn!(error = %err, "training step failed");
        let err = NodeError::StepFailed(err);
        self.with_session(|session, events| {
            session.push_log(
                events,
                LogLevel::Error,
                format!("{err} – job abandoned, no reward"),
            );
            session.current_job = None;
            events.emit(NodeEventKind::Progress { percent: 0.0 });
        });
    }

    /// Inter-step delay, shorter on faster devices, cancellable by control
    async fn pacing_delay(&mut self) {
        let delay = self.config.base_step_delay.div_f64(self.device.relative_speed);
        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            _ = self.control.changed() => {}
        }
    }

    /// Clears the celebration after a fixed window, whatever the node state
    fn spawn_celebrate_timer(&self) {
        let shared = Arc::clone(&self.shared);
        let generation = self.generation;
        let duration = self.config.celebrate_duration;

        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut session = shared.session.lock().unwrap();
            if session.generation != generation || !session.celebrating {
                return;
            }
            session.celebrating = false;
            shared.events.emit(NodeEventKind::CelebrateEnded);
        });
    }
}
