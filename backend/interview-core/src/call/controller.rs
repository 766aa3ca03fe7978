//! Call controller actor.
//!
//! # Architecture
//!
//! One task owns the [`CallMachine`], the camera and the outbound
//! collaborators. It consumes:
//! - voice SDK events from an `mpsc::Receiver<CallEvent>`
//! - a one-second interval driving the interview and coding clocks
//! - the scheduled coding round deadline
//! - commands from [`CallHandle`]s
//!
//! After every input the machine's snapshot is published into an
//! `Arc<RwLock<CallSnapshot>>`, so reads never wait on the actor.

use crate::call::camera::{Camera, MediaDevices};
use crate::call::machine::{CallEffect, CallMachine};
use crate::call::store::SessionStore;
use crate::call::voice::VoiceClient;
use crate::error::call::CallError;

use common::ErrorLocation;
use models::{
    CallEvent, CallPhase, CallRegistrationRequest, CallSnapshot, Candidate, InterviewSettings,
    NewResponse,
};

use std::panic::Location;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use log::{debug, error, info, warn};
use regex::Regex;
use tokio::sync::{RwLock, mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};

const TICK: Duration = Duration::from_secs(1);
const COMMAND_CHANNEL_CAPACITY: usize = 32;
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("valid regex pattern"))
}

#[derive(Debug)]
enum CallCommand {
    Start(Candidate),
    EndCall,
    OpenEditor,
    CloseEditor,
    EndCodingRound,
    StartCamera,
    StopCamera,
    RecordTabSwitch,
}

struct Envelope {
    command: CallCommand,
    reply: oneshot::Sender<Result<CallSnapshot, CallError>>,
}

/// UI-side handle to a running controller.
///
/// `Clone`; every clone talks to the same actor. Each action resolves once
/// the actor has applied it and returns the snapshot it produced.
#[derive(Clone)]
pub struct CallHandle {
    command_tx: mpsc::Sender<Envelope>,
    snapshot: Arc<RwLock<CallSnapshot>>,
}

impl CallHandle {
    /// Checks eligibility, registers the call and starts it.
    pub async fn start(&self, candidate: Candidate) -> Result<CallSnapshot, CallError> {
        self.send(CallCommand::Start(candidate)).await
    }

    pub async fn end_call(&self) -> Result<CallSnapshot, CallError> {
        self.send(CallCommand::EndCall).await
    }

    pub async fn open_editor(&self) -> Result<CallSnapshot, CallError> {
        self.send(CallCommand::OpenEditor).await
    }

    pub async fn close_editor(&self) -> Result<CallSnapshot, CallError> {
        self.send(CallCommand::CloseEditor).await
    }

    pub async fn end_coding_round(&self) -> Result<CallSnapshot, CallError> {
        self.send(CallCommand::EndCodingRound).await
    }

    pub async fn start_camera(&self) -> Result<CallSnapshot, CallError> {
        self.send(CallCommand::StartCamera).await
    }

    pub async fn stop_camera(&self) -> Result<CallSnapshot, CallError> {
        self.send(CallCommand::StopCamera).await
    }

    pub async fn record_tab_switch(&self) -> Result<CallSnapshot, CallError> {
        self.send(CallCommand::RecordTabSwitch).await
    }

    /// Latest published snapshot.
    pub async fn snapshot(&self) -> CallSnapshot {
        self.snapshot.read().await.clone()
    }

    async fn send(&self, command: CallCommand) -> Result<CallSnapshot, CallError> {
        let (reply, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Envelope { command, reply })
            .await
            .map_err(|e| CallError::Controller {
                message: format!("Call controller stopped: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        reply_rx.await.map_err(|e| CallError::Controller {
            message: format!("Call controller dropped reply: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?
    }
}

pub struct CallController {
    settings: InterviewSettings,
    machine: CallMachine,
    voice: Arc<dyn VoiceClient>,
    store: Arc<dyn SessionStore>,
    camera: Camera,
    coding_round_at: Option<Instant>,
    snapshot: Arc<RwLock<CallSnapshot>>,
}

impl CallController {
    /// Spawns the actor and returns its handle.
    ///
    /// The actor stops once every [`CallHandle`] is dropped.
    pub fn spawn(
        settings: InterviewSettings,
        voice: Arc<dyn VoiceClient>,
        store: Arc<dyn SessionStore>,
        devices: Arc<dyn MediaDevices>,
        events: mpsc::Receiver<CallEvent>,
    ) -> CallHandle {
        let machine = CallMachine::new(&settings);
        let snapshot = Arc::new(RwLock::new(machine.snapshot().clone()));
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);

        let controller = CallController {
            settings,
            machine,
            voice,
            store,
            camera: Camera::new(devices),
            coding_round_at: None,
            snapshot: Arc::clone(&snapshot),
        };

        tokio::spawn(controller.run(command_rx, events));
        info!("Call controller spawned");

        CallHandle {
            command_tx,
            snapshot,
        }
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Envelope>,
        mut events: mpsc::Receiver<CallEvent>,
    ) {
        info!("Call controller started for interview {}", self.settings.id);

        let mut ticker = tokio::time::interval_at(Instant::now() + TICK, TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut events_open = true;

        loop {
            tokio::select! {
                envelope = commands.recv() => {
                    let Some(Envelope { command, reply }) = envelope else {
                        break;
                    };
                    let result = self.handle_command(command).await;
                    self.publish().await;
                    let outcome = match result {
                        Ok(()) => Ok(self.machine.snapshot().clone()),
                        Err(e) => Err(e),
                    };
                    if reply.send(outcome).is_err() {
                        debug!("Call handle went away before the reply");
                    }
                }
                event = events.recv(), if events_open => {
                    match event {
                        Some(event) => {
                            let effects = self.machine.handle_event(event);
                            self.apply(effects).await;
                        }
                        None => {
                            debug!("Voice event channel closed");
                            events_open = false;
                        }
                    }
                    self.publish().await;
                }
                _ = ticker.tick() => {
                    let effects = self.machine.tick();
                    self.apply(effects).await;
                    self.publish().await;
                }
                _ = wait_until(self.coding_round_at) => {
                    self.coding_round_at = None;
                    self.machine.open_coding_round();
                    self.publish().await;
                }
            }
        }

        self.camera.stop();
        info!("Call controller stopped");
    }

    async fn handle_command(&mut self, command: CallCommand) -> Result<(), CallError> {
        match command {
            CallCommand::Start(candidate) => self.start(candidate).await?,
            CallCommand::EndCall => {
                let effects = self.machine.end_call();
                self.apply(effects).await;
            }
            CallCommand::OpenEditor => self.machine.open_editor(),
            CallCommand::CloseEditor => self.machine.close_editor(),
            CallCommand::EndCodingRound => {
                let effects = self.machine.end_coding_round();
                self.apply(effects).await;
            }
            CallCommand::StartCamera => {
                let started = self.camera.start().await;
                self.machine.set_camera_on(self.camera.is_on());
                started?;
            }
            CallCommand::StopCamera => {
                self.camera.stop();
                self.machine.set_camera_on(false);
            }
            CallCommand::RecordTabSwitch => self.machine.record_tab_switch(),
        }
        Ok(())
    }

    async fn start(&mut self, candidate: Candidate) -> Result<(), CallError> {
        if self.machine.phase() != CallPhase::Idle {
            warn!("Start requested in phase {:?}", self.machine.phase());
            return Ok(());
        }

        if !self.settings.is_anonymous {
            validate_candidate(&candidate)?;
        }

        let emails = self.store.respondent_emails(&self.settings.id).await?;
        let already_responded = emails.iter().any(|email| *email == candidate.email);
        let not_invited = self
            .settings
            .respondents
            .as_ref()
            .is_some_and(|allowed| !allowed.contains(&candidate.email));

        if already_responded || not_invited {
            info!("Candidate is not eligible for interview {}", self.settings.id);
            self.machine.mark_ineligible();
            return Ok(());
        }

        let request = CallRegistrationRequest::new(&self.settings, &candidate);
        let registration = self.store.register_call(&request).await?;

        if registration.access_token.is_empty() {
            warn!("Failed to register call: empty access token");
            return Ok(());
        }

        if let Err(e) = self.voice.start_call(&registration.access_token).await {
            error!("Failed to start voice call: {e}");
        }

        self.machine.mark_started(registration.call_id.clone());
        self.publish().await;
        info!("Call {} started", registration.call_id);

        let response = NewResponse {
            interview_id: self.settings.id.clone(),
            call_id: registration.call_id,
            email: candidate.email,
            name: candidate.name,
        };
        if let Err(e) = self.store.create_response(&response).await {
            error!("Failed to create response record: {e}");
        }

        match self.camera.start().await {
            Ok(()) => self.machine.set_camera_on(true),
            Err(e) => warn!("Unable to access camera: {e}"),
        }

        Ok(())
    }

    async fn apply(&mut self, effects: Vec<CallEffect>) {
        for effect in effects {
            match effect {
                CallEffect::StopVoiceCall => {
                    if let Err(e) = self.voice.stop_call().await {
                        warn!("Failed to stop voice call: {e}");
                    }
                }
                CallEffect::ScheduleCodingRound(delay) => {
                    debug!("Coding round opens in {delay:?}");
                    self.coding_round_at = Some(Instant::now() + delay);
                }
                CallEffect::PersistCompletion {
                    call_id,
                    completion,
                } => {
                    if let Err(e) = self.store.save_completion(&completion, &call_id).await {
                        error!("Failed to save completion for call {call_id}: {e}");
                    } else {
                        info!(
                            "Saved completion for call {call_id} ({} tab switches)",
                            completion.tab_switch_count
                        );
                    }
                }
            }
        }
    }

    async fn publish(&self) {
        *self.snapshot.write().await = self.machine.snapshot().clone();
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[track_caller]
pub(crate) fn validate_candidate(candidate: &Candidate) -> Result<(), CallError> {
    if candidate.name.trim().is_empty() {
        return Err(CallError::Candidate {
            message: String::from("Name is required"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if !email_regex().is_match(&candidate.email) {
        return Err(CallError::Candidate {
            message: format!("Invalid email: {}", candidate.email),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(())
}
