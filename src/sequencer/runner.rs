//! Timed event streaming for one training run
//!
//! A sequence is one tokio task: it emits `ready`, the mode's commands with
//! their pauses, then `halt` and `end`. Pauses are interrupted as soon as
//! the cancel flag flips or the event receiver goes away.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use uuid::Uuid;

use crate::commands::CommandPayload;
use crate::core::config::DrillSettings;
use crate::core::error::Result;
use crate::core::types::{CommandId, Difficulty};
use crate::library::DrillLibrary;
use crate::selection::post_command_delay;
use crate::sequencer::config::{tempo_interval, DurationConfig, IntervalConfig, ModeConfig};
use crate::sequencer::events::{DrillEvent, Phase, Progress};
use crate::sequencer::generate::{generate_combination, generate_fixed_pair};
use crate::sequencer::stream::PhraseStream;
use crate::sequencer::timeline::{SequencePhase, Timeline, TimelineTrigger};

/// Outcome of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceSummary {
    pub sequence_id: Uuid,
    pub mode: String,
    /// `command` events delivered (ready and halt not included)
    pub commands_emitted: usize,
    pub completed: bool,
}

/// Runs one mode configuration against a shared library
#[derive(Debug, Clone)]
pub struct Sequencer {
    library: Arc<DrillLibrary>,
    config: ModeConfig,
    settings: DrillSettings,
}

impl Sequencer {
    pub fn new(library: Arc<DrillLibrary>, config: ModeConfig) -> Self {
        Self {
            library,
            config,
            settings: DrillSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: DrillSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn config(&self) -> &ModeConfig {
        &self.config
    }

    /// Stream the whole sequence into `tx`.
    ///
    /// Unknown pair or pattern ids fail before anything is sent. Once
    /// `ready` has gone out the run always finishes with `halt` and `end`,
    /// whether it completed, was cancelled, or failed part way. A failure
    /// is reported with `end.completed = false` and then returned.
    pub async fn run<R: Rng + Send>(
        &self,
        tx: mpsc::Sender<DrillEvent>,
        cancel: watch::Receiver<bool>,
        mut rng: R,
    ) -> Result<SequenceSummary> {
        let fixed = self.fixed_commands()?;
        let sequence_id = Uuid::new_v4();
        let catalog = &self.library.catalog;

        tracing::info!(
            %sequence_id,
            weapon = %self.config.weapon(),
            "Sequence started: {} mode",
            self.config.name()
        );

        let mut emitter = Emitter::new(tx, cancel, sequence_id);
        let mut timeline = Timeline::new();

        emitter
            .send_final(DrillEvent::Ready { command: catalog.payload(CommandId::EnGarde)? })
            .await;
        let ready_pause = Duration::from_millis(self.settings.ready_pause_ms);
        if emitter.pause(ready_pause).await {
            timeline.advance(TimelineTrigger::ReadyDone);
        } else {
            timeline.advance(TimelineTrigger::Cancelled);
        }

        let mut outcome = Ok(());
        if timeline.phase() == SequencePhase::Running {
            outcome = match (&self.config, fixed) {
                (ModeConfig::FixedPair(c), Some(commands)) => {
                    self.run_fixed(&mut emitter, &commands, c.repetitions, c.tempo_bpm).await
                }
                (ModeConfig::Pattern(c), Some(commands)) => {
                    self.run_fixed(&mut emitter, &commands, c.repetitions, c.tempo_bpm).await
                }
                (ModeConfig::Duration(c), _) => self.run_duration(&mut emitter, c, &mut rng).await,
                (ModeConfig::Interval(c), _) => self.run_interval(&mut emitter, c, &mut rng).await,
                (_, None) => Ok(()),
            };
            if let Err(err) = &outcome {
                tracing::warn!(%sequence_id, "Sequence aborted: {}", err);
            }
            let trigger = if outcome.is_err() || emitter.is_cancelled() {
                TimelineTrigger::Cancelled
            } else {
                TimelineTrigger::ModeFinished
            };
            timeline.advance(trigger);
        }

        // Halt and end go out even when the mode failed; the error is returned after
        let completed = outcome.is_ok() && !emitter.is_cancelled();
        match catalog.payload(CommandId::Halte) {
            Ok(command) => {
                emitter.send_final(DrillEvent::Halt { command }).await;
            }
            Err(err) => {
                if outcome.is_ok() {
                    outcome = Err(err);
                }
            }
        }
        timeline.advance(TimelineTrigger::HaltSent);
        emitter.send_final(DrillEvent::End { completed }).await;
        outcome?;

        let summary = SequenceSummary {
            sequence_id,
            mode: self.config.name().to_string(),
            commands_emitted: emitter.commands_emitted,
            completed,
        };
        tracing::info!(
            %sequence_id,
            commands = summary.commands_emitted,
            "Sequence {}",
            if completed { "completed" } else { "cancelled" }
        );
        Ok(summary)
    }

    /// Exact command lists for the fixed modes, resolved up front so a bad
    /// id fails before `ready`.
    fn fixed_commands(&self) -> Result<Option<Vec<CommandId>>> {
        let tables = &self.library.tables;
        match &self.config {
            ModeConfig::FixedPair(c) => generate_fixed_pair(c, tables).map(Some),
            ModeConfig::Pattern(c) => generate_combination(c, tables).map(Some),
            ModeConfig::Duration(_) | ModeConfig::Interval(_) => Ok(None),
        }
    }

    async fn run_fixed(
        &self,
        emitter: &mut Emitter,
        commands: &[CommandId],
        repetitions: u32,
        tempo_bpm: u32,
    ) -> Result<()> {
        let interval = tempo_interval(tempo_bpm, self.config.weapon(), &self.library.weapons);
        let unit = (commands.len() / repetitions.max(1) as usize).max(1);

        for (i, &cmd) in commands.iter().enumerate() {
            if emitter.is_cancelled() {
                break;
            }
            let rep = (i / unit) as u32 + 1;
            let progress = Progress::repetition(rep, repetitions);
            if !emitter.command(self.library.catalog.payload(cmd)?, progress).await {
                break;
            }
            if !emitter.pause(interval).await {
                break;
            }
        }
        Ok(())
    }

    async fn run_duration<R: Rng + Send>(
        &self,
        emitter: &mut Emitter,
        config: &DurationConfig,
        rng: &mut R,
    ) -> Result<()> {
        let multiplier = self.library.weapons.profile_for(config.weapon).tempo_multiplier;
        let low = config.min_interval_ms.min(config.max_interval_ms);
        let high = config.min_interval_ms.max(config.max_interval_ms);
        let deadline = Instant::now() + Duration::from_secs(config.duration_seconds);

        let mut stream = PhraseStream::new(&self.library, config.difficulty, config.weapon)
            .with_settings(&self.settings);

        while Instant::now() < deadline && !emitter.is_cancelled() {
            let cmd = stream.next_command(rng)?;
            let remaining = deadline.saturating_duration_since(Instant::now());
            let progress = Progress::remaining(remaining.as_secs());
            if !emitter.command(self.library.catalog.payload(cmd)?, progress).await {
                break;
            }

            let base = rng.gen_range(low..=high) as f32 / 1000.0 / multiplier;
            let delay = Duration::from_secs_f32(post_command_delay(cmd, base));
            let until_deadline = deadline.saturating_duration_since(Instant::now());
            if !emitter.pause(delay.min(until_deadline)).await {
                break;
            }
        }
        Ok(())
    }

    async fn run_interval<R: Rng + Send>(
        &self,
        emitter: &mut Emitter,
        config: &IntervalConfig,
        rng: &mut R,
    ) -> Result<()> {
        let base = tempo_interval(config.tempo_bpm, config.weapon, &self.library.weapons);
        let mut stream = PhraseStream::new(&self.library, Difficulty::Intermediate, config.weapon)
            .with_settings(&self.settings);

        for set in 1..=config.sets {
            stream.reset();
            tracing::debug!(sequence_id = %emitter.sequence_id, "Work phase {}/{}", set, config.sets);
            let work_end = Instant::now() + Duration::from_secs(config.work_seconds);

            while Instant::now() < work_end && !emitter.is_cancelled() {
                let cmd = stream.next_command(rng)?;
                let remaining = work_end.saturating_duration_since(Instant::now());
                let progress = Progress::interval(set, config.sets, Phase::Work, remaining.as_secs());
                if !emitter.command(self.library.catalog.payload(cmd)?, progress).await {
                    break;
                }

                let delay = Duration::from_secs_f32(post_command_delay(cmd, base.as_secs_f32()));
                let until_end = work_end.saturating_duration_since(Instant::now());
                if !emitter.pause(delay.min(until_end)).await {
                    break;
                }
            }

            if emitter.is_cancelled() {
                break;
            }
            if set == config.sets || config.rest_seconds == 0 {
                continue;
            }

            if !emitter
                .send(DrillEvent::Rest {
                    set,
                    total_sets: config.sets,
                    seconds: config.rest_seconds,
                })
                .await
            {
                break;
            }
            for remaining in (1..=config.rest_seconds).rev() {
                let progress = Progress::interval(set, config.sets, Phase::Rest, remaining);
                if !emitter.send(DrillEvent::Countdown { remaining, progress }).await {
                    break;
                }
                if !emitter.pause(Duration::from_secs(1)).await {
                    break;
                }
            }
        }
        Ok(())
    }
}

/// Ordered event delivery plus cancellation-aware waiting
struct Emitter {
    tx: mpsc::Sender<DrillEvent>,
    cancel: watch::Receiver<bool>,
    sequence_id: Uuid,
    cancelled: bool,
    commands_emitted: usize,
}

impl Emitter {
    fn new(tx: mpsc::Sender<DrillEvent>, cancel: watch::Receiver<bool>, sequence_id: Uuid) -> Self {
        Self {
            tx,
            cancel,
            sequence_id,
            cancelled: false,
            commands_emitted: 0,
        }
    }

    fn is_cancelled(&mut self) -> bool {
        if !self.cancelled && (*self.cancel.borrow() || self.tx.is_closed()) {
            tracing::debug!(sequence_id = %self.sequence_id, "Cancellation observed");
            self.cancelled = true;
        }
        self.cancelled
    }

    /// Send unless cancelled. `false` means the run should stop.
    async fn send(&mut self, event: DrillEvent) -> bool {
        if self.is_cancelled() {
            return false;
        }
        self.deliver(event).await
    }

    /// Send regardless of cancellation (ready, halt and end)
    async fn send_final(&mut self, event: DrillEvent) -> bool {
        self.deliver(event).await
    }

    async fn deliver(&mut self, event: DrillEvent) -> bool {
        let name = event.name();
        if self.tx.send(event).await.is_err() {
            tracing::debug!(sequence_id = %self.sequence_id, "Receiver closed before {}", name);
            self.cancelled = true;
            return false;
        }
        true
    }

    async fn command(&mut self, command: CommandPayload, progress: Progress) -> bool {
        let id = command.id;
        let sent = self.send(DrillEvent::Command { command, progress }).await;
        if sent {
            self.commands_emitted += 1;
            tracing::debug!(sequence_id = %self.sequence_id, "Command {}", id);
        }
        sent
    }

    /// Wait for `duration`. `false` if cancelled first.
    async fn pause(&mut self, duration: Duration) -> bool {
        if self.is_cancelled() {
            return false;
        }
        let sleep = tokio::time::sleep(duration);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                _ = &mut sleep => return true,
                _ = self.tx.closed() => {
                    self.cancelled = true;
                    return false;
                }
                changed = self.cancel.changed() => match changed {
                    Ok(()) if *self.cancel.borrow() => {
                        self.cancelled = true;
                        return false;
                    }
                    Ok(()) => {}
                    // Cancel handle dropped: nobody can cancel any more
                    Err(_) => {
                        sleep.as_mut().await;
                        return true;
                    }
                },
            }
        }
    }
}
