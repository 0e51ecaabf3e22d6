//! The application state object.
//!
//! `App` owns everything that lives longer than a single screen: the
//! current round, the garden, the stats, the settings, the timer queue
//! and the host services. Views read it through [`App::snapshot`] and
//! change it only through the `on_*` handlers and [`App::advance`].

use std::time::Duration;

use chrono::Utc;
use log::{debug, error, info};
use serde::Serialize;

use super::event::GameEvent;
use crate::cards::{CardId, CATALOG};
use crate::core::{Difficulty, Fired, GameConfig, GameRng, Scheduler};
use crate::error::GameError;
use crate::garden::{Garden, GardenItem, GrowthStage, PlantOutcome, PlantingPolicy, Position};
use crate::rules::{ClockTick, IgnoreReason, PressOutcome, Resolution, Session};
use crate::services::audio::play_cue;
use crate::services::{
    AudioService, GameStats, KeyValueStore, ProgressStore, Setting, Settings, SoundCue,
};

// Every built-in difficulty must fit the catalog.
const _: () = {
    let mut i = 0;
    while i < Difficulty::ALL.len() {
        assert!(
            Difficulty::ALL[i].profile().pairs <= CATALOG.len(),
            "difficulty needs more pairs than the catalog holds"
        );
        i += 1;
    }
};

/// Delayed work. Round and garden generations make stale tasks inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerEvent {
    ClockTick { round: u64 },
    ResolvePair { round: u64 },
    Grow { garden: u64, plot_index: usize, stage: GrowthStage },
}

impl TimerEvent {
    fn is_round_task(&self) -> bool {
        matches!(self, TimerEvent::ClockTick { .. } | TimerEvent::ResolvePair { .. })
    }
}

/// Read-only view for the presentation layer.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub difficulty: Difficulty,
    pub session: Option<Session>,
    pub garden: Garden,
    pub stats: GameStats,
    pub settings: Settings,
    /// Wall-clock milliseconds as the core sees them.
    pub now_ms: i64,
}

/// Application state.
pub struct App<S, A> {
    config: GameConfig,
    deck_rng: GameRng,
    garden_rng: GameRng,
    timers: Scheduler<TimerEvent>,
    epoch_ms: i64,

    difficulty: Difficulty,
    session: Option<Session>,
    round: u64,

    garden: Garden,
    garden_generation: u64,
    stats: GameStats,
    settings: Settings,

    progress: ProgressStore<S>,
    audio: A,
    events: Vec<GameEvent>,
}

impl<S: KeyValueStore, A: AudioService> App<S, A> {
    /// Restore persisted progress from `store` and get ready to play.
    ///
    /// Missing or unreadable data falls back to defaults. A garden is
    /// created (and its hazards rolled) only when none is stored.
    pub fn load(config: GameConfig, store: S, audio: A) -> Self {
        let root = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let mut garden_rng = root.for_context("garden");
        let epoch_ms = config.epoch_ms.unwrap_or_else(|| Utc::now().timestamp_millis());

        let mut progress = ProgressStore::new(store);
        let stats = progress.load_stats();
        let settings = progress.load_settings();
        let garden = match progress.load_garden(config.plot_count) {
            Some(garden) => garden,
            None => {
                let garden = Garden::new(config.plot_count, config.hazard_probability, &mut garden_rng);
                progress.save_garden(&garden);
                garden
            }
        };

        info!(
            "loaded: best score {}, {} matches, {} seeds in inventory, seed {}",
            stats.best_score,
            stats.total_matches,
            garden.inventory().len(),
            root.seed()
        );

        let mut app = Self {
            deck_rng: root.for_context("deck"),
            garden_rng,
            timers: Scheduler::new(),
            epoch_ms,
            difficulty: Difficulty::default(),
            session: None,
            round: 0,
            garden,
            garden_generation: 0,
            stats,
            settings,
            progress,
            audio,
            events: Vec::new(),
            config,
        };
        app.resume_growth();
        app
    }

    /// Bring restored plants up to date and schedule the rest of their
    /// growth.
    fn resume_growth(&mut self) {
        let now = self.now_ms();
        let span = self.config.growth_span_ms;

        if !self.garden.catch_up_growth(now, span).is_empty() {
            self.progress.save_garden(&self.garden);
        }
        for (plot_index, stage, delay) in self.garden.upcoming_growth(now, span) {
            let garden = self.garden_generation;
            self.timers.schedule(TimerEvent::Grow { garden, plot_index, stage }, delay);
        }
    }

    // === Queries ===

    /// Wall-clock milliseconds: the epoch plus elapsed virtual time.
    #[must_use]
    pub fn now_ms(&self) -> i64 {
        self.epoch_ms.saturating_add(i64::try_from(self.timers.now_ms()).unwrap_or(i64::MAX))
    }

    /// The configuration this app was loaded with.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Difficulty of the current or most recent round.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// The current round, if one has been dealt.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The garden as it stands.
    #[must_use]
    pub fn garden(&self) -> &Garden {
        &self.garden
    }

    /// Progress across rounds.
    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Current preferences.
    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// The audio service.
    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        self.progress.inner()
    }

    /// Number of timers waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Give the store back, e.g. to simulate a restart.
    pub fn into_store(self) -> S {
        self.progress.into_inner()
    }

    /// A copy of everything the views show. Cheap: garden data is shared.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            difficulty: self.difficulty,
            session: self.session.clone(),
            garden: self.garden.clone(),
            stats: self.stats.clone(),
            settings: self.settings,
            now_ms: self.now_ms(),
        }
    }

    /// Take the events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Handlers ===

    /// Deal a new round, discarding the current one and its timers.
    pub fn on_new_game(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        self.timers.cancel_where(TimerEvent::is_round_task);

        let profile = difficulty.profile();
        let session = Session::new(profile, &mut self.deck_rng).map_err(|err| {
            error!("cannot start {difficulty} round: {err}");
            err
        })?;

        self.round += 1;
        self.difficulty = difficulty;
        self.session = Some(session);

        info!("round {} started on {difficulty}", self.round);
        self.events.push(GameEvent::RoundStarted {
            difficulty,
            pairs: profile.pairs,
            time_limit_seconds: profile.time_limit_seconds,
        });
        Ok(())
    }

    /// The player tapped card `card_id`.
    pub fn on_card_press(&mut self, card_id: CardId) -> PressOutcome {
        let Some(session) = self.session.as_mut() else {
            return PressOutcome::Ignored(IgnoreReason::RoundOver);
        };

        let outcome = session.press(card_id);
        let round = self.round;
        match outcome {
            PressOutcome::Ignored(_) => return outcome,
            PressOutcome::Flipped { card, started_clock } => {
                self.events.push(GameEvent::CardFlipped { card });
                if started_clock {
                    self.timers.schedule(TimerEvent::ClockTick { round }, self.config.tick_interval_ms);
                }
            }
            PressOutcome::PairSelected { second, .. } => {
                self.events.push(GameEvent::CardFlipped { card: second });
                self.timers.schedule(TimerEvent::ResolvePair { round }, self.config.resolution_delay_ms);
            }
        }
        self.cue(SoundCue::Flip);
        outcome
    }

    /// The player tapped plot `plot_id`. Uses the inventory policy's
    /// default choice of item.
    pub fn on_plant_request(&mut self, plot_id: &str) -> PlantOutcome {
        self.plant(plot_id, None)
    }

    /// The player dragged item `item_id` onto plot `plot_id`.
    ///
    /// Under `InventoryPolicy::Fifo` the oldest item is planted anyway.
    pub fn on_plant_item(&mut self, plot_id: &str, item_id: &str) -> PlantOutcome {
        self.plant(plot_id, Some(item_id))
    }

    /// Flip a setting and persist it. Returns the new value.
    pub fn on_toggle_setting(&mut self, setting: Setting) -> bool {
        let enabled = self.settings.toggle(setting);
        self.progress.save_setting(setting, enabled);
        self.events.push(GameEvent::SettingChanged { setting, enabled });
        enabled
    }

    /// Wipe stats and garden, in storage and in memory.
    ///
    /// The current round keeps going. The replacement garden gets fresh
    /// hazards and is stored right away.
    pub fn on_reset_data(&mut self) {
        self.progress.reset();

        let cancelled = self.timers.cancel_where(|task| matches!(task, TimerEvent::Grow { .. }));
        debug!("reset cancelled {cancelled} growth timers");

        self.stats = GameStats::default();
        self.garden_generation += 1;
        self.garden = Garden::new(
            self.config.plot_count,
            self.config.hazard_probability,
            &mut self.garden_rng,
        );
        self.progress.save_garden(&self.garden);
        self.events.push(GameEvent::DataReset);
    }

    /// Let `elapsed` pass, firing due timers one at a time.
    pub fn advance(&mut self, elapsed: Duration) {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let deadline = self.timers.now_ms().saturating_add(elapsed_ms);

        while let Some(fired) = self.timers.pop_due(deadline) {
            self.dispatch(fired);
        }
        self.timers.advance_to(deadline);
    }

    // === Internals ===

    fn dispatch(&mut self, fired: Fired<TimerEvent>) {
        debug!("timer {} fired at {}ms: {:?}", fired.id, fired.due_ms, fired.key);
        match fired.key {
            TimerEvent::ClockTick { round } if round == self.round => self.tick_clock(),
            TimerEvent::ResolvePair { round } if round == self.round => self.resolve_pair(),
            TimerEvent::Grow { garden, plot_index, stage } if garden == self.garden_generation => {
                if self.garden.set_growth_stage(plot_index, stage) {
                    self.events.push(GameEvent::GrowthAdvanced { plot_index, stage });
                    self.progress.save_garden(&self.garden);
                }
            }
            stale => debug!("dropping stale timer {stale:?}"),
        }
    }

    fn tick_clock(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.tick() {
            ClockTick::Idle => {}
            ClockTick::Running(time_remaining) => {
                self.events.push(GameEvent::ClockTicked { time_remaining });
                let round = self.round;
                self.timers.schedule(TimerEvent::ClockTick { round }, self.config.tick_interval_ms);
            }
            ClockTick::Expired => {
                self.events.push(GameEvent::ClockTicked { time_remaining: 0 });
                self.finish_round();
            }
        }
    }

    fn resolve_pair(&mut self) {
        let Some(resolution) = self.session.as_mut().and_then(Session::resolve) else {
            return;
        };

        match resolution {
            Resolution::Match { first, second, kind, emoji, won, .. } => {
                self.cue(SoundCue::Match);

                let item = GardenItem::new(self.next_item_id(), kind, emoji);
                self.garden.add_item(item.clone());
                self.stats.record_match(item.clone());
                self.progress.save_garden(&self.garden);
                self.progress.save_stats(&self.stats);

                self.events.push(GameEvent::PairMatched { first, second, item });
                if won {
                    self.finish_round();
                }
            }
            Resolution::Mismatch { first, second } => {
                self.cue(SoundCue::Fail);
                self.events.push(GameEvent::PairMismatched { first, second });
            }
        }
    }

    /// Unique and time-derived: the wall clock plus the number of matches
    /// so far. Discarded items never free up a number.
    fn next_item_id(&self) -> String {
        format!("{}-{}", self.now_ms(), self.stats.total_matches)
    }

    fn finish_round(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let score = session.score();
        let won = session.is_won();

        self.timers.cancel_where(TimerEvent::is_round_task);
        let new_best = self.stats.record_round(score);
        self.progress.save_stats(&self.stats);

        info!("round {} over: won {won}, score {score}, new best {new_best}", self.round);
        self.events.push(GameEvent::RoundOver { won, score, new_best });
    }

    fn plant(&mut self, plot_id: &str, requested: Option<&str>) -> PlantOutcome {
        let policy = PlantingPolicy::from(&self.config);
        let outcome = self.garden.plant_seed(plot_id, requested, self.now_ms(), policy);

        match &outcome {
            PlantOutcome::Planted { plot_index, item } => {
                let plot_index = *plot_index;
                let position = Position::of_plot(plot_index, self.config.grid_columns);
                self.stats.mark_planted(&item.id, position);

                let garden = self.garden_generation;
                for stage in GrowthStage::Seedling.later() {
                    let delay = stage.starts_after(self.config.growth_span_ms);
                    self.timers.schedule(TimerEvent::Grow { garden, plot_index, stage }, delay);
                }

                self.progress.save_garden(&self.garden);
                self.progress.save_stats(&self.stats);
                self.events.push(GameEvent::SeedPlanted { plot_index, item: item.clone() });
            }
            PlantOutcome::Destroyed { plot_index, item, hazard } => {
                self.stats.discard(&item.id);
                self.progress.save_garden(&self.garden);
                self.progress.save_stats(&self.stats);
                self.events.push(GameEvent::SeedDestroyed {
                    plot_index: *plot_index,
                    item: item.clone(),
                    hazard: *hazard,
                });
            }
            PlantOutcome::Ignored(reason) => debug!("plant on {plot_id} ignored: {reason:?}"),
        }
        outcome
    }

    fn cue(&mut self, cue: SoundCue) {
        if self.settings.sound_enabled {
            play_cue(&mut self.audio, cue);
        }
    }
}
