//! Round controller: the Bubble Pop state machine.
//!
//! Pure and host-agnostic: every operation mutates the round and returns the
//! [`Effect`]s the host must carry out (timers, HUD updates, frame
//! scheduling). The frame tick and the countdown tick are two independent
//! event producers feeding the same machine; whichever observes an end
//! condition first ends the round, and [`RoundController::end`] is idempotent
//! so the other one cannot end it twice.

use rand::Rng;

use crate::canvas::{Surface, Viewport};

use super::scene;
use super::state::{BubbleField, EndReason, RoundConfig, RoundPhase};

/// Countdown period.
pub const COUNTDOWN_PERIOD_MS: f64 = 1000.0;

/// Something the host has to do in response to a state change.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    HideInstructions,
    HideScorePanel,
    /// Arm the round's 1-second countdown timer.
    StartCountdown,
    /// Cancel the countdown timer; it must not fire again.
    StopCountdown,
    /// Show the remaining seconds.
    ShowCountdown(u32),
    HideCountdown,
    /// Run one more frame tick on the next display refresh.
    ScheduleFrame,
    ReportFinalScore(u32),
    ShowScorePanel,
}

pub struct RoundController<R: Rng> {
    config: RoundConfig,
    rng: R,
    phase: RoundPhase,
    score: u32,
    remaining_secs: u32,
    field: BubbleField,
    countdown_armed: bool,
    end_reason: Option<EndReason>,
    rounds_played: u32,
}

impl<R: Rng> RoundController<R> {
    pub fn new(config: RoundConfig, rng: R) -> Self {
        let config = config.sanitized();
        Self {
            remaining_secs: config.duration_secs,
            config,
            rng,
            phase: RoundPhase::Idle,
            score: 0,
            field: BubbleField::new(),
            countdown_armed: false,
            end_reason: None,
            rounds_played: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn field(&self) -> &BubbleField {
        &self.field
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.phase == RoundPhase::Running
    }

    #[cfg(test)]
    pub fn field_mut(&mut self) -> &mut BubbleField {
        &mut self.field
    }

    /// Begin a round from `Idle` or `Ended`. Ignored while a round is running.
    pub fn start(&mut self, viewport: Viewport) -> Vec<Effect> {
        if self.phase == RoundPhase::Running {
            log::warn!("start ignored: round {} already running", self.rounds_played);
            return Vec::new();
        }
        self.begin_round(viewport)
    }

    /// Begin a fresh round from any state, cancelling the previous countdown first.
    pub fn restart(&mut self, viewport: Viewport) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.countdown_armed {
            self.countdown_armed = false;
            effects.push(Effect::StopCountdown);
        }
        effects.extend(self.begin_round(viewport));
        effects
    }

    fn begin_round(&mut self, viewport: Viewport) -> Vec<Effect> {
        self.score = 0;
        self.remaining_secs = self.config.duration_secs;
        self.end_reason = None;
        self.field.clear();
        self.field
            .create(self.config.bubble_count, viewport, self.config.spawn_depth, &mut self.rng);
        self.phase = RoundPhase::Running;
        self.countdown_armed = true;
        self.rounds_played += 1;

        log::info!(
            "round {} started: {} bubbles, {}s on a {}x{} viewport",
            self.rounds_played,
            self.field.len(),
            self.remaining_secs,
            viewport.width,
            viewport.height
        );

        vec![
            Effect::HideInstructions,
            Effect::HideScorePanel,
            Effect::HideCountdown,
            Effect::StartCountdown,
            Effect::ScheduleFrame,
        ]
    }

    /// One display refresh: move the bubbles, draw the frame, and either
    /// schedule the next one or end the round when the field is cleared.
    pub fn on_frame_tick<S: Surface>(&mut self, viewport: Viewport, surface: &mut S) -> Vec<Effect> {
        if self.phase != RoundPhase::Running {
            return Vec::new();
        }

        let recycled = self.field.tick(viewport, &mut self.rng);
        if recycled > 0 {
            log::debug!("recycled {} bubble(s)", recycled);
        }

        scene::draw_frame(surface, viewport, self.score, &self.field);

        if self.field.is_empty() {
            self.end(EndReason::FieldCleared)
        } else {
            vec![Effect::ScheduleFrame]
        }
    }

    /// One countdown period elapsed.
    pub fn on_countdown_tick(&mut self) -> Vec<Effect> {
        if self.phase != RoundPhase::Running {
            log::debug!("stray countdown tick in {:?}", self.phase);
            return Vec::new();
        }
        if self.remaining_secs == 0 {
            return self.end(EndReason::TimeUp);
        }
        let shown = self.remaining_secs;
        self.remaining_secs -= 1;
        vec![Effect::ShowCountdown(shown)]
    }

    /// Pointer click in viewport pixels. Returns the number of bubbles popped.
    pub fn on_click(&mut self, x: f64, y: f64) -> u32 {
        if self.phase != RoundPhase::Running {
            return 0;
        }
        let popped = self.field.hit_test(x, y) as u32;
        if popped > 0 {
            self.score = self.score.saturating_add(popped);
            log::debug!("popped {} at ({:.0}, {:.0}), score {}", popped, x, y, self.score);
        }
        popped
    }

    /// `Running → Ended`. A no-op in any other phase, so racing end
    /// conditions report the score only once.
    pub fn end(&mut self, reason: EndReason) -> Vec<Effect> {
        if self.phase != RoundPhase::Running {
            return Vec::new();
        }
        self.phase = RoundPhase::Ended;
        self.end_reason = Some(reason);
        self.countdown_armed = false;

        log::info!(
            "round {} ended ({:?}): score {}, {} bubble(s) left, {}s left",
            self.rounds_played,
            reason,
            self.score,
            self.field.len(),
            self.remaining_secs
        );

        vec![
            Effect::StopCountdown,
            Effect::HideCountdown,
            Effect::ReportFinalScore(self.score),
            Effect::ShowScorePanel,
        ]
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::canvas::DrawList;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[derive(Clone, Debug)]
    enum Op {
        Frame,
        Second,
        Click(f64, f64),
        Restart,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => Just(Op::Frame),
            1 => Just(Op::Second),
            4 => (0.0f64..320.0, 0.0f64..340.0).prop_map(|(x, y)| Op::Click(x, y)),
            1 => Just(Op::Restart),
        ]
    }

    proptest! {
        #[test]
        fn prop_score_monotonic_within_round(seed in any::<u64>(), ops in prop::collection::vec(arb_op(), 1..200)) {
            let vp = Viewport::new(320.0, 240.0);
            let mut rc = RoundController::new(RoundConfig::new(12, 5, 100.0), StdRng::seed_from_u64(seed));
            let mut frame = DrawList::new();
            rc.start(vp);
            let mut last = rc.score();
            for op in ops {
                match op {
                    Op::Frame => { rc.on_frame_tick(vp, &mut frame); }
                    Op::Second => { rc.on_countdown_tick(); }
                    Op::Click(x, y) => { rc.on_click(x, y); }
                    Op::Restart => {
                        rc.restart(vp);
                        prop_assert_eq!(rc.score(), 0);
                        last = 0;
                        continue;
                    }
                }
                prop_assert!(rc.score() >= last);
                last = rc.score();
            }
        }

        #[test]
        fn prop_ends_only_on_timeout_or_cleared(seed in any::<u64>(), ops in prop::collection::vec(arb_op(), 1..200)) {
            let vp = Viewport::new(320.0, 240.0);
            let mut rc = RoundController::new(RoundConfig::new(8, 4, 50.0), StdRng::seed_from_u64(seed));
            let mut frame = DrawList::new();
            rc.start(vp);
            for op in ops {
                let was_running = rc.is_running();
                match op {
                    Op::Frame => { rc.on_frame_tick(vp, &mut frame); }
                    Op::Second => { rc.on_countdown_tick(); }
                    Op::Click(x, y) => { rc.on_click(x, y); }
                    Op::Restart => { rc.restart(vp); }
                }
                if was_running && rc.phase() == RoundPhase::Ended {
                    match rc.end_reason() {
                        Some(EndReason::TimeUp) => prop_assert_eq!(rc.remaining_secs(), 0),
                        Some(EndReason::FieldCleared) => prop_assert!(rc.field().is_empty()),
                        None => prop_assert!(false, "ended without a reason"),
                    }
                }
                if rc.is_running() {
                    prop_assert!(rc.end_reason().is_none());
                }
            }
        }

        #[test]
        fn prop_final_score_reported_once_per_round(seed in any::<u64>(), ops in prop::collection::vec(arb_op(), 1..200)) {
            let vp = Viewport::new(320.0, 240.0);
            let mut rc = RoundController::new(RoundConfig::new(8, 4, 50.0), StdRng::seed_from_u64(seed));
            let mut frame = DrawList::new();
            rc.start(vp);
            let mut reports = 0;
            for op in ops {
                let effects = match op {
                    Op::Frame => rc.on_frame_tick(vp, &mut frame),
                    Op::Second => rc.on_countdown_tick(),
                    Op::Click(x, y) => { rc.on_click(x, y); Vec::new() }
                    Op::Restart => { reports = 0; rc.restart(vp) }
                };
                reports += effects.iter().filter(|e| matches!(e, Effect::ReportFinalScore(_))).count();
                prop_assert!(reports <= 1);
            }
        }
    }
}
