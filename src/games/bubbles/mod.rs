/// Bubble Pop: pop rising bubbles before the countdown runs out.

pub mod actions;
pub mod hud;
pub mod logic;
pub mod render;
pub mod scene;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::canvas::{DrawList, Viewport};
use crate::games::Game;
use crate::input::{ClickState, InputEvent};
use crate::time::Countdown;

use hud::Hud;
use logic::{Effect, RoundController, COUNTDOWN_PERIOD_MS};
use state::RoundConfig;

pub struct BubbleGame<R: Rng = StdRng> {
    pub round: RoundController<R>,
    pub hud: Hud,
    countdown: Countdown,
    /// Last recorded frame, repainted every display refresh.
    frame: DrawList,
    viewport: Viewport,
    /// Set by `ScheduleFrame`; the frame loop runs only while this is set.
    frame_scheduled: bool,
}

impl BubbleGame<StdRng> {
    pub fn new(config: RoundConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> BubbleGame<R> {
    pub fn with_rng(config: RoundConfig, rng: R) -> Self {
        Self {
            round: RoundController::new(config, rng),
            hud: Hud::new(),
            countdown: Countdown::new(),
            frame: DrawList::new(),
            viewport: Viewport::default(),
            frame_scheduled: false,
        }
    }

    pub fn frame(&self) -> &DrawList {
        &self.frame
    }

    pub fn is_frame_scheduled(&self) -> bool {
        self.frame_scheduled
    }

    pub fn is_countdown_armed(&self) -> bool {
        self.countdown.is_armed()
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            if !self.apply_one(&effect) {
                log::warn!("effect {:?} not handled", effect);
            }
        }
    }

    /// Carry out one effect: timer and frame effects here, UI effects on the
    /// HUD. Returns whether anything handled it.
    fn apply_one(&mut self, effect: &Effect) -> bool {
        match effect {
            Effect::StartCountdown => self.countdown.arm(COUNTDOWN_PERIOD_MS),
            Effect::StopCountdown => {
                if !self.countdown.cancel() {
                    log::warn!("stop requested with no countdown armed");
                }
            }
            Effect::ScheduleFrame => self.frame_scheduled = true,
            other => return self.hud.apply(other),
        }
        true
    }

    /// Advance the game to `now_ms` on a viewport of the given size: deliver
    /// elapsed countdown periods, then run the scheduled frame tick.
    pub fn advance(&mut self, now_ms: f64, viewport: Viewport) {
        // Keep the last good size while the grid is not laid out yet
        if !viewport.is_degenerate() {
            self.viewport = viewport;
        }

        let periods = self.countdown.poll(now_ms);
        for _ in 0..periods {
            // A tick that ends the round cancels the rest of the batch
            if !self.countdown.is_armed() {
                break;
            }
            let effects = self.round.on_countdown_tick();
            self.apply(effects);
        }

        if self.frame_scheduled {
            self.frame_scheduled = false;
            let effects = self.round.on_frame_tick(self.viewport, &mut self.frame);
            self.apply(effects);
        }
    }
}

impl<R: Rng> Game for BubbleGame<R> {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key('s') | InputEvent::Click(actions::START_ROUND) => {
                let effects = self.round.start(self.viewport);
                self.apply(effects);
                true
            }
            InputEvent::Key('r') | InputEvent::Click(actions::RESTART_ROUND) => {
                let effects = self.round.restart(self.viewport);
                self.apply(effects);
                true
            }
            InputEvent::Pointer { x, y } => self.round.on_click(*x, *y) > 0,
            _ => false,
        }
    }

    fn tick(&mut self, now_ms: f64, viewport: Viewport) {
        self.advance(now_ms, viewport);
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.frame, self.viewport, &self.hud, f, area, click_state);
    }
}
