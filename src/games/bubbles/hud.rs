//! UI-output state around the play field: instructions panel, countdown text
//! and the end-of-round score panel. Driven only by controller effects.

use super::logic::Effect;

#[derive(Clone, Debug, PartialEq)]
pub struct Hud {
    pub instructions_visible: bool,
    /// Countdown text while the countdown element exists.
    pub countdown: Option<String>,
    pub score_panel_visible: bool,
    /// Last reported final score.
    pub final_score: Option<u32>,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            instructions_visible: true,
            countdown: None,
            score_panel_visible: false,
            final_score: None,
        }
    }
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a UI effect. Timer and frame effects belong to the host and are
    /// ignored here; returns whether the HUD handled the effect.
    pub fn apply(&mut self, effect: &Effect) -> bool {
        match effect {
            Effect::HideInstructions => self.instructions_visible = false,
            Effect::HideScorePanel => self.score_panel_visible = false,
            Effect::ShowCountdown(n) => self.countdown = Some(super::scene::countdown_text(*n)),
            Effect::HideCountdown => self.countdown = None,
            Effect::ReportFinalScore(n) => self.final_score = Some(*n),
            Effect::ShowScorePanel => self.score_panel_visible = true,
            Effect::StartCountdown | Effect::StopCountdown | Effect::ScheduleFrame => return false,
        }
        true
    }
}
