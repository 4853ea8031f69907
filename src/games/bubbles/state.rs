/// Bubble Pop game state: bubbles, the bubble field, and round configuration.

use std::ops::Range;

use rand::Rng;

use crate::canvas::Viewport;

/// Bubble radius in pixels.
pub const RADIUS_RANGE: Range<f64> = 10.0..35.0;
/// Rise speed in pixels per frame.
pub const SPEED_RANGE: Range<f64> = 0.5..2.0;
pub const OPACITY_RANGE: Range<f64> = 0.2..0.5;

/// Uniform draw from `[0, extent)`; 0 when the extent is empty.
fn offset_within<R: Rng>(rng: &mut R, extent: f64) -> f64 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}

/// A single rising, translucent circle.
#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub speed: f64,
    pub opacity: f64,
}

impl Bubble {
    /// A new bubble somewhere in the `spawn_depth` band below the viewport.
    pub fn spawn<R: Rng>(rng: &mut R, viewport: Viewport, spawn_depth: f64) -> Self {
        let x = offset_within(rng, viewport.width);
        let y = viewport.height + offset_within(rng, spawn_depth);
        Self {
            x,
            y,
            radius: rng.gen_range(RADIUS_RANGE),
            speed: rng.gen_range(SPEED_RANGE),
            opacity: rng.gen_range(OPACITY_RANGE),
        }
    }

    /// Reuse this bubble as a fresh one entering from just below the bottom edge.
    pub fn recycle<R: Rng>(&mut self, rng: &mut R, viewport: Viewport) {
        self.x = offset_within(rng, viewport.width);
        self.radius = rng.gen_range(RADIUS_RANGE);
        self.speed = rng.gen_range(SPEED_RANGE);
        self.opacity = rng.gen_range(OPACITY_RANGE);
        self.y = viewport.height + self.radius;
    }

    /// Whole bubble is above the top edge.
    pub fn is_above_top(&self) -> bool {
        self.y + self.radius < 0.0
    }

    /// Move up one frame; recycles once fully off-screen. Returns whether it was recycled.
    pub fn rise<R: Rng>(&mut self, rng: &mut R, viewport: Viewport) -> bool {
        self.y -= self.speed;
        if self.is_above_top() {
            self.recycle(rng, viewport);
            true
        } else {
            false
        }
    }

    /// Strictly inside: a point exactly on the rim is a miss.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let dx = px - self.x;
        let dy = py - self.y;
        (dx * dx + dy * dy).sqrt() < self.radius
    }
}

/// The bubbles of the current round. Only shrinks mid-round (pops); it is
/// refilled by [`create`](BubbleField::create) at round start.
#[derive(Clone, Debug, Default)]
pub struct BubbleField {
    bubbles: Vec<Bubble>,
}

impl BubbleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents with exactly `count` fresh bubbles.
    pub fn create<R: Rng>(&mut self, count: usize, viewport: Viewport, spawn_depth: f64, rng: &mut R) {
        self.bubbles.clear();
        self.bubbles
            .extend((0..count).map(|_| Bubble::spawn(rng, viewport, spawn_depth)));
    }

    /// Advance every bubble one frame. Returns how many were recycled.
    pub fn tick<R: Rng>(&mut self, viewport: Viewport, rng: &mut R) -> usize {
        let mut recycled = 0;
        for bubble in &mut self.bubbles {
            if bubble.rise(rng, viewport) {
                recycled += 1;
            }
        }
        recycled
    }

    /// Pop every bubble containing the point, in one pass. Returns the number popped.
    pub fn hit_test(&mut self, px: f64, py: f64) -> usize {
        let before = self.bubbles.len();
        self.bubbles.retain(|b| !b.contains(px, py));
        before - self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn clear(&mut self) {
        self.bubbles.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bubble> {
        self.bubbles.iter()
    }

    #[cfg(test)]
    pub fn push(&mut self, bubble: Bubble) {
        self.bubbles.push(bubble);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RoundPhase {
    Idle,
    Running,
    Ended,
}

/// Why a round ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EndReason {
    TimeUp,
    FieldCleared,
}

/// Tunables for a round.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundConfig {
    /// Bubbles created at round start. Always at least 1.
    pub bubble_count: usize,
    /// Countdown length in seconds. Always at least 1.
    pub duration_secs: u32,
    /// Height of the band below the viewport new bubbles start in.
    pub spawn_depth: f64,
}

pub const DEFAULT_BUBBLE_COUNT: usize = 30;
pub const DEFAULT_DURATION_SECS: u32 = 15;
pub const DEFAULT_SPAWN_DEPTH: f64 = 100.0;

pub const MAX_BUBBLE_COUNT: usize = 500;
pub const MAX_DURATION_SECS: u32 = 600;

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            bubble_count: DEFAULT_BUBBLE_COUNT,
            duration_secs: DEFAULT_DURATION_SECS,
            spawn_depth: DEFAULT_SPAWN_DEPTH,
        }
    }
}

impl RoundConfig {
    pub fn new(bubble_count: usize, duration_secs: u32, spawn_depth: f64) -> Self {
        Self {
            bubble_count,
            duration_secs,
            spawn_depth,
        }
        .sanitized()
    }

    /// Clamp values into playable ranges: a round must start with at least
    /// one bubble and one second on the clock, and stays small enough to
    /// simulate every frame.
    pub fn sanitized(mut self) -> Self {
        if self.bubble_count > MAX_BUBBLE_COUNT {
            log::warn!("bubble count {} capped at {}", self.bubble_count, MAX_BUBBLE_COUNT);
        }
        if self.duration_secs > MAX_DURATION_SECS {
            log::warn!("round length {}s capped at {}s", self.duration_secs, MAX_DURATION_SECS);
        }
        self.bubble_count = self.bubble_count.clamp(1, MAX_BUBBLE_COUNT);
        self.duration_secs = self.duration_secs.clamp(1, MAX_DURATION_SECS);
        if !self.spawn_depth.is_finite() || self.spawn_depth < 0.0 {
            self.spawn_depth = DEFAULT_SPAWN_DEPTH;
        }
        self
    }

    /// Defaults overridden by URL query parameters, e.g.
    /// `?bubbles=40&seconds=20&depth=80`. A leading `?` is optional.
    /// Unknown keys and unparsable values are skipped.
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let applied = match key {
                "bubbles" => value.parse().map(|v| config.bubble_count = v).is_ok(),
                "seconds" => value.parse().map(|v| config.duration_secs = v).is_ok(),
                "depth" => value.parse().map(|v| config.spawn_depth = v).is_ok(),
                _ => {
                    log::warn!("ignoring unknown query parameter {:?}", key);
                    continue;
                }
            };
            if !applied {
                log::warn!("ignoring invalid value {:?} for {:?}", value, key);
            }
        }
        config.sanitized()
    }
}
