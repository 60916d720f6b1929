use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::style::Color;

pub(super) const PULSE: Duration = Duration::from_millis(500);
const PARTICLES: usize = 28;
const GLYPHS: [char; 6] = ['*', '+', '·', '•', '✦', '✧'];
const COLORS: [Color; 6] = [
    Color::Yellow,
    Color::LightRed,
    Color::LightMagenta,
    Color::LightCyan,
    Color::LightGreen,
    Color::LightBlue,
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct Particle {
    pub(super) x: u16,
    pub(super) y: u16,
    pub(super) glyph: char,
    pub(super) color: Color,
}

/// One-shot burst played behind a fresh pick.
#[derive(Debug)]
pub(super) struct Celebration {
    started: Option<Instant>,
    duration: Duration,
    seed: u64,
}

impl Celebration {
    pub(super) fn new(duration: Duration) -> Self {
        Self {
            started: None,
            duration: duration.max(PULSE),
            seed: 0,
        }
    }

    pub(super) fn stop(&mut self) {
        self.started = None;
    }

    /// Stop any running playback and play again from the first frame.
    pub(super) fn restart(&mut self, now: Instant, seed: u64) {
        self.stop();
        self.started = Some(now);
        self.seed = seed;
    }

    /// Fraction of the burst elapsed, or `None` once it has finished.
    pub(super) fn progress(&self, now: Instant) -> Option<f32> {
        let started = self.started?;
        let elapsed = now.saturating_duration_since(started);
        if elapsed >= self.duration {
            return None;
        }
        Some(elapsed.as_secs_f32() / self.duration.as_secs_f32())
    }

    pub(super) fn is_playing(&self, now: Instant) -> bool {
        self.progress(now).is_some()
    }

    /// Result text scale: 1 → 1.5 → 1 over the pulse, 1 afterwards.
    pub(super) fn scale(&self, now: Instant) -> f32 {
        let Some(started) = self.started else {
            return 1.0;
        };
        let elapsed = now.saturating_duration_since(started);
        if elapsed >= PULSE {
            return 1.0;
        }
        let t = elapsed.as_secs_f32() / PULSE.as_secs_f32();
        let up = if t < 0.5 { t * 2.0 } else { (1.0 - t) * 2.0 };
        1.0 + 0.5 * up
    }

    /// Confetti positions inside `area` for the current frame.
    pub(super) fn particles(&self, now: Instant, area: Rect) -> Vec<Particle> {
        let Some(t) = self.progress(now) else {
            return Vec::new();
        };
        if area.width == 0 || area.height == 0 {
            return Vec::new();
        }

        let cx = area.x as f32 + area.width as f32 / 2.0;
        let cy = area.y as f32 + area.height as f32 / 2.0;
        let reach_x = area.width as f32 / 2.0;
        let reach_y = area.height as f32;

        let mut out = Vec::with_capacity(PARTICLES);
        for i in 0..PARTICLES {
            let h = mix(self.seed, i as u64);
            let angle = (h % 3600) as f32 / 3600.0 * std::f32::consts::TAU;
            let speed = 0.5 + ((h >> 16) % 500) as f32 / 1000.0;
            // Fast start, slow finish, then a little gravity.
            let travel = 1.0 - (1.0 - t) * (1.0 - t);
            let x = cx + angle.cos() * speed * reach_x * travel;
            let y = cy + angle.sin() * speed * reach_y * 0.5 * travel + t * t * reach_y * 0.4;

            let (xmin, xmax) = (area.x as f32, (area.x + area.width) as f32);
            let (ymin, ymax) = (area.y as f32, (area.y + area.height) as f32);
            if x < xmin || x >= xmax || y < ymin || y >= ymax {
                continue;
            }
            out.push(Particle {
                x: x as u16,
                y: y as u16,
                glyph: GLYPHS[((h >> 32) % GLYPHS.len() as u64) as usize],
                color: COLORS[((h >> 40) % COLORS.len() as u64) as usize],
            });
        }
        out
    }
}

fn mix(seed: u64, i: u64) -> u64 {
    // splitmix64 finalizer
    let mut z = seed
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(i.wrapping_add(1).wrapping_mul(0xBF58_476D_1CE4_E5B9));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "../tests/tui_shell/celebration_tests.rs"]
mod tests;
