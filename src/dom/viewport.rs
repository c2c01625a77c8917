//! Viewport scroll state and animated scrolling

use std::time::{Duration, Instant};

/// How a programmatic scroll reaches its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Instant,
    Smooth,
}

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: f64,
    to: f64,
    started: Instant,
}

/// The visible window onto the document, in page pixels
#[derive(Debug, Clone)]
pub struct Viewport {
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
    smooth_duration: Duration,
    animation: Option<ScrollAnimation>,
}

impl Viewport {
    /// Default duration of a smooth scroll
    const SMOOTH_DURATION: Duration = Duration::from_millis(450);

    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
            smooth_duration: Self::SMOOTH_DURATION,
            animation: None,
        }
    }

    pub fn with_smooth_duration(mut self, duration: Duration) -> Self {
        self.smooth_duration = duration;
        self
    }

    pub fn set_smooth_duration(&mut self, duration: Duration) {
        self.smooth_duration = duration;
    }

    /// Scroll towards `target`, clamped into `[0, max_scroll]`
    pub fn scroll_to(&mut self, target: f64, max_scroll: f64, behavior: ScrollBehavior, now: Instant) {
        let target = target.clamp(0.0, max_scroll.max(0.0));
        match behavior {
            ScrollBehavior::Instant => self.jump(target),
            ScrollBehavior::Smooth => {
                if self.smooth_duration.is_zero() {
                    self.jump(target);
                } else {
                    self.animation = Some(ScrollAnimation {
                        from: self.scroll_y,
                        to: target,
                        started: now,
                    });
                }
            }
        }
    }

    /// Move immediately, cancelling any running animation
    pub fn jump(&mut self, y: f64) {
        self.animation = None;
        self.scroll_y = y;
    }

    /// Advance a running smooth scroll. Returns true if the position changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(animation) = self.animation else {
            return false;
        };

        let before = self.scroll_y;
        let elapsed = now.saturating_duration_since(animation.started);
        if elapsed >= self.smooth_duration {
            self.scroll_y = animation.to;
            self.animation = None;
        } else {
            let progress = elapsed.as_secs_f32() / self.smooth_duration.as_secs_f32();
            let eased = f64::from(simple_easing::cubic_in_out(progress));
            self.scroll_y = animation.from + (animation.to - animation.from) * eased;
        }
        self.scroll_y != before
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Bottom edge of the visible window
    pub fn bottom(&self) -> f64 {
        self.scroll_y + self.height
    }
}
