use crate::{Align, ScrollBehavior, WindowEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}

/// A time-based interpolation between two scroll offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: u64,
    pub to: u64,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl Tween {
    pub fn new(from: u64, to: u64, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn sample(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        let eased = self.easing.sample(t);
        let from = self.from as f32;
        let to = self.to as f32;
        (from + (to - from) * eased).max(0.0) as u64
    }
}

/// Drives a [`WindowEngine`] on behalf of a host UI: forwards scroll events,
/// advances the quiet-interval clock each frame, and implements
/// [`ScrollBehavior::Smooth`] via a tween.
///
/// A user scroll event always cancels an in-flight tween — the user wins.
#[derive(Clone, Debug)]
pub struct Controller {
    engine: WindowEngine,
    tween: Option<Tween>,
    smooth_duration_ms: u64,
    easing: Easing,
}

impl Controller {
    pub fn new(engine: WindowEngine) -> Self {
        Self {
            engine,
            tween: None,
            smooth_duration_ms: 250,
            easing: Easing::SmoothStep,
        }
    }

    pub fn with_smooth_scroll(mut self, duration_ms: u64, easing: Easing) -> Self {
        self.smooth_duration_ms = duration_ms.max(1);
        self.easing = easing;
        self
    }

    pub fn engine(&self) -> &WindowEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut WindowEngine {
        &mut self.engine
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Host scroll event (wheel/drag). Cancels any active tween.
    pub fn on_scroll(&mut self, offset: u64, now_ms: u64) {
        self.cancel_animation();
        self.engine.apply_scroll_event(offset, now_ms);
    }

    /// Advances the controller one frame.
    ///
    /// While a tween is active this moves the scroll offset and returns the
    /// new value (the host applies it to the real scroll container);
    /// otherwise it just runs quiet-interval debouncing.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        let Some(tween) = self.tween else {
            self.engine.tick(now_ms);
            return None;
        };
        self.engine.apply_scroll_event(tween.sample(now_ms), now_ms);
        if tween.is_done(now_ms) {
            // Scrolling state settles through the normal quiet interval.
            self.tween = None;
        }
        Some(self.engine.scroll_offset())
    }

    /// Scrolls so item `index` aligns per `align`. `Auto` applies the offset
    /// immediately; `Smooth` starts a tween driven by [`Self::tick`].
    ///
    /// Returns the (clamped) target offset.
    pub fn scroll_to_item(
        &mut self,
        index: usize,
        align: Align,
        behavior: ScrollBehavior,
        now_ms: u64,
    ) -> u64 {
        match behavior {
            ScrollBehavior::Auto => {
                self.cancel_animation();
                self.engine.scroll_to_item(index, align)
            }
            ScrollBehavior::Smooth => {
                let to = self.engine.scroll_to_item_offset(index, align);
                let from = self.engine.scroll_offset();
                self.tween = Some(Tween::new(from, to, now_ms, self.smooth_duration_ms, self.easing));
                to
            }
        }
    }
}
