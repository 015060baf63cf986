// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Motion driver: turns frame timestamps into a wrapped horizontal offset.
//!
//! ## Model
//!
//! The driver tracks an unwrapped travelled distance `x` (pixels) as a pure
//! function of the frame clock:
//!
//! ```text
//! x = (timestamp_ms - phase_offset_ms) / 1000 * effective_speed
//! offset = x mod single_copy_width
//! ```
//!
//! Pausing and speed changes never touch `x` directly. Instead the phase offset
//! is re-solved so that the formula yields the current `x` at the anchoring
//! frame:
//!
//! ```text
//! phase_offset_ms = anchor_ms - (x / effective_speed) * 1000
//! ```
//!
//! While paused this is done on every frame, so resuming continues from the
//! exact pixel where the row stopped, however long the pause lasted. Speed
//! changes (hover enter/leave) anchor at the last observed frame so the row
//! keeps moving without a jump.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_marquee::{MotionDriver, MotionPhase};
//!
//! let mut motion = MotionDriver::new(25.0, 0.25);
//! motion.start();
//! assert_eq!(motion.phase(), MotionPhase::Running);
//!
//! let single_copy_width = 500.0;
//! motion.frame(0.0, single_copy_width);
//! let offset = motion.frame(10_000.0, single_copy_width).unwrap();
//! assert!((offset - 250.0).abs() < 1e-9);
//! ```

use crate::config::MarqueeConfig;

/// Observable state of a [`MotionDriver`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MotionPhase {
    /// No animation is scheduled.
    Idle,
    /// The offset advances every frame.
    Running,
    /// Frames are still delivered but the offset is frozen.
    Paused,
}

/// Externally driven motion inputs plus the clock adjustment that keeps the
/// offset continuous.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MotionState {
    /// Adjustment applied to the frame clock, in milliseconds.
    pub phase_offset_ms: f64,
    /// Set while the row has focus.
    pub paused: bool,
    /// Set while the pointer is over the row.
    pub hovering: bool,
}

/// Continuous-time motion state machine for one marquee row.
#[derive(Clone, Debug)]
pub struct MotionDriver {
    state: MotionState,
    active: bool,
    base_speed: f64,
    hover_slow_factor: f64,
    distance: f64,
    offset: f64,
    last_frame_ms: Option<f64>,
    needs_rebase: bool,
}

impl MotionDriver {
    /// Creates an idle driver.
    ///
    /// `base_speed` is in pixels per second; `hover_slow_factor` scales it while
    /// hovering.
    #[must_use]
    pub fn new(base_speed: f64, hover_slow_factor: f64) -> Self {
        Self {
            state: MotionState::default(),
            active: false,
            base_speed,
            hover_slow_factor,
            distance: 0.0,
            offset: 0.0,
            last_frame_ms: None,
            needs_rebase: true,
        }
    }

    /// Creates an idle driver using the speeds from `config`.
    #[must_use]
    pub fn from_config(config: &MarqueeConfig) -> Self {
        Self::new(config.base_speed, config.hover_slow_factor)
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> MotionPhase {
        if !self.active {
            MotionPhase::Idle
        } else if self.state.paused {
            MotionPhase::Paused
        } else {
            MotionPhase::Running
        }
    }

    /// Returns the motion inputs and current phase offset.
    #[must_use]
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Leaves [`MotionPhase::Idle`], starting from a zero offset.
    ///
    /// Has no effect when the driver is already active.
    pub fn start(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.distance = 0.0;
        self.offset = 0.0;
        self.last_frame_ms = None;
        self.needs_rebase = true;
        log::trace!("marquee motion started ({:?})", self.phase());
    }

    /// Returns to [`MotionPhase::Idle`] and resets the offset to zero.
    pub fn stop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        self.distance = 0.0;
        self.offset = 0.0;
        self.last_frame_ms = None;
        log::trace!("marquee motion stopped");
    }

    /// Freezes the offset until [`MotionDriver::resume`].
    pub fn pause(&mut self) {
        self.set_paused(true);
    }

    /// Continues from the frozen offset.
    pub fn resume(&mut self) {
        self.set_paused(false);
    }

    /// Sets the paused flag.
    pub fn set_paused(&mut self, paused: bool) {
        if self.state.paused == paused {
            return;
        }
        self.state.paused = paused;
        self.needs_rebase = true;
        log::trace!("marquee motion paused={paused}");
    }

    /// Sets the hovering flag, which scales the speed by the hover multiplier.
    pub fn set_hovering(&mut self, hovering: bool) {
        if self.state.hovering == hovering {
            return;
        }
        self.state.hovering = hovering;
        self.needs_rebase = true;
    }

    /// Changes the speeds without disturbing the current offset.
    pub fn set_speeds(&mut self, base_speed: f64, hover_slow_factor: f64) {
        if self.base_speed == base_speed && self.hover_slow_factor == hover_slow_factor {
            return;
        }
        self.base_speed = base_speed;
        self.hover_slow_factor = hover_slow_factor;
        self.needs_rebase = true;
    }

    /// Current speed in pixels per second, after the hover multiplier.
    #[must_use]
    pub fn effective_speed(&self) -> f64 {
        if self.state.hovering {
            self.base_speed * self.hover_slow_factor
        } else {
            self.base_speed
        }
    }

    /// Unwrapped distance travelled since [`MotionDriver::start`], in pixels.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The most recently applied offset, in `[0, single_copy_width)`.
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Advances the driver to `timestamp_ms` and returns the offset to apply.
    ///
    /// The returned value is how far to translate the track to the left. It is
    /// `None` when the driver is idle, and when `single_copy_width` is not a
    /// usable width yet, in which case the caller should leave the track where
    /// it is and try again on the next frame.
    ///
    /// Timestamps are expected to be monotonic; a timestamp earlier than the
    /// previous frame is treated as a repeat of that frame.
    pub fn frame(&mut self, timestamp_ms: f64, single_copy_width: f64) -> Option<f64> {
        if !self.active {
            return None;
        }
        let now = match self.last_frame_ms {
            Some(last) if timestamp_ms.is_nan() || timestamp_ms < last => last,
            _ if !timestamp_ms.is_finite() => return None,
            _ => timestamp_ms,
        };
        let speed = self.effective_speed();

        if self.state.paused {
            self.anchor(now, speed);
        } else {
            if self.needs_rebase {
                let anchor = self.last_frame_ms.unwrap_or(now);
                self.anchor(anchor, speed);
            }
            if !self.needs_rebase {
                self.distance = (now - self.state.phase_offset_ms) / 1000.0 * speed;
            }
        }
        self.last_frame_ms = Some(now);

        let offset = wrap_offset(self.distance, single_copy_width)?;
        self.offset = offset;
        Some(offset)
    }

    /// Re-solves the phase offset so the clock yields the current distance at
    /// `anchor_ms`.
    ///
    /// A non-positive speed cannot be solved for; the distance then stays
    /// frozen and the rebase is retried once the speed becomes positive.
    fn anchor(&mut self, anchor_ms: f64, speed: f64) {
        if speed > 0.0 && speed.is_finite() {
            self.state.phase_offset_ms = anchor_ms - (self.distance / speed) * 1000.0;
            self.needs_rebase = false;
        } else {
            self.needs_rebase = true;
        }
    }
}

/// Wraps an unwrapped distance into `[0, width)`.
///
/// Returns `None` when `width` is zero, negative, or not finite.
///
/// ```rust
/// use understory_marquee::wrap_offset;
///
/// assert_eq!(wrap_offset(1250.0, 500.0), Some(250.0));
/// assert_eq!(wrap_offset(-100.0, 500.0), Some(400.0));
/// assert_eq!(wrap_offset(10.0, 0.0), None);
/// ```
#[must_use]
pub fn wrap_offset(distance: f64, width: f64) -> Option<f64> {
    if !(width > 0.0 && width.is_finite() && distance.is_finite()) {
        return None;
    }
    let mut offset = distance % width;
    if offset < 0.0 {
        offset += width;
    }
    if offset >= width {
        offset = 0.0;
    }
    Some(offset)
}
