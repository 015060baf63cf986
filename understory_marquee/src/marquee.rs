// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-row controller tying probing, planning, motion and scheduling together.

use core::fmt;

use kurbo::{Affine, Vec2};

use crate::config::{ConfigError, MarqueeConfig};
use crate::frame::{FrameScheduler, FrameSlot};
use crate::motion::{MotionDriver, MotionPhase};
use crate::plan::{DuplicationPlanner, PlanInputs, RenderPlan};
use crate::probe::{LayoutProbe, Measurement, measure};

/// Result of delivering one frame to a [`Marquee`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameOutput {
    /// How far to translate the track to the left, or `None` to leave it as is.
    pub offset: Option<f64>,
    /// Motion phase after the frame.
    pub phase: MotionPhase,
    /// Whether another frame has been requested.
    pub next_frame_requested: bool,
}

impl FrameOutput {
    /// The offset as a translation vector, if one should be applied.
    #[must_use]
    pub fn translation(&self) -> Option<Vec2> {
        self.offset.map(|offset| Vec2::new(-offset, 0.0))
    }
}

/// One auto-scrolling row.
///
/// A `Marquee` owns its configuration, the latest [`RenderPlan`], a
/// [`MotionDriver`] and its own frame scheduler. Hosts forward lifecycle,
/// layout, pointer and focus events to it and apply the resulting offset to
/// their track node. Dropping a mounted marquee cancels its pending frame.
pub struct Marquee<S: FrameScheduler> {
    config: MarqueeConfig,
    scheduler: S,
    frame: FrameSlot<S::Handle>,
    planner: DuplicationPlanner,
    measurement: Option<Measurement>,
    plan: RenderPlan,
    motion: MotionDriver,
    mounted: bool,
}

impl<S: FrameScheduler> Marquee<S> {
    /// Creates an unmounted marquee.
    pub fn new(config: MarqueeConfig, scheduler: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            scheduler,
            frame: FrameSlot::new(),
            planner: DuplicationPlanner::new(),
            measurement: None,
            plan: RenderPlan::STATIC,
            motion: MotionDriver::from_config(&config),
            mounted: false,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// Speed changes take effect on the next frame without moving the track.
    /// Changes to `force_loop` re-plan against the latest measurement.
    pub fn set_config(&mut self, config: MarqueeConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if config == self.config {
            return Ok(());
        }
        self.config = config;
        self.motion.set_speeds(config.base_speed, config.hover_slow_factor);
        if let Some(measurement) = self.measurement {
            self.replan(&measurement);
        }
        self.sync();
        Ok(())
    }

    /// The scheduler this marquee requests frames from.
    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// The most recent render plan.
    #[must_use]
    pub fn plan(&self) -> &RenderPlan {
        &self.plan
    }

    /// The motion driver.
    #[must_use]
    pub fn motion(&self) -> &MotionDriver {
        &self.motion
    }

    /// Returns `true` between [`Marquee::mount`] and [`Marquee::unmount`].
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Returns `true` when the row should be scrolling.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.mounted && self.config.auto_loop && self.plan.loop_enabled
    }

    /// Returns `true` while a frame is requested and has not been delivered.
    #[must_use]
    pub fn is_frame_pending(&self) -> bool {
        self.frame.is_pending()
    }

    /// Attaches the marquee to the host.
    ///
    /// Motion starts once a measurement pass has shown the content needs to
    /// loop.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        log::trace!("marquee mounted");
        self.sync();
    }

    /// Detaches the marquee, cancelling any pending frame.
    ///
    /// Frames delivered after this call have no effect.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        log::trace!("marquee unmounted");
        self.sync();
    }

    /// Runs a measurement pass and returns the resulting plan.
    ///
    /// Call this on mount, on container resize, on content changes, and after
    /// rendering a new number of copies. A probe that is not laid out yet (zero
    /// widths with a non-empty sequence) leaves the current plan in place; the
    /// next pass retries.
    pub fn measure<P: LayoutProbe + ?Sized>(&mut self, probe: &P) -> RenderPlan {
        let measurement = measure(probe);
        if measurement.item_count > 0 && !measurement.is_ready() {
            log::trace!("marquee measurement not ready: {measurement:?}");
            return self.plan;
        }
        self.measurement = Some(measurement);
        self.replan(&measurement);
        self.sync();
        self.plan
    }

    /// Pointer entered the row: slow down.
    pub fn pointer_enter(&mut self) {
        self.motion.set_hovering(true);
    }

    /// Pointer left the row: back to full speed.
    pub fn pointer_leave(&mut self) {
        self.motion.set_hovering(false);
    }

    /// The row (or a card in it) gained focus: pause.
    pub fn focus(&mut self) {
        self.pause();
    }

    /// The row lost focus: resume.
    pub fn blur(&mut self) {
        self.resume();
    }

    /// Freezes the offset.
    pub fn pause(&mut self) {
        self.motion.pause();
    }

    /// Continues from the frozen offset.
    pub fn resume(&mut self) {
        self.motion.resume();
    }

    /// Delivers a frame at `timestamp_ms` (the host's monotonic frame clock).
    ///
    /// While the row animates, another frame is requested before returning.
    pub fn on_frame(&mut self, timestamp_ms: f64) -> FrameOutput {
        self.frame.fired();
        let offset = if self.is_animating() {
            self.motion.frame(timestamp_ms, self.plan.single_copy_width)
        } else {
            None
        };
        if self.is_animating() {
            self.frame.ensure(&mut self.scheduler);
        }
        FrameOutput {
            offset,
            phase: self.motion.phase(),
            next_frame_requested: self.frame.is_pending(),
        }
    }

    /// Current translation of the track.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        Vec2::new(-self.motion.offset(), 0.0)
    }

    /// Current transform of the track.
    #[must_use]
    pub fn transform(&self) -> Affine {
        Affine::translate(self.translation())
    }

    fn replan(&mut self, measurement: &Measurement) {
        let (duplication, _) = self.planner.plan(PlanInputs {
            needed_width: measurement.needed_width(),
            container_width: measurement.container_width,
            force_loop: self.config.force_loop,
        });
        let plan = RenderPlan::new(duplication, measurement);
        if plan != self.plan {
            log::debug!(
                "marquee plan: loop={} repeats={} single_copy_width={}",
                plan.loop_enabled,
                plan.repeat_count,
                plan.single_copy_width
            );
            self.plan = plan;
        }
    }

    fn sync(&mut self) {
        if self.is_animating() {
            self.motion.start();
            self.frame.ensure(&mut self.scheduler);
        } else {
            self.motion.stop();
            self.frame.cancel(&mut self.scheduler);
        }
    }
}

impl<S: FrameScheduler> Drop for Marquee<S> {
    fn drop(&mut self) {
        self.frame.cancel(&mut self.scheduler);
    }
}

impl<S: FrameScheduler> fmt::Debug for Marquee<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Marquee")
            .field("config", &self.config)
            .field("plan", &self.plan)
            .field("motion", &self.motion)
            .field("mounted", &self.mounted)
            .field("frame_pending", &self.frame.is_pending())
            .finish_non_exhaustive()
    }
}
