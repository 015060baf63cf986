// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_marquee --heading-base-level=0

//! Understory Marquee: a headless engine for seamless, infinitely looping
//! horizontal marquees.
//!
//! A marquee is a row of cards that scrolls sideways forever. To make the
//! wraparound invisible the row is rendered several times back to back, and the
//! track is translated left by an offset that wraps modulo the width of one
//! copy. This crate computes everything except the pixels:
//!
//! - [`LayoutProbe`] / [`measure`]: a narrow capability trait through which the
//!   host reports item, container and track widths.
//! - [`plan_duplication`] / [`DuplicationPlanner`] / [`RenderPlan`]: whether the
//!   row must loop and how many copies keep at least two viewports of content
//!   on the track.
//! - [`MotionDriver`]: a three-state (idle, running, paused) machine mapping
//!   frame timestamps to an offset, with hover slow-down and pause/resume that
//!   never jump.
//! - [`FrameScheduler`] / [`FrameSlot`]: the host's per-repaint callback, owned
//!   per instance and cancelled on teardown.
//! - [`Marquee`]: a per-row controller wiring all of the above to host events.
//!
//! This crate deliberately does **not** render anything. Host frameworks are
//! responsible for:
//!
//! - Rendering [`RenderPlan::repeat_count`] copies of their items (see
//!   [`RenderPlan::repeat`] for stable per-card keys).
//! - Calling [`Marquee::measure`] on mount, on resize, on content changes and
//!   after rendering a different number of copies.
//! - Delivering requested frames via [`Marquee::on_frame`] and applying the
//!   returned offset as a leftward translation of the track.
//! - Forwarding pointer enter/leave and focus/blur on the container.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_marquee::{ManualScheduler, Marquee, MarqueeConfig, UniformLayout};
//!
//! // Four 300 px cards in a 1000 px container.
//! let layout = UniformLayout::new(300.0, 4, 1000.0);
//! let mut marquee = Marquee::new(MarqueeConfig::with_speed(30.0), ManualScheduler::new())?;
//! marquee.mount();
//!
//! // First pass: the row overflows, so it loops with three copies.
//! let plan = marquee.measure(&layout);
//! assert!(plan.loop_enabled);
//! assert_eq!(plan.repeat_count, 3);
//!
//! // The host renders three copies and measures again.
//! let plan = marquee.measure(&layout.with_copies(plan.repeat_count));
//! assert_eq!(plan.single_copy_width, 1200.0);
//!
//! // Deliver frames while the marquee asks for them.
//! let mut t = 0.0;
//! while marquee.scheduler_mut().take_pending().is_some() && t <= 2_000.0 {
//!     let out = marquee.on_frame(t);
//!     if let Some(offset) = out.offset {
//!         assert!((0.0..1200.0).contains(&offset));
//!     }
//!     t += 16.0;
//! }
//! assert!(marquee.translation().x < 0.0);
//!
//! marquee.unmount();
//! assert!(!marquee.is_frame_pending());
//! # Ok::<(), understory_marquee::ConfigError>(())
//! ```
//!
//! All widths are in a caller-chosen horizontal unit (typically logical
//! pixels); speeds are in those units per second and timestamps are in
//! milliseconds.
//!
//! This crate is `no_std`.

#![no_std]

mod config;
mod frame;
mod marquee;
mod motion;
mod plan;
mod probe;

pub use config::{ConfigError, MarqueeConfig};
pub use frame::{FrameId, FrameScheduler, FrameSlot, ManualScheduler};
pub use marquee::{FrameOutput, Marquee};
pub use motion::{MotionDriver, MotionPhase, MotionState, wrap_offset};
pub use plan::{
    CopyKey, DuplicationPlan, DuplicationPlanner, PlanInputs, RenderPlan, Repeat, plan_duplication,
};
pub use probe::{LayoutProbe, Measurement, UniformLayout, measure};
