// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Duplication planning: decide whether a row loops and how many copies it needs.
//!
//! A looping track must always be wider than two viewports, so that while one
//! copy scrolls fully out of view the next copy already fills the gap. The
//! planner derives the smallest whole number of copies with that property from
//! the width of one lap.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `ceil`

use crate::probe::Measurement;

/// Whether a row loops, and how many copies of its sequence to render.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DuplicationPlan {
    /// `true` when the content must scroll.
    pub loop_enabled: bool,
    /// Number of copies of the sequence to render (always `>= 1`).
    pub repeat_count: usize,
}

impl DuplicationPlan {
    /// Plan for content that is shown once and does not move.
    pub const STATIC: Self = Self {
        loop_enabled: false,
        repeat_count: 1,
    };
}

impl Default for DuplicationPlan {
    fn default() -> Self {
        Self::STATIC
    }
}

/// Computes the duplication plan for one lap of `needed_width` inside a
/// container of `container_width`.
///
/// Content that fits is left static unless `force_loop` is set. Otherwise the
/// repeat count is `ceil(2 * container_width / needed_width) + 1`, and never
/// less than two. The extra copy absorbs the rounding shortfall when the lap
/// width does not evenly divide the two-viewport minimum.
///
/// A zero-width lap cannot be looped and always yields
/// [`DuplicationPlan::STATIC`].
///
/// ```rust
/// use understory_marquee::plan_duplication;
///
/// let plan = plan_duplication(1200.0, 1000.0, false);
/// assert!(plan.loop_enabled);
/// assert_eq!(plan.repeat_count, 3);
///
/// let plan = plan_duplication(1200.0, 2000.0, false);
/// assert!(!plan.loop_enabled);
/// assert_eq!(plan.repeat_count, 1);
/// ```
#[must_use]
pub fn plan_duplication(
    needed_width: f64,
    container_width: f64,
    force_loop: bool,
) -> DuplicationPlan {
    if !force_loop && needed_width <= container_width {
        return DuplicationPlan::STATIC;
    }
    if !(needed_width.is_finite() && needed_width > 0.0) || !container_width.is_finite() {
        return DuplicationPlan::STATIC;
    }

    let min_total = container_width.max(0.0) * 2.0;
    let repeats = (min_total / needed_width).ceil() + 1.0;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "saturating float-to-int cast of a small positive count"
    )]
    let repeats = repeats as usize;
    DuplicationPlan {
        loop_enabled: true,
        repeat_count: repeats.max(2),
    }
}

/// Inputs the duplication plan depends on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlanInputs {
    /// Width of one lap (`item_width * item_count`).
    pub needed_width: f64,
    /// Width of the visible container.
    pub container_width: f64,
    /// Loop even when content fits.
    pub force_loop: bool,
}

/// Caches the most recent [`DuplicationPlan`] and recomputes it only when its
/// inputs change.
#[derive(Clone, Debug, Default)]
pub struct DuplicationPlanner {
    last: Option<(PlanInputs, DuplicationPlan)>,
}

impl DuplicationPlanner {
    /// Creates a planner with no cached plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the plan for `inputs` and whether it differs from the cached one.
    ///
    /// Identical inputs return the cached plan without recomputation.
    pub fn plan(&mut self, inputs: PlanInputs) -> (DuplicationPlan, bool) {
        if let Some((last_inputs, last_plan)) = self.last {
            if last_inputs == inputs {
                return (last_plan, false);
            }
        }
        let plan = plan_duplication(
            inputs.needed_width,
            inputs.container_width,
            inputs.force_loop,
        );
        let changed = self.last.is_none_or(|(_, last_plan)| last_plan != plan);
        self.last = Some((inputs, plan));
        (plan, changed)
    }

    /// Returns the cached plan, if any.
    #[must_use]
    pub fn current(&self) -> Option<DuplicationPlan> {
        self.last.map(|(_, plan)| plan)
    }

    /// Forgets the cached plan.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Stable key of one rendered card in a duplicated track.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CopyKey {
    /// Which copy of the sequence the card belongs to.
    pub copy: usize,
    /// Index of the item inside the sequence.
    pub index: usize,
}

/// Everything the rendering layer needs to lay out a marquee row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderPlan {
    /// `true` when the row scrolls.
    pub loop_enabled: bool,
    /// Number of copies of the sequence to render.
    pub repeat_count: usize,
    /// Width of one rendered copy, gaps included.
    ///
    /// This is `0.0` until the host has rendered `repeat_count` copies and
    /// reported the resulting track width.
    pub single_copy_width: f64,
}

impl RenderPlan {
    /// A static, single-copy plan with no measured width.
    pub const STATIC: Self = Self {
        loop_enabled: false,
        repeat_count: 1,
        single_copy_width: 0.0,
    };

    /// Combines a duplication plan with the latest measurement.
    ///
    /// The single-copy width is the measured track width divided by the repeat
    /// count. It is only taken when the measured track was rendered with exactly
    /// `repeat_count` copies; otherwise it is reported as `0.0`.
    #[must_use]
    pub fn new(plan: DuplicationPlan, measurement: &Measurement) -> Self {
        let single_copy_width = if measurement.rendered_copies == plan.repeat_count {
            measurement.track_width / plan.repeat_count as f64
        } else {
            0.0
        };
        Self {
            loop_enabled: plan.loop_enabled,
            repeat_count: plan.repeat_count,
            single_copy_width,
        }
    }

    /// The duplication part of this plan.
    #[must_use]
    pub fn duplication(&self) -> DuplicationPlan {
        DuplicationPlan {
            loop_enabled: self.loop_enabled,
            repeat_count: self.repeat_count,
        }
    }

    /// Returns `true` once the single-copy width is known.
    #[must_use]
    pub fn is_measured(&self) -> bool {
        self.single_copy_width > 0.0
    }

    /// Iterates the duplicated sequence in display order.
    ///
    /// ```rust
    /// use understory_marquee::{DuplicationPlan, Measurement, RenderPlan};
    ///
    /// let plan = RenderPlan::new(
    ///     DuplicationPlan { loop_enabled: true, repeat_count: 2 },
    ///     &Measurement::default(),
    /// );
    /// let keys: Vec<_> = plan
    ///     .repeat(&["a", "b"])
    ///     .map(|(key, item)| (key.copy, *item))
    ///     .collect();
    /// assert_eq!(keys, [(0, "a"), (0, "b"), (1, "a"), (1, "b")]);
    /// ```
    pub fn repeat<'a, T>(&self, items: &'a [T]) -> Repeat<'a, T> {
        Repeat {
            items,
            copies: self.repeat_count,
            next: 0,
        }
    }
}

impl Default for RenderPlan {
    fn default() -> Self {
        Self::STATIC
    }
}

/// Iterator returned by [`RenderPlan::repeat`].
#[derive(Clone, Debug)]
pub struct Repeat<'a, T> {
    items: &'a [T],
    copies: usize,
    next: usize,
}

impl<'a, T> Iterator for Repeat<'a, T> {
    type Item = (CopyKey, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.items.len();
        if len == 0 || self.next >= len.saturating_mul(self.copies) {
            return None;
        }
        let key = CopyKey {
            copy: self.next / len,
            index: self.next % len,
        };
        self.next += 1;
        Some((key, &self.items[key.index]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.items.len().saturating_mul(self.copies);
        let remaining = total.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Repeat<'_, T> {}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::{
        CopyKey, DuplicationPlan, DuplicationPlanner, PlanInputs, RenderPlan, plan_duplication,
    };
    use crate::probe::{UniformLayout, measure};

    #[test]
    fn fitting_content_stays_static() {
        for (needed, container) in [(0.0, 0.0), (100.0, 100.0), (1200.0, 2000.0), (1.0, 1e9)] {
            let plan = plan_duplication(needed, container, false);
            assert_eq!(plan, DuplicationPlan::STATIC);
        }
    }

    #[test]
    fn overflowing_content_covers_two_viewports() {
        for (needed, container) in [
            (1200.0, 1000.0),
            (101.0, 100.0),
            (10.0, 1000.0),
            (333.3, 999.9),
            (5000.0, 10.0),
        ] {
            let plan = plan_duplication(needed, container, true);
            assert!(plan.loop_enabled);
            assert!(plan.repeat_count >= 2);
            assert!(plan.repeat_count as f64 * needed >= 2.0 * container);
        }
    }

    #[test]
    fn overflow_scenario_needs_three_copies() {
        let layout = UniformLayout::new(300.0, 4, 1000.0);
        let m = measure(&layout);
        let plan = plan_duplication(m.needed_width(), m.container_width, false);
        assert!(plan.loop_enabled);
        assert_eq!(plan.repeat_count, 3);
    }

    #[test]
    fn wide_container_scenario_is_static() {
        let m = measure(&UniformLayout::new(300.0, 4, 2000.0));
        let plan = plan_duplication(m.needed_width(), m.container_width, false);
        assert!(!plan.loop_enabled);
        assert_eq!(plan.repeat_count, 1);
    }

    #[test]
    fn force_loop_duplicates_fitting_content() {
        let plan = plan_duplication(1200.0, 2000.0, true);
        assert!(plan.loop_enabled);
        // ceil(4000 / 1200) + 1
        assert_eq!(plan.repeat_count, 5);
    }

    #[test]
    fn force_loop_never_goes_below_two_copies() {
        let plan = plan_duplication(500.0, 0.0, true);
        assert_eq!(plan.repeat_count, 2);
    }

    #[test]
    fn zero_width_lap_is_static_even_when_forced() {
        assert_eq!(plan_duplication(0.0, 800.0, true), DuplicationPlan::STATIC);
        assert_eq!(plan_duplication(f64::NAN, 800.0, true), DuplicationPlan::STATIC);
    }

    #[test]
    fn planner_is_idempotent() {
        let mut planner = DuplicationPlanner::new();
        let inputs = PlanInputs {
            needed_width: 1200.0,
            container_width: 1000.0,
            force_loop: false,
        };
        let (first, changed) = planner.plan(inputs);
        assert!(changed);
        let (second, changed) = planner.plan(inputs);
        assert!(!changed);
        assert_eq!(first, second);
        assert_eq!(planner.current(), Some(first));
    }

    #[test]
    fn planner_reports_change_only_when_plan_differs() {
        let mut planner = DuplicationPlanner::new();
        let mut inputs = PlanInputs {
            needed_width: 1200.0,
            container_width: 1000.0,
            force_loop: false,
        };
        let _ = planner.plan(inputs);

        // Slightly wider container still needs three copies.
        inputs.container_width = 1010.0;
        let (plan, changed) = planner.plan(inputs);
        assert!(!changed);
        assert_eq!(plan.repeat_count, 3);

        inputs.container_width = 2000.0;
        let (plan, changed) = planner.plan(inputs);
        assert!(changed);
        assert!(!plan.loop_enabled);

        planner.reset();
        assert_eq!(planner.current(), None);
    }

    #[test]
    fn single_copy_width_comes_from_the_rendered_track() {
        let plan = DuplicationPlan {
            loop_enabled: true,
            repeat_count: 3,
        };
        let layout = UniformLayout::new(300.0, 4, 1000.0).with_gap(16.0);

        // Host has not rendered the duplicates yet.
        let pending = RenderPlan::new(plan, &measure(&layout));
        assert_eq!(pending.single_copy_width, 0.0);
        assert!(!pending.is_measured());

        let rendered = RenderPlan::new(plan, &measure(&layout.with_copies(3)));
        assert_eq!(rendered.single_copy_width, 4.0 * 316.0);
        assert!(rendered.repeat_count as f64 * rendered.single_copy_width >= 2000.0);
        assert_eq!(rendered.duplication(), plan);
    }

    #[test]
    fn repeat_yields_every_copy_in_order() {
        let plan = RenderPlan {
            loop_enabled: true,
            repeat_count: 3,
            single_copy_width: 0.0,
        };
        let items = [10, 20];
        let iter = plan.repeat(&items);
        assert_eq!(iter.len(), 6);
        let rendered: Vec<_> = iter.collect();
        assert_eq!(rendered[0], (CopyKey { copy: 0, index: 0 }, &10));
        assert_eq!(rendered[3], (CopyKey { copy: 1, index: 1 }, &20));
        assert_eq!(rendered[5], (CopyKey { copy: 2, index: 1 }, &20));

        let empty: [u8; 0] = [];
        assert_eq!(plan.repeat(&empty).count(), 0);
        assert_eq!(RenderPlan::STATIC.repeat(&items).count(), 2);
    }
}
