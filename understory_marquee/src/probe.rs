// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout probing: the narrow measurement capability the engine needs from a host.
//!
//! The engine never talks to a layout engine directly. Hosts implement
//! [`LayoutProbe`] over whatever node handles their rendering layer exposes and
//! the engine reads a [`Measurement`] snapshot from it on every layout pass.

/// Read-only measurement access to a rendered marquee track and its container.
///
/// All widths are in the host's horizontal coordinate space (typically logical
/// pixels). Implementations should report `0.0` for anything that is absent or
/// not laid out yet; the engine treats zero as "not yet measurable" and retries
/// on the next layout pass.
pub trait LayoutProbe {
    /// Width of the first item of the un-duplicated sequence.
    fn first_item_width(&self) -> f64;

    /// Number of items in one lap of content.
    fn item_count(&self) -> usize;

    /// Width of the visible container viewport.
    fn container_width(&self) -> f64;

    /// Total scrollable width of the track, across all rendered copies.
    ///
    /// This includes any gaps or margins between items, which a single-item
    /// measurement does not capture.
    fn track_width(&self) -> f64;

    /// Number of copies of the sequence the host currently renders.
    fn rendered_copies(&self) -> usize;
}

impl<P: LayoutProbe + ?Sized> LayoutProbe for &P {
    fn first_item_width(&self) -> f64 {
        (**self).first_item_width()
    }

    fn item_count(&self) -> usize {
        (**self).item_count()
    }

    fn container_width(&self) -> f64 {
        (**self).container_width()
    }

    fn track_width(&self) -> f64 {
        (**self).track_width()
    }

    fn rendered_copies(&self) -> usize {
        (**self).rendered_copies()
    }
}

/// A sanitized snapshot of one layout pass.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Measurement {
    /// Width of one item.
    pub item_width: f64,
    /// Number of items in one lap.
    pub item_count: usize,
    /// Width of the visible viewport.
    pub container_width: f64,
    /// Total scrollable width of the rendered track.
    pub track_width: f64,
    /// Number of copies the track was rendered with.
    pub rendered_copies: usize,
}

impl Measurement {
    /// Width of one lap as estimated from the single-item measurement.
    #[must_use]
    pub fn needed_width(&self) -> f64 {
        let count = self.item_count as f64;
        self.item_width * count
    }

    /// Returns `true` when both the item and the container have a usable width.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.item_count > 0 && self.item_width > 0.0 && self.container_width > 0.0
    }
}

/// Reads a [`Measurement`] from a probe.
///
/// Non-finite and negative widths are reported as `0.0`.
#[must_use]
pub fn measure<P: LayoutProbe + ?Sized>(probe: &P) -> Measurement {
    let item_count = probe.item_count();
    let item_width = if item_count == 0 {
        0.0
    } else {
        sanitize(probe.first_item_width())
    };
    Measurement {
        item_width,
        item_count,
        container_width: sanitize(probe.container_width()),
        track_width: sanitize(probe.track_width()),
        rendered_copies: probe.rendered_copies(),
    }
}

fn sanitize(width: f64) -> f64 {
    if width.is_finite() && width > 0.0 {
        width
    } else {
        0.0
    }
}

/// A [`LayoutProbe`] for a row of equally sized cards separated by a fixed gap.
///
/// The track is laid out as `copies * item_count` cards with `gap` between
/// consecutive cards, including between the last card of one copy and the first
/// card of the next. A trailing gap is counted after the final card so that
/// every copy has the same width (`item_count * (item_width + gap)`).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UniformLayout {
    /// Width of each card.
    pub item_width: f64,
    /// Horizontal gap between cards.
    pub gap: f64,
    /// Number of cards in one lap.
    pub item_count: usize,
    /// Width of the visible container.
    pub container_width: f64,
    /// Number of copies currently rendered.
    pub copies: usize,
}

impl UniformLayout {
    /// Creates a gapless layout rendering a single copy.
    #[must_use]
    pub fn new(item_width: f64, item_count: usize, container_width: f64) -> Self {
        Self {
            item_width,
            gap: 0.0,
            item_count,
            container_width,
            copies: 1,
        }
    }

    /// Sets the gap between cards.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Sets the number of rendered copies.
    #[must_use]
    pub fn with_copies(mut self, copies: usize) -> Self {
        self.copies = copies;
        self
    }

    /// Width of one copy of the sequence, gaps included.
    #[must_use]
    pub fn copy_width(&self) -> f64 {
        let count = self.item_count as f64;
        count * (self.item_width + self.gap)
    }
}

impl LayoutProbe for UniformLayout {
    fn first_item_width(&self) -> f64 {
        if self.item_count == 0 || self.copies == 0 {
            0.0
        } else {
            self.item_width
        }
    }

    fn item_count(&self) -> usize {
        self.item_count
    }

    fn container_width(&self) -> f64 {
        self.container_width
    }

    fn track_width(&self) -> f64 {
        let copies = self.copies as f64;
        self.copy_width() * copies
    }

    fn rendered_copies(&self) -> usize {
        self.copies
    }
}

#[cfg(test)]
mod tests {
    use super::{LayoutProbe, Measurement, UniformLayout, measure};

    struct Unlaid;

    impl LayoutProbe for Unlaid {
        fn first_item_width(&self) -> f64 {
            f64::NAN
        }

        fn item_count(&self) -> usize {
            3
        }

        fn container_width(&self) -> f64 {
            -1.0
        }

        fn track_width(&self) -> f64 {
            f64::INFINITY
        }

        fn rendered_copies(&self) -> usize {
            1
        }
    }

    #[test]
    fn uniform_layout_reports_single_copy() {
        let layout = UniformLayout::new(300.0, 4, 1000.0);
        let m = measure(&layout);
        assert_eq!(m.item_width, 300.0);
        assert_eq!(m.item_count, 4);
        assert_eq!(m.container_width, 1000.0);
        assert_eq!(m.track_width, 1200.0);
        assert_eq!(m.rendered_copies, 1);
        assert_eq!(m.needed_width(), 1200.0);
        assert!(m.is_ready());
    }

    #[test]
    fn gaps_count_toward_track_but_not_item_width() {
        let layout = UniformLayout::new(280.0, 3, 800.0)
            .with_gap(16.0)
            .with_copies(2);
        let m = measure(&layout);
        assert_eq!(m.item_width, 280.0);
        assert_eq!(m.needed_width(), 840.0);
        assert_eq!(m.track_width, 2.0 * 3.0 * 296.0);
    }

    #[test]
    fn empty_track_is_not_ready() {
        let m = measure(&UniformLayout::new(300.0, 0, 1000.0));
        assert_eq!(m.item_width, 0.0);
        assert_eq!(m.track_width, 0.0);
        assert!(!m.is_ready());

        assert!(!Measurement::default().is_ready());
    }

    #[test]
    fn garbage_widths_read_as_zero() {
        let m = measure(&Unlaid);
        assert_eq!(m.item_width, 0.0);
        assert_eq!(m.container_width, 0.0);
        assert_eq!(m.track_width, 0.0);
        assert!(!m.is_ready());
    }

    #[test]
    fn probes_work_through_references() {
        let layout = UniformLayout::new(100.0, 2, 150.0);
        let by_ref: &dyn LayoutProbe = &layout;
        assert_eq!(measure(&by_ref), measure(&layout));
    }
}
