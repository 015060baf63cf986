// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Understory demos.
//!
//! The marquee demo drives two independent rows, news and events, each with
//! its own [`Marquee`] instance and speed, against a fake layout.

use understory_marquee::{
    ConfigError, CopyKey, ManualScheduler, Marquee, MarqueeConfig, UniformLayout,
};

/// A card shown in a demo row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    /// Stable id of the card.
    pub id: u32,
    /// Headline.
    pub title: &'static str,
    /// Date line.
    pub date: &'static str,
}

/// Sample news cards.
pub const NEWS: &[Card] = &[
    Card {
        id: 1,
        title: "New Giraffe Enclosure Opens",
        date: "2025-01-05",
    },
    Card {
        id: 2,
        title: "Conservation Talk Series",
        date: "2025-01-12",
    },
    Card {
        id: 3,
        title: "Tiger Health Milestone",
        date: "2025-01-18",
    },
];

/// Sample event cards.
pub const EVENTS: &[Card] = &[
    Card {
        id: 1,
        title: "Night Safari Pilot",
        date: "2025-02-02",
    },
    Card {
        id: 2,
        title: "Vet Q&A Session",
        date: "2025-02-10",
    },
    Card {
        id: 3,
        title: "Enrichment Workshop",
        date: "2025-02-15",
    },
    Card {
        id: 4,
        title: "Kids Conservation Quiz",
        date: "2025-02-22",
    },
];

/// One simulated row: a marquee plus the fake layout standing in for a host.
#[derive(Debug)]
pub struct Row {
    /// Row heading.
    pub name: &'static str,
    /// Cards in one lap.
    pub cards: &'static [Card],
    /// The row's marquee.
    pub marquee: Marquee<ManualScheduler>,
    layout: UniformLayout,
}

impl Row {
    /// Creates a row of `card_width` cards separated by `gap` in a container
    /// of `container_width`, then mounts and lays it out.
    pub fn new(
        name: &'static str,
        cards: &'static [Card],
        config: MarqueeConfig,
        card_width: f64,
        gap: f64,
        container_width: f64,
    ) -> Result<Self, ConfigError> {
        let mut row = Self {
            name,
            cards,
            marquee: Marquee::new(config, ManualScheduler::new())?,
            layout: UniformLayout::new(card_width, cards.len(), container_width).with_gap(gap),
        };
        row.marquee.mount();
        row.relayout();
        Ok(row)
    }

    /// Measures, "renders" the planned number of copies, and measures again.
    pub fn relayout(&mut self) {
        let plan = self.marquee.measure(&self.layout);
        self.layout = self.layout.with_copies(plan.repeat_count);
        self.marquee.measure(&self.layout);
    }

    /// Changes the container width, as a window resize would.
    pub fn resize(&mut self, container_width: f64) {
        self.layout.container_width = container_width;
        self.relayout();
    }

    /// Keys of every card the host would render, in display order.
    pub fn rendered_keys(&self) -> Vec<(CopyKey, u32)> {
        self.marquee
            .plan()
            .repeat(self.cards)
            .map(|(key, card)| (key, card.id))
            .collect()
    }

    /// Delivers the pending frame, if any, and returns the applied offset.
    pub fn tick(&mut self, timestamp_ms: f64) -> Option<f64> {
        self.marquee.scheduler_mut().take_pending()?;
        self.marquee.on_frame(timestamp_ms).offset
    }
}

/// The two demo rows with the speeds their sections used: 30 px/s for news,
/// 25 px/s for events.
pub fn demo_rows(container_width: f64) -> Result<[Row; 2], ConfigError> {
    Ok([
        Row::new(
            "Latest News",
            NEWS,
            MarqueeConfig::with_speed(30.0),
            280.0,
            16.0,
            container_width,
        )?,
        Row::new(
            "Upcoming Events",
            EVENTS,
            MarqueeConfig::with_speed(25.0),
            260.0,
            16.0,
            container_width,
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::demo_rows;

    #[test]
    fn rows_loop_in_a_narrow_container() {
        let [mut news, mut events] = demo_rows(600.0).unwrap();
        assert!(news.marquee.is_animating());
        assert!(events.marquee.is_animating());

        // A news lap is 840 px of cards: ceil(1200 / 840) + 1 copies.
        assert_eq!(news.marquee.plan().repeat_count, 3);
        assert_eq!(news.rendered_keys().len(), 9);
        assert_eq!(news.marquee.plan().single_copy_width, 888.0);

        news.tick(0.0);
        events.tick(0.0);
        let news_offset = news.tick(1_000.0).unwrap();
        let events_offset = events.tick(1_000.0).unwrap();
        assert!((news_offset - 30.0).abs() < 1e-9);
        assert!((events_offset - 25.0).abs() < 1e-9);
    }

    #[test]
    fn rows_stop_when_the_container_grows() {
        let [mut news, _] = demo_rows(600.0).unwrap();
        news.resize(2_000.0);
        assert!(!news.marquee.is_animating());
        assert_eq!(news.rendered_keys().len(), 3);
        assert_eq!(news.tick(0.0), None);
    }
}
