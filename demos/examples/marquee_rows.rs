// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Marquee basics.
//!
//! Simulate two auto-scrolling rows (news and events) at 60 Hz, with a hover,
//! a focus pause and a window resize along the way.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example marquee_rows`

use understory_demos::demo_rows;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() {
    env_logger::init();

    let mut rows = match demo_rows(720.0) {
        Ok(rows) => rows,
        Err(err) => {
            eprintln!("invalid marquee configuration: {err}");
            return;
        }
    };

    for row in &rows {
        let plan = row.marquee.plan();
        println!(
            "{}: loop={} copies={} copy_width={} cards={}",
            row.name,
            plan.loop_enabled,
            plan.repeat_count,
            plan.single_copy_width,
            row.rendered_keys().len(),
        );
        for card in row.cards {
            println!("  #{} {} ({})", card.id, card.title, card.date);
        }
    }

    let [news, events] = &mut rows;
    for frame in 0..=(12 * 60) {
        let t = f64::from(frame) * FRAME_MS;
        match frame {
            // Pointer glides over the news row for two seconds.
            120 => news.marquee.pointer_enter(),
            240 => news.marquee.pointer_leave(),
            // A card in the events row takes focus for three seconds.
            300 => events.marquee.focus(),
            480 => events.marquee.blur(),
            // The window gets wide enough for the news row to fit.
            600 => {
                log::info!("resizing news container to 2000px");
                news.resize(2_000.0);
            }
            _ => {}
        }

        let news_offset = news.tick(t);
        let events_offset = events.tick(t);
        if frame % 60 == 0 {
            println!(
                "t={:>5.1}s  news={:<24} events={:<24}",
                t / 1000.0,
                describe(news_offset, news.marquee.translation()),
                describe(events_offset, events.marquee.translation()),
            );
        }
    }

    for row in &mut rows {
        row.marquee.unmount();
    }
}

fn describe(offset: Option<f64>, translation: kurbo::Vec2) -> String {
    match offset {
        Some(offset) => format!("{offset:7.2}px ({:.2})", translation.x),
        None => "static".to_string(),
    }
}
