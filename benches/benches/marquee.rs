// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use understory_marquee::{
    DuplicationPlanner, ManualScheduler, Marquee, MarqueeConfig, MotionDriver, PlanInputs,
    UniformLayout, plan_duplication,
};

fn bench_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("marquee/plan");

    group.bench_function("plan_duplication", |b| {
        let mut container = 800.0;
        b.iter(|| {
            container += 1.0;
            if container > 4_000.0 {
                container = 800.0;
            }
            black_box(plan_duplication(black_box(1_120.0), container, false))
        });
    });

    // Steady state: layout passes that do not change anything hit the cache.
    group.bench_function("planner_cached", |b| {
        let mut planner = DuplicationPlanner::new();
        let inputs = PlanInputs {
            needed_width: 1_120.0,
            container_width: 1_440.0,
            force_loop: true,
        };
        b.iter(|| black_box(planner.plan(black_box(inputs))));
    });

    group.finish();
}

fn bench_motion(c: &mut Criterion) {
    let mut group = c.benchmark_group("marquee/motion");

    // One minute of 60 Hz frames, with hover toggling every second.
    for frames in [600_u32, 3_600] {
        group.bench_with_input(BenchmarkId::new("frames", frames), &frames, |b, &frames| {
            b.iter_batched(
                || {
                    let mut motion = MotionDriver::new(30.0, 0.25);
                    motion.start();
                    motion
                },
                |mut motion| {
                    for i in 0..frames {
                        if i % 60 == 0 {
                            motion.set_hovering(i % 120 == 0);
                        }
                        let t = f64::from(i) * 16.667;
                        black_box(motion.frame(t, 1_184.0));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_marquee(c: &mut Criterion) {
    let mut group = c.benchmark_group("marquee/controller");

    group.bench_function("measure_and_frame", |b| {
        let layout = UniformLayout::new(280.0, 4, 1_000.0).with_gap(16.0);
        b.iter_batched(
            || {
                let mut marquee =
                    Marquee::new(MarqueeConfig::default(), ManualScheduler::new()).unwrap();
                marquee.mount();
                marquee
            },
            |mut marquee| {
                let plan = marquee.measure(&layout);
                marquee.measure(&layout.with_copies(plan.repeat_count));
                let mut t = 0.0;
                while marquee.scheduler_mut().take_pending().is_some() && t < 1_000.0 {
                    black_box(marquee.on_frame(t));
                    t += 16.667;
                }
                marquee
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_plan, bench_motion, bench_marquee);
criterion_main!(benches);
