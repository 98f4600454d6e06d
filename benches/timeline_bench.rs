use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use planline::plan::{Course, GroupMode, Moment, Module, PedagogicalType, RawDuration, Step};
use planline::timeline::aggregate::aggregate;
use planline::timeline::layout::{LayoutOptions, compute_layout};
use planline::timeline::recompute;
use planline::timeline::scroll::ScrollCoordinator;
use planline::ui::theme::Theme;
use planline::ui::timeline_widget::{self, TRACK_COUNT};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use std::hint::black_box;
use std::time::Duration;

const TYPES: [PedagogicalType; 5] = [
    PedagogicalType::Lab,
    PedagogicalType::Demonstration,
    PedagogicalType::Collaboration,
    PedagogicalType::Evaluation,
    PedagogicalType::Scenario,
];

const GROUPS: [GroupMode; 3] = [GroupMode::Class, GroupMode::Groups, GroupMode::Individual];

/// `steps` steps spread over modules of ten moments of ten steps.
fn make_course(steps: usize) -> Course {
    let modules = steps.div_ceil(100);
    Course::new(
        "bench",
        (0..modules)
            .map(|m| {
                let moments = (0..10)
                    .map(|k| {
                        let steps = (0..10)
                            .map(|s| {
                                let i = m * 100 + k * 10 + s;
                                Step::new(
                                    &format!("step_{i}"),
                                    TYPES[i % TYPES.len()].clone(),
                                    RawDuration::minutes((i % 45) as f64),
                                )
                                .with_group_mode(GROUPS[i % GROUPS.len()].clone())
                                .with_tool(if i % 3 == 0 { "" } else { "Docs" })
                            })
                            .collect();
                        Moment::new(&format!("moment_{k}"), steps)
                    })
                    .collect();
                let target = if m % 2 == 0 { 1500.0 } else { 0.0 };
                Module::new(&format!("module_{m}"), RawDuration::minutes(target), moments)
            })
            .collect(),
    )
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_500_1000_2000");

    for size in [500usize, 1000, 2000] {
        let course = make_course(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &course, |b, course| {
            b.iter(|| black_box(aggregate(black_box(course))))
        });
    }

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_500_1000_2000");
    let options = LayoutOptions::default();

    for size in [500usize, 1000, 2000] {
        let agg = aggregate(&make_course(size));
        group.bench_with_input(BenchmarkId::from_parameter(size), &agg, |b, agg| {
            b.iter(|| black_box(compute_layout(black_box(agg), &options)))
        });
    }

    group.finish();
}

fn bench_full_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute_500_1000_2000");
    let options = LayoutOptions::default();

    for size in [500usize, 1000, 2000] {
        let course = make_course(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &course, |b, course| {
            b.iter(|| black_box(recompute(black_box(course), &options)))
        });
    }

    group.finish();
}

fn bench_timeline_widget_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline_widget_render_500_1000_2000");
    let theme = Theme::dark();
    let area = Rect::new(0, 0, 160, timeline_widget::HEIGHT);

    for size in [500usize, 1000, 2000] {
        let report = recompute(&make_course(size), &LayoutOptions::default());
        let mut coordinator = ScrollCoordinator::new(TRACK_COUNT, Duration::ZERO);
        coordinator.set_viewport(timeline_widget::track_area(area).width);
        coordinator.set_zoom(2.0);

        group.bench_with_input(BenchmarkId::from_parameter(size), &report, |b, report| {
            b.iter(|| {
                let backend = TestBackend::new(area.width, area.height);
                let mut terminal = Terminal::new(backend).expect("bench terminal init failed");
                terminal
                    .draw(|frame| {
                        timeline_widget::render(
                            frame,
                            area,
                            black_box(&report.layout),
                            &coordinator,
                            Some(0),
                            &theme,
                        );
                    })
                    .expect("bench draw failed");
                black_box(terminal.backend());
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_aggregate,
    bench_layout,
    bench_full_recompute,
    bench_timeline_widget_render
);
criterion_main!(benches);
