use planline::plan::{
    Course, Moment, Module, PedagogicalType, RawDuration, Step, parse_course,
};
use planline::timeline::dimension::{CategoryKey, Dimension};
use planline::timeline::duration::to_seconds;
use planline::timeline::layout::LayoutOptions;
use planline::timeline::recompute;
use planline::timeline::scale::OverflowPolicy;
use planline::timeline::scroll::ScrollCoordinator;

fn secs(seconds: f64) -> RawDuration {
    RawDuration::new(seconds, 1.0)
}

fn single_moment(title: &str, target: RawDuration, steps: Vec<Step>) -> Module {
    Module::new(title, target, vec![Moment::new("m", steps)])
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn lab_and_demo_split_one_module() {
    let course = Course::new(
        "Scenario",
        vec![single_moment(
            "A",
            RawDuration::unset(),
            vec![
                Step::new("lab", PedagogicalType::Lab, secs(600.0)),
                Step::new("demo", PedagogicalType::Demonstration, secs(1200.0)),
            ],
        )],
    );
    let report = recompute(&course, &LayoutOptions::default());

    assert_eq!(report.aggregate.modules[0].designed_seconds, 1800.0);
    let segments = &report.layout.modules[0].pedagogy.segments;
    assert!(approx(segments[0].width_pct, 33.333_333));
    assert!(approx(segments[1].width_pct, 66.666_667));

    let buckets = &report.pedagogy.buckets;
    assert_eq!(buckets[0].key, CategoryKey::Pedagogy(PedagogicalType::Lab));
    assert_eq!(buckets[0].rounded_pct(), 33);
    assert_eq!(
        buckets[1].key,
        CategoryKey::Pedagogy(PedagogicalType::Demonstration)
    );
    assert_eq!(buckets[1].rounded_pct(), 67);
}

#[test]
fn exact_target_and_estimated_module_share_axis() {
    let course = Course::new(
        "Scenario",
        vec![
            single_moment(
                "A",
                secs(1800.0),
                vec![Step::new("a", PedagogicalType::Lab, secs(1800.0))],
            ),
            single_moment(
                "B",
                RawDuration::unset(),
                vec![Step::new("b", PedagogicalType::Lab, secs(900.0))],
            ),
        ],
    );
    let report = recompute(&course, &LayoutOptions::default());
    let layout = &report.layout;

    assert_eq!(layout.scale.total_seconds, 2700.0);
    assert!(approx(layout.modules[0].width_pct, 66.666_667));
    assert!(approx(layout.modules[1].width_pct, 33.333_333));
    assert!(!layout.modules[0].overflow);
    assert!(!layout.modules[0].estimated);
    assert!(layout.modules[1].estimated);
}

#[test]
fn overrun_is_flagged_and_fill_capped() {
    let course = Course::new(
        "Scenario",
        vec![single_moment(
            "A",
            secs(3600.0),
            vec![Step::new("a", PedagogicalType::Collaboration, secs(5400.0))],
        )],
    );
    let report = recompute(&course, &LayoutOptions::default());
    let m = &report.layout.modules[0];
    assert!(m.overflow);
    assert!(approx(m.fill_ratio, 1.5));
    assert_eq!(m.visible_fill_pct(), 100.0);
}

#[test]
fn tolerant_policy_ignores_small_overrun() {
    let course = Course::new(
        "Scenario",
        vec![single_moment(
            "A",
            secs(3600.0),
            vec![Step::new("a", PedagogicalType::Lab, secs(3630.0))],
        )],
    );
    let strict = recompute(&course, &LayoutOptions::default());
    assert!(strict.layout.modules[0].overflow);

    let options = LayoutOptions {
        overflow_policy: OverflowPolicy::Tolerant,
        ..LayoutOptions::default()
    };
    let tolerant = recompute(&course, &options);
    assert!(!tolerant.layout.modules[0].overflow);
}

#[test]
fn negative_duration_counts_as_zero() {
    assert_eq!(to_seconds(-5.0, 60.0), 0.0);
}

#[test]
fn zoom_is_clamped() {
    let mut coordinator = ScrollCoordinator::default();
    coordinator.set_zoom(10.0);
    assert_eq!(coordinator.zoom(), 3.0);
    coordinator.set_zoom(0.01);
    assert_eq!(coordinator.zoom(), 0.5);
}

#[test]
fn empty_course_yields_empty_render() {
    let report = recompute(&Course::default(), &LayoutOptions::default());
    assert!(report.layout.is_empty());
    assert!(report.layout.ruler.is_empty());
    assert!(report.pedagogy.is_empty());
    assert!(report.bars.iter().all(|c| c.is_empty()));
}

#[test]
fn project_export_round_trips_into_layout() {
    let json = r#"{
        "keyParams": { "name": "Cours réseau", "learningTimeUnit": "hours" },
        "activities": [
            {
                "title": "Fondamentaux",
                "targetTime": "2",
                "targetUnit": 3600,
                "moments": [
                    {
                        "title": "Accueil",
                        "steps": [
                            { "title": "Tour de table", "type": "collaboration",
                              "duration": 15, "unit": 60, "groupMode": "class",
                              "trainer": "present", "place": "situ", "time": "sync" },
                            { "title": "Quiz", "type": "evaluation", "gwsTool": "Forms",
                              "duration": "45", "groupMode": "individual",
                              "trainer": "absent", "place": "online", "time": "async" }
                        ]
                    }
                ]
            },
            { "title": "", "moments": [] }
        ]
    }"#;
    let course = parse_course(json).unwrap();
    assert_eq!(course.name, "Cours réseau");
    assert_eq!(course.learning_time_unit, "hours");
    assert_eq!(course.step_count(), 2);

    let report = recompute(&course, &LayoutOptions::default());
    let module = &report.aggregate.modules[0];
    assert_eq!(module.target_seconds, 7200.0);
    assert_eq!(module.designed_seconds, 3600.0);
    assert_eq!(report.aggregate.modules[1].title, "Module 2");

    // the empty second module is not drawn
    assert_eq!(report.layout.modules.len(), 1);
    let m = &report.layout.modules[0];
    assert!(approx(m.inner_width_pct, 50.0));
    assert!(approx(m.missing_pct.unwrap_or_default(), 50.0));

    let tools = report.bar(Dimension::Tool).unwrap();
    let labels: Vec<&str> = tools.buckets.iter().map(|b| b.label()).collect();
    assert_eq!(labels, vec!["Général", "Google Forms"]);
}

#[test]
fn malformed_export_is_an_error() {
    assert!(parse_course("{ not json").is_err());
}
