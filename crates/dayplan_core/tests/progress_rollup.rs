use dayplan_core::model::schedule::Schedule;
use dayplan_core::progress::{
    completion_ratio, interval_progress, overall_progress, schedule_progress,
};
use uuid::Uuid;

fn schedule(start_at: i64, end_at: i64) -> Schedule {
    Schedule::new(Uuid::new_v4(), "span", start_at, end_at)
}

#[test]
fn progress_never_decreases_as_time_advances() {
    let item = schedule(1_000, 9_000);
    let mut previous = 0;
    for now in (0..12_000).step_by(250) {
        let current = schedule_progress(&item, now);
        assert!(
            current >= previous,
            "progress went backwards at now={now}: {previous} -> {current}"
        );
        previous = current;
    }
    assert_eq!(previous, 100);
}

#[test]
fn progress_stays_within_percent_bounds() {
    for now in [-1_000, 0, 500, 999, 1_000, 5_000, 100_000] {
        let value = interval_progress(1_000, 2_000, now);
        assert!(value <= 100);
    }
}

#[test]
fn overall_progress_is_the_mean_of_items() {
    let items = vec![
        schedule(0, 100),  // 100% at now=200
        schedule(0, 400),  // 50% at now=200
        schedule(200, 300) // 0% at now=200
    ];
    assert_eq!(overall_progress(&items, 200), 50);
}

#[test]
fn aggregates_over_empty_sets_are_zero() {
    assert_eq!(overall_progress(&[], 1_000), 0);
    assert_eq!(completion_ratio(&[]), 0);
}

#[test]
fn completion_ratio_counts_flags_not_time() {
    let mut done = schedule(0, 100);
    done.completed = true;
    let pending = schedule(0, 100);

    // Time has fully elapsed for both, but only one is checked off.
    let items = vec![done, pending];
    assert_eq!(completion_ratio(&items), 50);
    assert_eq!(overall_progress(&items, 1_000), 100);
}

#[test]
fn bad_rows_report_zero_instead_of_failing() {
    let inverted = schedule(5_000, 1_000);
    assert_eq!(schedule_progress(&inverted, 3_000), 0);

    let items = vec![inverted, schedule(0, 100)];
    assert_eq!(overall_progress(&items, 200), 50);
}
