use chrono::{NaiveDate, TimeZone, Utc};
use dayplan_core::calendar::{month_of, occurs_on, overlaps_window, starts_on, week_of};
use dayplan_core::model::schedule::{sort_by_priority, Priority, Schedule};
use uuid::Uuid;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ms(y: i32, m: u32, d: u32, h: u32, min: u32) -> i64 {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .unwrap()
        .timestamp_millis()
}

fn schedule(start_at: i64, end_at: i64) -> Schedule {
    Schedule::new(Uuid::new_v4(), "span", start_at, end_at)
}

#[test]
fn day_membership_is_inclusive_and_ignores_time_of_day() {
    // Runs from mid-morning Jan 10 to late evening Jan 12.
    let item = schedule(ms(2024, 1, 10, 9, 30), ms(2024, 1, 12, 23, 45));

    assert!(!occurs_on(&item, date(2024, 1, 9)));
    assert!(occurs_on(&item, date(2024, 1, 10)));
    assert!(occurs_on(&item, date(2024, 1, 11)));
    assert!(occurs_on(&item, date(2024, 1, 12)));
    assert!(!occurs_on(&item, date(2024, 1, 13)));
}

#[test]
fn a_schedule_ending_at_midnight_still_counts_for_that_day() {
    let item = schedule(ms(2024, 1, 10, 8, 0), ms(2024, 1, 11, 0, 0));
    assert!(occurs_on(&item, date(2024, 1, 11)));
}

#[test]
fn starts_on_keys_off_the_start_day_only() {
    let item = schedule(ms(2024, 1, 10, 23, 0), ms(2024, 1, 12, 1, 0));
    assert!(starts_on(&item, date(2024, 1, 10)));
    assert!(!starts_on(&item, date(2024, 1, 11)));
    assert!(!starts_on(&item, date(2024, 1, 12)));
}

#[test]
fn week_window_of_a_wednesday_spans_sunday_to_saturday() {
    // 2024-01-10 is a Wednesday.
    let window = week_of(date(2024, 1, 10));
    assert_eq!(window.from, date(2024, 1, 7));
    assert_eq!(window.to, date(2024, 1, 14));

    // Ends within the week.
    let inside = schedule(ms(2024, 1, 5, 0, 0), ms(2024, 1, 8, 0, 0));
    assert!(overlaps_window(&inside, &window));

    // Entirely before the window.
    let before = schedule(ms(2024, 1, 1, 0, 0), ms(2024, 1, 6, 12, 0));
    assert!(!overlaps_window(&before, &window));

    // Starts on the last day of the window.
    let tail = schedule(ms(2024, 1, 13, 22, 0), ms(2024, 1, 20, 0, 0));
    assert!(overlaps_window(&tail, &window));

    // Starts the day the next week begins.
    let after = schedule(ms(2024, 1, 14, 0, 0), ms(2024, 1, 15, 0, 0));
    assert!(!overlaps_window(&after, &window));
}

#[test]
fn month_window_catches_spans_crossing_its_edges() {
    let window = month_of(date(2024, 2, 15));

    let crossing_in = schedule(ms(2024, 1, 30, 0, 0), ms(2024, 2, 2, 0, 0));
    assert!(overlaps_window(&crossing_in, &window));

    let crossing_out = schedule(ms(2024, 2, 28, 0, 0), ms(2024, 3, 5, 0, 0));
    assert!(overlaps_window(&crossing_out, &window));

    let enclosing = schedule(ms(2024, 1, 1, 0, 0), ms(2024, 12, 31, 0, 0));
    assert!(overlaps_window(&enclosing, &window));

    let previous = schedule(ms(2024, 1, 1, 0, 0), ms(2024, 1, 31, 12, 0));
    assert!(!overlaps_window(&previous, &window));
}

#[test]
fn day_lists_sort_high_medium_low_with_stable_ties() {
    let label = |title: &str, priority: Priority| {
        let mut item = schedule(0, 100);
        item.title = title.to_string();
        item.priority = priority;
        item
    };
    let mut items = vec![
        label("low", Priority::Low),
        label("high", Priority::High),
        label("medium-1", Priority::Medium),
        label("medium-2", Priority::Medium),
    ];

    sort_by_priority(&mut items);
    let order: Vec<&str> = items.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(order, ["high", "medium-1", "medium-2", "low"]);
}
