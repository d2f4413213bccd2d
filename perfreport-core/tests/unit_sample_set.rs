use chrono::{TimeZone, Utc};
use perfreport_common::{PerfReportError, Sample};
use perfreport_core::SampleSet;

fn sample(duration: i64, successful: bool, error_obtained: bool) -> Sample {
    Sample::new(None, duration, "200", successful, error_obtained)
}

#[test]
fn test_new_set_is_empty() {
    let set = SampleSet::new();
    assert!(set.is_empty());
    assert!(!set.has_samples());
    assert_eq!(set.size(), 0);
    assert_eq!(set.error_count(), 0);
    assert_eq!(set.duration_sum(), 0);
    assert!(set.samples().is_empty());
    assert!(set.sorted_by_latency().is_empty());
}

#[test]
fn test_add_keeps_insertion_order() {
    let mut set = SampleSet::new();
    for d in [30, 10, 20] {
        set.add(sample(d, true, false)).unwrap();
    }
    let durations: Vec<i64> = set.samples().iter().map(|s| s.duration).collect();
    assert_eq!(durations, vec![30, 10, 20]);
    assert_eq!(set.size(), 3);
    assert_eq!(set.duration_sum(), 60);
}

#[test]
fn test_negative_duration_is_rejected_and_not_stored() {
    let mut set = SampleSet::new();
    set.add(sample(5, false, false)).unwrap();
    assert_eq!(set.add(sample(-1, false, false)), Err(PerfReportError::InvalidSample(-1)));
    assert_eq!(set.size(), 1);
    assert_eq!(set.error_count(), 1);
    assert_eq!(set.duration_sum(), 5);
}

#[test]
fn test_zero_duration_is_accepted() {
    let mut set = SampleSet::new();
    assert!(set.add(sample(0, true, false)).is_ok());
    assert_eq!(set.sorted_by_latency(), &[0]);
}

#[test]
fn test_error_count_is_logical_or_of_flags() {
    let mut set = SampleSet::new();
    set.add(sample(1, true, false)).unwrap();
    set.add(sample(1, false, false)).unwrap();
    set.add(sample(1, true, true)).unwrap();
    set.add(sample(1, false, true)).unwrap();
    assert_eq!(set.error_count(), 3);
}

#[test]
fn test_sorted_by_latency_refreshes_after_add() {
    let mut set = SampleSet::new();
    set.add(sample(9, true, false)).unwrap();
    set.add(sample(3, true, false)).unwrap();
    assert_eq!(set.sorted_by_latency(), &[3, 9]);

    set.add(sample(1, true, false)).unwrap();
    assert_eq!(set.sorted_by_latency(), &[1, 3, 9]);
    // raw order untouched
    assert_eq!(set.samples()[0].duration, 9);
}

#[test]
fn test_sort_orders_by_duration_then_timestamp() {
    let t = |ms| Some(Utc.timestamp_millis_opt(ms).unwrap());
    let mut set = SampleSet::new();
    set.add(Sample::new(t(5), 2, "200", true, false)).unwrap();
    set.add(Sample::new(t(1), 2, "200", true, false)).unwrap();
    set.add(Sample::new(None, 2, "200", true, false)).unwrap();
    set.add(Sample::new(t(0), 1, "200", true, false)).unwrap();
    set.sort();

    let order: Vec<(i64, Option<i64>)> = set
        .samples()
        .iter()
        .map(|s| (s.duration, s.timestamp.map(|ts| ts.timestamp_millis())))
        .collect();
    assert_eq!(order, vec![(1, Some(0)), (2, None), (2, Some(1)), (2, Some(5))]);
}

#[test]
fn test_sort_with_many_absent_timestamps() {
    let mut set = SampleSet::new();
    for d in [4, 1, 4, 1, 0] {
        set.add(sample(d, true, false)).unwrap();
    }
    set.sort();
    let durations: Vec<i64> = set.samples().iter().map(|s| s.duration).collect();
    assert_eq!(durations, vec![0, 1, 1, 4, 4]);
}

#[test]
fn test_extreme_durations_do_not_overflow_sum() {
    let mut set = SampleSet::new();
    set.add(sample(i64::MAX, true, false)).unwrap();
    set.add(sample(i64::MAX, true, false)).unwrap();
    assert_eq!(set.size(), 2);
    assert_eq!(set.duration_sum(), 2 * i128::from(i64::MAX));

    let view = perfreport_core::StatisticsView::new(&set, &[50.0]);
    assert_eq!(view.average(), i64::MAX);
    assert_eq!(view.median(), i64::MAX);
}
