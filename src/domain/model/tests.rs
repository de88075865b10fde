// Unit tests for domain models

use super::*;

#[test]
fn test_time_spec_parse_seconds() {
    let time = TimeSpec::parse("90.5").unwrap();
    assert_eq!(time.seconds, 90.5);
}

#[test]
fn test_time_spec_parse_hh_mm_ss() {
    let time = TimeSpec::parse("00:01:30").unwrap();
    assert_eq!(time.seconds, 90.0);

    let time = TimeSpec::parse("01:02:03.5").unwrap();
    assert_eq!(time.seconds, 3723.5);
}

#[test]
fn test_time_spec_parse_hh_mm() {
    let time = TimeSpec::parse("01:30").unwrap();
    assert_eq!(time.seconds, 5400.0);

    let time = TimeSpec::parse("0:15").unwrap();
    assert_eq!(time.seconds, 900.0);

    assert!(matches!(
        TimeSpec::parse("01:75"),
        Err(DomainError::InvalidFormat { .. })
    ));
    // Fractions belong to the seconds field only
    assert!(matches!(
        TimeSpec::parse("01:30.25"),
        Err(DomainError::InvalidNumber { .. })
    ));
}

#[test]
fn test_time_spec_parse_trims_whitespace() {
    let time = TimeSpec::parse("  12.5 \t").unwrap();
    assert_eq!(time.seconds, 12.5);
}

#[test]
fn test_time_spec_parse_empty_is_invalid_format() {
    assert!(matches!(
        TimeSpec::parse(""),
        Err(DomainError::InvalidFormat { .. })
    ));
    assert!(matches!(
        TimeSpec::parse("   "),
        Err(DomainError::InvalidFormat { .. })
    ));
}

#[test]
fn test_time_spec_parse_bad_shapes() {
    assert!(matches!(
        TimeSpec::parse("1:2:3:4"),
        Err(DomainError::InvalidFormat { .. })
    ));
    assert!(matches!(
        TimeSpec::parse("01::30"),
        Err(DomainError::InvalidFormat { .. })
    ));
    assert!(matches!(
        TimeSpec::parse("00:61:00"),
        Err(DomainError::InvalidFormat { .. })
    ));
    assert!(matches!(
        TimeSpec::parse("00:00:60"),
        Err(DomainError::InvalidFormat { .. })
    ));
}

#[test]
fn test_time_spec_parse_bad_numbers() {
    assert!(matches!(
        TimeSpec::parse("abc"),
        Err(DomainError::InvalidNumber { .. })
    ));
    assert!(matches!(
        TimeSpec::parse("1.2.3"),
        Err(DomainError::InvalidNumber { .. })
    ));
    assert!(matches!(
        TimeSpec::parse("-10"),
        Err(DomainError::InvalidNumber { .. })
    ));
    assert!(matches!(
        TimeSpec::parse("inf"),
        Err(DomainError::InvalidNumber { .. })
    ));
    assert!(matches!(
        TimeSpec::parse("aa:00:10"),
        Err(DomainError::InvalidNumber { .. })
    ));
}

#[test]
fn test_time_spec_comma_is_not_a_decimal_separator() {
    assert!(matches!(
        TimeSpec::parse("90,5"),
        Err(DomainError::InvalidNumber { .. })
    ));
}

#[test]
fn test_time_spec_display() {
    let time = TimeSpec::from_components(1, 2, 3, 456);
    assert_eq!(format!("{}", time), "01:02:03.456");
    assert_eq!(TimeSpec::from_seconds(90.5).to_string(), "00:01:30.500");
}

#[test]
fn test_time_spec_to_arg() {
    assert_eq!(TimeSpec::from_seconds(90.5).to_arg(), "90.5");
    assert_eq!(TimeSpec::from_seconds(20.0).to_arg(), "20");
    assert_eq!(TimeSpec::from_seconds(0.0000001).to_arg(), "0.0000001");
}

#[test]
fn test_interval_rejects_empty_or_reversed() {
    assert!(matches!(
        Interval::from_seconds(5.0, 5.0),
        Err(DomainError::InvalidRange { .. })
    ));
    assert!(matches!(
        Interval::from_seconds(10.0, 2.0),
        Err(DomainError::InvalidRange { .. })
    ));
    let interval = Interval::from_seconds(2.0, 10.0).unwrap();
    assert_eq!(interval.length().seconds, 8.0);
}

#[test]
fn test_cut_list_normalizes_on_add() {
    let mut cuts = CutList::new();
    cuts.add(Interval::from_seconds(10.0, 12.0).unwrap());
    cuts.add(Interval::from_seconds(1.0, 5.0).unwrap());
    cuts.add(Interval::from_seconds(0.0, 2.0).unwrap());

    let expected = vec![
        Interval::from_seconds(0.0, 5.0).unwrap(),
        Interval::from_seconds(10.0, 12.0).unwrap(),
    ];
    assert_eq!(cuts.intervals(), expected.as_slice());
}

#[test]
fn test_cut_list_rejects_invalid_range_without_inserting() {
    let mut cuts = CutList::new();
    cuts.add_parsed("10", "20").unwrap();

    let err = cuts.add_parsed("00:00:30", "00:00:25").unwrap_err();
    assert!(matches!(err, DomainError::InvalidRange { .. }));
    assert_eq!(cuts.len(), 1);

    let err = cuts.add_parsed("", "5").unwrap_err();
    assert!(matches!(err, DomainError::InvalidFormat { .. }));
    assert_eq!(cuts.len(), 1);
}

#[test]
fn test_cut_list_remove_and_clear() {
    let mut cuts = CutList::from_intervals(vec![
        Interval::from_seconds(50.0, 70.0).unwrap(),
        Interval::from_seconds(10.0, 20.0).unwrap(),
    ]);

    let removed = cuts.remove(0).unwrap();
    assert_eq!(removed, Interval::from_seconds(10.0, 20.0).unwrap());
    assert_eq!(cuts.len(), 1);
    assert!(cuts.remove(5).is_none());

    cuts.clear();
    assert!(cuts.is_empty());
}

#[test]
fn test_cut_list_keep_snapshot_is_independent() {
    let mut cuts = CutList::new();
    cuts.add_parsed("10", "20").unwrap();
    let keep = cuts.keep_segments(TimeSpec::from_seconds(100.0));

    cuts.add_parsed("30", "40").unwrap();
    assert_eq!(keep.len(), 2);
    assert_eq!(cuts.keep_segments(TimeSpec::from_seconds(100.0)).len(), 3);
}

#[test]
fn test_trim_strategy_parse() {
    assert_eq!(TrimStrategy::parse("copy").unwrap(), TrimStrategy::FastCopy);
    assert_eq!(
        TrimStrategy::parse("Precise").unwrap(),
        TrimStrategy::PreciseReencode
    );
    assert_eq!(TrimStrategy::from_precise(true), TrimStrategy::PreciseReencode);
    assert!(matches!(
        TrimStrategy::parse("auto"),
        Err(DomainError::Config(_))
    ));
}

#[test]
fn test_export_phase_terminal() {
    assert!(ExportPhase::Done.is_terminal());
    assert!(ExportPhase::Canceled.is_terminal());
    assert!(ExportPhase::Failed.is_terminal());
    assert!(!ExportPhase::Concatenating.is_terminal());
    assert_eq!(
        ExportPhase::ExtractingSegment { index: 0, total: 3 }.to_string(),
        "extracting segment 1/3"
    );
}
