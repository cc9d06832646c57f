use chapterize_api::domain::{Timecode, TimecodeParseError};

#[test]
fn given_srt_timestamp_when_parsing_then_comma_fraction_is_milliseconds() {
    let tc: Timecode = "01:02:03,456".parse().unwrap();

    assert_eq!(tc.as_millis(), ((60 + 2) * 60 + 3) * 1000 + 456);
}

#[test]
fn given_whole_seconds_when_parsing_then_no_fraction_needed() {
    let tc: Timecode = "00:10:00".parse().unwrap();

    assert_eq!(tc, Timecode::from_secs(600));
}

#[test]
fn given_short_fraction_when_parsing_then_scaled_to_milliseconds() {
    let tc: Timecode = "00:00:01.5".parse().unwrap();

    assert_eq!(tc.as_millis(), 1500);
}

#[test]
fn given_timecode_when_displayed_then_zero_padded_with_millis() {
    let tc = Timecode::from_millis(3_723_004);

    assert_eq!(tc.to_string(), "01:02:03.004");
}

#[test]
fn given_displayed_timecode_when_parsed_back_then_equal() {
    let tc = Timecode::from_millis(98_765_432);

    assert_eq!(tc.to_string().parse::<Timecode>().unwrap(), tc);
}

#[test]
fn given_minutes_over_59_when_parsing_then_out_of_range() {
    let result = "00:61:00".parse::<Timecode>();

    assert!(matches!(result, Err(TimecodeParseError::OutOfRange(_))));
}

#[test]
fn given_garbage_when_parsing_then_malformed() {
    for raw in ["", "12:34", "aa:bb:cc", "00:00:01,1234", "00:00:01,"] {
        assert!(
            matches!(raw.parse::<Timecode>(), Err(TimecodeParseError::Malformed(_))),
            "expected malformed for {:?}",
            raw
        );
    }
}

#[test]
fn given_earlier_timecode_when_measuring_then_saturates_at_zero() {
    let a = Timecode::from_secs(10);
    let b = Timecode::from_secs(25);

    assert_eq!(b.millis_since(a), 15_000);
    assert_eq!(a.millis_since(b), 0);
}

#[test]
fn given_timecode_when_serialized_then_json_string() {
    let json = serde_json::to_value(Timecode::from_secs(5)).unwrap();

    assert_eq!(json, "00:00:05.000");
}

#[test]
fn given_hours_beyond_millisecond_range_when_parsing_then_out_of_range() {
    for raw in ["10000000000000000:00:00", "5124095576032:00:00.000"] {
        assert!(
            matches!(raw.parse::<Timecode>(), Err(TimecodeParseError::OutOfRange(_))),
            "expected out of range for {:?}",
            raw
        );
    }
}

#[test]
fn given_huge_second_count_when_building_then_saturates() {
    assert_eq!(Timecode::from_secs(u64::MAX).as_millis(), u64::MAX);
}
