#![allow(clippy::expect_used)]
//! Cross-checks series expansion against the `rrule` crate.
//!
//! Each case pairs a stored recurrence with the RFC 5545 rule describing the
//! same series. Day-of-month clamping is expressed as "the last of days
//! 28..=N that exists this month" (`BYMONTHDAY=28,..,N;BYSETPOS=-1`).

use chamber_events::recurrence::{ExpansionWindow, expand};
use chamber_events::{Event, MonthlyType, RecurrencePayload};
use chrono::{NaiveDate, NaiveDateTime};
use rrule::RRuleSet;

struct ReferenceCase {
    name: &'static str,
    anchor: &'static str,
    until: &'static str,
    recurrence: RecurrencePayload,
    rrule: &'static str,
    expected_len: Option<usize>,
}

fn reference_cases() -> Vec<ReferenceCase> {
    vec![
        ReferenceCase {
            name: "weekly_monday",
            anchor: "2025-01-06T08:00:00",
            until: "2025-02-03",
            recurrence: RecurrencePayload::weekly(),
            rrule: "FREQ=WEEKLY",
            expected_len: Some(5),
        },
        ReferenceCase {
            name: "weekly_across_year_end",
            anchor: "2024-11-29T18:00:00",
            until: "2025-03-01",
            recurrence: RecurrencePayload::weekly(),
            rrule: "FREQ=WEEKLY",
            expected_len: None,
        },
        ReferenceCase {
            name: "monthly_day_15",
            anchor: "2025-01-15T09:00:00",
            until: "2025-12-31",
            recurrence: RecurrencePayload::monthly(MonthlyType::DayOfMonth),
            rrule: "FREQ=MONTHLY;BYMONTHDAY=15",
            expected_len: Some(12),
        },
        ReferenceCase {
            name: "monthly_day_31_clamped",
            anchor: "2025-01-31T12:00:00",
            until: "2025-12-31",
            recurrence: RecurrencePayload::monthly(MonthlyType::DayOfMonth),
            rrule: "FREQ=MONTHLY;BYMONTHDAY=28,29,30,31;BYSETPOS=-1",
            expected_len: Some(12),
        },
        ReferenceCase {
            name: "monthly_day_30_leap_year",
            anchor: "2024-01-30T07:30:00",
            until: "2024-12-31",
            recurrence: RecurrencePayload::monthly(MonthlyType::DayOfMonth),
            rrule: "FREQ=MONTHLY;BYMONTHDAY=28,29,30;BYSETPOS=-1",
            expected_len: Some(12),
        },
        ReferenceCase {
            name: "monthly_day_29_common_year",
            anchor: "2025-01-29T07:30:00",
            until: "2025-06-30",
            recurrence: RecurrencePayload::monthly(MonthlyType::DayOfMonth),
            rrule: "FREQ=MONTHLY;BYMONTHDAY=28,29;BYSETPOS=-1",
            expected_len: Some(6),
        },
        ReferenceCase {
            name: "monthly_second_tuesday",
            anchor: "2025-01-14T11:30:00",
            until: "2025-12-31",
            recurrence: RecurrencePayload::monthly(MonthlyType::DayOfWeek),
            rrule: "FREQ=MONTHLY;BYDAY=+2TU",
            expected_len: Some(12),
        },
        ReferenceCase {
            name: "monthly_fourth_thursday",
            anchor: "2025-11-27T12:00:00",
            until: "2026-06-30",
            recurrence: RecurrencePayload::monthly(MonthlyType::DayOfWeek),
            rrule: "FREQ=MONTHLY;BYDAY=+4TH",
            expected_len: Some(8),
        },
        ReferenceCase {
            name: "monthly_fifth_friday_skips",
            anchor: "2025-01-31T17:00:00",
            until: "2026-12-31",
            recurrence: RecurrencePayload::monthly(MonthlyType::DayOfWeek),
            rrule: "FREQ=MONTHLY;BYDAY=+5FR",
            expected_len: None,
        },
        ReferenceCase {
            name: "monthly_fifth_sunday_on_29th",
            anchor: "2025-06-29T10:00:00",
            until: "2026-06-30",
            recurrence: RecurrencePayload::monthly(MonthlyType::DayOfWeek),
            rrule: "FREQ=MONTHLY;BYDAY=+5SU",
            expected_len: None,
        },
    ]
}

fn parse_anchor(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .unwrap_or_else(|err| panic!("Failed to parse anchor {value}: {err}"))
}

fn parse_until(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .unwrap_or_else(|err| panic!("Failed to parse until {value}: {err}"))
}

fn reference_dates(
    case: &ReferenceCase,
    anchor: NaiveDateTime,
    until: NaiveDate,
) -> Vec<NaiveDateTime> {
    let rruleset = format!(
        "DTSTART:{}\nRRULE:{};UNTIL={}T235959Z",
        anchor.format("%Y%m%dT%H%M%SZ"),
        case.rrule,
        until.format("%Y%m%d"),
    );
    let rrule_set: RRuleSet = rruleset
        .parse()
        .unwrap_or_else(|err| panic!("Failed to parse {}: {}", case.name, err));

    rrule_set
        .all(500)
        .dates
        .iter()
        .map(|date| date.naive_utc())
        .collect()
}

fn assert_case(case: &ReferenceCase) {
    let anchor = parse_anchor(case.anchor);
    let until = parse_until(case.until);
    let events = [Event::new(case.name, case.name, anchor).recurring(case.recurrence, until)];
    let window = ExpansionWindow::days(anchor.date(), until).expect("window");

    let actual: Vec<NaiveDateTime> = expand(&events, window)
        .occurrences
        .iter()
        .map(|occurrence| occurrence.occurrence_date)
        .collect();

    assert_eq!(
        actual,
        reference_dates(case, anchor, until),
        "Case {} did not match the reference expansion",
        case.name
    );

    if let Some(expected_len) = case.expected_len {
        assert_eq!(
            actual.len(),
            expected_len,
            "Case {} expected {} occurrences",
            case.name,
            expected_len
        );
    }
}

#[test_log::test]
fn series_agree_with_rrule_reference() {
    for case in reference_cases() {
        assert_case(&case);
    }
}
