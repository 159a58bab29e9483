//! Filter Resolution Tests
//!
//! Which server-side mode wins when several preconditions hold, and the
//! client-side pass that follows.

use chrono::NaiveDate;
use rstest::rstest;

use crate::core::catalog::{refine, resolve, FilterInputs, FilterQuery, SortOrder};
use crate::tests::common::fixtures::tour;

fn date(day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2026, 7, day)
}

fn inputs(
    dates: bool,
    period: bool,
    price: bool,
    text: &str,
) -> FilterInputs {
    // Fields are set directly to reach states the setters would prevent.
    FilterInputs {
        date_from: dates.then(|| date(1)).flatten(),
        date_to: dates.then(|| date(10)).flatten(),
        min_days: period.then_some(3),
        max_price: price.then_some(800.0),
        search_text: text.to_string(),
        ..Default::default()
    }
}

#[rstest]
#[case::all_modes(true, true, true, "peru", "date_range")]
#[case::date_and_price(true, false, true, "", "date_range")]
#[case::period_and_price(false, true, true, "", "period")]
#[case::price_and_text(false, false, true, "peru", "price_segment")]
#[case::text_only(false, false, false, "peru", "text_search")]
#[case::nothing(false, false, false, "", "listing")]
fn test_first_satisfied_mode_wins(
    #[case] dates: bool,
    #[case] period: bool,
    #[case] price: bool,
    #[case] text: &str,
    #[case] expected: &str,
) {
    assert_eq!(resolve(&inputs(dates, period, price, text)).mode_name(), expected);
}

#[test]
fn test_date_range_beats_price_segment() {
    let query = resolve(&inputs(true, false, true, ""));
    match query {
        FilterQuery::DateRange { from, to, .. } => {
            assert_eq!(Some(from), date(1));
            assert_eq!(Some(to), date(10));
        }
        other => panic!("expected DateRange, got {other:?}"),
    }
}

#[test]
fn test_client_pass_applies_under_server_mode() {
    let mut filters = FilterInputs::new();
    filters.set_date_range(date(1), date(10));
    filters.search_text = "inca".into();
    filters.sort = Some(SortOrder::PriceDesc);

    let fetched = vec![
        tour("1", "Inca Trail", "Peru", 1200.0, 4.8),
        tour("2", "Lima Food Walk", "Peru", 90.0, 4.1),
        tour("3", "Inca Express", "Cusco", 1500.0, 4.0),
    ];

    let shown = refine(fetched, &filters);
    let ids: Vec<&str> = shown.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["3", "1"]);
}
