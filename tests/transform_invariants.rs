use chrono::NaiveDate;
use polars::prelude::{DataFrame, NamedFrom, Series};
use signaldesk::config::Interval;
use signaldesk::data::fallback_series;
use signaldesk::functions::indicators::{add_bollinger_bands, add_macd, add_rsi, add_vwap};
use signaldesk::Result;

type Step = fn(&DataFrame) -> Result<DataFrame>;

fn rsi(df: &DataFrame) -> Result<DataFrame> {
    add_rsi(df, 14)
}

fn bollinger(df: &DataFrame) -> Result<DataFrame> {
    add_bollinger_bands(df, 20, 2.0)
}

fn bars() -> DataFrame {
    let end = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    fallback_series(120, Interval::Daily, end).unwrap()
}

/// Same bars with a few closes and volumes knocked out
fn gapped_bars() -> DataFrame {
    let mut df = bars();
    let mut close: Vec<Option<f64>> =
        df.column("Close").unwrap().f64().unwrap().into_iter().collect();
    let mut volume: Vec<Option<f64>> =
        df.column("Volume").unwrap().f64().unwrap().into_iter().collect();
    for i in [0, 7, 45, 46, 90] {
        close[i] = None;
    }
    volume[3] = None;
    df.with_column(Series::new("Close".into(), close)).unwrap();
    df.with_column(Series::new("Volume".into(), volume)).unwrap();
    df
}

fn assert_keeps_input(input: &DataFrame, out: &DataFrame) {
    assert_eq!(out.height(), input.height());
    let kept = out.select(input.get_column_names_owned()).unwrap();
    assert!(kept.equals_missing(input), "input columns were modified");
}

fn assert_idempotent(input: &DataFrame, step: Step) {
    let once = step(input).unwrap();
    let twice = step(&once).unwrap();
    assert_keeps_input(input, &once);
    assert_eq!(twice.width(), once.width());
    assert_eq!(twice.get_column_names(), once.get_column_names());
    assert!(twice.equals_missing(&once));
}

fn assert_order_independent(input: &DataFrame, first: Step, second: Step) {
    let forward = second(&first(input).unwrap()).unwrap();
    let backward = first(&second(input).unwrap()).unwrap();
    assert_keeps_input(input, &forward);
    assert_keeps_input(input, &backward);
    assert_eq!(forward.width(), backward.width());

    let aligned = backward.select(forward.get_column_names_owned()).unwrap();
    assert!(aligned.equals_missing(&forward));
}

#[test]
fn test_rsi_and_bollinger_are_idempotent() {
    for input in [bars(), gapped_bars()] {
        assert_idempotent(&input, rsi);
        assert_idempotent(&input, bollinger);
    }
}

#[test]
fn test_macd_and_vwap_are_idempotent() {
    for input in [bars(), gapped_bars()] {
        assert_idempotent(&input, add_macd);
        assert_idempotent(&input, add_vwap);
    }
}

#[test]
fn test_rsi_and_bollinger_commute() {
    for input in [bars(), gapped_bars()] {
        assert_order_independent(&input, rsi, bollinger);
    }
}

#[test]
fn test_macd_and_vwap_commute() {
    for input in [bars(), gapped_bars()] {
        assert_order_independent(&input, add_macd, add_vwap);
    }
}
