use polars::df;
use polars::prelude::DataFrame;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use signaldesk::functions::frame::{float_values, signal_values};
use signaldesk::functions::indicators::{
    add_bollinger_bands, add_ema_cross, add_ma_cross, add_macd, add_rsi, add_vwap, MACD,
};
use signaldesk::types::Signal;
use signaldesk::SignalDeskError;

fn random_walk(seed: u64, len: usize) -> DataFrame {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = 100.0;
    let mut close = Vec::with_capacity(len);
    let mut volume = Vec::with_capacity(len);
    for _ in 0..len {
        price = f64::max(price + rng.gen_range(-2.0..2.0), 1.0);
        close.push(price);
        volume.push(rng.gen_range(100.0..1000.0));
    }
    let high: Vec<f64> = close.iter().map(|c| c + 1.0).collect();
    let low: Vec<f64> = close.iter().map(|c| c - 0.5).collect();

    df! {
        "Open" => close.clone(),
        "High" => high,
        "Low" => low,
        "Close" => close,
        "Volume" => volume,
    }
    .unwrap()
}

/// Non-neutral signals must flip between Buy and Sell.
fn assert_alternating(signals: &[Signal]) {
    let fired: Vec<Signal> = signals.iter().copied().filter(|s| *s != Signal::Neutral).collect();
    for pair in fired.windows(2) {
        assert_ne!(pair[0], pair[1], "crossover fired {:?} twice in a row", pair[0]);
    }
}

#[test]
fn test_rsi_bounded_and_thresholded() {
    for seed in 0..10 {
        let df = add_rsi(&random_walk(seed, 300), 14).unwrap();
        let rsi = float_values(&df, "RSI").unwrap();
        let signals = signal_values(&df, "RSI_signal").unwrap();

        assert!(rsi[..14].iter().all(Option::is_none));
        for (value, signal) in rsi.iter().zip(&signals) {
            let expected = match value {
                Some(v) => {
                    assert!((0.0..=100.0).contains(v), "RSI out of range: {}", v);
                    if *v < 30.0 {
                        Signal::Buy
                    } else if *v > 70.0 {
                        Signal::Sell
                    } else {
                        Signal::Neutral
                    }
                }
                None => Signal::Neutral,
            };
            assert_eq!(*signal, expected);
        }
    }
}

#[test]
fn test_macd_signal_is_binary() {
    let macd = MACD::default();
    for seed in 0..5 {
        let df = add_macd(&random_walk(seed, 200)).unwrap();
        let line = float_values(&df, &macd.line_column()).unwrap();
        let signal_line = float_values(&df, &macd.signal_line_column()).unwrap();
        let histogram = float_values(&df, &macd.histogram_column()).unwrap();
        let signals = signal_values(&df, "MACD_signal").unwrap();

        for i in 0..df.height() {
            let (m, s, h) = (line[i].unwrap(), signal_line[i].unwrap(), histogram[i].unwrap());
            assert!((h - (m - s)).abs() < 1e-9);
            let expected = if m > s { Signal::Buy } else { Signal::Sell };
            assert_eq!(signals[i], expected);
        }
    }
}

#[test]
fn test_crossovers_alternate_and_skip_first_bar() {
    for seed in 0..10 {
        let df = random_walk(seed, 400);
        let df = add_ma_cross(&df, 10, 30).unwrap();
        let df = add_ema_cross(&df, 5, 20).unwrap();

        for column in ["MA_signal", "EMA_signal"] {
            let signals = signal_values(&df, column).unwrap();
            assert_eq!(signals[0], Signal::Neutral);
            assert_alternating(&signals);
        }

        // The SMA crossover cannot fire before the long window fills
        let ma = signal_values(&df, "MA_signal").unwrap();
        assert!(ma[..29].iter().all(|s| *s == Signal::Neutral));
    }
}

#[test]
fn test_crossover_fires_only_on_state_change() {
    let df = random_walk(7, 300);
    let df = add_ema_cross(&df, 5, 20).unwrap();
    let short = float_values(&df, "EMA_short").unwrap();
    let long = float_values(&df, "EMA_long").unwrap();
    let signals = signal_values(&df, "EMA_signal").unwrap();

    for i in 1..df.height() {
        let above = |j: usize| matches!((short[j], long[j]), (Some(s), Some(l)) if s > l);
        let expected = match (above(i - 1), above(i)) {
            (false, true) => Signal::Buy,
            (true, false) => Signal::Sell,
            _ => Signal::Neutral,
        };
        assert_eq!(signals[i], expected, "bar {}", i);
    }
}

#[test]
fn test_bollinger_constant_series() {
    for price in [50.0, 0.1, 0.3, 123.456, 20000.1] {
        let df = df! { "Close" => vec![price; 30] }.unwrap();
        let df = add_bollinger_bands(&df, 20, 2.0).unwrap();

        let lower = float_values(&df, "BBL_20_2").unwrap();
        let middle = float_values(&df, "BBM_20_2").unwrap();
        let upper = float_values(&df, "BBU_20_2").unwrap();
        let signals = signal_values(&df, "BB_signal").unwrap();

        assert!(signals[..19].iter().all(|s| *s == Signal::Neutral));
        for i in 19..30 {
            assert_eq!(lower[i], Some(price), "lower band of {} at {}", price, i);
            assert_eq!(middle[i], Some(price), "middle band of {} at {}", price, i);
            assert_eq!(upper[i], Some(price), "upper band of {} at {}", price, i);
            assert_eq!(signals[i], Signal::Buy, "signal of {} at {}", price, i);
        }
    }
}

#[test]
fn test_bollinger_bands_ordered() {
    let df = add_bollinger_bands(&random_walk(3, 200), 20, 2.0).unwrap();
    let lower = float_values(&df, "BBL_20_2").unwrap();
    let middle = float_values(&df, "BBM_20_2").unwrap();
    let upper = float_values(&df, "BBU_20_2").unwrap();

    for i in 19..df.height() {
        let (l, m, u) = (lower[i].unwrap(), middle[i].unwrap(), upper[i].unwrap());
        assert!(l <= m && m <= u);
        assert!(((u - m) - (m - l)).abs() < 1e-6);
    }
}

#[test]
fn test_vwap_requires_volume() {
    let df = df! {
        "High" => &[11.0, 12.0],
        "Low" => &[9.0, 10.0],
        "Close" => &[10.0, 11.0],
    }
    .unwrap();

    match add_vwap(&df) {
        Err(SignalDeskError::MissingColumn(column)) => assert_eq!(column, "Volume"),
        other => panic!("expected missing Volume, got {:?}", other.map(|df| df.width())),
    }
}

#[test]
fn test_vwap_constant_typical_price() {
    let df = df! {
        "High" => vec![12.0; 10],
        "Low" => vec![9.0; 10],
        "Close" => vec![10.5; 10],
        "Volume" => vec![250.0; 10],
    }
    .unwrap();

    let vwap = float_values(&add_vwap(&df).unwrap(), "VWAP").unwrap();
    for value in vwap {
        assert!((value.unwrap() - 10.5).abs() < 1e-9);
    }
}

#[test]
fn test_vwap_stays_within_price_range() {
    let df = add_vwap(&random_walk(11, 250)).unwrap();
    let vwap = float_values(&df, "VWAP").unwrap();
    let low = float_values(&df, "Low").unwrap();
    let high = float_values(&df, "High").unwrap();

    let min_low = low.iter().flatten().cloned().fold(f64::INFINITY, f64::min);
    let max_high = high.iter().flatten().cloned().fold(f64::NEG_INFINITY, f64::max);
    for value in vwap.into_iter().flatten() {
        assert!(value >= min_low - 1e-9 && value <= max_high + 1e-9);
    }
}
