use signaldesk::engines::Portfolio;
use signaldesk::types::{Signal, TradeAction};

#[test]
fn test_buy_then_sell_realises_gain() {
    let mut portfolio = Portfolio::new(10000.0);

    // All cash at $50 buys 200 units
    portfolio.process_bar(0, Signal::Buy, 50.0).unwrap();
    assert_eq!(portfolio.position, 200.0);

    // Selling at $60 returns 200 * 60 = $12000
    portfolio.process_bar(1, Signal::Sell, 60.0).unwrap();
    assert_eq!(portfolio.cash, 12000.0);
    assert_eq!(portfolio.position, 0.0);

    let actions: Vec<TradeAction> = portfolio.get_trades().iter().map(|t| t.action).collect();
    assert_eq!(actions, vec![TradeAction::Buy, TradeAction::Sell]);
}

#[test]
fn test_sell_without_position_is_ignored() {
    let mut portfolio = Portfolio::new(10000.0);
    portfolio.process_bar(0, Signal::Sell, 50.0).unwrap();

    assert!(portfolio.get_trades().is_empty());
    assert_eq!(portfolio.cash, 10000.0);
}

#[test]
fn test_drawdown_with_open_position() {
    let mut portfolio = Portfolio::new(10000.0);

    // Buy 100 units at $100
    portfolio.process_bar(0, Signal::Buy, 100.0).unwrap();

    // Price drops to $80: equity $8000, drawdown (10000 - 8000) / 10000
    portfolio.process_bar(1, Signal::Neutral, 80.0).unwrap();
    assert_eq!(portfolio.current_drawdown, 0.2);
    assert_eq!(portfolio.max_drawdown, 0.2);

    // Recovery to a new high clears the current drawdown only
    portfolio.process_bar(2, Signal::Neutral, 120.0).unwrap();
    assert_eq!(portfolio.current_drawdown, 0.0);
    assert_eq!(portfolio.max_drawdown, 0.2);
}

#[test]
fn test_equity_curve_tracks_every_bar() {
    let mut portfolio = Portfolio::new(1000.0);
    let bars = [
        (Signal::Neutral, 10.0),
        (Signal::Buy, 10.0),
        (Signal::Neutral, 12.0),
        (Signal::Sell, 11.0),
    ];
    for (bar, (signal, price)) in bars.iter().enumerate() {
        portfolio.process_bar(bar, *signal, *price).unwrap();
    }

    assert_eq!(portfolio.get_equity_curve(), &[1000.0, 1000.0, 1200.0, 1100.0]);
}

#[test]
fn test_non_positive_price_is_rejected() {
    let mut portfolio = Portfolio::new(1000.0);
    assert!(portfolio.process_bar(0, Signal::Buy, 0.0).is_err());
    assert!(portfolio.get_trades().is_empty());
}
