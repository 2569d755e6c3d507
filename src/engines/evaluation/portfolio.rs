use crate::{
    error::{Result, SignalDeskError},
    types::{Signal, Trade, TradeAction},
};

/// All-in/all-out long-only book: either everything is cash or everything
/// is held as a position.
pub struct Portfolio {
    pub initial_capital: f64,
    pub cash: f64,
    pub position: f64,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<f64>,

    // Drawdown tracking
    pub peak_equity: f64,
    pub max_drawdown: f64,
    pub current_drawdown: f64,
}

impl Portfolio {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            initial_capital,
            cash: initial_capital,
            position: 0.0,
            trades: Vec::new(),
            equity_curve: Vec::new(),
            peak_equity: initial_capital,
            max_drawdown: 0.0,
            current_drawdown: 0.0,
        }
    }

    /// Applies one bar's signal at `price` and marks the book to market.
    pub fn process_bar(&mut self, bar: usize, signal: Signal, price: f64) -> Result<()> {
        match signal {
            Signal::Buy if self.cash > 0.0 => self.buy(bar, price)?,
            Signal::Sell if self.position > 0.0 => self.sell(bar, price)?,
            _ => {}
        }

        self.update_drawdown(price);
        self.equity_curve.push(self.total_value(price));
        Ok(())
    }

    /// Converts all cash into a position at `price`.
    pub fn buy(&mut self, bar: usize, price: f64) -> Result<()> {
        check_price(bar, price)?;
        let quantity = self.cash / price;
        self.position += quantity;
        self.cash = 0.0;

        self.trades.push(Trade {
            action: TradeAction::Buy,
            bar,
            price,
            amount: quantity,
        });
        Ok(())
    }

    /// Converts the whole position into cash at `price`.
    pub fn sell(&mut self, bar: usize, price: f64) -> Result<()> {
        check_price(bar, price)?;
        let proceeds = self.position * price;
        self.cash += proceeds;
        self.position = 0.0;

        self.trades.push(Trade {
            action: TradeAction::Sell,
            bar,
            price,
            amount: proceeds,
        });
        Ok(())
    }

    pub fn get_trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn get_equity_curve(&self) -> &[f64] {
        &self.equity_curve
    }

    /// Cash plus the position valued at `price`.
    pub fn total_value(&self, price: f64) -> f64 {
        self.cash + self.position * price
    }

    /// Update drawdown based on the value at `price`.
    pub fn update_drawdown(&mut self, price: f64) {
        let current_equity = self.total_value(price);

        if current_equity > self.peak_equity {
            self.peak_equity = current_equity;
        }

        if self.peak_equity > 0.0 {
            self.current_drawdown = (self.peak_equity - current_equity) / self.peak_equity;

            if self.current_drawdown > self.max_drawdown {
                self.max_drawdown = self.current_drawdown;
            }
        }
    }
}

fn check_price(bar: usize, price: f64) -> Result<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(SignalDeskError::BacktestError(format!(
            "cannot trade at non-positive price {} on bar {}",
            price, bar
        )));
    }
    Ok(())
}
