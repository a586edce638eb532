use crate::indicators::latest_ema;
use scout_core::market::entity::CandleSeries;
use scout_core::market::error::DataError;
use scout_core::scan::entity::Regime;
use tracing::info;

/// # Summary
/// 根据参考交易对日线的快慢 EMA 判定市场趋势。
///
/// # Logic
/// 1. 在最后一根 K 线处分别计算快线与慢线 EMA。
/// 2. 快线 >= 慢线为 `Up`，否则为 `Down`。
///
/// # Arguments
/// * `reference`: 参考交易对的日线序列。
/// * `fast`: 快线周期。
/// * `slow`: 慢线周期。
///
/// # Returns
/// 成功返回 `Regime`；收盘价数量少于任一周期时返回 `DataError`。
pub fn detect_regime(reference: &CandleSeries, fast: u32, slow: u32) -> Result<Regime, DataError> {
    let closes = reference.closes();
    let fast_ema = latest_ema(&closes, fast)?;
    let slow_ema = latest_ema(&closes, slow)?;

    let regime = if fast_ema >= slow_ema {
        Regime::Up
    } else {
        Regime::Down
    };
    info!(fast_ema, slow_ema, %regime, "Market regime detected");
    Ok(regime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::testing::daily_candles;

    fn closes_series(closes: impl Iterator<Item = f64>) -> CandleSeries {
        let ohlc: Vec<_> = closes.map(|c| (c, c + 1.0, c - 1.0, c)).collect();
        CandleSeries::new(daily_candles(&ohlc)).unwrap()
    }

    #[test]
    fn test_rising_closes_are_up() {
        let series = closes_series((0..30i32).map(|i| 100.0 + f64::from(i)));
        assert_eq!(detect_regime(&series, 5, 20).unwrap(), Regime::Up);
    }

    #[test]
    fn test_falling_closes_are_down() {
        let series = closes_series((0..30i32).map(|i| 200.0 - f64::from(i)));
        assert_eq!(detect_regime(&series, 5, 20).unwrap(), Regime::Down);
    }

    #[test]
    fn test_equal_periods_are_up() {
        // 快慢线相等时视为上涨
        let series = closes_series((0..30i32).map(|i| 200.0 - f64::from(i)));
        assert_eq!(detect_regime(&series, 20, 20).unwrap(), Regime::Up);
    }

    #[test]
    fn test_short_reference_errors() {
        let series = closes_series((0..10i32).map(|i| f64::from(i) + 10.0));
        assert!(matches!(
            detect_regime(&series, 5, 20),
            Err(DataError::InsufficientData { required: 20, actual: 10 })
        ));
    }
}
