use scout_core::config::ScannerConfig;
use scout_core::market::entity::Candle;
use scout_core::scan::entity::{DailyPicks, Regime, TickerScore};

/// # Summary
/// 按市场趋势对候选交易对的昨日 K 线打分。
///
/// # Logic
/// - `Up`：昨日涨幅 `(close - open) / open` 超过 `momentum_threshold` 才合格，
///   得分为涨幅 × 成交额。开盘价非正时不合格。
/// - `Down`：昨日收阳且成交额超过 `liquidity_floor` 才合格，
///   得分为下影线长度 `min(open, close) - low` × 成交额。
///
/// # Arguments
/// * `yesterday`: 候选交易对昨日 (倒数第二根) 日线。
/// * `regime`: 当前市场趋势。
/// * `config`: 扫描器参数。
///
/// # Returns
/// 合格返回得分，否则返回 `None`。
pub fn score_candidate(yesterday: &Candle, regime: Regime, config: &ScannerConfig) -> Option<f64> {
    let open = yesterday.open();
    let close = yesterday.close();
    let value = yesterday.traded_value();

    match regime {
        Regime::Up => {
            if open <= 0.0 {
                return None;
            }
            let change = (close - open) / open;
            (change > config.momentum_threshold).then_some(change * value)
        }
        Regime::Down => {
            let rebounded = close > open;
            let liquid = value > config.liquidity_floor;
            if !(rebounded && liquid) {
                return None;
            }
            let lower_wick = open.min(close) - yesterday.low();
            Some(lower_wick * value)
        }
    }
}

/// # Summary
/// 将得分从高到低排序并取前两名。
///
/// # Invariants
/// - 稳定排序：同分时保持候选原有的遍历顺序。
/// - 同一交易对出现多次时只保留最高分的一次，主次不会重复。
pub fn rank(mut scores: Vec<TickerScore>, regime: Regime) -> DailyPicks {
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut picked = scores.into_iter().map(|s| s.ticker);
    let primary = picked.next();
    let secondary = picked.find(|t| Some(t) != primary.as_ref());

    DailyPicks {
        regime,
        primary,
        secondary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::testing::candle_with_value;

    fn score(ohlc: (f64, f64, f64, f64), value: f64, regime: Regime) -> Option<f64> {
        let candle = candle_with_value(0, ohlc, value)?;
        score_candidate(&candle, regime, &ScannerConfig::default())
    }

    fn ts(score: f64, ticker: &str) -> TickerScore {
        TickerScore {
            score,
            ticker: ticker.to_string(),
        }
    }

    #[test]
    fn test_up_regime_requires_momentum() {
        let s = score((100.0, 106.0, 99.0, 105.0), 1_000_000.0, Regime::Up);
        assert!(s.is_some_and(|s| (s - 50_000.0).abs() < 1e-6));
        // 恰好 3% 不合格
        assert_eq!(score((100.0, 104.0, 99.0, 103.0), 1_000_000.0, Regime::Up), None);
        assert_eq!(score((100.0, 101.0, 95.0, 96.0), 1_000_000.0, Regime::Up), None);
    }

    #[test]
    fn test_up_regime_zero_open_never_qualifies() {
        assert_eq!(score((0.0, 10.0, 0.0, 10.0), 1_000_000.0, Regime::Up), None);
    }

    #[test]
    fn test_down_regime_scores_lower_wick() {
        let s = score((100.0, 103.0, 97.0, 102.0), 2_000_000_000.0, Regime::Down);
        assert_eq!(s, Some(3.0 * 2_000_000_000.0));
    }

    #[test]
    fn test_down_regime_requires_liquidity_and_green_candle() {
        assert_eq!(score((100.0, 103.0, 97.0, 102.0), 1_000_000_000.0, Regime::Down), None);
        assert_eq!(score((102.0, 103.0, 97.0, 100.0), 2_000_000_000.0, Regime::Down), None);
        assert_eq!(score((100.0, 103.0, 97.0, 100.0), 2_000_000_000.0, Regime::Down), None);
    }

    #[test]
    fn test_rank_descending_and_stable() {
        let picks = rank(
            vec![ts(1.0, "KRW-A"), ts(5.0, "KRW-B"), ts(5.0, "KRW-C"), ts(3.0, "KRW-D")],
            Regime::Up,
        );
        assert_eq!(picks.primary.as_deref(), Some("KRW-B"));
        assert_eq!(picks.secondary.as_deref(), Some("KRW-C"));
    }

    #[test]
    fn test_rank_single_and_empty() {
        let one = rank(vec![ts(1.0, "KRW-A")], Regime::Down);
        assert_eq!(one.primary.as_deref(), Some("KRW-A"));
        assert_eq!(one.secondary, None);

        assert_eq!(rank(vec![], Regime::Down), DailyPicks::none(Regime::Down));
    }

    #[test]
    fn test_rank_never_repeats_ticker() {
        let picks = rank(
            vec![ts(9.0, "KRW-A"), ts(8.0, "KRW-A"), ts(1.0, "KRW-B")],
            Regime::Up,
        );
        assert_eq!(picks.primary.as_deref(), Some("KRW-A"));
        assert_eq!(picks.secondary.as_deref(), Some("KRW-B"));
    }
}
