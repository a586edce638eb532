use crate::levels::{self, Levels};
use crate::patterns::{self, WickRatios};
use scout_core::config::ClassifierConfig;
use scout_core::market::entity::{Candle, CandleSeries};
use scout_core::market::error::DataError;
use scout_core::signal::entity::{Decision, Pattern, Signal};
use tracing::{debug, info};

/// 规则要求价格靠近的价位。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Support,
    Resistance,
}

/// # Summary
/// 决策链中的一条规则：价格靠近 `level` 且出现 `pattern` 时输出 `outcome`。
#[derive(Debug, Clone, Copy)]
struct Rule {
    level: Level,
    pattern: Pattern,
    outcome: Decision,
}

/// 按顺序求值，首个命中的规则生效。
const RULES: [Rule; 4] = [
    Rule {
        level: Level::Support,
        pattern: Pattern::BullishEngulfing,
        outcome: Decision::Buy,
    },
    Rule {
        level: Level::Support,
        pattern: Pattern::Hammer,
        outcome: Decision::Buy,
    },
    Rule {
        level: Level::Resistance,
        pattern: Pattern::BearishEngulfing,
        outcome: Decision::Sell,
    },
    Rule {
        level: Level::Resistance,
        pattern: Pattern::ShootingStar,
        outcome: Decision::Sell,
    },
];

/// # Summary
/// K 线形态分类器：结合支撑/阻力与反转形态给出买入、卖出或观望。
///
/// # Invariants
/// - 无内部可变状态；同一输入多次调用结果一致。
#[derive(Debug, Clone, Default)]
pub struct PatternClassifier {
    config: ClassifierConfig,
}

impl PatternClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// 计算当前 K 线之前窗口内的支撑与阻力。
    pub fn support_resistance(&self, series: &CandleSeries) -> Result<Levels, DataError> {
        levels::support_resistance(series, self.config.window, self.config.window_policy)
    }

    /// # Summary
    /// 对序列给出交易决策。
    ///
    /// # Returns
    /// 成功返回 `Decision`；序列不足 2 根或不满足窗口策略时返回 `DataError`。
    pub fn classify(&self, series: &CandleSeries) -> Result<Decision, DataError> {
        self.evaluate(series).map(|signal| signal.decision)
    }

    /// # Summary
    /// 对序列做完整评估，返回决策、触发形态与关键价位。
    ///
    /// # Logic
    /// 1. 计算支撑/阻力，并判断当前收盘价是否接近二者。
    /// 2. 在 (前一根, 当前) K 线上识别四种反转形态。
    /// 3. 按 `RULES` 顺序求值，首个命中的规则给出决策；无命中则观望。
    ///
    /// # Arguments
    /// * `series`: 时间升序的 K 线序列，最后一根为当前 K 线。
    ///
    /// # Returns
    /// 成功返回 `Signal`，失败返回 `DataError`。
    pub fn evaluate(&self, series: &CandleSeries) -> Result<Signal, DataError> {
        let (previous, current) = match (series.previous(), series.last()) {
            (Some(p), Some(c)) => (p, c),
            _ => {
                return Err(DataError::InsufficientData {
                    required: 2,
                    actual: series.len(),
                });
            }
        };
        let levels = self.support_resistance(series)?;

        let close = current.close();
        let near_support = levels::is_near(close, levels.support, self.config.proximity);
        let near_resistance = levels::is_near(close, levels.resistance, self.config.proximity);
        debug!(
            close,
            support = levels.support,
            resistance = levels.resistance,
            window = levels.window,
            near_support,
            near_resistance,
            "Evaluating candle patterns"
        );

        let fired = RULES.iter().find(|rule| {
            let near = match rule.level {
                Level::Support => near_support,
                Level::Resistance => near_resistance,
            };
            near && self.matches(rule.pattern, previous, current)
        });

        let signal = match fired {
            Some(rule) => {
                info!(
                    pattern = %rule.pattern,
                    decision = %rule.outcome,
                    close,
                    "Reversal pattern at {:?}",
                    rule.level
                );
                Signal {
                    decision: rule.outcome,
                    pattern: Some(rule.pattern),
                    support: levels.support,
                    resistance: levels.resistance,
                }
            }
            None => Signal {
                decision: Decision::Hold,
                pattern: None,
                support: levels.support,
                resistance: levels.resistance,
            },
        };
        Ok(signal)
    }

    fn matches(&self, pattern: Pattern, previous: &Candle, current: &Candle) -> bool {
        let ratios = WickRatios {
            long: self.config.wick_ratio,
            short: self.config.opposite_wick_ratio,
        };
        match pattern {
            Pattern::BullishEngulfing => patterns::is_bullish_engulfing(previous, current),
            Pattern::BearishEngulfing => patterns::is_bearish_engulfing(previous, current),
            Pattern::Hammer => patterns::is_hammer(current, ratios),
            Pattern::ShootingStar => patterns::is_shooting_star(current, ratios),
        }
    }
}
