use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 单次评估得出的交易决策。
///
/// # Invariants
/// - 每次评估重新生成，不携带任何身份或生命周期。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Buy => write!(f, "buy"),
            Decision::Sell => write!(f, "sell"),
            Decision::Hold => write!(f, "hold"),
        }
    }
}

impl FromStr for Decision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" => Ok(Decision::Buy),
            "sell" => Ok(Decision::Sell),
            "hold" => Ok(Decision::Hold),
            other => Err(format!("Unknown Decision: {}", other)),
        }
    }
}

/// # Summary
/// 可识别的 K 线反转形态。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pattern {
    // 看涨吞没
    BullishEngulfing,
    // 看跌吞没
    BearishEngulfing,
    // 锤子线
    Hammer,
    // 射击之星
    ShootingStar,
}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pattern::BullishEngulfing => write!(f, "bullish engulfing"),
            Pattern::BearishEngulfing => write!(f, "bearish engulfing"),
            Pattern::Hammer => write!(f, "hammer"),
            Pattern::ShootingStar => write!(f, "shooting star"),
        }
    }
}

/// # Summary
/// 形态分类器的完整评估结果，附带触发规则与关键价位，便于记录日志。
///
/// # Invariants
/// - `decision == Hold` 时 `pattern` 为 `None`。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    pub decision: Decision,
    // 触发决策的形态
    pub pattern: Option<Pattern>,
    // 支撑位 (窗口内最低价)
    pub support: f64,
    // 阻力位 (窗口内最高价)
    pub resistance: f64,
}
