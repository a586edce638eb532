use serde::{Deserialize, Serialize};

/// # Summary
/// 由参考资产均线交叉得出的粗粒度市场趋势。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    // 快线 >= 慢线
    Up,
    // 快线 < 慢线
    Down,
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Regime::Up => write!(f, "up"),
            Regime::Down => write!(f, "down"),
        }
    }
}

/// # Summary
/// 单次扫描中某个候选交易对的得分。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerScore {
    pub score: f64,
    pub ticker: String,
}

/// # Summary
/// 每日选股结果：主交易对与次交易对。
///
/// # Invariants
/// - `secondary` 存在时 `primary` 一定存在。
/// - 两者不会是同一个交易对。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPicks {
    pub regime: Regime,
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

impl DailyPicks {
    /// 没有任何候选合格时的结果。
    pub fn none(regime: Regime) -> Self {
        Self {
            regime,
            primary: None,
            secondary: None,
        }
    }

    /// 按主、次顺序遍历已选出的交易对。
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.primary
            .iter()
            .chain(self.secondary.iter())
            .map(String::as_str)
    }
}
