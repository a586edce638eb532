use crate::common::TimeFrame;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub scanner: ScannerConfig,
    pub risk: RiskConfig,
    pub feed: FeedConfig,
}

/// # Summary
/// 历史数据不足 `window + 1` 根时的处理策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowPolicy {
    // 将窗口收缩为 `len - 1`
    Clamp,
    // 直接返回数据不足错误
    Strict,
}

/// # Summary
/// K 线形态分类器参数。
///
/// # Invariants
/// - `window >= 1`。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    // 支撑/阻力回看窗口 (不含当前 K 线)
    pub window: usize,
    // 判定“接近”支撑/阻力的相对距离
    pub proximity: f64,
    // 长影线至少为实体的倍数
    pub wick_ratio: f64,
    // 反向影线至多为实体的倍数
    pub opposite_wick_ratio: f64,
    pub window_policy: WindowPolicy,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            window: 20,
            proximity: 0.005,
            wick_ratio: 2.0,
            opposite_wick_ratio: 0.5,
            window_policy: WindowPolicy::Clamp,
        }
    }
}

/// # Summary
/// 每日选股扫描器参数。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    // 用于判断市场趋势的参考交易对
    pub reference_ticker: String,
    // 候选交易对的计价货币前缀
    pub quote_prefix: String,
    // 参考交易对拉取的日线数量
    pub reference_history: usize,
    pub fast_ema: u32,
    pub slow_ema: u32,
    // 上涨趋势下昨日涨幅的最低要求
    pub momentum_threshold: f64,
    // 下跌趋势下昨日成交额的最低要求
    pub liquidity_floor: f64,
    // 假定单笔交易金额，用于换算手续费阈值
    pub hypothetical_trade_amount: Decimal,
    // 交易所交易手续费率
    pub fee_rate: Decimal,
    // 候选行情/手续费查询的最大并发数
    pub lookup_concurrency: usize,
}

impl ScannerConfig {
    /// 提币手续费 (计价货币) 的上限：假定交易金额 × 交易费率。
    pub fn fee_threshold(&self) -> Decimal {
        self.hypothetical_trade_amount * self.fee_rate
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            reference_ticker: "KRW-BTC".to_string(),
            quote_prefix: "KRW-".to_string(),
            reference_history: 30,
            fast_ema: 5,
            slow_ema: 20,
            momentum_threshold: 0.03,
            liquidity_floor: 1_000_000_000.0,
            hypothetical_trade_amount: dec!(100000),
            fee_rate: dec!(0.0025),
            lookup_concurrency: 4,
        }
    }
}

/// # Summary
/// 止损与资金分配参数。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    // 止损百分比 (1.5 表示 -1.5%)
    pub stop_loss_percent: Decimal,
    // 主交易对占用可用资金的比例
    pub primary_allocation: Decimal,
    // 次交易对占用可用资金的比例
    pub secondary_allocation: Decimal,
    // 交易所最小下单金额
    pub min_order: Decimal,
    // 每日运行时按此可用余额计算分配金额
    pub quote_balance: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            stop_loss_percent: dec!(1.5),
            primary_allocation: dec!(0.7),
            secondary_allocation: dec!(0.3),
            min_order: dec!(5000),
            quote_balance: dec!(1000000),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    // 行情快照 JSON 文件路径
    pub snapshot_path: String,
    // 盘中形态判断使用的周期
    pub intraday_timeframe: TimeFrame,
    pub intraday_count: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            snapshot_path: "data/snapshot.json".to_string(),
            intraday_timeframe: TimeFrame::Minute15,
            intraday_count: 30,
        }
    }
}
