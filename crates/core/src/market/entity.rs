use crate::market::error::DataError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// # Summary
/// 单根 K 线数据实体，记录特定时段内的行情波动。
///
/// # Invariants
/// - 所有字段均为有限值，价格与成交量非负。
/// - `low <= min(open, close)` 且 `high >= max(open, close)`。
/// - 只能通过 `Candle::new` 构造，字段在构造后不可修改。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candle {
    // K 线开始时间
    time: DateTime<Utc>,
    // 开盘价
    open: f64,
    // 最高价
    high: f64,
    // 最低价
    low: f64,
    // 收盘价
    close: f64,
    // 成交量
    volume: f64,
    // 成交额 (计价货币)，部分数据源不提供
    value: Option<f64>,
}

impl Candle {
    /// # Summary
    /// 构造并校验一根 K 线。
    ///
    /// # Logic
    /// 1. 检查所有数值字段有限且非负。
    /// 2. 检查最低价不高于实体下沿、最高价不低于实体上沿。
    ///
    /// # Returns
    /// 校验通过返回 K 线，否则返回 `DataError::InvalidCandle`。
    pub fn new(
        time: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        value: Option<f64>,
    ) -> Result<Self, DataError> {
        let fields = [
            ("open", open),
            ("high", high),
            ("low", low),
            ("close", close),
            ("volume", volume),
        ];
        for (name, v) in fields.into_iter().chain(value.map(|v| ("value", v))) {
            if !v.is_finite() || v < 0.0 {
                return Err(DataError::InvalidCandle {
                    reason: format!("{} must be finite and non-negative, got {}", name, v),
                });
            }
        }
        if low > open.min(close) {
            return Err(DataError::InvalidCandle {
                reason: format!("low {} above body ({} / {})", low, open, close),
            });
        }
        if high < open.max(close) {
            return Err(DataError::InvalidCandle {
                reason: format!("high {} below body ({} / {})", high, open, close),
            });
        }

        Ok(Self {
            time,
            open,
            high,
            low,
            close,
            volume,
            value,
        })
    }

    pub fn time(&self) -> DateTime<Utc> {
        self.time
    }

    pub fn open(&self) -> f64 {
        self.open
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn close(&self) -> f64 {
        self.close
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// 成交额；数据源未提供时以 `close * volume` 估算。
    pub fn traded_value(&self) -> f64 {
        self.value.unwrap_or(self.close * self.volume)
    }
}

/// # Summary
/// 按时间升序排列、已校验的 K 线序列。
///
/// # Invariants
/// - 至少包含一根 K 线。
/// - 时间戳严格递增；最后一根为当前 (可能尚未收盘) 的 K 线。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// # Summary
    /// 由 K 线列表构造序列。
    ///
    /// # Logic
    /// 1. 拒绝空列表。
    /// 2. 逐对检查时间戳严格递增。
    ///
    /// # Arguments
    /// * `candles`: 时间升序的 K 线列表。
    ///
    /// # Returns
    /// 成功返回序列，失败返回 `DataError`。
    pub fn new(candles: Vec<Candle>) -> Result<Self, DataError> {
        if candles.is_empty() {
            return Err(DataError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        if let Some(index) = candles
            .windows(2)
            .position(|pair| pair[1].time <= pair[0].time)
        {
            return Err(DataError::NonMonotonic { index: index + 1 });
        }
        Ok(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn as_slice(&self) -> &[Candle] {
        &self.candles
    }

    /// 当前 (最后一根) K 线。
    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// 当前 K 线的前一根。
    pub fn previous(&self) -> Option<&Candle> {
        self.candles.len().checked_sub(2).and_then(|i| self.candles.get(i))
    }

    /// 日线序列中的“昨日”K 线，即倒数第二根 (最后一根为当日未收盘 K 线)。
    pub fn yesterday(&self) -> Option<&Candle> {
        self.previous()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(Candle::close).collect()
    }

    /// 保留最近的 `count` 根 K 线。
    pub fn tail(&self, count: usize) -> Result<Self, DataError> {
        let start = self.candles.len().saturating_sub(count);
        Self::new(self.candles[start..].to_vec())
    }
}

impl TryFrom<Vec<Candle>> for CandleSeries {
    type Error = DataError;

    fn try_from(candles: Vec<Candle>) -> Result<Self, Self::Error> {
        Self::new(candles)
    }
}

/// # Summary
/// 单个资产的提币手续费及参考价，仅用于换算手续费的计价货币价值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeInfo {
    // 提币手续费 (以资产数量计)
    pub withdrawal_fee: f64,
    // 资产当前参考价 (计价货币)
    pub reference_price: f64,
}

impl FeeInfo {
    /// 手续费折算为计价货币的价值。
    pub fn quote_value(&self) -> f64 {
        self.withdrawal_fee * self.reference_price
    }
}
