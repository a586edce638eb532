//! 测试替身：内存版行情与手续费数据源。

use crate::common::TimeFrame;
use crate::market::entity::{Candle, CandleSeries, FeeInfo};
use crate::market::error::MarketError;
use crate::market::port::{FeeProvider, MarketDataProvider};
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use dashmap::{DashMap, DashSet};

/// # Summary
/// 基于 DashMap 的内存行情源，同时实现 `MarketDataProvider` 与 `FeeProvider`。
///
/// # Invariants
/// - 交易对列表按插入顺序返回，便于断言扫描顺序。
/// - 标记为失败的交易对在查询手续费时返回 `MarketError::Network`。
#[derive(Default)]
pub struct MemoryMarket {
    daily: DashMap<String, Vec<Candle>>,
    intraday: DashMap<(String, TimeFrame), Vec<Candle>>,
    fees: DashMap<String, FeeInfo>,
    failing_fees: DashSet<String>,
    order: std::sync::Mutex<Vec<String>>,
}

impl MemoryMarket {
    pub fn new() -> Self {
        Self::default()
    }

    fn remember(&self, ticker: &str) {
        if let Ok(mut order) = self.order.lock()
            && !order.iter().any(|t| t == ticker)
        {
            order.push(ticker.to_string());
        }
    }

    pub fn with_daily(self, ticker: &str, candles: Vec<Candle>) -> Self {
        self.remember(ticker);
        self.daily.insert(ticker.to_string(), candles);
        self
    }

    pub fn with_intraday(self, ticker: &str, timeframe: TimeFrame, candles: Vec<Candle>) -> Self {
        self.remember(ticker);
        self.intraday.insert((ticker.to_string(), timeframe), candles);
        self
    }

    pub fn with_fee(self, ticker: &str, withdrawal_fee: f64, reference_price: f64) -> Self {
        self.fees.insert(
            ticker.to_string(),
            FeeInfo {
                withdrawal_fee,
                reference_price,
            },
        );
        self
    }

    pub fn with_failing_fee(self, ticker: &str) -> Self {
        self.failing_fees.insert(ticker.to_string());
        self
    }

    fn series(candles: &[Candle], count: usize) -> Result<CandleSeries, MarketError> {
        let start = candles.len().saturating_sub(count);
        Ok(CandleSeries::new(candles[start..].to_vec())?)
    }
}

#[async_trait]
impl MarketDataProvider for MemoryMarket {
    async fn fetch_daily_candles(
        &self,
        ticker: &str,
        count: usize,
    ) -> Result<CandleSeries, MarketError> {
        let candles = self
            .daily
            .get(ticker)
            .ok_or_else(|| MarketError::NotFound(ticker.to_string()))?;
        Self::series(candles.value(), count)
    }

    async fn fetch_intraday_candles(
        &self,
        ticker: &str,
        timeframe: TimeFrame,
        count: usize,
    ) -> Result<CandleSeries, MarketError> {
        let candles = self
            .intraday
            .get(&(ticker.to_string(), timeframe))
            .ok_or_else(|| MarketError::NotFound(format!("{} {}", ticker, timeframe)))?;
        Self::series(candles.value(), count)
    }

    async fn list_instruments(&self) -> Result<Vec<String>, MarketError> {
        self.order
            .lock()
            .map(|order| order.clone())
            .map_err(|e| MarketError::Unknown(e.to_string()))
    }
}

#[async_trait]
impl FeeProvider for MemoryMarket {
    async fn fetch_fee_info(&self, ticker: &str) -> Result<FeeInfo, MarketError> {
        if self.failing_fees.contains(ticker) {
            return Err(MarketError::Network(format!("fee lookup failed for {}", ticker)));
        }
        self.fees
            .get(ticker)
            .map(|fee| *fee.value())
            .ok_or_else(|| MarketError::NotFound(format!("fee for {}", ticker)))
    }
}

/// 测试用时间轴起点。
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// # Summary
/// 以 OHLC 元组按日构造 K 线列表，成交量为 1，成交额未知。
///
/// # Logic
/// 1. 第 i 个元组的时间为 `epoch() + i 天`。
/// 2. 非法元组直接跳过 (测试数据应保持合法)。
pub fn daily_candles(ohlc: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
    ohlc.iter()
        .zip(0i64..)
        .filter_map(|(&(o, h, l, c), day)| {
            Candle::new(epoch() + Duration::days(day), o, h, l, c, 1.0, None).ok()
        })
        .collect()
}

/// 构造一根带成交额的 K 线。
pub fn candle_with_value(day: i64, ohlc: (f64, f64, f64, f64), value: f64) -> Option<Candle> {
    let (o, h, l, c) = ohlc;
    Candle::new(epoch() + Duration::days(day), o, h, l, c, 1.0, Some(value)).ok()
}
