use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scout_core::common::TimeFrame;
use scout_core::market::entity::{Candle, CandleSeries, FeeInfo};
use scout_core::market::error::MarketError;
use scout_core::market::port::{FeeProvider, MarketDataProvider};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::info;

/// # Summary
/// 基于 JSON 行情快照的离线数据源，同时实现 `MarketDataProvider` 与 `FeeProvider`。
///
/// # Invariants
/// - 加载时即校验全部 K 线，任何非法行都会使整个快照加载失败。
/// - 交易对按字典序保存，`list_instruments` 的结果稳定。
#[derive(Debug, Clone, Default)]
pub struct SnapshotProvider {
    instruments: BTreeMap<String, Instrument>,
}

#[derive(Debug, Clone)]
struct Instrument {
    daily: Option<CandleSeries>,
    intraday: HashMap<TimeFrame, CandleSeries>,
    fee: Option<FeeInfo>,
}

/// 快照文件顶层结构。
#[derive(Deserialize, Debug)]
struct RawSnapshot {
    instruments: BTreeMap<String, RawInstrument>,
}

#[derive(Deserialize, Debug)]
struct RawInstrument {
    #[serde(default)]
    daily: Vec<RawCandle>,
    // 键为周期文本，如 "15m"
    #[serde(default)]
    intraday: BTreeMap<String, Vec<RawCandle>>,
    fee: Option<RawFee>,
}

/// # Summary
/// 快照中的原始 K 线行。
#[derive(Deserialize, Debug)]
struct RawCandle {
    time: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
    // 成交额，缺省时按 close × volume 估算
    value: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct RawFee {
    withdrawal_fee: f64,
    reference_price: f64,
}

impl SnapshotProvider {
    /// # Summary
    /// 从磁盘读取并解析快照文件。
    ///
    /// # Arguments
    /// * `path`: 快照 JSON 文件路径。
    ///
    /// # Returns
    /// 文件不存在返回 `MarketError::NotFound`，其余读取错误返回 `MarketError::Unknown`，
    /// 内容非法返回 `MarketError::Parse`。
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, MarketError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MarketError::NotFound(path.display().to_string())
            } else {
                MarketError::Unknown(format!("{}: {}", path.display(), e))
            }
        })?;
        let provider = Self::from_json(&text)?;
        info!(
            path = %path.display(),
            instruments = provider.instruments.len(),
            "Market snapshot loaded"
        );
        Ok(provider)
    }

    /// # Summary
    /// 解析快照 JSON 文本。
    ///
    /// # Logic
    /// 1. 反序列化为原始结构。
    /// 2. 每一行经 `Candle::new` 校验，每个列表经 `CandleSeries::new` 校验时间递增。
    /// 3. 盘中周期键经 `TimeFrame::from_str` 解析。
    ///
    /// # Returns
    /// 任一环节失败返回 `MarketError::Parse`，错误信息包含交易对代码。
    pub fn from_json(text: &str) -> Result<Self, MarketError> {
        let raw: RawSnapshot =
            serde_json::from_str(text).map_err(|e| MarketError::Parse(e.to_string()))?;

        let mut instruments = BTreeMap::new();
        for (ticker, raw) in raw.instruments {
            let instrument = convert_instrument(&ticker, raw)?;
            instruments.insert(ticker, instrument);
        }
        Ok(Self { instruments })
    }

    fn instrument(&self, ticker: &str) -> Result<&Instrument, MarketError> {
        self.instruments
            .get(ticker)
            .ok_or_else(|| MarketError::NotFound(ticker.to_string()))
    }
}

fn convert_instrument(ticker: &str, raw: RawInstrument) -> Result<Instrument, MarketError> {
    let daily = convert_series(ticker, raw.daily)?;

    let mut intraday = HashMap::new();
    for (key, rows) in raw.intraday {
        let timeframe: TimeFrame = key
            .parse()
            .map_err(|e: String| MarketError::Parse(format!("{}: {}", ticker, e)))?;
        if let Some(series) = convert_series(ticker, rows)? {
            intraday.insert(timeframe, series);
        }
    }

    let fee = raw.fee.map(|fee| FeeInfo {
        withdrawal_fee: fee.withdrawal_fee,
        reference_price: fee.reference_price,
    });

    Ok(Instrument {
        daily,
        intraday,
        fee,
    })
}

// 空列表视为无数据
fn convert_series(ticker: &str, rows: Vec<RawCandle>) -> Result<Option<CandleSeries>, MarketError> {
    if rows.is_empty() {
        return Ok(None);
    }
    let candles = rows
        .into_iter()
        .map(|r| Candle::new(r.time, r.open, r.high, r.low, r.close, r.volume, r.value))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| MarketError::Parse(format!("{}: {}", ticker, e)))?;
    CandleSeries::new(candles)
        .map(Some)
        .map_err(|e| MarketError::Parse(format!("{}: {}", ticker, e)))
}

#[async_trait]
impl MarketDataProvider for SnapshotProvider {
    async fn fetch_daily_candles(
        &self,
        ticker: &str,
        count: usize,
    ) -> Result<CandleSeries, MarketError> {
        let series = self
            .instrument(ticker)?
            .daily
            .as_ref()
            .ok_or_else(|| MarketError::NotFound(format!("daily candles for {}", ticker)))?;
        Ok(series.tail(count)?)
    }

    async fn fetch_intraday_candles(
        &self,
        ticker: &str,
        timeframe: TimeFrame,
        count: usize,
    ) -> Result<CandleSeries, MarketError> {
        let series = self
            .instrument(ticker)?
            .intraday
            .get(&timeframe)
            .ok_or_else(|| MarketError::NotFound(format!("{} candles for {}", timeframe, ticker)))?;
        Ok(series.tail(count)?)
    }

    async fn list_instruments(&self) -> Result<Vec<String>, MarketError> {
        Ok(self.instruments.keys().cloned().collect())
    }
}

#[async_trait]
impl FeeProvider for SnapshotProvider {
    async fn fetch_fee_info(&self, ticker: &str) -> Result<FeeInfo, MarketError> {
        self.instrument(ticker)?
            .fee
            .ok_or_else(|| MarketError::NotFound(format!("fee for {}", ticker)))
    }
}
