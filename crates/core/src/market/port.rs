use crate::common::TimeFrame;
use crate::market::entity::{CandleSeries, FeeInfo};
use crate::market::error::MarketError;
use async_trait::async_trait;

/// # Summary
/// 市场行情数据提供者接口（原始数据源）。
///
/// # Invariants
/// - 返回的序列已按时间升序校验，最后一根为当前 K 线。
/// - 实现者不得在失败时静默返回空序列，应返回 `MarketError`。
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// # Summary
    /// 获取指定交易对最近的日线数据。
    ///
    /// # Arguments
    /// * `ticker`: 交易对代码 (例如 `KRW-BTC`)。
    /// * `count`: 需要的 K 线数量上限。
    ///
    /// # Returns
    /// 成功返回最近 `count` 根日线组成的序列。
    async fn fetch_daily_candles(
        &self,
        ticker: &str,
        count: usize,
    ) -> Result<CandleSeries, MarketError>;

    /// # Summary
    /// 获取指定交易对的盘中 K 线。
    ///
    /// # Arguments
    /// * `ticker`: 交易对代码。
    /// * `timeframe`: K 线周期。
    /// * `count`: 需要的 K 线数量上限。
    ///
    /// # Returns
    /// 成功返回最近 `count` 根 K 线组成的序列。
    async fn fetch_intraday_candles(
        &self,
        ticker: &str,
        timeframe: TimeFrame,
        count: usize,
    ) -> Result<CandleSeries, MarketError>;

    /// # Summary
    /// 列出数据源当前可交易的全部交易对。
    async fn list_instruments(&self) -> Result<Vec<String>, MarketError>;
}

/// # Summary
/// 提币手续费与参考价查询接口。
///
/// # Invariants
/// - 查询失败由扫描器按“放行”处理，实现者无需自行吞掉错误。
#[async_trait]
pub trait FeeProvider: Send + Sync {
    /// # Summary
    /// 查询交易对对应资产的提币手续费和当前参考价。
    ///
    /// # Arguments
    /// * `ticker`: 交易对代码。
    ///
    /// # Returns
    /// 成功返回 `FeeInfo`。
    async fn fetch_fee_info(&self, ticker: &str) -> Result<FeeInfo, MarketError>;
}
