use crate::error::ScanError;
use crate::fee::is_fee_too_high;
use crate::regime::detect_regime;
use crate::scoring::{rank, score_candidate};
use futures::stream::{self, StreamExt};
use rust_decimal::prelude::ToPrimitive;
use scout_core::config::ScannerConfig;
use scout_core::market::entity::CandleSeries;
use scout_core::market::port::{FeeProvider, MarketDataProvider};
use scout_core::scan::entity::{DailyPicks, Regime, TickerScore};
use std::sync::Arc;
use tracing::{debug, info, warn};

// 评分只需要昨日与今日两根日线
const CANDIDATE_HISTORY: usize = 2;

/// # Summary
/// 每日选股扫描器，根据市场趋势从候选交易对中选出主、次两个交易对。
///
/// # Invariants
/// - 不持有任何可变状态，每次扫描都从端口重新获取数据。
/// - 候选查询可并发执行，但结果按候选原顺序汇总后再排序。
pub struct TickerScanner {
    // 候选日线数据源
    market: Arc<dyn MarketDataProvider>,
    // 提币手续费数据源
    fees: Arc<dyn FeeProvider>,
    config: ScannerConfig,
}

impl TickerScanner {
    pub fn new(
        market: Arc<dyn MarketDataProvider>,
        fees: Arc<dyn FeeProvider>,
        config: ScannerConfig,
    ) -> Self {
        Self {
            market,
            fees,
            config,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// # Summary
    /// 拉取参考交易对日线与全部计价货币交易对后执行每日扫描。
    ///
    /// # Logic
    /// 1. 获取参考交易对最近 `reference_history` 根日线。
    /// 2. 列出全部交易对，仅保留以 `quote_prefix` 开头的。
    /// 3. 调用 `scan_daily`。
    ///
    /// # Returns
    /// 成功返回 `DailyPicks`；参考数据或交易对列表获取失败时返回 `ScanError`。
    pub async fn select_daily_tickers(&self) -> Result<DailyPicks, ScanError> {
        let reference = self
            .market
            .fetch_daily_candles(&self.config.reference_ticker, self.config.reference_history)
            .await?;
        let candidates: Vec<String> = self
            .market
            .list_instruments()
            .await?
            .into_iter()
            .filter(|t| t.starts_with(&self.config.quote_prefix))
            .collect();
        info!(count = candidates.len(), "Scanning candidates");

        self.scan_daily(&reference, &candidates).await
    }

    /// # Summary
    /// 对给定候选执行一次每日扫描。
    ///
    /// # Logic
    /// 1. 由参考交易对日线判定市场趋势。
    /// 2. 逐个候选 (跳过参考交易对)：手续费过滤 → 拉取两根日线 → 按趋势打分。
    /// 3. 稳定排序后取前两名。
    ///
    /// # Arguments
    /// * `reference`: 参考交易对日线序列。
    /// * `candidates`: 候选交易对代码，顺序即同分时的优先顺序。
    ///
    /// # Returns
    /// 成功返回 `DailyPicks`，无合格候选时主次均为 `None`；
    /// 参考序列不足以计算慢线时返回 `ScanError::Data`。
    pub async fn scan_daily(
        &self,
        reference: &CandleSeries,
        candidates: &[String],
    ) -> Result<DailyPicks, ScanError> {
        let regime = detect_regime(reference, self.config.fast_ema, self.config.slow_ema)?;
        let threshold = self
            .config
            .fee_threshold()
            .to_f64()
            .unwrap_or(f64::INFINITY);

        let scores: Vec<TickerScore> = stream::iter(
            candidates
                .iter()
                .filter(|t| **t != self.config.reference_ticker),
        )
        .map(|ticker| self.score_ticker(ticker, regime, threshold))
        .buffered(self.config.lookup_concurrency.max(1))
        .filter_map(|score| async move { score })
        .collect()
        .await;

        let picks = rank(scores, regime);
        info!(
            %regime,
            primary = picks.primary.as_deref().unwrap_or("-"),
            secondary = picks.secondary.as_deref().unwrap_or("-"),
            "Daily scan finished"
        );
        Ok(picks)
    }

    async fn score_ticker(&self, ticker: &str, regime: Regime, threshold: f64) -> Option<TickerScore> {
        let fee = self.fees.fetch_fee_info(ticker).await;
        if is_fee_too_high(ticker, &fee, threshold) {
            return None;
        }

        let series = match self
            .market
            .fetch_daily_candles(ticker, CANDIDATE_HISTORY)
            .await
        {
            Ok(series) => series,
            Err(e) => {
                warn!(ticker, error = %e, "Skipping candidate, daily candles unavailable");
                return None;
            }
        };
        let Some(yesterday) = series.yesterday() else {
            debug!(ticker, "Skipping candidate, less than two daily candles");
            return None;
        };

        let score = score_candidate(yesterday, regime, &self.config)?;
        debug!(ticker, score, "Candidate qualified");
        Some(TickerScore {
            score,
            ticker: ticker.to_string(),
        })
    }
}
