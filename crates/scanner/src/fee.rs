use scout_core::common::asset_symbol;
use scout_core::market::entity::FeeInfo;
use scout_core::market::error::MarketError;
use tracing::{info, warn};

/// # Summary
/// 判断某交易对的提币手续费是否过高而应被排除。
///
/// # Logic
/// 1. 查询失败时放行 (返回 `false`) 并记录警告。
/// 2. 手续费为 0 或参考价非正时放行。
/// 3. 手续费折算计价货币后高于 `threshold` 时排除。
///
/// # Arguments
/// * `ticker`: 交易对代码，仅用于日志。
/// * `lookup`: 手续费查询结果。
/// * `threshold`: 计价货币手续费上限。
///
/// # Returns
/// 应排除返回 `true`。
pub fn is_fee_too_high(ticker: &str, lookup: &Result<FeeInfo, MarketError>, threshold: f64) -> bool {
    let fee = match lookup {
        Ok(fee) => fee,
        Err(e) => {
            warn!(ticker, error = %e, "Fee lookup failed, keeping candidate");
            return false;
        }
    };
    if fee.withdrawal_fee <= 0.0 || fee.reference_price <= 0.0 {
        return false;
    }

    let quote_fee = fee.quote_value();
    let too_high = quote_fee > threshold;
    if too_high {
        info!(
            ticker,
            asset = asset_symbol(ticker),
            quote_fee,
            threshold,
            "Withdrawal fee too high, excluding"
        );
    }
    too_high
}
