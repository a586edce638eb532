use scout_core::market::error::{DataError, MarketError};
use thiserror::Error;

/// # Summary
/// 扫描器错误枚举。
///
/// # Invariants
/// - 单个候选的行情或手续费失败不会产生此错误，只会被跳过或放行。
#[derive(Error, Debug)]
pub enum ScanError {
    // 参考交易对数据不满足计算前提
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    // 拉取参考数据或交易对列表失败
    #[error("Market error: {0}")]
    Market(#[from] MarketError),
}
