//! 每日选股扫描器：市场趋势判定、手续费过滤、候选评分与排序。

pub mod error;
pub mod fee;
pub mod indicators;
pub mod regime;
pub mod scanner;
pub mod scoring;

pub use error::ScanError;
pub use scanner::TickerScanner;
