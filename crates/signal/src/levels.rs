use scout_core::config::WindowPolicy;
use scout_core::market::entity::{Candle, CandleSeries};
use scout_core::market::error::DataError;

/// # Summary
/// 当前 K 线之前的回看窗口内的支撑位与阻力位。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Levels {
    // 窗口内最低价
    pub support: f64,
    // 窗口内最高价
    pub resistance: f64,
    // 实际使用的窗口长度 (Clamp 策略下可能小于配置值)
    pub window: usize,
}

/// # Summary
/// 计算支撑位与阻力位。
///
/// # Logic
/// 1. 当前 K 线 (最后一根) 不参与计算。
/// 2. 取其之前最近的 `window` 根 K 线，支撑为最低价最小值，阻力为最高价最大值。
/// 3. 历史不足 `window` 根时按 `policy` 收缩窗口或报错。
///
/// # Arguments
/// * `series`: 至少 2 根 K 线的序列。
/// * `window`: 回看窗口长度，必须 >= 1。
/// * `policy`: 历史不足时的处理策略。
///
/// # Returns
/// 成功返回 `Levels`，否则返回 `DataError`。
pub fn support_resistance(
    series: &CandleSeries,
    window: usize,
    policy: WindowPolicy,
) -> Result<Levels, DataError> {
    if window == 0 {
        return Err(DataError::InvalidWindow);
    }
    let candles = series.as_slice();
    if candles.len() < 2 {
        return Err(DataError::InsufficientData {
            required: 2,
            actual: candles.len(),
        });
    }

    let history = &candles[..candles.len() - 1];
    let window = match policy {
        _ if history.len() >= window => window,
        WindowPolicy::Clamp => history.len(),
        WindowPolicy::Strict => {
            return Err(DataError::InsufficientData {
                required: window + 1,
                actual: candles.len(),
            });
        }
    };

    let recent = &history[history.len() - window..];
    let support = recent.iter().map(Candle::low).fold(f64::INFINITY, f64::min);
    let resistance = recent
        .iter()
        .map(Candle::high)
        .fold(f64::NEG_INFINITY, f64::max);

    Ok(Levels {
        support,
        resistance,
        window,
    })
}

/// # Summary
/// 判断价格是否接近某个价位：`|price - level| / level < tolerance`。
///
/// # Invariants
/// - 非正价位永远不算接近，避免零价资产除零。
pub fn is_near(price: f64, level: f64, tolerance: f64) -> bool {
    if level <= 0.0 {
        return false;
    }
    (price - level).abs() / level < tolerance
}
