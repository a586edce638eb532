use scout_core::market::error::DataError;

/// # Summary
/// 计算指数移动平均 (EMA) 序列。
///
/// # Logic
/// 1. 以前 `period` 个值的简单平均作为种子。
/// 2. 之后按 `ema = alpha * value + (1 - alpha) * ema` 递推，`alpha = 2 / (period + 1)`。
/// 3. 输出从第 `period` 个值开始对齐，长度为 `values.len() - period + 1`。
///
/// # Arguments
/// * `values`: 按时间升序的数值。
/// * `period`: 周期，必须 >= 1。
///
/// # Returns
/// 成功返回 EMA 序列；数据不足 `period` 个时返回 `DataError::InsufficientData`。
pub fn ema(values: &[f64], period: u32) -> Result<Vec<f64>, DataError> {
    let len = usize::try_from(period).map_err(|_| DataError::InvalidWindow)?;
    if len == 0 {
        return Err(DataError::InvalidWindow);
    }
    if values.len() < len {
        return Err(DataError::InsufficientData {
            required: len,
            actual: values.len(),
        });
    }

    let alpha = 2.0 / (f64::from(period) + 1.0);
    let seed = values[..len].iter().sum::<f64>() / f64::from(period);

    let mut out = Vec::with_capacity(values.len() - len + 1);
    out.push(seed);
    let mut current = seed;
    for value in &values[len..] {
        current = alpha * value + (1.0 - alpha) * current;
        out.push(current);
    }
    Ok(out)
}

/// 最后一个 EMA 值。
pub fn latest_ema(values: &[f64], period: u32) -> Result<f64, DataError> {
    ema(values, period)?
        .last()
        .copied()
        .ok_or(DataError::InsufficientData {
            required: 1,
            actual: 0,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ema_seeded_with_sma() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let out = ema(&values, 3).unwrap();
        // seed = 2, alpha = 0.5
        assert_eq!(out, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_ema_of_constant_is_constant() {
        let values = [7.0; 30];
        assert_eq!(latest_ema(&values, 20).unwrap(), 7.0);
    }

    #[test]
    fn test_ema_rejects_short_input_and_zero_period() {
        assert_eq!(
            ema(&[1.0, 2.0], 5),
            Err(DataError::InsufficientData {
                required: 5,
                actual: 2
            })
        );
        assert_eq!(ema(&[1.0], 0), Err(DataError::InvalidWindow));
    }
}
