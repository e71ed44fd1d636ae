//! Series math: moving averages and true range.

/// Exponential moving average over the full input, seeded with the first value.
///
/// Uses `alpha = 2 / (period + 1)` with no bias adjustment, so the output has
/// the same length as `values`.
pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    let Some(&first) = values.first() else {
        return out;
    };

    let alpha = 2.0 / (period as f64 + 1.0);
    let mut prev = first;
    out.push(prev);
    for &value in &values[1..] {
        prev = alpha * value + (1.0 - alpha) * prev;
        out.push(prev);
    }
    out
}

/// Simple average of the last `period` values
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Trailing rolling mean. Positions before the first full window are `None`.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let mut sum: f64 = values[..period].iter().sum();
    out[period - 1] = Some(sum / period as f64);
    for i in period..values.len() {
        sum += values[i] - values[i - period];
        out[i] = Some(sum / period as f64);
    }
    out
}

/// Largest of high-low, |high-prev_close| and |low-prev_close|.
/// Without a previous close the bar's own range is used.
pub fn true_range(high: f64, low: f64, prev_close: Option<f64>) -> f64 {
    let range = high - low;
    match prev_close {
        Some(prev) => range.max((high - prev).abs()).max((low - prev).abs()),
        None => range,
    }
}
