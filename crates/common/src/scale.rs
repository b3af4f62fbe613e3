/// Exponent applied to the normalized value; a square root keeps small
/// counts visible next to very busy systems.
pub const DEFAULT_POWER: f64 = 0.5;

/// Rescales `values` into the range `[mi, ma]` for drawing.
///
/// Each value is mapped to `mi + (ma - mi) * ((x - min) / delta) ^ power`,
/// where `min`/`max` are taken over the input and `delta = max - min`.
/// A zero `delta` (all values equal) is treated as 1, so a flat input maps
/// every value to `mi`.
pub fn prop_to_size(values: &[f64], mi: f64, ma: f64, power: f64) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut delta = max - min;
    if delta == 0.0 || !delta.is_finite() {
        delta = 1.0;
    }

    values
        .iter()
        .map(|&x| mi + (ma - mi) * ((x - min) / delta).powf(power))
        .collect()
}
