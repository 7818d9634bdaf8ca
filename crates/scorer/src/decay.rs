/// `c * e^(-k*t) + b`: starts at `c + b` and falls toward `b`.
#[inline]
pub fn decreasing_decay(c: f64, k: f64, t: f64, b: f64) -> f64 {
    c * (-k * t).exp() + b
}

/// `c * (1 - e^(-k*t)) + b`: starts at `b` and rises toward `c + b`.
#[inline]
pub fn increasing_decay(c: f64, k: f64, t: f64, b: f64) -> f64 {
    c * (1.0 - (-k * t).exp()) + b
}
