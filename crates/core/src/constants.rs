/// Upper bound for the risk and diversification scores.
pub const SCORE_CEILING: f64 = 100.0;

/// Risk points per percentage point of return volatility.
pub const RISK_VOLATILITY_WEIGHT: f64 = 5.0;

/// Risk points for a portfolio held entirely in one asset type.
pub const RISK_CONCENTRATION_WEIGHT: f64 = 50.0;

/// Diversification points per distinct asset type held.
pub const DIVERSIFICATION_TYPE_WEIGHT: f64 = 20.0;

/// Diversification points for a perfectly unconcentrated portfolio.
pub const DIVERSIFICATION_SPREAD_WEIGHT: f64 = 30.0;

/// Longest ticker symbol accepted by the add-asset form.
pub const MAX_SYMBOL_LEN: usize = 12;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Decimal places used when rendering money and percentages.
pub const DISPLAY_DECIMAL_PRECISION: usize = 2;
