//! Monthly carbon footprint estimation.
//!
//! The estimate is a fixed linear formula over six lifestyle inputs. Terms
//! are evaluated in a fixed order so the same inputs always produce the same
//! bits:
//!
//! ```text
//! transport   = distance * factor[mode] * 4.33
//! electricity = electricity_usage * 0.82
//! gas         = gas_usage * 2.04
//! meat        = meat_consumption * 3.3 * 4.33
//! shopping    = shopping_freq * 5.2
//! total       = transport + electricity + gas + meat + shopping
//! ```
//!
//! Input is never rejected. Missing, non-numeric, non-finite or negative
//! values contribute nothing. Terms and totals too large for `f64` are
//! capped at `f64::MAX`, so every estimate is finite.

use serde::{Deserialize, Serialize};

/// Weeks per month, used to turn weekly rates into monthly ones.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// kg CO2e per unit of electricity.
pub const ELECTRICITY_FACTOR: f64 = 0.82;

/// kg CO2e per unit of gas.
pub const GAS_FACTOR: f64 = 2.04;

/// kg CO2e per meat meal.
pub const MEAT_FACTOR: f64 = 3.3;

/// kg CO2e per shopping trip.
pub const SHOPPING_FACTOR: f64 = 5.2;

/// Average monthly footprint in kg CO2e that estimates are compared against.
pub const BASELINE_KG_PER_MONTH: f64 = 200.0;

/// How the user commutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Private car
    Car,
    /// Bus
    Bus,
    /// Train
    Train,
    /// Bicycle
    Bike,
    /// On foot
    Walk,
}

impl TransportMode {
    /// kg CO2e per unit of distance.
    pub fn factor(self) -> f64 {
        match self {
            TransportMode::Car => 0.21,
            TransportMode::Bus => 0.089,
            TransportMode::Train => 0.041,
            TransportMode::Bike => 0.0,
            TransportMode::Walk => 0.0,
        }
    }

    /// Parses a mode name, case-insensitively.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "car" => Some(TransportMode::Car),
            "bus" => Some(TransportMode::Bus),
            "train" => Some(TransportMode::Train),
            "bike" => Some(TransportMode::Bike),
            "walk" => Some(TransportMode::Walk),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportMode::Car => write!(f, "car"),
            TransportMode::Bus => write!(f, "bus"),
            TransportMode::Train => write!(f, "train"),
            TransportMode::Bike => write!(f, "bike"),
            TransportMode::Walk => write!(f, "walk"),
        }
    }
}

/// Raw calculator form values, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FootprintForm {
    /// Transport mode name
    pub transport_mode: Option<String>,
    /// Weekly distance travelled
    pub transport_distance: Option<String>,
    /// Monthly electricity usage
    pub electricity_usage: Option<String>,
    /// Monthly gas usage
    pub gas_usage: Option<String>,
    /// Meat meals per week
    pub meat_consumption: Option<String>,
    /// Shopping trips per month
    pub shopping_freq: Option<String>,
}

/// Sanitized calculator input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintInput {
    /// Commute mode; `None` when the mode was not recognized
    pub transport_mode: Option<TransportMode>,
    /// Weekly distance travelled
    pub transport_distance: f64,
    /// Monthly electricity usage
    pub electricity_usage: f64,
    /// Monthly gas usage
    pub gas_usage: f64,
    /// Meat meals per week
    pub meat_consumption: f64,
    /// Shopping trips per month
    pub shopping_freq: f64,
}

impl Default for FootprintInput {
    fn default() -> Self {
        Self {
            transport_mode: Some(TransportMode::Car),
            transport_distance: 0.0,
            electricity_usage: 0.0,
            gas_usage: 0.0,
            meat_consumption: 0.0,
            shopping_freq: 0.0,
        }
    }
}

impl FootprintInput {
    /// Builds input from raw form values.
    ///
    /// A blank or missing transport mode means car. An unknown mode is kept
    /// as `None` and contributes no transport emissions.
    ///
    /// # Examples
    ///
    /// ```
    /// use ecotrace_core::estimator::{FootprintForm, FootprintInput, TransportMode};
    ///
    /// let form = FootprintForm {
    ///     transport_distance: Some("12km".to_string()),
    ///     gas_usage: Some("lots".to_string()),
    ///     ..FootprintForm::default()
    /// };
    /// let input = FootprintInput::from_form(&form);
    /// assert_eq!(input.transport_mode, Some(TransportMode::Car));
    /// assert_eq!(input.transport_distance, 12.0);
    /// assert_eq!(input.gas_usage, 0.0);
    /// ```
    pub fn from_form(form: &FootprintForm) -> Self {
        let transport_mode = match form.transport_mode.as_deref().map(str::trim) {
            None | Some("") => Some(TransportMode::Car),
            Some(name) => {
                let mode = TransportMode::parse(name);
                if mode.is_none() {
                    tracing::debug!(mode = %name, "Unknown transport mode, ignoring transport");
                }
                mode
            }
        };

        Self {
            transport_mode,
            transport_distance: field("transport_distance", form.transport_distance.as_deref()),
            electricity_usage: field("electricity_usage", form.electricity_usage.as_deref()),
            gas_usage: field("gas_usage", form.gas_usage.as_deref()),
            meat_consumption: field("meat_consumption", form.meat_consumption.as_deref()),
            shopping_freq: field("shopping_freq", form.shopping_freq.as_deref()),
        }
    }
}

fn field(name: &str, raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };
    if !raw.trim().is_empty() && numeric_prefix(raw.trim_start()).is_empty() {
        tracing::debug!(field = name, value = %raw, "Non-numeric input treated as zero");
    }
    parse_lenient(raw)
}

/// Parses the leading decimal number of `raw`, ignoring trailing text.
///
/// Returns 0 when there is no leading number or the number is negative or
/// not finite.
///
/// # Examples
///
/// ```
/// use ecotrace_core::estimator::parse_lenient;
///
/// assert_eq!(parse_lenient("42"), 42.0);
/// assert_eq!(parse_lenient(" 3.5 kWh"), 3.5);
/// assert_eq!(parse_lenient("abc"), 0.0);
/// assert_eq!(parse_lenient("-7"), 0.0);
/// ```
pub fn parse_lenient(raw: &str) -> f64 {
    numeric_prefix(raw.trim_start())
        .parse::<f64>()
        .map(non_negative)
        .unwrap_or(0.0)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Inputs are finite and non-negative, so the only overflow is `+inf`.
fn capped(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        tracing::debug!("Footprint overflowed, capping at f64::MAX");
        f64::MAX
    }
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = match bytes.first() {
        Some(b'+' | b'-') => 1,
        _ => 0,
    };

    let int_end = skip_digits(bytes, end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = skip_digits(bytes, exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    &s[..end]
}

fn skip_digits(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    i
}

/// Per-category monthly emissions in kg CO2e.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootprintBreakdown {
    /// Commuting
    pub transport: f64,
    /// Household electricity
    pub electricity: f64,
    /// Household gas
    pub gas: f64,
    /// Meat meals
    pub meat: f64,
    /// Shopping trips
    pub shopping: f64,
}

impl FootprintBreakdown {
    /// Sum of all categories, added in declaration order and capped at
    /// `f64::MAX`.
    pub fn total(&self) -> f64 {
        capped(self.transport + self.electricity + self.gas + self.meat + self.shopping)
    }
}

/// Whether an estimate is above or below the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Standing {
    /// Strictly above the baseline
    AboveAverage,
    /// At or below the baseline
    BelowAverage,
}

/// Comparison of an estimate against [`BASELINE_KG_PER_MONTH`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Distance from the baseline in percent, always non-negative
    pub percent: f64,
    /// Which side of the baseline the estimate falls on
    pub standing: Standing,
}

impl Comparison {
    /// Compares a monthly total against the baseline.
    pub fn against_baseline(total: f64) -> Self {
        let difference = (total - BASELINE_KG_PER_MONTH) / BASELINE_KG_PER_MONTH * 100.0;
        if difference > 0.0 {
            Self {
                percent: difference,
                standing: Standing::AboveAverage,
            }
        } else {
            Self {
                percent: difference.abs(),
                standing: Standing::BelowAverage,
            }
        }
    }

    /// Returns `true` when the estimate is at or below the baseline.
    pub fn is_good(&self) -> bool {
        self.standing == Standing::BelowAverage
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.standing {
            Standing::AboveAverage => write!(f, "{:.1}% above average", self.percent),
            Standing::BelowAverage => write!(f, "{:.1}% below average", self.percent),
        }
    }
}

/// Result of a footprint calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FootprintEstimate {
    /// Per-category emissions
    pub breakdown: FootprintBreakdown,
    /// Monthly total in kg CO2e
    pub total: f64,
    /// Comparison against the baseline
    pub comparison: Comparison,
}

/// Computes the monthly footprint for `input`.
///
/// # Examples
///
/// ```
/// use ecotrace_core::estimator::{compute_footprint, FootprintInput, Standing};
///
/// let estimate = compute_footprint(&FootprintInput::default());
/// assert_eq!(estimate.total, 0.0);
/// assert_eq!(estimate.comparison.standing, Standing::BelowAverage);
/// assert_eq!(estimate.comparison.percent, 100.0);
/// ```
pub fn compute_footprint(input: &FootprintInput) -> FootprintEstimate {
    let mode_factor = input.transport_mode.map_or(0.0, TransportMode::factor);

    let breakdown = FootprintBreakdown {
        transport: capped(non_negative(input.transport_distance) * mode_factor * WEEKS_PER_MONTH),
        electricity: capped(non_negative(input.electricity_usage) * ELECTRICITY_FACTOR),
        gas: capped(non_negative(input.gas_usage) * GAS_FACTOR),
        meat: capped(non_negative(input.meat_consumption) * MEAT_FACTOR * WEEKS_PER_MONTH),
        shopping: capped(non_negative(input.shopping_freq) * SHOPPING_FACTOR),
    };
    let total = breakdown.total();

    FootprintEstimate {
        breakdown,
        total,
        comparison: Comparison::against_baseline(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> FootprintInput {
        FootprintInput {
            transport_mode: Some(TransportMode::Car),
            transport_distance: 50.0,
            electricity_usage: 300.0,
            gas_usage: 20.0,
            meat_consumption: 7.0,
            shopping_freq: 2.0,
        }
    }

    #[test]
    fn test_all_zero_is_zero() {
        let estimate = compute_footprint(&FootprintInput::default());
        assert_eq!(estimate.total, 0.0);
    }

    #[test]
    fn test_car_only() {
        let input = FootprintInput {
            transport_distance: 100.0,
            ..FootprintInput::default()
        };
        let estimate = compute_footprint(&input);
        assert_eq!(estimate.total, 100.0 * 0.21 * 4.33);
        assert!((estimate.total - 90.93).abs() < 1e-9);
    }

    #[test]
    fn test_full_sample_matches_formula_bit_for_bit() {
        let estimate = compute_footprint(&sample_input());
        let expected: f64 =
            50.0 * 0.21 * 4.33 + 300.0 * 0.82 + 20.0 * 2.04 + 7.0 * 3.3 * 4.33 + 2.0 * 5.2;
        assert_eq!(estimate.total.to_bits(), expected.to_bits());
        assert!((estimate.total - 442.688).abs() < 1e-9);
    }

    #[test]
    fn test_full_sample_breakdown() {
        let b = compute_footprint(&sample_input()).breakdown;
        assert!((b.transport - 45.465).abs() < 1e-9);
        assert!((b.electricity - 246.0).abs() < 1e-9);
        assert!((b.gas - 40.8).abs() < 1e-9);
        assert!((b.meat - 100.023).abs() < 1e-9);
        assert!((b.shopping - 10.4).abs() < 1e-9);
    }

    #[test]
    fn test_full_sample_is_above_average() {
        let comparison = compute_footprint(&sample_input()).comparison;
        assert_eq!(comparison.standing, Standing::AboveAverage);
        assert!((comparison.percent - 121.344).abs() < 1e-9);
        assert!(!comparison.is_good());
        assert_eq!(comparison.to_string(), "121.3% above average");
    }

    #[test]
    fn test_comparison_for_442_655() {
        let comparison = Comparison::against_baseline(442.655);
        assert_eq!(comparison.standing, Standing::AboveAverage);
        assert!((comparison.percent - 121.3275).abs() < 1e-9);
        let rounded = (comparison.percent * 100.0).round() / 100.0;
        assert!((rounded - 121.33).abs() < 1e-9);
    }

    #[test]
    fn test_exact_baseline_is_below_average() {
        let comparison = Comparison::against_baseline(200.0);
        assert_eq!(comparison.standing, Standing::BelowAverage);
        assert_eq!(comparison.percent, 0.0);
    }

    #[test]
    fn test_below_average_uses_absolute_value() {
        let comparison = Comparison::against_baseline(150.0);
        assert_eq!(comparison.standing, Standing::BelowAverage);
        assert_eq!(comparison.percent, 25.0);
        assert_eq!(comparison.to_string(), "25.0% below average");
    }

    #[test]
    fn test_zero_emission_modes() {
        for mode in [TransportMode::Bike, TransportMode::Walk] {
            let input = FootprintInput {
                transport_mode: Some(mode),
                transport_distance: 500.0,
                ..FootprintInput::default()
            };
            assert_eq!(compute_footprint(&input).total, 0.0);
        }
    }

    #[test]
    fn test_public_transport_factors() {
        let bus = FootprintInput {
            transport_mode: Some(TransportMode::Bus),
            transport_distance: 10.0,
            ..FootprintInput::default()
        };
        assert_eq!(compute_footprint(&bus).total, 10.0 * 0.089 * 4.33);

        let train = FootprintInput {
            transport_mode: Some(TransportMode::Train),
            ..bus
        };
        assert_eq!(compute_footprint(&train).total, 10.0 * 0.041 * 4.33);
    }

    #[test]
    fn test_unknown_mode_contributes_nothing() {
        let form = FootprintForm {
            transport_mode: Some("rocket".to_string()),
            transport_distance: Some("100".to_string()),
            electricity_usage: Some("10".to_string()),
            ..FootprintForm::default()
        };
        let input = FootprintInput::from_form(&form);
        assert_eq!(input.transport_mode, None);
        assert_eq!(compute_footprint(&input).total, 10.0 * 0.82);
    }

    #[test]
    fn test_empty_form_is_zero() {
        let input = FootprintInput::from_form(&FootprintForm::default());
        assert_eq!(input, FootprintInput::default());
        assert_eq!(compute_footprint(&input).total, 0.0);
    }

    #[test]
    fn test_partial_form_gives_smaller_total() {
        let full = FootprintForm {
            transport_mode: Some("car".to_string()),
            transport_distance: Some("50".to_string()),
            electricity_usage: Some("300".to_string()),
            gas_usage: Some("20".to_string()),
            meat_consumption: Some("7".to_string()),
            shopping_freq: Some("2".to_string()),
        };
        let partial = FootprintForm {
            gas_usage: Some("twenty".to_string()),
            shopping_freq: None,
            ..full.clone()
        };
        let full_total = compute_footprint(&FootprintInput::from_form(&full)).total;
        let partial_total = compute_footprint(&FootprintInput::from_form(&partial)).total;
        assert!(partial_total < full_total);
        assert!((full_total - partial_total - (40.8 + 10.4)).abs() < 1e-9);
    }

    #[test]
    fn test_parse_lenient_prefixes() {
        assert_eq!(parse_lenient("12kg"), 12.0);
        assert_eq!(parse_lenient("1.5e2 units"), 150.0);
        assert_eq!(parse_lenient("2e"), 2.0);
        assert_eq!(parse_lenient(".5"), 0.5);
        assert_eq!(parse_lenient("5."), 5.0);
        assert_eq!(parse_lenient("+3"), 3.0);
    }

    #[test]
    fn test_parse_lenient_rejects_to_zero() {
        assert_eq!(parse_lenient(""), 0.0);
        assert_eq!(parse_lenient("."), 0.0);
        assert_eq!(parse_lenient("-"), 0.0);
        assert_eq!(parse_lenient("NaN"), 0.0);
        assert_eq!(parse_lenient("Infinity"), 0.0);
        assert_eq!(parse_lenient("1e999"), 0.0);
        assert_eq!(parse_lenient("-0.5"), 0.0);
    }

    #[test]
    fn test_direct_garbage_values_are_sanitized() {
        let input = FootprintInput {
            transport_distance: f64::NAN,
            electricity_usage: -10.0,
            gas_usage: f64::INFINITY,
            ..FootprintInput::default()
        };
        assert_eq!(compute_footprint(&input).total, 0.0);
    }

    #[test]
    fn test_huge_input_stays_finite() {
        let form = FootprintForm {
            meat_consumption: Some("1e308".to_string()),
            ..FootprintForm::default()
        };
        let input = FootprintInput::from_form(&form);
        assert_eq!(input.meat_consumption, 1e308);

        let estimate = compute_footprint(&input);
        assert_eq!(estimate.breakdown.meat, f64::MAX);
        assert_eq!(estimate.total, f64::MAX);
        assert!(estimate.comparison.percent.is_finite());
        assert_eq!(estimate.comparison.standing, Standing::AboveAverage);
    }

    #[test]
    fn test_overflowing_sum_is_capped() {
        let input = FootprintInput {
            electricity_usage: f64::MAX / 2.0,
            gas_usage: f64::MAX / 4.0,
            shopping_freq: f64::MAX / 4.0,
            ..FootprintInput::default()
        };
        let estimate = compute_footprint(&input);
        assert!(estimate.breakdown.gas.is_finite());
        assert_eq!(estimate.total, f64::MAX);
    }

    #[test]
    fn test_transport_mode_parse_and_display() {
        for mode in [
            TransportMode::Car,
            TransportMode::Bus,
            TransportMode::Train,
            TransportMode::Bike,
            TransportMode::Walk,
        ] {
            assert_eq!(TransportMode::parse(&mode.to_string()), Some(mode));
        }
        assert_eq!(TransportMode::parse(" TRAIN "), Some(TransportMode::Train));
    }
}
