//! Scenario model: slider percentages to an aggregate emissions reduction

use tracing::debug;

use crate::models::{ScenarioInputs, ScenarioResult, Trajectory, TrendPoint};

const RENEWABLE_WEIGHT: f64 = 0.2;
const WASTE_WEIGHT: f64 = 0.1;
const TRANSPORT_WEIGHT: f64 = 0.15;

pub const TREND_FIRST_YEAR: i32 = 2021;
pub const TREND_YEARS: usize = 11;

const REDUCTION_BASELINE: [f64; TREND_YEARS] = [
    12000.0, 11500.0, 11000.0, 10500.0, 10000.0, 9500.0, 9200.0, 8800.0, 8600.0, 8300.0, 8000.0,
];
const MODERATE_BASELINE: [f64; TREND_YEARS] = [
    12000.0, 11600.0, 11200.0, 10800.0, 10400.0, 10200.0, 10000.0, 9800.0, 9600.0, 9400.0, 9200.0,
];
const BUSINESS_AS_USUAL: [f64; TREND_YEARS] = [
    12000.0, 12200.0, 12400.0, 12600.0, 12800.0, 13000.0, 13200.0, 13400.0, 13600.0, 13800.0,
    14000.0,
];

/// Only these year indices (2024, 2025) respond to the reduction
const SCALED_YEAR_INDICES: [usize; 2] = [3, 4];

/// Estimated emissions reduction in percent
pub fn compute_reduction(inputs: &ScenarioInputs) -> f64 {
    inputs.renewable_pct * RENEWABLE_WEIGHT
        + inputs.waste_pct * WASTE_WEIGHT
        + inputs.transport_pct * TRANSPORT_WEIGHT
}

fn scaling(trajectory: Trajectory) -> (&'static [f64; TREND_YEARS], f64) {
    match trajectory {
        Trajectory::Reduction => (&REDUCTION_BASELINE, 10.0),
        Trajectory::Moderate => (&MODERATE_BASELINE, 5.0),
        Trajectory::BusinessAsUsual => (&BUSINESS_AS_USUAL, 0.0),
    }
}

/// Emissions per year 2021-2031 for each trajectory
///
/// Points are ordered trajectory-major (Reduction, Moderate, Business as
/// Usual), then by year.
pub fn project_trend(reduction_pct: f64) -> Vec<TrendPoint> {
    let mut series = Vec::with_capacity(TREND_YEARS * Trajectory::ALL.len());

    for trajectory in Trajectory::ALL {
        let (baseline, multiplier) = scaling(trajectory);
        for (i, &base) in baseline.iter().enumerate() {
            let emissions = if multiplier != 0.0 && SCALED_YEAR_INDICES.contains(&i) {
                base - reduction_pct * multiplier
            } else {
                base
            };
            series.push(TrendPoint {
                year: TREND_FIRST_YEAR + i as i32,
                trajectory,
                emissions,
            });
        }
    }

    series
}

/// Run the full scenario model for one set of slider positions
pub fn evaluate(inputs: &ScenarioInputs) -> ScenarioResult {
    let reduction_pct = compute_reduction(inputs);
    debug!(
        renewable = inputs.renewable_pct,
        waste = inputs.waste_pct,
        transport = inputs.transport_pct,
        reduction_pct,
        "evaluated scenario"
    );
    ScenarioResult {
        reduction_pct,
        trend_series: project_trend(reduction_pct),
    }
}

/// Points of one trajectory, in year order
pub fn trajectory_points(result: &ScenarioResult, trajectory: Trajectory) -> Vec<&TrendPoint> {
    result
        .trend_series
        .iter()
        .filter(|p| p.trajectory == trajectory)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(renewable: f64, waste: f64, transport: f64) -> ScenarioInputs {
        ScenarioInputs {
            renewable_pct: renewable,
            waste_pct: waste,
            transport_pct: transport,
        }
    }

    #[test]
    fn default_sliders_give_sixteen_percent() {
        let reduction = compute_reduction(&inputs(50.0, 30.0, 20.0));
        assert!((reduction - 16.0).abs() < 1e-9);
        assert_eq!(format!("{:.2}", reduction), "16.00");
    }

    #[test]
    fn reduction_bounds() {
        assert_eq!(compute_reduction(&inputs(0.0, 0.0, 0.0)), 0.0);
        assert!((compute_reduction(&inputs(100.0, 100.0, 100.0)) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn reduction_is_monotone_in_each_slider() {
        let base = compute_reduction(&inputs(40.0, 40.0, 40.0));
        for step in [1.0, 10.0, 60.0] {
            assert!(compute_reduction(&inputs(40.0 + step, 40.0, 40.0)) > base);
            assert!(compute_reduction(&inputs(40.0, 40.0 + step, 40.0)) > base);
            assert!(compute_reduction(&inputs(40.0, 40.0, 40.0 + step)) > base);
        }
    }

    #[test]
    fn reduction_is_linear() {
        let a = inputs(10.0, 20.0, 30.0);
        let b = inputs(30.0, 50.0, 10.0);
        let sum = inputs(40.0, 70.0, 40.0);
        let lhs = compute_reduction(&sum);
        let rhs = compute_reduction(&a) + compute_reduction(&b);
        assert!((lhs - rhs).abs() < 1e-9);
    }

    #[test]
    fn trend_scales_only_2024_and_2025() {
        let result = evaluate(&inputs(50.0, 30.0, 20.0));
        assert_eq!(result.trend_series.len(), 33);

        let reduction: Vec<f64> = trajectory_points(&result, Trajectory::Reduction)
            .iter()
            .map(|p| p.emissions)
            .collect();
        assert_eq!(reduction[2], 11000.0);
        assert!((reduction[3] - 10340.0).abs() < 1e-9);
        assert!((reduction[4] - 9840.0).abs() < 1e-9);
        assert_eq!(reduction[5], 9500.0);

        let moderate: Vec<f64> = trajectory_points(&result, Trajectory::Moderate)
            .iter()
            .map(|p| p.emissions)
            .collect();
        assert!((moderate[3] - 10720.0).abs() < 1e-9);
        assert!((moderate[4] - 10320.0).abs() < 1e-9);
        assert_eq!(moderate[10], 9200.0);
    }

    #[test]
    fn business_as_usual_ignores_reduction() {
        let low = project_trend(0.0);
        let high = project_trend(45.0);
        let bau = |series: &[TrendPoint]| -> Vec<f64> {
            series
                .iter()
                .filter(|p| p.trajectory == Trajectory::BusinessAsUsual)
                .map(|p| p.emissions)
                .collect()
        };
        assert_eq!(bau(&low), bau(&high));
        assert_eq!(bau(&low).first(), Some(&12000.0));
        assert_eq!(bau(&low).last(), Some(&14000.0));
    }

    #[test]
    fn trend_years_span_2021_to_2031() {
        let series = project_trend(16.0);
        let years: Vec<i32> = series
            .iter()
            .filter(|p| p.trajectory == Trajectory::Moderate)
            .map(|p| p.year)
            .collect();
        assert_eq!(years, (2021..=2031).collect::<Vec<_>>());
    }

    #[test]
    fn evaluation_is_deterministic() {
        let i = inputs(73.0, 12.0, 88.0);
        assert_eq!(evaluate(&i), evaluate(&i));
    }
}
