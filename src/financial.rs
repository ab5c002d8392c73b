//! Cost, ROI and savings estimates for the reduction programme

use tracing::debug;

use crate::models::{CostCategory, CostEstimate, FinancialInputs, FinancialResult, RoiEstimate};

/// MWh of renewable supply priced into the estimate
const RENEWABLE_UNITS: f64 = 10.0;
/// Tons of waste handled
const WASTE_UNITS: f64 = 20.0;
/// Vehicles upgraded
const TRANSPORT_UNITS: f64 = 5.0;

/// Dollars saved per percentage point of emissions reduction
const SAVINGS_PER_REDUCTION_PCT: f64 = 1000.0;

pub const PROJECTION_FIRST_YEAR: i32 = 2021;
pub const PROJECTION_YEARS: usize = 5;

pub fn compute_cost(inputs: &FinancialInputs) -> CostEstimate {
    let breakdown = vec![
        (
            CostCategory::Renewable,
            inputs.renewable_cost_per_mwh * RENEWABLE_UNITS,
        ),
        (CostCategory::Waste, inputs.waste_cost_per_ton * WASTE_UNITS),
        (
            CostCategory::Transport,
            inputs.transport_cost_per_vehicle * TRANSPORT_UNITS,
        ),
    ];
    let total_cost: f64 = breakdown.iter().map(|(_, cost)| cost).sum();

    CostEstimate {
        total_cost,
        breakdown,
    }
}

/// ROI in percent; a zero cost yields 0 rather than dividing by zero
pub fn compute_roi(reduction_pct: f64, total_cost: f64) -> RoiEstimate {
    let savings = reduction_pct * SAVINGS_PER_REDUCTION_PCT;
    let roi_pct = if total_cost == 0.0 {
        0.0
    } else {
        (savings - total_cost) / total_cost * 100.0
    };

    RoiEstimate { roi_pct, savings }
}

/// Linear ramp of savings: nothing in the first year, then one more year's
/// savings each year
pub fn project_cumulative_savings(savings: f64) -> Vec<(i32, f64)> {
    (0..PROJECTION_YEARS)
        .map(|i| (PROJECTION_FIRST_YEAR + i as i32, savings * i as f64))
        .collect()
}

/// Symmetric window of +/-10 points around the current ROI
pub fn project_roi_trend(roi_pct: f64) -> Vec<(i32, f64)> {
    const OFFSETS: [f64; PROJECTION_YEARS] = [-10.0, -5.0, 0.0, 5.0, 10.0];

    OFFSETS
        .iter()
        .enumerate()
        .map(|(i, offset)| (PROJECTION_FIRST_YEAR + i as i32, roi_pct + offset))
        .collect()
}

pub fn evaluate(inputs: &FinancialInputs, reduction_pct: f64) -> FinancialResult {
    let cost = compute_cost(inputs);
    let roi = compute_roi(reduction_pct, cost.total_cost);
    debug!(
        total_cost = cost.total_cost,
        reduction_pct,
        roi_pct = roi.roi_pct,
        "evaluated financial model"
    );

    FinancialResult {
        total_cost: cost.total_cost,
        roi_pct: roi.roi_pct,
        savings: roi.savings,
        cost_breakdown: cost.breakdown,
        cumulative_savings: project_cumulative_savings(roi.savings),
        roi_trend: project_roi_trend(roi.roi_pct),
    }
}
