//! Data models for the sustainability datasets and calculator inputs/outputs

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Greenhouse-gas accounting scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Scope {
    Scope1,
    Scope2,
    Scope3,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Scope1, Scope::Scope2, Scope::Scope3];

    pub fn label(self) -> &'static str {
        match self {
            Scope::Scope1 => "Scope 1",
            Scope::Scope2 => "Scope 2",
            Scope::Scope3 => "Scope 3",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where an emission figure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DataSource {
    InternalInput,
    Benchmark,
    Assumption,
}

impl DataSource {
    pub fn label(self) -> &'static str {
        match self {
            DataSource::InternalInput => "Internal input",
            DataSource::Benchmark => "Benchmark",
            DataSource::Assumption => "Assumption",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionRecord {
    pub scope: Scope,
    pub parameter: &'static str,
    pub kind: &'static str,
    pub value: f64,
    pub unit: &'static str,
    pub emission_factor: f64,
    /// Precomputed figure from the source data; not always `value * emission_factor`
    pub emissions_tons_co2e: f64,
    pub source: DataSource,
    pub global_average: f64,
    pub comparison_pct: f64,
}

impl EmissionRecord {
    /// Emissions as implied by the activity value and its factor
    pub fn recomputed_emissions(&self) -> f64 {
        self.value * self.emission_factor
    }

    /// True when the stored figure matches `value * emission_factor`
    pub fn is_factor_consistent(&self) -> bool {
        let recomputed = self.recomputed_emissions();
        let scale = recomputed.abs().max(self.emissions_tons_co2e.abs()).max(1.0);
        (recomputed - self.emissions_tons_co2e).abs() / scale < 1e-9
    }
}

/// Slider positions for the scenario model, each a percentage in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioInputs {
    pub renewable_pct: f64,
    pub waste_pct: f64,
    pub transport_pct: f64,
}

/// Named emissions trajectory in the trend projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Trajectory {
    Reduction,
    Moderate,
    BusinessAsUsual,
}

impl Trajectory {
    pub const ALL: [Trajectory; 3] = [
        Trajectory::Reduction,
        Trajectory::Moderate,
        Trajectory::BusinessAsUsual,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Trajectory::Reduction => "Scenario A (Reduction)",
            Trajectory::Moderate => "Scenario B (Moderate)",
            Trajectory::BusinessAsUsual => "Scenario C (Business as Usual)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub trajectory: Trajectory,
    pub emissions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub reduction_pct: f64,
    /// Trajectory-major, then ascending year
    pub trend_series: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialInputs {
    pub renewable_cost_per_mwh: f64,
    pub waste_cost_per_ton: f64,
    pub transport_cost_per_vehicle: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CostCategory {
    Renewable,
    Waste,
    Transport,
}

impl CostCategory {
    pub fn label(self) -> &'static str {
        match self {
            CostCategory::Renewable => "Renewable Energy",
            CostCategory::Waste => "Waste Management",
            CostCategory::Transport => "Transport Upgrades",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostEstimate {
    pub total_cost: f64,
    /// Ordered renewable, waste, transport
    pub breakdown: Vec<(CostCategory, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoiEstimate {
    pub roi_pct: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialResult {
    pub total_cost: f64,
    pub roi_pct: f64,
    pub savings: f64,
    pub cost_breakdown: Vec<(CostCategory, f64)>,
    pub cumulative_savings: Vec<(i32, f64)>,
    pub roi_trend: Vec<(i32, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceTask {
    pub name: &'static str,
    pub duration: &'static str,
    pub owner: &'static str,
    pub completion_pct: u8,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceItem {
    pub regulation: &'static str,
    pub progress_pct: u8,
    pub tasks: Vec<ComplianceTask>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationItem {
    pub text: &'static str,
    pub priority: Priority,
    pub timeframe: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalItem {
    pub text: &'static str,
    pub status: &'static str,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub category: &'static str,
    pub progress_pct: u8,
}

/// Gantt row as entered; dates stay textual until a chart is built
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttTask {
    pub name: &'static str,
    pub start_date: &'static str,
    pub end_date: &'static str,
    pub resource_tier: Priority,
    pub completion_pct: u8,
    pub owner: &'static str,
    pub status: &'static str,
}

/// Gantt row with parsed dates, ready for charting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttBar {
    pub name: String,
    pub start: NaiveDate,
    pub finish: NaiveDate,
    pub resource_tier: Priority,
    pub color_index: usize,
}

impl GanttBar {
    pub fn duration_days(&self) -> i64 {
        (self.finish - self.start).num_days()
    }
}
