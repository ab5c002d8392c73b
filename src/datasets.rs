//! Fixed sample datasets backing every dashboard page
//!
//! Each function builds a fresh copy of its table, so callers may sort or
//! filter the result without affecting later renders.

use crate::models::{
    ComplianceItem, ComplianceTask, DataSource, EmissionRecord, GanttTask, GoalItem, GoalProgress,
    Priority, RecommendationItem, Scope,
};

const fn emission(
    scope: Scope,
    parameter: &'static str,
    kind: &'static str,
    value: f64,
    unit: &'static str,
    emission_factor: f64,
    emissions_tons_co2e: f64,
    source: DataSource,
    global_average: f64,
    comparison_pct: f64,
) -> EmissionRecord {
    EmissionRecord {
        scope,
        parameter,
        kind,
        value,
        unit,
        emission_factor,
        emissions_tons_co2e,
        source,
        global_average,
        comparison_pct,
    }
}

use DataSource::{Assumption, Benchmark, InternalInput};
use Scope::{Scope1, Scope2, Scope3};

#[rustfmt::skip]
const EMISSIONS: [EmissionRecord; 25] = [
    emission(Scope1, "Fuel consumption", "Diesel", 400.0, "liters", 2.68, 1072.0, InternalInput, 1100.0, -2.5),
    emission(Scope1, "Fuel consumption", "Gasoline", 600.0, "liters", 2.31, 1386.0, Benchmark, 1400.0, -1.0),
    emission(Scope1, "Fuel consumption", "Natural Gas", 1000.0, "cubic meters", 2.02, 2020.0, InternalInput, 2100.0, -3.8),
    emission(Scope1, "Refrigerants", "R-123", 12.0, "kg", 1430.0, 17160.0, InternalInput, 17500.0, -2.0),
    emission(Scope1, "Refrigerants", "R-12", 130.0, "kg", 1640.0, 21320.0, InternalInput, 21500.0, -0.8),
    emission(Scope1, "Heating Systems", "Boilers", 200.0, "liters", 2.8, 560.0, InternalInput, 600.0, -6.7),
    emission(Scope1, "Backup Generators", "Diesel generators", 50.0, "liters", 2.8, 140.0, InternalInput, 150.0, -6.7),
    emission(Scope1, "Natural Gas", "Methane", 1000.0, "cubic meters", 1.9, 1900.0, Benchmark, 2000.0, -5.0),
    emission(Scope1, "Medical Gases", "Nitrous oxide", 800.0, "cubic meters", 1.5, 1200.0, InternalInput, 1300.0, -8.3),
    emission(Scope2, "Electricity consumption", "Solar", 5000.0, "kWh", 0.3, 1500.0, InternalInput, 5100.0, -6.7),
    emission(Scope2, "Electricity consumption", "Wind", 7000.0, "kWh", 0.2, 1400.0, Benchmark, 7000.0, -0.0),
    emission(Scope2, "Electricity losses", "Transmission losses", 1000.0, "kWh", 0.1, 100.0, Benchmark, 1500.0, -33.3),
    emission(Scope2, "Renewable electricity", "Solar panels", 6000.0, "kWh", 0.5, 3000.0, Benchmark, 6000.0, 0.0),
    emission(Scope2, "Fossil fuels", "Coal", 10000.0, "kWh", 1.1, 11000.0, Benchmark, 12000.0, -8.3),
    emission(Scope2, "Grid electricity", "Grid electricity", 15000.0, "kWh", 0.92, 13800.0, Benchmark, 14000.0, -1.4),
    emission(Scope3, "Staff transport", "Buses", 5000.0, "km", 0.12, 600.0, InternalInput, 5200.0, -3.8),
    emission(Scope3, "Ambulance transport", "Trucks", 8000.0, "km", 0.15, 1200.0, Benchmark, 8000.0, -0.0),
    emission(Scope3, "Patient transport", "Ambulances", 6000.0, "km", 0.1, 600.0, InternalInput, 6200.0, -3.2),
    emission(Scope3, "Visitor transport", "Cars", 4000.0, "km", 0.2, 800.0, Benchmark, 4200.0, -4.8),
    emission(Scope3, "Logistics", "Logistics vehicles", 3000.0, "km", 0.3, 900.0, InternalInput, 3500.0, -14.3),
    emission(Scope3, "Medical waste", "Sharps", 5.0, "tons", 0.5, 1.5, Assumption, 1.8, -16.7),
    emission(Scope3, "Chemical waste", "Toxic chemicals", 3.0, "tons", 1.2, 1.8, Assumption, 2.0, -10.0),
    emission(Scope3, "Biological waste", "Infectious waste", 2.0, "tons", 1.8, 1.5, Assumption, 2.0, -25.0),
    emission(Scope3, "Organic waste", "Compost", 2.5, "tons", 0.5, 1.25, Assumption, 2.7, -7.4),
    emission(Scope3, "General waste", "Non-recyclable", 5.0, "tons", 0.3, 1.5, Assumption, 5.5, -72.7),
];

/// Emissions inventory, 25 parameters across the three scopes
pub fn emissions() -> Vec<EmissionRecord> {
    EMISSIONS.to_vec()
}

/// Total `emissions_tons_co2e` per scope, in scope order
pub fn emissions_by_scope(records: &[EmissionRecord]) -> Vec<(Scope, f64)> {
    Scope::ALL
        .iter()
        .map(|&scope| {
            let total = records
                .iter()
                .filter(|r| r.scope == scope)
                .map(|r| r.emissions_tons_co2e)
                .sum();
            (scope, total)
        })
        .collect()
}

/// Records whose stored emissions disagree with `value * emission_factor`
///
/// The sample data carries a handful of these; they are reported, never
/// corrected.
pub fn inconsistent_emission_records(records: &[EmissionRecord]) -> Vec<&EmissionRecord> {
    records.iter().filter(|r| !r.is_factor_consistent()).collect()
}

const REGULATIONS: [(&str, u8); 5] = [
    ("JCI Regulation", 70),
    ("ISO 14001 Certification", 80),
    ("EU Emissions Standards", 50),
    ("National Waste Reduction Targets", 90),
    ("Renewable Energy Transition", 60),
];

/// Compliance checklist per regulation
///
/// Every regulation shares the same three tasks; their completion trails the
/// regulation's overall progress by 10 and 20 points.
pub fn compliance_items() -> Vec<ComplianceItem> {
    REGULATIONS
        .iter()
        .map(|&(regulation, progress_pct)| ComplianceItem {
            regulation,
            progress_pct,
            tasks: vec![
                ComplianceTask {
                    name: "Develop compliance plan",
                    duration: "2 months",
                    owner: "Sustainability Officer",
                    completion_pct: progress_pct.saturating_sub(10),
                    priority: Priority::High,
                },
                ComplianceTask {
                    name: "Conduct audit",
                    duration: "1 month",
                    owner: "Environmental Manager",
                    completion_pct: progress_pct.saturating_sub(20),
                    priority: Priority::Medium,
                },
                ComplianceTask {
                    name: "Submit documentation",
                    duration: "3 months",
                    owner: "Compliance Team",
                    completion_pct: progress_pct,
                    priority: Priority::Low,
                },
            ],
        })
        .collect()
}

pub fn goals() -> Vec<GoalItem> {
    vec![
        GoalItem {
            text: "Net-zero emissions by 2030",
            status: "In Progress",
            priority: Priority::High,
        },
        GoalItem {
            text: "Offset 30% emissions by 2025",
            status: "Not Started",
            priority: Priority::Medium,
        },
        GoalItem {
            text: "Implement inset projects by 2026",
            status: "In Progress",
            priority: Priority::High,
        },
    ]
}

/// Recommendations in entry order; see `recommend::rank` for the display order
pub fn recommendations() -> Vec<RecommendationItem> {
    vec![
        RecommendationItem {
            text: "Increase renewable energy usage",
            priority: Priority::High,
            timeframe: "1 year",
        },
        RecommendationItem {
            text: "Implement advanced waste management systems",
            priority: Priority::Medium,
            timeframe: "2 years",
        },
        RecommendationItem {
            text: "Optimize transportation routes",
            priority: Priority::High,
            timeframe: "6 months",
        },
        RecommendationItem {
            text: "Conduct staff training on sustainability",
            priority: Priority::Low,
            timeframe: "1 year",
        },
    ]
}

pub fn goal_progress() -> Vec<GoalProgress> {
    vec![
        GoalProgress {
            category: "Renewable Energy",
            progress_pct: 60,
        },
        GoalProgress {
            category: "Waste Management",
            progress_pct: 40,
        },
        GoalProgress {
            category: "Transportation Optimization",
            progress_pct: 50,
        },
    ]
}

pub fn gantt_tasks() -> Vec<GanttTask> {
    vec![
        GanttTask {
            name: "Develop compliance plan",
            start_date: "2023-12-01",
            end_date: "2023-12-15",
            resource_tier: Priority::High,
            completion_pct: 50,
            owner: "Sustainability Officer",
            status: "In Progress",
        },
        GanttTask {
            name: "Conduct audit",
            start_date: "2023-12-16",
            end_date: "2023-12-31",
            resource_tier: Priority::Medium,
            completion_pct: 30,
            owner: "Environmental Manager",
            status: "Pending",
        },
        GanttTask {
            name: "Submit documentation",
            start_date: "2024-01-01",
            end_date: "2024-01-10",
            resource_tier: Priority::Low,
            completion_pct: 10,
            owner: "Compliance Team",
            status: "Not Started",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emissions_table_has_25_rows_split_by_scope() {
        let records = emissions();
        assert_eq!(records.len(), 25);
        let count = |s| records.iter().filter(|r| r.scope == s).count();
        assert_eq!(count(Scope1), 9);
        assert_eq!(count(Scope2), 6);
        assert_eq!(count(Scope3), 10);
    }

    #[test]
    fn scope_totals_aggregate_stored_emissions() {
        let totals = emissions_by_scope(&emissions());
        assert_eq!(totals[0], (Scope1, 46758.0));
        assert_eq!(totals[1], (Scope2, 30800.0));
        assert_eq!(totals[2].0, Scope3);
        assert!((totals[2].1 - 4107.55).abs() < 1e-9);
    }

    #[test]
    fn known_factor_inconsistencies_are_preserved() {
        let records = emissions();
        let flagged: Vec<_> = inconsistent_emission_records(&records)
            .into_iter()
            .map(|r| r.kind)
            .collect();
        assert_eq!(
            flagged,
            vec!["R-12", "Sharps", "Toxic chemicals", "Infectious waste"]
        );

        let r12 = records.iter().find(|r| r.kind == "R-12").unwrap();
        assert_eq!(r12.emissions_tons_co2e, 21320.0);
        assert_eq!(r12.recomputed_emissions(), 213200.0);
    }

    #[test]
    fn compliance_tasks_trail_regulation_progress() {
        let items = compliance_items();
        assert_eq!(items.len(), 5);
        let eu = items
            .iter()
            .find(|i| i.regulation == "EU Emissions Standards")
            .unwrap();
        let completions: Vec<u8> = eu.tasks.iter().map(|t| t.completion_pct).collect();
        assert_eq!(completions, vec![40, 30, 50]);
    }

    #[test]
    fn tables_are_identical_across_calls() {
        assert_eq!(emissions(), emissions());
        assert_eq!(compliance_items(), compliance_items());
        assert_eq!(gantt_tasks(), gantt_tasks());
    }
}
