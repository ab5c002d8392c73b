//! Navigation and page assembly
//!
//! Each navigation choice maps to exactly one page builder. Builders read the
//! static datasets and the caller's `Session`, run the calculators, and return
//! a fresh `Page`; nothing is retained between renders.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

use crate::assets::{self, AssetRoot};
use crate::datasets;
use crate::error::{DashboardError, Result};
use crate::financial;
use crate::gantt;
use crate::models::{GanttTask, Trajectory};
use crate::page::{Block, Chart, ChartKind, Page, Series, Table};
use crate::recommend;
use crate::render::{format_currency, format_percent};
use crate::scenario;
use crate::session::{Session, Widget};

pub const DASHBOARD_TITLE: &str = "Sheba Hospital Sustainability Dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NavPage {
    Landing,
    EmissionOverview,
    ScenarioModeling,
    FinancialModels,
    ComplianceTracker,
    Recommendations,
}

impl NavPage {
    /// Menu order
    pub const ALL: [NavPage; 6] = [
        NavPage::Landing,
        NavPage::EmissionOverview,
        NavPage::ScenarioModeling,
        NavPage::FinancialModels,
        NavPage::ComplianceTracker,
        NavPage::Recommendations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NavPage::Landing => "Landing Page",
            NavPage::EmissionOverview => "Emission Overview",
            NavPage::ScenarioModeling => "Scenario Modeling",
            NavPage::FinancialModels => "Financial Models",
            NavPage::ComplianceTracker => "Compliance Tracker",
            NavPage::Recommendations => "Recommendations",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            NavPage::Landing => "landing",
            NavPage::EmissionOverview => "emission-overview",
            NavPage::ScenarioModeling => "scenario-modeling",
            NavPage::FinancialModels => "financial-models",
            NavPage::ComplianceTracker => "compliance-tracker",
            NavPage::Recommendations => "recommendations",
        }
    }
}

impl fmt::Display for NavPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for NavPage {
    type Err = DashboardError;

    /// Accepts the exact menu label or its slug; anything else is rejected
    fn from_str(s: &str) -> Result<Self> {
        NavPage::ALL
            .iter()
            .copied()
            .find(|p| p.label() == s || p.slug() == s)
            .ok_or_else(|| DashboardError::UnknownPage(s.to_string()))
    }
}

/// Page builder bound to an asset directory
pub struct Dashboard {
    assets: AssetRoot,
}

impl Dashboard {
    pub fn new(assets: AssetRoot) -> Self {
        Self { assets }
    }

    pub fn assets(&self) -> &AssetRoot {
        &self.assets
    }

    pub fn render(&self, nav: NavPage, session: &Session) -> Result<Page> {
        debug!(page = nav.slug(), "rendering page");
        let page = match nav {
            NavPage::Landing => self.landing(),
            NavPage::EmissionOverview => self.emission_overview(),
            NavPage::ScenarioModeling => self.scenario_modeling(session),
            NavPage::FinancialModels => self.financial_models(session),
            NavPage::ComplianceTracker => self.compliance_tracker(),
            NavPage::Recommendations => self.recommendations()?,
        };
        Ok(page)
    }

    /// Parse a navigation choice and render it
    pub fn render_named(&self, nav: &str, session: &Session) -> Result<Page> {
        let nav = nav.parse::<NavPage>()?;
        self.render(nav, session)
    }

    fn page_header(&self, title: &str, intro: &str) -> Page {
        let mut page = Page::new(title);
        page.image(&self.assets.image_path(assets::SHEBA_LOGO), Some(200));
        page.markdown(intro);
        page
    }

    fn landing(&self) -> Page {
        let mut page = Page::new(&format!("Welcome to the {}", DASHBOARD_TITLE));
        page.image(&self.assets.image_path(assets::OPORTO_LOGO), Some(200));
        page.image(&self.assets.image_path(assets::SHEBA_LOGO), Some(200));
        page.markdown(LANDING_ABOUT);
        page.heading("Data Processing Flow Diagram");
        page.image(&self.assets.image_path(assets::FLOW_DIAGRAM), None);
        page.push(Block::Button {
            label: "Start Using Dashboard".to_string(),
        });
        page
    }

    fn emission_overview(&self) -> Page {
        let mut page = self.page_header(
            "Emissions Overview",
            "This section provides an overview of Sheba Hospital's emissions across Scope 1, \
             Scope 2, and Scope 3 categories. Each parameter includes specific sources, emissions \
             quantities, and the methodology used for data collection. Additionally, compare \
             Sheba's performance to global averages and see percentage differences.",
        );

        let records = datasets::emissions();
        for record in datasets::inconsistent_emission_records(&records) {
            debug!(
                parameter = record.parameter,
                kind = record.kind,
                stored = record.emissions_tons_co2e,
                recomputed = record.recomputed_emissions(),
                "stored emissions differ from value x factor"
            );
        }

        let mut table = Table::new(&[
            "Scope",
            "Parameter",
            "Type",
            "Value",
            "Unit",
            "Emission Factor",
            "Emissions (tons CO₂e)",
            "Source",
            "Global Average",
            "Comparison (%)",
        ]);
        for r in &records {
            table.push(vec![
                r.scope.label().into(),
                r.parameter.into(),
                r.kind.into(),
                r.value.into(),
                r.unit.into(),
                r.emission_factor.into(),
                r.emissions_tons_co2e.into(),
                r.source.label().into(),
                r.global_average.into(),
                r.comparison_pct.into(),
            ]);
        }
        page.heading("Detailed Emissions Table");
        page.push(Block::Table { table });

        let totals = datasets::emissions_by_scope(&records)
            .into_iter()
            .map(|(scope, total)| (scope.label().to_string(), total))
            .collect();
        page.heading("Total Emissions by Scope");
        page.push(Block::Chart {
            chart: Chart {
                title: "Total Emissions Distribution".to_string(),
                kind: ChartKind::Pie { hole: 0.4 },
                x_label: "Emission Scope".to_string(),
                y_label: "Emissions (tons CO₂e)".to_string(),
                series: vec![Series::new("Emissions (tons CO₂e)", totals)],
            },
        });
        page
    }

    fn scenario_modeling(&self, session: &Session) -> Page {
        let mut page = self.page_header(
            "Scenario Modeling",
            "Adjust key parameters to explore how changes impact emissions and costs. \
             Use the sliders below to simulate different scenarios.",
        );

        for widget in Widget::SCENARIO {
            page.metric(widget.label(), format!("{}", session.get(widget)));
        }

        let inputs = session.scenario_inputs();
        let result = scenario::evaluate(&inputs);
        page.heading("Scenario Results");
        page.metric(
            "Estimated emissions reduction",
            format_percent(result.reduction_pct),
        );

        let series = Trajectory::ALL
            .iter()
            .map(|&trajectory| {
                let points = scenario::trajectory_points(&result, trajectory)
                    .into_iter()
                    .map(|p| (p.year.to_string(), p.emissions))
                    .collect();
                let s = Series::new(trajectory.label(), points);
                if trajectory == Trajectory::BusinessAsUsual {
                    s.dashed()
                } else {
                    s
                }
            })
            .collect();
        page.heading("Emissions Trends Over Time");
        page.push(Block::Chart {
            chart: Chart {
                title: "Emissions Trends Over Time (Multiple Scenarios)".to_string(),
                kind: ChartKind::Line { markers: true },
                x_label: "Year".to_string(),
                y_label: "Emissions (tons CO₂e)".to_string(),
                series,
            },
        });
        page
    }

    fn financial_models(&self, session: &Session) -> Page {
        let mut page = self.page_header(
            "Financial Models",
            "Analyze the financial impact of emissions reduction strategies, including costs, \
             carbon taxes, and ROI.",
        );

        // Without scenario sliders in this session the reduction counts as zero
        let reduction_pct = if session.has_scenario() {
            scenario::compute_reduction(&session.scenario_inputs())
        } else {
            0.0
        };
        let inputs = session.financial_inputs();
        let result = financial::evaluate(&inputs, reduction_pct);

        page.heading("Cost Analysis");
        for widget in [Widget::RenewableCost, Widget::WasteCost, Widget::TransportCost] {
            page.metric(widget.label(), format!("{}", session.get(widget)));
        }
        page.metric("Total estimated cost", format_currency(result.total_cost));

        page.heading("ROI Calculation");
        page.metric("Estimated ROI", format_percent(result.roi_pct));
        page.push(Block::Chart {
            chart: Chart {
                title: "ROI Trends Over Time".to_string(),
                kind: ChartKind::Line { markers: true },
                x_label: "Year".to_string(),
                y_label: "ROI (%)".to_string(),
                series: vec![Series::new("ROI (%)", year_points(&result.roi_trend))],
            },
        });

        let breakdown = result
            .cost_breakdown
            .iter()
            .map(|(category, cost)| (category.label().to_string(), *cost))
            .collect();
        page.heading("Cost Breakdown");
        page.push(Block::Chart {
            chart: Chart {
                title: "Cost Distribution".to_string(),
                kind: ChartKind::Pie { hole: 0.4 },
                x_label: "Category".to_string(),
                y_label: "Cost ($)".to_string(),
                series: vec![Series::new("Cost ($)", breakdown)],
            },
        });

        page.heading("Cumulative Savings");
        page.push(Block::Chart {
            chart: Chart {
                title: "Cumulative Savings Over Time".to_string(),
                kind: ChartKind::Bar,
                x_label: "Year".to_string(),
                y_label: "Cumulative Savings ($)".to_string(),
                series: vec![Series::new(
                    "Cumulative Savings ($)",
                    year_points(&result.cumulative_savings),
                )],
            },
        });
        page
    }

    fn compliance_tracker(&self) -> Page {
        let mut page = self.page_header(
            "Compliance Tracker",
            "Track Sheba Hospital's progress in meeting key environmental regulations.",
        );

        for item in datasets::compliance_items() {
            page.heading(item.regulation);
            page.push(Block::Progress {
                percent: item.progress_pct.min(100),
            });
            page.markdown(&format!("**{}% completed**", item.progress_pct));

            let mut table = Table::new(&[
                "Task",
                "Time to Complete",
                "Responsibility",
                "Percentage of Completion",
                "Priority",
            ]);
            for task in &item.tasks {
                table.push(vec![
                    task.name.into(),
                    task.duration.into(),
                    task.owner.into(),
                    task.completion_pct.into(),
                    task.priority.label().into(),
                ]);
            }
            page.push(Block::Table { table });
        }
        page
    }

    fn recommendations(&self) -> Result<Page> {
        let mut page = self.page_header(
            "General Overview and Recommendations",
            "Based on the collected data and analyses, here are the top recommendations \
             prioritized by importance and time sensitivity. Additionally, set your internal \
             goals and explore offset and inset processes to achieve net-zero emissions.",
        );

        let mut goals = Table::new(&["Goal", "Status", "Priority"]);
        for goal in datasets::goals() {
            goals.push(vec![
                goal.text.into(),
                goal.status.into(),
                goal.priority.label().into(),
            ]);
        }
        page.heading("Set Internal Goals");
        page.push(Block::Table { table: goals });

        let mut recs = Table::new(&["Recommendation", "Priority", "Timeframe"]);
        for rec in recommend::rank(&datasets::recommendations())? {
            recs.push(vec![
                rec.text.into(),
                rec.priority.label().into(),
                rec.timeframe.into(),
            ]);
        }
        page.heading("Top Recommendations");
        page.push(Block::Table { table: recs });

        let progress = datasets::goal_progress()
            .into_iter()
            .map(|g| (g.category.to_string(), f64::from(g.progress_pct)))
            .collect();
        page.heading("Progress Towards Goals");
        page.push(Block::Chart {
            chart: Chart {
                title: "Goal Progress".to_string(),
                kind: ChartKind::Bar,
                x_label: "Category".to_string(),
                y_label: "Completion Percentage".to_string(),
                series: vec![Series::new("Progress (%)", progress)],
            },
        });

        page.heading("Dynamic Task Gantt Chart");
        let tasks = datasets::gantt_tasks();
        gantt_section(&mut page, &tasks);

        let mut detail = Table::new(&[
            "Task",
            "Start",
            "Finish",
            "Resource",
            "Completion",
            "Owner",
            "Status",
        ]);
        for task in &tasks {
            detail.push(vec![
                task.name.into(),
                task.start_date.into(),
                task.end_date.into(),
                task.resource_tier.label().into(),
                task.completion_pct.into(),
                task.owner.into(),
                task.status.into(),
            ]);
        }
        page.heading("Detailed Task List");
        page.push(Block::Table { table: detail });
        Ok(page)
    }
}

/// Push the Gantt chart, or an inline error in its place when the tasks
/// cannot be charted
fn gantt_section(page: &mut Page, tasks: &[GanttTask]) {
    match gantt::build("Task Gantt Chart", tasks) {
        Ok(chart) => page.push(Block::Gantt { chart }),
        Err(e) => {
            warn!(error = %e, "gantt chart construction failed");
            page.push(Block::Error {
                message: format!("Failed to create Gantt chart: {}", e),
            });
        }
    }
}

fn year_points(values: &[(i32, f64)]) -> Vec<(String, f64)> {
    values.iter().map(|(year, v)| (year.to_string(), *v)).collect()
}

const LANDING_ABOUT: &str = r#"
### About the Sheba Dashboard
This tool is specifically designed to provide actionable insights into emissions management, compliance tracking,
and sustainability strategies for Sheba Hospital. It enables:

- **Tracking Scope 1, Scope 2, and Scope 3 emissions**
- **Aligning Sheba Hospital with international regulations**
- **Streamlining decision-making for sustainability goals**
- **Improving hospital operations through data-driven insights**

### About Oporto-Carbon
Oporto-Carbon is a leader in lifecycle emissions analysis and regulatory compliance, delivering cutting-edge tools
to streamline sustainability strategies. With experience working with hospitals, industries, and government bodies,
Oporto-Carbon specializes in integrating data from internal and external sources, ensuring real-time regulatory updates
and issue detection. By using advanced analytics and sustainability expertise, the platform provides actionable insights
for decision-making and future planning.

---

Dr. Avi Luvchik is an internationally recognized expert in sustainability and emissions reduction. With over two decades
of experience, he has guided organizations globally to achieve compliance and sustainability excellence. His expertise
in lifecycle analysis, regulatory strategy, and tool development ensures that organizations can seamlessly integrate
sustainability into their operations.
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Cell;

    fn dashboard() -> Dashboard {
        let dir = std::env::temp_dir();
        Dashboard::new(AssetRoot::new(dir).unwrap())
    }

    #[test]
    fn labels_and_slugs_parse() {
        for page in NavPage::ALL {
            assert_eq!(page.label().parse::<NavPage>().unwrap(), page);
            assert_eq!(page.slug().parse::<NavPage>().unwrap(), page);
        }
    }

    #[test]
    fn unknown_navigation_is_rejected() {
        for bad in ["", "landing page", "Emissions Overview", "Settings"] {
            let err = bad.parse::<NavPage>().unwrap_err();
            assert!(matches!(err, DashboardError::UnknownPage(ref s) if s == bad));
        }
        assert!(dashboard().render_named("Settings", &Session::new()).is_err());
    }

    #[test]
    fn scenario_page_reports_default_reduction() {
        let page = dashboard()
            .render(NavPage::ScenarioModeling, &Session::new())
            .unwrap();
        assert_eq!(
            page.metric_value("Estimated emissions reduction"),
            Some("16.00%")
        );
        let chart = page.charts().next().unwrap();
        assert_eq!(chart.series.len(), 3);
        assert!(chart.series[2].dashed);
        assert_eq!(chart.series[0].points[3], ("2024".to_string(), 10340.0));
    }

    #[test]
    fn financial_page_without_scenario_uses_zero_reduction() {
        let page = dashboard()
            .render(NavPage::FinancialModels, &Session::new())
            .unwrap();
        assert_eq!(page.metric_value("Total estimated cost"), Some("$12,000.00"));
        assert_eq!(page.metric_value("Estimated ROI"), Some("-100.00%"));
    }

    #[test]
    fn financial_page_uses_session_scenario() {
        let session = Session::new()
            .with(Widget::RenewableEnergy, 50.0)
            .with(Widget::WasteReduction, 30.0)
            .with(Widget::TransportEfficiency, 20.0);
        let page = dashboard()
            .render(NavPage::FinancialModels, &session)
            .unwrap();
        assert_eq!(page.metric_value("Estimated ROI"), Some("33.33%"));
        let savings = page
            .charts()
            .find(|c| c.title == "Cumulative Savings Over Time")
            .unwrap();
        assert_eq!(savings.series[0].points[4].1, 64000.0);
    }

    #[test]
    fn compliance_page_has_one_table_per_regulation() {
        let page = dashboard()
            .render(NavPage::ComplianceTracker, &Session::new())
            .unwrap();
        assert_eq!(page.tables().count(), 5);
        let progress: Vec<u8> = page
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Progress { percent } => Some(*percent),
                _ => None,
            })
            .collect();
        assert_eq!(progress, vec![70, 80, 50, 90, 60]);
    }

    #[test]
    fn recommendations_page_includes_gantt() {
        let page = dashboard()
            .render(NavPage::Recommendations, &Session::new())
            .unwrap();
        assert!(page.blocks.iter().any(|b| matches!(b, Block::Gantt { .. })));
        assert!(!page.blocks.iter().any(|b| matches!(b, Block::Error { .. })));
        let first = page
            .tables()
            .find(|t| t.columns()[0] == "Recommendation")
            .and_then(|t| t.rows().first())
            .cloned()
            .unwrap();
        assert_eq!(first[0], Cell::from("Optimize transportation routes"));
    }

    #[test]
    fn gantt_failure_is_reported_inline() {
        let mut page = Page::new("Recommendations");
        gantt_section(&mut page, &[]);
        page.heading("Detailed Task List");
        assert_eq!(
            page.blocks[0],
            Block::Error {
                message: "Failed to create Gantt chart: no tasks to chart".to_string()
            }
        );
        assert!(crate::render::to_text(&page).contains("Detailed Task List"));

        let backwards = GanttTask {
            start_date: "2024-06-01",
            end_date: "2024-01-01",
            ..datasets::gantt_tasks()[0].clone()
        };
        let mut page = Page::new("Recommendations");
        gantt_section(&mut page, &[backwards]);
        assert!(matches!(
            &page.blocks[0],
            Block::Error { message } if message.starts_with("Failed to create Gantt chart: ")
        ));
    }

    #[test]
    fn repeated_renders_are_identical() {
        let d = dashboard();
        let session = Session::new().with(Widget::WasteCost, 75.0);
        for page in NavPage::ALL {
            assert_eq!(d.render(page, &session).unwrap(), d.render(page, &session).unwrap());
        }
    }
}
