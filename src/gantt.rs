//! Gantt chart construction for the task timeline

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::{GanttBar, GanttTask, Priority};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GanttChart {
    pub title: String,
    pub bars: Vec<GanttBar>,
    /// Colour groups in order of first appearance; `GanttBar::color_index` points here
    pub legend: Vec<Priority>,
}

impl GanttChart {
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.bars.iter().map(|b| b.start).min()
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.bars.iter().map(|b| b.finish).max()
    }
}

fn parse_date(task: &GanttTask, field: &'static str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DashboardError::InvalidDate {
        task: task.name.to_string(),
        field,
        value: value.to_string(),
    })
}

/// Build a Gantt chart with one colour per resource tier
pub fn build(title: &str, tasks: &[GanttTask]) -> Result<GanttChart> {
    if tasks.is_empty() {
        return Err(DashboardError::EmptyGantt);
    }

    let mut legend: Vec<Priority> = Vec::new();
    let mut bars = Vec::with_capacity(tasks.len());

    for task in tasks {
        let start = parse_date(task, "start", task.start_date)?;
        let finish = parse_date(task, "finish", task.end_date)?;
        if finish < start {
            return Err(DashboardError::FinishBeforeStart {
                task: task.name.to_string(),
                start: task.start_date.to_string(),
                finish: task.end_date.to_string(),
            });
        }

        let color_index = match legend.iter().position(|p| *p == task.resource_tier) {
            Some(idx) => idx,
            None => {
                legend.push(task.resource_tier);
                legend.len() - 1
            }
        };

        bars.push(GanttBar {
            name: task.name.to_string(),
            start,
            finish,
            resource_tier: task.resource_tier,
            color_index,
        });
    }

    Ok(GanttChart {
        title: title.to_string(),
        bars,
        legend,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;

    #[test]
    fn sample_tasks_chart_cleanly() {
        let chart = build("Task Gantt Chart", &datasets::gantt_tasks()).unwrap();
        assert_eq!(chart.bars.len(), 3);
        assert_eq!(
            chart.legend,
            vec![Priority::High, Priority::Medium, Priority::Low]
        );
        assert_eq!(chart.bars[0].duration_days(), 14);
        assert_eq!(chart.first_day(), NaiveDate::from_ymd_opt(2023, 12, 1));
        assert_eq!(chart.last_day(), NaiveDate::from_ymd_opt(2024, 1, 10));
    }

    #[test]
    fn shared_tiers_share_a_colour() {
        let mut tasks = datasets::gantt_tasks();
        tasks[2].resource_tier = Priority::High;
        let chart = build("t", &tasks).unwrap();
        assert_eq!(chart.legend.len(), 2);
        assert_eq!(chart.bars[2].color_index, chart.bars[0].color_index);
    }

    #[test]
    fn empty_task_list_is_rejected() {
        assert!(matches!(build("t", &[]), Err(DashboardError::EmptyGantt)));
    }

    #[test]
    fn malformed_date_names_the_task() {
        let mut tasks = datasets::gantt_tasks();
        tasks[1].end_date = "2023-13-45";
        let err = build("t", &tasks).unwrap_err();
        assert_eq!(
            err.to_string(),
            "task 'Conduct audit' has invalid finish date '2023-13-45'"
        );
    }

    #[test]
    fn finish_before_start_is_rejected() {
        let mut tasks = datasets::gantt_tasks();
        tasks[0].end_date = "2023-11-01";
        assert!(matches!(
            build("t", &tasks),
            Err(DashboardError::FinishBeforeStart { .. })
        ));
    }
}
