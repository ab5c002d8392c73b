//! SQLite snapshot of the dashboard datasets

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::info;

use crate::datasets;
use crate::models::{ComplianceItem, EmissionRecord, GanttTask, GoalItem, RecommendationItem};

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS emissions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            scope TEXT NOT NULL,
            parameter TEXT NOT NULL,
            type TEXT NOT NULL,
            value REAL NOT NULL,
            unit TEXT NOT NULL,
            emission_factor REAL NOT NULL,
            emissions_tons_co2e REAL NOT NULL,
            source TEXT NOT NULL,
            global_average REAL NOT NULL,
            comparison_pct REAL NOT NULL
        );

        CREATE TABLE IF NOT EXISTS regulations (
            name TEXT PRIMARY KEY,
            progress_pct INTEGER NOT NULL
        );

        -- Checklist items under each regulation
        CREATE TABLE IF NOT EXISTS compliance_tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            regulation TEXT NOT NULL REFERENCES regulations(name),
            name TEXT NOT NULL,
            duration TEXT NOT NULL,
            owner TEXT NOT NULL,
            completion_pct INTEGER NOT NULL,
            priority TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS goals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            goal TEXT NOT NULL,
            status TEXT NOT NULL,
            priority TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS recommendations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            recommendation TEXT NOT NULL,
            priority TEXT NOT NULL,
            timeframe TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS gantt_tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            task TEXT NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            resource TEXT NOT NULL,
            completion_pct INTEGER NOT NULL,
            owner TEXT NOT NULL,
            status TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_emissions_scope ON emissions(scope);
        CREATE INDEX IF NOT EXISTS idx_compliance_tasks_regulation ON compliance_tasks(regulation);
        "#,
    )?;
    Ok(())
}

/// Remove all rows so an export always reflects exactly one snapshot
pub fn clear_datasets(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        DELETE FROM gantt_tasks;
        DELETE FROM recommendations;
        DELETE FROM goals;
        DELETE FROM compliance_tasks;
        DELETE FROM regulations;
        DELETE FROM emissions;
        "#,
    )?;
    Ok(())
}

pub fn insert_emission(conn: &Connection, r: &EmissionRecord) -> Result<()> {
    conn.execute(
        "INSERT INTO emissions (scope, parameter, type, value, unit, emission_factor,
                                emissions_tons_co2e, source, global_average, comparison_pct)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        (
            r.scope.label(),
            r.parameter,
            r.kind,
            r.value,
            r.unit,
            r.emission_factor,
            r.emissions_tons_co2e,
            r.source.label(),
            r.global_average,
            r.comparison_pct,
        ),
    )?;
    Ok(())
}

/// Insert a regulation together with its tasks
pub fn insert_compliance_item(conn: &Connection, item: &ComplianceItem) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO regulations (name, progress_pct) VALUES (?1, ?2)",
        (item.regulation, item.progress_pct),
    )?;
    for task in &item.tasks {
        conn.execute(
            "INSERT INTO compliance_tasks (regulation, name, duration, owner, completion_pct, priority)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                item.regulation,
                task.name,
                task.duration,
                task.owner,
                task.completion_pct,
                task.priority.label(),
            ),
        )?;
    }
    Ok(())
}

pub fn insert_goal(conn: &Connection, goal: &GoalItem) -> Result<()> {
    conn.execute(
        "INSERT INTO goals (goal, status, priority) VALUES (?1, ?2, ?3)",
        (goal.text, goal.status, goal.priority.label()),
    )?;
    Ok(())
}

pub fn insert_recommendation(conn: &Connection, rec: &RecommendationItem) -> Result<()> {
    conn.execute(
        "INSERT INTO recommendations (recommendation, priority, timeframe) VALUES (?1, ?2, ?3)",
        (rec.text, rec.priority.label(), rec.timeframe),
    )?;
    Ok(())
}

pub fn insert_gantt_task(conn: &Connection, task: &GanttTask) -> Result<()> {
    conn.execute(
        "INSERT INTO gantt_tasks (task, start_date, end_date, resource, completion_pct, owner, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        (
            task.name,
            task.start_date,
            task.end_date,
            task.resource_tier.label(),
            task.completion_pct,
            task.owner,
            task.status,
        ),
    )?;
    Ok(())
}

/// Replace the database contents with the current datasets
pub fn export_datasets(conn: &mut Connection) -> Result<ExportStats> {
    let tx = conn.transaction()?;
    init_schema(&tx)?;
    clear_datasets(&tx)?;

    let mut stats = ExportStats::default();

    for record in datasets::emissions() {
        insert_emission(&tx, &record)
            .with_context(|| format!("Failed to export emission '{}'", record.kind))?;
        stats.emissions += 1;
    }
    for item in datasets::compliance_items() {
        insert_compliance_item(&tx, &item)
            .with_context(|| format!("Failed to export regulation '{}'", item.regulation))?;
        stats.regulations += 1;
        stats.compliance_tasks += item.tasks.len();
    }
    for goal in datasets::goals() {
        insert_goal(&tx, &goal)?;
        stats.goals += 1;
    }
    for rec in datasets::recommendations() {
        insert_recommendation(&tx, &rec)?;
        stats.recommendations += 1;
    }
    for task in datasets::gantt_tasks() {
        insert_gantt_task(&tx, &task)?;
        stats.gantt_tasks += 1;
    }

    tx.commit()?;
    info!(%stats, "exported datasets");
    Ok(stats)
}

/// Total emissions per scope, as stored
pub fn scope_totals(conn: &Connection) -> Result<Vec<(String, f64)>> {
    let mut stmt = conn.prepare(
        "SELECT scope, SUM(emissions_tons_co2e) FROM emissions GROUP BY scope ORDER BY scope",
    )?;

    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// Tasks for one regulation in insertion order: (name, completion_pct)
pub fn regulation_tasks(conn: &Connection, regulation: &str) -> Result<Vec<(String, u8)>> {
    let mut stmt = conn.prepare(
        "SELECT name, completion_pct FROM compliance_tasks WHERE regulation = ?1 ORDER BY id",
    )?;

    let rows = stmt.query_map([regulation], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<usize> {
    const TABLES: [&str; 6] = [
        "emissions",
        "regulations",
        "compliance_tasks",
        "goals",
        "recommendations",
        "gantt_tasks",
    ];
    anyhow::ensure!(TABLES.contains(&table), "unknown table '{}'", table);

    let count: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })?;
    Ok(count as usize)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub emissions: usize,
    pub regulations: usize,
    pub compliance_tasks: usize,
    pub goals: usize,
    pub recommendations: usize,
    pub gantt_tasks: usize,
}

impl std::fmt::Display for ExportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Exported {} emission records, {} regulations ({} tasks), {} goals, {} recommendations, {} gantt tasks",
            self.emissions,
            self.regulations,
            self.compliance_tasks,
            self.goals,
            self.recommendations,
            self.gantt_tasks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_into_memory_database() {
        let mut conn = Connection::open_in_memory().unwrap();
        let stats = export_datasets(&mut conn).unwrap();
        assert_eq!(
            stats,
            ExportStats {
                emissions: 25,
                regulations: 5,
                compliance_tasks: 15,
                goals: 3,
                recommendations: 4,
                gantt_tasks: 3,
            }
        );
        assert_eq!(count_rows(&conn, "compliance_tasks").unwrap(), 15);
    }

    #[test]
    fn export_replaces_previous_snapshot() {
        let mut conn = Connection::open_in_memory().unwrap();
        export_datasets(&mut conn).unwrap();
        export_datasets(&mut conn).unwrap();
        assert_eq!(count_rows(&conn, "emissions").unwrap(), 25);
        assert_eq!(count_rows(&conn, "gantt_tasks").unwrap(), 3);
    }

    #[test]
    fn scope_totals_match_in_memory_aggregation() {
        let mut conn = Connection::open_in_memory().unwrap();
        export_datasets(&mut conn).unwrap();
        let totals = scope_totals(&conn).unwrap();
        let expected = datasets::emissions_by_scope(&datasets::emissions());
        assert_eq!(totals.len(), 3);
        for ((label, total), (scope, want)) in totals.iter().zip(expected) {
            assert_eq!(label, scope.label());
            assert!((total - want).abs() < 1e-6);
        }
    }

    #[test]
    fn count_rows_rejects_unknown_tables() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        assert!(count_rows(&conn, "sqlite_master; DROP TABLE goals").is_err());
    }
}
