//! Text and JSON renderers for dashboard pages

use std::fmt::{self, Write as _};

use crate::gantt::GanttChart;
use crate::page::{Block, Cell, Chart, ChartKind, Page, Table};

const BAR_WIDTH: usize = 40;

/// `$12,345.68`
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{}${}.{}", sign, group_thousands(whole), cents)
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        let s = format!("{:.4}", value);
        let trimmed = s.trim_end_matches('0');
        if trimmed.ends_with('.') {
            format!("{}0", trimmed)
        } else {
            trimmed.to_string()
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Integer(v) => write!(f, "{}", v),
            Cell::Number(v) => f.write_str(&format_number(*v)),
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<Vec<String>> = self
            .rows()
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();

        let mut widths: Vec<usize> = self.columns().iter().map(|c| c.chars().count()).collect();
        for row in &rendered {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let header: Vec<String> = self
            .columns()
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<w$}", c, w = *w))
            .collect();
        writeln!(f, "{}", header.join("  ").trim_end())?;
        let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(f, "{}", "-".repeat(total))?;

        for (row, cells) in rendered.iter().zip(self.rows()) {
            let line: Vec<String> = row
                .iter()
                .zip(cells)
                .zip(&widths)
                .map(|((text, cell), w)| match cell {
                    Cell::Text(_) => format!("{:<w$}", text, w = *w),
                    _ => format!("{:>w$}", text, w = *w),
                })
                .collect();
            writeln!(f, "{}", line.join("  ").trim_end())?;
        }
        Ok(())
    }
}

fn ascii_bar(value: f64, max: f64) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.min(BAR_WIDTH))
}

impl fmt::Display for Chart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.title)?;
        match self.kind {
            ChartKind::Pie { .. } => {
                for series in &self.series {
                    let total: f64 = series.points.iter().map(|(_, v)| v).sum();
                    for (label, value) in &series.points {
                        let share = if total == 0.0 { 0.0 } else { value / total * 100.0 };
                        writeln!(
                            f,
                            "  {:<24} {:>14} {:>8}",
                            label,
                            format_number(*value),
                            format_percent(share)
                        )?;
                    }
                }
            }
            ChartKind::Line { .. } => {
                writeln!(f, "  {} vs {}", self.y_label, self.x_label)?;
                for series in &self.series {
                    let style = if series.dashed { " (dashed)" } else { "" };
                    writeln!(f, "  {}{}", series.name, style)?;
                    for (x, y) in &series.points {
                        writeln!(f, "    {:<8} {:>12.2}", x, y)?;
                    }
                }
            }
            ChartKind::Bar => {
                let max = self
                    .series
                    .iter()
                    .flat_map(|s| s.points.iter().map(|(_, v)| *v))
                    .fold(0.0_f64, f64::max);
                for series in &self.series {
                    for (x, y) in &series.points {
                        writeln!(f, "  {:<28} {:>12.2} {}", x, y, ascii_bar(*y, max))?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for GanttChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}]", self.title)?;
        let (Some(first), Some(last)) = (self.first_day(), self.last_day()) else {
            return Ok(());
        };
        let span = (last - first).num_days().max(1) as f64;
        for bar in &self.bars {
            let scale = |days: i64| (days as f64 / span * BAR_WIDTH as f64).round() as usize;
            let offset = scale((bar.start - first).num_days());
            let len = scale(bar.duration_days()).max(1);
            writeln!(
                f,
                "  {:<26} {}{} {} .. {} ({})",
                bar.name,
                " ".repeat(offset.min(BAR_WIDTH)),
                "=".repeat(len.min(BAR_WIDTH)),
                bar.start,
                bar.finish,
                bar.resource_tier
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Heading { text } => {
                writeln!(f, "## {}", text)
            }
            Block::Markdown { text } => {
                for line in text.lines() {
                    writeln!(f, "{}", line.trim())?;
                }
                Ok(())
            }
            Block::Image { path, width } => match width {
                Some(w) => writeln!(f, "[image: {} @ {}px]", path, w),
                None => writeln!(f, "[image: {}]", path),
            },
            Block::Metric { label, value } => writeln!(f, "{}: {}", label, value),
            Block::Progress { percent } => {
                let percent = (*percent).min(100);
                let filled = usize::from(percent) * BAR_WIDTH / 100;
                writeln!(
                    f,
                    "[{}{}] {}%",
                    "#".repeat(filled),
                    ".".repeat(BAR_WIDTH - filled),
                    percent
                )
            }
            Block::Table { table } => write!(f, "{}", table),
            Block::Chart { chart } => write!(f, "{}", chart),
            Block::Gantt { chart } => write!(f, "{}", chart),
            Block::Button { label } => writeln!(f, "< {} >", label),
            Block::Error { message } => writeln!(f, "ERROR: {}", message),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        for block in &self.blocks {
            writeln!(f)?;
            write!(f, "{}", block)?;
        }
        Ok(())
    }
}

pub fn to_text(page: &Page) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write!(out, "{}", page);
    out
}

pub fn to_json(page: &Page) -> serde_json::Result<String> {
    serde_json::to_string_pretty(page)
}
