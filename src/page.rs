//! Renderer-independent description of a dashboard page

use serde::Serialize;

use crate::gantt::GanttChart;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cell {
    Text(String),
    Integer(i64),
    Number(f64),
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Number(v)
    }
}

impl From<i64> for Cell {
    fn from(v: i64) -> Self {
        Cell::Integer(v)
    }
}

impl From<u8> for Cell {
    fn from(v: u8) -> Self {
        Cell::Integer(i64::from(v))
    }
}

/// Rows always have exactly one cell per column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Short rows are padded with empty text; extra cells are dropped
    pub fn push(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Text(String::new()));
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartKind {
    Pie { hole: f64 },
    Line { markers: bool },
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    /// (x label, y value)
    pub points: Vec<(String, f64)>,
    pub dashed: bool,
}

impl Series {
    pub fn new(name: &str, points: Vec<(String, f64)>) -> Self {
        Self {
            name: name.to_string(),
            points,
            dashed: false,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    Heading { text: String },
    Markdown { text: String },
    Image { path: String, width: Option<u32> },
    Metric { label: String, value: String },
    Progress { percent: u8 },
    Table { table: Table },
    Chart { chart: Chart },
    Gantt { chart: GanttChart },
    Button { label: String },
    Error { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl Page {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            blocks: Vec::new(),
        }
    }

    pub fn heading(&mut self, text: &str) {
        self.blocks.push(Block::Heading {
            text: text.to_string(),
        });
    }

    pub fn markdown(&mut self, text: &str) {
        self.blocks.push(Block::Markdown {
            text: text.trim().to_string(),
        });
    }

    pub fn image(&mut self, path: &str, width: Option<u32>) {
        self.blocks.push(Block::Image {
            path: path.to_string(),
            width,
        });
    }

    pub fn metric(&mut self, label: &str, value: String) {
        self.blocks.push(Block::Metric {
            label: label.to_string(),
            value,
        });
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table { table } => Some(table),
            _ => None,
        })
    }

    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Chart { chart } => Some(chart),
            _ => None,
        })
    }

    pub fn metric_value(&self, label: &str) -> Option<&str> {
        self.blocks.iter().find_map(|b| match b {
            Block::Metric { label: l, value } if l == label => Some(value.as_str()),
            _ => None,
        })
    }
}
