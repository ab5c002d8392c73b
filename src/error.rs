use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("unknown page '{0}'")]
    UnknownPage(String),

    #[error("no tasks to chart")]
    EmptyGantt,

    #[error("task '{task}' has invalid {field} date '{value}'")]
    InvalidDate {
        task: String,
        field: &'static str,
        value: String,
    },

    #[error("task '{task}' finishes ({finish}) before it starts ({start})")]
    FinishBeforeStart {
        task: String,
        start: String,
        finish: String,
    },

    #[error("edge references unknown node '{0}'")]
    UnknownNode(String),

    #[error("graphviz 'dot' failed: {0}")]
    Graphviz(String),

    #[error("asset root {} is not a directory", .0.display())]
    AssetRoot(PathBuf),

    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
