//! Data processing flow diagram
//!
//! Describes how source systems feed the processing layer and which reports
//! come out of it. The graph is written as Graphviz DOT and rendered to SVG
//! by the `dot` executable.

use std::collections::HashSet;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use crate::assets::FLOW_DIAGRAM;
use crate::error::{DashboardError, Result};

/// Output written by `render_default`, the image the landing page shows
pub const OUTPUT_FILE: &str = FLOW_DIAGRAM;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    Dashed,
    Solid,
}

impl Border {
    fn as_str(self) -> &'static str {
        match self {
            Border::Dashed => "dashed",
            Border::Solid => "solid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub id: &'static str,
    pub label: &'static str,
    pub border: Border,
    pub fill: &'static str,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    pub clusters: Vec<Cluster>,
    pub edges: Vec<(&'static str, &'static str)>,
}

const fn node(id: &'static str, label: &'static str) -> Node {
    Node { id, label }
}

const INTEGRATION: &str = "integration";
const MODEL_CORE: &str = "model_core";
const ANALYTICS: &str = "analytics";

/// The fixed data flow: every source feeds integration, integration feeds the
/// model core, the core feeds analytics, analytics feeds every output
pub fn data_flow_graph() -> Graph {
    let sources = vec![
        Cluster {
            id: "cluster_internal_sources",
            label: "Internal Data Sources",
            border: Border::Dashed,
            fill: "#AEC6CF",
            nodes: vec![
                node("finance", "Finance System"),
                node("invoice", "Invoice Management System"),
                node("energy", "Energy Consumption Logs"),
                node("transport", "Transportation Data"),
                node("waste", "Waste Management Reports"),
                node("procurement", "Procurement System"),
                node("hr", "HR Systems (employee commuting data)"),
            ],
        },
        Cluster {
            id: "cluster_external_sources",
            label: "External Data Sources",
            border: Border::Dashed,
            fill: "#B4D7A8",
            nodes: vec![
                node("un_databases", "International Databases (UNFCCC, IPCC)"),
                node("openlca", "OpenLCA Libraries"),
                node("industry", "Industry Benchmarks"),
                node("regulatory", "Regulatory Bodies (EU, National Agencies)"),
            ],
        },
        Cluster {
            id: "cluster_online_connectivity",
            label: "Online Connectivity",
            border: Border::Dashed,
            fill: "#F4C2C2",
            nodes: vec![
                node("compliance", "Real-time Compliance Services"),
                node("external_apis", "External APIs for Carbon Pricing & Benchmarks"),
                node("live_updates", "Live Updates on Regulatory Frameworks"),
            ],
        },
    ];

    let processing = Cluster {
        id: "cluster_processing",
        label: "Processing Layer",
        border: Border::Solid,
        fill: "white",
        nodes: vec![
            node(INTEGRATION, "Data Integration"),
            node(MODEL_CORE, "Model Core"),
            node(ANALYTICS, "Advanced Analytics"),
        ],
    };

    let outputs = Cluster {
        id: "cluster_outputs",
        label: "Outputs",
        border: Border::Solid,
        fill: "#FED8B1",
        nodes: vec![
            node("ghg_reports", "GHG Emissions by Scope"),
            node("compliance_status", "Regulation Compliance Status"),
            node("roi_analysis", "ROI Analysis & Trends"),
            node("recommendations", "Recommendations for Sustainability Goals"),
            node("forecasting", "Future Emissions Projections"),
            node("benchmarking", "Benchmarking Insights"),
        ],
    };

    let mut edges = Vec::new();
    for cluster in &sources {
        for n in &cluster.nodes {
            edges.push((n.id, INTEGRATION));
        }
    }
    edges.push((INTEGRATION, MODEL_CORE));
    edges.push((MODEL_CORE, ANALYTICS));
    for n in &outputs.nodes {
        edges.push((ANALYTICS, n.id));
    }

    let mut clusters = sources;
    clusters.push(processing);
    clusters.push(outputs);
    Graph { clusters, edges }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.clusters.iter().map(|c| c.nodes.len()).sum()
    }

    /// Every edge endpoint must be a declared node
    pub fn validate(&self) -> Result<()> {
        let ids: HashSet<&str> = self
            .clusters
            .iter()
            .flat_map(|c| c.nodes.iter().map(|n| n.id))
            .collect();
        for (from, to) in &self.edges {
            for end in [from, to] {
                if !ids.contains(end) {
                    return Err(DashboardError::UnknownNode(end.to_string()));
                }
            }
        }
        Ok(())
    }

    pub fn to_dot(&self) -> String {
        let mut dot = String::new();
        // Writing to a String cannot fail
        let _ = self.write_dot(&mut dot);
        dot
    }

    fn write_dot(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "digraph G {{")?;
        writeln!(out, "    rankdir=TB;")?;
        writeln!(
            out,
            "    graph [bgcolor=\"#343541\", size=\"8,6\", ratio=\"compress\"];"
        )?;
        writeln!(
            out,
            "    node [style=\"filled,rounded\", shape=\"rectangle\", gradientangle=270, color=\"grey\", \
             fillcolor=\"white:lightgrey\", fontname=\"Helvetica\", fontcolor=\"#343541\"];"
        )?;
        writeln!(
            out,
            "    edge [color=\"#AAAAAA\", fontname=\"Helvetica\", fontsize=12, fontcolor=\"#EEEEEE\", arrowsize=1];"
        )?;

        for cluster in &self.clusters {
            writeln!(out)?;
            writeln!(out, "    subgraph {} {{", cluster.id)?;
            writeln!(out, "        label = \"{}\";", escape(cluster.label))?;
            writeln!(out, "        style = \"{}\";", cluster.border.as_str())?;
            writeln!(out, "        node [fillcolor=\"{}\"];", cluster.fill)?;
            for n in &cluster.nodes {
                writeln!(out, "        {} [label=\"{}\"];", n.id, escape(n.label))?;
            }
            writeln!(out, "    }}")?;
        }

        writeln!(out)?;
        for (from, to) in &self.edges {
            writeln!(out, "    {} -> {};", from, to)?;
        }
        writeln!(out, "}}")
    }
}

/// Render DOT source to an SVG file with the Graphviz `dot` executable
pub fn render_svg(dot: &str, output: &Path) -> Result<()> {
    render_with("dot", dot, output)
}

fn render_with(program: &str, dot: &str, output: &Path) -> Result<()> {
    let mut child = Command::new(program)
        .arg("-Tsvg")
        .arg("-o")
        .arg(output)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| DashboardError::Graphviz(format!("cannot start: {}", e)))?;

    // stdin is dropped after writing so the child sees EOF
    let written = child
        .stdin
        .take()
        .map_or(Ok(()), |mut stdin| stdin.write_all(dot.as_bytes()));

    let result = child.wait_with_output()?;
    let stderr = String::from_utf8_lossy(&result.stderr);
    if let Err(e) = written {
        return Err(DashboardError::Graphviz(format!(
            "writing input: {}: {}",
            e,
            stderr.trim()
        )));
    }
    if !result.status.success() {
        return Err(DashboardError::Graphviz(format!(
            "{}: {}",
            result.status,
            stderr.trim()
        )));
    }

    info!(output = %output.display(), "rendered flow diagram");
    Ok(())
}

/// Build the fixed data flow graph and write it to `OUTPUT_FILE` in `dir`
pub fn render_default(dir: &Path) -> Result<std::path::PathBuf> {
    let graph = data_flow_graph();
    graph.validate()?;
    let output = dir.join(OUTPUT_FILE);
    render_svg(&graph.to_dot(), &output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graph_shape() {
        let graph = data_flow_graph();
        assert_eq!(graph.clusters.len(), 5);
        assert_eq!(graph.node_count(), 23);
        // 14 sources in, 2 through the processing layer, 6 outputs
        assert_eq!(graph.edges.len(), 22);
        graph.validate().unwrap();
    }

    #[test]
    fn every_source_feeds_integration() {
        let graph = data_flow_graph();
        for cluster in &graph.clusters[..3] {
            for n in &cluster.nodes {
                assert!(graph.edges.contains(&(n.id, INTEGRATION)), "{}", n.id);
            }
        }
        let fan_out = graph.edges.iter().filter(|(from, _)| *from == ANALYTICS).count();
        assert_eq!(fan_out, 6);
    }

    #[test]
    fn dot_output_is_stable() {
        let dot = data_flow_graph().to_dot();
        assert!(dot.starts_with("digraph G {\n    rankdir=TB;"));
        assert!(dot.contains(
            "    subgraph cluster_outputs {\n        label = \"Outputs\";\n        style = \"solid\";"
        ));
        assert!(dot.contains("        hr [label=\"HR Systems (employee commuting data)\"];"));
        assert!(dot.contains("    model_core -> analytics;\n"));
        assert!(dot.trim_end().ends_with('}'));
        assert_eq!(dot, data_flow_graph().to_dot());
    }

    #[test]
    fn dangling_edge_is_rejected() {
        let mut graph = data_flow_graph();
        graph.edges.push((ANALYTICS, "nowhere"));
        let err = graph.validate().unwrap_err();
        assert_eq!(err.to_string(), "edge references unknown node 'nowhere'");
    }

    #[test]
    fn labels_are_escaped() {
        assert_eq!(escape(r#"a "b" \c"#), r#"a \"b\" \\c"#);
    }

    #[cfg(unix)]
    #[test]
    fn renderer_that_stops_reading_is_reported() {
        let output = std::env::temp_dir().join("unused.svg");
        let input = "x".repeat(1 << 20);
        let err = render_with("true", &input, &output).unwrap_err();
        assert!(matches!(err, DashboardError::Graphviz(ref m) if m.starts_with("writing input")));
    }

    #[cfg(unix)]
    #[test]
    fn renderer_failure_status_is_reported() {
        let output = std::env::temp_dir().join("unused.svg");
        let err = render_with("false", "digraph G {}", &output).unwrap_err();
        assert!(err.to_string().starts_with("graphviz 'dot' failed: exit status: 1"));
    }
}
