//! Sheba Hospital Sustainability Dashboard
//!
//! Command-line host for the dashboard pages and the flow diagram.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rusqlite::Connection;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sheba_dashboard::assets::{self, AssetRoot};
use sheba_dashboard::{Dashboard, NavPage, Session, Widget, db, diagram, render};

#[derive(Parser)]
#[command(name = "sheba-dashboard")]
#[command(about = "Sheba Hospital Sustainability Dashboard")]
#[command(version)]
struct Cli {
    /// Output format for rendered pages
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    format: Format,

    /// Directory holding the logo and diagram images (defaults to the executable's directory)
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one dashboard page
    View {
        /// Page label (e.g. "Scenario Modeling") or slug (e.g. scenario-modeling)
        page: String,

        #[command(flatten)]
        widgets: WidgetArgs,
    },

    /// List the navigation pages in menu order
    Pages,

    /// Render the data processing flow diagram to SVG in the current directory
    Diagram,

    /// Write every dataset into a SQLite database
    Export {
        /// Path to the SQLite database
        #[arg(short, long, default_value = "sheba_dashboard.db")]
        database: PathBuf,
    },

    /// Check which dashboard images are available
    Assets {
        /// Directory to inspect (defaults to --assets)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

/// Widget values; anything omitted keeps its default
#[derive(clap::Args)]
struct WidgetArgs {
    /// Increase renewable energy (%) [default: 50]
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    renewable: Option<u8>,

    /// Reduce waste (%) [default: 30]
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    waste: Option<u8>,

    /// Improve transport efficiency (%) [default: 20]
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    transport: Option<u8>,

    /// Cost of switching to renewables ($/MWh) [default: 100]
    #[arg(long, value_parser = clap::value_parser!(u16).range(50..=200))]
    renewable_cost: Option<u16>,

    /// Cost of waste reduction ($/ton) [default: 50]
    #[arg(long, value_parser = clap::value_parser!(u16).range(10..=100))]
    waste_cost: Option<u16>,

    /// Cost of transport upgrades ($/vehicle) [default: 2000]
    #[arg(long, value_parser = clap::value_parser!(u16).range(500..=5000))]
    transport_cost: Option<u16>,
}

impl WidgetArgs {
    fn into_session(self) -> Session {
        let values = [
            (Widget::RenewableEnergy, self.renewable.map(f64::from)),
            (Widget::WasteReduction, self.waste.map(f64::from)),
            (Widget::TransportEfficiency, self.transport.map(f64::from)),
            (Widget::RenewableCost, self.renewable_cost.map(f64::from)),
            (Widget::WasteCost, self.waste_cost.map(f64::from)),
            (Widget::TransportCost, self.transport_cost.map(f64::from)),
        ];

        let mut session = Session::new();
        for (widget, value) in values {
            if let Some(value) = value {
                session.set(widget, value);
            }
        }
        session
    }
}

fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn asset_root(dir: Option<PathBuf>) -> Result<AssetRoot> {
    let root = match dir {
        Some(dir) => AssetRoot::new(dir)?,
        None => AssetRoot::beside_executable()?,
    };
    debug!(assets = %root.dir().display(), "asset root");
    Ok(root)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::View { page, widgets } => {
            let nav: NavPage = page.parse()?;
            let dashboard = Dashboard::new(asset_root(cli.assets)?);
            let session = widgets.into_session();
            let rendered = dashboard.render(nav, &session)?;

            match cli.format {
                Format::Text => print!("{}", render::to_text(&rendered)),
                Format::Json => println!("{}", render::to_json(&rendered)?),
            }
        }

        Commands::Pages => {
            for nav in NavPage::ALL {
                println!("{:<20} {}", nav.slug(), nav.label());
            }
        }

        Commands::Diagram => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            let output = diagram::render_default(&cwd)?;
            println!("Diagram written to: {}", output.display());
        }

        Commands::Export { database } => {
            let mut conn = Connection::open(&database)
                .with_context(|| format!("Failed to open {}", database.display()))?;
            let stats = db::export_datasets(&mut conn)?;
            println!("{}", stats);
            println!("Database written to: {}", database.display());
        }

        Commands::Assets { dir } => {
            let root = asset_root(dir.or(cli.assets))?;
            println!("Asset root: {}", root.dir().display());

            let found = root.discover();
            if found.is_empty() {
                println!("No images found.");
            } else {
                println!("Images:");
                for path in found {
                    let shown = path.strip_prefix(root.dir()).unwrap_or(&path);
                    println!("  {}", shown.display());
                }
            }

            let missing = root.missing();
            if !missing.is_empty() {
                println!("Missing required images:");
                for name in &missing {
                    println!("  {}", name);
                }
                anyhow::bail!(
                    "{} of {} required images missing",
                    missing.len(),
                    assets::REQUIRED.len()
                );
            }
        }
    }

    Ok(())
}
