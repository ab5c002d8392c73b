//! Sheba Hospital sustainability dashboard
//!
//! Static emissions, compliance and planning datasets, the scenario and
//! financial calculators, and the page router that assembles them into
//! renderable dashboard pages.

pub mod assets;
pub mod datasets;
pub mod db;
pub mod diagram;
pub mod error;
pub mod financial;
pub mod gantt;
pub mod models;
pub mod page;
pub mod recommend;
pub mod render;
pub mod scenario;
pub mod session;
pub mod views;

pub use error::{DashboardError, Result};
pub use page::Page;
pub use session::{Session, Widget};
pub use views::{Dashboard, NavPage};
