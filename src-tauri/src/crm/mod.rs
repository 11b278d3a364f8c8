//! Typed CRM records loaded from the workbook, plus the join, filter and
//! aggregate operations the views are built from.

pub mod types;
pub mod loader;
pub mod join;
pub mod filter;
pub mod stats;

pub use types::*;
pub use loader::load_workbook;
pub use join::join_people_with_companies;
pub use filter::{filter_companies, filter_contacts, filter_options, filter_people, Selection};
pub use stats::{dashboard_stats, DashboardStats, IndustryRevenue, ValueCount};
