// core/src/analytics/mod.rs

//! Derived, read-only views over projects and investments.
//!
//! Nothing in here touches the store. Callers snapshot the repositories and
//! hand the records in together with the instant to evaluate at.

pub mod breakdown;
pub mod farmer;
pub mod performance;
pub mod platform;
pub mod portfolio;
pub mod valuation;

pub use breakdown::{BreakdownSlice, PortfolioBreakdown};
pub use farmer::{farmer_overview, project_analytics, FarmerOverview, ProjectAnalytics, RecentInvestment};
pub use performance::{GrowthPoint, MonthlyTotal, PerformanceReport, TopPerformer};
pub use platform::{platform_overview, PlatformOverview};
pub use portfolio::{HoldingRecord, PortfolioAnalytics, PortfolioMetrics};
pub use valuation::{FundingStage, HoldingStatus, RiskLevel};
