// examples/portfolio_report.rs

//! Seeds the demo portfolio for a fresh investor and prints every report.
//!
//! Run with `RUST_LOG=agrofund=debug` to see the store and repository events.

use agrofund::analytics::PortfolioBreakdown;
use agrofund::{Agrofund, AgrofundConfig, Role};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let app = Agrofund::in_memory(AgrofundConfig::default())?;
  app.bootstrap().await?;

  let investor = app
    .auth()
    .register("demo@invest.test", "password123", Role::Investor, Some("Demo Investor".into()))
    .await?;
  app.seed_demo(&investor).await?;

  let portfolio = app.portfolio(&investor).await?;
  let metrics = portfolio.metrics();
  println!("--- Metrics ---");
  println!("Invested:        {:>12.2}", metrics.total_invested);
  println!("Current value:   {:>12.2}", metrics.total_portfolio_value);
  println!("Projected gain:  {:>12.2}", metrics.projected_returns);
  println!("Risk score:      {:>12.2}", metrics.risk_score);

  println!("\n--- History ---");
  for holding in portfolio.history() {
    let title = holding.project.as_ref().map_or("(removed project)", |p| p.title.as_str());
    println!(
      "{}  {:<35} {:>9.2} -> {:>9.2}  {:?}",
      holding.investment.created_at.date_naive(),
      title,
      holding.investment.amount,
      holding.current_value,
      holding.status
    );
  }

  let breakdown = portfolio.breakdown();
  for (name, slices) in [
    ("Category", &breakdown.by_category),
    ("Risk", &breakdown.by_risk_level),
    ("Funding stage", &breakdown.by_funding_stage),
  ] {
    println!("\n--- By {} ({:.0}%) ---", name, PortfolioBreakdown::total_percentage(slices));
    for slice in slices {
      println!("{:<16} {:>10.2} {:>5.1}%", slice.label, slice.amount, slice.percentage);
    }
  }

  let performance = portfolio.performance();
  println!("\n--- Monthly ---");
  for month in &performance.monthly_investments {
    println!("{:<9} {:>10.2} ({} investments)", month.month, month.amount, month.count);
  }
  println!("\n--- Top performers ---");
  for top in &performance.top_performing_projects {
    println!("{:<35} {:>6.2}%", top.project.title, top.performance);
  }

  Ok(())
}
