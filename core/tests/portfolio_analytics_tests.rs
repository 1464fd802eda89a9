// tests/portfolio_analytics_tests.rs
mod common;

use agrofund::analytics::{HoldingStatus, PortfolioAnalytics, PortfolioBreakdown};
use agrofund::Role;
use chrono::Duration;
use common::*;

#[tokio::test]
async fn test_empty_portfolio_reports_zeroes() {
  let h = harness();
  let investor = h.register("emma@invest.test", Role::Investor).await;
  let portfolio = h.app.portfolio(&investor).await.unwrap();

  let metrics = portfolio.metrics();
  assert_eq!(metrics.total_invested, 0.0);
  assert_eq!(metrics.total_active_projects, 0);
  assert_eq!(metrics.average_investment_size, 0.0);
  assert_eq!(metrics.total_portfolio_value, 0.0);
  assert_eq!(metrics.projected_returns, 0.0);
  assert_eq!(metrics.risk_score, 0.0);
  assert!(metrics.total_invested.is_sign_positive());
  assert!(metrics.average_investment_size.is_sign_positive());
  assert!(metrics.total_portfolio_value.is_sign_positive());
  assert!(metrics.projected_returns.is_sign_positive());
  let json = serde_json::to_string(&metrics).unwrap();
  assert!(!json.contains("-0.0"), "negative zero in {}", json);
  assert!(json.contains("\"totalInvested\":0.0"));
  assert!(portfolio.history().is_empty());

  let breakdown = portfolio.breakdown();
  assert!(breakdown.by_category.is_empty());
  let performance = portfolio.performance();
  assert!(performance.monthly_investments.is_empty());
  assert!(performance.portfolio_growth.is_empty());
}

#[test]
fn test_reference_holding_is_valued_with_simulated_growth() {
  let projects = vec![project_record("p1", 50_000.0, 35_000.0, 120, "Organic")];
  let investments = vec![investment_record("i1", "p1", "v1", 5_000.0, 120)];
  let portfolio = PortfolioAnalytics::new("v1", investments, projects, t0());

  let metrics = portfolio.metrics();
  assert_close(metrics.total_invested, 5_000.0);
  assert!((metrics.total_portfolio_value - 5_656.507).abs() < 0.001);
  assert!((metrics.projected_returns - 656.507).abs() < 0.001);
  assert_close(metrics.risk_score, 0.3);
  assert_eq!(metrics.total_active_projects, 1);

  let history = portfolio.history();
  assert_eq!(history.len(), 1);
  assert_eq!(history[0].status, HoldingStatus::Active);
  assert_eq!(history[0].time_in_market, 120);
  assert_close(history[0].current_value, metrics.total_portfolio_value);
}

#[test]
fn test_other_investors_are_excluded() {
  let projects = vec![project_record("p1", 10_000.0, 5_000.0, 10, "Crops")];
  let investments = vec![
    investment_record("i1", "p1", "v1", 1_000.0, 5),
    investment_record("i2", "p1", "v2", 9_000.0, 5),
    investment_record("i3", "p1", "v1", 500.0, 2),
  ];
  let metrics = PortfolioAnalytics::new("v1", investments, projects, t0()).metrics();
  assert_close(metrics.total_invested, 1_500.0);
  assert_close(metrics.average_investment_size, 750.0);
  assert_eq!(metrics.total_active_projects, 1);
}

#[test]
fn test_status_checks_run_in_precedence_order() {
  let projects = vec![
    project_record("well_funded_old", 100_000.0, 85_000.0, 400, "Crops"),
    project_record("stale", 100_000.0, 40_000.0, 400, "Crops"),
    project_record("done", 10_000.0, 10_000.0, 30, "Crops"),
    project_record("young", 10_000.0, 1_000.0, 30, "Crops"),
  ];
  let investments = vec![
    investment_record("i1", "well_funded_old", "v1", 100.0, 4),
    investment_record("i2", "stale", "v1", 100.0, 3),
    investment_record("i3", "done", "v1", 100.0, 2),
    investment_record("i4", "young", "v1", 100.0, 1),
  ];
  let history = PortfolioAnalytics::new("v1", investments, projects, t0()).history();
  let statuses: Vec<(&str, HoldingStatus)> = history
    .iter()
    .map(|h| (h.investment.id.as_str(), h.status))
    .collect();
  assert_eq!(
    statuses,
    vec![
      ("i4", HoldingStatus::Active),
      ("i3", HoldingStatus::Completed),
      ("i2", HoldingStatus::AtRisk),
      ("i1", HoldingStatus::Active),
    ]
  );
}

#[test]
fn test_missing_project_is_worthless_and_maximally_risky() {
  let projects = vec![project_record("p1", 10_000.0, 9_000.0, 10, "Crops")];
  let investments = vec![
    investment_record("i1", "p1", "v1", 1_000.0, 10),
    investment_record("ghost", "p_deleted", "v1", 1_000.0, 20),
  ];
  let portfolio = PortfolioAnalytics::new("v1", investments, projects, t0());

  let metrics = portfolio.metrics();
  let live_value = 1_000.0 * (1.0 + 0.9 * 0.15 + (10.0 / 365.0) * 0.08);
  assert_close(metrics.total_portfolio_value, live_value);
  assert_close(metrics.risk_score, (0.3 + 1.0) / 2.0);

  let ghost = portfolio
    .history()
    .into_iter()
    .find(|h| h.investment.id == "ghost")
    .unwrap();
  assert!(ghost.project.is_none());
  assert_eq!(ghost.status, HoldingStatus::AtRisk);
  assert_eq!(ghost.current_value, 0.0);
  assert_eq!(ghost.expected_return, 0.0);
  assert_eq!(ghost.time_in_market, 0);

  let breakdown = portfolio.breakdown();
  let unknown = breakdown.by_category.iter().find(|s| s.label == "Unknown").unwrap();
  assert_eq!(unknown.count, 1);
  let high = breakdown.by_risk_level.iter().find(|s| s.label == "High").unwrap();
  assert_close(high.amount, 1_000.0);
  assert!(breakdown.by_funding_stage.iter().any(|s| s.label == "Unknown"));
}

#[test]
fn test_breakdown_percentages_cover_the_portfolio() {
  let projects = vec![
    project_record("a", 50_000.0, 45_000.0, 20, "Organic"),
    project_record("b", 20_000.0, 12_000.0, 40, "Technology"),
    project_record("c", 80_000.0, 4_000.0, 300, "Livestock"),
  ];
  let investments = vec![
    investment_record("i1", "a", "v1", 1_000.0, 15),
    investment_record("i2", "b", "v1", 3_000.0, 12),
    investment_record("i3", "a", "v1", 2_000.0, 8),
    investment_record("i4", "c", "v1", 4_000.0, 3),
  ];
  let breakdown = PortfolioAnalytics::new("v1", investments, projects, t0()).breakdown();

  for slices in [&breakdown.by_category, &breakdown.by_risk_level, &breakdown.by_funding_stage] {
    assert!((PortfolioBreakdown::total_percentage(slices) - 100.0).abs() < 1e-9);
  }

  let labels: Vec<&str> = breakdown.by_category.iter().map(|s| s.label.as_str()).collect();
  assert_eq!(labels, vec!["Organic", "Technology", "Livestock"]);
  assert_eq!(breakdown.by_category[0].count, 2);
  assert_close(breakdown.by_category[0].percentage, 30.0);

  let risk: Vec<&str> = breakdown.by_risk_level.iter().map(|s| s.label.as_str()).collect();
  assert_eq!(risk, vec!["Low", "Medium", "High"]);
  let stages: Vec<&str> = breakdown.by_funding_stage.iter().map(|s| s.label.as_str()).collect();
  assert_eq!(stages, vec!["Nearly Complete", "Half Funded", "Just Started"]);
}

#[test]
fn test_history_is_newest_first() {
  let projects = vec![project_record("p1", 10_000.0, 5_000.0, 400, "Crops")];
  let investments = vec![
    investment_record("old", "p1", "v1", 100.0, 300),
    investment_record("new", "p1", "v1", 100.0, 1),
    investment_record("mid", "p1", "v1", 100.0, 50),
  ];
  let history = PortfolioAnalytics::new("v1", investments, projects, t0()).history();
  let ids: Vec<&str> = history.iter().map(|h| h.investment.id.as_str()).collect();
  assert_eq!(ids, vec!["new", "mid", "old"]);
  assert!(history
    .windows(2)
    .all(|w| w[0].investment.created_at >= w[1].investment.created_at));
}

#[test]
fn test_performance_report() {
  let projects = vec![
    project_record("p1", 50_000.0, 35_000.0, 120, "Organic"),
    project_record("p2", 25_000.0, 18_000.0, 90, "Technology"),
  ];
  // t0 is 2026-06-01, so these land in March, April and May.
  let investments = vec![
    investment_record("i1", "p1", "v1", 5_000.0, 80),
    investment_record("i2", "p2", "v1", 3_000.0, 50),
    investment_record("i3", "p1", "v1", 2_500.0, 30),
    investment_record("i4", "p2", "v1", 1_500.0, 45),
  ];
  let portfolio = PortfolioAnalytics::new("v1", investments, projects, t0());
  let report = portfolio.performance();

  let months: Vec<(&str, usize)> = report
    .monthly_investments
    .iter()
    .map(|m| (m.month.as_str(), m.count))
    .collect();
  assert_eq!(months, vec![("Mar 2026", 1), ("Apr 2026", 2), ("May 2026", 1)]);
  assert_close(report.monthly_investments[1].amount, 4_500.0);

  let top = &report.top_performing_projects;
  assert_eq!(top.len(), 4);
  assert!(top.windows(2).all(|w| w[0].performance >= w[1].performance));
  let expected_i1 = (0.7 * 0.15 + (80.0 / 365.0) * 0.08) * 100.0;
  let i1 = top.iter().find(|t| t.investment.id == "i1").unwrap();
  assert_close(i1.performance, expected_i1);

  let growth = &report.portfolio_growth;
  assert_eq!(growth.len(), 4);
  assert!(growth.windows(2).all(|w| w[0].date <= w[1].date));
  assert!(growth.windows(2).all(|w| w[0].total_invested <= w[1].total_invested));
  let last = growth.last().unwrap();
  assert_close(last.total_invested, 12_000.0);
  assert_close(last.total_value, portfolio.metrics().total_portfolio_value);
  assert_eq!(growth[0].date, (t0() - Duration::days(80)).date_naive());
}

#[test]
fn test_top_performers_are_capped_at_five() {
  let projects = vec![project_record("p1", 10_000.0, 5_000.0, 30, "Crops")];
  let investments: Vec<_> = (0..8)
    .map(|n| investment_record(&format!("i{}", n), "p1", "v1", 100.0, n * 10))
    .collect();
  let report = PortfolioAnalytics::new("v1", investments, projects, t0()).performance();
  assert_eq!(report.top_performing_projects.len(), 5);
}

#[tokio::test]
async fn test_portfolio_reflects_latest_funding() {
  let h = harness();
  let farmer = h.register("sarah@farm.test", Role::Farmer).await;
  let investor = h.register("emma@invest.test", Role::Investor).await;
  let project = h.approved_project(&farmer, "Greenhouse", 10_000.0).await;

  h.app.fund_project(&investor, &project.id, 1_000.0).await.unwrap();
  let before = h.app.portfolio(&investor).await.unwrap().metrics();
  assert_close(before.total_invested, 1_000.0);

  h.app.fund_project(&investor, &project.id, 4_000.0).await.unwrap();
  let after = h.app.portfolio(&investor).await.unwrap().metrics();
  assert_close(after.total_invested, 5_000.0);
  // Completion moved from 10% to 50%, lifting both holdings.
  assert_close(after.total_portfolio_value, 5_000.0 * (1.0 + 0.5 * 0.15));
}

#[tokio::test]
async fn test_demo_seed_populates_portfolio_once() {
  let h = harness();
  let investor = h.register("emma@invest.test", Role::Investor).await;

  assert!(h.app.seed_demo(&investor).await.unwrap());
  let metrics = h.app.portfolio(&investor).await.unwrap().metrics();
  assert_close(metrics.total_invested, 19_500.0);
  assert_eq!(metrics.total_active_projects, 3);
  assert_close(metrics.average_investment_size, 3_900.0);

  assert!(!h.app.seed_demo(&investor).await.unwrap());
  assert_eq!(h.app.investments().all().await.unwrap().len(), 5);

  let other = h.register("otto@invest.test", Role::Investor).await;
  assert!(h.app.reset_demo(&other).await.unwrap());
  assert!(h.app.portfolio(&investor).await.unwrap().investments().is_empty());
  assert_eq!(h.app.portfolio(&other).await.unwrap().investments().len(), 5);
  assert_eq!(h.app.projects().approved().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_demo_seed_keeps_existing_projects() {
  let h = harness();
  let investor = h.register("emma@invest.test", Role::Investor).await;
  h.put_records(&[project_record("demo_project_1", 1_000.0, 0.0, 5, "Crops")], &[])
    .await;

  assert!(h.app.seed_demo(&investor).await.unwrap());
  assert_eq!(h.app.projects().all().await.unwrap().len(), 1);
  let breakdown = h.app.portfolio(&investor).await.unwrap().breakdown();
  assert_eq!(breakdown.by_category.iter().find(|s| s.label == "Unknown").unwrap().count, 3);
}

#[tokio::test]
async fn test_demo_reset_keeps_other_users_records() {
  let h = harness();
  let farmer = h.register("sarah@farm.test", Role::Farmer).await;
  let emma = h.register("emma@invest.test", Role::Investor).await;
  let project = h.approved_project(&farmer, "Orchard", 10_000.0).await;
  h.app.fund_project(&emma, &project.id, 1_000.0).await.unwrap();

  let otto = h.register("otto@invest.test", Role::Investor).await;
  assert!(h.app.reset_demo(&otto).await.unwrap());
  assert!(h.app.reset_demo(&otto).await.unwrap());

  let mine = h.app.my_projects(&farmer).await.unwrap();
  assert_eq!(mine.len(), 1);
  assert_close(mine[0].raised_amount, 1_000.0);
  let emma_metrics = h.app.portfolio(&emma).await.unwrap().metrics();
  assert_close(emma_metrics.total_invested, 1_000.0);

  let otto_metrics = h.app.portfolio(&otto).await.unwrap().metrics();
  assert_close(otto_metrics.total_invested, 19_500.0);
  assert_eq!(h.app.projects().all().await.unwrap().len(), 4);
  assert_eq!(h.app.investments().all().await.unwrap().len(), 6);
}
