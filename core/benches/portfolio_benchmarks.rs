use agrofund::analytics::PortfolioAnalytics;
use agrofund::{Agrofund, AgrofundConfig, FixedClock, HashingConfig, Investment, MemoryStore, NewProject, Project, ProjectStatus, Role};
use chrono::{DateTime, Duration, Utc};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

const PROJECT_COUNT: usize = 50;

fn as_of() -> DateTime<Utc> {
  DateTime::parse_from_rfc3339("2026-06-01T12:00:00Z")
    .unwrap()
    .with_timezone(&Utc)
}

fn synthetic_portfolio(investment_count: usize) -> PortfolioAnalytics {
  let now = as_of();
  let categories = ["Organic", "Technology", "Livestock", "Crops"];
  let projects: Vec<Project> = (0..PROJECT_COUNT)
    .map(|i| Project {
      id: format!("project_{}", i),
      title: format!("Project {}", i),
      description: "Synthetic".to_string(),
      goal_amount: 10_000.0 + (i as f64) * 5_000.0,
      raised_amount: (i as f64) * 3_000.0,
      farmer_id: format!("farmer_{}", i % 7),
      farmer_name: "Bench Farmer".to_string(),
      status: ProjectStatus::Approved,
      category: categories[i % categories.len()].to_string(),
      image_url: None,
      created_at: now - Duration::days((i as i64) * 11),
      updated_at: now,
    })
    .collect();
  let investments: Vec<Investment> = (0..investment_count)
    .map(|i| Investment {
      id: format!("inv_{}", i),
      // Every tenth investment points at a project that no longer exists.
      project_id: if i % 10 == 9 {
        "project_gone".to_string()
      } else {
        format!("project_{}", i % PROJECT_COUNT)
      },
      investor_id: "investor_bench".to_string(),
      amount: 100.0 + (i % 13) as f64 * 250.0,
      created_at: now - Duration::hours((i as i64) * 17),
    })
    .collect();
  PortfolioAnalytics::new("investor_bench", investments, projects, now)
}

fn bench_portfolio_reports(c: &mut Criterion) {
  let mut group = c.benchmark_group("PortfolioReports");

  for count in [10usize, 100, 1_000].iter() {
    let portfolio = synthetic_portfolio(*count);
    group.throughput(Throughput::Elements(*count as u64));

    group.bench_with_input(BenchmarkId::new("metrics", count), &portfolio, |b, p| b.iter(|| p.metrics()));
    group.bench_with_input(BenchmarkId::new("history", count), &portfolio, |b, p| b.iter(|| p.history()));
    group.bench_with_input(BenchmarkId::new("breakdown", count), &portfolio, |b, p| b.iter(|| p.breakdown()));
  }
  group.finish();
}

fn bench_performance_report(c: &mut Criterion) {
  // Growth series is quadratic in the investment count.
  let mut group = c.benchmark_group("PerformanceReport");
  for count in [10usize, 100, 500].iter() {
    let portfolio = synthetic_portfolio(*count);
    group.throughput(Throughput::Elements(*count as u64));
    group.bench_with_input(BenchmarkId::from_parameter(count), &portfolio, |b, p| b.iter(|| p.performance()));
  }
  group.finish();
}

fn bench_funding(c: &mut Criterion) {
  let mut group = c.benchmark_group("Funding");
  let rt = Runtime::new().unwrap();

  let config = AgrofundConfig {
    enforce_funding_cap: false,
    hashing: HashingConfig::minimal(),
    ..AgrofundConfig::default()
  };
  let (app, investor, project_id) = rt.block_on(async {
    let app = Agrofund::new(Arc::new(MemoryStore::new()), Arc::new(FixedClock::new(as_of())), config).unwrap();
    app.bootstrap().await.unwrap();
    let admin = app.auth().login("admin@agrofund.com", "admin123").await.unwrap();
    let farmer = app
      .auth()
      .register("farmer@bench.test", "password123", Role::Farmer, None)
      .await
      .unwrap();
    let investor = app
      .auth()
      .register("investor@bench.test", "password123", Role::Investor, None)
      .await
      .unwrap();
    let project = app
      .submit_project(
        &farmer,
        NewProject {
          title: "Bench Greenhouse".to_string(),
          description: "Funding throughput".to_string(),
          goal_amount: 1_000_000.0,
          category: "Crops".to_string(),
          image_url: None,
        },
      )
      .await
      .unwrap();
    app.approve_project(&admin, &project.id).await.unwrap();
    (app, investor, project.id)
  });

  group.throughput(Throughput::Elements(1)); // 1 funding read-modify-write
  group.bench_function("fund_project", |b| {
    b.to_async(&rt).iter_batched(
      || (app.clone(), investor.clone(), project_id.clone()),
      |(app, investor, project_id)| async move {
        app.fund_project(&investor, &project_id, 10.0).await.unwrap();
      },
      BatchSize::SmallInput,
    )
  });
  group.finish();
}

criterion_group!(
  benches,
  bench_portfolio_reports,
  bench_performance_report,
  bench_funding
);
criterion_main!(benches);
