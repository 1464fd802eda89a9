// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use agrofund::store::keys;
use agrofund::{
  Agrofund, AgrofundConfig, FixedClock, HashingConfig, Investment, MemoryStore, NewProject, Project, ProjectStatus,
  RecordStore, Role, Session, StoreError,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;
use tracing::Level;

// --- Fixed instant every test evaluates against ---
pub fn t0() -> DateTime<Utc> {
  DateTime::parse_from_rfc3339("2026-06-01T12:00:00Z")
    .unwrap()
    .with_timezone(&Utc)
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
  t0() - Duration::days(days)
}

pub fn test_config() -> AgrofundConfig {
  AgrofundConfig {
    hashing: HashingConfig::minimal(),
    ..AgrofundConfig::default()
  }
}

pub struct Harness {
  pub app: Agrofund,
  pub clock: Arc<FixedClock>,
  pub store: Arc<MemoryStore>,
}

pub fn harness() -> Harness {
  harness_with(test_config())
}

pub fn harness_with(config: AgrofundConfig) -> Harness {
  setup_tracing();
  let clock = Arc::new(FixedClock::new(t0()));
  let store = Arc::new(MemoryStore::new());
  let app = Agrofund::new(store.clone(), clock.clone(), config).unwrap();
  Harness { app, clock, store }
}

impl Harness {
  pub async fn register(&self, email: &str, role: Role) -> Session {
    self
      .app
      .auth()
      .register(email, "password123", role, Some(email.split('@').next().unwrap().to_string()))
      .await
      .unwrap()
  }

  pub async fn admin(&self) -> Session {
    self.app.bootstrap().await.unwrap();
    self.app.auth().login("admin@agrofund.com", "admin123").await.unwrap()
  }

  /// Submits a project as `farmer` and has an admin approve it.
  pub async fn approved_project(&self, farmer: &Session, title: &str, goal: f64) -> Project {
    let admin = self.admin().await;
    let project = self
      .app
      .submit_project(farmer, new_project(title, goal, "Crops"))
      .await
      .unwrap();
    self.app.approve_project(&admin, &project.id).await.unwrap()
  }

  /// Replaces the stored collections, bypassing the repositories.
  pub async fn put_records(&self, projects: &[Project], investments: &[Investment]) {
    let records = self.app.records();
    records.save(keys::PROJECTS, projects).await.unwrap();
    records.save(keys::INVESTMENTS, investments).await.unwrap();
  }
}

// --- Store whose writes to one chosen key fail ---
#[derive(Debug, Default)]
pub struct FailingStore {
  inner: MemoryStore,
  failing_key: Mutex<Option<String>>,
}

impl FailingStore {
  pub fn fail_writes_to(&self, key: &str) {
    *self.failing_key.lock() = Some(key.to_string());
  }

  pub fn recover(&self) {
    *self.failing_key.lock() = None;
  }

  fn check(&self, key: &str) -> Result<(), StoreError> {
    match self.failing_key.lock().as_deref() {
      Some(failing) if failing == key => Err(StoreError::Backend(anyhow::anyhow!("write to '{}' refused", key))),
      _ => Ok(()),
    }
  }
}

#[async_trait]
impl RecordStore for FailingStore {
  async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
    self.inner.get(key).await
  }

  async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
    self.check(key)?;
    self.inner.set(key, value).await
  }

  async fn delete(&self, key: &str) -> Result<(), StoreError> {
    self.check(key)?;
    self.inner.delete(key).await
  }
}

pub struct FailingHarness {
  pub app: Agrofund,
  pub store: Arc<FailingStore>,
}

pub fn failing_harness() -> FailingHarness {
  setup_tracing();
  let store = Arc::new(FailingStore::default());
  let app = Agrofund::new(store.clone(), Arc::new(FixedClock::new(t0())), test_config()).unwrap();
  FailingHarness { app, store }
}

pub fn new_project(title: &str, goal: f64, category: &str) -> NewProject {
  NewProject {
    title: title.to_string(),
    description: format!("{} description", title),
    goal_amount: goal,
    category: category.to_string(),
    image_url: None,
  }
}

pub fn project_record(id: &str, goal: f64, raised: f64, age_days: i64, category: &str) -> Project {
  Project {
    id: id.to_string(),
    title: format!("Project {}", id),
    description: "Seeded for tests".to_string(),
    goal_amount: goal,
    raised_amount: raised,
    farmer_id: "farmer_1".to_string(),
    farmer_name: "Test Farmer".to_string(),
    status: ProjectStatus::Approved,
    category: category.to_string(),
    image_url: None,
    created_at: days_ago(age_days),
    updated_at: days_ago(age_days),
  }
}

pub fn investment_record(id: &str, project_id: &str, investor_id: &str, amount: f64, age_days: i64) -> Investment {
  Investment {
    id: id.to_string(),
    project_id: project_id.to_string(),
    investor_id: investor_id.to_string(),
    amount,
    created_at: days_ago(age_days),
  }
}

pub fn assert_close(actual: f64, expected: f64) {
  assert!(
    (actual - expected).abs() < 1e-6,
    "expected {} to be within 1e-6 of {}",
    actual,
    expected
  );
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
