use fibre_inject::{abstraction, Container, FieldInjector, Injectable};
use std::sync::Arc;

// 1. The abstractions
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

trait ReportService: Send + Sync {
  fn generate_report(&self);
}

// 2. Concrete implementations
struct ConsoleLogger(&'static str);
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[{}]: {}", self.0, message);
  }
}
impl Injectable for ConsoleLogger {}

// `logger` arrives through the constructor, `audit` through field injection.
struct MonthlyReport {
  logger: Arc<dyn Logger>,
  audit: Option<Arc<dyn Logger>>,
}
impl ReportService for MonthlyReport {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    if let Some(audit) = &self.audit {
      audit.log("report generated");
    }
    self.logger.log("Finished report generation.");
  }
}
impl Injectable for MonthlyReport {
  fn inject(&mut self, fields: &mut FieldInjector<'_>) {
    fields.field("audit", &mut self.audit);
  }
}

abstraction!(Logger: ConsoleLogger);
abstraction!(ReportService: MonthlyReport);

fn main() -> Result<(), fibre_inject::ConfigError> {
  let container = Container::new();

  // --- Registration ---
  container.bind::<dyn Logger>().to_instance(ConsoleLogger("CONSOLE"))?;
  container.bind::<dyn Logger>().named("audit").to_instance(ConsoleLogger("AUDIT"))?;
  container
    .bind::<dyn ReportService>()
    .field_alias("audit", "audit")
    .to_constructor(|logger: Arc<dyn Logger>| MonthlyReport { logger, audit: None })?;

  // --- Resolution and Usage ---
  let report = container
    .resolve::<dyn ReportService>("")
    .expect("report service is registered");
  report.generate_report();
  Ok(())
}
