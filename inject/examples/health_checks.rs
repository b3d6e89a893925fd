use fibre_inject::{abstraction, Container, Injectable};

// Every component that can verify itself at startup registers a HealthCheck.
trait HealthCheck: Send + Sync {
  fn check(&self) -> Result<String, String>;
}

struct DatabaseCheck;
impl HealthCheck for DatabaseCheck {
  fn check(&self) -> Result<String, String> {
    Ok("database reachable".to_string())
  }
}
impl Injectable for DatabaseCheck {}

struct CacheCheck;
impl HealthCheck for CacheCheck {
  fn check(&self) -> Result<String, String> {
    Err("cache: connection refused".to_string())
  }
}
impl Injectable for CacheCheck {}

abstraction!(HealthCheck: DatabaseCheck, CacheCheck);

fn main() {
  let container = Container::new();
  container
    .bind::<dyn HealthCheck>()
    .named("database")
    .to_constructor(|| DatabaseCheck)
    .expect("database check binding is valid");
  container
    .bind::<dyn HealthCheck>()
    .named("cache")
    .to_constructor(|| CacheCheck)
    .expect("cache check binding is valid");

  // Gather every implementation, in registration order.
  let checks = container.resolve_all::<dyn HealthCheck>();
  println!("Health Check... ({} registered)", checks.len());

  let mut healthy = true;
  for check in &checks {
    match check.check() {
      Ok(item) => println!("[ok]   {}", item),
      Err(reason) => {
        println!("[fail] {}", reason);
        healthy = false;
      }
    }
  }

  assert_eq!(checks.len(), 2);
  assert!(!healthy);
}
