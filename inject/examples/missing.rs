use fibre_inject::{abstraction, Container, ResolveError};
use std::panic;

trait UnregisteredService: Send + Sync {}
abstraction!(UnregisteredService);

fn main() {
  let container = Container::new();

  // --- Soft failure: logged, degrades to None ---
  println!("Resolving a service that was never registered...");
  assert!(container.resolve::<dyn UnregisteredService>("").is_none());

  // --- Inspecting the failure ---
  match container.try_resolve::<dyn UnregisteredService>("") {
    Err(error @ ResolveError::NotRegistered { .. }) => {
      println!("Got the expected error: {}", error)
    }
    Err(other) => panic!("unexpected error: {}", other),
    Ok(_) => panic!("Should not have found the service!"),
  }

  // --- Required services: `resolve_from!` panics ---
  let result = panic::catch_unwind(|| {
    let _service = fibre_inject::resolve_from!(Container::new(), trait UnregisteredService);
  });
  assert!(result.is_err(), "resolve_from! should have panicked.");
  println!("Successfully caught the expected panic from resolve_from!.");
}
