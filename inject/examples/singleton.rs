use fibre_inject::{abstraction, Container, Injectable};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

trait RequestTracker: Send + Sync {
  fn id(&self) -> usize;
}

// A simple tracker that gets a unique ID upon creation.
struct CountingTracker {
  id: usize,
}
impl RequestTracker for CountingTracker {
  fn id(&self) -> usize {
    self.id
  }
}
impl Injectable for CountingTracker {}

abstraction!(RequestTracker: CountingTracker);

static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn new_tracker() -> CountingTracker {
  CountingTracker {
    id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
  }
}

fn main() {
  let container = Container::new();

  // This factory will only be called ONCE.
  container
    .bind::<dyn RequestTracker>()
    .named("singleton_tracker")
    .singleton()
    .to_constructor(new_tracker)
    .expect("singleton binding is valid");

  // This factory will be called EVERY time the tracker is resolved.
  container
    .bind::<dyn RequestTracker>()
    .named("transient_tracker")
    .transient()
    .to_constructor(new_tracker)
    .expect("transient binding is valid");

  println!("--- Resolving Singletons ---");
  let s1 = container.resolve::<dyn RequestTracker>("singleton_tracker").unwrap();
  let s2 = container.resolve::<dyn RequestTracker>("singleton_tracker").unwrap();
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id(), s2.id());
  assert!(Arc::ptr_eq(&s1, &s2), "Singleton instances should be identical");

  println!("--- Resolving Transients ---");
  let t1 = container.resolve::<dyn RequestTracker>("transient_tracker").unwrap();
  let t2 = container.resolve::<dyn RequestTracker>("transient_tracker").unwrap();
  println!("Transient 1 ID: {}, Transient 2 ID: {}", t1.id(), t2.id());
  assert_eq!((t1.id(), t2.id()), (1, 2));
  assert!(!Arc::ptr_eq(&t1, &t2), "Transient instances should be different");

  println!("--- Registrations ---");
  for descriptor in container.descriptors() {
    println!("{} (instantiated: {})", descriptor, descriptor.instantiated);
  }
}
