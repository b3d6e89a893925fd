//! The optional process-wide container.

use crate::container::Container;
use once_cell::sync::Lazy;

// Created on first access in a thread-safe manner.
static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::default);

/// Provides a reference to the global container instance.
///
/// Applications that prefer a single composition root can register their
/// bindings here during bootstrap. Libraries and tests should create their
/// own [`Container`] and pass it explicitly instead.
///
/// # Examples
///
/// ```
/// use fibre_inject::{abstraction, global, Injectable};
///
/// trait Clock: Send + Sync {}
/// struct SystemClock;
/// impl Clock for SystemClock {}
/// impl Injectable for SystemClock {}
/// abstraction!(Clock: SystemClock);
///
/// global().bind::<dyn Clock>().to_instance(SystemClock).unwrap();
/// assert!(global().is_registered::<dyn Clock>());
/// ```
pub fn global() -> &'static Container {
  &GLOBAL_CONTAINER
}
