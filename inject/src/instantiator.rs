//! Recursive resolution: binding lookup, lifecycle policy and field injection.

use crate::abstraction::Abstraction;
use crate::binding::FieldAliases;
use crate::container::Container;
use crate::core::{ResolutionGuard, TypeKey};
use crate::descriptor::Descriptor;
use crate::error::ResolveError;
use crate::injector::{FieldInjector, Injectable};
use std::sync::Arc;

impl Container {
  /// Resolves the binding of `A` registered under `alias` (`""` for the
  /// unnamed one).
  ///
  /// Failures are soft: the error is logged once and `None` is returned, so
  /// callers are never aborted by a missing binding.
  ///
  /// # Examples
  ///
  /// ```
  /// use fibre_inject::{abstraction, Container};
  ///
  /// trait Mailer: Send + Sync {}
  /// abstraction!(Mailer);
  ///
  /// let container = Container::new();
  /// assert!(container.resolve::<dyn Mailer>("").is_none());
  /// ```
  pub fn resolve<A: ?Sized + Abstraction>(&self, alias: &str) -> Option<Arc<A>> {
    match self.try_resolve::<A>(alias) {
      Ok(instance) => Some(instance),
      Err(error) => {
        tracing::error!(target: "fibre_inject", %error, "resolution failed");
        None
      }
    }
  }

  /// Like [`resolve`](Container::resolve), but hands the error to the caller
  /// instead of logging it.
  ///
  /// # Errors
  ///
  /// - [`ResolveError::NotRegistered`] if `A` has no binding at all.
  /// - [`ResolveError::AliasNotFound`] if none of its bindings uses `alias`.
  /// - [`ResolveError::Dependency`] if a factory parameter could not be
  ///   resolved.
  /// - [`ResolveError::Cycle`] if building the value requires itself.
  pub fn try_resolve<A: ?Sized + Abstraction>(&self, alias: &str) -> Result<Arc<A>, ResolveError> {
    let descriptor = self.registry.find(&TypeKey::of::<A>(), alias)?;
    self.get_or_create(&descriptor)
  }

  /// Resolves every binding of `A`, in registration order.
  ///
  /// Bindings that fail to build are logged and skipped.
  pub fn resolve_all<A: ?Sized + Abstraction>(&self) -> Vec<Arc<A>> {
    self
      .registry
      .all_of(&TypeKey::of::<A>())
      .iter()
      .filter_map(|descriptor| match self.get_or_create::<A>(descriptor) {
        Ok(instance) => Some(instance),
        Err(error) => {
          tracing::error!(target: "fibre_inject", %error, "resolution failed");
          None
        }
      })
      .collect()
  }

  /// Builds a `T` that was never registered: its default value with every
  /// declared field injected.
  pub fn resolve_struct<T: Injectable + Default>(&self) -> T {
    let mut value = T::default();
    self.inject(&mut value);
    value
  }

  /// Injects the declared fields of a value the caller already owns.
  ///
  /// Returns the same value for chaining.
  pub fn inject<'t, T: Injectable + ?Sized>(&self, target: &'t mut T) -> &'t mut T {
    self.inject_with(target, &FieldAliases::new());
    target
  }

  pub(crate) fn inject_with<T: Injectable + ?Sized>(&self, target: &mut T, aliases: &FieldAliases) {
    let mut fields = FieldInjector::new(self, aliases, std::any::type_name::<T>());
    target.inject(&mut fields);
    fields.finish();
  }

  /// Resolves a dependency that carries no alias: the latest unnamed binding
  /// of `A` if there is one, otherwise the earliest registered.
  pub(crate) fn resolve_default_or_first<A: ?Sized + Abstraction>(
    &self,
  ) -> Result<Arc<A>, ResolveError> {
    let descriptor = self.registry.default_or_first(&TypeKey::of::<A>())?;
    self.get_or_create(&descriptor)
  }

  fn get_or_create<A: ?Sized + Abstraction>(
    &self,
    descriptor: &Descriptor,
  ) -> Result<Arc<A>, ResolveError> {
    let mismatch = || ResolveError::TypeMismatch {
      abstraction: descriptor.abstraction.name(),
    };

    if let Some(cached) = descriptor.cached() {
      return cached.downcast_ref::<Arc<A>>().cloned().ok_or_else(mismatch);
    }

    let _guard = ResolutionGuard::enter(descriptor.id).ok_or_else(|| ResolveError::Cycle {
      abstraction: descriptor.abstraction.name(),
      alias: descriptor.alias.clone(),
    })?;

    if descriptor.is_cached() {
      descriptor
        .get_or_init(self)?
        .downcast_ref::<Arc<A>>()
        .cloned()
        .ok_or_else(mismatch)
    } else {
      descriptor
        .create(self)?
        .downcast::<Arc<A>>()
        .map(|instance| *instance)
        .map_err(|_| mismatch())
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::{
    abstraction, Binding, ConfigError, Container, FieldInjector, Injectable, ResolveError,
  };
  use std::sync::atomic::{AtomicUsize, Ordering};
  use std::sync::Arc;

  trait Source: Send + Sync {
    fn id(&self) -> usize;
  }

  struct Counted(usize);
  impl Source for Counted {
    fn id(&self) -> usize {
      self.0
    }
  }
  impl Injectable for Counted {}

  abstraction!(Source: Counted);

  trait Left: Send + Sync {}
  trait Right: Send + Sync {}

  struct LeftImpl;
  impl Left for LeftImpl {}
  impl Injectable for LeftImpl {}

  abstraction!(Left: LeftImpl);
  abstraction!(Right);

  #[test]
  fn transient_factory_runs_on_every_resolution() {
    let container = Container::new();
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    container
      .bind::<dyn Source>()
      .transient()
      .to_constructor(move || Counted(counter.fetch_add(1, Ordering::SeqCst)))
      .unwrap();

    let first = container.resolve::<dyn Source>("").unwrap();
    let second = container.resolve::<dyn Source>("").unwrap();

    assert_eq!((first.id(), second.id()), (0, 1));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(!container.descriptors()[0].instantiated);
  }

  #[test]
  fn singleton_is_marked_instantiated_after_first_resolution() {
    let container = Container::new();
    container.bind::<dyn Source>().to_constructor(|| Counted(7)).unwrap();
    assert!(!container.descriptors()[0].instantiated);

    container.resolve::<dyn Source>("").unwrap();

    assert!(container.descriptors()[0].instantiated);
  }

  #[test]
  fn missing_parameter_fails_the_dependent_construction() {
    let container = Container::new();
    container
      .bind::<dyn Left>()
      .to_constructor(|_right: Arc<dyn Right>| LeftImpl)
      .unwrap();

    let err = container.try_resolve::<dyn Left>("").err().unwrap();

    match err {
      ResolveError::Dependency { source, .. } => {
        assert!(matches!(*source, ResolveError::NotRegistered { .. }));
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  // A field-level cycle: building Left resolves Right's field, which asks for
  // Left again while it is still under construction.
  struct CyclicRight {
    left: Option<Arc<dyn Left>>,
  }
  impl Right for CyclicRight {}
  impl Injectable for CyclicRight {
    fn inject(&mut self, fields: &mut FieldInjector<'_>) {
      fields.field("left", &mut self.left);
    }
  }
  crate::implements!(Right: CyclicRight);

  #[test]
  fn cycles_are_reported_instead_of_recursing() {
    let container = Container::new();
    container
      .bind::<dyn Left>()
      .to_constructor(|_right: Arc<dyn Right>| LeftImpl)
      .unwrap();
    container
      .bind::<dyn Right>()
      .to_constructor(|| CyclicRight { left: None })
      .unwrap();

    // Right's field sees the cycle and degrades to None, so Right (and
    // therefore Left) still gets built.
    let left = container.try_resolve::<dyn Left>("");
    assert!(left.is_ok());
  }

  #[test]
  fn parameter_cycle_surfaces_as_cycle_error() {
    struct Wrapper;
    impl Source for Wrapper {
      fn id(&self) -> usize {
        0
      }
    }
    impl Injectable for Wrapper {}
    crate::implements!(Source: Wrapper);

    let container = Container::new();
    container
      .register_constructor::<dyn Source, _, _>(
        |_inner: Arc<dyn Source>| Wrapper,
        Binding::named("wrapped"),
      )
      .unwrap();

    let err = container.try_resolve::<dyn Source>("wrapped").err().unwrap();

    match err {
      ResolveError::Dependency { source, .. } => {
        assert!(matches!(*source, ResolveError::Cycle { ref alias, .. } if alias == "wrapped"));
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn self_dependency_without_alias_is_rejected() {
    let container = Container::new();

    let err = container
      .bind::<dyn Source>()
      .to_constructor(|inner: Arc<dyn Source>| Counted(inner.id()))
      .unwrap_err();

    assert!(matches!(err, ConfigError::SelfDependency { .. }));
    assert!(!container.is_registered::<dyn Source>());
  }
}
