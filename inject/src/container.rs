//! The main `Container` struct and its registration methods.

use crate::abstraction::{Abstraction, Factory, Implements};
use crate::binding::{Bind, Binding, FieldAliases};
use crate::core::TypeKey;
use crate::descriptor::{BuildFn, Descriptor, DescriptorInfo, Erased, Producer};
use crate::error::{ConfigError, ResolveError};
use crate::injector::Injectable;
use crate::registry::Registry;
use parking_lot::Mutex;
use std::sync::Arc;

/// The Inversion of Control (IoC) container.
///
/// Holds the bindings of every abstraction and resolves them on demand. All
/// methods take `&self`; the container is `Send + Sync` and can be shared
/// freely once bootstrap has registered its bindings.
///
/// Resolution methods live in the instantiator module.
///
/// Cycles are detected per thread. Two threads that each start building one
/// half of a cyclic pair of singletons can block on each other's cache cell,
/// so singleton graphs must stay acyclic.
#[derive(Default)]
pub struct Container {
  pub(crate) registry: Registry,
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Starts a typed registration for the abstraction `A`.
  ///
  /// # Examples
  ///
  /// ```
  /// use fibre_inject::{abstraction, Container, Injectable};
  /// use std::sync::Arc;
  ///
  /// trait Greeter: Send + Sync {
  ///   fn greet(&self) -> String;
  /// }
  /// struct English;
  /// impl Greeter for English {
  ///   fn greet(&self) -> String { "Hello!".into() }
  /// }
  /// impl Injectable for English {}
  /// abstraction!(Greeter: English);
  ///
  /// let container = Container::new();
  /// container.bind::<dyn Greeter>().named("en").to_constructor(|| English).unwrap();
  ///
  /// let greeter = container.resolve::<dyn Greeter>("en").unwrap();
  /// assert_eq!(greeter.greet(), "Hello!");
  /// ```
  pub fn bind<A: ?Sized + Abstraction>(&self) -> Bind<'_, A> {
    Bind::new(self)
  }

  /// Binds `factory` to the abstraction `A`.
  ///
  /// Every factory parameter is resolved to the latest unnamed binding of its
  /// abstraction, or the earliest registered one. The produced value has its
  /// fields injected before it is handed out.
  ///
  /// # Errors
  ///
  /// - [`ConfigError::SelfDependency`] if `binding.alias` is empty and a
  ///   parameter is `A` itself.
  /// - [`ConfigError::Duplicate`] if `A` already has a factory with the same
  ///   parameter abstractions under the same alias, whatever type it builds.
  pub fn register_constructor<A, S, Args>(
    &self,
    factory: impl Factory<Args, S>,
    binding: Binding,
  ) -> Result<(), ConfigError>
  where
    A: ?Sized + Abstraction,
    S: Implements<A> + Injectable,
    Args: 'static,
  {
    let abstraction = TypeKey::of::<A>();
    let params = factory.param_keys();
    if binding.alias.is_empty() && params.contains(&abstraction) {
      return Err(ConfigError::SelfDependency {
        abstraction: abstraction.name(),
      });
    }

    let invoke: BuildFn = Box::new(
      move |container: &Container, aliases: &FieldAliases| -> Result<Erased, ResolveError> {
        let mut value = factory
          .call(container)
          .map_err(|source| ResolveError::Dependency {
            abstraction: abstraction.name(),
            source: Box::new(source),
          })?;
        container.inject_with(&mut value, aliases);
        let erased: Erased = Box::new(<S as Implements<A>>::upcast(Arc::new(value)));
        Ok(erased)
      },
    );
    let producer = Producer::Factory {
      params,
      implementation: TypeKey::of::<S>(),
      invoke,
    };
    self.register(abstraction, binding, producer)
  }

  /// Binds an already constructed `instance` to the abstraction `A`.
  ///
  /// The instance has its fields injected exactly once, on first resolution,
  /// so bindings its fields need may be registered after it. From then on
  /// every resolution returns that same `Arc`, and `binding.lifecycle` has no
  /// effect: a transient instance binding is neither re-injected nor copied.
  ///
  /// # Errors
  ///
  /// [`ConfigError::Duplicate`] if `A` already has an instance of the same
  /// type under the same alias.
  pub fn register_instance<A, S>(&self, instance: S, binding: Binding) -> Result<(), ConfigError>
  where
    A: ?Sized + Abstraction,
    S: Implements<A> + Injectable,
  {
    let abstraction = TypeKey::of::<A>();
    let pending = Mutex::new(Some(instance));

    let take: BuildFn = Box::new(
      move |container: &Container, aliases: &FieldAliases| -> Result<Erased, ResolveError> {
        let mut value = pending
          .lock()
          .take()
          .ok_or(ResolveError::InstanceUnavailable {
            abstraction: abstraction.name(),
          })?;
        container.inject_with(&mut value, aliases);
        let erased: Erased = Box::new(<S as Implements<A>>::upcast(Arc::new(value)));
        Ok(erased)
      },
    );
    let producer = Producer::Instance {
      implementation: TypeKey::of::<S>(),
      take,
    };
    self.register(abstraction, binding, producer)
  }

  fn register(
    &self,
    abstraction: TypeKey,
    binding: Binding,
    producer: Producer,
  ) -> Result<(), ConfigError> {
    let Binding {
      alias,
      lifecycle,
      field_aliases,
    } = binding;
    let descriptor = Descriptor::new(abstraction, alias, lifecycle, field_aliases, producer);
    let info = descriptor.info();

    self.registry.add(descriptor)?;
    tracing::debug!(
      target: "fibre_inject",
      abstraction = info.abstraction,
      alias = %info.alias,
      lifecycle = %info.lifecycle,
      producer = %info.producer,
      implementation = info.implementation,
      "registered binding"
    );
    Ok(())
  }

  /// Whether `A` has at least one binding.
  pub fn is_registered<A: ?Sized + Abstraction>(&self) -> bool {
    self.registry.contains(&TypeKey::of::<A>(), None)
  }

  /// Whether `A` has a binding under exactly `alias`.
  pub fn is_registered_with<A: ?Sized + Abstraction>(&self, alias: &str) -> bool {
    self.registry.contains(&TypeKey::of::<A>(), Some(alias))
  }

  /// Describes every registration, in registration order.
  pub fn descriptors(&self) -> Vec<DescriptorInfo> {
    self
      .registry
      .snapshot()
      .iter()
      .map(|descriptor| descriptor.info())
      .collect()
  }
}
