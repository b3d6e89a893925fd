//! Registration options and the typed registration builder.

use crate::abstraction::{Abstraction, Factory, Implements};
use crate::container::Container;
use crate::error::ConfigError;
use crate::injector::Injectable;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maps a field name to the alias its abstraction is resolved with.
pub type FieldAliases = BTreeMap<String, String>;

/// How long a resolved instance lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Lifecycle {
  /// Built on first resolution, then shared for the life of the container.
  #[default]
  Singleton,
  /// Built anew on every resolution.
  Transient,
}

impl fmt::Display for Lifecycle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Lifecycle::Singleton => f.write_str("singleton"),
      Lifecycle::Transient => f.write_str("transient"),
    }
  }
}

/// Options attached to one registration.
///
/// An empty `alias` is the default (unnamed) binding. `field_aliases` picks
/// the alias used when injecting a named field of the produced value; fields
/// not listed fall back to the alias the type declares itself, or `""`.
///
/// # Examples
///
/// ```
/// use fibre_inject::{Binding, Lifecycle};
///
/// let binding = Binding::named("primary")
///   .transient()
///   .field_alias("store", "replica");
///
/// assert_eq!(binding.alias, "primary");
/// assert_eq!(binding.lifecycle, Lifecycle::Transient);
/// assert_eq!(binding.field_aliases["store"], "replica");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Binding {
  pub alias: String,
  pub lifecycle: Lifecycle,
  pub field_aliases: FieldAliases,
}

impl Binding {
  /// An unnamed singleton binding.
  pub fn new() -> Self {
    Self::default()
  }

  /// A singleton binding under `alias`.
  pub fn named(alias: impl Into<String>) -> Self {
    Self::new().alias(alias)
  }

  pub fn alias(mut self, alias: impl Into<String>) -> Self {
    self.alias = alias.into();
    self
  }

  pub fn lifecycle(mut self, lifecycle: Lifecycle) -> Self {
    self.lifecycle = lifecycle;
    self
  }

  pub fn singleton(self) -> Self {
    self.lifecycle(Lifecycle::Singleton)
  }

  pub fn transient(self) -> Self {
    self.lifecycle(Lifecycle::Transient)
  }

  /// Resolves the field `field` of the produced value under `alias`.
  pub fn field_alias(mut self, field: impl Into<String>, alias: impl Into<String>) -> Self {
    self.field_aliases.insert(field.into(), alias.into());
    self
  }
}

/// A registration in progress for the abstraction `A`.
///
/// Created by [`Container::bind`]. Finish it with [`to_constructor`] or
/// [`to_instance`].
///
/// [`to_constructor`]: Bind::to_constructor
/// [`to_instance`]: Bind::to_instance
#[must_use = "a binding does nothing until `to_constructor` or `to_instance` is called"]
pub struct Bind<'c, A: ?Sized> {
  container: &'c Container,
  binding: Binding,
  _abstraction: PhantomData<fn() -> Box<A>>,
}

impl<'c, A: ?Sized + Abstraction> Bind<'c, A> {
  pub(crate) fn new(container: &'c Container) -> Self {
    Self {
      container,
      binding: Binding::new(),
      _abstraction: PhantomData,
    }
  }

  pub fn named(mut self, alias: impl Into<String>) -> Self {
    self.binding = self.binding.alias(alias);
    self
  }

  pub fn singleton(mut self) -> Self {
    self.binding = self.binding.singleton();
    self
  }

  pub fn transient(mut self) -> Self {
    self.binding = self.binding.transient();
    self
  }

  pub fn field_alias(mut self, field: impl Into<String>, alias: impl Into<String>) -> Self {
    self.binding = self.binding.field_alias(field, alias);
    self
  }

  /// Replaces every option collected so far.
  pub fn with(mut self, binding: Binding) -> Self {
    self.binding = binding;
    self
  }

  pub fn to_constructor<S, Args>(self, factory: impl Factory<Args, S>) -> Result<(), ConfigError>
  where
    S: Implements<A> + Injectable,
    Args: 'static,
  {
    self
      .container
      .register_constructor::<A, S, Args>(factory, self.binding)
  }

  pub fn to_instance<S>(self, instance: S) -> Result<(), ConfigError>
  where
    S: Implements<A> + Injectable,
  {
    self
      .container
      .register_instance::<A, S>(instance, self.binding)
  }
}
