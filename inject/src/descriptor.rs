//! One registered binding and its lazily filled singleton slot.

use crate::binding::{FieldAliases, Lifecycle};
use crate::container::Container;
use crate::core::{DescriptorId, TypeKey};
use crate::error::ResolveError;
use once_cell::sync::OnceCell;
use std::any::Any;
use std::fmt;

/// A produced value: always an `Arc<A>` for the descriptor's abstraction `A`.
pub(crate) type Erased = Box<dyn Any + Send + Sync>;

pub(crate) type BuildFn =
  Box<dyn Fn(&Container, &FieldAliases) -> Result<Erased, ResolveError> + Send + Sync>;

/// Whether a binding builds its values or hands out a registered one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProducerKind {
  Factory,
  Instance,
}

impl fmt::Display for ProducerKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProducerKind::Factory => f.write_str("factory"),
      ProducerKind::Instance => f.write_str("instance"),
    }
  }
}

pub(crate) enum Producer {
  Factory {
    params: Vec<TypeKey>,
    implementation: TypeKey,
    invoke: BuildFn,
  },
  Instance {
    implementation: TypeKey,
    take: BuildFn,
  },
}

impl Producer {
  pub(crate) fn kind(&self) -> ProducerKind {
    match self {
      Producer::Factory { .. } => ProducerKind::Factory,
      Producer::Instance { .. } => ProducerKind::Instance,
    }
  }

  pub(crate) fn implementation(&self) -> TypeKey {
    match self {
      Producer::Factory { implementation, .. } | Producer::Instance { implementation, .. } => {
        *implementation
      }
    }
  }

  pub(crate) fn params(&self) -> &[TypeKey] {
    match self {
      Producer::Factory { params, .. } => params,
      Producer::Instance { .. } => &[],
    }
  }

  fn build(&self) -> &BuildFn {
    match self {
      Producer::Factory { invoke, .. } => invoke,
      Producer::Instance { take, .. } => take,
    }
  }
}

pub(crate) struct Descriptor {
  pub(crate) id: DescriptorId,
  pub(crate) abstraction: TypeKey,
  pub(crate) alias: String,
  pub(crate) lifecycle: Lifecycle,
  pub(crate) field_aliases: FieldAliases,
  pub(crate) producer: Producer,
  cached: OnceCell<Erased>,
}

impl Descriptor {
  pub(crate) fn new(
    abstraction: TypeKey,
    alias: String,
    lifecycle: Lifecycle,
    field_aliases: FieldAliases,
    producer: Producer,
  ) -> Self {
    Self {
      id: DescriptorId::next(),
      abstraction,
      alias,
      lifecycle,
      field_aliases,
      producer,
      cached: OnceCell::new(),
    }
  }

  /// Two descriptors of one abstraction clash when they share the alias and
  /// the producer type. A factory's type is its signature (the parameter
  /// abstractions), so two factories with the same parameters clash even if
  /// they build different concrete types. An instance's type is its concrete
  /// type.
  pub(crate) fn conflicts_with(&self, other: &Descriptor) -> bool {
    if self.alias != other.alias {
      return false;
    }
    match (&self.producer, &other.producer) {
      (Producer::Factory { params: ours, .. }, Producer::Factory { params: theirs, .. }) => {
        ours == theirs
      }
      (
        Producer::Instance { implementation: ours, .. },
        Producer::Instance { implementation: theirs, .. },
      ) => ours == theirs,
      _ => false,
    }
  }

  /// Instances are built at most once no matter the declared lifecycle.
  pub(crate) fn is_cached(&self) -> bool {
    self.lifecycle == Lifecycle::Singleton || self.producer.kind() == ProducerKind::Instance
  }

  pub(crate) fn cached(&self) -> Option<&Erased> {
    self.cached.get()
  }

  /// Returns the cached value, building and storing it on first use.
  ///
  /// Concurrent first calls block on the cell, so the producer runs once.
  pub(crate) fn get_or_init(&self, container: &Container) -> Result<&Erased, ResolveError> {
    self.cached.get_or_try_init(|| {
      tracing::trace!(
        target: "fibre_inject",
        abstraction = %self.abstraction,
        alias = %self.alias,
        implementation = %self.producer.implementation(),
        "instantiating singleton"
      );
      self.create(container)
    })
  }

  pub(crate) fn create(&self, container: &Container) -> Result<Erased, ResolveError> {
    (self.producer.build())(container, &self.field_aliases)
  }

  pub(crate) fn info(&self) -> DescriptorInfo {
    DescriptorInfo {
      abstraction: self.abstraction.name(),
      alias: self.alias.clone(),
      lifecycle: self.lifecycle,
      producer: self.producer.kind(),
      implementation: self.producer.implementation().name(),
      dependencies: self.producer.params().iter().map(TypeKey::name).collect(),
      instantiated: self.cached.get().is_some(),
    }
  }
}

/// A snapshot of one registration, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptorInfo {
  pub abstraction: &'static str,
  pub alias: String,
  pub lifecycle: Lifecycle,
  pub producer: ProducerKind,
  pub implementation: &'static str,
  /// Abstractions the factory takes as parameters, in order.
  pub dependencies: Vec<&'static str>,
  /// The cached instance exists. Always `false` for transient factories.
  pub instantiated: bool,
}

impl fmt::Display for DescriptorInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} [alias '{}'] -> {} ({} {})",
      self.abstraction, self.alias, self.implementation, self.lifecycle, self.producer
    )
  }
}
