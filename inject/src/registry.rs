//! The binding table: abstraction -> descriptors in registration order.

use crate::core::TypeKey;
use crate::descriptor::Descriptor;
use crate::error::{ConfigError, ResolveError};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Lookups clone the matching `Arc<Descriptor>` out of the map, so no shard
/// lock is held while a producer runs and recursively resolves.
#[derive(Default)]
pub(crate) struct Registry {
  bindings: DashMap<TypeKey, Vec<Arc<Descriptor>>>,
  all: RwLock<Vec<Arc<Descriptor>>>,
}

impl Registry {
  pub(crate) fn add(&self, descriptor: Descriptor) -> Result<(), ConfigError> {
    let descriptor = Arc::new(descriptor);
    {
      let mut entry = self.bindings.entry(descriptor.abstraction).or_default();
      if entry.iter().any(|existing| existing.conflicts_with(&descriptor)) {
        return Err(ConfigError::Duplicate {
          abstraction: descriptor.abstraction.name(),
          alias: descriptor.alias.clone(),
          implementation: descriptor.producer.implementation().name(),
        });
      }
      entry.push(Arc::clone(&descriptor));
    }
    self.all.write().push(descriptor);
    Ok(())
  }

  /// The descriptor registered for `key` under exactly `alias`.
  ///
  /// With several descriptors sharing the alias the earliest one wins.
  pub(crate) fn find(&self, key: &TypeKey, alias: &str) -> Result<Arc<Descriptor>, ResolveError> {
    let descriptors = self.bindings.get(key).ok_or(ResolveError::NotRegistered {
      abstraction: key.name(),
    })?;
    descriptors
      .iter()
      .find(|descriptor| descriptor.alias == alias)
      .cloned()
      .ok_or_else(|| ResolveError::AliasNotFound {
        abstraction: key.name(),
        alias: alias.to_owned(),
      })
  }

  /// The latest unnamed descriptor for `key`, otherwise the earliest
  /// registered one. Used for dependencies that carry no alias.
  pub(crate) fn default_or_first(&self, key: &TypeKey) -> Result<Arc<Descriptor>, ResolveError> {
    let descriptors = self.bindings.get(key).ok_or(ResolveError::NotRegistered {
      abstraction: key.name(),
    })?;
    descriptors
      .iter()
      .rev()
      .find(|descriptor| descriptor.alias.is_empty())
      .or_else(|| descriptors.first())
      .cloned()
      .ok_or(ResolveError::NotRegistered {
        abstraction: key.name(),
      })
  }

  /// Every descriptor of `key`, in registration order.
  pub(crate) fn all_of(&self, key: &TypeKey) -> Vec<Arc<Descriptor>> {
    self
      .bindings
      .get(key)
      .map(|descriptors| descriptors.value().clone())
      .unwrap_or_default()
  }

  pub(crate) fn contains(&self, key: &TypeKey, alias: Option<&str>) -> bool {
    self.bindings.get(key).is_some_and(|descriptors| match alias {
      Some(alias) => descriptors.iter().any(|descriptor| descriptor.alias == alias),
      None => !descriptors.is_empty(),
    })
  }

  /// Every descriptor of every abstraction, in registration order.
  pub(crate) fn snapshot(&self) -> Vec<Arc<Descriptor>> {
    self.all.read().clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::binding::{FieldAliases, Lifecycle};
  use crate::container::Container;
  use crate::descriptor::{BuildFn, Erased, Producer};

  trait Reader: Send + Sync {}
  struct FileReader;
  struct NetReader;

  fn factory<S: 'static>(alias: &str) -> Descriptor {
    let invoke: BuildFn = Box::new(|_: &Container, _: &FieldAliases| {
      let value: Erased = Box::new(Arc::new(()));
      Ok(value)
    });
    Descriptor::new(
      TypeKey::of::<dyn Reader>(),
      alias.to_owned(),
      Lifecycle::Singleton,
      FieldAliases::new(),
      Producer::Factory {
        params: Vec::new(),
        implementation: TypeKey::of::<S>(),
        invoke,
      },
    )
  }

  fn instance<S: 'static>(alias: &str) -> Descriptor {
    let take: BuildFn = Box::new(|_: &Container, _: &FieldAliases| {
      let value: Erased = Box::new(Arc::new(()));
      Ok(value)
    });
    Descriptor::new(
      TypeKey::of::<dyn Reader>(),
      alias.to_owned(),
      Lifecycle::Singleton,
      FieldAliases::new(),
      Producer::Instance {
        implementation: TypeKey::of::<S>(),
        take,
      },
    )
  }

  fn reader_key() -> TypeKey {
    TypeKey::of::<dyn Reader>()
  }

  #[test]
  fn duplicate_alias_and_implementation_is_rejected() {
    let registry = Registry::default();
    registry.add(factory::<FileReader>("")).unwrap();

    let err = registry.add(factory::<FileReader>("")).unwrap_err();

    assert!(matches!(err, ConfigError::Duplicate { ref alias, .. } if alias.is_empty()));
    assert_eq!(registry.all_of(&reader_key()).len(), 1);
    assert_eq!(registry.snapshot().len(), 1);
  }

  #[test]
  fn same_implementation_under_distinct_aliases_is_allowed() {
    let registry = Registry::default();
    registry.add(factory::<FileReader>("a")).unwrap();
    registry.add(factory::<FileReader>("b")).unwrap();

    assert_eq!(registry.all_of(&reader_key()).len(), 2);
  }

  #[test]
  fn default_or_first_prefers_the_unnamed_binding() {
    let registry = Registry::default();
    registry.add(factory::<NetReader>("b")).unwrap();
    registry.add(factory::<FileReader>("")).unwrap();

    let chosen = registry.default_or_first(&reader_key()).unwrap();

    assert_eq!(chosen.alias, "");
  }

  #[test]
  fn default_or_first_picks_the_latest_unnamed_binding() {
    let registry = Registry::default();
    registry.add(factory::<FileReader>("")).unwrap();
    registry.add(factory::<FileReader>("named")).unwrap();
    registry.add(instance::<NetReader>("")).unwrap();

    let for_parameter = registry.default_or_first(&reader_key()).unwrap();
    let by_alias = registry.find(&reader_key(), "").unwrap();

    assert_eq!(for_parameter.producer.implementation(), TypeKey::of::<NetReader>());
    assert_eq!(by_alias.producer.implementation(), TypeKey::of::<FileReader>());
  }

  #[test]
  fn factories_with_the_same_signature_are_duplicates() {
    let registry = Registry::default();
    registry.add(factory::<FileReader>("")).unwrap();

    let err = registry.add(factory::<NetReader>("")).unwrap_err();

    assert!(matches!(err, ConfigError::Duplicate { .. }));
    assert_eq!(registry.snapshot().len(), 1);
  }

  #[test]
  fn default_or_first_falls_back_to_the_earliest_registration() {
    let registry = Registry::default();
    registry.add(factory::<NetReader>("first")).unwrap();
    registry.add(factory::<FileReader>("second")).unwrap();

    let chosen = registry.default_or_first(&reader_key()).unwrap();

    assert_eq!(chosen.alias, "first");
  }

  #[test]
  fn find_distinguishes_missing_abstraction_from_missing_alias() {
    let registry = Registry::default();
    assert!(matches!(
      registry.find(&reader_key(), ""),
      Err(ResolveError::NotRegistered { .. })
    ));

    registry.add(factory::<FileReader>("a")).unwrap();

    assert!(matches!(
      registry.find(&reader_key(), "zzz"),
      Err(ResolveError::AliasNotFound { ref alias, .. }) if alias == "zzz"
    ));
    assert!(registry.find(&reader_key(), "a").is_ok());
  }

  #[test]
  fn contains_checks_alias_when_given() {
    let registry = Registry::default();
    registry.add(factory::<FileReader>("a")).unwrap();

    assert!(registry.contains(&reader_key(), None));
    assert!(registry.contains(&reader_key(), Some("a")));
    assert!(!registry.contains(&reader_key(), Some("")));
    assert!(!registry.contains(&TypeKey::of::<String>(), None));
  }
}
