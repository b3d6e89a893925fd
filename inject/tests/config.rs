//! Binding options read from configuration (requires the `serde` feature).

use fibre_inject::{abstraction, Binding, Container, FieldInjector, Injectable, Lifecycle};
use pretty_assertions::assert_eq;
use std::sync::Arc;

trait Store: Send + Sync {
  fn name(&self) -> String;
}

struct NamedStore(&'static str);
impl Store for NamedStore {
  fn name(&self) -> String {
    self.0.to_string()
  }
}
impl Injectable for NamedStore {}

struct CachedStore {
  backing: Option<Arc<dyn Store>>,
}
impl Store for CachedStore {
  fn name(&self) -> String {
    format!("cached({})", self.backing.as_ref().map_or("-".to_string(), |store| store.name()))
  }
}
impl Injectable for CachedStore {
  fn inject(&mut self, fields: &mut FieldInjector<'_>) {
    fields.field("backing", &mut self.backing);
  }
}

abstraction!(Store: NamedStore, CachedStore);

#[test]
fn test_binding_deserializes_from_yaml() {
  let yaml = r#"
alias: cache
lifecycle: transient
field_aliases:
  backing: replica
"#;

  let binding: Binding = serde_yaml::from_str(yaml).unwrap();

  assert_eq!(
    binding,
    Binding::named("cache")
      .transient()
      .field_alias("backing", "replica")
  );
}

#[test]
fn test_missing_keys_fall_back_to_defaults() {
  let binding: Binding = serde_yaml::from_str("alias: only").unwrap();

  assert_eq!(binding.lifecycle, Lifecycle::Singleton);
  assert!(binding.field_aliases.is_empty());
}

#[test]
fn test_configured_binding_drives_registration() {
  // Arrange
  let binding: Binding = serde_yaml::from_str(
    "alias: cache\nlifecycle: transient\nfield_aliases:\n  backing: replica\n",
  )
  .unwrap();
  let container = Container::new();
  container.bind::<dyn Store>().to_instance(NamedStore("primary")).unwrap();
  container
    .bind::<dyn Store>()
    .named("replica")
    .to_instance(NamedStore("replica"))
    .unwrap();
  container
    .bind::<dyn Store>()
    .with(binding)
    .to_constructor(|| CachedStore { backing: None })
    .unwrap();

  // Act
  let first = container.resolve::<dyn Store>("cache").unwrap();
  let second = container.resolve::<dyn Store>("cache").unwrap();

  // Assert
  assert_eq!(first.name(), "cached(replica)");
  assert!(!Arc::ptr_eq(&first, &second));
}

#[test]
fn test_lifecycle_serializes_lowercase() {
  assert_eq!(serde_yaml::to_string(&Lifecycle::Transient).unwrap().trim(), "transient");
}
