//! Post-construction injection of abstraction-typed fields.

use crate::abstraction::Abstraction;
use crate::binding::FieldAliases;
use crate::container::Container;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A value whose abstraction-typed fields the container can populate.
///
/// Each injectable field is an `Option<Arc<A>>` declared in [`inject`]. Fields
/// not declared there (concrete values, primitives, nested structs) are never
/// touched. The default body declares nothing, so types without injectable
/// fields only need an empty `impl`.
///
/// [`inject`]: Injectable::inject
///
/// # Examples
///
/// ```
/// use fibre_inject::{abstraction, Container, FieldInjector, Injectable};
/// use std::sync::Arc;
///
/// trait Clock: Send + Sync {
///   fn now(&self) -> u64;
/// }
/// struct FixedClock;
/// impl Clock for FixedClock {
///   fn now(&self) -> u64 { 42 }
/// }
/// impl Injectable for FixedClock {}
/// abstraction!(Clock: FixedClock);
///
/// #[derive(Default)]
/// struct Report {
///   title: String,
///   clock: Option<Arc<dyn Clock>>,
/// }
///
/// impl Injectable for Report {
///   fn inject(&mut self, fields: &mut FieldInjector<'_>) {
///     fields.field("clock", &mut self.clock);
///   }
/// }
///
/// let container = Container::new();
/// container.bind::<dyn Clock>().to_instance(FixedClock).unwrap();
///
/// let report: Report = container.resolve_struct();
/// assert_eq!(report.title, "");
/// assert_eq!(report.clock.unwrap().now(), 42);
/// ```
pub trait Injectable {
  fn inject(&mut self, fields: &mut FieldInjector<'_>) {
    let _ = fields;
  }
}

impl<T: Injectable + ?Sized> Injectable for Box<T> {
  fn inject(&mut self, fields: &mut FieldInjector<'_>) {
    (**self).inject(fields);
  }
}

/// Resolves the fields an [`Injectable`] declares.
///
/// The alias of a field comes from the registration's field aliases, then the
/// alias the type passes to [`field_with_alias`], then `""`. Fields are
/// resolved independently: a failure leaves that one slot `None` and is
/// logged, siblings are still populated.
///
/// [`field_with_alias`]: FieldInjector::field_with_alias
pub struct FieldInjector<'a> {
  container: &'a Container,
  aliases: &'a FieldAliases,
  target: &'static str,
  seen: BTreeSet<String>,
  resolved: usize,
  failed: usize,
}

impl<'a> FieldInjector<'a> {
  pub(crate) fn new(
    container: &'a Container,
    aliases: &'a FieldAliases,
    target: &'static str,
  ) -> Self {
    Self {
      container,
      aliases,
      target,
      seen: BTreeSet::new(),
      resolved: 0,
      failed: 0,
    }
  }

  /// Resolves `slot` under the default alias (unless overridden at registration).
  pub fn field<A: ?Sized + Abstraction>(
    &mut self,
    name: &str,
    slot: &mut Option<Arc<A>>,
  ) -> &mut Self {
    self.field_with_alias(name, "", slot)
  }

  /// Resolves `slot` under `alias` (unless overridden at registration).
  pub fn field_with_alias<A: ?Sized + Abstraction>(
    &mut self,
    name: &str,
    alias: &str,
    slot: &mut Option<Arc<A>>,
  ) -> &mut Self {
    self.seen.insert(name.to_owned());
    let alias = self.aliases.get(name).map_or(alias, String::as_str);

    *slot = self.container.resolve::<A>(alias);
    match slot {
      Some(_) => self.resolved += 1,
      None => self.failed += 1,
    }
    self
  }

  /// Reports what was injected and flags registration aliases for fields the
  /// type never declared.
  pub(crate) fn finish(self) {
    for field in self.aliases.keys().filter(|field| !self.seen.contains(*field)) {
      tracing::warn!(
        target: "fibre_inject",
        target_type = self.target,
        field = %field,
        "field alias configured for a field that is not injectable"
      );
    }
    tracing::trace!(
      target: "fibre_inject",
      target_type = self.target,
      resolved = self.resolved,
      failed = self.failed,
      "fields injected"
    );
  }
}
