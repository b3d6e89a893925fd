//! Core, non-public data structures shared by the registry and the resolver.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

thread_local! {
  // Descriptors currently being built on this thread. Re-entering one of
  // them means the binding graph contains a cycle.
  static RESOLVING_STACK: RefCell<HashSet<DescriptorId>> = RefCell::new(HashSet::new());
}

/// Process-wide identity of a type, used as the binding key.
///
/// Two keys are equal iff their `TypeId`s are equal. The type name is kept
/// only so diagnostics can say which type was involved.
#[doc(hidden)]
#[derive(Clone, Copy)]
pub struct TypeKey {
  type_id: TypeId,
  name: &'static str,
}

impl TypeKey {
  pub(crate) fn of<T: ?Sized + Any>() -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      name: std::any::type_name::<T>(),
    }
  }

  pub(crate) fn name(&self) -> &'static str {
    self.name
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Key({})", self.name)
  }
}

impl fmt::Display for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name)
  }
}

/// Unique identity of one registered descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct DescriptorId(u64);

impl DescriptorId {
  pub(crate) fn next() -> Self {
    static NEXT_ID: AtomicU64 = AtomicU64::new(0);
    Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
  }
}

/// An RAII guard marking a descriptor as "being built" on the current thread.
///
/// `enter` returns `None` when the descriptor is already on the stack, i.e.
/// the binding graph is cyclic. Dropping the guard pops the descriptor again,
/// including when a producer unwinds.
pub(crate) struct ResolutionGuard {
  id: DescriptorId,
}

impl ResolutionGuard {
  pub(crate) fn enter(id: DescriptorId) -> Option<Self> {
    let inserted = RESOLVING_STACK.with(|stack| stack.borrow_mut().insert(id));
    inserted.then_some(Self { id })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().remove(&self.id);
    });
  }
}
