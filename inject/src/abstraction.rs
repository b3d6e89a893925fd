//! Type-level contracts for abstractions, their implementations and factories.

use crate::container::Container;
use crate::core::TypeKey;
use crate::error::ResolveError;
use std::any::Any;
use std::sync::Arc;

/// Marks a capability type (normally `dyn Trait`) that bindings are keyed by.
///
/// Only abstractions can be registered, requested as factory parameters, or
/// declared as injectable fields. Use the [`abstraction!`](crate::abstraction)
/// macro rather than implementing this by hand.
pub trait Abstraction: Any + Send + Sync {}

/// A concrete type that can be served as the abstraction `A`.
///
/// The single method performs the unsizing coercion `Arc<Self> -> Arc<A>`,
/// which stable Rust cannot express generically.
pub trait Implements<A: ?Sized + Abstraction>: Send + Sync + 'static {
  fn upcast(self: Arc<Self>) -> Arc<A>;
}

/// A constructor whose every parameter is an abstraction.
///
/// Implemented for `Fn(Arc<P1>, .., Arc<Pn>) -> S` closures and functions with
/// up to eight parameters. Parameters carry no alias, so each one is resolved
/// to the latest unnamed binding of its abstraction, or the earliest
/// registered one.
pub trait Factory<Args, S>: Send + Sync + 'static {
  #[doc(hidden)]
  fn param_keys(&self) -> Vec<TypeKey>;

  #[doc(hidden)]
  fn call(&self, container: &Container) -> Result<S, ResolveError>;
}

macro_rules! impl_factory {
  ($($param:ident),*) => {
    impl<F, S, $($param,)*> Factory<($(Arc<$param>,)*), S> for F
    where
      F: Fn($(Arc<$param>),*) -> S + Send + Sync + 'static,
      $($param: ?Sized + Abstraction,)*
    {
      fn param_keys(&self) -> Vec<TypeKey> {
        vec![$(TypeKey::of::<$param>()),*]
      }

      #[allow(non_snake_case, unused_variables)]
      fn call(&self, container: &Container) -> Result<S, ResolveError> {
        $(let $param = container.resolve_default_or_first::<$param>()?;)*
        Ok((self)($($param),*))
      }
    }
  };
}

impl_factory!();
impl_factory!(P1);
impl_factory!(P1, P2);
impl_factory!(P1, P2, P3);
impl_factory!(P1, P2, P3, P4);
impl_factory!(P1, P2, P3, P4, P5);
impl_factory!(P1, P2, P3, P4, P5, P6);
impl_factory!(P1, P2, P3, P4, P5, P6, P7);
impl_factory!(P1, P2, P3, P4, P5, P6, P7, P8);
