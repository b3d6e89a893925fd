//! Public macros for declaring abstractions and resolving required services.

/// Declares `dyn Trait` as an [`Abstraction`](crate::Abstraction), optionally
/// together with the concrete types that implement it.
///
/// The trait must have `Send + Sync` as supertraits.
///
/// # Examples
///
/// ```
/// use fibre_inject::{abstraction, Abstraction, Implements};
///
/// trait Store: Send + Sync {}
/// struct MemoryStore;
/// impl Store for MemoryStore {}
///
/// abstraction!(Store: MemoryStore);
///
/// fn assert_abstraction<A: ?Sized + Abstraction>() {}
/// fn assert_implements<S: Implements<dyn Store>>() {}
/// assert_abstraction::<dyn Store>();
/// assert_implements::<MemoryStore>();
/// ```
#[macro_export]
macro_rules! abstraction {
  ($trait_ident:ident) => {
    impl $crate::Abstraction for dyn $trait_ident {}
  };

  ($trait_ident:ident : $($implementation:ty),+ $(,)?) => {
    $crate::abstraction!($trait_ident);
    $crate::implements!($trait_ident : $($implementation),+);
  };
}

/// Declares concrete types as implementations of an abstraction declared
/// elsewhere with [`abstraction!`](crate::abstraction).
#[macro_export]
macro_rules! implements {
  ($trait_ident:ident : $($implementation:ty),+ $(,)?) => {
    $(
      impl $crate::Implements<dyn $trait_ident> for $implementation {
        fn upcast(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<dyn $trait_ident> {
          self
        }
      }
    )+
  };
}

/// Resolves a required service from the global container.
///
/// Unlike [`Container::resolve`](crate::Container::resolve), a missing
/// binding is not survivable here: the macro panics.
///
/// # Panics
///
/// If the service cannot be resolved.
///
/// # Examples
///
/// ```
/// use fibre_inject::{abstraction, global, resolve, Injectable};
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
/// impl Injectable for EnglishGreeter {}
/// abstraction!(Greeter: EnglishGreeter);
///
/// global().bind::<dyn Greeter>().named("english").to_constructor(|| EnglishGreeter).unwrap();
///
/// let greeter = resolve!(trait Greeter, "english");
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
  (trait $trait_ident:ident) => {
    $crate::resolve_from!($crate::global(), trait $trait_ident)
  };

  (trait $trait_ident:ident, $alias:expr) => {
    $crate::resolve_from!($crate::global(), trait $trait_ident, $alias)
  };
}

/// Resolves a required service from an explicit container.
///
/// # Panics
///
/// If the service cannot be resolved.
#[macro_export]
macro_rules! resolve_from {
  ($container:expr, trait $trait_ident:ident) => {
    $crate::resolve_from!($container, trait $trait_ident, "")
  };

  ($container:expr, trait $trait_ident:ident, $alias:expr) => {
    match $container.try_resolve::<dyn $trait_ident>($alias) {
      Ok(service) => service,
      Err(error) => panic!(
        "Failed to resolve required trait service {}: {}",
        ::std::any::type_name::<dyn $trait_ident>(),
        error
      ),
    }
  };
}
