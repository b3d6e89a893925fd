//! # Fibre Inject
//!
//! A runtime dependency injection container for Rust.
//!
//! Bindings map an *abstraction* (a `dyn Trait` declared with
//! [`abstraction!`]) to a producer: either a factory whose parameters are
//! themselves abstractions, or a pre-built instance. Resolution walks the
//! dependency graph on demand, honouring each binding's [`Lifecycle`] and
//! populating abstraction-typed fields of the produced values.
//!
//! ## Core Concepts
//!
//! - **Container**: the registry of bindings plus the resolver. Create one per
//!   composition root with [`Container::new`], or use [`global()`].
//! - **Alias**: a string distinguishing several bindings of one abstraction.
//!   The empty alias is the default binding.
//! - **Lifecycle**: singletons are built once and cached; transients are built
//!   on every resolution.
//! - **Field injection**: types implementing [`Injectable`] declare which of
//!   their fields the container fills in after construction.
//! - **Two severities**: registration mistakes are [`ConfigError`]s returned to
//!   bootstrap code; resolution failures are logged through `tracing` and
//!   degrade to `None`.
//!
//! ## Quick Start
//!
//! ```
//! use fibre_inject::{abstraction, Container, FieldInjector, Injectable};
//! use std::sync::Arc;
//!
//! trait Logger: Send + Sync {
//!   fn prefix(&self) -> &str;
//! }
//!
//! trait Service: Send + Sync {
//!   fn run(&self) -> String;
//! }
//!
//! struct ConsoleLogger;
//! impl Logger for ConsoleLogger {
//!   fn prefix(&self) -> &str { "console" }
//! }
//! impl Injectable for ConsoleLogger {}
//!
//! struct Worker {
//!   logger: Arc<dyn Logger>,
//!   audit: Option<Arc<dyn Logger>>,
//! }
//! impl Service for Worker {
//!   fn run(&self) -> String {
//!     let audit = self.audit.as_ref().map_or("none", |audit| audit.prefix());
//!     format!("{} / {}", self.logger.prefix(), audit)
//!   }
//! }
//! impl Injectable for Worker {
//!   fn inject(&mut self, fields: &mut FieldInjector<'_>) {
//!     fields.field("audit", &mut self.audit);
//!   }
//! }
//!
//! abstraction!(Logger: ConsoleLogger);
//! abstraction!(Service: Worker);
//!
//! fn main() -> Result<(), fibre_inject::ConfigError> {
//!   let container = Container::new();
//!   container.bind::<dyn Logger>().to_instance(ConsoleLogger)?;
//!   container
//!     .bind::<dyn Service>()
//!     .to_constructor(|logger: Arc<dyn Logger>| Worker { logger, audit: None })?;
//!
//!   let service = container.resolve::<dyn Service>("").expect("service is registered");
//!   assert_eq!(service.run(), "console / console");
//!   Ok(())
//! }
//! ```

mod abstraction;
mod binding;
mod container;
mod core;
mod descriptor;
mod error;
mod global;
mod injector;
mod instantiator;
mod macros;
mod registry;

pub use abstraction::{Abstraction, Factory, Implements};
pub use binding::{Bind, Binding, FieldAliases, Lifecycle};
pub use container::Container;
pub use descriptor::{DescriptorInfo, ProducerKind};
pub use error::{ConfigError, ResolveError};
pub use global::global;
pub use injector::{FieldInjector, Injectable};
