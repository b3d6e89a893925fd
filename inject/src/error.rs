use thiserror::Error;

/// A binding that must never reach request-serving code.
///
/// Returned by every registration call. Callers are expected to propagate it
/// up to the bootstrap code, which decides whether to abort the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
  #[error("{abstraction} is already bound to {implementation} under alias '{alias}'")]
  Duplicate {
    abstraction: &'static str,
    alias: String,
    implementation: &'static str,
  },

  #[error("unnamed constructor for {abstraction} takes {abstraction} as a parameter")]
  SelfDependency { abstraction: &'static str },
}

/// Why a resolution produced no value.
///
/// `Container::resolve` logs these and returns `None`;
/// `Container::try_resolve` hands them to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  #[error("{abstraction} is not registered")]
  NotRegistered { abstraction: &'static str },

  #[error("{abstraction} is not registered under alias '{alias}'")]
  AliasNotFound {
    abstraction: &'static str,
    alias: String,
  },

  #[error("circular dependency detected while resolving {abstraction} (alias '{alias}')")]
  Cycle {
    abstraction: &'static str,
    alias: String,
  },

  #[error("cannot construct {abstraction}: {source}")]
  Dependency {
    abstraction: &'static str,
    #[source]
    source: Box<ResolveError>,
  },

  #[error("instance bound to {abstraction} was lost while it was being injected")]
  InstanceUnavailable { abstraction: &'static str },

  #[error("stored value for {abstraction} has an unexpected type")]
  TypeMismatch { abstraction: &'static str },
}
