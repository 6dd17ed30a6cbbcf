//! Registration of native extension libraries into the CEL runtime
//!
//! A [`Library`] contributes a namespace identifier and a set of member functions to
//! every evaluation context. Libraries are collected by an [`EngineBuilder`] when the
//! engine is constructed; conflicting definitions are rejected there so that a
//! misconfiguration never shows up for the first time in the middle of a policy run.
//! The resulting [`Engine`] is immutable and hands out a fresh [`Context`] per
//! evaluation, so it can be shared freely between concurrent evaluations.

use super::yaml::YamlLibrary;
use crate::error::ConfigurationError;
use cel_interpreter::Context;
use core::fmt::Debug;
use std::sync::Arc;

const LOG_TARGET: &str = "    engine";

/// A native extension made callable from expressions.
pub trait Library: Debug + Send + Sync {
    /// Namespace-qualified name of the type the library exposes, e.g. `yaml.Yaml`.
    fn type_name(&self) -> &'static str;

    /// Identifier under which the library is reachable in expressions, e.g. `yaml`.
    fn namespace(&self) -> &'static str;

    /// Names of the member functions the library installs.
    fn functions(&self) -> &'static [&'static str];

    /// Bind the namespace identifier and functions into `context`.
    fn install(&self, context: &mut Context<'_>);
}

fn same_definition(a: &dyn Library, b: &dyn Library) -> bool {
    a.type_name() == b.type_name() && a.namespace() == b.namespace() && a.functions() == b.functions()
}

/// Collects libraries and checks them for conflicts.
#[derive(Debug, Default)]
pub struct EngineBuilder {
    libraries: Vec<Arc<dyn Library>>,
}

impl EngineBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a library.
    ///
    /// Registering a definition identical to one already present is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::ConflictingRegistration`] if the library's type name,
    /// namespace or any of its functions is already claimed by a different definition.
    pub fn register(mut self, library: Arc<dyn Library>) -> Result<Self, ConfigurationError> {
        for existing in &self.libraries {
            if same_definition(existing.as_ref(), library.as_ref()) {
                log::debug!(target: LOG_TARGET, "Library '{}' is already registered", library.type_name());
                return Ok(self);
            }

            if existing.namespace() == library.namespace() {
                return Err(conflict(library.namespace(), existing.as_ref(), library.as_ref()));
            }

            if existing.type_name() == library.type_name() {
                return Err(conflict(library.type_name(), existing.as_ref(), library.as_ref()));
            }

            if let Some(function) = library.functions().iter().find(|f| existing.functions().contains(*f)) {
                return Err(conflict(function, existing.as_ref(), library.as_ref()));
            }
        }

        log::debug!(target: LOG_TARGET, "Registering library '{}' as '{}'", library.type_name(), library.namespace());
        self.libraries.push(library);
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> Engine {
        Engine {
            libraries: self.libraries.into(),
        }
    }
}

fn conflict(name: &str, existing: &dyn Library, requested: &dyn Library) -> ConfigurationError {
    ConfigurationError::ConflictingRegistration {
        name: name.to_string(),
        existing: existing.type_name().to_string(),
        requested: requested.type_name().to_string(),
    }
}

/// The set of libraries every evaluation sees.
#[derive(Debug, Clone)]
pub struct Engine {
    libraries: Arc<[Arc<dyn Library>]>,
}

impl Engine {
    /// An engine with every built-in library registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in libraries conflict with one another.
    pub fn with_builtin_libraries() -> Result<Self, ConfigurationError> {
        Ok(EngineBuilder::new().register(Arc::new(YamlLibrary))?.build())
    }

    /// A new evaluation context with every library installed.
    #[must_use]
    pub fn context(&self) -> Context<'static> {
        let mut context = Context::default();
        for library in self.libraries.iter() {
            library.install(&mut context);
        }
        context
    }

    /// Look up a registered library by its qualified type name.
    #[must_use]
    pub fn library(&self, type_name: &str) -> Option<&dyn Library> {
        self.libraries.iter().find(|l| l.type_name() == type_name).map(AsRef::as_ref)
    }

    pub fn libraries(&self) -> impl Iterator<Item = &dyn Library> {
        self.libraries.iter().map(AsRef::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cel_interpreter::{Program, Value};

    #[derive(Debug)]
    struct FakeLibrary {
        type_name: &'static str,
        namespace: &'static str,
        functions: &'static [&'static str],
    }

    impl Library for FakeLibrary {
        fn type_name(&self) -> &'static str {
            self.type_name
        }

        fn namespace(&self) -> &'static str {
            self.namespace
        }

        fn functions(&self) -> &'static [&'static str] {
            self.functions
        }

        fn install(&self, context: &mut Context<'_>) {
            context.add_variable_from_value(self.namespace, Value::String(Arc::new(self.type_name.to_string())));
        }
    }

    fn fake(type_name: &'static str, namespace: &'static str, functions: &'static [&'static str]) -> Arc<dyn Library> {
        Arc::new(FakeLibrary {
            type_name,
            namespace,
            functions,
        })
    }

    #[test]
    fn test_builtin_engine_has_yaml() {
        let engine = Engine::with_builtin_libraries().unwrap();
        let yaml = engine.library("yaml.Yaml").unwrap();
        assert_eq!(yaml.namespace(), "yaml");
        assert_eq!(engine.libraries().count(), 1);
    }

    #[test]
    fn test_identical_registration_is_noop() {
        let engine = EngineBuilder::new()
            .register(Arc::new(YamlLibrary))
            .unwrap()
            .register(Arc::new(YamlLibrary))
            .unwrap()
            .build();
        assert_eq!(engine.libraries().count(), 1);
    }

    #[test]
    fn test_namespace_conflict() {
        let err = EngineBuilder::new()
            .register(Arc::new(YamlLibrary))
            .unwrap()
            .register(fake("other.Yaml", "yaml", &["load"]))
            .unwrap_err();

        assert_eq!(
            err,
            ConfigurationError::ConflictingRegistration {
                name: "yaml".to_string(),
                existing: "yaml.Yaml".to_string(),
                requested: "other.Yaml".to_string(),
            }
        );
    }

    #[test]
    fn test_type_name_conflict() {
        let err = EngineBuilder::new()
            .register(Arc::new(YamlLibrary))
            .unwrap()
            .register(fake("yaml.Yaml", "yml", &["load"]))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::ConflictingRegistration { name, .. } if name == "yaml.Yaml"));
    }

    #[test]
    fn test_function_conflict() {
        let err = EngineBuilder::new()
            .register(Arc::new(YamlLibrary))
            .unwrap()
            .register(fake("json.Json", "json", &["parse"]))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::ConflictingRegistration { name, .. } if name == "parse"));
    }

    #[test]
    fn test_disjoint_libraries_coexist() {
        let engine = EngineBuilder::new()
            .register(Arc::new(YamlLibrary))
            .unwrap()
            .register(fake("toy.Toy", "toy", &["spin"]))
            .unwrap()
            .build();
        assert_eq!(engine.libraries().count(), 2);

        let context = engine.context();
        let program = Program::compile("toy == 'toy.Toy' && yaml == 'yaml.Yaml'").unwrap();
        assert_eq!(program.execute(&context).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
