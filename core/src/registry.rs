//! Option registry.
//!
//! Specs live in an arena and are addressed by [`OptionId`]; a separate
//! flag index resolves command-line flags. Every configuration check runs
//! in [`OptionRegistry::add`], so a registry that exists is a valid one.

use std::collections::HashMap;
use std::ops::Index;

use serde::Serialize;

use crate::error::ConfigError;
use crate::flag::Flag;
use crate::spec::{OptionSpec, Placeholder};

/// Handle to an option registered in an [`OptionRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OptionId(usize);

impl OptionId {
    /// Registration index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Registered options, in registration order.
///
/// # Examples
///
/// ```
/// use optparse_core::{ConfigError, OptionRegistry, OptionSpec};
///
/// let mut registry = OptionRegistry::new();
/// let format = registry.add(OptionSpec::new(["f", "format"]).unwrap()).unwrap();
/// assert_eq!(registry.find("--format"), Some(format));
///
/// let clash = registry.add(OptionSpec::new(["f"]).unwrap());
/// assert_eq!(clash, Err(ConfigError::DuplicateFlag("f".to_string())));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    specs: Vec<OptionSpec>,
    by_flag: HashMap<Flag, OptionId>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and registers an option.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::PlaceholderCount`] if a placeholder list does not
    ///   match the parameter count.
    /// - [`ConfigError::DuplicateFlag`] if any flag is already registered,
    ///   or repeated within `spec`.
    ///
    /// The registry is unchanged when an error is returned.
    pub fn add(&mut self, spec: OptionSpec) -> Result<OptionId, ConfigError> {
        if let Some(contract) = spec.parameter() {
            if let Some(Placeholder::List(labels)) = contract.placeholder() {
                if labels.len() != contract.arity() {
                    return Err(ConfigError::PlaceholderCount {
                        option: spec.primary_flag().to_string(),
                        labels: labels.len(),
                        arity: contract.arity(),
                    });
                }
            }
        }

        for (i, flag) in spec.flags().iter().enumerate() {
            if self.by_flag.contains_key(flag) || spec.flags()[..i].contains(flag) {
                return Err(ConfigError::DuplicateFlag(flag.name()));
            }
        }

        Ok(self.insert(spec))
    }

    /// Registers without checks; for specs built by this crate.
    pub(crate) fn insert(&mut self, spec: OptionSpec) -> OptionId {
        let id = OptionId(self.specs.len());
        for flag in spec.flags() {
            self.by_flag.insert(flag.clone(), id);
        }
        self.specs.push(spec);
        id
    }

    pub fn get(&self, id: OptionId) -> Option<&OptionSpec> {
        self.specs.get(id.0)
    }

    /// Resolves a flag to its option.
    ///
    /// A long flag with a one-letter name (`--s`) resolves to the short flag
    /// of that letter; such long flags cannot be declared.
    pub fn lookup(&self, flag: &Flag) -> Option<OptionId> {
        if let Some(id) = self.by_flag.get(flag) {
            return Some(*id);
        }
        match flag {
            Flag::Long(name) => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => {
                        self.by_flag.get(&Flag::Short(c)).copied()
                    }
                    _ => None,
                }
            }
            Flag::Short(_) => None,
        }
    }

    /// Resolves a flag given as text, with or without its marker.
    pub fn find(&self, flag: &str) -> Option<OptionId> {
        Flag::from_written(flag).and_then(|flag| self.lookup(&flag))
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &OptionSpec)> {
        self.specs
            .iter()
            .enumerate()
            .map(|(i, spec)| (OptionId(i), spec))
    }

    /// Mandatory options, in registration order.
    pub fn required(&self) -> impl Iterator<Item = (OptionId, &OptionSpec)> {
        self.iter().filter(|(_, spec)| spec.is_required())
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Index<OptionId> for OptionRegistry {
    type Output = OptionSpec;

    fn index(&self, id: OptionId) -> &OptionSpec {
        &self.specs[id.0]
    }
}
