//! Machine configuration: the assembled root node.

use crate::assemble::{Assembler, AssemblyError, AssemblyOptions};
use crate::core::{Fragment, StateNode};
use serde::Serialize;
use serde_json::Value;

/// Root configuration node, ready for the statechart interpreter.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MachineConfig {
    root: StateNode,
}

impl MachineConfig {
    pub fn root(&self) -> &StateNode {
        &self.root
    }

    pub fn into_root(self) -> StateNode {
        self.root
    }

    /// Render the configuration in the interpreter's wire shape.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

/// Assemble a machine from its root fragments with default options.
pub fn create_machine(fragments: Vec<Fragment>) -> Result<MachineConfig, AssemblyError> {
    create_machine_with(AssemblyOptions::default(), fragments)
}

/// Assemble a machine from its root fragments.
///
/// The options govern the root node only; nested states are assembled by
/// their own builders.
pub fn create_machine_with(
    options: AssemblyOptions,
    fragments: Vec<Fragment>,
) -> Result<MachineConfig, AssemblyError> {
    let root = Assembler::new(options).assemble(fragments)?;
    Ok(MachineConfig { root })
}

/// Builder collecting root fragments with a fluent API.
#[derive(Debug, Default)]
pub struct MachineBuilder {
    options: AssemblyOptions,
    fragments: Vec<Fragment>,
}

impl MachineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the assembly options (optional).
    pub fn options(mut self, options: AssemblyOptions) -> Self {
        self.options = options;
        self
    }

    /// Add one root fragment.
    pub fn fragment(mut self, fragment: impl Into<Fragment>) -> Self {
        self.fragments.push(fragment.into());
        self
    }

    /// Add a builder result, propagating its error.
    pub fn try_fragment(self, fragment: Result<Fragment, AssemblyError>) -> Result<Self, AssemblyError> {
        Ok(self.fragment(fragment?))
    }

    /// Add multiple fragments at once.
    pub fn fragments(mut self, fragments: Vec<Fragment>) -> Self {
        self.fragments.extend(fragments);
        self
    }

    /// Build the machine configuration.
    pub fn build(self) -> Result<MachineConfig, AssemblyError> {
        create_machine_with(self.options, self.fragments)
    }
}
