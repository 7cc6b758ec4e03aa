//! The parsed model of an entity declaration.

use crate::generic::Generic;
use crate::signal::Signal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An entity's name, ports, and generics in declaration order.
///
/// `PartialEq` is structural. Use [`same_entity`](Interface::same_entity) to
/// ask whether two interfaces describe the same named entity.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct Interface {
    name: String,
    ports: Vec<Signal>,
    generics: Vec<Generic>,
}

impl Interface {
    /// Creates an interface with no ports or generics.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ports: Vec::new(),
            generics: Vec::new(),
        }
    }

    /// The entity name. Empty if the declaration never named one.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the entity name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Ports in declaration order.
    pub fn ports(&self) -> &[Signal] {
        &self.ports
    }

    /// Generics in declaration order.
    pub fn generics(&self) -> &[Generic] {
        &self.generics
    }

    /// Returns `true` if the entity declares at least one generic.
    pub fn has_generics(&self) -> bool {
        !self.generics.is_empty()
    }

    /// Appends a port after all existing ports.
    pub fn push_port(&mut self, port: Signal) {
        self.ports.push(port);
    }

    /// Appends a generic after all existing generics.
    pub fn push_generic(&mut self, generic: Generic) {
        self.generics.push(generic);
    }

    /// Looks up a port by exact name.
    pub fn port(&self, name: &str) -> Option<&Signal> {
        self.ports.iter().find(|p| p.name() == name)
    }

    /// Looks up a generic by exact name.
    pub fn generic(&self, name: &str) -> Option<&Generic> {
        self.generics.iter().find(|g| g.name() == name)
    }

    /// Marks the port at `index` as mapped. Returns `false` if out of range.
    pub fn mark_port_mapped(&mut self, index: usize) -> bool {
        match self.ports.get_mut(index) {
            Some(port) => {
                port.mark_mapped();
                true
            }
            None => false,
        }
    }

    /// Marks the generic at `index` as mapped. Returns `false` if out of range.
    pub fn mark_generic_mapped(&mut self, index: usize) -> bool {
        match self.generics.get_mut(index) {
            Some(generic) => {
                generic.mark_mapped();
                true
            }
            None => false,
        }
    }

    /// Returns `true` if both interfaces carry the same entity name.
    pub fn same_entity(&self, other: &Interface) -> bool {
        self.name == other.name
    }

    /// Returns `true` once every port and every generic is mapped.
    pub fn is_fully_wired(&self) -> bool {
        self.ports.iter().all(Signal::is_mapped) && self.generics.iter().all(Generic::is_mapped)
    }

    /// Names of ports that are not mapped, in declaration order.
    pub fn unmapped_ports(&self) -> impl Iterator<Item = &str> {
        self.ports.iter().filter(|p| !p.is_mapped()).map(Signal::name)
    }

    /// Names of generics that are not mapped, in declaration order.
    pub fn unmapped_generics(&self) -> impl Iterator<Item = &str> {
        self.generics
            .iter()
            .filter(|g| !g.is_mapped())
            .map(Generic::name)
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "entity {}", self.name)?;
        if self.has_generics() {
            writeln!(f, "  generics:")?;
            for generic in &self.generics {
                writeln!(f, "    {generic}")?;
            }
        }
        writeln!(f, "  ports:")?;
        for port in &self.ports {
            writeln!(f, "    {port}")?;
        }
        Ok(())
    }
}
