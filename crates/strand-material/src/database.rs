//! Material database with named rod presets.
//!
//! The built-in presets cover a stiff metal wire, a superelastic alloy,
//! a soft elastomer, muscle-like tissue, and the very soft demonstration
//! material used by the butterfly scenario.

use std::collections::HashMap;

use crate::properties::RodMaterial;

/// A named collection of rod material presets.
///
/// Materials are looked up by name (e.g., "steel", "soft_tissue").
/// Custom materials can be registered at runtime.
#[derive(Debug, Clone)]
pub struct MaterialDatabase {
    materials: HashMap<String, RodMaterial>,
}

impl MaterialDatabase {
    /// Creates a new database with the built-in presets.
    pub fn with_defaults() -> Self {
        let mut db = Self::empty();

        db.register(steel());
        db.register(nitinol());
        db.register(rubber());
        db.register(soft_tissue());
        db.register(demo_elastic());

        db
    }

    /// Creates an empty database.
    pub fn empty() -> Self {
        Self {
            materials: HashMap::new(),
        }
    }

    /// Registers a material. Overwrites if the name already exists.
    pub fn register(&mut self, material: RodMaterial) {
        self.materials.insert(material.name.clone(), material);
    }

    /// Looks up a material by name. Returns `None` if not found.
    pub fn get(&self, name: &str) -> Option<&RodMaterial> {
        self.materials.get(name)
    }

    /// Returns all registered material names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.materials.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Returns true if the database is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialDatabase {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ─── Built-in Presets ─────────────────────────────────────────────────

/// Structural steel wire.
fn steel() -> RodMaterial {
    RodMaterial::new("steel", 7850.0, 2.0e11, 0.3)
}

/// Nickel-titanium alloy, common in guide wires.
fn nitinol() -> RodMaterial {
    RodMaterial::new("nitinol", 6450.0, 7.5e10, 0.33)
}

/// Natural rubber. Nearly incompressible, lightly damped.
fn rubber() -> RodMaterial {
    RodMaterial::new("rubber", 1100.0, 1.0e6, 0.49).with_damping(0.1)
}

/// Muscle-like soft tissue used by slithering and arm scenarios.
fn soft_tissue() -> RodMaterial {
    RodMaterial::new("soft_tissue", 1000.0, 1.0e7, 0.5).with_damping(2.0)
}

/// Very soft, undamped material for free-vibration demonstrations.
fn demo_elastic() -> RodMaterial {
    RodMaterial::new("demo_elastic", 5000.0, 1.0e4, 0.5)
}
