//! # strand-material
//!
//! Rod material properties and a named preset database.
//!
//! A [`RodMaterial`] carries the bulk quantities a Cosserat rod is built
//! from: mass density, Young's modulus, Poisson ratio and the viscous
//! damping constant `nu`. Stiffness matrices and inertias are derived from
//! these together with the rod's cross-section in `strand-rod`.

pub mod database;
pub mod properties;

pub use database::MaterialDatabase;
pub use properties::RodMaterial;
