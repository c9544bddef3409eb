//! Attribute storage shared by single rods and memory blocks.
//!
//! [`RodFields`] holds one `Vec` per attribute. A [`CosseratRod`](crate::CosseratRod)
//! owns a `RodFields` sized for one rod; a [`MemoryBlock`](crate::MemoryBlock)
//! owns one sized for many rods plus their ghost slots.

use glam::{DMat3, DVec3};

use crate::system::{
    ElementMatrix, ElementScalar, ElementVector, NodeScalar, NodeVector, VoronoiMatrix,
    VoronoiScalar, VoronoiVector,
};

/// Structure-of-arrays storage of every rod attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct RodFields {
    // ─── Node scalars ───
    pub mass: Vec<f64>,
    pub dissipation_constant_for_forces: Vec<f64>,

    // ─── Node vectors ───
    pub position: Vec<DVec3>,
    pub velocity: Vec<DVec3>,
    pub acceleration: Vec<DVec3>,
    pub internal_forces: Vec<DVec3>,
    pub external_forces: Vec<DVec3>,

    // ─── Element scalars ───
    pub radius: Vec<f64>,
    pub volume: Vec<f64>,
    pub density: Vec<f64>,
    pub lengths: Vec<f64>,
    pub rest_lengths: Vec<f64>,
    pub dilatation: Vec<f64>,
    pub dilatation_rate: Vec<f64>,
    pub dissipation_constant_for_torques: Vec<f64>,

    // ─── Element vectors ───
    pub tangents: Vec<DVec3>,
    pub sigma: Vec<DVec3>,
    pub rest_sigma: Vec<DVec3>,
    pub omega: Vec<DVec3>,
    pub alpha: Vec<DVec3>,
    pub internal_torques: Vec<DVec3>,
    pub external_torques: Vec<DVec3>,
    pub internal_stress: Vec<DVec3>,

    // ─── Element matrices ───
    /// Rows are the material directors `d1, d2, d3` in the lab frame.
    pub director: Vec<DMat3>,
    pub mass_second_moment_of_inertia: Vec<DMat3>,
    pub inv_mass_second_moment_of_inertia: Vec<DMat3>,
    pub shear_matrix: Vec<DMat3>,

    // ─── Voronoi scalars ───
    pub voronoi_dilatation: Vec<f64>,
    pub rest_voronoi_lengths: Vec<f64>,

    // ─── Voronoi vectors ───
    pub kappa: Vec<DVec3>,
    pub rest_kappa: Vec<DVec3>,
    pub internal_couple: Vec<DVec3>,

    // ─── Voronoi matrices ───
    pub bend_matrix: Vec<DMat3>,
}

impl RodFields {
    /// Allocates storage for the given domain sizes.
    ///
    /// Vectors and scalars start at zero except the ratios (`lengths`,
    /// `rest_lengths`, dilatations, voronoi lengths) which start at one;
    /// directors and inertias start at identity.
    pub fn with_sizes(n_nodes: usize, n_elems: usize, n_voronoi: usize) -> Self {
        Self {
            mass: vec![0.0; n_nodes],
            dissipation_constant_for_forces: vec![0.0; n_nodes],

            position: vec![DVec3::ZERO; n_nodes],
            velocity: vec![DVec3::ZERO; n_nodes],
            acceleration: vec![DVec3::ZERO; n_nodes],
            internal_forces: vec![DVec3::ZERO; n_nodes],
            external_forces: vec![DVec3::ZERO; n_nodes],

            radius: vec![0.0; n_elems],
            volume: vec![0.0; n_elems],
            density: vec![0.0; n_elems],
            lengths: vec![1.0; n_elems],
            rest_lengths: vec![1.0; n_elems],
            dilatation: vec![1.0; n_elems],
            dilatation_rate: vec![0.0; n_elems],
            dissipation_constant_for_torques: vec![0.0; n_elems],

            tangents: vec![DVec3::ZERO; n_elems],
            sigma: vec![DVec3::ZERO; n_elems],
            rest_sigma: vec![DVec3::ZERO; n_elems],
            omega: vec![DVec3::ZERO; n_elems],
            alpha: vec![DVec3::ZERO; n_elems],
            internal_torques: vec![DVec3::ZERO; n_elems],
            external_torques: vec![DVec3::ZERO; n_elems],
            internal_stress: vec![DVec3::ZERO; n_elems],

            director: vec![DMat3::IDENTITY; n_elems],
            mass_second_moment_of_inertia: vec![DMat3::IDENTITY; n_elems],
            inv_mass_second_moment_of_inertia: vec![DMat3::IDENTITY; n_elems],
            shear_matrix: vec![DMat3::ZERO; n_elems],

            voronoi_dilatation: vec![1.0; n_voronoi],
            rest_voronoi_lengths: vec![1.0; n_voronoi],

            kappa: vec![DVec3::ZERO; n_voronoi],
            rest_kappa: vec![DVec3::ZERO; n_voronoi],
            internal_couple: vec![DVec3::ZERO; n_voronoi],

            bend_matrix: vec![DMat3::ZERO; n_voronoi],
        }
    }

    pub fn n_nodes(&self) -> usize {
        self.position.len()
    }

    pub fn n_elems(&self) -> usize {
        self.director.len()
    }

    pub fn n_voronoi(&self) -> usize {
        self.kappa.len()
    }

    // ─── Node accessors ───

    pub fn node_scalar(&self, attr: NodeScalar) -> &[f64] {
        match attr {
            NodeScalar::Mass => &self.mass,
            NodeScalar::DissipationForces => &self.dissipation_constant_for_forces,
        }
    }

    pub fn node_scalar_mut(&mut self, attr: NodeScalar) -> &mut [f64] {
        match attr {
            NodeScalar::Mass => &mut self.mass,
            NodeScalar::DissipationForces => &mut self.dissipation_constant_for_forces,
        }
    }

    pub fn node_vector(&self, attr: NodeVector) -> &[DVec3] {
        match attr {
            NodeVector::Position => &self.position,
            NodeVector::Velocity => &self.velocity,
            NodeVector::Acceleration => &self.acceleration,
            NodeVector::InternalForces => &self.internal_forces,
            NodeVector::ExternalForces => &self.external_forces,
        }
    }

    pub fn node_vector_mut(&mut self, attr: NodeVector) -> &mut [DVec3] {
        match attr {
            NodeVector::Position => &mut self.position,
            NodeVector::Velocity => &mut self.velocity,
            NodeVector::Acceleration => &mut self.acceleration,
            NodeVector::InternalForces => &mut self.internal_forces,
            NodeVector::ExternalForces => &mut self.external_forces,
        }
    }

    // ─── Element accessors ───

    pub fn element_scalar(&self, attr: ElementScalar) -> &[f64] {
        match attr {
            ElementScalar::Radius => &self.radius,
            ElementScalar::Volume => &self.volume,
            ElementScalar::Density => &self.density,
            ElementScalar::Lengths => &self.lengths,
            ElementScalar::RestLengths => &self.rest_lengths,
            ElementScalar::Dilatation => &self.dilatation,
            ElementScalar::DilatationRate => &self.dilatation_rate,
            ElementScalar::DissipationTorques => &self.dissipation_constant_for_torques,
        }
    }

    pub fn element_scalar_mut(&mut self, attr: ElementScalar) -> &mut [f64] {
        match attr {
            ElementScalar::Radius => &mut self.radius,
            ElementScalar::Volume => &mut self.volume,
            ElementScalar::Density => &mut self.density,
            ElementScalar::Lengths => &mut self.lengths,
            ElementScalar::RestLengths => &mut self.rest_lengths,
            ElementScalar::Dilatation => &mut self.dilatation,
            ElementScalar::DilatationRate => &mut self.dilatation_rate,
            ElementScalar::DissipationTorques => &mut self.dissipation_constant_for_torques,
        }
    }

    pub fn element_vector(&self, attr: ElementVector) -> &[DVec3] {
        match attr {
            ElementVector::Tangents => &self.tangents,
            ElementVector::Sigma => &self.sigma,
            ElementVector::RestSigma => &self.rest_sigma,
            ElementVector::Omega => &self.omega,
            ElementVector::Alpha => &self.alpha,
            ElementVector::InternalTorques => &self.internal_torques,
            ElementVector::ExternalTorques => &self.external_torques,
            ElementVector::InternalStress => &self.internal_stress,
        }
    }

    pub fn element_vector_mut(&mut self, attr: ElementVector) -> &mut [DVec3] {
        match attr {
            ElementVector::Tangents => &mut self.tangents,
            ElementVector::Sigma => &mut self.sigma,
            ElementVector::RestSigma => &mut self.rest_sigma,
            ElementVector::Omega => &mut self.omega,
            ElementVector::Alpha => &mut self.alpha,
            ElementVector::InternalTorques => &mut self.internal_torques,
            ElementVector::ExternalTorques => &mut self.external_torques,
            ElementVector::InternalStress => &mut self.internal_stress,
        }
    }

    pub fn element_matrix(&self, attr: ElementMatrix) -> &[DMat3] {
        match attr {
            ElementMatrix::Director => &self.director,
            ElementMatrix::MassSecondMoment => &self.mass_second_moment_of_inertia,
            ElementMatrix::InvMassSecondMoment => &self.inv_mass_second_moment_of_inertia,
            ElementMatrix::ShearMatrix => &self.shear_matrix,
        }
    }

    pub fn element_matrix_mut(&mut self, attr: ElementMatrix) -> &mut [DMat3] {
        match attr {
            ElementMatrix::Director => &mut self.director,
            ElementMatrix::MassSecondMoment => &mut self.mass_second_moment_of_inertia,
            ElementMatrix::InvMassSecondMoment => &mut self.inv_mass_second_moment_of_inertia,
            ElementMatrix::ShearMatrix => &mut self.shear_matrix,
        }
    }

    // ─── Voronoi accessors ───

    pub fn voronoi_scalar(&self, attr: VoronoiScalar) -> &[f64] {
        match attr {
            VoronoiScalar::VoronoiDilatation => &self.voronoi_dilatation,
            VoronoiScalar::RestVoronoiLengths => &self.rest_voronoi_lengths,
        }
    }

    pub fn voronoi_scalar_mut(&mut self, attr: VoronoiScalar) -> &mut [f64] {
        match attr {
            VoronoiScalar::VoronoiDilatation => &mut self.voronoi_dilatation,
            VoronoiScalar::RestVoronoiLengths => &mut self.rest_voronoi_lengths,
        }
    }

    pub fn voronoi_vector(&self, attr: VoronoiVector) -> &[DVec3] {
        match attr {
            VoronoiVector::Kappa => &self.kappa,
            VoronoiVector::RestKappa => &self.rest_kappa,
            VoronoiVector::InternalCouple => &self.internal_couple,
        }
    }

    pub fn voronoi_vector_mut(&mut self, attr: VoronoiVector) -> &mut [DVec3] {
        match attr {
            VoronoiVector::Kappa => &mut self.kappa,
            VoronoiVector::RestKappa => &mut self.rest_kappa,
            VoronoiVector::InternalCouple => &mut self.internal_couple,
        }
    }

    pub fn voronoi_matrix(&self, attr: VoronoiMatrix) -> &[DMat3] {
        match attr {
            VoronoiMatrix::BendMatrix => &self.bend_matrix,
        }
    }

    pub fn voronoi_matrix_mut(&mut self, attr: VoronoiMatrix) -> &mut [DMat3] {
        match attr {
            VoronoiMatrix::BendMatrix => &mut self.bend_matrix,
        }
    }
}
