//! Integration tests for strand-rod.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use glam::{DMat3, DVec3};
use strand_material::RodMaterial;
use strand_math::rotation::is_proper_rotation;
use strand_rod::dynamics::{
    bending_energy, center_of_mass, compute_internal_forces_and_torques, kinetic_energy,
    translational_energy, update_accelerations, update_kinematics, zero_external_loads,
};
use strand_rod::generators::{ring_rod, straight_rod, straight_rod_from_positions, RingGeometry, RodGeometry};
use strand_rod::{
    construct, construct_block, rod_loads_pair, CosseratRod, Cylinder, Domain, ElementMatrix,
    ElementScalar, ElementVector, NodeScalar, NodeVector, RodHandle, RodSystem, RodTopology,
    VoronoiMatrix, VoronoiScalar, VoronoiVector,
};
use strand_types::StrandError;

// ─── Helpers ──────────────────────────────────────────────────

/// Deterministic pseudo-random source for filling rods.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64 - 0.5
    }

    fn vec(&mut self) -> DVec3 {
        DVec3::new(self.next(), self.next(), self.next())
    }

    fn mat(&mut self) -> DMat3 {
        DMat3::from_cols(self.vec(), self.vec(), self.vec())
    }
}

/// A rod whose every attribute holds arbitrary values.
fn random_rod(topology: RodTopology, n_elems: usize, seed: u64) -> CosseratRod {
    let mut rng = Lcg(seed);
    let mut rod = CosseratRod::with_elems(topology, n_elems).unwrap();
    let f = &mut rod.fields;
    for a in NodeScalar::ALL {
        f.node_scalar_mut(a).iter_mut().for_each(|x| *x = rng.next());
    }
    for a in NodeVector::ALL {
        f.node_vector_mut(a).iter_mut().for_each(|x| *x = rng.vec());
    }
    for a in ElementScalar::ALL {
        f.element_scalar_mut(a).iter_mut().for_each(|x| *x = rng.next());
    }
    for a in ElementVector::ALL {
        f.element_vector_mut(a).iter_mut().for_each(|x| *x = rng.vec());
    }
    for a in ElementMatrix::ALL {
        f.element_matrix_mut(a).iter_mut().for_each(|x| *x = rng.mat());
    }
    for a in VoronoiScalar::ALL {
        f.voronoi_scalar_mut(a).iter_mut().for_each(|x| *x = rng.next());
    }
    for a in VoronoiVector::ALL {
        f.voronoi_vector_mut(a).iter_mut().for_each(|x| *x = rng.vec());
    }
    for a in VoronoiMatrix::ALL {
        f.voronoi_matrix_mut(a).iter_mut().for_each(|x| *x = rng.mat());
    }
    rod
}

fn random_rods(topology: RodTopology, n_rods: usize) -> Vec<CosseratRod> {
    (0..n_rods)
        .map(|k| random_rod(topology, 10 + (7 * k) % 21, 17 + k as u64))
        .collect()
}

fn material() -> RodMaterial {
    RodMaterial::new("test", 1000.0, 1.0e6, 0.5)
}

fn z_rod(n_elems: usize) -> CosseratRod {
    straight_rod(
        &RodGeometry {
            n_elems,
            start: DVec3::ZERO,
            direction: DVec3::Z,
            normal: DVec3::X,
            base_length: 1.0,
            base_radius: 0.05,
        },
        &material(),
    )
    .unwrap()
}

fn max_abs(values: &[DVec3]) -> f64 {
    values.iter().fold(0.0_f64, |m, v| m.max(v.abs().max_element()))
}

// ─── Packing Tests ────────────────────────────────────────────

fn assert_packed_identically(topology: RodTopology, n_rods: usize) {
    let rods = random_rods(topology, n_rods);
    let expected = rods.clone();
    let blocks = construct(rods).unwrap();
    assert_eq!(blocks.len(), 1);
    let block = &blocks[0];
    assert_eq!(block.n_rods(), n_rods);

    for (k, rod) in expected.iter().enumerate() {
        let view = block.rod(k);
        for a in NodeScalar::ALL {
            assert_eq!(view.node_scalar(a), rod.node_scalar(a), "{a:?}");
        }
        for a in NodeVector::ALL {
            assert_eq!(view.node_vector(a), rod.node_vector(a), "{a:?}");
        }
        for a in ElementScalar::ALL {
            assert_eq!(view.element_scalar(a), rod.element_scalar(a), "{a:?}");
        }
        for a in ElementVector::ALL {
            assert_eq!(view.element_vector(a), rod.element_vector(a), "{a:?}");
        }
        for a in ElementMatrix::ALL {
            assert_eq!(view.element_matrix(a), rod.element_matrix(a), "{a:?}");
        }
        for a in VoronoiScalar::ALL {
            assert_eq!(view.voronoi_scalar(a), rod.voronoi_scalar(a), "{a:?}");
        }
        for a in VoronoiVector::ALL {
            assert_eq!(view.voronoi_vector(a), rod.voronoi_vector(a), "{a:?}");
        }
        for a in VoronoiMatrix::ALL {
            assert_eq!(view.voronoi_matrix(a), rod.voronoi_matrix(a), "{a:?}");
        }
    }
}

#[test]
fn straight_rods_pack_bit_identically() {
    for n_rods in [1, 2, 5, 6] {
        assert_packed_identically(RodTopology::Straight, n_rods);
    }
}

#[test]
fn ring_rods_pack_bit_identically() {
    for n_rods in [1, 2, 5, 6] {
        assert_packed_identically(RodTopology::Ring, n_rods);
    }
}

#[test]
fn views_alias_block_storage() {
    let blocks = construct(random_rods(RodTopology::Straight, 5)).unwrap();
    let block = &blocks[0];
    for k in 0..block.n_rods() {
        let view = block.rod(k);
        let node_start = block.start_idx(Domain::Node)[k];
        let elem_start = block.start_idx(Domain::Element)[k];
        let voronoi_start = block.start_idx(Domain::Voronoi)[k];
        assert_eq!(view.position().as_ptr(), block.fields().position[node_start..].as_ptr());
        assert_eq!(view.mass().as_ptr(), block.fields().mass[node_start..].as_ptr());
        assert_eq!(view.director().as_ptr(), block.fields().director[elem_start..].as_ptr());
        assert_eq!(
            view.voronoi_vector(VoronoiVector::Kappa).as_ptr(),
            block.fields().kappa[voronoi_start..].as_ptr()
        );
    }
}

#[test]
fn writes_through_views_reach_the_block() {
    let mut blocks = construct(random_rods(RodTopology::Straight, 2)).unwrap();
    let block = &mut blocks[0];
    let start = block.start_idx(Domain::Node)[1];
    block.rod_mut(1).position_mut()[3] = DVec3::new(7.0, 8.0, 9.0);
    assert_eq!(block.fields().position[start + 3], DVec3::new(7.0, 8.0, 9.0));

    block.fields_mut().velocity[start] = DVec3::splat(2.5);
    assert_eq!(block.rod(1).velocity()[0], DVec3::splat(2.5));
}

#[test]
fn offsets_are_monotone_and_disjoint() {
    for topology in RodTopology::ALL {
        for n_rods in [1, 2, 5, 6] {
            let rods = random_rods(topology, n_rods);
            let sizes: Vec<usize> = rods.iter().map(|r| r.n_elems()).collect();
            let blocks = construct(rods).unwrap();
            let block = &blocks[0];
            for domain in Domain::ALL {
                let start = block.start_idx(domain);
                let end = block.end_idx(domain);
                for k in 0..n_rods {
                    assert_eq!(end[k] - start[k], domain.size(topology, sizes[k]));
                    if k > 0 {
                        assert!(start[k] > end[k - 1], "{domain:?} rods {} and {k} touch", k - 1);
                    }
                }
                let total = match domain {
                    Domain::Node => block.n_nodes(),
                    Domain::Element => block.n_elems(),
                    Domain::Voronoi => block.n_voronoi(),
                };
                assert!(end[n_rods - 1] <= total);
            }
        }
    }
}

#[test]
fn straight_ghosts_separate_consecutive_rods() {
    let blocks = construct(random_rods(RodTopology::Straight, 3)).unwrap();
    let block = &blocks[0];
    assert_eq!(block.ghost_idx(Domain::Node).len(), 2);
    assert_eq!(block.ghost_idx(Domain::Element).len(), 4);
    assert_eq!(block.ghost_idx(Domain::Voronoi).len(), 6);
    assert!(block.periodic_idx(Domain::Node).is_empty());
    for &g in block.ghost_idx(Domain::Node) {
        assert_eq!(block.fields().mass[g], 1.0);
    }
}

#[test]
fn construct_groups_by_topology() {
    let rods = vec![
        random_rod(RodTopology::Ring, 6, 1),
        random_rod(RodTopology::Straight, 4, 2),
        random_rod(RodTopology::Ring, 8, 3),
        random_rod(RodTopology::Straight, 5, 4),
    ];
    let blocks = construct(rods).unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].topology(), RodTopology::Straight);
    assert_eq!(blocks[0].system_idx(), &[1, 3]);
    assert_eq!(blocks[1].topology(), RodTopology::Ring);
    assert_eq!(blocks[1].system_idx(), &[0, 2]);
}

#[test]
fn construct_block_rejects_mixed_topology() {
    let rods = vec![
        random_rod(RodTopology::Straight, 4, 2),
        random_rod(RodTopology::Ring, 6, 1),
    ];
    assert!(matches!(
        construct_block(&rods, RodTopology::Straight),
        Err(StrandError::Packing(_))
    ));
}

#[test]
fn construct_rejects_wrong_attribute_length() {
    let mut rod = random_rod(RodTopology::Straight, 4, 2);
    rod.fields.kappa.push(DVec3::ZERO);
    assert!(matches!(construct(vec![rod]), Err(StrandError::Packing(_))));
}

#[test]
fn rod_with_too_few_elements_is_rejected() {
    assert!(matches!(
        CosseratRod::with_elems(RodTopology::Straight, 1),
        Err(StrandError::Packing(_))
    ));
    assert!(CosseratRod::with_elems(RodTopology::Ring, 2).is_err());
}

#[test]
fn loads_of_two_rods_in_one_block() {
    let mut blocks = construct(random_rods(RodTopology::Straight, 3)).unwrap();
    {
        let (a, b) = blocks[0].rod_loads_pair(2, 0).unwrap();
        a.external_forces[0] = DVec3::X;
        b.external_forces[0] = DVec3::Y;
    }
    assert_eq!(blocks[0].rod(2).node_vector(NodeVector::ExternalForces)[0], DVec3::X);
    assert_eq!(blocks[0].rod(0).node_vector(NodeVector::ExternalForces)[0], DVec3::Y);
    assert!(blocks[0].rod_loads_pair(1, 1).is_err());
}

#[test]
fn loads_of_two_rods_in_different_blocks() {
    let rods = vec![random_rod(RodTopology::Straight, 4, 2), random_rod(RodTopology::Ring, 6, 1)];
    let mut blocks = construct(rods).unwrap();
    let ring = RodHandle { block: 1, rod: 0 };
    let straight = RodHandle { block: 0, rod: 0 };
    {
        let (r, s) = rod_loads_pair(&mut blocks, ring, straight).unwrap();
        assert_eq!(r.position.len(), 6);
        assert_eq!(s.position.len(), 5);
        r.external_torques[5] = DVec3::Z;
        s.external_torques[3] = DVec3::X;
    }
    assert_eq!(blocks[1].rod(0).element_vector(ElementVector::ExternalTorques)[5], DVec3::Z);
    assert_eq!(blocks[0].rod(0).element_vector(ElementVector::ExternalTorques)[3], DVec3::X);
    assert!(rod_loads_pair(&mut blocks, RodHandle { block: 2, rod: 0 }, straight).is_err());
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn straight_rod_mass_and_frames() {
    let rod = z_rod(10);
    let area = std::f64::consts::PI * 0.05 * 0.05;
    assert_relative_eq!(rod.total_mass(), 1000.0 * area * 1.0, max_relative = 1e-12);
    assert_relative_eq!(rod.rest_length(), 1.0, max_relative = 1e-12);
    for q in &rod.fields.director {
        assert!(is_proper_rotation(q, 1e-12));
        assert_abs_diff_eq!(q.row(2).z, 1.0, epsilon = 1e-12);
    }
    // End nodes carry half an element.
    assert_relative_eq!(rod.fields.mass[0] * 2.0, rod.fields.mass[1], max_relative = 1e-12);
}

#[test]
fn straight_rod_stiffness() {
    let rod = z_rod(4);
    let m = material();
    let area = std::f64::consts::PI * 0.05 * 0.05;
    let i1 = area * area / (4.0 * std::f64::consts::PI);
    let s = rod.fields.shear_matrix[0];
    assert_relative_eq!(s.z_axis.z, m.youngs_modulus * area, max_relative = 1e-12);
    assert_relative_eq!(s.x_axis.x, 4.0 / 3.0 * m.shear_modulus() * area, max_relative = 1e-12);
    let b = rod.fields.bend_matrix[0];
    assert_relative_eq!(b.x_axis.x, m.youngs_modulus * i1, max_relative = 1e-12);
    assert_relative_eq!(b.z_axis.z, m.shear_modulus() * 2.0 * i1, max_relative = 1e-12);
}

#[test]
fn generator_rejects_bad_input() {
    let geometry = RodGeometry {
        n_elems: 4,
        start: DVec3::ZERO,
        direction: DVec3::Z,
        normal: DVec3::Z,
        base_length: 1.0,
        base_radius: 0.05,
    };
    assert!(matches!(straight_rod(&geometry, &material()), Err(StrandError::InvalidConfig(_))));
    let duplicate = [DVec3::ZERO, DVec3::ZERO, DVec3::Z];
    assert!(straight_rod_from_positions(&duplicate, DVec3::X, 0.1, &material()).is_err());
}

#[test]
fn ring_rod_closes_on_itself() {
    let rod = ring_rod(
        &RingGeometry {
            n_elems: 12,
            center: DVec3::new(1.0, 0.0, 0.0),
            axis: DVec3::Z,
            ring_radius: 2.0,
            base_radius: 0.1,
        },
        &material(),
    )
    .unwrap();
    assert_eq!(rod.n_nodes(), 12);
    assert_eq!(rod.n_voronoi(), 12);
    for x in &rod.fields.position {
        assert_relative_eq!((*x - DVec3::new(1.0, 0.0, 0.0)).length(), 2.0, max_relative = 1e-12);
    }
    // Uniform rest curvature about the ring axis direction d1.
    for k in &rod.fields.rest_kappa {
        assert_relative_eq!(k.length(), rod.fields.rest_kappa[0].length(), max_relative = 1e-9);
        assert_abs_diff_eq!(k.y, 0.0, epsilon = 1e-9);
    }
}

// ─── Dynamics Tests ───────────────────────────────────────────

#[test]
fn straight_rod_at_rest_has_no_internal_loads() {
    let mut blocks = construct(vec![z_rod(8), z_rod(5)]).unwrap();
    let block = &mut blocks[0];
    compute_internal_forces_and_torques(block).unwrap();
    assert!(max_abs(&block.fields().internal_forces) < 1e-8);
    assert!(max_abs(&block.fields().internal_torques) < 1e-8);
}

#[test]
fn stretched_rod_pulls_its_ends_inward() {
    let mut rod = z_rod(6);
    for x in rod.fields.position.iter_mut() {
        *x *= 1.1;
    }
    let area = std::f64::consts::PI * 0.05 * 0.05;
    let tension = 0.1 * material().youngs_modulus * area / 1.1;

    let mut blocks = construct(vec![rod]).unwrap();
    let block = &mut blocks[0];
    compute_internal_forces_and_torques(block).unwrap();
    let forces = block.rod(0).node_vector(NodeVector::InternalForces);
    assert_relative_eq!(forces[0].z, tension, max_relative = 1e-9);
    assert_relative_eq!(forces[6].z, -tension, max_relative = 1e-9);
    for f in &forces[1..6] {
        assert_abs_diff_eq!(f.z, 0.0, epsilon = 1e-6 * tension);
    }
    let total = forces.iter().fold(DVec3::ZERO, |acc, f| acc + *f);
    assert_abs_diff_eq!(total.length(), 0.0, epsilon = 1e-9 * tension);
}

#[test]
fn packed_neighbours_do_not_interact() {
    let mut stretched = z_rod(6);
    for x in stretched.fields.position.iter_mut() {
        *x *= 1.05;
    }
    let mut alone = construct(vec![stretched.clone()]).unwrap();
    let mut packed = construct(vec![z_rod(4), stretched, z_rod(3)]).unwrap();
    compute_internal_forces_and_torques(&mut alone[0]).unwrap();
    compute_internal_forces_and_torques(&mut packed[0]).unwrap();
    let a = alone[0].rod(0).node_vector(NodeVector::InternalForces);
    let b = packed[0].rod(1).node_vector(NodeVector::InternalForces);
    for (x, y) in a.iter().zip(b) {
        assert_abs_diff_eq!((*x - *y).length(), 0.0, epsilon = 1e-12);
    }
    assert!(max_abs(packed[0].rod(0).node_vector(NodeVector::InternalForces)) < 1e-8);
    assert!(max_abs(packed[0].rod(2).node_vector(NodeVector::InternalForces)) < 1e-8);
}

#[test]
fn degenerate_element_reports_rod_and_index() {
    let mut blocks = construct(vec![z_rod(4), z_rod(4)]).unwrap();
    let block = &mut blocks[0];
    {
        let mut rod = block.rod_mut(1);
        let x = rod.position_mut();
        x[3] = x[2];
    }
    match compute_internal_forces_and_torques(block) {
        Err(StrandError::PhysicalState { rod, index, .. }) => {
            assert_eq!(rod, 1);
            assert_eq!(index, 2);
        }
        other => panic!("expected physical state error, got {other:?}"),
    }
}

#[test]
fn zero_node_mass_is_a_physical_state_error() {
    let mut blocks = construct(vec![z_rod(4), z_rod(4)]).unwrap();
    let block = &mut blocks[0];
    block.rod_mut(1).node_scalar_mut(NodeScalar::Mass)[1] = 0.0;
    match compute_internal_forces_and_torques(block) {
        Err(StrandError::PhysicalState { rod, index, .. }) => {
            assert_eq!(rod, 1);
            assert_eq!(index, 1);
        }
        other => panic!("expected physical state error, got {other:?}"),
    }
    assert!(block.fields().acceleration.iter().all(|a| a.is_finite()));
}

#[test]
fn singular_inertia_is_a_physical_state_error() {
    let mut blocks = construct(vec![z_rod(4)]).unwrap();
    let block = &mut blocks[0];
    {
        let mut rod = block.rod_mut(0);
        rod.element_matrix_mut(ElementMatrix::MassSecondMoment)[2] = DMat3::ZERO;
        rod.element_matrix_mut(ElementMatrix::InvMassSecondMoment)[2] =
            DMat3::from_diagonal(DVec3::splat(f64::INFINITY));
    }
    match compute_internal_forces_and_torques(block) {
        Err(StrandError::PhysicalState { rod, index, .. }) => {
            assert_eq!(rod, 0);
            assert_eq!(index, 2);
        }
        other => panic!("expected physical state error, got {other:?}"),
    }
}

#[test]
fn ring_at_rest_has_no_internal_loads() {
    let geometry = |center: DVec3| RingGeometry {
        n_elems: 16,
        center,
        axis: DVec3::Z,
        ring_radius: 1.0,
        base_radius: 0.05,
    };
    let rods = vec![
        ring_rod(&geometry(DVec3::ZERO), &material()).unwrap(),
        ring_rod(&geometry(DVec3::new(5.0, 0.0, 0.0)), &material()).unwrap(),
    ];
    let mut blocks = construct(rods).unwrap();
    let block = &mut blocks[0];
    compute_internal_forces_and_torques(block).unwrap();
    for k in 0..2 {
        let rod = block.rod(k);
        assert!(max_abs(rod.node_vector(NodeVector::InternalForces)) < 1e-6);
        assert!(max_abs(rod.element_vector(ElementVector::InternalTorques)) < 1e-6);
        assert_abs_diff_eq!(bending_energy(&rod), 0.0, epsilon = 1e-12);
    }
}

#[test]
fn ring_periodic_copies_follow_real_nodes() {
    let rod = ring_rod(
        &RingGeometry {
            n_elems: 6,
            center: DVec3::ZERO,
            axis: DVec3::Z,
            ring_radius: 1.0,
            base_radius: 0.05,
        },
        &material(),
    )
    .unwrap();
    let mut blocks = construct(vec![rod]).unwrap();
    let block = &mut blocks[0];
    block.rod_mut(0).position_mut()[0] += DVec3::new(0.0, 0.0, 0.01);
    block.synchronize_periodic();
    let start = block.start_idx(Domain::Node)[0];
    for &(dst, src) in block.periodic_idx(Domain::Node) {
        assert_eq!(block.fields().position[dst], block.fields().position[src]);
    }
    assert_eq!(block.fields().position[start + 6], block.fields().position[start]);
}

#[test]
fn accelerations_follow_external_loads() {
    let mut blocks = construct(vec![z_rod(4)]).unwrap();
    let block = &mut blocks[0];
    zero_external_loads(block);
    block.rod_mut(0).external_forces_mut().iter_mut().for_each(|f| *f = DVec3::new(0.0, -1.0, 0.0));
    compute_internal_forces_and_torques(block).unwrap();
    update_accelerations(block);
    let rod = block.rod(0);
    for (a, m) in rod.node_vector(NodeVector::Acceleration).iter().zip(rod.mass()) {
        assert_relative_eq!(a.y, -1.0 / m, max_relative = 1e-6);
    }
}

#[test]
fn kinematic_update_translates_and_rotates() {
    let mut blocks = construct(vec![z_rod(4)]).unwrap();
    let block = &mut blocks[0];
    block.rod_mut(0).velocity_mut().iter_mut().for_each(|v| *v = DVec3::X);
    block.rod_mut(0).omega_mut().iter_mut().for_each(|w| *w = DVec3::new(0.0, 0.0, 1.0));
    let before = block.rod(0).position()[2];
    update_kinematics(block, 0.5);
    let rod = block.rod(0);
    assert_relative_eq!(rod.position()[2].x, before.x + 0.5);
    for q in rod.director() {
        assert!(is_proper_rotation(q, 1e-12));
    }
}

#[test]
fn energies_and_center_of_mass() {
    let mut blocks = construct(vec![z_rod(10)]).unwrap();
    let block = &mut blocks[0];
    block.rod_mut(0).velocity_mut().iter_mut().for_each(|v| *v = DVec3::new(2.0, 0.0, 0.0));
    let rod = block.rod(0);
    let mass: f64 = rod.mass().iter().sum();
    assert_relative_eq!(translational_energy(&rod), 2.0 * mass, max_relative = 1e-12);
    assert_relative_eq!(kinetic_energy(block), 2.0 * mass, max_relative = 1e-12);
    let com = center_of_mass(&block.rod(0));
    assert_relative_eq!(com.z, 0.5, max_relative = 1e-12);
}

// ─── Rigid Body Tests ─────────────────────────────────────────

#[test]
fn cylinder_frame_and_axis() {
    let cyl = Cylinder::new(DVec3::new(0.0, 0.0, -1.0), DVec3::Z, DVec3::X, 2.0, 1.0, 1.0).unwrap();
    assert_eq!(cyl.position, DVec3::ZERO);
    assert!(cyl.director.abs_diff_eq(DMat3::IDENTITY, 1e-14));
    assert_eq!(cyl.tip(), DVec3::new(0.0, 0.0, -1.0));
    assert_eq!(cyl.edge(), DVec3::new(0.0, 0.0, 2.0));
    assert_relative_eq!(cyl.mass, 2.0 * std::f64::consts::PI);
}

#[test]
fn cylinder_accelerates_under_load() {
    let mut cyl = Cylinder::new(DVec3::ZERO, DVec3::Z, DVec3::X, 1.0, 0.5, 2.0).unwrap();
    cyl.external_forces = DVec3::new(0.0, 0.0, cyl.mass);
    cyl.update_accelerations();
    assert_relative_eq!(cyl.acceleration.z, 1.0);
    cyl.update_dynamics(0.1);
    cyl.update_kinematics(0.1);
    assert_relative_eq!(cyl.position.z, 0.5 + 0.01, max_relative = 1e-12);
    cyl.zero_external_loads();
    assert_eq!(cyl.external_forces, DVec3::ZERO);
    assert!(cyl.kinetic_energy() > 0.0);
}

#[test]
fn cylinder_rejects_parallel_normal() {
    assert!(Cylinder::new(DVec3::ZERO, DVec3::Z, DVec3::Z, 1.0, 0.5, 2.0).is_err());
}
