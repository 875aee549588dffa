//! Lagrangian particle simulator scenarios
//!
//! Containment under clamping, fixed particle count and reproducible seeding.

mod common;

use circulation_core::{
    run, run_checked, Domain, LagrangianConfig, LagrangianSimulator, Simulator, Vec2,
};

fn particles(n_particles: usize, dt: f64, seed: u64) -> LagrangianSimulator {
    LagrangianSimulator::new(LagrangianConfig {
        n_particles,
        dt,
        seed: Some(seed),
    })
    .unwrap()
}

#[test]
fn test_end_to_end_100_particles_stay_in_domain() {
    let sim = particles(100, 0.1, 2024);
    let initial = sim.initialize();
    assert!(initial.particles.iter().all(|p| Domain::MERIDIONAL.contains(*p)));

    let mut checked = 0;
    let state = run(&sim, initial, 50, |_, state| {
        assert_eq!(state.particles.len(), 100);
        for p in &state.particles {
            assert!((-90.0..=90.0).contains(&p.x), "lat {}", p.x);
            assert!((0.0..=30.0).contains(&p.y), "alt {}", p.y);
        }
        checked += 1;
    });
    assert_eq!(checked, 50);
    assert_eq!(state.step, 50);
}

#[test]
fn test_unseeded_run_is_contained() {
    let sim = LagrangianSimulator::new(LagrangianConfig {
        n_particles: 200,
        ..Default::default()
    })
    .unwrap();
    assert!(run_checked(&sim, sim.initial_state(), 100, |_, _| {}).is_ok());
}

#[test]
fn test_large_timestep_is_still_contained() {
    // Clamping, not stability, is what keeps particles in the domain
    let sim = particles(300, 25.0, 11);
    let state = run_checked(&sim, sim.initialize(), 40, |_, _| {}).unwrap();
    assert_eq!(state.particles.len(), 300);
    assert!(state.count_on_edges(sim.domain()) > 0);
}

#[test]
fn test_zero_timestep_freezes_particles() {
    let sim = particles(64, 0.0, 5);
    let initial = sim.initialize();
    let state = run(&sim, initial.clone(), 30, |_, _| {});
    assert_eq!(state.particles, initial.particles);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let a = particles(150, 0.1, 99);
    let b = particles(150, 0.1, 99);
    let end_a = run(&a, a.initialize(), 25, |_, _| {});
    let end_b = run(&b, b.initialize(), 25, |_, _| {});
    assert_eq!(end_a, end_b);

    let c = particles(150, 0.1, 100);
    assert_ne!(a.initialize().particles, c.initialize().particles);
}

#[test]
fn test_equatorial_particle_sinks_to_surface() {
    // On the equator there is no lateral wind, only sinking
    let sim = particles(1, 0.5, 0);
    let start = sim.initialize_with(vec![Vec2::new(0.0, 20.0)]).unwrap();
    let state = run(&sim, start, 400, |_, s| assert_eq!(s.particles[0].x, 0.0));
    assert!(state.particles[0].y < 20.0);
}

#[test]
fn test_sample_wind_for_rendering() {
    let sim = particles(10, 0.1, 1);
    let state = sim.initialize();
    let winds = sim.sample_wind(&state.particles);
    assert_eq!(winds.len(), 10);
    for (p, v) in state.particles.iter().zip(&winds) {
        assert_eq!(*v, circulation_core::wind_field(p.x, p.y));
    }
}
