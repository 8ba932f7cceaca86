use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use circsim::benchmark::benchmark::random_circles;
use circsim::simulation::collision::resolve_all_pairs;
use circsim::{
    bench_detection, keep_on_wire, preset, resolve_bead_pair, resolve_impulse_pair, rk4_step, run_headless,
    substep_integrator, AccelSet, BenchmarkConfig, Body, BroadPhase, BruteForce, CandidatePair, Circle,
    Gravity, InputEvent, LogRenderer, NVec2, NoInput, PairResponse, Parameters, Scenario, ScenarioConfig,
    ScriptedInput, SweepAndPrune, Wire, World,
};

/// Unit-mass ball of radius 1
pub fn ball(x: f64, y: f64, vx: f64, vy: f64) -> Body {
    Body::new(NVec2::new(x, y), NVec2::new(vx, vy), 1.0, 1.0).unwrap()
}

/// `n` resting beads of radius `r` spread over half of `wire`
pub fn beads_on_wire(wire: &Wire, n: usize, r: f64) -> Vec<Body> {
    (0..n)
        .map(|k| {
            let angle = k as f64 * std::f64::consts::PI / n as f64;
            Body::new(wire.point_at(angle), NVec2::zeros(), r, std::f64::consts::PI * r * r).unwrap()
        })
        .collect()
}

/// Run both strategies over the same circles
pub fn both_strategies(circles: &[Circle]) -> ((usize, Vec<CandidatePair>), (usize, Vec<CandidatePair>)) {
    let mut bf_pairs = Vec::new();
    let mut sap_pairs = Vec::new();
    let bf = BruteForce.find_pairs(circles, &mut bf_pairs);
    let sap = SweepAndPrune::new().find_pairs(circles, &mut sap_pairs);
    assert_eq!(bf.collisions, bf_pairs.len());
    assert_eq!(sap.collisions, sap_pairs.len());
    ((bf.checks, bf_pairs), (sap.checks, sap_pairs))
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn rk4_without_forces_is_straight_line() {
    let forces = AccelSet::new();
    let x0 = NVec2::new(1.0, 2.0);
    let v0 = NVec2::new(3.0, -4.0);
    let dt = 0.1;

    let (x, v) = rk4_step(x0, v0, dt, &forces);

    assert_eq!(v, v0);
    assert_relative_eq!(x.x, x0.x + v0.x * dt, epsilon = 1e-12);
    assert_relative_eq!(x.y, x0.y + v0.y * dt, epsilon = 1e-12);
}

#[test]
fn rk4_gravity_matches_projectile_motion() {
    let g = -9.8;
    let forces = AccelSet::new().with(Gravity { g: NVec2::new(0.0, g) });
    let (y0, vy0, vx0) = (0.2, 15.0, 4.0);
    let dt = 1.0 / 60.0;
    let steps = 300;

    let (mut x, mut v) = (NVec2::new(0.0, y0), NVec2::new(vx0, vy0));
    for _ in 0..steps {
        (x, v) = rk4_step(x, v, dt, &forces);
    }

    let t = steps as f64 * dt;
    assert_relative_eq!(x.y, y0 + vy0 * t + 0.5 * g * t * t, epsilon = 1e-9);
    assert_relative_eq!(x.x, vx0 * t, epsilon = 1e-9);
    assert_relative_eq!(v.y, vy0 + g * t, epsilon = 1e-9);
}

#[test]
fn five_beads_stay_on_wire_after_one_tick() {
    let wire = Wire::new(NVec2::new(1.0, 1.0), 0.8).unwrap();
    let mut world = World {
        bodies: beads_on_wire(&wire, 5, 0.05),
        wire: Some(wire),
        ..World::default()
    };
    let params = Parameters {
        dt: 1.0 / 60.0,
        substeps: 100,
        gravity: NVec2::new(0.0, -10.0),
        ..Parameters::default()
    };

    assert_eq!(substep_integrator(&mut world, &params), 0);

    for b in &world.bodies {
        assert!(
            ((b.x - wire.center).norm() - wire.radius).abs() < 1e-6,
            "bead drifted off the wire: {:?}",
            b.x
        );
    }
    // the bead at angle 0 starts sliding down
    assert!(world.bodies[0].v.y < 0.0);
}

#[test]
fn constrained_velocity_follows_position_change() {
    let wire = Wire::new(NVec2::zeros(), 1.0).unwrap();
    let mut world = World {
        bodies: beads_on_wire(&wire, 1, 0.1),
        wire: Some(wire),
        ..World::default()
    };
    let params = Parameters {
        dt: 0.01,
        substeps: 1,
        gravity: NVec2::new(0.0, -10.0),
        ..Parameters::default()
    };

    substep_integrator(&mut world, &params);

    let b = &world.bodies[0];
    let derived = (b.x - b.x_prev) / params.dt;
    assert_relative_eq!(b.v.x, derived.x, epsilon = 1e-12);
    assert_relative_eq!(b.v.y, derived.y, epsilon = 1e-12);
}

#[test]
fn overlapping_beads_are_counted_every_substep() {
    let wire = Wire::new(NVec2::zeros(), 1.0).unwrap();
    let mut world = World {
        bodies: vec![
            Body::new(wire.point_at(0.0), NVec2::zeros(), 0.1, 1.0).unwrap(),
            Body::new(wire.point_at(0.1), NVec2::zeros(), 0.1, 1.0).unwrap(),
        ],
        wire: Some(wire),
        ..World::default()
    };
    let params = Parameters {
        substeps: 10,
        gravity: NVec2::zeros(),
        ..Parameters::default()
    };

    let contacts = substep_integrator(&mut world, &params);

    assert!(contacts >= 1, "overlapping beads reported {contacts} contacts");
    assert!(contacts <= 10);
}

// ==================================================================================
// Constraint tests
// ==================================================================================

#[test]
fn projection_lands_on_wire_for_any_radial() {
    let mut rng = StdRng::seed_from_u64(11);
    let wire = Wire::new(NVec2::new(-2.0, 3.0), 1.5).unwrap();

    for _ in 0..200 {
        let offset = NVec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0));
        if offset.norm() == 0.0 {
            continue;
        }
        let mut b = Body::new(wire.center + offset, NVec2::zeros(), 0.1, 1.0).unwrap();
        let lambda = keep_on_wire(&mut b, &wire).unwrap();

        assert_relative_eq!((b.x - wire.center).norm(), wire.radius, epsilon = 1e-12);
        assert_relative_eq!(lambda, wire.radius - offset.norm(), epsilon = 1e-12);
    }
}

// ==================================================================================
// Collision tests
// ==================================================================================

#[test]
fn head_on_elastic_swaps_velocities() {
    let mut a = ball(0.0, 0.0, 1.0, 0.0);
    let mut b = ball(1.5, 0.0, -1.0, 0.0);

    assert!(resolve_impulse_pair(&mut a, &mut b, 1.0));

    assert_relative_eq!(a.v.x, -1.0, epsilon = 1e-12);
    assert_relative_eq!(b.v.x, 1.0, epsilon = 1e-12);
    assert_relative_eq!(a.v.y, 0.0);
    assert_relative_eq!((b.x - a.x).norm(), 2.0, epsilon = 1e-12);
}

#[test]
fn head_on_inelastic_equalizes_normal_velocity() {
    let mut a = ball(0.0, 0.0, 3.0, 1.0);
    let mut b = ball(1.5, 0.0, -1.0, -2.0);

    assert!(resolve_impulse_pair(&mut a, &mut b, 0.0));

    assert_relative_eq!(a.v.x, b.v.x, epsilon = 1e-12);
    assert_relative_eq!(a.v.x, 1.0, epsilon = 1e-12);
    // tangential parts untouched
    assert_relative_eq!(a.v.y, 1.0);
    assert_relative_eq!(b.v.y, -2.0);
}

#[test]
fn second_resolution_is_a_no_op() {
    let mut a = ball(0.0, 0.0, 2.0, 0.5);
    let mut b = ball(1.2, 0.3, -1.0, 0.0);

    assert!(resolve_impulse_pair(&mut a, &mut b, 0.8));
    let (a1, b1) = (a.clone(), b.clone());

    assert!(!resolve_impulse_pair(&mut a, &mut b, 0.8));
    assert_eq!(a, a1);
    assert_eq!(b, b1);
}

#[test]
fn separating_overlapping_pair_gets_no_impulse() {
    let mut a = ball(0.0, 0.0, -1.0, 0.0);
    let mut b = ball(1.0, 0.0, 0.5, 0.0);
    let (a0, b0) = (a.clone(), b.clone());

    assert!(!resolve_impulse_pair(&mut a, &mut b, 1.0));
    assert!(!resolve_impulse_pair(&mut a, &mut b, 1.0));
    assert_eq!(a, a0);
    assert_eq!(b, b0);
}

#[test]
fn pair_resolution_never_adds_energy() {
    let mut rng = StdRng::seed_from_u64(5);

    for response in [PairResponse::Bead, PairResponse::Impulse] {
        for _ in 0..100 {
            let e = rng.gen_range(0.0..=1.0);
            let mut bodies: Vec<Body> = (0..6)
                .map(|_| {
                    Body::new(
                        NVec2::new(rng.gen_range(0.0..3.0), rng.gen_range(0.0..3.0)),
                        NVec2::new(rng.gen_range(-5.0..5.0), rng.gen_range(-5.0..5.0)),
                        rng.gen_range(0.3..0.8),
                        rng.gen_range(0.5..3.0),
                    )
                    .unwrap()
                })
                .collect();

            let before: f64 = bodies.iter().map(Body::kinetic_energy).sum();
            resolve_all_pairs(&mut bodies, response, e);
            let after: f64 = bodies.iter().map(Body::kinetic_energy).sum();

            assert!(after <= before + 1e-9, "{response:?}: energy {before} -> {after} with e={e}");
        }
    }
}

#[test]
fn bead_form_equal_masses_elastic_swaps() {
    let mut a = ball(0.0, 0.0, 2.0, 0.0);
    let mut b = ball(1.0, 0.0, 0.0, 0.0);

    assert!(resolve_bead_pair(&mut a, &mut b, 1.0));

    assert_relative_eq!(a.v.x, 0.0, epsilon = 1e-12);
    assert_relative_eq!(b.v.x, 2.0, epsilon = 1e-12);
}

// ==================================================================================
// Broad phase tests
// ==================================================================================

#[test]
fn two_overlapping_circles_one_check_one_collision() {
    let circles = [Circle::new(0.0, 0.0, 1.0), Circle::new(1.5, 0.0, 1.0)];

    let ((bf_checks, bf_pairs), (sap_checks, sap_pairs)) = both_strategies(&circles);

    assert_eq!(bf_checks, 1);
    assert_eq!(sap_checks, 1);
    assert_eq!(bf_pairs, vec![CandidatePair::new(0, 1)]);
    assert_eq!(sap_pairs, bf_pairs);
}

#[test]
fn strategies_report_the_same_pairs() {
    let cfg = BenchmarkConfig {
        width: 200.0,
        height: 200.0,
        radius_min: 2.0,
        radius_max: 10.0,
        ..BenchmarkConfig::default()
    };

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = rng.gen_range(0..150);
        let circles = random_circles(&mut rng, n, &cfg);

        let ((bf_checks, mut bf_pairs), (sap_checks, mut sap_pairs)) = both_strategies(&circles);
        bf_pairs.sort();
        sap_pairs.sort();

        assert_eq!(bf_pairs, sap_pairs, "seed {seed}");
        assert!(sap_checks <= bf_checks, "seed {seed}: {sap_checks} > {bf_checks}");
        assert_eq!(bf_checks, n * n.saturating_sub(1) / 2);
    }
}

#[test]
fn strategies_agree_on_bodies_with_duplicate_edges() {
    // equal left edges exercise the tie-break
    let bodies: Vec<Body> = (0..8).map(|k| ball(0.0, 1.5 * k as f64, 0.0, 0.0)).collect();

    let mut bf_pairs = Vec::new();
    let mut sap_pairs = Vec::new();
    BruteForce.find_pairs(&bodies, &mut bf_pairs);
    SweepAndPrune::new().find_pairs(&bodies, &mut sap_pairs);
    sap_pairs.sort();

    assert_eq!(bf_pairs.len(), 7);
    assert_eq!(sap_pairs, bf_pairs);
}

// ==================================================================================
// Benchmark tests
// ==================================================================================

#[test]
fn benchmark_counts_are_reproducible() {
    let cfg = BenchmarkConfig {
        counts: vec![100, 300],
        trials: 2,
        seed: 1234,
        ..BenchmarkConfig::default()
    };

    let first = bench_detection(&cfg).unwrap();
    let second = bench_detection(&cfg).unwrap();

    assert_eq!(first.len(), 2);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.n, b.n);
        assert_eq!(a.brute_force_checks, b.brute_force_checks);
        assert_eq!(a.sweep_and_prune_checks, b.sweep_and_prune_checks);
        assert_eq!(a.collisions, b.collisions);
    }
}

// ==================================================================================
// Scenario tests
// ==================================================================================

#[test]
fn ball_pit_conserves_kinetic_energy_when_elastic() {
    let mut scenario = Scenario::build_scenario(preset("ball_pit").unwrap()).unwrap();
    let before = scenario.world.kinetic_energy();

    let summary = run_headless(&mut scenario, &mut NoInput, &mut LogRenderer::new(1000), 120).unwrap();

    assert_eq!(summary.ticks, 120);
    assert!(summary.checks > 0);
    assert_relative_eq!(scenario.world.kinetic_energy(), before, max_relative = 1e-9);
}

#[test]
fn ball_pit_strategies_find_the_same_overlaps() {
    let mut sap = Scenario::build_scenario(preset("ball_pit").unwrap()).unwrap();
    let mut bf = Scenario::build_scenario(preset("ball_pit").unwrap()).unwrap();
    bf.apply_event(InputEvent::ToggleBroadPhase).unwrap();
    assert_eq!(bf.broad_phase_name(), "brute_force");

    // pairs come out in a different order, so only the first tick is comparable
    let s = sap.step();
    let b = bf.step();
    assert_eq!(s.overlaps, b.overlaps);
    assert_eq!(b.checks, 200 * 199 / 2);
    assert!(s.checks < b.checks);
}

#[test]
fn scripted_events_are_applied_between_ticks() {
    let mut scenario = Scenario::build_scenario(preset("house").unwrap()).unwrap();
    let mut input = ScriptedInput::new(vec![(0, InputEvent::KickUp), (1, InputEvent::Reset)]);
    let mut renderer = LogRenderer::new(10);

    let summary = run_headless(&mut scenario, &mut input, &mut renderer, 1).unwrap();
    assert_eq!(summary.events, 1);
    assert_eq!(renderer.frames(), 1);

    // reset at tick 1 rebuilds the world before the second step
    let summary = run_headless(&mut scenario, &mut input, &mut renderer, 1).unwrap();
    assert_eq!(summary.events, 1);
    assert_eq!(scenario.world.bodies.len(), 10);
    assert_relative_eq!(scenario.world.t, scenario.parameters.dt, epsilon = 1e-15);

    // so the kick is gone: the world matches a fresh one stepped once
    let mut fresh = Scenario::build_scenario(preset("house").unwrap()).unwrap();
    fresh.step();
    for (b, f) in scenario.world.bodies.iter().zip(fresh.world.bodies.iter()) {
        assert_eq!(b.x, f.x);
        assert_eq!(b.v, f.v);
    }
}

#[test]
fn bounce_scenario_scripts_its_events() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/bounce.yaml");
    let scenario = Scenario::build_scenario(ScenarioConfig::load(path).unwrap()).unwrap();

    assert_eq!(
        scenario.scripted_events(),
        vec![
            (120, InputEvent::KickUp),
            (240, InputEvent::KickAngle(135.0)),
            (360, InputEvent::KickRandom),
        ]
    );
}

#[test]
fn bundled_scenarios_load() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");
    for name in ["wire.yaml", "ball_pit.yaml", "bounce.yaml"] {
        let cfg = ScenarioConfig::load(dir.join(name)).unwrap_or_else(|e| panic!("{name}: {e}"));
        let mut scenario = Scenario::build_scenario(cfg).unwrap();
        scenario.step();
        assert!(scenario.world.bodies.iter().all(|b| b.x.x.is_finite() && b.x.y.is_finite()));
    }
}

#[test]
fn wire_preset_stays_on_wire_over_many_ticks() {
    let mut scenario = Scenario::build_scenario(preset("wire").unwrap()).unwrap();
    for _ in 0..60 {
        scenario.step();
    }
    let wire = scenario.world.wire.unwrap();
    for b in &scenario.world.bodies {
        // bead collisions run after the projection, so allow their push
        assert!(((b.x - wire.center).norm() - wire.radius).abs() < 0.05);
    }
}
