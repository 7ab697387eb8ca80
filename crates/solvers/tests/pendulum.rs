use std::f64::consts::FRAC_PI_4;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use kutta_core::{
    Equation, EquationSystem, Parameters, TimeGrid,
    config::{BisectionConfig, BisectionMode},
};
use kutta_solvers::{
    shooting::{self, Status},
    transient::rk4::{ExitCondition, Integrator},
};

/// `x' = v`, `v' = -omega^2 sin(x)`.
fn pendulum() -> (EquationSystem, Parameters) {
    let system = EquationSystem::new(vec![
        Equation::new("x", |_t: f64, s: &[f64], _p: &Parameters| s[1]).with_initial_value(FRAC_PI_4),
        Equation::new("v", |_t: f64, s: &[f64], p: &Parameters| -p[0] * p[0] * s[0].sin())
            .with_initial_value(1.0),
    ])
    .expect("pendulum has equations");
    (system, Parameters::new().with("omega", 1.0))
}

fn energy(x: f64, v: f64, omega: f64) -> f64 {
    0.5 * v * v - omega * omega * x.cos()
}

#[test]
fn starts_from_initial_conditions() {
    let (system, params) = pendulum();
    let integrator = Integrator::new(TimeGrid::linear(0.0, 1.0, 10_000).unwrap());

    let solution = integrator.run(&system, &params).unwrap();

    assert_eq!(solution.times[0], 0.0);
    assert_eq!(solution.trajectory.value(0, 0), Some(FRAC_PI_4));
    assert_eq!(solution.trajectory.value(1, 0), Some(1.0));
    assert_eq!(solution.trajectory.len(), 10_000);
}

#[test]
fn conserves_energy() {
    let (system, params) = pendulum();
    let integrator = Integrator::new(TimeGrid::linear(0.0, 1.0, 10_000).unwrap());

    let solution = integrator.run(&system, &params).unwrap();

    let x = solution.trajectory.component(0).unwrap();
    let v = solution.trajectory.component(1).unwrap();
    let initial = energy(x[0], v[0], 1.0);
    for (x, v) in x.iter().zip(v) {
        assert_abs_diff_eq!(energy(*x, *v, 1.0), initial, epsilon = 1e-4);
    }
}

#[test]
fn exit_condition_stops_at_turning_point() {
    let (system, params) = pendulum();
    let integrator = Integrator::new(TimeGrid::linear(0.0, 10.0, 1001).unwrap())
        .with_exit_condition(ExitCondition::new(
            |_t: f64, s: &[f64], _p: &Parameters| s[1] < 0.0,
            5,
        ));

    let solution = integrator.run(&system, &params).unwrap();

    let j0 = solution.triggered_at.expect("pendulum swings back");
    let v = solution.trajectory.component(1).unwrap();
    assert!(v[j0] < 0.0);
    assert!(v[j0 - 1] >= 0.0);
    assert_eq!(solution.exit_index, j0 + 1 + 5);
    assert_eq!(solution.trajectory.len(), solution.exit_index);
}

#[test]
fn shoots_initial_velocity() {
    let (mut system, mut params) = pendulum();
    let integrator = Integrator::new(TimeGrid::linear(0.0, 1.0, 1000).unwrap());
    let target = |_t: f64, s: &[f64], _p: &Parameters| s[1] - 1.0;
    let config = BisectionConfig::new(BisectionMode::InitialCondition, 1, -1.0, 5.0, 1e-8);

    let solution =
        shooting::solve_unobserved(&integrator, &mut system, &mut params, &target, &config)
            .expect("should solve");

    assert_eq!(solution.status, Status::Converged);
    assert_relative_eq!(solution.root, 1.912_990_77, epsilon = 1e-6);

    // The resolved initial velocity now lands on v(1) = 1.
    let resolved = integrator.run(&system, &params).unwrap();
    assert_eq!(resolved.trajectory.value(1, 0), Some(solution.root));
    assert_abs_diff_eq!(resolved.final_state()[1], 1.0, epsilon = 1e-6);
}

#[test]
fn shoots_frequency() {
    let (mut system, mut params) = pendulum();
    let integrator = Integrator::new(TimeGrid::linear(0.0, 1.0, 1000).unwrap());
    // Choose omega so the pendulum reaches v(1) = 0.5.
    let target = |_t: f64, s: &[f64], _p: &Parameters| s[1] - 0.5;
    let config = BisectionConfig::new(BisectionMode::Parameter, 0, 0.1, 2.0, 1e-9);

    let solution =
        shooting::solve_unobserved(&integrator, &mut system, &mut params, &target, &config)
            .expect("should solve");

    assert_eq!(solution.status, Status::Converged);
    assert_eq!(params[0], solution.root);

    let resolved = integrator.run(&system, &params).unwrap();
    assert_abs_diff_eq!(resolved.final_state()[1], 0.5, epsilon = 1e-6);
}
