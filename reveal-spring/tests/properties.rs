use reveal_spring::{
    DEFAULT_FRAME_INTERVAL, DurationSpring, Keyframe, MotionFunction, NewtonSolver,
    RetargetStrategy, SolverError, SolverOptions, SpringCurve, SpringParameter, Stride,
    sample_keyframes, single_root_of_cubic,
};

const TOLERANCE: f64 = 1e-3;

#[test]
fn velocity_matches_finite_difference() {
    let h = 1e-6;
    for omega in [1.0, 2.0, 3.0] {
        for zeta in [0.2, 0.8, 1.0, 1.5, 3.0] {
            for v0 in -10..=10 {
                let curve = SpringCurve::from_omega(omega, zeta, v0 as f64);
                for i in 0..1000 {
                    let t = i as f64 * 0.1;
                    let numeric = (curve.position(t + h) - curve.position(t - h)) / (2.0 * h);
                    assert!(
                        (numeric - curve.velocity(t)).abs() < 1e-6,
                        "ω = {omega}, ζ = {zeta}, v0 = {v0}, t = {t}"
                    );
                }
            }
        }
    }
}

#[test]
fn underdamped_matches_sine_cosine_form() {
    for response in [0.3, 0.5, 1.0, 2.0] {
        for zeta in [0.1, 0.5, 0.9] {
            for v0 in [-5.0, 0.0, 5.0] {
                let curve = SpringCurve::new(response, zeta, v0);
                let a = -curve.omega() * zeta;
                let b = curve.omega() * (1.0 - zeta * zeta).sqrt();
                let c2 = (v0 + a) / b;
                for i in 0..200 {
                    let t = i as f64 * 0.05;
                    let expected = (a * t).exp() * (-(b * t).cos() + c2 * (b * t).sin()) + 1.0;
                    assert!(
                        (curve.position(t) - expected).abs() < 1e-10,
                        "response = {response}, ζ = {zeta}, v0 = {v0}, t = {t}"
                    );
                }
            }
        }
    }
}

#[test]
fn cubic_root_satisfies_equation() {
    let x = single_root_of_cubic(1.0, 0.0, 0.0, 8.0).unwrap();
    assert!((x + 2.0).abs() < 1e-12);

    let mut solved = 0;
    for a in [-2.0, 1.0, 2.0, 10.0] {
        for b in (-30..=30).step_by(3) {
            for c in (-30..=30).step_by(3) {
                for d in (-30..=30).step_by(3) {
                    let (b, c, d) = (b as f64, c as f64, d as f64);
                    match single_root_of_cubic(a, b, c, d) {
                        Ok(x) => {
                            let residual = a * x * x * x + b * x * x + c * x + d;
                            assert!(residual.abs() < 1e-8, "({a}, {b}, {c}, {d}) -> {x}");
                            solved += 1;
                        }
                        Err(error) => assert_eq!(error, SolverError::ThreeRealRootsUnsupported),
                    }
                }
            }
        }
    }
    assert!(solved > 0);
}

#[test]
fn newton_finds_square_roots() {
    let solver = NewtonSolver::default();
    let f = |x: f64| x * x - 2.0;
    let df = |x: f64| 2.0 * x;
    let positive = solver.solve(f, df, 3.0).unwrap();
    let negative = solver.solve(f, df, -3.0).unwrap();
    assert!((positive - 2f64.sqrt()).abs() < 1e-8);
    assert!((negative + 2f64.sqrt()).abs() < 1e-8);
}

#[test]
fn settling_duration_is_last_crossing() {
    let zetas = [
        0.05, 0.1, 0.2, 0.3, 0.5, 0.8, 0.95, 0.999, 1.0, 1.0000001, 1.2, 1.5, 3.0,
    ];
    let velocities = [
        -10.0, -5.0, -3.0, -1.0, -0.1, 0.0, 0.5, 1.0, 3.0, 5.0, 10.0, 20.0,
    ];
    for response in [0.3, 0.5, 1.0, 2.0] {
        for zeta in zetas {
            for v0 in velocities {
                let curve = SpringCurve::new(response, zeta, v0);
                let duration = curve.settling_duration();
                assert!(
                    ((curve.position(duration) - 1.0).abs() - TOLERANCE).abs() < 1e-6,
                    "{curve:?} at {duration}"
                );

                let step = 0.01 * response;
                let mut t = duration + step;
                while t < 50.0 * response {
                    assert!(
                        (curve.position(t) - 1.0).abs() < TOLERANCE,
                        "{curve:?} leaves the band at {t} after {duration}"
                    );
                    t += step;
                }
            }
        }
    }
}

#[test]
fn omega_inverts_duration() {
    for duration in [1.0, 3.0] {
        for zeta in 1..10 {
            let zeta = zeta as f64 / 10.0;
            for v0 in 0..=50 {
                let v0 = -10.0 + v0 as f64 * 0.2;
                let curve = SpringCurve::from(DurationSpring {
                    duration,
                    damping_ratio: zeta,
                    initial_velocity: v0,
                });
                let a = -curve.omega() * zeta;
                let b = curve.omega() * (1.0 - zeta * zeta).sqrt();
                let c2 = (v0 + a) / b;
                let estimate = (TOLERANCE / c2.abs()).ln() / a;
                assert!(
                    (estimate - duration).abs() < 1e-8,
                    "D = {duration}, ζ = {zeta}, v0 = {v0}: {estimate}"
                );
            }
        }
    }
}

#[test]
fn stride_index_before() {
    assert_eq!(Stride::new(10.0, 1.0).k_before(15.5), 5);
    assert_eq!(Stride::new(5.0, 0.1).k_before(4.35), -7);
}

#[test]
fn retargeted_keyframes_end_on_target() {
    let curve = SpringCurve::new(0.4, 0.75, 0.0);
    for strategy in [
        RetargetStrategy::Override,
        RetargetStrategy::Blend,
        RetargetStrategy::KeepVelocity,
    ] {
        let motion = MotionFunction::simple(curve, 0.0, 100.0).retarget(0.2, curve, 40.0, strategy);
        let keyframes = sample_keyframes(&motion, DEFAULT_FRAME_INTERVAL).unwrap();

        let (last, frames) = keyframes.split_last().unwrap();
        assert_eq!(last.value, 40.0);
        assert_eq!(last.time, motion.settling_duration());
        for frame in frames {
            assert_eq!(frame.value, motion.value(frame.time));
        }
    }
}

#[test]
fn public_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SpringCurve>();
    assert_send_sync::<SpringParameter>();
    assert_send_sync::<SolverOptions>();
    assert_send_sync::<SolverError>();
    assert_send_sync::<MotionFunction>();
    assert_send_sync::<Keyframe>();
}
