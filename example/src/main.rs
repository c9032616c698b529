use reveal_spring::{
    DEFAULT_FRAME_INTERVAL, DeclarativeSpring, DurationSpring, InterpolatingSpring, LayerSpring,
    MotionFunction, RetargetStrategy, SpringCurve, SpringParameter, sample_keyframes,
};
use tracing::{error, info};

/// Distance the demo motions travel, in points.
const DISTANCE: f64 = 320.0;

fn main() {
    init_tracing();

    let parameters = [
        ("declarative", SpringParameter::Declarative(DeclarativeSpring::default())),
        ("interactive", SpringParameter::Declarative(DeclarativeSpring::interactive())),
        ("interpolating", SpringParameter::Interpolating(InterpolatingSpring::default())),
        (
            "duration",
            SpringParameter::Duration(DurationSpring {
                duration: 0.6,
                damping_ratio: 0.7,
                initial_velocity: 0.0,
            }),
        ),
        ("layer", SpringParameter::Layer(LayerSpring::default())),
    ];

    for (name, parameter) in parameters {
        let curve = parameter.curve();
        info!(
            name,
            omega = curve.omega(),
            damping_ratio = curve.damping_ratio(),
            regime = ?curve.regime(),
            "translated spring"
        );
        animate(name, MotionFunction::simple(curve, 0.0, DISTANCE));
    }

    // Interrupt a running motion halfway back with each strategy.
    let curve = SpringCurve::new(0.5, 0.8, 0.0);
    for strategy in [
        RetargetStrategy::Override,
        RetargetStrategy::Blend,
        RetargetStrategy::KeepVelocity,
    ] {
        let motion = MotionFunction::simple(curve, 0.0, DISTANCE).retarget(
            0.15,
            curve,
            DISTANCE / 2.0,
            strategy,
        );
        animate(&format!("{strategy:?}"), motion);
    }
}

fn animate(name: &str, motion: MotionFunction) {
    match sample_keyframes(&motion, DEFAULT_FRAME_INTERVAL) {
        Ok(keyframes) => {
            let peak = keyframes
                .iter()
                .map(|frame| frame.value)
                .fold(f64::NEG_INFINITY, f64::max);
            info!(
                name,
                duration = motion.settling_duration(),
                frames = keyframes.len(),
                peak,
                "sampled motion"
            );
        }
        Err(err) => error!(name, %err, "failed to sample motion"),
    }
}

fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new("error,reveal_spring=info,example=info")
        {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .try_init();
}
