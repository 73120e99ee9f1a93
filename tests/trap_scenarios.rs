// Reference trap scenarios run end to end through the public API.

use ion_trap_sim::sweep::{SweepConfig, SweepRunner};
use ion_trap_sim::{RecordPolicy, RunOutcome, Species, Trap, TrapConfig, TrapError};

const D: f64 = 7.778e-3;
const R: f64 = 2.5e-3;
const BIAS: [f64; 4] = [0.0, -0.3, 0.0, -0.3];
const DURATION: f64 = 1e-2;
const STEP: f64 = 1e-9;

fn reference_trap(v_rf: f64) -> Trap {
    let mut trap = Trap::new(TrapConfig::new(D, R, v_rf, BIAS, 1e6)).unwrap();
    trap.add_ion(
        Species::Sr88Ion.particle(),
        D / 2.0 + 0.7e-3,
        D / 2.0 + 0.7e-3,
        700.0,
        0.0,
    );
    trap
}

#[test]
fn strong_drive_confines_for_full_duration() {
    let mut trap = reference_trap(56.0);
    // 1e7 steps; keep every 10000th plus the terminal sample
    let outcome = trap
        .run_simulation_with(DURATION, STEP, RecordPolicy::Stride(10_000))
        .unwrap();
    assert!(outcome.is_success(), "expected confinement, got {:?}", outcome);

    let samples = trap.trajectory();
    let last = samples.last().unwrap();
    assert!((DURATION - last.time).abs() <= STEP, "last sample at {}", last.time);
    for s in samples {
        assert!(s.position.x > R && s.position.x < D - R);
        assert!(s.position.y > R && s.position.y < D - R);
    }
}

#[test]
fn weak_drive_loses_the_ion() {
    let mut trap = reference_trap(1.0);
    let outcome = trap.run_simulation(DURATION, STEP).unwrap();
    assert!(!outcome.is_success());
    let RunOutcome::Lost { time } = outcome else {
        panic!("expected loss, got {:?}", outcome);
    };
    assert!(time < 1e-3, "lost only at {}", time);

    let samples = trap.trajectory();
    let (last, rest) = samples.split_last().unwrap();
    assert_eq!(last.time, time);
    for s in rest {
        assert!(s.position.x > R && s.position.x < D - R, "x escaped at {}", s.time);
        assert!(s.position.y > R && s.position.y < D - R, "y escaped at {}", s.time);
    }
    let x_out = !(last.position.x > R && last.position.x < D - R);
    let y_out = !(last.position.y > R && last.position.y < D - R);
    assert!(x_out || y_out);
}

#[test]
fn touching_electrodes_are_a_configuration_error() {
    let result = Trap::new(TrapConfig::new(1e-3, 1e-3, 56.0, BIAS, 1e6));
    assert!(matches!(result, Err(TrapError::InvalidGeometry { .. })));
}

#[test]
fn sequential_and_parallel_sweeps_agree() {
    let base = SweepConfig {
        duration: 2e-5,
        start: 1.0,
        stop: 61.0,
        increment: 15.0,
        record_stride: 0,
        ..SweepConfig::default()
    };
    let parallel = SweepRunner::new(base.clone()).unwrap().run_all().unwrap();
    let sequential = SweepRunner::new(SweepConfig { parallel: false, ..base })
        .unwrap()
        .run_all()
        .unwrap();

    assert_eq!(parallel, sequential);
    let values: Vec<f64> = parallel.iter().map(|r| r.value).collect();
    assert_eq!(values, vec![1.0, 16.0, 31.0, 46.0]);
    assert!(parallel.iter().all(|r| r.samples_recorded == 1));
    // At 1 V the ion escapes within a couple of microseconds
    assert!(!parallel[0].outcome.is_success());
}

#[test]
fn sweep_trial_matches_a_hand_built_trap() {
    let cfg = SweepConfig {
        duration: 5e-6,
        ..SweepConfig::default()
    };
    let runner = SweepRunner::new(cfg).unwrap();
    let (result, trap) = runner.run_trial(56.0, RecordPolicy::EveryStep).unwrap();

    let mut manual = reference_trap(56.0);
    let outcome = manual.run_simulation(5e-6, STEP).unwrap();
    assert_eq!(result.outcome, outcome);
    assert_eq!(trap.trajectory(), manual.trajectory());
    assert_eq!(result.report_line("V").split(':').next(), Some("56 V"));
}
