use approx::assert_relative_eq;
#[cfg(feature = "log")]
use log::LevelFilter;

use crate::{ResultSeries, Sweep, SweepConfig, SweepError, WorkingFloat};

pub fn init_logger() {
    #[cfg(feature = "log")]
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Warn)
        .filter(Some("roundoff_core"), LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

fn default_sweep<T: WorkingFloat>() -> ResultSeries<T> {
    Sweep::<T>::new(&SweepConfig::default())
        .unwrap()
        .run()
        .unwrap()
}

fn assert_u_shaped<T: WorkingFloat>(series: &ResultSeries<T>) {
    let first = series.get(1).unwrap().absolute_error();
    let last = series.get(series.len()).unwrap().absolute_error();
    let min = series.minimum().unwrap();

    assert!(min.absolute_error() < first);
    assert!(min.absolute_error() < last);
    assert!(min.index > 1 && min.index < series.len());
}

#[test]
fn default_sweep_has_80_one_based_steps() {
    init_logger();

    let series = default_sweep::<f64>();
    assert_eq!(series.len(), 80);
    for (i, sample) in series.samples().iter().enumerate() {
        assert_eq!(sample.index, i + 1);
    }
}

#[test]
fn step_halves_every_iteration() {
    let series = default_sweep::<f64>();
    assert_eq!(series.get(1).unwrap().step(), 1.0);
    for pair in series.samples().windows(2) {
        assert_eq!(pair[1].step(), pair[0].step() / 2.0);
    }
}

#[test]
fn first_step_reproduces_unit_step_error() {
    let series = default_sweep::<f64>();
    let first = series.get(1).unwrap().estimate;
    assert_relative_eq!(first.estimated, 1.6666666666666667, epsilon = 1e-15);
    assert_relative_eq!(first.true_derivative, 2.0 / 3.0, epsilon = 1e-15);
    assert_relative_eq!(first.absolute_error, 1.0, epsilon = 1e-15);
}

#[test]
fn error_curve_is_u_shaped_in_double() {
    init_logger();
    assert_u_shaped(&default_sweep::<f64>());
}

#[test]
fn error_curve_is_u_shaped_in_single() {
    assert_u_shaped(&default_sweep::<f32>());
}

#[test]
fn single_precision_bottoms_out_earlier() {
    let single = default_sweep::<f32>();
    let double = default_sweep::<f64>();
    let single_min = single.minimum().unwrap();
    let double_min = double.minimum().unwrap();

    assert!(single_min.index < double_min.index);
    assert!((single_min.absolute_error() as f64) > double_min.absolute_error());
}

#[test]
fn truncation_error_equals_step_while_large() {
    // f(x + h) - f(x) = 2xh + h^2, so the forward difference is off by exactly h
    let series = default_sweep::<f64>();
    for sample in &series.samples()[..10] {
        assert_relative_eq!(sample.absolute_error(), sample.step(), max_relative = 1e-6);
    }
}

#[test]
fn smallest_steps_lose_the_difference_entirely() {
    // 2^-79 is far below half an ulp of 1/3, so x + h == x
    let series = default_sweep::<f64>();
    let last = series.get(80).unwrap().estimate;
    assert_eq!(last.shifted, last.x);
    assert_eq!(last.estimated, 0.0);
    assert_eq!(last.absolute_error, last.true_derivative);
}

#[test]
fn underflowing_step_fails_at_first_zero() {
    let config = SweepConfig {
        divisor: 1e30,
        ..Default::default()
    };
    // 1, 1e-30, then 1e-60 rounds to zero in single precision
    let result = Sweep::<f32>::new(&config).unwrap().run();
    assert_eq!(result.unwrap_err(), SweepError::StepUnderflow { index: 3 });
}

#[test]
fn sweep_is_deterministic() {
    let a = default_sweep::<f32>();
    let b = default_sweep::<f32>();
    assert_eq!(a.samples(), b.samples());
}
