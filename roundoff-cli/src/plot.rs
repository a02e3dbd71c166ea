use std::path::Path;

use plotters::{
    chart::ChartBuilder,
    prelude::{BitMapBackend, IntoDrawingArea as _, IntoLogRange as _, PathElement},
    series::LineSeries,
    style::{BLACK, Color as _, RED, WHITE},
};

/// Draws |error| against step index on a log scale. Zero errors can't be shown and are skipped.
pub fn plot_error_curve(
    path: &Path,
    name: &str,
    errors: &[(usize, f64)],
) -> Result<(), Box<dyn std::error::Error>> {
    let points = plottable_points(errors);
    let (low, high) = log_range(&points).ok_or("no positive errors to plot")?;
    let last_step = points.iter().map(|(i, _)| *i).fold(1.0, f64::max);

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("{name}: error vs step"), ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0.5f64..last_step + 0.5, (low..high).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Step")
        .y_desc("Absolute error")
        .y_label_formatter(&|v| format!("{:.0e}", v))
        .draw()?;

    chart
        .draw_series(LineSeries::new(points.iter().cloned(), &RED))?
        .label(name)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], &RED));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn plottable_points(errors: &[(usize, f64)]) -> Vec<(f64, f64)> {
    errors
        .iter()
        .filter(|(_, e)| e.is_finite() && *e > 0.0)
        .map(|&(i, e)| (i as f64, e))
        .collect()
}

/// Value range padded by a factor of two on each side.
fn log_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let min = points.iter().map(|(_, e)| *e).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|(_, e)| *e).fold(f64::NEG_INFINITY, f64::max);
    if min.is_finite() && max.is_finite() {
        Some((min / 2.0, max * 2.0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_errors_a_log_axis_cannot_show() {
        let points = plottable_points(&[(1, 1.0), (2, 0.0), (3, f64::NAN), (4, 1e-9)]);
        assert_eq!(points, vec![(1.0, 1.0), (4.0, 1e-9)]);
    }

    #[test]
    fn draws_default_sweep() {
        use roundoff_core::{Sweep, SweepConfig};

        let series = Sweep::<f64>::new(&SweepConfig::default())
            .unwrap()
            .run()
            .unwrap();
        let errors: Vec<(usize, f64)> = series
            .samples()
            .iter()
            .map(|s| (s.index, s.absolute_error()))
            .collect();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors.png");
        plot_error_curve(&path, "hist", &errors).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn nothing_positive_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors.png");
        assert!(plot_error_curve(&path, "hist", &[(1, 0.0)]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn range_is_padded() {
        assert_eq!(log_range(&[(1.0, 1.0), (2.0, 1e-8)]), Some((5e-9, 2.0)));
        assert_eq!(log_range(&[]), None);
    }
}
