//! Module for rendering force-vs-slip curves to PNG files.

use std::path::Path;

use plotters::prelude::*;

use crate::imports::*;
use crate::params::*;
use crate::simulation::ForceCurves;
use crate::sweep::{ForceSeries, SlipSweep};
use crate::utils::{finite_min_max, is_plottable, padded_range};

const X_DESC: &str = "Longitudinal slip (%)";

/// Writes one chart per force channel into an output directory. File names
/// are fixed, so rendering again overwrites the previous charts.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveRenderer {
    output_dir: PathBuf,
    size_px: (u32, u32),
}

impl CurveRenderer {
    /// Creates `output_dir` (and parents) if it does not exist.
    pub fn new<P: AsRef<Path>>(output_dir: P) -> anyhow::Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Could not create output directory {output_dir:?}"))?;
        Ok(Self {
            output_dir,
            size_px: FIGURE_SIZE_PX,
        })
    }

    pub fn with_size(mut self, width_px: u32, height_px: u32) -> Self {
        self.size_px = (width_px, height_px);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Longitudinal force Fx against slip, one line per slip angle.
    pub fn plot_longitudinal_force(
        &self,
        sweep: &SlipSweep,
        fx: &ForceSeries,
    ) -> anyhow::Result<PathBuf> {
        self.draw_force_chart(
            LONGITUDINAL_FORCE_FILE,
            "Longitudinal Force vs Longitudinal Slip",
            "Longitudinal force Fx (N)",
            sweep,
            fx,
        )
    }

    /// Lateral force Fy against slip, one line per slip angle.
    pub fn plot_lateral_force(&self, sweep: &SlipSweep, fy: &ForceSeries) -> anyhow::Result<PathBuf> {
        self.draw_force_chart(
            LATERAL_FORCE_FILE,
            "Lateral Force vs Longitudinal Slip",
            "Lateral force Fy (N)",
            sweep,
            fy,
        )
    }

    /// Both charts, longitudinal first.
    pub fn render(&self, sweep: &SlipSweep, curves: &ForceCurves) -> anyhow::Result<[PathBuf; 2]> {
        Ok([
            self.plot_longitudinal_force(sweep, &curves.longitudinal)?,
            self.plot_lateral_force(sweep, &curves.lateral)?,
        ])
    }

    fn draw_force_chart(
        &self,
        file_name: &str,
        title: &str,
        y_desc: &str,
        sweep: &SlipSweep,
        series: &ForceSeries,
    ) -> anyhow::Result<PathBuf> {
        ensure!(
            series.sweep_len() == sweep.len(),
            TyreError::InvalidInput(format!(
                "force series has {} samples per curve, sweep has {}",
                series.sweep_len(),
                sweep.len()
            ))
        );
        let path = self.output_dir.join(file_name);
        let x = sweep.percent();
        let (x_lo, x_hi) = padded_range(finite_min_max(x.iter().copied()));
        let (y_lo, y_hi) = padded_range(finite_min_max(
            series
                .iter()
                .flat_map(|c| c.force_n.iter().copied())
                .filter(|f| is_plottable(*f)),
        ));
        let n_skipped = series
            .iter()
            .flat_map(|c| c.force_n.iter())
            .filter(|f| !is_plottable(**f))
            .count();
        if n_skipped > 0 {
            log::warn!(
                "{file_name}: {n_skipped} non-finite or out-of-range force value(s) are left out of the chart"
            );
        }

        // backend borrows `path` until it is dropped
        {
            let root = BitMapBackend::new(&path, self.size_px).into_drawing_area();
            root.fill(&WHITE)?;
            let mut chart = ChartBuilder::on(&root)
                .caption(title, ("sans-serif", 28))
                .margin(20)
                .x_label_area_size(50)
                .y_label_area_size(80)
                .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;
            chart
                .configure_mesh()
                .x_desc(X_DESC)
                .y_desc(y_desc)
                .draw()?;

            for (idx, curve) in series.iter().enumerate() {
                let color = Palette99::pick(idx).to_rgba();
                let mut labelled = false;
                for segment in finite_segments(&x, &curve.force_n) {
                    let anno = if segment.len() == 1 {
                        chart.draw_series(segment.into_iter().map(|p| Circle::new(p, 3, color.filled())))?
                    } else {
                        chart.draw_series(LineSeries::new(segment, color.stroke_width(2)))?
                    };
                    if !labelled {
                        anno.label(curve.label()).legend(move |(x, y)| {
                            PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                        });
                        labelled = true;
                    }
                }
            }
            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;
            root.present()
                .with_context(|| format!("Could not write {path:?}"))?;
        }
        log::info!("wrote {path:?}");
        Ok(path)
    }
}

/// Split a curve into runs of consecutive plottable points.
fn finite_segments(x: &Array1<f64>, y: &Array1<f64>) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        if is_plottable(xi) && is_plottable(yi) {
            current.push((xi, yi));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_segments_break_at_nan() {
        let x = array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let y = array![0.0, 1.0, f64::NAN, 3.0, f64::INFINITY, 5.0];
        let segments = finite_segments(&x, &y);
        assert_eq!(
            segments,
            vec![vec![(0.0, 0.0), (1.0, 1.0)], vec![(3.0, 3.0)], vec![(5.0, 5.0)]]
        );
    }

    #[test]
    fn test_finite_segments_break_at_huge_values() {
        let x = array![0.0, 1.0, 2.0];
        let y = array![1.0, 1e308, 2.0];
        assert_eq!(
            finite_segments(&x, &y),
            vec![vec![(0.0, 1.0)], vec![(2.0, 2.0)]]
        );
    }

    #[test]
    fn test_finite_segments_of_all_nan_is_empty() {
        let x = array![0.0, 1.0];
        let y = array![f64::NAN, f64::NAN];
        assert!(finite_segments(&x, &y).is_empty());
    }

    #[test]
    fn test_that_new_creates_nested_output_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("a").join("b");
        let renderer = CurveRenderer::new(&dir).unwrap();
        assert!(dir.is_dir());
        assert_eq!(renderer.output_dir(), dir.as_path());
    }
}
