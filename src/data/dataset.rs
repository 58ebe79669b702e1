use serde::{Serialize, Deserialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// One labelled example.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
}

impl Sample {
    pub fn input(&self) -> Vec<f64> {
        vec![self.x1, self.x2]
    }

    pub fn target(&self) -> Vec<f64> {
        vec![self.y]
    }
}

/// Which field of a sample to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    X1,
    X2,
    Y,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::X1, Column::X2, Column::Y];

    pub fn name(&self) -> &'static str {
        match self {
            Column::X1 => "x1",
            Column::X2 => "x2",
            Column::Y => "y",
        }
    }

    pub fn get(&self, sample: &Sample) -> f64 {
        match self {
            Column::X1 => sample.x1,
            Column::X2 => sample.x2,
            Column::Y => sample.y,
        }
    }
}

/// Min / max / mean of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Ordered collection of samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(samples: Vec<Sample>) -> Dataset {
        Dataset { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn inputs(&self) -> Vec<Vec<f64>> {
        self.samples.iter().map(Sample::input).collect()
    }

    pub fn targets(&self) -> Vec<Vec<f64>> {
        self.samples.iter().map(Sample::target).collect()
    }

    /// Keeps the first `floor(len * (1 - validation_fraction))` samples for
    /// training and the rest for validation. Order is preserved; no shuffling
    /// happens here.
    pub fn split(&self, validation_fraction: f64) -> Result<(Dataset, Dataset)> {
        if !(0.0..1.0).contains(&validation_fraction) {
            return Err(Error::invalid("validation_split", validation_fraction, "must be in [0, 1)"));
        }
        let cut = ((self.len() as f64 * (1.0 - validation_fraction)).floor() as usize).min(self.len());
        Ok((
            Dataset::new(self.samples[..cut].to_vec()),
            Dataset::new(self.samples[cut..].to_vec()),
        ))
    }

    pub fn column_stats(&self, column: Column) -> Option<ColumnStats> {
        if self.is_empty() {
            return None;
        }
        let (min, max, sum) = self.samples.iter()
            .map(|s| column.get(s))
            .fold((f64::INFINITY, f64::NEG_INFINITY, 0.0), |(lo, hi, sum), v| {
                (lo.min(v), hi.max(v), sum + v)
            });
        Some(ColumnStats { min, max, mean: sum / self.len() as f64 })
    }

    /// Human-readable per-column summary.
    pub fn summary(&self) -> String {
        Column::ALL.iter()
            .map(|&c| match self.column_stats(c) {
                Some(s) => format!("{:<3} min {:>9.3}  max {:>9.3}  mean {:>8.3}", c.name(), s.min, s.max, s.mean),
                None => format!("{:<3} (empty)", c.name()),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Equal-width bin counts over `[lo, hi]`; values outside are clamped
    /// into the edge bins.
    pub fn histogram(&self, column: Column, bins: usize, lo: f64, hi: f64) -> Vec<usize> {
        let mut counts = vec![0usize; bins];
        if bins == 0 || hi <= lo {
            return counts;
        }
        let width = (hi - lo) / bins as f64;
        for sample in &self.samples {
            let v = column.get(sample);
            let idx = (((v - lo) / width).floor().max(0.0) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        counts
    }

    /// Writes the first `limit` rows as CSV with an `x1,x2,y` header.
    pub fn write_csv(&self, path: &Path, limit: usize) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "x1,x2,y")?;
        for s in self.samples.iter().take(limit) {
            writeln!(writer, "{},{},{}", s.x1, s.x2, s.y)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Dataset {
        Dataset::new(vec![
            Sample { x1: -1.0, x2: 2.0, y: -2.0 },
            Sample { x1: 3.0, x2: 3.0, y: 9.0 },
            Sample { x1: 0.5, x2: 4.0, y: 2.0 },
        ])
    }

    #[test]
    fn stats_cover_each_column() {
        let s = tiny().column_stats(Column::Y).unwrap();
        assert_eq!(s.min, -2.0);
        assert_eq!(s.max, 9.0);
        assert_eq!(s.mean, 3.0);
        assert!(Dataset::default().column_stats(Column::X1).is_none());
    }

    #[test]
    fn histogram_clamps_edges() {
        let counts = tiny().histogram(Column::X1, 2, 0.0, 2.0);
        // -1.0 clamps into bin 0, 3.0 into bin 1
        assert_eq!(counts, vec![2, 1]);
    }

    #[test]
    fn split_rejects_full_fraction() {
        assert!(tiny().split(1.0).is_err());
    }
}
