//! Per-frame distance table.

use serde::{Deserialize, Serialize};

/// Distances per collision pair per frame, indexed by frame.
///
/// Columns are the registered pairs in registration order; rows are frames
/// in recording order, each carrying the frame's raw timestamp. The table
/// is owned by the caller; the evaluator only appends to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceTable {
    pair_names: Vec<String>,
    timestamps_us: Vec<u64>,
    rows: Vec<Vec<f64>>,
}

impl DistanceTable {
    /// Create an empty table with the given column names.
    pub fn new(pair_names: Vec<String>) -> Self {
        Self {
            pair_names,
            timestamps_us: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Append one frame's distances.
    ///
    /// `distances` must have one value per column.
    pub fn push_row(&mut self, timestamp_us: u64, distances: Vec<f64>) {
        debug_assert_eq!(distances.len(), self.pair_names.len());
        self.timestamps_us.push(timestamp_us);
        self.rows.push(distances);
    }

    /// Number of frames.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table holds no frames.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of pair columns.
    #[inline]
    pub fn pair_count(&self) -> usize {
        self.pair_names.len()
    }

    /// Column names in registration order.
    #[inline]
    pub fn pair_names(&self) -> &[String] {
        &self.pair_names
    }

    /// Raw frame timestamps in microseconds.
    #[inline]
    pub fn timestamps_us(&self) -> &[u64] {
        &self.timestamps_us
    }

    /// Rows in frame order.
    #[inline]
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Frame times in seconds, re-zeroed to the first frame.
    pub fn relative_seconds(&self) -> Vec<f64> {
        let start = self.timestamps_us.first().copied().unwrap_or(0);
        self.timestamps_us
            .iter()
            .map(|&t| t.saturating_sub(start) as f64 / 1_000_000.0)
            .collect()
    }

    /// Gather one column by index.
    ///
    /// # Panics
    /// Panics if `col` is out of range.
    pub fn column(&self, col: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[col]).collect()
    }

    /// Gather one column by pair name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<f64>> {
        let col = self.pair_names.iter().position(|n| n == name)?;
        Some(self.column(col))
    }

    /// Select the frames inside a time window, re-zeroing the timebase.
    ///
    /// The window is expressed in seconds relative to this table's first
    /// frame, bounds exclusive (matching the analysis convention of
    /// cutting away the settle-in and wind-down phases). The resulting
    /// table's `relative_seconds` start at zero again.
    pub fn crop(&self, t_min_s: f64, t_max_s: f64) -> DistanceTable {
        let times = self.relative_seconds();
        let mut cropped = DistanceTable::new(self.pair_names.clone());
        for (i, &t) in times.iter().enumerate() {
            if t > t_min_s && t < t_max_s {
                cropped.push_row(self.timestamps_us[i], self.rows[i].clone());
            }
        }
        cropped
    }

    /// Write the table as CSV (`time,<pair>,...`), time re-zeroed seconds.
    pub fn write_csv(&self, out: &mut impl std::io::Write) -> std::io::Result<()> {
        write!(out, "time")?;
        for name in &self.pair_names {
            write!(out, ",{}", name)?;
        }
        writeln!(out)?;

        for (t, row) in self.relative_seconds().iter().zip(&self.rows) {
            write!(out, "{:.6}", t)?;
            for d in row {
                write!(out, ",{:.9}", d)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_table() -> DistanceTable {
        let mut table = DistanceTable::new(vec!["a".to_string(), "b".to_string()]);
        table.push_row(5_000_000, vec![0.5, 1.0]);
        table.push_row(6_000_000, vec![0.4, 1.1]);
        table.push_row(7_000_000, vec![0.3, 1.2]);
        table.push_row(8_000_000, vec![0.2, 1.3]);
        table
    }

    #[test]
    fn test_relative_seconds_rezeroed() {
        let table = sample_table();
        let times = table.relative_seconds();
        assert_relative_eq!(times[0], 0.0);
        assert_relative_eq!(times[3], 3.0);
    }

    #[test]
    fn test_column_access() {
        let table = sample_table();
        assert_eq!(table.column(0), vec![0.5, 0.4, 0.3, 0.2]);
        assert_eq!(table.column_by_name("b").unwrap(), vec![1.0, 1.1, 1.2, 1.3]);
        assert!(table.column_by_name("c").is_none());
    }

    #[test]
    fn test_crop_window_rezeroes() {
        let table = sample_table();
        let cropped = table.crop(0.5, 2.5);

        assert_eq!(cropped.len(), 2);
        assert_eq!(cropped.column(0), vec![0.4, 0.3]);
        let times = cropped.relative_seconds();
        assert_relative_eq!(times[0], 0.0);
        assert_relative_eq!(times[1], 1.0);
    }

    #[test]
    fn test_csv_output_shape() {
        let table = sample_table();
        let mut buffer = Vec::new();
        table.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "time,a,b");
        assert!(lines[1].starts_with("0.000000,"));
    }
}
