use polars::prelude::*;

/// Summary statistics for one numeric column
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

/// Calculate summary statistics from a Series using polars.
///
/// Non-numeric series (or series that cannot be cast to f64) yield the
/// default zeroed stats; null cells are ignored by the aggregations.
pub fn calculate_stats(series: &Series) -> Stats {
    let count = series.len();

    if count == 0 {
        return Stats::default();
    }

    // Cast to f64 for numeric operations
    let series_f64 = match series.cast(&DataType::Float64) {
        Ok(s) => s,
        Err(_) => return Stats::default(),
    };

    let chunked = match series_f64.f64() {
        Ok(c) => c,
        Err(_) => return Stats::default(),
    };

    Stats {
        mean: chunked.mean().unwrap_or(0.0),
        min: chunked.min().unwrap_or(0.0),
        max: chunked.max().unwrap_or(0.0),
        count,
    }
}

/// Min/max of a Series as a tuple (0.0, 0.0 when empty or non-numeric)
pub fn value_range(series: &Series) -> (f64, f64) {
    let stats = calculate_stats(series);
    (stats.min, stats.max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_stats() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let series = Series::new("test".into(), &data);
        let stats = calculate_stats(&series);

        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.count, 5);
    }

    #[test]
    fn test_empty_series() {
        let data: Vec<f64> = vec![];
        let series = Series::new("test".into(), &data);
        let stats = calculate_stats(&series);

        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.count, 0);
    }

    #[test]
    fn test_string_series_parses() {
        let series = Series::new("test".into(), &["1.5", "2.5"]);
        let (min, max) = value_range(&series);
        assert_eq!(min, 1.5);
        assert_eq!(max, 2.5);
    }
}
