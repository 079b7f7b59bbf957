/// Display sink for total-balance samples.
///
/// Receives one `(time label, total value)` pair per executed trade, in
/// cycle order. Purely for display; nothing feeds back into the core.
pub trait ChartSink {
    fn push(&mut self, time_label: &str, total_value: f64);
}

/// In-memory balance series rendered through the log.
#[derive(Debug, Default)]
pub struct BalanceChart {
    points: Vec<(String, f64)>,
}

impl BalanceChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &[(String, f64)] {
        &self.points
    }
}

impl ChartSink for BalanceChart {
    fn push(&mut self, time_label: &str, total_value: f64) {
        self.points.push((time_label.to_string(), total_value));

        let trend = match self.points.len() {
            0 | 1 => "",
            n => {
                let prev = self.points[n - 2].1;
                if total_value > prev {
                    " ▲"
                } else if total_value < prev {
                    " ▼"
                } else {
                    " ="
                }
            }
        };

        tracing::info!(
            "📊 Balance chart [{}]: ${:.2}{} ({} points)",
            time_label,
            total_value,
            trend,
            self.points.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_kept_in_order() {
        let mut chart = BalanceChart::new();

        chart.push("10:00:00", 1000.0);
        chart.push("10:05:00", 1100.0);
        chart.push("10:10:00", 950.0);

        let points = chart.points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0], ("10:00:00".to_string(), 1000.0));
        assert_eq!(points[2], ("10:10:00".to_string(), 950.0));
    }

    #[test]
    fn test_empty_chart() {
        let chart = BalanceChart::new();
        assert!(chart.points().is_empty());
    }
}
