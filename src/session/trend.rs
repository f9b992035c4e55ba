use std::collections::VecDeque;

/// Rolling window of the last few (label, ax, ay) samples.
///
/// The three sequences are only ever changed together and always have the
/// same length.
#[derive(Debug)]
pub struct TrendBuffer {
    labels: VecDeque<String>,
    series_ax: VecDeque<f64>,
    series_ay: VecDeque<f64>,
    max_samples: usize,
}

impl TrendBuffer {
    pub fn new(max_samples: usize) -> Self {
        Self {
            labels: VecDeque::with_capacity(max_samples + 1),
            series_ax: VecDeque::with_capacity(max_samples + 1),
            series_ay: VecDeque::with_capacity(max_samples + 1),
            max_samples,
        }
    }

    pub fn push(&mut self, timestamp: impl Into<String>, ax: f64, ay: f64) {
        self.labels.push_back(timestamp.into());
        self.series_ax.push_back(ax);
        self.series_ay.push_back(ay);

        // 超过最大样本数时从前面移除最旧的数据
        if self.labels.len() > self.max_samples {
            self.labels.pop_front();
            self.series_ax.pop_front();
            self.series_ay.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_samples
    }

    pub fn labels(&self) -> &VecDeque<String> {
        &self.labels
    }

    pub fn ax(&self) -> &VecDeque<f64> {
        &self.series_ax
    }

    pub fn ay(&self) -> &VecDeque<f64> {
        &self.series_ay
    }

    pub fn label_at(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// `[index, value]` pairs for the ax series, oldest at index 0.
    pub fn points_ax(&self) -> Vec<[f64; 2]> {
        Self::indexed(&self.series_ax)
    }

    pub fn points_ay(&self) -> Vec<[f64; 2]> {
        Self::indexed(&self.series_ay)
    }

    fn indexed(series: &VecDeque<f64>) -> Vec<[f64; 2]> {
        series
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn eleventh_sample_drops_the_first() {
        let mut trend = TrendBuffer::new(10);
        for i in 1..=11 {
            trend.push(format!("t{}", i), i as f64, -(i as f64));
        }

        assert_eq!(trend.len(), 10);
        assert_eq!(trend.ax().len(), 10);
        assert_eq!(trend.ay().len(), 10);

        let labels: Vec<&str> = trend.labels().iter().map(String::as_str).collect();
        let expected: Vec<String> = (2..=11).map(|i| format!("t{}", i)).collect();
        assert_eq!(labels, expected.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(trend.ax().front(), Some(&2.0));
        assert_eq!(trend.ay().back(), Some(&-11.0));
    }

    #[test]
    fn points_are_indexed_from_oldest() {
        let mut trend = TrendBuffer::new(3);
        trend.push("a", 0.5, -0.5);
        trend.push("b", 0.25, 0.75);

        assert_eq!(trend.points_ax(), vec![[0.0, 0.5], [1.0, 0.25]]);
        assert_eq!(trend.points_ay(), vec![[0.0, -0.5], [1.0, 0.75]]);
        assert_eq!(trend.label_at(1), Some("b"));
        assert_eq!(trend.label_at(2), None);
    }

    proptest! {
        #[test]
        fn sequences_stay_aligned(samples in proptest::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 0..40), cap in 1usize..16) {
            let mut trend = TrendBuffer::new(cap);
            for (i, (ax, ay)) in samples.iter().enumerate() {
                trend.push(i.to_string(), *ax, *ay);
                prop_assert_eq!(trend.labels().len(), trend.ax().len());
                prop_assert_eq!(trend.ax().len(), trend.ay().len());
                prop_assert!(trend.len() <= cap);
            }
            if let Some((ax, ay)) = samples.last() {
                prop_assert_eq!(trend.ax().back(), Some(ax));
                prop_assert_eq!(trend.ay().back(), Some(ay));
            }
        }
    }
}
