//! Ranked result display model

use crate::types::{PredictionResult, TopPrediction};
use std::sync::Arc;

/// Accent used for a bar, fixed by rank position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankAccent {
    Primary,
    Secondary,
    Muted,
}

impl RankAccent {
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            0 => RankAccent::Primary,
            1 => RankAccent::Secondary,
            _ => RankAccent::Muted,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarView {
    pub label: String,
    pub probability_text: String,
    /// Bar fill in `0.0..=1.0`
    pub fill: f32,
    pub accent: RankAccent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub headline: String,
    pub confidence: String,
    pub bars: [BarView; 3],
}

impl ResultView {
    pub fn from_result(result: &PredictionResult) -> Self {
        let bars = std::array::from_fn(|rank| bar(rank, &result.top_3_predictions[rank]));
        Self {
            headline: result.predicted_class.clone(),
            confidence: result.confidence.clone(),
            bars,
        }
    }
}

fn bar(rank: usize, prediction: &TopPrediction) -> BarView {
    BarView {
        label: prediction.animal.clone(),
        probability_text: prediction.probability.clone(),
        fill: parse_probability(&prediction.probability),
        accent: RankAccent::for_rank(rank),
    }
}

/// Parse a percentage string such as `"73.5%"` into a fill fraction.
///
/// Anything unparseable, non-finite or empty gives `0.0`; values outside
/// `0..=100` are clamped.
pub fn parse_probability(text: &str) -> f32 {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    match number.parse::<f32>() {
        Ok(value) if value.is_finite() => (value / 100.0).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// Keeps the last view and rebuilds it only when a different result arrives
#[derive(Default)]
pub struct ResultViewCache {
    cached: Option<(Arc<PredictionResult>, ResultView)>,
}

impl ResultViewCache {
    pub fn view_for(&mut self, result: &Arc<PredictionResult>) -> &ResultView {
        let stale = !matches!(&self.cached, Some((source, _)) if Arc::ptr_eq(source, result));
        if stale {
            self.cached = None;
        }
        let (_, view) = self
            .cached
            .get_or_insert_with(|| (result.clone(), ResultView::from_result(result)));
        view
    }

    pub fn clear(&mut self) {
        self.cached = None;
    }
}
