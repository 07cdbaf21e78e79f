use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::returns::ReturnsAndYields;
use crate::types::Percent;

/// The four yields the verdict looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldMeasure {
    UnleveredConservative,
    UnleveredFavorable,
    LeveredConservative,
    LeveredFavorable,
}

impl YieldMeasure {
    pub const ALL: [YieldMeasure; 4] = [
        YieldMeasure::UnleveredConservative,
        YieldMeasure::UnleveredFavorable,
        YieldMeasure::LeveredConservative,
        YieldMeasure::LeveredFavorable,
    ];

    pub fn value(self, returns: &ReturnsAndYields) -> Percent {
        match self {
            YieldMeasure::UnleveredConservative => returns.net_yield_unlevered.conservative,
            YieldMeasure::UnleveredFavorable => returns.net_yield_unlevered.favorable,
            YieldMeasure::LeveredConservative => returns.net_yield_levered.conservative,
            YieldMeasure::LeveredFavorable => returns.net_yield_levered.favorable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViabilityDecision {
    pub meets_threshold: bool,
    /// Threshold actually applied, in percent
    pub threshold: Percent,
    /// Highest of the four yields
    pub best_yield: Percent,
    pub best_measure: YieldMeasure,
    /// Measures at or above the threshold
    pub qualifying_measures: Vec<YieldMeasure>,
}

/// Viable when any one of the four yields reaches the threshold.
pub fn assess_viability(returns: &ReturnsAndYields, threshold: Percent) -> ViabilityDecision {
    let mut best_measure = YieldMeasure::UnleveredConservative;
    let mut best_yield = Decimal::MIN;
    let mut qualifying_measures = Vec::with_capacity(YieldMeasure::ALL.len());

    for measure in YieldMeasure::ALL {
        let value = measure.value(returns);
        if value > best_yield {
            best_yield = value;
            best_measure = measure;
        }
        if value >= threshold {
            qualifying_measures.push(measure);
        }
    }

    ViabilityDecision {
        meets_threshold: !qualifying_measures.is_empty(),
        threshold,
        best_yield,
        best_measure,
        qualifying_measures,
    }
}
