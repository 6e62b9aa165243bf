mod rules;

use serde::{Deserialize, Serialize};

use super::domain::ScreeningResults;

/// Screening categories that contribute to the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningCategory {
    Credit,
    Income,
    References,
    Background,
    Employment,
}

impl ScreeningCategory {
    pub const ALL: [ScreeningCategory; 5] = [
        ScreeningCategory::Credit,
        ScreeningCategory::Income,
        ScreeningCategory::References,
        ScreeningCategory::Background,
        ScreeningCategory::Employment,
    ];

    /// Points the category can contribute. Always counted in the denominator.
    pub const fn max_points(self) -> f64 {
        match self {
            ScreeningCategory::Credit => 30.0,
            ScreeningCategory::Income => 25.0,
            ScreeningCategory::References => 20.0,
            ScreeningCategory::Background => 15.0,
            ScreeningCategory::Employment => 10.0,
        }
    }
}

/// Contribution of one category, kept for review audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub category: ScreeningCategory,
    pub earned: f64,
    pub possible: f64,
    pub notes: String,
}

/// Per-category detail plus the rounded overall score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    pub earned: f64,
    pub possible: f64,
    pub overall_score: u8,
}

impl ScoreBreakdown {
    pub fn component(&self, category: ScreeningCategory) -> Option<&ScoreComponent> {
        self.components
            .iter()
            .find(|component| component.category == category)
    }
}

pub fn score_breakdown(screening: &ScreeningResults) -> ScoreBreakdown {
    let components: Vec<ScoreComponent> = ScreeningCategory::ALL
        .into_iter()
        .map(|category| {
            let (earned, notes) = rules::score_category(category, screening);
            ScoreComponent {
                category,
                earned,
                possible: category.max_points(),
                notes,
            }
        })
        .collect();

    let earned: f64 = components.iter().map(|component| component.earned).sum();
    let possible: f64 = components.iter().map(|component| component.possible).sum();
    let overall_score = if possible > 0.0 {
        (100.0 * earned / possible).round().clamp(0.0, 100.0) as u8
    } else {
        0
    };

    ScoreBreakdown {
        components,
        earned,
        possible,
        overall_score,
    }
}

/// Overall 0 to 100 score for a screening snapshot.
pub fn overall_score(screening: &ScreeningResults) -> u8 {
    score_breakdown(screening).overall_score
}
