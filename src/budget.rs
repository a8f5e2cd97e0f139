//! Monthly budget evaluation
//!
//! Classifies a month's spending against an optional budget ceiling and
//! computes the fill ratio for the progress bar.

use crate::models::Amount;

/// Percentage of the budget at which spending is flagged as a warning
pub const WARNING_PERCENT: f64 = 80.0;

/// Percentage of the budget at which the budget counts as exceeded
pub const LIMIT_PERCENT: f64 = 100.0;

/// Where the month stands against the budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetStatus {
    /// No budget configured
    Unset,
    /// Under 80% of the budget spent
    Ok { remaining: f64 },
    /// At least 80% but under 100% spent
    Warning { remaining: f64 },
    /// At or over the budget
    Exceeded { overage: f64 },
}

impl BudgetStatus {
    /// Check whether a budget is configured
    pub fn is_set(&self) -> bool {
        !matches!(self, BudgetStatus::Unset)
    }
}

/// Budget status plus the capped progress percentage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetEvaluation {
    pub status: BudgetStatus,
    /// Percentage of the budget spent, capped at 100; 0 when unset
    pub display_ratio: f64,
}

/// Evaluate a month's total against an optional budget
pub fn evaluate(month_total: f64, budget: Option<Amount>) -> BudgetEvaluation {
    let Some(budget) = budget else {
        return BudgetEvaluation {
            status: BudgetStatus::Unset,
            display_ratio: 0.0,
        };
    };

    let budget = budget.value();
    let pct = month_total / budget * 100.0;

    let status = if pct >= LIMIT_PERCENT {
        BudgetStatus::Exceeded {
            overage: month_total - budget,
        }
    } else if pct >= WARNING_PERCENT {
        BudgetStatus::Warning {
            remaining: budget - month_total,
        }
    } else {
        BudgetStatus::Ok {
            remaining: budget - month_total,
        }
    };

    BudgetEvaluation {
        status,
        display_ratio: pct.min(LIMIT_PERCENT),
    }
}
