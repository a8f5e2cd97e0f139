//! Dashboard formatting: totals, category breakdown and budget status

use crate::budget::{BudgetEvaluation, BudgetStatus};
use crate::summary::{CategoryTotal, Summary};

use super::money::{format_money, format_percentage};

/// Width of the budget progress bar in cells
pub const BAR_WIDTH: usize = 20;

/// Format the day and month totals
pub fn format_summary(summary: &Summary, prefix: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Summary for {}\n",
        summary.reference_date.format("%Y-%m-%d")
    ));
    output.push_str(&"-".repeat(32));
    output.push('\n');
    output.push_str(&format!(
        "Today:        {}\n",
        format_money(summary.today_total, prefix)
    ));
    output.push_str(&format!(
        "This month:   {}\n",
        format_money(summary.month_total, prefix)
    ));
    output.push_str(&format!("Transactions: {}\n", summary.transaction_count));
    output.push_str(&format!(
        "Avg per day:  {}\n",
        format_money(summary.avg_per_day, prefix)
    ));
    output
}

/// Format category totals, one per line, in the order given
pub fn format_breakdown(totals: &[CategoryTotal], prefix: &str) -> String {
    if totals.is_empty() {
        return "No spending this month.\n".to_string();
    }

    let width = totals
        .iter()
        .map(|t| t.category.chars().count())
        .max()
        .unwrap_or(0);

    totals
        .iter()
        .map(|t| {
            format!(
                "{:width$}  {:>14}\n",
                t.category,
                format_money(t.total, prefix),
                width = width
            )
        })
        .collect()
}

/// One-line budget status text
pub fn format_budget_line(evaluation: &BudgetEvaluation, prefix: &str) -> String {
    match evaluation.status {
        BudgetStatus::Unset => "Not set".to_string(),
        BudgetStatus::Exceeded { overage } => {
            format!("Exceeded by {}", format_money(overage, prefix))
        }
        BudgetStatus::Warning { remaining } | BudgetStatus::Ok { remaining } => {
            format!("{} remaining", format_money(remaining, prefix))
        }
    }
}

/// Progress bar filled in proportion to `ratio` percent
pub fn format_bar(ratio: f64, width: usize) -> String {
    let filled = if ratio > 0.0 {
        ((ratio / 100.0) * width as f64).round() as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

/// Budget block: status line plus progress bar
pub fn format_budget(evaluation: &BudgetEvaluation, prefix: &str) -> String {
    let marker = match evaluation.status {
        BudgetStatus::Warning { .. } => " (warning)",
        BudgetStatus::Exceeded { .. } => " (over budget)",
        BudgetStatus::Ok { .. } | BudgetStatus::Unset => "",
    };

    format!(
        "Budget: {}{}\n{} {}\n",
        format_budget_line(evaluation, prefix),
        marker,
        format_bar(evaluation.display_ratio, BAR_WIDTH),
        format_percentage(evaluation.display_ratio)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::evaluate;
    use crate::models::Amount;
    use chrono::NaiveDate;

    fn eval(month_total: f64, budget: Option<f64>) -> BudgetEvaluation {
        evaluate(month_total, budget.map(|b| Amount::new(b).unwrap()))
    }

    #[test]
    fn test_budget_lines() {
        assert_eq!(format_budget_line(&eval(10.0, None), "Rs "), "Not set");
        assert_eq!(
            format_budget_line(&eval(80.0, Some(100.0)), "Rs "),
            "Rs 20.00 remaining"
        );
        assert_eq!(
            format_budget_line(&eval(150.0, Some(100.0)), "Rs "),
            "Exceeded by Rs 50.00"
        );
        assert_eq!(
            format_budget_line(&eval(100.0, Some(100.0)), "Rs "),
            "Exceeded by Rs 0.00"
        );
    }

    #[test]
    fn test_bar() {
        assert_eq!(format_bar(0.0, 20), format!("[{}]", ".".repeat(20)));
        assert_eq!(format_bar(50.0, 20), format!("[{}{}]", "#".repeat(10), ".".repeat(10)));
        assert_eq!(format_bar(100.0, 20), format!("[{}]", "#".repeat(20)));
    }

    #[test]
    fn test_budget_block_marks_warning() {
        let output = format_budget(&eval(85.0, Some(100.0)), "Rs ");
        assert!(output.starts_with("Budget: Rs 15.00 remaining (warning)"));
        assert!(output.trim_end().ends_with("85%"));
    }

    #[test]
    fn test_summary() {
        let summary = Summary {
            reference_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            today_total: 15.0,
            month_total: 35.0,
            transaction_count: 3,
            unique_days: 2,
            avg_per_day: 17.5,
        };
        let output = format_summary(&summary, "Rs ");
        assert!(output.contains("Today:        Rs 15.00"));
        assert!(output.contains("Avg per day:  Rs 17.50"));
    }

    #[test]
    fn test_breakdown() {
        let totals = vec![
            CategoryTotal {
                category: "Food".into(),
                total: 30.0,
            },
            CategoryTotal {
                category: "Fuel".into(),
                total: 5.0,
            },
        ];
        let output = format_breakdown(&totals, "Rs ");
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Food"));
        assert!(lines[1].ends_with("Rs 5.00"));
        assert_eq!(format_breakdown(&[], "Rs "), "No spending this month.\n");
    }
}
