//! Daily macro aggregation. Pure: rows in, summary out. Callers that fail
//! to fetch rows pass an empty slice and get a zeroed summary back.

use serde::Serialize;
use time::Date;

use crate::meals::repo::{MealLog, MealType};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroTotals {
    pub kcal: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

impl MacroTotals {
    fn accumulate(&mut self, log: &MealLog) {
        self.kcal += log.calories;
        self.protein_g += log.protein_g;
        self.carbs_g += log.carbs_g;
        self.fat_g += log.fat_g;
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionSummary {
    #[serde(flatten)]
    pub totals: MacroTotals,
    pub percent_of_goal: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: Date,
    pub breakfast: PartitionSummary,
    pub lunch: PartitionSummary,
    pub dinner: PartitionSummary,
    pub snack: PartitionSummary,
    pub total: PartitionSummary,
    pub calorie_goal_kcal: f64,
}

fn percent_of_goal(kcal: f64, goal: f64) -> i32 {
    // A zero or negative goal counts as 1 so the result stays finite.
    let goal = if goal > 0.0 { goal } else { 1.0 };
    (kcal / goal * 100.0).round() as i32
}

fn partition(totals: MacroTotals, goal: f64) -> PartitionSummary {
    PartitionSummary {
        totals,
        percent_of_goal: percent_of_goal(totals.kcal, goal),
    }
}

/// Partitions one day's logs by meal type and sums macros per partition and
/// in total. Sums are exact; rounding happens only in the percentage.
pub fn summarize_day(date: Date, logs: &[MealLog], calorie_goal_kcal: f64) -> DailySummary {
    let mut by_type = [MacroTotals::default(); 4];
    let mut total = MacroTotals::default();

    for log in logs {
        let slot = match log.meal_type {
            MealType::Breakfast => 0,
            MealType::Lunch => 1,
            MealType::Dinner => 2,
            MealType::Snack => 3,
        };
        by_type[slot].accumulate(log);
        total.accumulate(log);
    }

    DailySummary {
        date,
        breakfast: partition(by_type[0], calorie_goal_kcal),
        lunch: partition(by_type[1], calorie_goal_kcal),
        dinner: partition(by_type[2], calorie_goal_kcal),
        snack: partition(by_type[3], calorie_goal_kcal),
        total: partition(total, calorie_goal_kcal),
        calorie_goal_kcal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn log(meal_type: MealType, kcal: f64, protein: f64, carbs: f64, fat: f64) -> MealLog {
        MealLog {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "test meal".into(),
            meal_type,
            calories: kcal,
            protein_g: protein,
            carbs_g: carbs,
            fat_g: fat,
            eaten_at: OffsetDateTime::now_utc(),
            template_id: None,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn empty_day_is_all_zero_and_never_nan() {
        let summary = summarize_day(date!(2026 - 08 - 28), &[], 2000.0);
        assert_eq!(summary.total.totals.kcal, 0.0);
        assert_eq!(summary.total.percent_of_goal, 0);
        assert_eq!(summary.breakfast.percent_of_goal, 0);
    }

    #[test]
    fn zero_goal_does_not_divide_by_zero() {
        let logs = vec![log(MealType::Lunch, 500.0, 20.0, 60.0, 15.0)];
        let summary = summarize_day(date!(2026 - 08 - 28), &logs, 0.0);
        assert!(summary.total.percent_of_goal > 0);
        assert_eq!(summary.total.percent_of_goal, 50000);
    }

    #[test]
    fn partitions_do_not_overlap() {
        let logs = vec![
            log(MealType::Breakfast, 300.0, 10.0, 40.0, 8.0),
            log(MealType::Breakfast, 150.0, 5.0, 20.0, 4.0),
            log(MealType::Dinner, 600.0, 35.0, 50.0, 20.0),
        ];
        let summary = summarize_day(date!(2026 - 08 - 28), &logs, 2000.0);
        assert_eq!(summary.breakfast.totals.kcal, 450.0);
        assert_eq!(summary.breakfast.totals.protein_g, 15.0);
        assert_eq!(summary.lunch.totals.kcal, 0.0);
        assert_eq!(summary.dinner.totals.kcal, 600.0);
        assert_eq!(summary.total.totals.kcal, 1050.0);
        assert_eq!(
            summary.total.totals.kcal,
            summary.breakfast.totals.kcal
                + summary.lunch.totals.kcal
                + summary.dinner.totals.kcal
                + summary.snack.totals.kcal
        );
    }

    #[test]
    fn breakfast_and_snack_against_1000_kcal_goal() {
        let logs = vec![
            log(MealType::Breakfast, 450.0, 20.0, 50.0, 15.0),
            log(MealType::Snack, 270.0, 8.0, 30.0, 12.0),
        ];
        let summary = summarize_day(date!(2026 - 08 - 28), &logs, 1000.0);
        assert_eq!(summary.total.totals.kcal, 720.0);
        assert_eq!(summary.total.percent_of_goal, 72);
        assert_eq!(summary.breakfast.percent_of_goal, 45);
        assert_eq!(summary.lunch.totals.kcal, 0.0);
        assert_eq!(summary.lunch.percent_of_goal, 0);
        assert_eq!(summary.dinner.totals.kcal, 0.0);
        assert_eq!(summary.dinner.percent_of_goal, 0);
    }

    #[test]
    fn fractional_sums_stay_exact_until_percentage() {
        let logs = vec![
            log(MealType::Snack, 100.5, 1.25, 2.5, 0.75),
            log(MealType::Snack, 99.5, 1.75, 2.5, 1.25),
        ];
        let summary = summarize_day(date!(2026 - 08 - 28), &logs, 400.0);
        assert_eq!(summary.snack.totals.kcal, 200.0);
        assert_eq!(summary.snack.totals.protein_g, 3.0);
        assert_eq!(summary.snack.percent_of_goal, 50);
    }

    #[test]
    fn summary_serializes_with_camel_case_contract() {
        let summary = summarize_day(date!(2026 - 08 - 28), &[], 2000.0);
        let json = serde_json::to_value(&summary).unwrap();
        let total = &json["total"];
        assert!(total.get("kcal").is_some());
        assert!(total.get("proteinG").is_some());
        assert!(total.get("carbsG").is_some());
        assert!(total.get("fatG").is_some());
        assert!(total.get("percentOfGoal").is_some());
    }
}
