//! Rollup counts over a filtered workout set. Missing numeric fields count
//! as zero.

use serde::Serialize;

use crate::workouts::repo::Workout;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub workouts: u64,
    pub calories_burned: i64,
    pub active_minutes: i64,
}

pub fn summarize_workouts(rows: &[Workout]) -> WorkoutStats {
    rows.iter().fold(WorkoutStats::default(), |mut acc, w| {
        acc.workouts += 1;
        acc.calories_burned += i64::from(w.calories_burned.unwrap_or(0));
        acc.active_minutes += i64::from(w.duration_min.unwrap_or(0));
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn workout(duration_min: Option<i32>, calories_burned: Option<i32>) -> Workout {
        Workout {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "session".into(),
            performed_at: OffsetDateTime::now_utc(),
            duration_min,
            calories_burned,
            status: "completed".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn empty_set_rolls_up_to_zero() {
        assert_eq!(summarize_workouts(&[]), WorkoutStats::default());
    }

    #[test]
    fn sums_and_counts() {
        let rows = vec![
            workout(Some(45), Some(320)),
            workout(Some(30), Some(210)),
            workout(Some(60), Some(400)),
        ];
        let stats = summarize_workouts(&rows);
        assert_eq!(stats.workouts, 3);
        assert_eq!(stats.calories_burned, 930);
        assert_eq!(stats.active_minutes, 135);
    }

    #[test]
    fn missing_numeric_fields_default_to_zero() {
        let rows = vec![workout(None, Some(250)), workout(Some(20), None)];
        let stats = summarize_workouts(&rows);
        assert_eq!(stats.workouts, 2);
        assert_eq!(stats.calories_burned, 250);
        assert_eq!(stats.active_minutes, 20);
    }
}
