//! Strength progress: maximum weight lifted per (exercise, calendar date),
//! flattened for plotting one line per exercise.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use time::Date;
use uuid::Uuid;

use crate::workouts::repo::{Workout, WorkoutExercise};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthPoint {
    pub date: Date,
    pub exercise: String,
    pub max_weight: f64,
}

/// Exercises must be in creation order: only a strictly greater weight
/// replaces the group's value, so the first-seen entry wins ties.
pub fn strength_progress(workouts: &[Workout], exercises: &[WorkoutExercise]) -> Vec<StrengthPoint> {
    let dates: HashMap<Uuid, Date> = workouts
        .iter()
        .map(|w| (w.id, w.performed_at.date()))
        .collect();

    let mut best: BTreeMap<(Date, String), f64> = BTreeMap::new();
    for ex in exercises {
        let Some(weight) = ex.weight_kg else { continue };
        let Some(&date) = dates.get(&ex.workout_id) else {
            continue;
        };
        match best.entry((date, ex.name.clone())) {
            Entry::Vacant(slot) => {
                slot.insert(weight);
            }
            Entry::Occupied(mut slot) => {
                if weight > *slot.get() {
                    slot.insert(weight);
                }
            }
        }
    }

    best.into_iter()
        .map(|((date, exercise), max_weight)| StrengthPoint {
            date,
            exercise,
            max_weight,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use time::OffsetDateTime;

    fn workout(id: Uuid, performed_at: OffsetDateTime) -> Workout {
        Workout {
            id,
            user_id: Uuid::new_v4(),
            name: "session".into(),
            performed_at,
            duration_min: Some(60),
            calories_burned: Some(300),
            status: "completed".into(),
            created_at: performed_at,
        }
    }

    fn exercise(
        workout_id: Uuid,
        name: &str,
        weight_kg: Option<f64>,
        created_at: OffsetDateTime,
    ) -> WorkoutExercise {
        WorkoutExercise {
            id: Uuid::new_v4(),
            workout_id,
            name: name.into(),
            sets: Some(3),
            reps: Some(8),
            weight_kg,
            created_at,
        }
    }

    #[test]
    fn empty_window_yields_empty_list() {
        assert!(strength_progress(&[], &[]).is_empty());
    }

    #[test]
    fn workouts_without_weighted_exercises_emit_nothing() {
        let w = workout(Uuid::new_v4(), datetime!(2026-08-10 18:00 UTC));
        let exs = vec![exercise(w.id, "plank", None, w.created_at)];
        assert!(strength_progress(&[w], &exs).is_empty());
    }

    #[test]
    fn max_per_exercise_per_date() {
        let w1 = workout(Uuid::new_v4(), datetime!(2026-08-10 18:00 UTC));
        let w2 = workout(Uuid::new_v4(), datetime!(2026-08-12 18:00 UTC));
        let exs = vec![
            exercise(w1.id, "bench press", Some(80.0), datetime!(2026-08-10 18:05 UTC)),
            exercise(w1.id, "bench press", Some(85.0), datetime!(2026-08-10 18:20 UTC)),
            exercise(w1.id, "squat", Some(100.0), datetime!(2026-08-10 18:40 UTC)),
            exercise(w2.id, "bench press", Some(82.5), datetime!(2026-08-12 18:05 UTC)),
        ];
        let points = strength_progress(&[w1, w2], &exs);
        assert_eq!(points.len(), 3);

        let bench_day1 = points
            .iter()
            .find(|p| p.exercise == "bench press" && p.date == datetime!(2026-08-10 18:00 UTC).date())
            .unwrap();
        assert_eq!(bench_day1.max_weight, 85.0);

        let day2 = datetime!(2026-08-12 18:00 UTC).date();
        let squat_day1 = points
            .iter()
            .find(|p| p.exercise == "squat" && p.date != day2)
            .unwrap();
        assert_eq!(squat_day1.max_weight, 100.0);

        let bench_day2 = points
            .iter()
            .find(|p| p.exercise == "bench press" && p.date == day2)
            .unwrap();
        assert_eq!(bench_day2.max_weight, 82.5);
    }

    #[test]
    fn ties_keep_first_seen_entry() {
        let w = workout(Uuid::new_v4(), datetime!(2026-08-10 18:00 UTC));
        // Equal later weight must not overwrite the earlier one.
        let first = exercise(w.id, "deadlift", Some(120.0), datetime!(2026-08-10 18:05 UTC));
        let second = exercise(w.id, "deadlift", Some(120.0), datetime!(2026-08-10 18:30 UTC));
        let points = strength_progress(&[w], &[first, second]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].max_weight, 120.0);
    }

    #[test]
    fn computed_max_bounds_every_group_member() {
        let w = workout(Uuid::new_v4(), datetime!(2026-08-10 18:00 UTC));
        let weights = [60.0, 72.5, 70.0, 72.5, 65.0];
        let exs: Vec<WorkoutExercise> = weights
            .iter()
            .map(|&kg| exercise(w.id, "overhead press", Some(kg), w.created_at))
            .collect();
        let points = strength_progress(&[w.clone()], &exs);
        assert_eq!(points.len(), 1);
        let max = points[0].max_weight;
        assert!(weights.iter().all(|&kg| max >= kg));
        assert_eq!(max, 72.5);
    }

    #[test]
    fn exercises_outside_window_are_skipped() {
        let in_window = workout(Uuid::new_v4(), datetime!(2026-08-10 18:00 UTC));
        let orphan_id = Uuid::new_v4();
        let exs = vec![
            exercise(in_window.id, "squat", Some(90.0), in_window.created_at),
            exercise(orphan_id, "squat", Some(140.0), in_window.created_at),
        ];
        let points = strength_progress(&[in_window], &exs);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].max_weight, 90.0);
    }
}
