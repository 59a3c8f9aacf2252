//! Weight history trend. Pure computation over fetched rows; degenerate
//! inputs (empty or single-entry history) yield zero deltas, never NaN.

use serde::Serialize;
use time::macros::format_description;
use time::OffsetDateTime;

use crate::error::ValidationError;
use crate::weight::repo::WeightLog;

pub const MAX_WEIGHT_KG: f64 = 500.0;

/// Validated before any row is written.
pub fn validate_weight(weight_kg: f64) -> Result<(), ValidationError> {
    // !(x > 0) also catches NaN.
    if !(weight_kg > 0.0) {
        return Err(ValidationError::WeightNotPositive);
    }
    if weight_kg > MAX_WEIGHT_KG {
        return Err(ValidationError::WeightTooLarge);
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightPoint {
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
    pub weight_kg: f64,
    /// Short display label, e.g. "Aug 28".
    pub display_date: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightTrend {
    pub entries: Vec<WeightPoint>,
    pub net_change_kg: f64,
    /// Percent change relative to the first entry, rounded to 1 decimal.
    pub percent_change: f64,
}

fn display_date(at: OffsetDateTime) -> String {
    at.format(format_description!("[month repr:short] [day padding:none]"))
        .unwrap_or_else(|_| at.date().to_string())
}

/// Net and percent change across an ascending history.
pub fn compute_trend(rows: &[WeightLog]) -> WeightTrend {
    let entries: Vec<WeightPoint> = rows
        .iter()
        .map(|r| WeightPoint {
            logged_at: r.logged_at,
            weight_kg: r.weight_kg,
            display_date: display_date(r.logged_at),
        })
        .collect();

    let (net_change_kg, percent_change) = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) if rows.len() >= 2 => {
            let net = last.weight_kg - first.weight_kg;
            let percent = if first.weight_kg == 0.0 {
                0.0
            } else {
                (net / first.weight_kg * 1000.0).round() / 10.0
            };
            (net, percent)
        }
        _ => (0.0, 0.0),
    };

    WeightTrend {
        entries,
        net_change_kg,
        percent_change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use uuid::Uuid;

    fn entry(weight_kg: f64, logged_at: OffsetDateTime) -> WeightLog {
        WeightLog {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            weight_kg,
            logged_at,
        }
    }

    #[test]
    fn validation_bounds() {
        assert_eq!(validate_weight(0.0), Err(ValidationError::WeightNotPositive));
        assert_eq!(
            validate_weight(-5.0),
            Err(ValidationError::WeightNotPositive)
        );
        assert_eq!(
            validate_weight(f64::NAN),
            Err(ValidationError::WeightNotPositive)
        );
        assert_eq!(validate_weight(501.0), Err(ValidationError::WeightTooLarge));
        assert!(validate_weight(82.5).is_ok());
        assert!(validate_weight(500.0).is_ok());
    }

    #[test]
    fn empty_history_yields_zero_trend() {
        let trend = compute_trend(&[]);
        assert!(trend.entries.is_empty());
        assert_eq!(trend.net_change_kg, 0.0);
        assert_eq!(trend.percent_change, 0.0);
    }

    #[test]
    fn single_entry_yields_zero_trend() {
        let trend = compute_trend(&[entry(80.0, datetime!(2026-08-01 08:00 UTC))]);
        assert_eq!(trend.entries.len(), 1);
        assert_eq!(trend.net_change_kg, 0.0);
        assert_eq!(trend.percent_change, 0.0);
    }

    #[test]
    fn thirty_day_loss_trend() {
        let rows = vec![
            entry(70.0, datetime!(2026-08-01 08:00 UTC)),
            entry(68.5, datetime!(2026-08-30 08:00 UTC)),
        ];
        let trend = compute_trend(&rows);
        assert_eq!(trend.net_change_kg, -1.5);
        assert_eq!(trend.percent_change, -2.1);
    }

    #[test]
    fn zero_first_weight_never_divides() {
        // Cannot be inserted through validation, but the computation must
        // still stay finite on legacy rows.
        let rows = vec![
            entry(0.0, datetime!(2026-08-01 08:00 UTC)),
            entry(68.5, datetime!(2026-08-30 08:00 UTC)),
        ];
        let trend = compute_trend(&rows);
        assert_eq!(trend.percent_change, 0.0);
        assert_eq!(trend.net_change_kg, 68.5);
    }

    #[test]
    fn display_dates_are_short_labels() {
        let rows = vec![
            entry(70.0, datetime!(2026-01-05 08:00 UTC)),
            entry(69.0, datetime!(2026-12-31 08:00 UTC)),
        ];
        let trend = compute_trend(&rows);
        assert_eq!(trend.entries[0].display_date, "Jan 5");
        assert_eq!(trend.entries[1].display_date, "Dec 31");
    }
}
