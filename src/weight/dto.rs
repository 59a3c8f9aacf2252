use serde::Deserialize;

use crate::window::MonthsWindow;

#[derive(Debug, Deserialize)]
pub struct LogWeightRequest {
    pub weight_kg: f64,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// `1|3|6|12|all`; defaults to all-time.
    pub months: Option<MonthsWindow>,
}
