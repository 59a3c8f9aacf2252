use serde::Deserialize;
use time::Date;

use crate::goals::repo::{GoalStatus, GoalType};

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub goal_type: GoalType,
    pub title: String,
    pub description: Option<String>,
    pub target_date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct GoalListQuery {
    /// Defaults to active; completed rows stay queryable.
    pub status: Option<GoalStatus>,
}
