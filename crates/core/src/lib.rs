use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// XP needed to cross one level boundary on the client display.
pub const XP_PER_LEVEL: u64 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub current_level: u32,
    pub total_xp: u64,
    pub todays_xp: u64,
    #[serde(default)]
    pub xp_breakdown: BTreeMap<String, u64>,
}

/// Display-ready progress through the current level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelProgress {
    pub current_level_xp: u32,
    pub progress_fraction: f64,
    pub xp_to_next_level: u64,
}

impl LevelProgress {
    pub fn percent(&self) -> f64 {
        self.progress_fraction * 100.0
    }
}

pub fn compute_progress(stats: &UserStats) -> LevelProgress {
    let current_level_xp = stats.total_xp % XP_PER_LEVEL;
    LevelProgress {
        current_level_xp: current_level_xp as u32,
        progress_fraction: current_level_xp as f64 / XP_PER_LEVEL as f64,
        xp_to_next_level: (u64::from(stats.current_level) + 1) * XP_PER_LEVEL,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpBreakdownEntry {
    pub category: String,
    pub xp: String,
}

impl XpBreakdownEntry {
    pub fn xp_value(&self) -> Option<u64> {
        self.xp.parse().ok()
    }

    pub fn icon(&self) -> CategoryIcon {
        category_icon(&self.category)
    }

    pub fn display_category(&self) -> &str {
        display_category(&self.category)
    }
}

/// Structured projection of a daily report. Every field is independently
/// optional; absence means the marker never appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedReportSummary {
    pub title: Option<String>,
    pub xp_breakdown: Option<Vec<XpBreakdownEntry>>,
    pub total_xp_today: Option<String>,
    pub mood: Option<String>,
    pub health: Option<String>,
    pub code: Option<String>,
    pub overall: Option<String>,
    pub level: Option<String>,
    pub total_xp_ever: Option<String>,
}

impl ParsedReportSummary {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryIcon {
    Brain,
    Code,
    Utensils,
    Dumbbell,
    Moon,
    Droplets,
    Zap,
}

impl CategoryIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brain => "brain",
            Self::Code => "code",
            Self::Utensils => "utensils",
            Self::Dumbbell => "dumbbell",
            Self::Moon => "moon",
            Self::Droplets => "droplets",
            Self::Zap => "zap",
        }
    }
}

const HEALTH_PREFIX: &str = "Health_";

pub fn category_icon(category: &str) -> CategoryIcon {
    match category {
        "Mood" => CategoryIcon::Brain,
        "Coding" => CategoryIcon::Code,
        "Health_meal" => CategoryIcon::Utensils,
        "Health_exercise" => CategoryIcon::Dumbbell,
        "Health_sleep" => CategoryIcon::Moon,
        "Health_water" => CategoryIcon::Droplets,
        _ => CategoryIcon::Zap,
    }
}

pub fn display_category(category: &str) -> &str {
    category.strip_prefix(HEALTH_PREFIX).unwrap_or(category)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub access_token: String,
    pub token_type: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    pub report: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeLog {
    pub id: String,
    pub lines_added: u64,
    pub lines_removed: u64,
    pub total_time_minutes: f64,
    pub date: String,
    pub processed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogInputError {
    #[error("{field} must be between 1 and 10, got {value}")]
    OutOfRange { field: &'static str, value: u8 },
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{0} must be a positive number")]
    NotPositive(&'static str),
}

fn check_rating(field: &'static str, value: u8) -> Result<(), LogInputError> {
    if (1..=10).contains(&value) {
        Ok(())
    } else {
        Err(LogInputError::OutOfRange { field, value })
    }
}

fn check_text(field: &'static str, value: &str) -> Result<(), LogInputError> {
    if value.trim().is_empty() {
        Err(LogInputError::Empty(field))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodLogInput {
    pub mood_rating: u8,
    pub energy_level: u8,
    pub stress_level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MoodLogInput {
    pub fn validate(&self) -> Result<(), LogInputError> {
        check_rating("mood_rating", self.mood_rating)?;
        check_rating("energy_level", self.energy_level)?;
        check_rating("stress_level", self.stress_level)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealLogInput {
    pub calories: u32,
    pub description: String,
}

impl MealLogInput {
    pub fn validate(&self) -> Result<(), LogInputError> {
        check_text("description", &self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseLogInput {
    pub duration_minutes: u32,
    pub exercise_type: String,
    pub intensity: u8,
}

impl ExerciseLogInput {
    pub fn validate(&self) -> Result<(), LogInputError> {
        check_text("exercise_type", &self.exercise_type)?;
        check_rating("intensity", self.intensity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepLogInput {
    pub hours: f64,
    pub quality: u8,
}

impl SleepLogInput {
    pub fn validate(&self) -> Result<(), LogInputError> {
        if !(self.hours.is_finite() && self.hours > 0.0) {
            return Err(LogInputError::NotPositive("hours"));
        }
        check_rating("quality", self.quality)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaterLogInput {
    pub amount_ml: u32,
}

impl WaterLogInput {
    pub fn validate(&self) -> Result<(), LogInputError> {
        if self.amount_ml == 0 {
            return Err(LogInputError::NotPositive("amount_ml"));
        }
        Ok(())
    }
}
