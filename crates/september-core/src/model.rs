//! Typed payloads for the dashboard's persisted slots.
//!
//! Field names serialize in camelCase to match the stored document the
//! desktop shell reads, and the defaults match a fresh install.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Storage keys for every persisted slot.
pub mod keys {
    pub const EVENTS: &str = "events";
    pub const MOOD_NOTES: &str = "moodNotes";
    pub const NOTE_HISTORY: &str = "noteHistory";
    pub const HISTORY_INDEX: &str = "historyIndex";
    pub const STUDY_HOURS: &str = "studyHours";
    pub const TASKS_COMPLETED: &str = "tasksCompleted";
    pub const DAILY_HOURS_GOAL: &str = "dailyHoursGoal";
    pub const DAILY_TASKS_GOAL: &str = "dailyTasksGoal";
    pub const COMPLETED_SESSIONS: &str = "completedSessions";
    pub const VOLUME: &str = "volume";
    pub const LIKED_SONGS: &str = "likedSongs";
    pub const SOUND_ENABLED: &str = "soundEnabled";
    pub const APP_SETTINGS: &str = "appSettings";
    pub const TIME_CONTROL_POSITION: &str = "timeControlPosition";
    pub const ALWAYS_ON_TOP: &str = "alwaysOnTop";
}

/// Indices into the playlist the user has liked.
///
/// Persisted through [`SortedSetCodec`](crate::state::SortedSetCodec) — a
/// set in memory, a sorted array in the store.
pub type LikedSongs = HashSet<u32>;

/// Liked songs on a fresh install: just the opening track.
pub fn default_liked_songs() -> LikedSongs {
    [0].into_iter().collect()
}

/// A sticky note on the mood board.
///
/// `x`/`y` are percentages of the board, not pixels. Size and stacking are
/// absent on notes created before those controls existed, so they stay
/// optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodNote {
    pub id: u64,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

/// Mood board contents on a fresh install.
pub fn seed_mood_notes() -> Vec<MoodNote> {
    vec![
        MoodNote {
            id: 1,
            text: "Remember to review chapter 5".to_string(),
            x: 20.0,
            y: 20.0,
            color: "bg-yellow-200".to_string(),
            rotation: -2.0,
            width: Some(200.0),
            height: Some(150.0),
            z_index: Some(10),
        },
        MoodNote {
            id: 2,
            text: "Coffee at 3pm".to_string(),
            x: 60.0,
            y: 40.0,
            color: "bg-pink-200".to_string(),
            rotation: 3.0,
            width: Some(180.0),
            height: Some(140.0),
            z_index: Some(10),
        },
    ]
}

/// A calendar entry. `time` stays a display string (`"14:00"`) to match
/// the stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: u64,
    pub date: NaiveDate,
    pub title: String,
    pub time: String,
    pub color: String,
}

/// Calendar contents on a fresh install.
pub fn seed_events() -> Vec<CalendarEvent> {
    vec![
        CalendarEvent {
            id: 1,
            date: NaiveDate::from_ymd_opt(2024, 9, 15).expect("valid date"),
            title: "Study Session".to_string(),
            time: "14:00".to_string(),
            color: "bg-orange-500".to_string(),
        },
        CalendarEvent {
            id: 2,
            date: NaiveDate::from_ymd_opt(2024, 9, 20).expect("valid date"),
            title: "Project Due".to_string(),
            time: "23:59".to_string(),
            color: "bg-red-500".to_string(),
        },
    ]
}

/// A draggable widget position, in pixels from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Default for Position {
    /// Where the time control sits on a fresh install.
    fn default() -> Self {
        Self { x: 20.0, y: 80.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Auto,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentColor {
    Orange,
    Purple,
    Blue,
    Green,
    Pink,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

/// Everything the settings panel edits, stored as one document under
/// [`keys::APP_SETTINGS`]. Durations are minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub theme: Theme,
    pub accent_color: AccentColor,
    pub falling_leaves_enabled: bool,
    pub font_size: FontSize,
    pub work_duration: u32,
    pub break_duration: u32,
    pub long_break_duration: u32,
    pub auto_start_next_session: bool,
    pub pomodoro_sound_enabled: bool,
    pub desktop_notifications_enabled: bool,
    pub calendar_reminder_time: u32,
    pub daily_motivation_time: String,
    pub notification_sound_enabled: bool,
    pub launch_on_startup: bool,
    pub always_on_top: bool,
    pub minimize_to_tray: bool,
    pub close_button_minimizes: bool,
    pub sound_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Auto,
            accent_color: AccentColor::Orange,
            falling_leaves_enabled: true,
            font_size: FontSize::Medium,
            work_duration: 25,
            break_duration: 5,
            long_break_duration: 15,
            auto_start_next_session: false,
            pomodoro_sound_enabled: true,
            desktop_notifications_enabled: true,
            calendar_reminder_time: 5,
            daily_motivation_time: "09:00".to_string(),
            notification_sound_enabled: true,
            launch_on_startup: false,
            always_on_top: false,
            minimize_to_tray: true,
            close_button_minimizes: false,
            sound_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn settings_serialize_camel_case() {
        let value = serde_json::to_value(AppSettings::default()).unwrap();
        assert_eq!(value["theme"], json!("auto"));
        assert_eq!(value["accentColor"], json!("orange"));
        assert_eq!(value["workDuration"], json!(25));
        assert_eq!(value["minimizeToTray"], json!(true));
        assert!(value.get("accent_color").is_none());
    }

    #[test]
    fn settings_round_trip() {
        let settings = AppSettings {
            theme: Theme::Dark,
            work_duration: 50,
            ..AppSettings::default()
        };
        let value = serde_json::to_value(&settings).unwrap();
        let back: AppSettings = serde_json::from_value(value).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn mood_note_tolerates_missing_size() {
        let note: MoodNote = serde_json::from_value(json!({
            "id": 3,
            "text": "water the plants",
            "x": 10.0,
            "y": 10.0,
            "color": "bg-yellow-200",
            "rotation": 0.0,
            "zIndex": 11
        }))
        .unwrap();
        assert_eq!(note.width, None);
        assert_eq!(note.z_index, Some(11));
    }

    #[test]
    fn event_date_serializes_iso() {
        let value = serde_json::to_value(seed_events()).unwrap();
        assert_eq!(value[0]["date"], json!("2024-09-15"));
        assert_eq!(value[1]["time"], json!("23:59"));
    }

    #[test]
    fn fresh_install_likes_the_opening_track() {
        assert_eq!(default_liked_songs(), [0].into_iter().collect());
    }
}
