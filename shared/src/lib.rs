use serde::{Deserialize, Serialize};
use std::fmt;

pub mod calendar;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const STORAGE_TOKEN_KEY: &str = "uniportal_token";
pub const STORAGE_USER_KEY: &str = "uniportal_user";
pub const STORAGE_PREFERENCES_KEY: &str = "uniportal_preferences";
pub const STORAGE_BASE_URL_KEY: &str = "uniportal_api_base_url";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// 身份与学生档案 (Identity & Profile)
// =========================================================

/// 当前登录用户的身份信息
///
/// 登录成功后写入本地存储，作为服务器不可达时的离线回退。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl UserIdentity {
    /// 服务器未返回 id 时，从邮箱派生一个稳定的标识
    pub fn derive_id(email: &str) -> String {
        email.trim().to_ascii_lowercase()
    }

    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .collect::<String>()
            .to_uppercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// 学生档案：用户 + 学生 + 院系记录的合并视图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub identity: UserIdentity,
    #[serde(default)]
    pub student_id: Option<String>,
    #[serde(default)]
    pub department: Option<Department>,
    pub semester: u8,
    pub academic_year: u8,
    pub batch_year: i32,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
}

// =========================================================
// 选课实体 (Course Selection Entities)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// 解析服务器返回的各种星期表示：`"monday"`, `"Mon"`, `"MONDAY"`, `"1"`
    pub fn parse(raw: &str) -> Option<Self> {
        let lower = raw.trim().to_ascii_lowercase();
        let day = match lower.as_str() {
            "monday" | "mon" | "1" => Self::Monday,
            "tuesday" | "tue" | "tues" | "2" => Self::Tuesday,
            "wednesday" | "wed" | "3" => Self::Wednesday,
            "thursday" | "thu" | "thur" | "thurs" | "4" => Self::Thursday,
            "friday" | "fri" | "5" => Self::Friday,
            "saturday" | "sat" | "6" => Self::Saturday,
            "sunday" | "sun" | "0" | "7" => Self::Sunday,
            _ => return None,
        };
        Some(day)
    }

    /// 路径参数使用的小写全名
    pub fn as_path(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        }
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub code: String,
    pub name: String,
    pub credits: u8,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    pub day: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub enrolled: Option<u32>,
    /// 仅当服务器回传时存在，用于校验通用接口返回的数据
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub teacher_id: Option<String>,
}

impl Slot {
    pub fn label(&self) -> String {
        format!(
            "{} {}-{}",
            self.day.short_label(),
            self.start_time,
            self.end_time
        )
    }

    pub fn seats_left(&self) -> Option<u32> {
        match (self.capacity, self.enrolled) {
            (Some(capacity), Some(enrolled)) => Some(capacity.saturating_sub(enrolled)),
            _ => None,
        }
    }
}

/// 已提交的选课记录 (Course, Teacher, Slot)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSelection {
    pub id: String,
    pub course_id: String,
    pub course_code: String,
    pub course_name: String,
    pub credits: u8,
    pub teacher_id: String,
    pub teacher_name: String,
    pub slot_id: String,
    pub slot_label: String,
}

// =========================================================
// 只读展示聚合 (Display Aggregates)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableEntry {
    pub id: String,
    pub day: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
    pub course_code: String,
    pub course_name: String,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimetableStats {
    pub total_classes: u32,
    pub total_courses: u32,
    pub hours_per_week: f32,
    #[serde(default)]
    pub busiest_day: Option<DayOfWeek>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub enrolled_courses: u32,
    pub total_credits: u32,
    pub classes_today: u32,
    pub unread_notifications: u32,
    #[serde(default)]
    pub attendance_percentage: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub read: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_parse_accepts_server_variants() {
        assert_eq!(DayOfWeek::parse("Monday"), Some(DayOfWeek::Monday));
        assert_eq!(DayOfWeek::parse(" thu "), Some(DayOfWeek::Thursday));
        assert_eq!(DayOfWeek::parse("7"), Some(DayOfWeek::Sunday));
        assert_eq!(DayOfWeek::parse("someday"), None);
    }

    #[test]
    fn slot_label_and_seats() {
        let slot = Slot {
            id: "s1".into(),
            day: DayOfWeek::Wednesday,
            start_time: "09:00".into(),
            end_time: "10:30".into(),
            room: None,
            capacity: Some(40),
            enrolled: Some(42),
            course_id: None,
            teacher_id: None,
        };
        assert_eq!(slot.label(), "Wed 09:00-10:30");
        assert_eq!(slot.seats_left(), Some(0));
    }

    #[test]
    fn initials_take_two_words() {
        let user = UserIdentity {
            id: "a@b.edu".into(),
            name: "ada lovelace king".into(),
            email: "a@b.edu".into(),
            role: None,
        };
        assert_eq!(user.initials(), "AL");
    }
}
