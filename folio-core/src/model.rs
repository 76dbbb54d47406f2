use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Một công bố khoa học.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PublicationRecord {
    pub title: String,
    pub year: i32,
    pub authors: Vec<String>,
}

/// Ghi chú công việc đang chờ, hiển thị nguyên văn.
pub type PendingItem = String;

/// Loại kinh nghiệm, quyết định làn và màu trên timeline.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceKind {
    University,
    Industry,
    Internship,
    Other,
}

impl ExperienceKind {
    /// Nhận cả dạng đầy đủ lẫn dạng viết tắt (`uni`, `ind`, `int`).
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "university" | "uni" => Self::University,
            "industry" | "ind" => Self::Industry,
            "internship" | "int" => Self::Internship,
            _ => Self::Other,
        }
    }

    /// Tọa độ dọc của làn.
    pub fn lane(self) -> f64 {
        match self {
            Self::University => 60.0,
            Self::Industry => 110.0,
            Self::Internship => 160.0,
            Self::Other => 130.0,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::University => "#4aa3ff",
            Self::Industry => "#ffd452",
            Self::Internship => "#ff9b42",
            Self::Other => "#15b887",
        }
    }
}

/// Một mục kinh nghiệm; mốc vắng mặt được thay bằng "bây giờ" khi dựng timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceEntry {
    pub role: String,
    pub org: String,
    #[serde(rename = "type")]
    pub kind: ExperienceKind,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl Default for ExperienceEntry {
    fn default() -> Self {
        Self {
            role: String::new(),
            org: String::new(),
            kind: ExperienceKind::Other,
            start: None,
            end: None,
        }
    }
}

impl ExperienceEntry {
    pub fn resolved_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.start.unwrap_or(now)
    }

    pub fn resolved_end(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.end.unwrap_or(now)
    }

    /// Nhãn hiển thị khi rê chuột lên thanh.
    pub fn label(&self) -> String {
        format!("{} — {}", self.role, self.org)
    }
}

/// Nhóm kỹ năng. Nhóm lạ giữ nguyên tên gốc trong `Other`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum SkillGroup {
    Robotics,
    Ml,
    Mechanical,
    Ag,
    Systems,
    Other(String),
}

impl SkillGroup {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "robotics" => Self::Robotics,
            "ml" => Self::Ml,
            "mechanical" => Self::Mechanical,
            "ag" => Self::Ag,
            "systems" => Self::Systems,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Robotics => "robotics",
            Self::Ml => "ml",
            Self::Mechanical => "mechanical",
            Self::Ag => "ag",
            Self::Systems => "systems",
            Self::Other(raw) => raw,
        }
    }

    /// Nhãn thân thiện; nhóm không có trong bảng dùng nhãn chung "Skill".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Robotics => "Robotics",
            Self::Ml => "AI",
            Self::Mechanical => "Mechanical",
            Self::Ag => "Agriculture",
            Self::Systems => "Systems",
            Self::Other(_) => "Skill",
        }
    }
}

impl From<String> for SkillGroup {
    fn from(raw: String) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<SkillGroup> for String {
    fn from(group: SkillGroup) -> Self {
        match group {
            SkillGroup::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillEntry {
    pub name: String,
    pub group: SkillGroup,
    pub note: Option<String>,
}

impl Default for SkillEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            group: SkillGroup::Other(String::new()),
            note: None,
        }
    }
}

/// Toàn bộ dữ liệu trang do trang chủ cung cấp; mọi danh sách mặc định rỗng.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SiteData {
    #[serde(default)]
    pub publications: Vec<PublicationRecord>,
    #[serde(default)]
    pub pending: Vec<PendingItem>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
}

/// Chế độ giao diện. Mặc định là tối.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    #[default]
    Dark,
}

impl ThemeMode {
    /// Chỉ giá trị đúng bằng `"light"` mới bật chế độ sáng.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Biểu tượng cho nút chuyển chế độ.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Light => "☀️",
            Self::Dark => "🌙",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_values_fall_back_to_dark() {
        assert_eq!(ThemeMode::from_stored(Some("light")), ThemeMode::Light);
        assert_eq!(ThemeMode::from_stored(Some("dark")), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_stored(Some("LIGHT")), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_stored(None), ThemeMode::Dark);
    }

    #[test]
    fn experience_kind_accepts_short_and_long_names() {
        assert_eq!(ExperienceKind::from_raw("uni"), ExperienceKind::University);
        assert_eq!(ExperienceKind::from_raw("internship"), ExperienceKind::Internship);
        assert_eq!(ExperienceKind::from_raw("freelance"), ExperienceKind::Other);
        assert_eq!(ExperienceKind::Other.lane(), 130.0);
        assert_eq!(ExperienceKind::Other.color(), "#15b887");
    }

    #[test]
    fn skill_labels_use_generic_fallback() {
        assert_eq!(SkillGroup::Ml.label(), "AI");
        let design = SkillGroup::from_raw("design");
        assert_eq!(design, SkillGroup::Other("design".to_string()));
        assert_eq!(design.as_str(), "design");
        assert_eq!(design.label(), "Skill");
        assert_eq!(SkillGroup::from_raw("other").label(), "Skill");
    }
}
