//! Logic lõi cho trang portfolio: mô hình dữ liệu, các thành phần trình bày
//! và các "seam" trừu tượng (bề mặt hiển thị, nguồn sự kiện, kho lưu trữ).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod model;
mod nav;
mod page;
mod publications;
mod skills;
mod store;
mod surface;
mod theme;
mod timeline;
mod year;

pub mod events;

pub use events::{Binding, Delegate, EventPayload, Interaction, Trigger};
pub use model::{
    ExperienceEntry, ExperienceKind, PendingItem, PublicationRecord, SiteData, SkillEntry,
    SkillGroup, ThemeMode,
};
pub use nav::NavToggle;
pub use page::Page;
pub use publications::{filter_publications, render_pending, render_publication, PublicationsView};
pub use skills::{
    filter_skills, render_skill_card, SkillCategory, SkillDetail, SkillsBrowser, CARD_DELEGATE,
    TAB_DELEGATE,
};
pub use store::{MemoryStore, PreferenceStore};
pub use surface::{
    Element, MemoryRegion, MemorySurface, Namespace, Node, Region, StaticChild, Surface,
    SVG_NAMESPACE,
};
pub use theme::ThemeController;
pub use timeline::{
    layout_timeline, AxisLine, ExperienceTimeline, TimeScale, TimelineBar, TimelineLayout,
    YearTick,
};
pub use year::YearStamp;

/// Cấu hình hiển thị và lưu trữ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FolioConfig {
    /// Lề ngang (px) hai bên trục thời gian.
    pub padding: f64,
    /// Chiều rộng dùng khi vùng chứa báo 0.
    pub fallback_width: f64,
    /// Chiều cao dùng khi vùng chứa báo 0.
    pub fallback_height: f64,
    pub bar_height: f64,
    pub bar_radius: f64,
    pub bar_opacity: f64,
    /// Chiều rộng tối thiểu của một thanh, giữ thanh suy biến vẫn nhìn thấy.
    pub min_bar_width: f64,
    /// Khóa lưu chế độ giao diện.
    pub theme_key: String,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            padding: 20.0,
            fallback_width: 800.0,
            fallback_height: 220.0,
            bar_height: 14.0,
            bar_radius: 6.0,
            bar_opacity: 0.9,
            min_bar_width: 2.0,
            theme_key: "theme".to_string(),
        }
    }
}

/// Ngữ cảnh cho một lượt hiển thị: mốc "bây giờ" được tiêm vào thay vì đọc đồng hồ toàn cục.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    pub now: DateTime<Utc>,
}

impl RenderContext {
    pub fn now() -> Self {
        Self { now: Utc::now() }
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

/// Một thành phần trình bày gắn vào một vùng của trang.
///
/// `mount` vẽ lần đầu, `attach` khai báo các sự kiện cần lắng nghe,
/// `handle` phản ứng với một tương tác đã được định tuyến.
pub trait Component {
    fn mount(&mut self, surface: &mut dyn Surface, ctx: &RenderContext);

    fn attach(&self) -> Vec<Binding>;

    fn handle(&mut self, interaction: &Interaction, surface: &mut dyn Surface, ctx: &RenderContext);
}

/// Lỗi chung của thư viện.
#[derive(Debug, thiserror::Error)]
pub enum FolioError {
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Không truy cập được kho lưu trữ: {0}")]
    Storage(String),
    #[error("Lỗi khác: {0}")]
    Other(String),
}

/// Tiện ích dựng dữ liệu rỗng (dùng cho mock/testing).
pub fn empty_site_data() -> SiteData {
    SiteData::default()
}
