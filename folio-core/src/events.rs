//! Đăng ký sự kiện tường minh: thành phần khai báo `Binding`, lớp trình duyệt
//! (hoặc bài kiểm thử) nối chúng với nguồn sự kiện thật.

use std::fmt;

use crate::surface::Region;

/// Loại sự kiện cần lắng nghe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Click,
    Input,
    /// Thay đổi kích thước cửa sổ.
    Resize,
}

impl Trigger {
    pub fn event_name(self) -> &'static str {
        match self {
            Trigger::Click => "click",
            Trigger::Input => "input",
            Trigger::Resize => "resize",
        }
    }
}

/// Ủy quyền sự kiện: tìm phần tử gần nhất khớp `selector` và đọc `attribute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delegate {
    pub selector: &'static str,
    pub attribute: &'static str,
}

/// Dữ liệu rút ra từ sự kiện gốc.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPayload {
    /// Giá trị ô nhập (với sự kiện `input`).
    pub value: Option<String>,
    /// Giá trị thuộc tính của phần tử ủy quyền.
    pub data: Option<String>,
}

impl EventPayload {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            data: None,
        }
    }

    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            value: None,
            data: Some(data.into()),
        }
    }
}

/// Tương tác người dùng đã được định tuyến.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    ToggleNav,
    ToggleTheme,
    SearchPublications(String),
    SelectSkillTab(String),
    SearchSkills(String),
    /// Chỉ số của kỹ năng trong danh sách đầy đủ.
    ActivateSkill(usize),
    Resize,
}

pub type Route = fn(&EventPayload) -> Option<Interaction>;

/// Một đăng ký: nghe `trigger` trên `region`, chuyển payload thành `Interaction`.
#[derive(Clone, Copy)]
pub struct Binding {
    pub region: Region,
    pub trigger: Trigger,
    pub delegate: Option<Delegate>,
    route: Route,
}

impl Binding {
    pub fn new(region: Region, trigger: Trigger, route: Route) -> Self {
        Self {
            region,
            trigger,
            delegate: None,
            route,
        }
    }

    pub fn click(region: Region, route: Route) -> Self {
        Self::new(region, Trigger::Click, route)
    }

    pub fn input(region: Region, route: Route) -> Self {
        Self::new(region, Trigger::Input, route)
    }

    pub fn resize(region: Region, route: Route) -> Self {
        Self::new(region, Trigger::Resize, route)
    }

    pub fn delegated(mut self, delegate: Delegate) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub fn route(&self, payload: &EventPayload) -> Option<Interaction> {
        (self.route)(payload)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("region", &self.region)
            .field("trigger", &self.trigger)
            .field("delegate", &self.delegate)
            .finish_non_exhaustive()
    }
}

/// Tìm đăng ký khớp và định tuyến payload, như cách trình duyệt gọi listener.
pub fn route_event(
    bindings: &[Binding],
    region: Region,
    trigger: Trigger,
    payload: &EventPayload,
) -> Vec<Interaction> {
    bindings
        .iter()
        .filter(|binding| binding.region == region && binding.trigger == trigger)
        .filter_map(|binding| binding.route(payload))
        .collect()
}
