use serde::Serialize;
use tracing::debug;

use crate::events::{Binding, Delegate, Interaction};
use crate::model::{SkillEntry, SkillGroup};
use crate::surface::{Element, Node, Region, Surface};
use crate::{Component, RenderContext};

/// Tab danh mục: phần tử `.tab` mang `data-group`.
pub const TAB_DELEGATE: Delegate = Delegate {
    selector: ".tab",
    attribute: "data-group",
};

/// Thẻ kỹ năng: phần tử `.skill-card` mang `data-index`.
pub const CARD_DELEGATE: Delegate = Delegate {
    selector: ".skill-card",
    attribute: "data-index",
};

const ACTIVE_CLASS: &str = "active";

/// Danh mục đang chọn: tất cả hoặc một nhóm.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SkillCategory {
    #[default]
    All,
    Group(SkillGroup),
}

impl SkillCategory {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "all" => Self::All,
            other => Self::Group(SkillGroup::from_raw(other)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Group(group) => group.as_str(),
        }
    }

    /// So khớp chính xác theo tên nhóm, kể cả nhóm lạ.
    pub fn admits(&self, group: &SkillGroup) -> bool {
        match self {
            Self::All => true,
            Self::Group(selected) => selected == group,
        }
    }
}

/// Lọc theo danh mục VÀ theo tên (không phân biệt hoa thường), luôn trên danh sách đầy đủ.
///
/// Trả về chỉ số trong `skills` để thẻ giữ được định danh ổn định.
pub fn filter_skills(skills: &[SkillEntry], category: &SkillCategory, query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();
    skills
        .iter()
        .enumerate()
        .filter(|(_, skill)| category.admits(&skill.group))
        .filter(|(_, skill)| needle.is_empty() || skill.name.to_lowercase().contains(&needle))
        .map(|(index, _)| index)
        .collect()
}

pub fn render_skill_card(index: usize, skill: &SkillEntry) -> Node {
    Element::html("button")
        .attr("type", "button")
        .attr("class", "skill-card")
        .attr(CARD_DELEGATE.attribute, index)
        .child(Element::html("strong").text(skill.name.clone()))
        .child(Element::html("small").text(skill.group.label()))
        .into()
}

/// Nội dung bảng chi tiết.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SkillDetail {
    pub title: String,
    pub note: String,
}

/// Lưới kỹ năng có tab danh mục, ô tìm kiếm và bảng chi tiết dùng chung.
#[derive(Debug, Clone, Default)]
pub struct SkillsBrowser {
    skills: Vec<SkillEntry>,
    category: SkillCategory,
    query: String,
    visible: Vec<usize>,
    detail: Option<SkillDetail>,
}

impl SkillsBrowser {
    pub fn new(skills: Vec<SkillEntry>) -> Self {
        Self {
            skills,
            ..Self::default()
        }
    }

    pub fn category(&self) -> &SkillCategory {
        &self.category
    }

    pub fn visible(&self) -> Vec<&SkillEntry> {
        self.visible.iter().map(|&index| &self.skills[index]).collect()
    }

    pub fn detail(&self) -> Option<&SkillDetail> {
        self.detail.as_ref()
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        self.visible = filter_skills(&self.skills, &self.category, &self.query);
        debug!(
            category = self.category.as_str(),
            query = self.query.as_str(),
            shown = self.visible.len(),
            "vẽ lưới kỹ năng"
        );
        let nodes = self
            .visible
            .iter()
            .map(|&index| render_skill_card(index, &self.skills[index]))
            .collect();
        surface.replace_children(Region::SkillGrid, nodes);
    }

    fn select(&mut self, raw: &str, surface: &mut dyn Surface) {
        self.category = SkillCategory::parse(raw);
        surface.mark_child(Region::SkillTabs, &TAB_DELEGATE, raw, ACTIVE_CLASS);
        self.render(surface);
    }

    fn activate(&mut self, index: usize, surface: &mut dyn Surface) {
        let Some(skill) = self.skills.get(index) else {
            return;
        };
        let detail = SkillDetail {
            title: skill.name.clone(),
            note: skill.note.clone().unwrap_or_default(),
        };
        surface.set_text(Region::SkillTitle, &detail.title);
        surface.set_text(Region::SkillNote, &detail.note);
        surface.set_hidden(Region::SkillInfo, false);
        surface.scroll_into_view(Region::SkillInfo);
        self.detail = Some(detail);
    }
}

impl Component for SkillsBrowser {
    fn mount(&mut self, surface: &mut dyn Surface, _ctx: &RenderContext) {
        if !surface.has_region(Region::SkillGrid) {
            return;
        }
        self.select("all", surface);
    }

    fn attach(&self) -> Vec<Binding> {
        vec![
            Binding::click(Region::SkillTabs, |payload| {
                payload.data.clone().map(Interaction::SelectSkillTab)
            })
            .delegated(TAB_DELEGATE),
            Binding::input(Region::SkillSearch, |payload| {
                Some(Interaction::SearchSkills(
                    payload.value.clone().unwrap_or_default(),
                ))
            }),
            Binding::click(Region::SkillGrid, |payload| {
                payload
                    .data
                    .as_deref()
                    .and_then(|raw| raw.parse::<usize>().ok())
                    .map(Interaction::ActivateSkill)
            })
            .delegated(CARD_DELEGATE),
        ]
    }

    fn handle(&mut self, interaction: &Interaction, surface: &mut dyn Surface, _ctx: &RenderContext) {
        if !surface.has_region(Region::SkillGrid) {
            return;
        }
        match interaction {
            Interaction::SelectSkillTab(raw) => self.select(raw, surface),
            Interaction::SearchSkills(query) => {
                self.query = query.clone();
                self.render(surface);
            }
            Interaction::ActivateSkill(index) => self.activate(*index, surface),
            _ => {}
        }
    }
}
