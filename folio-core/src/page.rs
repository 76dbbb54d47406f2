use tracing::debug;

use crate::events::{Binding, Interaction};
use crate::model::SiteData;
use crate::nav::NavToggle;
use crate::publications::PublicationsView;
use crate::skills::SkillsBrowser;
use crate::store::PreferenceStore;
use crate::surface::Surface;
use crate::theme::ThemeController;
use crate::timeline::ExperienceTimeline;
use crate::year::YearStamp;
use crate::{Component, FolioConfig, RenderContext};

/// Toàn bộ trang: các thành phần độc lập dùng chung một nguồn dữ liệu chỉ đọc.
#[derive(Debug)]
pub struct Page<S> {
    year: YearStamp,
    nav: NavToggle,
    theme: ThemeController<S>,
    publications: PublicationsView,
    timeline: ExperienceTimeline,
    skills: SkillsBrowser,
}

impl<S: PreferenceStore> Page<S> {
    pub fn new(data: SiteData, store: S, config: &FolioConfig) -> Self {
        let SiteData {
            publications,
            pending,
            experience,
            skills,
        } = data;
        Self {
            year: YearStamp,
            nav: NavToggle::new(),
            theme: ThemeController::new(store, config.theme_key.clone()),
            publications: PublicationsView::new(publications, pending),
            timeline: ExperienceTimeline::new(experience, config.clone()),
            skills: SkillsBrowser::new(skills),
        }
    }

    pub fn theme(&self) -> &ThemeController<S> {
        &self.theme
    }

    pub fn nav(&self) -> &NavToggle {
        &self.nav
    }

    pub fn publications(&self) -> &PublicationsView {
        &self.publications
    }

    pub fn timeline(&self) -> &ExperienceTimeline {
        &self.timeline
    }

    pub fn skills(&self) -> &SkillsBrowser {
        &self.skills
    }

    fn components(&mut self) -> [&mut dyn Component; 6] {
        [
            &mut self.year,
            &mut self.nav,
            &mut self.theme,
            &mut self.publications,
            &mut self.timeline,
            &mut self.skills,
        ]
    }

    /// Vẽ lần đầu mọi thành phần; vùng vắng mặt bị bỏ qua.
    pub fn mount(&mut self, surface: &mut dyn Surface, ctx: &RenderContext) {
        for component in self.components() {
            component.mount(surface, ctx);
        }
    }

    /// Mọi đăng ký sự kiện của trang.
    pub fn attach(&self) -> Vec<Binding> {
        let components: [&dyn Component; 6] = [
            &self.year,
            &self.nav,
            &self.theme,
            &self.publications,
            &self.timeline,
            &self.skills,
        ];
        components
            .into_iter()
            .flat_map(|component| component.attach())
            .collect()
    }

    /// Chuyển tương tác tới mọi thành phần; thành phần không liên quan bỏ qua.
    pub fn dispatch(&mut self, interaction: &Interaction, surface: &mut dyn Surface, ctx: &RenderContext) {
        debug!(?interaction, "xử lý tương tác");
        for component in self.components() {
            component.handle(interaction, surface, ctx);
        }
    }
}
