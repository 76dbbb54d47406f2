use crate::events::{Binding, Interaction};
use crate::surface::{Region, Surface};
use crate::{Component, RenderContext};

const OPEN_CLASS: &str = "open";

/// Đóng/mở menu điều hướng. Không lưu qua lần tải lại.
#[derive(Debug, Clone, Default)]
pub struct NavToggle {
    open: bool,
}

impl NavToggle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Component for NavToggle {
    fn mount(&mut self, surface: &mut dyn Surface, _ctx: &RenderContext) {
        self.open = surface.has_class(Region::Nav, OPEN_CLASS);
    }

    fn attach(&self) -> Vec<Binding> {
        vec![Binding::click(Region::NavToggle, |_| Some(Interaction::ToggleNav))]
    }

    fn handle(&mut self, interaction: &Interaction, surface: &mut dyn Surface, _ctx: &RenderContext) {
        if *interaction != Interaction::ToggleNav || !surface.has_region(Region::Nav) {
            return;
        }
        self.open = !self.open;
        surface.set_class(Region::Nav, OPEN_CLASS, self.open);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::MemorySurface;

    #[test]
    fn two_activations_restore_the_original_state() {
        let mut surface = MemorySurface::with_all_regions();
        let ctx = RenderContext::now();
        let mut nav = NavToggle::new();
        nav.mount(&mut surface, &ctx);

        nav.handle(&Interaction::ToggleNav, &mut surface, &ctx);
        assert!(surface.has_class(Region::Nav, "open"));
        nav.handle(&Interaction::ToggleNav, &mut surface, &ctx);
        assert!(!surface.has_class(Region::Nav, "open"));
    }

    #[test]
    fn missing_nav_container_is_a_no_op() {
        let mut surface = MemorySurface::new();
        surface.insert(Region::NavToggle);
        let ctx = RenderContext::now();
        let mut nav = NavToggle::new();
        nav.handle(&Interaction::ToggleNav, &mut surface, &ctx);
        assert!(!nav.is_open());
    }
}
