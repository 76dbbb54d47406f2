use chrono::Datelike;

use crate::events::{Binding, Interaction};
use crate::surface::{Region, Surface};
use crate::{Component, RenderContext};

/// Ghi năm hiện tại vào chân trang.
#[derive(Debug, Clone, Copy, Default)]
pub struct YearStamp;

impl Component for YearStamp {
    fn mount(&mut self, surface: &mut dyn Surface, ctx: &RenderContext) {
        surface.set_text(Region::Year, &ctx.now.year().to_string());
    }

    fn attach(&self) -> Vec<Binding> {
        Vec::new()
    }

    fn handle(&mut self, _: &Interaction, _: &mut dyn Surface, _: &RenderContext) {}
}
