use tracing::{debug, warn};

use crate::events::{Binding, Interaction};
use crate::model::ThemeMode;
use crate::store::PreferenceStore;
use crate::surface::{Region, Surface};
use crate::{Component, RenderContext};

const LIGHT_CLASS: &str = "light";

/// Chuyển chế độ sáng/tối và ghi lại lựa chọn.
///
/// Trạng thái (chế độ hiện tại và kho lưu) nằm trong đối tượng, không phải biến toàn cục.
#[derive(Debug)]
pub struct ThemeController<S> {
    store: S,
    key: String,
    mode: ThemeMode,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Đọc lựa chọn đã lưu; lỗi kho được coi như chưa lưu gì.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let mode = match store.read(&key) {
            Ok(value) => ThemeMode::from_stored(value.as_deref()),
            Err(err) => {
                warn!(%err, "không đọc được chế độ giao diện, dùng mặc định");
                ThemeMode::default()
            }
        };
        Self { store, key, mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Đảo chế độ và ghi lại. Ghi thất bại không chặn việc đổi chế độ.
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        if let Err(err) = self.store.write(&self.key, self.mode.as_str()) {
            warn!(%err, mode = self.mode.as_str(), "không lưu được chế độ giao diện");
        }
        debug!(mode = self.mode.as_str(), "đã đổi chế độ giao diện");
        self.mode
    }

    fn paint(&self, surface: &mut dyn Surface) {
        surface.set_class(Region::Root, LIGHT_CLASS, self.mode == ThemeMode::Light);
        surface.set_text(Region::ThemeToggle, self.mode.glyph());
    }
}

impl<S: PreferenceStore> Component for ThemeController<S> {
    fn mount(&mut self, surface: &mut dyn Surface, _ctx: &RenderContext) {
        self.paint(surface);
    }

    fn attach(&self) -> Vec<Binding> {
        vec![Binding::click(Region::ThemeToggle, |_| {
            Some(Interaction::ToggleTheme)
        })]
    }

    fn handle(&mut self, interaction: &Interaction, surface: &mut dyn Surface, _ctx: &RenderContext) {
        if *interaction == Interaction::ToggleTheme {
            self.toggle();
            self.paint(surface);
        }
    }
}
