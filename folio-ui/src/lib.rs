//! Gắn các thành phần trang portfolio vào DOM trong môi trường WebAssembly.

#[cfg(target_arch = "wasm32")]
mod storage;
#[cfg(target_arch = "wasm32")]
mod surface;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::storage::LocalStorageStore;
    use crate::surface::DomSurface;
    use folio_core::{
        empty_site_data, Binding, Delegate, EventPayload, FolioConfig, Page, RenderContext,
        SiteData, Trigger,
    };
    use serde_wasm_bindgen::from_value;
    use tracing::debug;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{console, Document, Element, Event, EventTarget, HtmlInputElement, Window};

    type SharedPage = Rc<RefCell<Page<LocalStorageStore>>>;
    type SharedSurface = Rc<RefCell<DomSurface>>;

    fn read_site_data(input: JsValue) -> Result<SiteData, JsValue> {
        if input.is_undefined() || input.is_null() {
            return Ok(empty_site_data());
        }
        let value = from_value::<serde_json::Value>(input)
            .map_err(|err| JsValue::from_str(&format!("Không đọc được dữ liệu trang: {err}")))?;
        Ok(folio_data::site_data_from_value(&value))
    }

    fn read_config(config: Option<JsValue>) -> Result<FolioConfig, JsValue> {
        match config {
            Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}"))),
            _ => Ok(FolioConfig::default()),
        }
    }

    fn payload_for(event: &Event, delegate: Option<&Delegate>) -> EventPayload {
        let target = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok());
        let value = target
            .as_ref()
            .and_then(|element| element.dyn_ref::<HtmlInputElement>())
            .map(HtmlInputElement::value);
        let data = match (delegate, target.as_ref()) {
            (Some(delegate), Some(element)) => element
                .closest(delegate.selector)
                .ok()
                .flatten()
                .and_then(|matched| matched.get_attribute(delegate.attribute)),
            _ => None,
        };
        EventPayload { value, data }
    }

    fn bind(
        window: &Window,
        page: &SharedPage,
        surface: &SharedSurface,
        binding: Binding,
    ) -> Result<(), JsValue> {
        let target: EventTarget = match binding.trigger {
            Trigger::Resize => window.clone().into(),
            _ => match surface.borrow().element(binding.region) {
                Some(element) => element.into(),
                None => {
                    debug!(region = ?binding.region, "bỏ qua đăng ký: vùng không tồn tại");
                    return Ok(());
                }
            },
        };

        let page = Rc::clone(page);
        let surface = Rc::clone(surface);
        let handler = Closure::wrap(Box::new(move |event: Event| {
            let payload = payload_for(&event, binding.delegate.as_ref());
            let Some(interaction) = binding.route(&payload) else {
                return;
            };
            let ctx = RenderContext::now();
            page.borrow_mut()
                .dispatch(&interaction, &mut *surface.borrow_mut(), &ctx);
        }) as Box<dyn FnMut(Event)>);

        target.add_event_listener_with_callback(
            binding.trigger.event_name(),
            handler.as_ref().unchecked_ref(),
        )?;
        handler.forget();
        Ok(())
    }

    fn enhance(window: Window, document: Document, data: SiteData, config: FolioConfig) -> Result<(), JsValue> {
        let store = LocalStorageStore::from_window(&window);
        let page: SharedPage = Rc::new(RefCell::new(Page::new(data, store, &config)));
        let surface: SharedSurface = Rc::new(RefCell::new(DomSurface::new(document)));

        page.borrow_mut()
            .mount(&mut *surface.borrow_mut(), &RenderContext::now());

        let bindings = page.borrow().attach();
        for binding in bindings {
            if let Err(err) = bind(&window, &page, &surface, binding) {
                console::error_1(&err);
            }
        }
        Ok(())
    }

    /// Nâng cấp trang với dữ liệu truyền vào.
    #[wasm_bindgen]
    pub fn enhance_page(site_data: JsValue, config: Option<JsValue>) -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        let data = read_site_data(site_data)?;
        let config = read_config(config)?;
        enhance(window, document, data, config)
    }

    /// Nâng cấp trang với `window.SITE_DATA` (vắng mặt thì dùng dữ liệu rỗng).
    #[wasm_bindgen]
    pub fn enhance_from_window() -> Result<(), JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let site_data = js_sys::Reflect::get(&window, &JsValue::from_str("SITE_DATA"))
            .unwrap_or(JsValue::UNDEFINED);
        enhance_page(site_data, None)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::{enhance_from_window, enhance_page};

#[cfg(not(target_arch = "wasm32"))]
pub fn enhance_page(
    _: wasm_bindgen::JsValue,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "folio-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn enhance_from_window() -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "folio-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
