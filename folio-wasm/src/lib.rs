//! Bridge WASM <-> JavaScript trung lập framework.

use folio_core::{
    filter_publications as filter_publication_records, filter_skills as filter_skill_indices,
    layout_timeline as compute_layout, FolioConfig, FolioError, RenderContext, SiteData,
    SkillCategory, TimelineLayout,
};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize, Default)]
struct JsFolioConfig {
    #[serde(default)]
    padding: Option<f64>,
    #[serde(default)]
    fallback_width: Option<f64>,
    #[serde(default)]
    fallback_height: Option<f64>,
    #[serde(default)]
    bar_height: Option<f64>,
    #[serde(default)]
    bar_radius: Option<f64>,
    #[serde(default)]
    bar_opacity: Option<f64>,
    #[serde(default)]
    min_bar_width: Option<f64>,
    #[serde(default)]
    theme_key: Option<String>,
}

impl From<JsFolioConfig> for FolioConfig {
    fn from(cfg: JsFolioConfig) -> Self {
        let mut base = FolioConfig::default();
        if let Some(padding) = cfg.padding {
            base.padding = padding;
        }
        if let Some(width) = cfg.fallback_width {
            base.fallback_width = width;
        }
        if let Some(height) = cfg.fallback_height {
            base.fallback_height = height;
        }
        if let Some(height) = cfg.bar_height {
            base.bar_height = height;
        }
        if let Some(radius) = cfg.bar_radius {
            base.bar_radius = radius;
        }
        if let Some(opacity) = cfg.bar_opacity {
            base.bar_opacity = opacity;
        }
        if let Some(width) = cfg.min_bar_width {
            base.min_bar_width = width;
        }
        if let Some(key) = cfg.theme_key {
            base.theme_key = key;
        }
        base
    }
}

/// Thẻ kỹ năng trả về cho JS, kèm chỉ số trong danh sách gốc.
#[derive(Serialize)]
struct SkillCard<'a> {
    index: usize,
    name: &'a str,
    group: &'a str,
    label: &'static str,
    note: &'a str,
}

fn read_site_data(input: JsValue) -> Result<SiteData, JsValue> {
    let value = from_value::<serde_json::Value>(input)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được dữ liệu trang: {err}")))?;
    Ok(folio_data::site_data_from_value(&value))
}

fn read_config(config: Option<JsValue>) -> Result<FolioConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsFolioConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            Ok(FolioConfig::from(cfg))
        }
        _ => Ok(FolioConfig::default()),
    }
}

fn serialize<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|err| JsValue::from_str(&format_folio_error(FolioError::Other(err.to_string()))))
}

/// Chuẩn hóa dữ liệu trang (mọi trường thiếu đều nhận giá trị mặc định).
#[wasm_bindgen]
pub fn parse_site_data(input: JsValue) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    serialize(&read_site_data(input)?)
}

/// Công bố khớp từ khóa, năm giảm dần.
#[wasm_bindgen]
pub fn filter_publications(site_data: JsValue, query: &str) -> Result<JsValue, JsValue> {
    let data = read_site_data(site_data)?;
    serialize(&filter_publication_records(&data.publications, query))
}

/// Kỹ năng khớp danh mục (`"all"` hoặc tên nhóm) và từ khóa trên tên.
#[wasm_bindgen]
pub fn filter_skills(site_data: JsValue, category: &str, query: &str) -> Result<JsValue, JsValue> {
    let data = read_site_data(site_data)?;
    let cards: Vec<SkillCard> =
        filter_skill_indices(&data.skills, &SkillCategory::parse(category), query)
            .into_iter()
            .map(|index| {
                let skill = &data.skills[index];
                SkillCard {
                    index,
                    name: &skill.name,
                    group: skill.group.as_str(),
                    label: skill.group.label(),
                    note: skill.note.as_deref().unwrap_or_default(),
                }
            })
            .collect();
    serialize(&cards)
}

fn timeline_for(
    site_data: JsValue,
    width: f64,
    height: f64,
    config: Option<JsValue>,
) -> Result<Option<TimelineLayout>, JsValue> {
    let data = read_site_data(site_data)?;
    let cfg = read_config(config)?;
    let ctx = RenderContext::now();
    Ok(compute_layout(&data.experience, width, height, ctx.now, &cfg))
}

/// Bố cục timeline (thanh, vạch năm); `null` khi không có kinh nghiệm nào.
#[wasm_bindgen]
pub fn layout_timeline(
    site_data: JsValue,
    width: f64,
    height: f64,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    serialize(&timeline_for(site_data, width, height, config)?)
}

/// Timeline dưới dạng tài liệu SVG; chuỗi rỗng khi không có kinh nghiệm nào.
#[wasm_bindgen]
pub fn timeline_svg(
    site_data: JsValue,
    width: f64,
    height: f64,
    config: Option<JsValue>,
) -> Result<String, JsValue> {
    Ok(timeline_for(site_data, width, height, config)?
        .map(|layout| layout.to_svg())
        .unwrap_or_default())
}

fn format_folio_error(err: FolioError) -> String {
    format!("Folio error: {err}")
}
