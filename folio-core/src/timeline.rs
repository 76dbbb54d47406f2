//! Timeline kinh nghiệm dạng SVG: thang thời gian tuyến tính, thanh theo làn, vạch năm.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;

use crate::events::{Binding, Interaction};
use crate::model::{ExperienceEntry, ExperienceKind};
use crate::surface::{Element, Node, Region, Surface, SVG_NAMESPACE};
use crate::{Component, FolioConfig, RenderContext};

const AXIS_STROKE: &str = "rgba(255,255,255,0.2)";
const TICK_STROKE: &str = "rgba(255,255,255,0.18)";
const LABEL_FILL: &str = "rgba(255,255,255,0.5)";

/// Ánh xạ tuyến tính từ thời điểm sang tọa độ ngang.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    min: DateTime<Utc>,
    max: DateTime<Utc>,
    padding: f64,
    inner_width: f64,
}

impl TimeScale {
    pub fn new(min: DateTime<Utc>, max: DateTime<Utc>, width: f64, padding: f64) -> Self {
        Self {
            min,
            max,
            padding,
            inner_width: width - padding * 2.0,
        }
    }

    /// Khoảng thời gian (ms) dùng làm mẫu số; bằng 0 thì coi là 1.
    fn span_millis(&self) -> f64 {
        match (self.max - self.min).num_milliseconds() {
            0 => 1.0,
            span => span as f64,
        }
    }

    pub fn x(&self, t: DateTime<Utc>) -> f64 {
        let offset = (t - self.min).num_milliseconds() as f64;
        self.padding + offset / self.span_millis() * self.inner_width
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AxisLine {
    pub x1: f64,
    pub x2: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimelineBar {
    pub kind: ExperienceKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    pub fill: &'static str,
    pub opacity: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearTick {
    pub year: i32,
    pub x: f64,
}

/// Kết quả bố cục, độc lập với cách vẽ.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimelineLayout {
    pub width: f64,
    pub height: f64,
    pub axis: AxisLine,
    pub bars: Vec<TimelineBar>,
    pub ticks: Vec<YearTick>,
}

/// Tính bố cục timeline. Trả về `None` khi không có mục nào.
///
/// Kích thước không dương được thay bằng `fallback_width`/`fallback_height`.
/// Mốc vắng mặt được thay bằng `now` trước khi tính thang. Thanh có độ dài
/// âm hoặc bằng 0 vẫn được vẽ với chiều rộng tối thiểu `min_bar_width`.
pub fn layout_timeline(
    entries: &[ExperienceEntry],
    width: f64,
    height: f64,
    now: DateTime<Utc>,
    config: &FolioConfig,
) -> Option<TimelineLayout> {
    let width = if width > 0.0 { width } else { config.fallback_width };
    let height = if height > 0.0 { height } else { config.fallback_height };
    let resolved: Vec<(&ExperienceEntry, DateTime<Utc>, DateTime<Utc>)> = entries
        .iter()
        .map(|entry| (entry, entry.resolved_start(now), entry.resolved_end(now)))
        .collect();

    let min = resolved.iter().map(|(_, start, _)| *start).min()?;
    let max = resolved.iter().map(|(_, _, end)| *end).max()?;
    let scale = TimeScale::new(min, max, width, config.padding);

    let bars = resolved
        .iter()
        .map(|(entry, start, end)| {
            let x1 = scale.x(*start);
            let x2 = scale.x(*end);
            TimelineBar {
                kind: entry.kind,
                x: x1,
                y: entry.kind.lane(),
                width: (x2 - x1).max(config.min_bar_width),
                height: config.bar_height,
                radius: config.bar_radius,
                fill: entry.kind.color(),
                opacity: config.bar_opacity,
                label: entry.label(),
            }
        })
        .collect();

    let ticks = (min.year()..=max.year())
        .filter_map(|year| {
            let jan_first = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()?;
            Some(YearTick {
                year,
                x: scale.x(jan_first),
            })
        })
        .collect();

    Some(TimelineLayout {
        width,
        height,
        axis: AxisLine {
            x1: config.padding,
            x2: width - config.padding,
            y: height / 2.0,
        },
        bars,
        ticks,
    })
}

impl TimelineLayout {
    /// Dựng cây SVG để gắn vào trang.
    pub fn to_node(&self) -> Node {
        let mid = self.height / 2.0;
        let mut svg = Element::svg("svg")
            .attr("viewBox", format!("0 0 {} {}", self.width, self.height))
            .attr("width", "100%")
            .attr("height", "100%")
            .child(
                Element::svg("line")
                    .attr("x1", self.axis.x1)
                    .attr("x2", self.axis.x2)
                    .attr("y1", self.axis.y)
                    .attr("y2", self.axis.y)
                    .attr("stroke", AXIS_STROKE)
                    .attr("stroke-width", 1),
            );

        for bar in &self.bars {
            svg = svg.child(
                Element::svg("rect")
                    .attr("x", bar.x)
                    .attr("y", bar.y)
                    .attr("width", bar.width)
                    .attr("height", bar.height)
                    .attr("rx", bar.radius)
                    .attr("fill", bar.fill)
                    .attr("opacity", bar.opacity)
                    .child(Element::svg("title").text(bar.label.clone())),
            );
        }

        for tick in &self.ticks {
            svg = svg
                .child(
                    Element::svg("line")
                        .attr("x1", tick.x)
                        .attr("x2", tick.x)
                        .attr("y1", mid - 6.0)
                        .attr("y2", mid + 6.0)
                        .attr("stroke", TICK_STROKE)
                        .attr("stroke-width", 1),
                )
                .child(
                    Element::svg("text")
                        .attr("x", tick.x + 4.0)
                        .attr("y", mid - 10.0)
                        .attr("fill", LABEL_FILL)
                        .attr("font-size", 11)
                        .text(tick.year.to_string()),
                );
        }

        svg.into()
    }

    /// Tài liệu SVG độc lập (có khai báo namespace).
    pub fn to_svg(&self) -> String {
        let mut node = self.to_node();
        if let Node::Element(svg) = &mut node {
            svg.attributes
                .insert(0, ("xmlns".to_string(), SVG_NAMESPACE.to_string()));
        }
        node.to_markup()
    }
}

/// Thành phần vẽ timeline vào vùng `ExperienceViz`.
#[derive(Debug, Clone)]
pub struct ExperienceTimeline {
    entries: Vec<ExperienceEntry>,
    config: FolioConfig,
    layout: Option<TimelineLayout>,
}

impl ExperienceTimeline {
    pub fn new(entries: Vec<ExperienceEntry>, config: FolioConfig) -> Self {
        Self {
            entries,
            config,
            layout: None,
        }
    }

    /// Bố cục của lần vẽ gần nhất.
    pub fn layout(&self) -> Option<&TimelineLayout> {
        self.layout.as_ref()
    }

    /// Tính lại và thay hoàn toàn nội dung vùng chứa.
    pub fn draw(&mut self, surface: &mut dyn Surface, ctx: &RenderContext) {
        if self.entries.is_empty() {
            return;
        }
        let Some((width, height)) = surface.size(Region::ExperienceViz) else {
            return;
        };
        self.layout = layout_timeline(&self.entries, width, height, ctx.now, &self.config);
        if let Some(layout) = &self.layout {
            debug!(
                bars = layout.bars.len(),
                ticks = layout.ticks.len(),
                width = layout.width,
                height = layout.height,
                "vẽ timeline kinh nghiệm"
            );
            surface.replace_children(Region::ExperienceViz, vec![layout.to_node()]);
        }
    }
}

impl Component for ExperienceTimeline {
    fn mount(&mut self, surface: &mut dyn Surface, ctx: &RenderContext) {
        self.draw(surface, ctx);
    }

    fn attach(&self) -> Vec<Binding> {
        vec![Binding::resize(Region::ExperienceViz, |_| {
            Some(Interaction::Resize)
        })]
    }

    fn handle(&mut self, interaction: &Interaction, surface: &mut dyn Surface, ctx: &RenderContext) {
        if *interaction == Interaction::Resize {
            self.draw(surface, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn zero_width_range_does_not_divide_by_zero() {
        let t = at(2021, 5, 1);
        let scale = TimeScale::new(t, t, 800.0, 20.0);
        assert_eq!(scale.x(t), 20.0);
    }

    #[test]
    fn svg_document_declares_namespace() {
        let entries = vec![ExperienceEntry {
            role: "Engineer".into(),
            org: "Acme".into(),
            kind: ExperienceKind::Industry,
            start: Some(at(2020, 1, 1)),
            end: Some(at(2021, 1, 1)),
        }];
        let layout =
            layout_timeline(&entries, 440.0, 220.0, at(2026, 1, 1), &FolioConfig::default())
                .unwrap();
        let svg = layout.to_svg();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 440 220\""));
        assert!(svg.contains("<title>Engineer — Acme</title>"));
        assert!(svg.contains(">2020</text>"));
        assert!(svg.contains(">2021</text>"));
    }

    #[test]
    fn collapsed_container_uses_fallback_size() {
        let entries = vec![ExperienceEntry {
            role: "Engineer".into(),
            org: "Acme".into(),
            kind: ExperienceKind::Industry,
            start: Some(at(2020, 1, 1)),
            end: Some(at(2021, 1, 1)),
        }];
        let layout =
            layout_timeline(&entries, 0.0, 0.0, at(2026, 1, 1), &FolioConfig::default()).unwrap();
        assert_eq!((layout.width, layout.height), (800.0, 220.0));
        assert_eq!(layout.axis.x2, 780.0);
        assert_eq!(layout.bars[0].x, 20.0);
        assert_eq!(layout.bars[0].width, 760.0);
    }
}
