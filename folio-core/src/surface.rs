//! Bề mặt hiển thị: các vùng có tên của trang và cây nút mà thành phần dựng ra.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;

use serde::Serialize;

use crate::events::Delegate;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

const VOID_TAGS: [&str; 4] = ["br", "hr", "img", "input"];

/// Vùng có tên cố định trên trang chủ.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Root,
    Year,
    Nav,
    NavToggle,
    ThemeToggle,
    PublicationList,
    PendingList,
    PublicationSearch,
    ExperienceViz,
    SkillGrid,
    SkillTabs,
    SkillSearch,
    SkillInfo,
    SkillTitle,
    SkillNote,
}

impl Region {
    pub const ALL: [Region; 15] = [
        Region::Root,
        Region::Year,
        Region::Nav,
        Region::NavToggle,
        Region::ThemeToggle,
        Region::PublicationList,
        Region::PendingList,
        Region::PublicationSearch,
        Region::ExperienceViz,
        Region::SkillGrid,
        Region::SkillTabs,
        Region::SkillSearch,
        Region::SkillInfo,
        Region::SkillTitle,
        Region::SkillNote,
    ];

    /// CSS selector định vị vùng trong tài liệu.
    pub fn selector(self) -> &'static str {
        match self {
            Region::Root => ":root",
            Region::Year => "#year",
            Region::Nav => ".nav",
            Region::NavToggle => ".nav-toggle",
            Region::ThemeToggle => "#theme-toggle",
            Region::PublicationList => "#pub-list",
            Region::PendingList => "#pending-list",
            Region::PublicationSearch => "#pub-search",
            Region::ExperienceViz => "#experience-viz",
            Region::SkillGrid => "#skill-grid",
            Region::SkillTabs => "#skill-tabs",
            Region::SkillSearch => "#skills-search",
            Region::SkillInfo => "#skill-info",
            Region::SkillTitle => "#skill-title",
            Region::SkillNote => "#skill-note",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    Html,
    Svg,
}

impl Namespace {
    pub fn uri(self) -> Option<&'static str> {
        match self {
            Namespace::Html => None,
            Namespace::Svg => Some(SVG_NAMESPACE),
        }
    }
}

/// Nút trong cây hiển thị.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Element {
    pub namespace: Namespace,
    pub tag: &'static str,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn html(tag: &'static str) -> Self {
        Self::new(Namespace::Html, tag)
    }

    pub fn svg(tag: &'static str) -> Self {
        Self::new(Namespace::Svg, tag)
    }

    fn new(namespace: Namespace, tag: &'static str) -> Self {
        Self {
            namespace,
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }

    /// Mọi phần tử con cháu (kể cả chính nó) có thẻ `tag`, theo thứ tự tài liệu.
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(tag, &mut found);
        found
    }

    fn collect<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        if self.tag == tag {
            found.push(self);
        }
        for child in &self.children {
            if let Node::Element(element) = child {
                element.collect(tag, found);
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Nội dung chữ nối liền của cả cây, giống `textContent`.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.text_content(),
        }
    }

    /// Tuần tự hóa thành markup, có escape ký tự đặc biệt.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        self.write_markup(&mut out);
        out
    }

    fn write_markup(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape(text)),
            Node::Element(element) => {
                let _ = write!(out, "<{}", element.tag);
                for (name, value) in &element.attributes {
                    let _ = write!(out, " {}=\"{}\"", name, escape(value));
                }
                if element.children.is_empty()
                    && (element.namespace == Namespace::Svg || VOID_TAGS.contains(&element.tag))
                {
                    out.push_str("/>");
                    return;
                }
                out.push('>');
                for child in &element.children {
                    child.write_markup(out);
                }
                let _ = write!(out, "</{}>", element.tag);
            }
        }
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Bề mặt mà thành phần vẽ lên.
///
/// Mọi thao tác trên một vùng không tồn tại đều là no-op im lặng.
pub trait Surface {
    fn has_region(&self, region: Region) -> bool;

    fn set_text(&mut self, region: Region, text: &str);

    fn set_class(&mut self, region: Region, class: &str, enabled: bool);

    fn has_class(&self, region: Region, class: &str) -> bool;

    /// Thay toàn bộ nội dung con của vùng.
    fn replace_children(&mut self, region: Region, nodes: Vec<Node>);

    fn set_hidden(&mut self, region: Region, hidden: bool);

    fn scroll_into_view(&mut self, region: Region);

    /// Kích thước (rộng, cao) hiện tại của vùng.
    fn size(&self, region: Region) -> Option<(f64, f64)>;

    /// Gắn `class` cho đúng các phần tử con khớp `delegate` có thuộc tính bằng `value`,
    /// gỡ khỏi mọi phần tử con khớp khác.
    fn mark_child(&mut self, region: Region, delegate: &Delegate, value: &str, class: &str);
}

/// Phần tử con có sẵn trong HTML tĩnh (ví dụ các tab).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticChild {
    pub value: String,
    pub classes: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryRegion {
    pub text: String,
    pub classes: BTreeSet<String>,
    pub children: Vec<Node>,
    pub hidden: bool,
    pub scroll_requests: usize,
    pub size: (f64, f64),
    pub static_children: Vec<StaticChild>,
}

/// Bề mặt trong bộ nhớ, dùng cho CLI và kiểm thử.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    regions: HashMap<Region, MemoryRegion>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trang đầy đủ mọi vùng.
    pub fn with_all_regions() -> Self {
        let mut surface = Self::new();
        for region in Region::ALL {
            surface.insert(region);
        }
        surface
    }

    pub fn insert(&mut self, region: Region) -> &mut MemoryRegion {
        self.regions.entry(region).or_default()
    }

    pub fn remove(&mut self, region: Region) {
        self.regions.remove(&region);
    }

    pub fn region(&self, region: Region) -> Option<&MemoryRegion> {
        self.regions.get(&region)
    }

    pub fn text(&self, region: Region) -> Option<&str> {
        self.region(region).map(|r| r.text.as_str())
    }

    pub fn children(&self, region: Region) -> &[Node] {
        self.region(region)
            .map(|r| r.children.as_slice())
            .unwrap_or_default()
    }

    /// Giá trị của các phần tử con tĩnh đang mang `class`.
    pub fn marked(&self, region: Region, class: &str) -> Vec<&str> {
        self.region(region)
            .map(|r| {
                r.static_children
                    .iter()
                    .filter(|child| child.classes.contains(class))
                    .map(|child| child.value.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Surface for MemorySurface {
    fn has_region(&self, region: Region) -> bool {
        self.regions.contains_key(&region)
    }

    fn set_text(&mut self, region: Region, text: &str) {
        if let Some(r) = self.regions.get_mut(&region) {
            r.text = text.to_string();
        }
    }

    fn set_class(&mut self, region: Region, class: &str, enabled: bool) {
        if let Some(r) = self.regions.get_mut(&region) {
            if enabled {
                r.classes.insert(class.to_string());
            } else {
                r.classes.remove(class);
            }
        }
    }

    fn has_class(&self, region: Region, class: &str) -> bool {
        self.regions
            .get(&region)
            .map_or(false, |r| r.classes.contains(class))
    }

    fn replace_children(&mut self, region: Region, nodes: Vec<Node>) {
        if let Some(r) = self.regions.get_mut(&region) {
            r.text = nodes.iter().map(Node::text_content).collect();
            r.children = nodes;
        }
    }

    fn set_hidden(&mut self, region: Region, hidden: bool) {
        if let Some(r) = self.regions.get_mut(&region) {
            r.hidden = hidden;
        }
    }

    fn scroll_into_view(&mut self, region: Region) {
        if let Some(r) = self.regions.get_mut(&region) {
            r.scroll_requests += 1;
        }
    }

    fn size(&self, region: Region) -> Option<(f64, f64)> {
        self.regions.get(&region).map(|r| r.size)
    }

    fn mark_child(&mut self, region: Region, _delegate: &Delegate, value: &str, class: &str) {
        if let Some(r) = self.regions.get_mut(&region) {
            for child in &mut r.static_children {
                if child.value == value {
                    child.classes.insert(class.to_string());
                } else {
                    child.classes.remove(class);
                }
            }
        }
    }
}
