#![cfg(target_arch = "wasm32")]

use folio_core::{Delegate, Node, Region, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    console, Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

/// `Surface` trên DOM thật; vùng được tìm lại theo selector mỗi lần dùng.
pub struct DomSurface {
    document: Document,
}

impl DomSurface {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub(crate) fn element(&self, region: Region) -> Option<Element> {
        match region {
            Region::Root => self.document.document_element(),
            other => self.document.query_selector(other.selector()).ok().flatten(),
        }
    }

    fn build(&self, node: &Node) -> Result<web_sys::Node, JsValue> {
        match node {
            Node::Text(text) => Ok(self.document.create_text_node(text).into()),
            Node::Element(template) => {
                let element = match template.namespace.uri() {
                    Some(namespace) => self.document.create_element_ns(Some(namespace), template.tag)?,
                    None => self.document.create_element(template.tag)?,
                };
                for (name, value) in &template.attributes {
                    element.set_attribute(name, value)?;
                }
                for child in &template.children {
                    element.append_child(&self.build(child)?)?;
                }
                Ok(element.into())
            }
        }
    }
}

fn report(result: Result<(), JsValue>) {
    if let Err(err) = result {
        console::error_1(&err);
    }
}

impl Surface for DomSurface {
    fn has_region(&self, region: Region) -> bool {
        self.element(region).is_some()
    }

    fn set_text(&mut self, region: Region, text: &str) {
        if let Some(element) = self.element(region) {
            element.set_text_content(Some(text));
        }
    }

    fn set_class(&mut self, region: Region, class: &str, enabled: bool) {
        if let Some(element) = self.element(region) {
            let classes = element.class_list();
            report(if enabled {
                classes.add_1(class)
            } else {
                classes.remove_1(class)
            });
        }
    }

    fn has_class(&self, region: Region, class: &str) -> bool {
        self.element(region)
            .map_or(false, |element| element.class_list().contains(class))
    }

    fn replace_children(&mut self, region: Region, nodes: Vec<Node>) {
        let Some(element) = self.element(region) else {
            return;
        };
        element.set_inner_html("");
        for node in &nodes {
            report(
                self.build(node)
                    .and_then(|child| element.append_child(&child).map(|_| ())),
            );
        }
    }

    fn set_hidden(&mut self, region: Region, hidden: bool) {
        if let Some(element) = self.element(region) {
            if let Ok(html) = element.dyn_into::<HtmlElement>() {
                html.set_hidden(hidden);
            }
        }
    }

    fn scroll_into_view(&mut self, region: Region) {
        if let Some(element) = self.element(region) {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Nearest);
            element.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }

    fn size(&self, region: Region) -> Option<(f64, f64)> {
        self.element(region)
            .map(|element| (element.client_width() as f64, element.client_height() as f64))
    }

    fn mark_child(&mut self, region: Region, delegate: &Delegate, value: &str, class: &str) {
        let Some(element) = self.element(region) else {
            return;
        };
        let Ok(children) = element.query_selector_all(delegate.selector) else {
            return;
        };
        for index in 0..children.length() {
            let Some(child) = children
                .item(index)
                .and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let matches = child.get_attribute(delegate.attribute).as_deref() == Some(value);
            let classes = child.class_list();
            report(if matches {
                classes.add_1(class)
            } else {
                classes.remove_1(class)
            });
        }
    }
}
