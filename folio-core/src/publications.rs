use tracing::debug;

use crate::events::{Binding, Interaction};
use crate::model::{PendingItem, PublicationRecord};
use crate::surface::{Element, Node, Region, Surface};
use crate::{Component, RenderContext};

/// Lọc công bố theo từ khóa (không phân biệt hoa thường) rồi xếp năm giảm dần.
///
/// Từ khóa được so trên chuỗi "tiêu đề năm tác-giả..." ghép bởi dấu cách.
/// Phép sắp xếp ổn định: các công bố cùng năm giữ nguyên thứ tự đầu vào.
pub fn filter_publications<'a>(
    records: &'a [PublicationRecord],
    query: &str,
) -> Vec<&'a PublicationRecord> {
    let needle = query.trim().to_lowercase();
    let mut matched: Vec<&PublicationRecord> = records
        .iter()
        .filter(|record| needle.is_empty() || haystack(record).contains(&needle))
        .collect();
    matched.sort_by(|a, b| b.year.cmp(&a.year));
    matched
}

fn haystack(record: &PublicationRecord) -> String {
    format!(
        "{} {} {}",
        record.title,
        record.year,
        record.authors.join(" ")
    )
    .to_lowercase()
}

pub fn render_publication(record: &PublicationRecord) -> Node {
    Element::html("li")
        .child(Element::html("strong").text(record.title.clone()))
        .text(" ")
        .child(
            Element::html("span")
                .attr("class", "meta")
                .text(format!("({})", record.year)),
        )
        .child(Element::html("br"))
        .child(
            Element::html("span")
                .attr("class", "muted")
                .text(record.authors.join(", ")),
        )
        .into()
}

pub fn render_pending(item: &str) -> Node {
    Element::html("li").text(item).into()
}

/// Danh sách công bố có ô tìm kiếm, cùng danh sách việc đang chờ.
#[derive(Debug, Clone, Default)]
pub struct PublicationsView {
    records: Vec<PublicationRecord>,
    pending: Vec<PendingItem>,
    query: String,
}

impl PublicationsView {
    pub fn new(records: Vec<PublicationRecord>, pending: Vec<PendingItem>) -> Self {
        Self {
            records,
            pending,
            query: String::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn visible(&self) -> Vec<&PublicationRecord> {
        filter_publications(&self.records, &self.query)
    }

    /// Vẽ lại toàn bộ danh sách theo từ khóa.
    pub fn render(&mut self, query: &str, surface: &mut dyn Surface) {
        self.query = query.to_string();
        if !surface.has_region(Region::PublicationList) {
            return;
        }
        let visible = self.visible();
        debug!(
            query = self.query.as_str(),
            shown = visible.len(),
            total = self.records.len(),
            "vẽ danh sách công bố"
        );
        let nodes = visible.into_iter().map(render_publication).collect();
        surface.replace_children(Region::PublicationList, nodes);
    }

    fn render_pending(&self, surface: &mut dyn Surface) {
        if !surface.has_region(Region::PendingList) {
            return;
        }
        let nodes = self.pending.iter().map(|item| render_pending(item)).collect();
        surface.replace_children(Region::PendingList, nodes);
    }
}

impl Component for PublicationsView {
    fn mount(&mut self, surface: &mut dyn Surface, _ctx: &RenderContext) {
        self.render("", surface);
        self.render_pending(surface);
    }

    fn attach(&self) -> Vec<Binding> {
        vec![Binding::input(Region::PublicationSearch, |payload| {
            Some(Interaction::SearchPublications(
                payload.value.clone().unwrap_or_default(),
            ))
        })]
    }

    fn handle(&mut self, interaction: &Interaction, surface: &mut dyn Surface, _ctx: &RenderContext) {
        if let Interaction::SearchPublications(query) = interaction {
            self.render(query, surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, year: i32, authors: &[&str]) -> PublicationRecord {
        PublicationRecord {
            title: title.to_string(),
            year,
            authors: authors.iter().map(|a| a.to_string()).collect(),
        }
    }

    #[test]
    fn whitespace_query_matches_everything() {
        let records = vec![record("A", 2020, &["X"]), record("B", 2022, &["Y"])];
        let titles: Vec<_> = filter_publications(&records, "   ")
            .into_iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn year_is_part_of_the_haystack() {
        let records = vec![record("A", 2020, &["X"]), record("B", 2022, &["Y"])];
        let found = filter_publications(&records, "2022");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "B");
    }

    #[test]
    fn rendered_entry_shows_title_year_and_authors() {
        let node = render_publication(&record("Soft grippers", 2021, &["Ada", "Lin"]));
        assert_eq!(node.text_content(), "Soft grippers (2021)Ada, Lin");
        assert_eq!(
            node.to_markup(),
            "<li><strong>Soft grippers</strong> <span class=\"meta\">(2021)</span><br/><span class=\"muted\">Ada, Lin</span></li>"
        );
    }
}
