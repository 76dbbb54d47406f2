use chrono::{DateTime, TimeZone, Utc};
use folio_core::events::route_event;
use folio_core::{
    filter_publications, filter_skills, EventPayload, ExperienceEntry, ExperienceKind,
    FolioConfig, Interaction, MemoryStore, MemorySurface, Node, Page, PublicationRecord,
    Region, RenderContext, SiteData, SkillCategory, SkillEntry, SkillGroup, StaticChild, Surface,
    ThemeMode, Trigger,
};

fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

fn ctx() -> RenderContext {
    RenderContext::at(at(2026, 10, 16))
}

fn publication(title: &str, year: i32, authors: &[&str]) -> PublicationRecord {
    PublicationRecord {
        title: title.to_string(),
        year,
        authors: authors.iter().map(|a| a.to_string()).collect(),
    }
}

fn experience(
    role: &str,
    kind: ExperienceKind,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> ExperienceEntry {
    ExperienceEntry {
        role: role.to_string(),
        org: "Lab".to_string(),
        kind,
        start,
        end,
    }
}

fn skill(name: &str, group: SkillGroup, note: Option<&str>) -> SkillEntry {
    SkillEntry {
        name: name.to_string(),
        group,
        note: note.map(str::to_string),
    }
}

/// Nội dung thẻ `<strong>` đầu tiên của từng nút.
fn strong_texts(nodes: &[Node]) -> Vec<String> {
    nodes
        .iter()
        .filter_map(Node::as_element)
        .filter_map(|element| element.find_all("strong").first().map(|s| s.text_content()))
        .collect()
}

fn surface_with_tabs() -> MemorySurface {
    let mut surface = MemorySurface::with_all_regions();
    surface.insert(Region::SkillTabs).static_children = ["all", "ml", "robotics"]
        .into_iter()
        .map(|value| StaticChild {
            value: value.to_string(),
            ..StaticChild::default()
        })
        .collect();
    surface
}

fn mounted(data: SiteData, store: MemoryStore) -> (Page<MemoryStore>, MemorySurface) {
    let mut surface = surface_with_tabs();
    let mut page = Page::new(data, store, &FolioConfig::default());
    page.mount(&mut surface, &ctx());
    (page, surface)
}

#[test]
fn publications_render_newest_first_and_filter_live() {
    let data = SiteData {
        publications: vec![
            publication("A", 2020, &["X"]),
            publication("B", 2022, &["Y"]),
        ],
        ..SiteData::default()
    };
    let (mut page, mut surface) = mounted(data, MemoryStore::new());

    assert_eq!(strong_texts(surface.children(Region::PublicationList)), vec!["B", "A"]);

    page.dispatch(
        &Interaction::SearchPublications("x".to_string()),
        &mut surface,
        &ctx(),
    );
    assert_eq!(strong_texts(surface.children(Region::PublicationList)), vec!["A"]);

    page.dispatch(
        &Interaction::SearchPublications(String::new()),
        &mut surface,
        &ctx(),
    );
    assert_eq!(strong_texts(surface.children(Region::PublicationList)), vec!["B", "A"]);
}

#[test]
fn publication_filter_partitions_input_by_containment() {
    let records = vec![
        publication("Soft Robotic Grippers", 2021, &["Ada Lovelace", "Lin Chen"]),
        publication("Crop Row Detection", 2019, &["Lin Chen"]),
        publication("Tactile Sensing", 2023, &["Grace Hopper"]),
    ];

    for query in ["lin", "ROBOT", "2019", "hopper", "zzz", " chen "] {
        let needle = query.trim().to_lowercase();
        let shown = filter_publications(&records, query);
        for record in &records {
            let haystack = format!(
                "{} {} {}",
                record.title,
                record.year,
                record.authors.join(" ")
            )
            .to_lowercase();
            let contained = haystack.contains(&needle);
            assert_eq!(
                shown.iter().any(|r| *r == record),
                contained,
                "query {query:?} record {:?}",
                record.title
            );
        }
    }
}

#[test]
fn same_year_publications_keep_input_order() {
    let records = vec![
        publication("C", 2021, &[]),
        publication("D", 2021, &[]),
        publication("E", 2023, &[]),
        publication("F", 2021, &[]),
    ];
    let titles: Vec<_> = filter_publications(&records, "")
        .into_iter()
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(titles, vec!["E", "C", "D", "F"]);
}

#[test]
fn pending_items_are_rendered_verbatim() {
    let data = SiteData {
        pending: vec!["Under review: <Grasp> & Place".to_string(), "In prep".to_string()],
        ..SiteData::default()
    };
    let (_, surface) = mounted(data, MemoryStore::new());

    let items: Vec<String> = surface
        .children(Region::PendingList)
        .iter()
        .map(Node::text_content)
        .collect();
    assert_eq!(items, vec!["Under review: <Grasp> & Place", "In prep"]);
}

#[test]
fn entry_spanning_the_whole_range_fills_the_inner_width() {
    let data = SiteData {
        experience: vec![
            experience("Student", ExperienceKind::University, Some(at(2018, 1, 1)), Some(at(2019, 6, 1))),
            experience("Engineer", ExperienceKind::Industry, Some(at(2019, 1, 1)), Some(at(2021, 1, 1))),
            experience("Span", ExperienceKind::Internship, Some(at(2018, 1, 1)), Some(at(2021, 1, 1))),
        ],
        ..SiteData::default()
    };
    let (page, surface) = mounted(data, MemoryStore::new());

    let layout = page.timeline().layout().expect("timeline đã được vẽ");
    let span = &layout.bars[2];
    assert_eq!(layout.width, 800.0);
    assert_eq!(layout.height, 220.0);
    assert_eq!(span.x, 20.0);
    assert_eq!(span.x + span.width, 780.0);
    assert_eq!(span.y, 160.0);
    assert_eq!(span.fill, "#ff9b42");
    assert_eq!(span.label, "Span — Lab");

    let years: Vec<i32> = layout.ticks.iter().map(|tick| tick.year).collect();
    assert_eq!(years, vec![2018, 2019, 2020, 2021]);
    assert_eq!(layout.ticks[0].x, 20.0);
    assert_eq!(layout.ticks[3].x, 780.0);

    assert_eq!(surface.children(Region::ExperienceViz).len(), 1);
}

#[test]
fn degenerate_entry_keeps_the_minimum_bar_width() {
    let instant = at(2022, 3, 1);
    let data = SiteData {
        experience: vec![experience("Visit", ExperienceKind::Other, Some(instant), Some(instant))],
        ..SiteData::default()
    };
    let (page, _) = mounted(data, MemoryStore::new());

    let bar = &page.timeline().layout().unwrap().bars[0];
    assert_eq!(bar.width, 2.0);
    assert_eq!(bar.x, 20.0);
    assert_eq!(bar.y, 130.0);
}

#[test]
fn inverted_entry_is_clamped_instead_of_rejected() {
    let data = SiteData {
        experience: vec![
            experience("Backwards", ExperienceKind::Industry, Some(at(2021, 1, 1)), Some(at(2020, 1, 1))),
            experience("Frame", ExperienceKind::Industry, Some(at(2019, 1, 1)), Some(at(2022, 1, 1))),
        ],
        ..SiteData::default()
    };
    let (page, _) = mounted(data, MemoryStore::new());
    assert_eq!(page.timeline().layout().unwrap().bars[0].width, 2.0);
}

#[test]
fn open_ended_entries_run_until_now() {
    let data = SiteData {
        experience: vec![experience("Current", ExperienceKind::University, Some(at(2024, 1, 1)), None)],
        ..SiteData::default()
    };
    let (page, _) = mounted(data, MemoryStore::new());

    let layout = page.timeline().layout().unwrap();
    let bar = &layout.bars[0];
    assert_eq!(bar.x, 20.0);
    assert_eq!(bar.x + bar.width, 780.0);
    assert_eq!(layout.ticks.last().map(|tick| tick.year), Some(2026));
}

#[test]
fn redrawing_replaces_previous_timeline() {
    let data = SiteData {
        experience: vec![experience("Engineer", ExperienceKind::Industry, Some(at(2019, 1, 1)), Some(at(2021, 1, 1)))],
        ..SiteData::default()
    };
    let (mut page, mut surface) = mounted(data, MemoryStore::new());

    surface.insert(Region::ExperienceViz).size = (440.0, 200.0);
    page.dispatch(&Interaction::Resize, &mut surface, &ctx());
    page.dispatch(&Interaction::Resize, &mut surface, &ctx());

    let children = surface.children(Region::ExperienceViz);
    assert_eq!(children.len(), 1);
    let svg = children[0].as_element().unwrap();
    assert_eq!(svg.attribute("viewBox"), Some("0 0 440 200"));
    assert_eq!(svg.find_all("rect").len(), 1);
    assert_eq!(svg.find_all("text").len(), 3);
}

#[test]
fn empty_experience_leaves_container_untouched() {
    let (page, surface) = mounted(SiteData::default(), MemoryStore::new());
    assert!(page.timeline().layout().is_none());
    assert!(surface.children(Region::ExperienceViz).is_empty());
}

#[test]
fn theme_toggle_is_idempotent_in_pairs() {
    for initial in ["light", "dark"] {
        let (mut page, mut surface) =
            mounted(SiteData::default(), MemoryStore::with_value("theme", initial));
        let was_light = surface.has_class(Region::Root, "light");
        assert_eq!(was_light, initial == "light");

        page.dispatch(&Interaction::ToggleTheme, &mut surface, &ctx());
        assert_ne!(surface.has_class(Region::Root, "light"), was_light);
        assert_ne!(page.theme().store().get("theme"), Some(initial));

        page.dispatch(&Interaction::ToggleTheme, &mut surface, &ctx());
        assert_eq!(surface.has_class(Region::Root, "light"), was_light);
        assert_eq!(page.theme().store().get("theme"), Some(initial));
    }
}

#[test]
fn theme_glyph_tracks_mode() {
    let (mut page, mut surface) = mounted(SiteData::default(), MemoryStore::new());
    assert_eq!(page.theme().mode(), ThemeMode::Dark);
    assert_eq!(surface.text(Region::ThemeToggle), Some("🌙"));

    page.dispatch(&Interaction::ToggleTheme, &mut surface, &ctx());
    assert_eq!(surface.text(Region::ThemeToggle), Some("☀️"));
    assert_eq!(page.theme().store().get("theme"), Some("light"));
}

fn skills_fixture() -> SiteData {
    SiteData {
        skills: vec![
            skill("PyTorch", SkillGroup::Ml, Some("Training perception models")),
            skill("Torch control", SkillGroup::Robotics, None),
            skill("Scikit-learn", SkillGroup::Ml, None),
            skill("SolidWorks", SkillGroup::Mechanical, Some("CAD")),
        ],
        ..SiteData::default()
    }
}

#[test]
fn skills_category_and_query_compose_against_full_list() {
    let (mut page, mut surface) = mounted(skills_fixture(), MemoryStore::new());
    assert_eq!(strong_texts(surface.children(Region::SkillGrid)).len(), 4);
    assert_eq!(surface.marked(Region::SkillTabs, "active"), vec!["all"]);

    page.dispatch(&Interaction::SelectSkillTab("ml".to_string()), &mut surface, &ctx());
    assert_eq!(surface.marked(Region::SkillTabs, "active"), vec!["ml"]);
    assert_eq!(
        strong_texts(surface.children(Region::SkillGrid)),
        vec!["PyTorch", "Scikit-learn"]
    );

    page.dispatch(&Interaction::SearchSkills("torch".to_string()), &mut surface, &ctx());
    assert_eq!(strong_texts(surface.children(Region::SkillGrid)), vec!["PyTorch"]);

    page.dispatch(&Interaction::SelectSkillTab("all".to_string()), &mut surface, &ctx());
    assert_eq!(surface.marked(Region::SkillTabs, "active"), vec!["all"]);
    assert_eq!(
        strong_texts(surface.children(Region::SkillGrid)),
        vec!["PyTorch", "Torch control"]
    );
    assert_eq!(page.skills().category(), &SkillCategory::All);
}

#[test]
fn skills_filter_matches_manual_predicate() {
    let data = skills_fixture();
    for category in ["all", "ml", "robotics", "mechanical", "ag"] {
        for query in ["", "torch", "SOLID", "learn"] {
            let selected = SkillCategory::parse(category);
            let expected: Vec<usize> = data
                .skills
                .iter()
                .enumerate()
                .filter(|(_, s)| selected.admits(&s.group))
                .filter(|(_, s)| s.name.to_lowercase().contains(&query.to_lowercase()))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(filter_skills(&data.skills, &selected, query), expected);
        }
    }
}

#[test]
fn activating_a_card_fills_and_reveals_the_detail_panel() {
    let (mut page, mut surface) = mounted(skills_fixture(), MemoryStore::new());
    surface.set_hidden(Region::SkillInfo, true);

    page.dispatch(&Interaction::ActivateSkill(0), &mut surface, &ctx());
    assert_eq!(surface.text(Region::SkillTitle), Some("PyTorch"));
    assert_eq!(surface.text(Region::SkillNote), Some("Training perception models"));
    let info = surface.region(Region::SkillInfo).unwrap();
    assert!(!info.hidden);
    assert_eq!(info.scroll_requests, 1);

    page.dispatch(&Interaction::ActivateSkill(1), &mut surface, &ctx());
    assert_eq!(surface.text(Region::SkillTitle), Some("Torch control"));
    assert_eq!(surface.text(Region::SkillNote), Some(""));

    page.dispatch(&Interaction::ActivateSkill(99), &mut surface, &ctx());
    assert_eq!(surface.text(Region::SkillTitle), Some("Torch control"));
}

#[test]
fn bindings_route_browser_events_to_interactions() {
    let (page, _) = mounted(skills_fixture(), MemoryStore::new());
    let bindings = page.attach();

    assert_eq!(
        route_event(&bindings, Region::SkillGrid, Trigger::Click, &EventPayload::with_data("2")),
        vec![Interaction::ActivateSkill(2)]
    );
    assert_eq!(
        route_event(&bindings, Region::SkillTabs, Trigger::Click, &EventPayload::with_data("ml")),
        vec![Interaction::SelectSkillTab("ml".to_string())]
    );
    assert!(route_event(&bindings, Region::SkillTabs, Trigger::Click, &EventPayload::default())
        .is_empty());
    assert_eq!(
        route_event(
            &bindings,
            Region::PublicationSearch,
            Trigger::Input,
            &EventPayload::with_value("grip")
        ),
        vec![Interaction::SearchPublications("grip".to_string())]
    );
    assert_eq!(
        route_event(&bindings, Region::NavToggle, Trigger::Click, &EventPayload::default()),
        vec![Interaction::ToggleNav]
    );
    assert_eq!(
        route_event(&bindings, Region::ThemeToggle, Trigger::Click, &EventPayload::default()),
        vec![Interaction::ToggleTheme]
    );
}

#[test]
fn missing_regions_degrade_silently() {
    let data = SiteData {
        publications: vec![publication("A", 2020, &["X"])],
        experience: vec![experience("Engineer", ExperienceKind::Industry, None, None)],
        ..skills_fixture()
    };
    let mut surface = MemorySurface::new();
    surface.insert(Region::PublicationList);
    let mut page = Page::new(data, MemoryStore::unavailable(), &FolioConfig::default());
    page.mount(&mut surface, &ctx());

    for interaction in [
        Interaction::ToggleNav,
        Interaction::ToggleTheme,
        Interaction::SearchSkills("torch".to_string()),
        Interaction::ActivateSkill(0),
        Interaction::Resize,
    ] {
        page.dispatch(&interaction, &mut surface, &ctx());
    }

    assert_eq!(strong_texts(surface.children(Region::PublicationList)), vec!["A"]);
    assert!(!surface.has_region(Region::ExperienceViz));
    assert!(page.timeline().layout().is_none());
    assert!(page.skills().detail().is_none());
    assert_eq!(page.theme().mode(), ThemeMode::Light);
}

#[test]
fn removed_regions_only_disable_their_own_component() {
    let data = SiteData {
        publications: vec![publication("A", 2020, &["X"])],
        experience: vec![experience("Engineer", ExperienceKind::Industry, None, None)],
        ..skills_fixture()
    };
    let mut surface = surface_with_tabs();
    surface.remove(Region::SkillGrid);
    surface.remove(Region::ExperienceViz);
    let mut page = Page::new(data, MemoryStore::new(), &FolioConfig::default());
    page.mount(&mut surface, &ctx());
    page.dispatch(&Interaction::SelectSkillTab("ml".to_string()), &mut surface, &ctx());
    page.dispatch(&Interaction::Resize, &mut surface, &ctx());

    assert!(surface.marked(Region::SkillTabs, "active").is_empty());
    assert!(page.skills().visible().is_empty());
    assert!(page.timeline().layout().is_none());
    assert_eq!(strong_texts(surface.children(Region::PublicationList)), vec!["A"]);
}

#[test]
fn year_stamp_shows_current_year() {
    let (_, surface) = mounted(SiteData::default(), MemoryStore::new());
    assert_eq!(surface.text(Region::Year), Some("2026"));
}

#[test]
fn nav_toggle_flips_open_state() {
    let (mut page, mut surface) = mounted(SiteData::default(), MemoryStore::new());
    page.dispatch(&Interaction::ToggleNav, &mut surface, &ctx());
    assert!(page.nav().is_open());
    assert!(surface.has_class(Region::Nav, "open"));
}
