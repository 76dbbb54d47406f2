use std::fs;

use serde_json::Value;
use folio_data::parse_site_data_str;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn site_data_matches_golden() {
    let input = fs::read_to_string(fixture_path("site_data.json"))
        .expect("Could not read sample site data");

    let data = parse_site_data_str(&input).expect("Could not convert site data");
    let actual = serde_json::to_value(data).expect("Could not serialize site data");

    let expected = fs::read_to_string(fixture_path("site_data_expected.json"))
        .expect("Could not read golden site data");
    let expected: Value = serde_json::from_str(&expected).expect("Golden file is not valid JSON");

    assert_eq!(actual, expected);
}

#[test]
fn missing_sections_default_to_empty() {
    let data = parse_site_data_str(r#"{ "skills": [ { "name": "CAD" } ] }"#)
        .expect("Could not convert site data");

    assert!(data.publications.is_empty());
    assert!(data.pending.is_empty());
    assert!(data.experience.is_empty());
    assert_eq!(data.skills.len(), 1);
    assert_eq!(data.skills[0].name, "CAD");
    assert_eq!(data.skills[0].note, None);
}
