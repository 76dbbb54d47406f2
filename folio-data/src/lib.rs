//! Lenient converter from the page's `SITE_DATA` JSON object to `SiteData`.
//!
//! Nothing here fails on shape: absent sequences become empty, absent strings
//! become empty, unknown experience types fall back to `Other` and unknown
//! skill groups keep their raw name. Only text that is not JSON at all is
//! reported as an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;
use tracing::debug;

use folio_core::{
    ExperienceEntry, ExperienceKind, FolioError, PendingItem, PublicationRecord, SiteData,
    SkillEntry, SkillGroup,
};

/// Parse site data from a JSON string.
pub fn parse_site_data_str(json: &str) -> Result<SiteData, FolioError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| FolioError::Parse(err.to_string()))?;
    Ok(site_data_from_value(&value))
}

/// Convert an already-parsed `serde_json::Value`.
pub fn site_data_from_value(value: &Value) -> SiteData {
    let data = SiteData {
        publications: sequence(value, "publications")
            .filter_map(publication_from_value)
            .collect(),
        pending: sequence(value, "pending")
            .filter_map(scalar_text)
            .collect::<Vec<PendingItem>>(),
        experience: sequence(value, "experience")
            .filter_map(experience_from_value)
            .collect(),
        skills: sequence(value, "skills")
            .filter_map(skill_from_value)
            .collect(),
    };

    debug!(
        publications = data.publications.len(),
        pending = data.pending.len(),
        experience = data.experience.len(),
        skills = data.skills.len(),
        "loaded site data"
    );

    data
}

fn sequence<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter())
        .into_iter()
        .flatten()
}

fn publication_from_value(value: &Value) -> Option<PublicationRecord> {
    value.as_object()?;
    Some(PublicationRecord {
        title: text_field(value, "title"),
        year: year_field(value),
        authors: sequence(value, "authors").filter_map(scalar_text).collect(),
    })
}

fn experience_from_value(value: &Value) -> Option<ExperienceEntry> {
    value.as_object()?;
    Some(ExperienceEntry {
        role: text_field(value, "role"),
        org: text_field(value, "org"),
        kind: ExperienceKind::from_raw(&text_field(value, "type")),
        start: date_field(value, "start"),
        end: date_field(value, "end"),
    })
}

fn skill_from_value(value: &Value) -> Option<SkillEntry> {
    value.as_object()?;
    Some(SkillEntry {
        name: text_field(value, "name"),
        group: SkillGroup::from_raw(&text_field(value, "group")),
        note: value
            .get("note")
            .and_then(scalar_text)
            .filter(|note| !note.is_empty()),
    })
}

fn text_field(value: &Value, key: &str) -> String {
    value.get(key).and_then(scalar_text).unwrap_or_default()
}

/// Strings pass through, numbers and booleans are stringified, anything else is dropped.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn year_field(value: &Value) -> i32 {
    match value.get("year") {
        Some(Value::Number(number)) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64))
            .and_then(|year| i32::try_from(year).ok())
            .unwrap_or_default(),
        Some(Value::String(text)) => text.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}

fn date_field(value: &Value, key: &str) -> Option<DateTime<Utc>> {
    value.get(key).and_then(Value::as_str).and_then(parse_date)
}

/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, naive `YYYY-MM-DDTHH:MM:SS`
/// (read as UTC) and RFC 3339. Empty or unrecognised input yields `None`,
/// which the timeline resolves to "now".
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    let date = match raw.len() {
        4 => NaiveDate::from_ymd_opt(raw.parse().ok()?, 1, 1),
        7 => NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d").ok(),
        _ => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
    }?;

    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn partial_dates_resolve_to_first_instant() {
        assert_eq!(parse_date("2019"), Some(utc(2019, 1, 1)));
        assert_eq!(parse_date("2019-09"), Some(utc(2019, 9, 1)));
        assert_eq!(parse_date("2019-09-15"), Some(utc(2019, 9, 15)));
        assert_eq!(
            parse_date("2019-09-15T08:30:00+02:00"),
            Some(Utc.with_ymd_and_hms(2019, 9, 15, 6, 30, 0).unwrap())
        );
    }

    #[test]
    fn unusable_dates_are_treated_as_absent() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("present"), None);
        assert_eq!(parse_date("2019-13"), None);
    }

    #[test]
    fn non_object_root_yields_empty_data() {
        assert_eq!(site_data_from_value(&json!([1, 2, 3])), SiteData::default());
        assert_eq!(site_data_from_value(&Value::Null), SiteData::default());
    }

    #[test]
    fn year_accepts_numeric_strings() {
        let data = site_data_from_value(&json!({
            "publications": [
                { "title": "A", "year": "2021" },
                { "title": "B", "year": 2020.0 },
                { "title": "C" }
            ]
        }));
        let years: Vec<i32> = data.publications.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2021, 2020, 0]);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(
            parse_site_data_str("{ not json"),
            Err(FolioError::Parse(_))
        ));
    }
}
