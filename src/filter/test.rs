#![cfg(test)]

use crate::element::Tags;
use crate::filter::{FilterRule, TagFilter, DEFAULT_RULES};

#[test]
fn parses_rules() {
    assert_eq!("note".parse::<FilterRule>(), Ok(FilterRule::Exact("note".to_string())));
    assert_eq!("tiger:*".parse::<FilterRule>(), Ok(FilterRule::Prefix("tiger:".to_string())));

    assert!("".parse::<FilterRule>().is_err());
    assert!("*".parse::<FilterRule>().is_err());
    assert!("tiger*".parse::<FilterRule>().is_err());
    assert!("ti*ger".parse::<FilterRule>().is_err());
}

#[test]
fn default_rules_all_parse() {
    assert!(TagFilter::from_rules(&DEFAULT_RULES).is_ok());
}

#[test]
fn strips_exact_and_prefixed_keys() {
    let filter = TagFilter::default();
    let tags: Tags = [
        ("highway", "residential"),
        ("name", "Q Street Northwest"),
        ("tiger:cfcc", "A41"),
        ("tiger:county", "District of Columbia, DC"),
        ("source", "survey"),
        ("source:maxspeed", "sign"),
    ]
    .into_iter()
    .collect();

    let filtered = filter.filter(tags);

    assert!(!filtered.empty);
    assert_eq!(filtered.tags.len(), 2);
    assert_eq!(filtered.tags.get("highway"), Some("residential"));
    assert_eq!(filtered.tags.get("name"), Some("Q Street Northwest"));
}

#[test]
fn prefix_rules_do_not_match_the_bare_key() {
    let filter = TagFilter::from_rules(&["tiger:*"]).unwrap();
    assert!(!filter.discards("tiger"));
    assert!(filter.discards("tiger:reviewed"));
}

#[test]
fn signals_emptied_entities() {
    let filter = TagFilter::default();
    let tags: Tags = [("created_by", "JOSM"), ("note", "check")].into_iter().collect();

    let filtered = filter.filter(tags);
    assert!(filtered.empty);
    assert!(filtered.tags.is_empty());
}

#[test]
fn empty_input_is_empty_output() {
    let filtered = TagFilter::default().filter(Tags::default());
    assert!(filtered.empty);
}
