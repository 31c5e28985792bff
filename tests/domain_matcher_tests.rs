//! Integration tests for NameSet suffix matching on list-sized inputs

use dnsredir_namelist::{is_subdomain, parse_reader, Logger, NameMatcher, NameSet, ShardKey};

/// Ad and tracking domains in dnsmasq directive form
fn ad_list() -> String {
    [
        "doubleclick.net",
        "googlesyndication.com",
        "google-analytics.com",
        "adnxs.com",
        "adsrvr.org",
        "criteo.com",
        "taboola.com",
        "outbrain.com",
        "scorecardresearch.com",
        "moatads.com",
        "pubmatic.com",
        "rubiconproject.com",
        "openx.net",
        "casalemedia.com",
        "amazon-adsystem.com",
        "ads.yahoo.com",
        "app-measurement.com",
        "x.co",
        "t",
    ]
    .iter()
    .map(|domain| format!("server=/{}/127.0.0.1\n", domain))
    .collect()
}

fn load(text: &str) -> NameSet {
    parse_reader(text.as_bytes(), "test", &Logger::new()).names
}

#[test]
fn test_ad_list_suffix_matching() {
    let names = load(&ad_list());
    assert_eq!(names.len(), 19);

    // Listed domains themselves
    assert!(names.matches("doubleclick.net"), "doubleclick.net should match");
    assert!(names.matches("criteo.com"), "criteo.com should match");
    assert!(names.matches("x.co"), "x.co should match");
    assert!(names.matches("t"), "t should match");

    // Subdomains
    assert!(
        names.matches("stats.g.doubleclick.net"),
        "stats.g.doubleclick.net should match"
    );
    assert!(
        names.matches("pagead2.googlesyndication.com"),
        "pagead2.googlesyndication.com should match"
    );
    assert!(
        names.matches("www.google-analytics.com"),
        "www.google-analytics.com should match"
    );
    assert!(
        names.matches("us-east.ads.yahoo.com"),
        "us-east.ads.yahoo.com should match"
    );
    assert!(names.matches("a.b.c.x.co"), "a.b.c.x.co should match");
    assert!(names.matches("host.t"), "host.t should match");

    // Neighbours that only share characters
    assert!(
        !names.matches("notdoubleclick.net"),
        "notdoubleclick.net should NOT match"
    );
    assert!(!names.matches("criteo.co"), "criteo.co should NOT match");
    assert!(!names.matches("yahoo.com"), "yahoo.com should NOT match");
    assert!(!names.matches("www.yahoo.com"), "www.yahoo.com should NOT match");
    assert!(!names.matches("xx.co"), "xx.co should NOT match");
    assert!(!names.matches("tt"), "tt should NOT match");
    assert!(!names.matches("google.com"), "google.com should NOT match");
}

#[test]
fn test_large_list() {
    let mut text = String::new();
    for i in 0..50_000 {
        text.push_str(&format!("host{}.block{}.example\n", i, i % 97));
    }
    let names = load(&text);
    assert_eq!(names.len(), 50_000);
    // All names start with "ho"
    assert_eq!(names.shard_count(), 1);

    assert!(names.matches("host12345.block26.example"));
    assert!(names.matches("cdn.host12345.block26.example"));
    assert!(!names.matches("host12345.block27.example"));
    assert!(!names.matches("block26.example"));
    assert!(!names.matches("host50000.block46.example"));
}

#[test]
fn test_every_added_name_is_contained_and_matched() {
    let text = ad_list();
    let names = load(&text);

    names
        .for_each(|name| {
            assert!(names.contains(name), "{} should be contained", name);
            assert!(names.matches(name), "{} should match itself", name);
            let child = format!("sub.{}", name);
            assert!(names.matches(&child), "{} should match", child);
            assert_eq!(ShardKey::of(name), ShardKey::of(&name.to_string()));
            Ok::<(), ()>(())
        })
        .unwrap();
}

#[test]
fn test_no_match_without_label_aligned_suffix() {
    let names: NameSet = ["example.com"].into_iter().collect();
    for query in [
        "notexample.com",
        "exampleXcom",
        "example.co",
        "example.com.evil",
        "com",
        "xample.com",
    ] {
        assert!(!names.matches(query), "{} should NOT match", query);
        assert!(!is_subdomain("example.com", query));
    }
}

#[test]
fn test_matcher_trait_object() {
    let names: NameSet = ["example.com"].into_iter().collect();
    let matchers: Vec<Box<dyn NameMatcher>> = vec![Box::new(names)];
    assert!(matchers.iter().any(|m| m.matches("www.example.com")));
    assert!(!matchers.iter().any(|m| m.matches("www.example.org")));
}
