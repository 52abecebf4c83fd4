use super::*;
use chrono::TimeZone;
use proptest::prelude::*;

fn fixed_now() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2023, 6, 1, 9, 30, 15)
        .earliest()
        .expect("valid local time")
}

#[test]
fn test_extract_without_header_keeps_everything_as_body() {
    let raw = "Just a thought.\nSecond line\n";
    let extracted = extract(raw);
    assert!(extracted.header.is_empty());
    assert_eq!(extracted.body, raw);
}

#[test]
fn test_extract_header_and_body() {
    let raw = "Title: Trip\nDate: 2023-05-01\n\n# Packing\n- boots\n";
    let extracted = extract(raw);

    assert_eq!(
        extracted.header.keys().collect::<Vec<_>>(),
        vec!["title", "date"]
    );
    assert_eq!(extracted.header.first("date"), Some("2023-05-01"));
    assert_eq!(extracted.body, "\n# Packing\n- boots\n");
}

#[test]
fn test_extract_lowercases_keys_and_trims_values() {
    let extracted = extract("EvernoteGUID:   abc123  \n\nbody");
    assert_eq!(extracted.header.first(GUID_KEY), Some("abc123"));
    assert_eq!(extracted.header.first("EVERNOTEGUID"), Some("abc123"));
}

#[test]
fn test_extract_continuation_lines_append_values() {
    let raw = "Tags: work\n    travel\n     misc  \nDate: 2023-01-01\n\nbody";
    let extracted = extract(raw);

    assert_eq!(
        extracted.header.get("tags"),
        Some(&["work".to_string(), "travel".to_string(), "misc".to_string()][..])
    );
    assert_eq!(extracted.header.lines().len(), 4);
    assert_eq!(extracted.header.lines()[1].key, "tags");
    assert_eq!(extracted.header.lines()[1].raw, "    travel");
}

#[test]
fn test_extract_repeated_keys_accumulate_in_order() {
    let extracted = extract("Tag: a\nTag: b\n\n");
    assert_eq!(
        extracted.header.get("tag"),
        Some(&["a".to_string(), "b".to_string()][..])
    );
    assert_eq!(extracted.header.first("tag"), Some("a"));
}

#[test]
fn test_extract_indented_line_without_open_key_ends_header() {
    let raw = "    indented code\nKey: value\n";
    let extracted = extract(raw);
    assert!(extracted.header.is_empty());
    assert_eq!(extracted.body, raw);
}

#[test]
fn test_extract_stops_at_first_non_meta_line() {
    let raw = "Key: value\nplain sentence here\nOther: x\n";
    let extracted = extract(raw);
    assert_eq!(extracted.header.keys().collect::<Vec<_>>(), vec!["key"]);
    assert_eq!(extracted.body, "plain sentence here\nOther: x\n");
}

#[test]
fn test_extract_allows_up_to_three_leading_spaces() {
    let extracted = extract("   Key: value\n\n");
    assert_eq!(extracted.header.first("key"), Some("value"));
}

#[test]
fn test_extract_crlf_keeps_raw_lines() {
    let raw = "Key: value\r\n\r\nbody\r\n";
    let extracted = extract(raw);
    assert_eq!(extracted.header.first("key"), Some("value"));
    assert_eq!(extracted.header.lines()[0].raw, "Key: value\r");
    assert_eq!(extracted.body, "\r\nbody\r\n");
}

#[test]
fn test_extract_header_only_file() {
    let extracted = extract("Key: value");
    assert_eq!(extracted.header.first("key"), Some("value"));
    assert_eq!(extracted.body, "");
}

#[test]
fn test_first_treats_empty_value_as_absent() {
    let extracted = extract("EvernoteUpdate:\n\nbody");
    assert!(extracted.header.contains(UPDATE_KEY));
    assert_eq!(extracted.header.first(UPDATE_KEY), None);
}

#[test]
fn test_inject_into_file_without_header() {
    let out = inject(&Header::default(), "Just a thought.\n", "guid-1", fixed_now())
        .expect("inject produces text");
    assert_eq!(
        out,
        "evernoteguid: guid-1\nevernoteupdate: 2023-06-01 09:31\n\nJust a thought.\n"
    );
}

#[test]
fn test_inject_without_header_keeps_existing_blank_separator() {
    let extracted = extract("\nbody\n");
    let out = inject(&extracted.header, &extracted.body, "g", fixed_now()).expect("text");
    assert_eq!(out, "evernoteguid: g\nevernoteupdate: 2023-06-01 09:31\n\nbody\n");
}

#[test]
fn test_inject_into_empty_file() {
    let out = inject(&Header::default(), "", "g", fixed_now()).expect("text");
    assert_eq!(out, "evernoteguid: g\nevernoteupdate: 2023-06-01 09:31\n");
}

#[test]
fn test_inject_replaces_sync_lines_and_keeps_others_verbatim() {
    let raw = concat!(
        "Title:   Trip  \n",
        "EvernoteGUID: old\n",
        "Tags: a\n",
        "    b\n",
        "EvernoteUpdate: 2020-01-01 00:00\n",
        "\n",
        "body\n",
    );
    let extracted = extract(raw);
    let out = inject(&extracted.header, &extracted.body, "new", fixed_now()).expect("text");

    assert_eq!(
        out,
        concat!(
            "Title:   Trip  \nTags: a\n    b\n",
            "evernoteguid: new\nevernoteupdate: 2023-06-01 09:31\n",
            "\nbody\n",
        )
    );
}

#[test]
fn test_inject_drops_continuations_of_sync_keys() {
    let raw = "EvernoteUpdate: 2020-01-01 00:00\n    stray\nDate: 2021-01-01\n\nbody";
    let extracted = extract(raw);
    let out = inject(&extracted.header, &extracted.body, "g", fixed_now()).expect("text");
    assert!(!out.contains("stray"));
    assert!(out.starts_with("Date: 2021-01-01\n"));
}

#[test]
fn test_inject_header_directly_followed_by_body() {
    let raw = "Key: value\n# Heading\n";
    let extracted = extract(raw);
    let out = inject(&extracted.header, &extracted.body, "g", fixed_now()).expect("text");
    assert_eq!(
        out,
        "Key: value\nevernoteguid: g\nevernoteupdate: 2023-06-01 09:31\n# Heading\n"
    );
    assert_eq!(extract(&out).body, "# Heading\n");
}

#[test]
fn test_inject_indented_body_does_not_become_continuation() {
    let raw = "    fn main() {}\n";
    let extracted = extract(raw);
    let out = inject(&extracted.header, &extracted.body, "g", fixed_now()).expect("text");

    let reread = extract(&out);
    assert_eq!(reread.header.get(UPDATE_KEY).map(<[String]>::len), Some(1));
    assert_eq!(reread.body, "\n    fn main() {}\n");
}

#[test]
fn test_inject_without_identifier_is_noop() {
    assert!(inject(&Header::default(), "body", "", fixed_now()).is_none());
    assert!(inject(&Header::default(), "body", "   ", fixed_now()).is_none());
}

#[test]
fn test_inject_twice_keeps_single_sync_pair() {
    let first = inject(&Header::default(), "body\n", "g1", fixed_now()).expect("text");
    let extracted = extract(&first);
    let second = inject(&extracted.header, &extracted.body, "g2", fixed_now()).expect("text");

    let reread = extract(&second);
    assert_eq!(reread.header.get(GUID_KEY), Some(&["g2".to_string()][..]));
    assert_eq!(reread.header.get(UPDATE_KEY).map(<[String]>::len), Some(1));
    assert_eq!(reread.body, "\nbody\n");
}

fn header_line() -> impl Strategy<Value = (String, String)> {
    ("[a-d][a-z0-9_-]{0,8}", "[A-Za-z0-9./:-]{1,10}( [A-Za-z0-9./:-]{1,10})?")
}

proptest! {
    #[test]
    fn test_inject_then_extract_preserves_other_keys(
        lines in prop::collection::vec(header_line(), 0..6),
        body in "[A-Za-z #*-]{0,40}",
        id in "[a-f0-9-]{8,36}",
    ) {
        let mut raw = String::new();
        for (key, value) in &lines {
            raw.push_str(&format!("{key}: {value}\n"));
        }
        raw.push('\n');
        raw.push_str(&body);

        let original = extract(&raw);
        let out = inject(&original.header, &original.body, &id, fixed_now()).expect("text");
        let reread = extract(&out);

        prop_assert_eq!(reread.header.first(GUID_KEY), Some(id.as_str()));
        prop_assert!(reread.header.first(UPDATE_KEY).is_some());

        let original_keys: Vec<&str> = original.header.keys().collect();
        let reread_keys: Vec<&str> = reread
            .header
            .keys()
            .filter(|key| *key != GUID_KEY && *key != UPDATE_KEY)
            .collect();
        prop_assert_eq!(&original_keys, &reread_keys);
        for key in original_keys {
            prop_assert_eq!(original.header.get(key), reread.header.get(key));
        }
        prop_assert_eq!(reread.body, original.body);
    }
}
