use inidoc::{from_str, to_string, Document, Error, IniOptions, Key, NullSink, Section};

#[test]
fn test_header_whitespace_inside_brackets() {
    let doc = from_str("  [   Spaced   ]  \nk = v\n").unwrap();
    assert!(doc.contains("Spaced"));
}

#[test]
fn test_header_without_closing_bracket_is_rejected() {
    let err = from_str("[Section\nk = v\n").unwrap_err();
    println!("Error: {}", err);
    assert!(matches!(err, Error::Syntax { line: 1, .. }));
    assert!(Section::from_line("[Section").is_none());
}

#[test]
fn test_header_without_closing_bracket_permissive() {
    let options = IniOptions::permissive_headers();
    let doc = Document::load_from_string_with("[Section\nk = v\n", &options, &NullSink).unwrap();
    // The character in the closing-bracket position is dropped
    assert!(doc.contains("Sectio"));
    assert!(!doc.contains("Section"));
}

#[test]
fn test_header_too_short() {
    assert!(matches!(from_str("[]\nk = v\n"), Err(Error::Syntax { .. })));
    assert!(matches!(from_str("[\nk = v\n"), Err(Error::Syntax { .. })));
}

#[test]
fn test_header_with_invalid_name() {
    for text in ["[1st]\nk=v", "[a b]\nk=v", "[a-b]\nk=v", "[ ]\nk=v"] {
        assert!(
            matches!(from_str(text), Err(Error::Syntax { line: 1, .. })),
            "accepted {:?}",
            text
        );
    }
}

#[test]
fn test_key_value_may_contain_separators() {
    let doc = from_str("[A]\nurl = https://h/?q=1&r=2\npath = C:\\x;y # z\n").unwrap();
    assert_eq!(doc.get_key("A", "url").unwrap().value(), "https://h/?q=1&r=2");
    assert_eq!(doc.get_key("A", "path").unwrap().value(), "C:\\x;y # z");
}

#[test]
fn test_key_with_empty_value() {
    let doc = from_str("[A]\nempty =\n").unwrap();
    assert_eq!(doc.get_key("A", "empty").unwrap().value(), "");
    assert_eq!(to_string(&doc), "[A]\nempty = \n\n");
}

#[test]
fn test_key_without_separator_in_section() {
    assert!(matches!(
        from_str("[A]\nflag\n"),
        Err(Error::Syntax { line: 2, .. })
    ));
}

#[test]
fn test_unicode_identifiers() {
    let doc = from_str("[Größe]\nbreite = 3\n_ñ = x\n").unwrap();
    assert!(doc.contains_key("Größe", "breite"));
    assert!(doc.contains_key("Größe", "_ñ"));
}

#[test]
fn test_indented_lines() {
    let doc = from_str("[A]\n    k = v\n\t# indented comment\n\tj = w\n").unwrap();
    assert_eq!(doc.get("A").unwrap().len(), 2);
}

#[test]
fn test_crlf_and_cr_line_endings() {
    let unix = from_str("[A]\nx = 1\n[B]\ny = 2\n").unwrap();
    assert_eq!(from_str("[A]\r\nx = 1\r\n[B]\r\ny = 2\r\n").unwrap(), unix);
    assert_eq!(from_str("[A]\rx = 1\r[B]\ry = 2\r").unwrap(), unix);
}

#[test]
fn test_last_section_may_be_empty() {
    let doc = from_str("[A]\nx = 1\n[Tail]\n").unwrap();
    assert_eq!(to_string(&doc), "[A]\nx = 1\n\n[Tail]\n\n");
}

#[test]
fn test_only_section_may_be_empty() {
    let doc = from_str("[Alone]").unwrap();
    assert!(doc.get("Alone").unwrap().is_empty());
}

#[test]
fn test_serialized_layout() {
    let mut doc = Document::new();
    doc.add_key("first", Key::new("a", "1"), true, false).unwrap();
    doc.add_key("first", Key::new("b", "two words"), true, false)
        .unwrap();
    doc.add_key("second", Key::new("c", ""), true, false).unwrap();

    assert_eq!(
        to_string(&doc),
        "[first]\na = 1\nb = two words\n\n[second]\nc = \n\n"
    );
}

#[test]
fn test_key_serialize_includes_value() {
    let key = Key::parse_line("name=value").unwrap();
    assert_eq!(key.serialize(), "name = value");
    let back = Key::parse_line(&key.serialize()).unwrap();
    assert_eq!(back, key);
}

#[test]
fn test_alternate_comment_prefixes() {
    let options = IniOptions::new().with_comment_prefixes(['!']);
    let doc = Document::load_from_string_with("! note\n[A]\nk = v\n", &options, &NullSink).unwrap();
    assert!(doc.contains("A"));

    let err = Document::load_from_string_with("# note\n[A]\n", &options, &NullSink).unwrap_err();
    assert!(matches!(err, Error::Syntax { line: 1, .. }));
}
