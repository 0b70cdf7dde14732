//! End-to-end pipeline tests
//!
//! These tests drive the full pull loop the way the CLI does: stream a
//! subtree, convert it, append it to the JSON array, repeat.

use nmap2json::{ArrayWriter, Converter, Element, ElementStream, Error, Result};
use pretty_assertions::assert_eq;
use serde_json::{json, Value as JsonValue};
use std::io::Write;

/// Run the whole pipeline over a string input and return the output text
fn convert_stream(xml: &str, tag: &str) -> String {
    let converter = Converter::new();
    let mut writer = ArrayWriter::new(Vec::new()).unwrap();

    for subtree in ElementStream::new(xml.as_bytes(), tag) {
        let value = converter.convert(&subtree.unwrap()).unwrap();
        writer.write_value(&value).unwrap();
    }

    String::from_utf8(writer.finish().unwrap()).unwrap()
}

fn convert_one(xml: &str, tag: &str) -> JsonValue {
    let subtree = ElementStream::new(xml.as_bytes(), tag)
        .next()
        .unwrap()
        .unwrap();
    Converter::new().convert(&subtree).unwrap()
}

#[test]
fn test_attributes_and_repeated_children() {
    let value = convert_one(r#"<a x="1"><b>hi</b><b>yo</b></a>"#, "a");
    assert_eq!(value, json!({"a": {"b": ["hi", "yo"], "@x": "1"}}));
}

#[test]
fn test_single_child_not_wrapped_in_array() {
    let value = convert_one(r#"<a><b>1</b></a>"#, "a");
    assert_eq!(value, json!({"a": {"b": "1"}}));
}

#[test]
fn test_attribute_with_text_content() {
    let value = convert_one(r#"<a attr="v">text</a>"#, "a");
    assert_eq!(value, json!({"a": {"@attr": "v", "#text": "text"}}));
}

#[test]
fn test_empty_element_is_null() {
    let value = convert_one(r#"<root><a/></root>"#, "a");
    assert_eq!(value, json!({"a": null}));
}

#[test]
fn test_zero_hosts_empty_array_framing() {
    let out = convert_stream(r#"<nmaprun><runstats/></nmaprun>"#, "host");
    assert_eq!(out, "[\n\n]");

    let parsed: JsonValue = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, json!([]));
}

#[test]
fn test_nmap_style_document() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!-- Nmap 7.94 scan -->
<nmaprun scanner="nmap" args="nmap -oX - 10.0.0.0/30">
  <scaninfo type="syn" protocol="tcp"/>
  <host starttime="1700000000" endtime="1700000009">
    <status state="up" reason="arp-response"/>
    <address addr="10.0.0.1" addrtype="ipv4"/>
    <ports>
      <port protocol="tcp" portid="22">
        <state state="open" reason="syn-ack"/>
        <service name="ssh"/>
      </port>
      <port protocol="tcp" portid="80">
        <state state="open" reason="syn-ack"/>
        <service name="http"/>
      </port>
    </ports>
  </host>
  <host starttime="1700000000" endtime="1700000010">
    <status state="down" reason="no-response"/>
    <address addr="10.0.0.2" addrtype="ipv4"/>
  </host>
  <runstats><finished time="1700000010" exit="success"/></runstats>
</nmaprun>"#;

    let out = convert_stream(xml, "host");
    let parsed: JsonValue = serde_json::from_str(&out).unwrap();
    let hosts = parsed.as_array().unwrap();

    assert_eq!(hosts.len(), 2);

    let first = &hosts[0]["host"];
    assert_eq!(first["@starttime"], "1700000000");
    assert_eq!(first["status"]["@state"], "up");
    assert_eq!(first["address"]["@addr"], "10.0.0.1");

    // Two ports collapse into an array, document order
    let ports = first["ports"]["port"].as_array().unwrap();
    assert_eq!(ports[0]["@portid"], "22");
    assert_eq!(ports[1]["@portid"], "80");
    assert_eq!(ports[0]["service"]["@name"], "ssh");

    let second = &hosts[1]["host"];
    assert_eq!(second["status"]["@state"], "down");
    assert!(second.get("ports").is_none());
}

#[test]
fn test_large_stream_yields_every_host() {
    let mut xml = String::from("<nmaprun>");
    for i in 0..20_000 {
        xml.push_str(&format!(
            r#"<host id="{i}"><address addr="10.0.{}.{}"/><status state="up"/></host>"#,
            i / 256,
            i % 256
        ));
    }
    xml.push_str("</nmaprun>");

    let mut count = 0usize;
    for subtree in ElementStream::new(xml.as_bytes(), "host") {
        let subtree = subtree.unwrap();
        // Each yielded subtree is the same constant size, independent of
        // how many came before it
        assert_eq!(subtree.subtree_size(), 3);
        count += 1;
    }
    assert_eq!(count, 20_000);
}

#[test]
fn test_output_written_to_file() {
    let converter = Converter::new();
    let file = tempfile::NamedTempFile::new().unwrap();

    let mut writer = ArrayWriter::new(file.reopen().unwrap()).unwrap();
    let xml = r#"<nmaprun><host ip="10.0.0.1"/><host ip="10.0.0.2"/></nmaprun>"#;
    for subtree in ElementStream::new(xml.as_bytes(), "host") {
        let value = converter.convert(&subtree.unwrap()).unwrap();
        writer.write_value(&value).unwrap();
    }
    writer.finish().unwrap();

    let contents = std::fs::read_to_string(file.path()).unwrap();
    let parsed: JsonValue = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {"host": {"@ip": "10.0.0.1"}},
            {"host": {"@ip": "10.0.0.2"}}
        ])
    );
}

#[test]
fn test_malformed_input_aborts_with_parse_error() {
    let xml = r#"<nmaprun><host><ports></host></nmaprun>"#;
    let result: Result<Vec<Element>> = ElementStream::new(xml.as_bytes(), "host").collect();
    assert!(matches!(result, Err(Error::Parse(_))));
}

#[test]
fn test_partial_output_left_as_is_on_error() {
    // First host is fine, second is truncated: the value already written
    // stays in the buffer and the run aborts
    let xml = r#"<nmaprun><host ip="a"/><host><ports>"#;

    let converter = Converter::new();
    let mut writer = ArrayWriter::new(Vec::new()).unwrap();
    let mut failed = false;

    for subtree in ElementStream::new(xml.as_bytes(), "host") {
        match subtree {
            Ok(subtree) => {
                let value = converter.convert(&subtree).unwrap();
                writer.write_value(&value).unwrap();
            }
            Err(_) => {
                failed = true;
                break;
            }
        }
    }

    assert!(failed);
    assert_eq!(writer.count(), 1);
}

#[test]
fn test_write_failure_surfaces_as_io_error() {
    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let result = ArrayWriter::new(FailingWriter);
    assert!(matches!(result, Err(Error::Io(_))));
}
