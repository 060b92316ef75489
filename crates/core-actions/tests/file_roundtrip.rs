mod common;
use common::*;

use core_actions::{LoadError, load_session, write_session};
use core_events::Event;
use core_state::EditorSession;
use core_text::ColumnMapper;
use std::fs;
use std::path::Path;

fn load(path: &Path) -> EditorSession {
    let mut s = EditorSession::new(ColumnMapper::default(), 80, 24).with_file_name(path);
    load_session(path, &mut s).unwrap();
    s
}

fn roundtrip(contents: &[u8]) -> Vec<u8> {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in.txt");
    let dst = dir.path().join("out.txt");
    fs::write(&src, contents).unwrap();
    let s = load(&src);
    write_session(&s, Some(&dst)).unwrap();
    fs::read(&dst).unwrap()
}

#[test]
fn unedited_files_roundtrip_exactly() {
    for contents in [
        &b"hello\nworld\n"[..],
        b"no final newline",
        b"",
        b"\n",
        b"crlf\r\nlines\r\n",
        b"\ttabs\tand\x01control\xff\n",
    ] {
        assert_eq!(roundtrip(contents), contents);
    }
}

#[test]
fn empty_file_loads_as_single_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    fs::write(&path, b"").unwrap();
    let s = load(&path);
    assert_eq!(s.buffer().count(), 1);
    assert_eq!(s.buffer().byte_len(), 0);
}

#[test]
fn save_event_writes_edits_and_clears_modified() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    fs::write(&path, b"abc\n").unwrap();
    let mut s = load(&path);
    type_text(&mut s, "x");
    assert!(s.is_modified());
    drive(&mut s, &[Event::Save]);
    assert!(!s.is_modified());
    assert_eq!(fs::read(&path).unwrap(), b"xabc\n");
    assert!(s.status().is_some_and(|m| m.starts_with("wrote 1 lines")));
}

#[test]
fn failed_save_keeps_document_and_reports_status() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("doc.txt");
    let mut s = EditorSession::new(ColumnMapper::default(), 80, 24).with_file_name(&path);
    s.load_into([b"keep me\n".to_vec()]);
    type_text(&mut s, "!");
    let before = document(&s);
    drive(&mut s, &[Event::Save]);
    assert_eq!(document(&s), before);
    assert!(s.is_modified());
    assert!(s.status().is_some_and(|m| m.starts_with("save failed")));
    assert!(!path.exists());
}

#[test]
fn load_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.txt");
    let mut s = EditorSession::new(ColumnMapper::default(), 80, 24);
    let err = load_session(&path, &mut s).unwrap_err();
    let LoadError::Read { path: reported, .. } = err;
    assert_eq!(reported, path);
}
