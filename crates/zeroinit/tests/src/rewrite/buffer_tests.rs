use super::*;

use crate::rewrite::source_map::SourceMap;

#[test]
fn apply_splices_in_ascending_offset_order() {
    let insertions = vec![
        Insertion { offset: 10, text: " = {}".to_string() },
        Insertion { offset: 5, text: " = 0".to_string() },
    ];
    let out = RewriteBuffers::apply("int x; T s;", &insertions);
    assert_eq!(out, "int x = 0; T s = {};");
}

#[test]
fn apply_is_stable_for_equal_offsets() {
    let insertions = vec![
        Insertion { offset: 3, text: "a".to_string() },
        Insertion { offset: 3, text: "b".to_string() },
    ];
    assert_eq!(RewriteBuffers::apply("xyz", &insertions), "xyzab");
}

#[test]
fn apply_clamps_offsets_past_the_end() {
    let insertions = vec![Insertion { offset: 100, text: "!".to_string() }];
    assert_eq!(RewriteBuffers::apply("ok", &insertions), "ok!");
}

#[test]
fn apply_with_no_insertions_is_identity() {
    assert_eq!(RewriteBuffers::apply("int x;\n", &[]), "int x;\n");
}

#[test]
fn apply_drops_insertions_off_character_boundaries() {
    // 'é' is two bytes; offset 1 splits it.
    let insertions = vec![
        Insertion { offset: 1, text: "!".to_string() },
        Insertion { offset: 2, text: "?".to_string() },
    ];
    assert_eq!(RewriteBuffers::apply("é", &insertions), "é?");
}

#[test]
fn buffers_accumulate_per_file_in_request_order() {
    let mut sources = SourceMap::new();
    let a = sources.intern("/tmp/a.c");
    let b = sources.intern("/tmp/b.h");

    let mut buffers = RewriteBuffers::new();
    buffers.insert_after(a, 5, " = 0");
    buffers.insert_after(a, 12, " = {}");
    buffers.insert_after(b, 7, " = 0");

    let edits = buffers.edits_for(a).expect("edits for a");
    assert_eq!(edits.len(), 2);
    assert_eq!(edits[0].offset, 5);
    assert_eq!(edits[1].offset, 12);

    assert_eq!(buffers.edits_for(b).expect("edits for b").len(), 1);

    let untouched = sources.intern("/tmp/c.c");
    assert!(buffers.edits_for(untouched).is_none());
}
