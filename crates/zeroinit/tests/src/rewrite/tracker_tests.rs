use super::*;

use std::path::PathBuf;

use crate::rewrite::source_map::SourceMap;

#[test]
fn user_files_are_tracked() {
    let policy = ExcludePolicy::new(Vec::new(), &[]);
    let mut sources = SourceMap::new();
    let mut touched = TouchedFiles::new();

    let id = sources.intern("/home/dev/project/main.c");
    touched.mark_touched(id, "/home/dev/project/main.c", &policy);

    assert!(touched.contains(id));
    assert_eq!(touched.len(), 1);
}

#[test]
fn system_headers_never_enter_the_set() {
    let policy = ExcludePolicy::new(Vec::new(), &[]);
    let mut sources = SourceMap::new();
    let mut touched = TouchedFiles::new();

    for path in ["/usr/include/stdio.h", "/usr/lib/clang/17/include/stddef.h", ""] {
        let id = sources.intern(path);
        touched.mark_touched(id, path, &policy);
    }

    assert!(touched.is_empty());
}

#[test]
fn discovered_include_dirs_classify_as_system() {
    let policy = ExcludePolicy::new(vec![PathBuf::from("/custom/toolchain/include")], &[]);
    let mut sources = SourceMap::new();
    let mut touched = TouchedFiles::new();

    let system = sources.intern("/custom/toolchain/include/stdarg.h");
    touched.mark_touched(system, "/custom/toolchain/include/stdarg.h", &policy);
    assert!(touched.is_empty());

    let user = sources.intern("/home/dev/project/util.h");
    touched.mark_touched(user, "/home/dev/project/util.h", &policy);
    assert_eq!(touched.len(), 1);
}

#[test]
fn marking_is_idempotent() {
    let policy = ExcludePolicy::new(Vec::new(), &[]);
    let mut sources = SourceMap::new();
    let mut touched = TouchedFiles::new();

    let id = sources.intern("/home/dev/project/main.c");
    touched.mark_touched(id, "/home/dev/project/main.c", &policy);
    touched.mark_touched(id, "/home/dev/project/main.c", &policy);

    assert_eq!(touched.len(), 1);
    assert_eq!(touched.iter().collect::<Vec<_>>(), vec![id]);
}
