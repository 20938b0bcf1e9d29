//! Tests for building an embedded tree from `include_dir!`.

#![cfg(feature = "include-dir")]

use embedfs::{EmbeddedFs, FixedExecutable, ReadOnlyFs, Selector};
use include_dir::{Dir, include_dir};
use std::path::Path;

static FIXTURES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/tests/fixtures");

#[test]
fn test_from_include_dir_keeps_layout() {
    let embedded = EmbeddedFs::from_include_dir(&FIXTURES).unwrap();

    assert_eq!(embedded.paths(), vec!["site/css/site.css", "site/index.html"]);
    assert!(embedded.stat("site/css").unwrap().is_dir);
}

#[test]
fn test_select_bundled_site() {
    let embedded = EmbeddedFs::from_include_dir(&FIXTURES).unwrap();
    let selector = Selector::with_locator(FixedExecutable::new("/usr/local/bin/myapp"));

    let fsys = selector.select(Some(&embedded), "site").unwrap();

    assert_eq!(
        fsys.read_to_string(Path::new("index.html")).unwrap(),
        "hello from fixture\n"
    );
    assert_eq!(
        fsys.read(Path::new("css/site.css")).unwrap(),
        b"body { margin: 0; }\n"
    );
}
