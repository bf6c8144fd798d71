use std::fs;
use std::path::{Path, PathBuf};

use clue_config::IncludeConfig;
use clue_core::CompletionKind;
use clue_parser::{
    Completer, CompletionOptions, Engine, FsIncludeResolver, IncludeResolver, IncludeTarget,
    NeverCancel,
};
use pretty_assertions::assert_eq;

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/include")
}

fn no_system() -> IncludeConfig {
    IncludeConfig {
        follow_system: false,
        ..IncludeConfig::default()
    }
}

#[test]
fn guarded_headers_are_spliced_once() {
    let root = fixture_root();
    let resolver = FsIncludeResolver::from_config(&root, &no_system());
    let main = fs::read_to_string(root.join("main.c")).expect("read main.c");

    let analysis = Engine::new(&resolver)
        .analyze(&main, &NeverCancel)
        .expect("analysis");

    assert_eq!(analysis.processed.matches("struct Circle {").count(), 1);
    assert_eq!(analysis.processed.matches("struct Vec {").count(), 1);
    assert!(analysis.macros.is_defined("SHAPES_H"));
    assert!(analysis.macros.is_defined("VEC_H"));
    assert!(analysis.table.lookup("circle_area").is_some());
    assert!(analysis.table.lookup("unit").is_some());
}

#[test]
fn members_come_from_included_headers() {
    let root = fixture_root();
    let resolver = FsIncludeResolver::from_config(&root, &no_system());
    let main = fs::read_to_string(root.join("main.c")).expect("read main.c");
    let completer = Completer::new(&resolver, CompletionOptions::default());

    let response = completer
        .complete(&format!("{main}unit."), &NeverCancel)
        .expect("completion");
    let labels: Vec<_> = response.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["center", "radius", "circle_area"]);
    let area = &response.items[2];
    assert_eq!(area.kind, CompletionKind::Method);
    assert_eq!(area.insert_text.as_deref(), Some("circle_area(unit$0)"));

    let response = completer
        .complete(&format!("{main}unit.center."), &NeverCancel)
        .expect("completion");
    let details: Vec<_> = response
        .items
        .iter()
        .map(|i| (i.label.as_str(), i.detail.as_str()))
        .collect();
    assert_eq!(details, vec![("x", "double"), ("y", "double")]);
}

#[test]
fn extra_dirs_serve_both_include_forms() {
    let root = tempfile::tempdir().expect("tempdir");
    let vendor = root.path().join("vendor");
    fs::create_dir_all(&vendor).expect("mkdir");
    fs::write(vendor.join("lib.h"), "int lib_version;\n").expect("write");

    let config = IncludeConfig {
        extra_dirs: vec![PathBuf::from("vendor")],
        ..no_system()
    };
    let resolver = FsIncludeResolver::from_config(root.path(), &config);

    for target in [
        IncludeTarget::Quoted("lib.h".into()),
        IncludeTarget::Angled("lib.h".into()),
    ] {
        let found = resolver.resolve(&target).expect("resolved");
        assert_eq!(found.path, vendor.join("lib.h"));
        assert_eq!(found.content, "int lib_version;\n");
    }
}

#[test]
fn system_dirs_ignored_when_not_followed() {
    let system = tempfile::tempdir().expect("tempdir");
    let root = tempfile::tempdir().expect("tempdir");
    fs::write(system.path().join("sys.h"), "int from_system;\n").expect("write");

    let config = IncludeConfig {
        system_dirs: vec![system.path().to_path_buf()],
        follow_system: false,
        ..IncludeConfig::default()
    };
    let resolver = FsIncludeResolver::from_config(root.path(), &config);
    assert_eq!(resolver.resolve(&IncludeTarget::Angled("sys.h".into())), None);

    let config = IncludeConfig {
        follow_system: true,
        ..config
    };
    let resolver = FsIncludeResolver::from_config(root.path(), &config);
    let analysis = Engine::new(&resolver)
        .analyze("#include <sys.h>\n", &NeverCancel)
        .expect("analysis");
    assert!(analysis.table.lookup("from_system").is_some());
}
