use std::fs;

use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

use super::Fixture;
use crate::layout::{DocumentBuffer, PanelId, RegionId, Visibility};
use crate::session::{FileStore, KvStore, MemStore, Session};
use crate::shell::{Action, Shell};

#[test]
fn roundtrip_through_a_file_store() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("session.json");

    let a = dir.path().join("a.stn");
    let b = dir.path().join("b.stn");
    fs::write(&a, "gate {}\n").unwrap();
    fs::write(&b, "// b\n").unwrap();
    fs::create_dir(dir.path().join("proj")).unwrap();

    let mut shell = Shell::new(
        steiner_config::Config::default(),
        FileStore::load(store_path.clone()),
    );
    shell.handle(Action::OpenFolder(dir.path().join("proj")));
    shell.handle(Action::OpenFile(a.clone()));
    shell.handle(Action::OpenFile(b));
    shell.handle(Action::ActivateSlot(0));
    shell.handle(Action::ClosePanel(PanelId::Analysis));
    shell.handle(Action::ToggleMinimize(PanelId::Console));
    shell.region_resized(RegionId::Top, &[300, 900, 0]);

    let saved = Session::capture(shell.layout(), shell.docs(), shell.folders().paths());
    shell.save_session().unwrap();

    let mut restored = Shell::new(
        steiner_config::Config::default(),
        FileStore::load(store_path),
    );
    restored.restore_session();

    assert_eq!(restored.docs().len(), 2);
    assert_eq!(restored.docs().active_path(), Some(&*a.canonicalize().unwrap()));
    assert_eq!(
        restored.layout().visibility(PanelId::Analysis),
        Visibility::Hidden,
    );
    assert_eq!(
        restored.layout().visibility(PanelId::Console),
        Visibility::Minimized,
    );
    assert_eq!(
        restored.layout().region(RegionId::Top).sizes(),
        &[300, 900, 0],
    );

    // Saving again immediately reproduces the same session.
    let resaved = Session::capture(
        restored.layout(),
        restored.docs(),
        restored.folders().paths(),
    );
    assert_eq!(resaved, saved);
}

#[test]
fn restore_skips_files_deleted_outside_the_app() {
    let mut f = Fixture::new();
    let a = f.write_file("a.stn", "gate {}\n");
    let missing = f.dir.path().join("missing.stn");

    let mut store = MemStore::default();
    store.set(
        "session/open_files",
        json!([
            a.to_string_lossy(),
            missing.to_string_lossy(),
        ]),
    );
    store.set("session/active_file", json!(missing.to_string_lossy()));
    f.shell = Shell::new(steiner_config::Config::default(), store);

    f.shell.restore_session();

    assert_eq!(f.shell.docs().len(), 1);
    assert_eq!(
        f.shell.docs().active_path(),
        Some(&*a.canonicalize().unwrap()),
    );
    assert!(f.shell.console().errors().lines().len() <= 1);
}

#[test]
fn restore_skips_missing_root_folders() {
    let f = Fixture::new();
    let real = f.dir.path().join("src");
    fs::create_dir(&real).unwrap();

    let mut store = MemStore::default();
    store.set(
        "session/folders",
        json!([
            real.to_string_lossy(),
            "/steiner-test-does-not-exist/proj",
        ]),
    );

    let mut shell = Shell::new(steiner_config::Config::default(), store);
    shell.restore_session();

    assert_eq!(shell.folders().paths().len(), 1);
}

#[test]
fn restore_bootstraps_the_example_when_nothing_is_restorable() {
    let mut f = Fixture::new();
    f.shell.restore_session();

    assert_eq!(f.shell.docs().len(), 1);
    let doc = f.shell.docs().active().unwrap();
    assert!(doc.path().is_none());
    assert_eq!(doc.title(), "Untitled 1");
    assert!(doc.buffer().text().contains("El Psy Kongroo"));
}

#[test]
fn save_writes_the_expected_keys() {
    let mut f = Fixture::new();
    f.shell.handle(Action::NewFile);
    f.shell.handle(Action::ClosePanel(PanelId::Explorer));
    f.shell.handle(Action::ToggleMinimize(PanelId::Console));
    f.shell.save_session().unwrap();

    let store = f.shell.session().store();
    assert_eq!(store.get("session/explorer_visible"), Some(json!(false)));
    assert_eq!(store.get("session/explorer_minimized"), Some(json!(false)));
    assert_eq!(store.get("session/console_visible"), Some(json!(false)));
    assert_eq!(store.get("session/console_minimized"), Some(json!(true)));
    assert_eq!(store.get("session/analysis_visible"), Some(json!(true)));
    assert_eq!(store.get("session/open_files"), Some(json!([])));
    assert_eq!(store.get("session/active_file"), Some(json!("")));
    assert_eq!(store.get("session/folders"), Some(json!([])));
    assert_eq!(
        store.get("session/top_splitter_sizes"),
        Some(json!([0, 950, 250])),
    );
    assert_eq!(store.get("session/main_splitter_sizes"), Some(json!([800, 0])));
}

#[test]
fn corrupt_store_file_degrades_to_an_empty_session() {
    let dir = TempDir::new().unwrap();
    let store_path = dir.path().join("session.json");
    fs::write(&store_path, "{ not json").unwrap();

    let store = FileStore::load(store_path);
    assert_eq!(store.get("session/open_files"), None);

    let mut shell = Shell::new(steiner_config::Config::default(), store);
    shell.restore_session();
    assert_eq!(shell.docs().len(), 1);
}
