use indexmap::IndexMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use transync_core::csv_io::{self, export_file_name};
use transync_core::{FileIndex, FlatValues, ValueStore, Writer, php, tree};

fn registry(root: &std::path::Path) -> IndexMap<String, PathBuf> {
    let mut namespaces = IndexMap::new();
    namespaces.insert(String::new(), root.join("lang"));
    namespaces.insert("courier".to_string(), root.join("vendor/courier/lang"));
    namespaces
}

#[test]
fn test_export_then_import_creates_missing_file() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("lang/en/messages.php");
    fs::create_dir_all(source.parent().unwrap()).unwrap();
    fs::write(&source, "<?php\n\nreturn [\n    'hello' => 'Hi',\n];\n").unwrap();

    let index = FileIndex::new(registry(temp.path()));
    let store = ValueStore::new(&index);

    let missing = store.get_untranslated("en", "de", None).unwrap();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing["messages.hello"], "Hi");

    let mut exported = Vec::new();
    csv_io::export(&mut exported, b';', "en", "de", &missing).unwrap();
    let exported = String::from_utf8(exported).unwrap();
    assert_eq!(exported.lines().nth(1), Some("messages.hello;Hi;"));
    assert_eq!(export_file_name("en", "de"), "translation_en-de.csv");

    let translated = exported.replace("messages.hello;Hi;", "messages.hello;Hi;Bonjour");
    let import = csv_io::import(translated.as_bytes(), b';', Some("de")).unwrap();

    let report = Writer::new(&index).write(&import.into_locale_values());
    assert!(report.is_success());

    let target = temp.path().join("lang/de/messages.php");
    assert_eq!(
        php::load_tree(&target).unwrap(),
        tree::unflatten([("hello", "Bonjour")])
    );
    assert!(store.get_untranslated("en", "de", None).unwrap().is_empty());
}

#[test]
fn test_namespaced_values_round_trip_through_files() {
    let temp = TempDir::new().unwrap();
    let index = FileIndex::new(registry(temp.path()));

    let values: FlatValues = [
        ("courier::mail.order.subject", "Your order"),
        ("courier::mail.order.footer", "Thanks"),
        ("validation.attributes.email", "email address"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let report = Writer::new(&index).write(&[("en".to_string(), values.clone())].into());
    assert!(report.is_success());
    assert_eq!(report.written.len(), 2);

    let read_back = ValueStore::new(&index).get_values(Some("en"), None).unwrap();
    assert_eq!(read_back, values);
}
