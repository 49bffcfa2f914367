use std::fs;
use std::path::{Path, PathBuf};

use bundlescope_cli::{BundlescopeOptions, FormatArg, GraphArgs, SizeArg, run_main, write_output};
use bundlescope_core::ErrorKind;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

const TWO_ENTRIES: &str = r#"{
  "output": [
    { "type": "chunk", "fileName": "main.js", "isEntry": true,
      "facadeModuleId": "/app/src/main.js",
      "modules": {
        "/app/src/main.js": { "renderedLength": 100 },
        "/app/src/util.js?v=3": { "renderedLength": 40 },
        "vite/modulepreload-polyfill.js": { "renderedLength": 700 }
      } },
    { "type": "chunk", "fileName": "admin.js", "isEntry": true,
      "facadeModuleId": "/app/src/admin.js",
      "modules": { "/app/src/admin.js": { "renderedLength": 60 } } },
    { "type": "chunk", "fileName": "lazy.js", "isEntry": false,
      "modules": { "/app/src/lazy.js": { "renderedLength": 999 } } },
    { "type": "asset", "fileName": "main.css" }
  ],
  "moduleInfo": {
    "/app/src/main.js": {
      "importedIds": ["vite/modulepreload-polyfill.js", "/app/src/util.js?v=3"]
    }
  }
}"#;

fn write_stats(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("stats.json");
    fs::write(&path, content).unwrap();
    path
}

fn options(input: &Path, format: FormatArg) -> BundlescopeOptions {
    BundlescopeOptions {
        input: input.to_path_buf(),
        format,
        graph: GraphArgs::new().with_base_dir("/app"),
        ..BundlescopeOptions::default()
    }
}

#[test]
fn merges_entry_chunks_and_skips_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_stats(&dir, TWO_ENTRIES);

    let json: Value =
        serde_json::from_str(&run_main(&options(&input, FormatArg::Json)).unwrap()).unwrap();

    assert_eq!(json["id"], "<bundle>");
    assert_eq!(json["size"], 0);
    assert_eq!(json["total"], 200);

    let main = &json["children"][0];
    assert_eq!(main["name"], "src/main.js");
    assert_eq!(main["total"], 140);
    // polyfill is ignored by default; the query is kept in the id only
    assert_eq!(main["children"].as_array().unwrap().len(), 1);
    assert_eq!(main["children"][0]["id"], "/app/src/util.js?v=3");
    assert_eq!(main["children"][0]["name"], "src/util.js");

    assert_eq!(json["children"][1]["name"], "src/admin.js");
}

#[test]
fn ignore_flag_replaces_default_list() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_stats(&dir, TWO_ENTRIES);
    let mut opts = options(&input, FormatArg::Json);
    opts.graph = opts.graph.with_ignore(["util.js"]);

    let json: Value = serde_json::from_str(&run_main(&opts).unwrap()).unwrap();
    let main = &json["children"][0];
    assert_eq!(main["total"], 800);
    assert_eq!(main["children"][0]["id"], "vite/modulepreload-polyfill.js");
}

#[test]
fn config_file_sets_ratios() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_stats(&dir, TWO_ENTRIES);
    let config = dir.path().join("bundlescope.toml");
    fs::write(&config, "[graph]\ngzip_ratio = 0.5\n").unwrap();

    let mut opts = options(&input, FormatArg::Json);
    opts.graph = opts.graph.with_config(&config);

    let json: Value = serde_json::from_str(&run_main(&opts).unwrap()).unwrap();
    assert_eq!(json["totalGzip"], 100);
}

#[test]
fn html_report_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_stats(&dir, TWO_ENTRIES);
    let opts = BundlescopeOptions {
        size: SizeArg::Raw,
        output: Some(dir.path().join("report/stats.html")),
        ..options(&input, FormatArg::Html)
    };

    let html = run_main(&opts).unwrap();
    write_output(opts.output.as_deref(), &html).unwrap();

    let written = fs::read_to_string(dir.path().join("report/stats.html")).unwrap();
    assert!(written.starts_with("<!DOCTYPE html>"));
    assert!(written.contains("Raw 200 B"));
    assert!(written.contains("<title>src/util.js</title>"));
}

#[test]
fn rings_report_is_a_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_stats(&dir, TWO_ENTRIES);

    let json: Value =
        serde_json::from_str(&run_main(&options(&input, FormatArg::Rings)).unwrap()).unwrap();
    let rings = json.as_array().unwrap();

    assert_eq!(rings.len(), 2);
    let first: Vec<&str> = rings[0]["children"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(first, vec!["src/main.js", "src/admin.js"]);
}

#[test]
fn stats_without_entries_fail() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_stats(
        &dir,
        r#"{ "output": [
            { "type": "chunk", "fileName": "lazy.js", "isEntry": false, "modules": {} }
        ] }"#,
    );

    let err = run_main(&options(&input, FormatArg::Svg)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingGraphData);
}

#[test]
fn missing_input_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("absent.json");

    let err = run_main(&options(&input, FormatArg::Json)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FileNotFound);
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn malformed_input_is_a_deserialization_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_stats(&dir, "{ not json");

    let err = run_main(&options(&input, FormatArg::Json)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
}

#[test]
fn relative_base_dir_shortens_names() {
    let dir = tempfile::tempdir().unwrap();
    let entry = std::env::current_dir().unwrap().join("src/main.js");
    let entry = entry.to_str().unwrap();
    let stats = serde_json::json!({
        "output": [{
            "type": "chunk", "fileName": "main.js", "isEntry": true,
            "facadeModuleId": entry,
            "modules": { entry: { "renderedLength": 10 } }
        }]
    });
    let input = write_stats(&dir, &stats.to_string());

    let opts = BundlescopeOptions {
        graph: GraphArgs::new().with_base_dir("."),
        ..options(&input, FormatArg::Json)
    };
    let json: Value = serde_json::from_str(&run_main(&opts).unwrap()).unwrap();
    assert_eq!(json["name"], "src/main.js");
}
