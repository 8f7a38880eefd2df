use points_etl::config::{BACKUP_FILE, INPUT_FILE};
use points_etl::core::ConfigProvider;
use points_etl::{ColourPipeline, EtlEngine, LocalStorage};
use tempfile::TempDir;

// ConfigProvider pointing at a temporary directory, with the real file names.
struct SandboxConfig {
    data_dir: String,
}

impl SandboxConfig {
    fn new(dir: &TempDir) -> Self {
        Self {
            data_dir: dir.path().to_str().unwrap().to_string(),
        }
    }
}

impl ConfigProvider for SandboxConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn input_file(&self) -> &str {
        INPUT_FILE
    }

    fn backup_file(&self) -> &str {
        BACKUP_FILE
    }
}

fn write_input(dir: &TempDir, contents: &str) {
    std::fs::write(dir.path().join(INPUT_FILE), contents).unwrap();
}

fn read_file(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name)).unwrap()
}

#[tokio::test]
async fn test_end_to_end_adds_colour_to_every_object() {
    let temp_dir = TempDir::new().unwrap();
    write_input(
        &temp_dir,
        r#"[{"x": 1, "y": 2}, {"x": 3, "y": 4, "colour": "red"}]"#,
    );

    // Create storage and pipeline
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = ColourPipeline::new(storage, SandboxConfig::new(&temp_dir));

    // Create and run ETL engine
    let engine = EtlEngine::new_with_monitoring(pipeline, false);
    let output_path = engine.run().await.unwrap();

    assert!(output_path.ends_with(BACKUP_FILE));

    // Pre-existing colour keeps its position; new colour is appended last.
    let expected = concat!(
        "[\n",
        "    {\n",
        "        \"x\": 1,\n",
        "        \"y\": 2,\n",
        "        \"colour\": \"blue\"\n",
        "    },\n",
        "    {\n",
        "        \"x\": 3,\n",
        "        \"y\": 4,\n",
        "        \"colour\": \"blue\"\n",
        "    }\n",
        "]"
    );
    assert_eq!(read_file(&temp_dir, INPUT_FILE), expected);
    assert_eq!(read_file(&temp_dir, BACKUP_FILE), expected);
}

#[tokio::test]
async fn test_rerun_yields_identical_files() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, r#"[{"id": 1, "colour": "green"}, {"id": 2}]"#);

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = ColourPipeline::new(storage, SandboxConfig::new(&temp_dir));
    let engine = EtlEngine::new(pipeline);

    engine.run().await.unwrap();
    let first_pass_input = read_file(&temp_dir, INPUT_FILE);
    let first_pass_backup = read_file(&temp_dir, BACKUP_FILE);

    // Second run consumes the file the first run produced.
    engine.run().await.unwrap();

    assert_eq!(read_file(&temp_dir, INPUT_FILE), first_pass_input);
    assert_eq!(read_file(&temp_dir, BACKUP_FILE), first_pass_backup);
}

#[tokio::test]
async fn test_empty_array_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    write_input(&temp_dir, "[]");

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = ColourPipeline::new(storage, SandboxConfig::new(&temp_dir));
    let engine = EtlEngine::new(pipeline);

    engine.run().await.unwrap();

    assert_eq!(read_file(&temp_dir, INPUT_FILE), "[]");
    assert_eq!(read_file(&temp_dir, BACKUP_FILE), "[]");
}

#[tokio::test]
async fn test_nested_values_pass_through_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    write_input(
        &temp_dir,
        r#"[{"id": 1, "meta": {"tags": ["a", "b"], "depth": 2.5}, "ok": true, "gap": null}]"#,
    );

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = ColourPipeline::new(storage, SandboxConfig::new(&temp_dir));
    let engine = EtlEngine::new(pipeline);

    engine.run().await.unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&read_file(&temp_dir, INPUT_FILE)).unwrap();
    assert_eq!(
        parsed[0]["meta"],
        serde_json::json!({"tags": ["a", "b"], "depth": 2.5})
    );
    assert_eq!(parsed[0]["ok"], serde_json::json!(true));
    assert!(parsed[0]["gap"].is_null());
    assert_eq!(parsed[0]["colour"], "blue");
}

#[tokio::test]
async fn test_record_count_is_preserved() {
    let temp_dir = TempDir::new().unwrap();
    write_input(
        &temp_dir,
        r#"[{"n": 1}, {"n": 2}, {"n": 3}, {"n": 4}, {"n": 5}]"#,
    );

    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let pipeline = ColourPipeline::new(storage, SandboxConfig::new(&temp_dir));
    let engine = EtlEngine::new(pipeline);

    engine.run().await.unwrap();

    let records: Vec<points_etl::core::Record> =
        serde_json::from_str(&read_file(&temp_dir, INPUT_FILE)).unwrap();
    assert_eq!(records.len(), 5);

    let backup_records: Vec<points_etl::core::Record> =
        serde_json::from_str(&read_file(&temp_dir, BACKUP_FILE)).unwrap();
    assert_eq!(backup_records.len(), 5);
}
