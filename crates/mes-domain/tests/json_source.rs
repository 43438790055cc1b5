use mes_domain::{Dataset, DomainError, JsonFileSource, RecordSource};
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
  let dir = std::env::temp_dir().join(format!("mes-domain-{}-{}", name, std::process::id()));
  fs::create_dir_all(&dir).unwrap();
  dir
}

#[test]
fn reads_flat_objects_from_dataset_file() -> Result<(), DomainError> {
  let dir = scratch_dir("ok");
  fs::write(dir.join("production_report.json"),
            r#"[{"date":"2024-01-01","plan":100,"prod":90,"ok":85,"ng":5},
                {"date":"2024-01-02","plan":"100","prod":110}]"#).unwrap();
  let source = JsonFileSource::new(&dir);
  let rows = source.fetch(Dataset::ProductionReport)?;
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[1].number("plan"), 100.0);
  assert_eq!(rows[1].number("ok"), 0.0);
  fs::remove_dir_all(&dir).ok();
  Ok(())
}

#[test]
fn malformed_json_is_a_serialization_error() {
  let dir = scratch_dir("bad");
  fs::write(dir.join("process_logs.json"), "{not json").unwrap();
  let source = JsonFileSource::new(&dir);
  let res = source.fetch(Dataset::ProcessLogs);
  assert!(matches!(res, Err(DomainError::SerializationError(_))));
  fs::remove_dir_all(&dir).ok();
}
