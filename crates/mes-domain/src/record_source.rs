use crate::{Dataset, DomainError, Record};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Trait del colaborador que entrega registros bajo demanda.
///
/// No hay negociación de esquema: cada registro es un mapa plano de campos y
/// el pipeline aplica valores por defecto a los campos que falten. Un fallo
/// de la fuente se propaga tal cual; la capa de presentación decide cómo
/// mostrarlo (por ejemplo, una vista vacía).
pub trait RecordSource: Send + Sync {
  /// Obtiene todos los registros de un conjunto de datos.
  fn fetch(&self, dataset: Dataset) -> Result<Vec<Record>, DomainError>;
}

/// Implementación en memoria para tests y desarrollo.
pub struct InMemoryRecordSource {
  datasets: Arc<Mutex<HashMap<Dataset, Vec<Record>>>>,
}

impl InMemoryRecordSource {
  pub fn new() -> Self {
    Self { datasets: Arc::new(Mutex::new(HashMap::new())) }
  }

  // Helper to map poisoned mutex errors into DomainError
  fn lock_map(&self) -> Result<std::sync::MutexGuard<'_, HashMap<Dataset, Vec<Record>>>, DomainError> {
    self.datasets
        .lock()
        .map_err(|e| DomainError::SourceError(format!("Mutex 'datasets' poisoned: {}", e)))
  }

  /// Reemplaza el contenido de un conjunto de datos (último en escribir gana).
  pub fn replace(&self, dataset: Dataset, records: Vec<Record>) -> Result<(), DomainError> {
    let mut map = self.lock_map()?;
    map.insert(dataset, records);
    Ok(())
  }

  pub fn with_dataset(self, dataset: Dataset, records: Vec<Record>) -> Result<Self, DomainError> {
    self.replace(dataset, records)?;
    Ok(self)
  }
}

impl RecordSource for InMemoryRecordSource {
  fn fetch(&self, dataset: Dataset) -> Result<Vec<Record>, DomainError> {
    let map = self.lock_map()?;
    Ok(map.get(&dataset).cloned().unwrap_or_default())
  }
}

impl Default for InMemoryRecordSource {
  fn default() -> Self {
    Self::new()
  }
}

/// Fuente que lee un arreglo JSON de objetos planos por conjunto de datos
/// desde un directorio (`process_logs.json`, `production_report.json`).
pub struct JsonFileSource {
  dir: PathBuf,
}

impl JsonFileSource {
  pub fn new(dir: impl AsRef<Path>) -> Self {
    Self { dir: dir.as_ref().to_path_buf() }
  }

  pub fn path_for(&self, dataset: Dataset) -> PathBuf {
    self.dir.join(dataset.file_name())
  }
}

impl RecordSource for JsonFileSource {
  fn fetch(&self, dataset: Dataset) -> Result<Vec<Record>, DomainError> {
    let path = self.path_for(dataset);
    let raw = std::fs::read_to_string(&path).map_err(|e| DomainError::SourceError(format!("{}: {}", path.display(), e)))?;
    let records: Vec<Record> = serde_json::from_str(&raw)?;
    log::debug!("{} registros leídos de {}", records.len(), path.display());
    Ok(records)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_dataset_is_empty() -> Result<(), DomainError> {
    let source = InMemoryRecordSource::new();
    assert!(source.fetch(Dataset::ProcessLogs)?.is_empty());
    Ok(())
  }

  #[test]
  fn replace_is_last_write_wins() -> Result<(), DomainError> {
    let source = InMemoryRecordSource::new();
    source.replace(Dataset::ProductionReport, vec![Record::new().with("plan", 1i64)])?;
    source.replace(Dataset::ProductionReport, vec![Record::new().with("plan", 2i64), Record::new()])?;
    let rows = source.fetch(Dataset::ProductionReport)?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].number("plan"), 2.0);
    Ok(())
  }

  #[test]
  fn json_source_reports_missing_file() {
    let source = JsonFileSource::new("/nonexistent/mes-data");
    match source.fetch(Dataset::ProcessLogs) {
      Err(DomainError::SourceError(msg)) => assert!(msg.contains("process_logs.json")),
      other => panic!("expected SourceError, got {:?}", other.map(|r| r.len())),
    }
  }
}
