// dataset.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Conjuntos de datos que sirve la fuente: logs de proceso y filas del
/// reporte de producción.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dataset {
  ProcessLogs,
  ProductionReport,
}

impl Dataset {
  pub const ALL: [Dataset; 2] = [Dataset::ProcessLogs, Dataset::ProductionReport];

  /// Nombre de archivo usado por `JsonFileSource`.
  pub fn file_name(&self) -> &'static str {
    match self {
      Dataset::ProcessLogs => "process_logs.json",
      Dataset::ProductionReport => "production_report.json",
    }
  }
}

impl fmt::Display for Dataset {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      Dataset::ProcessLogs => "process_logs",
      Dataset::ProductionReport => "production_report",
    };
    write!(f, "{}", s)
  }
}

impl FromStr for Dataset {
  type Err = crate::DomainError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "process_logs" | "logs" => Ok(Dataset::ProcessLogs),
      "production_report" | "report" => Ok(Dataset::ProductionReport),
      other => Err(crate::DomainError::ValidationError(format!("Dataset desconocido: {}", other))),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_aliases_and_display_round_trip() {
    for d in Dataset::ALL {
      assert_eq!(d.to_string().parse::<Dataset>().unwrap(), d);
    }
    assert_eq!("Report".parse::<Dataset>().unwrap(), Dataset::ProductionReport);
    assert!("qr".parse::<Dataset>().is_err());
  }
}
