use crate::record_source::InMemoryRecordSource;
use crate::{Dataset, DomainError, Record};
use once_cell::sync::Lazy;

static PROCESS_LOGS: Lazy<Vec<Record>> = Lazy::new(|| {
  let rows: [(&str, &str, &str, &str, &str, &str, &str, i64); 12] =
    [("2024-01-01T08:12:00", "사출", "LINE-1", "ABC-01", "kim", "LOT-240101-01", "완료", 120),
     ("2024-01-01T09:40:00", "사출", "LINE-1", "ABC-02", "lee", "LOT-240101-02", "완료", 95),
     ("2024-01-01T13:05:00", "조립", "LINE-2", "ASM-10", "park", "LOT-240101-03", "진행중", 40),
     ("2024-01-02T07:55:00", "사출", "LINE-1", "ABC-01", "kim", "LOT-240102-01", "완료", 130),
     ("2024-01-02T10:20:00", "도장", "LINE-3", "PNT-2", "choi", "LOT-240102-02", "불량", 12),
     ("2024-01-02T15:30:00", "조립", "LINE-2", "ASM-9", "park", "LOT-240102-03", "완료", 88),
     ("2024-01-03T08:01:00", "검사", "LINE-2", "INS-1", "jung", "LOT-240103-01", "완료", 150),
     ("2024-01-03T11:45:00", "사출", "LINE-1", "ABC-10", "lee", "LOT-240103-02", "진행중", 60),
     ("2024-01-03T16:10:00", "도장", "LINE-3", "PNT-1", "choi", "LOT-240103-03", "완료", 77),
     ("2024-01-04T08:30:00", "조립", "LINE-2", "ASM-10", "kim", "LOT-240104-01", "완료", 101),
     ("2024-01-04T09:15:00", "검사", "LINE-2", "INS-2", "jung", "LOT-240104-02", "불량", 9),
     ("2024-01-04T14:00:00", "사출", "LINE-1", "ABC-02", "han", "LOT-240104-03", "완료", 140)];
  rows.iter()
      .enumerate()
      .map(|(i, (at, process, line, machine, worker, lot, status, qty))| {
        Record::new().with("id", (i as i64) + 1)
                     .with("workDate", *at)
                     .with("processName", *process)
                     .with("lineName", *line)
                     .with("machineName", *machine)
                     .with("workerName", *worker)
                     .with("lotNo", *lot)
                     .with("status", *status)
                     .with("qty", *qty)
      })
      .collect()
});

static PRODUCTION_REPORT: Lazy<Vec<Record>> = Lazy::new(|| {
  let rows: [(&str, &str, &str, i64, i64, i64, i64); 8] = [("2024-01-01", "LINE-1", "커버", 100, 90, 85, 5),
                                                         ("2024-01-01", "LINE-2", "브래킷", 80, 82, 80, 2),
                                                         ("2024-01-02", "LINE-1", "커버", 100, 110, 108, 2),
                                                         ("2024-01-02", "LINE-2", "브래킷", 80, 70, 66, 4),
                                                         ("2024-01-03", "LINE-1", "커버", 100, 98, 97, 1),
                                                         ("2024-01-03", "LINE-3", "하우징", 50, 0, 0, 0),
                                                         ("2024-01-04", "LINE-2", "브래킷", 80, 85, 83, 2),
                                                         ("2024-01-04", "LINE-3", "하우징", 50, 45, 40, 5)];
  rows.iter()
      .map(|(date, line, product, plan, prod, ok, ng)| {
        Record::new().with("date", *date)
                     .with("lineName", *line)
                     .with("productName", *product)
                     .with("plan", *plan)
                     .with("prod", *prod)
                     .with("ok", *ok)
                     .with("ng", *ng)
      })
      .collect()
});

pub struct DomainStubs;

impl DomainStubs {
  /// Logs de proceso de ejemplo (cuatro días, tres líneas).
  pub fn process_logs() -> Vec<Record> {
    PROCESS_LOGS.clone()
  }

  /// Filas del reporte de producción de ejemplo.
  pub fn production_report() -> Vec<Record> {
    PRODUCTION_REPORT.clone()
  }

  /// Crea una fuente en memoria pre-poblada con ambos conjuntos de datos.
  pub fn sample_source() -> Result<InMemoryRecordSource, DomainError> {
    InMemoryRecordSource::new().with_dataset(Dataset::ProcessLogs, Self::process_logs())?
                               .with_dataset(Dataset::ProductionReport, Self::production_report())
  }
}
