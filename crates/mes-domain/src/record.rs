// record.rs
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Valor de un campo tal como llega del servicio de datos: texto, número o
/// nulo. Las fechas llegan como texto (`2024-01-02` o `2024-01-02T15:30:00`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
  Number(f64),
  Text(String),
  Null,
}

impl FieldValue {
  /// Representación textual usada por filtros y ordenación. Los números
  /// enteros se muestran sin decimales (`85`, no `85.0`).
  pub fn as_text(&self) -> Cow<'_, str> {
    match self {
      FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
      FieldValue::Number(n) => Cow::Owned(format_number(*n)),
      FieldValue::Null => Cow::Borrowed(""),
    }
  }

  /// Coerción numérica. Texto no numérico, nulo o valores no finitos
  /// devuelven `None`.
  pub fn as_number(&self) -> Option<f64> {
    let n = match self {
      FieldValue::Number(n) => *n,
      FieldValue::Text(s) => {
        let t = s.trim();
        if t.is_empty() {
          return None;
        }
        t.parse::<f64>().ok()?
      }
      FieldValue::Null => return None,
    };
    n.is_finite().then_some(n)
  }

  pub fn is_number(&self) -> bool {
    matches!(self, FieldValue::Number(n) if n.is_finite())
  }
}

impl From<&str> for FieldValue {
  fn from(s: &str) -> Self {
    FieldValue::Text(s.to_string())
  }
}

impl From<String> for FieldValue {
  fn from(s: String) -> Self {
    FieldValue::Text(s)
  }
}

impl From<f64> for FieldValue {
  fn from(n: f64) -> Self {
    FieldValue::Number(n)
  }
}

impl From<i64> for FieldValue {
  fn from(n: i64) -> Self {
    FieldValue::Number(n as f64)
  }
}

impl fmt::Display for FieldValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_text())
  }
}

fn format_number(n: f64) -> String {
  if n.fract() == 0.0 && n.abs() < 1e15 {
    format!("{}", n as i64)
  } else {
    format!("{}", n)
  }
}

/// Un registro de log de proceso o una fila de reporte: mapa ordenado de
/// nombre de campo a valor.
///
/// Los registros son inmutables para el pipeline; los accesores nunca
/// fallan y aplican valores por defecto cuando el campo falta:
/// - `text` devuelve `""`
/// - `number` devuelve `0.0`
/// - `date` devuelve `None` (el filtro de fechas excluye el registro)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
  fields: IndexMap<String, FieldValue>,
}

impl Record {
  pub fn new() -> Self {
    Self::default()
  }

  /// Constructor encadenable, útil en stubs y pruebas.
  pub fn with(mut self, field: &str, value: impl Into<FieldValue>) -> Self {
    self.fields.insert(field.to_string(), value.into());
    self
  }

  pub fn get(&self, field: &str) -> Option<&FieldValue> {
    self.fields.get(field)
  }

  pub fn text(&self, field: &str) -> Cow<'_, str> {
    self.fields.get(field).map(FieldValue::as_text).unwrap_or(Cow::Borrowed(""))
  }

  pub fn number(&self, field: &str) -> f64 {
    self.fields.get(field).and_then(FieldValue::as_number).unwrap_or(0.0)
  }

  /// Componente de fecha del campo; la hora del día se descarta.
  pub fn date(&self, field: &str) -> Option<NaiveDate> {
    match self.fields.get(field)? {
      FieldValue::Text(s) => parse_date(s),
      _ => None,
    }
  }

  pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
    self.fields.iter().map(|(k, v)| (k.as_str(), v))
  }

  pub fn len(&self) -> usize {
    self.fields.len()
  }

  pub fn is_empty(&self) -> bool {
    self.fields.is_empty()
  }
}

impl FromIterator<(String, FieldValue)> for Record {
  fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
    Self { fields: iter.into_iter().collect() }
  }
}

/// Interpreta una fecha o fecha-hora y devuelve sólo el día.
///
/// Formatos aceptados: `YYYY-MM-DD`, RFC 3339 (`2024-01-02T15:30:00Z`,
/// `2024-01-02T15:30:00+09:00`), fecha-hora local con `T` o espacio y
/// fracciones de segundo opcionales.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
  let s = raw.trim();
  if s.is_empty() {
    return None;
  }
  if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
    return Some(d);
  }
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.date_naive());
  }
  for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
      return Some(dt.date());
    }
  }
  None
}
