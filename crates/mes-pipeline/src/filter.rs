// Archivo: filter.rs
// Propósito: etapa de filtrado. Aplica cero o más predicados sobre la
// colección de registros y devuelve un subconjunto que preserva el orden.
//
// Todos los filtros activos se combinan con AND; como cada filtro es un
// predicado puro sobre un registro, el resultado no depende del orden en que
// se apliquen.
use chrono::NaiveDate;
use mes_domain::{parse_date, Record};
use serde::{Deserialize, Serialize};

/// Valor centinela de los selectores: "todos" deja pasar cualquier registro.
pub const ALL: &str = "all";

/// Un criterio de filtrado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Filter {
    /// Igualdad exacta sobre el texto del campo. `value == "all"` es no-op.
    Exact { field: String, value: String },
    /// Subcadena sin distinguir mayúsculas en al menos uno de `fields`.
    /// Una consulta vacía o sólo con espacios es no-op.
    Keyword { query: String, fields: Vec<String> },
    /// Rango de fechas inclusivo sobre `field`, comparando sólo el día.
    /// Si falta cualquiera de los dos extremos el filtro es no-op.
    DateRange {
        field: String,
        start: Option<String>,
        end: Option<String>,
    },
}

impl Filter {
    pub fn exact(field: &str, value: &str) -> Self {
        Filter::Exact { field: field.to_string(),
                        value: value.to_string() }
    }

    pub fn keyword(query: &str, fields: &[String]) -> Self {
        Filter::Keyword { query: query.to_string(),
                          fields: fields.to_vec() }
    }

    pub fn date_range(field: &str, start: Option<&str>, end: Option<&str>) -> Self {
        Filter::DateRange { field: field.to_string(),
                            start: start.map(str::to_string),
                            end: end.map(str::to_string) }
    }

    /// Identifica al filtro dentro de un `FilterSpec`: tipo y campo
    /// (`"exact:status"`, `"range:workDate"`). Sólo hay un filtro de palabra
    /// clave, `"keyword"`. Un filtro exacto y un rango sobre el mismo campo
    /// ocupan slots distintos y se combinan con AND.
    pub fn slot(&self) -> String {
        match self {
            Filter::Exact { field, .. } => format!("exact:{}", field),
            Filter::DateRange { field, .. } => format!("range:{}", field),
            Filter::Keyword { .. } => "keyword".to_string(),
        }
    }

    /// Compila el filtro a un predicado. Devuelve `None` si el filtro no
    /// restringe nada (centinela "all", palabra clave vacía, rango abierto).
    fn compile(&self) -> Option<Predicate<'_>> {
        match self {
            Filter::Exact { field, value } => {
                if value == ALL {
                    None
                } else {
                    Some(Predicate::Exact { field, value })
                }
            }
            Filter::Keyword { query, fields } => {
                let query = query.trim();
                if query.is_empty() {
                    None
                } else {
                    Some(Predicate::Keyword { needle: query.to_lowercase(),
                                              fields })
                }
            }
            Filter::DateRange { field, start, end } => {
                let start = parse_bound(field, start.as_deref())?;
                let end = parse_bound(field, end.as_deref())?;
                Some(Predicate::DateRange { field, start, end })
            }
        }
    }

    /// Indica si el filtro restringe algo.
    pub fn is_active(&self) -> bool {
        self.compile().is_some()
    }

    /// Evalúa el filtro sobre un registro. Un filtro inactivo acepta todo.
    pub fn matches(&self, record: &Record) -> bool {
        self.compile().map_or(true, |p| p.matches(record))
    }
}

fn parse_bound(field: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    let parsed = parse_date(raw);
    if parsed.is_none() {
        log::warn!("límite de rango no interpretable en '{}': {:?}; se ignora el filtro", field, raw);
    }
    parsed
}

enum Predicate<'a> {
    Exact { field: &'a str, value: &'a str },
    Keyword { needle: String, fields: &'a [String] },
    DateRange {
        field: &'a str,
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl Predicate<'_> {
    fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::Exact { field, value } => record.text(field) == *value,
            Predicate::Keyword { needle, fields } => fields.iter()
                                                           .any(|f| record.text(f).to_lowercase().contains(needle.as_str())),
            Predicate::DateRange { field, start, end } => match record.date(field) {
                Some(d) => *start <= d && d <= *end,
                None => false,
            },
        }
    }
}

/// Conjunto de filtros activos, combinados con AND. Serializable para que el
/// estado de la consulta pueda guardarse y restaurarse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub filters: Vec<Filter>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserta o reemplaza el filtro que ocupa el mismo `slot`.
    pub fn set(&mut self, filter: Filter) {
        match self.filters.iter_mut().find(|f| f.slot() == filter.slot()) {
            Some(existing) => *existing = filter,
            None => self.filters.push(filter),
        }
    }

    /// Quita el filtro del `slot` indicado. Devuelve `true` si existía.
    pub fn remove(&mut self, slot: &str) -> bool {
        let before = self.filters.len();
        self.filters.retain(|f| f.slot() != slot);
        before != self.filters.len()
    }

    pub fn with(mut self, filter: Filter) -> Self {
        self.set(filter);
        self
    }

    pub fn active_count(&self) -> usize {
        self.filters.iter().filter(|f| f.is_active()).count()
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}

/// Aplica todos los filtros activos y devuelve las referencias de los
/// registros que pasan, en el orden de entrada.
pub fn apply_filters<'a>(records: &'a [Record], spec: &FilterSpec) -> Vec<&'a Record> {
    let predicates: Vec<Predicate<'_>> = spec.filters.iter().filter_map(Filter::compile).collect();
    if predicates.is_empty() {
        return records.iter().collect();
    }
    let out: Vec<&Record> = records.iter().filter(|r| predicates.iter().all(|p| p.matches(r))).collect();
    log::debug!("filtro: {} de {} registros con {} criterios", out.len(), records.len(), predicates.len());
    out
}
