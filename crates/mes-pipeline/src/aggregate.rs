// Archivo: aggregate.rs
// Propósito: etapa de agregación. Reduce la colección filtrada a los KPIs del
// reporte (sumas y tasas derivadas) y a la serie agrupada de los gráficos.
//
// Las sumas se calculan sólo sobre lo que recibe la etapa, es decir, sobre el
// conjunto filtrado y nunca sobre la colección completa.
use mes_domain::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Nombres de los campos numéricos que alimentan los KPIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricFields {
    pub plan: String,
    pub produced: String,
    pub good: String,
    pub defect: String,
}

impl Default for MetricFields {
    fn default() -> Self {
        Self { plan: "plan".into(),
               produced: "prod".into(),
               good: "ok".into(),
               defect: "ng".into() }
    }
}

/// Redondeo "mitad hacia arriba" (2.5 -> 3, -2.5 -> -2).
fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// `round(good / produced * 1000) / 10`, es decir un decimal. 0 si no hubo
/// producción.
pub fn yield_rate(good: f64, produced: f64) -> f64 {
    if produced == 0.0 {
        return 0.0;
    }
    let r = round_half_up(good / produced * 1000.0) / 10.0;
    if r.is_finite() { r } else { 0.0 }
}

/// `round(produced / plan * 100)` como porcentaje entero. 0 si no hubo plan.
pub fn achievement_rate(produced: f64, plan: f64) -> i64 {
    if plan == 0.0 {
        return 0;
    }
    let r = round_half_up(produced / plan * 100.0);
    if r.is_finite() { r as i64 } else { 0 }
}

#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    plan: f64,
    produced: f64,
    good: f64,
    defect: f64,
}

impl Totals {
    fn add(&mut self, record: &Record, metrics: &MetricFields) {
        self.plan += record.number(&metrics.plan);
        self.produced += record.number(&metrics.produced);
        self.good += record.number(&metrics.good);
        self.defect += record.number(&metrics.defect);
    }

    fn summary(&self) -> Summary {
        Summary { plan: self.plan,
                  produced: self.produced,
                  good: self.good,
                  defect: self.defect,
                  yield_rate: yield_rate(self.good, self.produced),
                  achievement_rate: achievement_rate(self.produced, self.plan) }
    }
}

/// KPIs del conjunto filtrado. No tiene identidad persistida: se recalcula
/// con cada cambio de filtros o datos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub plan: f64,
    pub produced: f64,
    pub good: f64,
    pub defect: f64,
    /// Rendimiento (buenos / producidos) en %, con un decimal.
    pub yield_rate: f64,
    /// Cumplimiento del plan (producidos / plan) en % entero.
    pub achievement_rate: i64,
}

/// Suma los campos de `metrics` sobre `records` y deriva las tasas.
/// Campos ausentes o no numéricos cuentan como 0.
pub fn summarize<'a, I>(records: I, metrics: &MetricFields) -> Summary
    where I: IntoIterator<Item = &'a Record>
{
    let mut totals = Totals::default();
    for r in records {
        totals.add(r, metrics);
    }
    totals.summary()
}

/// Clave de agrupación de la serie de gráficos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "field", rename_all = "snake_case")]
pub enum GroupBy {
    /// Agrupa por día del campo de fecha; etiqueta `MM-DD`. Si la fecha no se
    /// puede interpretar se usa el texto crudo.
    Day(String),
    /// Agrupa por el texto del campo (línea, producto...).
    Field(String),
}

impl GroupBy {
    fn label(&self, record: &Record) -> String {
        match self {
            GroupBy::Day(field) => match record.date(field) {
                Some(d) => d.format("%m-%d").to_string(),
                None => record.text(field).into_owned(),
            },
            GroupBy::Field(field) => record.text(field).into_owned(),
        }
    }
}

/// Una fila de la serie: totales del grupo y sus tasas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    pub label: String,
    #[serde(flatten)]
    pub summary: Summary,
}

/// Agrupa y suma por `group`. El resultado queda ordenado de forma
/// ascendente por la etiqueta (orden lexicográfico del texto corto).
pub fn chart_series<'a, I>(records: I, group: &GroupBy, metrics: &MetricFields) -> Vec<ChartRow>
    where I: IntoIterator<Item = &'a Record>
{
    let mut groups: BTreeMap<String, Totals> = BTreeMap::new();
    for r in records {
        groups.entry(group.label(r)).or_default().add(r, metrics);
    }
    groups.into_iter()
          .map(|(label, totals)| ChartRow { label,
                                            summary: totals.summary() })
          .collect()
}
