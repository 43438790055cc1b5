// Archivo: config.rs
// Propósito: configuración del pipeline de vistas (tamaño de página, ventana
// de paginación, campos de búsqueda, campo de fecha y campos de KPIs), con
// presets por conjunto de datos y overrides desde el entorno.
use crate::aggregate::{GroupBy, MetricFields};
use crate::errors::{PipelineError, Result};
use mes_domain::Dataset;
use serde::{Deserialize, Serialize};

/// Filas por página de las tablas.
pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Números de página visibles en la barra de paginación.
pub const DEFAULT_PAGE_WINDOW: usize = 10;

pub const ENV_PAGE_SIZE: &str = "MES_PAGE_SIZE";
pub const ENV_PAGE_WINDOW: &str = "MES_PAGE_WINDOW";
pub const ENV_KEYWORD_FIELDS: &str = "MES_KEYWORD_FIELDS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub page_size: usize,
    pub page_window: usize,
    /// Campos donde busca el filtro de palabra clave.
    pub keyword_fields: Vec<String>,
    /// Campo de fecha del filtro por rango.
    pub date_field: String,
    pub metrics: MetricFields,
    pub group_by: GroupBy,
}

fn names(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|s| s.to_string()).collect()
}

impl PipelineConfig {
    /// Vista de logs de proceso. La búsqueda cubre máquina, operario y
    /// número de LOT.
    pub fn process_logs() -> Self {
        Self { page_size: DEFAULT_PAGE_SIZE,
               page_window: DEFAULT_PAGE_WINDOW,
               keyword_fields: names(&["machineName", "workerName", "lotNo"]),
               date_field: "workDate".into(),
               metrics: MetricFields::default(),
               group_by: GroupBy::Day("workDate".into()) }
    }

    /// Vista del reporte de producción: KPIs y serie diaria.
    pub fn production_report() -> Self {
        Self { page_size: DEFAULT_PAGE_SIZE,
               page_window: DEFAULT_PAGE_WINDOW,
               keyword_fields: names(&["lineName", "productName"]),
               date_field: "date".into(),
               metrics: MetricFields::default(),
               group_by: GroupBy::Day("date".into()) }
    }

    pub fn for_dataset(dataset: Dataset) -> Self {
        match dataset {
            Dataset::ProcessLogs => Self::process_logs(),
            Dataset::ProductionReport => Self::production_report(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(PipelineError::Config("page_size debe ser mayor que 0".into()));
        }
        if self.page_window == 0 {
            return Err(PipelineError::Config("page_window debe ser mayor que 0".into()));
        }
        Ok(())
    }

    /// Aplica overrides obtenidos con `lookup` (nombre de variable -> valor).
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
        where F: Fn(&str) -> Option<String>
    {
        if let Some(v) = lookup(ENV_PAGE_SIZE) {
            self.page_size = parse_positive(ENV_PAGE_SIZE, &v)?;
        }
        if let Some(v) = lookup(ENV_PAGE_WINDOW) {
            self.page_window = parse_positive(ENV_PAGE_WINDOW, &v)?;
        }
        if let Some(v) = lookup(ENV_KEYWORD_FIELDS) {
            let fields: Vec<String> = v.split(',')
                                       .map(str::trim)
                                       .filter(|s| !s.is_empty())
                                       .map(str::to_string)
                                       .collect();
            if fields.is_empty() {
                return Err(PipelineError::Config(format!("{} no contiene campos", ENV_KEYWORD_FIELDS)));
            }
            self.keyword_fields = fields;
        }
        self.validate()?;
        Ok(self)
    }

    /// Carga `.env` si existe y aplica los overrides de `MES_PAGE_SIZE`,
    /// `MES_PAGE_WINDOW` y `MES_KEYWORD_FIELDS` sobre `base`.
    pub fn from_env(base: Self) -> Result<Self> {
        dotenvy::dotenv().ok();
        base.with_overrides(|k| std::env::var(k).ok())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::process_logs()
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(PipelineError::Config(format!("{} debe ser un entero positivo, se recibió {:?}", name, raw))),
    }
}
