// Archivo: engine.rs
// Propósito: composición explícita del pipeline de vistas:
// registros -> filtro -> orden -> { paginación -> filas de la página ;
// agregación -> KPIs y serie de gráficos }.
//
// El pipeline no guarda estado entre ejecuciones. Se vuelve a invocar
// completo cada vez que cambian los registros, los filtros, el orden o la
// página; no hay actualización incremental.
use crate::aggregate::{chart_series, summarize, ChartRow, Summary};
use crate::config::PipelineConfig;
use crate::filter::{apply_filters, Filter};
use crate::pagination::{clamp_page, paginate, windowed_page_numbers};
use crate::query::QueryState;
use crate::sort::sort_records;
use mes_domain::Record;
use serde::{Deserialize, Serialize};

/// Metadatos de paginación para la capa de presentación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Página mostrada, ya acotada a `[1, total_pages]`.
    pub current: usize,
    pub total_pages: usize,
    /// Registros que pasaron los filtros.
    pub total_count: usize,
    pub page_size: usize,
    pub start_index: usize,
    pub end_index: usize,
    pub page_numbers: Vec<usize>,
}

impl PageMeta {
    /// Con una página o ninguna la barra de paginación no se muestra.
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }
}

/// Resultado de una ejecución del pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineView {
    /// Filas de la página actual (copias; los registros fuente no se tocan).
    pub rows: Vec<Record>,
    pub page: PageMeta,
    /// KPIs sobre todo el conjunto filtrado, no sólo la página.
    pub summary: Summary,
    pub chart: Vec<ChartRow>,
}

impl PipelineView {
    /// Vista vacía, usada como estado de "sin datos".
    pub fn empty(page_size: usize) -> Self {
        Self { rows: Vec::new(),
               page: PageMeta { current: 1,
                                total_pages: 0,
                                total_count: 0,
                                page_size,
                                start_index: 0,
                                end_index: 0,
                                page_numbers: Vec::new() },
               summary: Summary::default(),
               chart: Vec::new() }
    }
}

/// Pipeline configurado para una vista concreta.
#[derive(Debug, Clone, Default)]
pub struct ViewPipeline {
    config: PipelineConfig,
}

impl ViewPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Filtro de palabra clave sobre los campos configurados.
    pub fn keyword_filter(&self, query: &str) -> Filter {
        Filter::keyword(query, &self.config.keyword_fields)
    }

    /// Filtro de rango de fechas sobre el campo de fecha configurado.
    pub fn date_filter(&self, start: Option<&str>, end: Option<&str>) -> Filter {
        Filter::date_range(&self.config.date_field, start, end)
    }

    /// Ejecuta el pipeline completo sobre una instantánea de registros.
    ///
    /// Si `state` apunta a una página que ya no existe (por ejemplo porque
    /// llegaron menos datos), se muestra la página acotada más cercana.
    pub fn run(&self, records: &[Record], state: &QueryState) -> PipelineView {
        let filtered = apply_filters(records, state.filters());
        let sorted = sort_records(filtered, state.sort());

        let summary = summarize(sorted.iter().copied(), &self.config.metrics);
        let chart = chart_series(sorted.iter().copied(), &self.config.group_by, &self.config.metrics);

        let total_count = sorted.len();
        let page_size = self.config.page_size;
        let pages = crate::pagination::total_pages(total_count, page_size);
        let current = clamp_page(state.page(), pages);
        let window = paginate(total_count, page_size, current);
        let rows: Vec<Record> = sorted[window.start_index..window.end_index].iter()
                                                                          .map(|r| (*r).clone())
                                                                          .collect();
        log::debug!("vista: {} de {} registros, página {}/{}", rows.len(), records.len(), current, window.total_pages);

        PipelineView { rows,
                       page: PageMeta { current,
                                        total_pages: window.total_pages,
                                        total_count,
                                        page_size,
                                        start_index: window.start_index,
                                        end_index: window.end_index,
                                        page_numbers: windowed_page_numbers(current, window.total_pages, self.config.page_window) },
                       summary,
                       chart }
    }
}
