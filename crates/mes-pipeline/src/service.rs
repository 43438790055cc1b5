// Archivo: service.rs
// Propósito: implementar `ViewService`, la capa que une la fuente de datos
// con el pipeline. Pide la instantánea de registros al colaborador externo y
// ejecuta el pipeline con el estado de consulta que recibe del llamador.
use crate::config::PipelineConfig;
use crate::engine::{PipelineView, ViewPipeline};
use crate::errors::Result;
use crate::query::QueryState;
use mes_domain::{Dataset, Record, RecordSource};
use std::sync::Arc;

/// Servicio de alto nivel para una vista (logs de proceso o reporte).
///
/// Este servicio no reintenta ni cancela peticiones: si dos cargas se
/// solapan, gana la última que escribe el llamador.
pub struct ViewService<S> where S: RecordSource
{
    source: Arc<S>,
    dataset: Dataset,
    pipeline: ViewPipeline,
}

impl<S> ViewService<S> where S: RecordSource
{
    /// Crea el servicio con el preset del conjunto de datos.
    pub fn new(source: Arc<S>, dataset: Dataset) -> Self {
        Self::with_config(source, dataset, PipelineConfig::for_dataset(dataset))
    }

    pub fn with_config(source: Arc<S>, dataset: Dataset, config: PipelineConfig) -> Self {
        Self { source,
               dataset,
               pipeline: ViewPipeline::new(config) }
    }

    pub fn dataset(&self) -> Dataset {
        self.dataset
    }

    pub fn pipeline(&self) -> &ViewPipeline {
        &self.pipeline
    }

    /// Obtiene la instantánea actual de registros.
    pub fn load(&self) -> Result<Vec<Record>> {
        Ok(self.source.fetch(self.dataset)?)
    }

    /// Carga los registros y ejecuta el pipeline.
    pub fn view(&self, state: &QueryState) -> Result<PipelineView> {
        let records = self.load()?;
        Ok(self.pipeline.run(&records, state))
    }

    /// Como `view`, pero un fallo de la fuente se muestra como vista vacía.
    pub fn view_or_empty(&self, state: &QueryState) -> PipelineView {
        match self.view(state) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("no se pudieron cargar los datos de {}: {}", self.dataset, e);
                PipelineView::empty(self.pipeline.config().page_size)
            }
        }
    }
}
