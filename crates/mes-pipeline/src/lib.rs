//! Crate `mes-pipeline` — derivación de datos para las vistas del MES
//!
//! Este crate implementa el pipeline que comparten la vista de logs de
//! proceso y la del reporte de producción: filtro -> orden -> paginación
//! y agregación de KPIs/gráficos. Cada etapa es una función pura y total
//! sobre una instantánea inmutable de registros (`mes_domain::Record`).
//!
//! Diseño resumido:
//! - Estado explícito: `QueryState` (filtros, orden, página) lo posee quien
//!   llama y es serializable.
//! - Composición explícita: `ViewPipeline::run` se reinvoca completo ante
//!   cualquier cambio; no hay grafo reactivo ni caché.
//! - Errores: las etapas no fallan. Sólo la configuración, la decodificación
//!   del estado y la fuente de datos devuelven `PipelineError`.
//!
//! Ejemplo rápido:
//! ```rust
//! use mes_domain::DomainStubs;
//! use mes_pipeline::{PipelineConfig, QueryState, ViewPipeline};
//! let pipeline = ViewPipeline::new(PipelineConfig::production_report());
//! let view = pipeline.run(&DomainStubs::production_report(), &QueryState::new());
//! assert_eq!(view.page.total_count, 8);
//! ```
pub mod aggregate;
pub mod collation;
pub mod config;
pub mod engine;
pub mod errors;
pub mod filter;
pub mod pagination;
pub mod query;
pub mod service;
pub mod sort;

pub use aggregate::*;
pub use config::*;
pub use engine::*;
pub use errors::*;
pub use filter::*;
pub use pagination::*;
pub use query::*;
pub use service::*;
pub use sort::*;
