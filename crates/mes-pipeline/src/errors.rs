// Archivo: errors.rs
// Propósito: definir los errores del pipeline y el alias Result<T> usado por
// las APIs del crate. Las etapas (filtro, orden, paginación, agregación) son
// funciones totales y nunca devuelven error; sólo la configuración, la
// decodificación del estado y la fuente de datos pueden fallar.
use mes_domain::DomainError;
use thiserror::Error;
/// Errores del pipeline de vistas.
///
/// - `Domain`: fallo de la fuente de datos u otro error del dominio.
/// - `Config`: valor de configuración inválido.
/// - `Serialization`: estado de consulta no decodificable.
#[derive(Error, Debug)]
pub enum PipelineError {
  /// Error propagado desde `mes-domain` (p. ej. la fuente no respondió).
  #[error("Error de dominio: {0}")]
  Domain(#[from] DomainError),
  /// Configuración inválida (tamaño de página cero, número mal formado...).
  #[error("Configuración inválida: {0}")]
  Config(String),
  /// Error de serialización/deserialización JSON.
  #[error("Error de serialización: {0}")]
  Serialization(#[from] serde_json::Error),
}
/// Alias de resultado usado por las APIs del crate.
pub type Result<T> = std::result::Result<T, PipelineError>;
