// Archivo: query.rs
// Propósito: estado de consulta explícito y serializable (filtros, orden y
// página actual). Lo posee quien llama y se pasa a cada ejecución del
// pipeline; no hay estado global mutable.
use crate::errors::Result;
use crate::filter::{Filter, FilterSpec};
use crate::pagination::{navigate, PageNav};
use crate::sort::{SortDirection, SortSpec};
use serde::{Deserialize, Serialize};

/// Estado de una vista: filtros activos, criterio de orden y página (base 1).
///
/// Invariante: cualquier cambio de filtros u orden vuelve a la página 1,
/// así un número de página viejo nunca apunta a una página inexistente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    filters: FilterSpec,
    sort: SortSpec,
    page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self { filters: FilterSpec::default(),
               sort: SortSpec::default(),
               page: 1 }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Filtros activos. Sólo se modifican con `set_filter`, `clear_filter`
    /// o `clear_filters`.
    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Inserta o reemplaza un filtro y vuelve a la página 1.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filters.set(filter);
        self.page = 1;
    }

    /// Quita el filtro del `slot` indicado y vuelve a la página 1.
    pub fn clear_filter(&mut self, slot: &str) {
        self.filters.remove(slot);
        self.page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.filters = FilterSpec::default();
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.page = 1;
    }

    /// Clic en la cabecera de una columna: la misma columna invierte la
    /// dirección, una columna nueva empieza ascendente.
    pub fn toggle_sort(&mut self, key: &str) {
        let direction = match self.sort.key.as_deref() {
            Some(current) if current == key => self.sort.direction.flipped(),
            _ => SortDirection::Asc,
        };
        self.set_sort(SortSpec::by(key, direction));
    }

    /// Mueve la página actual acotándola a `[1, total_pages]`.
    pub fn navigate(&mut self, nav: PageNav, total_pages: usize) -> usize {
        self.page = navigate(self.page(), total_pages, nav);
        self.page
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let mut state: QueryState = serde_json::from_str(raw)?;
        state.page = state.page.max(1);
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_and_sort_changes_reset_page() {
        let mut q = QueryState::new();
        q.navigate(PageNav::Goto(4), 10);
        assert_eq!(q.page(), 4);
        q.set_filter(Filter::exact("status", "완료"));
        assert_eq!(q.page(), 1);

        q.navigate(PageNav::Last, 10);
        q.toggle_sort("qty");
        assert_eq!(q.page(), 1);

        q.navigate(PageNav::Next, 10);
        q.clear_filter("exact:status");
        assert_eq!(q.page(), 1);
    }

    #[test]
    fn every_mutator_goes_back_to_first_page() {
        let mut q = QueryState::new();
        q.navigate(PageNav::Goto(4), 10);
        q.set_sort(SortSpec::by("qty", SortDirection::Desc));
        assert_eq!(q.page(), 1);
        assert_eq!(q.sort(), &SortSpec::by("qty", SortDirection::Desc));

        q.navigate(PageNav::Goto(7), 10);
        q.set_filter(Filter::exact("status", "x"));
        q.set_filter(Filter::keyword("abc", &["machineName".to_string()]));
        assert_eq!(q.filters().filters.len(), 2);
        q.navigate(PageNav::Goto(3), 10);
        q.clear_filters();
        assert_eq!(q.page(), 1);
        assert_eq!(q.filters().active_count(), 0);
    }

    #[test]
    fn toggle_sort_flips_same_column() {
        let mut q = QueryState::new();
        q.toggle_sort("qty");
        assert_eq!(q.sort(), &SortSpec::by("qty", SortDirection::Asc));
        q.toggle_sort("qty");
        assert_eq!(q.sort(), &SortSpec::by("qty", SortDirection::Desc));
        q.toggle_sort("machineName");
        assert_eq!(q.sort(), &SortSpec::by("machineName", SortDirection::Asc));
    }

    #[test]
    fn json_round_trip_keeps_state() -> Result<()> {
        let mut q = QueryState::new();
        q.set_filter(Filter::date_range("workDate", Some("2024-01-01"), Some("2024-01-03")));
        q.set_sort(SortSpec::by("qty", SortDirection::Desc));
        q.navigate(PageNav::Goto(2), 3);
        let back = QueryState::from_json(&q.to_json()?)?;
        assert_eq!(back, q);
        Ok(())
    }

    #[test]
    fn zero_page_in_json_is_normalized() -> Result<()> {
        let q = QueryState::from_json(r#"{"filters":{"filters":[]},"sort":{"key":null,"direction":"asc"},"page":0}"#)?;
        assert_eq!(q.page(), 1);
        Ok(())
    }

    #[test]
    fn bad_json_is_serialization_error() {
        assert!(matches!(QueryState::from_json("{"), Err(crate::PipelineError::Serialization(_))));
    }
}
