// Archivo: pagination.rs
// Propósito: etapa de paginación. Calcula la ventana de índices de la página
// actual y el rango de números de página que se muestran al usuario.
//
// La etapa asume que la página actual ya está dentro de `[1, total_pages]`;
// quien la invoca debe acotarla antes con `clamp_page`.
use serde::{Deserialize, Serialize};

/// Ventana de índices `[start_index, end_index)` de la página actual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub start_index: usize,
    pub end_index: usize,
    pub total_pages: usize,
}

impl PageWindow {
    pub fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    pub fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }
}

/// `total_pages = ceil(total_count / page_size)`; con `total_count == 0` (o
/// `page_size == 0`) no hay páginas y la ventana es vacía.
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

/// Calcula la ventana de índices para `current_page` (base 1).
pub fn paginate(total_count: usize, page_size: usize, current_page: usize) -> PageWindow {
    let total_pages = total_pages(total_count, page_size);
    let start_index = current_page.saturating_sub(1)
                                  .saturating_mul(page_size)
                                  .min(total_count);
    let end_index = start_index.saturating_add(page_size).min(total_count);
    PageWindow { start_index,
                 end_index,
                 total_pages }
}

/// Números de página visibles: bloques fijos de `window` páginas que
/// contienen a `current_page` (con `window = 10`: 1..=10, 11..=20, ...).
pub fn windowed_page_numbers(current_page: usize, total_pages: usize, window: usize) -> Vec<usize> {
    if window == 0 || total_pages == 0 {
        return Vec::new();
    }
    let window_start = (current_page.max(1) - 1) / window * window + 1;
    let window_end = window_start.saturating_add(window - 1).min(total_pages);
    (window_start..=window_end).collect()
}

/// Acota una página solicitada a `[1, total_pages]`. Sin páginas devuelve 1.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Acciones de navegación de la barra de paginación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "to", content = "page")]
pub enum PageNav {
    First,
    Previous,
    Next,
    Last,
    Goto(usize),
}

/// Aplica una acción de navegación. Nunca baja de 1 ni supera
/// `total_pages`.
pub fn navigate(current_page: usize, total_pages: usize, nav: PageNav) -> usize {
    let target = match nav {
        PageNav::First => 1,
        PageNav::Previous => current_page.saturating_sub(1),
        PageNav::Next => current_page.saturating_add(1),
        PageNav::Last => total_pages,
        PageNav::Goto(p) => p,
    };
    clamp_page(target, total_pages)
}
