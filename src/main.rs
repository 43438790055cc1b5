use mes_domain::{Dataset, DomainStubs, JsonFileSource, RecordSource};
use mes_pipeline::{Filter, PageNav, PipelineConfig, PipelineView, QueryState, ViewService, ALL};
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;

/// Pequeño menú interactivo para consultar los logs de proceso y el reporte
/// de producción.
///
/// Los datos se leen de `MES_DATA_DIR` (archivos `process_logs.json` y
/// `production_report.json`); si la variable no existe se usan datos de
/// ejemplo en memoria.
fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    env_logger::init();

    match std::env::var("MES_DATA_DIR") {
        Ok(dir) => {
            log::info!("leyendo datos de {}", dir);
            run(Arc::new(JsonFileSource::new(dir)))
        }
        Err(_) => run(Arc::new(DomainStubs::sample_source()?)),
    }
}

fn service_for<S: RecordSource>(source: Arc<S>, dataset: Dataset) -> Result<ViewService<S>, Box<dyn Error>> {
    let config = PipelineConfig::from_env(PipelineConfig::for_dataset(dataset))?;
    Ok(ViewService::with_config(source, dataset, config))
}

fn run<S: RecordSource>(source: Arc<S>) -> Result<(), Box<dyn Error>> {
    let mut service = service_for(source.clone(), Dataset::ProcessLogs)?;
    let mut state = QueryState::new();
    let mut view = service.view_or_empty(&state);

    loop {
        println!("\n== MES [{}] ==", service.dataset());
        println!("1) Ver página actual");
        println!("2) Buscar por palabra clave");
        println!("3) Filtro exacto (campo = valor)");
        println!("4) Rango de fechas");
        println!("5) Ordenar por columna");
        println!("6) Navegar páginas");
        println!("7) Resumen y serie del gráfico");
        println!("8) Cambiar vista (logs / reporte)");
        println!("9) Mostrar estado (JSON)");
        println!("0) Salir");
        print!("Elige una opción: ");
        io::stdout().flush().ok();

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        match choice.trim() {
            "1" => print_page(&view),
            "2" => {
                let q = prompt("Palabra clave (enter para quitar): ")?;
                state.set_filter(service.pipeline().keyword_filter(q.trim()));
            }
            "3" => {
                let field = prompt("Campo: ")?;
                let value = prompt(&format!("Valor ('{}' para todos): ", ALL))?;
                if field.trim().is_empty() {
                    println!("Campo vacío");
                    continue;
                }
                state.set_filter(Filter::exact(field.trim(), value.trim()));
            }
            "4" => {
                let start = prompt("Desde (YYYY-MM-DD, enter para abierto): ")?;
                let end = prompt("Hasta (YYYY-MM-DD, enter para abierto): ")?;
                let start = Some(start.trim()).filter(|s| !s.is_empty());
                let end = Some(end.trim()).filter(|s| !s.is_empty());
                state.set_filter(service.pipeline().date_filter(start, end));
            }
            "5" => {
                let key = prompt("Columna: ")?;
                if key.trim().is_empty() {
                    println!("Columna vacía");
                    continue;
                }
                state.toggle_sort(key.trim());
                println!("Orden: {} {:?}", key.trim(), state.sort().direction);
            }
            "6" => {
                let nav = prompt("f) primera  p) anterior  n) siguiente  l) última  o número: ")?;
                let nav = match nav.trim() {
                    "f" => PageNav::First,
                    "p" => PageNav::Previous,
                    "n" => PageNav::Next,
                    "l" => PageNav::Last,
                    other => match other.parse::<usize>() {
                        Ok(n) => PageNav::Goto(n),
                        Err(_) => {
                            eprintln!("Opción de página inválida");
                            continue;
                        }
                    },
                };
                let page = state.navigate(nav, view.page.total_pages);
                println!("Página {}", page);
            }
            "7" => print_summary(&view),
            "8" => {
                let next = match service.dataset() {
                    Dataset::ProcessLogs => Dataset::ProductionReport,
                    Dataset::ProductionReport => Dataset::ProcessLogs,
                };
                service = service_for(source.clone(), next)?;
                state = QueryState::new();
            }
            "9" => match state.to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Error serializando estado: {}", e),
            },
            "0" => {
                println!("Saliendo...");
                break;
            }
            other => {
                println!("Opción inválida: {}", other);
                continue;
            }
        }
        view = service.view_or_empty(&state);
    }

    Ok(())
}

fn print_page(view: &PipelineView) {
    if view.rows.is_empty() {
        println!("(sin datos)");
        return;
    }
    for row in &view.rows {
        let cells: Vec<String> = row.fields().map(|(k, v)| format!("{}={}", k, v)).collect();
        println!("{}", cells.join(" | "));
    }
    if view.page.is_visible() {
        let nums: Vec<String> = view.page
                                    .page_numbers
                                    .iter()
                                    .map(|n| if *n == view.page.current { format!("[{}]", n) } else { n.to_string() })
                                    .collect();
        println!("<< < {} > >>   ({} registros)", nums.join(" "), view.page.total_count);
    }
}

fn print_summary(view: &PipelineView) {
    let s = &view.summary;
    println!("Plan: {}  Producción: {}  Buenos: {}  Defectos: {}", s.plan, s.produced, s.good, s.defect);
    println!("Rendimiento: {}%  Cumplimiento: {}%", s.yield_rate, s.achievement_rate);
    println!("\nGRUPO  | PLAN | PROD | OK | NG | REND%");
    println!("-------------------------------------");
    for row in &view.chart {
        let r = &row.summary;
        println!("{} | {} | {} | {} | {} | {}", row.label, r.plan, r.produced, r.good, r.defect, r.yield_rate);
    }
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s)
}
