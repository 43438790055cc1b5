use mes_domain::{Dataset, DomainStubs};
use mes_pipeline::errors::PipelineError;
use mes_pipeline::{Filter, PageNav, QueryState, SortDirection, SortSpec, ViewService};
use std::sync::Arc;

fn main() -> Result<(), PipelineError> {
    // Fuente en memoria con datos de ejemplo
    let source = Arc::new(DomainStubs::sample_source()?);
    let report = ViewService::new(source.clone(), Dataset::ProductionReport);

    // Reporte completo: KPIs y serie diaria
    let mut state = QueryState::new();
    let view = report.view(&state)?;
    println!("summary: {:?}", view.summary);
    for row in &view.chart {
        println!("  {} plan={} prod={} yield={}%", row.label, row.summary.plan, row.summary.produced, row.summary.yield_rate);
    }

    // Filtrar por línea y rango de fechas
    state.set_filter(Filter::exact("lineName", "LINE-2"));
    state.set_filter(report.pipeline().date_filter(Some("2024-01-02"), Some("2024-01-04")));
    let view = report.view(&state)?;
    println!("\nLINE-2 desde 01-02: {:?}", view.summary);

    // Logs de proceso: orden por cantidad descendente, página siguiente
    let logs = ViewService::new(source, Dataset::ProcessLogs);
    let mut state = QueryState::new();
    state.set_sort(SortSpec::by("qty", SortDirection::Desc));
    let view = logs.view(&state)?;
    state.navigate(PageNav::Next, view.page.total_pages);
    println!("\npágina {}/{} ({} filas)", view.page.current, view.page.total_pages, view.rows.len());
    for r in &view.rows {
        println!("  {} {} {} {}", r.text("lotNo"), r.text("machineName"), r.text("workerName"), r.text("qty"));
    }

    // El estado se puede guardar y restaurar
    println!("\nestado: {}", state.to_json()?);
    Ok(())
}
