//! Assemble a dashboard report from the dataset and a selection.
//!
//! Every section is a pure function of the filtered view and the display
//! limits in `DashboardConfig`. The map panel is the exception: it is drawn
//! for one (year, flow) pair over the whole dataset.

use super::schema::{
    DashboardReport, GeographySection, OverviewSection, ProductSection, ReportStatus,
    TemporalSection, ValueAddedRow, ValueAddedSection,
};
use crate::aggregator::{
    calculate_summary, dataset_info, group_by, heatmap, sort_descending, sum_by, top_n,
    top_n_with_other, Group, Reduction,
};
use crate::dataset::{Attribute, Dataset, FieldValue, Flow, Measure, TradeRecord};
use crate::filter::Selection;
use crate::presentation::{
    map_view, BarChart, BoundarySet, HeatmapChart, MapView, Orientation, PieChart, ScatterChart,
    SeriesChart, SeriesKind,
};
use crate::utils::config::{DashboardConfig, OTHER_SECTIONS_LABEL, SCHEMA_VERSION};
use chrono::Utc;
use log::{debug, info};
use std::collections::BTreeSet;

/// Which slice of the dataset the map panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapRequest {
    /// Year to map, earliest available when `None`
    pub year: Option<i32>,
    pub flow: Flow,
}

impl Default for MapRequest {
    fn default() -> Self {
        Self {
            year: None,
            flow: Flow::Export,
        }
    }
}

/// Build the full dashboard report
///
/// **Public** - main entry point for report generation
///
/// An empty view is not an error: the report comes back with
/// `ReportStatus::NoData` and no chart sections.
///
/// `config` is expected to have passed `DashboardConfig::validate`. Zero
/// limits do not panic here; they produce empty rankings instead.
pub fn build_report(
    dataset: &Dataset,
    selection: &Selection,
    config: &DashboardConfig,
    map_request: &MapRequest,
    boundaries: Option<&BoundarySet>,
) -> DashboardReport {
    let view = selection.apply(dataset.records());

    info!(
        "Building report for {} of {} records",
        view.len(),
        dataset.len()
    );

    let mut report = DashboardReport {
        version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        status: ReportStatus::NoData,
        selection: selection.describe(),
        dataset_info: dataset_info(dataset),
        summary: None,
        overview: None,
        geography: None,
        products: None,
        temporal: None,
        value_added: None,
        map: build_map(dataset, map_request, boundaries, config),
    };

    if view.is_empty() {
        info!("No data for the selected filters");
        return report;
    }

    report.status = ReportStatus::Ok;
    report.summary = Some(calculate_summary(&view));
    report.overview = Some(build_overview(&view, config));
    report.geography = Some(build_geography(&view, config));
    report.products = Some(build_products(&view, config));
    report.temporal = Some(build_temporal(&view, config));
    report.value_added = Some(build_value_added(&view, config));

    report
}

fn yearly_by_flow(view: &[&TradeRecord]) -> Vec<Group> {
    group_by(
        view,
        &[Attribute::Year, Attribute::Flow],
        Measure::FobValue,
        Reduction::Sum,
    )
}

fn build_overview(view: &[&TradeRecord], config: &DashboardConfig) -> OverviewSection {
    let mut sections = sum_by(view, Attribute::Section, Measure::FobValue);
    sort_descending(&mut sections);

    if sections.len() > config.section_slices {
        // One slice is reserved for the overflow
        let keep = config.section_slices.saturating_sub(1);
        sections = top_n_with_other(sections, keep, OTHER_SECTIONS_LABEL);
    }

    OverviewSection {
        yearly_by_flow: SeriesChart::by_year(
            "Evolução de Exportações e Importações por Ano",
            SeriesKind::GroupedBar,
            &yearly_by_flow(view),
            None,
        ),
        flow_distribution: PieChart::from_groups(
            "Distribuição por Tipo de Fluxo",
            &sum_by(view, Attribute::Flow, Measure::FobValue),
            0.0,
        ),
        section_distribution: PieChart::from_groups(
            "Distribuição por Seção de Produtos",
            &sections,
            0.4,
        ),
    }
}

fn build_geography(view: &[&TradeRecord], config: &DashboardConfig) -> GeographySection {
    let top = config.top_entities;

    GeographySection {
        top_municipalities: BarChart::from_groups(
            format!("Top {} Municípios por Valor Comercial", top),
            top_n(sum_by(view, Attribute::Municipality, Measure::FobValue), top),
            Orientation::Horizontal,
            None,
        ),
        top_countries: BarChart::from_groups(
            format!("Top {} Países por Valor Comercial", top),
            top_n(sum_by(view, Attribute::Country, Measure::FobValue), top),
            Orientation::Horizontal,
            None,
        ),
        municipality_country: HeatmapChart::from_matrix(
            "Mapa de Calor: Relação Município x País",
            heatmap(
                view,
                Attribute::Municipality,
                Attribute::Country,
                Measure::FobValue,
                config.heatmap_threshold,
                config.heatmap_top_k,
            ),
            Attribute::Municipality,
            Attribute::Country,
        ),
    }
}

fn build_products(view: &[&TradeRecord], config: &DashboardConfig) -> ProductSection {
    let top = config.top_entities;
    let value_per_kg = group_by(view, &[Attribute::Section], Measure::ValuePerKg, Reduction::Mean);

    ProductSection {
        top_products: BarChart::from_groups(
            format!("Top {} Produtos por Valor Comercial", top),
            top_n(sum_by(view, Attribute::Product, Measure::FobValue), top),
            Orientation::Horizontal,
            Some(config.long_label_chars),
        ),
        value_per_kg_by_section: BarChart::from_groups(
            "Valor Médio por kg para as Principais Seções",
            top_n(value_per_kg, top),
            Orientation::Horizontal,
            Some(config.long_label_chars),
        ),
        value_weight_scatter: ScatterChart::from_records(
            "Relação entre Valor e Peso por Seção de Produto",
            view,
            Attribute::Section,
            Attribute::Product,
        ),
    }
}

/// Yearly totals of the `n` largest values of `attribute`
fn evolution_of_top(view: &[&TradeRecord], attribute: Attribute, n: usize) -> Vec<Group> {
    let leaders: BTreeSet<FieldValue> = top_n(sum_by(view, attribute, Measure::FobValue), n)
        .into_iter()
        .filter_map(|g| g.key.into_iter().next())
        .collect();

    // An empty set would lift the restriction entirely
    if leaders.is_empty() {
        return Vec::new();
    }

    let subset = Selection::new().with(attribute, leaders).apply(view.iter().copied());

    group_by(
        &subset,
        &[Attribute::Year, attribute],
        Measure::FobValue,
        Reduction::Sum,
    )
}

fn build_temporal(view: &[&TradeRecord], config: &DashboardConfig) -> TemporalSection {
    let n = config.evolution_top;

    TemporalSection {
        value_by_flow: SeriesChart::by_year(
            "Evolução Temporal por Tipo de Fluxo",
            SeriesKind::Line,
            &yearly_by_flow(view),
            None,
        ),
        top_products: SeriesChart::by_year(
            format!("Evolução dos {} Principais Produtos ao Longo do Tempo", n),
            SeriesKind::Line,
            &evolution_of_top(view, Attribute::Product, n),
            Some(config.short_label_chars),
        ),
        top_countries: SeriesChart::by_year(
            format!("Evolução dos {} Principais Países ao Longo do Tempo", n),
            SeriesKind::Line,
            &evolution_of_top(view, Attribute::Country, n),
            None,
        ),
    }
}

fn build_value_added(view: &[&TradeRecord], config: &DashboardConfig) -> ValueAddedSection {
    let n = config.value_per_kg_top;

    let mut rows: Vec<ValueAddedRow> = view
        .iter()
        .filter_map(|r| {
            r.value_per_kg().map(|value_per_kg| ValueAddedRow {
                municipality: r.municipality.clone(),
                year: r.year,
                flow: r.flow.to_string(),
                fob_value: r.fob_value,
                net_weight_kg: r.net_weight_kg,
                value_per_kg,
            })
        })
        .collect();
    rows.sort_by(|a, b| b.value_per_kg.total_cmp(&a.value_per_kg));

    debug!("{} records with a defined value per kg", rows.len());

    ValueAddedSection {
        top_municipalities: BarChart::from_groups(
            format!("Top {} Municípios por Valor Médio por kg", n),
            top_n(
                group_by(view, &[Attribute::Municipality], Measure::ValuePerKg, Reduction::Mean),
                n,
            ),
            Orientation::Vertical,
            None,
        ),
        value_weight_scatter: ScatterChart::from_records(
            "Relação entre Valor US$ FOB e Quilograma Líquido",
            view,
            Attribute::Municipality,
            Attribute::Municipality,
        ),
        rows,
    }
}

fn build_map(
    dataset: &Dataset,
    request: &MapRequest,
    boundaries: Option<&BoundarySet>,
    config: &DashboardConfig,
) -> MapView {
    let year = request.year.or_else(|| dataset.years().first().copied());

    let records = match year {
        Some(year) => Selection::new()
            .with_years([year])
            .with_flows([request.flow])
            .apply(dataset.records()),
        None => Vec::new(),
    };

    let title = match year {
        Some(year) => format!("Valores Comerciais por Município - {} ({})", year, request.flow),
        None => "Valores Comerciais por Município".to_string(),
    };

    map_view(
        title,
        sum_by(&records, Attribute::Municipality, Measure::FobValue),
        boundaries,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        let mut records = vec![
            TradeRecord::new(2021, Flow::Export, 100.0, 10.0)
                .with_place("Teresina", "China")
                .with_product("Vegetal", "Soja"),
            TradeRecord::new(2021, Flow::Import, 40.0, 0.0)
                .with_place("Parnaíba", "Chile")
                .with_product("Máquinas", "Motores"),
        ];
        for (i, section) in ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K"]
            .iter()
            .enumerate()
        {
            records.push(
                TradeRecord::new(2022, Flow::Export, (i + 1) as f64, 1.0)
                    .with_place("Picos", "Argentina")
                    .with_product(*section, format!("Produto {}", section)),
            );
        }
        Dataset::from_records(records)
    }

    #[test]
    fn test_sections_overflow_into_other() {
        let data = dataset();
        let report = build_report(
            &data,
            &Selection::new(),
            &DashboardConfig::default(),
            &MapRequest::default(),
            None,
        );

        let pie = &report.overview.unwrap().section_distribution;
        assert_eq!(pie.slices.len(), 10);
        assert_eq!(pie.slices[9].label, OTHER_SECTIONS_LABEL);

        let total: f64 = pie.slices.iter().map(|s| s.value).sum();
        assert_eq!(total, 140.0 + 66.0);
    }

    #[test]
    fn test_no_data_report() {
        let data = dataset();
        let selection = Selection::new().with_years([1999]);
        let report = build_report(
            &data,
            &selection,
            &DashboardConfig::default(),
            &MapRequest::default(),
            None,
        );

        assert_eq!(report.status, ReportStatus::NoData);
        assert!(report.summary.is_none());
        assert!(report.geography.is_none());
        assert_eq!(report.selection["year"], vec!["1999"]);
    }

    #[test]
    fn test_map_defaults_to_earliest_year_exports() {
        let data = dataset();
        let report = build_report(
            &data,
            &Selection::new(),
            &DashboardConfig::default(),
            &MapRequest::default(),
            None,
        );

        match report.map {
            MapView::Bars { chart } => {
                assert_eq!(chart.bars.len(), 1);
                assert_eq!(chart.bars[0].label, "Teresina");
                assert_eq!(chart.bars[0].value, 100.0);
            }
            other => panic!("expected bar fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_value_added_rows_skip_zero_weight() {
        let data = dataset();
        let selection = Selection::new().with_years([2021]);
        let report = build_report(
            &data,
            &selection,
            &DashboardConfig::default(),
            &MapRequest::default(),
            None,
        );

        let value_added = report.value_added.unwrap();
        assert_eq!(value_added.rows.len(), 1);
        assert_eq!(value_added.rows[0].value_per_kg, 10.0);
        assert_eq!(value_added.top_municipalities.bars.len(), 1);
    }

    #[test]
    fn test_zero_section_slices_keeps_only_overflow() {
        let data = dataset();
        let config = DashboardConfig {
            section_slices: 0,
            ..Default::default()
        };

        let report = build_report(
            &data,
            &Selection::new(),
            &config,
            &MapRequest::default(),
            None,
        );

        let pie = &report.overview.unwrap().section_distribution;
        assert_eq!(pie.slices.len(), 1);
        assert_eq!(pie.slices[0].label, OTHER_SECTIONS_LABEL);
        assert_eq!(pie.slices[0].value, 206.0);
    }

    #[test]
    fn test_zero_evolution_top_draws_no_series() {
        let data = dataset();
        let config = DashboardConfig {
            evolution_top: 0,
            ..Default::default()
        };

        let report = build_report(
            &data,
            &Selection::new(),
            &config,
            &MapRequest::default(),
            None,
        );

        let temporal = report.temporal.unwrap();
        assert!(temporal.top_products.series.is_empty());
        assert!(temporal.top_countries.series.is_empty());
        assert!(!temporal.value_by_flow.series.is_empty());
    }

    #[test]
    fn test_empty_dataset_map_has_no_bars() {
        let data = Dataset::from_records(Vec::new());
        let report = build_report(
            &data,
            &Selection::new(),
            &DashboardConfig::default(),
            &MapRequest::default(),
            None,
        );

        assert_eq!(report.status, ReportStatus::NoData);
        match report.map {
            MapView::Bars { chart } => {
                assert_eq!(chart.title, "Valores Comerciais por Município");
                assert!(chart.is_empty());
            }
            other => panic!("expected bar fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_evolution_limited_to_leaders() {
        let data = dataset();
        let view = data.view();
        let groups = evolution_of_top(&view, Attribute::Country, 2);

        let countries: BTreeSet<String> = groups.iter().map(|g| g.key[1].to_string()).collect();
        assert_eq!(
            countries,
            ["China", "Argentina"].iter().map(|s| s.to_string()).collect()
        );
    }
}
