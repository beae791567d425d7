use comex_dashboard::dataset::{load_dataset, Attribute, Dataset, Flow, TradeRecord};
use comex_dashboard::filter::{filter_options, Selection};
use comex_dashboard::presentation::{load_boundaries, MapView, Orientation};
use comex_dashboard::report::{build_report, DashboardReport, MapRequest, ReportStatus};
use comex_dashboard::utils::config::DashboardConfig;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::Builder;

const CSV: &str = "\
Ano,Fluxo,Município,País,Descrição Seção,Descrição SH4,Valor US$ FOB,Quilograma Líquido
2021.0,Exportação,Teresina,China,Produtos do reino vegetal,Soja,1000,200
2021.0,Importação,Teresina,Chile,Produtos minerais,Sal,300,0
2022.0,Exportação,Parnaíba,Espanha,Produtos do reino vegetal,Castanha de caju em casca e sem casca para consumo humano,600,50
2022.0,Exportação,Uruçuí,China,Produtos do reino vegetal,Soja,900,300
";

fn dataset() -> Dataset {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(CSV.as_bytes()).unwrap();
    load_dataset(file.path()).unwrap()
}

fn report_for(dataset: &Dataset, selection: &Selection) -> DashboardReport {
    build_report(
        dataset,
        selection,
        &DashboardConfig::default(),
        &MapRequest::default(),
        None,
    )
}

#[test]
fn test_report_from_csv() {
    let data = dataset();
    let report = report_for(&data, &Selection::new());

    assert_eq!(report.status, ReportStatus::Ok);
    assert_eq!(report.dataset_info.records, 4);
    assert_eq!(report.dataset_info.first_year, Some(2021));
    assert_eq!(report.dataset_info.last_year, Some(2022));
    assert!(report.dataset_info.file.ends_with(".csv"));

    let summary = report.summary.as_ref().unwrap();
    assert_eq!(summary.total_export, 2500.0);
    assert_eq!(summary.total_import, 300.0);
    assert_eq!(summary.balance, 2200.0);

    let geography = report.geography.as_ref().unwrap();
    let municipalities: Vec<(&str, f64)> = geography
        .top_municipalities
        .bars
        .iter()
        .map(|b| (b.label.as_str(), b.value))
        .collect();
    assert_eq!(
        municipalities,
        vec![("Parnaíba", 600.0), ("Uruçuí", 900.0), ("Teresina", 1300.0)]
    );
    assert_eq!(geography.top_municipalities.orientation, Orientation::Horizontal);
}

#[test]
fn test_report_sections_use_flow_colours_and_truncation() {
    let data = dataset();
    let report = report_for(&data, &Selection::new());

    let overview = report.overview.as_ref().unwrap();
    let colours: Vec<Option<&str>> = overview
        .flow_distribution
        .slices
        .iter()
        .map(|s| s.color.as_deref())
        .collect();
    assert_eq!(colours, vec![Some("#2E86C1"), Some("#E74C3C")]);

    let products = report.products.as_ref().unwrap();
    assert!(products
        .top_products
        .bars
        .iter()
        .all(|b| b.label.chars().count() <= 53));
    assert!(products
        .top_products
        .bars
        .iter()
        .any(|b| b.label.ends_with("...")));

    // Teresina's import has zero weight
    let value_added = report.value_added.as_ref().unwrap();
    let per_kg: Vec<f64> = value_added.rows.iter().map(|r| r.value_per_kg).collect();
    assert_eq!(per_kg, vec![12.0, 5.0, 3.0]);
}

#[test]
fn test_report_without_matches() {
    let data = dataset();
    let selection = Selection::new()
        .with_years([2021])
        .with_text(Attribute::Municipality, ["Uruçuí"]);

    let report = report_for(&data, &selection);

    assert_eq!(report.status, ReportStatus::NoData);
    assert!(!report.has_data());
    assert!(report.summary.is_none());
    assert!(report.overview.is_none());
    assert!(report.value_added.is_none());
    assert_eq!(report.dataset_info.records, 4);
}

#[test]
fn test_map_ignores_selection() {
    let data = dataset();
    let selection = Selection::new().with_years([2022]);
    let request = MapRequest {
        year: Some(2021),
        flow: Flow::Import,
    };

    let report = build_report(
        &data,
        &selection,
        &DashboardConfig::default(),
        &request,
        None,
    );

    match report.map {
        MapView::Bars { chart } => {
            assert_eq!(chart.bars.len(), 1);
            assert_eq!(chart.bars[0].label, "Teresina");
            assert_eq!(chart.bars[0].value, 300.0);
        }
        other => panic!("expected bars, got {:?}", other),
    }
}

#[test]
fn test_map_choropleth_from_geojson_file() {
    let data = dataset();
    let mut geojson = Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        geojson,
        r#"{{"type": "FeatureCollection", "features": [
            {{"type": "Feature", "properties": {{"nome": "Teresina"}}, "geometry": null}},
            {{"type": "Feature", "properties": {{"nome": "Parnaíba"}}, "geometry": null}}
        ]}}"#
    )
    .unwrap();

    let boundaries = load_boundaries(geojson.path(), "nome").unwrap();
    let report = build_report(
        &data,
        &Selection::new(),
        &DashboardConfig::default(),
        &MapRequest::default(),
        Some(&boundaries),
    );

    match report.map {
        MapView::Choropleth { regions, zoom, .. } => {
            assert_eq!(zoom, 6);
            assert_eq!(regions.len(), 1);
            assert_eq!(regions[0].municipality, "Teresina");
            assert!(regions[0].matched);
        }
        other => panic!("expected choropleth, got {:?}", other),
    }
}

#[test]
fn test_wide_heatmap_is_restricted() {
    let records: Vec<TradeRecord> = (0..25)
        .map(|i| {
            TradeRecord::new(2021, Flow::Export, (i + 1) as f64, 1.0)
                .with_place("Teresina", format!("País {:02}", i))
                .with_product("Seção", "Produto")
        })
        .collect();
    let data = Dataset::from_records(records);

    let report = report_for(&data, &Selection::new());
    let heatmap = &report.geography.as_ref().unwrap().municipality_country;

    assert_eq!(heatmap.rows, vec!["Teresina"]);
    assert_eq!(heatmap.columns.len(), 10);
    assert_eq!(heatmap.columns[0], "País 15");
    assert_eq!(heatmap.values[0][9], 25.0);
}

#[test]
fn test_filter_options_from_csv() {
    let data = dataset();
    let options = filter_options(&data.view(), 2);

    assert_eq!(options.years, vec![2021, 2022]);
    assert_eq!(options.flows, vec![Flow::Export, Flow::Import]);
    assert_eq!(options.municipalities, vec!["Teresina", "Uruçuí"]);
    assert_eq!(options.countries, vec!["China", "Espanha"]);
}

#[test]
fn test_header_only_csv_report() {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(
        file,
        "Ano,Fluxo,Município,País,Descrição Seção,Descrição SH4,Valor US$ FOB,Quilograma Líquido"
    )
    .unwrap();

    let data = load_dataset(file.path()).unwrap();
    let report = report_for(&data, &Selection::new());

    assert_eq!(report.status, ReportStatus::NoData);
    assert_eq!(report.dataset_info.records, 0);
    assert_eq!(report.dataset_info.first_year, None);
    match report.map {
        MapView::Bars { chart } => assert!(chart.bars.is_empty()),
        other => panic!("expected bars, got {:?}", other),
    }
}
