//! Terminal rendering of a dashboard report.
//!
//! Prints the metric cards and the leading rankings with colour cues for
//! positive and negative trade balance.

use crate::presentation::{format_currency, format_number, format_optional_currency, BarChart};
use crate::report::DashboardReport;
use colored::*;

const RULE: &str = "---------------------------------------------------\n";

/// Render a human-readable summary of a report for the terminal
pub fn render_summary(report: &DashboardReport) -> String {
    let mut out = String::new();

    out.push_str(&render_header(report));
    out.push_str(&render_selection(report));

    if !report.has_data() {
        out.push_str(&format!(
            "\n{}\n",
            "No data for the selected filters".yellow().bold()
        ));
        return out;
    }

    out.push_str(&render_metrics(report));

    if let Some(geography) = &report.geography {
        out.push_str(&render_ranking(&geography.top_municipalities));
        out.push_str(&render_ranking(&geography.top_countries));
    }

    if let Some(products) = &report.products {
        out.push_str(&render_ranking(&products.top_products));
    }

    out
}

fn render_header(report: &DashboardReport) -> String {
    let info = &report.dataset_info;
    let mut out = String::new();

    out.push_str("\n📊 ");
    out.push_str(&"Comércio Exterior do Piauí".bold().to_string());
    out.push('\n');
    out.push_str(RULE);
    out.push_str(&format!("Source:  {}\n", info.source));
    if !info.file.is_empty() {
        out.push_str(&format!("File:    {}\n", info.file));
    }
    out.push_str(&format!(
        "Records: {} | Municipalities: {} | Countries: {} | Products: {}\n",
        info.records, info.municipalities, info.countries, info.products
    ));
    if let (Some(first), Some(last)) = (info.first_year, info.last_year) {
        out.push_str(&format!("Years:   {} - {}\n", first, last));
    }
    out.push_str(RULE);
    out
}

fn render_selection(report: &DashboardReport) -> String {
    if report.selection.is_empty() {
        return "Filters: none\n".to_string();
    }

    let mut out = String::from("Filters:\n");
    for (attribute, values) in &report.selection {
        out.push_str(&format!("  {}: {}\n", attribute, values.join(", ")));
    }
    out
}

fn render_metrics(report: &DashboardReport) -> String {
    let Some(summary) = &report.summary else {
        return String::new();
    };

    let balance = format_currency(summary.balance);
    let balance = if summary.balance < 0.0 {
        balance.red().bold()
    } else {
        balance.green().bold()
    };

    let mut out = String::from("\n");
    out.push_str(&format!(
        "Exportações:        {}\n",
        format_currency(summary.total_export)
    ));
    out.push_str(&format!(
        "Importações:        {}\n",
        format_currency(summary.total_import)
    ));
    out.push_str(&format!("Balança Comercial:  {}\n", balance));
    out.push_str(&format!(
        "Peso Líquido (kg):  {}\n",
        format_number(summary.total_weight_kg)
    ));
    out.push_str(&format!(
        "Valor Médio por kg: {}\n",
        format_optional_currency(summary.average_value_per_kg)
    ));
    out
}

fn render_ranking(chart: &BarChart) -> String {
    if chart.is_empty() {
        return String::new();
    }

    let mut out = format!("\n{}\n", chart.title.bold());

    // Horizontal charts hold bars smallest first
    for (i, bar) in chart.bars.iter().rev().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {} ({})\n",
            i + 1,
            bar.label,
            format_currency(bar.value)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, Flow, TradeRecord};
    use crate::filter::Selection;
    use crate::report::{build_report, MapRequest};
    use crate::utils::config::DashboardConfig;

    fn report(selection: Selection) -> DashboardReport {
        let dataset = Dataset::from_records(vec![
            TradeRecord::new(2021, Flow::Export, 100.0, 10.0)
                .with_place("Teresina", "China")
                .with_product("Vegetal", "Soja"),
            TradeRecord::new(2021, Flow::Import, 40.0, 0.0)
                .with_place("Parnaíba", "Chile")
                .with_product("Máquinas", "Motores"),
        ]);
        build_report(
            &dataset,
            &selection,
            &DashboardConfig::default(),
            &MapRequest::default(),
            None,
        )
    }

    #[test]
    fn test_summary_lists_metrics_and_rankings() {
        colored::control::set_override(false);
        let text = render_summary(&report(Selection::new()));

        assert!(text.contains("Filters: none"));
        assert!(text.contains("Balança Comercial:  $60.00"));
        assert!(text.contains("Valor Médio por kg: $14.00"));
        assert!(text.contains(" 1. Teresina ($100.00)"));
    }

    #[test]
    fn test_summary_without_data() {
        colored::control::set_override(false);
        let text = render_summary(&report(Selection::new().with_years([1990])));

        assert!(text.contains("year: 1990"));
        assert!(text.contains("No data for the selected filters"));
        assert!(!text.contains("Exportações"));
    }
}
