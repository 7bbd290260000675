//! Summary command implementation
//!
//! Prints the summary panel: headline figures for the filtered records,
//! per-strain trends between two adjacent periods, and the most recent reports.

use colored::Colorize;
use serde::Serialize;
use tracing::debug;

use crate::app::models::Record;
use crate::app::services::aggregator::{DataSummary, TrendDelta, TrendDirection};
use crate::app::services::date_codec::ReportDate;
use crate::cli::args::{OutputFormat, SummaryArgs};
use crate::cli::commands::shared::{
    CommandStats, csv_escape, format_percent, load_configuration, load_session, setup_logging,
    to_json,
};
use crate::constants::{LIVESTOCK_LABEL, TREND_PERIOD_CHOICES};
use crate::Result;

/// Everything the summary panel shows
#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub summary: DataSummary,
    pub trend_period_years: u32,
    pub as_of: Option<ReportDate>,
    pub trends: Vec<TrendDelta>,
    pub recent_reports: Vec<Record>,
}

/// Run the summary command
pub async fn run_summary(args: SummaryArgs) -> Result<CommandStats> {
    let config = load_configuration(&args.common, |mut config| {
        if let Some(period) = args.period {
            config = config.with_trend_period(period);
        }
        if let Some(limit) = args.recent {
            config = config.with_recent_reports(limit);
        }
        config
    })?;
    setup_logging(&args.common, &config)?;

    let period = config.trends.period_years;
    if !TREND_PERIOD_CHOICES.contains(&period) {
        debug!("Using non-standard trend period of {} years", period);
    }

    let session = load_session(&args.common, &config).await?;
    let report = SummaryReport {
        summary: session.summary(),
        trend_period_years: period,
        as_of: session.as_of_date().map(ReportDate),
        trends: session.trends(period),
        recent_reports: session.recent_reports(config.summary.recent_reports),
    };
    debug!("{}", report.summary.summary());

    let output = match args.common.output_format {
        OutputFormat::Human => render_human(&report),
        OutputFormat::Json => to_json(&report)?,
        OutputFormat::Csv => render_csv(&report),
    };
    println!("{}", output);

    Ok(CommandStats {
        records_loaded: session.records().len(),
        items_shown: report.summary.record_count,
    })
}

fn direction_marker(delta: &TrendDelta) -> String {
    match delta.direction {
        TrendDirection::Increase => format!("▲ +{}", delta.change).red().to_string(),
        TrendDirection::Decrease => format!("▼ -{}", delta.change).green().to_string(),
        TrendDirection::Unchanged => "= 0".dimmed().to_string(),
    }
}

/// Render the summary panel as text
pub fn render_human(report: &SummaryReport) -> String {
    let summary = &report.summary;
    let span = summary
        .date_span
        .map(|r| format!("{} – {}", ReportDate(r.start()), ReportDate(r.end())))
        .unwrap_or_else(|| "no dated records".to_string());

    let mut output = format!(
        "{}\n\
         Records:        {}\n\
         Total cases:    {}\n\
         Species:        {}\n\
         Period:         {}\n\
         Wild:           {} ({})\n\
         {:<16}{} ({})\n",
        "Surveillance Summary".bold(),
        summary.record_count,
        summary.total_cases,
        summary.unique_species,
        span,
        summary.provenance.wild,
        format_percent(summary.provenance.wild_percent),
        format!("{}:", LIVESTOCK_LABEL),
        summary.provenance.other,
        format_percent(summary.provenance.other_percent),
    );

    output.push_str(&format!("\n{}\n", "Cases by strain".bold()));
    for share in &summary.strains {
        output.push_str(&format!(
            "  {:<8} {:>8}  {:>7}\n",
            share.strain,
            share.cases,
            format_percent(share.share_percent)
        ));
    }

    let as_of = report
        .as_of
        .map_or_else(|| "n/a".to_string(), |d| d.to_string());
    output.push_str(&format!(
        "\n{} (last {} years vs. the {} before, as of {})\n",
        "Trends".bold(),
        report.trend_period_years,
        report.trend_period_years,
        as_of
    ));
    if report.trends.is_empty() {
        output.push_str("  no dated records\n");
    }
    for delta in &report.trends {
        output.push_str(&format!(
            "  {:<8} {:>8} vs {:>8}  {}  ({:.1}%)\n",
            delta.strain,
            delta.current,
            delta.previous,
            direction_marker(delta),
            delta.percent_change
        ));
    }

    output.push_str(&format!("\n{}\n", "Recent reports".bold()));
    if report.recent_reports.is_empty() {
        output.push_str("  none\n");
    }
    for record in &report.recent_reports {
        let strains: Vec<String> = record
            .strains()
            .ordered()
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(strain, count)| format!("{}={}", strain, count))
            .collect();
        output.push_str(&format!(
            "  {:<10}  {:<20} {:<10} {}\n",
            record.timestamp(),
            record.species(),
            record.provenance(),
            strains.join(" ")
        ));
    }

    output
}

/// Render per-strain figures and trends as CSV
pub fn render_csv(report: &SummaryReport) -> String {
    let mut csv = String::from(
        "strain,cases,share_percent,current,previous,change,percent_change,direction\n",
    );

    for delta in &report.trends {
        let share = report
            .summary
            .strains
            .iter()
            .find(|s| s.strain == delta.strain);
        csv.push_str(&format!(
            "{},{},{},{},{},{},{:.2},{}\n",
            csv_escape(&delta.strain),
            share.map_or(0, |s| s.cases),
            share
                .and_then(|s| s.share_percent)
                .map_or_else(String::new, |p| format!("{:.2}", p)),
            delta.current,
            delta.previous,
            delta.change,
            delta.percent_change,
            delta.direction
        ));
    }

    csv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::StrainCounts;
    use crate::app::session::DashboardSession;

    fn record(species: &str, provenance: &str, timestamp: &str, strains: &[(&str, u32)]) -> Record {
        let counts: StrainCounts = strains.iter().map(|&(s, c)| (s, c)).collect();
        Record::new(46.0, 7.0, species, counts, timestamp, provenance).unwrap()
    }

    fn report() -> SummaryReport {
        let session = DashboardSession::from_records(vec![
            record("Mallard", "Wild", "15.03.2020", &[("H5N1", 5)]),
            record("Chicken", "Farm", "01.01.2019", &[("H5N1", 10), ("H5N2", 1)]),
        ]);
        SummaryReport {
            summary: session.summary(),
            trend_period_years: 1,
            as_of: session.as_of_date().map(ReportDate),
            trends: session.trends(1),
            recent_reports: session.recent_reports(5),
        }
    }

    #[test]
    fn test_render_human_contains_panels() {
        let output = render_human(&report());

        assert!(output.contains("Surveillance Summary"));
        assert!(output.contains("Livestock:"));
        assert!(output.contains("H5N1"));
        assert!(output.contains("15.03.2020"));
        assert!(output.contains("as of 15.03.2020"));
    }

    #[test]
    fn test_render_csv() {
        let csv = render_csv(&report());
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("strain,cases"));
        assert_eq!(lines[1], "H5N1,15,93.75,5,10,5,50.00,decrease");
        assert!(lines[2].starts_with("H5N2,1,6.25,0,1,1,100.00,decrease"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let json = to_json(&report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["record_count"], 2);
        assert_eq!(value["as_of"], "15.03.2020");
        assert_eq!(value["trends"][0]["direction"], "decrease");
        assert_eq!(value["recent_reports"][0]["species"], "Mallard");
    }
}
