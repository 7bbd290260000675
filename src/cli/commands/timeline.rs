//! Timeline command implementation
//!
//! Buckets the timeline view (every facet except the date range) into fixed
//! year spans and prints one bar per bucket.

use colored::Colorize;
use serde::Serialize;

use crate::app::services::aggregator::{BucketMetric, TimelineBucket};
use crate::cli::args::{OutputFormat, TimelineArgs};
use crate::cli::commands::shared::{
    CommandStats, load_configuration, load_session, setup_logging, to_json,
};
use crate::Result;

const BAR_WIDTH: u64 = 40;

#[derive(Debug, Clone, Serialize)]
pub struct TimelineReport {
    pub bucket_size_years: u32,
    pub metric: BucketMetric,
    pub buckets: Vec<TimelineBucket>,
}

/// Run the timeline command
pub async fn run_timeline(args: TimelineArgs) -> Result<CommandStats> {
    let config = load_configuration(&args.common, |mut config| {
        if let Some(years) = args.bucket_years {
            config = config.with_bucket_size(years);
        }
        if let Some(metric) = args.metric {
            config = config.with_metric(metric);
        }
        config
    })?;
    setup_logging(&args.common, &config)?;

    let session = load_session(&args.common, &config).await?;

    let mut request = config.timeline.request();
    if let Some(year) = args.extend_to {
        request = request.extending_to(year);
    }

    let report = TimelineReport {
        bucket_size_years: request.bucket_size_years.get(),
        metric: request.metric,
        buckets: session.timeline(&request),
    };

    let output = match args.common.output_format {
        OutputFormat::Human => render_human(&report),
        OutputFormat::Json => to_json(&report)?,
        OutputFormat::Csv => render_csv(&report),
    };
    println!("{}", output);

    Ok(CommandStats {
        records_loaded: session.records().len(),
        items_shown: report.buckets.len(),
    })
}

/// Render buckets as a horizontal bar chart
pub fn render_human(report: &TimelineReport) -> String {
    let mut output = format!(
        "{} ({}-year buckets, {})\n",
        "Timeline".bold(),
        report.bucket_size_years,
        report.metric
    );

    if report.buckets.is_empty() {
        output.push_str("  no dated records\n");
        return output;
    }

    let max = report.buckets.iter().map(|b| b.total).max().unwrap_or(0);
    for bucket in &report.buckets {
        let width = if max == 0 {
            0
        } else {
            (bucket.total * BAR_WIDTH).div_ceil(max)
        };
        output.push_str(&format!(
            "  {:>5}-{:<5} │{}│ {}\n",
            bucket.start_year,
            bucket.end_year,
            format!("{:<40}", "█".repeat(width as usize)).cyan(),
            bucket.total
        ));
    }

    output
}

pub fn render_csv(report: &TimelineReport) -> String {
    let mut csv = String::from("start_year,end_year,total,records\n");
    for bucket in &report.buckets {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            bucket.start_year, bucket.end_year, bucket.total, bucket.records
        ));
    }
    csv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> TimelineReport {
        TimelineReport {
            bucket_size_years: 10,
            metric: BucketMetric::CaseTotal,
            buckets: vec![
                TimelineBucket {
                    start_year: 2000,
                    end_year: 2009,
                    total: 4,
                    records: 2,
                },
                TimelineBucket {
                    start_year: 2010,
                    end_year: 2019,
                    total: 0,
                    records: 0,
                },
                TimelineBucket {
                    start_year: 2020,
                    end_year: 2029,
                    total: 8,
                    records: 3,
                },
            ],
        }
    }

    #[test]
    fn test_render_human() {
        let output = render_human(&report());

        assert!(output.contains("10-year buckets, case-total"));
        assert!(output.contains("2000-2009"));
        assert_eq!(output.matches('█').count(), 20 + 40);
    }

    #[test]
    fn test_render_human_empty() {
        let empty = TimelineReport {
            buckets: Vec::new(),
            ..report()
        };
        assert!(render_human(&empty).contains("no dated records"));
    }

    #[test]
    fn test_render_csv() {
        assert_eq!(
            render_csv(&report()),
            "start_year,end_year,total,records\n2000,2009,4,2\n2010,2019,0,0\n2020,2029,8,3\n"
        );
    }

    #[test]
    fn test_json_metric_is_kebab_case() {
        let json = to_json(&report()).unwrap();
        assert!(json.contains("\"metric\": \"case-total\""));
    }
}
