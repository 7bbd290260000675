//! Records command implementation
//!
//! Prints the map view: every record passing all filters, in source order.

use colored::Colorize;

use crate::app::models::Record;
use crate::cli::args::{OutputFormat, RecordsArgs};
use crate::cli::commands::shared::{
    CommandStats, csv_escape, load_configuration, load_session, setup_logging, to_json,
};
use crate::Result;

/// Run the records command
pub async fn run_records(args: RecordsArgs) -> Result<CommandStats> {
    let config = load_configuration(&args.common, |config| config)?;
    setup_logging(&args.common, &config)?;

    let session = load_session(&args.common, &config).await?;
    let mut records = session.map_view();
    let matched = records.len();
    if let Some(limit) = args.limit {
        records.truncate(limit);
    }

    let output = match args.common.output_format {
        OutputFormat::Human => render_human(&records, matched),
        OutputFormat::Json => to_json(&records)?,
        OutputFormat::Csv => render_csv(&records, session.strains()),
    };
    println!("{}", output);

    Ok(CommandStats {
        records_loaded: session.records().len(),
        items_shown: records.len(),
    })
}

pub fn render_human(records: &[Record], matched: usize) -> String {
    let mut output = format!(
        "{} (showing {} of {} matching)\n",
        "Records".bold(),
        records.len(),
        matched
    );

    for record in records {
        let strains: Vec<String> = record
            .strains()
            .ordered()
            .into_iter()
            .filter(|(_, count)| *count > 0)
            .map(|(strain, count)| format!("{}={}", strain, count))
            .collect();
        let timestamp = format!("{:<10}", record.timestamp());
        let timestamp = if record.date().is_some() {
            timestamp.normal()
        } else {
            timestamp.yellow()
        };
        output.push_str(&format!(
            "  {}  {:>9.4} {:>9.4}  {:<20} {:<10} {}\n",
            timestamp,
            record.latitude(),
            record.longitude(),
            record.species(),
            record.provenance(),
            strains.join(" ")
        ));
    }

    output
}

/// One row per record with a column for each strain
pub fn render_csv(records: &[Record], strains: &[String]) -> String {
    let mut csv = String::from("latitude,longitude,species,timestamp,provenance");
    for strain in strains {
        csv.push(',');
        csv.push_str(&csv_escape(strain));
    }
    csv.push('\n');

    for record in records {
        csv.push_str(&format!(
            "{},{},{},{},{}",
            record.latitude(),
            record.longitude(),
            csv_escape(record.species()),
            csv_escape(record.timestamp()),
            csv_escape(record.provenance())
        ));
        for strain in strains {
            csv.push_str(&format!(",{}", record.count(strain)));
        }
        csv.push('\n');
    }

    csv
}
