//! Facets command implementation
//!
//! Lists the species, strain and provenance values the filter panel offers.
//! Choices always come from the full record set, so filter flags do not
//! narrow them.

use colored::Colorize;

use crate::app::services::facets::FacetSet;
use crate::cli::args::{FacetsArgs, OutputFormat};
use crate::cli::commands::shared::{
    CommandStats, csv_escape, load_configuration, load_session, setup_logging, to_json,
};
use crate::Result;

/// Run the facets command
pub async fn run_facets(args: FacetsArgs) -> Result<CommandStats> {
    let config = load_configuration(&args.common, |config| config)?;
    setup_logging(&args.common, &config)?;

    let session = load_session(&args.common, &config).await?;
    let facets = session.facets();

    let output = match args.common.output_format {
        OutputFormat::Human => render_human(&facets),
        OutputFormat::Json => to_json(&facets)?,
        OutputFormat::Csv => render_csv(&facets),
    };
    println!("{}", output);

    Ok(CommandStats {
        records_loaded: session.records().len(),
        items_shown: facets.species.len() + facets.strains.len() + facets.provenances.len(),
    })
}

fn facet_groups(facets: &FacetSet) -> [(&'static str, &[String]); 3] {
    [
        ("species", &facets.species),
        ("strain", &facets.strains),
        ("provenance", &facets.provenances),
    ]
}

pub fn render_human(facets: &FacetSet) -> String {
    let mut output = String::new();
    for (name, values) in facet_groups(facets) {
        output.push_str(&format!("{} ({})\n", name.bold(), values.len()));
        for value in values {
            output.push_str(&format!("  {}\n", value));
        }
    }
    output
}

pub fn render_csv(facets: &FacetSet) -> String {
    let mut csv = String::from("facet,value\n");
    for (name, values) in facet_groups(facets) {
        for value in values {
            csv.push_str(&format!("{},{}\n", name, csv_escape(value)));
        }
    }
    csv
}
