use comfy_table::presets::UTF8_FULL;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::*;
use ipfilter::{Client, PrefixSummary, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Policy Document
--------------------------------------------------------------------------------------*/

/// Write the policy document to `output`, or to stdout when `output` is `-`.
pub fn write_policy(document: &[u8], output: &Path) -> Result<()> {
    if output.as_os_str() == "-" {
        let mut stdout = io::stdout().lock();
        stdout.write_all(document)?;
        writeln!(stdout)?;
        stdout.flush()?;
    } else {
        fs::write(output, document)?;
    }
    Ok(())
}

/*--------------------------------------------------------------------------------------
  Prefix Summary Table
--------------------------------------------------------------------------------------*/

pub fn summary_table(client: &Client, summary: &PrefixSummary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new(format!("{} `{}`", client.source(), client.service_key()))
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
        Cell::new("Prefixes")
            .add_attribute(Attribute::Bold)
            .fg(Color::Green),
    ]);

    table.add_row(vec![Cell::new("Extracted"), Cell::new(summary.total)]);
    table.add_row(vec![
        Cell::new("IPv4 (kept)").add_attribute(Attribute::Bold),
        Cell::new(summary.ipv4).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("IPv6 (dropped)"), Cell::new(summary.ipv6)]);
    table.add_row(vec![Cell::new("Invalid (dropped)"), Cell::new(summary.invalid)]);

    // Right-align the counts column
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    table
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
