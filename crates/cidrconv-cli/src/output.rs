//! Result rendering for each output format

use anyhow::Result;
use cidrconv_cidr::{ConversionReport, Membership};
use cidrconv_core::Base;
use colored::Colorize;
use serde::Serialize;
use std::io::Write;

use crate::OutputFormat;

/// Outcome of the `address` command
#[derive(Serialize)]
pub struct AddressResult {
    pub input: String,
    pub base: Base,
    pub output: String,
}

pub fn print_conversion(report: &ConversionReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => print_conversion_human(report),
        OutputFormat::Json => print_json(report, true)?,
        OutputFormat::JsonCompact => print_json(report, false)?,
        OutputFormat::Csv => write_conversion_csv(report, std::io::stdout())?,
    }
    Ok(())
}

pub fn print_address(result: &AddressResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            println!("{} {} {}", result.input, "→".dimmed(), result.output.green());
        }
        OutputFormat::Json => print_json(result, true)?,
        OutputFormat::JsonCompact => print_json(result, false)?,
        OutputFormat::Csv => write_address_csv(result, std::io::stdout())?,
    }
    Ok(())
}

pub fn print_membership(membership: &Membership, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => print_membership_human(membership),
        OutputFormat::Json => print_json(membership, true)?,
        OutputFormat::JsonCompact => print_json(membership, false)?,
        OutputFormat::Csv => write_membership_csv(membership, std::io::stdout())?,
    }
    Ok(())
}

fn print_conversion_human(report: &ConversionReport) {
    println!();
    println!("{}", "CIDR Conversion".bold().cyan());
    println!("{}", "─".repeat(50).dimmed());
    println!("{:>15}: {}", "CIDR".bold(), report.cidr);
    if report.host_bits_discarded {
        println!(
            "{:>15}: {}",
            "Network".bold(),
            report.network.to_string().yellow()
        );
    } else {
        println!("{:>15}: {}", "Network".bold(), report.network);
    }

    println!("{:>15}: {}", "First Address".bold(), report.first.to_string().green());
    if let Some(ref bits) = report.first_binary {
        println!("{:>15}  {}", "", bits.dimmed());
    }

    println!("{:>15}: {}", "Last Address".bold(), report.last.to_string().green());
    if let Some(ref bits) = report.last_binary {
        println!("{:>15}  {}", "", bits.dimmed());
    }

    println!("{:>15}: {}", "Addresses".bold(), report.size);
    println!();
}

fn print_membership_human(membership: &Membership) {
    let verdict = if membership.member {
        "is in".green()
    } else {
        "is not in".red()
    };
    println!(
        "{} {} {} ({} - {})",
        membership.address.to_string().bold(),
        verdict,
        membership.cidr.bold(),
        membership.first,
        membership.last
    );
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    if pretty {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", serde_json::to_string(value)?);
    }
    Ok(())
}

fn write_conversion_csv<W: Write>(report: &ConversionReport, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "cidr",
        "network",
        "first",
        "last",
        "first_binary",
        "last_binary",
        "size",
        "host_bits_discarded",
    ])?;
    wtr.write_record([
        report.cidr.clone(),
        report.network.to_string(),
        report.first.to_string(),
        report.last.to_string(),
        report.first_binary.clone().unwrap_or_default(),
        report.last_binary.clone().unwrap_or_default(),
        report.size.to_string(),
        report.host_bits_discarded.to_string(),
    ])?;
    wtr.flush()?;
    Ok(())
}

fn write_address_csv<W: Write>(result: &AddressResult, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["input", "base", "output"])?;
    wtr.write_record([
        result.input.clone(),
        result.base.to_string(),
        result.output.clone(),
    ])?;
    wtr.flush()?;
    Ok(())
}

fn write_membership_csv<W: Write>(membership: &Membership, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["address", "cidr", "first", "last", "member"])?;
    wtr.write_record([
        membership.address.to_string(),
        membership.cidr.clone(),
        membership.first.to_string(),
        membership.last.to_string(),
        membership.member.to_string(),
    ])?;
    wtr.flush()?;
    Ok(())
}
