//! Implementation of the `cocoscaff simulators` command.

use serde::Serialize;

use cocoscaff_core::domain::{HdlLanguage, Simulator};

use crate::{
    cli::{ListFormat, SimulatorsArgs},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize, PartialEq)]
struct Listing {
    simulators: Vec<&'static str>,
    languages: Vec<LanguageRow>,
}

#[derive(Debug, Serialize, PartialEq)]
struct LanguageRow {
    tag: &'static str,
    label: &'static str,
}

fn listing() -> Listing {
    Listing {
        simulators: Simulator::ALL.iter().map(|s| s.as_str()).collect(),
        languages: HdlLanguage::ALL
            .iter()
            .map(|l| LanguageRow {
                tag: l.as_str(),
                label: l.label(),
            })
            .collect(),
    }
}

pub fn execute(args: SimulatorsArgs, output: OutputManager) -> CliResult<()> {
    let listing = listing();

    match args.format {
        ListFormat::Table => {
            output.header("Simulators:")?;
            for sim in &listing.simulators {
                output.print(&format!("  {sim}"))?;
            }
            output.print("")?;
            output.header("HDL languages:")?;
            for lang in &listing.languages {
                output.print(&format!("  {:<10} {}", lang.tag, lang.label))?;
            }
        }
        ListFormat::List => {
            for sim in &listing.simulators {
                output.print(sim)?;
            }
        }
        ListFormat::Json => output.json(&listing)?,
    }

    Ok(())
}
