use super::load_propensity_table;
use crate::cli::{ParamsArgs, ParamsCommands};
use crate::error::{CliError, Result};
use chofas::core::propensity::table::PropensityTable;
use std::io::Write;
use tracing::info;

pub fn run(args: ParamsArgs) -> Result<()> {
    match args.command {
        ParamsCommands::Show { propensities } => {
            let table = load_propensity_table(propensities.as_deref())?;
            let mut stdout = std::io::stdout().lock();
            write_table(&table, &mut stdout)?;
        }
        ParamsCommands::Export {
            output,
            propensities,
        } => {
            let table = load_propensity_table(propensities.as_deref())?;
            let content = table
                .to_toml_string()
                .map_err(|e| CliError::Other(e.into()))?;
            std::fs::write(&output, content)?;
            info!("Propensity table written to {:?}", output);
            println!("✓ Propensity table written to: {}", output.display());
        }
    }
    Ok(())
}

fn write_table(table: &PropensityTable, writer: &mut impl Write) -> Result<()> {
    writeln!(writer, "Residue  Pa (helix)  Pb (strand)")?;
    for (amino_acid, propensity) in table.iter() {
        writeln!(
            writer,
            "{:<7}  {:>10.2}  {:>11.2}",
            amino_acid.code(),
            propensity.helix,
            propensity.strand
        )?;
    }
    Ok(())
}
