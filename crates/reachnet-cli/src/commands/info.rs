//! Info command implementation.

use crate::cli::InfoArgs;
use crate::commands::open_network;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the info command.
pub async fn execute_info(args: InfoArgs, formatter: &Formatter) -> Result<()> {
    let network = open_network(&args.network)?;
    println!("{}", formatter.format_info(&network)?);
    Ok(())
}
