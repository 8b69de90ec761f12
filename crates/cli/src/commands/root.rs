use anyhow::Result;
use std::process::ExitCode;

use crate::cli::RootArgs;

pub fn root_command(root_args: &RootArgs) -> Result<ExitCode> {
    let root = root_args.resolve_root()?;
    println!("{}", root);
    Ok(ExitCode::SUCCESS)
}
