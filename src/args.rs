use std::path::PathBuf;

use clap::Parser;

use crate::ops::Operation;

#[derive(Parser, Debug)]
#[command(about = "Add, subtract or multiply two sparse matrix files")]
pub struct Args {
    /// The operation to apply
    #[arg(value_enum, ignore_case = true)]
    pub operation: Operation,
    /// File holding the left operand
    pub first: PathBuf,
    /// File holding the right operand
    pub second: PathBuf,
    /// Where to save the result, in addition to printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
