//! flatgraph command-line tool
//!
//! Usage:
//!   flatgraph normalize --type folder --input folder.json
//!   flatgraph denormalize --type folder --id 1 --store store.json
//!   flatgraph schema --type page

use anyhow::Result;
use clap::Parser;
use flatgraph_cli::{init_logging, run, Args};

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let output = run(&args, std::io::stdin().lock())?;
    println!("{output}");
    Ok(())
}
