//! CLI tool for datagrid - computes merge offsets for a JSON model
//!
//! Usage:
//!   datagrid_cli <model.json> <row|column> <index>                      # body region
//!   datagrid_cli <model.json> <row|column> <index> body,row-header      # pooled regions
//!   datagrid_cli <model.json> <row|column> <index> [regions] -o out.json

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use datagrid::{merge_offsets_for_model, parse_regions, Axis, CellRegion, StaticModel};

fn usage() -> ! {
    eprintln!("Usage: datagrid_cli <model.json> <row|column> <index> [regions] [-o output.json]");
    std::process::exit(1);
}

fn main() {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let output_path = match args.iter().position(|a| a == "-o") {
        Some(pos) if pos + 1 < args.len() => {
            let path = args.remove(pos + 1);
            args.remove(pos);
            Some(path)
        }
        Some(_) => usage(),
        None => None,
    };

    if args.len() < 3 {
        usage();
    }

    let input_path = &args[0];
    let axis: Axis = match args[1].parse() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("{}", e);
            usage();
        }
    };
    let index: i32 = match args[2].parse() {
        Ok(i) => i,
        Err(e) => {
            eprintln!("Invalid index {}: {}", args[2], e);
            usage();
        }
    };
    let regions = match args.get(3) {
        Some(list) => match parse_regions(list) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{}", e);
                usage();
            }
        },
        None => vec![CellRegion::Body],
    };

    if let Err(e) = run(input_path, &regions, axis, index, output_path.as_deref()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(
    input_path: &str,
    regions: &[CellRegion],
    axis: Axis,
    index: i32,
    output_path: Option<&str>,
) -> datagrid::Result<()> {
    let json = fs::read_to_string(input_path)?;
    let model = StaticModel::from_json(&json)?;
    let offsets = merge_offsets_for_model(&model, regions, axis, index);
    let out = serde_json::to_string_pretty(&offsets)?;

    match output_path {
        Some(path) => {
            fs::write(path, &out)?;
            eprintln!("Written: {}", path);
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(out.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
