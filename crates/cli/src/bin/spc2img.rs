//! SPC file packager for the SD-card player.
//!
//! Packs one or more SPC snapshots into an image the player core can boot from.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use nanospc_sim::logging;
use nanospc_sim_core::common::constants::SPC_SLOT_SIZE;
use nanospc_sim_core::image;

#[derive(Parser, Debug)]
#[command(name = "spc2img", about = "SPC file packager for spcplayer")]
struct Cli {
    /// Output file.
    #[arg(short, long, default_value = "sd_spc.img")]
    output: PathBuf,

    /// SPC files to package.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match image::pack_to_file(&cli.output, &cli.files) {
        Ok(short) => {
            for file in short {
                println!(
                    "Warning expecting at least {SPC_SLOT_SIZE} bytes for {}, actually it is only {}",
                    file.path.display(),
                    file.len
                );
            }
            println!("done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("[!] FATAL: {e}");
            ExitCode::FAILURE
        }
    }
}
