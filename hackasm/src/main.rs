use anyhow::{Context, Result};
use hackasm::{config::Config, errors_to_anyhow, render_binary, Assembler};
use std::io::Read;
use std::{
    env,
    fs::{self, File},
    path::Path,
};

fn main() -> Result<()> {
    env_logger::init();
    let config = Config::from_env()?;

    let filename: String = env::args()
        .nth(1)
        .ok_or_else(|| anyhow::Error::msg("Need an input filename"))?;
    let output_name: String = env::args()
        .nth(2)
        .ok_or_else(|| anyhow::Error::msg("Need an output filename"))?;
    let mut file = File::open(&filename).with_context(|| format!("opening {}", filename))?;
    let mut program_text = String::new();
    file.read_to_string(&mut program_text)?;

    let mut assembler = Assembler::from_source(&program_text);
    assembler.assemble();

    for error in assembler.errors() {
        eprintln!("{}:{}: {}", filename, error.line + 1, error.message());
    }
    if assembler.has_errors() {
        if !config.allow_errors {
            return Err(errors_to_anyhow(assembler.errors()));
        }
        log::warn!(
            "{} erroring lines left out of {}.hack, later labels are shifted",
            assembler.errors().len(),
            output_name
        );
    }

    fs::write(
        format!("{}.hack", output_name),
        render_binary(assembler.binary_code())?,
    )?;

    if config.write_debug_map {
        let name = Path::new(&filename)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        fs::write(
            format!("{}.hdb", output_name),
            assembler.debug_info(&name).to_string()?,
        )?;
    }

    log::info!(
        "assembled {} into {} instructions",
        filename,
        assembler.len()
    );

    Ok(())
}
