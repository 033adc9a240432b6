extern crate glob;

use self::glob::glob;
use anyhow::Result;
use flate2::bufread::GzEncoder;
use flate2::Compression;
use std::env;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use vergen_gitcl::{BuildBuilder, CargoBuilder, Emitter, GitclBuilder, RustcBuilder};

fn main() -> Result<()> {
    compress_static_files()?;
    vergen()?;
    Ok(())
}

fn vergen() -> Result<()> {
    let build = BuildBuilder::all_build()?;
    let cargo = CargoBuilder::all_cargo()?;
    let git = GitclBuilder::all_git()?;
    let rustc = RustcBuilder::all_rustc()?;

    Emitter::default()
        .add_instructions(&build)?
        .add_instructions(&cargo)?
        .add_instructions(&git)?
        .add_instructions(&rustc)?
        .emit()?;

    Ok(())
}

fn compress_static_files() -> Result<()> {
    println!("cargo:rerun-if-changed=./static");
    let static_pattern = "static/*";
    let out_path = Path::new(&env::var("OUT_DIR")?).to_owned();

    // rust-embed needs the folder to exist even when nothing was copied
    fs::create_dir_all(out_path.join("static"))?;

    for entry in glob(static_pattern)? {
        let Ok(path) = entry else { continue };
        let Some(path_str) = path.to_str() else {
            continue;
        };

        let target = out_path.join(path_str);
        let directory = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(PathBuf::new);
        if !directory.exists() {
            fs::create_dir_all(&directory)?;
        }

        if path_str.ends_with(".js") || path_str.ends_with(".css") {
            let input = BufReader::new(File::open(path_str)?);
            let mut gz_target = target.into_os_string();
            gz_target.push(".gz");
            let mut output = BufWriter::new(File::create(gz_target)?);
            let mut gz = GzEncoder::new(input, Compression::default());
            let mut buffer = Vec::new();
            gz.read_to_end(&mut buffer)?;
            output.write_all(&buffer)?;
            output.flush()?;
        } else {
            fs::copy(path_str, target)?;
        }
    }

    // Output the path for use in #[folder = ...]
    println!(
        "cargo:rustc-env=PROCESSED_STATIC_PATH={}",
        out_path.join("static").display()
    );

    Ok(())
}
