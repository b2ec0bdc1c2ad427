use std::env;
use std::fs;
use std::io::{self, Write};
use unflate::Decompressor;

fn main() -> io::Result<()> {
    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: gunzip <file.gz>");
        std::process::exit(2);
    };

    let data = fs::read(&path)?;
    let decompressor = Decompressor::new();
    let output = decompressor.decompress_gzip(&data)?;
    eprintln!("{}: {} -> {} bytes", path, data.len(), output.len());

    io::stdout().write_all(&output)?;
    Ok(())
}
