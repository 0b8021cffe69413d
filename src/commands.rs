pub mod check;
pub mod inspect;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use dcel::Mesh;

use crate::io::mesh;

/// Load a mesh description from a file, or from stdin when `input` is `-`.
pub(crate) fn read_input(input: &Path) -> Result<Mesh> {
    if input == Path::new("-") {
        return mesh::read(&mut io::stdin().lock());
    }
    let file = File::open(input)
        .with_context(|| format!("[commands] Failed to open mesh {}", input.display()))?;
    mesh::read(&mut BufReader::new(file))
        .with_context(|| format!("[commands] Failed to load mesh {}", input.display()))
}
