//! DCEL writing operations.

use std::io::Write;

use anyhow::{Context, Result};
use dcel::Dcel;

use super::DcelTable;

/// Write `dcel` in the indexed layout.
pub fn write(dcel: &Dcel, writer: &mut impl Write) -> Result<()> {
    write_table(&DcelTable::from(dcel), writer)
        .context("[io::dcel::write] Failed to write DCEL")
}

/// The indexed layout of `dcel` as a string.
pub fn to_string(dcel: &Dcel) -> String {
    let mut out = Vec::new();
    write_table(&DcelTable::from(dcel), &mut out).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&out).into_owned()
}

fn write_table(table: &DcelTable, w: &mut impl Write) -> std::io::Result<()> {
    writeln!(w, "{} {} {}", table.vertices.len(), table.num_edges(), table.faces.len())?;
    for v in &table.vertices {
        writeln!(w, "{} {} {}", v.position.x, v.position.y, v.half_edge + 1)?;
    }
    for &face in &table.faces {
        writeln!(w, "{}", face + 1)?;
    }
    for he in &table.half_edges {
        writeln!(w, "{} {} {} {} {}", he.origin + 1, he.twin + 1, he.face + 1, he.next + 1, he.prev + 1)?;
    }
    Ok(())
}
