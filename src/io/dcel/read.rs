//! DCEL reading operations.

use std::io::Read;
use std::str::SplitWhitespace;

use anyhow::{bail, ensure, Context, Result};
use geo::Coord;

use super::{DcelTable, HalfEdgeRow, VertexRow};

/// Read the indexed layout from `reader`.
pub fn read(reader: &mut impl Read) -> Result<DcelTable> {
    let mut text = String::new();
    reader.read_to_string(&mut text)
        .context("[io::dcel::read] Failed to read DCEL input")?;
    parse(&text)
}

/// Parse the indexed layout, converting indices back to 0-based and checking
/// each one against the table it points into.
pub fn parse(text: &str) -> Result<DcelTable> {
    let mut tokens = text.split_whitespace();

    let num_vertices: usize = next(&mut tokens, "vertex count")?;
    let num_edges: usize = next(&mut tokens, "edge count")?;
    let num_faces: usize = next(&mut tokens, "face count")?;
    let num_half_edges = num_edges.checked_mul(2)
        .with_context(|| format!("[io::dcel::read] Edge count {num_edges} is too large"))?;
    // Every row takes at least one byte of input.
    let cap = |n: usize| n.min(text.len());

    let mut table = DcelTable {
        vertices:   Vec::with_capacity(cap(num_vertices)),
        faces:      Vec::with_capacity(cap(num_faces)),
        half_edges: Vec::with_capacity(cap(num_half_edges)),
    };

    for _ in 0..num_vertices {
        let x: i32 = next(&mut tokens, "x coordinate")?;
        let y: i32 = next(&mut tokens, "y coordinate")?;
        let half_edge = index(&mut tokens, "incident half-edge", num_half_edges)?;
        table.vertices.push(VertexRow { position: Coord { x, y }, half_edge });
    }
    for _ in 0..num_faces {
        table.faces.push(index(&mut tokens, "outer component", num_half_edges)?);
    }
    for _ in 0..num_half_edges {
        table.half_edges.push(HalfEdgeRow {
            origin: index(&mut tokens, "origin", num_vertices)?,
            twin:   index(&mut tokens, "twin", num_half_edges)?,
            face:   index(&mut tokens, "face", num_faces)?,
            next:   index(&mut tokens, "next", num_half_edges)?,
            prev:   index(&mut tokens, "prev", num_half_edges)?,
        });
    }

    if let Some(extra) = tokens.next() {
        bail!("[io::dcel::read] Unexpected trailing token {extra:?}");
    }
    Ok(table)
}

fn next<T: std::str::FromStr>(tokens: &mut SplitWhitespace<'_>, what: &str) -> Result<T> {
    let Some(token) = tokens.next() else {
        bail!("[io::dcel::read] Unexpected end of input, expected {what}");
    };
    token.parse().map_err(|_| anyhow::anyhow!("[io::dcel::read] Invalid {what}: {token:?}"))
}

/// A 1-based reference into a table of `len` records, returned 0-based.
fn index(tokens: &mut SplitWhitespace<'_>, what: &str, len: usize) -> Result<usize> {
    let value: usize = next(tokens, what)?;
    // An empty table still writes `1` for its missing references.
    ensure!(
        (1..=len.max(1)).contains(&value),
        "[io::dcel::read] {what} index {value} out of range 1..={len}"
    );
    Ok(value - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_based_rows() {
        let table = parse("3 3 2\n0 0 1\n2 0 2\n1 2 3\n1\n4\n\
            1 5 1 2 3\n2 4 1 3 1\n3 6 1 1 2\n3 2 2 5 6\n2 1 2 6 4\n1 3 2 4 5\n").unwrap();
        assert_eq!(table.vertices[1], VertexRow { position: Coord { x: 2, y: 0 }, half_edge: 1 });
        assert_eq!(table.faces, vec![0, 3]);
        assert_eq!(table.half_edges[0], HalfEdgeRow { origin: 0, twin: 4, face: 0, next: 1, prev: 2 });
        assert_eq!(table.num_edges(), 3);
    }

    #[test]
    fn out_of_range_reference_fails() {
        let err = parse("1 0 1\n0 0 1\n2\n").unwrap_err();
        assert!(err.to_string().contains("outer component index 2"), "{err}");
    }

    #[test]
    fn truncated_input_fails() {
        assert!(parse("3 3 2\n0 0 1\n").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn huge_counts_fail_without_allocating() {
        let err = parse("0 9223372036854775807 0\n").unwrap_err();
        assert!(err.to_string().contains("too large"), "{err}");
        assert!(parse("4000000000000000000 0 0\n0 0 1\n").is_err());
        assert!(parse("0 100000000000 0\n1 1 1 1 1\n").is_err());
    }

    #[test]
    fn trailing_tokens_fail() {
        assert!(parse("0 0 0\n7\n").is_err());
    }
}
