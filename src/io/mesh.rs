//! Mesh description reader.
//!
//! ```text
//! V F
//! x y          (V rows)
//! i j k ...    (F rows, 1-based vertex indices, one face per line)
//! ```
//!
//! The counts and coordinates are a plain whitespace-separated token stream;
//! each face is one line.  Blank lines are ignored and anything after the
//! last face is not read.

use std::io::Read;
use std::str::{FromStr, Lines, SplitWhitespace};

use anyhow::{bail, Context, Result};
use dcel::Mesh;
use geo::Coord;

/// Read a mesh description from `reader`.
pub fn read(reader: &mut impl Read) -> Result<Mesh> {
    let mut text = String::new();
    reader.read_to_string(&mut text)
        .context("[io::mesh::read] Failed to read mesh input")?;
    parse(&text)
}

/// Parse a mesh description, converting face indices to 0-based.
pub fn parse(text: &str) -> Result<Mesh> {
    let mut tokens = Tokens::new(text);

    let num_vertices: usize = tokens.next("vertex count")?;
    let num_faces: usize = tokens.next("face count")?;

    // Every record takes at least one byte, so the input length bounds any
    // honest count.
    let mut vertices = Vec::with_capacity(num_vertices.min(text.len()));
    for _ in 0..num_vertices {
        let x: i32 = tokens.next("x coordinate")?;
        let y: i32 = tokens.next("y coordinate")?;
        vertices.push(Coord { x, y });
    }
    tokens.expect_line_end()?;

    let mut faces = Vec::with_capacity(num_faces.min(text.len()));
    for i in 0..num_faces {
        let Some((line_no, line)) = tokens.next_record() else {
            bail!("[io::mesh::read] Expected {num_faces} faces, found {i}");
        };
        let face = line.split_whitespace()
            .map(|token| {
                let index = token.parse::<i64>().with_context(|| {
                    format!("[io::mesh::read] Line {line_no}: invalid vertex index {token:?} in face {}", i + 1)
                })?;
                index.checked_sub(1).with_context(|| {
                    format!("[io::mesh::read] Line {line_no}: vertex index {index} out of range")
                })
            })
            .collect::<Result<Vec<i64>>>()?;
        faces.push(face);
    }

    Ok(Mesh::new(vertices, faces))
}

/// Whitespace tokens that remember which line they came from, so face
/// records can switch to reading whole lines.
struct Tokens<'a> {
    lines:   Lines<'a>,
    line_no: usize,
    current: Option<SplitWhitespace<'a>>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self { lines: text.lines(), line_no: 0, current: None }
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T> {
        loop {
            if let Some(token) = self.current.as_mut().and_then(|words| words.next()) {
                return token.parse().map_err(|_| {
                    anyhow::anyhow!("[io::mesh::read] Line {}: invalid {what}: {token:?}", self.line_no)
                });
            }
            let Some(line) = self.lines.next() else {
                bail!("[io::mesh::read] Unexpected end of input, expected {what}");
            };
            self.line_no += 1;
            self.current = Some(line.split_whitespace());
        }
    }

    /// The line holding the last token read must have nothing left on it.
    fn expect_line_end(&mut self) -> Result<()> {
        if let Some(token) = self.current.as_mut().and_then(|words| words.next()) {
            bail!("[io::mesh::read] Line {}: unexpected token {token:?}", self.line_no);
        }
        self.current = None;
        Ok(())
    }

    /// Next non-blank line, with its 1-based line number.
    fn next_record(&mut self) -> Option<(usize, &'a str)> {
        for line in self.lines.by_ref() {
            self.line_no += 1;
            if !line.trim().is_empty() {
                return Some((self.line_no, line));
            }
        }
        None
    }
}
