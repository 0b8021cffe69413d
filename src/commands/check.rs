use std::io::{self, Write};

use anyhow::{Context, Result};
use dcel::{Dcel, ValidateOptions};
use tracing::info;

use crate::cli::{CheckArgs, Cli, OutputFormat};
use crate::commands::read_input;
use crate::io::{dcel as dcel_io, open_sink};

/// Build and validate; write the DCEL if valid, otherwise print the token of
/// the failed check on stdout.  A rejected mesh is not an error.
pub fn run(_cli: &Cli, args: &CheckArgs) -> Result<()> {
    let mesh = read_input(&args.input)?;
    info!(input = %args.input.display(), vertices = mesh.vertices.len(), faces = mesh.faces.len(), "loaded mesh");

    // Opened before the work so an existing output fails fast.
    let mut sink = open_sink(args.output.as_deref(), args.force)?;

    let dcel = Dcel::from_mesh(&mesh);
    let options = ValidateOptions { overlap: args.overlap_scan.into() };

    if let Err(defect) = dcel.validate(&options) {
        info!(%defect, "mesh rejected");
        drop(sink);
        let mut out = io::stdout().lock();
        writeln!(out, "{}", defect.token()).context("[commands::check] Failed to write diagnostic")?;
        return Ok(());
    }

    match args.format {
        OutputFormat::Text => dcel_io::write(&dcel, &mut sink)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut sink, &dcel)
                .context("[commands::check] Failed to write DCEL as JSON")?;
            writeln!(sink)?;
        }
    }
    sink.finish()?;

    info!(
        vertices = dcel.num_vertices(),
        edges = dcel.num_edges(),
        faces = dcel.num_faces(),
        "wrote dcel"
    );
    Ok(())
}
