use anyhow::{Context, Result};
use dcel::{Anomaly, Dcel, Defect, ValidateOptions};
use serde::Serialize;
use std::io::Write;
use tracing::info;

use crate::cli::{Cli, InspectArgs};
use crate::commands::read_input;
use crate::io::open_sink;

/// Summary of one mesh, written whether or not it validates.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub vertices:   usize,
    pub edges:      usize,
    pub half_edges: usize,
    pub faces:      usize,
    pub anomalies:  &'a [Anomaly],
    pub options:    ValidateOptions,
    pub verdict:    Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcel:       Option<&'a Dcel>,
}

#[derive(Debug, Serialize)]
pub struct Verdict {
    pub valid:  bool,
    /// Diagnostic token of the failed check.
    pub token:  Option<&'static str>,
    pub defect: Option<Defect>,
}

impl<'a> Report<'a> {
    pub fn new(dcel: &'a Dcel, options: ValidateOptions, records: bool) -> Self {
        let defect = dcel.validate(&options).err();
        Self {
            vertices:   dcel.num_vertices(),
            edges:      dcel.num_edges(),
            half_edges: dcel.num_half_edges(),
            faces:      dcel.num_faces(),
            anomalies:  dcel.anomalies(),
            options,
            verdict: Verdict {
                valid: defect.is_none(),
                token: defect.as_ref().map(Defect::token),
                defect,
            },
            dcel: records.then_some(dcel),
        }
    }
}

pub fn run(_cli: &Cli, args: &InspectArgs) -> Result<()> {
    let mesh = read_input(&args.input)?;
    let mut sink = open_sink(args.output.as_deref(), args.force)?;

    let dcel = Dcel::from_mesh(&mesh);
    let report = Report::new(&dcel, ValidateOptions { overlap: args.overlap_scan.into() }, args.records);
    info!(valid = report.verdict.valid, anomalies = report.anomalies.len(), "inspected mesh");

    serde_json::to_writer_pretty(&mut sink, &report)
        .context("[commands::inspect] Failed to write report")?;
    writeln!(sink)?;
    sink.finish()
}

#[cfg(test)]
mod tests {
    use dcel::{FaceId, HalfEdgeId, Mesh};
    use geo::Coord;
    use serde_json::json;

    use super::*;

    #[test]
    fn report_of_open_triangle() {
        let mesh = Mesh::new(
            vec![Coord { x: 0, y: 0 }, Coord { x: 2, y: 0 }, Coord { x: 1, y: 2 }],
            vec![vec![0, 1, 2], vec![0, 1]],
        );
        let dcel = Dcel::from_mesh(&mesh);
        let report = Report::new(&dcel, ValidateOptions::default(), false);

        assert!(!report.verdict.valid);
        assert_eq!(report.verdict.token, Some("aberta"));
        assert_eq!(report.verdict.defect, Some(Defect::MissingTwin { half_edge: HalfEdgeId(0) }));
        assert_eq!(report.anomalies, &[Anomaly::DegenerateFace { face: FaceId(1), len: 2 }]);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["half_edges"], json!(3));
        assert_eq!(value["edges"], json!(1));
        assert_eq!(value["options"], json!({ "overlap": "indexed" }));
        assert_eq!(value["verdict"]["defect"], json!({ "kind": "missing_twin", "half_edge": 0 }));
        assert_eq!(value["anomalies"][0], json!({ "kind": "degenerate_face", "face": 1, "len": 2 }));
        assert!(value.get("dcel").is_none());
    }

    #[test]
    fn records_are_optional() {
        let mesh = Mesh::new(
            vec![Coord { x: 0, y: 0 }, Coord { x: 2, y: 0 }, Coord { x: 1, y: 2 }],
            vec![vec![0, 1, 2], vec![0, 2, 1]],
        );
        let dcel = Dcel::from_mesh(&mesh);
        let report = Report::new(&dcel, ValidateOptions::default(), true);
        assert!(report.verdict.valid);
        assert_eq!(report.verdict.token, None);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["dcel"]["half_edges"].as_array().unwrap().len(), 6);
    }
}
