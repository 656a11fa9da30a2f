/// Command-line front end: argument parsing and report formatting
use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Parser;
use meshpipe_core::{Camera, LoadOptions, MatrixSet, Mesh, Pose};
use nalgebra::{Matrix4, Vector3};

/// Load an OBJ file and print its vertex stream and transforms.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "meshpipe", version)]
pub struct Args {
    /// Path to the OBJ file.
    pub path: PathBuf,

    /// Skip malformed lines instead of aborting the load.
    #[arg(long)]
    pub lenient: bool,

    /// Object position as `x,y,z`.
    #[arg(long, value_parser = parse_vector, default_value = "0,0,0", allow_hyphen_values = true)]
    pub position: Vector3<f32>,

    /// Object scale as `x,y,z`; every component must be nonzero.
    #[arg(long, value_parser = parse_vector, default_value = "1,1,1", allow_hyphen_values = true)]
    pub scale: Vector3<f32>,

    /// Rotation about the vertical axis, in degrees.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub orientation: f32,

    /// Camera aspect ratio (width / height).
    #[arg(long, default_value_t = 1.0)]
    pub aspect: f32,
}

impl Args {
    pub fn pose(&self) -> Pose {
        Pose::new(self.position, self.scale, self.orientation)
    }

    pub fn load_options(&self) -> LoadOptions {
        if self.lenient {
            LoadOptions::lenient()
        } else {
            LoadOptions::default()
        }
    }

    pub fn camera(&self) -> Camera {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(self.aspect);
        camera
    }
}

/// Parse `x,y,z`.
pub fn parse_vector(text: &str) -> Result<Vector3<f32>, String> {
    let parts = text
        .split(',')
        .map(|p| p.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid vector `{}`: {}", text, e))?;
    match parts.as_slice() {
        &[x, y, z] => Ok(Vector3::new(x, y, z)),
        _ => Err(format!(
            "expected three comma-separated values, got `{}`",
            text
        )),
    }
}

/// Human-readable summary of a loaded mesh and its matrix set.
pub fn report(mesh: &Mesh, matrices: &MatrixSet) -> String {
    let stream = mesh.stream();
    let attrs = mesh.attributes();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "attributes: {} positions, {} texcoords, {} normals",
        attrs.positions.len(),
        attrs.texcoords.len(),
        attrs.normals.len()
    );
    let _ = writeln!(
        out,
        "submeshes: {} ({} faces)",
        mesh.submeshes().len(),
        mesh.submeshes().iter().map(|s| s.faces.len()).sum::<usize>()
    );
    let _ = writeln!(
        out,
        "triangles: {} (positions {}, texcoords {}, normals {})",
        stream.triangle_count,
        stream.positions.len(),
        stream.texcoords.len(),
        stream.normals.len()
    );

    for (name, m) in [
        ("M", &matrices.model),
        ("InvM", &matrices.inverse_model),
        ("View", &matrices.view),
        ("Projection", &matrices.projection),
        ("MVP", &matrices.mvp),
        ("VP", &matrices.vp),
    ] {
        let _ = writeln!(out, "{}:", name);
        write_matrix(&mut out, m);
    }
    out
}

fn write_matrix(out: &mut String, m: &Matrix4<f32>) {
    for row in m.row_iter() {
        let cells: Vec<String> = row.iter().map(|c| format!("{:>10.4}", c)).collect();
        let _ = writeln!(out, "  [{}]", cells.join(" "));
    }
}
