use anyhow::Context;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Errors produced while parsing or normalizing a model file. File-open
/// failures surface through `anyhow` at the call site instead.
#[derive(Debug)]
pub enum MeshError {
    Degenerate(String),
    Malformed { line: usize, reason: String },
    IndexOutOfBounds { index: u32, vertex_count: usize },
    Io(std::io::Error),
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Degenerate(reason) => write!(f, "degenerate mesh: {}", reason),
            MeshError::Malformed { line, reason } => {
                write!(f, "malformed record on line {}: {}", line, reason)
            }
            MeshError::IndexOutOfBounds {
                index,
                vertex_count,
            } => write!(
                f,
                "face index {} out of bounds for {} vertices",
                index, vertex_count
            ),
            MeshError::Io(err) => write!(f, "io error while reading model: {}", err),
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MeshError {
    fn from(err: std::io::Error) -> Self {
        MeshError::Io(err)
    }
}

/// A triangle mesh with positions, a parallel normal stream and a model
/// transform. Vertex data is only ever mutated by the one-time
/// center/scale pass at load; interaction goes through `to_world`.
#[derive(Debug)]
pub struct Mesh {
    pub vertices: Vec<na::Point3<f32>>,
    pub normals: Vec<na::Vector3<f32>>,
    pub indices: Vec<u32>,
    pub to_world: glm::Mat4,
    pub centroid: na::Point3<f32>,
}

impl Mesh {
    /// Loads and normalizes a model. The caller decides whether a failure
    /// here is fatal; the viewer treats it as such.
    pub fn load(log: &slog::Logger, path: &Path) -> anyhow::Result<Mesh> {
        let log = log.new(o!("module" => "mesh"));
        let file = File::open(path)
            .with_context(|| format!("could not open model file {}", path.display()))?;

        info!(log, "parsing model"; "path" => %path.display());
        let mut mesh = Mesh::from_reader(&log, BufReader::new(file))?;
        mesh.normalize()?;
        info!(log, "model loaded";
            "vertices" => mesh.vertices.len(),
            "normals" => mesh.normals.len(),
            "triangles" => mesh.indices.len() / 3);

        Ok(mesh)
    }

    /// Parses the line-oriented geometry format. Records are classified by
    /// their first two bytes:
    ///
    /// - `v ` — position plus a vertex-color triple (consumed, discarded)
    /// - `vn` — normal
    /// - a leading `f` — triangle of 1-based `vertex//discarded` corners
    ///
    /// Unrecognized tags are skipped leniently with a per-line diagnostic.
    /// A recognized tag whose body does not match its fixed field pattern
    /// is an error rather than a silent desync.
    pub fn from_reader<R: BufRead>(log: &slog::Logger, reader: R) -> Result<Mesh, MeshError> {
        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        let mut indices = Vec::new();

        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = i + 1;
            let bytes = line.as_bytes();
            let c1 = bytes.first().copied().unwrap_or(b'\0');
            let c2 = bytes.get(1).copied().unwrap_or(b'\0');
            let body = line.get(2..).unwrap_or("");

            if c1 == b'v' && c2 == b' ' {
                let fields = parse_floats(body, 6, line_no)?;
                vertices.push(na::Point3::new(fields[0], fields[1], fields[2]));
            } else if c1 == b'v' && c2 == b'n' {
                let fields = parse_floats(body, 3, line_no)?;
                normals.push(na::Vector3::new(fields[0], fields[1], fields[2]));
            } else if c1 == b'f' || c2 == b'f' {
                let corners: Vec<&str> = body.split_whitespace().collect();
                if corners.len() != 3 {
                    return Err(MeshError::Malformed {
                        line: line_no,
                        reason: format!("expected 3 face corners, found {}", corners.len()),
                    });
                }
                for corner in corners {
                    indices.push(parse_corner(corner, line_no)?);
                }
            } else if !line.trim().is_empty() {
                debug!(log, "skipping unrecognized record"; "line" => line_no);
            }
        }

        // Face indices are never assumed valid, they are checked up front.
        if let Some(&index) = indices.iter().find(|&&ix| ix as usize >= vertices.len()) {
            return Err(MeshError::IndexOutOfBounds {
                index,
                vertex_count: vertices.len(),
            });
        }

        Ok(Mesh {
            vertices,
            normals,
            indices,
            to_world: glm::Mat4::identity(),
            centroid: na::Point3::origin(),
        })
    }

    /// Centers the bounding-box midpoint on the origin, then rescales so the
    /// largest coordinate magnitude is exactly 1. Runs once at load time;
    /// later interaction only touches `to_world`.
    pub fn normalize(&mut self) -> Result<(), MeshError> {
        self.center()?;
        self.scale_to_unit()
    }

    fn center(&mut self) -> Result<(), MeshError> {
        let first = *self
            .vertices
            .first()
            .ok_or_else(|| MeshError::Degenerate("mesh has no vertices".to_string()))?;

        let mut min = first;
        let mut max = first;
        for v in &self.vertices[1..] {
            min.x = min.x.min(v.x);
            min.y = min.y.min(v.y);
            min.z = min.z.min(v.z);
            max.x = max.x.max(v.x);
            max.y = max.y.max(v.y);
            max.z = max.z.max(v.z);
        }

        self.centroid = na::center(&min, &max);
        let offset = self.centroid.coords;
        for v in &mut self.vertices {
            *v -= offset;
        }

        Ok(())
    }

    fn scale_to_unit(&mut self) -> Result<(), MeshError> {
        // Re-centering here is idempotent after center() already ran.
        self.center()?;

        let extent = self.vertices.iter().fold(0.0f32, |acc, v| {
            acc.max(v.x.abs()).max(v.y.abs()).max(v.z.abs())
        });
        if extent <= f32::EPSILON {
            return Err(MeshError::Degenerate(format!(
                "extent {} is too small to scale",
                extent
            )));
        }

        for v in &mut self.vertices {
            v.coords /= extent;
        }

        Ok(())
    }

    pub fn translate_x(&mut self, amount: f32) {
        self.to_world = glm::translation(&glm::vec3(amount, 0.0, 0.0)) * self.to_world;
    }

    pub fn translate_y(&mut self, amount: f32) {
        self.to_world = glm::translation(&glm::vec3(0.0, amount, 0.0)) * self.to_world;
    }

    pub fn translate_z(&mut self, amount: f32) {
        self.to_world = glm::translation(&glm::vec3(0.0, 0.0, amount)) * self.to_world;
    }

    /// Rotations accumulate pre-multiplied, i.e. in world space.
    pub fn rotate(&mut self, angle: f32, axis: &glm::Vec3) {
        self.to_world = glm::rotation(angle, axis) * self.to_world;
    }

    pub fn scale_by(&mut self, factor: f32) {
        self.to_world = glm::scaling(&glm::vec3(factor, factor, factor)) * self.to_world;
    }

    pub fn reset(&mut self) {
        self.to_world = glm::Mat4::identity();
    }
}

fn parse_floats(body: &str, count: usize, line_no: usize) -> Result<Vec<f32>, MeshError> {
    let fields: Vec<&str> = body.split_whitespace().collect();
    if fields.len() != count {
        return Err(MeshError::Malformed {
            line: line_no,
            reason: format!("expected {} fields, found {}", count, fields.len()),
        });
    }
    fields
        .iter()
        .map(|field| {
            field.parse::<f32>().map_err(|_| MeshError::Malformed {
                line: line_no,
                reason: format!("invalid float `{}`", field),
            })
        })
        .collect()
}

fn parse_corner(field: &str, line_no: usize) -> Result<u32, MeshError> {
    let malformed = |reason: String| MeshError::Malformed {
        line: line_no,
        reason,
    };

    let (vertex, rest) = field
        .split_once("//")
        .ok_or_else(|| malformed(format!("face corner `{}` is not of the form int//int", field)))?;
    let vertex = vertex
        .parse::<u32>()
        .map_err(|_| malformed(format!("invalid face index `{}`", vertex)))?;
    // The second index is a per-corner placeholder, parsed only to keep the
    // record aligned.
    rest.parse::<u32>()
        .map_err(|_| malformed(format!("invalid face index `{}`", rest)))?;

    if vertex == 0 {
        return Err(malformed("face indices are 1-based".to_string()));
    }

    Ok(vertex - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn test_log() -> slog::Logger {
        slog::Logger::root(slog::Discard, o!())
    }

    fn parse(input: &str) -> Result<Mesh, MeshError> {
        Mesh::from_reader(&test_log(), Cursor::new(input))
    }

    fn mesh_with_vertices(vertices: Vec<na::Point3<f32>>) -> Mesh {
        Mesh {
            vertices,
            normals: vec![],
            indices: vec![],
            to_world: glm::Mat4::identity(),
            centroid: na::Point3::origin(),
        }
    }

    #[test]
    fn test_parse_triangle() {
        let mesh = parse(
            "v 0.0 0.0 0.0 0.5 0.5 0.5\n\
             v 1.0 0.0 0.0 0.5 0.5 0.5\n\
             v 0.0 1.0 0.0 0.5 0.5 0.5\n\
             vn 0.0 0.0 1.0\n\
             f 1//0 2//0 3//0\n",
        )
        .unwrap();

        assert_eq!(mesh.vertices.len(), 3);
        assert_eq!(mesh.normals.len(), 1);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        approx::assert_relative_eq!(mesh.vertices[1], na::Point3::new(1.0, 0.0, 0.0));
        approx::assert_relative_eq!(mesh.normals[0], na::Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_parse_skips_unrecognized_records() {
        let mesh = parse(
            "# comment line\n\
             g bunny\n\
             s off\n\
             vt 0.0 0.0\n\
             v 0.0 0.0 0.0 1.0 1.0 1.0\n",
        )
        .unwrap();

        assert_eq!(mesh.vertices.len(), 1);
        assert!(mesh.normals.is_empty());
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn test_parse_rejects_short_vertex_record() {
        let err = parse("v 0.0 0.0 0.0\n").unwrap_err();
        assert!(matches!(err, MeshError::Malformed { line: 1, .. }));
    }

    #[test]
    fn test_parse_rejects_zero_face_index() {
        let err = parse("v 0.0 0.0 0.0 0.0 0.0 0.0\nf 0//0 1//0 1//0\n").unwrap_err();
        assert!(matches!(err, MeshError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_parse_rejects_out_of_bounds_face_index() {
        let err = parse(
            "v 0.0 0.0 0.0 0.0 0.0 0.0\n\
             v 1.0 0.0 0.0 0.0 0.0 0.0\n\
             f 1//0 2//0 3//0\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            MeshError::IndexOutOfBounds {
                index: 2,
                vertex_count: 2
            }
        ));
    }

    #[test]
    fn test_center_subtracts_bounding_box_midpoint() {
        let mut mesh = mesh_with_vertices(vec![
            na::Point3::new(-2.0, -2.0, -2.0),
            na::Point3::new(4.0, 4.0, 4.0),
            na::Point3::new(1.0, -2.0, 4.0),
        ]);
        mesh.center().unwrap();

        approx::assert_relative_eq!(mesh.centroid, na::Point3::new(1.0, 1.0, 1.0));
        approx::assert_relative_eq!(mesh.vertices[0], na::Point3::new(-3.0, -3.0, -3.0));
        approx::assert_relative_eq!(mesh.vertices[1], na::Point3::new(3.0, 3.0, 3.0));
        approx::assert_relative_eq!(mesh.vertices[2], na::Point3::new(0.0, -3.0, 3.0));
    }

    #[test]
    fn test_scale_divides_by_largest_magnitude() {
        let mut mesh = mesh_with_vertices(vec![
            na::Point3::new(-3.0, 0.0, 0.0),
            na::Point3::new(3.0, 1.5, -0.75),
        ]);
        mesh.scale_to_unit().unwrap();

        let extent = mesh.vertices.iter().fold(0.0f32, |acc, v| {
            acc.max(v.x.abs()).max(v.y.abs()).max(v.z.abs())
        });
        approx::assert_relative_eq!(extent, 1.0);
        approx::assert_relative_eq!(mesh.vertices[1], na::Point3::new(1.0, 0.25, -0.125));
    }

    #[test]
    fn test_normalize_rejects_single_point() {
        let mut mesh = mesh_with_vertices(vec![na::Point3::new(0.0, 0.0, 0.0)]);
        let err = mesh.normalize().unwrap_err();
        assert!(matches!(err, MeshError::Degenerate(_)));
        assert!(mesh.vertices[0].x.is_finite());
    }

    #[test]
    fn test_normalize_rejects_empty_mesh() {
        let mut mesh = mesh_with_vertices(vec![]);
        assert!(matches!(
            mesh.normalize().unwrap_err(),
            MeshError::Degenerate(_)
        ));
    }

    #[test]
    fn test_transforms_accumulate_in_world_space() {
        let mut mesh = mesh_with_vertices(vec![na::Point3::new(0.0, 0.0, 0.0)]);
        mesh.translate_x(2.0);
        mesh.rotate(std::f32::consts::FRAC_PI_2, &glm::vec3(0.0, 1.0, 0.0));

        // The rotation is applied about the world origin, carrying the
        // earlier translation with it.
        let moved = mesh.to_world * glm::vec4(0.0, 0.0, 0.0, 1.0);
        approx::assert_relative_eq!(moved, glm::vec4(0.0, 0.0, -2.0, 1.0), epsilon = 0.000_001);
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut mesh = mesh_with_vertices(vec![na::Point3::new(0.0, 0.0, 0.0)]);
        mesh.translate_y(3.0);
        mesh.rotate(1.2, &glm::vec3(1.0, 0.0, 0.0));
        mesh.scale_by(0.5);
        mesh.translate_z(-7.0);
        mesh.reset();

        approx::assert_relative_eq!(mesh.to_world, glm::Mat4::identity());
    }
}
