/// OBJ subset parser: positions, normals, texcoords, triangle/quad faces, groups
use nalgebra::{Vector2, Vector3};
use nom::{
    bytes::complete::tag,
    character::complete::{char, space1, u32},
    combinator::{all_consuming, map, opt, rest, verify},
    multi::separated_list1,
    number::complete::float,
    sequence::{preceded, tuple},
    IResult,
};
use tracing::{debug, warn};

use crate::error::MeshError;
use crate::geometry::{Face, FaceRef, ObjDocument};

/// What to do with a line that fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParsePolicy {
    /// Abort the whole load on the first malformed line.
    #[default]
    Strict,
    /// Skip malformed lines, logging a warning for each.
    Lenient,
}

/// Options controlling a mesh load.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub policy: ParsePolicy,
}

impl LoadOptions {
    pub fn lenient() -> Self {
        Self {
            policy: ParsePolicy::Lenient,
        }
    }
}

/// One classified source line.
#[derive(Debug, PartialEq)]
enum Record<'a> {
    Position(Vector3<f32>),
    Normal(Vector3<f32>),
    TexCoord(Vector2<f32>),
    Face(Vec<(u32, u32, u32)>),
    Group(Option<&'a str>),
}

/// Parse OBJ text into raw attributes and submeshes.
pub fn parse_obj(input: &str, policy: ParsePolicy) -> Result<ObjDocument, MeshError> {
    let mut doc = ObjDocument::new();
    let mut skipped = 0usize;

    for (index, text) in input.lines().enumerate() {
        let line = index + 1;
        let result = parse_line(text).and_then(|record| match record {
            Some(record) => apply(&mut doc, record),
            None => Ok(()),
        });

        if let Err(reason) = result {
            match policy {
                ParsePolicy::Strict => return Err(MeshError::Parse { line, reason }),
                ParsePolicy::Lenient => {
                    warn!(line, %reason, "skipping malformed OBJ line");
                    skipped += 1;
                }
            }
        }
    }

    debug!(
        positions = doc.attributes.positions.len(),
        normals = doc.attributes.normals.len(),
        texcoords = doc.attributes.texcoords.len(),
        submeshes = doc.submeshes.len(),
        skipped,
        "parsed OBJ document"
    );
    Ok(doc)
}

fn apply(doc: &mut ObjDocument, record: Record<'_>) -> Result<(), String> {
    match record {
        Record::Position(p) => doc.attributes.positions.push(p),
        Record::Normal(n) => doc.attributes.normals.push(n),
        Record::TexCoord(t) => doc.attributes.texcoords.push(t),
        Record::Face(refs) => doc.add_face(build_face(&refs)?),
        Record::Group(name) => {
            if let Some(name) = name {
                debug!(group = name, "group marker");
            }
            doc.begin_group();
        }
    }
    Ok(())
}

/// Classify a line. Blank lines and comments yield `None`.
fn parse_line(line: &str) -> Result<Option<Record<'_>>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let keyword = line.split_whitespace().next().unwrap_or_default();
    let parsed = match keyword {
        "v" => all_consuming(parse_position)(line),
        "vn" => all_consuming(parse_normal)(line),
        "vt" => all_consuming(parse_texcoord)(line),
        "f" => all_consuming(parse_face)(line),
        "g" => all_consuming(parse_group)(line),
        other => return Err(format!("unrecognized record `{}`", other)),
    };

    match parsed {
        Ok((_, record)) => Ok(Some(record)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(format!(
            "malformed `{}` record near `{}`",
            keyword, e.input
        )),
        Err(nom::Err::Incomplete(_)) => Err(format!("truncated `{}` record", keyword)),
    }
}

/// A float that is neither NaN nor infinite.
fn finite_float(input: &str) -> IResult<&str, f32> {
    verify(float, |v: &f32| v.is_finite())(input)
}

fn parse_vector3(input: &str) -> IResult<&str, Vector3<f32>> {
    map(
        tuple((
            preceded(space1, finite_float),
            preceded(space1, finite_float),
            preceded(space1, finite_float),
        )),
        |(x, y, z)| Vector3::new(x, y, z),
    )(input)
}

fn parse_position(input: &str) -> IResult<&str, Record<'_>> {
    map(preceded(tag("v"), parse_vector3), Record::Position)(input)
}

fn parse_normal(input: &str) -> IResult<&str, Record<'_>> {
    map(preceded(tag("vn"), parse_vector3), Record::Normal)(input)
}

/// `vt u v [w]`; a third component is accepted and dropped.
fn parse_texcoord(input: &str) -> IResult<&str, Record<'_>> {
    map(
        preceded(
            tag("vt"),
            tuple((
                preceded(space1, finite_float),
                preceded(space1, finite_float),
                opt(preceded(space1, finite_float)),
            )),
        ),
        |(u, v, _)| Record::TexCoord(Vector2::new(u, v)),
    )(input)
}

fn parse_face_ref(input: &str) -> IResult<&str, (u32, u32, u32)> {
    tuple((u32, preceded(char('/'), u32), preceded(char('/'), u32)))(input)
}

fn parse_face(input: &str) -> IResult<&str, Record<'_>> {
    map(
        preceded(tuple((tag("f"), space1)), separated_list1(space1, parse_face_ref)),
        Record::Face,
    )(input)
}

fn parse_group(input: &str) -> IResult<&str, Record<'_>> {
    map(
        preceded(tag("g"), opt(preceded(space1, rest))),
        |name: Option<&str>| Record::Group(name.map(str::trim).filter(|n| !n.is_empty())),
    )(input)
}

/// Check arity and convert 1-based indices to 0-based.
fn build_face(refs: &[(u32, u32, u32)]) -> Result<Face, String> {
    let corners = refs
        .iter()
        .map(|&(p, t, n)| Ok(FaceRef::new(zero_based(p)?, zero_based(t)?, zero_based(n)?)))
        .collect::<Result<Vec<_>, String>>()?;

    match corners.as_slice() {
        &[c0, c1, c2] => Ok(Face::Triangle([c0, c1, c2])),
        &[c0, c1, c2, c3] => Ok(Face::Quad([c0, c1, c2, c3])),
        _ => Err(format!(
            "face has {} vertices, only triangles and quads are supported",
            corners.len()
        )),
    }
}

fn zero_based(index: u32) -> Result<usize, String> {
    match index {
        0 => Err("face index 0 is invalid, indices start at 1".to_string()),
        i => Ok(i as usize - 1),
    }
}
