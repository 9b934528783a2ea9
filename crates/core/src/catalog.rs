//! Shape catalog - templates loaded from a shape-set description
//!
//! The description is a whitespace-separated text format:
//!
//! ```text
//! <shape count>
//! for each shape:
//!   <vertex count>   then x y z per vertex
//!   <triangle count> then three vertex indices per triangle
//!   <line count>     then two vertex indices per line
//!   <cube count>     then x y z per cube offset (integral values)
//! ```
//!
//! The catalog only parses text; reading the file is left to the caller.

use std::str::{FromStr, SplitWhitespace};

use glam::{IVec3, Vec3};
use rand::Rng;
use thiserror::Error;

use crate::shape::Shape;

/// Errors produced while parsing a shape-set description
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("shape set contains no shapes")]
    Empty,

    #[error("unexpected end of shape set while reading {what} (token {position})")]
    MissingToken { what: &'static str, position: usize },

    #[error("invalid {what} {token:?} (token {position})")]
    InvalidNumber {
        what: &'static str,
        token: String,
        position: usize,
    },

    #[error("shape {shape}: vertex index {index} out of range ({vertices} vertices)")]
    IndexOutOfRange {
        shape: usize,
        index: u32,
        vertices: usize,
    },

    #[error("shape {shape}: cube offset component {value} is not an integer")]
    NonIntegralOffset { shape: usize, value: f32 },

    #[error("shape {shape} has no cubes")]
    NoCubes { shape: usize },
}

/// Immutable geometry of one shape kind
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeTemplate {
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
    pub lines: Vec<[u32; 2]>,
    pub cubes: Vec<IVec3>,
}

/// Token cursor over the description text
struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            iter: text.split_whitespace(),
            position: 0,
        }
    }

    fn next<T: FromStr>(&mut self, what: &'static str) -> Result<T, CatalogError> {
        let position = self.position;
        let token = self
            .iter
            .next()
            .ok_or(CatalogError::MissingToken { what, position })?;
        self.position += 1;
        token.parse().map_err(|_| CatalogError::InvalidNumber {
            what,
            token: token.to_string(),
            position,
        })
    }

    fn vec3(&mut self, what: &'static str) -> Result<Vec3, CatalogError> {
        Ok(Vec3::new(self.next(what)?, self.next(what)?, self.next(what)?))
    }

    fn indices<const N: usize>(
        &mut self,
        shape: usize,
        vertices: usize,
        what: &'static str,
    ) -> Result<[u32; N], CatalogError> {
        let mut out = [0u32; N];
        for slot in &mut out {
            let index: u32 = self.next(what)?;
            if index as usize >= vertices {
                return Err(CatalogError::IndexOutOfRange {
                    shape,
                    index,
                    vertices,
                });
            }
            *slot = index;
        }
        Ok(out)
    }
}

fn lattice_offset(shape: usize, v: Vec3) -> Result<IVec3, CatalogError> {
    for value in v.to_array() {
        if (value - value.round()).abs() > 1e-4 {
            return Err(CatalogError::NonIntegralOffset { shape, value });
        }
    }
    Ok(v.round().as_ivec3())
}

fn parse_template(tokens: &mut Tokens<'_>, shape: usize) -> Result<ShapeTemplate, CatalogError> {
    let vertex_count: usize = tokens.next("vertex count")?;
    let vertices = (0..vertex_count)
        .map(|_| tokens.vec3("vertex coordinate"))
        .collect::<Result<Vec<_>, _>>()?;

    let triangle_count: usize = tokens.next("triangle count")?;
    let triangles = (0..triangle_count)
        .map(|_| tokens.indices::<3>(shape, vertex_count, "triangle index"))
        .collect::<Result<Vec<_>, _>>()?;

    let line_count: usize = tokens.next("line count")?;
    let lines = (0..line_count)
        .map(|_| tokens.indices::<2>(shape, vertex_count, "line index"))
        .collect::<Result<Vec<_>, _>>()?;

    let cube_count: usize = tokens.next("cube count")?;
    if cube_count == 0 {
        return Err(CatalogError::NoCubes { shape });
    }
    let cubes = (0..cube_count)
        .map(|_| lattice_offset(shape, tokens.vec3("cube offset")?))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ShapeTemplate {
        vertices,
        triangles,
        lines,
        cubes,
    })
}

/// The loaded shape set. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeCatalog {
    templates: Vec<ShapeTemplate>,
}

impl ShapeCatalog {
    /// Parse a shape-set description
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut tokens = Tokens::new(text);
        let count: usize = tokens.next("shape count")?;
        let templates = (0..count)
            .map(|shape| parse_template(&mut tokens, shape))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_templates(templates)
    }

    pub fn from_templates(templates: Vec<ShapeTemplate>) -> Result<Self, CatalogError> {
        if templates.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(shape) = templates.iter().position(|t| t.cubes.is_empty()) {
            return Err(CatalogError::NoCubes { shape });
        }
        Ok(Self { templates })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn templates(&self) -> &[ShapeTemplate] {
        &self.templates
    }

    pub fn template(&self, kind: usize) -> Option<&ShapeTemplate> {
        self.templates.get(kind)
    }

    /// Instantiate a specific template
    pub fn create(&self, kind: usize) -> Option<Shape> {
        self.template(kind).map(|t| Shape::new(kind, &t.cubes))
    }

    /// Instantiate a uniformly chosen template
    pub fn create_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Shape {
        let kind = rng.gen_range(0..self.templates.len());
        Shape::new(kind, &self.templates[kind].cubes)
    }
}
