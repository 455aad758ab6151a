use std::collections::HashSet;
use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::coords::ColorRgba;

/// How index pairs/triples are assembled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Topology {
    Triangles,
    Lines,
}

/// Vertex layout shared by every pipeline (36 bytes):
///
///  offset  0  position  [f32; 3]  loc 0
///  offset 12  normal    [f32; 3]  loc 1
///  offset 24  color     [f32; 3]  loc 2
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x3  // color
    ];

    #[inline]
    fn lit(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color: [1.0; 3],
        }
    }

    #[inline]
    fn colored(position: Vec3, color: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            normal: [0.0; 3],
            color,
        }
    }

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Indexed vertex data in object space.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub topology: Topology,
}

impl Geometry {
    /// Axis-aligned box centered on the origin, four vertices per face.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) * 0.5;

        // (normal, u, v) with u × v = normal so the quads wind counter-clockwise from outside.
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);

        for (normal, u, v) in faces {
            let base = vertices.len() as u32;
            for (su, sv) in [(-1.0f32, -1.0f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                let corner = (normal + u * su + v * sv) * half;
                vertices.push(Vertex::lit(corner, normal));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }

        Self { vertices, indices, topology: Topology::Triangles }
    }

    /// UV sphere centered on the origin.
    ///
    /// Segment counts are raised to the smallest closed shape (3 around, 2 down).
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);
        let row = ws + 1;

        let mut vertices = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
        for iy in 0..=hs {
            let v = iy as f32 / hs as f32;
            for ix in 0..=ws {
                let u = ix as f32 / ws as f32;
                let dir = Vec3::new(
                    -(u * TAU).cos() * (v * PI).sin(),
                    (v * PI).cos(),
                    (u * TAU).sin() * (v * PI).sin(),
                );
                vertices.push(Vertex::lit(dir * radius, dir.normalize_or_zero()));
            }
        }

        let mut indices = Vec::new();
        for iy in 0..hs {
            for ix in 0..ws {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                // Pole rows collapse to a single triangle per segment.
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != hs - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self { vertices, indices, topology: Topology::Triangles }
    }

    /// Rectangle in the XY plane facing +Z.
    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        let vertices = [
            Vec3::new(-hw, hh, 0.0),
            Vec3::new(hw, hh, 0.0),
            Vec3::new(-hw, -hh, 0.0),
            Vec3::new(hw, -hh, 0.0),
        ]
        .into_iter()
        .map(|p| Vertex::lit(p, Vec3::Z))
        .collect();

        Self {
            vertices,
            indices: vec![0, 2, 1, 2, 3, 1],
            topology: Topology::Triangles,
        }
    }

    /// Square grid of lines on the XZ plane with `divisions + 1` lines per direction.
    ///
    /// With an odd `divisions` no line passes through the origin, so none gets the center color.
    pub fn grid(size: f32, divisions: u32, center: ColorRgba, lines: ColorRgba) -> Self {
        let divisions = divisions.max(1);
        let half = size * 0.5;
        let step = size / divisions as f32;
        let center_index = (divisions % 2 == 0).then_some(divisions / 2);

        let mut vertices = Vec::with_capacity(4 * (divisions as usize + 1));
        for i in 0..=divisions {
            let k = -half + i as f32 * step;
            let color = if Some(i) == center_index { center.rgb() } else { lines.rgb() };

            vertices.push(Vertex::colored(Vec3::new(-half, 0.0, k), color));
            vertices.push(Vertex::colored(Vec3::new(half, 0.0, k), color));
            vertices.push(Vertex::colored(Vec3::new(k, 0.0, -half), color));
            vertices.push(Vertex::colored(Vec3::new(k, 0.0, half), color));
        }

        Self::line_list(vertices)
    }

    /// Three segments from the origin: X red, Y green, Z blue.
    pub fn axes(size: f32) -> Self {
        let vertices = vec![
            Vertex::colored(Vec3::ZERO, [1.0, 0.0, 0.0]),
            Vertex::colored(Vec3::X * size, [1.0, 0.6, 0.0]),
            Vertex::colored(Vec3::ZERO, [0.0, 1.0, 0.0]),
            Vertex::colored(Vec3::Y * size, [0.6, 1.0, 0.0]),
            Vertex::colored(Vec3::ZERO, [0.0, 0.0, 1.0]),
            Vertex::colored(Vec3::Z * size, [0.0, 0.6, 1.0]),
        ];
        Self::line_list(vertices)
    }

    /// Unique triangle edges as a line list. Line geometry is returned unchanged.
    pub fn wireframe(&self) -> Self {
        if self.topology == Topology::Lines {
            return self.clone();
        }

        let mut seen = HashSet::new();
        let mut indices = Vec::new();
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                if seen.insert((a.min(b), a.max(b))) {
                    indices.extend_from_slice(&[a, b]);
                }
            }
        }

        Self {
            vertices: self.vertices.clone(),
            indices,
            topology: Topology::Lines,
        }
    }

    /// Number of lines or triangles described by the index buffer.
    pub fn primitive_count(&self) -> usize {
        match self.topology {
            Topology::Triangles => self.indices.len() / 3,
            Topology::Lines => self.indices.len() / 2,
        }
    }

    /// Object-space bounding box `(min, max)`; `None` for empty geometry.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.vertices.iter().map(|v| Vec3::from_array(v.position));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    fn line_list(vertices: Vec<Vertex>) -> Self {
        let indices = (0..vertices.len() as u32).collect();
        Self { vertices, indices, topology: Topology::Lines }
    }
}
