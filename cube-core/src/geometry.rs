/// Geometry primitives for drawing cubelets
use nalgebra::{Point3, Vector3};

use crate::cube::Face;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle on one face of a cubelet
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    /// Which sticker this triangle belongs to
    pub face: Face,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex, face: Face) -> Self {
        Self {
            vertices: [v0, v1, v2],
            face,
        }
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// One cubelet centred on the origin: two counter-clockwise triangles per face
    pub fn cubelet(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::with_capacity(12);

        for face in Face::ALL {
            let normal: Vector3<f32> = face.normal().cast();
            // any tangent will do; u x v == normal keeps the winding outward
            let u = if normal.x.abs() > 0.5 {
                Vector3::y()
            } else {
                Vector3::x()
            };
            let v = normal.cross(&u);

            let centre = Point3::from(normal * half);
            let corner = |su: f32, sv: f32| {
                Vertex::new(centre + u * (su * half) + v * (sv * half), normal)
            };
            let (a, b, c, d) = (
                corner(-1.0, -1.0),
                corner(1.0, -1.0),
                corner(1.0, 1.0),
                corner(-1.0, 1.0),
            );

            mesh.add_triangle(Triangle::new(a, b, c, face));
            mesh.add_triangle(Triangle::new(a, c, d, face));
        }

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubelet_mesh() {
        let mesh = Mesh::cubelet(1.0);
        assert_eq!(mesh.triangles.len(), 12);

        for face in Face::ALL {
            let count = mesh.triangles.iter().filter(|t| t.face == face).count();
            assert_eq!(count, 2);
        }
    }

    #[test]
    fn test_cubelet_winding_faces_outward() {
        let mesh = Mesh::cubelet(2.0);
        for triangle in &mesh.triangles {
            let expected: Vector3<f32> = triangle.face.normal().cast();
            assert!((triangle.calculate_normal() - expected).norm() < 1e-6);
            for vertex in &triangle.vertices {
                assert!(vertex.position.coords.amax() <= 1.0 + 1e-6);
                assert!((vertex.position.coords.dot(&expected) - 1.0).abs() < 1e-6);
            }
        }
    }
}
