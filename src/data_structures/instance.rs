//! Prop categories and the per-instance transforms placed on the planet.
//!
//! A prop instance is one copy of a category's model sitting on the surface.
//! The model matrix is packed into an [`InstanceRaw`] for GPU instancing so
//! every instance of a category can be drawn in a single call.

use cgmath::{InnerSpace, Matrix3, Matrix4, SquareMatrix};

use crate::render::Vertex;

/// Closed set of things that can be scattered over the planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PropCategory {
    Tree,
    Rock,
    Grass,
    Cloud,
}

/// How a category sits on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryParams {
    /// Distance along the surface normal between vertex and model origin.
    /// Negative values sink the model into the ground.
    pub offset: f32,
    /// Uniform model scale.
    pub scale: f32,
    /// Floating props ignore the sea level.
    pub sea_level_exempt: bool,
}

impl PropCategory {
    /// Scatter order. Instance lists are always rebuilt in this order.
    pub const ALL: [PropCategory; 4] = [
        PropCategory::Tree,
        PropCategory::Rock,
        PropCategory::Grass,
        PropCategory::Cloud,
    ];

    pub const fn params(&self) -> CategoryParams {
        match self {
            PropCategory::Tree => CategoryParams {
                offset: 0.01,
                scale: 0.07,
                sea_level_exempt: false,
            },
            PropCategory::Rock => CategoryParams {
                offset: 0.01,
                scale: 0.2,
                sea_level_exempt: false,
            },
            PropCategory::Grass => CategoryParams {
                offset: -0.025,
                scale: 0.2,
                sea_level_exempt: false,
            },
            PropCategory::Cloud => CategoryParams {
                offset: 0.3,
                scale: 0.001,
                sea_level_exempt: true,
            },
        }
    }

    /// OBJ file under the asset root.
    pub const fn asset_path(&self) -> &'static str {
        match self {
            PropCategory::Tree => "obj/Tree_1_A_Color1.obj",
            PropCategory::Rock => "obj/Rock_3_A_Color1.obj",
            PropCategory::Grass => "obj/Grass_2_C_Color1.obj",
            PropCategory::Cloud => "obj/cloud.obj",
        }
    }

    pub const fn id(&self) -> &'static str {
        match self {
            PropCategory::Tree => "tree",
            PropCategory::Rock => "rock",
            PropCategory::Grass => "grass",
            PropCategory::Cloud => "cloud",
        }
    }
}

/// One placed prop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropInstance {
    pub category: PropCategory,
    pub model: Matrix4<f32>,
}

impl PropInstance {
    pub fn new(category: PropCategory, model: Matrix4<f32>) -> Self {
        Self { category, model }
    }

    /// World-space origin of the model (last column of the model matrix).
    pub fn origin(&self) -> cgmath::Vector3<f32> {
        self.model.w.truncate()
    }

    pub fn to_raw(&self) -> InstanceRaw {
        let m = &self.model;
        // Props are scaled uniformly, so the normalized basis columns are
        // exactly the rotation.
        let normal = Matrix3::from_cols(
            m.x.truncate().normalize(),
            m.y.truncate().normalize(),
            m.z.truncate().normalize(),
        );
        InstanceRaw {
            model: (*m).into(),
            normal: normal.into(),
            handedness: m.determinant().signum(),
        }
    }
}

/// Per-instance record read by the prop shaders.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 3]; 3],
    pub handedness: f32,
}

impl InstanceRaw {
    // Locations 0-4 belong to the per-vertex attributes of the prop mesh.
    const ATTRIBUTES: [wgpu::VertexAttribute; 8] = wgpu::vertex_attr_array![
        5 => Float32x4,
        6 => Float32x4,
        7 => Float32x4,
        8 => Float32x4,
        9 => Float32x3,
        10 => Float32x3,
        11 => Float32x3,
        12 => Float32,
    ];
}

impl Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
