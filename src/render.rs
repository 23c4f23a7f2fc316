//! Data handed to a GPU renderer.
//!
//! The geometry core never touches pipelines or shaders. What it provides is
//! the vertex/instance records in the layout a shader reads them, plus helpers
//! that copy them into `wgpu` buffers:
//!
//! - `TerrainVertex`: position, normal and the sea/beach/land colour
//! - `InstanceRaw` (in `data_structures::instance`): one per placed prop
//! - `GpuTerrain` / `upload_instances`: buffer creation on a device

use std::collections::BTreeMap;

use wgpu::util::DeviceExt;

use crate::data_structures::{
    instance::{InstanceRaw, PropCategory, PropInstance},
    terrain::Terrain,
};

/// Width of the beach strip above sea level.
pub const BEACH_WIDTH: f32 = 0.05;

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Surface class of a vertex relative to sea level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Sea,
    Beach,
    Land,
}

impl Band {
    pub fn classify(height: f32, sea_level: f32) -> Self {
        if height < sea_level {
            Band::Sea
        } else if height < sea_level + BEACH_WIDTH {
            Band::Beach
        } else {
            Band::Land
        }
    }

    pub const fn color(&self) -> [f32; 4] {
        match self {
            Band::Sea => [0.0, 0.3, 0.7, 1.0],
            Band::Beach => [0.9, 0.8, 0.6, 1.0],
            Band::Land => [0.1, 0.6, 0.2, 1.0],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex for TerrainVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<TerrainVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Interleaved vertices, coloured for `sea_level`.
pub fn terrain_vertices(terrain: &Terrain, sea_level: f32) -> Vec<TerrainVertex> {
    (0..terrain.vertex_count())
        .map(|i| TerrainVertex {
            position: terrain.position(i).into(),
            normal: terrain.normal(i).into(),
            color: Band::classify(terrain.height(i), sea_level).color(),
        })
        .collect()
}

/// Raw instances bucketed per category, one bucket per instanced draw.
pub fn instances_by_category(
    instances: &[PropInstance],
) -> BTreeMap<PropCategory, Vec<InstanceRaw>> {
    let mut buckets: BTreeMap<PropCategory, Vec<InstanceRaw>> = BTreeMap::new();
    for instance in instances {
        buckets
            .entry(instance.category)
            .or_default()
            .push(instance.to_raw());
    }
    buckets
}

#[derive(Debug)]
pub struct GpuTerrain {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl GpuTerrain {
    pub fn upload(device: &wgpu::Device, terrain: &Terrain, sea_level: f32) -> Self {
        let vertices = terrain_vertices(terrain, sea_level);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Planet Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Planet Index Buffer"),
            contents: bytemuck::cast_slice(terrain.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            num_elements: terrain.indices().len() as u32,
        }
    }
}

pub fn upload_instances(device: &wgpu::Device, category: PropCategory, raw: &[InstanceRaw]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(&format!("{} Instance Buffer", category.id())),
        contents: bytemuck::cast_slice(raw),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    })
}
