//! Loading prop geometry from OBJ/MTL files.
//!
//! Only what the CPU side needs is kept: positions, normals, indices and the
//! diffuse colour of each part. Texture images are left to the renderer.

use std::{
    io::{BufReader, Cursor},
    path::Path,
};

use crate::data_structures::instance::PropCategory;

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// One mesh of an OBJ file with its material colour resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PropPart {
    pub name: String,
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
    /// RGB diffuse plus dissolve as alpha, white when there is no material.
    pub diffuse: [f32; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropModel {
    pub category: Option<PropCategory>,
    pub parts: Vec<PropPart>,
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    let path = Path::new("./").join("assets").join(file_name);
    Ok(std::fs::read_to_string(path)?)
}

/// Load the model of `category` from `./assets`.
pub async fn load_prop_model(category: PropCategory) -> anyhow::Result<PropModel> {
    let file_name = category.asset_path();
    let obj_text = load_string(file_name).await?;
    let mut model = parse_prop_model(file_name, &obj_text).await?;
    model.category = Some(category);
    Ok(model)
}

/// Parse OBJ text. `mtllib` references are resolved next to `file_name`.
pub async fn parse_prop_model(file_name: &str, obj_text: &str) -> anyhow::Result<PropModel> {
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));
    let base_dir = Path::new(file_name)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let (models, obj_materials) = tobj::load_obj_buf_async(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| {
            let mtl_path = base_dir.join(p);
            async move {
                let mtl_path = mtl_path.to_string_lossy();
                match load_string(&mtl_path).await {
                    Ok(mat_text) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(mat_text))),
                    Err(e) => {
                        log::warn!("Material library {mtl_path} could not be read: {e}");
                        Err(tobj::LoadError::OpenFileFailed)
                    }
                }
            }
        },
    )
    .await?;

    let materials = obj_materials.unwrap_or_else(|e| {
        log::warn!("{file_name} is drawn without materials: {e}");
        Vec::new()
    });

    let parts = models
        .into_iter()
        .map(|m| {
            let diffuse = m
                .mesh
                .material_id
                .and_then(|id| materials.get(id))
                .map(|mat| match mat.diffuse {
                    Some([r, g, b]) => [r, g, b, mat.dissolve.unwrap_or(1.0)],
                    None => WHITE,
                })
                .unwrap_or(WHITE);
            PropPart {
                name: m.name,
                positions: m.mesh.positions,
                normals: m.mesh.normals,
                indices: m.mesh.indices,
                diffuse,
            }
        })
        .collect();

    Ok(PropModel {
        category: None,
        parts,
    })
}
