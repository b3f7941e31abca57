use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};

use super::error::ProtocolError;

/// A colormap lookup table sent with `add_colormap`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorMap {
    #[serde(rename = "R")]
    pub r: Vec<f64>,
    #[serde(rename = "G")]
    pub g: Vec<f64>,
    #[serde(rename = "B")]
    pub b: Vec<f64>,
    #[serde(rename = "A")]
    pub a: Vec<f64>,
    #[serde(rename = "I")]
    pub i: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

/// Imperative command sent by the host to the renderer.
///
/// On the wire an op is `{"type": <name>, "data": [<positional args>]}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum CustomOp {
    SaveDocument { file_name: String, compress: bool },
    SaveHtml { file_name: String, canvas_id: String },
    SaveImage {
        file_name: String,
        save_drawing: bool,
        volume_index: i64,
    },
    SaveScene { file_name: String },
    AddColormap { name: String, colormap: ColorMap },
    SetGamma { gamma: f64 },
    ResizeListener,
    DrawScene,
    UpdateGlVolume,
    SetVolumeRenderIllumination { gradient_amount: f64 },
    LoadPngAsTexture { png_url: String, texture_num: i64 },
    SetRenderAzimuthElevation { azimuth: f64, elevation: f64 },
    SetInterpolation { is_nearest: bool },
    SetDrawingEnabled { enabled: bool },
    DrawOtsu { levels: i64 },
    DrawGrowCut,
    MoveCrosshairInVox { x: f64, y: f64, z: f64 },
    RemoveHaze { level: i64, volume_index: i64 },
    DrawUndo,
    CloseDrawing,
    LoadDrawingFromUrl { url: String, binarize: bool },
}

#[derive(Deserialize)]
struct RawOp {
    #[serde(rename = "type")]
    op_type: String,
    #[serde(default)]
    data: Value,
}

fn args<T: DeserializeOwned>(op_type: &str, data: Value) -> Result<T, ProtocolError> {
    serde_json::from_value(data).map_err(|error| ProtocolError::MalformedOp {
        op_type: op_type.to_string(),
        reason: error.to_string(),
    })
}

impl CustomOp {
    /// Wire name of this op
    pub fn kind(&self) -> &'static str {
        match self {
            CustomOp::SaveDocument { .. } => "save_document",
            CustomOp::SaveHtml { .. } => "save_html",
            CustomOp::SaveImage { .. } => "save_image",
            CustomOp::SaveScene { .. } => "save_scene",
            CustomOp::AddColormap { .. } => "add_colormap",
            CustomOp::SetGamma { .. } => "set_gamma",
            CustomOp::ResizeListener => "resize_listener",
            CustomOp::DrawScene => "draw_scene",
            CustomOp::UpdateGlVolume => "update_gl_volume",
            CustomOp::SetVolumeRenderIllumination { .. } => "set_volume_render_illumination",
            CustomOp::LoadPngAsTexture { .. } => "load_png_as_texture",
            CustomOp::SetRenderAzimuthElevation { .. } => "set_render_azimuth_elevation",
            CustomOp::SetInterpolation { .. } => "set_interpolation",
            CustomOp::SetDrawingEnabled { .. } => "set_drawing_enabled",
            CustomOp::DrawOtsu { .. } => "draw_otsu",
            CustomOp::DrawGrowCut => "draw_grow_cut",
            CustomOp::MoveCrosshairInVox { .. } => "move_crosshair_in_vox",
            CustomOp::RemoveHaze { .. } => "remove_haze",
            CustomOp::DrawUndo => "draw_undo",
            CustomOp::CloseDrawing => "close_drawing",
            CustomOp::LoadDrawingFromUrl { .. } => "load_drawing_from_url",
        }
    }

    /// Decodes an op from its `{type, data}` form
    pub fn from_json(value: Value) -> Result<Self, ProtocolError> {
        let RawOp { op_type, data } =
            serde_json::from_value(value).map_err(|error| ProtocolError::MalformedMessage {
                reason: error.to_string(),
            })?;
        let op = op_type.as_str();
        Ok(match op {
            "save_document" => {
                let (file_name, compress) = args(op, data)?;
                CustomOp::SaveDocument {
                    file_name,
                    compress,
                }
            }
            "save_html" => {
                let (file_name, canvas_id) = args(op, data)?;
                CustomOp::SaveHtml {
                    file_name,
                    canvas_id,
                }
            }
            "save_image" => {
                let (file_name, save_drawing, volume_index) = args(op, data)?;
                CustomOp::SaveImage {
                    file_name,
                    save_drawing,
                    volume_index,
                }
            }
            "save_scene" => {
                let (file_name,) = args(op, data)?;
                CustomOp::SaveScene { file_name }
            }
            "add_colormap" => {
                let (name, colormap) = args(op, data)?;
                CustomOp::AddColormap { name, colormap }
            }
            "set_gamma" => {
                let (gamma,) = args(op, data)?;
                CustomOp::SetGamma { gamma }
            }
            "resize_listener" => CustomOp::ResizeListener,
            "draw_scene" => CustomOp::DrawScene,
            "update_gl_volume" => CustomOp::UpdateGlVolume,
            "set_volume_render_illumination" => {
                let (gradient_amount,) = args(op, data)?;
                CustomOp::SetVolumeRenderIllumination { gradient_amount }
            }
            "load_png_as_texture" => {
                let (png_url, texture_num) = args(op, data)?;
                CustomOp::LoadPngAsTexture {
                    png_url,
                    texture_num,
                }
            }
            "set_render_azimuth_elevation" => {
                let (azimuth, elevation) = args(op, data)?;
                CustomOp::SetRenderAzimuthElevation { azimuth, elevation }
            }
            "set_interpolation" => {
                let (is_nearest,) = args(op, data)?;
                CustomOp::SetInterpolation { is_nearest }
            }
            "set_drawing_enabled" => {
                let (enabled,) = args(op, data)?;
                CustomOp::SetDrawingEnabled { enabled }
            }
            "draw_otsu" => {
                let (levels,) = args(op, data)?;
                CustomOp::DrawOtsu { levels }
            }
            "draw_grow_cut" => CustomOp::DrawGrowCut,
            "move_crosshair_in_vox" => {
                let (x, y, z) = args(op, data)?;
                CustomOp::MoveCrosshairInVox { x, y, z }
            }
            "remove_haze" => {
                let (level, volume_index) = args(op, data)?;
                CustomOp::RemoveHaze {
                    level,
                    volume_index,
                }
            }
            "draw_undo" => CustomOp::DrawUndo,
            "close_drawing" => CustomOp::CloseDrawing,
            "load_drawing_from_url" => {
                let (url, binarize) = args(op, data)?;
                CustomOp::LoadDrawingFromUrl { url, binarize }
            }
            _ => {
                return Err(ProtocolError::UnknownOpType {
                    op_type: op.to_string(),
                })
            }
        })
    }

    /// Encodes this op as `{type, data}`
    pub fn to_json(&self) -> Value {
        let data = match self {
            CustomOp::SaveDocument {
                file_name,
                compress,
            } => json!([file_name, compress]),
            CustomOp::SaveHtml {
                file_name,
                canvas_id,
            } => json!([file_name, canvas_id]),
            CustomOp::SaveImage {
                file_name,
                save_drawing,
                volume_index,
            } => json!([file_name, save_drawing, volume_index]),
            CustomOp::SaveScene { file_name } => json!([file_name]),
            CustomOp::AddColormap { name, colormap } => json!([name, colormap]),
            CustomOp::SetGamma { gamma } => json!([gamma]),
            CustomOp::SetVolumeRenderIllumination { gradient_amount } => json!([gradient_amount]),
            CustomOp::LoadPngAsTexture {
                png_url,
                texture_num,
            } => json!([png_url, texture_num]),
            CustomOp::SetRenderAzimuthElevation { azimuth, elevation } => {
                json!([azimuth, elevation])
            }
            CustomOp::SetInterpolation { is_nearest } => json!([is_nearest]),
            CustomOp::SetDrawingEnabled { enabled } => json!([enabled]),
            CustomOp::DrawOtsu { levels } => json!([levels]),
            CustomOp::MoveCrosshairInVox { x, y, z } => json!([x, y, z]),
            CustomOp::RemoveHaze {
                level,
                volume_index,
            } => json!([level, volume_index]),
            CustomOp::LoadDrawingFromUrl { url, binarize } => json!([url, binarize]),
            CustomOp::ResizeListener
            | CustomOp::DrawScene
            | CustomOp::UpdateGlVolume
            | CustomOp::DrawGrowCut
            | CustomOp::DrawUndo
            | CustomOp::CloseDrawing => json!([]),
        };
        json!({ "type": self.kind(), "data": data })
    }
}

impl TryFrom<Value> for CustomOp {
    type Error = ProtocolError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        CustomOp::from_json(value)
    }
}

impl From<CustomOp> for Value {
    fn from(op: CustomOp) -> Self {
        op.to_json()
    }
}
