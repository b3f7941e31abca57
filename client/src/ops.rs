use log::info;

use nvsync_shared::{ColorMap, CustomOp};

use crate::{error::RendererError, renderer::Renderer};

/// File export requested by the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveRequest {
    Document { file_name: String, compress: bool },
    Html { file_name: String, canvas_id: String },
    Image {
        file_name: String,
        save_drawing: bool,
        volume_index: i64,
    },
    Scene { file_name: String },
}

/// Drawing-layer command requested by the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DrawingCommand {
    SetEnabled(bool),
    Otsu { levels: i64 },
    GrowCut,
    Undo,
    Close,
    LoadFromUrl { url: String, binarize: bool },
}

/// Imperative scene operations a renderer exposes to the host
pub trait SceneOps {
    fn save(&mut self, request: SaveRequest) -> Result<(), RendererError>;
    fn add_colormap(&mut self, name: &str, colormap: &ColorMap) -> Result<(), RendererError>;
    fn set_gamma(&mut self, gamma: f64);
    fn resize(&mut self);
    fn update_gl_volume(&mut self);
    fn set_volume_render_illumination(&mut self, gradient_amount: f64)
        -> Result<(), RendererError>;
    fn load_png_as_texture(&mut self, png_url: &str, texture_num: i64)
        -> Result<(), RendererError>;
    fn set_render_azimuth_elevation(&mut self, azimuth: f64, elevation: f64);
    fn set_interpolation(&mut self, is_nearest: bool);
    fn move_crosshair_in_vox(&mut self, x: f64, y: f64, z: f64);
    fn remove_haze(&mut self, level: i64, volume_index: i64) -> Result<(), RendererError>;
    fn drawing(&mut self, command: DrawingCommand) -> Result<(), RendererError>;
}

/// Runs a host op against the renderer
pub fn dispatch_op<R: Renderer + ?Sized>(renderer: &mut R, op: CustomOp) -> Result<(), RendererError> {
    info!("Dispatching op {}", op.kind());
    match op {
        CustomOp::SaveDocument {
            file_name,
            compress,
        } => renderer.save(SaveRequest::Document {
            file_name,
            compress,
        }),
        CustomOp::SaveHtml {
            file_name,
            canvas_id,
        } => renderer.save(SaveRequest::Html {
            file_name,
            canvas_id,
        }),
        CustomOp::SaveImage {
            file_name,
            save_drawing,
            volume_index,
        } => renderer.save(SaveRequest::Image {
            file_name,
            save_drawing,
            volume_index,
        }),
        CustomOp::SaveScene { file_name } => renderer.save(SaveRequest::Scene { file_name }),
        CustomOp::AddColormap { name, colormap } => renderer.add_colormap(&name, &colormap),
        CustomOp::SetGamma { gamma } => {
            renderer.set_gamma(gamma);
            Ok(())
        }
        CustomOp::ResizeListener => {
            renderer.resize();
            Ok(())
        }
        CustomOp::DrawScene => {
            renderer.redraw();
            Ok(())
        }
        CustomOp::UpdateGlVolume => {
            renderer.update_gl_volume();
            Ok(())
        }
        CustomOp::SetVolumeRenderIllumination { gradient_amount } => {
            renderer.set_volume_render_illumination(gradient_amount)
        }
        CustomOp::LoadPngAsTexture {
            png_url,
            texture_num,
        } => renderer.load_png_as_texture(&png_url, texture_num),
        CustomOp::SetRenderAzimuthElevation { azimuth, elevation } => {
            renderer.set_render_azimuth_elevation(azimuth, elevation);
            Ok(())
        }
        CustomOp::SetInterpolation { is_nearest } => {
            renderer.set_interpolation(is_nearest);
            Ok(())
        }
        CustomOp::SetDrawingEnabled { enabled } => {
            renderer.drawing(DrawingCommand::SetEnabled(enabled))
        }
        CustomOp::DrawOtsu { levels } => renderer.drawing(DrawingCommand::Otsu { levels }),
        CustomOp::DrawGrowCut => renderer.drawing(DrawingCommand::GrowCut),
        CustomOp::MoveCrosshairInVox { x, y, z } => {
            renderer.move_crosshair_in_vox(x, y, z);
            Ok(())
        }
        CustomOp::RemoveHaze {
            level,
            volume_index,
        } => renderer.remove_haze(level, volume_index),
        CustomOp::DrawUndo => renderer.drawing(DrawingCommand::Undo),
        CustomOp::CloseDrawing => renderer.drawing(DrawingCommand::Close),
        CustomOp::LoadDrawingFromUrl { url, binarize } => {
            renderer.drawing(DrawingCommand::LoadFromUrl { url, binarize })
        }
    }
}
