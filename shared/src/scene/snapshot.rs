use serde::{Deserialize, Serialize};

/// Field comparison used when diffing scene state.
///
/// NaN compares equal to NaN so an unset value is not resent every tick.
/// Vectors compare element-wise, nested vectors recursively.
pub trait SceneField {
    fn same_as(&self, other: &Self) -> bool;

    /// Whether the value survives the JSON wire form. NaN and infinities
    /// serialize as `null` and would be lost.
    fn is_finite(&self) -> bool;
}

impl SceneField for f64 {
    fn same_as(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl<T: SceneField> SceneField for Vec<T> {
    fn same_as(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.same_as(b))
    }

    fn is_finite(&self) -> bool {
        self.iter().all(SceneField::is_finite)
    }
}

/// Volatile, interactively changed renderer state mirrored to the host
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneSnapshot {
    pub render_azimuth: f64,
    pub render_elevation: f64,
    pub vol_scale_multiplier: f64,
    pub crosshair_pos: Vec<f64>,
    pub clip_plane: Vec<f64>,
    pub clip_plane_depth_azi_elev: Vec<f64>,
    #[serde(rename = "pan2Dxyzmm")]
    pub pan_2d_xyzmm: Vec<f64>,
    pub gamma: f64,
    pub clip_planes: Vec<Vec<f64>>,
}

impl Default for SceneSnapshot {
    fn default() -> Self {
        Self {
            render_azimuth: 110.0,
            render_elevation: 10.0,
            vol_scale_multiplier: 1.0,
            crosshair_pos: vec![0.5, 0.5, 0.5],
            clip_plane: vec![0.0, 0.0, 0.0, 0.0],
            clip_plane_depth_azi_elev: vec![2.0, 0.0, 0.0],
            pan_2d_xyzmm: vec![0.0, 0.0, 0.0, 1.0],
            gamma: 1.0,
            clip_planes: Vec::new(),
        }
    }
}

/// The fields of a [`SceneSnapshot`] that changed. Unchanged fields are
/// `None` and left out of the wire form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SceneDelta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_azimuth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_elevation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vol_scale_multiplier: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crosshair_pos: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_plane: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_plane_depth_azi_elev: Option<Vec<f64>>,
    #[serde(rename = "pan2Dxyzmm", skip_serializing_if = "Option::is_none")]
    pub pan_2d_xyzmm: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_planes: Option<Vec<Vec<f64>>>,
}

impl SceneDelta {
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Wire names of the fields present in this delta
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        let present = [
            ("renderAzimuth", self.render_azimuth.is_some()),
            ("renderElevation", self.render_elevation.is_some()),
            ("volScaleMultiplier", self.vol_scale_multiplier.is_some()),
            ("crosshairPos", self.crosshair_pos.is_some()),
            ("clipPlane", self.clip_plane.is_some()),
            ("clipPlaneDepthAziElev", self.clip_plane_depth_azi_elev.is_some()),
            ("pan2Dxyzmm", self.pan_2d_xyzmm.is_some()),
            ("gamma", self.gamma.is_some()),
            ("clipPlanes", self.clip_planes.is_some()),
        ];
        for (name, is_present) in present {
            if is_present {
                fields.push(name);
            }
        }
        fields
    }
}

fn changed<T: SceneField + Clone>(previous: &T, current: &T) -> Option<T> {
    if previous.same_as(current) || !current.is_finite() {
        None
    } else {
        Some(current.clone())
    }
}

/// Minimal delta turning `previous` into `current`. Changed vectors are
/// carried whole. A field whose new value is not finite is left out until
/// it becomes finite again.
pub fn diff(previous: &SceneSnapshot, current: &SceneSnapshot) -> SceneDelta {
    SceneDelta {
        render_azimuth: changed(&previous.render_azimuth, &current.render_azimuth),
        render_elevation: changed(&previous.render_elevation, &current.render_elevation),
        vol_scale_multiplier: changed(
            &previous.vol_scale_multiplier,
            &current.vol_scale_multiplier,
        ),
        crosshair_pos: changed(&previous.crosshair_pos, &current.crosshair_pos),
        clip_plane: changed(&previous.clip_plane, &current.clip_plane),
        clip_plane_depth_azi_elev: changed(
            &previous.clip_plane_depth_azi_elev,
            &current.clip_plane_depth_azi_elev,
        ),
        pan_2d_xyzmm: changed(&previous.pan_2d_xyzmm, &current.pan_2d_xyzmm),
        gamma: changed(&previous.gamma, &current.gamma),
        clip_planes: changed(&previous.clip_planes, &current.clip_planes),
    }
}

impl SceneSnapshot {
    /// Overwrites the fields present in `delta`
    pub fn apply(&mut self, delta: &SceneDelta) {
        fn set<T: Clone>(field: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
        set(&mut self.render_azimuth, &delta.render_azimuth);
        set(&mut self.render_elevation, &delta.render_elevation);
        set(&mut self.vol_scale_multiplier, &delta.vol_scale_multiplier);
        set(&mut self.crosshair_pos, &delta.crosshair_pos);
        set(&mut self.clip_plane, &delta.clip_plane);
        set(
            &mut self.clip_plane_depth_azi_elev,
            &delta.clip_plane_depth_azi_elev,
        );
        set(&mut self.pan_2d_xyzmm, &delta.pan_2d_xyzmm);
        set(&mut self.gamma, &delta.gamma);
        set(&mut self.clip_planes, &delta.clip_planes);
    }
}
