use std::str::FromStr;

use crate::tween::TweenParams;

/// Where the TV prop comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssetStrategy {
    /// `tv.mtl` + `tv.obj`, falling back to default material, then placeholder.
    #[default]
    ObjMtl,
    /// `tv.glb`, falling back to placeholder.
    Gltf,
    /// Placeholder geometry only, nothing fetched for the TV.
    Procedural,
}

impl FromStr for AssetStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "obj" | "obj+mtl" | "objmtl" => Ok(Self::ObjMtl),
            "gltf" | "glb" => Ok(Self::Gltf),
            "procedural" | "placeholder" => Ok(Self::Procedural),
            other => Err(format!("unknown asset strategy '{other}'")),
        }
    }
}

/// Parses on/off style attribute values.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssetUrls {
    pub room_glb: String,
    pub tv_obj: String,
    pub tv_mtl: String,
    pub tv_glb: String,
}

impl Default for AssetUrls {
    fn default() -> Self {
        Self {
            room_glb: "room.glb".into(),
            tv_obj: "tv.obj".into(),
            tv_mtl: "tv.mtl".into(),
            tv_glb: "tv.glb".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    /// Animate the camera toward a clicked focus target. When off, a focus
    /// click only opens the overlays.
    pub camera_motion: bool,
    pub assets: AssetStrategy,
    pub urls: AssetUrls,
    pub tween: TweenParams,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            camera_motion: true,
            assets: AssetStrategy::default(),
            urls: AssetUrls::default(),
            tween: TweenParams::default(),
        }
    }
}

impl ViewerConfig {
    /// Builds a config from `data-*` attributes. Unknown values keep the
    /// default and are logged.
    pub fn from_attributes(get: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(v) = get("data-camera-motion") {
            match parse_flag(&v) {
                Some(on) => cfg.camera_motion = on,
                None => log::warn!("[config] ignoring data-camera-motion='{}'", v),
            }
        }
        if let Some(v) = get("data-assets") {
            match v.parse::<AssetStrategy>() {
                Ok(s) => cfg.assets = s,
                Err(e) => log::warn!("[config] {}", e),
            }
        }
        if let Some(v) = get("data-room-src").filter(|v| !v.trim().is_empty()) {
            cfg.urls.room_glb = v;
        }
        if let Some(v) = get("data-tv-src").filter(|v| !v.trim().is_empty()) {
            apply_tv_src(&mut cfg.urls, &v);
        }
        cfg
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_element(el: &web_sys::Element) -> Self {
        Self::from_attributes(|name| el.get_attribute(name))
    }
}

// `data-tv-src` names the model without extension: "models/tv" -> models/tv.{obj,mtl,glb}
fn apply_tv_src(urls: &mut AssetUrls, stem: &str) {
    let stem = stem.trim();
    urls.tv_obj = format!("{stem}.obj");
    urls.tv_mtl = format!("{stem}.mtl");
    urls.tv_glb = format!("{stem}.glb");
}
