//! The fixed catalogue of provider models a user can pick from.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A provider-side image model, serialized as its wire identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageModel {
    #[default]
    #[serde(rename = "flux")]
    Flux,
    #[serde(rename = "flux-pro")]
    FluxPro,
    #[serde(rename = "flux-realism")]
    FluxRealism,
    #[serde(rename = "flux-anime")]
    FluxAnime,
    #[serde(rename = "flux3d")]
    Flux3d,
    #[serde(rename = "flux-cably")]
    FluxCably,
    #[serde(rename = "flux-turbo")]
    FluxTurbo,
}

impl ImageModel {
    /// All models, in the order the form lists them.
    pub const ALL: [ImageModel; 7] = [
        ImageModel::Flux,
        ImageModel::FluxPro,
        ImageModel::FluxRealism,
        ImageModel::FluxAnime,
        ImageModel::Flux3d,
        ImageModel::FluxCably,
        ImageModel::FluxTurbo,
    ];

    /// Identifier sent to the provider in the `model` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageModel::Flux => "flux",
            ImageModel::FluxPro => "flux-pro",
            ImageModel::FluxRealism => "flux-realism",
            ImageModel::FluxAnime => "flux-anime",
            ImageModel::Flux3d => "flux3d",
            ImageModel::FluxCably => "flux-cably",
            ImageModel::FluxTurbo => "flux-turbo",
        }
    }

    /// Human-readable name shown in the model picker.
    pub fn label(&self) -> &'static str {
        match self {
            ImageModel::Flux => "Flux",
            ImageModel::FluxPro => "Flux Pro",
            ImageModel::FluxRealism => "Flux Realism",
            ImageModel::FluxAnime => "Flux Anime",
            ImageModel::Flux3d => "Flux 3D",
            ImageModel::FluxCably => "Flux CablyAI",
            ImageModel::FluxTurbo => "Flux Turbo",
        }
    }
}

impl fmt::Display for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageModel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageModel::ALL
            .into_iter()
            .find(|model| model.as_str() == s)
            .ok_or_else(|| CoreError::UnknownModel(s.to_string()))
    }
}
