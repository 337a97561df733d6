/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use serde::{Deserialize, Serialize};

/// Postal address of a project, stored on its root reference
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAddress {
    #[serde(default)]
    pub address_line1: String,

    #[serde(default)]
    pub address_line2: String,

    #[serde(default)]
    pub address_line3: String,

    #[serde(default)]
    pub address_line4: String,

    #[serde(default, rename = "postcode")]
    pub post_code: String,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub country: String,
}

/// Rotation in degrees around the three axes
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    #[serde(default)]
    pub x: f64,

    #[serde(default)]
    pub y: f64,

    #[serde(default)]
    pub z: f64,
}

/// GeoJSON style position, e.g. `{"type": "Point", "coordinates": [lon, lat, alt]}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeoPosition {
    #[serde(rename = "type")]
    pub geo_type: String,

    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl GeoPosition {
    pub fn point(coordinates: Vec<f64>) -> Self {
        Self {
            geo_type: "Point".to_string(),
            coordinates,
        }
    }
}

impl Default for GeoPosition {
    fn default() -> Self {
        Self::point(Vec::new())
    }
}

/// Used for the absolute as well as the relative transformation of a reference
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ProjectTransformation {
    #[serde(default)]
    pub rotation: Rotation,

    #[serde(default)]
    pub position: GeoPosition,
}

/// Local offset of the reference point, in metres
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct Position {
    #[serde(default)]
    pub x: f64,

    #[serde(default)]
    pub y: f64,

    #[serde(default)]
    pub z: f64,
}

/// Placement of a file's content relative to its parent reference
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FileTransformation {
    #[serde(default)]
    pub rotation: Rotation,

    #[serde(default)]
    pub position: Position,

    #[serde(default = "unit_scale")]
    pub scale: f64,
}

fn unit_scale() -> f64 {
    1.0
}

impl Default for FileTransformation {
    fn default() -> Self {
        Self {
            rotation: Rotation::default(),
            position: Position::default(),
            scale: unit_scale(),
        }
    }
}
