/* Copyright 2020 @Yuchen Wong */

use nalgebra::{Vector2, Vector3};

pub type Float = f32;
pub type Vector2f = Vector2<Float>;
pub type Vector3f = Vector3<Float>;

/// Minimum accepted hit distance, and the parallel-ray threshold for planes.
pub const EPSILON: Float = 1e-4;
pub const PI: Float = std::f32::consts::PI;
pub const INV_PI: Float = std::f32::consts::FRAC_1_PI;
pub const INV_TWO_PI: Float = 0.5 * std::f32::consts::FRAC_1_PI;

/// Largest Float strictly below 1.0.
pub const ONE_MINUS_EPSILON: Float = 1.0 - Float::EPSILON * 0.5;
