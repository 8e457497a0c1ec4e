// Copyright @yucwang 2023

pub mod checkerboard;
pub mod image;
