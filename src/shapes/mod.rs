// Copyright @yucwang 2021

pub mod plane;
pub mod sphere;
