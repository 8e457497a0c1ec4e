// Copyright @yucwang 2021

use crate::core::film::{RenderError, RowSink};
use crate::core::scene::Scene;

pub trait Renderer {
    fn render(&self, scene: &Scene, sink: &mut dyn RowSink) -> Result<(), RenderError>;
}
