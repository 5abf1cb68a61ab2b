//! Renderable-entity surface.
//!
//! Model loading, display lists and GPU submission belong to the renderer.
//! The simulation owns every transform and hands the renderer finished
//! matrices; entities are opaque handles.

use crate::{camera::Viewport, math::Mat4};

/// Opaque handle of a loaded model.
pub type ModelId = u32;
/// Opaque handle of a renderable instance of a model.
pub type EntityId = u32;

pub trait Renderer {
    fn create(&mut self, model: ModelId) -> EntityId;
    fn destroy(&mut self, entity: EntityId);
    /// Start drawing one player's view.
    fn begin_view(&mut self, viewport: &Viewport, projection: &Mat4, view: &Mat4);
    fn draw(&mut self, entity: EntityId, model_matrix: &Mat4);
    /// Finish the frame (buffer flip).
    fn present(&mut self);
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Create { model: ModelId, entity: EntityId },
    Destroy(EntityId),
    BeginView { viewport: Viewport, view: Mat4 },
    Draw { entity: EntityId, model_matrix: Mat4 },
    Present,
}

/// Renderer that only records what it was asked to do.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub calls: Vec<RenderCall>,
    next_entity: EntityId,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Entities drawn since the last `clear`, in call order.
    pub fn drawn(&self) -> Vec<EntityId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RenderCall::Draw { entity, .. } => Some(*entity),
                _ => None,
            })
            .collect()
    }

    pub fn views(&self) -> Vec<Viewport> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RenderCall::BeginView { viewport, .. } => Some(*viewport),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    fn create(&mut self, model: ModelId) -> EntityId {
        let entity = self.next_entity;
        self.next_entity += 1;
        self.calls.push(RenderCall::Create { model, entity });
        entity
    }

    fn destroy(&mut self, entity: EntityId) {
        self.calls.push(RenderCall::Destroy(entity));
    }

    fn begin_view(&mut self, viewport: &Viewport, _projection: &Mat4, view: &Mat4) {
        self.calls.push(RenderCall::BeginView {
            viewport: *viewport,
            view: *view,
        });
    }

    fn draw(&mut self, entity: EntityId, model_matrix: &Mat4) {
        self.calls.push(RenderCall::Draw {
            entity,
            model_matrix: *model_matrix,
        });
    }

    fn present(&mut self) {
        self.calls.push(RenderCall::Present);
    }
}
