/*
    Missive - newsletter composition toolkit
    Copyright (C) 2025 meetzli

    This program is free software: you can redistribute it and/or modify
    it under the terms of the GNU Affero General Public License as published
    by the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
*/

//! Pointer interaction with a placed element.
//!
//! ```text
//!   Idle ──body down──► Dragging ──up──► Idle
//!   Idle ──handle down─► Resizing ──up──► Idle
//! ```
//!
//! The controller only computes updates; the editor commits them to the
//! document. Nothing transitions while the editor is in preview mode.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ElementId, ElementKind};

pub const MIN_WIDTH: f64 = 50.0;
pub const MIN_HEIGHT: f64 = 30.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditorMode {
    #[default]
    Editor,
    Preview,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl Handle {
    pub const ALL: [Handle; 8] = [
        Handle::TopLeft,
        Handle::Top,
        Handle::TopRight,
        Handle::Right,
        Handle::BottomRight,
        Handle::Bottom,
        Handle::BottomLeft,
        Handle::Left,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Handle::TopLeft => "top-left",
            Handle::Top => "top",
            Handle::TopRight => "top-right",
            Handle::Right => "right",
            Handle::BottomRight => "bottom-right",
            Handle::Bottom => "bottom",
            Handle::BottomLeft => "bottom-left",
            Handle::Left => "left",
        }
    }

    /// Horizontal edge driven by this handle: -1 left, 1 right, 0 none.
    fn horizontal(&self) -> f64 {
        match self {
            Handle::TopLeft | Handle::Left | Handle::BottomLeft => -1.0,
            Handle::TopRight | Handle::Right | Handle::BottomRight => 1.0,
            Handle::Top | Handle::Bottom => 0.0,
        }
    }

    /// Vertical edge driven by this handle: -1 top, 1 bottom, 0 none.
    fn vertical(&self) -> f64 {
        match self {
            Handle::TopLeft | Handle::Top | Handle::TopRight => -1.0,
            Handle::BottomLeft | Handle::Bottom | Handle::BottomRight => 1.0,
            Handle::Left | Handle::Right => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Geometry captured when a resize starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeOrigin {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging {
        id: ElementId,
        last: Point,
    },
    Resizing {
        id: ElementId,
        handle: Handle,
        pointer_start: Point,
        origin: ResizeOrigin,
        lock_height: bool,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum InteractionUpdate {
    /// Move by the pointer delta since the previous move event.
    Moved { id: ElementId, dx: f64, dy: f64 },
    Resized {
        id: ElementId,
        left: f64,
        top: f64,
        width: f64,
        height: Option<f64>,
    },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    pub fn active_element(&self) -> Option<ElementId> {
        match self {
            Interaction::Idle => None,
            Interaction::Dragging { id, .. } | Interaction::Resizing { id, .. } => Some(*id),
        }
    }

    /// Pointer-down on an element body. Only the selected element can be dragged.
    pub fn begin_drag(&mut self, mode: EditorMode, id: ElementId, selected: Option<ElementId>, pointer: Point) -> bool {
        if mode != EditorMode::Editor || !self.is_idle() || selected != Some(id) {
            return false;
        }
        debug!(id, "drag start");
        *self = Interaction::Dragging { id, last: pointer };
        true
    }

    /// Pointer-down on a resize handle of the selected element.
    pub fn begin_resize(
        &mut self,
        mode: EditorMode,
        id: ElementId,
        kind: &ElementKind,
        selected: Option<ElementId>,
        handle: Handle,
        pointer: Point,
        origin: ResizeOrigin,
    ) -> bool {
        if mode != EditorMode::Editor || !self.is_idle() || selected != Some(id) {
            return false;
        }
        debug!(id, handle = handle.as_str(), "resize start");
        *self = Interaction::Resizing {
            id,
            handle,
            pointer_start: pointer,
            origin,
            lock_height: *kind == ElementKind::Divider,
        };
        true
    }

    pub fn pointer_move(&mut self, mode: EditorMode, pointer: Point) -> Option<InteractionUpdate> {
        if mode != EditorMode::Editor {
            return None;
        }
        match self {
            Interaction::Idle => None,
            Interaction::Dragging { id, last } => {
                let update = InteractionUpdate::Moved {
                    id: *id,
                    dx: pointer.x - last.x,
                    dy: pointer.y - last.y,
                };
                *last = pointer;
                Some(update)
            }
            Interaction::Resizing { id, handle, pointer_start, origin, lock_height } => {
                let dx = pointer.x - pointer_start.x;
                let dy = pointer.y - pointer_start.y;
                Some(resize(*id, *handle, origin, dx, dy, *lock_height))
            }
        }
    }

    pub fn pointer_up(&mut self, mode: EditorMode) {
        if mode != EditorMode::Editor {
            return;
        }
        if let Some(id) = self.active_element() {
            debug!(id, "interaction end");
        }
        *self = Interaction::Idle;
    }

    /// Replaces the starting size of a running resize once the element's
    /// live size is known. A resize that already ended is left alone.
    pub fn measured_size(&mut self, id: ElementId, width: f64, height: f64) -> bool {
        match self {
            Interaction::Resizing { id: active, origin, .. } if *active == id => {
                origin.width = width;
                origin.height = height;
                true
            }
            _ => false,
        }
    }

    /// Leaving editor mode drops whatever interaction was running.
    pub fn set_mode(&mut self, mode: EditorMode) {
        if mode == EditorMode::Preview {
            *self = Interaction::Idle;
        }
    }
}

fn resize(id: ElementId, handle: Handle, origin: &ResizeOrigin, dx: f64, dy: f64, lock_height: bool) -> InteractionUpdate {
    let horizontal = handle.horizontal();
    let vertical = handle.vertical();

    let width = (origin.width + horizontal * dx).max(MIN_WIDTH);
    let height = (origin.height + vertical * dy).max(MIN_HEIGHT);

    // Left and top handles keep the opposite edge anchored.
    let left = if horizontal < 0.0 {
        origin.left + origin.width - width
    } else {
        origin.left
    };
    let top = if vertical < 0.0 && !lock_height {
        origin.top + origin.height - height
    } else {
        origin.top
    };

    InteractionUpdate::Resized {
        id,
        left,
        top,
        width: if horizontal == 0.0 { origin.width } else { width },
        height: if vertical == 0.0 || lock_height { None } else { Some(height) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> ResizeOrigin {
        ResizeOrigin { left: 10.0, top: 20.0, width: 200.0, height: 100.0 }
    }

    fn resizing(handle: Handle, kind: ElementKind) -> Interaction {
        let mut interaction = Interaction::Idle;
        assert!(interaction.begin_resize(
            EditorMode::Editor,
            1,
            &kind,
            Some(1),
            handle,
            Point::new(0.0, 0.0),
            origin(),
        ));
        interaction
    }

    #[test]
    fn drag_uses_incremental_deltas() {
        let mut interaction = Interaction::Idle;
        assert!(interaction.begin_drag(EditorMode::Editor, 4, Some(4), Point::new(100.0, 100.0)));

        let first = interaction.pointer_move(EditorMode::Editor, Point::new(110.0, 105.0));
        assert_eq!(first, Some(InteractionUpdate::Moved { id: 4, dx: 10.0, dy: 5.0 }));

        let second = interaction.pointer_move(EditorMode::Editor, Point::new(112.0, 101.0));
        assert_eq!(second, Some(InteractionUpdate::Moved { id: 4, dx: 2.0, dy: -4.0 }));

        interaction.pointer_up(EditorMode::Editor);
        assert!(interaction.is_idle());
        assert_eq!(interaction.pointer_move(EditorMode::Editor, Point::new(0.0, 0.0)), None);
    }

    #[test]
    fn drag_requires_selection_and_idle() {
        let mut interaction = Interaction::Idle;
        assert!(!interaction.begin_drag(EditorMode::Editor, 4, Some(5), Point::new(0.0, 0.0)));
        assert!(interaction.begin_drag(EditorMode::Editor, 5, Some(5), Point::new(0.0, 0.0)));
        assert!(!interaction.begin_drag(EditorMode::Editor, 5, Some(5), Point::new(0.0, 0.0)));
    }

    #[test]
    fn bottom_right_adds_the_delta() {
        let mut interaction = resizing(Handle::BottomRight, ElementKind::Image);
        let update = interaction.pointer_move(EditorMode::Editor, Point::new(40.0, 20.0));
        assert_eq!(
            update,
            Some(InteractionUpdate::Resized { id: 1, left: 10.0, top: 20.0, width: 240.0, height: Some(120.0) })
        );
    }

    #[test]
    fn resize_is_floored_at_the_minimum() {
        let mut interaction = resizing(Handle::BottomRight, ElementKind::Image);
        let update = interaction.pointer_move(EditorMode::Editor, Point::new(-500.0, -500.0));
        assert_eq!(
            update,
            Some(InteractionUpdate::Resized { id: 1, left: 10.0, top: 20.0, width: MIN_WIDTH, height: Some(MIN_HEIGHT) })
        );
    }

    #[test]
    fn top_left_keeps_the_opposite_corner() {
        let mut interaction = resizing(Handle::TopLeft, ElementKind::Shape);
        let update = interaction.pointer_move(EditorMode::Editor, Point::new(30.0, 10.0));
        assert_eq!(
            update,
            Some(InteractionUpdate::Resized { id: 1, left: 40.0, top: 30.0, width: 170.0, height: Some(90.0) })
        );
    }

    #[test]
    fn edge_handles_change_one_dimension() {
        let mut interaction = resizing(Handle::Right, ElementKind::Text);
        let update = interaction.pointer_move(EditorMode::Editor, Point::new(15.0, 99.0));
        assert_eq!(
            update,
            Some(InteractionUpdate::Resized { id: 1, left: 10.0, top: 20.0, width: 215.0, height: None })
        );
    }

    #[test]
    fn divider_height_is_never_resized() {
        let mut interaction = resizing(Handle::BottomRight, ElementKind::Divider);
        let update = interaction.pointer_move(EditorMode::Editor, Point::new(40.0, 60.0));
        assert_eq!(
            update,
            Some(InteractionUpdate::Resized { id: 1, left: 10.0, top: 20.0, width: 240.0, height: None })
        );
    }

    #[test]
    fn preview_mode_freezes_interaction() {
        let mut interaction = Interaction::Idle;
        assert!(!interaction.begin_drag(EditorMode::Preview, 1, Some(1), Point::new(0.0, 0.0)));

        assert!(interaction.begin_drag(EditorMode::Editor, 1, Some(1), Point::new(0.0, 0.0)));
        assert_eq!(interaction.pointer_move(EditorMode::Preview, Point::new(5.0, 5.0)), None);

        interaction.set_mode(EditorMode::Preview);
        assert!(interaction.is_idle());
    }

    #[test]
    fn late_measurements_only_touch_the_running_resize() {
        let mut interaction = resizing(Handle::Right, ElementKind::Text);
        assert!(interaction.measured_size(1, 300.0, 80.0));
        let update = interaction.pointer_move(EditorMode::Editor, Point::new(10.0, 0.0));
        assert_eq!(
            update,
            Some(InteractionUpdate::Resized { id: 1, left: 10.0, top: 20.0, width: 310.0, height: None })
        );

        interaction.pointer_up(EditorMode::Editor);
        assert!(!interaction.measured_size(1, 300.0, 80.0));
        assert!(interaction.is_idle());
    }
}
