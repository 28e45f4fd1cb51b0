use crate::config::MdaOptions;
use crate::geometry::CanvasBounds;
use crate::host::{HostEvent, MaskStyle, ObjectId, SceneHost, SceneObject};
use crate::mask::{build_mask_path, MaskPath};
use crate::selection::SelectionRect;

use super::{apply_move, apply_resize, rect_style};

/// Persistent selection with a darkening mask over the rest of the canvas.
///
/// The rectangle exists from attach on; there is no draw phase, so pointer events are
/// ignored. Every accepted move or resize rebuilds the mask from scratch.
#[derive(Debug)]
pub struct OverlayController {
    canvas: CanvasBounds,
    rect_id: ObjectId,
    mask_id: ObjectId,
    selection: SelectionRect,
    mask: MaskPath,
    mask_style: MaskStyle,
}

impl OverlayController {
    pub(super) fn attach<H: SceneHost>(
        host: &mut H,
        canvas: CanvasBounds,
        options: &MdaOptions,
    ) -> Self {
        let selection = SelectionRect::fitted(options.initial_selection, canvas);
        let rect_id = host.add_object(SceneObject::Rect {
            geometry: selection.geometry(),
            style: rect_style(None, 1.0),
        });

        let mask_style = MaskStyle {
            fill: options.mask_fill,
            opacity: options.mask_opacity,
        };
        let mask = build_mask_path(canvas, selection.bounds());
        let mask_id = host.add_object(SceneObject::Mask {
            path: mask.clone(),
            style: mask_style,
        });
        host.set_active_object(Some(rect_id));

        Self {
            canvas,
            rect_id,
            mask_id,
            selection,
            mask,
            mask_style,
        }
    }

    pub fn selection(&self) -> &SelectionRect {
        &self.selection
    }

    pub fn rect_object(&self) -> ObjectId {
        self.rect_id
    }

    pub fn mask_object(&self) -> ObjectId {
        self.mask_id
    }

    pub fn mask(&self) -> &MaskPath {
        &self.mask
    }

    pub fn handle_event<H: SceneHost>(&mut self, host: &mut H, event: HostEvent<H::PointerEvent>) {
        let changed = match event {
            HostEvent::ObjectMoved(id) if id == self.rect_id => {
                apply_move(host, self.rect_id, &mut self.selection, self.canvas)
            }
            HostEvent::ObjectScaled(id) if id == self.rect_id => {
                apply_resize(host, self.rect_id, &mut self.selection, self.canvas)
            }
            HostEvent::ObjectMoved(id) | HostEvent::ObjectScaled(id) => {
                tracing::trace!(?id, "ignoring transform of foreign object");
                false
            }
            HostEvent::PointerDown(_) | HostEvent::PointerMove(_) | HostEvent::PointerUp(_) => false,
        };
        if changed {
            self.refresh_mask(host);
        }
    }

    /// Swaps the mask for one matching the current selection. The old path is removed right
    /// before the new one is added, so the scene never holds two masks or none at render time.
    fn refresh_mask<H: SceneHost>(&mut self, host: &mut H) {
        let mask = build_mask_path(self.canvas, self.selection.bounds());
        host.remove_object(self.mask_id);
        self.mask_id = host.add_object(SceneObject::Mask {
            path: mask.clone(),
            style: self.mask_style,
        });
        self.mask = mask;
        host.request_render();
    }
}
