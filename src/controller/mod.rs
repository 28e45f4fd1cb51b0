//! Pointer-driven selection lifecycle on top of a [`SceneHost`].
//!
//! [`MdaWidget`] owns the selection rectangle and, in overlay mode, the mask. It is the only
//! writer of both. Hosts deliver events one at a time through [`MdaWidget::handle_event`];
//! the `&mut self` receiver keeps handlers from overlapping.

mod draw;
mod overlay;

pub use draw::DrawController;
pub use overlay::OverlayController;

use crate::config::{MdaOptions, SelectionMode};
use crate::geometry::{CanvasBounds, Color, SelectionBounds};
use crate::host::{HostEvent, ObjectId, RectStyle, SceneHost, SceneObject, CORNER_COLOR, CORNER_SIZE};
use crate::mask::MaskPath;
use crate::scale::compute_scale;
use crate::selection::SelectionRect;

#[derive(Debug)]
enum Controller {
    Draw(DrawController),
    Overlay(OverlayController),
}

#[derive(Debug)]
pub struct MdaWidget {
    canvas: CanvasBounds,
    scale: f64,
    image_id: ObjectId,
    controller: Controller,
}

impl MdaWidget {
    /// Builds the widget over the image named by `target`.
    ///
    /// Returns `None` without touching the host when the target does not exist; the host is
    /// expected to have checked that beforehand.
    pub fn attach<H: SceneHost>(host: &mut H, target: &str, options: &MdaOptions) -> Option<Self> {
        let Some(image) = host.resolve_target(target) else {
            tracing::debug!(selector = target, "image target not found; widget not attached");
            return None;
        };

        let scale = compute_scale(
            image.natural_width,
            image.natural_height,
            options.max_width,
            options.max_height,
        );
        let canvas = CanvasBounds::new(image.natural_width * scale, image.natural_height * scale);
        host.create_surface(canvas);
        let image_id = host.add_object(SceneObject::Image {
            target: image,
            scale,
        });

        let controller = match options.mode {
            SelectionMode::Draw => Controller::Draw(DrawController::attach(host, canvas, options)),
            SelectionMode::Overlay => {
                Controller::Overlay(OverlayController::attach(host, canvas, options))
            }
        };
        host.request_render();

        tracing::debug!(
            mode = ?options.mode,
            scale,
            width = canvas.width,
            height = canvas.height,
            "selection widget attached"
        );
        Some(Self {
            canvas,
            scale,
            image_id,
            controller,
        })
    }

    pub fn handle_event<H: SceneHost>(&mut self, host: &mut H, event: HostEvent<H::PointerEvent>) {
        match &mut self.controller {
            Controller::Draw(controller) => controller.handle_event(host, event),
            Controller::Overlay(controller) => controller.handle_event(host, event),
        }
    }

    pub fn canvas(&self) -> CanvasBounds {
        self.canvas
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn image_object(&self) -> ObjectId {
        self.image_id
    }

    pub fn mode(&self) -> SelectionMode {
        match self.controller {
            Controller::Draw(_) => SelectionMode::Draw,
            Controller::Overlay(_) => SelectionMode::Overlay,
        }
    }

    pub fn selection(&self) -> SelectionBounds {
        self.selection_rect().bounds()
    }

    pub fn selection_rect(&self) -> &SelectionRect {
        match &self.controller {
            Controller::Draw(controller) => controller.selection(),
            Controller::Overlay(controller) => controller.selection(),
        }
    }

    /// Scene id of the current mask; `None` in draw mode. Changes on every mask rebuild.
    pub fn mask_object(&self) -> Option<ObjectId> {
        match &self.controller {
            Controller::Draw(_) => None,
            Controller::Overlay(controller) => Some(controller.mask_object()),
        }
    }

    pub fn selection_object(&self) -> ObjectId {
        match &self.controller {
            Controller::Draw(controller) => controller.rect_object(),
            Controller::Overlay(controller) => controller.rect_object(),
        }
    }

    /// Current overlay outline; `None` in draw mode.
    pub fn mask(&self) -> Option<&MaskPath> {
        match &self.controller {
            Controller::Draw(_) => None,
            Controller::Overlay(controller) => Some(controller.mask()),
        }
    }

    pub fn is_dragging(&self) -> bool {
        match &self.controller {
            Controller::Draw(controller) => controller.is_dragging(),
            Controller::Overlay(_) => false,
        }
    }

    /// Whether a committed selection exists. Overlay mode always has one.
    pub fn is_selected(&self) -> bool {
        match &self.controller {
            Controller::Draw(controller) => controller.is_selected(),
            Controller::Overlay(_) => true,
        }
    }
}

fn rect_style(fill: Option<Color>, opacity: f64) -> RectStyle {
    RectStyle {
        fill,
        opacity,
        corner_color: CORNER_COLOR,
        corner_size: CORNER_SIZE,
        rotatable: false,
    }
}

/// Clamps the position the host proposes for `rect_id` and writes the result back.
/// Returns `false` when the host cannot report the object's geometry. Rendering is left to
/// the caller, which may have more scene changes to make first.
fn apply_move<H: SceneHost>(
    host: &mut H,
    rect_id: ObjectId,
    selection: &mut SelectionRect,
    canvas: CanvasBounds,
) -> bool {
    let Some(proposed) = host.object_geometry(rect_id) else {
        tracing::warn!(?rect_id, "selection geometry unavailable; move ignored");
        return false;
    };
    selection.clamp_move(proposed.left, proposed.top, canvas);
    host.set_object_geometry(rect_id, selection.geometry());
    true
}

/// Applies the host's proposed resize for `rect_id` with rollback on overflow and writes the
/// result back. Returns `false` when the host cannot report the object's geometry.
fn apply_resize<H: SceneHost>(
    host: &mut H,
    rect_id: ObjectId,
    selection: &mut SelectionRect,
    canvas: CanvasBounds,
) -> bool {
    let Some(proposed) = host.object_geometry(rect_id) else {
        tracing::warn!(?rect_id, "selection geometry unavailable; resize ignored");
        return false;
    };
    let outcome = selection.clamp_resize(proposed.into(), canvas);
    if !outcome.is_accepted() {
        tracing::debug!(
            rejected_x = outcome.rejected_x,
            rejected_y = outcome.rejected_y,
            "resize left the canvas; restored last accepted scale"
        );
    }
    host.set_object_geometry(rect_id, selection.geometry());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryScene;
    use crate::host::ImageTarget;

    #[test]
    fn missing_target_leaves_host_untouched() {
        let mut scene = MemoryScene::new();
        let widget = MdaWidget::attach(&mut scene, "#missing", &MdaOptions::default());
        assert!(widget.is_none());
        assert!(scene.surface().is_none());
        assert_eq!(scene.objects().count(), 0);
        assert_eq!(scene.render_requests(), 0);
    }

    #[test]
    fn attach_scales_surface_and_image() {
        let mut scene =
            MemoryScene::new().with_target("#photo", ImageTarget::new(1000.0, 600.0));
        let widget = MdaWidget::attach(&mut scene, "#photo", &MdaOptions::default())
            .expect("widget should attach");

        assert_eq!(widget.scale(), 0.5);
        assert_eq!(widget.canvas(), CanvasBounds::new(500.0, 300.0));
        assert_eq!(scene.surface(), Some(CanvasBounds::new(500.0, 300.0)));
        assert_eq!(
            scene.object(widget.image_object()),
            Some(&SceneObject::Image {
                target: ImageTarget::new(1000.0, 600.0),
                scale: 0.5
            })
        );
    }

    #[test]
    fn unconstrained_options_keep_natural_size() {
        let mut scene = MemoryScene::new().with_target("#photo", ImageTarget::new(800.0, 450.0));
        let options = MdaOptions::default().with_max_size(None, None);
        let widget =
            MdaWidget::attach(&mut scene, "#photo", &options).expect("widget should attach");
        assert_eq!(widget.scale(), 1.0);
        assert_eq!(widget.canvas(), CanvasBounds::new(800.0, 450.0));
    }

    #[test]
    fn mode_selects_controller() {
        let mut scene = MemoryScene::new().with_target("#photo", ImageTarget::new(400.0, 300.0));
        let draw = MdaWidget::attach(&mut scene, "#photo", &MdaOptions::default())
            .expect("draw widget");
        assert_eq!(draw.mode(), SelectionMode::Draw);
        assert!(draw.mask().is_none());
        assert!(!draw.is_selected());

        let overlay_options = MdaOptions::default().with_mode(SelectionMode::Overlay);
        let overlay =
            MdaWidget::attach(&mut scene, "#photo", &overlay_options).expect("overlay widget");
        assert_eq!(overlay.mode(), SelectionMode::Overlay);
        assert!(overlay.mask().is_some());
        assert!(overlay.is_selected());
    }
}
