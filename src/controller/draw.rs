use crate::config::MdaOptions;
use crate::geometry::{CanvasBounds, Point};
use crate::host::{Cursor, HostEvent, ObjectId, SceneHost, SceneObject};
use crate::selection::SelectionRect;
use crate::state::{DragEvent, DragMachine};

use super::{apply_move, apply_resize, rect_style};

const DRAW_FILL_OPACITY: f64 = 0.5;

/// Drag-to-create selection. A press outside the current rectangle starts a new one anchored
/// at the press; the rectangle follows the pointer until release and is then focused so the
/// host's handles can move and resize it.
#[derive(Debug)]
pub struct DrawController {
    canvas: CanvasBounds,
    rect_id: ObjectId,
    selection: SelectionRect,
    machine: DragMachine,
}

impl DrawController {
    pub(super) fn attach<H: SceneHost>(
        host: &mut H,
        canvas: CanvasBounds,
        options: &MdaOptions,
    ) -> Self {
        let selection = SelectionRect::new();
        let rect_id = host.add_object(SceneObject::Rect {
            geometry: selection.geometry(),
            style: rect_style(Some(options.selection_fill), DRAW_FILL_OPACITY),
        });
        host.set_default_cursor(Cursor::Crosshair);
        Self {
            canvas,
            rect_id,
            selection,
            machine: DragMachine::new(),
        }
    }

    pub fn selection(&self) -> &SelectionRect {
        &self.selection
    }

    pub fn rect_object(&self) -> ObjectId {
        self.rect_id
    }

    pub fn is_dragging(&self) -> bool {
        self.machine.state().is_dragging()
    }

    pub fn is_selected(&self) -> bool {
        self.machine.is_selected()
    }

    pub fn handle_event<H: SceneHost>(&mut self, host: &mut H, event: HostEvent<H::PointerEvent>) {
        match event {
            HostEvent::PointerDown(raw) => {
                let point = host.pointer_position(&raw);
                self.pointer_down(host, point);
            }
            HostEvent::PointerMove(raw) => {
                let point = host.pointer_position(&raw);
                self.pointer_move(host, point);
            }
            HostEvent::PointerUp(raw) => {
                let point = host.pointer_position(&raw);
                self.pointer_up(host, point);
            }
            HostEvent::ObjectMoved(id) if id == self.rect_id => {
                if apply_move(host, self.rect_id, &mut self.selection, self.canvas) {
                    host.request_render();
                }
            }
            HostEvent::ObjectScaled(id) if id == self.rect_id => {
                if apply_resize(host, self.rect_id, &mut self.selection, self.canvas) {
                    host.request_render();
                }
            }
            HostEvent::ObjectMoved(id) | HostEvent::ObjectScaled(id) => {
                tracing::trace!(?id, "ignoring transform of foreign object");
            }
        }
    }

    pub fn pointer_down<H: SceneHost>(&mut self, host: &mut H, point: Point) {
        if host.active_object() == Some(self.rect_id) || host.contains_point(self.rect_id, point)
        {
            tracing::trace!(?point, "press on current selection; leaving it to the host");
            return;
        }
        if let Err(err) = self.machine.transition(DragEvent::PointerDown(point)) {
            tracing::trace!(%err, "pointer down ignored");
            return;
        }

        host.set_active_object(None);
        self.selection.reset();
        host.set_object_geometry(self.rect_id, self.selection.geometry());
        tracing::debug!(anchor = ?point, "selection drag started");
    }

    pub fn pointer_move<H: SceneHost>(&mut self, host: &mut H, point: Point) {
        let session = match self.machine.transition(DragEvent::PointerMove(point)) {
            Ok(state) => state.session(),
            Err(err) => {
                tracing::trace!(%err, "pointer move ignored");
                None
            }
        };
        let Some(session) = session else {
            return;
        };

        self.selection
            .set_from_drag(session.anchor, point, self.canvas);
        host.set_object_geometry(self.rect_id, self.selection.geometry());
        host.bring_to_front(self.rect_id);
        host.request_render();
    }

    pub fn pointer_up<H: SceneHost>(&mut self, host: &mut H, point: Point) {
        if let Err(err) = self.machine.transition(DragEvent::PointerUp(point)) {
            tracing::trace!(%err, "pointer up ignored");
            return;
        }

        host.set_active_object(Some(self.rect_id));
        host.request_render();
        tracing::debug!(bounds = ?self.selection.bounds(), "selection committed");
    }
}
