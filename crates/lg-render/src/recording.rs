//! In-memory `Canvas2d` that records what would have been drawn.
//!
//! Tracks the transform stack and fill state the way a canvas context does,
//! so each recorded fill carries the exact state it was issued under.
//! Used by the test suites and by headless embeddings that want frame
//! output without a browser.

use crate::canvas::{Canvas2d, CompositeOp, RadialGradient, RenderResult};
use crate::surfaces::{SurfaceBackend, SurfaceRole};
use kurbo::{Affine, Circle, Rect};
use lg_core::SurfaceLayout;

/// Fill style and compositing state captured at fill time.
#[derive(Debug, Clone, PartialEq)]
pub struct FillRecord {
    pub path: Vec<Circle>,
    pub gradient: Option<RadialGradient>,
    pub composite: CompositeOp,
    pub filter: Option<String>,
    pub transform: Affine,
}

impl FillRecord {
    /// Device-space radius of the first path circle.
    pub fn device_radius(&self) -> Option<f64> {
        let scale = self.transform.determinant().abs().sqrt();
        self.path.first().map(|c| c.radius * scale)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Configure(SurfaceLayout),
    ClearRect(Rect),
    FillRect {
        rect: Rect,
        gradient: Option<RadialGradient>,
        transform: Affine,
    },
    Fill(FillRecord),
    DrawSurface {
        source: u64,
        source_layout: Option<SurfaceLayout>,
        dest: Rect,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
struct DrawState {
    transform: Affine,
    gradient: Option<RadialGradient>,
    composite: CompositeOp,
    filter: Option<String>,
    line_width: f64,
}

#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    id: u64,
    layout: Option<SurfaceLayout>,
    state: DrawState,
    saved: Vec<DrawState>,
    path: Vec<Circle>,
    commands: Vec<DrawCmd>,
    /// When set, the next fallible call fails with this message.
    poisoned: Option<String>,
}

impl RecordingCanvas {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            layout: None,
            state: DrawState::default(),
            saved: Vec::new(),
            path: Vec::new(),
            commands: Vec::new(),
            poisoned: None,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn layout(&self) -> Option<&SurfaceLayout> {
        self.layout.as_ref()
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.commands
    }

    /// Hand back and forget everything recorded so far.
    pub fn take_commands(&mut self) -> Vec<DrawCmd> {
        std::mem::take(&mut self.commands)
    }

    pub fn fills(&self) -> impl Iterator<Item = &FillRecord> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Fill(record) => Some(record),
            _ => None,
        })
    }

    pub fn current_transform(&self) -> Affine {
        self.state.transform
    }

    pub fn line_width(&self) -> f64 {
        self.state.line_width
    }

    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }

    /// Make the next fallible drawing call fail with `message`.
    pub fn poison(&mut self, message: &str) {
        self.poisoned = Some(message.to_string());
    }

    fn check(&mut self) -> RenderResult {
        match self.poisoned.take() {
            Some(message) => Err(message),
            None => Ok(()),
        }
    }
}

impl Canvas2d for RecordingCanvas {
    fn configure(&mut self, layout: &SurfaceLayout) -> RenderResult {
        self.check()?;
        self.layout = Some(*layout);
        self.state = DrawState {
            transform: Affine::scale(layout.dpr),
            ..DrawState::default()
        };
        self.saved.clear();
        self.path.clear();
        self.commands.push(DrawCmd::Configure(*layout));
        Ok(())
    }

    fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn transform(&mut self, affine: Affine) -> RenderResult {
        self.check()?;
        self.state.transform *= affine;
        Ok(())
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCmd::ClearRect(rect));
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCmd::FillRect {
            rect,
            gradient: self.state.gradient.clone(),
            transform: self.state.transform,
        });
    }

    fn set_fill_gradient(&mut self, gradient: &RadialGradient) -> RenderResult {
        self.check()?;
        if gradient.start.radius < 0.0 || gradient.end.radius < 0.0 {
            return Err(format!(
                "negative gradient radius ({}, {})",
                gradient.start.radius, gradient.end.radius
            ));
        }
        self.state.gradient = Some(gradient.clone());
        Ok(())
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn arc(&mut self, circle: Circle) -> RenderResult {
        self.check()?;
        if circle.radius < 0.0 {
            return Err(format!("negative arc radius {}", circle.radius));
        }
        self.path.push(circle);
        Ok(())
    }

    fn fill(&mut self) {
        self.commands.push(DrawCmd::Fill(FillRecord {
            path: self.path.clone(),
            gradient: self.state.gradient.clone(),
            composite: self.state.composite,
            filter: self.state.filter.clone(),
            transform: self.state.transform,
        }));
    }

    fn set_composite(&mut self, op: CompositeOp) -> RenderResult {
        self.check()?;
        self.state.composite = op;
        Ok(())
    }

    fn set_filter(&mut self, filter: &str) {
        self.state.filter = Some(filter.to_string());
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn draw_surface(&mut self, source: &Self, dest: Rect) -> RenderResult {
        self.check()?;
        // drawImage throws InvalidStateError for a zero-sized source canvas.
        if source.layout.is_some_and(|l| l.is_empty()) {
            return Err(format!("surface {} has a zero-sized backing store", source.id));
        }
        self.commands.push(DrawCmd::DrawSurface {
            source: source.id,
            source_layout: source.layout,
            dest,
        });
        Ok(())
    }
}

/// Backend handing out numbered [`RecordingCanvas`] surfaces.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u64,
    created: Vec<(SurfaceRole, SurfaceLayout)>,
    fail_role: Option<SurfaceRole>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that cannot create surfaces for `role`, like a page whose
    /// canvas has no 2D context.
    pub fn failing(role: SurfaceRole) -> Self {
        Self {
            fail_role: Some(role),
            ..Self::default()
        }
    }

    /// Every surface created so far, oldest first.
    pub fn created(&self) -> &[(SurfaceRole, SurfaceLayout)] {
        &self.created
    }
}

impl SurfaceBackend for RecordingBackend {
    type Surface = RecordingCanvas;

    fn create_surface(
        &mut self,
        role: SurfaceRole,
        layout: &SurfaceLayout,
    ) -> RenderResult<RecordingCanvas> {
        if self.fail_role == Some(role) {
            return Err(format!("no 2d context for {role:?} surface"));
        }
        self.created.push((role, *layout));
        self.next_id += 1;
        Ok(RecordingCanvas::new(self.next_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lg_core::Viewport;

    #[test]
    fn configure_installs_dpr_scale() {
        let mut canvas = RecordingCanvas::new(1);
        let layout = SurfaceLayout::new(Viewport::new(100.0, 50.0), Some(2.0), true);
        canvas.configure(&layout).unwrap();
        assert_eq!(canvas.current_transform(), Affine::scale(2.0));
        assert_eq!(canvas.commands(), &[DrawCmd::Configure(layout)]);
    }

    #[test]
    fn restore_pops_transform() {
        let mut canvas = RecordingCanvas::new(1);
        canvas.save();
        canvas.transform(Affine::scale(0.5)).unwrap();
        assert_eq!(canvas.save_depth(), 1);
        canvas.restore();
        assert_eq!(canvas.current_transform(), Affine::IDENTITY);
        assert_eq!(canvas.save_depth(), 0);
    }

    #[test]
    fn poison_fails_once() {
        let mut canvas = RecordingCanvas::new(1);
        canvas.poison("context lost");
        assert_eq!(canvas.arc(Circle::new((0.0, 0.0), 1.0)), Err("context lost".to_string()));
        assert!(canvas.arc(Circle::new((0.0, 0.0), 1.0)).is_ok());
    }

    #[test]
    fn zero_sized_source_rejected() {
        let mut visible = RecordingCanvas::new(1);
        let mut source = RecordingCanvas::new(2);
        let empty = SurfaceLayout::new(Viewport::new(0.0, 600.0), Some(1.0), true);
        visible.configure(&empty).unwrap();
        source.configure(&empty).unwrap();
        let dest = Rect::new(0.0, 0.0, 0.0, 600.0);
        assert!(visible.draw_surface(&source, dest).is_err());
    }

    #[test]
    fn negative_radius_rejected() {
        let mut canvas = RecordingCanvas::new(1);
        assert!(canvas.arc(Circle::new((0.0, 0.0), -1.0)).is_err());
    }
}
