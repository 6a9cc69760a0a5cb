use ratatui::Frame;
use ratatui::layout::Rect;

/// A reusable UI component.
///
/// Components receive the session data they show as borrowed props and
/// render into a `Rect`. Anything that must survive between frames (list
/// offsets, scroll positions) lives in a separate state struct that the
/// component borrows mutably.
///
/// # Mutability
///
/// `render` takes `&mut self` so a component can write back presentation
/// state (e.g. the scroll offset ratatui settled on) during the render pass.
/// This aligns with Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal events itself instead of passing them
/// to the core.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
