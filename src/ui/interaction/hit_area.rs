//! Hit area system for mouse interactions.
//!
//! Components register hit areas during rendering, and the event loop queries
//! the registry to determine what action to take on mouse events.

use ratatui::layout::Rect;

/// Represents an action that can be triggered by clicking a hit area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Give the task input keyboard focus
    FocusInput,
    /// The "Run task" button
    SubmitTask,
    /// Approve the pending step
    ApproveStep,
    /// Deny the pending step
    DenyStep,
}

/// A clickable region with an associated action.
#[derive(Debug, Clone)]
pub struct HitArea {
    /// The rectangular region that responds to clicks
    pub rect: Rect,
    /// The action to trigger when this area is clicked
    pub action: ClickAction,
}

impl HitArea {
    pub fn new(rect: Rect, action: ClickAction) -> Self {
        Self { rect, action }
    }

    /// Check if a point is within this hit area.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.rect.x
            && x < self.rect.x.saturating_add(self.rect.width)
            && y >= self.rect.y
            && y < self.rect.y.saturating_add(self.rect.height)
    }
}

/// Registry for managing hit areas across the UI.
///
/// Cleared at the start of every render; areas registered later sit on top.
#[derive(Debug, Default)]
pub struct HitAreaRegistry {
    areas: Vec<HitArea>,
    /// Action under the mouse pointer, if any
    hovered: Option<ClickAction>,
}

impl HitAreaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all areas. Hover state survives so it can be redrawn.
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn register(&mut self, rect: Rect, action: ClickAction) {
        self.areas.push(HitArea::new(rect, action));
    }

    /// Topmost action at the given position.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<ClickAction> {
        self.areas
            .iter()
            .rev()
            .find(|area| area.contains(x, y))
            .map(|area| area.action)
    }

    /// Track the pointer; returns true when the hovered action changed.
    pub fn update_hover(&mut self, x: u16, y: u16) -> bool {
        let hovered = self.hit_test(x, y);
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    pub fn is_hovered(&self, action: ClickAction) -> bool {
        self.hovered == Some(action)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges() {
        let area = HitArea::new(Rect::new(10, 5, 4, 2), ClickAction::SubmitTask);
        assert!(area.contains(10, 5));
        assert!(area.contains(13, 6));
        assert!(!area.contains(14, 5));
        assert!(!area.contains(10, 7));
        assert!(!area.contains(9, 5));
    }

    #[test]
    fn test_later_registration_wins() {
        let mut registry = HitAreaRegistry::new();
        registry.register(Rect::new(0, 0, 20, 10), ClickAction::FocusInput);
        registry.register(Rect::new(5, 5, 4, 1), ClickAction::ApproveStep);

        assert_eq!(registry.hit_test(6, 5), Some(ClickAction::ApproveStep));
        assert_eq!(registry.hit_test(1, 1), Some(ClickAction::FocusInput));
        assert_eq!(registry.hit_test(30, 30), None);
    }

    #[test]
    fn test_clear_and_hover() {
        let mut registry = HitAreaRegistry::new();
        registry.register(Rect::new(0, 0, 5, 1), ClickAction::SubmitTask);

        assert!(registry.update_hover(2, 0));
        assert!(registry.is_hovered(ClickAction::SubmitTask));
        assert!(!registry.update_hover(3, 0));

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.hit_test(2, 0), None);
    }
}
