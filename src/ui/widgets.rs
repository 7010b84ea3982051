use ratatui::widgets::{ListState, TableState};

use crate::ui::{Dataset, DetailRow, DetailTab};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

/// What the navigation layer needs from a panel widget. Rendering stays in
/// the compositor; widgets only hold content, size, focus and selection.
pub trait PanelWidget {
    type Item;

    fn set_size(&mut self, width: u16, height: u16);
    fn set_items(&mut self, items: Vec<Self::Item>);
    fn set_focused(&mut self, focused: bool);
    fn is_focused(&self) -> bool;
    fn selected(&self) -> Option<&Self::Item>;

    /// Returns true when the selection moved.
    fn handle_direction(&mut self, arrow: Arrow) -> bool;
}

/// Move `current` one step within `0..len` without wrapping. Nothing
/// selected plus a vertical step lands on the first row.
fn step(current: Option<usize>, len: usize, arrow: Arrow) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match (current, arrow) {
        (_, Arrow::Left | Arrow::Right) => current,
        (None, _) => Some(0),
        (Some(i), Arrow::Up) => Some(i.min(len - 1).saturating_sub(1)),
        (Some(i), Arrow::Down) => Some((i + 1).min(len - 1)),
    }
}

/// The table list of the selected schema.
#[derive(Debug, Default)]
pub struct PickerList {
    pub items: Vec<String>,
    pub state: ListState,
    pub width: u16,
    pub height: u16,
    focused: bool,
}

impl PickerList {
    pub fn select_name(&mut self, name: &str) {
        let idx = self.items.iter().position(|item| item == name);
        self.state.select(idx);
    }
}

impl PanelWidget for PickerList {
    type Item = String;

    fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Replaces the rows and clears the selection.
    fn set_items(&mut self, items: Vec<String>) {
        self.state = ListState::default();
        self.items = items;
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn selected(&self) -> Option<&String> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    fn handle_direction(&mut self, arrow: Arrow) -> bool {
        let before = self.state.selected();
        let after = step(before, self.items.len(), arrow);
        self.state.select(after);
        before != after
    }
}

/// One scrollable grid of the detail region.
#[derive(Debug)]
pub struct DetailGrid {
    pub dataset: Dataset,
    pub state: TableState,
    pub height: u16,
    focused: bool,
}

impl DetailGrid {
    pub fn new(dataset: Dataset) -> Self {
        let mut grid = Self {
            dataset,
            state: TableState::default(),
            height: 0,
            focused: false,
        };
        grid.reset_selection();
        grid
    }

    pub fn tab(&self) -> DetailTab {
        self.dataset.tab
    }

    fn reset_selection(&mut self) {
        let first = (!self.dataset.is_empty()).then_some(0);
        self.state = TableState::default();
        self.state.select(first);
    }
}

impl PanelWidget for DetailGrid {
    type Item = DetailRow;

    fn set_size(&mut self, width: u16, height: u16) {
        self.dataset.resize(width);
        self.height = height;
    }

    fn set_items(&mut self, items: Vec<DetailRow>) {
        self.dataset.rows = items;
        self.reset_selection();
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn is_focused(&self) -> bool {
        self.focused
    }

    fn selected(&self) -> Option<&DetailRow> {
        self.state.selected().and_then(|i| self.dataset.rows.get(i))
    }

    fn handle_direction(&mut self, arrow: Arrow) -> bool {
        let before = self.state.selected();
        let after = step(before, self.dataset.rows.len(), arrow);
        self.state.select(after);
        before != after
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picker(names: &[&str]) -> PickerList {
        let mut p = PickerList::default();
        p.set_items(names.iter().map(|n| n.to_string()).collect());
        p
    }

    #[test]
    fn test_picker_movement_is_bounded() {
        let mut p = picker(&["a", "b"]);
        assert!(p.selected().is_none());
        assert!(p.handle_direction(Arrow::Up));
        assert_eq!(p.selected().map(String::as_str), Some("a"));
        assert!(!p.handle_direction(Arrow::Up));
        assert!(p.handle_direction(Arrow::Down));
        assert!(!p.handle_direction(Arrow::Down));
        assert_eq!(p.selected().map(String::as_str), Some("b"));
    }

    #[test]
    fn test_picker_ignores_left_right() {
        let mut p = picker(&["a", "b"]);
        p.select_name("b");
        assert!(!p.handle_direction(Arrow::Left));
        assert!(!p.handle_direction(Arrow::Right));
        assert_eq!(p.state.selected(), Some(1));
    }

    #[test]
    fn test_empty_picker() {
        let mut p = picker(&[]);
        assert!(p.selected().is_none());
        assert!(!p.handle_direction(Arrow::Down));
    }

    #[test]
    fn test_select_name() {
        let mut p = picker(&["a", "b", "c"]);
        p.select_name("c");
        assert_eq!(p.state.selected(), Some(2));
        p.select_name("zzz");
        assert!(p.selected().is_none());
    }

    #[test]
    fn test_empty_grid_ignores_movement() {
        let mut grid = DetailGrid::new(Dataset::new(DetailTab::Indexes, Vec::new(), 40));
        assert!(grid.selected().is_none());
        assert!(!grid.handle_direction(Arrow::Down));
        assert!(grid.state.selected().is_none());
    }

    #[test]
    fn test_grid_set_items_and_size() {
        let mut grid = DetailGrid::new(Dataset::new(DetailTab::Columns, Vec::new(), 40));
        grid.set_items(vec![
            ["a".into(), "int".into(), "No".into()],
            ["b".into(), "int".into(), "Yes".into()],
        ]);
        assert_eq!(grid.state.selected(), Some(0));
        assert!(grid.handle_direction(Arrow::Down));
        assert_eq!(grid.selected().map(|r| r[0].as_str()), Some("b"));

        grid.set_size(62, 10);
        assert_eq!(grid.dataset.widths, [30, 20, 10]);
        assert_eq!(grid.height, 10);
    }
}
