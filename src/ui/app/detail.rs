use crate::ui::{Arrow, PanelWidget};

use super::App;

impl App {
    /// Left and Right both advance to the next tab.
    pub(super) fn handle_tab_bar_direction(&mut self, arrow: Arrow) {
        match arrow {
            Arrow::Left | Arrow::Right => {
                self.selection.tab = self.selection.tab.next();
                self.sync_focus();
            }
            Arrow::Up | Arrow::Down => {}
        }
    }

    pub(super) fn handle_detail_direction(&mut self, arrow: Arrow) {
        if !matches!(arrow, Arrow::Up | Arrow::Down) {
            return;
        }
        if let Some(grid) = self.active_grid_mut() {
            grid.handle_direction(arrow);
        }
    }
}
