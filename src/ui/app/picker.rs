use crate::inspect::TableKey;
use crate::ui::{Arrow, PanelWidget};

use super::App;

impl App {
    pub(super) fn handle_picker_direction(&mut self, arrow: Arrow) {
        if !matches!(arrow, Arrow::Up | Arrow::Down) {
            return;
        }
        if !self.picker.handle_direction(arrow) {
            return;
        }
        let Some(name) = self.picker.selected() else {
            return;
        };

        let key = TableKey::new(&self.selection.schema, name);
        if let Err(err) = self.select_table(&key) {
            tracing::warn!(%err, "ignoring stale picker selection");
            // put the highlight back on the table that is still selected
            match self.selection.table.clone() {
                Some(current) => self.picker.select_name(&current),
                None => self.picker.state.select(None),
            }
        }
    }
}
