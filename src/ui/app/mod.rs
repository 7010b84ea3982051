mod detail;
mod picker;

use crate::config::Config;
use crate::error::ScopeError;
use crate::inspect::{SchemaIndex, TableKey};
use crate::ui::{
    build_details, clamp_width, compute_layout, Action, AppEvent, Arrow, Chrome, DetailDatasets,
    DetailGrid, DetailTab, KeyMap, PanelLayout, PanelWidget, PickerList, Theme,
};

pub const SPINNER_FRAMES: &[&str] = &["🌍", "🌎", "🌏"];

/// Panels that can hold keyboard focus, in ring order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Picker,
    TabBar,
    DetailContent,
}

impl Focus {
    pub const ALL: [Focus; 3] = [Focus::Picker, Focus::TabBar, Focus::DetailContent];

    fn position(self) -> usize {
        match self {
            Focus::Picker => 0,
            Focus::TabBar => 1,
            Focus::DetailContent => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub schema: String,
    pub table: Option<String>,
    pub tab: DetailTab,
}

/// Terminal size with the width already clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

/// One grid per detail tab for the selected table.
#[derive(Debug)]
pub struct DetailPanels {
    pub columns: DetailGrid,
    pub indexes: DetailGrid,
    pub foreign_keys: DetailGrid,
}

impl DetailPanels {
    pub fn new(datasets: DetailDatasets) -> Self {
        Self {
            columns: DetailGrid::new(datasets.columns),
            indexes: DetailGrid::new(datasets.indexes),
            foreign_keys: DetailGrid::new(datasets.foreign_keys),
        }
    }

    pub fn get(&self, tab: DetailTab) -> &DetailGrid {
        match tab {
            DetailTab::Columns => &self.columns,
            DetailTab::Indexes => &self.indexes,
            DetailTab::ForeignKeys => &self.foreign_keys,
        }
    }

    pub fn get_mut(&mut self, tab: DetailTab) -> &mut DetailGrid {
        match tab {
            DetailTab::Columns => &mut self.columns,
            DetailTab::Indexes => &mut self.indexes,
            DetailTab::ForeignKeys => &mut self.foreign_keys,
        }
    }

    fn grids_mut(&mut self) -> [&mut DetailGrid; 3] {
        [&mut self.columns, &mut self.indexes, &mut self.foreign_keys]
    }
}

pub struct App {
    pub theme: Theme,
    pub title: String,
    pub keymap: KeyMap,
    pub index: SchemaIndex,

    pub focus: Focus,
    pub selection: Selection,
    pub viewport: Viewport,
    pub max_width: u16,

    // Mode flags
    pub should_quit: bool,
    pub easter_egg: bool,
    pub show_full_help: bool,
    pub spinner_frame: usize,

    // Widgets
    pub picker: PickerList,
    pub details: Option<DetailPanels>,

    /// `None` while the terminal is too small for the panels.
    pub layout: Option<PanelLayout>,
}

impl App {
    pub fn new(index: SchemaIndex, config: &Config) -> Self {
        let mut app = Self {
            theme: Theme::named(config.theme),
            title: config.title.clone(),
            keymap: config.keys.clone(),
            index,

            focus: Focus::Picker,
            selection: Selection {
                schema: String::new(),
                table: None,
                tab: DetailTab::Columns,
            },
            viewport: Viewport::default(),
            max_width: config.max_width,

            should_quit: false,
            easter_egg: false,
            show_full_help: false,
            spinner_frame: 0,

            picker: PickerList::default(),
            details: None,
            layout: None,
        };

        let (schema, table) = app.index.default_selection();
        let schema = schema.to_string();
        app.select_schema(&schema);
        if let Some(key) = table {
            if let Err(err) = app.select_table(&key) {
                tracing::warn!(%err, "default table selection failed");
            }
        }
        app.set_focus(Focus::Picker);
        app
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        if self.should_quit {
            return;
        }
        match event {
            AppEvent::Resize { width, height } => self.resize(width, height),
            AppEvent::Tick => {
                self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
            }
            AppEvent::Cancel => self.terminate(),
            AppEvent::Key(key) => {
                if self.easter_egg {
                    // the key only dismisses the overlay
                    self.easter_egg = false;
                    return;
                }
                if let Some(action) = self.keymap.resolve(&key) {
                    self.handle_action(action);
                }
            }
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        tracing::debug!(?action, focus = ?self.focus, "action");
        match action {
            Action::FocusNext => self.set_focus(self.focus.next()),
            Action::FocusPrevious => self.set_focus(self.focus.previous()),
            Action::Up => self.handle_direction(Arrow::Up),
            Action::Down => self.handle_direction(Arrow::Down),
            Action::Left => self.handle_direction(Arrow::Left),
            Action::Right => self.handle_direction(Arrow::Right),
            Action::NextSchema => self.cycle_schema(),
            Action::Help => {
                self.show_full_help = !self.show_full_help;
                self.relayout();
            }
            Action::Quit => self.terminate(),
            Action::EasterEgg => self.easter_egg = true,
        }
    }

    fn handle_direction(&mut self, arrow: Arrow) {
        match self.focus {
            Focus::Picker => self.handle_picker_direction(arrow),
            Focus::TabBar => self.handle_tab_bar_direction(arrow),
            Focus::DetailContent => self.handle_detail_direction(arrow),
        }
    }

    /// Zero-sized reports are ignored and the previous viewport kept.
    pub fn resize(&mut self, width: u16, height: u16) {
        if width == 0 || height == 0 {
            tracing::debug!(width, height, "ignoring empty resize");
            return;
        }
        self.viewport = Viewport {
            width: clamp_width(width, self.max_width),
            height,
        };
        self.relayout();
    }

    /// Show `name`'s tables in the picker with nothing selected.
    /// Returns false for an unknown schema, leaving state untouched.
    pub fn select_schema(&mut self, name: &str) -> bool {
        if self.index.schema(name).is_none() {
            tracing::warn!(schema = name, "ignoring unknown schema");
            return false;
        }
        self.selection = Selection {
            schema: name.to_string(),
            table: None,
            tab: DetailTab::Columns,
        };
        self.picker.set_items(self.index.table_names(name));
        self.details = None;
        self.relayout();
        true
    }

    /// Select `key`, reset the tab to Columns and rebuild the detail grids.
    pub fn select_table(&mut self, key: &TableKey) -> Result<(), ScopeError> {
        if !self.index.contains(key) {
            return Err(ScopeError::UnknownTableKey {
                schema: key.schema.clone(),
                table: key.table.clone(),
            });
        }
        if key.schema != self.selection.schema {
            self.select_schema(&key.schema);
        }

        let width = self.layout.map_or(0, |l| l.detail_width);
        let datasets = match self.index.table(key) {
            Some(table) => build_details(table, width),
            None => return Ok(()),
        };

        self.selection.table = Some(key.table.clone());
        self.selection.tab = DetailTab::Columns;
        self.details = Some(DetailPanels::new(datasets));
        self.picker.select_name(&key.table);
        self.relayout();
        self.sync_focus();
        tracing::debug!(schema = %key.schema, table = %key.table, "table selected");
        Ok(())
    }

    /// Move to the next schema and select its first table, if any.
    fn cycle_schema(&mut self) {
        let next = self.index.next_schema(&self.selection.schema).name.clone();
        self.select_schema(&next);
        if let Some(first) = self.picker.items.first() {
            let key = TableKey::new(&next, first);
            if let Err(err) = self.select_table(&key) {
                tracing::warn!(%err, "first table of schema not selectable");
            }
        }
        self.sync_focus();
    }

    pub fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.sync_focus();
    }

    fn sync_focus(&mut self) {
        self.picker.set_focused(self.focus == Focus::Picker);
        let content_focused = self.focus == Focus::DetailContent;
        let tab = self.selection.tab;
        if let Some(panels) = &mut self.details {
            for grid in panels.grids_mut() {
                let focused = content_focused && grid.tab() == tab;
                grid.set_focused(focused);
            }
        }
    }

    pub fn selected_key(&self) -> Option<TableKey> {
        self.selection
            .table
            .as_ref()
            .map(|t| TableKey::new(&self.selection.schema, t))
    }

    pub fn active_grid(&self) -> Option<&DetailGrid> {
        self.details.as_ref().map(|p| p.get(self.selection.tab))
    }

    fn active_grid_mut(&mut self) -> Option<&mut DetailGrid> {
        let tab = self.selection.tab;
        self.details.as_mut().map(|p| p.get_mut(tab))
    }

    pub fn help_lines(&self) -> Vec<String> {
        self.keymap.help_lines(self.show_full_help)
    }

    /// Recompute panel geometry and push sizes into the widgets.
    pub fn relayout(&mut self) {
        let footer_height = self.help_lines().len() as u16;
        let chrome = Chrome::with_footer(footer_height);
        match compute_layout(
            self.viewport.width,
            self.viewport.height,
            self.max_width,
            chrome,
        ) {
            Ok(layout) => {
                self.picker
                    .set_size(layout.picker_width, layout.picker_height);
                if let Some(panels) = &mut self.details {
                    for grid in panels.grids_mut() {
                        grid.set_size(layout.detail_width, layout.content_height);
                    }
                }
                self.layout = Some(layout);
            }
            Err(err) => {
                if self.viewport != Viewport::default() {
                    tracing::debug!(%err, "layout degenerate");
                }
                self.layout = None;
            }
        }
    }

    /// Stop the session. Later events are ignored.
    pub fn terminate(&mut self) {
        if !self.should_quit {
            tracing::info!("shutting down");
        }
        self.should_quit = true;
    }
}
