//! Panel geometry for the dashboard.
//!
//! Everything here is a pure function of the terminal size and the chrome
//! around the panels, recomputed on every resize and table selection.

use unicode_width::UnicodeWidthStr;

use crate::error::ScopeError;
use crate::ui::DetailTab;

pub const DEFAULT_MAX_WIDTH: u16 = 250;

pub const TITLE_HEIGHT: u16 = 1;
/// The two horizontal rules framing the center region.
pub const FIXED_MARGIN: i32 = 2;
pub const BORDER_WIDTH: u16 = 2;
pub const BORDER_HEIGHT: u16 = 2;
/// The picker spends one line on its "N tables" header.
pub const PICKER_HEIGHT_ADJUSTMENT: i32 = -1;
/// The detail grid spends one line on its column header.
pub const CONTENT_HEIGHT_ADJUSTMENT: i32 = -1;

pub const TABS_SEPARATOR: &str = " · ";

/// Fixed-size pieces around the panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub title_height: u16,
    pub footer_height: u16,
    pub border_width: u16,
    pub border_height: u16,
}

impl Chrome {
    pub fn with_footer(footer_height: u16) -> Self {
        Self {
            title_height: TITLE_HEIGHT,
            footer_height,
            border_width: BORDER_WIDTH,
            border_height: BORDER_HEIGHT,
        }
    }
}

/// Inner sizes of every panel. Outer sizes add the border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub term_width: u16,
    pub term_height: u16,
    pub chrome: Chrome,
    pub center_height: u16,
    pub picker_width: u16,
    pub picker_height: u16,
    pub detail_width: u16,
    pub tab_bar_height: u16,
    pub content_height: u16,
}

impl PanelLayout {
    pub fn picker_outer_width(&self) -> u16 {
        self.picker_width + self.chrome.border_width
    }

    pub fn detail_outer_width(&self) -> u16 {
        self.detail_width + self.chrome.border_width
    }
}

pub fn clamp_width(width: u16, max_width: u16) -> u16 {
    width.min(max_width)
}

pub fn compute_layout(
    term_width: u16,
    term_height: u16,
    max_width: u16,
    chrome: Chrome,
) -> Result<PanelLayout, ScopeError> {
    let term_width = clamp_width(term_width, max_width);
    let degenerate = ScopeError::DegenerateGeometry {
        width: term_width,
        height: term_height,
    };

    let w = i32::from(term_width);
    let bw = i32::from(chrome.border_width);
    let bh = i32::from(chrome.border_height);

    let center_height = i32::from(term_height)
        - i32::from(chrome.title_height)
        - i32::from(chrome.footer_height)
        - FIXED_MARGIN;
    let picker_width = w / 3 - bw;
    let picker_height = center_height - bh + PICKER_HEIGHT_ADJUSTMENT;
    let detail_width = (w * 2) / 3 - bw;

    if center_height <= 0 || picker_width <= 0 || picker_height <= 0 || detail_width <= 0 {
        return Err(degenerate);
    }

    let tab_bar_height = tab_rows(detail_width as u16).len() as i32 + bh;
    let content_height = center_height - tab_bar_height - bh + CONTENT_HEIGHT_ADJUSTMENT;
    if content_height <= 0 {
        return Err(degenerate);
    }

    Ok(PanelLayout {
        term_width,
        term_height,
        chrome,
        center_height: center_height as u16,
        picker_width: picker_width as u16,
        picker_height: picker_height as u16,
        detail_width: detail_width as u16,
        tab_bar_height: tab_bar_height as u16,
        content_height: content_height as u16,
    })
}

/// Lay the tab titles out in rows no wider than `width`, greedily, the way
/// the tab bar renders them. A title wider than `width` gets a row of its own.
pub fn tab_rows(width: u16) -> Vec<Vec<DetailTab>> {
    let width = usize::from(width);
    let sep = TABS_SEPARATOR.width();
    let mut rows: Vec<Vec<DetailTab>> = Vec::new();
    let mut used = 0;

    for tab in DetailTab::ALL {
        let w = tab.title().width();
        match rows.last_mut() {
            Some(row) if used + sep + w <= width => {
                row.push(tab);
                used += sep + w;
            }
            _ => {
                rows.push(vec![tab]);
                used = w;
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chrome() -> Chrome {
        Chrome::with_footer(1)
    }

    #[test]
    fn test_regular_terminal() {
        let layout = compute_layout(120, 40, DEFAULT_MAX_WIDTH, chrome()).unwrap();
        assert_eq!(layout.term_width, 120);
        assert_eq!(layout.center_height, 36);
        assert_eq!(layout.picker_width, 38);
        assert_eq!(layout.picker_height, 33);
        assert_eq!(layout.detail_width, 78);
        assert_eq!(layout.tab_bar_height, 3);
        assert_eq!(layout.content_height, 30);
        assert!(layout.picker_outer_width() + layout.detail_outer_width() <= 120);
    }

    #[test]
    fn test_width_is_clamped() {
        let wide = compute_layout(400, 40, DEFAULT_MAX_WIDTH, chrome()).unwrap();
        let capped = compute_layout(250, 40, DEFAULT_MAX_WIDTH, chrome()).unwrap();
        assert_eq!(wide.term_width, 250);
        assert_eq!(wide, capped);
    }

    #[test]
    fn test_clamp_is_identity_below_threshold() {
        for w in 30..DEFAULT_MAX_WIDTH {
            assert_eq!(clamp_width(w, DEFAULT_MAX_WIDTH), w);
            if let Ok(layout) = compute_layout(w, 40, DEFAULT_MAX_WIDTH, chrome()) {
                assert_eq!(layout.term_width, w);
            }
        }
    }

    #[test]
    fn test_widths_are_monotonic() {
        let mut last: Option<PanelLayout> = None;
        for w in 1..=400 {
            let Ok(layout) = compute_layout(w, 60, DEFAULT_MAX_WIDTH, chrome()) else {
                continue;
            };
            if let Some(prev) = last {
                assert!(layout.picker_width >= prev.picker_width, "picker shrank at {}", w);
                assert!(layout.detail_width >= prev.detail_width, "detail shrank at {}", w);
            }
            last = Some(layout);
        }
        assert!(last.is_some());
    }

    #[test]
    fn test_short_terminal_is_degenerate() {
        let err = compute_layout(40, 3, DEFAULT_MAX_WIDTH, chrome()).unwrap_err();
        assert_eq!(err, ScopeError::DegenerateGeometry { width: 40, height: 3 });
        // center fits but the detail content does not
        assert!(compute_layout(120, 10, DEFAULT_MAX_WIDTH, chrome()).is_err());
        assert!(compute_layout(120, 11, DEFAULT_MAX_WIDTH, chrome()).is_ok());
    }

    #[test]
    fn test_narrow_terminal_is_degenerate() {
        assert!(compute_layout(6, 40, DEFAULT_MAX_WIDTH, chrome()).is_err());
        assert!(compute_layout(0, 0, DEFAULT_MAX_WIDTH, chrome()).is_err());
    }

    #[test]
    fn test_tab_bar_grows_when_tabs_wrap() {
        let wide = compute_layout(120, 40, DEFAULT_MAX_WIDTH, chrome()).unwrap();
        let narrow = compute_layout(30, 40, DEFAULT_MAX_WIDTH, chrome()).unwrap();
        assert_eq!(narrow.detail_width, 18);
        assert_eq!(narrow.tab_bar_height, 4);
        assert_eq!(
            narrow.content_height + narrow.tab_bar_height,
            wide.content_height + wide.tab_bar_height
        );
    }

    #[test]
    fn test_tab_rows_packing() {
        // "Columns · Indexes · Foreign Keys" is 32 wide
        assert_eq!(tab_rows(32).len(), 1);
        assert_eq!(
            tab_rows(31),
            vec![
                vec![DetailTab::Columns, DetailTab::Indexes],
                vec![DetailTab::ForeignKeys]
            ]
        );
        assert_eq!(tab_rows(5).len(), 3);
    }

    #[test]
    fn test_footer_height_shrinks_center() {
        let short = compute_layout(120, 40, DEFAULT_MAX_WIDTH, Chrome::with_footer(1)).unwrap();
        let tall = compute_layout(120, 40, DEFAULT_MAX_WIDTH, Chrome::with_footer(3)).unwrap();
        assert_eq!(short.center_height - tall.center_height, 2);
    }
}
