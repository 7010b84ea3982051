use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Logical actions the dashboard understands. Keys map onto these through
/// [`KeyMap`], so rebinding never touches the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FocusNext,
    FocusPrevious,
    Up,
    Down,
    Left,
    Right,
    NextSchema,
    Help,
    Quit,
    EasterEgg,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::FocusNext,
        Action::FocusPrevious,
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::NextSchema,
        Action::Help,
        Action::Quit,
        Action::EasterEgg,
    ];

    pub fn description(self) -> &'static str {
        match self {
            Action::FocusNext => "next panel",
            Action::FocusPrevious => "prev panel",
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::NextSchema => "next schema",
            Action::Help => "more",
            Action::Quit => "quit",
            Action::EasterEgg => "surprise",
        }
    }
}

/// A single key chord such as `ctrl+c`, `shift+tab` or `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn parse(chord: &str) -> Result<Self, String> {
        let chord = chord.trim().to_lowercase();
        if chord.is_empty() {
            return Err("empty key binding".to_string());
        }

        let mut modifiers = KeyModifiers::NONE;
        let mut rest = chord.as_str();
        // a bare "+" is a key, not a separator
        while let Some((prefix, tail)) = rest.split_once('+').filter(|(_, t)| !t.is_empty()) {
            match prefix {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                other => return Err(format!("unknown modifier '{}' in '{}'", other, chord)),
            }
            rest = tail;
        }

        let code = match rest {
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => {
                modifiers.remove(KeyModifiers::SHIFT);
                KeyCode::BackTab
            }
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "esc" | "escape" => KeyCode::Esc,
            "enter" | "return" => KeyCode::Enter,
            "space" => KeyCode::Char(' '),
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pgup" | "pageup" => KeyCode::PageUp,
            "pgdown" | "pagedown" => KeyCode::PageDown,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(format!("unknown key '{}'", s)),
                }
            }
        };
        Ok(Self { code, modifiers })
    }

    /// Character keys and BackTab ignore SHIFT: terminals report `?` with or
    /// without it, and crossterm always sends BackTab with SHIFT held.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        if self.code != key.code {
            return false;
        }
        let significant = if matches!(key.code, KeyCode::Char(_) | KeyCode::BackTab) {
            KeyModifiers::CONTROL | KeyModifiers::ALT
        } else {
            KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT
        };
        (key.modifiers & significant) == (self.modifiers & significant)
    }

    /// Short label used by the help footer.
    pub fn label(&self) -> String {
        match self.code {
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "shift+")?;
        }
        match self.code {
            KeyCode::Tab => write!(f, "tab"),
            KeyCode::BackTab => write!(f, "shift+tab"),
            KeyCode::Up => write!(f, "up"),
            KeyCode::Down => write!(f, "down"),
            KeyCode::Left => write!(f, "left"),
            KeyCode::Right => write!(f, "right"),
            KeyCode::Esc => write!(f, "esc"),
            KeyCode::Enter => write!(f, "enter"),
            KeyCode::Home => write!(f, "home"),
            KeyCode::End => write!(f, "end"),
            KeyCode::PageUp => write!(f, "pgup"),
            KeyCode::PageDown => write!(f, "pgdown"),
            KeyCode::Char(' ') => write!(f, "space"),
            KeyCode::Char(c) => write!(f, "{}", c),
            other => write!(f, "{:?}", other),
        }
    }
}

impl TryFrom<String> for KeyBinding {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<KeyBinding> for String {
    fn from(binding: KeyBinding) -> Self {
        binding.to_string()
    }
}

const fn key(code: KeyCode) -> KeyBinding {
    KeyBinding::new(code, KeyModifiers::NONE)
}

/// Bindings for every [`Action`]. Deserializes from the `[keys]` table of
/// the settings file; omitted actions keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyMap {
    pub focus_next: Vec<KeyBinding>,
    pub focus_previous: Vec<KeyBinding>,
    pub up: Vec<KeyBinding>,
    pub down: Vec<KeyBinding>,
    pub left: Vec<KeyBinding>,
    pub right: Vec<KeyBinding>,
    pub next_schema: Vec<KeyBinding>,
    pub help: Vec<KeyBinding>,
    pub quit: Vec<KeyBinding>,
    pub easter_egg: Vec<KeyBinding>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            focus_next: vec![key(KeyCode::Tab)],
            focus_previous: vec![key(KeyCode::BackTab)],
            up: vec![key(KeyCode::Up), key(KeyCode::Char('k'))],
            down: vec![key(KeyCode::Down), key(KeyCode::Char('j'))],
            left: vec![key(KeyCode::Left), key(KeyCode::Char('h'))],
            right: vec![key(KeyCode::Right), key(KeyCode::Char('l'))],
            next_schema: vec![key(KeyCode::Char('s'))],
            help: vec![key(KeyCode::Char('?'))],
            quit: vec![
                key(KeyCode::Char('q')),
                key(KeyCode::Esc),
                KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            ],
            easter_egg: vec![key(KeyCode::Char('a'))],
        }
    }
}

impl KeyMap {
    pub fn bindings(&self, action: Action) -> &[KeyBinding] {
        match action {
            Action::FocusNext => &self.focus_next,
            Action::FocusPrevious => &self.focus_previous,
            Action::Up => &self.up,
            Action::Down => &self.down,
            Action::Left => &self.left,
            Action::Right => &self.right,
            Action::NextSchema => &self.next_schema,
            Action::Help => &self.help,
            Action::Quit => &self.quit,
            Action::EasterEgg => &self.easter_egg,
        }
    }

    /// First action (in [`Action::ALL`] order) bound to `key`.
    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        Action::ALL
            .into_iter()
            .find(|&action| self.bindings(action).iter().any(|b| b.matches(key)))
    }

    fn entry(&self, action: Action) -> Option<String> {
        let keys = self.bindings(action);
        if keys.is_empty() {
            return None;
        }
        let labels: Vec<String> = keys.iter().take(2).map(KeyBinding::label).collect();
        Some(format!("{} {}", labels.join("/"), action.description()))
    }

    fn line(&self, actions: &[Action]) -> String {
        actions
            .iter()
            .filter_map(|&a| self.entry(a))
            .collect::<Vec<_>>()
            .join(HELP_SEPARATOR)
    }

    /// Footer lines: one line collapsed, three when expanded.
    pub fn help_lines(&self, expanded: bool) -> Vec<String> {
        if !expanded {
            return vec![self.line(&[
                Action::Up,
                Action::Down,
                Action::FocusNext,
                Action::Help,
                Action::Quit,
            ])];
        }
        let help_less = self
            .bindings(Action::Help)
            .first()
            .map(|b| format!("{} less", b.label()));
        let quit = self.entry(Action::Quit);
        vec![
            self.line(&[Action::Up, Action::Down, Action::Left, Action::Right]),
            self.line(&[Action::FocusNext, Action::FocusPrevious, Action::NextSchema]),
            [help_less, quit]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(HELP_SEPARATOR),
        ]
    }
}

const HELP_SEPARATOR: &str = " • ";

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_parse_plain_and_modified_keys() {
        assert_eq!(KeyBinding::parse("k").unwrap(), key(KeyCode::Char('k')));
        assert_eq!(KeyBinding::parse("Up").unwrap(), key(KeyCode::Up));
        assert_eq!(
            KeyBinding::parse("ctrl+c").unwrap(),
            KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        );
        assert_eq!(KeyBinding::parse("shift+tab").unwrap(), key(KeyCode::BackTab));
        assert_eq!(KeyBinding::parse("+").unwrap(), key(KeyCode::Char('+')));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(KeyBinding::parse("hyper+k").is_err());
        assert!(KeyBinding::parse("banana").is_err());
        assert!(KeyBinding::parse("").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for binding in KeyMap::default().quit {
            assert_eq!(KeyBinding::parse(&binding.to_string()).unwrap(), binding);
        }
    }

    #[test]
    fn test_char_match_ignores_shift() {
        let help = key(KeyCode::Char('?'));
        assert!(help.matches(&KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT)));
        let ctrl_c = KeyBinding::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!ctrl_c.matches(&press(KeyCode::Char('c'))));
    }

    #[test]
    fn test_resolve_default_bindings() {
        let keymap = KeyMap::default();
        assert_eq!(keymap.resolve(&press(KeyCode::Tab)), Some(Action::FocusNext));
        assert_eq!(keymap.resolve(&press(KeyCode::BackTab)), Some(Action::FocusPrevious));
        assert_eq!(keymap.resolve(&press(KeyCode::Char('j'))), Some(Action::Down));
        assert_eq!(keymap.resolve(&press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            keymap.resolve(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(keymap.resolve(&press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_shift_tab_as_reported_by_crossterm() {
        let shift_tab = KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT);
        let keymap = KeyMap::default();
        assert_eq!(keymap.resolve(&shift_tab), Some(Action::FocusPrevious));

        let parsed = KeyBinding::parse("shift+tab").unwrap();
        assert!(parsed.matches(&shift_tab));
        assert!(KeyBinding::parse("backtab").unwrap().matches(&shift_tab));
        // ctrl still distinguishes
        let ctrl_shift_tab =
            KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT | KeyModifiers::CONTROL);
        assert!(!parsed.matches(&ctrl_shift_tab));
    }

    #[test]
    fn test_remapped_keymap_from_toml() {
        let keymap: KeyMap = toml::from_str(r#"up = ["w"]
down = ["s"]
next_schema = ["n"]"#)
        .unwrap();
        assert_eq!(keymap.resolve(&press(KeyCode::Char('w'))), Some(Action::Up));
        assert_eq!(keymap.resolve(&press(KeyCode::Char('s'))), Some(Action::Down));
        assert_eq!(keymap.resolve(&press(KeyCode::Char('k'))), None);
        // untouched actions keep their defaults
        assert_eq!(keymap.resolve(&press(KeyCode::Tab)), Some(Action::FocusNext));
    }

    #[test]
    fn test_help_lines() {
        let keymap = KeyMap::default();
        let short = keymap.help_lines(false);
        assert_eq!(short.len(), 1);
        assert!(short[0].starts_with("↑/k up • ↓/j down"));
        assert!(short[0].ends_with("q/esc quit"));

        let full = keymap.help_lines(true);
        assert_eq!(full.len(), 3);
        assert!(full[1].contains("s next schema"));
        assert!(full[2].starts_with("? less"));
    }
}
