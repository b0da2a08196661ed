//! Application state and event handling
//!
//! This is the core of meshmapper, managing:
//! - Which screen is visible (Start or Explore) and the back stack
//! - The pinned shortcut and its persistence
//! - Keyboard input mapped to button taps and long-presses
//! - Handing destination URLs to the launcher

use crate::config::Config;
use crate::launcher::UrlLauncher;
use crate::prefs::Preferences;
use crate::types::{
    destination_url, Destination, PinnedShortcut, Screen, DESTINATIONS, DESTINATION_COUNT, HOME_URL,
    WARDRIVE_URL,
};
use crate::ui::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};

/// How long a flash notice stays on screen
pub const FLASH_DURATION: Duration = Duration::from_secs(2);

/// Focus index of the Back button on the Explore screen
pub const EXPLORE_BACK_INDEX: usize = DESTINATION_COUNT;

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub config: Config,
    pub theme: Theme,
    pub pinned: Option<PinnedShortcut>,

    // Focus cursors
    pub main_selected: usize,
    pub explore_selected: usize,

    // Popup state
    pub popup: PopupState,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, Instant)>, // (message, timestamp)

    prefs: Preferences,
    launcher: Box<dyn UrlLauncher>,
}

/// Popup overlay state
#[derive(Debug, Clone, PartialEq)]
pub enum PopupState {
    None,
    Confirm {
        title: String,
        message: String,
        confirm_label: String,
        action: PendingAction,
    },
    Error {
        title: String,
        message: String,
    },
}

/// Action waiting on a confirmation dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Unpin,
}

/// Application state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ConfirmAction,
    ShowError,
}

/// Tap or long-press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Primary,
    Secondary,
}

/// Buttons on the start screen, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainButton {
    Home,
    Wardrive,
    Explore,
    Pinned,
}

/// Derived view of the pinned button; absent means hidden
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedButton {
    pub label: String,
}

/// One cell of the Explore grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridButton {
    pub code: &'static str,
    pub label: String,
}

impl App {
    /// Create a new App, restoring the pin from `prefs`
    pub fn new(config: Config, prefs: Preferences, launcher: Box<dyn UrlLauncher>) -> Self {
        let theme = Theme::from_name(config.theme);
        let pinned = prefs.load_pin();

        if let Some(pin) = &pinned {
            log::info!("Restored pin {} ({})", pin.name, pin.code);
        }

        Self {
            should_quit: false,
            screen: Screen::Main,
            config,
            theme,
            pinned,

            main_selected: 0,
            explore_selected: 0,

            popup: PopupState::None,
            flash_message: None,

            prefs,
            launcher,
        }
    }

    /// Get current app state
    pub fn state(&self) -> AppState {
        match &self.popup {
            PopupState::None => AppState::Normal,
            PopupState::Confirm { .. } => AppState::ConfirmAction,
            PopupState::Error { .. } => AppState::ShowError,
        }
    }

    // === SHELL OPERATIONS ===

    pub fn open_home(&mut self) {
        self.launch(HOME_URL);
    }

    pub fn open_wardrive(&mut self) {
        self.launch(WARDRIVE_URL);
    }

    /// Show the Explore screen
    pub fn open_explore(&mut self) {
        if self.screen != Screen::Explore {
            log::debug!("Screen: Main -> Explore");
            self.screen = Screen::Explore;
        }
    }

    /// Back gesture: Explore pops to Main, Main exits
    pub fn go_back(&mut self) {
        match self.screen {
            Screen::Explore => self.show_main(),
            Screen::Main => {
                log::info!("Back on start screen, exiting");
                self.should_quit = true;
            }
        }
    }

    /// Explicit Back button on the Explore screen
    pub fn show_main(&mut self) {
        if self.screen != Screen::Main {
            log::debug!("Screen: Explore -> Main");
            self.screen = Screen::Main;
        }
    }

    pub fn open_destination(&mut self, code: &str) {
        self.launch(&destination_url(code));
    }

    /// Remember `code` as the start-screen shortcut
    pub fn pin_destination(&mut self, code: &str, name: &str) {
        let Some(destination) = Destination::find(code) else {
            log::warn!("Refusing to pin unknown destination {:?}", code);
            return;
        };

        let pin = PinnedShortcut::new(destination.code, name);
        match self.prefs.save_pin(&pin) {
            Ok(()) => {
                log::info!("Pinned {} ({})", pin.name, pin.code);
                self.refresh_pinned();
                self.show_flash(&format!("{} pinned to start screen", name));
            }
            Err(e) => log::warn!("Could not save pin: {:#}", e),
        }
    }

    pub fn open_pinned(&mut self) {
        if let Some(pin) = &self.pinned {
            let url = pin.url();
            self.launch(&url);
        }
    }

    /// Ask before removing the pin; nothing changes until confirmed
    pub fn unpin_with_confirmation(&mut self) {
        if let Some(pin) = &self.pinned {
            self.popup = PopupState::Confirm {
                title: "Remove Pin".into(),
                message: format!("Do you want to remove {} from your start screen?", pin.name),
                confirm_label: "Remove".into(),
                action: PendingAction::Unpin,
            };
        }
    }

    /// Accept the pending confirmation
    pub fn confirm_popup(&mut self) {
        let popup = std::mem::replace(&mut self.popup, PopupState::None);

        if let PopupState::Confirm { action, .. } = popup {
            match action {
                PendingAction::Unpin => self.remove_pin(),
            }
        }
    }

    /// Dismiss any popup without side effects
    pub fn cancel_popup(&mut self) {
        self.popup = PopupState::None;
    }

    pub fn pinned_button(&self) -> Option<PinnedButton> {
        self.pinned.as_ref().map(|pin| PinnedButton {
            label: pin.button_label(),
        })
    }

    pub fn destination_grid(&self) -> Vec<GridButton> {
        DESTINATIONS
            .iter()
            .map(|d| GridButton {
                code: d.code,
                label: d.grid_label(),
            })
            .collect()
    }

    /// Start-screen buttons currently visible
    pub fn main_buttons(&self) -> Vec<MainButton> {
        let mut buttons = vec![MainButton::Home, MainButton::Wardrive, MainButton::Explore];
        if self.pinned.is_some() {
            buttons.push(MainButton::Pinned);
        }
        buttons
    }

    pub fn activate_main(&mut self, button: MainButton, activation: Activation) {
        match (button, activation) {
            (MainButton::Home, Activation::Primary) => self.open_home(),
            (MainButton::Wardrive, Activation::Primary) => self.open_wardrive(),
            (MainButton::Explore, Activation::Primary) => self.open_explore(),
            (MainButton::Pinned, Activation::Primary) => self.open_pinned(),
            (MainButton::Pinned, Activation::Secondary) => self.unpin_with_confirmation(),
            _ => {}
        }
    }

    /// Activate the Explore cell at `index` (the last index is Back)
    pub fn activate_explore(&mut self, index: usize, activation: Activation) {
        if index == EXPLORE_BACK_INDEX {
            if activation == Activation::Primary {
                self.show_main();
            }
            return;
        }

        let Some(destination) = DESTINATIONS.get(index) else {
            return;
        };

        match activation {
            Activation::Primary => self.open_destination(destination.code),
            Activation::Secondary => self.pin_destination(destination.code, destination.name),
        }
    }

    /// Expire the flash message
    pub fn tick(&mut self) {
        if let Some((_, instant)) = &self.flash_message {
            if instant.elapsed() >= FLASH_DURATION {
                self.flash_message = None;
            }
        }
    }

    // === INPUT ===

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.state() {
            AppState::ConfirmAction => self.handle_confirm_key(key),
            AppState::ShowError => self.handle_error_key(key),
            AppState::Normal => self.handle_normal_key(key),
        }
        Ok(())
    }

    /// Handle key in normal state
    fn handle_normal_key(&mut self, key: KeyEvent) {
        // Global keys (work on both screens)
        match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q') => {
                self.go_back();
                return;
            }
            KeyCode::Char('t') => {
                self.cycle_theme();
                return;
            }
            _ => {}
        }

        match self.screen {
            Screen::Main => self.handle_main_key(key),
            Screen::Explore => self.handle_explore_key(key),
        }
    }

    /// Handle keys on the start screen
    fn handle_main_key(&mut self, key: KeyEvent) {
        let buttons = self.main_buttons();
        let last = buttons.len().saturating_sub(1);

        match key.code {
            KeyCode::Char('j') | KeyCode::Char('l') | KeyCode::Down | KeyCode::Right | KeyCode::Tab => {
                if self.main_selected < last {
                    self.main_selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Char('h') | KeyCode::Up | KeyCode::Left | KeyCode::BackTab => {
                self.main_selected = self.main_selected.saturating_sub(1);
            }
            KeyCode::Enter => {
                if let Some(button) = buttons.get(self.main_selected) {
                    self.activate_main(*button, Activation::Primary);
                }
            }
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                if let Some(button) = buttons.get(self.main_selected) {
                    self.activate_main(*button, Activation::Secondary);
                }
            }
            _ => {}
        }
    }

    /// Handle keys on the Explore grid
    fn handle_explore_key(&mut self, key: KeyEvent) {
        let columns = self.grid_columns();
        let last_city = DESTINATION_COUNT - 1;
        let selected = self.explore_selected;

        match key.code {
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
                self.explore_selected = (selected + 1).min(EXPLORE_BACK_INDEX);
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
                self.explore_selected = selected.saturating_sub(1);
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.explore_selected = if selected == EXPLORE_BACK_INDEX {
                    selected
                } else if selected + columns <= last_city {
                    selected + columns
                } else {
                    EXPLORE_BACK_INDEX
                };
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.explore_selected = if selected == EXPLORE_BACK_INDEX {
                    last_city
                } else if selected >= columns {
                    selected - columns
                } else {
                    selected
                };
            }
            KeyCode::Char('b') => self.show_main(),
            KeyCode::Enter => self.activate_explore(selected, Activation::Primary),
            KeyCode::Char('p') | KeyCode::Char(' ') => {
                self.activate_explore(selected, Activation::Secondary)
            }
            _ => {}
        }
    }

    /// Handle keys in confirm popup
    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => self.confirm_popup(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.cancel_popup(),
            _ => {}
        }
    }

    /// Handle keys in error popup
    fn handle_error_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('o') | KeyCode::Enter | KeyCode::Esc => self.cancel_popup(),
            _ => {}
        }
    }

    // === HELPERS ===

    pub fn grid_columns(&self) -> usize {
        usize::from(self.config.grid_columns.max(1))
    }

    fn launch(&mut self, url: &str) {
        if let Err(e) = self.launcher.launch(url) {
            log::warn!("Could not open {}: {:#}", url, e);
            self.show_error("Launch Failed", &format!("Could not open {}\n\n{:#}", url, e));
        }
    }

    fn remove_pin(&mut self) {
        match self.prefs.clear_pin() {
            Ok(()) => {
                log::info!("Pin removed");
                self.refresh_pinned();
            }
            Err(e) => log::warn!("Could not remove pin: {:#}", e),
        }
    }

    /// Re-read the pin from storage and keep focus in range
    fn refresh_pinned(&mut self) {
        self.pinned = self.prefs.load_pin();
        let last = self.main_buttons().len().saturating_sub(1);
        self.main_selected = self.main_selected.min(last);
    }

    fn cycle_theme(&mut self) {
        self.config.theme = self.config.theme.next();
        self.theme = Theme::from_name(self.config.theme);

        if let Err(e) = self.config.save() {
            log::warn!("Could not save config: {:#}", e);
            self.show_error("Save Failed", &e.to_string());
        } else {
            self.show_flash(&format!("Theme: {}", self.config.theme.as_str()));
        }
    }

    /// Show an error popup
    fn show_error(&mut self, title: &str, message: &str) {
        self.popup = PopupState::Error {
            title: title.into(),
            message: message.into(),
        };
    }

    /// Show a flash message
    fn show_flash(&mut self, message: &str) {
        self.flash_message = Some((message.into(), Instant::now()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use crossterm::event::KeyModifiers;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every URL instead of opening it
    #[derive(Clone, Default)]
    struct RecordingLauncher {
        opened: Rc<RefCell<Vec<String>>>,
    }

    impl UrlLauncher for RecordingLauncher {
        fn launch(&mut self, url: &str) -> Result<()> {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    struct BrokenLauncher;

    impl UrlLauncher for BrokenLauncher {
        fn launch(&mut self, _url: &str) -> Result<()> {
            bail!("no browser available")
        }
    }

    fn test_app(prefs: Preferences) -> (App, Rc<RefCell<Vec<String>>>) {
        let launcher = RecordingLauncher::default();
        let opened = launcher.opened.clone();
        (App::new(Config::default(), prefs, Box::new(launcher)), opened)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    #[test]
    fn test_starts_on_main() {
        let (app, _) = test_app(Preferences::in_memory());
        assert_eq!(app.screen, Screen::Main);
        assert!(app.pinned_button().is_none());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_explore_and_back() {
        let (mut app, _) = test_app(Preferences::in_memory());

        app.open_explore();
        assert_eq!(app.screen, Screen::Explore);
        app.open_explore();
        assert_eq!(app.screen, Screen::Explore);

        app.go_back();
        assert_eq!(app.screen, Screen::Main);
        assert!(!app.should_quit);

        app.go_back();
        assert!(app.should_quit);
    }

    #[test]
    fn test_back_button_returns_to_main() {
        let (mut app, _) = test_app(Preferences::in_memory());
        app.open_explore();
        app.activate_explore(EXPLORE_BACK_INDEX, Activation::Primary);
        assert_eq!(app.screen, Screen::Main);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_fixed_urls() {
        let (mut app, opened) = test_app(Preferences::in_memory());
        app.open_home();
        app.open_wardrive();
        app.open_destination("YOW");
        assert_eq!(
            *opened.borrow(),
            vec![
                "https://meshmapper.net/",
                "https://wardrive.meshmapper.net",
                "https://yow.meshmapper.net",
            ]
        );
    }

    #[test]
    fn test_grid_matches_catalogue() {
        let (app, _) = test_app(Preferences::in_memory());
        let grid = app.destination_grid();
        assert_eq!(grid.len(), 14);
        assert_eq!(grid[0].label, "YOW\nOttawa");
        assert_eq!(grid[13].label, "BLX\nMeano");
        for (button, destination) in grid.iter().zip(DESTINATIONS.iter()) {
            assert_eq!(button.code, destination.code);
            assert_eq!(button.label, format!("{}\n{}", destination.code, destination.name));
        }
    }

    #[test]
    fn test_pin_and_confirmed_unpin() {
        let (mut app, _) = test_app(Preferences::in_memory());

        app.pin_destination("YYZ", "Toronto");
        assert_eq!(
            app.pinned_button(),
            Some(PinnedButton { label: "Explore Toronto (YYZ)".into() })
        );
        assert_eq!(
            app.flash_message.as_ref().map(|(m, _)| m.as_str()),
            Some("Toronto pinned to start screen")
        );

        app.unpin_with_confirmation();
        assert_eq!(app.state(), AppState::ConfirmAction);
        match &app.popup {
            PopupState::Confirm { title, message, .. } => {
                assert_eq!(title, "Remove Pin");
                assert_eq!(message, "Do you want to remove Toronto from your start screen?");
            }
            other => panic!("unexpected popup {:?}", other),
        }

        app.confirm_popup();
        assert!(app.pinned_button().is_none());
        assert_eq!(app.state(), AppState::Normal);
    }

    #[test]
    fn test_cancel_keeps_pin() {
        let (mut app, _) = test_app(Preferences::in_memory());
        app.pin_destination("KTW", "Katowice");

        app.unpin_with_confirmation();
        press(&mut app, KeyCode::Char('n'));

        assert_eq!(app.state(), AppState::Normal);
        assert_eq!(app.pinned, Some(PinnedShortcut::new("KTW", "Katowice")));
    }

    #[test]
    fn test_pin_overwrites_previous() {
        let (mut app, _) = test_app(Preferences::in_memory());
        app.pin_destination("YOW", "Ottawa");
        app.pin_destination("BNE", "Brisbane");
        assert_eq!(app.pinned, Some(PinnedShortcut::new("BNE", "Brisbane")));
    }

    #[test]
    fn test_unknown_code_not_pinned() {
        let (mut app, _) = test_app(Preferences::in_memory());
        app.pin_destination("ZZZ", "Nowhere");
        assert!(app.pinned.is_none());
        assert!(app.flash_message.is_none());
    }

    #[test]
    fn test_open_pinned() {
        let (mut app, opened) = test_app(Preferences::in_memory());
        app.open_pinned();
        assert!(opened.borrow().is_empty());

        app.pin_destination("YQQ", "Courtenay");
        app.open_pinned();
        assert_eq!(*opened.borrow(), vec!["https://yqq.meshmapper.net"]);
    }

    #[test]
    fn test_pin_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("MeshMapperPrefs.json");

        {
            let (mut app, _) = test_app(Preferences::open(&path).unwrap());
            app.pin_destination("YVR", "Vancouver");
        }

        let (app, _) = test_app(Preferences::open(&path).unwrap());
        assert_eq!(
            app.pinned_button().map(|b| b.label),
            Some("Explore Vancouver (YVR)".to_string())
        );
    }

    #[test]
    fn test_launch_failure_shows_error() {
        let mut app = App::new(
            Config::default(),
            Preferences::in_memory(),
            Box::new(BrokenLauncher),
        );
        app.open_home();
        assert_eq!(app.state(), AppState::ShowError);
        assert_eq!(app.screen, Screen::Main);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state(), AppState::Normal);
    }

    #[test]
    fn test_keyboard_long_press_pins_focused_city() {
        let (mut app, opened) = test_app(Preferences::in_memory());

        // Home, Wardrive, Explore
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Explore);

        // Third column of the first row, then one row down: YKF
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.explore_selected, 5);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.pinned, Some(PinnedShortcut::new("YKF", "Waterloo")));

        press(&mut app, KeyCode::Enter);
        assert_eq!(*opened.borrow(), vec!["https://ykf.meshmapper.net"]);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.screen, Screen::Main);
        assert_eq!(app.main_buttons().last(), Some(&MainButton::Pinned));
    }

    #[test]
    fn test_grid_focus_reaches_back_button() {
        let (mut app, _) = test_app(Preferences::in_memory());
        app.open_explore();
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.explore_selected, EXPLORE_BACK_INDEX);

        press(&mut app, KeyCode::Up);
        assert_eq!(app.explore_selected, DESTINATIONS.len() - 1);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.screen, Screen::Main);
    }

    #[test]
    fn test_focus_clamped_after_unpin() {
        let (mut app, _) = test_app(Preferences::in_memory());
        app.pin_destination("MSN", "Madison");
        app.main_selected = 3;

        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('y'));

        assert!(app.pinned.is_none());
        assert_eq!(app.main_selected, 2);
    }

    #[test]
    fn test_flash_expires() {
        let (mut app, _) = test_app(Preferences::in_memory());
        app.flash_message = Some(("old".into(), Instant::now() - FLASH_DURATION));
        app.tick();
        assert!(app.flash_message.is_none());
    }
}
