//! Keyboard input dispatch — overlays → global keys → panel-specific handlers.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    if let Overlay::Summary { .. } = app.overlay {
        handle_summary_overlay(app, key);
        return;
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char('1') => { app.active_panel = Panel::Overview; return; }
        KeyCode::Char('2') => { app.active_panel = Panel::Trends; return; }
        KeyCode::Char('3') => { app.active_panel = Panel::History; return; }
        KeyCode::Char('4') | KeyCode::Char('?') => { app.active_panel = Panel::Help; return; }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('r') => {
            if app.fetch_in_flight {
                app.set_warning("Fetch already in progress");
            } else {
                app.request_results();
            }
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Overview => {} // display only
        Panel::Trends => handle_trends_key(app, key),
        Panel::History => handle_history_key(app, key),
        Panel::Help => {}
    }
}

fn handle_summary_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
            app.overlay = Overlay::None;
        }
        _ => {}
    }
}

fn handle_trends_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char(']') | KeyCode::Right | KeyCode::Char('l') => app.trends.cycle_range(true),
        KeyCode::Char('[') | KeyCode::Left | KeyCode::Char('h') => app.trends.cycle_range(false),
        KeyCode::Char('f') | KeyCode::Char('j') | KeyCode::Char('k') => app.trends.toggle_focus(),
        _ => {}
    }
}

fn handle_history_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::PageDown => app.next_page(),
        KeyCode::Char('h') | KeyCode::Left | KeyCode::PageUp => app.prev_page(),
        KeyCode::Char('g') | KeyCode::Home => app.first_page(),
        KeyCode::Char('G') | KeyCode::End => app.last_page(),
        KeyCode::Enter => app.open_selected_summary(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{ChartFocus, SummaryState};
    use crate::worker::WorkerCommand;
    use ai4vt_core::api::sample_history;
    use ai4vt_core::{DashboardConfig, TimeRange};
    use chrono::NaiveDate;
    use crossterm::event::KeyEventState;
    use std::sync::mpsc::{self, Receiver};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_app(n: usize) -> (AppState, Receiver<WorkerCommand>) {
        let (tx, rx) = mpsc::channel();
        let (_resp_tx, resp_rx) = mpsc::channel();
        let mut app = AppState::new(tx, resp_rx, &DashboardConfig::default(), "test");
        app.apply_results(sample_history(n, NaiveDate::from_ymd_opt(2025, 4, 18).unwrap(), 5));
        while rx.try_recv().is_ok() {}
        (app, rx)
    }

    #[test]
    fn quit_and_panel_switching() {
        let (mut app, _rx) = loaded_app(3);
        handle_key(&mut app, press(KeyCode::Char('3')));
        assert_eq!(app.active_panel, Panel::History);
        handle_key(&mut app, press(KeyCode::Tab));
        assert_eq!(app.active_panel, Panel::Help);
        handle_key(&mut app, press(KeyCode::BackTab));
        assert_eq!(app.active_panel, Panel::History);
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert!(!app.running);
    }

    #[test]
    fn release_events_are_ignored() {
        let (mut app, _rx) = loaded_app(3);
        let release = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        handle_key(&mut app, release);
        assert!(app.running);
    }

    #[test]
    fn refresh_key_sends_fetch() {
        let (mut app, rx) = loaded_app(3);
        handle_key(&mut app, press(KeyCode::Char('r')));
        assert!(matches!(rx.try_recv(), Ok(WorkerCommand::FetchResults)));
        assert!(app.fetch_in_flight);
    }

    #[test]
    fn history_paging_keys() {
        let (mut app, _rx) = loaded_app(25);
        app.active_panel = Panel::History;
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert_eq!(app.table.pager.page(), 2);
        handle_key(&mut app, press(KeyCode::Char('G')));
        assert_eq!(app.table.pager.page(), 3);
        handle_key(&mut app, press(KeyCode::Char('l')));
        assert_eq!(app.table.pager.page(), 3);
        handle_key(&mut app, press(KeyCode::Char('g')));
        assert_eq!(app.table.pager.page(), 1);
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.table.cursor, 1);
    }

    #[test]
    fn enter_opens_drawer_and_q_closes_it() {
        let (mut app, rx) = loaded_app(5);
        app.active_panel = Panel::History;
        handle_key(&mut app, press(KeyCode::Enter));
        assert!(matches!(
            &app.overlay,
            Overlay::Summary { state: SummaryState::Loading, .. }
        ));
        assert!(matches!(rx.try_recv(), Ok(WorkerCommand::FetchSummary { .. })));

        // The drawer swallows q instead of quitting.
        handle_key(&mut app, press(KeyCode::Char('q')));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
    }

    #[test]
    fn trends_range_keys() {
        let (mut app, _rx) = loaded_app(5);
        app.active_panel = Panel::Trends;
        handle_key(&mut app, press(KeyCode::Char('[')));
        assert_eq!(app.trends.line_range, TimeRange::Last30Days);
        handle_key(&mut app, press(KeyCode::Char('f')));
        assert_eq!(app.trends.focus, ChartFocus::Precision);
        handle_key(&mut app, press(KeyCode::Char(']')));
        assert_eq!(app.trends.precision_range, TimeRange::LastYear);
    }
}
