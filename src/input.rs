use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::models::{DetailControl, RowControl};
use crate::ui::PanelHit;

/// User intent, decoupled from the terminal event that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    CursorUp,
    CursorDown,
    NextControl,
    PrevControl,
    /// Enter/Space on the focused row control.
    ActivateFocused,
    ActivateRow(usize),
    OpenWebsite(usize),
    Delete(usize),
    DeleteFocused,
    Scroll(isize),
    Escape,
    CloseDetail,
    DetailNextControl,
    DetailPrevControl,
    DetailActivateFocused,
    DetailActivate(DetailControl),
    CopyEmail,
}

pub fn map_event(app: &App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => map_key(app, key),
        Event::Mouse(mouse) => map_mouse(app, mouse),
        _ => None,
    }
}

fn map_key(app: &App, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    if key.code == KeyCode::Esc {
        return Some(Action::Escape);
    }

    // The open panel takes every key; nothing reaches the table behind it.
    if app.detail.is_some() {
        return match key.code {
            KeyCode::Tab => Some(Action::DetailNextControl),
            KeyCode::BackTab => Some(Action::DetailPrevControl),
            KeyCode::Enter | KeyCode::Char(' ') => Some(Action::DetailActivateFocused),
            KeyCode::Char('m') => Some(Action::DetailActivate(DetailControl::Map)),
            KeyCode::Char('c') => Some(Action::CopyEmail),
            _ => None,
        };
    }

    if key.code == KeyCode::Char('q') {
        return Some(Action::Quit);
    }
    if !app.is_loaded() {
        return None;
    }

    let page = app.hits.rows.len().max(1) as isize;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::CursorDown),
        KeyCode::Tab => Some(Action::NextControl),
        KeyCode::BackTab => Some(Action::PrevControl),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Action::ActivateFocused),
        KeyCode::Char('d') | KeyCode::Delete => Some(Action::DeleteFocused),
        KeyCode::PageUp => Some(Action::Scroll(-page)),
        KeyCode::PageDown => Some(Action::Scroll(page)),
        _ => None,
    }
}

fn map_mouse(app: &App, mouse: MouseEvent) -> Option<Action> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(Action::Scroll(-1)),
        MouseEventKind::ScrollDown => Some(Action::Scroll(1)),
        MouseEventKind::Down(MouseButton::Left) => {
            if app.detail.is_some() {
                return match app.hits.panel_at(column, row) {
                    PanelHit::Outside => Some(Action::CloseDetail),
                    PanelHit::Control(control) => Some(Action::DetailActivate(control)),
                    PanelHit::Inside => None,
                };
            }
            let (index, control) = app.hits.row_at(column, row)?;
            Some(match control {
                RowControl::Row => Action::ActivateRow(index),
                RowControl::Website => Action::OpenWebsite(index),
                RowControl::Delete => Action::Delete(index),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::loaded_app;
    use crate::models::fixtures;
    use crate::ui::{PanelRegions, RowRegion};
    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn with_row_hits(app: &mut App) {
        app.hits.rows = vec![
            RowRegion {
                index: 0,
                area: Rect::new(1, 2, 80, 2),
                website: Rect::new(50, 2, 10, 2),
                delete: Rect::new(70, 2, 8, 2),
            },
            RowRegion {
                index: 1,
                area: Rect::new(1, 4, 80, 2),
                website: Rect::new(50, 4, 10, 2),
                delete: Rect::new(70, 4, 8, 2),
            },
        ];
    }

    #[test]
    fn enter_and_space_activate_focused_row() {
        let (app, _) = loaded_app(fixtures::both());
        assert_eq!(map_event(&app, key(KeyCode::Enter)), Some(Action::ActivateFocused));
        assert_eq!(map_event(&app, key(KeyCode::Char(' '))), Some(Action::ActivateFocused));
    }

    #[test]
    fn key_release_is_ignored() {
        let (app, _) = loaded_app(fixtures::both());
        let release = KeyEvent {
            code: KeyCode::Enter,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_event(&app, Event::Key(release)), None);
    }

    #[test]
    fn clicks_route_to_row_website_or_delete() {
        let (mut app, _) = loaded_app(fixtures::both());
        with_row_hits(&mut app);

        assert_eq!(map_event(&app, click(10, 5)), Some(Action::ActivateRow(1)));
        assert_eq!(map_event(&app, click(52, 3)), Some(Action::OpenWebsite(0)));
        assert_eq!(map_event(&app, click(71, 4)), Some(Action::Delete(1)));
        assert_eq!(map_event(&app, click(10, 20)), None);
    }

    #[test]
    fn open_panel_swallows_table_keys() {
        let (mut app, _) = loaded_app(fixtures::both());
        app.dispatch(Action::ActivateRow(0));

        assert_eq!(map_event(&app, key(KeyCode::Down)), None);
        assert_eq!(map_event(&app, key(KeyCode::Char('d'))), None);
        assert_eq!(map_event(&app, key(KeyCode::Char('q'))), None);
        assert_eq!(map_event(&app, key(KeyCode::Tab)), Some(Action::DetailNextControl));
        assert_eq!(map_event(&app, key(KeyCode::Esc)), Some(Action::Escape));
        assert_eq!(
            map_event(&app, Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))),
            Some(Action::Quit)
        );
    }

    #[test]
    fn clicks_with_panel_open_hit_panel_regions_only() {
        let (mut app, _) = loaded_app(fixtures::both());
        with_row_hits(&mut app);
        app.dispatch(Action::ActivateRow(0));
        let mut panel = PanelRegions::new(Rect::new(20, 5, 40, 20));
        panel.controls.push((DetailControl::Close, Rect::new(50, 5, 9, 1)));
        app.hits.panel = Some(panel);

        assert_eq!(map_event(&app, click(2, 2)), Some(Action::CloseDetail));
        assert_eq!(map_event(&app, click(30, 10)), None);
        assert_eq!(map_event(&app, click(52, 5)), Some(Action::DetailActivate(DetailControl::Close)));
    }

    #[test]
    fn only_quit_works_before_load() {
        let (mut app, _) = loaded_app(Vec::new());
        app.controller = crate::controller::UserListController::new();
        app.controller.mount();
        assert_eq!(map_event(&app, key(KeyCode::Down)), None);
        assert_eq!(map_event(&app, key(KeyCode::Char('q'))), Some(Action::Quit));
    }
}
