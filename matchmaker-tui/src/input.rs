use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, FormField, Screen};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    Quit,
    /// Validate the form and compute recommendations
    Generate,
    /// Write the quote for the current selection to the export file
    Export,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{BackTab, Backspace, Char, Down, Enter, Esc, Left, Right, Tab, Up};

    // Global quit shortcut
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    let mut action = Action::None;

    match app.screen {
        Screen::VehicleForm => match key.code {
            Tab | Down => app.focus = app.focus.next(),
            BackTab | Up => app.focus = app.focus.previous(),
            Left if app.focus == FormField::Model => app.cycle_model(false),
            Right | Char(' ') if app.focus == FormField::Model => app.cycle_model(true),
            Char(character) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    match app.focus {
                        FormField::Year => app.year_input.push(character),
                        FormField::Mileage => app.mileage_input.push(character),
                        FormField::Model => {}
                    }
                }
            }
            Backspace => match app.focus {
                FormField::Year => {
                    app.year_input.pop();
                }
                FormField::Mileage => {
                    app.mileage_input.pop();
                }
                FormField::Model => {}
            },
            Enter => action = Action::Generate,
            Esc => action = Action::Quit,
            _ => {}
        },

        Screen::Recommendations => match key.code {
            Up | Char('k') => app.move_cursor(false),
            Down | Char('j') => app.move_cursor(true),
            Enter | Char(' ' | 'x') => app.toggle_current(),
            Char('c') => app.clear_selection(),
            Char('e') => action = Action::Export,
            Char('q') => action = Action::Quit,
            Left | Esc | Char('b') => {
                app.screen = Screen::VehicleForm;
                app.error_message = None;
                app.status_message = None;
            }
            _ => {}
        },
    }
    action
}
