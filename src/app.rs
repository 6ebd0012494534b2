use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use typer::ui::components::typer_view::ScreenModel;
use typer::ui::theme::Theme;
use typer::{Command, Typer, TyperOptions};

/// Host form with a single text field that the typer edits.
pub struct App {
    pub typer: Typer,
    pub screen: ScreenModel,
    pub field_value: String,
    pub theme: Theme,
    pub should_quit: bool,
    status: Rc<RefCell<String>>,
}

impl App {
    pub fn new(options: TyperOptions, theme: Theme, initial_value: String) -> Self {
        let status = Rc::new(RefCell::new(String::from("Press Enter to type")));
        let mut typer = Typer::new(options);

        let s = Rc::clone(&status);
        typer.on_done(move |text| {
            *s.borrow_mut() = format!("Accepted {} characters", text.chars().count());
            Ok(())
        });
        let s = Rc::clone(&status);
        typer.on_canceled(move || {
            *s.borrow_mut() = "Canceled".to_string();
            Ok(())
        });
        let s = Rc::clone(&status);
        typer.on_text_changed(move |text| {
            *s.borrow_mut() = format!("{} characters", text.chars().count());
            Ok(())
        });
        typer.on_closed(|canceled| {
            tracing::debug!(canceled, "host saw typer close");
            Ok(())
        });

        Self {
            typer,
            screen: ScreenModel::new(),
            field_value: initial_value,
            theme,
            should_quit: false,
            status,
        }
    }

    pub fn status(&self) -> String {
        self.status.borrow().clone()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.typer.is_open() {
            if let Some(command) = Command::from_key(&key) {
                self.typer.handle(command, &mut self.screen);
            }
            if let Some(value) = self.screen.take_returned_value() {
                self.field_value = value;
            }
            return;
        }

        match key.code {
            KeyCode::Enter => {
                let value = self.field_value.clone();
                self.typer.open_for_field(&value, &mut self.screen);
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    pub fn tick(&mut self) {
        self.typer.tick(Instant::now(), &mut self.screen);
    }
}
