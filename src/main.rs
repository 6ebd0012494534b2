mod app;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use app::App;
use typer::Casing;
use typer::config::{Config, SecondaryChars};
use typer::event::{HostEvent, KeyPump};
use typer::logging;
use typer::ui::components::field::FieldView;
use typer::ui::components::typer_view::TyperView;
use typer::ui::layout::{AppLayout, pack_hint_lines};
use typer::ui::theme::Theme;

#[derive(Parser)]
#[command(name = "typer", version, about = "On-screen carousel keyboard driven by arrow keys")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Maximum number of characters (0 = unbounded)")]
    max_length: Option<usize>,

    #[arg(short, long, help = "Casing: UPPER, LOWER, WORD_UPPER, SENTENCE_UPPER")]
    casing: Option<String>,

    #[arg(long, help = "Seconds before accented variants are shown")]
    secondary_delay: Option<f64>,

    #[arg(long, help = "Show accented variants immediately")]
    immediate_secondary: bool,

    #[arg(long, help = "Never show accented variants")]
    no_secondary: bool,

    #[arg(short, long, help = "Keyboard definition file (.toml or .json)")]
    keyboard: Option<PathBuf>,

    #[arg(long, help = "Initial field value")]
    value: Option<String>,

    #[arg(long, help = "Write the effective configuration to the config file and exit")]
    write_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        if let Some(max_length) = self.max_length {
            config.max_length = max_length;
        }
        if let Some(casing) = &self.casing {
            config.casing = Casing::parse(casing)
                .ok_or_else(|| anyhow::anyhow!("unknown casing `{casing}`"))?;
        }
        if let Some(delay) = self.secondary_delay {
            config.show_secondary_chars = SecondaryChars::DelaySeconds(delay);
        }
        if self.immediate_secondary {
            config.show_secondary_chars = SecondaryChars::Enabled(true);
        }
        if self.no_secondary {
            config.show_secondary_chars = SecondaryChars::Enabled(false);
        }
        if let Some(keyboard) = &self.keyboard {
            config.keyboard_file = Some(keyboard.to_string_lossy().to_string());
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init_file_logging();

    let mut config = Config::load().unwrap_or_else(|err| {
        tracing::warn!(error = %err, "config unreadable, using defaults");
        Config::default()
    });
    cli.apply(&mut config)?;

    if cli.write_config {
        config.save()?;
        println!("{}", Config::config_path().display());
        return Ok(());
    }

    let options = config.typer_options()?;
    let theme = Theme::load(&config.theme).unwrap_or_default();
    let mut app = App::new(options, theme, cli.value.clone().unwrap_or_default());

    logging::route_panics_to_log();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = KeyPump::spawn(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    logging::restore_panic_output();

    if let Err(err) = result {
        tracing::error!(error = ?err, "event loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &KeyPump,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            HostEvent::Key(key) => app.handle_key(key),
            HostEvent::RevealTick => app.tick(),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " typer ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", app.status()),
            Style::default().fg(colors.muted()).bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    let field = FieldView::new("Message", &app.field_value, app.screen.field_focused, &app.theme);
    frame.render_widget(field, layout.field);

    if app.typer.is_open() {
        frame.render_widget(TyperView::new(&app.screen, &app.theme), layout.typer);
    }

    let hints: &[&str] = if app.typer.is_open() {
        &["[Arrows] Move", "[Enter] Choose", "[Esc] Cancel"]
    } else {
        &["[Enter] Edit field", "[q] Quit"]
    };
    let footer_text = pack_hint_lines(hints, layout.footer.width as usize)
        .into_iter()
        .next()
        .unwrap_or_default();
    let footer = Paragraph::new(Line::from(Span::styled(
        footer_text,
        Style::default().fg(colors.muted()),
    )));
    frame.render_widget(footer, layout.footer);
}
