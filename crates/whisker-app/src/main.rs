mod host;

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CEvent, KeyCode, KeyEventKind, MouseEvent, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    style::{Color, Style},
    Terminal,
};
use tracing::{debug, info, warn};

use whisker_agent::{Behavior, BehaviorChoice, BoundsProvider, Cat, MovementEvent, Position};
use whisker_config::PetConfig;
use whisker_core::{
    bus::EventBus,
    command::{self, CommandContext, CommandOutput, CommandRegistry},
    console::Console,
    event::{ControlRequest, Event},
    fps::TickCounter,
    logging::{self, LogBuffer, LogEntry, LogLevel},
    state::{AppState, HoverAction},
};
use whisker_ui::{
    console::render_console,
    layout::overlay_layout,
    shell::{render_shell, ShellView},
    sprite::render_sprite,
};

use crate::host::{set_ignore_mouse_events, HostWindow};

struct App {
    state: AppState,
    bus: EventBus,
    log_buffer: LogBuffer,
    console: Console,
    tick_counter: TickCounter,
    commands: CommandRegistry,
    cat: Cat,
    window: HostWindow,
}

impl App {
    fn new(config: &PetConfig, log_buffer: LogBuffer, cols: u16, rows: u16) -> Result<Self> {
        let now = Instant::now();
        let sheet = Cat::load_sheet(config)?;
        let window = HostWindow::new(&config.display, cols, rows, sheet.frame_size());
        let mut cat = Cat::new(config, sheet, window.bounds().center(), now);
        cat.mount_status(now);

        Ok(Self {
            state: AppState::new(!config.display.ignore_mouse),
            bus: EventBus::new(),
            log_buffer,
            console: Console::default(),
            tick_counter: TickCounter::default(),
            commands: command::builtin_registry(),
            cat,
            window,
        })
    }

    fn console_line(&mut self, target: &str, message: String) {
        self.console.push_log(LogEntry {
            level: LogLevel::Info,
            target: target.into(),
            message,
        });
    }

    /// Execute a console command. Returns `true` if the app should quit.
    fn dispatch_command(&mut self, input: &str) -> bool {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return false;
        }
        self.console_line("console", format!("> {}", trimmed));

        let mut ctx = CommandContext {
            console: &mut self.console,
            bus: &mut self.bus,
        };

        match self.commands.execute(trimmed, &mut ctx) {
            CommandOutput::Lines(lines) => {
                for line in lines {
                    self.console_line("console", line);
                }
                false
            }
            CommandOutput::Quit => true,
        }
    }

    /// Advance the cat and note what happened in the top bar.
    fn advance(&mut self, now: Instant) {
        for ev in self.cat.tick(now, &self.window) {
            self.state.status_line = match ev {
                MovementEvent::Arrived { target } => {
                    format!("arrived at ({:.0}, {:.0})", target.x, target.y)
                }
                MovementEvent::FellAsleep { pose } => format!("asleep, {pose}"),
                MovementEvent::WokeUp => "woke up".to_string(),
                MovementEvent::Decided(choice) => describe_choice(choice),
            };
        }
    }

    fn apply_control(&mut self, req: ControlRequest, now: Instant) -> Result<()> {
        match req {
            ControlRequest::Pause => {
                self.state.explicit_pause_change();
                self.cat.pause();
                self.state.status_line = "paused".into();
            }
            ControlRequest::Resume => {
                self.state.explicit_pause_change();
                match self.cat.resume(now, &self.window) {
                    Some(choice) => self.state.status_line = describe_choice(choice),
                    None => self.console_line("pet", "not paused".into()),
                }
            }
            ControlRequest::Sleep => {
                if !self.cat.sleep(now) {
                    self.console_line("pet", "paused; resume first".into());
                }
            }
            ControlRequest::Walk { x, y } => {
                if !self.cat.walk_to(Position::new(x, y), now, &self.window) {
                    self.console_line("pet", "paused; resume first".into());
                }
            }
            ControlRequest::Wander => {
                let choice = self.cat.random_behavior(now, &self.window);
                self.state.status_line = describe_choice(choice);
            }
            ControlRequest::Report => self.report(),
            ControlRequest::SetInteractive(setting) => {
                let interactive = setting.unwrap_or(!self.state.interactive());
                self.set_interactive(interactive, now)?;
            }
        }
        Ok(())
    }

    fn report(&mut self) {
        let s = self.cat.state();
        let status = self.cat.status();
        let lines = [
            format!(
                "behavior: {}  direction: {}  paused: {}",
                s.behavior, s.direction, s.paused
            ),
            format!(
                "position: ({:.1}, {:.1})  pose: {}",
                s.position.x, s.position.y, s.sleep_pose
            ),
            format!(
                "happiness: {:.2}  energy: {:.2}  mood: {}",
                status.happiness,
                status.energy,
                status.mood()
            ),
        ];
        for line in lines {
            self.console_line("pet", line);
        }
        if let Some(target) = self.cat.movement().walk_target() {
            let line = format!("heading to ({:.1}, {:.1})", target.x, target.y);
            self.console_line("pet", line);
        }
    }

    fn set_interactive(&mut self, interactive: bool, now: Instant) -> Result<()> {
        set_ignore_mouse_events(&mut io::stdout(), !interactive)?;
        info!(interactive, "mouse interaction changed");
        let action = self.state.set_interactive(interactive);
        self.apply_hover(action, now);
        Ok(())
    }

    /// Hovering over the cat pauses it; moving off resumes it.
    fn on_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return;
        }
        let cat = self.cat.state();
        let over = self.window.hit(cat.position, mouse.column, mouse.row);
        let action = self.state.pointer_moved(over, cat.paused);
        if action == HoverAction::Pause {
            debug!(col = mouse.column, row = mouse.row, "pointer over cat");
        }
        self.apply_hover(action, now);
    }

    fn apply_hover(&mut self, action: HoverAction, now: Instant) {
        match action {
            HoverAction::Pause => self.cat.pause(),
            HoverAction::Resume => {
                self.cat.resume(now, &self.window);
            }
            HoverAction::Nothing => {}
        }
    }
}

fn describe_choice(choice: BehaviorChoice) -> String {
    match choice {
        BehaviorChoice::Walk { target } => format!("wandering to ({:.0}, {:.0})", target.x, target.y),
        BehaviorChoice::Sleep => "settling down for a nap".to_string(),
        BehaviorChoice::Skipped => "paused".to_string(),
    }
}

fn setup_terminal(interactive: bool) -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    set_ignore_mouse_events(&mut stdout, !interactive)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    set_ignore_mouse_events(terminal.backend_mut(), true)?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<()> {
    let log_buffer = logging::init();
    info!("whisker starting up");

    let config = PetConfig::load().context("failed to load configuration")?;
    let (cols, rows) = crossterm::terminal::size().context("failed to read terminal size")?;
    let app = App::new(&config, log_buffer, cols, rows)?;

    let mut terminal = setup_terminal(app.state.interactive())?;
    let res = run(&mut terminal, app);
    restore_terminal(terminal)?;
    if let Err(err) = &res {
        warn!(error = %err, "whisker exited with an error");
    }
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> Result<()> {
    let poll_timeout = Duration::from_millis(16);

    info!(interactive = app.state.interactive(), "cat released");
    let now = Instant::now();
    app.advance(now);
    app.cat.start(now, &app.window);

    loop {
        app.console.sync_from(&app.log_buffer);

        // ── Render ──
        terminal.draw(|f| {
            let rects = overlay_layout(f.area());
            let cat_state = app.cat.state();
            let status = app.cat.status();
            let view = ShellView {
                status_line: &app.state.status_line,
                behavior: cat_state.behavior,
                mood: status.mood(),
                happiness: status.happiness,
                energy: status.energy,
                paused: cat_state.paused,
                interactive: app.state.interactive(),
            };

            render_shell(f, rects, view, |f, field| {
                let (x, y) = app.window.metrics().to_cell(field, cat_state.position);
                let style = match (cat_state.paused, cat_state.behavior) {
                    (true, _) => Style::default().fg(Color::DarkGray),
                    (false, Behavior::Sleeping) => Style::default().fg(Color::LightBlue),
                    (false, _) => Style::default().fg(Color::White),
                };
                render_sprite(f.buffer_mut(), field, app.cat.current_frame(), x, y, style);
            });

            if app.console.visible {
                render_console(f, f.area(), &app.console, app.tick_counter.tps());
            }
        })?;

        // ── Poll → Publish ──
        if event::poll(poll_timeout)? {
            match event::read()? {
                CEvent::Key(key) if key.kind != KeyEventKind::Release => {
                    if key.code == KeyCode::Char('`') {
                        app.console.toggle();
                    } else if app.console.visible {
                        match key.code {
                            KeyCode::Enter => {
                                let input = app.console.submit_input();
                                if app.dispatch_command(&input) {
                                    return Ok(());
                                }
                            }
                            KeyCode::Backspace => app.console.backspace(),
                            KeyCode::Left => app.console.cursor_left(),
                            KeyCode::Right => app.console.cursor_right(),
                            KeyCode::Up => app.console.history_prev(),
                            KeyCode::Down => app.console.history_next(),
                            KeyCode::PageUp => app.console.scroll_up(10),
                            KeyCode::PageDown => app.console.scroll_down(10),
                            KeyCode::Esc => app.console.toggle(),
                            KeyCode::Char(c) => app.console.insert_char(c),
                            _ => {}
                        }
                    } else {
                        let control = match key.code {
                            KeyCode::Char('q') => {
                                app.bus.publish(Event::Quit);
                                None
                            }
                            KeyCode::Char('p') if app.cat.state().paused => Some(ControlRequest::Resume),
                            KeyCode::Char('p') => Some(ControlRequest::Pause),
                            KeyCode::Char('s') => Some(ControlRequest::Sleep),
                            KeyCode::Char('w') => Some(ControlRequest::Wander),
                            KeyCode::Char('i') => Some(ControlRequest::SetInteractive(None)),
                            _ => None,
                        };
                        if let Some(req) = control {
                            app.bus.publish(Event::Control(req));
                        }
                    }
                }
                CEvent::Mouse(mouse) => app.bus.publish(Event::Mouse(mouse)),
                CEvent::Resize(cols, rows) => app.bus.publish(Event::Resize { cols, rows }),
                _ => {}
            }
        }

        let now = Instant::now();
        app.tick_counter.tick(now);
        app.bus.publish(Event::Tick { now });

        // ── Drain → Apply ──
        for ev in app.bus.drain() {
            match ev {
                Event::Quit => return Ok(()),
                Event::Tick { now } => app.advance(now),
                Event::Control(req) => app.apply_control(req, Instant::now())?,
                Event::Mouse(mouse) => app.on_mouse(mouse, Instant::now()),
                Event::Resize { cols, rows } => {
                    debug!(cols, rows, "terminal resized");
                    app.window.resize(cols, rows);
                }
            }
        }
    }
}
