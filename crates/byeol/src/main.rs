use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use byeol_config::Config;
use byeol_core::{AnimationSpeed, SceneKind};
use byeol_sky::SkyState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    DefaultTerminal, Frame,
    layout::Rect,
    style::Stylize,
    text::Line,
    widgets::Paragraph,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load();
    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Is the animation clock frozen?
    paused: bool,
    /// Current scene preset.
    scene: SceneKind,
    /// Current animation speed.
    speed: AnimationSpeed,
    /// Whether shooting stars spawn.
    meteors: bool,
    /// Frame interval used as the event poll timeout.
    frame_ms: u64,
    /// Animation clock in milliseconds; advances only while unpaused.
    clock_ms: u64,
    /// Wall-clock instant of the previous tick.
    last_tick: Instant,
    /// Sky renderer state, owned exclusively by this loop.
    sky: SkyState,
}

impl App {
    /// Construct a new instance of [`App`] from the loaded config.
    pub fn new(config: Config) -> Self {
        let seed = config.seed.unwrap_or_else(clock_seed);
        Self {
            running: false,
            paused: false,
            scene: config.scene,
            speed: config.speed,
            meteors: config.meteors,
            frame_ms: config.frame_ms.max(1),
            clock_ms: 0,
            last_tick: Instant::now(),
            sky: SkyState::new(seed),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            self.tick();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Advance the animation clock. Pausing freezes the clock without
    /// tearing any sky state down.
    fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;
        if !self.paused {
            self.clock_ms += delta.as_millis() as u64;
        }
    }

    /// Renders the sky and the status footer.
    fn render(&mut self, frame: &mut Frame) {
        self.sky
            .render(frame, self.scene, self.clock_ms, self.speed, self.meteors);
        self.render_footer(frame);
    }

    /// Render the one-line dimmed help footer over the bottom row.
    fn render_footer(&self, frame: &mut Frame) {
        let area = frame.area();
        if area.height == 0 || area.width == 0 {
            return;
        }
        let footer = Line::from(vec![
            "q".bold().white(),
            " quit  ".dark_gray(),
            "s".bold().white(),
            format!(" scene:{}  ", self.scene.title()).dark_gray(),
            "a".bold().white(),
            format!(" speed:{}  ", self.speed.label()).dark_gray(),
            "m".bold().white(),
            format!(" meteors:{}  ", if self.meteors { "on" } else { "off" }).dark_gray(),
            "r".bold().white(),
            " reseed  ".dark_gray(),
            "space".bold().white(),
            if self.paused {
                " paused".dark_gray()
            } else {
                " pause".dark_gray()
            },
        ])
        .centered();
        let bottom = Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(footer), bottom);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polling with the frame interval keeps the animation ticking.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(Duration::from_millis(self.frame_ms))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                // Resizes are picked up from the frame area on the next draw.
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('s')) => self.scene = self.scene.next(),
            (_, KeyCode::Char('a')) => self.speed = self.speed.next(),
            (_, KeyCode::Char('m')) => self.meteors = !self.meteors,
            (_, KeyCode::Char('r')) => self.sky.reseed(clock_seed()),
            (_, KeyCode::Char(' ')) => self.paused = !self.paused,
            _ => {}
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Seed drawn from the system clock, for when the config pins none.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
