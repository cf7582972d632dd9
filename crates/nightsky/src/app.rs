//! The interactive terminal application.

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use nightsky_config::Config;
use nightsky_core::Point;
use nightsky_starfield::{
    CellCanvas, FrameStats, FrameTicker, Nebula, Starfield, StopToken, default_blobs,
};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{DefaultTerminal, Frame};
use tracing::{debug, info, warn};

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Cancelled when the user quits.
    stop: StopToken,
    /// Frame pacing.
    ticker: FrameTicker,
    /// The animated sky, painted onto a terminal cell raster.
    starfield: Starfield<CellCanvas>,
    /// Parallax backdrop.
    nebula: Nebula,
    /// Whether the nebula is drawn.
    show_nebula: bool,
    /// Frames rendered so far.
    frames: u64,
    /// Outcome of the most recent frame.
    last_stats: FrameStats,
}

impl App {
    /// Construct a new instance of [`App`] for a `cols x rows` terminal.
    pub fn new(config: Config, cols: u16, rows: u16) -> color_eyre::Result<Self> {
        let display_cfg = &config.display;
        let canvas = CellCanvas::new(cols, rows, display_cfg.cell_width, display_cfg.cell_height);
        let seeded = display_cfg.seed.is_some();
        let rng = match display_cfg.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let starfield = Starfield::new(config.starfield.clone(), canvas, rng)?;
        info!(
            cols,
            rows,
            stars = starfield.stars().len(),
            seeded,
            "starfield ready"
        );

        Ok(Self {
            stop: StopToken::new(),
            ticker: FrameTicker::new(display_cfg.fps),
            starfield,
            nebula: Nebula::new(
                default_blobs(),
                display_cfg.cell_width,
                display_cfg.cell_height,
            ),
            show_nebula: display_cfg.nebula,
            frames: 0,
            last_stats: FrameStats::default(),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while !self.stop.is_cancelled() {
            self.handle_crossterm_events()?;
            if let Some(timestamp) = self.ticker.poll() {
                self.last_stats = self.starfield.frame(timestamp);
                self.frames += 1;
                if self.last_stats.spawned {
                    debug!(live = self.last_stats.shooting_stars, "shooting star");
                }
                terminal.draw(|frame| self.render(frame))?;
            }
        }
        info!(frames = self.frames, "exiting");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        if self.show_nebula {
            frame.render_widget(&self.nebula, area);
        }
        frame.render_widget(self.starfield.surface(), area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most until the next frame is due.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.ticker.until_next())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
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
            (_, KeyCode::Char('s')) => self.launch_shooting_star(),
            (_, KeyCode::Char('n')) => self.toggle_nebula(),
            _ => {}
        }
    }

    /// Moves the nebula with the pointer.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return;
        }
        let (cell_width, cell_height) = self.starfield.surface().cell_size();
        // Center of the hovered cell, in surface pixels.
        let pointer = Point::new(
            (mouse.column as f64 + 0.5) * cell_width as f64,
            (mouse.row as f64 + 0.5) * cell_height as f64,
        );
        self.nebula.set_pointer(pointer, self.starfield.viewport());
    }

    /// Resizes the sky to the new terminal size, regenerating the stars.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        let viewport = self.starfield.surface().viewport_for(cols, rows);
        match self.starfield.resize(viewport) {
            Ok(()) => info!(cols, rows, "terminal resized"),
            Err(e) => warn!(cols, rows, error = %e, "ignoring resize"),
        }
    }

    fn launch_shooting_star(&mut self) {
        if !self.starfield.launch_random() {
            debug!(
                max = self.starfield.config().max_shooting_stars,
                "shooting star cap reached"
            );
        }
    }

    fn toggle_nebula(&mut self) {
        self.show_nebula = !self.show_nebula;
    }

    /// Cancel the stop token to quit the application.
    fn quit(&mut self) {
        self.stop.cancel();
    }
}
