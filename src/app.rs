//! Host loop: paces frames, pumps terminal input into the held-key set,
//! handles Start/Restart and quit, and presents each frame.

use crate::assets::Assets;
use crate::core::config::Config;
use crate::core::game_loop::{CancelToken, FrameReport, GameLoop, SurfaceSize};
use crate::input::{classify, ControlAction, KeyTracker, ReleaseMode};
use crate::ui::title::Typewriter;
use crate::ui::{self, Phase, View};
use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEvent, PopKeyboardEnhancementFlags};
use crossterm::terminal::{disable_raw_mode, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use log::{info, warn};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io::{self, Write};
use std::time::{Duration, Instant};

pub struct App<R: Rng> {
    game: GameLoop<R>,
    keys: KeyTracker,
    /// Token of the armed session, if any.
    token: Option<CancelToken>,
    show_hitboxes: bool,
    title: Typewriter,
    epoch: Instant,
    present_interval: Duration,
    quit: bool,
}

impl<R: Rng> App<R> {
    pub fn new(config: &Config, assets: Assets, rng: R, release_mode: ReleaseMode) -> Self {
        Self {
            game: GameLoop::new(assets, config.controls, rng),
            keys: KeyTracker::new(release_mode),
            token: None,
            show_hitboxes: config.show_hitboxes,
            title: Typewriter::new(&config.title, 0.0),
            epoch: Instant::now(),
            present_interval: Duration::from_secs_f64(config.present_interval_ms() / 1000.0),
            quit: false,
        }
    }

    /// Milliseconds since the app was created.
    pub fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    pub fn game(&self) -> &GameLoop<R> {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameLoop<R> {
        &mut self.game
    }

    pub fn show_hitboxes(&self) -> bool {
        self.show_hitboxes
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn phase(&self) -> Phase {
        if !self.game.has_started() {
            Phase::Idle
        } else if self.game.state().game_over {
            Phase::GameOver
        } else {
            Phase::Running
        }
    }

    /// Route one key event observed at `now_ms`: host controls first, then
    /// the held-key set.
    pub fn handle_key(&mut self, key: &KeyEvent, surface: Option<SurfaceSize>, now_ms: f64) {
        match classify(key, self.game.bindings()) {
            Some(action) => self.apply(action, surface),
            None => self.keys.handle(key, now_ms),
        }
    }

    pub fn apply(&mut self, action: ControlAction, surface: Option<SurfaceSize>) {
        match action {
            ControlAction::StartOrRestart => {
                // Keys held across a restart would fire on the first frame
                self.keys.clear();
                if let Ok(token) = self.game.start(surface) {
                    self.token = Some(token);
                }
            }
            ControlAction::ToggleHitboxes => {
                self.show_hitboxes = !self.show_hitboxes;
            }
            ControlAction::Quit => {
                self.game.stop();
                self.quit = true;
            }
        }
    }

    /// Expire stale keys and run one game frame at `now_ms`.
    pub fn tick(&mut self, now_ms: f64) -> Option<FrameReport> {
        self.keys.expire(now_ms);
        if !self.is_armed() {
            // Disarmed: only the palette fade keeps moving
            self.game.advance_palette(now_ms);
            return None;
        }
        let report = self.game.frame(now_ms, self.keys.held())?;
        if report.game_over_started {
            self.keys.clear();
        }
        Some(report)
    }

    /// True while the armed session's token is live.
    pub fn is_armed(&self) -> bool {
        self.token.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Run until quit. Input is drained between frames; each frame is
    /// simulated and then presented.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        info!(
            "Presenting every {:?}, key releases {:?}",
            self.present_interval,
            self.keys.mode()
        );
        let mut next_frame = Instant::now();

        while !self.quit {
            let wait = next_frame.saturating_duration_since(Instant::now());
            if event::poll(wait)? {
                if let Event::Key(key) = event::read()? {
                    let surface = surface_of(terminal);
                    let now = self.now_ms();
                    self.handle_key(&key, surface, now);
                }
                continue;
            }

            next_frame += self.present_interval;
            let now = Instant::now();
            if next_frame < now {
                next_frame = now + self.present_interval;
            }

            let now_ms = self.now_ms();
            self.tick(now_ms);
            self.present(terminal, now_ms)?;
        }

        self.game.stop();
        Ok(())
    }

    fn present<B: Backend>(&self, terminal: &mut Terminal<B>, now_ms: f64) -> io::Result<()> {
        let title = self.title.visible(now_ms);
        let view = View {
            state: self.game.state(),
            assets: self.game.assets(),
            bindings: self.game.bindings(),
            phase: self.phase(),
            title: &title,
            show_hitboxes: self.show_hitboxes,
        };
        terminal.draw(|frame| ui::draw(frame, &view))?;
        Ok(())
    }
}

/// Undo the terminal setup done in `main`. Every step runs even when an
/// earlier one fails; the first error is returned.
pub fn restore_terminal<W: Write>(out: &mut W, enhanced: bool) -> io::Result<()> {
    if enhanced {
        if let Err(err) = out.execute(PopKeyboardEnhancementFlags) {
            warn!("Could not pop keyboard enhancement flags: {}", err);
        }
    }
    let raw = disable_raw_mode();
    let screen = out.execute(LeaveAlternateScreen).map(|_| ());
    let cursor = out.execute(Show).map(|_| ());
    raw.and(screen).and(cursor)
}

fn surface_of<B: Backend>(terminal: &Terminal<B>) -> Option<SurfaceSize> {
    terminal.size().ok().map(|rect| SurfaceSize {
        width: rect.width,
        height: rect.height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::INITIAL_CLOUDS;
    use crate::input::KeyId;
    use crossterm::event::{KeyCode, KeyEventKind, KeyEventState, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SURFACE: Option<SurfaceSize> = Some(SurfaceSize {
        width: 100,
        height: 30,
    });

    fn app() -> App<ChaCha8Rng> {
        App::new(
            &Config::default(),
            Assets::builtin().0,
            ChaCha8Rng::seed_from_u64(3),
            ReleaseMode::Reported,
        )
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn release(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_starts_idle() {
        let app = app();
        assert_eq!(app.phase(), Phase::Idle);
        assert!(!app.is_armed());
    }

    #[test]
    fn test_enter_starts_session() {
        let mut app = app();
        app.handle_key(&press(KeyCode::Enter), SURFACE, 0.0);

        assert_eq!(app.phase(), Phase::Running);
        assert!(app.is_armed());
        assert_eq!(app.game().state().clouds.len(), INITIAL_CLOUDS);
    }

    #[test]
    fn test_start_refused_without_surface() {
        let mut app = app();
        app.handle_key(&press(KeyCode::Enter), None, 0.0);
        assert_eq!(app.phase(), Phase::Idle);
        assert!(!app.is_armed());
    }

    #[test]
    fn test_player_keys_are_held_until_release() {
        let mut app = app();
        app.handle_key(&press(KeyCode::Enter), SURFACE, 0.0);
        app.game_mut().state_mut().next_obstacle_time = f64::INFINITY;

        app.handle_key(&press(KeyCode::Char('w')), SURFACE, 0.0);
        app.tick(0.0);
        app.tick(17.0);
        assert!(app.game().state().players[0].is_jumping);

        app.handle_key(&release(KeyCode::Char('w')), SURFACE, 20.0);
        assert!(!app.keys.held().is_held(KeyId::Char('w')));
    }

    #[test]
    fn test_hitbox_toggle() {
        let mut app = app();
        assert!(!app.show_hitboxes());
        app.handle_key(&press(KeyCode::Char('h')), SURFACE, 0.0);
        assert!(app.show_hitboxes());
        app.handle_key(&press(KeyCode::Char('h')), SURFACE, 0.0);
        assert!(!app.show_hitboxes());
    }

    #[test]
    fn test_quit_stops_loop() {
        let mut app = app();
        app.handle_key(&press(KeyCode::Enter), SURFACE, 0.0);
        app.handle_key(&press(KeyCode::Char('q')), SURFACE, 0.0);

        assert!(app.should_quit());
        assert!(!app.is_armed());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut app = app();
        app.handle_key(&press(KeyCode::Enter), SURFACE, 0.0);
        app.tick(0.0);
        for player in app.game_mut().state_mut().players.iter_mut() {
            player.kill();
        }
        let report = app.tick(17.0).unwrap();
        assert!(report.game_over_started);
        assert_eq!(app.phase(), Phase::GameOver);
        assert!(!app.is_armed());

        app.handle_key(&press(KeyCode::Char(' ')), SURFACE, 30.0);
        assert_eq!(app.phase(), Phase::Running);
        assert!(app.game().state().players.iter().all(|p| !p.is_dead));
        assert_eq!(app.game().state().score, 0);
    }

    #[test]
    fn test_palette_keeps_fading_after_game_over() {
        let mut app = app();
        app.handle_key(&press(KeyCode::Enter), SURFACE, 0.0);
        app.tick(0.0);
        app.game_mut().state_mut().gradient.retarget(4);
        for player in app.game_mut().state_mut().players.iter_mut() {
            player.kill();
        }
        assert!(app.tick(17.0).unwrap().game_over_started);
        assert!(app.game().state().gradient.is_transitioning());

        for i in 2..=60 {
            assert!(app.tick(17.0 * i as f64).is_none());
        }
        assert!(!app.game().state().gradient.is_transitioning());
        assert_eq!(app.game().state().gradient.current(), 4);
    }

    /// Rejects the first write, records everything after it.
    struct FailFirst {
        failed: bool,
        written: Vec<u8>,
    }

    impl Write for FailFirst {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.failed {
                self.failed = true;
                return Err(io::Error::new(io::ErrorKind::Other, "closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_restore_continues_when_pop_fails() {
        let mut out = FailFirst {
            failed: false,
            written: Vec::new(),
        };
        let _ = restore_terminal(&mut out, true);

        let text = String::from_utf8_lossy(&out.written);
        assert!(text.contains("\x1b[?1049l"), "left alternate screen: {:?}", text);
        assert!(text.contains("\x1b[?25h"), "cursor shown: {:?}", text);
    }
}
