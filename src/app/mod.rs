pub mod renderer;

use std::{
    io::{Stdout, Write},
    time::{Duration, Instant},
};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    app::renderer::{Frame, Glyph, Renderer, Scene},
    generators::{Backtracker, GenerationStatus, generate_maze, get_rng},
    maze::{Coord, Maze},
    solvers::{Comparison, SearchOutcome, Solver, compare, solve},
};

/// Environment variable holding a fixed generation seed
pub const SEED_ENV_VAR: &str = "MAZEPATH_SEED";

/// Every search starts from the top-left cell
pub const START: Coord = (0, 0);

pub struct App {
    /// Time between two animation frames while carving
    frame_delay: Duration,
    /// Generator steps applied per animation frame, adjustable with ↑/↓
    steps_per_frame: usize,
    /// Upper bound for `steps_per_frame`
    max_steps_per_frame: usize,
    /// Seed for maze generation, drawn from the OS when `None`
    seed: Option<u64>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            // ~30 frames per second
            frame_delay: Duration::from_millis(33),
            steps_per_frame: 1,
            max_steps_per_frame: 1024,
            seed: None,
        }
    }
}

/// Timing summary of one headless generate-and-search run
#[derive(Debug, Clone, Copy)]
pub struct ProfileRun {
    pub generation: Duration,
    pub dijkstra: Duration,
    pub astar: Duration,
    pub dijkstra_expanded: usize,
    pub astar_expanded: usize,
    pub path_len: usize,
}

impl App {
    /// Default settings, with the seed taken from `MAZEPATH_SEED` if it is set.
    pub fn from_env() -> Self {
        let seed = match std::env::var(SEED_ENV_VAR) {
            Ok(value) => match value.trim().parse::<u64>() {
                Ok(seed) => Some(seed),
                Err(e) => {
                    tracing::warn!("Ignoring invalid {}={:?}: {}", SEED_ENV_VAR, value, e);
                    None
                }
            },
            Err(_) => None,
        };
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set a panic hook to restore terminal state on panic
    /// This ensures that the terminal is not left in raw mode or alternate screen on panic
    fn set_panic_hook() {
        let hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = App::restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
            hook(panic_info);
        }));
    }

    /// Setup terminal in raw mode and enter alternate screen
    /// Also sets a panic hook to restore terminal on panic
    pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        terminal::enable_raw_mode()?;
        App::set_panic_hook();
        crossterm::queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide,
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        Ok(())
    }

    /// Restore terminal to original state
    /// Leave alternate screen and disable raw mode
    pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
        queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
        stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Main application loop
    pub fn run(&self, stdout: &mut Stdout) -> std::io::Result<()> {
        // Ask user for maze dimensions
        let (width, height) = match App::ask_maze_dimensions(stdout)? {
            Some(dims) => dims,
            None => {
                return Ok(());
            }
        };

        let animate = match App::select_from_menu(
            stdout,
            "Animate maze generation? (use arrow keys and Enter, or Esc to exit):",
            &["Yes", "No"],
        )? {
            Some(choice) => choice == "Yes",
            None => {
                return Ok(());
            }
        };

        tracing::info!(
            "Starting with a {}x{} maze, animate: {}, seed: {:?}",
            width,
            height,
            animate,
            self.seed
        );

        let mut renderer = Renderer::new();
        renderer.clear()?;

        let mut maze = Maze::new(width, height);
        if animate {
            if !self.animate_generation(&mut maze, &mut renderer)? {
                tracing::info!("Generation was cancelled by user.");
                return Ok(());
            }
        } else {
            generate_maze(&mut maze, self.seed);
        }

        self.explore(&maze, &mut renderer)?;
        tracing::info!("Exiting main app loop");
        Ok(())
    }

    /// Carve the maze one frame at a time, drawing the carver and its stack.
    /// Returns Ok(false) if the user pressed Esc before carving finished.
    fn animate_generation(&self, maze: &mut Maze, renderer: &mut Renderer) -> std::io::Result<bool> {
        let mut generator = Backtracker::new(maze, get_rng(self.seed));
        let mut steps_per_frame = self.steps_per_frame;
        let mut steps = 0usize;

        while !generator.is_done() {
            for _ in 0..steps_per_frame {
                steps += 1;
                if generator.step(maze) == GenerationStatus::Done {
                    break;
                }
            }

            let scene = Scene::Carving {
                current: generator.current(),
                stack: generator.stack(),
            };
            let visited = maze.cells().filter(|c| c.visited).count();
            let info = [
                format!(
                    "Carving... {}/{} cells visited, stack depth {}",
                    visited,
                    maze.len(),
                    generator.stack().len()
                ),
                format!(
                    "{} current cell  {} backtracking stack  ({} steps per frame)",
                    Glyph::Current,
                    Glyph::Stacked,
                    steps_per_frame
                ),
                "↑/↓: Speed up/slow down  Esc: Exit".to_string(),
            ];
            renderer.draw(&Frame::compose(maze, &scene), &info)?;

            // Wait out the rest of the frame while handling key presses
            let frame_start = Instant::now();
            while let Some(remaining) = self.frame_delay.checked_sub(frame_start.elapsed()) {
                if !event::poll(remaining)? {
                    break;
                }
                match event::read()? {
                    event::Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                        match key.code {
                            KeyCode::Esc => {
                                tracing::debug!("[carve loop] Esc key pressed, exiting");
                                return Ok(false);
                            }
                            KeyCode::Up => {
                                steps_per_frame = (steps_per_frame * 2).min(self.max_steps_per_frame)
                            }
                            KeyCode::Down => steps_per_frame = (steps_per_frame / 2).max(1),
                            _ => {}
                        }
                    }
                    event::Event::Resize(_, _) => renderer.clear()?,
                    _ => {}
                }
            }
        }

        tracing::info!("Animated generation finished after {} steps", steps);
        Ok(true)
    }

    /// Let the user pick targets and compare both searches from [`START`] until Esc.
    fn explore(&self, maze: &Maze, renderer: &mut Renderer) -> std::io::Result<()> {
        let mut cursor = START;
        let mut target = None;
        let mut comparison: Option<Comparison> = None;

        loop {
            let scene = Scene::Exploring {
                start: START,
                cursor,
                target,
                comparison: comparison.as_ref(),
            };
            renderer.draw(
                &Frame::compose(maze, &scene),
                &App::info_lines(comparison.as_ref()),
            )?;

            let key = match event::read()? {
                event::Event::Key(key) if key.kind == event::KeyEventKind::Press => key,
                event::Event::Resize(_, _) => {
                    renderer.clear()?;
                    continue;
                }
                _ => continue,
            };
            match key.code {
                KeyCode::Esc => {
                    tracing::debug!("[explore loop] Esc key pressed, exiting");
                    return Ok(());
                }
                KeyCode::Enter => {
                    target = Some(cursor);
                    comparison = Some(compare(maze, START, cursor));
                }
                code => cursor = App::move_cursor(maze, cursor, code),
            }
        }
    }

    /// Move the selection cursor one cell with the arrow keys, staying inside the maze.
    fn move_cursor(maze: &Maze, cursor: Coord, code: KeyCode) -> Coord {
        let (x, y) = cursor;
        let moved = match code {
            KeyCode::Up => (x, y.saturating_sub(1)),
            KeyCode::Down => (x, y.saturating_add(1)),
            KeyCode::Left => (x.saturating_sub(1), y),
            KeyCode::Right => (x.saturating_add(1), y),
            _ => cursor,
        };
        if maze.is_in_bounds(moved) {
            moved
        } else {
            cursor
        }
    }

    /// Info text shown under the maze once it is carved.
    fn info_lines(comparison: Option<&Comparison>) -> Vec<String> {
        let describe = |outcome: &SearchOutcome| match outcome.cost() {
            Some(cost) => format!(
                "{}: {} steps, {} cells expanded",
                outcome.solver, cost, outcome.expanded
            ),
            None => format!("{}: no path found", outcome.solver),
        };

        let mut lines = vec![
            "Maze generated! Move with arrow keys, Enter to find a path from the start, Esc to exit."
                .to_string(),
        ];
        match comparison {
            Some(comparison) => {
                lines.push(format!("{} {}", Glyph::DijkstraPath, describe(&comparison.dijkstra)));
                lines.push(format!("{} {}", Glyph::AStarPath, describe(&comparison.astar)));
                let agreement = if comparison.paths_agree() {
                    "Both searches found the same path."
                } else {
                    "The searches found different paths."
                };
                lines.push(format!("{} {}", Glyph::SharedPath, agreement));
            }
            None => lines.push("No target selected yet.".to_string()),
        }
        lines.push(format!(
            "{} start  {} target  {} cursor",
            Glyph::Start,
            Glyph::Target,
            Glyph::Cursor
        ));
        lines
    }

    /// Profiling mode: generate and search without touching the terminal.
    /// Each run goes corner to corner, from [`START`] to the bottom-right cell.
    pub fn profile(&self, width: u8, height: u8, num_iterations: Option<usize>) -> Vec<ProfileRun> {
        let num_iterations = num_iterations.unwrap_or(1);
        (0..num_iterations)
            .map(|i| {
                let mut maze = Maze::new(width, height);
                let started = Instant::now();
                // Vary the seed per run so repeated runs see different mazes
                generate_maze(&mut maze, self.seed.map(|s| s.wrapping_add(i as u64)));
                let generation = started.elapsed();

                let goal = (width.saturating_sub(1), height.saturating_sub(1));
                let started = Instant::now();
                let dijkstra = solve(&maze, START, goal, Solver::Dijkstra);
                let dijkstra_time = started.elapsed();
                let started = Instant::now();
                let astar = solve(&maze, START, goal, Solver::AStar);
                let astar_time = started.elapsed();

                let run = ProfileRun {
                    generation,
                    dijkstra: dijkstra_time,
                    astar: astar_time,
                    dijkstra_expanded: dijkstra.expanded,
                    astar_expanded: astar.expanded,
                    path_len: astar.path.len(),
                };
                tracing::info!("[profile] iteration {}: {:?}", i, run);
                run
            })
            .collect()
    }

    /// Get user input with real-time validation and feedback
    /// Returns None if user cancels input with Esc
    /// Returns Some(T) if user inputs a valid input and presses Enter, where T is the validated type
    fn prompt_with_validation<F, T>(
        stdout: &mut Stdout,
        prompt: &str,
        validate: F,
    ) -> std::io::Result<Option<T>>
    where
        F: Fn(&str) -> Result<T, String>,
    {
        // Save cursor position so we can restore / redraw
        queue!(stdout, cursor::Hide, cursor::SavePosition)?;
        stdout.flush()?;

        let mut input = String::new();

        let value = loop {
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown)
            )?;

            stdout.queue(style::PrintStyledContent(
                prompt.with(Color::Cyan).attribute(Attribute::Bold),
            ))?;

            // Decide color based on validity
            let validation_result = validate(input.trim());
            match validation_result {
                Ok(_) => {
                    stdout.queue(style::SetForegroundColor(Color::Green))?;
                }
                Err(_) => {
                    stdout.queue(style::SetForegroundColor(Color::Red))?;
                }
            }

            queue!(stdout, style::Print(&input), style::ResetColor)?;

            stdout.queue(style::Print(" \r\n"))?;

            if let Err(msg) = validation_result {
                stdout.queue(style::PrintStyledContent(
                    msg.with(Color::DarkGrey).attribute(Attribute::Dim),
                ))?;
            }

            stdout.flush()?;

            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if kind != event::KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Enter => match validate(input.trim()) {
                        Ok(n) => break Some(n),
                        Err(_) => continue,
                    },
                    KeyCode::Char(c) => {
                        if !c.is_whitespace() && !c.is_control() {
                            input.push(c);
                        }
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Esc => {
                        break None;
                    }
                    _ => {}
                }
            }
        };
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;

        Ok(value)
    }

    /// Largest maze dimension whose drawing fits in `term_size` terminal cells.
    /// The drawing of `n` cells spans `2n + 1` blocks of `block_size` terminal cells,
    /// and `reserved` terminal cells are kept free. Always at least 1.
    fn get_max_maze_size(term_size: u16, block_size: u16, reserved: u16) -> u8 {
        let blocks = term_size.saturating_sub(reserved) / block_size.max(1);
        (blocks.saturating_sub(1) / 2).clamp(1, u8::MAX as u16) as u8
    }

    /// Ask user for maze dimensions (width and height between 1 and 255)
    /// Returns None if user cancels input with Esc
    /// Returns Some((width, height)) if user inputs valid dimensions
    fn ask_maze_dimensions(stdout: &mut Stdout) -> std::io::Result<Option<(u8, u8)>> {
        stdout.execute(style::PrintStyledContent(
            "Enter maze dimensions (width and height between 1 and 255), or press Esc to exit. \
Maximum acceptable values are based on current terminal size. Leave empty for the maximum.\r\n"
                .with(Color::Blue),
        ))?;

        let validate = |s: &str, is_width| {
            let max_size = if let Ok((term_width, term_height)) = terminal::size() {
                if is_width {
                    App::get_max_maze_size(term_width, Glyph::WIDTH, 0)
                } else {
                    // Reserve rows for the info text
                    App::get_max_maze_size(term_height, 1, Renderer::NUM_INFO_ROWS)
                }
            } else {
                // Fallback to max size if terminal size cannot be determined
                u8::MAX
            };

            if s.trim().is_empty() {
                return Ok(max_size);
            }

            let error_msg = format!("Please enter a valid number between 1 and {}.", max_size);
            s.parse::<u8>()
                .map_err(|_| error_msg.clone())
                .and_then(|n| match n {
                    1..=255 if n <= max_size => Ok(n),
                    _ => Err(error_msg),
                })
        };

        let validate_width = |s: &str| validate(s, true);
        let validate_height = |s: &str| validate(s, false);

        let width = match App::prompt_with_validation(stdout, "Width: ", validate_width)? {
            Some(w) => w,
            None => return Ok(None),
        };
        stdout.execute(style::PrintStyledContent(
            format!("Width set to {}\r\n", width)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        let height = match App::prompt_with_validation(stdout, "Height: ", validate_height)? {
            Some(h) => h,
            None => return Ok(None),
        };
        stdout.execute(style::PrintStyledContent(
            format!("Height set to {}\r\n", height)
                .with(Color::Green)
                .attribute(Attribute::Bold),
        ))?;

        Ok(Some((width, height)))
    }

    /// Present a menu of options to the user and let them select one using arrow keys
    /// Returns None if user cancels input with Esc
    /// Returns Some(T) if user selects an option and presses Enter, where T is the option type
    fn select_from_menu<T: std::fmt::Display + Copy>(
        stdout: &mut Stdout,
        prompt: &str,
        options: &[T],
    ) -> std::io::Result<Option<T>> {
        if options.is_empty() {
            return Ok(None);
        }

        queue!(stdout, cursor::Hide, cursor::SavePosition)?;

        let mut selected = 0;

        let selected_option = loop {
            queue!(
                stdout,
                cursor::RestorePosition,
                terminal::Clear(ClearType::FromCursorDown)
            )?;

            stdout.queue(style::PrintStyledContent(prompt.with(Color::Yellow)))?;

            for (i, option) in options.iter().enumerate() {
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::Reverse))?;
                }
                stdout.queue(style::Print(format!("\r\n{}", option)))?;
                if i == selected {
                    stdout.queue(style::SetAttribute(Attribute::NoReverse))?;
                }
            }
            stdout.queue(style::Print("\r\n"))?;

            stdout.flush()?;

            if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()? {
                if kind != event::KeyEventKind::Press {
                    continue;
                }
                match code {
                    KeyCode::Up => {
                        selected = match selected {
                            0 => options.len() - 1,
                            _ => selected - 1,
                        };
                    }
                    KeyCode::Down => {
                        selected = if selected >= options.len() - 1 {
                            0
                        } else {
                            selected + 1
                        };
                    }
                    KeyCode::Enter => {
                        break Some(options[selected]);
                    }
                    KeyCode::Esc => {
                        break None;
                    }
                    _ => {}
                }
            }
        };
        queue!(
            stdout,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown),
            cursor::Show
        )?;
        stdout.flush()?;

        Ok(selected_option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_max_maze_size() {
        // 80 columns: 40 blocks, 19 cells need 39 blocks
        assert_eq!(App::get_max_maze_size(80, Glyph::WIDTH, 0), 19);
        // 24 rows minus 6 info rows: 18 blocks, 8 cells need 17 blocks
        assert_eq!(App::get_max_maze_size(24, 1, 6), 8);
        assert_eq!(App::get_max_maze_size(2, 1, 6), 1);
        assert_eq!(App::get_max_maze_size(u16::MAX, 1, 0), u8::MAX);
    }

    #[test]
    fn test_move_cursor_stays_in_bounds() {
        let maze = Maze::new(3, 2);
        assert_eq!(App::move_cursor(&maze, (0, 0), KeyCode::Left), (0, 0));
        assert_eq!(App::move_cursor(&maze, (0, 0), KeyCode::Up), (0, 0));
        assert_eq!(App::move_cursor(&maze, (0, 0), KeyCode::Right), (1, 0));
        assert_eq!(App::move_cursor(&maze, (2, 1), KeyCode::Right), (2, 1));
        assert_eq!(App::move_cursor(&maze, (2, 1), KeyCode::Down), (2, 1));
        assert_eq!(App::move_cursor(&maze, (2, 0), KeyCode::Down), (2, 1));
        assert_eq!(App::move_cursor(&maze, (1, 1), KeyCode::Char('x')), (1, 1));
    }

    #[test]
    fn test_info_lines_report_both_searches() {
        let mut maze = Maze::new(4, 4);
        generate_maze(&mut maze, Some(9));
        let comparison = compare(&maze, START, (3, 3));
        let lines = App::info_lines(Some(&comparison));
        assert!(lines.len() <= Renderer::NUM_INFO_ROWS as usize);
        assert!(lines[1].contains("Dijkstra"));
        assert!(lines[2].contains("A*"));
        assert!(lines[3].contains("same path"));

        let lines = App::info_lines(None);
        assert!(lines.iter().any(|l| l.contains("No target")));
    }

    #[test]
    fn test_info_lines_unreachable_target() {
        let maze = Maze::new(2, 2);
        let comparison = compare(&maze, START, (1, 1));
        let lines = App::info_lines(Some(&comparison));
        assert!(lines[1].contains("no path found"));
        assert!(lines[2].contains("no path found"));
    }

    #[test]
    fn test_profile_runs_headless() {
        let app = App::default().with_seed(Some(3));
        let runs = app.profile(10, 8, Some(3));
        assert_eq!(runs.len(), 3);
        for run in runs {
            assert!(run.path_len >= 10 + 8 - 1);
            assert!(run.astar_expanded <= run.dijkstra_expanded);
        }
    }
}
