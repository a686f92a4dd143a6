use std::{
    fmt,
    io::{Stdout, Write},
};

use crossterm::{
    QueueableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    maze::{Coord, Maze},
    solvers::Comparison,
};

/// What a single block of the drawn maze shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Wall,
    /// A cell the generator has not reached yet
    Unvisited,
    Empty,
    /// The cell the generator is standing on
    Current,
    /// A cell on the generator's backtracking stack
    Stacked,
    Start,
    Target,
    /// Selection cursor while picking a target
    Cursor,
    DijkstraPath,
    AStarPath,
    /// A cell on both search paths
    SharedPath,
}

impl Glyph {
    /// The width of each glyph when rendered, in character widths.
    pub const WIDTH: u16 = 2;
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Glyph::Wall => "⬜".with(Color::White),
            Glyph::Unvisited => "░░".with(Color::DarkGrey),
            Glyph::Empty => "  ".with(Color::Reset),
            Glyph::Current => "🟫".with(Color::DarkYellow),
            Glyph::Stacked => "🟪".with(Color::Magenta),
            Glyph::Start => "🟨".with(Color::Yellow),
            Glyph::Target => "🟥".with(Color::Red),
            Glyph::Cursor => "🔲".with(Color::White),
            Glyph::DijkstraPath => "🟩".with(Color::Green),
            Glyph::AStarPath => "🟦".with(Color::Blue),
            Glyph::SharedPath => "🟢".with(Color::Cyan),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Glyph::WIDTH as usize,
                "Each glyph must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}

/// What is going on in the maze, beyond its walls.
pub enum Scene<'a> {
    /// Generation in progress
    Carving { current: Coord, stack: &'a [Coord] },
    /// Generation done, the user is picking targets
    Exploring {
        start: Coord,
        cursor: Coord,
        target: Option<Coord>,
        comparison: Option<&'a Comparison>,
    },
}

/// A maze laid out as blocks: cells sit at odd positions and the walls
/// between them at even ones, so an `n`-cell row is `2n + 1` blocks wide.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u16,
    height: u16,
    glyphs: Vec<Glyph>,
}

impl Frame {
    pub fn compose(maze: &Maze, scene: &Scene) -> Self {
        let width = maze.width() as u16 * 2 + 1;
        let height = maze.height() as u16 * 2 + 1;
        let mut frame = Frame {
            width,
            height,
            glyphs: vec![Glyph::Wall; width as usize * height as usize],
        };

        for cell in maze.cells() {
            let glyph = if cell.visited {
                Glyph::Empty
            } else {
                Glyph::Unvisited
            };
            frame.set_cell(cell.coord(), glyph);
            // Passages are drawn from their left or top cell only
            if cell.x + 1 < maze.width() && !cell.walls.right {
                frame.set_between(cell.coord(), (cell.x + 1, cell.y), Glyph::Empty);
            }
            if cell.y + 1 < maze.height() && !cell.walls.bottom {
                frame.set_between(cell.coord(), (cell.x, cell.y + 1), Glyph::Empty);
            }
        }

        match scene {
            Scene::Carving { current, stack } => {
                stack
                    .iter()
                    .for_each(|&coord| frame.set_cell(coord, Glyph::Stacked));
                frame.set_cell(*current, Glyph::Current);
            }
            Scene::Exploring {
                start,
                cursor,
                target,
                comparison,
            } => {
                if let Some(comparison) = comparison {
                    frame.trace(&comparison.dijkstra.path, Glyph::DijkstraPath);
                    frame.trace(&comparison.astar.path, Glyph::AStarPath);
                }
                frame.set_cell(*start, Glyph::Start);
                if let Some(target) = target {
                    frame.set_cell(*target, Glyph::Target);
                }
                frame.set_cell(*cursor, Glyph::Cursor);
            }
        }
        frame
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn glyph(&self, x: u16, y: u16) -> Option<Glyph> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.glyphs.get(y as usize * self.width as usize + x as usize).copied()
    }

    /// Block position of a maze cell.
    pub fn block_of(coord: Coord) -> (u16, u16) {
        (coord.0 as u16 * 2 + 1, coord.1 as u16 * 2 + 1)
    }

    fn set(&mut self, (x, y): (u16, u16), glyph: Glyph) {
        if x < self.width && y < self.height {
            self.glyphs[y as usize * self.width as usize + x as usize] = glyph;
        }
    }

    fn set_cell(&mut self, coord: Coord, glyph: Glyph) {
        self.set(Frame::block_of(coord), glyph);
    }

    /// Sets the wall block between two adjacent cells.
    fn set_between(&mut self, a: Coord, b: Coord, glyph: Glyph) {
        let (ax, ay) = Frame::block_of(a);
        let (bx, by) = Frame::block_of(b);
        self.set(((ax + bx) / 2, (ay + by) / 2), glyph);
    }

    /// Draws a path over its cells and the passages between them. A block
    /// already carrying the other search's path becomes shared.
    fn trace(&mut self, path: &[Coord], glyph: Glyph) {
        let paint = |frame: &mut Frame, block: (u16, u16)| {
            let merged = match frame.glyph(block.0, block.1) {
                Some(existing @ (Glyph::DijkstraPath | Glyph::AStarPath | Glyph::SharedPath))
                    if existing != glyph =>
                {
                    Glyph::SharedPath
                }
                _ => glyph,
            };
            frame.set(block, merged);
        };
        for &coord in path {
            paint(self, Frame::block_of(coord));
        }
        for pair in path.windows(2) {
            let (ax, ay) = Frame::block_of(pair[0]);
            let (bx, by) = Frame::block_of(pair[1]);
            paint(self, ((ax + bx) / 2, (ay + by) / 2));
        }
    }
}

pub struct Renderer {
    /// Standard output handle to write to the terminal
    stdout: Stdout,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Number of terminal rows reserved below the maze for info text
    pub const NUM_INFO_ROWS: u16 = 6;

    pub fn new() -> Self {
        Self {
            stdout: std::io::stdout(),
        }
    }

    /// Check if the terminal can show a frame of the given size plus the info rows.
    /// If not, show a message asking for a resize and return Ok(false).
    pub fn check_size(&mut self, width: u16, height: u16) -> std::io::Result<bool> {
        let (term_width, term_height) = terminal::size()?;
        let needed_height = height + Renderer::NUM_INFO_ROWS;
        if term_width >= width * Glyph::WIDTH && term_height >= needed_height {
            return Ok(true);
        }
        let msg = format!(
            "Terminal size is too small ({}x{}) for the maze to display, it needs {}x{}. Please resize the terminal.\r\n",
            term_width,
            term_height,
            width * Glyph::WIDTH,
            needed_height
        );
        tracing::debug!("[render] terminal too small: {}x{}", term_width, term_height);
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
            style::PrintStyledContent(
                "Press Esc to exit...\r\n"
                    .with(Color::Blue)
                    .attribute(Attribute::Bold)
            )
        )?;
        self.stdout.flush()?;
        Ok(false)
    }

    /// Draw a frame at the top-left corner with info lines below it.
    /// Lines longer than the terminal are cut to fit.
    pub fn draw(&mut self, frame: &Frame, info: &[String]) -> std::io::Result<()> {
        if !self.check_size(frame.width(), frame.height())? {
            return Ok(());
        }
        let (term_width, _) = terminal::size()?;

        self.stdout.queue(cursor::MoveTo(0, 0))?;
        for y in 0..frame.height() {
            self.stdout.queue(cursor::MoveTo(0, y))?;
            for x in 0..frame.width() {
                if let Some(glyph) = frame.glyph(x, y) {
                    self.stdout.queue(style::Print(glyph))?;
                }
            }
        }

        for row in 0..Renderer::NUM_INFO_ROWS {
            queue!(
                self.stdout,
                cursor::MoveTo(0, frame.height() + row),
                terminal::Clear(ClearType::CurrentLine)
            )?;
            if let Some(line) = info.get(row as usize) {
                let (fitted, _) = line.unicode_truncate(term_width as usize);
                self.stdout
                    .queue(style::PrintStyledContent(fitted.with(Color::White)))?;
            }
        }
        self.stdout.flush()?;
        Ok(())
    }

    pub fn clear(&mut self) -> std::io::Result<()> {
        queue!(
            self.stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        self.stdout.flush()
    }
}
