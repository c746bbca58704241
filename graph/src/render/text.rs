use crate::core::{Commit, EdgeState};
use crate::layout::Row;

/// Glyph sets for drawing lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Ascii,
}

struct Glyphs {
    commit: char,
    vertical: char,
    folded: char,
    appeared: char,
}

impl Charset {
    fn glyphs(self) -> Glyphs {
        match self {
            Charset::Utf8 => Glyphs {
                commit: '●',
                vertical: '│',
                folded: '┄',
                appeared: '┆',
            },
            Charset::Ascii => Glyphs {
                commit: '*',
                vertical: '|',
                folded: '~',
                appeared: ':',
            },
        }
    }
}

/// Terminal color codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Default,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    pub fn to_ansi(&self) -> &str {
        match self {
            Color::Default => "\x1b[0m",
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
        }
    }
}

const LANE_COLORS: [Color; 6] = [
    Color::Blue,
    Color::Green,
    Color::Red,
    Color::Yellow,
    Color::Magenta,
    Color::Cyan,
];

/// Renders lane rows as one line of text each
pub struct TextRenderer {
    charset: Charset,
    colors: bool,
}

impl TextRenderer {
    pub fn new(charset: Charset) -> Self {
        Self {
            charset,
            colors: false,
        }
    }

    /// Color lanes with ANSI escapes
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Graph part of a row: two columns per lane, and a fold marker at the
    /// slot of lines cut short. Stubs sharing a slot share one marker.
    pub fn render_row(&self, row: &Row) -> String {
        let glyphs = self.charset.glyphs();
        let mut line = String::new();
        let mut last_stub = None;

        for entry in row.entries() {
            let ch = match entry.edge.state {
                EdgeState::Folded if last_stub == Some(entry.lane) => continue,
                EdgeState::Folded => {
                    last_stub = Some(entry.lane);
                    glyphs.folded
                }
                EdgeState::Appeared => glyphs.appeared,
                EdgeState::Open if entry.edge.is_commit() => glyphs.commit,
                EdgeState::Open => glyphs.vertical,
            };
            if self.colors {
                line.push_str(LANE_COLORS[entry.lane % LANE_COLORS.len()].to_ansi());
            }
            line.push(ch);
            line.push(' ');
        }
        if self.colors {
            line.push_str(Color::Default.to_ansi());
        }

        line
    }

    /// Renders `rows` next to the short hash of their commit
    pub fn render_rows(&self, rows: &[Row], commits: &[Commit]) -> String {
        let width = rows.iter().map(cells).max().unwrap_or(0);
        let mut buffer = String::new();

        for row in rows {
            buffer.push_str(&self.render_row(row));
            buffer.push_str(&" ".repeat((width - cells(row)) * 2));
            if let Some(commit) = commits.get(row.index()) {
                buffer.push_str(commit.short_hash());
            }
            buffer.push('\n');
        }

        buffer
    }
}

/// Columns drawn for a row: its lanes plus one per distinct stub slot
fn cells(row: &Row) -> usize {
    let mut slots: Vec<usize> = row.folded().map(|entry| entry.lane).collect();
    slots.dedup();
    row.lane_count() + slots.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Edge;
    use crate::layout::compute_lanes;

    fn octopus() -> Vec<Commit> {
        vec![
            Commit::with_parents("octopus1", &["p1", "p2", "p3"]),
            Commit::with_parents("p1", &[]),
            Commit::with_parents("p2", &[]),
            Commit::with_parents("p3", &[]),
        ]
    }

    #[test]
    fn ascii_rows_show_commit_and_passing_lines() {
        let commits = octopus();
        let rows = compute_lanes(&commits, 2).unwrap();
        let renderer = TextRenderer::new(Charset::Ascii);

        assert_eq!(renderer.render_row(&rows[0]), "* ");
        assert_eq!(renderer.render_row(&rows[1]), "* | ~ ");
        assert_eq!(renderer.render_row(&rows[2]), "* : ");
        assert_eq!(renderer.render_row(&rows[3]), "* ");
    }

    #[test]
    fn stubs_are_drawn_at_their_slot() {
        let mut row = Row::new(2);
        row.insert(Edge::commit(2));
        row.insert(Edge::folded(0, 5));
        row.insert(Edge::folded(1, 6));
        row.insert(Edge::open(1, 4));
        row.renumber();

        let renderer = TextRenderer::new(Charset::Ascii);
        assert_eq!(renderer.render_row(&row), "* ~ | ");
        assert_eq!(cells(&row), 3);
    }

    #[test]
    fn render_rows_aligns_hashes() {
        let commits = octopus();
        let rows = compute_lanes(&commits, 2).unwrap();
        let output = TextRenderer::new(Charset::Ascii).render_rows(&rows, &commits);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "*     octopus1");
        assert_eq!(lines[1], "* | ~ p1");
        assert_eq!(lines[2], "* :   p2");
        assert_eq!(lines[3], "*     p3");
    }

    #[test]
    fn colored_rows_reset_at_end_of_graph() {
        let commits = octopus();
        let rows = compute_lanes(&commits, 2).unwrap();
        let line = TextRenderer::new(Charset::Utf8)
            .with_colors(true)
            .render_row(&rows[0]);

        assert!(line.starts_with(Color::Blue.to_ansi()));
        assert!(line.contains('●'));
        assert!(line.ends_with(Color::Default.to_ansi()));
    }
}
