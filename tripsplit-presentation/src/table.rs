use std::borrow::Cow;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Renderer-independent table: an optional title, a header row, body rows, an optional
/// totals row and an optional note printed underneath.
#[derive(Clone, Debug, Default)]
pub struct Table<'a> {
    pub title: Option<Cow<'a, str>>,
    pub headers: Vec<Cow<'a, str>>,
    pub alignments: Vec<Alignment>,
    pub rows: Vec<Vec<Cow<'a, str>>>,
    pub footer: Option<Vec<Cow<'a, str>>>,
    pub note: Option<Cow<'a, str>>,
}

impl<'a> Table<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<Cow<'a, str>>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn headers<I, C>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cow<'a, str>>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn alignments(mut self, alignments: impl IntoIterator<Item = Alignment>) -> Self {
        self.alignments = alignments.into_iter().collect();
        self
    }

    pub fn row(mut self, row: Vec<Cow<'a, str>>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Vec<Cow<'a, str>>>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn footer(mut self, footer: Vec<Cow<'a, str>>) -> Self {
        self.footer = Some(footer);
        self
    }

    pub fn note(mut self, note: impl Into<Cow<'a, str>>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Missing alignments default to [`Alignment::Left`].
    pub fn alignment(&self, column: usize) -> Alignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }

    /// Widest cell of every column under `measure`. Cells past the header count are
    /// ignored.
    pub fn column_widths(&self, measure: impl Fn(&str) -> u32) -> Vec<u32> {
        let mut widths: Vec<u32> = self.headers.iter().map(|h| measure(h.as_ref())).collect();
        for line in self.rows.iter().chain(self.footer.iter()) {
            for (width, cell) in widths.iter_mut().zip(line) {
                *width = (*width).max(measure(cell.as_ref()));
            }
        }
        widths
    }
}
