use super::fonts::{wrap_text, Font};

/// Landscape A4 in points.
pub const PAGE_WIDTH: f32 = 841.89;
pub const PAGE_HEIGHT: f32 = 595.28;
pub const TOP_MARGIN: f32 = 10.0;
pub const BOTTOM_MARGIN: f32 = 10.0;

pub const TITLE: &str = "Side Quest Hunt Report (Non PL OOS and potentially free rooms)";
pub const TITLE_SIZE: f32 = 18.0;
pub const TITLE_LEADING: f32 = 22.0;
pub const TITLE_SPACER: f32 = 12.0;

pub const GRID_WIDTH: f32 = 0.5;
const CELL_PADDING_X: f32 = 6.0;
const CELL_PADDING_TOP: f32 = 3.0;

pub type Rgb = (f32, f32, f32);

pub const GREY: Rgb = (0.5, 0.5, 0.5);
pub const WHITESMOKE: Rgb = (0.96, 0.96, 0.96);
pub const BEIGE: Rgb = (0.96, 0.96, 0.86);
pub const BLACK: Rgb = (0.0, 0.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One report column: its header text, width and whether long values wrap
/// inside the cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSpec {
    pub header: &'static str,
    pub width: f32,
    pub wraps: bool,
}

pub const COLUMNS: [ColumnSpec; 8] = [
    ColumnSpec {
        header: "Room number",
        width: 80.0,
        wraps: false,
    },
    ColumnSpec {
        header: "Condition",
        width: 60.0,
        wraps: false,
    },
    ColumnSpec {
        header: "Status",
        width: 70.0,
        wraps: false,
    },
    ColumnSpec {
        header: "Occupied",
        width: 60.0,
        wraps: false,
    },
    ColumnSpec {
        header: "Maintenance",
        width: 70.0,
        wraps: false,
    },
    ColumnSpec {
        header: "Maintenance Slot Until",
        width: 115.0,
        wraps: false,
    },
    ColumnSpec {
        header: "Maintenance description",
        width: 180.0,
        wraps: true,
    },
    ColumnSpec {
        header: "Side Quest Material",
        width: 105.0,
        wraps: false,
    },
];

pub fn table_width() -> f32 {
    COLUMNS.iter().map(|column| column.width).sum()
}

/// Text settings for a run of lines inside a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub size: f32,
    pub leading: f32,
    pub color: Rgb,
    pub align: Align,
}

/// Row-level styling: fill, bottom padding and the text style of plain
/// and wrapped cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowStyle {
    pub background: Rgb,
    pub bottom_padding: f32,
    pub text: TextStyle,
    pub wrapped_text: TextStyle,
}

pub const HEADER_STYLE: RowStyle = RowStyle {
    background: GREY,
    bottom_padding: 10.0,
    text: TextStyle {
        font: Font::Bold,
        size: 10.0,
        leading: 12.0,
        color: WHITESMOKE,
        align: Align::Center,
    },
    wrapped_text: TextStyle {
        font: Font::Bold,
        size: 10.0,
        leading: 12.0,
        color: WHITESMOKE,
        align: Align::Center,
    },
};

pub const BODY_STYLE: RowStyle = RowStyle {
    background: BEIGE,
    bottom_padding: 8.0,
    text: TextStyle {
        font: Font::Regular,
        size: 9.0,
        leading: 10.8,
        color: BLACK,
        align: Align::Center,
    },
    wrapped_text: TextStyle {
        font: Font::Regular,
        size: 10.0,
        leading: 12.0,
        color: BLACK,
        align: Align::Left,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header,
    Body,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellLayout {
    pub x: f32,
    pub width: f32,
    pub lines: Vec<String>,
    pub style: TextStyle,
}

impl CellLayout {
    /// Baselines top to bottom. Text sits on the bottom padding, as the
    /// cells are bottom aligned.
    pub fn baselines(&self, row_bottom: f32, bottom_padding: f32) -> Vec<f32> {
        let count = self.lines.len();
        let block_top = row_bottom + bottom_padding + count as f32 * self.style.leading;
        (0..count)
            .map(|index| block_top - self.style.size - index as f32 * self.style.leading)
            .collect()
    }

    /// Left edge of the text for `line`.
    pub fn text_x(&self, line: &str) -> f32 {
        match self.style.align {
            Align::Left => self.x + CELL_PADDING_X,
            Align::Center => {
                let text_width = self.style.font.text_width(line, self.style.size);
                self.x + (self.width - text_width) / 2.0
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowLayout {
    pub kind: RowKind,
    pub style: RowStyle,
    /// Y of the row's top edge, PDF coordinates.
    pub top: f32,
    pub height: f32,
    pub cells: Vec<CellLayout>,
}

impl RowLayout {
    pub fn bottom(&self) -> f32 {
        self.top - self.height
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub has_title: bool,
    pub rows: Vec<RowLayout>,
}

impl PageLayout {
    pub fn body_rows(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| row.kind == RowKind::Body)
            .count()
    }
}

pub fn table_left() -> f32 {
    (PAGE_WIDTH - table_width()) / 2.0
}

fn title_block_height(title_lines: usize) -> f32 {
    title_lines as f32 * TITLE_LEADING + TITLE_SPACER
}

/// Cells of one row, measured and wrapped, not yet positioned vertically.
fn measure_row(cells: &[String], style: RowStyle) -> (Vec<CellLayout>, f32) {
    let mut x = table_left();
    let mut tallest = 0.0_f32;
    let mut laid_out = Vec::with_capacity(COLUMNS.len());

    for (column, text) in COLUMNS.iter().zip(cells) {
        let text_style = if column.wraps {
            style.wrapped_text
        } else {
            style.text
        };
        let lines = if column.wraps {
            wrap_text(
                text,
                text_style.font,
                text_style.size,
                column.width - 2.0 * CELL_PADDING_X,
            )
        } else {
            vec![text.replace(['\r', '\n'], " ")]
        };

        tallest = tallest.max(lines.len() as f32 * text_style.leading);
        laid_out.push(CellLayout {
            x,
            width: column.width,
            lines,
            style: text_style,
        });
        x += column.width;
    }

    (laid_out, CELL_PADDING_TOP + tallest + style.bottom_padding)
}

/// Splits the table across pages. The title block opens page one, the
/// header row repeats on every page and body rows are never split. A row
/// taller than a continuation page is placed alone and allowed to overflow.
pub fn paginate(title_lines: usize, rows: &[[String; 8]]) -> Vec<PageLayout> {
    let header_cells: Vec<String> = COLUMNS
        .iter()
        .map(|column| column.header.to_string())
        .collect();
    let (header, header_height) = measure_row(&header_cells, HEADER_STYLE);
    let continuation_capacity = PAGE_HEIGHT - TOP_MARGIN - header_height - BOTTOM_MARGIN;

    let mut pages = Vec::new();
    let mut page = PageLayout {
        has_title: true,
        rows: Vec::new(),
    };
    let mut cursor = PAGE_HEIGHT - TOP_MARGIN - title_block_height(title_lines);
    push_row(
        &mut page,
        RowKind::Header,
        HEADER_STYLE,
        header.clone(),
        header_height,
        &mut cursor,
    );

    for row in rows {
        let (cells, height) = measure_row(row, BODY_STYLE);
        let fits = cursor - height >= BOTTOM_MARGIN;
        let fits_continuation = height <= continuation_capacity;
        if !fits && (page.body_rows() > 0 || (page.has_title && fits_continuation)) {
            pages.push(std::mem::replace(
                &mut page,
                PageLayout {
                    has_title: false,
                    rows: Vec::new(),
                },
            ));
            cursor = PAGE_HEIGHT - TOP_MARGIN;
            push_row(
                &mut page,
                RowKind::Header,
                HEADER_STYLE,
                header.clone(),
                header_height,
                &mut cursor,
            );
        }
        push_row(&mut page, RowKind::Body, BODY_STYLE, cells, height, &mut cursor);
    }

    pages.push(page);
    pages
}

fn push_row(
    page: &mut PageLayout,
    kind: RowKind,
    style: RowStyle,
    cells: Vec<CellLayout>,
    height: f32,
    cursor: &mut f32,
) {
    page.rows.push(RowLayout {
        kind,
        style,
        top: *cursor,
        height,
        cells,
    });
    *cursor -= height;
}
