use super::fonts::{encode_win_ansi, Font};
use super::layout::{
    table_left, table_width, PageLayout, Rgb, RowLayout, BLACK, GRID_WIDTH, PAGE_HEIGHT,
    PAGE_WIDTH, TITLE_LEADING, TITLE_SIZE, TOP_MARGIN,
};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

/// Document-level metadata written to the Info dictionary.
pub(crate) struct DocumentInfo<'a> {
    pub(crate) title: &'a str,
    pub(crate) creation_date: String,
}

pub(crate) const PRODUCER: &str = concat!("side-quest ", env!("CARGO_PKG_VERSION"));

/// Serializes laid-out pages. Output depends only on the inputs: there are
/// no random identifiers and the object order is fixed.
pub(crate) fn write_document(
    pages: &[PageLayout],
    title_lines: &[String],
    info: &DocumentInfo<'_>,
) -> Result<Vec<u8>, lopdf::Error> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary(Font::Regular));
    let bold_id = doc.add_object(font_dictionary(Font::Bold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            Font::Regular.resource_name() => regular_id,
            Font::Bold.resource_name() => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let mut operations = Vec::new();
        if page.has_title {
            title_operations(title_lines, &mut operations);
        }
        for row in &page.rows {
            row_operations(row, &mut operations);
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        Object::Integer(0),
        Object::Integer(0),
        real(PAGE_WIDTH),
        real(PAGE_HEIGHT),
    ];
    let pages_dictionary = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects
        .insert(pages_id, Object::Dictionary(pages_dictionary));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(info.title)),
        "Producer" => Object::string_literal(PRODUCER),
        "CreationDate" => Object::string_literal(info.creation_date.as_str()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn font_dictionary(font: Font) -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => font.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

fn title_operations(lines: &[String], operations: &mut Vec<Operation>) {
    let mut baseline = PAGE_HEIGHT - TOP_MARGIN - TITLE_SIZE;
    for line in lines {
        let width = Font::Bold.text_width(line, TITLE_SIZE);
        let x = table_left() + (table_width() - width) / 2.0;
        text_operations(line, Font::Bold, TITLE_SIZE, BLACK, x, baseline, operations);
        baseline -= TITLE_LEADING;
    }
}

fn row_operations(row: &RowLayout, operations: &mut Vec<Operation>) {
    let bottom = row.bottom();

    set_fill(row.style.background, operations);
    for cell in &row.cells {
        rectangle(cell.x, bottom, cell.width, row.height, operations);
    }
    operations.push(Operation::new("f", vec![]));

    operations.push(Operation::new("w", vec![real(GRID_WIDTH)]));
    operations.push(Operation::new(
        "RG",
        vec![real(BLACK.0), real(BLACK.1), real(BLACK.2)],
    ));
    for cell in &row.cells {
        rectangle(cell.x, bottom, cell.width, row.height, operations);
    }
    operations.push(Operation::new("S", vec![]));

    for cell in &row.cells {
        let baselines = cell.baselines(bottom, row.style.bottom_padding);
        for (line, baseline) in cell.lines.iter().zip(baselines) {
            if line.is_empty() {
                continue;
            }
            text_operations(
                line,
                cell.style.font,
                cell.style.size,
                cell.style.color,
                cell.text_x(line),
                baseline,
                operations,
            );
        }
    }
}

fn set_fill(color: Rgb, operations: &mut Vec<Operation>) {
    operations.push(Operation::new(
        "rg",
        vec![real(color.0), real(color.1), real(color.2)],
    ));
}

fn rectangle(x: f32, y: f32, width: f32, height: f32, operations: &mut Vec<Operation>) {
    operations.push(Operation::new(
        "re",
        vec![real(x), real(y), real(width), real(height)],
    ));
}

fn text_operations(
    text: &str,
    font: Font,
    size: f32,
    color: Rgb,
    x: f32,
    baseline: f32,
    operations: &mut Vec<Operation>,
) {
    operations.push(Operation::new("BT", vec![]));
    set_fill(color, operations);
    operations.push(Operation::new(
        "Tf",
        vec![font.resource_name().into(), real(size)],
    ));
    operations.push(Operation::new("Td", vec![real(x), real(baseline)]));
    operations.push(Operation::new(
        "Tj",
        vec![Object::string_literal(encode_win_ansi(text))],
    ));
    operations.push(Operation::new("ET", vec![]));
}
