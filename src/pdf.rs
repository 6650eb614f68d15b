use anyhow::Context;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::chart::TopicChart;
use crate::models::StudentReport;

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 56.0;
const BODY_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 16.0;
const WRAP_COLUMNS: usize = 85;

#[derive(Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

struct Line {
    font: Font,
    size: f32,
    text: String,
}

impl Line {
    fn body(text: impl Into<String>) -> Self {
        Self {
            font: Font::Regular,
            size: BODY_SIZE,
            text: text.into(),
        }
    }

    fn heading(text: impl Into<String>) -> Self {
        Self {
            font: Font::Bold,
            size: BODY_SIZE,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::body("")
    }
}

/// Renders the report as PDF bytes: text pages first, then the chart page.
pub fn render_report(report: &StudentReport, chart: &TopicChart) -> anyhow::Result<Vec<u8>> {
    let analysis = &report.analysis;
    let mut lines = vec![
        Line {
            font: Font::Bold,
            size: 16.0,
            text: format!("Quiz Performance Report for {}", analysis.student),
        },
        Line::blank(),
    ];
    lines.extend(wrap(&analysis.summary_text, WRAP_COLUMNS).into_iter().map(Line::body));
    lines.push(Line::blank());

    lines.push(Line::heading("Strengths:"));
    for stat in &analysis.classification.strengths {
        lines.push(Line::body(format!("- {}", stat.topic)));
    }
    lines.push(Line::blank());

    lines.push(Line::heading("Weaknesses:"));
    for stat in &analysis.classification.weaknesses {
        lines.push(Line::body(format!("- {}", stat.topic)));
    }
    lines.push(Line::blank());

    lines.push(Line::heading("AI Feedback:"));
    lines.extend(wrap(&report.narrative, WRAP_COLUMNS).into_iter().map(Line::body));

    let lines_per_page = ((PAGE_HEIGHT - 2.0 * MARGIN) / LINE_HEIGHT) as usize;
    let mut pages: Vec<Vec<Operation>> = lines
        .chunks(lines_per_page)
        .map(text_page)
        .collect();
    pages.push(chart_page(chart));

    build_document(pages)
}

fn text_page(lines: &[Line]) -> Vec<Operation> {
    let mut ops = Vec::new();
    let mut y = PAGE_HEIGHT - MARGIN;
    for line in lines {
        if !line.text.is_empty() {
            ops.extend(text_at(line.font, line.size, MARGIN, y, &line.text));
        }
        y -= LINE_HEIGHT;
    }
    ops
}

fn chart_page(chart: &TopicChart) -> Vec<Operation> {
    let left = MARGIN + 24.0;
    let right = PAGE_WIDTH - MARGIN;
    let bottom = 260.0;
    let plot_height = 400.0;

    let mut ops = text_at(Font::Bold, 16.0, MARGIN, PAGE_HEIGHT - MARGIN, &chart.title);

    // axes
    ops.push(Operation::new("G", vec![real(0.0)]));
    ops.push(Operation::new("w", vec![real(1.0)]));
    ops.push(Operation::new("m", vec![real(left), real(bottom + plot_height)]));
    ops.push(Operation::new("l", vec![real(left), real(bottom)]));
    ops.push(Operation::new("l", vec![real(right), real(bottom)]));
    ops.push(Operation::new("S", vec![]));

    for tick in [0.0_f32, 50.0, 70.0, 100.0] {
        let y = bottom + plot_height * tick / 100.0;
        ops.extend(text_at(Font::Regular, 8.0, MARGIN, y - 3.0, &format!("{tick:.0}")));
    }

    if chart.bars.is_empty() {
        return ops;
    }

    let slot = (right - left) / chart.bars.len() as f32;
    let bar_width = (slot * 0.7).min(60.0);
    let label_columns = ((slot / 4.5) as usize).max(3);

    for (index, bar) in chart.bars.iter().enumerate() {
        let x = left + slot * index as f32 + (slot - bar_width) / 2.0;
        let height = plot_height * (bar.accuracy.clamp(0.0, 100.0) as f32) / 100.0;
        let (r, g, b) = bar.color.rgb();

        ops.push(Operation::new("rg", vec![real(r), real(g), real(b)]));
        ops.push(Operation::new(
            "re",
            vec![real(x), real(bottom), real(bar_width), real(height)],
        ));
        ops.push(Operation::new("f", vec![]));
        ops.push(Operation::new("rg", vec![real(0.0), real(0.0), real(0.0)]));

        ops.extend(text_at(
            Font::Regular,
            8.0,
            x,
            bottom + height + 4.0,
            &format!("{:.1}%", bar.accuracy),
        ));
        let label: String = bar.topic.chars().take(label_columns).collect();
        ops.extend(text_at(Font::Regular, 8.0, x, bottom - 12.0, &label));
    }

    ops
}

fn text_at(font: Font, size: f32, x: f32, y: f32, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![font.resource().into(), real(size)]),
        Operation::new("Td", vec![real(x), real(y)]),
        Operation::new("Tj", vec![Object::string_literal(win_ansi(text))]),
        Operation::new("ET", vec![]),
    ]
}

fn build_document(pages: Vec<Vec<Operation>>) -> anyhow::Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dictionary("Helvetica"));
    let bold_id = doc.add_object(font_dictionary("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content.encode().context("failed to encode page content")?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![real(0.0), real(0.0), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).context("failed to serialize PDF")?;
    Ok(buffer)
}

fn font_dictionary(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

/// Standard fonts only cover Latin-1; anything else becomes '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7e | 0xa0..=0xff => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

/// Greedy word wrap on character count, keeping explicit line breaks.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();
            while word.chars().count() > columns {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let head: String = word.chars().take(columns).collect();
                word = word.chars().skip(columns).collect();
                lines.push(head);
            }
            let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
            if needed > columns && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }
    lines
}
