//! 解析結果のターミナル表示
//!
//! 表示内容は `ResultView` が決める。ここでは並べ方だけ。

use std::fmt::Write;

use plant_doctor_common::{ImageFile, Preview, RemedyList, ResultView, StatusTone, TextList};

/// 選択画像の1行サマリ
pub fn format_preview(file: &ImageFile, preview: &Preview) -> String {
    let size_kb = file.bytes.len() as f64 / 1024.0;
    match preview.dimensions {
        Some((w, h)) => format!(
            "🖼  {} ({}, {}x{}, {:.1} KB)",
            file.name, preview.mime_type, w, h, size_kb
        ),
        None => format!("🖼  {} ({}, {:.1} KB)", file.name, preview.mime_type, size_kb),
    }
}

fn status_marker(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Ok => "✅",
        StatusTone::Warn => "⚠️ ",
    }
}

fn write_list(out: &mut String, title: &str, list: &TextList) {
    let _ = writeln!(out, "\n{}", title);
    if list.placeholder {
        for item in &list.items {
            let _ = writeln!(out, "  {}", item);
        }
    } else {
        for (i, item) in list.items.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, item);
        }
    }
}

fn write_remedies(out: &mut String, title: &str, list: &RemedyList) {
    let _ = writeln!(out, "\n{}", title);
    match list {
        RemedyList::Empty => {
            let _ = writeln!(out, "  {}", RemedyList::placeholder());
        }
        RemedyList::Blocks(blocks) => {
            for block in blocks {
                let _ = writeln!(out, "  {} {}", block.kind.icon(), block.heading);
                for detail in block.details.iter().filter(|d| !d.is_empty()) {
                    let _ = writeln!(out, "     {}", detail);
                }
            }
        }
    }
}

/// 結果パネル全体
pub fn format_report(view: &ResultView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "🌿 {}", view.plant_name);
    let _ = write!(out, "{} {}", status_marker(view.status.tone), view.status.label);
    if let Some(confidence) = &view.confidence {
        let _ = write!(out, "  ({})", confidence);
    }
    out.push('\n');

    let _ = writeln!(out, "\nProblem: {}", view.problem_name);
    let _ = writeln!(out, "Cause:   {}", view.cause);

    write_list(&mut out, "Symptoms", &view.symptoms);
    write_remedies(&mut out, "Natural remedies", &view.natural_remedies);
    write_remedies(&mut out, "Chemical treatments", &view.chemical_treatments);
    write_list(&mut out, "Prevention tips", &view.prevention_tips);

    if let Some(note) = &view.confidence_note {
        let _ = writeln!(out, "\nNote: {}", note);
    }
    if let Some(disclaimer) = &view.disclaimer {
        let _ = writeln!(out, "\n{}", disclaimer);
    }

    out
}
