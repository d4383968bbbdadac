//! Plain-text rendering of the board for the terminal.

use std::fmt::Write as _;

use products_tips::{BoardSnapshot, format_amount};

pub fn board_table(snapshot: &BoardSnapshot, headcount: &str) -> String {
    let mut out = String::new();
    match snapshot.pool {
        Some(pool) => {
            let _ = writeln!(out, "Pool: {}", format_amount(pool));
        }
        None => out.push_str("Pool: not funded\n"),
    }
    let _ = writeln!(out, "{headcount}");

    if snapshot.employees.is_empty() {
        out.push_str("No employees yet. Add someone to split the pool.\n");
        return out;
    }

    let rows: Vec<[String; 4]> = snapshot
        .employees
        .iter()
        .map(|emp| {
            [
                emp.id.to_string(),
                emp.name.clone(),
                format!("{} h", emp.hours),
                format_amount(emp.share),
            ]
        })
        .collect();
    let header = ["ID", "NAME", "HOURS", "SHARE"].map(String::from);

    let mut widths = header.clone().map(|cell| cell.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    for row in std::iter::once(&header).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}
