use std::fmt::Write as _;

use products_hr::{Employee, EmployeeField, FormBuffer, FormMode};

pub fn roster_table(records: &[Employee]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            EmployeeField::ALL
                .into_iter()
                .map(|field| record.cell(field))
                .collect()
        })
        .collect();
    let widths: Vec<usize> = EmployeeField::ALL
        .into_iter()
        .enumerate()
        .map(|(idx, field)| {
            rows.iter()
                .map(|row| row[idx].chars().count())
                .chain([field.column_header().len()])
                .max()
                .unwrap_or_default()
        })
        .collect();

    let mut out = String::new();
    let headers: Vec<String> = EmployeeField::ALL
        .into_iter()
        .map(|field| field.column_header().to_string())
        .collect();
    write_row(&mut out, &headers, &widths);
    for row in &rows {
        write_row(&mut out, row, &widths);
    }
    if rows.is_empty() {
        out.push_str("(no employees)\n");
    }
    out
}

fn write_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

pub fn form(mode: FormMode, buffer: &FormBuffer) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", mode.title());
    for field in EmployeeField::ALL {
        let _ = writeln!(out, "  {:<10} {}", field.name(), buffer.get(field));
    }
    out
}

pub fn record(record: &Employee) -> String {
    let mut out = String::new();
    for field in EmployeeField::ALL {
        let _ = writeln!(out, "{:<10} {}", field.name(), record.cell(field));
    }
    out
}
