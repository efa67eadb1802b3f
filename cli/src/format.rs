use albumtracker_core::domain::Album;

/// Decimal grouping with commas: `1234567` → `"1,234,567"`.
pub fn with_commas(n: usize) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);

  for (i, ch) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out
}

/// Renders albums as aligned text columns, one row per album, prefixed with its position.
pub fn album_table(albums: &[Album]) -> String {
  let header = ["#", "ARTIST", "TITLE", "CONDITION", "ID"];

  let rows: Vec<[String; 5]> = albums
    .iter()
    .enumerate()
    .map(|(i, a)| {
      [
        i.to_string(),
        a.artist_name.clone(),
        a.album_title.clone(),
        a.condition.to_string(),
        a.id.to_string(),
      ]
    })
    .collect();

  let mut widths = header.map(|h| h.chars().count());
  for row in &rows {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  let mut out = String::new();
  let mut push_row = |cells: [&str; 5]| {
    let line: Vec<String> =
      cells.iter().zip(widths).map(|(cell, w)| format!("{cell:<w$}")).collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
  };

  push_row(header);
  for row in &rows {
    push_row([row[0].as_str(), &row[1], &row[2], &row[3], &row[4]]);
  }
  out
}
