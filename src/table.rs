//! HTML/CSV table emitter
//!
//! A [`Table`] collects rows and writes three files from them: `<prefix>.csv`,
//! `<prefix>.html` (a table fragment) and `<prefix>.js` (a script that inserts
//! the same fragment where its `<script>` tag sits).
//!
//! Column headers may be grouped. Each column is a list of labels, leaf
//! first; adjacent columns whose labels agree from some header row upwards
//! share a single spanning cell in that row.

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Script that the HTML fragment loads after the table
pub const FRAGMENT_SCRIPT: &str = "/style/article/fragment.js";

/// Build a row of heterogeneous values for [`Table::add`]
///
/// ```rust
/// use article_charts::row;
///
/// let cells = row![1, "a", 2.5];
/// assert_eq!(cells, vec!["1", "a", "2.5"]);
/// ```
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        vec![$($value.to_string()),*]
    };
}

/// Header labels for one column, leaf first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column(pub Vec<String>);

impl From<&str> for Column {
    fn from(label: &str) -> Self {
        Column(vec![label.to_string()])
    }
}

impl From<String> for Column {
    fn from(label: String) -> Self {
        Column(vec![label])
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Column {
    fn from(labels: [S; N]) -> Self {
        Column(labels.into_iter().map(Into::into).collect())
    }
}

impl From<Vec<String>> for Column {
    fn from(labels: Vec<String>) -> Self {
        Column(labels)
    }
}

/// Paths written by [`Table::finish`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFiles {
    pub csv: PathBuf,
    pub html: PathBuf,
    pub js: PathBuf,
}

/// A table written to disk once, when finished or dropped
#[derive(Debug)]
pub struct Table {
    prefix: PathBuf,
    css_class: String,
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
    finished: bool,
}

impl Table {
    pub fn new<I, C>(prefix: impl AsRef<Path>, columns: I, css_class: &str) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        Self {
            prefix: prefix.as_ref().to_path_buf(),
            css_class: css_class.to_string(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: vec![],
            finished: false,
        }
    }

    /// Append one row
    pub fn add<I, T>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Display,
    {
        self.rows
            .push(values.into_iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// The table as an HTML fragment
    pub fn to_html(&self) -> String {
        let mut html = format!(
            "<table class=\"{}\">\n\t<thead>\n",
            escape_html(&self.css_class)
        );

        let header_rows = self.columns.iter().map(|c| c.0.len()).max().unwrap_or(0);
        for level in (0..header_rows).rev() {
            html.push_str("\t\t<tr>\n");
            for cell in header_cells(&self.columns, level) {
                let tag = if cell.label.is_empty() { "td" } else { "th" };
                html.push_str(&format!(
                    "\t\t\t<{tag} colspan=\"{}\">{}</{tag}>\n",
                    cell.colspan,
                    escape_html(cell.label),
                    tag = tag
                ));
            }
            html.push_str("\t\t</tr>\n");
        }

        html.push_str("\t</thead>\n\t<tbody>\n");
        for row in &self.rows {
            html.push_str("\t\t<tr>\n");
            for value in row {
                html.push_str(&format!("\t\t\t<td>{}</td>\n", escape_html(value)));
            }
            html.push_str("\t\t</tr>\n");
        }
        html.push_str("\t</tbody>\n</table>");
        html
    }

    /// The table as CSV, one header line of space-joined labels
    pub fn to_csv(&self) -> String {
        let header = self
            .columns
            .iter()
            .map(|c| csv_field(&c.0.join(" ")))
            .collect::<Vec<_>>()
            .join(",");
        let mut csv = header;
        csv.push('\n');
        for row in &self.rows {
            csv.push_str(&row.iter().map(|v| csv_field(v)).collect::<Vec<_>>().join(","));
            csv.push('\n');
        }
        csv
    }

    /// A script that inserts the HTML fragment before its own `<script>` tag
    pub fn to_js(&self) -> String {
        let literal = self
            .to_html()
            .replace('\\', "\\\\")
            .replace('`', "\\`")
            .replace('$', "\\$");
        format!(
            "(html=>{{let scripts=document.querySelectorAll('script'),currentScript=scripts[scripts.length - 1],div=document.createElement('div');div.innerHTML = html;currentScript.parentNode.insertBefore(div, currentScript);}})(`{}`);",
            literal
        )
    }

    /// Write the `.csv`, `.html` and `.js` files
    pub fn finish(mut self) -> Result<TableFiles> {
        self.finished = true;
        self.write()
    }

    fn write(&self) -> Result<TableFiles> {
        let files = TableFiles {
            csv: with_suffix(&self.prefix, ".csv"),
            html: with_suffix(&self.prefix, ".html"),
            js: with_suffix(&self.prefix, ".js"),
        };
        if let Some(parent) = self.prefix.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
        }

        let html = self.to_html();
        write_file(&files.csv, self.to_csv())?;
        write_file(
            &files.html,
            format!("{}\n<script src=\"{}\"></script>", html, FRAGMENT_SCRIPT),
        )?;
        write_file(&files.js, self.to_js())?;
        tracing::info!(prefix = %self.prefix.display(), rows = self.rows.len(), "table written");
        Ok(files)
    }
}

impl Drop for Table {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        if let Err(e) = self.write() {
            tracing::error!(error = %e, "failed to write table on drop");
        }
    }
}

/// One merged header cell
#[derive(Debug, Clone, PartialEq, Eq)]
struct HeaderCell<'a> {
    label: &'a str,
    colspan: usize,
}

/// Cells for header row `level` (0 is the leaf row)
///
/// Neighbouring columns merge when their labels from `level` upwards match.
fn header_cells(columns: &[Column], level: usize) -> Vec<HeaderCell<'_>> {
    let mut cells: Vec<HeaderCell<'_>> = vec![];
    let mut index = 0;
    while index < columns.len() {
        let key = scoped(&columns[index], level);
        let label = columns[index].0.get(level).map(String::as_str).unwrap_or("");
        let mut colspan = 1;
        index += 1;
        while index < columns.len() && scoped(&columns[index], level) == key {
            index += 1;
            colspan += 1;
        }
        cells.push(HeaderCell { label, colspan });
    }
    cells
}

/// Labels of a column from header row `level` upwards
fn scoped(column: &Column, level: usize) -> &[String] {
    column.0.get(level..).unwrap_or(&[])
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn write_file(path: &Path, content: String) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::io(path, e))?;
    println!("{}", path.display());
    Ok(())
}

/// Escape `&`, `<` and `>`
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Quote a CSV field if it contains a comma or quote
pub fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn unwritten(columns: Vec<Column>) -> Table {
        let mut table = Table::new("unused", columns, "");
        table.finished = true;
        table
    }

    #[test]
    fn test_csv_field() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("foo,bar"), "\"foo,bar\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b & c>d"), "a&lt;b &amp; c&gt;d");
        assert_eq!(escape_html("\"q\""), "\"q\"");
    }

    #[test]
    fn test_row_macro() {
        let cells: Vec<String> = row![1, "two", 3.5];
        assert_eq!(cells, vec!["1", "two", "3.5"]);
    }

    #[test]
    fn test_grouped_header_cells() {
        let columns: Vec<Column> = vec!["A".into(), ["B", "G1"].into(), ["C", "G1"].into()];
        let top = header_cells(&columns, 1);
        assert_eq!(
            top,
            vec![
                HeaderCell { label: "", colspan: 1 },
                HeaderCell { label: "G1", colspan: 2 },
            ]
        );
        let leaves = header_cells(&columns, 0);
        assert_eq!(leaves.len(), 3);
        assert!(leaves.iter().all(|c| c.colspan == 1));
    }

    #[test]
    fn test_identical_columns_merge() {
        let columns: Vec<Column> = vec!["x".into(), "x".into(), "y".into()];
        let cells = header_cells(&columns, 0);
        assert_eq!(cells[0], HeaderCell { label: "x", colspan: 2 });
        assert_eq!(cells[1], HeaderCell { label: "y", colspan: 1 });
    }

    #[test]
    fn test_html_output() {
        let mut table = unwritten(vec!["A".into(), ["B", "G1"].into(), ["C", "G1"].into()]);
        table.add(row![1, "<b>", "x&y"]);
        let expected = "<table class=\"\">\n\
            \t<thead>\n\
            \t\t<tr>\n\
            \t\t\t<td colspan=\"1\"></td>\n\
            \t\t\t<th colspan=\"2\">G1</th>\n\
            \t\t</tr>\n\
            \t\t<tr>\n\
            \t\t\t<th colspan=\"1\">A</th>\n\
            \t\t\t<th colspan=\"1\">B</th>\n\
            \t\t\t<th colspan=\"1\">C</th>\n\
            \t\t</tr>\n\
            \t</thead>\n\
            \t<tbody>\n\
            \t\t<tr>\n\
            \t\t\t<td>1</td>\n\
            \t\t\t<td>&lt;b&gt;</td>\n\
            \t\t\t<td>x&amp;y</td>\n\
            \t\t</tr>\n\
            \t</tbody>\n\
            </table>";
        assert_eq!(table.to_html(), expected);
    }

    #[test]
    fn test_csv_output() {
        let mut table = unwritten(vec!["name".into(), ["B", "G1"].into()]);
        table.add(["foo,bar", "1"]);
        table.add(["q\"uote", "2"]);
        assert_eq!(
            table.to_csv(),
            "name,B G1\n\"foo,bar\",1\n\"q\"\"uote\",2\n"
        );
    }

    #[test]
    fn test_js_escapes_template_literal() {
        let mut table = unwritten(vec!["price".into()]);
        table.add(["`$5`"]);
        let js = table.to_js();
        assert!(js.starts_with("(html=>{let scripts="));
        assert!(js.contains("<td>\\`\\$5\\`</td>"));
        assert!(js.ends_with("`);"));
    }
}
