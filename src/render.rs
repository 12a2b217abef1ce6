//! Index page rendering.
//!
//! Stage 2 of the index build. Walks the scanned [`Directory`] tree in
//! pre-order and writes one `index.html` into every directory.
//!
//! ## Page layout
//!
//! ```text
//! <!DOCTYPE html PUBLIC ...>
//! <html xmlns="http://www.w3.org/1999/xhtml">
//!   <head> viewport meta, content-type meta, inline <style> </head>
//!   <body>
//!     <h1>Index of /docs</h1>
//!     <table id="list">
//!       <thead> File Name | File Size | Date </thead>
//!       <tbody>
//!         ../           -         -                     (not on the root page)
//!         archive/      -         2024-01-02 10:00:00   (one per subdirectory)
//!         report.pdf    2.00 KiB  2024-01-01 09:30:00   (one per file)
//!       </tbody>
//!     </table>
//!   </body>
//! </html>
//! ```
//!
//! Every page's markup tree is built, written and dropped before the next
//! directory is visited, so memory use stays at one page regardless of the
//! size of the tree.

use crate::format::{format_size, format_timestamp};
use crate::html::tags::*;
use crate::html::{Attribute, Content, Document, Node, attrs};
use crate::scan::{Directory, child_web_path, parent_web_path};
use std::borrow::Cow;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use thiserror::Error;

/// File name written into every directory.
pub const INDEX_FILENAME: &str = "index.html";

/// Stylesheet used when no custom style is configured.
pub const DEFAULT_STYLE: &str = include_str!("../static/style.css");

const XHTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Placeholder for columns that do not apply to a row.
const NO_VALUE: &str = "-";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Settings shared by every page of one run.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Prefix for every link. A trailing `/` is ignored.
    pub base_url: String,
    /// Stylesheet inlined instead of [`DEFAULT_STYLE`].
    pub custom_style: Option<String>,
}

impl RenderOptions {
    fn style(&self) -> &str {
        self.custom_style.as_deref().unwrap_or(DEFAULT_STYLE)
    }

    /// Join the base URL and a `/`-rooted web path.
    pub fn link(&self, web_path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), web_path)
    }
}

/// Write `index.html` for `dir` and every directory below it, parents first.
///
/// Returns the paths written, in the order they were written.
pub fn render_tree(dir: &Directory, options: &RenderOptions) -> Result<Vec<PathBuf>, RenderError> {
    let mut written = Vec::with_capacity(dir.dir_count());
    render_tree_into(dir, options, &mut written)?;
    Ok(written)
}

fn render_tree_into(
    dir: &Directory,
    options: &RenderOptions,
    written: &mut Vec<PathBuf>,
) -> Result<(), RenderError> {
    written.push(render_single_index(dir, options)?);
    for subdir in &dir.subdirs {
        render_tree_into(subdir, options, written)?;
    }
    Ok(())
}

/// Write `<fs_path>/index.html` for one directory.
///
/// The file is created (or truncated) before rendering starts. A write error
/// may leave a partial file behind.
pub fn render_single_index(dir: &Directory, options: &RenderOptions) -> Result<PathBuf, RenderError> {
    let path = dir.fs_path.join(INDEX_FILENAME);
    let io_err = |source: io::Error| RenderError::Io {
        path: path.clone(),
        source,
    };

    let file = fs::File::create(&path).map_err(io_err)?;
    let mut out = BufWriter::new(file);

    let document = build_page(dir, options);
    document.render(&mut out).map_err(io_err)?;
    out.flush().map_err(io_err)?;

    tracing::info!(path = %path.display(), web_path = %dir.web_path, "Wrote index");
    Ok(path)
}

/// Build the full page for one directory.
pub fn build_page<'a>(dir: &'a Directory, options: &'a RenderOptions) -> Document<'a> {
    let head_node = head(
        attrs(&[]),
        Content::Children(vec![
            meta(
                attrs(&[
                    ("name", "viewport"),
                    ("content", "width=device-width, initial-scale=1"),
                ]),
                Content::empty(),
            ),
            meta(
                attrs(&[
                    ("http-equiv", "Content-Type"),
                    ("content", "text/html; charset=utf-8"),
                ]),
                Content::empty(),
            ),
            style(attrs(&[("type", "text/css")]), Content::text(options.style())),
        ]),
    );

    let body_node = body(
        attrs(&[]),
        Content::Children(vec![
            h1(attrs(&[]), Content::text(format!("Index of {}", dir.web_path))),
            listing_table(dir, options),
        ]),
    );

    Document::new(html(
        attrs(&[("xmlns", XHTML_NAMESPACE)]),
        Content::Children(vec![head_node, body_node]),
    ))
}

fn listing_table<'a>(dir: &'a Directory, options: &RenderOptions) -> Node<'a> {
    let header = thead(
        attrs(&[]),
        Content::Children(vec![tr(
            attrs(&[]),
            Content::Children(vec![
                th(attrs(&[]), Content::text("File Name")),
                th(attrs(&[]), Content::text("File Size")),
                th(attrs(&[]), Content::text("Date")),
            ]),
        )]),
    );

    table(
        attrs(&[("id", "list")]),
        Content::Children(vec![
            header,
            tbody(attrs(&[]), Content::Children(listing_rows(dir, options))),
        ]),
    )
}

/// Rows in listing order: parent link, subdirectories, then files.
pub fn listing_rows<'a>(dir: &'a Directory, options: &RenderOptions) -> Vec<Node<'a>> {
    let mut rows = Vec::with_capacity(dir.subdirs.len() + dir.files.len() + 1);

    if !dir.is_root() {
        rows.push(row(
            options.link(parent_web_path(&dir.web_path)),
            "../",
            NO_VALUE.into(),
            NO_VALUE.into(),
        ));
    }

    for subdir in &dir.subdirs {
        rows.push(row(
            options.link(&subdir.web_path),
            format!("{}/", subdir.name),
            NO_VALUE.into(),
            format_timestamp(subdir.mod_time),
        ));
    }

    for file in &dir.files {
        rows.push(row(
            options.link(&child_web_path(&dir.web_path, &file.name)),
            file.name.as_str(),
            format_size(file.size),
            format_timestamp(file.mod_time),
        ));
    }

    rows
}

fn row<'a>(
    href: String,
    label: impl Into<Cow<'a, str>>,
    size: String,
    date: String,
) -> Node<'a> {
    tr(
        attrs(&[]),
        Content::Children(vec![
            td(
                attrs(&[("class", "name")]),
                Content::Children(vec![a(
                    vec![Attribute::new("href", href)],
                    Content::text(label),
                )]),
            ),
            td(attrs(&[("class", "size")]), Content::text(size)),
            td(attrs(&[("class", "date")]), Content::text(date)),
        ]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{File, ScanOptions, scan};
    use crate::test_helpers::*;

    fn leaf(name: &str, web_path: &str) -> Directory {
        Directory {
            name: name.to_string(),
            web_path: web_path.to_string(),
            fs_path: PathBuf::from("/tmp/unused"),
            mod_time: 0,
            files: vec![],
            subdirs: vec![],
        }
    }

    fn sample_dir() -> Directory {
        Directory {
            name: "docs".to_string(),
            web_path: "/docs".to_string(),
            fs_path: PathBuf::from("/tmp/unused/docs"),
            mod_time: 1_700_000_000,
            files: vec![File {
                name: "report.pdf".to_string(),
                size: 2048,
                mod_time: 1_233_633_906,
            }],
            subdirs: vec![Directory {
                mod_time: 951_782_400,
                ..leaf("archive", "/docs/archive")
            }],
        }
    }

    fn render_rows(dir: &Directory, options: &RenderOptions) -> Vec<String> {
        listing_rows(dir, options)
            .iter()
            .map(|r| r.to_string())
            .collect()
    }

    #[test]
    fn root_page_has_no_parent_row() {
        let mut root = leaf("srv", "/");
        root.subdirs.push(leaf("docs", "/docs"));
        let rows = render_rows(&root, &RenderOptions::default());

        assert_eq!(rows.len(), 1);
        assert!(!rows[0].contains("../"));
    }

    #[test]
    fn rows_in_parent_subdir_file_order() {
        let rows = render_rows(&sample_dir(), &RenderOptions::default());

        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains(r#"<a href="/">../</a>"#));
        assert!(rows[1].contains(r#"<a href="/docs/archive">archive/</a>"#));
        assert!(rows[2].contains(r#"<a href="/docs/report.pdf">report.pdf</a>"#));
    }

    #[test]
    fn parent_row_uses_placeholders() {
        let rows = render_rows(&sample_dir(), &RenderOptions::default());
        assert!(rows[0].contains(r#"<td class="size">-</td><td class="date">-</td>"#));
    }

    #[test]
    fn subdir_row_has_date_but_no_size() {
        let rows = render_rows(&sample_dir(), &RenderOptions::default());
        assert!(rows[1].contains(r#"<td class="size">-</td>"#));
        assert!(rows[1].contains(r#"<td class="date">2000-02-29 00:00:00</td>"#));
    }

    #[test]
    fn file_row_has_size_and_date() {
        let rows = render_rows(&sample_dir(), &RenderOptions::default());
        assert!(rows[2].contains(r#"<td class="size">2.00 KiB</td>"#));
        assert!(rows[2].contains(r#"<td class="date">2009-02-03 04:05:06</td>"#));
    }

    #[test]
    fn nested_parent_link_points_one_level_up() {
        let dir = leaf("archive", "/docs/archive");
        let rows = render_rows(&dir, &RenderOptions::default());
        assert!(rows[0].contains(r#"href="/docs""#));
    }

    #[test]
    fn root_file_link_has_single_slash() {
        let mut root = leaf("srv", "/");
        root.files.push(File {
            name: "notes.txt".into(),
            size: 1,
            mod_time: 0,
        });
        let rows = render_rows(&root, &RenderOptions::default());
        assert!(rows[0].contains(r#"href="/notes.txt""#));
    }

    #[test]
    fn base_url_prefixes_links() {
        let options = RenderOptions {
            base_url: "https://files.example.com".into(),
            custom_style: None,
        };
        let rows = render_rows(&sample_dir(), &options);
        assert!(rows[0].contains(r#"href="https://files.example.com/""#));
        assert!(rows[2].contains(r#"href="https://files.example.com/docs/report.pdf""#));
    }

    #[test]
    fn base_url_trailing_slash_not_doubled() {
        let options = RenderOptions {
            base_url: "https://files.example.com/".into(),
            custom_style: None,
        };
        assert_eq!(options.link("/docs"), "https://files.example.com/docs");
    }

    #[test]
    fn page_structure() {
        let dir = sample_dir();
        let options = RenderOptions::default();
        let page = build_page(&dir, &options).to_string();

        assert!(page.starts_with("<!DOCTYPE html PUBLIC"));
        assert!(page.contains(r#"<html xmlns="http://www.w3.org/1999/xhtml"><head>"#));
        assert!(page.contains(
            r#"<meta name="viewport" content="width=device-width, initial-scale=1"></meta>"#
        ));
        assert!(page.contains(
            r#"<meta http-equiv="Content-Type" content="text/html; charset=utf-8"></meta>"#
        ));
        assert!(page.contains("<h1>Index of /docs</h1>"));
        assert!(page.contains(
            r#"<table id="list"><thead><tr><th>File Name</th><th>File Size</th><th>Date</th></tr></thead><tbody>"#
        ));
        assert!(page.ends_with("</tbody></table></body></html>"));
    }

    #[test]
    fn default_style_inlined() {
        let dir = sample_dir();
        let options = RenderOptions::default();
        let page = build_page(&dir, &options).to_string();
        assert!(page.contains(&format!(r#"<style type="text/css">{DEFAULT_STYLE}</style>"#)));
    }

    #[test]
    fn custom_style_replaces_default() {
        let dir = sample_dir();
        let options = RenderOptions {
            base_url: String::new(),
            custom_style: Some("body { margin: 0; }".into()),
        };
        let page = build_page(&dir, &options).to_string();
        assert!(page.contains(r#"<style type="text/css">body { margin: 0; }</style>"#));
        assert!(!page.contains(DEFAULT_STYLE));
    }

    #[test]
    fn render_tree_writes_pre_order() {
        let tmp = setup_fixtures();
        let tree = scan(tmp.path(), &ScanOptions::default()).unwrap();
        let written = render_tree(&tree, &RenderOptions::default()).unwrap();

        let expected: Vec<PathBuf> = [
            "",
            "docs",
            "docs/archive",
            "media",
            "media/empty",
        ]
        .iter()
        .map(|p| tmp.path().join(p).join(INDEX_FILENAME))
        .collect();
        assert_eq!(written, expected);
        for path in &written {
            assert!(path.is_file());
        }
    }

    #[test]
    fn render_single_index_truncates_existing_file() {
        let tmp = setup_fixtures();
        let index = tmp.path().join(INDEX_FILENAME);
        fs::write(&index, "x".repeat(100_000)).unwrap();

        let tree = scan(tmp.path(), &ScanOptions::default()).unwrap();
        render_single_index(&tree, &RenderOptions::default()).unwrap();

        let written = fs::read_to_string(&index).unwrap();
        assert!(written.starts_with("<!DOCTYPE html"));
        assert!(written.ends_with("</html>"));
    }

    #[test]
    fn render_single_index_missing_dir_is_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = Directory {
            fs_path: tmp.path().join("gone"),
            ..leaf("gone", "/gone")
        };
        let result = render_single_index(&dir, &RenderOptions::default());
        assert!(matches!(result, Err(RenderError::Io { .. })));
    }
}
