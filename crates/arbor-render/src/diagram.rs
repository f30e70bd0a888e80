//! Shared line assembly for the diagram renderers.

use compact_str::CompactString;

/// Filtered skeleton of one rendered entry.
pub(crate) struct Rendered {
    pub name: CompactString,
    pub is_symlink: bool,
    pub is_dir: bool,
    pub children: Vec<Rendered>,
}

/// Append one level of entries to the output.
///
/// Each line starts with the running `prefix`, then `└` for the last
/// rendered sibling or `├` otherwise, then the connector and the name.
/// The child prefix appends four spaces under a last sibling and a
/// bar continuation otherwise.
pub(crate) fn write_entries(out: &mut String, entries: &[Rendered], prefix: &str) {
    let count = entries.len();
    for (index, entry) in entries.iter().enumerate() {
        let last = index + 1 == count;
        out.push_str(prefix);
        out.push(if last { '└' } else { '├' });
        out.push_str(connector(entry));
        out.push_str(&entry.name);
        if !entry.children.is_empty() {
            let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
            write_entries(out, &entry.children, &child_prefix);
        }
    }
}

fn connector(entry: &Rendered) -> &'static str {
    if entry.is_symlink {
        ">>"
    } else if entry.is_dir {
        "─> "
    } else {
        "── "
    }
}
