#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffStatEntry {
    /// Path as printed by `git diff --stat`, including rename arrows.
    pub path: String,
    /// The right-hand side, e.g. `12 ++++--` or `Bin 0 -> 1234 bytes`.
    pub summary: String,
}

impl DiffStatEntry {
    pub fn is_binary(&self) -> bool {
        self.summary.starts_with("Bin")
    }

    /// Path to request per-file content for. Renames resolve to the new path.
    pub fn target_path(&self) -> String {
        rename_target(&self.path)
    }
}

pub fn parse_diff_stat(raw: &str) -> Vec<DiffStatEntry> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_total_line(line))
        .filter_map(|line| {
            let (path, summary) = line.split_once('|')?;
            let path = path.trim();
            if path.is_empty() {
                return None;
            }

            Some(DiffStatEntry {
                path: path.to_string(),
                summary: summary.trim().to_string(),
            })
        })
        .collect()
}

fn is_total_line(line: &str) -> bool {
    line.contains("file changed") || line.contains("files changed")
}

fn rename_target(path: &str) -> String {
    if let (Some(open), Some(close)) = (path.find('{'), path.rfind('}'))
        && open < close
        && let Some((_, new)) = path[open + 1..close].split_once(" => ")
    {
        let joined = format!("{}{}{}", &path[..open], new.trim(), &path[close + 1..]);
        return joined.replace("//", "/");
    }

    match path.split_once(" => ") {
        Some((_, new)) => new.trim().to_string(),
        None => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_entries_and_skips_total() {
        let raw = " src/main.rs | 12 ++++++------\n README.md   |  3 +++\n 2 files changed, 9 insertions(+), 6 deletions(-)\n";
        let entries = parse_diff_stat(raw);

        assert_eq!(
            entries,
            vec![
                DiffStatEntry {
                    path: "src/main.rs".to_string(),
                    summary: "12 ++++++------".to_string(),
                },
                DiffStatEntry {
                    path: "README.md".to_string(),
                    summary: "3 +++".to_string(),
                },
            ]
        );
    }

    #[test]
    fn single_file_total_is_skipped() {
        let entries = parse_diff_stat(" a.txt | 1 +\n 1 file changed, 1 insertion(+)\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "a.txt");
    }

    #[test]
    fn empty_output_has_no_entries() {
        assert!(parse_diff_stat("").is_empty());
        assert!(parse_diff_stat("\n  \n").is_empty());
    }

    #[test]
    fn binary_entry_is_one_entry() {
        let entries = parse_diff_stat(" assets/logo.png | Bin 0 -> 1234 bytes\n");
        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_binary());
        assert_eq!(entries[0].summary, "Bin 0 -> 1234 bytes");
        assert_eq!(entries[0].target_path(), "assets/logo.png");
    }

    #[test]
    fn plain_rename_targets_new_path() {
        let entries = parse_diff_stat(" old.rs => new.rs | 0\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, "old.rs => new.rs");
        assert_eq!(entries[0].target_path(), "new.rs");
    }

    #[test]
    fn braced_rename_targets_new_path() {
        let entry = DiffStatEntry {
            path: "src/{util => helpers}/mod.rs".to_string(),
            summary: "4 ++--".to_string(),
        };
        assert_eq!(entry.target_path(), "src/helpers/mod.rs");

        let moved_up = DiffStatEntry {
            path: "src/{nested => }/lib.rs".to_string(),
            summary: "0".to_string(),
        };
        assert_eq!(moved_up.target_path(), "src/lib.rs");
    }

    #[test]
    fn lines_without_separator_are_ignored() {
        assert!(parse_diff_stat("warning: something odd\n").is_empty());
    }
}
