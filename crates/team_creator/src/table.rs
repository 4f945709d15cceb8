//! Tab-delimited game table files
//!
//! The game ships its database as one text file per table: a header line of
//! column names followed by tab-separated rows. Files come either as UTF-16LE
//! (usually with an FF FE BOM) or UTF-8. A `TableFile` is edited in memory and
//! written back in the encoding, BOM and line terminator it was read with.

use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Utf16Le,
}

/// Guess the encoding of a table file from its first bytes.
///
/// UTF-16LE when it starts with FF FE, or when more than 30% of the first
/// 100 bytes are NUL; UTF-8 otherwise.
pub fn detect_encoding(bytes: &[u8]) -> Encoding {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Encoding::Utf16Le;
    }
    let sample = &bytes[..bytes.len().min(100)];
    let nulls = sample.iter().filter(|&&b| b == 0).count();
    if !sample.is_empty() && nulls as f64 > sample.len() as f64 * 0.3 {
        Encoding::Utf16Le
    } else {
        Encoding::Utf8
    }
}

/// True for non-empty, all-ASCII-digit cells
pub fn is_numeric_id(cell: &str) -> bool {
    !cell.is_empty() && cell.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone)]
pub struct TableFile {
    path: PathBuf,
    encoding: Encoding,
    bom: bool,
    line_ending: &'static str,
    /// Decoded text without the BOM
    content: String,
    header: Vec<String>,
}

impl TableFile {
    pub fn open(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read table: {}", path.display()))?;
        Self::from_bytes(path, &bytes)
    }

    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Result<Self> {
        let encoding = detect_encoding(bytes);
        let mut content = match encoding {
            Encoding::Utf8 => String::from_utf8(bytes.to_vec())
                .with_context(|| format!("Invalid UTF-8 in {}", path.display()))?,
            Encoding::Utf16Le => decode_utf16le(bytes)
                .with_context(|| format!("Invalid UTF-16LE in {}", path.display()))?,
        };

        let bom = content.starts_with(BOM);
        if bom {
            content.remove(0);
        }
        let line_ending = if content.contains("\r\n") { "\r\n" } else { "\n" };

        let header: Vec<String> = content
            .lines()
            .next()
            .map(|line| {
                line.trim()
                    .split('\t')
                    .map(|name| name.trim().to_string())
                    .collect()
            })
            .unwrap_or_default();

        log::debug!(
            "Opened {} ({:?}, bom={}, {} columns)",
            path.display(),
            encoding,
            bom,
            header.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            encoding,
            bom,
            line_ending,
            content,
            header,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn line_ending(&self) -> &'static str {
        self.line_ending
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Index of a header column (exact name)
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|c| c == name)
    }

    /// Index of a header column, ignoring ASCII case
    pub fn column_ci(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|c| c.eq_ignore_ascii_case(name))
    }

    /// Data rows split into trimmed cells; blank lines are skipped
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        self.content
            .lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split('\t').map(str::trim).collect())
    }

    /// Highest all-digit value in `column` below the header
    pub fn max_id(&self, column: usize) -> Option<u64> {
        self.rows()
            .filter_map(|cells| cells.get(column).copied())
            .filter(|cell| is_numeric_id(cell))
            .filter_map(|cell| cell.parse::<u64>().ok())
            .max()
    }

    /// Highest existing id in `column` + 1; `default + 1` when there is none
    pub fn next_id(&self, column: Option<usize>, default: u64) -> u64 {
        column.and_then(|col| self.max_id(col)).unwrap_or(default) + 1
    }

    /// Numeric prefix of every line, header included
    pub fn leading_ids(&self) -> Vec<u64> {
        self.content
            .lines()
            .filter_map(|line| {
                let digits: String = line.chars().take_while(|c| c.is_ascii_digit()).collect();
                digits.parse().ok()
            })
            .collect()
    }

    /// Append rows after the existing content.
    ///
    /// A missing final line terminator is added first; the new rows are joined
    /// by the file's terminator without a trailing one.
    pub fn append_rows(&mut self, rows: &[String]) {
        if rows.is_empty() {
            return;
        }
        if !self.content.is_empty() && !self.content.ends_with('\n') {
            self.content.push_str(self.line_ending);
        }
        self.content.push_str(&rows.join(self.line_ending));
    }

    /// Drop data rows for which `keep` returns false; returns how many went
    pub fn retain_rows<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&[&str]) -> bool,
    {
        let mut removed = 0;
        let mut kept = String::with_capacity(self.content.len());
        for (idx, line) in self.content.split_inclusive('\n').enumerate() {
            if idx > 0 {
                let cells: Vec<&str> = line
                    .trim_end_matches(['\r', '\n'])
                    .split('\t')
                    .map(str::trim)
                    .collect();
                if !keep(&cells) {
                    removed += 1;
                    continue;
                }
            }
            kept.push_str(line);
        }
        if removed > 0 {
            self.content = kept;
        }
        removed
    }

    /// Encode back to bytes in the encoding it was read with
    pub fn to_bytes(&self) -> Vec<u8> {
        match self.encoding {
            Encoding::Utf8 => {
                let mut out = Vec::with_capacity(self.content.len() + 3);
                if self.bom {
                    let mut buf = [0u8; 4];
                    out.extend_from_slice(BOM.encode_utf8(&mut buf).as_bytes());
                }
                out.extend_from_slice(self.content.as_bytes());
                out
            }
            Encoding::Utf16Le => {
                let mut out = Vec::with_capacity(self.content.len() * 2 + 2);
                if self.bom {
                    out.extend_from_slice(&[0xFF, 0xFE]);
                }
                for unit in self.content.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
                out
            }
        }
    }

    /// Write to disk: temp file, fsync, rename
    pub fn save(&self) -> Result<()> {
        let data = self.to_bytes();
        let temp_path = self.path.with_extension("tmp");

        {
            let mut file = File::create(&temp_path)
                .with_context(|| format!("Failed to create {}", temp_path.display()))?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to replace {} with {}",
                self.path.display(),
                temp_path.display()
            )
        })?;

        log::debug!("Saved {} bytes to {}", data.len(), self.path.display());
        Ok(())
    }
}

fn decode_utf16le(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        bail!("odd byte count ({})", bytes.len());
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    Ok(String::from_utf16(&units)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(text: &str, bom: bool) -> Vec<u8> {
        let mut out = if bom { vec![0xFF, 0xFE] } else { Vec::new() };
        for unit in text.encode_utf16() {
            out.extend_from_slice(&unit.to_le_bytes());
        }
        out
    }

    #[test]
    fn test_detect_encoding() {
        assert_eq!(detect_encoding(&[0xFF, 0xFE, b'a', 0]), Encoding::Utf16Le);
        assert_eq!(detect_encoding(&utf16("teamid\tname", false)), Encoding::Utf16Le);
        assert_eq!(detect_encoding(b"teamid\tname\n1\tA"), Encoding::Utf8);
        assert_eq!(detect_encoding(b""), Encoding::Utf8);
    }

    #[test]
    fn test_header_and_ids() {
        let text = "\u{feff}teamid\tTeamName\n10\tA\n7\tB\nx\tC\n";
        let table = TableFile::from_bytes(Path::new("teams.txt"), &utf16(text, false)).unwrap();
        assert_eq!(table.header(), &["teamid", "TeamName"]);
        assert_eq!(table.column("teamid"), Some(0));
        assert_eq!(table.column("teamname"), None);
        assert_eq!(table.column_ci("teamname"), Some(1));
        assert_eq!(table.max_id(0), Some(10));
        assert_eq!(table.next_id(Some(0), 3), 11);
        assert_eq!(table.next_id(None, 254782), 254783);
        assert_eq!(table.next_id(Some(1), 1), 2);
    }

    #[test]
    fn test_next_id_ignores_default_when_ids_exist() {
        let table = TableFile::from_bytes(Path::new("links.txt"), b"artificialkey\n100\n").unwrap();
        assert_eq!(table.next_id(Some(0), 26_271), 101);

        let empty = TableFile::from_bytes(Path::new("links.txt"), b"artificialkey\n").unwrap();
        assert_eq!(empty.next_id(Some(0), 26_271), 26_272);
    }

    #[test]
    fn test_leading_ids() {
        let table = TableFile::from_bytes(
            Path::new("teamkits.txt"),
            b"teamkitid\tx\n17000\ta\n 5\tb\n17126x\tc",
        )
        .unwrap();
        assert_eq!(table.leading_ids(), vec![17000, 17126]);
    }

    #[test]
    fn test_append_adds_missing_terminator() {
        let mut table = TableFile::from_bytes(Path::new("t.txt"), b"a\tb\n1\t2").unwrap();
        table.append_rows(&["3\t4".to_string(), "5\t6".to_string()]);
        assert_eq!(table.content(), "a\tb\n1\t2\n3\t4\n5\t6");

        let mut table = TableFile::from_bytes(Path::new("t.txt"), b"a\tb\r\n1\t2\r\n").unwrap();
        table.append_rows(&["3\t4".to_string()]);
        assert_eq!(table.content(), "a\tb\r\n1\t2\r\n3\t4");

        let mut table = TableFile::from_bytes(Path::new("t.txt"), b"").unwrap();
        table.append_rows(&["x".to_string()]);
        assert_eq!(table.content(), "x");
    }

    #[test]
    fn test_retain_rows_keeps_header() {
        let mut table = TableFile::from_bytes(
            Path::new("links.txt"),
            b"teamid\tplayerid\n111592\t5\n111592\t6\n200\t5\n",
        )
        .unwrap();
        let removed = table.retain_rows(|cells| !(cells[0] == "111592" && cells[1] == "5"));
        assert_eq!(removed, 1);
        assert_eq!(table.content(), "teamid\tplayerid\n111592\t6\n200\t5\n");
    }

    #[test]
    fn test_utf16_roundtrip_keeps_bom() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("formations.txt");
        fs::write(&path, utf16("formationid\tname\r\n5\tX", true))?;

        let mut table = TableFile::open(&path)?;
        assert_eq!(table.encoding(), Encoding::Utf16Le);
        assert_eq!(table.line_ending(), "\r\n");
        table.append_rows(&["6\tY".to_string()]);
        table.save()?;

        let bytes = fs::read(&path)?;
        assert_eq!(bytes, utf16("formationid\tname\r\n5\tX\r\n6\tY", true));
        assert!(!path.with_extension("tmp").exists());
        Ok(())
    }

    #[test]
    fn test_utf8_bom_preserved() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("manager.txt");
        fs::write(&path, "\u{feff}managerid\n1\n")?;

        let mut table = TableFile::open(&path)?;
        assert_eq!(table.header(), &["managerid"]);
        table.append_rows(&["2".to_string()]);
        table.save()?;

        assert_eq!(fs::read_to_string(&path)?, "\u{feff}managerid\n1\n2");
        Ok(())
    }
}
