//! Word counting.
//!
//! Each line has every annotation match removed, then the remaining
//! whitespace-separated tokens are counted. Invalid UTF-8 is replaced rather
//! than rejected so binary-ish files still get a count.

use regex::Regex;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub fn count_words(path: &Path, annotation: &Regex) -> io::Result<u64> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut buf = Vec::new();
    let mut count = 0u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        count += count_line(line, annotation);
    }

    Ok(count)
}

pub fn count_line(line: &str, annotation: &Regex) -> u64 {
    annotation.replace_all(line, "").split_whitespace().count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn no_annotations() -> Regex {
        Regex::new("").unwrap()
    }

    fn hash_comments() -> Regex {
        Regex::new("#.*$").unwrap()
    }

    #[test]
    fn counts_whitespace_separated_tokens() {
        assert_eq!(count_line("the quick  brown\tfox", &no_annotations()), 4);
        assert_eq!(count_line("", &no_annotations()), 0);
        assert_eq!(count_line("   ", &no_annotations()), 0);
    }

    #[test]
    fn strips_annotations_before_counting() {
        let pattern = hash_comments();
        assert_eq!(count_line("four words right here # and a note", &pattern), 4);
        assert_eq!(count_line("# whole line is a note", &pattern), 0);
    }

    #[test]
    fn annotation_stops_at_line_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("draft.txt");
        fs::write(&path, "one two # skip this\nthree four five\r\n# note\nsix").unwrap();

        assert_eq!(count_words(&path, &hash_comments()).unwrap(), 6);
        assert_eq!(count_words(&path, &no_annotations()).unwrap(), 11);
    }

    #[test]
    fn counts_a_large_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("250.txt");
        let line = "lorem ipsum dolor sit amet sed do eiusmod tempor incididunt\n";
        fs::write(&path, line.repeat(25)).unwrap();

        assert_eq!(count_words(&path, &no_annotations()).unwrap(), 250);
    }

    #[test]
    fn invalid_utf8_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mixed.txt");
        fs::write(&path, b"caf\xe9 au lait\n").unwrap();

        assert_eq!(count_words(&path, &no_annotations()).unwrap(), 3);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(count_words(&dir.path().join("gone.txt"), &no_annotations()).is_err());
    }
}
