use std::io::{self, BufRead};

use crate::storage::segmenter::LineKind;

/// Reads the full text of the record starting on line `start` (1-based).
///
/// The file is scanned from the beginning, and the first line is returned
/// together with every continuation line that belongs to it, verbatim.
/// Blank and comment lines are skipped exactly as the segmenter skips them,
/// so the length of the result equals the record's size.
///
/// Returns an empty string if `start` is not the first line of a record.
///
/// Example:
///
/// ```text
/// createNode transform -s -n "persp";
///     rename -uid "F1591FE8-416B-F4AE-B3B8-9C923044C14D";
///     setAttr ".v" no;
///     setAttr ".t" -type "double3" -319.18663032960933 136.34364156607776 410.86015622114041 ;
/// ```
pub(crate) fn read_detail<R: BufRead>(
    mut reader: R,
    start: usize,
    comment_marker: &str,
) -> io::Result<String> {
    let comment_marker = comment_marker.as_bytes();
    let mut detail = Vec::new();
    let mut buf = Vec::new();
    let mut line = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line += 1;

        let kind = LineKind::of(&buf, comment_marker);
        if line < start {
            continue;
        }
        if line == start {
            if kind != LineKind::Start {
                break;
            }
            detail.extend_from_slice(&buf);
            continue;
        }

        match kind {
            LineKind::Continuation => detail.extend_from_slice(&buf),
            LineKind::Blank | LineKind::Comment => {}
            LineKind::Start => break,
        }
    }

    Ok(String::from_utf8_lossy(&detail).into_owned())
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    const SCENE: &str = "\
//Maya ASCII 2018ff09 scene
createNode transform -s -n \"persp\";
\trename -uid \"BE01090D-497F-9171-93CC-2491F449EA81\";
\tsetAttr \".v\" no;

createNode audio -n \"happy_frog\";
\tsetAttr \".ef\" 2188.9502562925172;
//inline comment
\tsetAttr \".f\" -type \"string\" \"C:/bgm/happy-frog.wav\";
select -ne :time1;";

    fn detail(start: usize) -> String {
        read_detail(SCENE.as_bytes(), start, "//").unwrap()
    }

    #[test]
    fn returns_record_with_continuation_lines() {
        assert_eq!(
            detail(2),
            "createNode transform -s -n \"persp\";\n\trename -uid \"BE01090D-497F-9171-93CC-2491F449EA81\";\n\tsetAttr \".v\" no;\n"
        );
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert_eq!(
            detail(6),
            "createNode audio -n \"happy_frog\";\n\tsetAttr \".ef\" 2188.9502562925172;\n\tsetAttr \".f\" -type \"string\" \"C:/bgm/happy-frog.wav\";\n"
        );
    }

    #[test]
    fn last_record_without_newline() {
        assert_eq!(detail(10), "select -ne :time1;");
    }

    #[test_case(1 ; "comment line")]
    #[test_case(3 ; "continuation line")]
    #[test_case(5 ; "blank line")]
    #[test_case(0 ; "line zero")]
    #[test_case(99 ; "past end of file")]
    fn non_record_lines_are_empty(start: usize) {
        assert_eq!(detail(start), "");
    }
}
