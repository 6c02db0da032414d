/// Target width for item descriptions in the certificate table.
pub const DESCRIPTION_WIDTH: usize = 40;
/// Chunk width for section labels.
pub const SECTION_WIDTH: usize = 15;

/// Greedy word wrap. Words are packed onto a line until the next one would
/// overflow `width`; a single word longer than `width` is split.
///
/// Widths count characters. Whitespace runs collapse to one space.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        for piece in chunk_chars(word, width) {
            let piece_len = piece.chars().count();
            let needed = if line_len == 0 { piece_len } else { line_len + 1 + piece_len };
            if needed > width && line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.push_str(&piece);
            line_len += piece_len;
        }
    }

    if line_len > 0 {
        lines.push(line);
    }
    lines
}

/// Hard wrap every `width` characters, ignoring word boundaries.
pub fn chunk_chars(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars.chunks(width).map(|c| c.iter().collect()).collect()
}
