//! Line index over one source text and the chunk emitter shared by both
//! splitters.
//!
//! All ranges here are inclusive line indices into [`SourceLines`]. The
//! emitter is the only place that turns ranges into [`ChunkResult`]s, so the
//! size bound and the blank-trimming rules live in one spot.

use crate::config::Limits;
use crate::types::ChunkResult;

/// Source text split on `\n`, with prefix sums for O(1) range sizes.
pub(crate) struct SourceLines<'a> {
    lines: Vec<&'a str>,
    /// `prefix[i]` is the byte length of lines `0..i`, each counted with its
    /// trailing newline.
    prefix: Vec<usize>,
}

impl<'a> SourceLines<'a> {
    pub fn new(content: &'a str) -> Self {
        let lines: Vec<&str> = content.split('\n').collect();
        let mut prefix = Vec::with_capacity(lines.len() + 1);
        prefix.push(0);
        let mut total = 0usize;
        for line in &lines {
            total += line.len() + 1;
            prefix.push(total);
        }
        Self { lines, prefix }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, idx: usize) -> &'a str {
        self.lines[idx]
    }

    pub fn is_blank(&self, idx: usize) -> bool {
        self.lines[idx].trim().is_empty()
    }

    /// Byte length of `lines[start..=end]` joined with `\n`
    pub fn text_len(&self, start: usize, end: usize) -> usize {
        self.prefix[end + 1] - self.prefix[start] - 1
    }

    pub fn join(&self, start: usize, end: usize) -> String {
        self.lines[start..=end].join("\n")
    }

    /// Whether any line in `start..end` (exclusive) has non-whitespace text
    pub fn has_code(&self, start: usize, end: usize) -> bool {
        (start..end.min(self.len())).any(|i| !self.is_blank(i))
    }
}

/// How the emitter breaks up a range that exceeds `max_chunk_size`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Oversize {
    /// Halve by line count until every piece fits
    Bisect,
    /// Greedy runs of whole lines up to `chunk_size`
    FixedSplit,
}

pub(crate) struct ChunkSink<'s, 'a> {
    lines: &'s SourceLines<'a>,
    limits: Limits,
    oversize: Oversize,
    chunks: Vec<ChunkResult>,
}

impl<'s, 'a> ChunkSink<'s, 'a> {
    pub fn new(lines: &'s SourceLines<'a>, limits: Limits, oversize: Oversize) -> Self {
        Self {
            lines,
            limits,
            oversize,
            chunks: Vec::new(),
        }
    }

    pub fn lines(&self) -> &'s SourceLines<'a> {
        self.lines
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn finish(self) -> Vec<ChunkResult> {
        self.chunks
    }

    /// Emit `start..=end` as one or more chunks. Blank edges are trimmed and
    /// all-blank ranges produce nothing.
    pub fn emit(&mut self, start: usize, end: usize) {
        assert!(
            start <= end && end < self.lines.len(),
            "invalid line range {start}..={end} for {} lines",
            self.lines.len()
        );

        let Some((start, end)) = self.trim(start, end) else {
            return;
        };

        if self.lines.text_len(start, end) <= self.limits.max_chunk_size {
            self.push(start, end);
            return;
        }

        match self.oversize {
            Oversize::Bisect => self.bisect(start, end),
            Oversize::FixedSplit => self.fixed_split(start, end),
        }
    }

    fn bisect(&mut self, start: usize, end: usize) {
        let mut work = vec![(start, end)];
        while let Some((s, e)) = work.pop() {
            let Some((s, e)) = self.trim(s, e) else {
                continue;
            };
            if self.lines.text_len(s, e) <= self.limits.max_chunk_size {
                self.push(s, e);
            } else if s == e {
                self.hard_split(s);
            } else {
                let mid = s + (e - s) / 2;
                // Right half first so the left half pops next.
                work.push((mid + 1, e));
                work.push((s, mid));
            }
        }
    }

    /// Non-overlapping runs of whole lines, each at most `chunk_size` unless a
    /// single line is longer. Lines over `max_chunk_size` are hard-split.
    pub fn fixed_split(&mut self, start: usize, end: usize) {
        let mut pos = start;
        while pos <= end {
            if self.lines.is_blank(pos) {
                pos += 1;
                continue;
            }
            if self.lines.text_len(pos, pos) > self.limits.max_chunk_size {
                self.hard_split(pos);
                pos += 1;
                continue;
            }

            let mut last = pos;
            while last < end && self.lines.text_len(pos, last + 1) <= self.limits.chunk_size {
                last += 1;
            }
            if let Some((s, e)) = self.trim(pos, last) {
                self.push(s, e);
            }
            pos = last + 1;
        }
    }

    /// Cut one over-long line into `chunk_size` byte windows on char
    /// boundaries. Every fragment reports the same line.
    fn hard_split(&mut self, idx: usize) {
        let text = self.lines.line(idx);
        let line_no = line_number(idx);
        let mut offset = 0;
        while offset < text.len() {
            let mut cut = (offset + self.limits.chunk_size).min(text.len());
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            if cut == offset {
                cut = text[offset..]
                    .chars()
                    .next()
                    .map_or(text.len(), |c| offset + c.len_utf8());
            }
            let piece = &text[offset..cut];
            if !piece.trim().is_empty() {
                self.chunks
                    .push(ChunkResult::new(piece.to_string(), line_no, line_no));
            }
            offset = cut;
        }
    }

    fn trim(&self, mut start: usize, mut end: usize) -> Option<(usize, usize)> {
        while start <= end && self.lines.is_blank(start) {
            start += 1;
        }
        while end > start && self.lines.is_blank(end) {
            end -= 1;
        }
        (start <= end && !self.lines.is_blank(start)).then_some((start, end))
    }

    fn push(&mut self, start: usize, end: usize) {
        self.chunks.push(ChunkResult::new(
            self.lines.join(start, end),
            line_number(start),
            line_number(end),
        ));
    }
}

pub(crate) fn line_number(idx: usize) -> u32 {
    u32::try_from(idx).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChunkerConfig;
    use pretty_assertions::assert_eq;

    fn limits(chunk_size: usize, max: usize) -> Limits {
        ChunkerConfig {
            chunk_size,
            overlap: 0,
            max_chunk_size: Some(max),
        }
        .limits()
    }

    #[test]
    fn test_text_len_matches_join() {
        let lines = SourceLines::new("ab\n\ncdef\ng");
        assert_eq!(lines.len(), 4);
        for s in 0..4 {
            for e in s..4 {
                assert_eq!(lines.text_len(s, e), lines.join(s, e).len());
            }
        }
    }

    #[test]
    fn test_emit_trims_blank_edges() {
        let lines = SourceLines::new("\n  \nfoo\nbar\n\n");
        let mut sink = ChunkSink::new(&lines, limits(100, 300), Oversize::Bisect);
        sink.emit(0, lines.len() - 1);
        sink.emit(0, 1);
        let chunks = sink.finish();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "foo\nbar");
        assert_eq!((chunks[0].start_line, chunks[0].end_line), (2, 3));
    }

    #[test]
    fn test_bisect_keeps_order_and_bound() {
        let content = (0..40)
            .map(|i| format!("line number {i:02}"))
            .collect::<Vec<_>>()
            .join("\n");
        let lines = SourceLines::new(&content);
        let mut sink = ChunkSink::new(&lines, limits(40, 100), Oversize::Bisect);
        sink.emit(0, 39);
        let chunks = sink.finish();

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.content.len() <= 100));
        for pair in chunks.windows(2) {
            assert_eq!(pair[1].start_line, pair[0].end_line + 1);
        }
        assert_eq!(chunks.first().unwrap().start_line, 0);
        assert_eq!(chunks.last().unwrap().end_line, 39);
    }

    #[test]
    fn test_hard_split_respects_char_boundaries() {
        let long = "é".repeat(50);
        let lines = SourceLines::new(&long);
        let mut sink = ChunkSink::new(&lines, limits(7, 21), Oversize::FixedSplit);
        sink.emit(0, 0);
        let chunks = sink.finish();

        assert!(chunks.len() > 1);
        assert_eq!(chunks.iter().map(|c| c.content.as_str()).collect::<String>(), long);
        assert!(chunks.iter().all(|c| c.content.len() <= 7));
        assert!(chunks.iter().all(|c| c.start_line == 0 && c.end_line == 0));
    }

    #[test]
    fn test_fixed_split_is_line_respecting() {
        let content = "aaaa\nbbbb\ncccc\ndddd\neeee";
        let lines = SourceLines::new(content);
        let mut sink = ChunkSink::new(&lines, limits(9, 12), Oversize::FixedSplit);
        sink.emit(0, 4);
        let chunks = sink.finish();
        let ranges: Vec<(u32, u32)> = chunks.iter().map(|c| (c.start_line, c.end_line)).collect();
        assert_eq!(ranges, vec![(0, 1), (2, 3), (4, 4)]);
    }

    #[test]
    #[should_panic(expected = "invalid line range")]
    fn test_emit_rejects_inverted_range() {
        let lines = SourceLines::new("a\nb");
        let mut sink = ChunkSink::new(&lines, limits(10, 30), Oversize::Bisect);
        sink.emit(1, 0);
    }
}
